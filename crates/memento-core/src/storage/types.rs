//! Wire types for the journal snapshot.
//!
//! Entry records arrive in several historical shapes: a single `image` /
//! `imageOriginal` string, `images` / `imagesOriginal` arrays, or arrays
//! stored as JSON-encoded strings. They are normalized into
//! [`DiaryEntry::images`] on load and written back in the array shape only.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entry::{DiaryEntry, EntryMap, ImageSlot, Mood};
use crate::error::{MementoError, Result};
use crate::goals::Goal;
use crate::special_days::SpecialDay;

/// Key format of the entry map.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// An image list field in any of its historical encodings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    Many(Vec<Option<String>>),
    One(String),
}

impl ImageField {
    /// Flatten to positional references; blank strings become `None`.
    fn into_refs(self) -> Vec<Option<String>> {
        let refs = match self {
            ImageField::Many(refs) => refs,
            ImageField::One(value) => {
                let trimmed = value.trim();
                if trimmed.starts_with('[') {
                    serde_json::from_str::<Vec<Option<String>>>(trimmed)
                        .unwrap_or_else(|_| vec![Some(value)])
                } else {
                    vec![Some(value)]
                }
            }
        };
        refs.into_iter()
            .map(|r| r.filter(|value| !value.trim().is_empty()))
            .collect()
    }
}

/// One entry as stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing)]
    pub image: Option<ImageField>,
    #[serde(default, skip_serializing)]
    pub image_original: Option<ImageField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<ImageField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images_original: Option<ImageField>,
}

impl EntryRecord {
    /// Normalize into the canonical entry shape.
    pub fn into_entry(self, date: NaiveDate) -> DiaryEntry {
        let display = self
            .images
            .or(self.image)
            .map(ImageField::into_refs)
            .unwrap_or_default();
        let originals = self
            .images_original
            .or(self.image_original)
            .map(ImageField::into_refs)
            .unwrap_or_default();

        // Slots pair up by position. A slot needs at least one reference;
        // an original without a display reference is shown as itself.
        let slot_count = display.len().max(originals.len());
        let mut display = display.into_iter();
        let mut originals = originals.into_iter();
        let images = (0..slot_count)
            .filter_map(|_| {
                let shown = display.next().flatten();
                let original = originals.next().flatten();
                match (shown, original) {
                    (Some(shown), original) => Some(ImageSlot {
                        display: shown,
                        original,
                    }),
                    (None, Some(original)) => Some(ImageSlot {
                        display: original.clone(),
                        original: Some(original),
                    }),
                    (None, None) => None,
                }
            })
            .collect();

        DiaryEntry {
            date,
            title: self.title,
            content: self.content,
            mood: self
                .mood
                .as_deref()
                .map(Mood::parse_lenient)
                .unwrap_or_default(),
            images,
        }
    }
}

impl From<&DiaryEntry> for EntryRecord {
    fn from(entry: &DiaryEntry) -> Self {
        let (images, images_original) = if entry.images.is_empty() {
            (None, None)
        } else {
            (
                Some(ImageField::Many(
                    entry.images.iter().map(|s| Some(s.display.clone())).collect(),
                )),
                Some(ImageField::Many(
                    entry.images.iter().map(|s| s.original.clone()).collect(),
                )),
            )
        };
        Self {
            title: entry.title.clone(),
            content: entry.content.clone(),
            mood: Some(entry.mood.as_str().to_string()),
            image: None,
            image_original: None,
            images,
            images_original,
        }
    }
}

/// On-disk document: everything keyed by strings, as the backend sends it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalDocument {
    #[serde(default)]
    pub entries: BTreeMap<String, EntryRecord>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub special_days: Vec<SpecialDay>,
}

/// Normalized journal contents handed to the engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalSnapshot {
    pub entries: EntryMap,
    pub goals: Vec<Goal>,
    pub special_days: Vec<SpecialDay>,
}

impl JournalSnapshot {
    /// Parse and normalize a JSON journal document.
    ///
    /// # Errors
    ///
    /// Returns `MementoError::Validation` if the JSON is malformed or an entry
    /// key is not a `YYYY-MM-DD` date.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: JournalDocument = serde_json::from_str(json)?;
        Self::try_from(document)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&JournalDocument::from(self))?)
    }
}

impl TryFrom<JournalDocument> for JournalSnapshot {
    type Error = MementoError;

    fn try_from(document: JournalDocument) -> Result<Self> {
        let entries = document
            .entries
            .into_iter()
            .map(|(key, record)| {
                let date = parse_date_key(&key)?;
                Ok((date, record.into_entry(date)))
            })
            .collect::<Result<EntryMap>>()?;

        Ok(Self {
            entries,
            goals: document.goals,
            special_days: document.special_days,
        })
    }
}

impl From<&JournalSnapshot> for JournalDocument {
    fn from(snapshot: &JournalSnapshot) -> Self {
        Self {
            entries: snapshot
                .entries
                .iter()
                .map(|(date, entry)| (date.format(DATE_KEY_FORMAT).to_string(), entry.into()))
                .collect(),
            goals: snapshot.goals.clone(),
            special_days: snapshot.special_days.clone(),
        }
    }
}

/// Parse an entry map key.
pub fn parse_date_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT)
        .map_err(|_| MementoError::Validation(format!("invalid entry date key: {}", key)))
}
