//! Diary entries.
//!
//! An entry is keyed by its calendar date; the collection handed to the
//! engine is a [`EntryMap`], so iteration is always in ascending date order.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date-keyed entry collection. One entry per date.
pub type EntryMap = BTreeMap<NaiveDate, DiaryEntry>;

/// Mood recorded on an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    #[default]
    Neutral,
    Happy,
    Sad,
}

impl Mood {
    /// Parse a stored mood label, accepting the aliases older clients wrote.
    ///
    /// Unknown labels fall back to neutral, which is what the backend stores
    /// when no mood was chosen.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "happy" | "positive" | "good" | "great" | "excited" => Mood::Happy,
            "sad" | "negative" | "hard" | "bad" | "tired" | "angry" => Mood::Sad,
            _ => Mood::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::Sad => "sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One attached image: the display reference plus its high-resolution
/// original, which newly attached images do not have yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSlot {
    pub display: String,
    pub original: Option<String>,
}

impl ImageSlot {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            original: None,
        }
    }

    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = Some(original.into());
        self
    }

    /// Reference to export: the original when present, else the display one.
    pub fn preferred(&self) -> &str {
        self.original.as_deref().unwrap_or(&self.display)
    }
}

/// A diary entry for a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub date: NaiveDate,
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Mood,
    pub images: Vec<ImageSlot>,
}

impl DiaryEntry {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            title: None,
            content: None,
            mood: Mood::Neutral,
            images: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = mood;
        self
    }

    pub fn with_image(mut self, slot: ImageSlot) -> Self {
        self.images.push(slot);
        self
    }

    /// Title with surrounding whitespace removed, `None` when blank.
    pub fn title_text(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    /// Content, `None` when blank.
    pub fn content_text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_aliases() {
        assert_eq!(Mood::parse_lenient("Happy"), Mood::Happy);
        assert_eq!(Mood::parse_lenient("hard"), Mood::Sad);
        assert_eq!(Mood::parse_lenient(" negative "), Mood::Sad);
        assert_eq!(Mood::parse_lenient("meh"), Mood::Neutral);
        assert_eq!(Mood::parse_lenient(""), Mood::Neutral);
    }

    #[test]
    fn test_preferred_image_reference() {
        let fresh = ImageSlot::new("/static/thumbnails/a_thumb.jpg");
        assert_eq!(fresh.preferred(), "/static/thumbnails/a_thumb.jpg");

        let saved = fresh.with_original("/static/originals/a.png");
        assert_eq!(saved.preferred(), "/static/originals/a.png");
    }

    #[test]
    fn test_blank_title_and_content() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entry = DiaryEntry::new(date).with_title("   ").with_content("\n");
        assert_eq!(entry.title_text(), None);
        assert_eq!(entry.content_text(), None);

        let entry = entry.with_title(" Spring ");
        assert_eq!(entry.title_text(), Some("Spring"));
    }
}
