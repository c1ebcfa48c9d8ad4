//! The archive exporter.
//!
//! One export walks `idle → selecting → resolving-images → packaging` and
//! ends in `done` or `failed`. Only an empty selection, a cancellation or a
//! packaging fault fails the export; a bad image is skipped and noted in its
//! entry's document.

use std::collections::HashSet;
use std::sync::atomic::Ordering;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::entry::{DiaryEntry, EntryMap};
use crate::error::{MementoError, Result};

use super::archive;
use super::document::render_document;
use super::fetch::ImageFetcher;
use super::image::{extension_from_reference, short_reference, ImageSource};
use super::sanitize::sanitize_title;
use super::unit::{ExportUnit, ImageOutcome, ResolvedImage};
use super::{DateRange, ExportArchive, ExportOptions, ExportReport};

const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// Stage of one export invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPhase {
    Idle,
    Selecting,
    ResolvingImages,
    Packaging,
    Done,
    Failed,
}

impl ExportPhase {
    /// Whether `next` is a legal successor of this phase.
    pub fn can_advance_to(self, next: ExportPhase) -> bool {
        use ExportPhase::*;
        matches!(
            (self, next),
            (Idle, Selecting)
                | (Selecting, ResolvingImages)
                | (ResolvingImages, Packaging)
                | (Packaging, Done)
                | (Selecting | ResolvingImages | Packaging, Failed)
        )
    }

    fn advance(&mut self, next: ExportPhase) {
        debug_assert!(self.can_advance_to(next), "{:?} -> {:?}", self, next);
        debug!(from = ?*self, to = ?next, "export phase");
        *self = next;
    }
}

/// Exports a date range of entries into one archive.
///
/// Entries and their images are processed strictly in ascending date order,
/// one fetch at a time, so the same input range always yields the same
/// documents in the same order.
pub struct ArchiveExporter<F> {
    fetcher: F,
    options: ExportOptions,
}

impl<F: ImageFetcher> ArchiveExporter<F> {
    pub fn new(fetcher: F, options: ExportOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export every entry dated within `range`.
    ///
    /// # Errors
    ///
    /// - `MementoError::EmptyExport` if no entry falls in the range
    /// - `MementoError::Cancelled` if the cancel flag was raised
    /// - `MementoError::Packaging` if the archive could not be assembled
    pub async fn export(
        &self,
        entries: &EntryMap,
        range: DateRange,
        now: DateTime<Utc>,
    ) -> Result<ExportArchive> {
        let mut phase = ExportPhase::Idle;
        let result = self.run(entries, range, now, &mut phase).await;
        match &result {
            Ok(archive) => {
                phase.advance(ExportPhase::Done);
                info!(
                    file = %archive.file_name,
                    entries = archive.report.dates.len(),
                    images = archive.report.images_resolved,
                    skipped = archive.report.images_skipped,
                    "export complete"
                );
            }
            Err(err) => {
                phase.advance(ExportPhase::Failed);
                warn!(error = %err, range = %range, "export failed");
            }
        }
        result
    }

    async fn run(
        &self,
        entries: &EntryMap,
        range: DateRange,
        now: DateTime<Utc>,
        phase: &mut ExportPhase,
    ) -> Result<ExportArchive> {
        phase.advance(ExportPhase::Selecting);
        let selected = select_entries(entries, range);
        if selected.is_empty() {
            return Err(MementoError::EmptyExport {
                start: range.start.to_string(),
                end: range.end.to_string(),
            });
        }
        debug!(count = selected.len(), "selected entries");

        phase.advance(ExportPhase::ResolvingImages);
        let mut rng = match self.options.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let mut used_names = HashSet::new();
        let mut units = Vec::with_capacity(selected.len());
        for entry in selected {
            self.check_cancelled()?;
            units.push(self.build_unit(entry, &mut rng, &mut used_names).await);
        }

        phase.advance(ExportPhase::Packaging);
        let bytes = archive::package(&units, now)?;

        let report = ExportReport {
            dates: units.iter().map(ExportUnit::date).collect(),
            images_resolved: units.iter().map(|u| u.resolved_images().count()).sum(),
            images_skipped: units.iter().map(ExportUnit::skipped_count).sum(),
        };
        Ok(ExportArchive {
            file_name: self.options.archive_file_name(now),
            bytes,
            report,
        })
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.options.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(MementoError::Cancelled),
            _ => Ok(()),
        }
    }

    async fn build_unit<'a>(
        &self,
        entry: &'a DiaryEntry,
        rng: &mut fastrand::Rng,
        used_names: &mut HashSet<String>,
    ) -> ExportUnit<'a> {
        let file_stem = format!(
            "{}_{}",
            entry.date.format("%Y-%m-%d"),
            sanitize_title(entry.title.as_deref())
        );

        let mut images = Vec::with_capacity(entry.images.len());
        for slot in &entry.images {
            let reference = slot.preferred();
            let outcome = match self.resolve(reference).await {
                Ok((bytes, extension)) => ImageOutcome::Resolved(ResolvedImage {
                    file_name: unique_image_name(&file_stem, &extension, rng, used_names),
                    bytes,
                }),
                Err(err) => {
                    warn!(
                        date = %entry.date,
                        reference = short_reference(reference),
                        error = %err,
                        "skipping image"
                    );
                    ImageOutcome::Skipped {
                        reference: reference.to_string(),
                        reason: err.to_string(),
                    }
                }
            };
            images.push(outcome);
        }

        let document = render_document(entry, &images);
        ExportUnit {
            entry,
            file_stem,
            images,
            document,
        }
    }

    /// Resolve one reference to bytes and a file extension.
    async fn resolve(&self, reference: &str) -> Result<(Vec<u8>, String)> {
        match ImageSource::classify(reference)? {
            ImageSource::SameOrigin(path) => {
                let origin = self.options.origin.as_ref().ok_or_else(|| {
                    MementoError::Fetch("no origin configured for server images".to_string())
                })?;
                let url = origin
                    .join(&path)
                    .map_err(|e| MementoError::Fetch(format!("invalid image path {}: {}", path, e)))?;
                let bytes = self.fetcher.fetch(&url).await?;
                Ok((bytes, extension_from_reference(&path)))
            }
            ImageSource::Inline(image) => {
                let extension = image.extension().to_string();
                Ok((image.bytes, extension))
            }
            ImageSource::External(url) => {
                let bytes = self.fetcher.fetch(&url).await?;
                Ok((bytes, extension_from_reference(url.path())))
            }
            ImageSource::LocalPreview => Err(MementoError::Fetch(
                "unsaved local preview".to_string(),
            )),
            ImageSource::Unsupported => Err(MementoError::Fetch(
                "unsupported image reference".to_string(),
            )),
        }
    }
}

/// Entries dated within `range`, ascending.
pub fn select_entries(entries: &EntryMap, range: DateRange) -> Vec<&DiaryEntry> {
    entries.range(range.start..=range.end).map(|(_, entry)| entry).collect()
}

fn unique_image_name(
    stem: &str,
    extension: &str,
    rng: &mut fastrand::Rng,
    used_names: &mut HashSet<String>,
) -> String {
    loop {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.usize(..SUFFIX_ALPHABET.len())] as char)
            .collect();
        let name = format!("{}_{}.{}", stem, suffix, extension);
        if used_names.insert(name.clone()) {
            return name;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        use ExportPhase::*;
        assert!(Idle.can_advance_to(Selecting));
        assert!(Selecting.can_advance_to(Failed));
        assert!(Packaging.can_advance_to(Done));
        assert!(!Idle.can_advance_to(Packaging));
        assert!(!Selecting.can_advance_to(Done));
        assert!(!Done.can_advance_to(Failed));
    }

    #[test]
    fn test_unique_names_do_not_collide() {
        let mut rng = fastrand::Rng::with_seed(7);
        let mut used = HashSet::new();
        let names: Vec<String> = (0..200)
            .map(|_| unique_image_name("2024-01-01_Untitled", "jpg", &mut rng, &mut used))
            .collect();
        assert_eq!(used.len(), 200);
        let first = &names[0];
        assert!(first.starts_with("2024-01-01_Untitled_"));
        assert!(first.ends_with(".jpg"));
        let suffix = &first["2024-01-01_Untitled_".len()..first.len() - 4];
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)));
    }
}
