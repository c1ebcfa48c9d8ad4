//! Per-entry export units. They live only for one export call.

use chrono::NaiveDate;

use crate::entry::DiaryEntry;

/// Directory inside the archive holding image files.
pub const IMAGES_DIR: &str = "images";

/// An image resolved to bytes, named for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ResolvedImage {
    /// Path relative to the archive root, as linked from documents.
    pub fn archive_path(&self) -> String {
        format!("{}/{}", IMAGES_DIR, self.file_name)
    }
}

/// Result of resolving one image slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOutcome {
    Resolved(ResolvedImage),
    Skipped { reference: String, reason: String },
}

impl ImageOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ImageOutcome::Resolved(_))
    }
}

/// One entry with its resolved images and generated document.
#[derive(Debug, Clone)]
pub struct ExportUnit<'a> {
    pub entry: &'a DiaryEntry,
    pub file_stem: String,
    pub images: Vec<ImageOutcome>,
    pub document: String,
}

impl ExportUnit<'_> {
    pub fn date(&self) -> NaiveDate {
        self.entry.date
    }

    pub fn document_name(&self) -> String {
        format!("{}.md", self.file_stem)
    }

    pub fn resolved_images(&self) -> impl Iterator<Item = &ResolvedImage> {
        self.images.iter().filter_map(|outcome| match outcome {
            ImageOutcome::Resolved(image) => Some(image),
            ImageOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped_count(&self) -> usize {
        self.images.iter().filter(|o| !o.is_resolved()).count()
    }
}
