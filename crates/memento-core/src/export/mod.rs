//! Date-range archive export.
//!
//! Archive layout:
//!
//! ```text
//! <date>_<title>.md
//! images/<date>_<title>_<random6>.<ext>
//! manifest.json
//! ```

mod archive;
mod document;
mod exporter;
mod fetch;
mod image;
mod sanitize;
mod unit;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use url::Url;

use crate::error::{MementoError, Result};

pub use archive::{ArchiveWriter, MANIFEST_NAME};
pub use document::render_document;
pub use exporter::{select_entries, ArchiveExporter, ExportPhase};
pub use fetch::{HttpImageFetcher, ImageFetcher, DEFAULT_FETCH_TIMEOUT};
pub use image::{extension_from_reference, ImageSource, InlineImage, DEFAULT_EXTENSION};
pub use sanitize::{sanitize_title, MAX_TITLE_CHARS, UNTITLED};
pub use unit::{ExportUnit, ImageOutcome, ResolvedImage, IMAGES_DIR};

/// Archive name prefix; the export date is appended.
pub const ARCHIVE_PREFIX: &str = "memento_export";

/// Inclusive range of entry dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// # Errors
    ///
    /// Returns `MementoError::InvalidInput` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(MementoError::InvalidInput(format!(
                "export range starts ({}) after it ends ({})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Export configuration, passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Base URL that same-origin image paths resolve against. Without it,
    /// server images are skipped.
    pub origin: Option<Url>,
    /// Seed for image name suffixes, for reproducible archives.
    pub seed: Option<u64>,
    /// Raised by the caller to stop the export between entries.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, origin: Url) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// `memento_export_<YYYY-MM-DD>.tar.gz`
    pub fn archive_file_name(&self, now: DateTime<Utc>) -> String {
        format!("{}_{}.tar.gz", ARCHIVE_PREFIX, now.format("%Y-%m-%d"))
    }
}

/// Counts from a finished export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Exported entry dates, ascending.
    pub dates: Vec<NaiveDate>,
    pub images_resolved: usize,
    pub images_skipped: usize,
}

/// A finished archive, ready to hand to the user.
#[derive(Debug, Clone)]
pub struct ExportArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub report: ExportReport,
}

impl ExportArchive {
    /// Write the archive into `dir` atomically and return its path.
    ///
    /// # Errors
    ///
    /// Returns `MementoError::Packaging` if the file cannot be written; no
    /// partial file is left behind.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        crate::fs::write_atomic(&path, &self.bytes).map_err(|e| {
            MementoError::Packaging(format!("failed to write {}: {}", path.display(), e))
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert!(DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).is_err());
        let single = DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert!(single.contains(date(2024, 1, 1)));
        assert!(!single.contains(date(2024, 1, 2)));
    }

    #[test]
    fn test_archive_file_name_uses_export_date() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 22, 5, 0).unwrap();
        assert_eq!(
            ExportOptions::default().archive_file_name(now),
            "memento_export_2026-10-19.tar.gz"
        );
    }
}
