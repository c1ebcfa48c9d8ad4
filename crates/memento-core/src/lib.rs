//! # Memento Core
//!
//! Core library for Memento - a personal life journal built around a
//! date-keyed diary.
//!
//! This crate holds the temporal aggregation and archival-export engine,
//! independent of any interface or persistence backend.
//!
//! ## Architecture
//!
//! - **entry**: Diary entries, moods and image slots
//! - **clock**: Life clock metrics derived from a birth date
//! - **heatmap**: Monday-aligned year grids and selectable display years
//! - **goals**: Goal visibility window and completion toggling
//! - **special_days**: Anniversaries, plans and the upcoming list
//! - **export**: Date-range archive export with image resolution
//! - **storage**: Journal snapshot wire format and the store trait

pub mod clock;
pub mod entry;
pub mod error;
pub mod export;
pub mod fs;
pub mod goals;
pub mod heatmap;
pub mod special_days;
pub mod storage;

pub use clock::{LifeClock, LifeSettings};
pub use entry::{DiaryEntry, EntryMap, ImageSlot, Mood};
pub use error::{MementoError, Result};
pub use export::{ArchiveExporter, DateRange, ExportArchive, ExportOptions};
pub use goals::{Goal, GoalLedger};
pub use heatmap::{HeatmapCell, Intensity, TemporalIndex, YearGrid};
pub use special_days::{SpecialDay, SpecialDayKind, UpcomingDay};
pub use storage::{JournalSnapshot, JournalStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
