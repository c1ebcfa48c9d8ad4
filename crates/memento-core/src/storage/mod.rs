//! Journal persistence boundary.
//!
//! The journal (entries, goals, special days) is owned by the caller. This
//! module defines its wire format and the store trait used to read and
//! replace it.

mod json_file;
mod traits;
mod types;

pub use json_file::JsonFileStore;
pub use traits::{JournalStore, MemoryStore};
pub use types::{
    parse_date_key, EntryRecord, ImageField, JournalDocument, JournalSnapshot, DATE_KEY_FORMAT,
};
