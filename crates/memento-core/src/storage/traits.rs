//! Journal store trait definition.
//!
//! The engine never fetches the journal itself. Callers inject a
//! `JournalStore` so that where the journal lives (a file, a server dump, a
//! test fixture) stays outside the core.

use super::types::JournalSnapshot;
use crate::error::Result;

/// Read/write access to the journal snapshot.
///
/// Implementations must ensure:
/// - `load` returns normalized entries (canonical multi-image shape)
/// - `save` is atomic: a failed save leaves the previous snapshot intact
pub trait JournalStore: Send + Sync {
    /// Load the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `MementoError::NotFound` if the journal does not exist, and
    /// `MementoError::Validation` if it cannot be parsed.
    fn load(&self) -> Result<JournalSnapshot>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `MementoError::Storage` if the snapshot cannot be written.
    fn save(&self, snapshot: &JournalSnapshot) -> Result<()>;
}

/// Store backed by a value in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: std::sync::Mutex<JournalSnapshot>,
}

impl MemoryStore {
    pub fn new(snapshot: JournalSnapshot) -> Self {
        Self {
            snapshot: std::sync::Mutex::new(snapshot),
        }
    }
}

impl JournalStore for MemoryStore {
    fn load(&self) -> Result<JournalSnapshot> {
        self.snapshot
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| crate::error::MementoError::Storage("memory store poisoned".into()))
    }

    fn save(&self, snapshot: &JournalSnapshot) -> Result<()> {
        let mut guard = self
            .snapshot
            .lock()
            .map_err(|_| crate::error::MementoError::Storage("memory store poisoned".into()))?;
        *guard = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::Goal;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_store(_store: &dyn JournalStore) {}
    }

    #[test]
    fn test_memory_store_replaces_snapshot() {
        let store = MemoryStore::default();
        assert!(store.load().unwrap().goals.is_empty());

        let snapshot = JournalSnapshot {
            goals: vec![Goal::new(1, "read more")],
            ..JournalSnapshot::default()
        };
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);
    }
}
