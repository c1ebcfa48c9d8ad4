//! JSON file journal store.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::traits::JournalStore;
use super::types::JournalSnapshot;
use crate::error::{MementoError, Result};
use crate::fs::write_atomic;

/// Journal stored as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JournalStore for JsonFileStore {
    fn load(&self) -> Result<JournalSnapshot> {
        let contents = std::fs::read_to_string(&self.path).map_err(|err| {
            if err.kind() == std::io::ErrorKind::NotFound {
                MementoError::NotFound(format!("journal {}", self.path.display()))
            } else {
                MementoError::Storage(format!(
                    "failed to read journal {}: {}",
                    self.path.display(),
                    err
                ))
            }
        })?;
        let snapshot = JournalSnapshot::from_json(&contents)?;
        debug!(
            path = %self.path.display(),
            entries = snapshot.entries.len(),
            goals = snapshot.goals.len(),
            special_days = snapshot.special_days.len(),
            "loaded journal"
        );
        Ok(snapshot)
    }

    fn save(&self, snapshot: &JournalSnapshot) -> Result<()> {
        let json = snapshot.to_json_pretty()?;
        write_atomic(&self.path, json.as_bytes())?;
        debug!(path = %self.path.display(), "saved journal");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::Goal;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("journal.json"));
        assert!(matches!(store.load(), Err(MementoError::NotFound(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("journal.json"));
        let snapshot = JournalSnapshot {
            goals: vec![Goal::new(4, "swim")],
            ..JournalSnapshot::default()
        };

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), snapshot);

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "journal.json")
            .collect();
        assert!(leftovers.is_empty());
    }
}
