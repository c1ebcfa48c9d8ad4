//! Path resolution for config and journal files.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::Cli;
use crate::config::{default_config_path, default_journal_path, read_config, MementoConfig};
use crate::constants::{exit_codes, CONFIG_ENV};

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(CONFIG_ENV) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Load the config file, or defaults when none exists.
pub fn load_config() -> anyhow::Result<MementoConfig> {
    let path = resolve_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(MementoConfig::default());
    }
    read_config(&path)
}

/// `--journal` / `MEMENTO_JOURNAL`, then the config file, then the XDG
/// data dir.
pub fn resolve_journal_path(cli: &Cli, config: &MementoConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.journal.as_deref() {
        return Ok(PathBuf::from(path));
    }
    if let Some(path) = config.journal.path.as_deref() {
        return Ok(PathBuf::from(path));
    }
    default_journal_path()
}

pub fn missing_journal_message(path: &Path) -> String {
    format!("No journal found at {}", path.display())
}

pub fn missing_journal_hint() -> &'static str {
    "Hint: Point memento at a journal file:\n  memento --journal /path/to/journal.json <command>\nOr set [journal] path in config.toml."
}

pub fn exit_not_found_with_hint(message: &str, hint: &str) -> ! {
    eprintln!("Error: {}", message);
    eprintln!("{}", hint);
    std::process::exit(exit_codes::NOT_FOUND);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_journal_copy() {
        let message = missing_journal_message(Path::new("/tmp/none.json"));
        assert!(message.contains("/tmp/none.json"));
        assert!(missing_journal_hint().contains("--journal"));
    }
}
