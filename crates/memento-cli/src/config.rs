use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use memento_core::clock::DEFAULT_LIFE_EXPECTANCY_YEARS;
use memento_core::export::DEFAULT_FETCH_TIMEOUT;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MementoConfig {
    #[serde(default)]
    pub journal: JournalSection,
    #[serde(default)]
    pub profile: ProfileSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JournalSection {
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileSection {
    /// YYYY-MM-DD
    pub birth_date: Option<String>,
    #[serde(default = "default_life_expectancy")]
    pub life_expectancy: f64,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            birth_date: None,
            life_expectancy: default_life_expectancy(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportSection {
    pub origin: Option<String>,
    pub output_dir: Option<String>,
    #[serde(default = "default_fetch_timeout_seconds")]
    pub fetch_timeout_seconds: u64,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            origin: None,
            output_dir: None,
            fetch_timeout_seconds: default_fetch_timeout_seconds(),
        }
    }
}

fn default_life_expectancy() -> f64 {
    DEFAULT_LIFE_EXPECTANCY_YEARS
}

fn default_fetch_timeout_seconds() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_journal_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("journal.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<MementoConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("memento"));
        }
    }
    Ok(home_dir()?.join(".config").join("memento"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("memento"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("memento"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
