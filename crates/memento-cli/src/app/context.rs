//! Application context for the Memento CLI.
//!
//! Bundles CLI arguments with the loaded config and the instant every
//! command evaluates against.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};

use memento_core::storage::{JournalSnapshot, JournalStore, JsonFileStore};
use memento_core::{LifeSettings, MementoError};

use crate::cli::Cli;
use crate::config::MementoConfig;
use crate::helpers::{parse_date, parse_datetime};
use crate::ui::UiContext;

use super::resolver::{
    exit_not_found_with_hint, load_config, missing_journal_hint, missing_journal_message,
    resolve_journal_path,
};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: MementoConfig,
    now: DateTime<Utc>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> anyhow::Result<Self> {
        let config = load_config()?;
        let now = match cli.now.as_deref() {
            Some(value) => parse_datetime(value)?,
            None => Utc::now(),
        };
        Ok(Self { cli, config, now })
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    pub fn config(&self) -> &MementoConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn ui(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color, self.cli.ascii)
    }

    pub fn journal_path(&self) -> anyhow::Result<PathBuf> {
        resolve_journal_path(self.cli, &self.config)
    }

    /// Open the journal store and load its snapshot. A missing journal exits
    /// with the not-found code and a hint.
    pub fn load_journal(&self) -> anyhow::Result<(JsonFileStore, JournalSnapshot)> {
        let store = JsonFileStore::new(self.journal_path()?);
        match store.load() {
            Ok(snapshot) => Ok((store, snapshot)),
            Err(MementoError::NotFound(_)) => exit_not_found_with_hint(
                &missing_journal_message(store.path()),
                missing_journal_hint(),
            ),
            Err(err) => Err(err.into()),
        }
    }

    /// Profile settings from `[profile]`.
    pub fn life_settings(&self) -> anyhow::Result<LifeSettings> {
        let profile = &self.config.profile;
        let birth_date = profile
            .birth_date
            .as_deref()
            .map(parse_date)
            .transpose()
            .context("[profile] birth_date")?;
        Ok(LifeSettings::new(birth_date, profile.life_expectancy))
    }
}
