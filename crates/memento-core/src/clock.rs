//! Life clock: how far through an expected lifespan a birth date is,
//! expressed as days, a percentage and a time of day.
//!
//! All arithmetic is pinned to UTC; the birth date counts from UTC midnight.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MementoError, Result};

/// Life expectancy used when the profile does not set one.
pub const DEFAULT_LIFE_EXPECTANCY_YEARS: f64 = 100.0;

/// Average calendar year length, leap days included.
pub const DAYS_PER_YEAR: f64 = 365.25;

const MILLIS_PER_DAY: i64 = 86_400_000;
const MINUTES_PER_DAY: f64 = 1440.0;

/// Profile values the clock and the display-year set depend on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeSettings {
    pub birth_date: Option<NaiveDate>,
    pub life_expectancy_years: f64,
}

impl Default for LifeSettings {
    fn default() -> Self {
        Self {
            birth_date: None,
            life_expectancy_years: DEFAULT_LIFE_EXPECTANCY_YEARS,
        }
    }
}

impl LifeSettings {
    pub fn new(birth_date: Option<NaiveDate>, life_expectancy_years: f64) -> Self {
        Self {
            birth_date,
            life_expectancy_years,
        }
    }

    /// Compute the clock for this profile.
    ///
    /// # Errors
    ///
    /// Returns `MementoError::InvalidInput` when no birth date is set, so that
    /// callers never show a misleading `00:00 / 0%` clock.
    pub fn life_clock(&self, now: DateTime<Utc>) -> Result<LifeClock> {
        let birth_date = self.birth_date.ok_or_else(|| {
            MementoError::InvalidInput("birth date is not set".to_string())
        })?;
        LifeClock::compute(birth_date, self.life_expectancy_years, now)
    }
}

/// Elapsed-life metrics at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeClock {
    pub days_lived: i64,
    pub total_life_days: f64,
    pub progress_fraction: f64,
    pub clock_time: String,
    pub progress_percent: f64,
}

impl LifeClock {
    /// # Errors
    ///
    /// Returns `MementoError::InvalidInput` if the life expectancy is not a
    /// positive, finite number of years.
    pub fn compute(
        birth_date: NaiveDate,
        life_expectancy_years: f64,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if !life_expectancy_years.is_finite() || life_expectancy_years <= 0.0 {
            return Err(MementoError::InvalidInput(format!(
                "life expectancy must be a positive number of years, got {}",
                life_expectancy_years
            )));
        }

        let born_at = birth_date.and_time(NaiveTime::MIN).and_utc();
        let days_lived = (now - born_at)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_DAY);
        let total_life_days = life_expectancy_years * DAYS_PER_YEAR;
        let progress_fraction = (days_lived as f64 / total_life_days).clamp(0.0, 1.0);

        Ok(Self {
            days_lived,
            total_life_days,
            progress_fraction,
            clock_time: format_clock_time(progress_fraction),
            progress_percent: (progress_fraction * 1000.0).round() / 10.0,
        })
    }
}

/// Map a fraction of a lifetime onto a 24-hour day as `HH:MM`.
fn format_clock_time(progress_fraction: f64) -> String {
    let minute_of_day = (progress_fraction * MINUTES_PER_DAY).floor() as u32;
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// Age in whole years on `on`. Zero for dates before the birth date.
pub fn age_on(birth_date: NaiveDate, on: NaiveDate) -> u32 {
    if on < birth_date {
        return 0;
    }
    let mut years = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
