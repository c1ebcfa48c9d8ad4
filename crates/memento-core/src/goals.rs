//! Goals and the visibility window for completed ones.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MementoError, Result};

/// Completed goals stay in the working view for this many days.
pub const COMPLETED_VISIBILITY_DAYS: i64 = 3;

/// A personal goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "deserialize_completed_at")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub age_at_completion: Option<u32>,
}

impl Goal {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            completed_at: None,
            age_at_completion: None,
        }
    }

    /// Whether the goal belongs in the working view at `now`.
    ///
    /// Open goals are always visible. Completed goals are visible up to and
    /// including exactly three days after completion. A completed goal with no
    /// recorded date cannot be placed in the window and is hidden.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        if !self.completed {
            return true;
        }
        match self.completed_at {
            Some(completed_at) => now - completed_at <= Duration::days(COMPLETED_VISIBILITY_DAYS),
            None => false,
        }
    }

    /// Mark complete on today's date (UTC), replacing any earlier completion.
    pub fn mark_completed(&mut self, now: DateTime<Utc>, age_at_completion: Option<u32>) {
        self.completed = true;
        self.completed_at = Some(start_of_day(now));
        self.age_at_completion = age_at_completion;
    }

    pub fn mark_incomplete(&mut self) {
        self.completed = false;
        self.completed_at = None;
        self.age_at_completion = None;
    }

    /// Flip completion. The age is only recorded when completing.
    pub fn toggle(&mut self, now: DateTime<Utc>, age_at_completion: Option<u32>) {
        if self.completed {
            self.mark_incomplete();
        } else {
            self.mark_completed(now, age_at_completion);
        }
    }
}

/// Read-only view over a goal collection.
#[derive(Debug, Clone, Copy)]
pub struct GoalLedger<'a> {
    goals: &'a [Goal],
}

impl<'a> GoalLedger<'a> {
    pub fn new(goals: &'a [Goal]) -> Self {
        Self { goals }
    }

    /// Goals in the working view, in collection order.
    pub fn visible(&self, now: DateTime<Utc>) -> Vec<&'a Goal> {
        self.goals
            .iter()
            .filter(|goal| goal.is_visible_at(now))
            .collect()
    }

    /// Completed goals that have aged out of the working view.
    pub fn archived(&self, now: DateTime<Utc>) -> Vec<&'a Goal> {
        self.goals
            .iter()
            .filter(|goal| !goal.is_visible_at(now))
            .collect()
    }
}

/// Toggle the goal with `id` in place and return it.
///
/// # Errors
///
/// Returns `MementoError::NotFound` if no goal has that id.
pub fn toggle_goal(
    goals: &mut [Goal],
    id: i64,
    now: DateTime<Utc>,
    age_at_completion: Option<u32>,
) -> Result<&Goal> {
    let goal = goals
        .iter_mut()
        .find(|goal| goal.id == id)
        .ok_or_else(|| MementoError::NotFound(format!("goal {}", id)))?;
    goal.toggle(now, age_at_completion);
    Ok(goal)
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Completion dates arrive either as RFC 3339 timestamps or as date-only
/// strings, the latter meaning UTC midnight.
fn deserialize_completed_at<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }
    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
        .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
        .map_err(|_| serde::de::Error::custom(format!("invalid completion date: {}", raw)))
}
