//! Anniversaries and planned days, and the "coming up" list handed to
//! whatever delivers reminders.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default look-ahead for the upcoming list.
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecialDayKind {
    /// Recurs every year on the same month and day.
    #[default]
    Anniversary,
    /// Happens once, on its exact date.
    Plan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialDay {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: SpecialDayKind,
    /// Days of advance notice wanted; zero means no reminder.
    #[serde(default)]
    pub notify_days_before: u32,
}

impl SpecialDay {
    pub fn new(id: i64, title: impl Into<String>, date: NaiveDate, kind: SpecialDayKind) -> Self {
        Self {
            id,
            title: title.into(),
            date,
            kind,
            notify_days_before: 0,
        }
    }

    pub fn with_notice(mut self, days: u32) -> Self {
        self.notify_days_before = days;
        self
    }

    /// First occurrence on or after `today`, if there is one.
    pub fn next_occurrence(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self.kind {
            SpecialDayKind::Plan => (self.date >= today).then_some(self.date),
            SpecialDayKind::Anniversary => {
                if self.date >= today {
                    return Some(self.date);
                }
                let this_year = self.on_year(today.year())?;
                if this_year >= today {
                    Some(this_year)
                } else {
                    self.on_year(today.year() + 1)
                }
            }
        }
    }

    /// The anniversary falling in `year`. February 29th falls back to the
    /// 28th in common years.
    fn on_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.date.month(), self.date.day()).or_else(|| {
            (self.date.month() == 2 && self.date.day() == 29)
                .then(|| NaiveDate::from_ymd_opt(year, 2, 28))
                .flatten()
        })
    }
}

/// A special day that falls inside the look-ahead window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingDay<'a> {
    pub day: &'a SpecialDay,
    pub occurs_on: NaiveDate,
    pub days_until: i64,
    /// Which anniversary this is (1 for the first), `None` for plans and for
    /// the original date itself.
    pub anniversary: Option<u32>,
    /// The notice window set on the day has been reached.
    pub reminder_due: bool,
}

/// Special days occurring within `within_days` of `today` (inclusive),
/// soonest first.
pub fn upcoming(days: &[SpecialDay], today: NaiveDate, within_days: i64) -> Vec<UpcomingDay<'_>> {
    let mut upcoming: Vec<UpcomingDay<'_>> = days
        .iter()
        .filter_map(|day| {
            let occurs_on = day.next_occurrence(today)?;
            let days_until = (occurs_on - today).num_days();
            if days_until > within_days {
                return None;
            }
            let anniversary = match day.kind {
                SpecialDayKind::Anniversary => {
                    let years = occurs_on.year() - day.date.year();
                    (years > 0).then_some(years as u32)
                }
                SpecialDayKind::Plan => None,
            };
            let notice = i64::from(day.notify_days_before);
            Some(UpcomingDay {
                day,
                occurs_on,
                days_until,
                anniversary,
                reminder_due: notice > 0 && days_until <= notice,
            })
        })
        .collect();

    upcoming.sort_by(|a, b| a.occurs_on.cmp(&b.occurs_on).then(a.day.id.cmp(&b.day.id)));
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_anniversary_rolls_to_next_year() {
        let day = SpecialDay::new(1, "wedding", date(2015, 1, 3), SpecialDayKind::Anniversary);
        assert_eq!(day.next_occurrence(date(2025, 1, 3)), Some(date(2025, 1, 3)));
        assert_eq!(day.next_occurrence(date(2025, 1, 4)), Some(date(2026, 1, 3)));
    }

    #[test]
    fn test_plan_occurs_once() {
        let day = SpecialDay::new(2, "trip", date(2025, 7, 1), SpecialDayKind::Plan);
        assert_eq!(day.next_occurrence(date(2025, 6, 28)), Some(date(2025, 7, 1)));
        assert_eq!(day.next_occurrence(date(2025, 7, 2)), None);
    }

    #[test]
    fn test_leap_day_anniversary() {
        let day = SpecialDay::new(3, "leap", date(2020, 2, 29), SpecialDayKind::Anniversary);
        assert_eq!(day.next_occurrence(date(2023, 2, 1)), Some(date(2023, 2, 28)));
        assert_eq!(day.next_occurrence(date(2024, 2, 1)), Some(date(2024, 2, 29)));
    }

    #[test]
    fn test_future_anniversary_starts_on_its_date() {
        let day = SpecialDay::new(4, "move-in", date(2027, 3, 1), SpecialDayKind::Anniversary);
        assert_eq!(day.next_occurrence(date(2026, 10, 19)), Some(date(2027, 3, 1)));
    }

    #[test]
    fn test_upcoming_window_and_order() {
        let today = date(2025, 12, 28);
        let days = vec![
            SpecialDay::new(1, "new year trip", date(2026, 1, 2), SpecialDayKind::Plan),
            SpecialDay::new(2, "first date", date(2019, 12, 30), SpecialDayKind::Anniversary)
                .with_notice(3),
            SpecialDay::new(3, "far away", date(2010, 3, 1), SpecialDayKind::Anniversary),
            SpecialDay::new(4, "past plan", date(2025, 12, 1), SpecialDayKind::Plan),
        ];

        let list = upcoming(&days, today, DEFAULT_UPCOMING_DAYS);
        let ids: Vec<i64> = list.iter().map(|u| u.day.id).collect();
        assert_eq!(ids, vec![2, 1]);

        assert_eq!(list[0].occurs_on, date(2025, 12, 30));
        assert_eq!(list[0].days_until, 2);
        assert_eq!(list[0].anniversary, Some(6));
        assert!(list[0].reminder_due);

        assert_eq!(list[1].days_until, 5);
        assert_eq!(list[1].anniversary, None);
        assert!(!list[1].reminder_due);
    }

    #[test]
    fn test_today_counts_as_upcoming() {
        let today = date(2025, 4, 1);
        let days = vec![SpecialDay::new(1, "birthday", date(1990, 4, 1), SpecialDayKind::Anniversary)];
        let list = upcoming(&days, today, 0);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].days_until, 0);
        assert_eq!(list[0].anniversary, Some(35));
    }

    #[test]
    fn test_deserialize_type_field() {
        let json = r#"{"id": 5, "title": "t", "date": "2024-05-05", "type": "plan", "notifyDaysBefore": 2}"#;
        let day: SpecialDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.kind, SpecialDayKind::Plan);
        assert_eq!(day.notify_days_before, 2);
    }
}
