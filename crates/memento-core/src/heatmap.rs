//! Temporal index: Monday-aligned week grids for one display year.
//!
//! A grid runs from the Monday on or before January 1st to the Sunday on or
//! after December 31st, so every row holds exactly seven days. Padding days
//! from the neighbouring years are present but never carry an entry.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::entry::{DiaryEntry, EntryMap, Mood};

/// Rendering tier of a cell, chosen from the entry's mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Empty,
    Neutral,
    Positive,
    Negative,
}

impl Intensity {
    pub fn for_entry(entry: Option<&DiaryEntry>) -> Self {
        match entry.map(|entry| entry.mood) {
            None => Intensity::Empty,
            Some(Mood::Neutral) => Intensity::Neutral,
            Some(Mood::Happy) => Intensity::Positive,
            Some(Mood::Sad) => Intensity::Negative,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Empty => "empty",
            Intensity::Neutral => "neutral",
            Intensity::Positive => "positive",
            Intensity::Negative => "negative",
        }
    }

    /// Numeric tier: 0 (no entry) through 3 (hard day).
    pub fn tier(&self) -> u8 {
        match self {
            Intensity::Empty => 0,
            Intensity::Neutral => 1,
            Intensity::Positive => 2,
            Intensity::Negative => 3,
        }
    }
}

/// One day in a year grid.
#[derive(Debug, Clone, Copy)]
pub struct HeatmapCell<'a> {
    pub date: NaiveDate,
    pub in_year: bool,
    pub is_future: bool,
    pub is_today: bool,
    pub entry: Option<&'a DiaryEntry>,
    pub intensity: Intensity,
}

impl HeatmapCell<'_> {
    /// Only past or present days inside the viewed year can be written to.
    pub fn is_editable(&self) -> bool {
        self.in_year && !self.is_future
    }
}

/// Week rows for one display year.
#[derive(Debug, Clone)]
pub struct YearGrid<'a> {
    pub year: i32,
    pub weeks: Vec<[HeatmapCell<'a>; 7]>,
}

impl<'a> YearGrid<'a> {
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.weeks.first().map(|week| week[0].date)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.weeks.last().map(|week| week[6].date)
    }

    pub fn cells(&self) -> impl Iterator<Item = &HeatmapCell<'a>> {
        self.weeks.iter().flat_map(|week| week.iter())
    }

    /// Number of in-year days that carry an entry.
    pub fn filled_days(&self) -> usize {
        self.cells().filter(|cell| cell.entry.is_some()).count()
    }
}

/// Read-only view over an entry collection, evaluated against a fixed
/// "today".
#[derive(Debug, Clone, Copy)]
pub struct TemporalIndex<'a> {
    entries: &'a EntryMap,
    birth_date: Option<NaiveDate>,
    today: NaiveDate,
}

impl<'a> TemporalIndex<'a> {
    pub fn new(entries: &'a EntryMap, birth_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            entries,
            birth_date,
            today,
        }
    }

    /// Selectable display years, newest first.
    ///
    /// The range spans every year that has an entry, the birth year and the
    /// current year, including empty years in between.
    pub fn display_years(&self) -> Vec<i32> {
        let mut years: BTreeSet<i32> = self.entries.keys().map(|date| date.year()).collect();
        years.insert(self.today.year());
        if let Some(birth_date) = self.birth_date {
            years.insert(birth_date.year());
        }

        match (years.first(), years.last()) {
            (Some(&min), Some(&max)) => (min..=max).rev().collect(),
            _ => vec![self.today.year()],
        }
    }

    /// The requested year when it is selectable, otherwise the most recent
    /// selectable year.
    pub fn resolve_year(&self, requested: Option<i32>) -> i32 {
        let years = self.display_years();
        let newest = years.first().copied().unwrap_or_else(|| self.today.year());
        match requested {
            Some(year) if years.contains(&year) => year,
            _ => newest,
        }
    }

    /// Build the week grid for `year`.
    ///
    /// Years whose padded grid would leave chrono's representable range get
    /// an empty grid.
    pub fn year_grid(&self, year: i32) -> YearGrid<'a> {
        let (first_monday, grid_end) = match grid_span(year) {
            Some(span) => span,
            None => return YearGrid { year, weeks: Vec::new() },
        };

        let mut weeks = Vec::new();
        let mut week_start = Some(first_monday);
        while let Some(start) = week_start.filter(|start| *start <= grid_end) {
            // Every day of this week is at most `grid_end`.
            weeks.push(std::array::from_fn(|offset| {
                self.cell(start + Duration::days(offset as i64), year)
            }));
            week_start = start.checked_add_signed(Duration::days(7));
        }

        YearGrid { year, weeks }
    }

    fn cell(&self, date: NaiveDate, year: i32) -> HeatmapCell<'a> {
        let in_year = date.year() == year;
        let entry = if in_year { self.entries.get(&date) } else { None };
        HeatmapCell {
            date,
            in_year,
            is_future: date > self.today,
            is_today: date == self.today,
            entry,
            intensity: Intensity::for_entry(entry),
        }
    }
}

/// Monday on or before January 1st and Sunday on or after December 31st.
fn grid_span(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?;
    let lead = i64::from(first.weekday().num_days_from_monday());
    let tail = 6 - i64::from(last.weekday().num_days_from_monday());
    Some((
        first.checked_sub_signed(Duration::days(lead))?,
        last.checked_add_signed(Duration::days(tail))?,
    ))
}
