//! Text and table output for each command.

use std::path::Path;

use chrono::Datelike;

use memento_core::export::ExportReport;
use memento_core::{Goal, HeatmapCell, LifeClock, UpcomingDay, YearGrid};

use crate::ui::format::{days_until_label, format_datetime, ordinal, single_line, truncate};
use crate::ui::theme::{heat_style, heat_symbol, styled, styles, SymbolPair, TODAY};
use crate::ui::{
    badge, header, hint, kv, print, receipt, simple_table, Badge, Column, UiContext,
};

const GOAL_TEXT_MAX: usize = 60;
const CLOCK_BAR_WIDTH: usize = 30;
const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const LABEL_WIDTH: usize = 4;

pub fn print_clock(ctx: &UiContext, clock: &LifeClock) {
    print(ctx, &header(ctx, "clock", None));
    if ctx.mode.is_pretty() {
        let time = styled(&clock.clock_time, styles::bold(), ctx.color);
        print(ctx, &kv(ctx, "Clock", &time));
        print(
            ctx,
            &kv(
                ctx,
                "Progress",
                &format!(
                    "{} {:.1}%",
                    progress_bar(clock.progress_fraction, ctx.unicode),
                    clock.progress_percent
                ),
            ),
        );
        print(
            ctx,
            &kv(
                ctx,
                "Days lived",
                &format!("{} of {:.0}", clock.days_lived, clock.total_life_days),
            ),
        );
    } else {
        print(ctx, &kv(ctx, "clock", &clock.clock_time));
        print(ctx, &kv(ctx, "progress_percent", &format!("{:.1}", clock.progress_percent)));
        print(ctx, &kv(ctx, "days_lived", &clock.days_lived.to_string()));
        print(ctx, &kv(ctx, "total_life_days", &format!("{:.0}", clock.total_life_days)));
    }
}

fn progress_bar(fraction: f64, unicode: bool) -> String {
    let filled = ((fraction * CLOCK_BAR_WIDTH as f64).round() as usize).min(CLOCK_BAR_WIDTH);
    let full = SymbolPair::new("#", "\u{2588}").get(unicode);
    let empty = SymbolPair::new("-", "\u{2591}").get(unicode);
    format!(
        "{}{}",
        full.repeat(filled),
        empty.repeat(CLOCK_BAR_WIDTH - filled)
    )
}

pub fn print_years(ctx: &UiContext, years: &[i32], newest: i32) {
    print(ctx, &header(ctx, "years", None));
    for year in years {
        if ctx.mode.is_pretty() && *year == newest {
            print(ctx, &format!("{} {}", year, styled("(default)", styles::dim(), ctx.color)));
        } else {
            print(ctx, &year.to_string());
        }
    }
}

pub fn print_heatmap(ctx: &UiContext, grid: &YearGrid<'_>) {
    let year = grid.year.to_string();
    print(ctx, &header(ctx, "heatmap", Some(&year)));

    if !ctx.mode.is_pretty() {
        print(ctx, &kv(ctx, "year", &year));
        print(ctx, &kv(ctx, "filled_days", &grid.filled_days().to_string()));
        for cell in grid.cells().filter(|cell| cell.in_year) {
            print(ctx, &format!("{} {}", cell.date, cell.intensity.as_str()));
        }
        return;
    }

    print(ctx, &format!("{}{}", " ".repeat(LABEL_WIDTH), month_labels(grid)));
    for (weekday, label) in WEEKDAY_LABELS.iter().enumerate() {
        let row: String = grid
            .weeks
            .iter()
            .map(|week| cell_glyph(ctx, &week[weekday]))
            .collect();
        let label = styled(&format!("{:<width$}", label, width = LABEL_WIDTH), styles::dim(), ctx.color);
        print(ctx, &format!("{}{}", label, row));
    }
    print(ctx, &legend(ctx));
    print(ctx, &kv(ctx, "Days written", &grid.filled_days().to_string()));
}

fn cell_glyph(ctx: &UiContext, cell: &HeatmapCell<'_>) -> String {
    if !cell.in_year {
        return " ".to_string();
    }
    if cell.is_today {
        return styled(TODAY.get(ctx.unicode), styles::bold(), ctx.color);
    }
    let symbol = heat_symbol(cell.intensity).get(ctx.unicode);
    let style = if cell.is_future {
        styles::dim()
    } else {
        heat_style(cell.intensity)
    };
    styled(symbol, style, ctx.color)
}

/// Month abbreviations above the first week that contains the 1st.
fn month_labels(grid: &YearGrid<'_>) -> String {
    let mut line = vec![' '; grid.weeks.len()];
    let mut next_free = 0;
    for (index, week) in grid.weeks.iter().enumerate() {
        let first_of_month = week
            .iter()
            .find(|cell| cell.in_year && cell.date.day() == 1);
        if let Some(cell) = first_of_month {
            if index < next_free {
                continue;
            }
            let label = cell.date.format("%b").to_string();
            for (offset, ch) in label.chars().enumerate() {
                if let Some(slot) = line.get_mut(index + offset) {
                    *slot = ch;
                }
            }
            next_free = index + label.chars().count() + 1;
        }
    }
    line.into_iter().collect::<String>().trim_end().to_string()
}

fn legend(ctx: &UiContext) -> String {
    use memento_core::Intensity;

    let parts: Vec<String> = [
        (Intensity::Empty, "no entry"),
        (Intensity::Neutral, "neutral"),
        (Intensity::Positive, "happy"),
        (Intensity::Negative, "sad"),
    ]
    .iter()
    .map(|(intensity, name)| {
        let symbol = styled(heat_symbol(*intensity).get(ctx.unicode), heat_style(*intensity), ctx.color);
        format!("{} {}", symbol, name)
    })
    .chain(std::iter::once(format!("{} today", TODAY.get(ctx.unicode))))
    .collect();
    parts.join("  ")
}

/// `hidden` counts completed goals left out of the working view; pretty mode
/// mentions them so `--all` is discoverable.
pub fn print_goals(ctx: &UiContext, visible: &[&Goal], archived: Option<&[&Goal]>, hidden: usize) {
    print(ctx, &header(ctx, "goals", None));
    let show_hint = ctx.mode.is_pretty() && archived.is_none() && hidden > 0;
    if visible.is_empty() && archived.map_or(true, |a| a.is_empty()) {
        if ctx.mode.is_pretty() {
            print(ctx, &badge(ctx, Badge::Info, "No goals to show."));
        }
        if show_hint {
            print(ctx, &hidden_hint(ctx, hidden));
        }
        return;
    }

    let columns = [
        Column::new("ID"),
        Column::new("Status"),
        Column::new("Goal"),
        Column::new("Completed"),
    ];
    let mut rows: Vec<Vec<String>> = visible.iter().map(|goal| goal_row(ctx, goal)).collect();
    if let Some(archived) = archived {
        rows.extend(archived.iter().map(|goal| goal_row(ctx, goal)));
    }
    print(ctx, &simple_table(ctx, &columns, &rows));
    if show_hint {
        print(ctx, &hidden_hint(ctx, hidden));
    }
}

fn hidden_hint(ctx: &UiContext, hidden: usize) -> String {
    let noun = if hidden == 1 { "goal" } else { "goals" };
    hint(
        ctx,
        &format!("{} completed {} hidden; run `memento goals --all`", hidden, noun),
    )
}

fn goal_row(ctx: &UiContext, goal: &Goal) -> Vec<String> {
    let status = if ctx.mode.is_pretty() {
        if goal.completed {
            SymbolPair::new("[x]", "\u{2713}").get(ctx.unicode).to_string()
        } else {
            SymbolPair::new("[ ]", "\u{25CB}").get(ctx.unicode).to_string()
        }
    } else if goal.completed {
        "done".to_string()
    } else {
        "open".to_string()
    };
    let text = if ctx.mode.is_pretty() {
        truncate(&single_line(&goal.text), GOAL_TEXT_MAX)
    } else {
        single_line(&goal.text)
    };
    vec![
        goal.id.to_string(),
        status,
        text,
        completion_note(ctx, goal),
    ]
}

fn completion_note(ctx: &UiContext, goal: &Goal) -> String {
    match (goal.completed_at, goal.age_at_completion) {
        (Some(at), Some(age)) if ctx.mode.is_pretty() => {
            format!("{} (age {})", format_datetime(&at, true), age)
        }
        (Some(at), _) => format_datetime(&at, ctx.mode.is_pretty()),
        (None, _) if ctx.mode.is_pretty() => String::new(),
        (None, _) => "-".to_string(),
    }
}

pub fn print_toggled(ctx: &UiContext, goal: &Goal) {
    let title = if goal.completed {
        "Goal completed"
    } else {
        "Goal reopened"
    };
    let id = goal.id.to_string();
    print(ctx, &receipt(ctx, title, &[("ID", &id), ("Goal", &single_line(&goal.text))]));
}

pub fn print_upcoming(ctx: &UiContext, items: &[UpcomingDay<'_>], within_days: i64) {
    let context = format!("next {} days", within_days);
    print(ctx, &header(ctx, "upcoming", Some(&context)));
    if items.is_empty() {
        if ctx.mode.is_pretty() {
            print(ctx, &badge(ctx, Badge::Info, "Nothing coming up."));
        }
        return;
    }

    if !ctx.mode.is_pretty() {
        for item in items {
            print(
                ctx,
                &format!(
                    "{} {} {} {}",
                    item.occurs_on,
                    item.days_until,
                    kind_label(item),
                    single_line(&item.day.title)
                ),
            );
        }
        return;
    }

    let columns = [
        Column::new("Date"),
        Column::new("When"),
        Column::new("Title"),
        Column::new("Note"),
    ];
    let rows: Vec<Vec<String>> = items
        .iter()
        .map(|item| {
            let mut note = match item.anniversary {
                Some(years) => format!("{} anniversary", ordinal(years)),
                None => kind_label(item).to_string(),
            };
            if item.reminder_due {
                note.push_str(&format!(" {}", badge(ctx, Badge::Warn, "")));
            }
            vec![
                item.occurs_on.format("%a %Y-%m-%d").to_string(),
                days_until_label(item.days_until),
                truncate(&single_line(&item.day.title), GOAL_TEXT_MAX),
                note,
            ]
        })
        .collect();
    print(ctx, &simple_table(ctx, &columns, &rows));
}

fn kind_label(item: &UpcomingDay<'_>) -> &'static str {
    match item.day.kind {
        memento_core::SpecialDayKind::Anniversary => "anniversary",
        memento_core::SpecialDayKind::Plan => "plan",
    }
}

pub fn print_export(ctx: &UiContext, path: &Path, report: &ExportReport) {
    let path = path.display().to_string();
    let entries = report.dates.len().to_string();
    let images = report.images_resolved.to_string();
    let skipped = report.images_skipped.to_string();
    print(
        ctx,
        &receipt(
            ctx,
            "Exported archive",
            &[
                ("Path", &path),
                ("Entries", &entries),
                ("Images", &images),
                ("Skipped", &skipped),
            ],
        ),
    );
}
