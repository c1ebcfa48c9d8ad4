//! JSON output shapes.

use serde_json::{json, Value};

use memento_core::{Goal, HeatmapCell, UpcomingDay, YearGrid};

pub fn years_json(years: &[i32], newest: i32) -> Value {
    json!({
        "years": years,
        "default": newest,
    })
}

fn cell_json(cell: &HeatmapCell<'_>) -> Value {
    json!({
        "date": cell.date,
        "in_year": cell.in_year,
        "is_today": cell.is_today,
        "is_future": cell.is_future,
        "editable": cell.is_editable(),
        "intensity": cell.intensity.as_str(),
        "tier": cell.intensity.tier(),
        "title": cell.entry.and_then(|entry| entry.title_text()),
    })
}

pub fn grid_json(grid: &YearGrid<'_>) -> Value {
    let weeks: Vec<Vec<Value>> = grid
        .weeks
        .iter()
        .map(|week| week.iter().map(cell_json).collect())
        .collect();
    json!({
        "year": grid.year,
        "first_day": grid.first_day(),
        "last_day": grid.last_day(),
        "filled_days": grid.filled_days(),
        "weeks": weeks,
    })
}

pub fn goals_json(visible: &[&Goal], archived: Option<&[&Goal]>) -> Value {
    let mut value = json!({ "visible": visible });
    if let Some(archived) = archived {
        value["archived"] = json!(archived);
    }
    value
}

pub fn goal_json(goal: &Goal) -> Value {
    json!(goal)
}

pub fn upcoming_json(items: &[UpcomingDay<'_>]) -> Value {
    Value::Array(
        items
            .iter()
            .map(|item| {
                json!({
                    "id": item.day.id,
                    "title": item.day.title,
                    "type": item.day.kind,
                    "date": item.day.date,
                    "occurs_on": item.occurs_on,
                    "days_until": item.days_until,
                    "anniversary": item.anniversary,
                    "reminder_due": item.reminder_due,
                })
            })
            .collect(),
    )
}
