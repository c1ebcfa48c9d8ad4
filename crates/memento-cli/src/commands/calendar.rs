use memento_core::TemporalIndex;

use crate::app::AppContext;
use crate::cli::{HeatmapArgs, YearsArgs};
use crate::output::{grid_json, print_heatmap, print_years, years_json};

pub fn handle_years(ctx: &AppContext, args: &YearsArgs) -> anyhow::Result<()> {
    let (_store, snapshot) = ctx.load_journal()?;
    let birth_date = ctx.life_settings()?.birth_date;
    let index = TemporalIndex::new(&snapshot.entries, birth_date, ctx.today());

    let years = index.display_years();
    let newest = index.resolve_year(None);

    let ui = ctx.ui(args.json);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&years_json(&years, newest))?);
        return Ok(());
    }
    print_years(&ui, &years, newest);
    Ok(())
}

pub fn handle_heatmap(ctx: &AppContext, args: &HeatmapArgs) -> anyhow::Result<()> {
    let (_store, snapshot) = ctx.load_journal()?;
    let birth_date = ctx.life_settings()?.birth_date;
    let index = TemporalIndex::new(&snapshot.entries, birth_date, ctx.today());

    let year = index.resolve_year(args.year);
    if let Some(requested) = args.year {
        if requested != year && !ctx.quiet() {
            eprintln!("Note: {} is not a selectable year; showing {}.", requested, year);
        }
    }
    let grid = index.year_grid(year);

    let ui = ctx.ui(args.json);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&grid_json(&grid))?);
        return Ok(());
    }
    print_heatmap(&ui, &grid);
    Ok(())
}
