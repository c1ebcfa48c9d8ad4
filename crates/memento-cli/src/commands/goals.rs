use tracing::debug;

use memento_core::clock::age_on;
use memento_core::goals::toggle_goal;
use memento_core::{GoalLedger, JournalStore};

use crate::app::AppContext;
use crate::cli::{GoalsArgs, GoalsCommand};
use crate::output::{goal_json, goals_json, print_goals, print_toggled};

pub fn handle_goals(ctx: &AppContext, args: &GoalsArgs) -> anyhow::Result<()> {
    match &args.command {
        Some(GoalsCommand::Toggle { id }) => handle_toggle(ctx, *id, args.json),
        None => handle_list(ctx, args),
    }
}

fn handle_list(ctx: &AppContext, args: &GoalsArgs) -> anyhow::Result<()> {
    let (_store, snapshot) = ctx.load_journal()?;
    let ledger = GoalLedger::new(&snapshot.goals);
    let visible = ledger.visible(ctx.now());
    let hidden = ledger.archived(ctx.now());
    let archived = args.all.then_some(hidden.as_slice());

    let ui = ctx.ui(args.json);
    if ui.mode.is_json() {
        let value = goals_json(&visible, archived);
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    print_goals(&ui, &visible, archived, hidden.len());
    Ok(())
}

fn handle_toggle(ctx: &AppContext, id: i64, json: bool) -> anyhow::Result<()> {
    let (store, mut snapshot) = ctx.load_journal()?;
    let age = ctx
        .life_settings()?
        .birth_date
        .map(|birth_date| age_on(birth_date, ctx.today()));

    let goal = toggle_goal(&mut snapshot.goals, id, ctx.now(), age)?.clone();
    store.save(&snapshot)?;
    debug!(id, completed = goal.completed, "goal toggled");

    let ui = ctx.ui(json);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&goal_json(&goal))?);
        return Ok(());
    }
    if !ctx.quiet() {
        print_toggled(&ui, &goal);
    }
    Ok(())
}
