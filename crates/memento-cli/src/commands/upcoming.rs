use memento_core::special_days::upcoming;
use memento_core::MementoError;

use crate::app::AppContext;
use crate::cli::UpcomingArgs;
use crate::output::{print_upcoming, upcoming_json};

pub fn handle_upcoming(ctx: &AppContext, args: &UpcomingArgs) -> anyhow::Result<()> {
    if args.days < 0 {
        return Err(MementoError::InvalidInput(format!(
            "--days must not be negative, got {}",
            args.days
        ))
        .into());
    }

    let (_store, snapshot) = ctx.load_journal()?;
    let items = upcoming(&snapshot.special_days, ctx.today(), args.days);

    let ui = ctx.ui(args.json);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&upcoming_json(&items))?);
        return Ok(());
    }
    print_upcoming(&ui, &items, args.days);
    Ok(())
}
