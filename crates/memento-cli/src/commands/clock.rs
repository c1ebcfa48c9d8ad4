use crate::app::AppContext;
use crate::cli::ClockArgs;
use crate::output::print_clock;

pub fn handle_clock(ctx: &AppContext, args: &ClockArgs) -> anyhow::Result<()> {
    let clock = ctx.life_settings()?.life_clock(ctx.now())?;

    let ui = ctx.ui(args.json);
    if ui.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&clock)?);
        return Ok(());
    }
    print_clock(&ui, &clock);
    Ok(())
}
