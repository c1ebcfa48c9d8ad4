use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use memento_core::special_days::DEFAULT_UPCOMING_DAYS;
use memento_core::VERSION;

/// Memento - life clock, year heatmaps, goals and archive export for a diary
#[derive(Parser)]
#[command(name = "memento")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the journal file
    #[arg(short, long, global = true, env = "MEMENTO_JOURNAL")]
    pub journal: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,

    /// Evaluate as of this instant instead of the system clock
    #[arg(long, global = true, env = "MEMENTO_NOW", hide = true)]
    pub now: Option<String>,
}

/// Arguments for the `clock` command
#[derive(Args)]
pub struct ClockArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `years` command
#[derive(Args)]
pub struct YearsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `heatmap` command
#[derive(Args)]
pub struct HeatmapArgs {
    /// Year to show (defaults to the most recent selectable year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `goals` command
#[derive(Args)]
pub struct GoalsArgs {
    #[command(subcommand)]
    pub command: Option<GoalsCommand>,

    /// Include completed goals past the visibility window
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum GoalsCommand {
    /// Toggle completion of a goal
    Toggle {
        /// Goal ID
        #[arg(value_name = "ID")]
        id: i64,
    },
}

/// Arguments for the `upcoming` command
#[derive(Args)]
pub struct UpcomingArgs {
    /// Look-ahead window in days
    #[arg(long, default_value_t = DEFAULT_UPCOMING_DAYS)]
    pub days: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` command
#[derive(Args)]
pub struct ExportArgs {
    /// First entry date to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Last entry date to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Directory to write the archive into
    #[arg(long, value_name = "DIR")]
    pub out: Option<String>,

    /// Base URL for server-hosted images (overrides config)
    #[arg(long, value_name = "URL")]
    pub origin: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the life clock
    Clock(ClockArgs),

    /// List selectable heatmap years
    Years(YearsArgs),

    /// Show the entry heatmap for one year
    Heatmap(HeatmapArgs),

    /// List goals, or toggle one
    Goals(GoalsArgs),

    /// List special days coming up
    Upcoming(UpcomingArgs),

    /// Export a date range of entries to an archive
    Export(ExportArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}
