//! Output formatting helpers for the CLI.
//!
//! Each command renders either JSON (`json`) or text/tables (`text`).

mod json;
mod text;

// Re-export public API
pub use json::{goal_json, goals_json, grid_json, upcoming_json, years_json};
pub use text::{
    print_clock, print_export, print_goals, print_heatmap, print_toggled, print_upcoming,
    print_years,
};
