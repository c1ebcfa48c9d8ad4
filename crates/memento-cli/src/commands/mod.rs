//! Command handlers, one module per subcommand family.

mod calendar;
mod clock;
mod completions;
mod export;
mod goals;
mod upcoming;

pub use calendar::{handle_heatmap, handle_years};
pub use clock::handle_clock;
pub use completions::handle_completions;
pub use export::handle_export;
pub use goals::handle_goals;
pub use upcoming::handle_upcoming;
