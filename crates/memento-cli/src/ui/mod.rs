//! UI primitives for the Memento CLI.
//!
//! This module provides:
//! - **Context**: Environment detection (TTY, width, color, unicode)
//! - **Mode**: Output mode resolution (json, plain, pretty)
//! - **Theme**: Badges, colors, heatmap glyphs
//! - **Render**: Tables, headers, receipts, hints
//! - **Format**: String utilities (truncate, ordinals, relative days)

mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

// Re-export core types at module level
pub use context::UiContext;
pub use theme::Badge;

// Re-export commonly used render functions
pub use render::{badge, header, hint, kv, print, receipt, simple_table, Column};
