//! Application-level utilities for the Memento CLI.
//!
//! This module provides:
//! - Path resolution for config and journal files
//! - The per-invocation context commands run against

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
