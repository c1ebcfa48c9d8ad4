//! Constants used throughout the CLI.

/// Exit codes for the CLI.
///
/// These follow common Unix conventions:
/// - 0: Success
/// - 1: General error (used by anyhow for unhandled errors)
/// - 2: Misuse of shell command (reserved by shells, and by clap)
/// - 3+: Application-specific errors
pub mod exit_codes {
    /// General failure.
    pub const FAILURE: i32 = 1;

    /// Resource not found (config, journal, goal).
    pub const NOT_FOUND: i32 = 3;

    /// Invalid user input or arguments.
    pub const INVALID_INPUT: i32 = 4;

    /// Export produced no archive (empty range, cancelled, packaging fault).
    pub const EXPORT_FAILED: i32 = 6;
}

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "MEMENTO_LOG";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "MEMENTO_CONFIG";
