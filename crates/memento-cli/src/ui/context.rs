//! Terminal detection and the per-command UI settings derived from it.

use std::io::IsTerminal;

use super::mode::OutputMode;

const FALLBACK_WIDTH: usize = 80;

/// What the process can observe about its terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalProbe {
    pub stdout_is_tty: bool,
    pub dumb: bool,
    pub no_color_env: bool,
    pub width: Option<usize>,
}

impl TerminalProbe {
    pub fn detect() -> Self {
        Self {
            stdout_is_tty: std::io::stdout().is_terminal(),
            dumb: std::env::var("TERM").is_ok_and(|term| term == "dumb"),
            no_color_env: std::env::var_os("NO_COLOR").is_some(),
            width: columns_env().or_else(ioctl_width),
        }
    }
}

/// Rendering settings for one command invocation.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub color: bool,
    pub unicode: bool,
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Settings for the current terminal and the `--json`, `--no-color` and
    /// `--ascii` flags.
    pub fn from_env(json: bool, no_color: bool, ascii: bool) -> Self {
        Self::from_probe(TerminalProbe::detect(), json, no_color, ascii)
    }

    pub fn from_probe(probe: TerminalProbe, json: bool, no_color: bool, ascii: bool) -> Self {
        let mode = OutputMode::resolve(json, probe.stdout_is_tty, probe.dumb);
        Self {
            color: mode.is_pretty() && !no_color && !probe.no_color_env,
            unicode: !ascii,
            width: probe.width.unwrap_or(FALLBACK_WIDTH),
            mode,
        }
    }
}

fn columns_env() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|width| *width > 0)
}

#[cfg(unix)]
fn ioctl_width() -> Option<usize> {
    use std::mem::MaybeUninit;

    let mut winsize = MaybeUninit::<libc::winsize>::uninit();
    // SAFETY: TIOCGWINSZ only writes into the winsize buffer we pass
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, winsize.as_mut_ptr()) };
    if result != 0 {
        return None;
    }
    // SAFETY: ioctl succeeded, so the buffer is initialized
    let winsize = unsafe { winsize.assume_init() };
    (winsize.ws_col > 0).then_some(usize::from(winsize.ws_col))
}

#[cfg(not(unix))]
fn ioctl_width() -> Option<usize> {
    None
}
