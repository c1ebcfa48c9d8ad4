//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

use memento_core::Intensity;

/// Symbol pair for ASCII and Unicode variants.
#[derive(Debug, Clone, Copy)]
pub struct SymbolPair {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl SymbolPair {
    pub const fn new(ascii: &'static str, unicode: &'static str) -> Self {
        Self { ascii, unicode }
    }

    /// Get the appropriate symbol based on unicode flag.
    pub fn get(&self, unicode: bool) -> &'static str {
        if unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Info,
}

impl Badge {
    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        match self {
            Self::Ok => SymbolPair::new("[OK]", "[\u{2713}]").get(unicode),
            Self::Warn => SymbolPair::new("[WARN]", "[\u{26A0}]").get(unicode),
            Self::Info => SymbolPair::new("[INFO]", "[\u{2139}]").get(unicode),
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::ok(),
            Self::Warn => styles::warn(),
            Self::Info => styles::info(),
        }
    }
}

pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn ok() -> Style {
        Style::new().green()
    }

    pub fn warn() -> Style {
        Style::new().yellow()
    }

    pub fn err() -> Style {
        Style::new().red()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }
}

/// Apply `style` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Heatmap cell glyph for a mood tier.
pub fn heat_symbol(intensity: Intensity) -> SymbolPair {
    match intensity {
        Intensity::Empty => SymbolPair::new(".", "\u{00B7}"),
        Intensity::Neutral => SymbolPair::new("o", "\u{25AA}"),
        Intensity::Positive => SymbolPair::new("+", "\u{25A0}"),
        Intensity::Negative => SymbolPair::new("-", "\u{25A1}"),
    }
}

pub fn heat_style(intensity: Intensity) -> Style {
    match intensity {
        Intensity::Empty => styles::dim(),
        Intensity::Neutral => styles::info(),
        Intensity::Positive => styles::ok(),
        Intensity::Negative => styles::err(),
    }
}

/// Marker for today's cell.
pub const TODAY: SymbolPair = SymbolPair::new("@", "\u{25C6}");
