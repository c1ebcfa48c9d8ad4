//! How command results are written to stdout.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// A single JSON document, nothing else on stdout
    Json,
    /// One fact per line; what scripts and the test suite read
    #[default]
    Plain,
    /// Tables, glyph heatmaps and color for an interactive terminal
    Pretty,
}

impl OutputMode {
    /// `--json` beats everything; otherwise only a TTY that is not
    /// `TERM=dumb` gets the pretty rendering.
    pub fn resolve(json: bool, is_tty: bool, term_is_dumb: bool) -> Self {
        match (json, is_tty && !term_is_dumb) {
            (true, _) => Self::Json,
            (false, true) => Self::Pretty,
            (false, false) => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        *self == Self::Json
    }

    pub fn is_pretty(&self) -> bool {
        *self == Self::Pretty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_table() {
        let cases = [
            ((true, true, false), OutputMode::Json),
            ((true, false, true), OutputMode::Json),
            ((false, true, false), OutputMode::Pretty),
            ((false, true, true), OutputMode::Plain),
            ((false, false, false), OutputMode::Plain),
        ];
        for ((json, tty, dumb), expected) in cases {
            assert_eq!(OutputMode::resolve(json, tty, dumb), expected);
        }
    }
}
