//! Terminal detection and output mode selection.

use std::io::IsTerminal;

/// How a command renders its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// `--json`: one JSON document on stdout, nothing else
    Json,
    /// `key=value` lines and tab-separated rows for pipes and scripts
    #[default]
    Plain,
    /// Headers, badges, tables and spinners on a terminal
    Pretty,
}

impl OutputMode {
    /// `--json` wins; otherwise pretty only on a capable terminal.
    pub fn resolve(json_flag: bool, is_tty: bool, term_is_dumb: bool) -> Self {
        match (json_flag, is_tty && !term_is_dumb) {
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

/// What the current terminal supports, resolved once per command.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// stdout is a terminal
    pub is_tty: bool,
    pub color: bool,
    /// Braille spinner frames and check-mark badges
    pub unicode: bool,
    /// Columns available for tables and dividers
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Build from the environment plus the command's `--json` and the
    /// global `--no-color`.
    pub fn from_env(json_flag: bool, no_color_flag: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term_is_dumb = std::env::var("TERM").is_ok_and(|term| term == "dumb");
        let color = is_tty
            && !term_is_dumb
            && !no_color_flag
            && std::env::var_os("NO_COLOR").is_none();

        Self {
            is_tty,
            color,
            unicode: !term_is_dumb,
            width: terminal_width().unwrap_or(80),
            mode: OutputMode::resolve(json_flag, is_tty, term_is_dumb),
        }
    }

    /// Whether a confirmation prompt can be answered.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && std::io::stdin().is_terminal()
    }

    /// Spinners run only on a pretty terminal so piped output stays clean.
    pub fn allows_animation(&self) -> bool {
        self.is_tty && self.mode.is_pretty()
    }
}

fn terminal_width() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()?
        .parse::<usize>()
        .ok()
        .filter(|width| *width > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_flag_beats_terminal() {
        assert_eq!(OutputMode::resolve(true, true, false), OutputMode::Json);
        assert_eq!(OutputMode::resolve(true, false, true), OutputMode::Json);
    }

    #[test]
    fn test_pretty_needs_capable_terminal() {
        assert_eq!(OutputMode::resolve(false, true, false), OutputMode::Pretty);
        assert_eq!(OutputMode::resolve(false, true, true), OutputMode::Plain);
        assert_eq!(OutputMode::resolve(false, false, false), OutputMode::Plain);
    }

    #[test]
    fn test_json_flag_and_no_color() {
        let ctx = UiContext::from_env(true, true);
        assert!(ctx.mode.is_json());
        assert!(!ctx.color);
        assert!(!ctx.allows_animation());
    }
}
