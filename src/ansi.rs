//! ANSI escape sequence handling.
//!
//! Color codes only have meaning on a human-facing terminal; redirected
//! output gets them stripped.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

pub(crate) const RED: &str = "\x1b[31m";
pub(crate) const YELLOW: &str = "\x1b[33m";
pub(crate) const BLUE: &str = "\x1b[34m";
pub(crate) const RESET: &str = "\x1b[0m";

/// CSI sequences (`ESC [ ... final`) plus bare two-byte escapes.
static ANSI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b(?:\[[0-9;:?]*[@-~]|[@-Z\\^_])").expect("ANSI pattern is valid")
});

/// Strip all ANSI/VT100 escape sequences from `text`.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ANSI_PATTERN.replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_codes() {
        let colored = format!("{RED}ERROR{RESET}: boom");
        assert_eq!(strip_ansi(&colored), "ERROR: boom");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(strip_ansi("no escapes here"), "no escapes here");
    }

    #[test]
    fn strips_multiple_sequences() {
        let text = format!("{YELLOW}a{RESET} {BLUE}b{RESET}");
        assert_eq!(strip_ansi(&text), "a b");
    }
}
