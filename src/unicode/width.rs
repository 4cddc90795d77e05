//! Display width calculation for terminal rendering.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Get the display width of a string in terminal columns (wcwidth rules).
#[must_use]
pub fn display_width(s: &str) -> usize {
    display_width_with_method(s, WidthMethod::WcWidth)
}

/// Get the display width of a string in terminal columns using a specific method.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Get the display width of a character in terminal columns (wcwidth rules).
///
/// ASCII printable characters take a fast path.
#[inline]
#[must_use]
pub fn display_width_char(c: char) -> usize {
    if (' '..='~').contains(&c) {
        return 1;
    }
    if c < ' ' {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Check if a character is a zero-width character.
#[must_use]
pub fn is_zero_width(c: char) -> bool {
    display_width_char(c) == 0
}

/// Check if a character is wide (takes 2 columns).
#[must_use]
pub fn is_wide(c: char) -> bool {
    display_width_char(c) == 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width_char('a'), 1);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(display_width("漢字"), 4);
        assert!(is_wide('漢'));
    }

    #[test]
    fn test_emoji_width() {
        assert_eq!(display_width("😀"), 2);
    }

    #[test]
    fn test_zero_width() {
        assert!(is_zero_width('\u{0301}'));
        assert!(is_zero_width('\n'));
    }

    #[test]
    fn test_width_methods() {
        // Circled digit one is ambiguous-width
        let s = "\u{2460}";
        assert_eq!(display_width_with_method(s, WidthMethod::WcWidth), 1);
        assert_eq!(display_width_with_method(s, WidthMethod::Unicode), 2);
    }
}
