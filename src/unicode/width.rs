//! Display width in columns, used by the built-in monospace metrics.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Get the display width of a string in columns.
#[must_use]
pub fn display_width_with_method(s: &str, method: WidthMethod) -> usize {
    match method {
        WidthMethod::WcWidth => UnicodeWidthStr::width(s),
        WidthMethod::Unicode => UnicodeWidthStr::width_cjk(s),
    }
}

/// Get the display width of a character in columns.
///
/// Control characters are zero width.
#[inline]
#[must_use]
pub fn display_width_char(c: char, method: WidthMethod) -> usize {
    if c.is_ascii() {
        return usize::from((' '..='~').contains(&c));
    }
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c).unwrap_or(0),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(display_width_with_method("hello", WidthMethod::WcWidth), 5);
        assert_eq!(display_width_char('a', WidthMethod::WcWidth), 1);
        assert_eq!(display_width_char('\t', WidthMethod::WcWidth), 0);
    }

    #[test]
    fn test_cjk_width() {
        assert_eq!(display_width_with_method("漢字", WidthMethod::WcWidth), 4);
        assert_eq!(display_width_char('漢', WidthMethod::WcWidth), 2);
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(display_width_char('\u{0301}', WidthMethod::WcWidth), 0);
    }

    #[test]
    fn test_width_methods() {
        // U+2460 CIRCLED DIGIT ONE is ambiguous width.
        let ch = '①';
        assert_eq!(display_width_char(ch, WidthMethod::WcWidth), 1);
        assert_eq!(display_width_char(ch, WidthMethod::Unicode), 2);
    }
}
