//! Word-boundary navigation within a single line.
//!
//! A word is a run of alphanumeric characters in the Unicode sense
//! (`char::is_alphanumeric`). Offsets are character offsets, not bytes.
//! Neither scan ever crosses into a neighbouring line: at a line edge the
//! scan reports a [`WordStep`] asking the caller to move lines instead.

/// Result of a word-wise cursor step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordStep {
    /// Stay on the current line at this character offset.
    Within(usize),
    /// Continue at the end of the previous line.
    PreviousLineEnd,
    /// Continue at the start of the next line.
    NextLineStart,
}

/// Whether `c` belongs to a word.
#[inline]
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Find the start of the word at or before `pos`.
///
/// Skips the non-word run immediately before `pos`, then the word run, and
/// stops at offset 0 or just after a non-word character. At offset 0 on any
/// line but the first, asks to move to the end of the previous line.
#[must_use]
pub fn word_start(line: &str, pos: usize, first_line: bool) -> WordStep {
    if pos == 0 {
        return if first_line {
            WordStep::Within(0)
        } else {
            WordStep::PreviousLineEnd
        };
    }

    let chars: Vec<char> = line.chars().collect();
    let mut idx = pos.min(chars.len());

    while idx > 0 && !is_word_char(chars[idx - 1]) {
        idx -= 1;
    }
    while idx > 0 && is_word_char(chars[idx - 1]) {
        idx -= 1;
    }
    WordStep::Within(idx)
}

/// Find the end of the word at or after `pos`.
///
/// Mirror image of [`word_start`]: skips the non-word run at `pos`, then the
/// word run. At the end of any line but the last, asks to move to the start
/// of the next line.
#[must_use]
pub fn word_end(line: &str, pos: usize, last_line: bool) -> WordStep {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();
    if pos >= len {
        return if last_line {
            WordStep::Within(len)
        } else {
            WordStep::NextLineStart
        };
    }

    let mut idx = pos;
    while idx < len && !is_word_char(chars[idx]) {
        idx += 1;
    }
    while idx < len && is_word_char(chars[idx]) {
        idx += 1;
    }
    WordStep::Within(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_start_from_end() {
        assert_eq!(word_start("foo bar", 7, true), WordStep::Within(4));
        assert_eq!(word_start("foo bar", 4, true), WordStep::Within(0));
    }

    #[test]
    fn test_word_start_inside_word() {
        assert_eq!(word_start("hello world", 8, true), WordStep::Within(6));
    }

    #[test]
    fn test_word_start_line_edge() {
        assert_eq!(word_start("abc", 0, true), WordStep::Within(0));
        assert_eq!(word_start("abc", 0, false), WordStep::PreviousLineEnd);
    }

    #[test]
    fn test_word_start_only_punctuation() {
        assert_eq!(word_start("  ...", 5, true), WordStep::Within(0));
    }

    #[test]
    fn test_word_end() {
        assert_eq!(word_end("foo bar", 0, true), WordStep::Within(3));
        assert_eq!(word_end("foo bar", 3, true), WordStep::Within(7));
    }

    #[test]
    fn test_word_end_line_edge() {
        assert_eq!(word_end("abc", 3, true), WordStep::Within(3));
        assert_eq!(word_end("abc", 3, false), WordStep::NextLineStart);
        assert_eq!(word_end("", 0, false), WordStep::NextLineStart);
    }

    #[test]
    fn test_multibyte_words() {
        // "naïve café" : offsets are characters, not bytes.
        let line = "naïve café";
        assert_eq!(word_end(line, 0, true), WordStep::Within(5));
        assert_eq!(word_end(line, 5, true), WordStep::Within(10));
        assert_eq!(word_start(line, 10, true), WordStep::Within(6));
    }

    #[test]
    fn test_cjk_is_alphanumeric() {
        assert_eq!(word_end("日本語 テキスト", 0, true), WordStep::Within(3));
    }

    #[test]
    fn test_underscore_is_separator() {
        assert_eq!(word_end("snake_case", 0, true), WordStep::Within(5));
    }
}
