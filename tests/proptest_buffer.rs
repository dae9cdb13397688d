//! Property-based tests for buffer editing and the undo journal.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

mod common;

use common::counting_buffer;
use proptest::prelude::*;
use richtext_core::unicode::is_word_char;
use richtext_core::{EditOp, EditRecord, NoHost, TextBuffer, WordStep, word_end, word_start};

// ============================================================================
// Strategies
// ============================================================================

/// Arbitrary text without carriage returns, newlines included.
fn text() -> impl Strategy<Value = String> {
    "[^\r]{0,60}"
}

/// Short multi-line documents mixing ASCII and multi-byte words.
fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec![
            "foo", "bar", "日本", "héllo", "x1", " ", "  ", "-", ".", "\n", "ß",
        ]),
        0..16,
    )
    .prop_map(|parts| parts.concat())
}

/// One line of words and separators.
fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["foo", "Ωmega", "日本語", "a1", " ", ", ", "--", "é"]),
        0..10,
    )
    .prop_map(|parts| parts.concat())
}

fn edit_op() -> impl Strategy<Value = EditOp> {
    prop_oneof![
        any::<char>()
            .prop_filter("line breaks are not chars", |c| *c != '\n' && *c != '\r')
            .prop_map(EditOp::InsertChar),
        Just(EditOp::DeleteBackward),
        Just(EditOp::DeleteForward),
        Just(EditOp::SplitLine),
        (0usize..6).prop_map(EditOp::JoinLines),
        Just(EditOp::DeleteAll),
    ]
}

fn cursor_in_bounds(buf: &TextBuffer) -> bool {
    let cursor = buf.cursor();
    cursor.row < buf.line_count() && cursor.pos <= buf.line_char_len(cursor.row)
}

// ============================================================================
// Text round-trip
// ============================================================================

proptest! {
    /// Loading a string and reading it back is lossless.
    #[test]
    fn string_round_trip(s in text()) {
        let buf = TextBuffer::from_string(&s);
        prop_assert_eq!(buf.to_string(), s);
    }

    /// The line count is one more than the number of newlines.
    #[test]
    fn line_count_matches_newlines(s in text()) {
        let buf = TextBuffer::from_string(&s);
        prop_assert_eq!(buf.line_count(), s.matches('\n').count() + 1);
    }
}

// ============================================================================
// Undo symmetry
// ============================================================================

proptest! {
    /// Revert restores the text; re-apply restores text and cursor exactly.
    #[test]
    fn revert_then_apply_is_identity(
        s in document(),
        row in 0usize..8,
        pos in 0usize..20,
        op in edit_op(),
    ) {
        let mut buf = TextBuffer::from_string(&s);
        buf.set_cursor(row, pos);
        let before = buf.to_string();

        let Some(mut record) = EditRecord::perform(op, &mut buf, &NoHost) else {
            prop_assert_eq!(buf.to_string(), before);
            return Ok(());
        };
        let after_text = buf.to_string();
        let after_cursor = buf.cursor();

        record.revert(&mut buf, &mut NoHost).unwrap();
        prop_assert_eq!(buf.to_string(), before);
        prop_assert!(cursor_in_bounds(&buf));

        record.apply(&mut buf, &mut NoHost).unwrap();
        prop_assert_eq!(buf.to_string(), after_text);
        prop_assert_eq!(buf.cursor(), after_cursor);
    }

    /// A whole session of edits unwinds back to the original text.
    #[test]
    fn history_unwinds_to_start(s in document(), ops in prop::collection::vec(edit_op(), 0..30)) {
        let mut buf = TextBuffer::from_string(&s);
        buf.set_cursor_at_end();
        let mut history: Vec<EditRecord> = ops
            .into_iter()
            .filter_map(|op| EditRecord::perform(op, &mut buf, &NoHost))
            .collect();
        let edited = buf.to_string();

        for record in history.iter_mut().rev() {
            record.revert(&mut buf, &mut NoHost).unwrap();
        }
        prop_assert_eq!(buf.to_string(), s);

        for record in &mut history {
            record.apply(&mut buf, &mut NoHost).unwrap();
        }
        prop_assert_eq!(buf.to_string(), edited);
    }
}

// ============================================================================
// Cursor clamping
// ============================================================================

proptest! {
    /// No sequence of edits or cursor requests escapes the buffer.
    #[test]
    fn cursor_stays_in_bounds(
        s in document(),
        row in 0usize..50,
        pos in 0usize..200,
        ops in prop::collection::vec(edit_op(), 0..40),
    ) {
        let mut buf = TextBuffer::from_string(&s);
        buf.set_cursor(row, pos);
        prop_assert!(cursor_in_bounds(&buf));
        for op in ops {
            let _ = EditRecord::perform(op, &mut buf, &NoHost);
            prop_assert!(cursor_in_bounds(&buf), "after {:?}", op);
        }
    }

    /// Deleting far more than the buffer holds leaves one empty line.
    #[test]
    fn excess_deletes_bottom_out(s in document(), extra in 0usize..10) {
        let mut buf = TextBuffer::from_string(&s);
        buf.set_cursor_at_end();
        for _ in 0..(s.chars().count() + extra) {
            buf.delete_backward();
            prop_assert!(cursor_in_bounds(&buf));
        }
        prop_assert_eq!(buf.to_string(), "");
        prop_assert_eq!(buf.line_count(), 1);
    }

    /// Replacing the text never leaves the cursor dangling.
    #[test]
    fn set_string_clamps(a in document(), b in document(), row in 0usize..10, pos in 0usize..30) {
        let mut buf = TextBuffer::from_string(&a);
        buf.set_cursor(row, pos);
        buf.set_string(&b);
        prop_assert!(cursor_in_bounds(&buf));
    }
}

// ============================================================================
// Word navigation
// ============================================================================

proptest! {
    /// Jumping to a word end and back never overshoots the word's start.
    #[test]
    fn word_end_then_start_stays_in_word(s in line(), pos in 0usize..40) {
        let chars: Vec<char> = s.chars().collect();
        let pos = pos.min(chars.len());

        let WordStep::Within(end) = word_end(&s, pos, true) else {
            return Err(TestCaseError::fail("last line never asks to move down"));
        };
        let WordStep::Within(start) = word_start(&s, end, true) else {
            return Err(TestCaseError::fail("first line never asks to move up"));
        };

        prop_assert!(start <= end);
        // The start is a real boundary.
        prop_assert!(start == 0 || !is_word_char(chars[start - 1]));
        // Anything skipped past the original position is separator text.
        if start > pos {
            prop_assert!(chars[pos..start].iter().all(|c| !is_word_char(*c)));
        }
    }

    /// Word moves from any cursor stay inside the buffer.
    #[test]
    fn word_moves_stay_in_bounds(s in document(), moves in prop::collection::vec(any::<bool>(), 0..20)) {
        let mut buf = TextBuffer::from_string(&s);
        for right in moves {
            let direction = if right {
                richtext_core::Direction::Right
            } else {
                richtext_core::Direction::Left
            };
            buf.move_cursor(direction, true);
            prop_assert!(cursor_in_bounds(&buf));
        }
    }
}

// ============================================================================
// Metrics cache
// ============================================================================

proptest! {
    /// Width queries without mutation never call the metrics provider.
    #[test]
    fn width_queries_are_memoized(s in document()) {
        let (buf, metrics) = counting_buffer(&s);
        let built = metrics.calls();
        prop_assert_eq!(built, buf.line_count());

        for row in 0..buf.line_count() {
            let first = buf.line_width(row);
            let second = buf.line_width(row);
            prop_assert_eq!(first, second);
        }
        prop_assert_eq!(metrics.calls(), built);
    }
}
