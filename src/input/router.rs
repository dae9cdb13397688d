//! Key routing onto buffer primitives.
//!
//! The router holds no state. The caller owns focus and passes the focused
//! buffer and its host in with every event; the router performs the edit
//! and hands back the records for the caller's undo stack.

use crate::input::keyboard::{KeyCode, KeyEvent};
use crate::text::{Direction, EditList, EditOp, EditRecord, GeometryHost, TextBuffer};

/// What a routed key did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyOutcome {
    /// The key meant something to the text; the caller should not pass it
    /// on to other handlers.
    pub handled: bool,
    /// The text or cursor changed, so the caller should redraw.
    pub changed: bool,
    /// Records to push onto the undo stack as one step.
    pub edit: Option<EditList>,
}

impl KeyOutcome {
    fn moved(changed: bool) -> Self {
        Self {
            handled: true,
            changed,
            edit: None,
        }
    }

    fn edited(list: EditList) -> Self {
        let changed = !list.is_empty();
        Self {
            handled: true,
            changed,
            edit: changed.then_some(list),
        }
    }
}

/// Route one key press to `buffer`.
///
/// Arrows, Home and End move the cursor; Ctrl turns Left and Right into word
/// moves. Delete, Backspace and Enter edit at the cursor, joining or
/// splitting lines at line edges. Characters without a Ctrl, Alt or Super
/// chord are typed. Modifier-only keys and anything else are not handled.
pub fn route_key<H>(buffer: &mut TextBuffer, host: &H, event: &KeyEvent) -> KeyOutcome
where
    H: GeometryHost + ?Sized,
{
    tracing::trace!(code = ?event.code, modifiers = ?event.modifiers, "routing key");

    let direction = match event.code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        KeyCode::Home => Some(Direction::Home),
        KeyCode::End => Some(Direction::End),
        _ => None,
    };
    if let Some(direction) = direction {
        return KeyOutcome::moved(buffer.move_cursor(direction, event.ctrl()));
    }

    let op = match event.code {
        KeyCode::Delete => EditOp::DeleteForward,
        KeyCode::Backspace => EditOp::DeleteBackward,
        KeyCode::Enter => EditOp::SplitLine,
        KeyCode::Tab if !event.is_chord() => EditOp::InsertChar('\t'),
        KeyCode::Char(c) if !event.is_chord() => {
            let mut utf8 = [0; 4];
            return route_text(buffer, host, c.encode_utf8(&mut utf8));
        }
        _ => return KeyOutcome::default(),
    };

    let mut list = EditList::new();
    list.extend(EditRecord::perform(op, buffer, host));
    KeyOutcome::edited(list)
}

/// Type a string at the cursor, one record per character.
///
/// A `'\n'` splits the line. Text that starts with `'\r'` is a stray
/// carriage return from the input layer and is ignored.
pub fn route_text<H>(buffer: &mut TextBuffer, host: &H, text: &str) -> KeyOutcome
where
    H: GeometryHost + ?Sized,
{
    if text.is_empty() || text.starts_with('\r') {
        return KeyOutcome::default();
    }

    let mut list = EditList::new();
    for c in text.chars() {
        let op = if c == '\n' {
            EditOp::SplitLine
        } else {
            EditOp::InsertChar(c)
        };
        list.extend(EditRecord::perform(op, buffer, host));
    }
    tracing::trace!(records = list.len(), "typed text");
    KeyOutcome::edited(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::keyboard::KeyModifiers;
    use crate::text::{Cursor, NoHost};

    fn press(buf: &mut TextBuffer, event: KeyEvent) -> KeyOutcome {
        route_key(buf, &NoHost, &event)
    }

    #[test]
    fn test_typing_records_one_char() {
        let mut buf = TextBuffer::from_string("ac");
        buf.set_cursor(0, 1);
        let outcome = press(&mut buf, KeyEvent::char('b'));
        assert!(outcome.handled && outcome.changed);
        assert_eq!(outcome.edit.map(|list| list.len()), Some(1));
        assert_eq!(buf.to_string(), "abc");
    }

    #[test]
    fn test_shifted_char_is_typed() {
        let mut buf = TextBuffer::new();
        press(&mut buf, KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(buf.to_string(), "A");
    }

    #[test]
    fn test_chords_and_modifiers_are_ignored() {
        let mut buf = TextBuffer::from_string("x");
        for event in [
            KeyEvent::with_ctrl(KeyCode::Char('s')),
            KeyEvent::with_alt(KeyCode::Char('f')),
            KeyEvent::key(KeyCode::Shift),
            KeyEvent::key(KeyCode::Control),
            KeyEvent::key(KeyCode::Esc),
        ] {
            assert_eq!(press(&mut buf, event), KeyOutcome::default());
        }
        assert_eq!(buf.to_string(), "x");
    }

    #[test]
    fn test_navigation_changes_cursor_only() {
        let mut buf = TextBuffer::from_string("foo bar");
        buf.set_cursor_at_end();
        let outcome = press(&mut buf, KeyEvent::with_ctrl(KeyCode::Left));
        assert!(outcome.handled && outcome.changed);
        assert!(outcome.edit.is_none());
        assert_eq!(buf.cursor(), Cursor::new(0, 4));

        let outcome = press(&mut buf, KeyEvent::key(KeyCode::Up));
        assert!(outcome.handled);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_backspace_at_start_is_handled_noop() {
        let mut buf = TextBuffer::from_string("x");
        let outcome = press(&mut buf, KeyEvent::key(KeyCode::Backspace));
        assert!(outcome.handled);
        assert!(!outcome.changed);
        assert!(outcome.edit.is_none());
    }

    #[test]
    fn test_typed_newline_splits() {
        let mut buf = TextBuffer::new();
        let outcome = route_text(&mut buf, &NoHost, "ab\ncd");
        assert_eq!(buf.to_string(), "ab\ncd");
        assert_eq!(outcome.edit.map(|list| list.len()), Some(5));
    }

    #[test]
    fn test_leading_carriage_return_is_ignored() {
        let mut buf = TextBuffer::new();
        assert!(!route_text(&mut buf, &NoHost, "\r\n").handled);
        assert!(!press(&mut buf, KeyEvent::char('\r')).handled);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_tab_inserts_tab() {
        let mut buf = TextBuffer::new();
        press(&mut buf, KeyEvent::key(KeyCode::Tab));
        assert_eq!(buf.to_string(), "\t");
    }
}
