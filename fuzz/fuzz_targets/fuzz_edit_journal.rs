//! Fuzz target for the undo journal.
//!
//! Generates structured edit sessions, then unwinds and replays them. Every
//! revert and apply must succeed and land on the recorded text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use richtext_core::{EditOp, EditRecord, NoHost, TextBuffer};

#[derive(Arbitrary, Debug)]
enum Op {
    Insert(char),
    Backspace,
    Delete,
    Split,
    Join(u8),
    DeleteAll,
    MoveTo(u8, u8),
}

#[derive(Arbitrary, Debug)]
struct Session {
    initial: String,
    ops: Vec<Op>,
}

fuzz_target!(|session: Session| {
    let mut buf = TextBuffer::from_string(&session.initial.replace('\r', ""));
    let start = buf.to_string();
    let mut history = Vec::new();

    for op in session.ops.iter().take(64) {
        let op = match *op {
            Op::Insert(c) => EditOp::InsertChar(c),
            Op::Backspace => EditOp::DeleteBackward,
            Op::Delete => EditOp::DeleteForward,
            Op::Split => EditOp::SplitLine,
            Op::Join(row) => EditOp::JoinLines(usize::from(row)),
            Op::DeleteAll => EditOp::DeleteAll,
            Op::MoveTo(row, pos) => {
                buf.set_cursor(usize::from(row), usize::from(pos));
                continue;
            }
        };
        if let Some(record) = EditRecord::perform(op, &mut buf, &NoHost) {
            history.push(record);
        }
    }
    let end = buf.to_string();

    for record in history.iter_mut().rev() {
        record.revert(&mut buf, &mut NoHost).expect("revert in order");
    }
    assert_eq!(buf.to_string(), start);

    for record in &mut history {
        record.apply(&mut buf, &mut NoHost).expect("apply in order");
    }
    assert_eq!(buf.to_string(), end);
});
