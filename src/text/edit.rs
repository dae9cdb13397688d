//! Reversible edit records for an external undo stack.
//!
//! Every primitive edit made through [`EditRecord::perform`] yields one
//! [`EditRecord`] that can be reverted and re-applied any number of times.
//! A record starts out applied and must alternate between [`revert`] and
//! [`apply`]. Each record also keeps a snapshot of the host object's
//! geometry, because text edits may resize the shape that owns the text.
//!
//! The record does not hold on to the buffer or the host; both are passed
//! in on every replay. Grouping records into user-visible undo steps is the
//! undo stack's business; [`EditList`] only bundles records that one
//! keystroke produced.
//!
//! # Examples
//!
//! ```
//! use richtext_core::{EditOp, EditRecord, NoHost, TextBuffer};
//!
//! let mut buf = TextBuffer::from_string("ab");
//! buf.set_cursor(0, 1);
//! let mut record = EditRecord::perform(EditOp::InsertChar('X'), &mut buf, &NoHost).unwrap();
//! assert_eq!(buf.to_string(), "aXb");
//!
//! record.revert(&mut buf, &mut NoHost).unwrap();
//! assert_eq!(buf.to_string(), "ab");
//! record.apply(&mut buf, &mut NoHost).unwrap();
//! assert_eq!(buf.to_string(), "aXb");
//! ```
//!
//! [`revert`]: EditRecord::revert
//! [`apply`]: EditRecord::apply

use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::text::buffer::{Cursor, TextBuffer};

/// Extrinsic geometry of the host object, as far as the host reports it.
///
/// Hosts leave out properties they do not have; restoring ignores them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PropertySnapshot {
    pub corner: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// The object that owns a text buffer and may change size with it.
pub trait GeometryHost {
    /// Capture the current position and size.
    fn snapshot_geometry(&self) -> PropertySnapshot;
    /// Put position and size back to a captured state.
    fn restore_geometry(&mut self, snapshot: &PropertySnapshot);
}

/// Host for text that belongs to no shape.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHost;

impl GeometryHost for NoHost {
    fn snapshot_geometry(&self) -> PropertySnapshot {
        PropertySnapshot::default()
    }

    fn restore_geometry(&mut self, _snapshot: &PropertySnapshot) {}
}

/// A primitive edit to perform at the buffer's cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOp {
    InsertChar(char),
    DeleteBackward,
    DeleteForward,
    SplitLine,
    /// Join the given row with the one below it.
    JoinLines(usize),
    DeleteAll,
}

/// What a record did, and where.
///
/// `row` and `pos` name the location the edit is replayed at, which may
/// differ from wherever the cursor is when the record is replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditKind {
    /// `ch` was inserted at `pos`.
    InsertChar { ch: char, row: usize, pos: usize },
    /// `ch` was removed from `pos`, one left of the cursor at the time.
    DeleteBackward { ch: char, row: usize, pos: usize },
    /// `ch` was removed from `pos`, right of the cursor.
    DeleteForward { ch: char, row: usize, pos: usize },
    /// Line `row` was broken at `pos`.
    SplitRow { row: usize, pos: usize },
    /// Line `row + 1` was appended to line `row`, which was `pos` chars long.
    JoinRow { row: usize, pos: usize },
    /// All text was removed; `text` and the cursor are what it was.
    DeleteAll { text: String, row: usize, pos: usize },
}

impl EditKind {
    /// Variant name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertChar { .. } => "InsertChar",
            Self::DeleteBackward { .. } => "DeleteBackward",
            Self::DeleteForward { .. } => "DeleteForward",
            Self::SplitRow { .. } => "SplitRow",
            Self::JoinRow { .. } => "JoinRow",
            Self::DeleteAll { .. } => "DeleteAll",
        }
    }

    fn forward(&self) -> Step<'_> {
        match *self {
            Self::InsertChar { ch, row, pos } => Step::Insert {
                ch,
                row,
                pos,
                advance: true,
            },
            Self::DeleteBackward { ch, row, pos } | Self::DeleteForward { ch, row, pos } => {
                Step::Remove { ch, row, pos }
            }
            Self::SplitRow { row, pos } => Step::Split { row, pos },
            Self::JoinRow { row, pos } => Step::Join { row, pos },
            Self::DeleteAll { ref text, .. } => Step::Clear { text },
        }
    }

    fn inverse(&self) -> Step<'_> {
        match *self {
            Self::InsertChar { ch, row, pos } => Step::Remove { ch, row, pos },
            Self::DeleteBackward { ch, row, pos } => Step::Insert {
                ch,
                row,
                pos,
                advance: true,
            },
            Self::DeleteForward { ch, row, pos } => Step::Insert {
                ch,
                row,
                pos,
                advance: false,
            },
            Self::SplitRow { row, pos } => Step::Join { row, pos },
            Self::JoinRow { row, pos } => Step::Split { row, pos },
            Self::DeleteAll {
                ref text,
                row,
                pos,
            } => Step::Restore {
                text,
                cursor: Cursor::new(row, pos),
            },
        }
    }
}

/// One concrete buffer mutation used to replay a record in either direction.
#[derive(Clone, Copy, Debug)]
enum Step<'a> {
    /// Insert at `(row, pos)`; the cursor ends after the char if `advance`.
    Insert {
        ch: char,
        row: usize,
        pos: usize,
        advance: bool,
    },
    /// Remove `ch` from `(row, pos)`; the cursor ends at `(row, pos)`.
    Remove { ch: char, row: usize, pos: usize },
    Split { row: usize, pos: usize },
    Join { row: usize, pos: usize },
    /// Empty a buffer that still holds exactly `text`.
    Clear { text: &'a str },
    /// Refill an empty buffer with `text`.
    Restore { text: &'a str, cursor: Cursor },
}

impl Step<'_> {
    /// Check the buffer still has the shape this step expects.
    fn check(&self, buffer: &TextBuffer) -> std::result::Result<(), String> {
        let line = move |row: usize| {
            buffer
                .line(row)
                .ok_or_else(|| format!("row {row} missing from {}-line buffer", buffer.line_count()))
        };
        match *self {
            Step::Insert { ch, row, pos, .. } => {
                let len = line(row)?.char_len();
                if pos > len {
                    return Err(format!("offset {pos} past end of row {row} ({len} chars)"));
                }
                if ch == '\n' || ch == '\r' {
                    return Err(format!("cannot insert line break {ch:?} into a line"));
                }
            }
            Step::Remove { ch, row, pos } => {
                let found = line(row)?.char_at(pos);
                if found != Some(ch) {
                    return Err(format!("expected {ch:?} at ({row}, {pos}), found {found:?}"));
                }
            }
            Step::Split { row, pos } => {
                let len = line(row)?.char_len();
                if pos > len {
                    return Err(format!("split offset {pos} past end of row {row} ({len} chars)"));
                }
            }
            Step::Join { row, pos } => {
                let len = line(row)?.char_len();
                line(row + 1)?;
                if len != pos {
                    return Err(format!("row {row} has {len} chars, expected join point {pos}"));
                }
            }
            Step::Clear { text } => {
                let current = buffer.to_string();
                if current != text {
                    return Err(format!(
                        "buffer holds {} chars, not the {} chars recorded before clearing",
                        current.chars().count(),
                        text.chars().count()
                    ));
                }
            }
            Step::Restore { .. } => {
                if !(buffer.is_empty() && buffer.line_count() == 1) {
                    return Err(format!(
                        "cannot restore over a non-empty {}-line buffer",
                        buffer.line_count()
                    ));
                }
            }
        }
        Ok(())
    }

    /// Perform the step. Must only run after [`Step::check`] passed.
    fn run(&self, buffer: &mut TextBuffer) {
        match *self {
            Step::Insert {
                ch,
                row,
                pos,
                advance,
            } => {
                buffer.set_cursor(row, pos);
                buffer.insert_char(ch);
                if !advance {
                    buffer.set_cursor(row, pos);
                }
            }
            Step::Remove { row, pos, .. } => {
                buffer.set_cursor(row, pos);
                buffer.delete_forward();
            }
            Step::Split { row, pos } => {
                buffer.set_cursor(row, pos);
                buffer.split_line();
            }
            Step::Join { row, .. } => {
                buffer.join_lines(row);
            }
            Step::Clear { .. } => {
                buffer.set_string("");
                buffer.set_cursor(0, 0);
            }
            Step::Restore { text, cursor } => {
                buffer.set_string(text);
                buffer.set_cursor(cursor.row, cursor.pos);
            }
        }
    }
}

/// One reversible primitive edit plus the host geometry before it.
#[derive(Clone, Debug, PartialEq)]
pub struct EditRecord {
    kind: EditKind,
    host_before: PropertySnapshot,
    applied: bool,
}

impl EditRecord {
    /// Perform `op` at the buffer's cursor and record it.
    ///
    /// The host geometry is captured before the edit. Returns `None` when
    /// the edit did not change the buffer, so there is nothing to undo.
    pub fn perform<H>(op: EditOp, buffer: &mut TextBuffer, host: &H) -> Option<Self>
    where
        H: GeometryHost + ?Sized,
    {
        let host_before = host.snapshot_geometry();
        let Cursor { row, pos } = buffer.cursor();
        let len = buffer.line_char_len(row);

        let kind = match op {
            EditOp::InsertChar(ch) => {
                buffer.insert_char(ch).then_some(EditKind::InsertChar { ch, row, pos })?
            }
            EditOp::DeleteBackward if pos > 0 => {
                let ch = buffer.line(row)?.char_at(pos - 1)?;
                buffer.delete_backward();
                EditKind::DeleteBackward {
                    ch,
                    row,
                    pos: pos - 1,
                }
            }
            EditOp::DeleteBackward => {
                let prev = row.checked_sub(1)?;
                let join_pos = buffer.line_char_len(prev);
                buffer
                    .delete_backward()
                    .then_some(EditKind::JoinRow { row: prev, pos: join_pos })?
            }
            EditOp::DeleteForward if pos < len => {
                let ch = buffer.line(row)?.char_at(pos)?;
                buffer.delete_forward();
                EditKind::DeleteForward { ch, row, pos }
            }
            EditOp::DeleteForward => buffer
                .delete_forward()
                .then_some(EditKind::JoinRow { row, pos: len })?,
            EditOp::SplitLine => {
                buffer.split_line();
                EditKind::SplitRow { row, pos }
            }
            EditOp::JoinLines(target) => {
                let join_pos = buffer.line_char_len(target);
                buffer
                    .join_lines(target)
                    .then_some(EditKind::JoinRow { row: target, pos: join_pos })?
            }
            EditOp::DeleteAll => {
                let text = buffer.to_string();
                buffer
                    .delete_all()
                    .then_some(EditKind::DeleteAll { text, row, pos })?
            }
        };

        tracing::trace!(record = kind.name(), row, pos, "recorded edit");
        Some(Self {
            kind,
            host_before,
            applied: true,
        })
    }

    /// What this record did.
    #[must_use]
    pub fn kind(&self) -> &EditKind {
        &self.kind
    }

    /// Whether the edit is currently in effect.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    /// Host geometry that [`revert`](Self::revert) will restore.
    #[must_use]
    pub fn host_before(&self) -> &PropertySnapshot {
        &self.host_before
    }

    /// Redo the edit at its recorded location.
    ///
    /// The host geometry right before redoing becomes the state a later
    /// revert restores, so chains of redone edits unwind in order.
    pub fn apply<H>(&mut self, buffer: &mut TextBuffer, host: &mut H) -> Result<()>
    where
        H: GeometryHost + ?Sized,
    {
        if self.applied {
            return Err(self.violation("apply called on an applied record"));
        }
        let step = self.kind.forward();
        step.check(buffer).map_err(|detail| self.violation(detail))?;

        let fresh = host.snapshot_geometry();
        step.run(buffer);
        host.restore_geometry(&fresh);
        self.host_before = fresh;
        self.applied = true;
        tracing::debug!(record = self.kind.name(), "applied edit record");
        Ok(())
    }

    /// Undo the edit and put the host geometry back.
    pub fn revert<H>(&mut self, buffer: &mut TextBuffer, host: &mut H) -> Result<()>
    where
        H: GeometryHost + ?Sized,
    {
        if !self.applied {
            return Err(self.violation("revert called on a reverted record"));
        }
        let step = self.kind.inverse();
        step.check(buffer).map_err(|detail| self.violation(detail))?;

        step.run(buffer);
        host.restore_geometry(&self.host_before);
        self.applied = false;
        tracing::debug!(record = self.kind.name(), "reverted edit record");
        Ok(())
    }

    /// Release the record once the undo stack evicts it.
    ///
    /// Only `DeleteAll` owns a heap payload (the removed text); it is kept
    /// whether or not the record is applied and released here.
    pub fn free(self) {
        if let EditKind::DeleteAll { ref text, .. } = self.kind {
            tracing::trace!(bytes = text.len(), "freeing delete-all snapshot");
        }
    }

    fn violation(&self, detail: impl Into<String>) -> Error {
        let err = Error::invariant(self.kind.name(), detail);
        tracing::error!(%err, "edit record does not fit the buffer");
        err
    }
}

/// Records produced by one input event, undone and redone as a unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditList {
    records: Vec<EditRecord>,
}

impl EditList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: EditRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[EditRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Redo every record in order. On failure, the records already redone
    /// are reverted again before the error is returned.
    pub fn apply<H>(&mut self, buffer: &mut TextBuffer, host: &mut H) -> Result<()>
    where
        H: GeometryHost + ?Sized,
    {
        for idx in 0..self.records.len() {
            if let Err(err) = self.records[idx].apply(buffer, host) {
                for record in self.records[..idx].iter_mut().rev() {
                    if let Err(rollback) = record.revert(buffer, host) {
                        tracing::error!(%err, %rollback, "rollback of edit list apply failed");
                        break;
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Undo every record in reverse order. On failure, the records already
    /// undone are redone again before the error is returned.
    pub fn revert<H>(&mut self, buffer: &mut TextBuffer, host: &mut H) -> Result<()>
    where
        H: GeometryHost + ?Sized,
    {
        let count = self.records.len();
        for idx in (0..count).rev() {
            if let Err(err) = self.records[idx].revert(buffer, host) {
                for record in &mut self.records[idx + 1..] {
                    if let Err(rollback) = record.apply(buffer, host) {
                        tracing::error!(%err, %rollback, "rollback of edit list revert failed");
                        break;
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }

    /// Release every record.
    pub fn free(self) {
        self.records.into_iter().for_each(EditRecord::free);
    }
}

impl From<EditRecord> for EditList {
    fn from(record: EditRecord) -> Self {
        Self {
            records: vec![record],
        }
    }
}

impl Extend<EditRecord> for EditList {
    fn extend<T: IntoIterator<Item = EditRecord>>(&mut self, iter: T) {
        self.records.extend(iter);
    }
}
