//! A standalone text object and its geometry.
//!
//! [`TextElement`] is the simplest host a buffer can have: a box that always
//! fits the text. It owns its buffer and keeps [`ElementGeometry`] in sync
//! with the buffer's bounding box after every change, which is exactly the
//! kind of side effect [`EditRecord`] snapshots so undo can put the box back.
//!
//! # Examples
//!
//! ```
//! use richtext_core::{KeyEvent, TextBuffer, TextElement};
//!
//! let mut element = TextElement::new(TextBuffer::new());
//! let before = element.geometry().width;
//!
//! let mut step = element.type_text("hello").edit.unwrap();
//! assert!(element.geometry().width > before);
//!
//! element.revert_list(&mut step).unwrap();
//! assert_eq!(element.buffer().to_string(), "");
//! assert_eq!(element.geometry().width, before);
//! ```

use crate::error::Result;
use crate::geometry::Point;
use crate::input::{KeyEvent, KeyOutcome, route_key, route_text};
use crate::text::{EditList, EditOp, EditRecord, GeometryHost, PropertySnapshot, TextBuffer};

/// Position and size of a rectangular element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementGeometry {
    /// Top-left corner.
    pub corner: Point,
    pub width: f64,
    pub height: f64,
}

impl GeometryHost for ElementGeometry {
    fn snapshot_geometry(&self) -> PropertySnapshot {
        PropertySnapshot {
            corner: Some(self.corner),
            width: Some(self.width),
            height: Some(self.height),
        }
    }

    fn restore_geometry(&mut self, snapshot: &PropertySnapshot) {
        if let Some(corner) = snapshot.corner {
            self.corner = corner;
        }
        if let Some(width) = snapshot.width {
            self.width = width;
        }
        if let Some(height) = snapshot.height {
            self.height = height;
        }
    }
}

/// A text buffer wrapped in a box that resizes to fit it.
#[derive(Clone, Debug)]
pub struct TextElement {
    buffer: TextBuffer,
    geometry: ElementGeometry,
    focused: bool,
}

impl TextElement {
    /// Wrap `buffer`, sizing the element to its text.
    #[must_use]
    pub fn new(buffer: TextBuffer) -> Self {
        let mut element = Self {
            buffer,
            geometry: ElementGeometry::default(),
            focused: false,
        };
        element.fit_to_text();
        element
    }

    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn geometry(&self) -> &ElementGeometry {
        &self.geometry
    }

    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Give or take input focus. A focused element leaves room for the caret.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        self.fit_to_text();
    }

    /// Move the element so its top-left corner lands on `corner`.
    pub fn move_to(&mut self, corner: Point) {
        let position = self.buffer.position();
        let dx = corner.x - self.geometry.corner.x;
        let dy = corner.y - self.geometry.corner.y;
        self.buffer
            .set_position(Point::new(position.x + dx, position.y + dy));
        self.fit_to_text();
    }

    /// Replace the whole text. Not recorded for undo.
    pub fn set_string(&mut self, text: &str) {
        self.buffer.set_string(text);
        self.fit_to_text();
    }

    /// Route a key press to the text.
    pub fn handle_key(&mut self, event: &KeyEvent) -> KeyOutcome {
        let outcome = route_key(&mut self.buffer, &self.geometry, event);
        if outcome.changed {
            self.fit_to_text();
        }
        outcome
    }

    /// Type `text` at the cursor.
    pub fn type_text(&mut self, text: &str) -> KeyOutcome {
        let outcome = route_text(&mut self.buffer, &self.geometry, text);
        if outcome.changed {
            self.fit_to_text();
        }
        outcome
    }

    /// Perform one primitive edit at the cursor.
    pub fn perform(&mut self, op: EditOp) -> Option<EditRecord> {
        let record = EditRecord::perform(op, &mut self.buffer, &self.geometry);
        self.fit_to_text();
        record
    }

    /// Redo `record` against this element.
    pub fn apply(&mut self, record: &mut EditRecord) -> Result<()> {
        record.apply(&mut self.buffer, &mut self.geometry)?;
        self.fit_to_text();
        Ok(())
    }

    /// Undo `record` against this element.
    pub fn revert(&mut self, record: &mut EditRecord) -> Result<()> {
        record.revert(&mut self.buffer, &mut self.geometry)?;
        self.fit_to_text();
        Ok(())
    }

    /// Redo a grouped step.
    pub fn apply_list(&mut self, list: &mut EditList) -> Result<()> {
        list.apply(&mut self.buffer, &mut self.geometry)?;
        self.fit_to_text();
        Ok(())
    }

    /// Undo a grouped step.
    pub fn revert_list(&mut self, list: &mut EditList) -> Result<()> {
        list.revert(&mut self.buffer, &mut self.geometry)?;
        self.fit_to_text();
        Ok(())
    }

    /// Give up the element, keeping the text.
    #[must_use]
    pub fn into_buffer(self) -> TextBuffer {
        self.buffer
    }

    fn fit_to_text(&mut self) {
        let rect = self.buffer.bounding_box(self.focused);
        self.geometry = ElementGeometry {
            corner: rect.corner(),
            width: rect.width(),
            height: rect.height(),
        };
    }
}
