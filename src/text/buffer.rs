//! Multi-line text buffer with a cursor and edit primitives.
//!
//! [`TextBuffer`] owns an ordered, never-empty list of [`TextLine`]s and a
//! cursor given as a row plus a character offset within that row. All edits
//! happen at the cursor; each primitive reports whether it changed anything
//! so the caller knows whether to record an undo step and redraw.
//!
//! # Examples
//!
//! ```
//! use richtext_core::TextBuffer;
//!
//! let mut buf = TextBuffer::from_string("hello\nworld");
//! buf.set_cursor(0, 5);
//! assert!(buf.split_line());
//! assert_eq!(buf.to_string(), "hello\n\nworld");
//! assert!(buf.join_lines(0));
//! assert_eq!(buf.to_string(), "hello\nworld");
//! ```

use crate::color::Rgba;
use crate::geometry::{Alignment, Point, Rect};
use crate::text::decode::{DecodeOutcome, LocaleDecoder, SystemLocale, decode_text};
use crate::text::line::TextLine;
use crate::text::metrics::{Font, LineMetrics, MonospaceMetrics};
use crate::unicode::{WordStep, word_end, word_start};
use std::fmt;
use std::sync::Arc;

/// Caret thickness is the line's ascent plus descent divided by this.
const CURSOR_HEIGHT_RATIO: f64 = 20.0;

/// Cursor position in the buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cursor {
    /// Line index (0-indexed).
    pub row: usize,
    /// Character offset within the line.
    pub pos: usize,
}

impl Cursor {
    /// Create a new cursor at position.
    #[must_use]
    pub const fn new(row: usize, pos: usize) -> Self {
        Self { row, pos }
    }
}

/// Direction for [`TextBuffer::move_cursor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    /// Start of the current line.
    Home,
    /// End of the current line.
    End,
}

/// Appearance and placement shared by every line of a buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct TextAttributes {
    pub font: Font,
    /// Font height, which is also the line pitch.
    pub height: f64,
    /// Anchor of the first line's baseline.
    pub position: Point,
    pub color: Rgba,
    pub alignment: Alignment,
}

impl Default for TextAttributes {
    fn default() -> Self {
        Self {
            font: Font::default(),
            height: 0.8,
            position: Point::default(),
            color: Rgba::BLACK,
            alignment: Alignment::Left,
        }
    }
}

/// Editable multi-line text with cursor and cached layout extents.
///
/// Derived extents are refreshed after every mutation:
///
/// - `max_width` is the widest line.
/// - `ascent` and `descent` are the *arithmetic mean* over all lines. This
///   keeps line spacing steady when line heights differ; it is a known
///   simplification, not a per-line layout.
#[derive(Clone)]
pub struct TextBuffer {
    lines: Vec<TextLine>,
    attributes: TextAttributes,
    cursor: Cursor,
    max_width: f64,
    ascent: f64,
    descent: f64,
    metrics: Arc<dyn LineMetrics>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.lines)
            .field("attributes", &self.attributes)
            .field("cursor", &self.cursor)
            .field("max_width", &self.max_width)
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line.as_str())?;
        }
        Ok(())
    }
}

impl TextBuffer {
    /// Create a buffer holding one empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::from_string("")
    }

    /// Create a buffer with default attributes and monospace metrics.
    #[must_use]
    pub fn from_string(text: &str) -> Self {
        Self::with_attributes(
            text,
            TextAttributes::default(),
            Arc::new(MonospaceMetrics::default()),
        )
    }

    /// Create a buffer with explicit attributes and metrics provider.
    #[must_use]
    pub fn with_attributes(
        text: &str,
        attributes: TextAttributes,
        metrics: Arc<dyn LineMetrics>,
    ) -> Self {
        let mut buffer = Self {
            lines: Vec::new(),
            attributes,
            cursor: Cursor::default(),
            max_width: 0.0,
            ascent: 0.0,
            descent: 0.0,
            metrics,
        };
        buffer.rebuild_lines(text);
        buffer.recalc();
        buffer
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// All lines, never empty.
    #[must_use]
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    /// Get a line by index.
    #[must_use]
    pub fn line(&self, row: usize) -> Option<&TextLine> {
        self.lines.get(row)
    }

    /// Number of lines (at least one).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of one line.
    #[must_use]
    pub fn line_text(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(TextLine::as_str)
    }

    /// Length of one line in characters; zero past the last line.
    #[must_use]
    pub fn line_char_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, TextLine::char_len)
    }

    /// Measured width of one line; zero past the last line.
    #[must_use]
    pub fn line_width(&self, row: usize) -> f64 {
        self.lines
            .get(row)
            .map_or(0.0, |line| line.width(self.metrics()))
    }

    /// Check whether every line is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(TextLine::is_empty)
    }

    /// The metrics provider used for every line.
    #[must_use]
    pub fn metrics(&self) -> &dyn LineMetrics {
        &*self.metrics
    }

    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Mean ascent over all lines.
    #[must_use]
    pub fn ascent(&self) -> f64 {
        self.ascent
    }

    /// Mean descent over all lines.
    #[must_use]
    pub fn descent(&self) -> f64 {
        self.descent
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    #[must_use]
    pub fn attributes(&self) -> &TextAttributes {
        &self.attributes
    }

    /// Replace every attribute at once, pushing font and height to lines.
    pub fn set_attributes(&mut self, attributes: TextAttributes) {
        let font = attributes.font.clone();
        let height = attributes.height;
        self.attributes = attributes;
        for line in &mut self.lines {
            line.set_font(&font);
            line.set_height(height);
        }
        self.recalc();
    }

    #[must_use]
    pub fn font(&self) -> &Font {
        &self.attributes.font
    }

    /// Set the font of every line.
    pub fn set_font(&mut self, font: Font) {
        for line in &mut self.lines {
            line.set_font(&font);
        }
        self.attributes.font = font;
        self.recalc();
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.attributes.height
    }

    /// Set the height of every line.
    pub fn set_height(&mut self, height: f64) {
        self.attributes.height = height;
        for line in &mut self.lines {
            line.set_height(height);
        }
        self.recalc();
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.attributes.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.attributes.position = position;
    }

    #[must_use]
    pub fn color(&self) -> Rgba {
        self.attributes.color
    }

    pub fn set_color(&mut self, color: Rgba) {
        self.attributes.color = color;
    }

    #[must_use]
    pub fn alignment(&self) -> Alignment {
        self.attributes.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.attributes.alignment = alignment;
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    /// Get the current cursor position.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Set the cursor, clamped into the buffer.
    pub fn set_cursor(&mut self, row: usize, pos: usize) {
        self.cursor = Cursor::new(row, pos);
        self.clamp_cursor();
    }

    /// Put the cursor after the last character of the last line.
    pub fn set_cursor_at_end(&mut self) {
        let row = self.lines.len() - 1;
        self.cursor = Cursor::new(row, self.line_char_len(row));
    }

    /// Move the cursor. In word mode, Left and Right jump by word boundary
    /// and cross line edges. Returns whether the cursor moved.
    pub fn move_cursor(&mut self, direction: Direction, word_mode: bool) -> bool {
        let before = self.cursor;
        let Cursor { row, pos } = self.cursor;
        let last_row = self.lines.len() - 1;
        let len = self.line_char_len(row);

        match direction {
            Direction::Up => {
                self.cursor.row = row.saturating_sub(1);
            }
            Direction::Down => {
                self.cursor.row = (row + 1).min(last_row);
            }
            Direction::Left if word_mode => {
                match word_start(self.lines[row].as_str(), pos, row == 0) {
                    WordStep::Within(p) => self.cursor.pos = p,
                    WordStep::PreviousLineEnd => {
                        self.cursor.row = row - 1;
                        self.cursor.pos = self.line_char_len(row - 1);
                    }
                    WordStep::NextLineStart => {}
                }
            }
            Direction::Right if word_mode => {
                match word_end(self.lines[row].as_str(), pos, row == last_row) {
                    WordStep::Within(p) => self.cursor.pos = p,
                    WordStep::NextLineStart => {
                        self.cursor.row = row + 1;
                        self.cursor.pos = 0;
                    }
                    WordStep::PreviousLineEnd => {}
                }
            }
            Direction::Left => {
                self.cursor.pos = pos.saturating_sub(1);
            }
            Direction::Right => {
                self.cursor.pos = (pos + 1).min(len);
            }
            Direction::Home => self.cursor.pos = 0,
            Direction::End => self.cursor.pos = len,
        }

        self.clamp_cursor();
        self.cursor != before
    }

    fn clamp_cursor(&mut self) {
        let last_row = self.lines.len() - 1;
        if self.cursor.row > last_row {
            self.cursor.row = last_row;
        }
        let len = self.lines[self.cursor.row].char_len();
        if self.cursor.pos > len {
            self.cursor.pos = len;
        }
    }

    // ------------------------------------------------------------------
    // Edit primitives
    // ------------------------------------------------------------------

    /// Insert `c` at the cursor and advance past it.
    ///
    /// Line breaks cannot live inside a line; use [`split_line`] for those.
    /// Inserting `'\n'` or `'\r'` is refused.
    ///
    /// [`split_line`]: Self::split_line
    pub fn insert_char(&mut self, c: char) -> bool {
        if c == '\n' || c == '\r' {
            tracing::debug!(?c, "refusing to insert a line break character");
            return false;
        }
        let Cursor { row, pos } = self.cursor;
        self.lines[row].insert_char(pos, c);
        self.cursor.pos += 1;
        self.after_edit();
        true
    }

    /// Delete the character after the cursor, or join the next line onto
    /// this one when the cursor is at the end of a line.
    pub fn delete_forward(&mut self) -> bool {
        let Cursor { row, pos } = self.cursor;
        if pos < self.lines[row].char_len() {
            self.lines[row].remove_char(pos);
            self.after_edit();
            true
        } else if row + 1 < self.lines.len() {
            self.join_lines(row)
        } else {
            false
        }
    }

    /// Delete the character before the cursor, or join this line onto the
    /// previous one when the cursor is at the start of a line.
    pub fn delete_backward(&mut self) -> bool {
        let Cursor { row, pos } = self.cursor;
        if pos > 0 {
            self.lines[row].remove_char(pos - 1);
            self.cursor.pos -= 1;
            self.after_edit();
            true
        } else if row > 0 {
            self.join_lines(row - 1)
        } else {
            false
        }
    }

    /// Break the current line at the cursor. The cursor moves to the start
    /// of the new line.
    pub fn split_line(&mut self) -> bool {
        let Cursor { row, pos } = self.cursor;
        let tail = self.lines[row].split_off(pos);
        let line = TextLine::new(&tail, self.attributes.font.clone(), self.attributes.height);
        self.lines.insert(row + 1, line);
        self.cursor = Cursor::new(row + 1, 0);
        self.after_edit();
        true
    }

    /// Append line `row + 1` to line `row`. The cursor lands on the join
    /// point. Returns `false` if `row` is the last line.
    pub fn join_lines(&mut self, row: usize) -> bool {
        if row + 1 >= self.lines.len() {
            return false;
        }
        let join_pos = self.lines[row].char_len();
        let next = self.lines.remove(row + 1);
        self.lines[row].push_str(next.as_str());
        self.cursor = Cursor::new(row, join_pos);
        self.after_edit();
        true
    }

    /// Reset to a single empty line. Returns `false` if already empty.
    pub fn delete_all(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.rebuild_lines("");
        self.cursor = Cursor::default();
        self.recalc();
        true
    }

    // ------------------------------------------------------------------
    // Whole-buffer text
    // ------------------------------------------------------------------

    /// Replace the whole text, splitting on `'\n'`. The cursor keeps its
    /// place where possible and is pulled back when the new text is shorter.
    pub fn set_string(&mut self, text: &str) {
        self.rebuild_lines(text);
        self.clamp_cursor();
        self.recalc();
    }

    /// Replace the whole text from raw bytes, transcoding from the process
    /// locale if they are not UTF-8.
    pub fn set_bytes(&mut self, bytes: &[u8]) -> DecodeOutcome {
        self.set_bytes_with(bytes, &SystemLocale::from_env())
    }

    /// Replace the whole text from raw bytes with an explicit fallback
    /// decoder. Undecodable input leaves a single empty line.
    pub fn set_bytes_with(&mut self, bytes: &[u8], decoder: &dyn LocaleDecoder) -> DecodeOutcome {
        let (text, outcome) = decode_text(bytes, decoder);
        self.set_string(&text);
        outcome
    }

    fn rebuild_lines(&mut self, text: &str) {
        let font = &self.attributes.font;
        let height = self.attributes.height;
        self.lines = text
            .split('\n')
            .map(|line| TextLine::new(line, font.clone(), height))
            .collect();
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    fn after_edit(&mut self) {
        self.clamp_cursor();
        self.recalc();
    }

    fn recalc(&mut self) {
        let metrics = &*self.metrics;
        let mut max_width = 0.0_f64;
        let mut ascent = 0.0;
        let mut descent = 0.0;
        for line in &self.lines {
            let m = line.measure(metrics);
            max_width = max_width.max(m.width);
            ascent += m.ascent;
            descent += m.descent;
        }
        let count = self.lines.len() as f64;
        self.max_width = max_width;
        self.ascent = ascent / count;
        self.descent = descent / count;
    }

    /// Left edge of line `row` after alignment.
    fn line_left(&self, row: usize) -> f64 {
        self.attributes.position.x - self.attributes.alignment.offset(self.line_width(row))
    }

    /// Top of the first line.
    fn top(&self) -> f64 {
        self.attributes.position.y - self.ascent
    }

    /// Rectangle covering all lines. With `has_focus`, grows to fit the caret.
    #[must_use]
    pub fn bounding_box(&self, has_focus: bool) -> Rect {
        let left = self.attributes.position.x - self.attributes.alignment.offset(self.max_width);
        let top = self.top();
        let extra_lines = (self.lines.len() - 1) as f64;
        let mut rect = Rect {
            left,
            top,
            right: left + self.max_width,
            bottom: top + self.ascent + self.descent + self.attributes.height * extra_lines,
        };

        if has_focus {
            let caret = (self.ascent + self.descent) / CURSOR_HEIGHT_RATIO;
            if self.cursor.pos == 0 {
                rect.left -= caret / 2.0;
            } else {
                rect.right += caret / 2.0;
            }
            rect.top -= caret / 2.0;
            rect.bottom += caret;
        }
        rect
    }

    /// Manhattan distance from `point` to the text, measured against the
    /// nearest line's own extent horizontally.
    #[must_use]
    pub fn distance_from(&self, point: Point) -> f64 {
        let top = self.top();
        let last_row = self.lines.len() - 1;
        let bottom =
            self.attributes.position.y + self.descent + self.attributes.height * last_row as f64;

        let (dy, row) = if point.y <= top {
            (top - point.y, 0)
        } else if point.y >= bottom {
            (point.y - bottom, last_row)
        } else {
            (0.0, self.row_at(point.y))
        };

        let left = self.line_left(row);
        let right = left + self.line_width(row);
        let dx = if point.x <= left {
            left - point.x
        } else if point.x >= right {
            point.x - right
        } else {
            0.0
        };
        dx + dy
    }

    fn row_at(&self, y: f64) -> usize {
        let row = ((y - self.top()) / self.attributes.height).floor();
        if row <= 0.0 {
            0
        } else {
            (row as usize).min(self.lines.len() - 1)
        }
    }

    /// Place the cursor at the character boundary nearest to `point`.
    pub fn set_cursor_from_point(&mut self, point: Point) {
        let row = self.row_at(point.y);
        let left = self.line_left(row);
        let line = &self.lines[row];
        let measure = line.measure(&*self.metrics);

        let mut best = 0;
        let mut best_dist = (point.x - left).abs();
        let mut edge = left;
        for (idx, advance) in measure.glyph_offsets.iter().enumerate() {
            edge += advance;
            let dist = (point.x - edge).abs();
            if dist < best_dist {
                best_dist = dist;
                best = idx + 1;
            } else {
                break;
            }
        }
        drop(measure);
        self.cursor = Cursor::new(row, best);
        self.clamp_cursor();
    }

    /// Top end of the caret in host coordinates.
    #[must_use]
    pub fn cursor_position(&self) -> Point {
        let Cursor { row, pos } = self.cursor;
        let x = self.line_left(row) + self.lines[row].prefix_width(&*self.metrics, pos);
        let y = self.top() + self.attributes.height * row as f64;
        Point::new(x, y)
    }
}
