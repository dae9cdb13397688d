//! A single line of text with memoized metrics.

use crate::text::metrics::{Font, LineMeasure, LineMetrics};
use std::cell::{Ref, RefCell};

/// Sample measured for an empty line so the caret still gets a sensible
/// ascent and descent. Holds tall ascenders, descenders and digits.
const EMPTY_LINE_SAMPLE: &str = "XjgM149";

/// Heights closer than this are treated as equal.
const HEIGHT_EPSILON: f64 = 0.00001;

#[derive(Clone, Debug)]
struct LineCache {
    revision: u64,
    measure: LineMeasure,
}

/// One line of a [`TextBuffer`](super::TextBuffer).
///
/// The line never contains a newline. Metrics are computed through a
/// [`LineMetrics`] collaborator on first use and reused until the content,
/// font or height changes. Every such change bumps an internal revision;
/// the cache is valid only while its recorded revision matches.
#[derive(Clone, Debug)]
pub struct TextLine {
    content: String,
    char_len: usize,
    font: Font,
    height: f64,
    revision: u64,
    cache: RefCell<Option<LineCache>>,
}

impl TextLine {
    /// Create a line. Newlines in `content` are the caller's bug.
    #[must_use]
    pub fn new(content: &str, font: Font, height: f64) -> Self {
        debug_assert!(!content.contains('\n'), "a text line holds no newline");
        Self {
            content: content.to_string(),
            char_len: content.chars().count(),
            font,
            height,
            revision: 0,
            cache: RefCell::new(None),
        }
    }

    /// The line's text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Length in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.char_len
    }

    /// Check if the line is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[must_use]
    pub fn font(&self) -> &Font {
        &self.font
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Replace the content. Returns `false` and keeps the cache when the new
    /// content equals the current one.
    pub fn set_string(&mut self, s: &str) -> bool {
        if self.content == s {
            return false;
        }
        s.clone_into(&mut self.content);
        self.char_len = s.chars().count();
        self.dirty();
        true
    }

    /// Change the font, invalidating metrics if it differs.
    pub fn set_font(&mut self, font: &Font) -> bool {
        if self.font == *font {
            return false;
        }
        self.font = font.clone();
        self.dirty();
        true
    }

    /// Change the height, invalidating metrics if it differs.
    pub fn set_height(&mut self, height: f64) -> bool {
        if (self.height - height).abs() < HEIGHT_EPSILON {
            return false;
        }
        self.height = height;
        self.dirty();
        true
    }

    /// Whether metrics are cached for the current content, font and height.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.cache
            .borrow()
            .as_ref()
            .is_some_and(|cache| cache.revision == self.revision)
    }

    /// Metrics for the current content, computing them if stale.
    pub fn measure(&self, metrics: &dyn LineMetrics) -> Ref<'_, LineMeasure> {
        if !self.is_measured() {
            let measure = self.compute(metrics);
            *self.cache.borrow_mut() = Some(LineCache {
                revision: self.revision,
                measure,
            });
        }
        Ref::map(self.cache.borrow(), |cache| match cache {
            Some(cache) => &cache.measure,
            None => unreachable!("line cache populated above"),
        })
    }

    /// Width of the line; zero for an empty line.
    pub fn width(&self, metrics: &dyn LineMetrics) -> f64 {
        self.measure(metrics).width
    }

    pub fn ascent(&self, metrics: &dyn LineMetrics) -> f64 {
        self.measure(metrics).ascent
    }

    pub fn descent(&self, metrics: &dyn LineMetrics) -> f64 {
        self.measure(metrics).descent
    }

    /// Width of the first `pos` characters, from cached glyph advances.
    pub fn prefix_width(&self, metrics: &dyn LineMetrics, pos: usize) -> f64 {
        self.measure(metrics).glyph_offsets.iter().take(pos).sum()
    }

    fn compute(&self, metrics: &dyn LineMetrics) -> LineMeasure {
        tracing::trace!(chars = self.char_len, "measuring text line");
        if self.content.is_empty() {
            let sample = metrics.measure_line(EMPTY_LINE_SAMPLE, &self.font, self.height);
            LineMeasure {
                width: 0.0,
                ascent: sample.ascent,
                descent: sample.descent,
                glyph_offsets: Vec::new(),
            }
        } else {
            metrics.measure_line(&self.content, &self.font, self.height)
        }
    }

    fn dirty(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Byte index of character offset `pos`, clamped to the end.
    pub(crate) fn byte_index(&self, pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(pos)
            .map_or(self.content.len(), |(idx, _)| idx)
    }

    /// Character at offset `pos`.
    pub(crate) fn char_at(&self, pos: usize) -> Option<char> {
        self.content.chars().nth(pos)
    }

    pub(crate) fn insert_char(&mut self, pos: usize, c: char) {
        let idx = self.byte_index(pos);
        self.content.insert(idx, c);
        self.char_len += 1;
        self.dirty();
    }

    pub(crate) fn remove_char(&mut self, pos: usize) -> Option<char> {
        if pos >= self.char_len {
            return None;
        }
        let idx = self.byte_index(pos);
        let removed = self.content.remove(idx);
        self.char_len -= 1;
        self.dirty();
        Some(removed)
    }

    /// Cut the line at `pos`, returning the tail.
    pub(crate) fn split_off(&mut self, pos: usize) -> String {
        let idx = self.byte_index(pos);
        let tail = self.content.split_off(idx);
        self.char_len -= tail.chars().count();
        if !tail.is_empty() {
            self.dirty();
        }
        tail
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.content.push_str(s);
        self.char_len += s.chars().count();
        self.dirty();
    }
}
