//! Line measurement boundary.
//!
//! The core never lays out glyphs itself. A [`LineMetrics`] implementation
//! supplies width, ascent, descent and per-glyph advances for one line of
//! text in one font at one height. Results must be deterministic for equal
//! inputs, since [`TextLine`](super::TextLine) caches them.

use crate::unicode::{WidthMethod, display_width_char};

/// Font selection shared by every line of a buffer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Font {
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl Font {
    /// A regular-weight, upright font of the given family.
    #[must_use]
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            bold: false,
            italic: false,
        }
    }

    /// Same family, bold.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Same family, italic.
    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("sans")
    }
}

/// Measured extent of one line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineMeasure {
    pub width: f64,
    pub ascent: f64,
    pub descent: f64,
    /// Advance of each glyph, in order. One entry per character.
    pub glyph_offsets: Vec<f64>,
}

/// Text measurement collaborator.
pub trait LineMetrics: Send + Sync {
    /// Measure `text` set in `font` at `height`.
    fn measure_line(&self, text: &str, font: &Font, height: f64) -> LineMeasure;
}

/// Deterministic metrics for a fixed-pitch font.
///
/// Every display column advances by `advance * height`; East Asian wide
/// characters take two columns and combining marks none.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Column advance as a fraction of the font height.
    pub advance: f64,
    /// Ascent as a fraction of the font height.
    pub ascent_ratio: f64,
    /// Descent as a fraction of the font height.
    pub descent_ratio: f64,
    /// How ambiguous-width characters are counted.
    pub width_method: WidthMethod,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            ascent_ratio: 0.8,
            descent_ratio: 0.2,
            width_method: WidthMethod::WcWidth,
        }
    }
}

impl LineMetrics for MonospaceMetrics {
    fn measure_line(&self, text: &str, font: &Font, height: f64) -> LineMeasure {
        let column = self.advance * height * if font.bold { 1.1 } else { 1.0 };
        let glyph_offsets: Vec<f64> = text
            .chars()
            .map(|c| display_width_char(c, self.width_method) as f64 * column)
            .collect();
        LineMeasure {
            width: glyph_offsets.iter().sum(),
            ascent: height * self.ascent_ratio,
            descent: height * self.descent_ratio,
            glyph_offsets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_ascii() {
        let metrics = MonospaceMetrics::default();
        let m = metrics.measure_line("abcd", &Font::default(), 1.0);
        assert!((m.width - 2.4).abs() < 1e-9);
        assert_eq!(m.glyph_offsets.len(), 4);
        assert!((m.ascent - 0.8).abs() < 1e-9);
        assert!((m.descent - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_monospace_wide_chars() {
        let metrics = MonospaceMetrics {
            advance: 1.0,
            ..MonospaceMetrics::default()
        };
        let m = metrics.measure_line("a漢", &Font::default(), 2.0);
        assert_eq!(m.glyph_offsets, vec![2.0, 4.0]);
        assert_eq!(m.width, 6.0);
    }

    #[test]
    fn test_bold_is_wider() {
        let metrics = MonospaceMetrics::default();
        let regular = metrics.measure_line("mm", &Font::new("mono"), 1.0);
        let bold = metrics.measure_line("mm", &Font::new("mono").bold(), 1.0);
        assert!(bold.width > regular.width);
    }

    #[test]
    fn test_deterministic() {
        let metrics = MonospaceMetrics::default();
        let font = Font::new("serif").italic();
        assert_eq!(
            metrics.measure_line("same", &font, 0.8),
            metrics.measure_line("same", &font, 0.8)
        );
    }
}
