//! RGBA color attached to a text block.
//!
//! The editing core never draws anything, so color is carried only as a
//! placement attribute and handed back to whoever renders the text.
//!
//! # Examples
//!
//! ```
//! use richtext_core::{Rgba, TextAttributes};
//!
//! assert_eq!(TextAttributes::default().color, Rgba::BLACK);
//! let ink = Rgba::rgb(0.1, 0.1, 0.18);
//! assert_eq!(ink.a, 1.0);
//! ```

/// RGBA color with f32 components in range [0.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Rgba {
    /// Opaque black, the default text color.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque red.
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);

    /// Create a color from f32 components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from f32 components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}
