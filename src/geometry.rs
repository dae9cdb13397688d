//! Placement types shared by the buffer and its host.

/// A point in host coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its edges.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Width of the rectangle.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the rectangle.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Top-left corner.
    #[must_use]
    pub const fn corner(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

/// Horizontal alignment of every line relative to the text position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    #[default]
    Left,
    Centre,
    Right,
}

impl Alignment {
    /// How far left of the anchor a line of `width` starts.
    #[must_use]
    pub fn offset(self, width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Centre => width / 2.0,
            Self::Right => width,
        }
    }
}
