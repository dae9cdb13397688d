//! `richtext_core` - In-memory rich text editing core
//!
//! A mutable multi-line text buffer with cursor state, character and line
//! edit primitives, Unicode-aware word navigation, and reversible edit
//! records that an undo stack can replay in either direction. Glyph layout
//! is delegated to a [`LineMetrics`] implementation; the geometry of the
//! object owning the text is reached through [`GeometryHost`].
//!
//! # Examples
//!
//! ```
//! use richtext_core::{KeyCode, KeyEvent, NoHost, TextBuffer, route_key, route_text};
//!
//! let mut buf = TextBuffer::new();
//! let mut typed = route_text(&mut buf, &NoHost, "foo bar").edit.unwrap();
//!
//! route_key(&mut buf, &NoHost, &KeyEvent::with_ctrl(KeyCode::Left));
//! assert_eq!(buf.cursor().pos, 4);
//!
//! typed.revert(&mut buf, &mut NoHost).unwrap();
//! assert_eq!(buf.to_string(), "");
//! ```

// Crate-level lint configuration
#![deny(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Row indices from floored coordinates
#![allow(clippy::cast_sign_loss)] // Floored coordinates are checked non-negative first
#![allow(clippy::cast_precision_loss)] // Line counts as f64 for layout math
#![allow(clippy::module_name_repetitions)] // Allow text::TextLine etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::needless_pass_by_value)] // EditRecord::free consumes on purpose
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::float_cmp)] // Tests compare exact small-integer widths
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod color;
pub mod error;
pub mod geometry;
pub mod host;
pub mod input;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use geometry::{Alignment, Point, Rect};
pub use host::{ElementGeometry, TextElement};

// Re-export input types
pub use input::{KeyCode, KeyEvent, KeyModifiers, KeyOutcome, route_key, route_text};

// Re-export commonly used types
pub use text::{
    Cursor, DecodeOutcome, Direction, EditKind, EditList, EditOp, EditRecord, Font,
    GeometryHost, LineMeasure, LineMetrics, LocaleDecoder, MonospaceMetrics, NoHost,
    PropertySnapshot, TextAttributes, TextBuffer, TextLine,
};
pub use unicode::{WidthMethod, WordStep, word_end, word_start};
