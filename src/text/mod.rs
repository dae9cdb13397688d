//! Text storage, editing primitives and the undo journal.
//!
//! Key types:
//!
//! - [`TextBuffer`]: Ordered lines plus cursor, attributes and cached extents
//! - [`TextLine`]: One line with memoized metrics
//! - [`EditRecord`]: Reversible record of one primitive edit
//! - [`EditList`]: Records produced together by one input event
//! - [`LineMetrics`]: Measurement collaborator, [`MonospaceMetrics`] by default
//!
//! # Examples
//!
//! ## Editing at the cursor
//!
//! ```
//! use richtext_core::{Cursor, TextBuffer};
//!
//! let mut buf = TextBuffer::from_string("ab");
//! buf.set_cursor(0, 1);
//! buf.insert_char('X');
//! assert_eq!(buf.to_string(), "aXb");
//! assert_eq!(buf.cursor(), Cursor::new(0, 2));
//! ```
//!
//! ## Undo and redo through records
//!
//! ```
//! use richtext_core::{EditOp, EditRecord, NoHost, TextBuffer};
//!
//! let mut buf = TextBuffer::from_string("hello world");
//! buf.set_cursor(0, 5);
//! let mut split = EditRecord::perform(EditOp::SplitLine, &mut buf, &NoHost).unwrap();
//! assert_eq!(buf.to_string(), "hello\n world");
//!
//! split.revert(&mut buf, &mut NoHost).unwrap();
//! assert_eq!(buf.to_string(), "hello world");
//! ```

mod buffer;
mod decode;
mod edit;
mod line;
mod metrics;

pub use buffer::{Cursor, Direction, TextAttributes, TextBuffer};
pub use decode::{
    DecodeOutcome, Latin1, Latin9, LocaleDecoder, NoTranscode, SystemLocale, decode_text,
};
pub use edit::{
    EditKind, EditList, EditOp, EditRecord, GeometryHost, NoHost, PropertySnapshot,
};
pub use line::TextLine;
pub use metrics::{Font, LineMeasure, LineMetrics, MonospaceMetrics};
