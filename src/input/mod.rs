//! Keyboard input for a focused text buffer.
//!
//! [`route_key`] turns a [`KeyEvent`] into cursor moves or recorded edits.
//! [`route_text`] types a whole string, as delivered by an input method or
//! a paste of plain keystrokes.

mod keyboard;
mod router;

pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use router::{KeyOutcome, route_key, route_text};
