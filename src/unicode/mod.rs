//! Unicode utilities for word navigation and display width.

mod width;
mod word;

pub use width::{WidthMethod, display_width_char, display_width_with_method};
pub use word::{WordStep, is_word_char, word_end, word_start};
