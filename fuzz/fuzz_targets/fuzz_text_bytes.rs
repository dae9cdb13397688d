//! Fuzz target for loading raw bytes and typing them.
//!
//! Arbitrary bytes must never panic the buffer, whatever the fallback
//! decoder, and typing any decoded text must keep the cursor in range.

#![no_main]

use libfuzzer_sys::fuzz_target;
use richtext_core::text::{Latin1, NoTranscode};
use richtext_core::{NoHost, TextBuffer, route_text};

fuzz_target!(|data: &[u8]| {
    let mut buf = TextBuffer::new();
    let outcome = buf.set_bytes_with(data, &NoTranscode);
    if !outcome.is_lossless() {
        assert_eq!(buf.to_string(), "");
    }

    let mut latin = TextBuffer::new();
    assert!(latin.set_bytes_with(data, &Latin1).is_lossless());

    let typed = latin.to_string();
    let mut target = TextBuffer::from_string("seed");
    route_text(&mut target, &NoHost, &typed);
    let cursor = target.cursor();
    assert!(cursor.row < target.line_count());
    assert!(cursor.pos <= target.line_char_len(cursor.row));
});
