//! Best-effort decoding of raw text bytes.
//!
//! Text content must never abort an editing session. Bytes are taken as
//! UTF-8 when valid; otherwise a [`LocaleDecoder`] gets a chance to
//! transcode them from the legacy locale encoding, and if that fails too the
//! text is treated as empty with a logged warning.

use std::borrow::Cow;
use std::env;

/// How raw bytes were turned into text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The bytes were valid UTF-8.
    Utf8,
    /// The bytes were transcoded from the locale encoding.
    Transcoded,
    /// Neither worked; the text was replaced by an empty string.
    Invalid,
}

impl DecodeOutcome {
    /// Whether the original content survived.
    #[must_use]
    pub fn is_lossless(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Transcodes legacy-encoded bytes to UTF-8.
pub trait LocaleDecoder {
    /// Decode `bytes`, or `None` if they are not valid in this encoding.
    fn decode(&self, bytes: &[u8]) -> Option<String>;
}

/// Never transcodes; anything that is not UTF-8 is rejected.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoTranscode;

impl LocaleDecoder for NoTranscode {
    fn decode(&self, _bytes: &[u8]) -> Option<String> {
        None
    }
}

/// ISO-8859-1: every byte maps to the code point of the same value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latin1;

impl LocaleDecoder for Latin1 {
    fn decode(&self, bytes: &[u8]) -> Option<String> {
        Some(bytes.iter().map(|&b| char::from(b)).collect())
    }
}

/// ISO-8859-15: Latin-1 with the euro sign and a few French/Finnish letters.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latin9;

impl LocaleDecoder for Latin9 {
    fn decode(&self, bytes: &[u8]) -> Option<String> {
        Some(
            bytes
                .iter()
                .map(|&b| match b {
                    0xA4 => '€',
                    0xA6 => 'Š',
                    0xA8 => 'š',
                    0xB4 => 'Ž',
                    0xB8 => 'ž',
                    0xBC => 'Œ',
                    0xBD => 'œ',
                    0xBE => 'Ÿ',
                    _ => char::from(b),
                })
                .collect(),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Codeset {
    Latin1,
    Latin9,
    Unsupported,
}

/// Decoder for the process locale, resolved from `LC_ALL`, `LC_CTYPE` and
/// `LANG` in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SystemLocale {
    codeset: Codeset,
}

impl SystemLocale {
    /// Resolve the locale from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let name = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .filter_map(|var| env::var(var).ok())
            .find(|value| !value.is_empty())
            .unwrap_or_default();
        Self::from_locale_name(&name)
    }

    /// Resolve from a locale name such as `de_DE.ISO-8859-1@euro`.
    #[must_use]
    pub fn from_locale_name(name: &str) -> Self {
        let codeset = name
            .split_once('.')
            .map(|(_, rest)| rest.split('@').next().unwrap_or(rest))
            .unwrap_or_default()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_ascii_lowercase();
        let codeset = match codeset.as_str() {
            "iso88591" | "latin1" => Codeset::Latin1,
            "iso885915" | "latin9" => Codeset::Latin9,
            _ => Codeset::Unsupported,
        };
        Self { codeset }
    }

    /// Whether this locale has a legacy encoding we can transcode from.
    #[must_use]
    pub fn can_transcode(&self) -> bool {
        self.codeset != Codeset::Unsupported
    }
}

impl Default for SystemLocale {
    fn default() -> Self {
        Self::from_env()
    }
}

impl LocaleDecoder for SystemLocale {
    fn decode(&self, bytes: &[u8]) -> Option<String> {
        match self.codeset {
            Codeset::Latin1 => Latin1.decode(bytes),
            Codeset::Latin9 => Latin9.decode(bytes),
            Codeset::Unsupported => None,
        }
    }
}

/// Decode `bytes` as UTF-8, falling back to `decoder`, then to "".
pub fn decode_text<'a>(bytes: &'a [u8], decoder: &dyn LocaleDecoder) -> (Cow<'a, str>, DecodeOutcome) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), DecodeOutcome::Utf8),
        Err(err) => {
            if let Some(text) = decoder.decode(bytes) {
                tracing::debug!(len = bytes.len(), "transcoded non-UTF-8 text from locale encoding");
                (Cow::Owned(text), DecodeOutcome::Transcoded)
            } else {
                tracing::warn!(
                    valid_up_to = err.valid_up_to(),
                    "invalid string data, neither UTF-8 nor locale encoding; using empty text"
                );
                (Cow::Borrowed(""), DecodeOutcome::Invalid)
            }
        }
    }
}
