//! Lazily parsed misc metadata.
//!
//! The exporter attaches a free-form key/value blob to each layer as a
//! backslash-escaped JSON object inside a string. [`Misc`] stores that raw
//! string verbatim and only unescapes and parses it on first read. The outcome
//! (map or error) is cached until the raw string is replaced.

#[cfg(test)]
#[path = "misc_test.rs"]
mod tests;

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{MiscError, kind_name};

/// Parsed misc metadata.
pub type MiscMap = Map<String, Value>;

/// Turns unescaped misc text into a key/value map.
pub trait MiscParser {
    /// Parse `text` (already unescaped) into a map.
    ///
    /// # Errors
    ///
    /// Returns [`MiscError::Syntax`] when `text` is not JSON and
    /// [`MiscError::NotAnObject`] when it is JSON but not an object.
    fn parse(&self, text: &str) -> Result<MiscMap, MiscError>;
}

/// Default parser backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMiscParser;

impl MiscParser for JsonMiscParser {
    fn parse(&self, text: &str) -> Result<MiscMap, MiscError> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(MiscError::NotAnObject { found: kind_name(&other) }),
            Err(e) => Err(MiscError::Syntax(e.to_string())),
        }
    }
}

// =============================================================================
// CELL
// =============================================================================

/// Raw misc string plus its parse-once cache.
///
/// Safe to read from several threads: the first reader parses, concurrent
/// first readers wait for that result rather than parsing again.
#[derive(Default, Clone)]
pub struct Misc {
    raw: String,
    parsed: OnceLock<Result<MiscMap, MiscError>>,
}

impl Misc {
    /// Store `raw` without parsing it.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            parsed: OnceLock::new(),
        }
    }

    /// The string exactly as exported (empty when absent).
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Replace the raw string and drop any cached parse.
    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.raw = raw.into();
        self.parsed = OnceLock::new();
    }

    /// Whether a parse outcome is currently cached.
    #[must_use]
    pub fn is_parsed(&self) -> bool {
        self.parsed.get().is_some()
    }

    /// Parsed map, parsing with [`JsonMiscParser`] on first access.
    ///
    /// Returns `Ok(None)` when the raw string is empty.
    ///
    /// # Errors
    ///
    /// Returns the (cached) [`MiscError`] when the blob cannot be decoded.
    pub fn get(&self) -> Result<Option<&MiscMap>, MiscError> {
        self.get_with(&JsonMiscParser)
    }

    /// Like [`Misc::get`] with a caller-supplied parser.
    ///
    /// The parser only runs if nothing is cached yet.
    ///
    /// # Errors
    ///
    /// Returns the (cached) [`MiscError`] when the blob cannot be decoded.
    pub fn get_with<P: MiscParser + ?Sized>(&self, parser: &P) -> Result<Option<&MiscMap>, MiscError> {
        if self.raw.is_empty() {
            return Ok(None);
        }

        let outcome = self.parsed.get_or_init(|| {
            let parsed = unescape(&self.raw).and_then(|text| parser.parse(&text));
            match &parsed {
                Ok(map) => tracing::debug!(bytes = self.raw.len(), keys = map.len(), "parsed misc metadata"),
                Err(e) => tracing::debug!(error = %e, "misc metadata rejected"),
            }
            parsed
        });

        match outcome {
            Ok(map) => Ok(Some(map)),
            Err(e) => Err(e.clone()),
        }
    }
}

impl fmt::Debug for Misc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Misc")
            .field("raw", &self.raw)
            .field("parsed", &self.is_parsed())
            .finish()
    }
}

/// Two cells are equal when their raw strings are; the cache is not compared.
impl PartialEq for Misc {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Serialize for Misc {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

// =============================================================================
// UNESCAPE
// =============================================================================

/// Reverse the exporter's backslash escaping.
///
/// Recognises `\a \b \t \n \v \f \r \e`, octal `\0`..`\777` (up to three
/// digits), `\xHH`, `\uHHHH` (surrogate pairs combined), and `\cX` control
/// characters. Any other escaped punctuation stands for itself, so `\"`
/// becomes `"` and `\\` becomes `\`. Other escaped word characters are rejected.
///
/// # Errors
///
/// Returns [`MiscError::Escape`] for a trailing backslash, short or invalid
/// hex digits, an unpaired surrogate, a bad `\c` letter, or an unrecognized
/// escaped word character such as `\q` or `\8`.
pub fn unescape(raw: &str) -> Result<Cow<'_, str>, MiscError> {
    if !raw.contains('\\') {
        return Ok(Cow::Borrowed(raw));
    }

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some((_, esc)) = chars.next() else {
            return Err(escape_error(offset, "trailing backslash"));
        };
        let decoded = match esc {
            'a' => '\u{07}',
            'b' => '\u{08}',
            't' => '\t',
            'n' => '\n',
            'v' => '\u{0B}',
            'f' => '\u{0C}',
            'r' => '\r',
            'e' => '\u{1B}',
            '0'..='7' => {
                let mut value = esc.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|(_, d)| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(value & 0xFF).unwrap_or('\u{FFFD}')
            }
            'x' => {
                let value = take_hex(&mut chars, 2, offset)?;
                char::from_u32(value).unwrap_or('\u{FFFD}')
            }
            'u' => {
                let high = take_hex(&mut chars, 4, offset)?;
                decode_utf16_escape(high, bytes, &mut chars, offset)?
            }
            'c' => match chars.next() {
                Some((_, letter)) if letter.is_ascii_alphabetic() || ('@'..='_').contains(&letter) => {
                    let upper = letter.to_ascii_uppercase();
                    char::from(u8::try_from(u32::from(upper) - 0x40).unwrap_or(0))
                }
                _ => return Err(escape_error(offset, "bad control escape")),
            },
            other if other.is_alphanumeric() || other == '_' => {
                return Err(escape_error(offset, "unrecognized escape"));
            }
            other => other,
        };
        out.push(decoded);
    }

    Ok(Cow::Owned(out))
}

type Chars<'a> = std::iter::Peekable<std::str::CharIndices<'a>>;

fn take_hex(chars: &mut Chars<'_>, digits: usize, offset: usize) -> Result<u32, MiscError> {
    let mut value = 0;
    for _ in 0..digits {
        let Some(d) = chars.next().and_then(|(_, c)| c.to_digit(16)) else {
            return Err(escape_error(offset, "insufficient hex digits"));
        };
        value = value * 16 + d;
    }
    Ok(value)
}

fn decode_utf16_escape(high: u32, bytes: &[u8], chars: &mut Chars<'_>, offset: usize) -> Result<char, MiscError> {
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high).ok_or_else(|| escape_error(offset, "unpaired surrogate"));
    }

    let next_is_unicode_escape = chars
        .peek()
        .is_some_and(|&(i, c)| c == '\\' && bytes.get(i + 1) == Some(&b'u'));
    if !next_is_unicode_escape {
        return Err(escape_error(offset, "unpaired surrogate"));
    }
    chars.next();
    chars.next();

    let low = take_hex(chars, 4, offset)?;
    if !(0xDC00..0xE000).contains(&low) {
        return Err(escape_error(offset, "unpaired surrogate"));
    }
    let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    char::from_u32(combined).ok_or_else(|| escape_error(offset, "unpaired surrogate"))
}

fn escape_error(offset: usize, message: &str) -> MiscError {
    MiscError::Escape {
        offset,
        message: message.to_owned(),
    }
}
