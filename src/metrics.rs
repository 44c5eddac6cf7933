//! Size and token accounting.
//!
//! TOON exists to shrink structured payloads, so the crate ships the two
//! measurements users reach for: a rough token estimate of a text, and a
//! side-by-side size comparison against pretty-printed JSON for the same
//! value.

use crate::{encode_with_options, Result, ToonOptions, Value};

/// Estimates the token count of a text as seen by a subword tokenizer,
/// using the common four-characters-per-token heuristic. Empty text is
/// zero tokens.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    let chars = text.chars().count();
    (chars + 3) / 4
}

/// Byte sizes of the two renderings of one value, from
/// [`compare_with_json`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeComparison {
    /// Bytes of the TOON encoding under default options.
    pub toon_size: usize,
    /// Bytes of the pretty-printed JSON encoding.
    pub json_size: usize,
    /// How much smaller TOON is, as a percentage of the JSON size.
    /// Negative when TOON is larger.
    pub savings_percentage: f64,
}

/// Encodes `value` as TOON (default options) and as pretty-printed JSON
/// and reports the byte sizes side by side.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{compare_with_json, toon};
///
/// let value = toon!([
///     {"id": 1, "name": "Alice", "score": 91},
///     {"id": 2, "name": "Bob", "score": 87},
///     {"id": 3, "name": "Cara", "score": 78},
/// ]);
/// let sizes = compare_with_json(&value).unwrap();
/// assert!(sizes.toon_size < sizes.json_size);
/// assert!(sizes.savings_percentage > 0.0);
/// ```
pub fn compare_with_json(value: &Value) -> Result<SizeComparison> {
    let toon = encode_with_options(value, &ToonOptions::default())?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| crate::Error::Message(e.to_string()))?;
    let toon_size = toon.len();
    let json_size = json.len();
    let savings_percentage = if json_size == 0 {
        0.0
    } else {
        (json_size as f64 - toon_size as f64) / json_size as f64 * 100.0
    };
    Ok(SizeComparison {
        toon_size,
        json_size,
        savings_percentage,
    })
}
