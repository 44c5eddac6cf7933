//! TOON encoding.
//!
//! [`Encoder`] renders a [`Value`] tree as TOON text, normalizing scalars on
//! the way out so the text never carries non-finite numbers or negative
//! zero; encoding a tree and encoding its [`normalize`](crate::normalize)d
//! form produce the same text.
//!
//! Three sequence layouts are chosen automatically:
//!
//! - **Inline** for all-scalar sequences: `[3]: 1,2,3`
//! - **Tabular** for sequences of uniform-keyed flat mappings:
//!   `[2]{id,name}:` followed by one delimiter-joined row per element
//! - **Block** for everything else: `[n]:` followed by `- ` items
//!
//! Nested sequences and mappings always open an indented block under a bare
//! `key:` line; they are never inlined into the key's line.
//!
//! # Examples
//!
//! ```rust
//! use toon_codec::{encode, toon};
//!
//! let value = toon!({
//!     "users": [
//!         {"id": 1, "name": "Alice"},
//!         {"id": 2, "name": "Bob"},
//!     ]
//! });
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "users:\n  [2]{id,name}:\n    1,Alice\n    2,Bob");
//! ```

use crate::decode::looks_like_number;
use crate::normalize::normalize_number;
use crate::{Error, Map, Result, ToonOptions, Value};

/// Recursion bound for encode and decode. Trees deeper than this fail with
/// [`Error::Depth`] instead of exhausting the call stack.
pub(crate) const MAX_DEPTH: usize = 128;

/// A TOON encoder bound to one configuration.
///
/// The configuration is immutable for the life of the encoder; separate
/// instances with different options are fully independent.
pub struct Encoder {
    options: ToonOptions,
}

/// Tracks the set of containers on the current traversal path.
///
/// An owned [`Value`] tree cannot contain itself, but the guard keeps the
/// invariant explicit: re-entering a container on the path is a hard
/// [`Error::Cycle`], and the path length doubles as the recursion bound.
///
/// Entries carry the container kind alongside the address. A sequence's
/// buffer pointer is the address of its first element, so an untagged
/// address would collide with the mapping stored in that element.
struct PathGuard {
    path: Vec<PathNode>,
}

#[derive(PartialEq)]
enum PathNode {
    Mapping(*const Map),
    Sequence(*const Value),
}

impl PathGuard {
    fn new() -> Self {
        PathGuard { path: Vec::new() }
    }

    fn enter(&mut self, node: PathNode) -> Result<()> {
        if self.path.len() >= MAX_DEPTH {
            return Err(Error::Depth(MAX_DEPTH));
        }
        if self.path.contains(&node) {
            return Err(Error::Cycle);
        }
        self.path.push(node);
        Ok(())
    }

    fn leave(&mut self) {
        self.path.pop();
    }
}

impl Encoder {
    /// Creates an encoder with the given configuration.
    ///
    /// Indentation widths below 1 are raised to 1; nesting needs at least
    /// one column of indentation to survive a decode.
    #[must_use]
    pub fn new(mut options: ToonOptions) -> Self {
        options.indent = options.indent.max(1);
        Encoder { options }
    }

    /// Encodes a value tree as TOON text.
    ///
    /// Scalars are normalized as they are rendered (the output is identical
    /// to encoding [`normalize`](crate::normalize)d input). Fails only on a
    /// cyclic or over-deep tree.
    pub fn encode(&self, value: &Value) -> Result<String> {
        let mut out = String::with_capacity(256);
        let mut guard = PathGuard::new();
        match value {
            Value::Object(obj) if obj.is_empty() => {}
            Value::Object(obj) => self.write_object(&mut out, obj, 0, &mut guard)?,
            Value::Array(arr) => self.write_array(&mut out, arr, 0, &mut guard)?,
            scalar => self.write_scalar(&mut out, scalar),
        }
        Ok(out)
    }

    fn write_object(
        &self,
        out: &mut String,
        obj: &Map,
        col: usize,
        guard: &mut PathGuard,
    ) -> Result<()> {
        guard.enter(PathNode::Mapping(obj))?;
        for (i, (key, value)) in obj.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            push_pad(out, col);
            self.write_key(out, key);
            out.push(':');
            match value {
                Value::Object(inner) if inner.is_empty() => {}
                Value::Object(inner) => {
                    out.push('\n');
                    self.write_object(out, inner, col + self.options.indent, guard)?;
                }
                Value::Array(arr) => {
                    out.push('\n');
                    self.write_array(out, arr, col + self.options.indent, guard)?;
                }
                scalar => {
                    out.push(' ');
                    self.write_scalar(out, scalar);
                }
            }
        }
        guard.leave();
        Ok(())
    }

    fn write_array(
        &self,
        out: &mut String,
        arr: &[Value],
        col: usize,
        guard: &mut PathGuard,
    ) -> Result<()> {
        push_pad(out, col);
        if arr.is_empty() {
            self.write_header(out, 0);
            out.push(':');
            return Ok(());
        }
        guard.enter(PathNode::Sequence(arr.as_ptr()))?;

        if arr.iter().all(Value::is_scalar) {
            self.write_header(out, arr.len());
            out.push_str(": ");
            for (i, element) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(self.options.delimiter.as_char());
                }
                self.write_scalar(out, element);
            }
        } else if let Some(keys) = tabular_keys(arr) {
            self.write_header(out, arr.len());
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(self.options.delimiter.as_char());
                }
                self.write_key(out, key);
            }
            out.push_str("}:");
            let row_col = col + self.options.indent;
            for element in arr {
                out.push('\n');
                push_pad(out, row_col);
                if let Value::Object(obj) = element {
                    for (i, key) in keys.iter().enumerate() {
                        if i > 0 {
                            out.push(self.options.delimiter.as_char());
                        }
                        self.write_scalar(out, obj.get(key).unwrap_or(&Value::Null));
                    }
                }
            }
        } else {
            self.write_header(out, arr.len());
            out.push(':');
            let item_col = col + self.options.indent;
            for element in arr {
                out.push('\n');
                match element {
                    Value::Object(obj) if !obj.is_empty() => {
                        let mut block = String::new();
                        self.write_object(&mut block, obj, item_col + 2, guard)?;
                        self.splice_item(out, item_col, &block);
                    }
                    Value::Object(_) => {
                        push_pad(out, item_col);
                        out.push('-');
                    }
                    Value::Array(inner) => {
                        let mut block = String::new();
                        self.write_array(&mut block, inner, item_col + 2, guard)?;
                        self.splice_item(out, item_col, &block);
                    }
                    scalar => {
                        push_pad(out, item_col);
                        out.push_str("- ");
                        self.write_scalar(out, scalar);
                    }
                }
            }
        }
        guard.leave();
        Ok(())
    }

    /// Emits a block-list item: the first rendered line rides on the hyphen
    /// line, continuation lines keep the alignment the block was rendered at
    /// (two columns past the hyphen).
    fn splice_item(&self, out: &mut String, item_col: usize, block: &str) {
        push_pad(out, item_col);
        out.push_str("- ");
        match block.find('\n') {
            Some(newline) => {
                out.push_str(block[..newline].trim_start());
                out.push_str(&block[newline..]);
            }
            None => out.push_str(block.trim_start()),
        }
    }

    fn write_header(&self, out: &mut String, len: usize) {
        out.push('[');
        if let Some(marker) = self.options.length_marker {
            out.push(marker);
        }
        out.push_str(&len.to_string());
        out.push(']');
    }

    fn write_key(&self, out: &mut String, key: &str) {
        if self.needs_quotes(key) {
            write_quoted(out, key);
        } else {
            out.push_str(key);
        }
    }

    fn write_scalar(&self, out: &mut String, value: &Value) {
        match value {
            Value::Null => out.push_str("null"),
            Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => match normalize_number(*n) {
                Value::Number(canonical) => out.push_str(&canonical.to_string()),
                _ => out.push_str("null"),
            },
            Value::String(s) => {
                if self.needs_quotes(s) {
                    write_quoted(out, s);
                } else {
                    out.push_str(s);
                }
            }
            // Containers are laid out by their callers.
            Value::Array(_) | Value::Object(_) => {}
        }
    }

    /// Decides whether a bare rendering of `s` would be misread by the
    /// decoder: reserved literals, numeric-looking tokens, structural
    /// lookalikes, the active delimiter, or characters that only survive
    /// inside quotes.
    fn needs_quotes(&self, s: &str) -> bool {
        if s.is_empty() || s == "true" || s == "false" || s == "null" {
            return true;
        }
        if looks_like_number(s) {
            return true;
        }
        // Edge and consecutive whitespace would not survive minification.
        if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
            return true;
        }
        if s.contains("  ") {
            return true;
        }
        // Structural lookalikes: list-item markers; brackets and braces are
        // covered below so structural validation never trips on bare text.
        if s == "-" || s.starts_with("- ") {
            return true;
        }
        let delimiter = self.options.delimiter.as_char();
        s.chars().any(|c| {
            c == delimiter
                || matches!(c, ':' | '"' | '\\' | '\n' | '\r' | '\t' | '[' | ']' | '{' | '}')
        })
    }
}

fn push_pad(out: &mut String, col: usize) {
    for _ in 0..col {
        out.push(' ');
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
}

/// Tabular layout detection.
///
/// A sequence qualifies when it is non-empty, every element is a mapping,
/// all mappings share one key set, and every field value is a scalar. The
/// returned header order is the first element's key order.
pub(crate) fn tabular_keys(arr: &[Value]) -> Option<Vec<&str>> {
    let first = arr.first()?.as_object()?;
    if first.is_empty() || !first.values().all(Value::is_scalar) {
        return None;
    }
    let keys: Vec<&str> = first.keys().map(String::as_str).collect();
    for element in &arr[1..] {
        let obj = element.as_object()?;
        if obj.len() != keys.len() {
            return None;
        }
        for &key in &keys {
            if !obj.get(key).is_some_and(Value::is_scalar) {
                return None;
            }
        }
    }
    Some(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toon;

    fn encode_default(value: &Value) -> String {
        Encoder::new(ToonOptions::default()).encode(value).unwrap()
    }

    #[test]
    fn tabular_detection_requires_uniform_keys() {
        let uniform = vec![
            toon!({"id": 1, "name": "a"}),
            toon!({"name": "b", "id": 2}),
        ];
        // Header order follows the first element.
        assert_eq!(tabular_keys(&uniform), Some(vec!["id", "name"]));

        let ragged = vec![toon!({"id": 1}), toon!({"id": 2, "name": "b"})];
        assert_eq!(tabular_keys(&ragged), None);

        let mismatched = vec![toon!({"id": 1, "x": 2}), toon!({"id": 2, "y": 3})];
        assert_eq!(tabular_keys(&mismatched), None);
    }

    #[test]
    fn tabular_detection_rejects_nested_fields() {
        let nested = vec![
            toon!({"id": 1, "meta": {"a": 1}}),
            toon!({"id": 2, "meta": {"a": 2}}),
        ];
        assert_eq!(tabular_keys(&nested), None);
    }

    #[test]
    fn tabular_detection_rejects_non_mappings() {
        assert_eq!(tabular_keys(&[toon!(1), toon!(2)]), None);
        assert_eq!(tabular_keys(&[]), None);
    }

    #[test]
    fn quoting_follows_the_active_delimiter() {
        let comma = Encoder::new(ToonOptions::default());
        assert!(comma.needs_quotes("a,b"));
        assert!(!comma.needs_quotes("a|b"));

        let pipe = Encoder::new(ToonOptions::default().with_delimiter(crate::Delimiter::Pipe));
        assert!(pipe.needs_quotes("a|b"));
        assert!(!pipe.needs_quotes("a,b"));
    }

    #[test]
    fn quoting_covers_reserved_and_numeric_tokens() {
        let enc = Encoder::new(ToonOptions::default());
        for s in ["", "true", "false", "null", "123", "-3.5", "1e6", "[3]", "- x", " pad", "a  b"] {
            assert!(enc.needs_quotes(s), "expected {s:?} to be quoted");
        }
        for s in ["hello", "hello world", "日本語", "👋 hi", "naïve", "v1.2.3"] {
            assert!(!enc.needs_quotes(s), "expected {s:?} to stay bare");
        }
    }

    #[test]
    fn escapes_inside_quotes() {
        let enc = Encoder::new(ToonOptions::default());
        let text = enc
            .encode(&toon!({"s": "a\nb\tc\"d\\e"}))
            .unwrap();
        assert_eq!(text, r#"s: "a\nb\tc\"d\\e""#);
    }

    #[test]
    fn block_list_starting_with_a_mapping_encodes() {
        // The sequence buffer address equals the address of its first
        // element, so the guard must not mistake that element's mapping
        // for a revisit of the sequence.
        let value = toon!([{"k": 1}, 1]);
        assert_eq!(encode_default(&value), "[2]:\n  - k: 1\n  - 1");

        let nested = toon!([[{"a": 1}, {"b": 2}]]);
        assert_eq!(
            encode_default(&nested),
            "[1]:\n  - [2]:\n      - a: 1\n      - b: 2"
        );
    }

    #[test]
    fn deep_nesting_hits_the_depth_bound() {
        let mut value = Value::from(1);
        for _ in 0..(MAX_DEPTH + 1) {
            value = Value::Array(vec![value]);
        }
        let err = Encoder::new(ToonOptions::default()).encode(&value);
        assert!(matches!(err, Err(Error::Depth(_))));
    }

    #[test]
    fn float_just_past_i64_max_is_not_folded() {
        // 2^63: folding would saturate to i64::MAX and change the value.
        let v = Value::Number(crate::Number::Float(9_223_372_036_854_775_808.0));
        assert_eq!(encode_default(&v), "9223372036854776000");
        assert_eq!(crate::decode(&encode_default(&v)).unwrap(), v);
    }

    #[test]
    fn root_scalars_render_bare() {
        assert_eq!(encode_default(&Value::Null), "null");
        assert_eq!(encode_default(&toon!(42)), "42");
        assert_eq!(encode_default(&toon!("123")), "\"123\"");
    }
}
