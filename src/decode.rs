//! TOON decoding.
//!
//! [`Decoder`] parses TOON text back into a [`Value`] tree. Parsing is
//! line-oriented: the input is split into non-blank lines with their leading
//! column recorded, and nesting is judged by relative column depth, so any
//! indentation width decodes. Round-tripping requires the decoder to run
//! with the options used to encode — the delimiter and length marker are
//! configuration, not in-band signals.
//!
//! # Recovery policy
//!
//! Localized malformations are skipped rather than failing the whole decode:
//! blank lines anywhere, and lines inside a mapping block that carry no
//! unquoted `:`. Structural damage is fatal: unterminated quoted strings,
//! unparseable sequence headers, and sequence bodies that cannot supply
//! their declared length.
//!
//! # Examples
//!
//! ```rust
//! use toon_codec::{decode, toon};
//!
//! let value = decode("id: 7\ntags:\n  [2]: a,b").unwrap();
//! assert_eq!(value, toon!({"id": 7, "tags": ["a", "b"]}));
//! ```

use crate::encode::MAX_DEPTH;
use crate::normalize::normalize_number;
use crate::{Error, Map, Number, Result, ToonOptions, Value};

/// A TOON decoder bound to one configuration.
pub struct Decoder {
    options: ToonOptions,
}

#[derive(Clone, Copy)]
struct Line<'a> {
    /// 1-based source line number, for error positions.
    number: usize,
    /// Leading-space count; nesting depth is judged relative to this.
    col: usize,
    /// Line content without indentation or trailing whitespace.
    text: &'a str,
}

impl Decoder {
    /// Creates a decoder with the given configuration.
    #[must_use]
    pub fn new(options: ToonOptions) -> Self {
        Decoder { options }
    }

    /// Decodes TOON text into a value tree.
    ///
    /// Empty (or all-blank) input decodes to [`Value::Null`].
    pub fn decode(&self, input: &str) -> Result<Value> {
        let lines: Vec<Line> = input
            .split('\n')
            .enumerate()
            .filter_map(|(i, raw)| {
                let content = raw.trim_end();
                let text = content.trim_start_matches(' ');
                if text.is_empty() {
                    None
                } else {
                    Some(Line {
                        number: i + 1,
                        col: content.len() - text.len(),
                        text,
                    })
                }
            })
            .collect();

        if lines.is_empty() {
            return Ok(Value::Null);
        }

        let mut parser = Parser {
            lines,
            pos: 0,
            options: &self.options,
        };
        parser.parse_value(0)
    }
}

struct Parser<'a, 'o> {
    lines: Vec<Line<'a>>,
    pos: usize,
    options: &'o ToonOptions,
}

impl<'a, 'o> Parser<'a, 'o> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Line<'a>> {
        let line = self.peek();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    fn last_line_number(&self) -> usize {
        self.lines.last().map_or(0, |l| l.number)
    }

    /// Dispatches on the current line: sequence header, mapping line, or a
    /// single scalar token.
    fn parse_value(&mut self, depth: usize) -> Result<Value> {
        if depth >= MAX_DEPTH {
            return Err(Error::Depth(MAX_DEPTH));
        }
        let line = match self.peek() {
            Some(line) => line,
            None => return Ok(Value::Null),
        };
        if self.parse_header(line.text).is_some() {
            self.parse_sequence(depth)
        } else if find_unquoted(line.text, ':').is_some() {
            self.parse_object(line.col, depth)
        } else {
            self.advance();
            self.parse_scalar_token(line.text, line.number)
        }
    }

    /// Parses a mapping block whose lines sit at `base_col`. Ends at the
    /// first shallower line. Lines at `base_col` with no unquoted `:` and
    /// stray deeper lines are skipped.
    fn parse_object(&mut self, base_col: usize, depth: usize) -> Result<Value> {
        if depth >= MAX_DEPTH {
            return Err(Error::Depth(MAX_DEPTH));
        }
        let mut map = Map::new();
        while let Some(line) = self.peek() {
            if line.col < base_col {
                break;
            }
            if line.col > base_col {
                self.advance();
                continue;
            }
            let colon = match find_unquoted(line.text, ':') {
                Some(i) => i,
                None => {
                    self.advance();
                    continue;
                }
            };
            let key = self.parse_key(line.text[..colon].trim_end(), line.number)?;
            let rest = line.text[colon + 1..].trim_start_matches(' ');
            self.advance();

            let value = if rest.is_empty() {
                match self.peek() {
                    Some(child) if child.col > base_col => self.parse_value(depth + 1)?,
                    _ => Value::Object(Map::new()),
                }
            } else {
                self.parse_scalar_token(rest, line.number)?
            };
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }

    /// Parses a sequence from its header line onward.
    fn parse_sequence(&mut self, depth: usize) -> Result<Value> {
        if depth >= MAX_DEPTH {
            return Err(Error::Depth(MAX_DEPTH));
        }
        let header_line = match self.advance() {
            Some(line) => line,
            None => return Err(Error::eof(self.last_line_number(), "sequence header")),
        };
        let (len, keys, rest) = match self.parse_header(header_line.text) {
            Some(parts) => parts,
            None => {
                return Err(Error::syntax(header_line.number, "malformed sequence header"))
            }
        };

        if let Some(keys) = keys {
            self.parse_tabular_rows(len, &keys, header_line, depth)
        } else if !rest.is_empty() {
            self.parse_inline_elements(len, rest, header_line.number)
        } else if len == 0 {
            Ok(Value::Array(Vec::new()))
        } else {
            self.parse_block_items(len, header_line, depth)
        }
    }

    fn parse_tabular_rows(
        &mut self,
        len: usize,
        keys: &[String],
        header: Line<'a>,
        depth: usize,
    ) -> Result<Value> {
        if depth + 1 >= MAX_DEPTH {
            return Err(Error::Depth(MAX_DEPTH));
        }
        let mut elements = Vec::with_capacity(len);
        for _ in 0..len {
            let row = match self.peek() {
                Some(line) if line.col > header.col => line,
                _ => {
                    return Err(Error::syntax(
                        header.number,
                        format!("tabular body ended before {len} declared rows"),
                    ))
                }
            };
            self.advance();
            let fields = split_delimited(row.text, self.options.delimiter.as_char());
            if fields.len() != keys.len() {
                return Err(Error::syntax(
                    row.number,
                    format!(
                        "tabular row has {} values but the header declares {} columns",
                        fields.len(),
                        keys.len()
                    ),
                ));
            }
            let mut obj = Map::with_capacity(keys.len());
            for (key, field) in keys.iter().zip(fields) {
                obj.insert(key.clone(), self.parse_scalar_token(field.trim(), row.number)?);
            }
            elements.push(Value::Object(obj));
        }
        Ok(Value::Array(elements))
    }

    fn parse_inline_elements(&mut self, len: usize, rest: &str, number: usize) -> Result<Value> {
        let fields = split_delimited(rest, self.options.delimiter.as_char());
        if fields.len() != len {
            return Err(Error::syntax(
                number,
                format!(
                    "inline sequence declares {len} elements but carries {}",
                    fields.len()
                ),
            ));
        }
        fields
            .into_iter()
            .map(|field| self.parse_scalar_token(field.trim(), number))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    fn parse_block_items(&mut self, len: usize, header: Line<'a>, depth: usize) -> Result<Value> {
        let mut elements = Vec::with_capacity(len);
        for _ in 0..len {
            let item = match self.peek() {
                Some(line) if line.col > header.col => line,
                _ => {
                    return Err(Error::syntax(
                        header.number,
                        format!("list body ended before {len} declared items"),
                    ))
                }
            };
            if item.text == "-" {
                self.advance();
                elements.push(Value::Object(Map::new()));
                continue;
            }
            let content = match item.text.strip_prefix("- ") {
                Some(content) => content,
                None => return Err(Error::syntax(item.number, "expected '- ' list item")),
            };
            // The item's content starts two columns past the hyphen; rewrite
            // the line in place and let the ordinary dispatch consume it
            // along with any continuation lines at that column.
            self.lines[self.pos] = Line {
                number: item.number,
                col: item.col + 2,
                text: content,
            };
            elements.push(self.parse_value(depth + 1)?);
        }
        Ok(Value::Array(elements))
    }

    /// Parses `[n]:`, `[#n]:`, `[n]{k1,k2}:` headers, returning the declared
    /// length, the tabular keys if present, and any inline remainder.
    fn parse_header(&self, text: &'a str) -> Option<(usize, Option<Vec<String>>, &'a str)> {
        let rest = text.strip_prefix('[')?;
        let rest = match self.options.length_marker {
            Some(marker) => rest.strip_prefix(marker).unwrap_or(rest),
            None => rest,
        };
        let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 {
            return None;
        }
        let len: usize = rest[..digits].parse().ok()?;
        let rest = rest[digits..].strip_prefix(']')?;

        if let Some(keys_part) = rest.strip_prefix('{') {
            let close = find_unquoted(keys_part, '}')?;
            let after = keys_part[close + 1..].strip_prefix(':')?;
            if !after.trim().is_empty() {
                return None;
            }
            let keys = split_delimited(&keys_part[..close], self.options.delimiter.as_char())
                .into_iter()
                .map(|k| self.parse_key(k.trim(), 0))
                .collect::<Result<Vec<_>>>()
                .ok()?;
            Some((len, Some(keys), ""))
        } else {
            let rest = rest.strip_prefix(':')?;
            Some((len, None, rest.trim_start_matches(' ')))
        }
    }

    fn parse_key(&self, token: &str, number: usize) -> Result<String> {
        if token.starts_with('"') {
            unescape_quoted(token, number)
        } else {
            Ok(token.to_string())
        }
    }

    /// Classifies a single scalar token: reserved literals, numbers, quoted
    /// strings, or a bare string verbatim.
    fn parse_scalar_token(&self, token: &str, number: usize) -> Result<Value> {
        if token.starts_with('"') {
            return unescape_quoted(token, number).map(Value::String);
        }
        match token {
            "" | "null" => Ok(Value::Null),
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ if looks_like_number(token) => {
                if let Ok(i) = token.parse::<i64>() {
                    Ok(Value::Number(Number::Integer(i)))
                } else if let Ok(f) = token.parse::<f64>() {
                    Ok(normalize_number(Number::Float(f)))
                } else {
                    Ok(Value::String(token.to_string()))
                }
            }
            _ => Ok(Value::String(token.to_string())),
        }
    }
}

/// Returns the byte index of the first `target` outside double quotes.
pub(crate) fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == target && !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

/// Splits on `delimiter`, ignoring delimiters inside double quotes.
pub(crate) fn split_delimited(s: &str, delimiter: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    fields.push(&s[start..]);
    fields
}

/// Strict numeric-literal grammar: optional `-`, digits, optional fraction,
/// optional exponent. Shared with the encoder so every token the decoder
/// would read as a number gets quoted on the way out.
pub(crate) fn looks_like_number(s: &str) -> bool {
    let b = s.as_bytes();
    let mut i = 0;
    if i < b.len() && b[i] == b'-' {
        i += 1;
    }
    if i >= b.len() || !b[i].is_ascii_digit() {
        return false;
    }
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    if i < b.len() && b[i] == b'.' {
        i += 1;
        if i >= b.len() || !b[i].is_ascii_digit() {
            return false;
        }
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < b.len() && matches!(b[i], b'e' | b'E') {
        i += 1;
        if i < b.len() && matches!(b[i], b'+' | b'-') {
            i += 1;
        }
        if i >= b.len() || !b[i].is_ascii_digit() {
            return false;
        }
        while i < b.len() && b[i].is_ascii_digit() {
            i += 1;
        }
    }
    i == b.len()
}

/// Reverses the encoder's escaping for a fully quoted token.
///
/// Unknown escapes are kept literally (lenient), matching the permissive
/// side of the recovery policy; a missing closing quote or trailing
/// characters after it are fatal.
fn unescape_quoted(token: &str, number: usize) -> Result<String> {
    let inner = match token.strip_prefix('"') {
        Some(inner) => inner,
        None => return Err(Error::syntax(number, "expected quoted string")),
    };
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                let trailing: String = chars.collect();
                if trailing.trim().is_empty() {
                    return Ok(result);
                }
                return Err(Error::syntax(
                    number,
                    "unexpected characters after closing quote",
                ));
            }
            '\\' => match chars.next() {
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => return Err(Error::syntax(number, "unterminated escape sequence")),
            },
            other => result.push(other),
        }
    }
    Err(Error::syntax(number, "unterminated quoted string"))
}
