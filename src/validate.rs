//! Structural validation without full decoding.
//!
//! [`validate`] runs a cheap linear scan that checks bracket and brace
//! pairing outside quoted spans. It never fails: malformed input yields a
//! [`Validation`] whose `errors` describe each problem with its position.

use std::fmt;

/// Outcome of [`validate`]: `valid` is true iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub errors: Vec<ValidationError>,
}

/// One structural problem found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ValidationError {
    /// 1-based line of the offending character.
    pub line: usize,
    /// 1-based column of the offending character.
    pub column: usize,
    pub message: String,
}

/// Checks that every `{`/`[` outside quotes is balanced by a matching
/// closer, reporting mismatches, stray closers, and openers left open at
/// end of input.
///
/// # Examples
///
/// ```rust
/// use toon_codec::validate;
///
/// assert!(validate("name: test\nvalue: 42").valid);
/// assert!(!validate("{name: test").valid);
/// ```
#[must_use]
pub fn validate(input: &str) -> Validation {
    let mut errors = Vec::new();
    // Each opener with its position, so unclosed ones can be reported.
    let mut stack: Vec<(char, usize, usize)> = Vec::new();
    let mut in_quotes = false;

    for (line_idx, line) in input.split('\n').enumerate() {
        let line_no = line_idx + 1;
        // A quote left open never spans lines.
        if in_quotes {
            errors.push(ValidationError {
                line: line_no.saturating_sub(1),
                column: line_col(input, line_idx),
                message: "unterminated quoted string".to_string(),
            });
            in_quotes = false;
        }
        let mut escaped = false;
        for (col_idx, c) in line.chars().enumerate() {
            let column = col_idx + 1;
            if escaped {
                escaped = false;
                continue;
            }
            match c {
                '\\' if in_quotes => escaped = true,
                '"' => in_quotes = !in_quotes,
                '{' | '[' if !in_quotes => stack.push((c, line_no, column)),
                '}' | ']' if !in_quotes => {
                    let expected_opener = if c == '}' { '{' } else { '[' };
                    match stack.pop() {
                        Some((opener, ..)) if opener == expected_opener => {}
                        Some((opener, open_line, open_col)) => {
                            errors.push(ValidationError {
                                line: line_no,
                                column,
                                message: format!(
                                    "'{c}' closes '{opener}' opened at line {open_line}, column {open_col}"
                                ),
                            });
                        }
                        None => {
                            errors.push(ValidationError {
                                line: line_no,
                                column,
                                message: format!("unexpected '{c}' with nothing open"),
                            });
                        }
                    }
                }
                _ => {}
            }
        }
    }

    if in_quotes {
        errors.push(ValidationError {
            line: input.split('\n').count(),
            column: input.split('\n').last().map_or(1, |l| l.chars().count() + 1),
            message: "unterminated quoted string".to_string(),
        });
    }
    for (opener, line, column) in stack {
        errors.push(ValidationError {
            line,
            column,
            message: format!("'{opener}' is never closed"),
        });
    }

    Validation {
        valid: errors.is_empty(),
        errors,
    }
}

fn line_col(input: &str, line_idx: usize) -> usize {
    input
        .split('\n')
        .nth(line_idx.saturating_sub(1))
        .map_or(1, |l| l.chars().count() + 1)
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "valid")
        } else {
            write!(f, "{} error(s)", self.errors.len())?;
            for e in &self.errors {
                write!(f, "\n  {e}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode_with_options, toon, ToonOptions};

    #[test]
    fn well_formed_text_passes() {
        assert!(validate("name: test\nvalue: 42").valid);
        assert!(validate("users:\n  [2]{id,name}:\n    1,a\n    2,b").valid);
        assert!(validate("").valid);
    }

    #[test]
    fn unbalanced_open_fails() {
        let v = validate("{name: test");
        assert!(!v.valid);
        assert_eq!(v.errors.len(), 1);
        assert!(v.errors[0].message.contains("never closed"));
        assert_eq!((v.errors[0].line, v.errors[0].column), (1, 1));
    }

    #[test]
    fn stray_and_mismatched_closers_fail() {
        assert!(!validate("a: 1}").valid);
        let v = validate("x: [1}");
        assert!(!v.valid);
        assert!(v.errors[0].message.contains("closes '['"));
    }

    #[test]
    fn quoted_brackets_are_ignored() {
        assert!(validate("k: \"{[\"").valid);
    }

    #[test]
    fn unterminated_quote_is_reported() {
        assert!(!validate("k: \"oops").valid);
    }

    #[test]
    fn encoder_output_always_validates() {
        let value = toon!({
            "title": "a [b] {c}",
            "rows": [{"id": 1, "txt": "x,y"}, {"id": 2, "txt": "\"q\""}],
            "tags": ["α", "β"],
        });
        let text = encode_with_options(&value, &ToonOptions::default()).unwrap();
        assert!(validate(&text).valid, "{text}");
    }
}
