//! Error types for the TOON codec.
//!
//! Encoding fails only on pathological trees (a container revisited on the
//! current traversal path, or nesting past the depth bound). Decoding fails
//! only on structurally irrecoverable text; localized malformations are
//! skipped instead (see [`crate::decode`] for the recovery policy).

use std::fmt;
use thiserror::Error;

/// All errors the codec can produce.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Encode traversal revisited a container already on the current path.
    #[error("cycle detected: value contains itself")]
    Cycle,

    /// Nesting exceeded the recursion bound during encode or decode.
    #[error("structure nested deeper than {0} levels")]
    Depth(usize),

    /// Structurally irrecoverable text at decode time.
    #[error("syntax error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },

    /// Input ended where more content was required.
    #[error("unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: String },

    /// Generic message, used by the serde bridges.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a syntax error carrying the 1-based source line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::Error;
    ///
    /// let err = Error::syntax(3, "expected ':' after key");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            msg: msg.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn eof(line: usize, expected: impl Into<String>) -> Self {
        Error::UnexpectedEof {
            line,
            expected: expected.into(),
        }
    }

    pub(crate) fn unsupported_type(what: &str) -> Self {
        Error::Message(format!("unsupported type: {what}"))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
