//! Codec configuration.
//!
//! [`ToonOptions`] is an immutable configuration value: bind it once to an
//! [`Encoder`](crate::Encoder) or [`Decoder`](crate::Decoder) (or pass it to
//! the free functions, which construct an instance per call). Decoding only
//! round-trips when run with the options used to encode — the delimiter and
//! length marker are not signalled in the text itself.

/// Delimiter separating values in scalar lists and tabular rows.
///
/// # Examples
///
/// ```rust
/// use toon_codec::Delimiter;
///
/// assert_eq!(Delimiter::Comma.as_char(), ',');
/// assert_eq!(Delimiter::Tab.as_char(), '\t');
/// assert_eq!(Delimiter::Pipe.as_char(), '|');
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    /// Returns the delimiter character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    /// Returns the delimiter as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Configuration for encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use toon_codec::{Delimiter, ToonOptions};
///
/// let options = ToonOptions::new()
///     .with_delimiter(Delimiter::Pipe)
///     .with_length_marker('#')
///     .with_indent(4);
/// assert_eq!(options.indent, 4);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ToonOptions {
    /// Spaces per nesting level in encoder output.
    pub indent: usize,
    /// Delimiter for scalar lists and tabular rows.
    pub delimiter: Delimiter,
    /// Optional character prefixed to sequence lengths, e.g. `[#3]:`.
    pub length_marker: Option<char>,
}

impl Default for ToonOptions {
    fn default() -> Self {
        ToonOptions {
            indent: 2,
            delimiter: Delimiter::default(),
            length_marker: None,
        }
    }
}

impl ToonOptions {
    /// Creates the default configuration: comma delimiter, no length marker,
    /// 2-space indentation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width (spaces per nesting level).
    ///
    /// Widths below 1 are treated as 1: zero-width indentation cannot
    /// express nesting, so the text would not decode to the same tree.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.max(1);
        self
    }

    /// Sets the delimiter for scalar lists and tabular rows.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets the length-marker character, e.g. `'#'` for `[#3]:` headers.
    #[must_use]
    pub fn with_length_marker(mut self, marker: char) -> Self {
        self.length_marker = Some(marker);
        self
    }
}
