//! # toon-codec
//!
//! An encoder and decoder for TOON (Token-Oriented Object Notation), a
//! compact, human-readable text format for tree-shaped data designed to
//! spend fewer tokens than JSON when fed to Large Language Models.
//!
//! ## The format at a glance
//!
//! Mappings are `key: value` lines, nesting is indentation, and sequences
//! declare their length up front. Sequences of uniform flat objects
//! collapse into a table with one header line:
//!
//! ```text
//! users:
//!   [2]{id,name}:
//!     1,Alice
//!     2,Bob
//! ```
//!
//! ## Quick start
//!
//! Encode and decode dynamic [`Value`] trees, built by hand or with the
//! [`toon!`] macro:
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let value = toon!({
//!     "name": "Alice",
//!     "tags": ["rust", "llm"],
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "name: Alice\ntags:\n  [2]: rust,llm");
//! assert_eq!(decode(&text).unwrap(), value);
//! ```
//!
//! Or go through serde for typed data:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon_codec::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string() };
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, "id: 123\nname: Alice");
//! assert_eq!(from_str::<User>(&text).unwrap(), user);
//! ```
//!
//! ## Configuration
//!
//! [`ToonOptions`] controls the delimiter (comma, tab, or pipe), the indent
//! width, and an optional length marker in sequence headers. The
//! configuration is not recorded in the text, so decoding must use the
//! options the text was encoded with:
//!
//! ```rust
//! use toon_codec::{encode_with_options, toon, Delimiter, ToonOptions};
//!
//! let options = ToonOptions::new()
//!     .with_delimiter(Delimiter::Pipe)
//!     .with_length_marker('#');
//! let text = encode_with_options(&toon!([1, 2, 3]), &options).unwrap();
//! assert_eq!(text, "[#3]: 1|2|3");
//! ```
//!
//! ## Canonical values
//!
//! Encoding normalizes scalars so every tree has exactly one rendering:
//! non-finite floats become `null`, negative zero becomes `0`, and floats
//! without a fractional part become integers. [`normalize`] applies the
//! same folding to a tree without encoding it.
//!
//! ## Beyond the codec
//!
//! - [`validate`] checks bracket pairing without decoding.
//! - [`optimize`] and [`minify`] strip whitespace while keeping the text
//!   decodable.
//! - [`estimate_tokens`] and [`compare_with_json`] measure what the format
//!   saves.

pub mod de;
pub mod decode;
pub mod encode;
pub mod error;
pub mod macros;
pub mod map;
pub mod metrics;
pub mod normalize;
pub mod options;
pub mod optimize;
pub mod ser;
pub mod validate;
pub mod value;

pub use de::{from_value, ValueDeserializer};
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{Error, Result};
pub use map::Map;
pub use metrics::{compare_with_json, estimate_tokens, SizeComparison};
pub use normalize::normalize;
pub use options::{Delimiter, ToonOptions};
pub use optimize::{minify, optimize};
pub use ser::{to_value, ValueSerializer};
pub use validate::{validate, Validation, ValidationError};
pub use value::{Number, Value};

use serde::{de::DeserializeOwned, Serialize};

/// Encodes a value tree to TOON text with default options.
///
/// # Errors
///
/// Fails only on pathological trees: a container that contains itself, or
/// nesting past the depth bound.
pub fn encode(value: &Value) -> Result<String> {
    encode_with_options(value, &ToonOptions::default())
}

/// Encodes a value tree to TOON text with the given options.
pub fn encode_with_options(value: &Value, options: &ToonOptions) -> Result<String> {
    Encoder::new(options.clone()).encode(value)
}

/// Decodes TOON text into a value tree with default options.
///
/// # Errors
///
/// Fails on structurally irrecoverable text; see [`crate::decode`] for the
/// recovery policy.
pub fn decode(input: &str) -> Result<Value> {
    decode_with_options(input, &ToonOptions::default())
}

/// Decodes TOON text into a value tree with the given options, which must
/// match the options the text was encoded with.
pub fn decode_with_options(input: &str, options: &ToonOptions) -> Result<Value> {
    Decoder::new(options.clone()).decode(input)
}

/// Serializes any `T: Serialize` to TOON text with default options.
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    encode(&to_value(value)?)
}

/// Serializes any `T: Serialize` to TOON text with the given options.
pub fn to_string_with_options<T>(value: &T, options: &ToonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    encode_with_options(&to_value(value)?, options)
}

/// Deserializes a `T` from TOON text with default options.
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    from_value(decode(input)?)
}

/// Deserializes a `T` from TOON text with the given options.
pub fn from_str_with_options<T: DeserializeOwned>(
    input: &str,
    options: &ToonOptions,
) -> Result<T> {
    from_value(decode_with_options(input, options)?)
}
