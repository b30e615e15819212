//! # serde_nestedtext
//!
//! A [serde](https://serde.rs)-compatible implementation of
//! [NestedText](https://nestedtext.org), the human-friendly plain-text
//! format whose only leaf type is the string.
//!
//! NestedText expresses structure purely through indentation and four line
//! markers:
//!
//! ```text
//! name: Alice          # dictionary entry with an inline string value
//! bio:
//!   > first line       # multiline text block
//!   > second line
//! tags:
//!   - admin            # list items
//!   - ops
//! ```
//!
//! Because every leaf is a string, no quoting or escaping is ever needed;
//! type interpretation is deferred to the consuming program. This crate
//! performs that interpretation at the serde boundary: `from_str` parses
//! leaves into whatever your types ask for, and `to_string` renders scalars
//! back into strings.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_nestedtext::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     aliases: Vec<String>,
//! }
//!
//! let text = "host: example.com\nport: 8080\naliases:\n  - www\n  - web\n";
//! let server: Server = from_str(text)?;
//! assert_eq!(server.port, 8080);
//!
//! // Parse/emit round trips are byte-stable.
//! assert_eq!(to_string(&server)?, text);
//! # Ok::<(), serde_nestedtext::Error>(())
//! ```
//!
//! ## Working with Trees
//!
//! The dynamic [`Value`] type represents any document; use [`parse_str`]
//! and [`to_text`] to move between text and trees without serde, or the
//! [`nt!`] macro to build trees inline.
//!
//! ```rust
//! use serde_nestedtext::{nt, parse_str};
//!
//! let parsed = parse_str("key: value")?;
//! assert_eq!(parsed, nt!({"key": "value"}));
//! # Ok::<(), serde_nestedtext::Error>(())
//! ```

pub mod de;
pub mod emit;
pub mod error;
mod macros;
pub mod map;
pub mod options;
pub mod parse;
mod scan;
pub mod ser;
pub mod value;

pub use de::from_value;
pub use emit::{to_text, to_text_with_options};
pub use error::{Error, Result};
pub use map::NtMap;
pub use options::NtOptions;
pub use parse::{parse_slice, parse_str};
pub use ser::ValueSerializer;
pub use value::{Kind, Value};

use serde::{de::DeserializeOwned, Serialize};

/// Converts any serializable value into a [`Value`] tree.
///
/// Scalars come out as their string rendering; strings containing line
/// terminators become text blocks.
///
/// # Examples
///
/// ```rust
/// use serde_nestedtext::{to_value, Value};
///
/// assert_eq!(to_value(&42)?, Value::string("42"));
/// assert_eq!(to_value(&vec!["a"])?, Value::list(vec![Value::string("a")]));
/// # Ok::<(), serde_nestedtext::Error>(())
/// ```
pub fn to_value<T: Serialize>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// Serializes a value to a NestedText string with default options.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_nestedtext::to_string;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let text = to_string(&Point { x: 1, y: 2 })?;
/// assert_eq!(text, "x: 1\ny: 2\n");
/// # Ok::<(), serde_nestedtext::Error>(())
/// ```
pub fn to_string<T: Serialize>(value: &T) -> Result<String> {
    to_string_with_options(value, NtOptions::default())
}

/// Serializes a value to a NestedText string with the given options.
///
/// A bare string at the root is rendered as a text block, since a document
/// cannot be a bare single-line string.
pub fn to_string_with_options<T: Serialize>(value: &T, options: NtOptions) -> Result<String> {
    let mut tree = to_value(value)?;
    if let Kind::String(s) = tree.kind {
        tree = Value::text(&s);
    }
    tree.normalize(0, options.indent);
    Ok(to_text(&tree))
}

/// Serializes a value as NestedText into an IO writer.
pub fn to_writer<W: std::io::Write, T: Serialize>(writer: W, value: &T) -> Result<()> {
    to_writer_with_options(writer, value, NtOptions::default())
}

/// Serializes a value as NestedText into an IO writer with the given options.
pub fn to_writer_with_options<W: std::io::Write, T: Serialize>(
    mut writer: W,
    value: &T,
    options: NtOptions,
) -> Result<()> {
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))
}

/// Deserializes a value from a NestedText string.
///
/// # Examples
///
/// ```rust
/// use serde_nestedtext::from_str;
///
/// let hosts: Vec<String> = from_str("- alpha\n- beta")?;
/// assert_eq!(hosts, vec!["alpha", "beta"]);
/// # Ok::<(), serde_nestedtext::Error>(())
/// ```
pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T> {
    from_value(parse_str(input)?)
}

/// Deserializes a value from NestedText bytes, validating UTF-8 first.
pub fn from_slice<T: DeserializeOwned>(input: &[u8]) -> Result<T> {
    from_value(parse_slice(input)?)
}

/// Deserializes a value from an IO reader holding NestedText.
pub fn from_reader<R: std::io::Read, T: DeserializeOwned>(mut reader: R) -> Result<T> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct Config {
        name: String,
        port: u16,
        features: Vec<String>,
    }

    #[test]
    fn struct_round_trip() {
        let config = Config {
            name: "gateway".to_string(),
            port: 443,
            features: vec!["tls".to_string(), "http2".to_string()],
        };
        let text = to_string(&config).unwrap();
        assert_eq!(
            text,
            "name: gateway\nport: 443\nfeatures:\n  - tls\n  - http2\n",
        );
        let back: Config = from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn root_string_is_promoted_to_text() {
        let text = to_string(&"just a string").unwrap();
        assert_eq!(text, "> just a string\n");
        let back: String = from_str(&text).unwrap();
        assert_eq!(back, "just a string");
    }

    #[test]
    fn multiline_string_round_trip() {
        let original = "first\nsecond\nthird".to_string();
        let text = to_string(&original).unwrap();
        assert_eq!(text, "> first\n> second\n> third\n");
        let back: String = from_str(&text).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn writer_and_reader() {
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &vec!["a", "b"]).unwrap();
        assert_eq!(buffer, b"- a\n- b\n");

        let back: Vec<String> = from_reader(buffer.as_slice()).unwrap();
        assert_eq!(back, vec!["a", "b"]);
    }

    #[test]
    fn parse_emit_is_byte_stable() {
        let text = "a: 1\nb:\n  - x\n  - y\nc:\n  > line one\n  > line two\n";
        let tree = parse_str(text).unwrap();
        assert_eq!(to_text(&tree), text);
    }
}
