//! Error types for NestedText parsing, emitting, and serde conversion.
//!
//! Every parser failure carries one of the error kinds below, most of them
//! with the line (1-origin) and sometimes the column (0-origin) of the
//! offending byte. Errors are fatal within a parse: the recursive descent
//! unwinds and returns the first error encountered, never a partial tree.
//!
//! ## Examples
//!
//! ```rust
//! use serde_nestedtext::{parse_str, Error};
//!
//! let err = parse_str("plain text").unwrap_err();
//! assert!(matches!(err, Error::RootString { .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors from parsing, emitting, or serde conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input contains no NestedText content at all.
    #[error("empty input: no NestedText content found")]
    EmptyData,

    /// The first meaningful line of the document is indented.
    #[error("line {line}: the top level of a document must start at column 0")]
    RootLevelHasIndent { line: usize },

    /// The document is a bare single-line string; documents must begin with
    /// a list item, a dictionary entry, or a text line.
    #[error("line {line}: a document cannot be a bare single-line string")]
    RootString { line: usize },

    /// A tab character appears before the first meaningful byte of a line.
    #[error("line {line}, column {col}: tab character in indentation")]
    TabInIndentation { line: usize, col: usize },

    /// Sibling lines at the same indentation level have different types.
    #[error("line {line}: sibling line is not the same type as its level")]
    DifferentTypesOnSameLevel { line: usize },

    /// A line's indentation matches no enclosing level.
    #[error("line {line}: indentation does not match any enclosing level")]
    DifferentLevelOnSameChild { line: usize },

    /// A line nested under a multiline text block.
    #[error("line {line}: multiline text cannot have a nested child")]
    TextHasChild { line: usize },

    /// A line nested under an inline string value.
    #[error("line {line}: a string value cannot have a nested child")]
    StringHasChild { line: usize },

    /// A bare string on its own line below a dictionary key; single-line
    /// strings cannot continue onto further lines.
    #[error("line {line}: a string value cannot span multiple lines")]
    StringWithNewline { line: usize },

    /// Two entries of the same dictionary share a key after sanitization.
    #[error("line {line}: duplicate dictionary key `{key}`")]
    DictionaryDuplicateKey { line: usize, key: String },

    /// Reserved: a dictionary key opens a quote that never closes. The
    /// default key rules treat unpaired quotes as ordinary key bytes, so
    /// this kind is never constructed.
    #[error("line {line}: dictionary key has unpaired quotes")]
    DictionaryKeyUnpairedQuotes { line: usize },

    /// The input bytes are not valid UTF-8.
    #[error("invalid UTF-8 in input: {0}")]
    InvalidUtf8(String),

    /// IO error during reading or writing.
    #[error("IO error: {0}")]
    Io(String),

    /// Type mismatch while mapping a tree into host types.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// A value that NestedText cannot represent was serialized.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// Generic message from serde.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a type mismatch error for the serde mapper.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_nestedtext::Error;
    ///
    /// let err = Error::type_mismatch("integer", "dictionary");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported-value error for the serde mapper.
    pub fn unsupported(msg: &str) -> Self {
        Error::Unsupported(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }

    /// The line number the error points at, if the error has one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::RootLevelHasIndent { line }
            | Error::RootString { line }
            | Error::TabInIndentation { line, .. }
            | Error::DifferentTypesOnSameLevel { line }
            | Error::DifferentLevelOnSameChild { line }
            | Error::TextHasChild { line }
            | Error::StringHasChild { line }
            | Error::StringWithNewline { line }
            | Error::DictionaryDuplicateKey { line, .. }
            | Error::DictionaryKeyUnpairedQuotes { line } => Some(*line),
            _ => None,
        }
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
