//! Dynamic tree representation for NestedText data.
//!
//! This module provides the [`Value`] type which represents any NestedText
//! document or fragment. NestedText's only leaf type is the string, so the
//! tree has exactly four completed kinds: single-line strings, multiline
//! text, lists, and dictionaries.
//!
//! ## Core Types
//!
//! - [`Value`]: a tree node carrying its [`Kind`] plus the presentation
//!   attributes used by the emitter (`indent`, `depth`)
//! - [`Kind`]: the tagged variant (string, text, list, dictionary)
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_nestedtext::{nt, Value};
//!
//! let name = Value::string("Alice");
//! let bio = Value::text("first line\nsecond line");
//!
//! let tree = nt!({
//!     "name": "Alice",
//!     "tags": ["rust", "serde"]
//! });
//! assert!(tree.is_dictionary());
//! ```
//!
//! ### Inspecting Values
//!
//! ```rust
//! use serde_nestedtext::parse_str;
//!
//! let tree = parse_str("key: value").unwrap();
//! assert!(tree.is_dictionary());
//! assert_eq!(
//!     tree.get("key").and_then(|v| v.as_str()),
//!     Some("value"),
//! );
//! ```

use crate::NtMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A node in a NestedText tree.
///
/// Besides its [`Kind`], every value carries two presentation attributes that
/// only the emitter consults:
///
/// - `indent`: columns per nesting level; `0` means the default of 2
/// - `depth`: nesting depth, `0` at the document root
///
/// The parser fills `depth` in during recursive descent. Hand-built subtrees
/// can either set the attributes directly or call [`Value::normalize`] before
/// emitting. Equality is structural and ignores both attributes.
#[derive(Debug, Clone, Default)]
pub struct Value {
    pub kind: Kind,
    /// Columns per nesting level used by the emitter; 0 selects the default (2).
    pub indent: usize,
    /// Nesting depth, 0 at the document root.
    pub depth: usize,
}

/// The tagged variant of a NestedText value.
///
/// `Unknown` is transient: the parser starts from it before a concrete kind
/// is determined and it never appears in a completed tree. A completed root
/// is also never `String`, since a bare string is not a valid NestedText
/// document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Kind {
    #[default]
    Unknown,
    /// A single line of text, no internal line breaks.
    String(String),
    /// A multiline string. Every element except the last ends with its line
    /// terminator; the last holds the trailing fragment without one.
    /// Concatenating all elements reproduces the original payload.
    Text(Vec<String>),
    /// An ordered sequence of child values.
    List(Vec<Value>),
    /// An insertion-ordered mapping from key to child value.
    Dictionary(NtMap),
}

impl PartialEq for Value {
    /// Structural equality: payloads, order, and children compare; the
    /// presentation attributes `indent` and `depth` do not.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// The default number of columns per nesting level when `indent` is 0.
pub(crate) const DEFAULT_INDENT: usize = 2;

/// Splits a payload into text-block elements.
///
/// Each element except the last keeps its terminator (`\n`, `\r`, or `\r\n`);
/// the last element is the trailing fragment, possibly empty.
pub(crate) fn split_text_lines(payload: &str) -> Vec<String> {
    let bytes = payload.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(payload[start..=i].to_string());
                start = i + 1;
                i += 1;
            }
            b'\r' => {
                let end = if bytes.get(i + 1) == Some(&b'\n') { i + 1 } else { i };
                lines.push(payload[start..=end].to_string());
                start = end + 1;
                i = end + 1;
            }
            _ => i += 1,
        }
    }
    lines.push(payload[start..].to_string());
    lines
}

impl Value {
    /// Creates a single-line string value.
    ///
    /// The payload must not contain line terminators; use [`Value::text`]
    /// for multiline content.
    pub fn string(s: impl Into<String>) -> Self {
        Value::from_kind(Kind::String(s.into()))
    }

    /// Creates a multiline text value from a payload, splitting it into
    /// elements at line terminators (terminators preserved per element).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_nestedtext::{Kind, Value};
    ///
    /// let text = Value::text("first\nsecond");
    /// assert_eq!(
    ///     text.kind,
    ///     Kind::Text(vec!["first\n".to_string(), "second".to_string()]),
    /// );
    /// ```
    pub fn text(payload: &str) -> Self {
        Value::from_kind(Kind::Text(split_text_lines(payload)))
    }

    /// Creates a list value from child values.
    pub fn list(items: Vec<Value>) -> Self {
        Value::from_kind(Kind::List(items))
    }

    /// Creates a dictionary value from an ordered map.
    pub fn dictionary(entries: NtMap) -> Self {
        Value::from_kind(Kind::Dictionary(entries))
    }

    pub(crate) fn from_kind(kind: Kind) -> Self {
        Value {
            kind,
            indent: 0,
            depth: 0,
        }
    }

    /// Returns `true` if the value is a single-line string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self.kind, Kind::String(_))
    }

    /// Returns `true` if the value is a multiline text block.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.kind, Kind::Text(_))
    }

    /// Returns `true` if the value is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.kind, Kind::List(_))
    }

    /// Returns `true` if the value is a dictionary.
    #[inline]
    #[must_use]
    pub const fn is_dictionary(&self) -> bool {
        matches!(self.kind, Kind::Dictionary(_))
    }

    /// If the value is a string, returns its payload. Otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            Kind::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a text block, returns its line elements.
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&[String]> {
        match &self.kind {
            Kind::Text(lines) => Some(lines),
            _ => None,
        }
    }

    /// If the value is a list, returns its items. Otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match &self.kind {
            Kind::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a dictionary, returns its entries. Otherwise `None`.
    #[inline]
    #[must_use]
    pub fn as_dictionary(&self) -> Option<&NtMap> {
        match &self.kind {
            Kind::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    /// Keyed lookup on a dictionary value; `None` for other kinds.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dictionary().and_then(|map| map.get(key))
    }

    /// If the value is a text block, returns the concatenation of its
    /// elements, which is the original multiline payload.
    #[must_use]
    pub fn text_payload(&self) -> Option<String> {
        self.as_text().map(|lines| lines.concat())
    }

    /// Recomputes the presentation attributes over the whole subtree:
    /// this value gets `depth` and `indent`, each child one level deeper.
    ///
    /// Useful before emitting a hand-built tree, where the attributes
    /// default to zero.
    pub fn normalize(&mut self, depth: usize, indent: usize) {
        self.depth = depth;
        self.indent = indent;
        match &mut self.kind {
            Kind::List(items) => {
                for item in items {
                    item.normalize(depth + 1, indent);
                }
            }
            Kind::Dictionary(entries) => {
                for child in entries.values_mut() {
                    child.normalize(depth + 1, indent);
                }
            }
            _ => {}
        }
    }

    pub(crate) fn effective_indent(&self) -> usize {
        if self.indent == 0 {
            DEFAULT_INDENT
        } else {
            self.indent
        }
    }
}

impl fmt::Display for Value {
    /// Renders the emitted NestedText form of this value, as a document
    /// root. Presentation attributes are recomputed first, so hand-built
    /// trees display correctly without an explicit [`Value::normalize`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tree = self.clone();
        tree.normalize(0, self.indent);
        f.write_str(&crate::emit::to_text(&tree))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::list(value)
    }
}

impl From<NtMap> for Value {
    fn from(value: NtMap) -> Self {
        Value::dictionary(value)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.kind {
            Kind::Unknown => serializer.serialize_unit(),
            Kind::String(s) => serializer.serialize_str(s),
            Kind::Text(lines) => serializer.serialize_str(&lines.concat()),
            Kind::List(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Kind::Dictionary(entries) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any NestedText value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::string(if value { "true" } else { "false" }))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::string(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                Ok(Value::string(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::string(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                if value.contains('\n') || value.contains('\r') {
                    Ok(Value::text(value))
                } else {
                    Ok(Value::string(value))
                }
            }

            fn visit_string<E: serde::de::Error>(self, value: String) -> std::result::Result<Value, E> {
                self.visit_str(&value)
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::string(""))
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::string(""))
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::list(items))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut entries = NtMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    entries.insert(key, value);
                }
                Ok(Value::dictionary(entries))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_preserves_terminators() {
        assert_eq!(split_text_lines("a\nb"), vec!["a\n", "b"]);
        assert_eq!(split_text_lines("a\r\nb\rc"), vec!["a\r\n", "b\r", "c"]);
        assert_eq!(split_text_lines("a\n"), vec!["a\n", ""]);
        assert_eq!(split_text_lines(""), vec![""]);
    }

    #[test]
    fn split_concat_roundtrip() {
        for payload in ["a\nb", "a\r\nb\rc\n", "", "\n\n", "one"] {
            assert_eq!(split_text_lines(payload).concat(), payload);
        }
    }

    #[test]
    fn equality_ignores_presentation_attributes() {
        let mut a = Value::string("x");
        let b = Value::string("x");
        a.depth = 3;
        a.indent = 4;
        assert_eq!(a, b);
    }

    #[test]
    fn normalize_sets_depths_recursively() {
        let mut map = NtMap::new();
        map.insert("k".to_string(), Value::list(vec![Value::string("a")]));
        let mut tree = Value::dictionary(map);
        tree.normalize(0, 2);

        let list = tree.get("k").unwrap();
        assert_eq!(list.depth, 1);
        assert_eq!(list.as_list().unwrap()[0].depth, 2);
    }

    #[test]
    fn accessors() {
        let v = Value::string("hello");
        assert!(v.is_string());
        assert_eq!(v.as_str(), Some("hello"));
        assert!(v.as_list().is_none());

        let t = Value::text("a\nb");
        assert!(t.is_text());
        assert_eq!(t.text_payload().as_deref(), Some("a\nb"));
    }
}
