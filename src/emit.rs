//! NestedText emission.
//!
//! A pure walk over a [`Value`] tree that renders NestedText text. Each
//! value is prefixed with `indent * depth` spaces from its own presentation
//! attributes (an `indent` of 0 selects the default of 2); line terminators
//! are written as `\n`, except inside text blocks where each element carries
//! its own terminator and the emitter inserts none.
//!
//! Emitting a parsed tree reproduces a document that parses back to an
//! equal tree; because dictionaries preserve insertion order, the
//! parse/emit round trip is byte-stable for documents without comments.
//!
//! ## Examples
//!
//! ```rust
//! use serde_nestedtext::{parse_str, to_text};
//!
//! let tree = parse_str("key: value\nitems:\n  - a").unwrap();
//! assert_eq!(to_text(&tree), "key: value\nitems:\n  - a\n");
//! ```

use crate::value::Kind;
use crate::{NtOptions, Value};

/// Render a [`Value`] tree as NestedText.
///
/// A string value renders as its bare payload (no marker, no terminator);
/// containers render their block form, one line per item or entry, each
/// terminated with `\n`.
#[must_use]
pub fn to_text(value: &Value) -> String {
    let mut out = String::with_capacity(256);
    render(value, &mut out);
    out
}

/// Render a [`Value`] tree as NestedText with the given options.
///
/// The tree's presentation attributes are recomputed from the options
/// first, so this also works on hand-built trees whose `depth` fields were
/// never filled in.
///
/// # Examples
///
/// ```rust
/// use serde_nestedtext::{nt, to_text_with_options, NtOptions};
///
/// let tree = nt!({"key": ["a"]});
/// let text = to_text_with_options(&tree, NtOptions::new().with_indent(4));
/// assert_eq!(text, "key:\n    - a\n");
/// ```
#[must_use]
pub fn to_text_with_options(value: &Value, options: NtOptions) -> String {
    let mut normalized = value.clone();
    normalized.normalize(value.depth, options.indent);
    to_text(&normalized)
}

fn render(value: &Value, out: &mut String) {
    let pad = " ".repeat(value.effective_indent() * value.depth);
    match &value.kind {
        Kind::Unknown => {}
        Kind::String(s) => out.push_str(s),
        Kind::Text(elements) => {
            for element in elements {
                let (content, terminator) = split_terminator(element);
                out.push_str(&pad);
                out.push('>');
                if !content.is_empty() {
                    out.push(' ');
                    out.push_str(content);
                }
                if terminator.is_empty() {
                    out.push('\n');
                } else {
                    out.push_str(terminator);
                }
            }
        }
        Kind::List(items) => {
            for item in items {
                out.push_str(&pad);
                out.push('-');
                match &item.kind {
                    Kind::String(s) => {
                        if !s.is_empty() {
                            out.push(' ');
                            out.push_str(s);
                        }
                        out.push('\n');
                    }
                    _ => {
                        out.push('\n');
                        render(item, out);
                    }
                }
            }
        }
        Kind::Dictionary(entries) => {
            for (key, child) in entries.iter() {
                out.push_str(&pad);
                out.push_str(key);
                out.push(':');
                match &child.kind {
                    Kind::String(s) => {
                        if !s.is_empty() {
                            out.push(' ');
                            out.push_str(s);
                        }
                        out.push('\n');
                    }
                    _ => {
                        out.push('\n');
                        render(child, out);
                    }
                }
            }
        }
    }
}

/// Splits a text element into its content and trailing terminator.
fn split_terminator(element: &str) -> (&str, &str) {
    if element.ends_with("\r\n") {
        element.split_at(element.len() - 2)
    } else if element.ends_with('\n') || element.ends_with('\r') {
        element.split_at(element.len() - 1)
    } else {
        (element, "")
    }
}
