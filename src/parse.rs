//! NestedText parsing.
//!
//! This module turns a complete input buffer into a [`Value`] tree by
//! recursive descent over logical lines. The entry points are [`parse_str`]
//! and [`parse_slice`]; everything else is internal machinery:
//!
//! - [`LineReader`]: a single forward cursor that yields one logical line at
//!   a time, terminator included
//! - three collectors, one per container kind (text, list, dictionary)
//! - block buffering with a level stack, which accumulates the lines
//!   belonging to a nested value and re-parses them as a fresh sub-document
//!
//! A collector that reads a line belonging to a shallower level hands it
//! back to its caller as a loaded "next directive" instead of pushing it
//! into the reader; that signal never escapes to callers of this module.
//!
//! ## Examples
//!
//! ```rust
//! use serde_nestedtext::parse_str;
//!
//! let tree = parse_str("name: Alice\ntags:\n  - rust\n  - serde").unwrap();
//! let tags = tree.get("tags").unwrap();
//! assert_eq!(tags.as_list().unwrap().len(), 2);
//! ```

use crate::scan::{classify, content_len, find_separator, has_meaningful, sanitize_key};
use crate::scan::{Classified, LineKind};
use crate::value::Kind;
use crate::{Error, NtMap, Result, Value};

/// Parse a complete NestedText document into a [`Value`] tree.
///
/// Trailing line terminators are stripped before parsing. The root of a
/// document must be a list, a dictionary, or a text block starting at
/// column 0.
///
/// # Examples
///
/// ```rust
/// use serde_nestedtext::parse_str;
///
/// let tree = parse_str("key: value").unwrap();
/// assert_eq!(tree.get("key").and_then(|v| v.as_str()), Some("value"));
/// ```
///
/// # Errors
///
/// Returns an [`Error`] naming the first violation encountered; no partial
/// tree is produced.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_str(input: &str) -> Result<Value> {
    parse_fragment(input, 0, 0, true)
}

/// Parse a byte buffer of NestedText. The bytes must be valid UTF-8.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for non-UTF-8 input, otherwise as
/// [`parse_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_slice(input: &[u8]) -> Result<Value> {
    let s = std::str::from_utf8(input).map_err(|e| Error::InvalidUtf8(e.to_string()))?;
    parse_str(s)
}

/// One logical line and its absolute 1-origin line number.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    text: &'a str,
    number: usize,
}

/// A forward cursor over logical lines. A logical line ends at the first
/// `\n`, `\r`, or end of input; `\r\n` counts as one terminator. The
/// returned slice includes the terminator bytes.
struct LineReader<'a> {
    input: &'a str,
    pos: usize,
    line_no: usize,
}

impl<'a> LineReader<'a> {
    fn new(input: &'a str, line_offset: usize) -> Self {
        LineReader {
            input,
            pos: 0,
            line_no: line_offset,
        }
    }

    fn next(&mut self) -> Option<Line<'a>> {
        if self.pos >= self.input.len() {
            return None;
        }
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut i = start;
        while i < bytes.len() && bytes[i] != b'\n' && bytes[i] != b'\r' {
            i += 1;
        }
        if i < bytes.len() {
            if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                i += 2;
            } else {
                i += 1;
            }
        }
        self.pos = i;
        self.line_no += 1;
        Some(Line {
            text: &self.input[start..i],
            number: self.line_no,
        })
    }
}

/// What a collector hands back when it stops: either the input was
/// exhausted, or a line belonging to a shallower level was read and the
/// caller must resume with it.
enum Next<'a> {
    Eof,
    Line(Line<'a>),
}

struct Parser<'a> {
    reader: LineReader<'a>,
}

/// Parses one document or sub-document. `at_root` is true only for the
/// public entry point: buffered child lines keep their original indentation,
/// so a sub-parse adopts its first meaningful line's column as base instead
/// of requiring column 0.
fn parse_fragment(input: &str, depth: usize, line_offset: usize, at_root: bool) -> Result<Value> {
    let bytes = input.as_bytes();
    let mut end = input.len();
    while end > 0 && (bytes[end - 1] == b'\n' || bytes[end - 1] == b'\r') {
        end -= 1;
    }
    let mut parser = Parser {
        reader: LineReader::new(&input[..end], line_offset),
    };

    let (first, cls) = match parser.next_meaningful()? {
        Some(found) => found,
        None => return Err(Error::EmptyData),
    };
    let base = cls.indent.unwrap_or(0);
    if at_root && base != 0 {
        return Err(Error::RootLevelHasIndent { line: first.number });
    }

    let (value, next) = match cls.kind {
        LineKind::Text => parser.collect_text(base, first, depth)?,
        LineKind::List => parser.collect_list(base, first, depth)?,
        LineKind::Dictionary => parser.collect_dict(base, first, depth)?,
        _ => return Err(Error::RootString { line: first.number }),
    };
    match next {
        Next::Eof => Ok(value),
        Next::Line(line) => Err(Error::DifferentLevelOnSameChild { line: line.number }),
    }
}

impl<'a> Parser<'a> {
    /// Reads forward to the next line that is not blank and not a comment.
    /// A tab in indentation is reported here, before any structural check.
    fn next_meaningful(&mut self) -> Result<Option<(Line<'a>, Classified)>> {
        loop {
            let line = match self.reader.next() {
                Some(line) => line,
                None => return Ok(None),
            };
            let cls = classify(line.text.as_bytes());
            match cls.kind {
                LineKind::Empty | LineKind::Comment => continue,
                LineKind::Tab => {
                    return Err(Error::TabInIndentation {
                        line: line.number,
                        col: cls.indent.unwrap_or(0),
                    })
                }
                _ => return Ok(Some((line, cls))),
            }
        }
    }

    /// Collects a multiline text block whose first `>` line sits at `base`.
    fn collect_text(
        &mut self,
        base: usize,
        first: Line<'a>,
        depth: usize,
    ) -> Result<(Value, Next<'a>)> {
        let mut elements = Vec::new();
        push_text_payload(&mut elements, first.text, base);

        let next = loop {
            let (line, cls) = match self.next_meaningful()? {
                Some(found) => found,
                None => break Next::Eof,
            };
            let col = cls.indent.unwrap_or(0);
            if col < base {
                break Next::Line(line);
            }
            match (col == base, cls.kind) {
                (true, LineKind::Text) => push_text_payload(&mut elements, line.text, base),
                (true, _) => return Err(Error::DifferentTypesOnSameLevel { line: line.number }),
                (false, LineKind::Text) => {
                    return Err(Error::DifferentLevelOnSameChild { line: line.number })
                }
                (false, _) => return Err(Error::TextHasChild { line: line.number }),
            }
        };

        if let Some(last) = elements.last_mut() {
            strip_one_terminator(last);
        }
        Ok((
            Value {
                kind: Kind::Text(elements),
                indent: 0,
                depth,
            },
            next,
        ))
    }

    /// Collects list items whose `-` markers sit at `base`.
    fn collect_list(
        &mut self,
        base: usize,
        first: Line<'a>,
        depth: usize,
    ) -> Result<(Value, Next<'a>)> {
        let mut items = Vec::new();
        let mut line = first;
        loop {
            let bytes = line.text.as_bytes();
            let end = content_len(bytes);
            let next = if has_meaningful(&bytes[(base + 1).min(end)..end]) {
                // Inline item: everything past "- " is the payload, verbatim.
                let payload = &line.text[(base + 2).min(end)..end];
                items.push(Value {
                    kind: Kind::String(payload.to_string()),
                    indent: 0,
                    depth: depth + 1,
                });
                self.finish_inline(base)?
            } else {
                // Blank dash: the item's lines follow, indented deeper.
                let (child, next) = self.collect_block(base, depth, false)?;
                items.push(child);
                next
            };

            match next {
                Next::Eof => {
                    return Ok((
                        Value {
                            kind: Kind::List(items),
                            indent: 0,
                            depth,
                        },
                        Next::Eof,
                    ))
                }
                Next::Line(l) => {
                    let cls = classify(l.text.as_bytes());
                    let col = cls.indent.unwrap_or(0);
                    if col < base {
                        return Ok((
                            Value {
                                kind: Kind::List(items),
                                indent: 0,
                                depth,
                            },
                            Next::Line(l),
                        ));
                    }
                    if cls.kind != LineKind::List {
                        return Err(Error::DifferentTypesOnSameLevel { line: l.number });
                    }
                    line = l;
                }
            }
        }
    }

    /// Collects dictionary entries whose keys sit at `base`.
    fn collect_dict(
        &mut self,
        base: usize,
        first: Line<'a>,
        depth: usize,
    ) -> Result<(Value, Next<'a>)> {
        let mut entries = NtMap::new();
        let mut line = first;
        loop {
            let bytes = line.text.as_bytes();
            let sep = match find_separator(bytes, base) {
                Some(sep) => sep,
                // The classifier only sends separator-bearing lines here.
                None => return Err(Error::DifferentTypesOnSameLevel { line: line.number }),
            };
            let key = sanitize_key(&line.text[base..sep.key_end]).to_string();
            if entries.contains_key(&key) {
                return Err(Error::DictionaryDuplicateKey {
                    line: line.number,
                    key,
                });
            }

            let end = content_len(bytes);
            let value_start = sep.value_start.min(end);
            let (child, next) = if has_meaningful(&bytes[value_start..end]) {
                // Inline value, taken verbatim through end of line.
                let child = Value {
                    kind: Kind::String(line.text[value_start..end].to_string()),
                    indent: 0,
                    depth: depth + 1,
                };
                (child, self.finish_inline(base)?)
            } else {
                self.collect_block(base, depth, true)?
            };
            entries.insert(key, child);

            match next {
                Next::Eof => {
                    return Ok((
                        Value {
                            kind: Kind::Dictionary(entries),
                            indent: 0,
                            depth,
                        },
                        Next::Eof,
                    ))
                }
                Next::Line(l) => {
                    let cls = classify(l.text.as_bytes());
                    let col = cls.indent.unwrap_or(0);
                    if col < base {
                        return Ok((
                            Value {
                                kind: Kind::Dictionary(entries),
                                indent: 0,
                                depth,
                            },
                            Next::Line(l),
                        ));
                    }
                    if cls.kind != LineKind::Dictionary {
                        return Err(Error::DifferentTypesOnSameLevel { line: l.number });
                    }
                    line = l;
                }
            }
        }
    }

    /// After an inline string value: only blank lines, comments, or a line
    /// back at `base` (or shallower, for the enclosing level) may follow.
    fn finish_inline(&mut self, base: usize) -> Result<Next<'a>> {
        let (line, cls) = match self.next_meaningful()? {
            Some(found) => found,
            None => return Ok(Next::Eof),
        };
        let col = cls.indent.unwrap_or(0);
        if col > base {
            return Err(Error::StringHasChild { line: line.number });
        }
        if col < base {
            return Err(Error::DifferentLevelOnSameChild { line: line.number });
        }
        Ok(Next::Line(line))
    }

    /// Accumulates the lines of a block value (everything indented deeper
    /// than `base`) and re-parses them as a fresh sub-document one level
    /// down. An empty block becomes an empty string child, as does a block
    /// whose re-parse reports empty data.
    fn collect_block(
        &mut self,
        base: usize,
        depth: usize,
        in_dictionary: bool,
    ) -> Result<(Value, Next<'a>)> {
        let offset = self.reader.line_no;
        let mut buffer = String::new();
        let mut levels: Vec<usize> = Vec::new();

        let next = loop {
            let line = match self.reader.next() {
                Some(line) => line,
                None => break Next::Eof,
            };
            let cls = classify(line.text.as_bytes());
            match cls.kind {
                LineKind::Tab => {
                    return Err(Error::TabInIndentation {
                        line: line.number,
                        col: cls.indent.unwrap_or(0),
                    })
                }
                // Blank lines may be meaningful inside a text child, and
                // comments are skipped again by the sub-parse; keeping both
                // keeps line numbers absolute.
                LineKind::Empty | LineKind::Comment => {
                    buffer.push_str(line.text);
                    continue;
                }
                _ => {}
            }
            let col = cls.indent.unwrap_or(0);
            if col == base {
                break Next::Line(line);
            }
            if col < base {
                return Err(Error::DifferentLevelOnSameChild { line: line.number });
            }
            match levels.last() {
                None => levels.push(col),
                Some(&top) if col > top => levels.push(col),
                Some(_) => match levels.iter().position(|&level| level == col) {
                    Some(pos) => levels.truncate(pos + 1),
                    None => {
                        return Err(Error::DifferentLevelOnSameChild { line: line.number })
                    }
                },
            }
            if in_dictionary && cls.kind == LineKind::String {
                return Err(Error::StringWithNewline { line: line.number });
            }
            buffer.push_str(line.text);
        };

        let child = if has_meaningful(buffer.as_bytes()) {
            match parse_fragment(&buffer, depth + 1, offset, false) {
                Ok(value) => value,
                Err(Error::EmptyData) => empty_string_child(depth),
                Err(err) => return Err(err),
            }
        } else {
            empty_string_child(depth)
        };
        Ok((child, next))
    }
}

fn empty_string_child(depth: usize) -> Value {
    Value {
        kind: Kind::String(String::new()),
        indent: 0,
        depth: depth + 1,
    }
}

/// Appends the payload of one `>` line at column `base`.
///
/// A bare `>` at end of input contributes an empty element; a `>` directly
/// before the terminator contributes the terminator itself (an empty line
/// of the text block); otherwise the byte after `>` is the mandatory space
/// and the payload runs from two past the `>` through the terminator.
fn push_text_payload(elements: &mut Vec<String>, line: &str, base: usize) {
    let bytes = line.as_bytes();
    let marker = base + 1;
    if marker >= bytes.len() {
        elements.push(String::new());
    } else if bytes[marker] == b'\n' || bytes[marker] == b'\r' {
        elements.push(line[marker..].to_string());
    } else {
        elements.push(line[marker + 1..].to_string());
    }
}

/// Removes exactly one trailing line terminator, if present.
fn strip_one_terminator(s: &mut String) {
    if s.ends_with("\r\n") {
        s.truncate(s.len() - 2);
    } else if s.ends_with('\n') || s.ends_with('\r') {
        s.truncate(s.len() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_reader_splits_mixed_terminators() {
        let mut reader = LineReader::new("a\nb\r\nc\rd", 0);
        let lines: Vec<_> = std::iter::from_fn(|| reader.next().map(|l| l.text)).collect();
        assert_eq!(lines, vec!["a\n", "b\r\n", "c\r", "d"]);
    }

    #[test]
    fn line_reader_numbers_are_one_origin() {
        let mut reader = LineReader::new("a\nb", 0);
        assert_eq!(reader.next().map(|l| l.number), Some(1));
        assert_eq!(reader.next().map(|l| l.number), Some(2));
        assert_eq!(reader.next().map(|l| l.number), None);
    }

    #[test]
    fn nested_buffers_keep_absolute_line_numbers() {
        // The tab sits on physical line 4, inside a doubly nested block.
        let err = parse_str("a:\n  b:\n    - x\n\t- y").unwrap_err();
        assert_eq!(err, Error::TabInIndentation { line: 4, col: 0 });
    }

    #[test]
    fn blank_dash_with_nothing_below_is_empty_string() {
        let tree = parse_str("-").unwrap();
        let items = tree.as_list().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].as_str(), Some(""));
    }

    #[test]
    fn strip_one_terminator_variants() {
        let mut s = "a\r\n".to_string();
        strip_one_terminator(&mut s);
        assert_eq!(s, "a");
        let mut s = "a\r".to_string();
        strip_one_terminator(&mut s);
        assert_eq!(s, "a");
        let mut s = "a".to_string();
        strip_one_terminator(&mut s);
        assert_eq!(s, "a");
    }

    #[test]
    fn level_stack_accepts_return_to_seen_level() {
        let input = "k:\n  a:\n    deep: 1\n  b: 2";
        let tree = parse_str(input).unwrap();
        let k = tree.get("k").unwrap();
        assert!(k.get("a").unwrap().is_dictionary());
        assert_eq!(k.get("b").and_then(|v| v.as_str()), Some("2"));
    }

    #[test]
    fn level_stack_rejects_unseen_level() {
        let input = "k:\n    a: 1\n  b: 2";
        let err = parse_str(input).unwrap_err();
        assert_eq!(err, Error::DifferentLevelOnSameChild { line: 3 });
    }
}
