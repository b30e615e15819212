//! Line-level scanning: classification, key detection, key sanitization.
//!
//! Everything here is pure and allocation-free: the functions take a byte
//! slice holding one logical line (with or without its trailing terminator)
//! and return kinds and byte indices into it. The recursive-descent parser
//! in [`crate::parse`] drives these to decide what each line is before
//! consuming it.

/// The syntactic kind of one logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// Only whitespace and/or terminators.
    Empty,
    /// First meaningful byte is `#`.
    Comment,
    /// `>` followed by space, terminator, or end of line.
    Text,
    /// `-` followed by space, terminator, or end of line.
    List,
    /// A line with an admissible `:` separator.
    Dictionary,
    /// Anything else.
    String,
    /// A tab before the first meaningful byte; always an error.
    Tab,
}

/// A classified line: its kind and the column of its first meaningful byte.
///
/// `indent` is `None` for [`LineKind::Empty`] lines and, for
/// [`LineKind::Tab`], holds the column of the offending tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Classified {
    pub kind: LineKind,
    pub indent: Option<usize>,
}

/// An admissible key/value separator located by [`find_separator`].
///
/// The raw key is `line[indent..key_end]`; the inline value, if any, starts
/// at `value_start` (which may point at the terminator or past the end).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Separator {
    pub key_end: usize,
    pub value_start: usize,
}

#[inline]
fn is_terminator(b: u8) -> bool {
    b == b'\n' || b == b'\r'
}

/// Returns the content length of a line, excluding its trailing terminator
/// bytes (`\n`, `\r`, or `\r\n`).
pub(crate) fn content_len(line: &[u8]) -> usize {
    let mut end = line.len();
    if end > 0 && line[end - 1] == b'\n' {
        end -= 1;
    }
    if end > 0 && line[end - 1] == b'\r' {
        end -= 1;
    }
    end
}

/// Returns `true` if the slice contains a byte that is not whitespace and
/// not a line terminator.
pub(crate) fn has_meaningful(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .any(|&b| b != b' ' && b != b'\t' && !is_terminator(b))
}

/// Classifies one logical line (C1).
///
/// Tab detection fires before structural classification: a tab anywhere
/// before the first meaningful byte yields [`LineKind::Tab`] regardless of
/// what follows.
pub(crate) fn classify(line: &[u8]) -> Classified {
    let mut i = 0;
    while i < line.len() && (line[i] == b' ' || is_terminator(line[i])) {
        i += 1;
    }
    if i >= line.len() {
        return Classified {
            kind: LineKind::Empty,
            indent: None,
        };
    }
    if line[i] == b'\t' {
        return Classified {
            kind: LineKind::Tab,
            indent: Some(i),
        };
    }

    let next = line.get(i + 1).copied();
    let marker_alone = match next {
        None => true,
        Some(b) => b == b' ' || is_terminator(b),
    };
    let kind = match line[i] {
        b'#' => LineKind::Comment,
        b'>' if marker_alone => LineKind::Text,
        b'-' if marker_alone => LineKind::List,
        b'>' | b'-' => LineKind::String,
        _ => {
            if find_separator(line, i).is_some() {
                LineKind::Dictionary
            } else {
                LineKind::String
            }
        }
    };
    Classified {
        kind,
        indent: Some(i),
    }
}

/// Locates the `:` that separates a dictionary key from its value (C2).
///
/// `start` is the column of the line's first meaningful byte. The rules:
///
/// 1. A quote (`'` or `"`) at `start` opens quoted mode; the same character
///    closes it. Colons inside an open quote are never separators.
/// 2. A candidate is a `:` outside any open quote that is the last content
///    byte of the line or is followed by whitespace. `a:b` is a string,
///    `a: b` and `a:` are dictionary lines.
/// 3. Scanning left to right, the first candidate past the most recent
///    closing quote wins, so `"key: ": v` keys on the second colon while
///    `k: v: w` keys on the first.
pub(crate) fn find_separator(line: &[u8], start: usize) -> Option<Separator> {
    let end = content_len(line);
    let mut quote = None;
    let mut i = start;
    if i < end && (line[i] == b'\'' || line[i] == b'"') {
        quote = Some(line[i]);
        i += 1;
    }
    while i < end {
        let b = line[i];
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            i += 1;
            continue;
        }
        if b == b':' {
            let next = line.get(i + 1).copied();
            let followed_by_ws = match next {
                None => true,
                Some(b) => b == b' ' || b == b'\t' || is_terminator(b),
            };
            if followed_by_ws {
                let value_start = match next {
                    Some(b' ') | Some(b'\t') => i + 2,
                    _ => i + 1,
                };
                return Some(Separator {
                    key_end: i,
                    value_start,
                });
            }
        }
        i += 1;
    }
    None
}

/// Sanitizes a raw dictionary key (C3): trims trailing whitespace, then
/// strips one pair of matched surrounding quotes. Leading whitespace and
/// inner quotes are preserved verbatim.
pub(crate) fn sanitize_key(raw: &str) -> &str {
    let trimmed = raw.trim_end();
    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'\'' || first == b'"') && bytes[bytes.len() - 1] == first {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(line: &str) -> LineKind {
        classify(line.as_bytes()).kind
    }

    #[test]
    fn classify_kinds() {
        assert_eq!(kind_of(""), LineKind::Empty);
        assert_eq!(kind_of("   \n"), LineKind::Empty);
        assert_eq!(kind_of("# comment"), LineKind::Comment);
        assert_eq!(kind_of("> text"), LineKind::Text);
        assert_eq!(kind_of(">"), LineKind::Text);
        assert_eq!(kind_of(">\n"), LineKind::Text);
        assert_eq!(kind_of(">payload"), LineKind::String);
        assert_eq!(kind_of("- item"), LineKind::List);
        assert_eq!(kind_of("-\n"), LineKind::List);
        assert_eq!(kind_of("-item"), LineKind::String);
        assert_eq!(kind_of("key: value"), LineKind::Dictionary);
        assert_eq!(kind_of("key:"), LineKind::Dictionary);
        assert_eq!(kind_of("key:value"), LineKind::String);
        assert_eq!(kind_of("plain"), LineKind::String);
    }

    #[test]
    fn classify_indent_column() {
        let c = classify(b"    key: value");
        assert_eq!(c.kind, LineKind::Dictionary);
        assert_eq!(c.indent, Some(4));
    }

    #[test]
    fn classify_tab_fires_before_structure() {
        let c = classify(b"\t- a");
        assert_eq!(c.kind, LineKind::Tab);
        assert_eq!(c.indent, Some(0));

        let c = classify(b"  \t> b");
        assert_eq!(c.kind, LineKind::Tab);
        assert_eq!(c.indent, Some(2));
    }

    #[test]
    fn separator_requires_trailing_whitespace_or_eol() {
        assert!(find_separator(b"a:b", 0).is_none());
        let sep = find_separator(b"a: b", 0).unwrap();
        assert_eq!((sep.key_end, sep.value_start), (1, 3));
        let sep = find_separator(b"a:", 0).unwrap();
        assert_eq!((sep.key_end, sep.value_start), (1, 2));
        let sep = find_separator(b"a:\n", 0).unwrap();
        assert_eq!((sep.key_end, sep.value_start), (1, 2));
    }

    #[test]
    fn separator_keys_on_first_candidate() {
        let line = b"k: v: w";
        let sep = find_separator(line, 0).unwrap();
        assert_eq!(sep.key_end, 1);
        assert_eq!(&line[sep.value_start..], b"v: w");
    }

    #[test]
    fn separator_skips_quoted_colons() {
        let line = b"\"key: \": value";
        let sep = find_separator(line, 0).unwrap();
        assert_eq!(&line[..sep.key_end], b"\"key: \"");
        assert_eq!(&line[sep.value_start..], b"value");
    }

    #[test]
    fn unpaired_quote_swallows_the_line() {
        assert!(find_separator(b"'a: b", 0).is_none());
    }

    #[test]
    fn sanitize_trims_and_unquotes() {
        assert_eq!(sanitize_key("key  "), "key");
        assert_eq!(sanitize_key("'- key 3'"), "- key 3");
        assert_eq!(sanitize_key("\"k\""), "k");
        assert_eq!(sanitize_key("  leading"), "  leading");
        assert_eq!(sanitize_key("'unmatched\""), "'unmatched\"");
        assert_eq!(sanitize_key("''"), "");
        assert_eq!(sanitize_key("'"), "'");
    }

    #[test]
    fn content_len_strips_one_terminator() {
        assert_eq!(content_len(b"abc\n"), 3);
        assert_eq!(content_len(b"abc\r\n"), 3);
        assert_eq!(content_len(b"abc\r"), 3);
        assert_eq!(content_len(b"abc"), 3);
        assert_eq!(content_len(b"\n"), 0);
    }
}
