//! Tag and Attribute Parsing
//!
//! Classifies one tag token and parses its attribute region. Only the
//! restricted form `key="value"` is accepted; spaces around `=` are fine,
//! single quotes, unquoted values and entities are not.

use super::span::Span;
use crate::error::ParseError;
use memchr::memchr;

/// What a tag does to the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Comment, doctype or processing instruction: no node
    Skip,
    /// `</name>`
    End,
    /// `<name .../>`
    SelfClosing,
    /// `<name ...>`
    Open,
}

/// A classified tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub kind: TagKind,
    /// Element name (for end tags, the name being closed)
    pub name: Span,
    /// Attribute region, empty when the tag has none
    pub attributes: Span,
}

/// A parsed attribute, both halves as spans into the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute {
    pub name: Span,
    pub value: Span,
}

/// Classify the tag text covered by `tag` (between `<` and `>`).
pub fn classify_tag(input: &[u8], tag: Span) -> Tag {
    let bytes = tag.slice(input);

    match bytes.first() {
        Some(b'!') | Some(b'?') => {
            return Tag {
                kind: TagKind::Skip,
                name: Span::empty(),
                attributes: Span::empty(),
            };
        }
        Some(b'/') => {
            let name = trim_spaces(input, Span::new(tag.start + 1, tag.end));
            return Tag {
                kind: TagKind::End,
                name,
                attributes: Span::empty(),
            };
        }
        _ => {}
    }

    // Strip a single trailing '/' (self-closing marker)
    let (kind, end) = if bytes.last() == Some(&b'/') {
        (TagKind::SelfClosing, tag.end - 1)
    } else {
        (TagKind::Open, tag.end)
    };

    let name_start = skip_spaces(input, tag.start, end);
    let name_end = memchr(b' ', &input[name_start..end])
        .map(|i| name_start + i)
        .unwrap_or(end);
    let attr_start = skip_spaces(input, name_end, end);

    Tag {
        kind,
        name: Span::new(name_start, name_end),
        attributes: Span::new(attr_start, end),
    }
}

/// Parse an attribute region into ordered `key="value"` pairs.
///
/// Any malformed entry fails the whole region with
/// [`ParseError::MalformedAttributes`].
pub fn parse_attributes(input: &[u8], region: Span) -> Result<Vec<Attribute>, ParseError> {
    let mut attrs = Vec::new();
    let end = region.end.min(input.len());
    let mut pos = region.start;

    loop {
        pos = skip_spaces(input, pos, end);
        if pos >= end {
            break;
        }

        // Attribute name runs to a space or '='
        let name_start = pos;
        while pos < end && input[pos] != b' ' && input[pos] != b'=' {
            pos += 1;
        }
        if pos == name_start {
            return Err(malformed(pos, "missing attribute name"));
        }
        let name = Span::new(name_start, pos);

        pos = skip_spaces(input, pos, end);
        if pos >= end || input[pos] != b'=' {
            return Err(malformed(pos, "expected '=' after attribute name"));
        }
        pos = skip_spaces(input, pos + 1, end);

        if pos >= end || input[pos] != b'"' {
            return Err(malformed(pos, "attribute value must be double-quoted"));
        }
        let value_start = pos + 1;
        let value_end = match memchr(b'"', &input[value_start..end]) {
            Some(i) => value_start + i,
            None => return Err(malformed(value_start, "unterminated attribute value")),
        };

        attrs.push(Attribute {
            name,
            value: Span::new(value_start, value_end),
        });
        pos = value_end + 1;
    }

    Ok(attrs)
}

#[inline]
fn malformed(position: usize, reason: &'static str) -> ParseError {
    ParseError::MalformedAttributes { position, reason }
}

#[inline]
fn skip_spaces(input: &[u8], mut pos: usize, end: usize) -> usize {
    while pos < end && input[pos] == b' ' {
        pos += 1;
    }
    pos
}

fn trim_spaces(input: &[u8], span: Span) -> Span {
    let start = skip_spaces(input, span.start, span.end);
    let mut end = span.end;
    while end > start && input[end - 1] == b' ' {
        end -= 1;
    }
    Span::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(input: &[u8]) -> Tag {
        classify_tag(input, Span::new(0, input.len()))
    }

    fn pairs(input: &[u8]) -> Vec<(&str, &str)> {
        let t = tag(input);
        parse_attributes(input, t.attributes)
            .unwrap()
            .into_iter()
            .map(|a| {
                (
                    std::str::from_utf8(a.name.slice(input)).unwrap(),
                    std::str::from_utf8(a.value.slice(input)).unwrap(),
                )
            })
            .collect()
    }

    #[test]
    fn test_classify_open() {
        let input = b"p class=\"x\"";
        let t = tag(input);
        assert_eq!(t.kind, TagKind::Open);
        assert_eq!(t.name.slice(input), b"p");
        assert_eq!(t.attributes.slice(input), b"class=\"x\"");
    }

    #[test]
    fn test_classify_self_closing() {
        let input = b"br/";
        let t = tag(input);
        assert_eq!(t.kind, TagKind::SelfClosing);
        assert_eq!(t.name.slice(input), b"br");
        assert!(t.attributes.is_empty());

        let input = b"img src=\"a.png\" /";
        let t = tag(input);
        assert_eq!(t.kind, TagKind::SelfClosing);
        assert_eq!(t.name.slice(input), b"img");
        assert_eq!(t.attributes.slice(input), b"src=\"a.png\" ");
    }

    #[test]
    fn test_classify_end() {
        let input = b"/p ";
        let t = tag(input);
        assert_eq!(t.kind, TagKind::End);
        assert_eq!(t.name.slice(input), b"p");
    }

    #[test]
    fn test_classify_skip() {
        assert_eq!(tag(b"!DOCTYPE html").kind, TagKind::Skip);
        assert_eq!(tag(b"?xml version=\"1.0\"?").kind, TagKind::Skip);
        assert_eq!(tag(b"!-- note --").kind, TagKind::Skip);
    }

    #[test]
    fn test_namespace_prefix_is_literal() {
        let input = b"dc:title";
        assert_eq!(tag(input).name.slice(input), b"dc:title");
    }

    #[test]
    fn test_simple_attributes() {
        assert_eq!(
            pairs(b"item id=\"c1\" href=\"ch1.xhtml\""),
            vec![("id", "c1"), ("href", "ch1.xhtml")]
        );
    }

    #[test]
    fn test_whitespace_around_equals() {
        assert_eq!(pairs(b"a  id  =  \"test\"  "), vec![("id", "test")]);
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(pairs(b"a alt=\"\""), vec![("alt", "")]);
    }

    #[test]
    fn test_duplicate_keys_kept_in_order() {
        assert_eq!(
            pairs(b"a k=\"1\" k=\"2\""),
            vec![("k", "1"), ("k", "2")]
        );
    }

    #[test]
    fn test_missing_equals() {
        let input = b"a checked";
        let t = tag(input);
        assert!(matches!(
            parse_attributes(input, t.attributes),
            Err(ParseError::MalformedAttributes { .. })
        ));
    }

    #[test]
    fn test_single_quoted_rejected() {
        let input = b"a id='x'";
        let t = tag(input);
        assert_eq!(
            parse_attributes(input, t.attributes),
            Err(ParseError::MalformedAttributes {
                position: 5,
                reason: "attribute value must be double-quoted",
            })
        );
    }

    #[test]
    fn test_unterminated_value() {
        let input = b"a id=\"x";
        let t = tag(input);
        assert!(matches!(
            parse_attributes(input, t.attributes),
            Err(ParseError::MalformedAttributes { reason: "unterminated attribute value", .. })
        ));
    }

    #[test]
    fn test_no_attributes() {
        assert!(pairs(b"p").is_empty());
    }
}
