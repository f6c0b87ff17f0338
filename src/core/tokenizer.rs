//! Markup Tokenizer - (tag, trailing text) segmentation
//!
//! Implements a pull-style tokenizer over normalized input. Every token is
//! one `<...>` tag plus the run of text that follows it up to the next `<`:
//!
//! ```text
//! <p class="x">Hello <b>world</b>
//!  ^^^^^^^^^^^ ^^^^^^ ^ ^^^^^
//!  tag         text   tag text  ...
//! ```
//!
//! Anything before the first `<` is discarded (prolog whitespace). Leading
//! spaces of a text run are dropped and an empty run yields no text.

use super::scanner::Scanner;
use super::span::Span;
use crate::error::ParseError;

/// One tag and the text that trails it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Tag content between `<` and `>` (exclusive)
    pub tag: Span,
    /// Text after `>` up to the next `<`, leading spaces stripped
    pub text: Option<Span>,
}

/// Tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    started: bool,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer over normalized input
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            started: false,
            done: false,
        }
    }

    /// Get the current position
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next token, `None` at end of input
    pub fn next_token(&mut self) -> Option<Result<Token, ParseError>> {
        if self.done {
            return None;
        }

        if !self.started {
            self.started = true;
            match self.scanner.find_tag_start() {
                Some(pos) => self.scanner.set_position(pos),
                None => {
                    self.done = true;
                    return None;
                }
            }
        }

        if self.scanner.is_eof() {
            self.done = true;
            return None;
        }

        // Positioned on '<'
        let open = self.scanner.position();
        self.scanner.set_position(open + 1);

        let close = match self.scanner.find_tag_boundary() {
            Some(pos) if self.scanner.byte_at(pos) == Some(b'>') => pos,
            _ => {
                self.done = true;
                return Some(Err(ParseError::MalformedDocument { position: open }));
            }
        };
        let tag = Span::new(open + 1, close);

        self.scanner.set_position(close + 1);
        self.scanner.skip_spaces();
        let text_start = self.scanner.position();
        let text_end = self.scanner.find_tag_start().unwrap_or(self.scanner.len());
        self.scanner.set_position(text_end);

        let text = (text_end > text_start).then(|| Span::new(text_start, text_end));

        Some(Ok(Token { tag, text }))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &[u8]) -> Vec<(String, Option<String>)> {
        Tokenizer::new(input)
            .map(|t| {
                let t = t.unwrap();
                let tag = String::from_utf8(t.tag.slice(input).to_vec()).unwrap();
                let text = t
                    .text
                    .map(|s| String::from_utf8(s.slice(input).to_vec()).unwrap());
                (tag, text)
            })
            .collect()
    }

    #[test]
    fn test_simple_element() {
        let tokens = collect(b"<p>Hello </p>");
        assert_eq!(
            tokens,
            vec![
                ("p".to_string(), Some("Hello ".to_string())),
                ("/p".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_prolog_discarded() {
        let tokens = collect(b"  junk <a/>");
        assert_eq!(tokens, vec![("a/".to_string(), None)]);
    }

    #[test]
    fn test_leading_spaces_stripped() {
        let tokens = collect(b"<a>   x  y <b/>");
        assert_eq!(tokens[0].1.as_deref(), Some("x  y "));
    }

    #[test]
    fn test_whitespace_only_text_is_none() {
        let tokens = collect(b"<a>    </a>");
        assert_eq!(tokens[0].1, None);
    }

    #[test]
    fn test_trailing_text_at_eof() {
        let tokens = collect(b"<a>tail");
        assert_eq!(tokens[0].1.as_deref(), Some("tail"));
    }

    #[test]
    fn test_no_tags() {
        assert!(collect(b"just text").is_empty());
        assert!(collect(b"").is_empty());
    }

    #[test]
    fn test_unterminated_tag() {
        let mut tokenizer = Tokenizer::new(b"<a>ok<b");
        assert!(tokenizer.next().unwrap().is_ok());
        assert_eq!(
            tokenizer.next(),
            Some(Err(ParseError::MalformedDocument { position: 5 }))
        );
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn test_tag_interrupted_by_open() {
        let mut tokenizer = Tokenizer::new(b"<a <b>");
        assert_eq!(
            tokenizer.next(),
            Some(Err(ParseError::MalformedDocument { position: 0 }))
        );
    }
}
