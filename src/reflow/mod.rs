//! Reflow Engine
//!
//! Walks a document in document order and writes word-wrapped plain text:
//! - every line starts with `indent` spaces and its text is at most
//!   `line_width` characters, not counting the trailing separator
//! - a change of paragraph owner (see [`blocks`]) writes a blank line
//! - `<br>` ends the current line without a blank line
//! - a word longer than `line_width - indent` is split across lines with `-`

pub mod blocks;
mod line;

use std::io::{self, Write};

use crate::dom::{NodeId, XmlDocument};
use crate::error::Error;
use blocks::paragraph_owner;
use line::LineBuffer;

pub const DEFAULT_LINE_WIDTH: usize = 80;
pub const DEFAULT_INDENT: usize = 4;

/// Validated layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflowOptions {
    line_width: usize,
    indent: usize,
}

impl ReflowOptions {
    /// `line_width` must leave room for the indent, one character and a
    /// hyphen: `line_width >= 3` and `indent < line_width - 2`.
    pub fn new(line_width: usize, indent: usize) -> crate::Result<Self> {
        if line_width < 3 {
            return Err(Error::InvalidOptions(format!(
                "line width {line_width} is less than 3"
            )));
        }
        if indent >= line_width - 2 {
            return Err(Error::InvalidOptions(format!(
                "indent {indent} must be less than line width {line_width} minus 2"
            )));
        }
        Ok(ReflowOptions { line_width, indent })
    }

    #[inline]
    pub fn line_width(&self) -> usize {
        self.line_width
    }

    #[inline]
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Characters available after the indent
    #[inline]
    fn body_width(&self) -> usize {
        self.line_width - self.indent
    }

    /// Characters available for a hyphenated fragment
    #[inline]
    fn fragment_width(&self) -> usize {
        self.body_width() - 1
    }
}

impl Default for ReflowOptions {
    fn default() -> Self {
        ReflowOptions {
            line_width: DEFAULT_LINE_WIDTH,
            indent: DEFAULT_INDENT,
        }
    }
}

/// Reflow a whole document into `out`
pub fn reflow<W: Write>(doc: &XmlDocument, out: &mut W, options: &ReflowOptions) -> io::Result<()> {
    let mut reflower = Reflower::new(out, *options);
    for id in doc.doc_order() {
        reflower.visit(doc, id)?;
    }
    reflower.finish()
}

/// Reflow a whole document into a `String`
pub fn reflow_to_string(doc: &XmlDocument, options: &ReflowOptions) -> String {
    let mut out = Vec::new();
    if let Err(e) = reflow(doc, &mut out, options) {
        // Vec sinks do not fail; keep whatever was written
        tracing::warn!(error = %e, "reflow into memory failed");
    }
    String::from_utf8(out).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

struct Reflower<'w, W: Write> {
    out: &'w mut W,
    options: ReflowOptions,
    line: LineBuffer,
    owner: Option<NodeId>,
}

impl<'w, W: Write> Reflower<'w, W> {
    fn new(out: &'w mut W, options: ReflowOptions) -> Self {
        Reflower {
            out,
            options,
            line: LineBuffer::new(options.indent, options.line_width + 1),
            owner: None,
        }
    }

    fn visit(&mut self, doc: &XmlDocument, id: NodeId) -> io::Result<()> {
        if doc.is_named(id, "br") {
            return self.flush_line();
        }

        let Some(text) = doc.text_content(id) else {
            return Ok(());
        };

        let owner = paragraph_owner(doc, id);
        if owner != self.owner {
            self.paragraph_break()?;
            self.owner = owner;
        }

        for word in text.split(' ').filter(|w| !w.is_empty()) {
            self.push_word(word)?;
        }
        Ok(())
    }

    fn push_word(&mut self, word: &str) -> io::Result<()> {
        let line_width = self.options.line_width;
        let mut rest = word;
        let mut rest_width = word.chars().count();

        if self.line.width() + rest_width + 1 > line_width {
            if self.line.has_words() {
                self.flush_line()?;
            }

            let body = self.options.body_width();
            let chunk = self.options.fragment_width();
            while rest_width > body {
                let split = byte_offset(rest, chunk);
                self.line.push_fragment(&rest[..split], chunk);
                self.flush_line()?;
                rest = &rest[split..];
                rest_width -= chunk;
            }
        }

        self.line.push_word(rest, rest_width);
        Ok(())
    }

    /// Terminate the current line and start a fresh indented one
    fn flush_line(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", self.line.as_str())?;
        self.line.reset();
        Ok(())
    }

    /// Terminate a line holding words with a blank line
    fn paragraph_break(&mut self) -> io::Result<()> {
        if self.line.has_words() {
            write!(self.out, "{}\n\n", self.line.as_str())?;
            self.line.reset();
        }
        Ok(())
    }

    fn finish(mut self) -> io::Result<()> {
        self.paragraph_break()?;
        self.out.flush()
    }
}

/// Byte offset of the `chars`-th character, or the end of `s`
#[inline]
fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}
