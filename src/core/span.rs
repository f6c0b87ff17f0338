//! Span - byte range into the normalized input
//!
//! Names, attribute keys/values and text runs are never copied out of the
//! input buffer; nodes carry spans and resolve them on access.

/// A half-open byte range `[start, end)` into the document input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset of the first byte
    pub start: usize,
    /// Byte offset one past the last byte
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create an empty span (used for "no value")
    #[inline]
    pub const fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    /// Length in bytes
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if this span is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Extract the byte slice from input
    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        input.get(self.start..self.end).unwrap_or(&[])
    }

    /// Extract the string slice from input
    ///
    /// Spans produced by the tokenizer always sit on ASCII delimiters, so they
    /// are char boundaries of any UTF-8 input.
    #[inline]
    pub fn as_str<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.start..self.end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice() {
        let span = Span::new(1, 4);
        assert_eq!(span.slice(b"<abc>"), b"abc");
        assert_eq!(span.as_str("<abc>"), "abc");
        assert_eq!(span.len(), 3);
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let span = Span::new(3, 10);
        assert_eq!(span.slice(b"abc"), b"");
        assert_eq!(span.as_str("abc"), "");
    }

    #[test]
    fn test_empty() {
        assert!(Span::empty().is_empty());
        assert!(!Span::new(0, 1).is_empty());
    }
}
