//! Markup scanning using memchr
//!
//! Uses the memchr crate for SIMD-accelerated delimiter search:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)
//!
//! The scanner only ever sees normalized input: every whitespace byte has
//! already been rewritten to a plain space by [`normalize_whitespace`].

use memchr::{memchr, memchr2};

/// Rewrite every whitespace byte to `b' '` in place.
///
/// Matches the classic C `isspace` set: space, tab, newline, vertical tab,
/// form feed and carriage return. Only ASCII bytes are touched, so valid
/// UTF-8 stays valid.
pub fn normalize_whitespace(input: &mut [u8]) {
    for b in input.iter_mut() {
        if is_whitespace(*b) {
            *b = b' ';
        }
    }
}

/// Check if byte is whitespace
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

/// Scanner for tag delimiter detection
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Input length in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Skip plain spaces
    #[inline]
    pub fn skip_spaces(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos] == b' ' {
            self.pos += 1;
        }
    }

    /// Find next '<' (tag start)
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        self.find_byte(b'<')
    }

    /// Find the next '>' or '<', whichever comes first.
    ///
    /// A tag is terminated correctly only when '>' is found first.
    #[inline]
    pub fn find_tag_boundary(&self) -> Option<usize> {
        memchr2(b'>', b'<', self.remaining()).map(|i| self.pos + i)
    }

    /// Find next occurrence of a specific byte
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, self.remaining()).map(|i| self.pos + i)
    }

    /// Byte at an absolute position
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.get(pos).copied()
    }

    #[inline]
    fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or(&[])
    }
}
