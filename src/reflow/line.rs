//! Current-line buffer for the reflow engine

/// One output line under construction. Always starts with `indent` spaces;
/// `width` counts characters, not bytes.
#[derive(Debug)]
pub(crate) struct LineBuffer {
    text: String,
    width: usize,
    indent: usize,
}

impl LineBuffer {
    pub fn new(indent: usize, capacity: usize) -> Self {
        let mut line = LineBuffer {
            text: String::with_capacity(capacity),
            width: 0,
            indent,
        };
        line.reset();
        line
    }

    /// Drop the contents and re-fill the indent
    pub fn reset(&mut self) {
        self.text.clear();
        self.text.extend(std::iter::repeat(' ').take(self.indent));
        self.width = self.indent;
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Anything beyond the indent
    #[inline]
    pub fn has_words(&self) -> bool {
        self.width > self.indent
    }

    /// Append a word and its trailing separator
    pub fn push_word(&mut self, word: &str, word_width: usize) {
        self.text.push_str(word);
        self.text.push(' ');
        self.width += word_width + 1;
    }

    /// Append the head of a split word and its hyphen
    pub fn push_fragment(&mut self, fragment: &str, fragment_width: usize) {
        self.text.push_str(fragment);
        self.text.push('-');
        self.width += fragment_width + 1;
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_indented() {
        let line = LineBuffer::new(4, 16);
        assert_eq!(line.as_str(), "    ");
        assert_eq!(line.width(), 4);
        assert!(!line.has_words());
    }

    #[test]
    fn test_width_counts_chars() {
        let mut line = LineBuffer::new(0, 16);
        line.push_word("na\u{ef}ve", 5);
        assert_eq!(line.as_str(), "na\u{ef}ve ");
        assert_eq!(line.width(), 6);
        assert!(line.has_words());
    }

    #[test]
    fn test_reset() {
        let mut line = LineBuffer::new(2, 16);
        line.push_fragment("abc", 3);
        assert_eq!(line.as_str(), "  abc-");
        line.reset();
        assert_eq!(line.as_str(), "  ");
        assert_eq!(line.width(), 2);
    }
}
