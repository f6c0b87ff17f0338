//! Input Encoding Detection and Conversion
//!
//! Handles detection of UTF-16 based on BOM or byte patterns and converts
//! everything to a UTF-8 `String` ready for tokenizing. Whitespace is
//! normalized here, before any span is computed.

use super::scanner::normalize_whitespace;
use crate::error::ParseError;

/// Detected encoding of markup input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl Encoding {
    /// Detect encoding from byte order mark or initial bytes
    pub fn detect(input: &[u8]) -> Self {
        if input.len() < 2 {
            return Encoding::Utf8;
        }

        match (input[0], input[1]) {
            // UTF-16 LE BOM: 0xFF 0xFE
            (0xFF, 0xFE) => Encoding::Utf16Le,
            // UTF-16 BE BOM: 0xFE 0xFF
            (0xFE, 0xFF) => Encoding::Utf16Be,
            // No BOM - check for UTF-16 pattern (< followed by null or null followed by <)
            (0x00, b'<') => Encoding::Utf16Be,
            (b'<', 0x00) => Encoding::Utf16Le,
            _ => Encoding::Utf8,
        }
    }
}

/// Decode raw document bytes into normalized UTF-8 text.
///
/// UTF-8 input with invalid sequences is decoded lossily (U+FFFD); UTF-16
/// input that does not decode is an error.
pub fn decode(input: &[u8]) -> Result<String, ParseError> {
    let mut bytes = match Encoding::detect(input) {
        Encoding::Utf8 => input.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(input).to_vec(),
        Encoding::Utf16Le => utf16_to_utf8(input, &[0xFF, 0xFE], u16::from_le_bytes)?,
        Encoding::Utf16Be => utf16_to_utf8(input, &[0xFE, 0xFF], u16::from_be_bytes)?,
    };

    normalize_whitespace(&mut bytes);

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            tracing::debug!("input is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(err.as_bytes()).into_owned()
        }
    })
}

fn utf16_to_utf8(
    input: &[u8],
    bom: &[u8; 2],
    to_unit: fn([u8; 2]) -> u16,
) -> Result<Vec<u8>, ParseError> {
    let bytes = input.strip_prefix(bom).unwrap_or(input);

    if bytes.len() % 2 != 0 {
        return Err(ParseError::Encoding(
            "odd number of bytes in UTF-16 input".to_string(),
        ));
    }

    let code_units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|chunk| to_unit([chunk[0], chunk[1]]))
        .collect();

    String::from_utf16(&code_units)
        .map(String::into_bytes)
        .map_err(|e| ParseError::Encoding(e.to_string()))
}
