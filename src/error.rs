//! Error types
//!
//! Parse errors are structural (the whole document is rejected) except
//! `MalformedAttributes`, which the tree builder downgrades to a warning on
//! the one node that carried it.

use std::io;
use thiserror::Error;

/// Crate-wide result type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning markup bytes into a document tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `<` with no closing `>` before the next `<` or end of input
    #[error("malformed document: unterminated tag at byte {position}")]
    MalformedDocument { position: usize },

    /// The attribute region of a single tag could not be parsed
    #[error("malformed attributes at byte {position}: {reason}")]
    MalformedAttributes {
        position: usize,
        reason: &'static str,
    },

    /// An end tag that does not close the innermost open element
    #[error("unbalanced tags at byte {position}: expected </{}>, found </{found}>", .expected.as_deref().unwrap_or(""))]
    UnbalancedTags {
        expected: Option<String>,
        found: String,
        position: usize,
    },

    /// The node or attribute arena could not grow
    #[error("out of memory while building document tree")]
    OutOfMemory,

    /// Input claimed a UTF-16 encoding but did not decode
    #[error("invalid encoding: {0}")]
    Encoding(String),
}

/// Errors raised while resolving an EPUB package
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EpubError {
    #[error("could not find rootfile in {0}")]
    MissingRootfile(String),

    #[error("package document does not contain a manifest")]
    MissingManifest,

    #[error("package document does not contain a spine")]
    MissingSpine,

    #[error("found no items in the package spine")]
    EmptySpine,
}

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Epub(#[from] EpubError),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid reflow options: {0}")]
    InvalidOptions(String),

    #[error("invalid output name {0:?}: file names cannot contain '/'")]
    InvalidName(String),
}
