//! Core markup parsing primitives
//!
//! The fundamental building blocks below the document tree:
//! - Encoding: BOM / UTF-16 detection and conversion to UTF-8
//! - Scanner: whitespace normalization and memchr delimiter search
//! - Span: (start, end) ranges into the normalized input
//! - Tokenizer: splits input into (tag, trailing text) pairs
//! - Attributes: tag classification and `key="value"` parsing

pub mod attributes;
pub mod encoding;
pub mod scanner;
pub mod span;
pub mod tokenizer;

pub use attributes::{classify_tag, parse_attributes, Attribute, Tag, TagKind};
pub use span::Span;
pub use tokenizer::{Token, Tokenizer};
