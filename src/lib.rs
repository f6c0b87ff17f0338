//! ebread - EPUB to plain text
//!
//! Layers:
//! core: byte-level tokenizing of a lenient markup subset
//! dom: arena tree with a document-order chain
//! reflow: word wrapping, paragraph grouping and hyphenation
//! epub: archive extraction, rootfile and spine resolution
//! output, config, driver: the command-line run

pub mod config;
pub mod core;
pub mod dom;
pub mod driver;
pub mod epub;
pub mod error;
pub mod output;
pub mod reflow;

pub use dom::XmlDocument;
pub use error::{EpubError, Error, ParseError, Result};
pub use reflow::{reflow, reflow_to_string, ReflowOptions};
