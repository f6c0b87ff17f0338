//! DOM Module - Arena-based document tree
//!
//! Implements the tree the reflow engine and the EPUB resolver read from:
//! - Arena allocation for nodes and attributes
//! - NodeId (u32) indices for parent/child/sibling links
//! - A preorder `doc_order_next` chain built once parsing completes

mod builder;
pub mod document;
pub mod node;
mod order;

pub use document::{ChildIter, DescendantIter, XmlDocument};
pub use node::{NodeId, NodeKind, XmlAttribute, XmlNode, ROOT};
pub use order::DocOrderIter;
