//! Paragraph grouping
//!
//! Text runs are grouped by their nearest block/text-bearing ancestor; a
//! change of owner between two runs is a paragraph break.

use crate::dom::{NodeId, XmlDocument};

/// Tags that own a paragraph of text
pub const PARAGRAPH_TAGS: &[&str] = &[
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "td", "li", "div", "span", "title",
];

#[inline]
pub fn is_paragraph_tag(name: &str) -> bool {
    PARAGRAPH_TAGS.contains(&name)
}

/// Nearest node, starting at `id` itself, whose name is a paragraph tag
pub fn paragraph_owner(doc: &XmlDocument, id: NodeId) -> Option<NodeId> {
    let mut cur = Some(id);
    while let Some(node) = cur {
        if doc.node_name(node).is_some_and(is_paragraph_tag) {
            return Some(node);
        }
        cur = doc.parent(node);
    }
    None
}
