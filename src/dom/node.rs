//! Document node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

use crate::core::Span;

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// The synthetic document root always lives at index 0
pub const ROOT: NodeId = 0;

/// Type of node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Text content
    Text,
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct XmlNode {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Next node in preorder, set once the tree is complete
    pub doc_order_next: Option<NodeId>,
    /// Tag name (elements only)
    pub name: Span,
    /// Text run (text nodes only)
    pub text: Span,
    /// Start of attributes in attribute arena
    pub attr_start: u32,
    /// Number of attributes
    pub attr_count: u32,
    /// Depth in document tree
    pub depth: u32,
}

impl XmlNode {
    fn new(kind: NodeKind, parent: Option<NodeId>, depth: u32) -> Self {
        XmlNode {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            doc_order_next: None,
            name: Span::empty(),
            text: Span::empty(),
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    /// Create a new document root node
    pub fn document() -> Self {
        Self::new(NodeKind::Document, None, 0)
    }

    /// Create a new element node
    pub fn element(name: Span, parent: NodeId, depth: u32) -> Self {
        XmlNode {
            name,
            ..Self::new(NodeKind::Element, Some(parent), depth)
        }
    }

    /// Create a new text node
    pub fn text(text: Span, parent: NodeId, depth: u32) -> Self {
        XmlNode {
            text,
            ..Self::new(NodeKind::Text, Some(parent), depth)
        }
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a text node
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Check if this node has children
    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Check if this node has attributes
    #[inline]
    pub fn has_attributes(&self) -> bool {
        self.attr_count > 0
    }
}

/// Stored attribute
#[derive(Debug, Clone, Copy)]
pub struct XmlAttribute {
    pub name: Span,
    pub value: Span,
}
