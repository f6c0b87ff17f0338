//! Document - arena-based markup tree
//!
//! Storage with:
//! - Arena allocation for nodes and attributes
//! - NodeId indices for traversal
//! - Zero-copy names, values and text via spans into the owned input

use std::fs;
use std::path::Path;

use super::builder::TreeBuilder;
use super::node::{NodeId, NodeKind, XmlAttribute, XmlNode, ROOT};
use crate::core::{encoding, Tokenizer};
use crate::error::ParseError;

/// A parsed document. Owns its normalized input, so node handles never
/// outlive the text they point into.
#[derive(Debug)]
pub struct XmlDocument {
    /// Normalized input (whitespace rewritten to spaces)
    input: String,
    /// Arena of nodes, index 0 is the document root
    nodes: Vec<XmlNode>,
    /// Arena of attributes
    attributes: Vec<XmlAttribute>,
    /// Elements whose attribute region failed to parse
    malformed: Vec<NodeId>,
}

impl XmlDocument {
    /// Parse a document from raw bytes
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        let input = encoding::decode(input)?;

        let mut builder = TreeBuilder::new()?;
        for token in Tokenizer::new(input.as_bytes()) {
            builder.push(&input, token?)?;
        }
        let tree = builder.finish(&input);

        let mut doc = XmlDocument {
            input,
            nodes: tree.nodes,
            attributes: tree.attributes,
            malformed: tree.malformed,
        };
        doc.link_doc_order();

        tracing::debug!(nodes = doc.nodes.len(), "parsed document");
        Ok(doc)
    }

    /// Read and parse a document from disk
    pub fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        Ok(Self::parse(&bytes)?)
    }

    /// Get the document root node ID
    #[inline]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Get a node by ID
    #[inline]
    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    /// Get node name, `None` for text and the document root
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        node.is_element().then(|| node.name.as_str(&self.input))
    }

    /// Check whether a node is an element with the given name
    #[inline]
    pub fn is_named(&self, id: NodeId, name: &str) -> bool {
        self.node_name(id) == Some(name)
    }

    /// Get text content of a text node
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        node.is_text().then(|| node.text.as_str(&self.input))
    }

    /// Get the kind of a node
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.get_node(id).map(|n| n.kind)
    }

    /// Get the parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.parent
    }

    /// Get attributes for an element
    fn attribute_slice(&self, id: NodeId) -> &[XmlAttribute] {
        match self.get_node(id) {
            Some(node) => {
                let start = node.attr_start as usize;
                let end = start + node.attr_count as usize;
                self.attributes.get(start..end).unwrap_or(&[])
            }
            None => &[],
        }
    }

    /// Iterate `(key, value)` pairs of an element in source order
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attribute_slice(id)
            .iter()
            .map(|a| (a.name.as_str(&self.input), a.value.as_str(&self.input)))
    }

    /// Get attribute value by name; the first match wins.
    ///
    /// `Some("")` means the attribute is present with an empty value.
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id).find(|(k, _)| *k == name).map(|(_, v)| v)
    }

    /// Elements whose attributes were dropped because they did not parse
    pub fn malformed_attributes(&self) -> &[NodeId] {
        &self.malformed
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// First child element with the given name
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).find(|&c| self.is_named(c, name))
    }

    /// Iterate over all descendants of a node, depth-first
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        // Initialize stack with all children in reverse order (so first is processed first)
        let mut stack = Vec::new();
        if let Some(node) = self.get_node(id) {
            let mut child_id = node.last_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.get_node(cid).and_then(|n| n.prev_sibling);
            }
        }
        DescendantIter { doc: self, stack }
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the normalized input
    pub fn input(&self) -> &str {
        &self.input
    }

    pub(super) fn nodes_mut(&mut self) -> &mut [XmlNode] {
        &mut self.nodes
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d> {
    doc: &'d XmlDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'d> {
    doc: &'d XmlDocument,
    stack: Vec<NodeId>,
}

impl<'d> Iterator for DescendantIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Add children to stack in reverse order (so first child is processed first)
        if let Some(node) = self.doc.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.get_node(id).and_then(|n| n.prev_sibling);
            }
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = XmlDocument::parse(b"<root>hello</root>").unwrap();
        let root = doc.children(doc.root()).next().unwrap();
        assert_eq!(doc.node_name(root), Some("root"));
        let text = doc.children(root).next().unwrap();
        assert_eq!(doc.text_content(text), Some("hello"));
        assert_eq!(doc.node_name(text), None);
    }

    #[test]
    fn test_parse_nested() {
        let doc = XmlDocument::parse(b"<a><b><c/></b></a>").unwrap();
        let a = doc.find_child(doc.root(), "a").unwrap();
        let children: Vec<_> = doc.children(a).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.parent(children[0]), Some(a));
    }

    #[test]
    fn test_descendants() {
        let doc = XmlDocument::parse(b"<root><a/><b><c/></b></root>").unwrap();
        let root = doc.find_child(doc.root(), "root").unwrap();
        let names: Vec<_> = doc
            .descendants(root)
            .filter_map(|id| doc.node_name(id))
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_siblings() {
        let doc = XmlDocument::parse(b"<root><a/><b/><c/></root>").unwrap();
        let root = doc.find_child(doc.root(), "root").unwrap();
        let children: Vec<_> = doc.children(root).collect();
        assert_eq!(children.len(), 3);

        let first = doc.get_node(children[0]).unwrap();
        assert!(first.prev_sibling.is_none());
        assert_eq!(first.next_sibling, Some(children[1]));
        let last = doc.get_node(children[2]).unwrap();
        assert_eq!(last.prev_sibling, Some(children[1]));
        assert!(last.next_sibling.is_none());
    }

    #[test]
    fn test_get_attribute() {
        let doc = XmlDocument::parse(
            b"<item id=\"c1\" href=\"text/ch1.xhtml\" media-type=\"\" id=\"dup\"/>",
        )
        .unwrap();
        let item = doc.find_child(doc.root(), "item").unwrap();
        assert_eq!(doc.get_attribute(item, "id"), Some("c1"));
        assert_eq!(doc.get_attribute(item, "href"), Some("text/ch1.xhtml"));
        assert_eq!(doc.get_attribute(item, "media-type"), Some(""));
        assert_eq!(doc.get_attribute(item, "missing"), None);
        assert_eq!(doc.attributes(item).count(), 4);
    }

    #[test]
    fn test_attribute_on_text_node() {
        let doc = XmlDocument::parse(b"<p>x</p>").unwrap();
        let p = doc.find_child(doc.root(), "p").unwrap();
        let text = doc.children(p).next().unwrap();
        assert_eq!(doc.get_attribute(text, "id"), None);
    }

    #[test]
    fn test_whitespace_normalized_in_text() {
        let doc = XmlDocument::parse(b"<p>a\tb\nc</p>").unwrap();
        let p = doc.find_child(doc.root(), "p").unwrap();
        let text = doc.children(p).next().unwrap();
        assert_eq!(doc.text_content(text), Some("a b c"));
    }

    #[test]
    fn test_prolog_and_comments_skipped() {
        let doc = XmlDocument::parse(
            b"<?xml version=\"1.0\"?>\n<!DOCTYPE html>\n<!-- c --><html><body/></html>",
        )
        .unwrap();
        let top: Vec<_> = doc.children(doc.root()).collect();
        assert_eq!(top.len(), 1);
        assert_eq!(doc.node_name(top[0]), Some("html"));
    }

    #[test]
    fn test_unbalanced_yields_no_tree() {
        assert!(matches!(
            XmlDocument::parse(b"<p>text</div>"),
            Err(ParseError::UnbalancedTags { .. })
        ));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            XmlDocument::parse(b"<p>text</p"),
            Err(ParseError::MalformedDocument { position: 7 })
        ));
    }

    #[test]
    fn test_malformed_attributes_reported() {
        let doc = XmlDocument::parse(b"<p class=oops>text</p>").unwrap();
        let p = doc.find_child(doc.root(), "p").unwrap();
        assert_eq!(doc.malformed_attributes(), &[p]);
        assert_eq!(doc.attributes(p).count(), 0);
    }

    #[test]
    fn test_unclosed_elements_accepted() {
        let doc = XmlDocument::parse(b"<html><body><p>open").unwrap();
        assert_eq!(doc.node_count(), 5);
    }

    #[test]
    fn test_empty_input() {
        let doc = XmlDocument::parse(b"").unwrap();
        assert_eq!(doc.node_count(), 1);
        assert_eq!(doc.kind(doc.root()), Some(NodeKind::Document));
    }
}
