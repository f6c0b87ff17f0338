//! Document-order index
//!
//! After the tree is complete every node gets a `doc_order_next` link to its
//! preorder successor, so consumers walk the whole document linearly with no
//! recursion and no explicit stack.

use super::document::XmlDocument;
use super::node::{NodeId, ROOT};

impl XmlDocument {
    /// Thread the preorder chain through every node, starting at the root.
    pub(super) fn link_doc_order(&mut self) {
        let mut cur = ROOT;
        loop {
            let next = self.preorder_successor(cur);
            self.nodes_mut()[cur as usize].doc_order_next = next;
            match next {
                Some(id) => cur = id,
                None => break,
            }
        }
    }

    /// First child if any, otherwise the next sibling of the nearest
    /// ancestor-or-self that has one.
    fn preorder_successor(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get_node(id)?;
        if let Some(child) = node.first_child {
            return Some(child);
        }

        let mut cur = node;
        loop {
            if let Some(sibling) = cur.next_sibling {
                return Some(sibling);
            }
            cur = self.get_node(cur.parent?)?;
        }
    }

    /// Walk every node in document order, starting at the root
    pub fn doc_order(&self) -> DocOrderIter<'_> {
        self.doc_order_from(ROOT)
    }

    /// Walk the document-order chain starting at `id`
    pub fn doc_order_from(&self, id: NodeId) -> DocOrderIter<'_> {
        DocOrderIter {
            doc: self,
            next: self.get_node(id).map(|_| id),
        }
    }
}

/// Iterator following `doc_order_next` links
pub struct DocOrderIter<'d> {
    doc: &'d XmlDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for DocOrderIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.doc_order_next);
        Some(current)
    }
}
