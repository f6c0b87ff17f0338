//! Tree Builder
//!
//! Consumes tokens and grows the node arena with a cursor on the innermost
//! open element. Arena growth goes through `try_reserve`, so an allocation
//! failure surfaces as [`ParseError::OutOfMemory`] and whatever was built is
//! dropped with the builder.

use super::node::{NodeId, XmlAttribute, XmlNode, ROOT};
use crate::core::{classify_tag, parse_attributes, Tag, TagKind, Token};
use crate::error::ParseError;

/// Arena parts handed over to the document once every token is consumed
pub(crate) struct BuiltTree {
    pub nodes: Vec<XmlNode>,
    pub attributes: Vec<XmlAttribute>,
    pub malformed: Vec<NodeId>,
}

pub(crate) struct TreeBuilder {
    nodes: Vec<XmlNode>,
    attributes: Vec<XmlAttribute>,
    malformed: Vec<NodeId>,
    cursor: NodeId,
}

impl TreeBuilder {
    pub fn new() -> Result<Self, ParseError> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve(64)
            .map_err(|_| ParseError::OutOfMemory)?;
        nodes.push(XmlNode::document());

        Ok(TreeBuilder {
            nodes,
            attributes: Vec::new(),
            malformed: Vec::new(),
            cursor: ROOT,
        })
    }

    /// Apply one token: the tag first, then its trailing text under
    /// whatever node is open afterwards.
    pub fn push(&mut self, input: &str, token: Token) -> Result<(), ParseError> {
        let bytes = input.as_bytes();
        let tag = classify_tag(bytes, token.tag);

        match tag.kind {
            TagKind::Skip => {}
            TagKind::End => self.close(input, &tag, token.tag.start.saturating_sub(1))?,
            TagKind::SelfClosing => {
                self.append_element(bytes, &tag)?;
            }
            TagKind::Open => {
                self.cursor = self.append_element(bytes, &tag)?;
            }
        }

        if let Some(text) = token.text {
            let depth = self.nodes[self.cursor as usize].depth + 1;
            self.append(XmlNode::text(text, self.cursor, depth))?;
        }

        Ok(())
    }

    pub fn finish(self, input: &str) -> BuiltTree {
        if self.cursor != ROOT {
            let name = self.nodes[self.cursor as usize].name.as_str(input);
            tracing::debug!(element = name, "closing elements left open at end of input");
        }

        BuiltTree {
            nodes: self.nodes,
            attributes: self.attributes,
            malformed: self.malformed,
        }
    }

    fn close(&mut self, input: &str, tag: &Tag, position: usize) -> Result<(), ParseError> {
        let open = &self.nodes[self.cursor as usize];
        let found = tag.name.as_str(input);

        if self.cursor != ROOT && open.name.as_str(input) == found {
            self.cursor = open.parent.unwrap_or(ROOT);
            return Ok(());
        }

        let expected = (self.cursor != ROOT).then(|| open.name.as_str(input).to_string());
        Err(ParseError::UnbalancedTags {
            expected,
            found: found.to_string(),
            position,
        })
    }

    fn append_element(&mut self, input: &[u8], tag: &Tag) -> Result<NodeId, ParseError> {
        let depth = self.nodes[self.cursor as usize].depth + 1;
        let mut node = XmlNode::element(tag.name, self.cursor, depth);

        if !tag.attributes.is_empty() {
            match parse_attributes(input, tag.attributes) {
                Ok(attrs) => {
                    self.attributes
                        .try_reserve(attrs.len())
                        .map_err(|_| ParseError::OutOfMemory)?;
                    node.attr_start = arena_index(self.attributes.len())?;
                    node.attr_count = arena_index(attrs.len())?;
                    self.attributes.extend(attrs.into_iter().map(|a| XmlAttribute {
                        name: a.name,
                        value: a.value,
                    }));
                }
                Err(err) => {
                    tracing::warn!(
                        element = %String::from_utf8_lossy(tag.name.slice(input)),
                        "{err}; dropping attributes"
                    );
                    self.malformed
                        .try_reserve(1)
                        .map_err(|_| ParseError::OutOfMemory)?;
                    self.malformed.push(arena_index(self.nodes.len())?);
                }
            }
        }

        self.append(node)
    }

    /// Push a node and link it as the last child of its parent
    fn append(&mut self, node: XmlNode) -> Result<NodeId, ParseError> {
        self.nodes
            .try_reserve(1)
            .map_err(|_| ParseError::OutOfMemory)?;

        let parent_id = node.parent.unwrap_or(ROOT);
        let node_id = arena_index(self.nodes.len())?;
        self.nodes.push(node);
        self.link_child(parent_id, node_id);
        Ok(node_id)
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Get parent's last_child first to avoid borrow issues
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }
}

#[inline]
fn arena_index(len: usize) -> Result<u32, ParseError> {
    u32::try_from(len).map_err(|_| ParseError::OutOfMemory)
}
