//! Document-order walker over element and text nodes
//!
//! The walker holds no borrow of the document. Each step computes the
//! successor of the node it returns before returning it, so the caller may
//! split or extend that node and the walk continues with the node that
//! followed it originally.

use super::node::{NodeId, NodeKind};
use super::Document;

/// Lazy, finite, document-order cursor over a subtree
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: NodeId,
    next: Option<NodeId>,
}

impl TreeWalker {
    /// Start a walk over the descendants of `root` (root itself excluded)
    pub fn new(doc: &Document, root: NodeId) -> Self {
        let mut walker = TreeWalker { root, next: None };
        let first = doc
            .first_child(root)
            .and_then(|first| walker.first_visible(doc, first));
        walker.next = first;
        walker
    }

    /// Return the next element or text node
    pub fn next_node(&mut self, doc: &Document) -> Option<NodeId> {
        let current = self.next?;
        let successor = self
            .following(doc, current)
            .and_then(|n| self.first_visible(doc, n));
        self.next = successor;
        Some(current)
    }

    /// The node that would be returned next
    pub fn peek(&self) -> Option<NodeId> {
        self.next
    }

    /// `node` itself if visible, else the next visible node after it
    fn first_visible(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        let mut candidate = Some(node);
        while let Some(id) = candidate {
            if matches!(doc.kind(id), Some(NodeKind::Element | NodeKind::Text)) {
                return Some(id);
            }
            candidate = self.following(doc, id);
        }
        None
    }

    /// Document-order successor of `node`, bounded by the root
    fn following(&self, doc: &Document, node: NodeId) -> Option<NodeId> {
        if let Some(child) = doc.first_child(node) {
            return Some(child);
        }
        let mut current = node;
        loop {
            if current == self.root {
                return None;
            }
            if let Some(next) = doc.next_sibling(current) {
                return Some(next);
            }
            current = doc.parent(current)?;
        }
    }
}
