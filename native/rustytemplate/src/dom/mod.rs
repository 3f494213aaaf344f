//! DOM Module - Arena-based mutable markup tree
//!
//! The host tree the template engine works against:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - Detach-only removal so ids stay valid across moves
//! - Lazy document-order walking that tolerates mutation

pub mod document;
pub mod node;
pub mod serialize;
pub mod walker;

pub use document::{Document, ParseOptions};
pub use node::{Attribute, Node, NodeId, NodeKind};
pub use walker::TreeWalker;

/// Read-only structural access, the navigation a tree must offer for addressing
pub trait DocumentAccess {
    /// Get a node by ID
    fn get_node(&self, id: NodeId) -> Option<&Node>;

    /// Get the parent of a node
    fn parent_of(&self, id: NodeId) -> Option<NodeId>;

    /// Get the previous sibling of a node
    fn prev_sibling_of(&self, id: NodeId) -> Option<NodeId>;

    /// Get the next sibling of a node
    fn next_sibling_of(&self, id: NodeId) -> Option<NodeId>;

    /// Get the child at a position, counting every node kind
    fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId>;
}
