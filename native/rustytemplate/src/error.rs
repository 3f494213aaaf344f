//! Error taxonomy for template compilation, instantiation and updates

use crate::dom::NodeId;

/// Errors raised by the template engine and the tree it mutates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// The compiled tree holds a different number of slots than the source has
    /// interpolations. The marker collided with literal text, or the parser
    /// hid or duplicated it.
    #[error("template has {expected} interpolations but {found} slots were found: {template:?}")]
    SlotCountMismatch {
        expected: usize,
        found: usize,
        template: String,
    },

    /// An address was requested for a node outside the given root
    #[error("node {node} is not a descendant of the addressing root")]
    NotDescendant { node: NodeId },

    /// A slot address did not resolve against a fresh clone
    #[error("slot address {address:?} does not resolve against the instance")]
    UnresolvableAddress { address: Vec<usize> },

    /// A non-string value was bound to an attribute slot; recovered by
    /// removing the attribute
    #[error("attribute {name:?} only accepts text or absent values")]
    InvalidAttributeValue { name: String },

    /// The number of values differs from the number of slots
    #[error("template expects {expected} values, got {found}")]
    ValueCountMismatch { expected: usize, found: usize },

    /// Strict-mode structural parse failure
    #[error("parse error at byte {position}: {message}")]
    Parse { message: String, position: usize },

    /// A tree operation was given a node it cannot act on
    #[error("invalid node {node}: {reason}")]
    InvalidNode { node: NodeId, reason: &'static str },

    /// The instance does not consist of exactly one element
    #[error("expected exactly one top-level element, found {found}")]
    NotSingleElement { found: usize },
}
