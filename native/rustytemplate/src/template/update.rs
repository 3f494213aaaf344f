//! Update Rule
//!
//! Binds one value to one slot anchor. Used by instantiation for the initial
//! values and by slot handles for every later update.
//!
//! A node slot's region is never cached: it is walked fresh from the live
//! sibling links on each call, so nodes that outside code added to or
//! removed from the region are picked up.

use tracing::{trace, warn};

use super::instance::SlotAnchor;
use crate::dom::{Document, NodeId, NodeKind};
use crate::error::TemplateError;

/// A value that can be bound to a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Literal text, never parsed as markup
    Text(String),
    /// A node of the instance's document; fragments are drained on insert
    Node(NodeId),
    Null,
    Undefined,
    False,
}

impl Value {
    pub fn node(id: NodeId) -> Self {
        Value::Node(id)
    }

    /// Null, undefined and false all clear a slot
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined | Value::False)
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Node(_) => "node",
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::False => "false",
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

/// Apply `value` to `anchor`, mutating `doc`
pub fn apply_update(
    doc: &mut Document,
    anchor: &SlotAnchor,
    value: Value,
) -> Result<(), TemplateError> {
    trace!(slot = ?anchor.kind(), value = value.kind_name(), "applying update");

    match anchor {
        SlotAnchor::Attribute { element, name } => {
            update_attribute(doc, *element, name, value)
        }
        SlotAnchor::Node { before, after } => update_region(doc, *before, *after, value),
    }
}

fn update_attribute(
    doc: &mut Document,
    element: NodeId,
    name: &str,
    value: Value,
) -> Result<(), TemplateError> {
    match value {
        Value::Text(text) => doc.set_attribute(element, name, &text),
        Value::Node(_) => {
            let err = TemplateError::InvalidAttributeValue {
                name: name.to_string(),
            };
            warn!(attribute = name, "{err}; removing attribute");
            doc.remove_attribute(element, name);
            Ok(())
        }
        Value::Null | Value::Undefined | Value::False => {
            doc.remove_attribute(element, name);
            Ok(())
        }
    }
}

fn update_region(
    doc: &mut Document,
    before: Option<NodeId>,
    after: NodeId,
    value: Value,
) -> Result<(), TemplateError> {
    let region = region_nodes(doc, before, after);

    let keep = match value {
        Value::Text(text) => {
            let existing = region
                .iter()
                .copied()
                .find(|&id| doc.kind(id) == Some(NodeKind::Text));
            match existing {
                Some(id) => {
                    if doc.text(id) != Some(text.as_str()) {
                        doc.set_text(id, &text)?;
                    }
                    Some(id)
                }
                None => {
                    let id = doc.create_text(&text);
                    doc.insert_before(after, id)?;
                    Some(id)
                }
            }
        }
        Value::Node(node) => {
            if node == after || before == Some(node) {
                return Err(TemplateError::InvalidNode {
                    node,
                    reason: "a slot boundary cannot be its own content",
                });
            }
            if !region.contains(&node) {
                doc.insert_before(after, node)?;
            }
            Some(node)
        }
        Value::Null | Value::Undefined | Value::False => None,
    };

    for id in region {
        if Some(id) != keep {
            doc.remove(id);
        }
    }
    Ok(())
}

/// Nodes currently between a node anchor's boundaries, in document order
pub(crate) fn region_nodes(doc: &Document, before: Option<NodeId>, after: NodeId) -> Vec<NodeId> {
    let mut region = Vec::new();

    match before {
        Some(start) => {
            let mut current = doc.next_sibling(start);
            while let Some(id) = current {
                if id == after {
                    break;
                }
                region.push(id);
                current = doc.next_sibling(id);
            }
        }
        None => {
            let mut current = doc.prev_sibling(after);
            while let Some(id) = current {
                region.push(id);
                current = doc.prev_sibling(id);
            }
            region.reverse();
        }
    }

    region
}
