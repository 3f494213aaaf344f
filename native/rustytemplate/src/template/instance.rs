//! Instantiation Engine
//!
//! Clones a compiled template into the caller's document, resolves every
//! slot address against the clone, then applies the values in slot order.
//! All anchors are resolved before the first value is applied; applying a
//! value moves nodes, which would shift the addresses of later slots.

use super::address::resolve;
use super::compiler::{CompiledTemplate, SlotDescriptor, SlotKind};
use super::update::{apply_update, region_nodes, Value};
use crate::core::scanner::is_whitespace;
use crate::dom::{Document, NodeId, NodeKind};
use crate::error::TemplateError;

/// Live, clone-specific position of one slot
///
/// Anchors are plain views over the document. Cloning one and updating
/// through the copy acts on the same nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAnchor {
    /// Region between two siblings. `after` is always a boundary node;
    /// `before` is absent when the region starts at the first child.
    Node {
        before: Option<NodeId>,
        after: NodeId,
    },
    /// Whole value of one attribute
    Attribute { element: NodeId, name: String },
}

impl SlotAnchor {
    pub fn kind(&self) -> SlotKind {
        match self {
            SlotAnchor::Node { .. } => SlotKind::Node,
            SlotAnchor::Attribute { .. } => SlotKind::Attribute,
        }
    }

    /// Bind a new value to this slot
    pub fn update(&self, doc: &mut Document, value: impl Into<Value>) -> Result<(), TemplateError> {
        apply_update(doc, self, value.into())
    }

    /// Nodes currently in the region; always empty for attribute slots
    pub fn region(&self, doc: &Document) -> Vec<NodeId> {
        match self {
            SlotAnchor::Node { before, after } => region_nodes(doc, *before, *after),
            SlotAnchor::Attribute { .. } => Vec::new(),
        }
    }

    /// Owning element of an attribute slot
    pub fn element(&self) -> Option<NodeId> {
        match self {
            SlotAnchor::Attribute { element, .. } => Some(*element),
            SlotAnchor::Node { .. } => None,
        }
    }

    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            SlotAnchor::Attribute { name, .. } => Some(name),
            SlotAnchor::Node { .. } => None,
        }
    }
}

/// One instantiation of a compiled template
#[derive(Debug, Clone)]
pub struct Instance {
    root: NodeId,
    slots: Vec<SlotAnchor>,
}

impl Instance {
    /// Fragment holding the instance's top-level nodes
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Anchors in interpolation order
    pub fn slots(&self) -> &[SlotAnchor] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&SlotAnchor> {
        self.slots.get(index)
    }

    pub fn node_slots(&self) -> impl Iterator<Item = &SlotAnchor> {
        self.slots.iter().filter(|s| s.kind() == SlotKind::Node)
    }

    pub fn attribute_slots(&self) -> impl Iterator<Item = &SlotAnchor> {
        self.slots.iter().filter(|s| s.kind() == SlotKind::Attribute)
    }

    /// The sole top-level element
    ///
    /// Whitespace-only text and boundaries are ignored. Anything else next to
    /// the element, or no element at all, is `NotSingleElement`.
    pub fn single_element(&self, doc: &Document) -> Result<NodeId, TemplateError> {
        let significant: Vec<NodeId> = doc
            .content_children(self.root)
            .into_iter()
            .filter(|&id| match doc.kind(id) {
                Some(NodeKind::Text) => !doc
                    .text(id)
                    .unwrap_or_default()
                    .bytes()
                    .all(is_whitespace),
                _ => true,
            })
            .collect();

        match significant.as_slice() {
            [only] if doc.kind(*only) == Some(NodeKind::Element) => Ok(*only),
            other => Err(TemplateError::NotSingleElement { found: other.len() }),
        }
    }

    pub fn to_markup(&self, doc: &Document) -> String {
        doc.to_markup(self.root)
    }

    /// Move the top-level nodes under `parent`
    ///
    /// The root fragment is drained. A node slot that opened the fragment has
    /// no `before` sibling; it is pinned to the parent's current last child
    /// so its region does not reach back over the parent's existing children.
    pub fn mount(&mut self, doc: &mut Document, parent: NodeId) -> Result<(), TemplateError> {
        let root = self.root;
        let last = doc.last_child(parent);

        let leading: Vec<&mut Option<NodeId>> = self
            .slots
            .iter_mut()
            .filter_map(|slot| match slot {
                SlotAnchor::Node { before, after }
                    if before.is_none() && doc.parent(*after) == Some(root) =>
                {
                    Some(before)
                }
                _ => None,
            })
            .collect();

        doc.append_child(parent, root)?;
        for before in leading {
            *before = last;
        }
        Ok(())
    }
}

/// Clone `template` into `doc` and bind `values` to its slots
pub fn instantiate(
    template: &CompiledTemplate,
    doc: &mut Document,
    values: Vec<Value>,
) -> Result<Instance, TemplateError> {
    if values.len() != template.slot_count() {
        return Err(TemplateError::ValueCountMismatch {
            expected: template.slot_count(),
            found: values.len(),
        });
    }

    let root = doc.import(template.document(), template.root())?;

    let slots = template
        .slots()
        .iter()
        .map(|descriptor| resolve_anchor(doc, root, descriptor))
        .collect::<Result<Vec<_>, TemplateError>>()?;

    for (anchor, value) in slots.iter().zip(values) {
        apply_update(doc, anchor, value)?;
    }

    Ok(Instance { root, slots })
}

fn resolve_anchor(
    doc: &Document,
    root: NodeId,
    descriptor: &SlotDescriptor,
) -> Result<SlotAnchor, TemplateError> {
    let unresolvable = || TemplateError::UnresolvableAddress {
        address: descriptor.address().to_vec(),
    };
    let target = resolve(doc, root, descriptor.address()).ok_or_else(unresolvable)?;

    match descriptor {
        SlotDescriptor::Node { .. } => {
            let after = doc
                .next_sibling(target)
                .filter(|&id| doc.kind(id) == Some(NodeKind::Boundary))
                .ok_or_else(unresolvable)?;
            Ok(SlotAnchor::Node {
                before: doc.prev_sibling(target),
                after,
            })
        }
        SlotDescriptor::Attribute { name, .. } => {
            if doc.kind(target) != Some(NodeKind::Element) {
                return Err(unresolvable());
            }
            Ok(SlotAnchor::Attribute {
                element: target,
                name: name.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::compiler::compile;

    #[test]
    fn test_text_in_paragraph() {
        let template = compile(&["<p>", "</p>"]).unwrap();
        let mut doc = Document::new();
        let instance = instantiate(&template, &mut doc, vec!["hello".into()]).unwrap();

        let p = instance.single_element(&doc).unwrap();
        assert_eq!(doc.name(p), Some("p"));
        let kids = doc.content_children(p);
        assert_eq!(kids.len(), 1);
        assert_eq!(doc.kind(kids[0]), Some(NodeKind::Text));
        assert_eq!(doc.text(kids[0]), Some("hello"));
        assert_eq!(instance.to_markup(&doc), "<p>hello</p>");
    }

    #[test]
    fn test_null_then_node_in_list() {
        let template = compile(&["<ul>", "</ul>"]).unwrap();
        let mut doc = Document::new();
        let instance = instantiate(&template, &mut doc, vec![Value::Null]).unwrap();

        let ul = instance.single_element(&doc).unwrap();
        assert!(doc.content_children(ul).is_empty());
        let slot = instance.slot(0).expect("slot");
        assert_eq!(slot.kind(), SlotKind::Node);
        assert!(slot.region(&doc).is_empty());

        let li = doc.create_element("li");
        slot.update(&mut doc, Value::node(li)).unwrap();
        assert_eq!(doc.parent(li), Some(ul));
        assert_eq!(doc.content_children(ul), vec![li]);
        assert_eq!(instance.to_markup(&doc), "<ul><li></li></ul>");
    }

    #[test]
    fn test_attribute_then_false() {
        let template = compile(&["<div class=\"", "\">"]).unwrap();
        let mut doc = Document::new();
        let instance = instantiate(&template, &mut doc, vec!["x".into()]).unwrap();

        let div = instance.single_element(&doc).unwrap();
        assert_eq!(doc.attribute(div, "class"), Some("x"));

        let slot = instance.attribute_slots().next().expect("attribute slot");
        assert_eq!(slot.element(), Some(div));
        assert_eq!(slot.attribute_name(), Some("class"));
        slot.update(&mut doc, Value::False).unwrap();
        assert_eq!(doc.attribute(div, "class"), None);
    }

    #[test]
    fn test_instances_are_independent() {
        let template = compile(&["<b>", "</b>"]).unwrap();
        let mut doc = Document::new();
        let first = instantiate(&template, &mut doc, vec!["one".into()]).unwrap();
        let second = instantiate(&template, &mut doc, vec!["two".into()]).unwrap();

        first.slots()[0].update(&mut doc, "changed").unwrap();
        assert_eq!(first.to_markup(&doc), "<b>changed</b>");
        assert_eq!(second.to_markup(&doc), "<b>two</b>");

        // The compiled tree itself is untouched
        assert_eq!(
            template.document().to_markup(template.root()),
            "<b></b>"
        );
    }

    #[test]
    fn test_value_count_mismatch() {
        let template = compile(&["<p>", "", "</p>"]).unwrap();
        let mut doc = Document::new();
        let err = instantiate(&template, &mut doc, vec!["a".into()]).unwrap_err();
        assert_eq!(
            err,
            TemplateError::ValueCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_adjacent_slots_keep_separate_regions() {
        let template = compile(&["<p>", "", "</p>"]).unwrap();
        let mut doc = Document::new();
        let instance =
            instantiate(&template, &mut doc, vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(instance.to_markup(&doc), "<p>ab</p>");

        instance.slots()[0].update(&mut doc, Value::Null).unwrap();
        assert_eq!(instance.to_markup(&doc), "<p>b</p>");
        instance.slots()[0].update(&mut doc, "A").unwrap();
        instance.slots()[1].update(&mut doc, "B").unwrap();
        assert_eq!(instance.to_markup(&doc), "<p>AB</p>");
    }

    #[test]
    fn test_first_child_slot_has_no_before() {
        let template = compile(&["<ul>", "<li>last</li></ul>"]).unwrap();
        let mut doc = Document::new();
        let instance = instantiate(&template, &mut doc, vec![Value::Undefined]).unwrap();

        let SlotAnchor::Node { before, .. } = instance.slots()[0] else {
            panic!("expected a node slot");
        };
        // The placeholder was the first child when the anchor was resolved
        assert_eq!(before, None);

        let frag = doc.parse_fragment("<li>1</li><li>2</li>");
        instance.slots()[0].update(&mut doc, Value::node(frag)).unwrap();
        assert_eq!(
            instance.to_markup(&doc),
            "<ul><li>1</li><li>2</li><li>last</li></ul>"
        );
    }

    #[test]
    fn test_partitioned_slots_keep_order() {
        let template = compile(&["<a href=\"", "\">", "</a><i title=\"", "\"></i>"]).unwrap();
        let mut doc = Document::new();
        let values = vec!["/x".into(), "link".into(), Value::Null];
        let instance = instantiate(&template, &mut doc, values).unwrap();

        assert_eq!(instance.node_slots().count(), 1);
        let names: Vec<_> = instance
            .attribute_slots()
            .filter_map(SlotAnchor::attribute_name)
            .collect();
        assert_eq!(names, vec!["href", "title"]);
        assert_eq!(instance.slots()[1].kind(), SlotKind::Node);
        assert_eq!(instance.to_markup(&doc), "<a href=\"/x\">link</a><i></i>");
    }

    #[test]
    fn test_single_element_rejects_siblings() {
        let template = compile(&["<p>a</p><p>", "</p>"]).unwrap();
        let mut doc = Document::new();
        let instance = instantiate(&template, &mut doc, vec!["b".into()]).unwrap();
        assert_eq!(
            instance.single_element(&doc),
            Err(TemplateError::NotSingleElement { found: 2 })
        );

        let padded = compile(&["\n  <p>", "</p>\n"]).unwrap();
        let instance = instantiate(&padded, &mut doc, vec!["c".into()]).unwrap();
        assert!(instance.single_element(&doc).is_ok());

        let bare = compile(&["", ""]).unwrap();
        let instance = instantiate(&bare, &mut doc, vec!["text".into()]).unwrap();
        assert_eq!(
            instance.single_element(&doc),
            Err(TemplateError::NotSingleElement { found: 1 })
        );
    }

    #[test]
    fn test_mount_keeps_anchors_live() {
        let template = compile(&["<li>", "</li>"]).unwrap();
        let mut doc = Document::new();
        let list = doc.create_element("ol");
        let mut instance = instantiate(&template, &mut doc, vec!["one".into()]).unwrap();

        instance.mount(&mut doc, list).unwrap();
        assert_eq!(doc.first_child(instance.root()), None);
        assert_eq!(doc.to_markup(list), "<ol><li>one</li></ol>");

        instance.slots()[0].update(&mut doc, "uno").unwrap();
        assert_eq!(doc.to_markup(list), "<ol><li>uno</li></ol>");
    }

    #[test]
    fn test_mount_leading_slot_spares_existing_children() {
        let template = compile(&["", "<b>x</b>"]).unwrap();
        let mut doc = Document::new();
        let div = doc.parse_fragment("<div><i>keep</i></div>");
        let div = doc.first_child(div).expect("div");
        let mut instance = instantiate(&template, &mut doc, vec!["a".into()]).unwrap();

        instance.mount(&mut doc, div).unwrap();
        assert_eq!(doc.to_markup(div), "<div><i>keep</i>a<b>x</b></div>");
        assert_eq!(instance.slots()[0].region(&doc).len(), 1);

        instance.slots()[0].update(&mut doc, Value::Null).unwrap();
        assert_eq!(doc.to_markup(div), "<div><i>keep</i><b>x</b></div>");

        instance.slots()[0].update(&mut doc, "b").unwrap();
        assert_eq!(doc.to_markup(div), "<div><i>keep</i>b<b>x</b></div>");
    }

    #[test]
    fn test_mount_into_empty_parent_keeps_open_start() {
        let template = compile(&["", "<b>x</b>"]).unwrap();
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let mut instance = instantiate(&template, &mut doc, vec!["a".into()]).unwrap();

        instance.mount(&mut doc, div).unwrap();
        let SlotAnchor::Node { before, .. } = instance.slots()[0] else {
            panic!("expected a node slot");
        };
        assert_eq!(before, None);
        instance.slots()[0].update(&mut doc, Value::False).unwrap();
        assert_eq!(doc.to_markup(div), "<div><b>x</b></div>");
    }
}
