//! Markup Document - Arena-based mutable tree
//!
//! Every node lives in one arena and is addressed by NodeId:
//! - Nodes are never freed; `remove` only detaches
//! - Subtrees can be imported (deep-cloned) from another document
//! - Inserting a fragment moves its children and leaves it empty

use super::node::{is_void_element, Attribute, Node, NodeId, NodeKind};
use super::DocumentAccess;
use crate::error::TemplateError;
use crate::reader::events::{MarkupEvent, StartElement};
use crate::reader::slice::SliceReader;

/// Options for the structural parser
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject mismatched or unclosed tags and unterminated constructs
    pub strict: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        ParseOptions { strict: true }
    }
}

/// A mutable markup document stored in arena format
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Arena of nodes
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Document {
            nodes: Vec::with_capacity(64),
        }
    }

    // ------------------------------------------------------------------
    // Parsing
    // ------------------------------------------------------------------

    /// Parse markup into a new detached fragment (lenient mode)
    pub fn parse_fragment(&mut self, input: &str) -> NodeId {
        let fragment = self.create_fragment();
        // Lenient building never fails
        let _ = self.build_from_events(fragment, input, false);
        fragment
    }

    /// Parse markup into a new detached fragment
    ///
    /// In strict mode the first structural error is returned and the
    /// partially built fragment is discarded.
    pub fn parse_fragment_with(
        &mut self,
        input: &str,
        options: &ParseOptions,
    ) -> Result<NodeId, TemplateError> {
        let fragment = self.create_fragment();
        self.build_from_events(fragment, input, options.strict)?;
        Ok(fragment)
    }

    /// Build nodes from markup events under `root`
    fn build_from_events(
        &mut self,
        root: NodeId,
        input: &str,
        strict: bool,
    ) -> Result<(), TemplateError> {
        let mut reader = if strict {
            SliceReader::new_strict(input)
        } else {
            SliceReader::new(input)
        };
        let mut stack: Vec<NodeId> = vec![root];

        while let Some(event) = reader.next_event() {
            let parent_id = *stack.last().unwrap_or(&root);

            match event {
                MarkupEvent::StartElement(elem) => {
                    let is_void = is_void_element(elem.name);
                    let node_id = self.handle_element(elem, parent_id);
                    if !is_void {
                        stack.push(node_id);
                    }
                }

                MarkupEvent::EmptyElement(elem) => {
                    self.handle_element(elem, parent_id);
                }

                MarkupEvent::EndElement(name) => {
                    // Find the nearest open element with this name
                    let open = stack
                        .iter()
                        .skip(1)
                        .rposition(|&id| self.nodes[id as usize].name.eq_ignore_ascii_case(name))
                        .map(|i| i + 1);

                    match open {
                        Some(depth) if !strict || depth == stack.len() - 1 => {
                            stack.truncate(depth);
                        }
                        Some(_) => {
                            let top = &self.nodes[parent_id as usize].name;
                            return Err(TemplateError::Parse {
                                message: format!("Tag mismatch: <{top}> closed with </{name}>"),
                                position: reader.position(),
                            });
                        }
                        None if strict => {
                            return Err(TemplateError::Parse {
                                message: format!(
                                    "Unexpected end tag: </{name}> without matching start tag"
                                ),
                                position: reader.position(),
                            });
                        }
                        // Stray end tag, ignored
                        None => {}
                    }
                }

                MarkupEvent::Text(content) => {
                    let node_id = self.push_node(Node::text(content));
                    self.link_child(parent_id, node_id);
                }

                MarkupEvent::Comment(content) => {
                    let node_id = self.push_node(Node::comment(content));
                    self.link_child(parent_id, node_id);
                }

                // Declarations carry no tree content
                MarkupEvent::DocType(_) => {}
            }

            if strict {
                if let Some(err) = reader.error() {
                    return Err(TemplateError::Parse {
                        message: err.message.clone(),
                        position: err.position,
                    });
                }
            }
        }

        if strict {
            if let Some(err) = reader.error() {
                return Err(TemplateError::Parse {
                    message: err.message.clone(),
                    position: err.position,
                });
            }

            if let Some(&unclosed) = stack.get(1) {
                return Err(TemplateError::Parse {
                    message: format!("Unclosed tag: <{}>", self.nodes[unclosed as usize].name),
                    position: input.len(),
                });
            }
        }

        Ok(())
    }

    /// Handle start/empty element
    fn handle_element(&mut self, elem: StartElement<'_>, parent_id: NodeId) -> NodeId {
        let mut node = Node::element(elem.name);
        node.attributes = elem
            .attributes
            .into_iter()
            .map(|a| Attribute::new(a.name, a.value))
            .collect();

        let node_id = self.push_node(node);
        self.link_child(parent_id, node_id);
        node_id
    }

    // ------------------------------------------------------------------
    // Node creation
    // ------------------------------------------------------------------

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push_node(Node::element(name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, data: &str) -> NodeId {
        self.push_node(Node::text(data))
    }

    /// Create an empty fragment (multi-node container)
    pub fn create_fragment(&mut self) -> NodeId {
        self.push_node(Node::fragment())
    }

    /// Create a detached boundary node
    pub fn create_boundary(&mut self) -> NodeId {
        self.push_node(Node::boundary())
    }

    /// Deep-copy a subtree of `source` into this document
    ///
    /// The copy is detached, structurally identical to the source subtree,
    /// and shares no node identity with it.
    pub fn import(&mut self, source: &Document, node: NodeId) -> Result<NodeId, TemplateError> {
        let src = source.node(node).ok_or(TemplateError::InvalidNode {
            node,
            reason: "not a node of the source document",
        })?;
        let copy = self.push_node(src.detached_copy());

        // (source child, destination parent) pairs, in document order
        let mut pending: Vec<(NodeId, NodeId)> = Vec::new();
        push_children_reversed(source, node, copy, &mut pending);

        while let Some((src_id, dst_parent)) = pending.pop() {
            let node_copy = source.nodes[src_id as usize].detached_copy();
            let dst_id = self.push_node(node_copy);
            self.link_child(dst_parent, dst_id);
            push_children_reversed(source, src_id, dst_id, &mut pending);
        }

        Ok(copy)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    /// Get node kind
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(|n| n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.first_child
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.last_child
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.prev_sibling
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.next_sibling
    }

    /// Get the child at `index`, counting every node kind
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.child_nodes(id).nth(index)
    }

    /// Iterate over all children of a node, boundaries included
    pub fn child_nodes(&self, id: NodeId) -> ChildIter<'_> {
        ChildIter {
            doc: self,
            next: self.first_child(id),
        }
    }

    /// Children that carry content (boundaries skipped)
    pub fn content_children(&self, id: NodeId) -> Vec<NodeId> {
        self.child_nodes(id)
            .filter(|&c| self.kind(c) != Some(NodeKind::Boundary))
            .collect()
    }

    /// Iterate over all descendants of a node in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        let mut child_id = self.last_child(id);
        while let Some(cid) = child_id {
            stack.push(cid);
            child_id = self.prev_sibling(cid);
        }
        DescendantIter { doc: self, stack }
    }

    /// Check whether `node` is `ancestor` or lies beneath it
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Get element tag name
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .filter(|n| n.is_element())
            .map(|n| n.name.as_str())
    }

    /// Get data of a text or comment node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id)
            .filter(|n| matches!(n.kind, NodeKind::Text | NodeKind::Comment))
            .map(|n| n.data.as_str())
    }

    /// Concatenated data of every text node in a subtree
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.node(id).filter(|n| n.is_text()) {
            return text.data.clone();
        }
        self.descendants(id)
            .filter_map(|d| self.node(d).filter(|n| n.is_text()))
            .map(|n| n.data.as_str())
            .collect()
    }

    /// Get attributes of an element
    pub fn attributes(&self, id: NodeId) -> &[Attribute] {
        self.node(id).map_or(&[], |n| n.attributes.as_slice())
    }

    /// Get attribute value by name
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attribute(name)
    }

    /// Get total number of nodes ever created in this document
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    fn node_mut(&mut self, id: NodeId, reason: &'static str) -> Result<&mut Node, TemplateError> {
        self.nodes
            .get_mut(id as usize)
            .ok_or(TemplateError::InvalidNode { node: id, reason })
    }

    /// Replace the data of a text or comment node
    pub fn set_text(&mut self, id: NodeId, data: &str) -> Result<(), TemplateError> {
        let node = self.node_mut(id, "not a node of this document")?;
        if !matches!(node.kind, NodeKind::Text | NodeKind::Comment) {
            return Err(TemplateError::InvalidNode {
                node: id,
                reason: "only text and comment nodes carry data",
            });
        }
        node.data.clear();
        node.data.push_str(data);
        Ok(())
    }

    /// Set an attribute, keeping its position if it already exists
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), TemplateError> {
        let node = self.node_mut(id, "not a node of this document")?;
        if !node.is_element() {
            return Err(TemplateError::InvalidNode {
                node: id,
                reason: "only elements carry attributes",
            });
        }
        match node.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => {
                attr.value.clear();
                attr.value.push_str(value);
            }
            None => node.attributes.push(Attribute::new(name, value)),
        }
        Ok(())
    }

    /// Remove an attribute; returns whether it was present
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> bool {
        match self.nodes.get_mut(id as usize) {
            Some(node) => {
                let before = node.attributes.len();
                node.attributes.retain(|a| a.name != name);
                node.attributes.len() != before
            }
            None => false,
        }
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TemplateError> {
        self.insert_into(parent, None, child)
    }

    /// Insert `node` immediately before `reference`
    pub fn insert_before(&mut self, reference: NodeId, node: NodeId) -> Result<(), TemplateError> {
        let parent = self.parent(reference).ok_or(TemplateError::InvalidNode {
            node: reference,
            reason: "insertion reference has no parent",
        })?;
        self.insert_into(parent, Some(reference), node)
    }

    /// Insert `node` immediately after `reference`
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) -> Result<(), TemplateError> {
        let parent = self.parent(reference).ok_or(TemplateError::InvalidNode {
            node: reference,
            reason: "insertion reference has no parent",
        })?;
        let next = self.next_sibling(reference);
        self.insert_into(parent, next, node)
    }

    /// Insert `node` into `parent` before `before` (or last)
    ///
    /// A fragment is drained: its children move in order and it stays empty.
    fn insert_into(
        &mut self,
        parent: NodeId,
        before: Option<NodeId>,
        node: NodeId,
    ) -> Result<(), TemplateError> {
        let parent_kind = self.kind(parent).ok_or(TemplateError::InvalidNode {
            node: parent,
            reason: "not a node of this document",
        })?;
        if !matches!(parent_kind, NodeKind::Element | NodeKind::Fragment) {
            return Err(TemplateError::InvalidNode {
                node: parent,
                reason: "only elements and fragments have children",
            });
        }
        let kind = self.kind(node).ok_or(TemplateError::InvalidNode {
            node,
            reason: "not a node of this document",
        })?;
        if self.is_inclusive_ancestor(node, parent) {
            return Err(TemplateError::InvalidNode {
                node,
                reason: "cannot insert a node into itself or its descendants",
            });
        }

        if kind == NodeKind::Fragment {
            while let Some(child) = self.first_child(node) {
                self.detach(child);
                self.link_before(parent, before, child);
            }
            return Ok(());
        }

        if Some(node) == before {
            return Ok(());
        }
        self.detach(node);
        self.link_before(parent, before, node);
        Ok(())
    }

    /// Detach a node from its parent and siblings; the node stays usable
    pub fn remove(&mut self, id: NodeId) {
        if (id as usize) < self.nodes.len() {
            self.detach(id);
        }
    }

    /// Split a text node at a byte offset, returning the new following node
    ///
    /// The original keeps `data[..offset]`; the new sibling holds the rest.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId, TemplateError> {
        let node = self.node_mut(id, "not a node of this document")?;
        if !node.is_text() || !node.data.is_char_boundary(offset) {
            return Err(TemplateError::InvalidNode {
                node: id,
                reason: "split offset must fall on a character boundary of a text node",
            });
        }
        let tail = node.data.split_off(offset);
        let tail_id = self.push_node(Node::text(tail));
        if let Some(parent) = self.parent(id) {
            let next = self.next_sibling(id);
            self.link_before(parent, next, tail_id);
        }
        Ok(tail_id)
    }

    fn detach(&mut self, id: NodeId) {
        let node = &mut self.nodes[id as usize];
        let (parent, prev, next) = (node.parent.take(), node.prev_sibling.take(), node.next_sibling.take());

        match prev {
            Some(p) => self.nodes[p as usize].next_sibling = next,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent as usize].first_child = next;
                }
            }
        }
        match next {
            Some(n) => self.nodes[n as usize].prev_sibling = prev,
            None => {
                if let Some(parent) = parent {
                    self.nodes[parent as usize].last_child = prev;
                }
            }
        }
    }

    /// Link a detached node into `parent` before `before` (or at the end)
    fn link_before(&mut self, parent: NodeId, before: Option<NodeId>, child: NodeId) {
        match before {
            None => self.link_child(parent, child),
            Some(next) => {
                let prev = self.nodes[next as usize].prev_sibling;
                {
                    let node = &mut self.nodes[child as usize];
                    node.parent = Some(parent);
                    node.prev_sibling = prev;
                    node.next_sibling = Some(next);
                }
                self.nodes[next as usize].prev_sibling = Some(child);
                match prev {
                    Some(p) => self.nodes[p as usize].next_sibling = Some(child),
                    None => self.nodes[parent as usize].first_child = Some(child),
                }
            }
        }
    }

    /// Link a child node as the last child of its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Get parent's last_child first to avoid borrow issues
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        self.nodes[child_id as usize].parent = Some(parent_id);
        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }
}

fn push_children_reversed(
    source: &Document,
    src_parent: NodeId,
    dst_parent: NodeId,
    pending: &mut Vec<(NodeId, NodeId)>,
) {
    let mut child = source.last_child(src_parent);
    while let Some(c) = child {
        pending.push((c, dst_parent));
        child = source.prev_sibling(c);
    }
}

/// Iterator over child nodes
pub struct ChildIter<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.next_sibling(current);
        Some(current)
    }
}

/// Iterator over descendant nodes
pub struct DescendantIter<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for DescendantIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        let mut child_id = self.doc.last_child(current);
        while let Some(id) = child_id {
            self.stack.push(id);
            child_id = self.doc.prev_sibling(id);
        }
        Some(current)
    }
}

// ============================================================================
// DocumentAccess trait implementation
// ============================================================================

impl DocumentAccess for Document {
    fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.node(id)
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id)
    }

    fn prev_sibling_of(&self, id: NodeId) -> Option<NodeId> {
        self.prev_sibling(id)
    }

    fn next_sibling_of(&self, id: NodeId) -> Option<NodeId> {
        self.next_sibling(id)
    }

    fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        Document::child_at(self, id, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let mut doc = Document::new();
        let root = doc.parse_fragment("<p>hello</p>");
        let children = doc.content_children(root);
        assert_eq!(children.len(), 1);
        assert_eq!(doc.name(children[0]), Some("p"));
        assert_eq!(doc.text_content(children[0]), "hello");
    }

    #[test]
    fn test_parse_void_and_nesting() {
        let mut doc = Document::new();
        let root = doc.parse_fragment("<div><br><span>a</span>b</div>");
        let div = doc.first_child(root).expect("div");
        let kids: Vec<_> = doc.child_nodes(div).collect();
        assert_eq!(kids.len(), 3);
        assert_eq!(doc.name(kids[0]), Some("br"));
        assert!(!doc.node(kids[0]).expect("br").has_children());
        assert_eq!(doc.name(kids[1]), Some("span"));
        assert_eq!(doc.text(kids[2]), Some("b"));
    }

    #[test]
    fn test_parse_lenient_recovers() {
        let mut doc = Document::new();
        let root = doc.parse_fragment("</x><ul><li>one<li>two</ul>tail");
        let ul = doc.first_child(root).expect("ul");
        assert_eq!(doc.name(ul), Some("ul"));
        assert_eq!(doc.text(doc.last_child(root).expect("tail")), Some("tail"));
    }

    #[test]
    fn test_parse_strict_errors() {
        let mut doc = Document::new();
        let strict = ParseOptions::strict();
        assert!(matches!(
            doc.parse_fragment_with("<a><b></a>", &strict),
            Err(TemplateError::Parse { .. })
        ));
        assert!(matches!(
            doc.parse_fragment_with("<a>", &strict),
            Err(TemplateError::Parse { .. })
        ));
        assert!(matches!(
            doc.parse_fragment_with("</a>", &strict),
            Err(TemplateError::Parse { .. })
        ));
        assert!(doc.parse_fragment_with("<a><br></a>", &strict).is_ok());
    }

    #[test]
    fn test_parse_lone_angle_bracket_is_one_text_node() {
        let mut doc = Document::new();
        let root = doc.parse_fragment("<p>a < b</p>");
        let p = doc.first_child(root).expect("p");
        let kids: Vec<_> = doc.child_nodes(p).collect();
        assert_eq!(kids.len(), 1);
        assert_eq!(doc.text(kids[0]), Some("a < b"));
        assert_eq!(doc.to_markup(root), "<p>a &lt; b</p>");
    }

    #[test]
    fn test_insert_and_remove() {
        let mut doc = Document::new();
        let ul = doc.create_element("ul");
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        let c = doc.create_element("li");
        doc.append_child(ul, c).unwrap();
        doc.insert_before(c, a).unwrap();
        doc.insert_after(a, b).unwrap();
        assert_eq!(doc.child_nodes(ul).collect::<Vec<_>>(), vec![a, b, c]);

        doc.remove(b);
        assert_eq!(doc.child_nodes(ul).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(doc.parent(b), None);
        assert_eq!(doc.next_sibling(a), Some(c));
        assert_eq!(doc.prev_sibling(c), Some(a));

        doc.remove(a);
        doc.remove(c);
        assert_eq!(doc.first_child(ul), None);
        assert_eq!(doc.last_child(ul), None);
    }

    #[test]
    fn test_insert_fragment_drains_children() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let end = doc.create_text("end");
        doc.append_child(div, end).unwrap();

        let frag = doc.parse_fragment("<i>1</i><i>2</i>");
        doc.insert_before(end, frag).unwrap();

        assert_eq!(doc.first_child(frag), None);
        let names: Vec<_> = doc
            .child_nodes(div)
            .map(|c| doc.name(c).unwrap_or("#text"))
            .collect();
        assert_eq!(names, vec!["i", "i", "#text"]);
    }

    #[test]
    fn test_insert_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        doc.append_child(outer, inner).unwrap();
        assert!(doc.append_child(inner, outer).is_err());
        assert!(doc.append_child(outer, outer).is_err());
    }

    #[test]
    fn test_split_text() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        let t = doc.create_text("hello world");
        doc.append_child(p, t).unwrap();

        let tail = doc.split_text(t, 6).unwrap();
        assert_eq!(doc.text(t), Some("hello "));
        assert_eq!(doc.text(tail), Some("world"));
        assert_eq!(doc.next_sibling(t), Some(tail));
        assert_eq!(doc.last_child(p), Some(tail));
    }

    #[test]
    fn test_import_is_deep_and_independent() {
        let mut source = Document::new();
        let root = source.parse_fragment(r#"<a href="/x"><b>bold</b>text</a>"#);

        let mut target = Document::new();
        target.create_element("unrelated");
        let copy = target.import(&source, root).unwrap();

        let a = target.first_child(copy).expect("a");
        assert_eq!(target.attribute(a, "href"), Some("/x"));
        assert_eq!(target.text_content(a), "boldtext");

        let b = target.first_child(a).expect("b");
        target.set_attribute(b, "class", "changed").unwrap();
        let src_b = source.first_child(source.first_child(root).expect("a")).expect("b");
        assert_eq!(source.attribute(src_b, "class"), None);
    }

    #[test]
    fn test_attributes() {
        let mut doc = Document::new();
        let el = doc.create_element("input");
        doc.set_attribute(el, "type", "text").unwrap();
        doc.set_attribute(el, "value", "a").unwrap();
        doc.set_attribute(el, "type", "checkbox").unwrap();
        assert_eq!(doc.attributes(el)[0], Attribute::new("type", "checkbox"));
        assert!(doc.remove_attribute(el, "value"));
        assert!(!doc.remove_attribute(el, "value"));

        let text = doc.create_text("x");
        assert!(doc.set_attribute(text, "a", "b").is_err());
    }
}
