//! Markup Node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of markup node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Multi-node container; inserting it moves its children
    Fragment,
    /// Element node
    Element,
    /// Text content
    Text,
    /// Comment
    Comment,
    /// Zero-width position marker, never serialized
    Boundary,
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct Node {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None while detached)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Element tag name; empty for other kinds
    pub name: String,
    /// Text or comment data
    pub data: String,
    /// Element attributes in insertion order
    pub attributes: Vec<Attribute>,
}

impl Node {
    fn with_kind(kind: NodeKind) -> Self {
        Node {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name: String::new(),
            data: String::new(),
            attributes: Vec::new(),
        }
    }

    /// Create a new empty fragment
    pub fn fragment() -> Self {
        Node::with_kind(NodeKind::Fragment)
    }

    /// Create a new element node
    pub fn element(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            ..Node::with_kind(NodeKind::Element)
        }
    }

    /// Create a new text node
    pub fn text(data: impl Into<String>) -> Self {
        Node {
            data: data.into(),
            ..Node::with_kind(NodeKind::Text)
        }
    }

    /// Create a new comment node
    pub fn comment(data: impl Into<String>) -> Self {
        Node {
            data: data.into(),
            ..Node::with_kind(NodeKind::Comment)
        }
    }

    /// Create a new boundary node
    pub fn boundary() -> Self {
        Node::with_kind(NodeKind::Boundary)
    }

    /// Copy of this node's own content, unlinked from any tree
    pub fn detached_copy(&self) -> Self {
        Node {
            name: self.name.clone(),
            data: self.data.clone(),
            attributes: self.attributes.clone(),
            ..Node::with_kind(self.kind)
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

    /// Get attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Stored attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Elements that never have children
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Check if an element name is a void element (ASCII case-insensitive)
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let frag = Node::fragment();
        assert_eq!(frag.kind, NodeKind::Fragment);
        assert!(frag.parent.is_none());
        assert!(!frag.has_children());
    }

    #[test]
    fn test_element_attributes() {
        let mut elem = Node::element("div");
        elem.attributes.push(Attribute::new("class", "x"));
        assert!(elem.is_element());
        assert_eq!(elem.attribute("class"), Some("x"));
        assert_eq!(elem.attribute("id"), None);
    }

    #[test]
    fn test_detached_copy_drops_links() {
        let mut text = Node::text("hi");
        text.parent = Some(3);
        text.next_sibling = Some(4);
        let copy = text.detached_copy();
        assert!(copy.is_text());
        assert_eq!(copy.data, "hi");
        assert!(copy.parent.is_none());
        assert!(copy.next_sibling.is_none());
    }

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("br"));
        assert!(is_void_element("IMG"));
        assert!(!is_void_element("div"));
    }
}
