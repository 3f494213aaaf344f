//! Markup serialization
//!
//! Writes a subtree back out as markup. Boundary nodes produce nothing,
//! fragments produce their children, and void elements get no end tag.

use super::node::{is_void_element, NodeId, NodeKind};
use super::Document;
use crate::core::entities::{encode_attribute, encode_text};

impl Document {
    /// Serialize a node and its subtree
    pub fn to_markup(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_markup(id, &mut out);
        out
    }

    fn write_markup(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };

        match node.kind {
            NodeKind::Boundary => {}
            NodeKind::Fragment => {
                for child in self.child_nodes(id) {
                    self.write_markup(child, out);
                }
            }
            NodeKind::Text => {
                if self.is_raw_text_parent(id) {
                    out.push_str(&node.data);
                } else {
                    out.push_str(&encode_text(&node.data));
                }
            }
            NodeKind::Comment => {
                out.push_str("<!--");
                out.push_str(&node.data);
                out.push_str("-->");
            }
            NodeKind::Element => {
                out.push('<');
                out.push_str(&node.name);
                for attr in &node.attributes {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    out.push_str(&encode_attribute(&attr.value));
                    out.push('"');
                }
                out.push('>');
                if is_void_element(&node.name) {
                    return;
                }
                for child in self.child_nodes(id) {
                    self.write_markup(child, out);
                }
                out.push_str("</");
                out.push_str(&node.name);
                out.push('>');
            }
        }
    }

    fn is_raw_text_parent(&self, id: NodeId) -> bool {
        self.parent(id)
            .and_then(|p| self.name(p))
            .is_some_and(|name| {
                name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
            })
    }
}
