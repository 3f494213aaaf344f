//! Address Resolver
//!
//! An address is the list of child indices leading from a root to a node.
//! It depends only on tree shape, so an address computed against a parsed
//! template resolves to the corresponding node of any structurally identical
//! copy of it.

use crate::dom::{DocumentAccess, NodeId};
use crate::error::TemplateError;

/// Child-index path from a root to a node
pub type Address = Vec<usize>;

/// Compute the address of `target` relative to `root`
///
/// Every node kind counts toward sibling indices, boundaries included.
pub fn address_of<D: DocumentAccess>(
    doc: &D,
    root: NodeId,
    target: NodeId,
) -> Result<Address, TemplateError> {
    let mut path = Vec::new();
    let mut current = target;

    while current != root {
        let parent = doc
            .parent_of(current)
            .ok_or(TemplateError::NotDescendant { node: target })?;

        let mut index = 0;
        let mut sibling = doc.prev_sibling_of(current);
        while let Some(prev) = sibling {
            index += 1;
            sibling = doc.prev_sibling_of(prev);
        }

        path.push(index);
        current = parent;
    }

    path.reverse();
    Ok(path)
}

/// Follow `path` down from `root`
///
/// Returns None when the path does not describe a node of this tree.
pub fn resolve<D: DocumentAccess>(doc: &D, root: NodeId, path: &[usize]) -> Option<NodeId> {
    doc.get_node(root)?;
    path.iter()
        .try_fold(root, |node, &index| doc.child_at(node, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn test_address_of_nested() {
        let mut doc = Document::new();
        let root = doc.parse_fragment("<a></a><b><c></c><d>x</d></b>");
        let b = doc.child_at(root, 1).expect("b");
        let d = doc.child_at(b, 1).expect("d");
        let x = doc.first_child(d).expect("x");

        assert_eq!(address_of(&doc, root, x).unwrap(), vec![1, 1, 0]);
        assert_eq!(address_of(&doc, root, root).unwrap(), Vec::<usize>::new());
    }

    #[test]
    fn test_not_descendant() {
        let mut doc = Document::new();
        let root = doc.parse_fragment("<a></a>");
        let stray = doc.create_element("b");
        assert_eq!(
            address_of(&doc, root, stray),
            Err(TemplateError::NotDescendant { node: stray })
        );
    }

    #[test]
    fn test_resolve_round_trip_on_copy() {
        let mut source = Document::new();
        let root = source.parse_fragment("<ul><li>1</li><li>2<b>!</b></li></ul>");
        let li = source.child_at(source.first_child(root).expect("ul"), 1).expect("li");
        let bang = source.last_child(li).expect("b");
        let path = address_of(&source, root, bang).unwrap();

        let mut target = Document::new();
        target.parse_fragment("<p>offset the ids</p>");
        let copy = target.import(&source, root).unwrap();
        let resolved = resolve(&target, copy, &path).expect("resolves");
        assert_eq!(target.name(resolved), Some("b"));
        assert_eq!(target.text_content(resolved), "!");
    }

    #[test]
    fn test_resolve_invalid_path() {
        let mut doc = Document::new();
        let root = doc.parse_fragment("<a></a>");
        assert_eq!(resolve(&doc, root, &[3]), None);
        assert_eq!(resolve(&doc, root, &[0, 0]), None);
        assert_eq!(resolve(&doc, 999, &[]), None);
    }
}
