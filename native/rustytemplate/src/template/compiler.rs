//! Template Compiler
//!
//! Joins the literal fragments with a placeholder marker, parses the result
//! once, and records where every marker ended up as an address into the
//! parsed tree:
//! - a marker inside text becomes a `Node` slot: the text is split so the
//!   marker sits alone in an empty placeholder text node, followed by a
//!   boundary node that gives later insertions a fixed position
//! - an attribute whose whole value is the marker becomes an `Attribute` slot
//!
//! The compiler keeps no state between calls. Caching is [`TemplateCache`]'s job.
//!
//! [`TemplateCache`]: super::cache::TemplateCache

use std::borrow::Cow;

use tracing::debug;

use super::address::{address_of, Address};
use crate::core::scanner::marker_positions;
use crate::dom::{Document, NodeId, NodeKind, ParseOptions, TreeWalker};
use crate::error::TemplateError;

/// Default placeholder marker
///
/// Built from private-use code points. Literal fragments are assumed never to
/// contain it; a template whose text does will fail with `SlotCountMismatch`
/// rather than compile into something wrong. Pick another marker through
/// [`CompileOptions`] if that assumption does not hold.
pub const DEFAULT_MARKER: &str = "\u{E000}rt-slot\u{E001}";

/// Options for [`compile_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Options for the structural parse of the joined template text
    pub parse: ParseOptions,
    /// Marker inserted between fragments; must be non-empty
    pub marker: Cow<'static, str>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            parse: ParseOptions::default(),
            marker: Cow::Borrowed(DEFAULT_MARKER),
        }
    }
}

/// Kind of interpolation position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKind {
    /// A position between sibling nodes
    Node,
    /// The whole value of an attribute
    Attribute,
}

/// Address-based record of one interpolation position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotDescriptor {
    /// Address of the placeholder text node
    Node { address: Address },
    /// Address of the owning element, plus the attribute name
    Attribute { address: Address, name: String },
}

impl SlotDescriptor {
    pub fn kind(&self) -> SlotKind {
        match self {
            SlotDescriptor::Node { .. } => SlotKind::Node,
            SlotDescriptor::Attribute { .. } => SlotKind::Attribute,
        }
    }

    pub fn address(&self) -> &[usize] {
        match self {
            SlotDescriptor::Node { address } | SlotDescriptor::Attribute { address, .. } => address,
        }
    }

    /// Attribute name, for attribute slots
    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            SlotDescriptor::Attribute { name, .. } => Some(name),
            SlotDescriptor::Node { .. } => None,
        }
    }
}

/// A parsed template plus its ordered slot descriptors
///
/// Immutable once built. The tree is only ever cloned into other documents,
/// never handed out for mutation, so one compiled template serves any number
/// of instantiations, including from several threads.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    doc: Document,
    root: NodeId,
    slots: Vec<SlotDescriptor>,
}

impl CompiledTemplate {
    /// The document holding the parsed tree
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Root fragment of the parsed tree
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Slot descriptors in interpolation order
    pub fn slots(&self) -> &[SlotDescriptor] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

/// Position found during the walk, before addresses are taken
enum Found {
    Node(NodeId),
    Attribute(NodeId, String),
}

/// Compile literal fragments with default options
pub fn compile(fragments: &[&str]) -> Result<CompiledTemplate, TemplateError> {
    compile_with(fragments, &CompileOptions::default())
}

/// Compile literal fragments
///
/// `fragments.len() - 1` interpolation positions are expected, one between
/// each adjacent pair of fragments.
pub fn compile_with(
    fragments: &[&str],
    options: &CompileOptions,
) -> Result<CompiledTemplate, TemplateError> {
    let marker = options.marker.as_ref();
    let expected = fragments.len().saturating_sub(1);
    if marker.is_empty() {
        return Err(TemplateError::SlotCountMismatch {
            expected,
            found: 0,
            template: describe(fragments),
        });
    }

    let source = fragments.join(marker);
    let mut doc = Document::new();
    let root = doc.parse_fragment_with(&source, &options.parse)?;

    let mut found = Vec::with_capacity(expected);
    let mut walker = TreeWalker::new(&doc, root);
    while let Some(node) = walker.next_node(&doc) {
        match doc.kind(node) {
            Some(NodeKind::Element) => {
                found.extend(
                    doc.attributes(node)
                        .iter()
                        .filter(|attr| attr.value == marker)
                        .map(|attr| Found::Attribute(node, attr.name.clone())),
                );
            }
            Some(NodeKind::Text) => isolate_markers(&mut doc, node, marker, &mut found)?,
            _ => {}
        }
    }

    if found.len() != expected {
        return Err(TemplateError::SlotCountMismatch {
            expected,
            found: found.len(),
            template: describe(fragments),
        });
    }

    // The tree is final now; take every address against it
    let slots = found
        .into_iter()
        .map(|f| match f {
            Found::Node(id) => Ok(SlotDescriptor::Node {
                address: address_of(&doc, root, id)?,
            }),
            Found::Attribute(id, name) => Ok(SlotDescriptor::Attribute {
                address: address_of(&doc, root, id)?,
                name,
            }),
        })
        .collect::<Result<Vec<_>, TemplateError>>()?;

    debug!(
        fragments = fragments.len(),
        slots = slots.len(),
        nodes = doc.node_count(),
        "compiled template"
    );

    Ok(CompiledTemplate { doc, root, slots })
}

/// Split a text node around every marker it contains
///
/// `pre MARK mid MARK post` becomes
/// `pre [placeholder][boundary] mid [placeholder][boundary] post`, with empty
/// text pieces dropped. The walker has already moved past `text`, so none of
/// the new siblings are visited again.
fn isolate_markers(
    doc: &mut Document,
    text: NodeId,
    marker: &str,
    found: &mut Vec<Found>,
) -> Result<(), TemplateError> {
    let mut current = text;

    loop {
        let data = doc.text(current).unwrap_or_default();
        let Some(&offset) = marker_positions(data, marker).first() else {
            break;
        };

        let placeholder = doc.split_text(current, offset)?;
        let rest = doc.split_text(placeholder, marker.len())?;
        doc.set_text(placeholder, "")?;
        let boundary = doc.create_boundary();
        doc.insert_after(placeholder, boundary)?;
        found.push(Found::Node(placeholder));

        if offset == 0 {
            doc.remove(current);
        }
        if doc.text(rest).is_some_and(str::is_empty) {
            doc.remove(rest);
            break;
        }
        current = rest;
    }

    Ok(())
}

/// Template text for error messages, with interpolations shown as `{}`
fn describe(fragments: &[&str]) -> String {
    fragments.join("{}")
}
