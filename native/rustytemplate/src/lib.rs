//! RustyTemplate - compile-once markup templates over a mutable tree
//!
//! A template is a list of literal fragments with a value slot between each
//! adjacent pair. It is parsed once into a tree; each instantiation clones
//! that tree into a caller's document and binds values into the slots.
//!
//! ```
//! use rustytemplate::{compile, instantiate, Document, Value};
//!
//! let template = compile(&["<p class=\"", "\">", "</p>"])?;
//! let mut doc = Document::new();
//! let instance = instantiate(&template, &mut doc, vec!["intro".into(), "hello".into()])?;
//! assert_eq!(instance.to_markup(&doc), "<p class=\"intro\">hello</p>");
//!
//! instance.slots()[1].update(&mut doc, Value::Null)?;
//! assert_eq!(instance.to_markup(&doc), "<p class=\"intro\"></p>");
//! # Ok::<(), rustytemplate::TemplateError>(())
//! ```
//!
//! Layers:
//! - core: scanner, tokenizer, entities, attributes
//! - reader: pull events over a string slice
//! - dom: arena document, tree walker, serialization
//! - template: address resolver, compiler, instantiation, update rule, cache

pub mod core;
pub mod dom;
pub mod error;
pub mod reader;
pub mod template;

pub use dom::{Document, NodeId, NodeKind, ParseOptions};
pub use error::TemplateError;
pub use template::{
    apply_update, compile, compile_with, instantiate, CacheConfig, CompileOptions,
    CompiledTemplate, Instance, SlotAnchor, SlotDescriptor, SlotKind, TemplateCache, Value,
};
