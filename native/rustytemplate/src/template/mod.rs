//! Template Module - compile once, instantiate many times
//!
//! - Address: child-index paths that survive cloning
//! - Compiler: literal fragments to a parsed tree plus slot descriptors
//! - Instance: clone, resolve anchors, bind values
//! - Update: the value-to-mutation rule behind every slot update
//! - Cache: memoized compilation keyed by source identity

pub mod address;
pub mod cache;
pub mod compiler;
pub mod instance;
pub mod update;

pub use address::{address_of, resolve, Address};
pub use cache::{CacheConfig, TemplateCache, TemplateSource};
pub use compiler::{
    compile, compile_with, CompileOptions, CompiledTemplate, SlotDescriptor, SlotKind,
    DEFAULT_MARKER,
};
pub use instance::{instantiate, Instance, SlotAnchor};
pub use update::{apply_update, Value};
