//! Core markup parsing primitives
//!
//! The building blocks under the structural parser:
//! - Scanner: memchr-accelerated delimiter and marker search
//! - Tokenizer: state machine for markup token extraction
//! - Entities: character reference decoding with Cow (zero-copy when possible)
//! - Attributes: attribute parsing from tag content

pub mod attributes;
pub mod entities;
pub mod scanner;
pub mod tokenizer;
