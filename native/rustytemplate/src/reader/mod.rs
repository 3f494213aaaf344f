//! Markup Reader Module
//!
//! Pull-parser front end over the tokenizer:
//! - SliceReader: zero-copy reader over a string slice
//! - Events: markup event types for pull parsing

pub mod events;
pub mod slice;

pub use events::{MarkupEvent, StartElement};
pub use slice::SliceReader;
