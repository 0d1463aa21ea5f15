//! Layer 0: text and span machinery
//!
//! Pure text storage plus the span layer that tracks formatting ranges
//! across edits. Nothing here knows about editing sessions, history, or
//! notes; that lives in the `editor` layer on top.
//!
//! ## Modules
//!
//! - `buffer`: character-offset text storage
//! - `cursor`: ranges and selections (character positions)
//! - `spans`: formatting span set and edit translation

pub mod buffer;
pub mod cursor;
pub mod spans;

// Re-exports for convenience
pub use buffer::TextBuffer;
pub use cursor::{Selection, TextRange};
pub use spans::{ActiveStyles, EditOp, SpanSet};
