//! Data models for the rich text core
//!
//! Formatting tags and spans, plus the note projection a finished editing
//! session commits to.

pub mod note;
pub mod span;

// Re-export commonly used types
pub use note::{Note, NoteSpan, SpanKind};
pub use span::{HeadingLevel, Span, StyleTag};
