//! Rich text editing core
//!
//! A span-tracking rich-text model: a plain text buffer plus formatting
//! ranges (bold, italic, underline, heading levels) that stay valid and
//! semantically correct across arbitrary edits. The crate owns the data
//! and mutation algorithms only; rendering and input collection live in
//! whatever shell embeds it.
//!
//! ## Layers
//!
//! - [`text`]: character-offset buffer, selections, and the span set with
//!   its edit-translation algorithms
//! - [`models`]: style tags, spans, and the committed [`Note`] projection
//! - [`editor`]: the [`Editor`] session: edit classification, active
//!   styles, list continuation
//! - [`undo`]: bounded undo/redo history
//! - [`store`]: in-memory collection of committed notes

pub mod editor;
pub mod models;
pub mod store;
pub mod text;
pub mod undo;

// Re-export the main entry points at the crate root
pub use editor::{CommitError, Editor, EditorState, ProposedChange};
pub use models::{HeadingLevel, Note, NoteSpan, Span, SpanKind, StyleTag};
pub use store::NoteStore;
pub use text::{ActiveStyles, EditOp, Selection, SpanSet, TextBuffer, TextRange};
pub use undo::History;
