//! Editor state
//!
//! The authoritative (text, spans, selection) triple plus the transient IME
//! composition region. One instance is the current state of an editing
//! session; undo history holds earlier instances.

use crate::text::buffer::TextBuffer;
use crate::text::cursor::{Selection, TextRange};
use crate::text::spans::SpanSet;
use serde::{Deserialize, Serialize};

/// Complete state of the text being edited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    /// The text being edited
    pub buffer: TextBuffer,

    /// Formatting spans over the buffer
    pub spans: SpanSet,

    /// Current selection
    pub selection: Selection,

    /// IME-pending region, if a composition is in flight
    ///
    /// Transient UI state: never serialized and excluded from undo
    /// snapshots.
    #[serde(skip)]
    pub composition: Option<TextRange>,
}

impl EditorState {
    /// Create an empty state with the cursor at the start
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of this state fit for the undo history
    ///
    /// Strips the composition region; a restored state never resumes an
    /// in-flight IME session.
    pub fn snapshot(&self) -> EditorState {
        EditorState {
            buffer: self.buffer.clone(),
            spans: self.spans.clone(),
            selection: self.selection,
            composition: None,
        }
    }
}

/// A proposed (text, selection, composition) triple from the input source
///
/// Raw keystrokes, pastes, IME events, and autocorrect all arrive in this
/// shape; [`Editor::apply`](crate::editor::Editor::apply) classifies the
/// difference against the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedChange {
    pub text: String,
    pub selection: Selection,
    pub composition: Option<TextRange>,
}

impl ProposedChange {
    pub fn new(text: impl Into<String>, selection: Selection) -> Self {
        Self {
            text: text.into(),
            selection,
            composition: None,
        }
    }

    pub fn with_composition(mut self, composition: TextRange) -> Self {
        self.composition = Some(composition);
        self
    }
}
