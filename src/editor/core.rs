//! The editing session
//!
//! [`Editor`] owns the current [`EditorState`], the derived active styles,
//! and the undo history, and is the single entry point for every
//! user-visible change. Each proposed (text, selection) pair from the input
//! source is classified as selection-only, a list-continuing newline, a
//! replacement, an insertion, or a deletion, and the span set is remapped
//! accordingly before the new state is installed.
//!
//! State replacement and history recording happen inside one `&mut self`
//! call; an observer never sees one without the other.

use crate::editor::lists::{self, LineEdit};
use crate::editor::state::{EditorState, ProposedChange};
use crate::models::note::Note;
use crate::models::span::{HeadingLevel, StyleTag};
use crate::text::buffer::TextBuffer;
use crate::text::cursor::{Selection, TextRange};
use crate::text::spans::{ActiveStyles, EditOp, SpanSet};
use crate::undo::History;
use thiserror::Error;

/// Why a session cannot be committed to a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("note title is empty")]
    EmptyTitle,
    #[error("note content is empty")]
    EmptyContent,
}

/// A rich-text editing session
#[derive(Debug, Clone, Default)]
pub struct Editor {
    state: EditorState,
    active: ActiveStyles,
    history: History,
}

impl Editor {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with a custom undo depth
    pub fn with_history_depth(depth: usize) -> Self {
        Self {
            state: EditorState::new(),
            active: ActiveStyles::default(),
            history: History::with_depth(depth),
        }
    }

    /// Current state of the session
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Current text
    pub fn text(&self) -> &str {
        self.state.buffer.as_str()
    }

    /// Current selection
    pub fn selection(&self) -> Selection {
        self.state.selection
    }

    /// Styles the next typed character will carry
    pub fn active_styles(&self) -> ActiveStyles {
        self.active
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply one proposed change from the input source
    ///
    /// Classification follows, in priority order: selection-only, a
    /// list-continuing newline, replacement of a selection, insertion at
    /// the caret, deletion at the caret. An edit that cannot be traced to
    /// the caret (autocorrect or IME surgery elsewhere in the text) keeps
    /// the proposed text but drops span continuity for that single edit;
    /// text correctness always wins over formatting fidelity.
    pub fn apply(&mut self, change: ProposedChange) {
        // Selection-only: spans untouched, nothing recorded in history
        if change.text == self.state.buffer.as_str() {
            let selection = change.selection.clamped(self.state.buffer.len());
            self.state.selection = selection;
            self.state.composition = change.composition;
            self.active = self.state.spans.active_at(selection.caret);
            return;
        }

        let buffer = TextBuffer::from(change.text);
        let new_len = buffer.len();
        let old_len = self.state.buffer.len();
        let selection = change.selection.clamped(new_len);
        let old_selection = self.state.selection;

        // A single newline typed at the caret: list lines continue themselves
        if old_selection.is_collapsed()
            && selection.is_collapsed()
            && new_len == old_len + 1
            && selection.caret == old_selection.caret + 1
            && buffer.char_at(old_selection.caret) == Some('\n')
        {
            if let Some(edit) = lists::continue_on_newline(&buffer, selection.caret, old_selection.caret)
            {
                log::debug!("newline continues a list line");
                self.apply_line_edit(edit, change.composition);
                return;
            }
        }

        if !old_selection.is_collapsed() {
            // Replacement: the selection's contents swapped for the slice of
            // new text whose length is the overall delta plus what was removed
            let removed = old_selection.range().len();
            let sel_start = old_selection.start();
            match (new_len + removed).checked_sub(old_len) {
                Some(inserted_len) if sel_start + inserted_len <= new_len => {
                    let op = EditOp::Replace {
                        start: sel_start,
                        end: old_selection.end(),
                        inserted_len,
                    };
                    let spans = self
                        .state
                        .spans
                        .translate(op)
                        .stamp(TextRange::new(sel_start, sel_start + inserted_len), &self.active.tags());
                    self.commit_edit(buffer, spans, selection, change.composition);
                }
                _ => self.commit_unclassified(buffer, selection, change.composition),
            }
            return;
        }

        if new_len > old_len {
            // Insertion, but only if it happened at the caret
            let inserted_len = new_len - old_len;
            if selection.caret.checked_sub(inserted_len) == Some(old_selection.caret) {
                let at = old_selection.caret;
                let spans = self
                    .state
                    .spans
                    .translate(EditOp::Insert { at, len: inserted_len })
                    .stamp(TextRange::new(at, at + inserted_len), &self.active.tags());
                self.commit_edit(buffer, spans, selection, change.composition);
            } else {
                self.commit_unclassified(buffer, selection, change.composition);
            }
            return;
        }

        if new_len < old_len {
            // Deletion: backspace lands at the deletion start, forward
            // delete leaves the caret in place
            let deleted_len = old_len - new_len;
            let range = if selection.caret == old_selection.caret {
                Some((old_selection.caret, old_selection.caret + deleted_len))
            } else if selection.caret + deleted_len == old_selection.caret {
                Some((selection.caret, old_selection.caret))
            } else {
                None
            };
            match range {
                Some((start, end)) if end <= old_len => {
                    let spans = self.state.spans.translate(EditOp::Delete { start, end });
                    self.commit_edit(buffer, spans, selection, change.composition);
                }
                _ => self.commit_unclassified(buffer, selection, change.composition),
            }
            return;
        }

        // Same length but different text: rewritten somewhere away from the
        // caret, nothing to trace
        self.commit_unclassified(buffer, selection, change.composition);
    }

    /// Toggle a style
    ///
    /// With a collapsed selection this only changes what the next typed
    /// character will carry. With a range selected, the range is stamped
    /// immediately. Heading levels are mutually exclusive either way.
    pub fn toggle_style(&mut self, tag: StyleTag) {
        if self.state.selection.is_collapsed() {
            self.active.toggle(tag);
            return;
        }
        let range = self.state.selection.range();
        let spans = self.state.spans.stamp(range, &[tag]);
        let (buffer, selection, composition) =
            (self.state.buffer.clone(), self.state.selection, self.state.composition);
        self.commit_edit(buffer, spans, selection, composition);
    }

    /// Reset formatting to the default (no bold/italic/underline, body text)
    ///
    /// Collapsed: clears the pending styles. With a range selected: removes
    /// all formatting from the range and stamps it as body text.
    pub fn reset_formatting(&mut self) {
        if self.state.selection.is_collapsed() {
            self.active.clear();
            return;
        }
        let range = self.state.selection.range();
        let spans = self
            .state
            .spans
            .clear_range(range)
            .stamp(range, &[StyleTag::Heading(HeadingLevel::Body)]);
        let (buffer, selection, composition) =
            (self.state.buffer.clone(), self.state.selection, self.state.composition);
        self.commit_edit(buffer, spans, selection, composition);
    }

    /// Toggle the bullet marker on the current line
    pub fn toggle_bullet_list(&mut self) {
        let edit = lists::toggle_bullet(&self.state.buffer, self.state.selection);
        let composition = self.state.composition;
        self.apply_line_edit(edit, composition);
    }

    /// Toggle a numbered marker on the current line
    pub fn toggle_numbered_list(&mut self) {
        let edit = lists::toggle_numbered(&self.state.buffer, self.state.selection);
        let composition = self.state.composition;
        self.apply_line_edit(edit, composition);
    }

    /// Undo the most recent edit. No-op on an empty history.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.state.snapshot()) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    /// Redo the most recently undone edit. No-op when nothing was undone.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.state.snapshot()) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    /// Finish the session: project the state into an immutable [`Note`]
    ///
    /// Fails when the title or the content is empty, mirroring an editor
    /// that only offers "done" once both exist.
    pub fn commit(&self, title: &str) -> Result<Note, CommitError> {
        if title.is_empty() {
            return Err(CommitError::EmptyTitle);
        }
        if self.state.buffer.is_empty() {
            return Err(CommitError::EmptyContent);
        }
        Ok(Note::new(title, self.state.buffer.as_str(), &self.state.spans))
    }

    fn apply_line_edit(&mut self, edit: LineEdit, composition: Option<TextRange>) {
        let spans = self.state.spans.translate(edit.op);
        self.commit_edit(edit.buffer, spans, edit.selection, composition);
    }

    /// Install a content-changing state, recording the previous one
    fn commit_edit(
        &mut self,
        buffer: TextBuffer,
        spans: SpanSet,
        selection: Selection,
        composition: Option<TextRange>,
    ) {
        spans.debug_assert_in_bounds(buffer.len());
        let selection = selection.clamped(buffer.len());
        self.history.record(self.state.snapshot());
        self.state = EditorState { buffer, spans, selection, composition };
        self.active = self.state.spans.active_at(selection.caret);
    }

    /// Keep the text of an edit that cannot be traced to the caret, giving
    /// up span continuity for this one edit
    fn commit_unclassified(
        &mut self,
        buffer: TextBuffer,
        selection: Selection,
        composition: Option<TextRange>,
    ) {
        log::warn!("edit did not originate at the caret; dropping spans for this edit");
        self.commit_edit(buffer, SpanSet::new(), selection, composition);
    }

    fn restore(&mut self, state: EditorState) {
        self.active = state.spans.active_at(state.selection.caret);
        self.state = state;
    }
}
