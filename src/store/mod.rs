//! In-memory note store
//!
//! The persistence collaborator on the other side of `commit`: committed
//! notes are handed here and read back for listing. Notes are immutable
//! once added; there is no edit-existing-note flow.

use crate::models::note::Note;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Collection of committed notes in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a committed note
    pub fn add(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// Look up a note by id
    pub fn get(&self, id: &Uuid) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == *id)
    }

    /// All notes in insertion order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Serialize the whole store to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Load a store from its JSON form
    pub fn from_json(json: &str) -> serde_json::Result<NoteStore> {
        serde_json::from_str(json)
    }
}
