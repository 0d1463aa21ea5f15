//! Notes: the persistence projection of a finished editing session
//!
//! A note is the flattened, serializable form of (title, text, spans).
//! Notes are created when a session commits and are immutable afterwards;
//! storage of the span records is manual and format-stable rather than
//! tied to any in-memory representation.

use crate::models::span::{HeadingLevel, StyleTag};
use crate::text::spans::SpanSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The flat tag vocabulary notes are stored with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpanKind {
    Bold,
    Italic,
    Underline,
    Title,
    Subtitle,
    Body,
}

impl SpanKind {
    /// Precedence rank used to order records starting at the same offset:
    /// Title beats Bold beats Italic beats Underline beats Subtitle beats
    /// Body
    fn precedence(self) -> u8 {
        match self {
            SpanKind::Title => 0,
            SpanKind::Bold => 1,
            SpanKind::Italic => 2,
            SpanKind::Underline => 3,
            SpanKind::Subtitle => 4,
            SpanKind::Body => 5,
        }
    }
}

impl From<StyleTag> for SpanKind {
    fn from(tag: StyleTag) -> Self {
        match tag {
            StyleTag::Bold => SpanKind::Bold,
            StyleTag::Italic => SpanKind::Italic,
            StyleTag::Underline => SpanKind::Underline,
            StyleTag::Heading(HeadingLevel::Title) => SpanKind::Title,
            StyleTag::Heading(HeadingLevel::Subtitle) => SpanKind::Subtitle,
            StyleTag::Heading(HeadingLevel::Body) => SpanKind::Body,
        }
    }
}

/// One stored formatting record: a character range and a single kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSpan {
    pub start: usize,
    pub end: usize,
    pub kind: SpanKind,
}

/// A committed note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub spans: Vec<NoteSpan>,
}

impl Note {
    /// Project a finished session into a note with a fresh id
    ///
    /// Spans flatten one-to-one (each carries a single tag already) and are
    /// ordered by start offset, precedence, then end. The sort is stable,
    /// so records tied on all three keys keep their insertion order and a
    /// consumer reading front to back sees later formatting last.
    pub fn new(title: impl Into<String>, content: impl Into<String>, spans: &SpanSet) -> Self {
        let mut records: Vec<NoteSpan> = spans
            .iter()
            .map(|span| NoteSpan {
                start: span.start,
                end: span.end,
                kind: span.tag.into(),
            })
            .collect();
        records.sort_by_key(|record| (record.start, record.kind.precedence(), record.end));

        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            spans: records,
        }
    }
}
