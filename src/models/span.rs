//! Style tags and formatting spans
//!
//! A span is a half-open character range carrying exactly one formatting
//! attribute. Overlapping attributes over the same text are separate spans
//! (bold+italic is two records, not one).

use crate::text::cursor::TextRange;
use serde::{Deserialize, Serialize};

/// Heading level for typography spans
///
/// Heading levels are mutually exclusive over a range: text is a title, a
/// subtitle, or body, never two at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    Title,
    Subtitle,
    Body,
}

/// A single formatting attribute
///
/// The tag set is closed: bold, italic, underline, and one heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleTag {
    Bold,
    Italic,
    Underline,
    Heading(HeadingLevel),
}

impl StyleTag {
    /// Check if this tag is a heading level
    pub fn is_heading(&self) -> bool {
        matches!(self, StyleTag::Heading(_))
    }

    /// Check if two tags cannot coexist over the same range
    ///
    /// Equal tags conflict (same-tag spans must not duplicate), and any two
    /// heading tags conflict (levels are mutually exclusive).
    pub fn conflicts_with(&self, other: &StyleTag) -> bool {
        self == other || (self.is_heading() && other.is_heading())
    }
}

/// A formatting range over a text buffer
///
/// Invariant: `0 <= start < end <= len` of the owning buffer. Offsets are
/// character offsets. Zero-length spans are invalid and dropped by the
/// span set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub tag: StyleTag,
}

impl Span {
    pub fn new(start: usize, end: usize, tag: StyleTag) -> Self {
        Self { start, end, tag }
    }

    /// Check if this span is valid (non-empty)
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Get the range covered by this span
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// Check if this span covers the character at `pos`
    pub fn covers(&self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }
}
