//! Text buffer implementation
//!
//! Pure text storage addressed by character offsets. Every offset in the
//! editing core is an offset into the sequence of Unicode scalar values,
//! never a byte offset: the bullet marker `•` is three bytes in UTF-8, and
//! spans over list lines must not drift when it appears.

use crate::text::cursor::TextRange;
use serde::{Deserialize, Serialize};

/// A text buffer addressed by character offsets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    /// Create a new empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text as a string slice
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Get the length in characters (not bytes)
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Convert a character offset to a byte offset
    ///
    /// `pos` may be at most the character length of the buffer.
    fn byte_offset(&self, pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(pos)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }

    /// Get the text covered by a character range
    pub fn slice(&self, range: TextRange) -> &str {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        &self.text[start..end]
    }

    /// Get the character at a position
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.text.chars().nth(pos)
    }

    /// Get the character immediately before a position
    pub fn char_before(&self, pos: usize) -> Option<char> {
        if pos == 0 {
            None
        } else {
            self.char_at(pos - 1)
        }
    }

    /// Replace a character range with new text
    pub fn splice(&mut self, range: TextRange, replacement: &str) {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end);
        self.text.replace_range(start..end, replacement);
    }

    /// Get the start of the line containing `pos`
    ///
    /// The start is the offset just after the last newline strictly before
    /// `pos`, or 0 when there is none.
    pub fn line_start(&self, pos: usize) -> usize {
        self.text
            .chars()
            .take(pos)
            .enumerate()
            .filter(|(_, ch)| *ch == '\n')
            .map(|(i, _)| i + 1)
            .last()
            .unwrap_or(0)
    }

    /// Get the end of the line containing `pos`
    ///
    /// The end is the offset of the first newline at or after `pos`, or the
    /// buffer length when there is none. The newline itself is excluded.
    pub fn line_end(&self, pos: usize) -> usize {
        match self.text.chars().skip(pos).position(|ch| ch == '\n') {
            Some(offset) => pos + offset,
            None => self.len(),
        }
    }

    /// Get the bounds of the line containing `pos`, excluding the newline
    pub fn line_bounds(&self, pos: usize) -> TextRange {
        TextRange::new(self.line_start(pos), self.line_end(pos))
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}
