//! Span layer for formatting metadata on text
//!
//! Stores formatting spans separately from text, linked by character
//! offsets. Spans automatically track position changes when text is edited:
//! every mutation is classified into an [`EditOp`] and the whole set is
//! remapped through [`SpanSet::translate`].
//!
//! Invariant: after every translation, all surviving spans lie within
//! `[0, len]` of the owning buffer. A violation is a programming fault, not
//! a runtime condition, and trips a debug assertion.

use crate::models::span::{HeadingLevel, Span, StyleTag};
use crate::text::cursor::TextRange;
use serde::{Deserialize, Serialize};

/// A classified text mutation, expressed in character offsets of the text
/// *before* the edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOp {
    /// Cursor moved, text untouched
    SelectionOnly,
    /// `len` characters inserted at `at`
    Insert { at: usize, len: usize },
    /// Characters in `[start, end)` removed
    Delete { start: usize, end: usize },
    /// Characters in `[start, end)` replaced by `inserted_len` new ones
    Replace { start: usize, end: usize, inserted_len: usize },
}

/// The styles the next typed character will carry
///
/// Derived from the span set by looking at the character before the caret;
/// never persisted. Heading levels are mutually exclusive, which the
/// `Option` encodes by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStyles {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub heading: Option<HeadingLevel>,
}

impl ActiveStyles {
    /// Check if no styles are active
    pub fn is_empty(&self) -> bool {
        !self.bold && !self.italic && !self.underline && self.heading.is_none()
    }

    /// Clear all active styles
    pub fn clear(&mut self) {
        *self = ActiveStyles::default();
    }

    /// Check if a tag is active
    pub fn contains(&self, tag: StyleTag) -> bool {
        match tag {
            StyleTag::Bold => self.bold,
            StyleTag::Italic => self.italic,
            StyleTag::Underline => self.underline,
            StyleTag::Heading(level) => self.heading == Some(level),
        }
    }

    /// Mark a tag as active
    ///
    /// Setting a heading level replaces any previously active level.
    pub fn insert(&mut self, tag: StyleTag) {
        match tag {
            StyleTag::Bold => self.bold = true,
            StyleTag::Italic => self.italic = true,
            StyleTag::Underline => self.underline = true,
            StyleTag::Heading(level) => self.heading = Some(level),
        }
    }

    /// Toggle a tag
    ///
    /// Bold, italic, and underline flip on and off. Heading tags only set:
    /// selecting a level replaces the current one and clears the others.
    pub fn toggle(&mut self, tag: StyleTag) {
        match tag {
            StyleTag::Bold => self.bold = !self.bold,
            StyleTag::Italic => self.italic = !self.italic,
            StyleTag::Underline => self.underline = !self.underline,
            StyleTag::Heading(level) => self.heading = Some(level),
        }
    }

    /// List the active tags
    pub fn tags(&self) -> Vec<StyleTag> {
        let mut tags = Vec::new();
        if self.bold {
            tags.push(StyleTag::Bold);
        }
        if self.italic {
            tags.push(StyleTag::Italic);
        }
        if self.underline {
            tags.push(StyleTag::Underline);
        }
        if let Some(level) = self.heading {
            tags.push(StyleTag::Heading(level));
        }
        tags
    }
}

/// Collection of formatting spans over one text buffer
///
/// Spans are kept in insertion order. Different tags may overlap freely;
/// conflicting tags (the same tag, or two heading levels) are carved apart
/// on stamp so the set never accumulates duplicates over a range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanSet {
    spans: Vec<Span>,
}

impl SpanSet {
    /// Create a new empty span set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from spans, dropping invalid ones
    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self {
            spans: spans.into_iter().filter(Span::is_valid).collect(),
        }
    }

    /// Check if the set has no spans
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Get the spans in insertion order
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Iterate over the spans in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter()
    }

    /// Remap every span through an edit
    ///
    /// Returns a new set; the input is untouched. Spans that collapse to
    /// zero length are dropped. Boundary policy on insert: a span ending
    /// exactly at the insertion point does not extend (newly typed text
    /// takes whatever the active styles say), a span the insertion is
    /// interior to does.
    pub fn translate(&self, op: EditOp) -> SpanSet {
        match op {
            EditOp::SelectionOnly => self.clone(),
            EditOp::Insert { at, len } => self.map_positions(|pos, is_end| {
                // Exclusive ends extend only when the insertion is interior,
                // hence the strict comparison for ends.
                if (is_end && pos > at) || (!is_end && pos >= at) {
                    pos + len
                } else {
                    pos
                }
            }),
            EditOp::Delete { start, end } => {
                let removed = end.saturating_sub(start);
                self.map_positions(|pos, _| {
                    if pos <= start {
                        pos
                    } else if pos >= end {
                        pos - removed
                    } else {
                        start
                    }
                })
            }
            EditOp::Replace { start, end, inserted_len } => self
                .translate(EditOp::Delete { start, end })
                .translate(EditOp::Insert { at: start, len: inserted_len }),
        }
    }

    /// Add one span per tag exactly covering `range`
    ///
    /// Existing spans whose tag conflicts with a stamped tag are carved out
    /// of the range first, so the new formatting wins over anything it
    /// overlaps and same-tag records never stack up.
    pub fn stamp(&self, range: TextRange, tags: &[StyleTag]) -> SpanSet {
        if range.is_empty() || tags.is_empty() {
            return self.clone();
        }
        let mut spans = Vec::with_capacity(self.spans.len() + tags.len());
        for span in &self.spans {
            if tags.iter().any(|tag| tag.conflicts_with(&span.tag)) {
                carve(span, range, &mut spans);
            } else {
                spans.push(*span);
            }
        }
        for &tag in tags {
            spans.push(Span::new(range.start, range.end, tag));
        }
        SpanSet { spans }
    }

    /// Remove all formatting from `range`, splitting spans that straddle it
    pub fn clear_range(&self, range: TextRange) -> SpanSet {
        if range.is_empty() {
            return self.clone();
        }
        let mut spans = Vec::with_capacity(self.spans.len());
        for span in &self.spans {
            carve(span, range, &mut spans);
        }
        SpanSet { spans }
    }

    /// Get the styles active at a cursor position
    ///
    /// Looks at the character *before* `position`, the standard editor
    /// convention: typed characters inherit the formatting of what precedes
    /// the caret. Position 0 has nothing before it and yields the empty set.
    pub fn active_at(&self, position: usize) -> ActiveStyles {
        let mut active = ActiveStyles::default();
        if position == 0 {
            return active;
        }
        let index = position - 1;
        for span in &self.spans {
            if span.covers(index) {
                active.insert(span.tag);
            }
        }
        active
    }

    /// Assert every span lies within a buffer of `len` characters
    ///
    /// Out-of-range spans after a translate are a bug in the classification
    /// or remap logic; fail fast in development builds.
    pub fn debug_assert_in_bounds(&self, len: usize) {
        for span in &self.spans {
            debug_assert!(
                span.start < span.end && span.end <= len,
                "span {:?} out of bounds for buffer of length {}",
                span,
                len
            );
        }
    }

    fn map_positions(&self, map: impl Fn(usize, bool) -> usize) -> SpanSet {
        let spans = self
            .spans
            .iter()
            .map(|span| Span::new(map(span.start, false), map(span.end, true), span.tag))
            .filter(Span::is_valid)
            .collect();
        SpanSet { spans }
    }
}

/// Push the parts of `span` outside `range` onto `out`
fn carve(span: &Span, range: TextRange, out: &mut Vec<Span>) {
    let left = Span::new(span.start, span.end.min(range.start), span.tag);
    if left.is_valid() {
        out.push(left);
    }
    let right = Span::new(span.start.max(range.end), span.end, span.tag);
    if right.is_valid() {
        out.push(right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::span::HeadingLevel::*;
    use crate::models::span::StyleTag::*;

    fn set(spans: &[(usize, usize, StyleTag)]) -> SpanSet {
        SpanSet::from_spans(spans.iter().map(|&(s, e, t)| Span::new(s, e, t)).collect())
    }

    #[test]
    fn test_insert_shifts_spans_after() {
        let spans = set(&[(0, 2, Bold), (4, 6, Italic)]);
        let out = spans.translate(EditOp::Insert { at: 3, len: 2 });
        assert_eq!(out.spans(), &[Span::new(0, 2, Bold), Span::new(6, 8, Italic)]);
    }

    #[test]
    fn test_insert_interior_extends_span() {
        let spans = set(&[(1, 5, Bold)]);
        let out = spans.translate(EditOp::Insert { at: 3, len: 4 });
        assert_eq!(out.spans(), &[Span::new(1, 9, Bold)]);
    }

    #[test]
    fn test_insert_at_span_end_does_not_extend() {
        // Typing right after a bold run: the new text takes whatever the
        // active styles say, never an automatic extension.
        let spans = set(&[(0, 3, Bold)]);
        let out = spans.translate(EditOp::Insert { at: 3, len: 2 });
        assert_eq!(out.spans(), &[Span::new(0, 3, Bold)]);
    }

    #[test]
    fn test_insert_at_span_start_shifts_whole_span() {
        let spans = set(&[(3, 5, Underline)]);
        let out = spans.translate(EditOp::Insert { at: 3, len: 1 });
        assert_eq!(out.spans(), &[Span::new(4, 6, Underline)]);
    }

    #[test]
    fn test_delete_before_and_after() {
        let spans = set(&[(0, 2, Bold), (6, 8, Italic)]);
        let out = spans.translate(EditOp::Delete { start: 3, end: 5 });
        assert_eq!(out.spans(), &[Span::new(0, 2, Bold), Span::new(4, 6, Italic)]);
    }

    #[test]
    fn test_delete_shrinks_overlapping_span() {
        // Span straddles the deleted range: loses exactly the deleted part
        let spans = set(&[(2, 8, Bold)]);
        let out = spans.translate(EditOp::Delete { start: 4, end: 6 });
        assert_eq!(out.spans(), &[Span::new(2, 6, Bold)]);
    }

    #[test]
    fn test_delete_drops_contained_span() {
        let spans = set(&[(3, 5, Italic)]);
        let out = spans.translate(EditOp::Delete { start: 2, end: 6 });
        assert!(out.is_empty());
    }

    #[test]
    fn test_delete_truncates_partial_overlap() {
        let spans = set(&[(1, 5, Bold)]);
        let out = spans.translate(EditOp::Delete { start: 3, end: 7 });
        assert_eq!(out.spans(), &[Span::new(1, 3, Bold)]);

        let spans = set(&[(4, 8, Bold)]);
        let out = spans.translate(EditOp::Delete { start: 2, end: 6 });
        assert_eq!(out.spans(), &[Span::new(2, 4, Bold)]);
    }

    #[test]
    fn test_replace_composes_delete_then_insert() {
        // Straddling span shrinks by the deleted part, then the insertion is
        // interior to what remains and extends it.
        let spans = set(&[(2, 10, Bold)]);
        let out = spans.translate(EditOp::Replace { start: 4, end: 8, inserted_len: 3 });
        assert_eq!(out.spans(), &[Span::new(2, 9, Bold)]);
    }

    #[test]
    fn test_stamp_adds_one_span_per_tag() {
        let spans = SpanSet::new();
        let out = spans.stamp(TextRange::new(2, 5), &[Bold, Italic]);
        assert_eq!(out.spans(), &[Span::new(2, 5, Bold), Span::new(2, 5, Italic)]);
    }

    #[test]
    fn test_stamp_carves_same_tag_overlap() {
        let spans = set(&[(0, 10, Bold)]);
        let out = spans.stamp(TextRange::new(3, 6), &[Bold]);
        assert_eq!(
            out.spans(),
            &[Span::new(0, 3, Bold), Span::new(6, 10, Bold), Span::new(3, 6, Bold)]
        );
    }

    #[test]
    fn test_stamp_leaves_other_tags_alone() {
        let spans = set(&[(0, 10, Italic)]);
        let out = spans.stamp(TextRange::new(3, 6), &[Bold]);
        assert_eq!(out.spans(), &[Span::new(0, 10, Italic), Span::new(3, 6, Bold)]);
    }

    #[test]
    fn test_stamp_heading_replaces_other_level() {
        let spans = set(&[(0, 8, Heading(Subtitle))]);
        let out = spans.stamp(TextRange::new(2, 6), &[Heading(Title)]);
        assert_eq!(
            out.spans(),
            &[
                Span::new(0, 2, Heading(Subtitle)),
                Span::new(6, 8, Heading(Subtitle)),
                Span::new(2, 6, Heading(Title)),
            ]
        );
    }

    #[test]
    fn test_stamp_empty_range_is_noop() {
        let spans = set(&[(0, 3, Bold)]);
        let out = spans.stamp(TextRange::new(2, 2), &[Italic]);
        assert_eq!(out, spans);
    }

    #[test]
    fn test_clear_range_splits_straddling_spans() {
        let spans = set(&[(0, 10, Bold), (2, 4, Italic)]);
        let out = spans.clear_range(TextRange::new(3, 7));
        assert_eq!(
            out.spans(),
            &[Span::new(0, 3, Bold), Span::new(7, 10, Bold), Span::new(2, 3, Italic)]
        );
    }

    #[test]
    fn test_active_at_looks_behind() {
        // Text "AB" with bold over [0,1): caret at 1 sits after the bold A
        let spans = set(&[(0, 1, Bold)]);
        assert!(spans.active_at(1).contains(Bold));
        assert!(spans.active_at(0).is_empty());
        assert!(spans.active_at(2).is_empty());
    }

    #[test]
    fn test_active_at_collects_overlapping_tags() {
        let spans = set(&[(0, 4, Bold), (2, 4, Italic), (0, 4, Heading(Title))]);
        let active = spans.active_at(3);
        assert!(active.bold);
        assert!(active.italic);
        assert_eq!(active.heading, Some(Title));
    }

    #[test]
    fn test_active_styles_heading_exclusive() {
        let mut active = ActiveStyles::default();
        active.toggle(Heading(Subtitle));
        active.toggle(Heading(Title));
        assert_eq!(active.heading, Some(Title));
        assert!(!active.contains(Heading(Subtitle)));
    }

    #[test]
    fn test_spans_stay_in_bounds_through_edit_sequence() {
        let mut spans = set(&[(0, 4, Bold), (2, 9, Italic), (5, 10, Underline)]);
        let mut len = 10usize;
        let edits = [
            EditOp::Insert { at: 4, len: 3 },
            EditOp::Delete { start: 0, end: 2 },
            EditOp::Replace { start: 1, end: 6, inserted_len: 2 },
            EditOp::Delete { start: 2, end: 7 },
            EditOp::Insert { at: 0, len: 1 },
        ];
        for op in edits {
            spans = spans.translate(op);
            len = match op {
                EditOp::SelectionOnly => len,
                EditOp::Insert { len: n, .. } => len + n,
                EditOp::Delete { start, end } => len - (end - start),
                EditOp::Replace { start, end, inserted_len } => len - (end - start) + inserted_len,
            };
            spans.debug_assert_in_bounds(len);
            for span in spans.iter() {
                assert!(span.start < span.end && span.end <= len);
            }
        }
    }
}
