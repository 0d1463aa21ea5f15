//! List marker detection and injection
//!
//! Two kinds of line prefix are recognized: the bullet marker `"• "`
//! (U+2022 followed by a space) and numbered markers `"{n}. "`. Pressing
//! Enter inside a list line continues the list; pressing Enter on an empty
//! item exits it. Toolbar toggles add or strip markers on the current line.
//!
//! The marker grammar is fixed, so prefixes are parsed by direct scanning
//! (digits, then `". "`) rather than a regex. Anything that does not parse
//! falls through to plain insertion.

use crate::text::buffer::TextBuffer;
use crate::text::cursor::{Selection, TextRange};
use crate::text::spans::EditOp;

/// Bullet list marker: U+2022 followed by a space
pub const BULLET_MARKER: &str = "• ";

/// A line-level marker adjustment: the adjusted text, where the selection
/// lands, and the op to remap spans of the pre-edit text by
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineEdit {
    pub buffer: TextBuffer,
    pub selection: Selection,
    pub op: EditOp,
}

/// Handle a newline typed at the end of a list line
///
/// `buffer` is the proposed text with the newline already inserted at
/// `old_caret`; `caret` is the proposed caret (one past the newline).
/// Returns `None` when the previous line is not a list item, in which case
/// the caller falls through to plain insertion.
pub(crate) fn continue_on_newline(
    buffer: &TextBuffer,
    caret: usize,
    old_caret: usize,
) -> Option<LineEdit> {
    let newline_pos = caret - 1;
    let line_start = buffer.line_start(newline_pos);
    let prev_line = buffer.slice(TextRange::new(line_start, newline_pos)).to_string();

    // Empty bullet item: Enter removes the marker and the newline,
    // leaving the cursor on a blank line.
    if prev_line.trim() == "•" {
        return Some(remove_marker_line(buffer, line_start, caret, old_caret));
    }

    if prev_line.starts_with(BULLET_MARKER) {
        return Some(insert_marker(buffer, caret, old_caret, BULLET_MARKER));
    }

    if let Some((number, _)) = parse_numbered_prefix(&prev_line) {
        if prev_line.trim() == format!("{}.", number) {
            // Empty numbered item exits the list like an empty bullet
            return Some(remove_marker_line(buffer, line_start, caret, old_caret));
        }
        let next = number.checked_add(1)?;
        return Some(insert_marker(buffer, caret, old_caret, &format!("{}. ", next)));
    }

    None
}

/// Toggle the bullet marker on the line containing the selection start
pub(crate) fn toggle_bullet(buffer: &TextBuffer, selection: Selection) -> LineEdit {
    let line = buffer.line_bounds(selection.start());
    let content = buffer.slice(line).to_string();

    if content.starts_with(BULLET_MARKER) {
        replace_prefix(buffer, line.start, BULLET_MARKER.chars().count(), "", selection)
    } else {
        // Strip a numbered marker if present, then prepend the bullet
        let stripped = parse_numbered_prefix(&content).map_or(0, |(_, len)| len);
        replace_prefix(buffer, line.start, stripped, BULLET_MARKER, selection)
    }
}

/// Toggle a numbered marker on the line containing the selection start
///
/// Toggling on always inserts `"1. "`; continuation numbering is derived
/// from the previous line on Enter, not here.
pub(crate) fn toggle_numbered(buffer: &TextBuffer, selection: Selection) -> LineEdit {
    let line = buffer.line_bounds(selection.start());
    let content = buffer.slice(line).to_string();

    if let Some((_, len)) = parse_numbered_prefix(&content) {
        replace_prefix(buffer, line.start, len, "", selection)
    } else {
        let stripped = if content.starts_with(BULLET_MARKER) {
            BULLET_MARKER.chars().count()
        } else {
            0
        };
        replace_prefix(buffer, line.start, stripped, "1. ", selection)
    }
}

/// Parse a numbered list prefix: one or more ASCII digits, then `". "`
///
/// Returns the number and the prefix length in characters. Numbers too
/// large for `u64` fail to parse and the line is treated as plain text.
fn parse_numbered_prefix(line: &str) -> Option<(u64, usize)> {
    let digits: String = line.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() || !line[digits.len()..].starts_with(". ") {
        return None;
    }
    let number = digits.parse().ok()?;
    Some((number, digits.chars().count() + 2))
}

/// Remove `[line_start, caret)` from the proposed text: the marker line and
/// the just-typed newline. The op is expressed against the pre-edit text,
/// where only the marker occupied `[line_start, old_caret)`.
fn remove_marker_line(
    buffer: &TextBuffer,
    line_start: usize,
    caret: usize,
    old_caret: usize,
) -> LineEdit {
    let mut out = buffer.clone();
    out.splice(TextRange::new(line_start, caret), "");
    LineEdit {
        buffer: out,
        selection: Selection::collapsed(line_start),
        op: EditOp::Delete { start: line_start, end: old_caret },
    }
}

/// Insert a marker at the proposed caret. Against the pre-edit text this is
/// one insertion of the newline plus the marker.
fn insert_marker(buffer: &TextBuffer, caret: usize, old_caret: usize, marker: &str) -> LineEdit {
    let marker_len = marker.chars().count();
    let mut out = buffer.clone();
    out.splice(TextRange::new(caret, caret), marker);
    LineEdit {
        buffer: out,
        selection: Selection::collapsed(caret + marker_len),
        op: EditOp::Insert { at: old_caret, len: 1 + marker_len },
    }
}

/// Replace the first `removed` characters of a line with `replacement` and
/// shift the selection by the exact delta, clamped to the line start
fn replace_prefix(
    buffer: &TextBuffer,
    line_start: usize,
    removed: usize,
    replacement: &str,
    selection: Selection,
) -> LineEdit {
    let inserted = replacement.chars().count();
    let mut out = buffer.clone();
    out.splice(TextRange::new(line_start, line_start + removed), replacement);

    let delta = inserted as i64 - removed as i64;
    let shift = |pos: usize| -> usize {
        if pos < line_start {
            pos
        } else {
            (pos as i64 + delta).max(line_start as i64) as usize
        }
    };

    LineEdit {
        buffer: out,
        selection: Selection::new(shift(selection.anchor), shift(selection.caret)),
        op: EditOp::Replace {
            start: line_start,
            end: line_start + removed,
            inserted_len: inserted,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn newline_typed(old_text: &str, old_caret: usize) -> (TextBuffer, usize) {
        let mut buffer = TextBuffer::from(old_text);
        buffer.splice(TextRange::new(old_caret, old_caret), "\n");
        (buffer, old_caret + 1)
    }

    #[test]
    fn test_parse_numbered_prefix() {
        assert_eq!(parse_numbered_prefix("1. a"), Some((1, 3)));
        assert_eq!(parse_numbered_prefix("12. "), Some((12, 4)));
        assert_eq!(parse_numbered_prefix("1."), None);
        assert_eq!(parse_numbered_prefix("1a. "), None);
        assert_eq!(parse_numbered_prefix(". "), None);
        assert_eq!(parse_numbered_prefix(" 1. "), None);
        // Too large for u64: treated as plain text
        assert_eq!(parse_numbered_prefix("99999999999999999999. x"), None);
    }

    #[test]
    fn test_bullet_continuation() {
        let (buffer, caret) = newline_typed("• abc", 5);
        let edit = continue_on_newline(&buffer, caret, 5).unwrap();

        assert_eq!(edit.buffer.as_str(), "• abc\n• ");
        assert_eq!(edit.selection, Selection::collapsed(8));
        assert_eq!(edit.op, EditOp::Insert { at: 5, len: 3 });
    }

    #[test]
    fn test_empty_bullet_exits_list() {
        let (buffer, caret) = newline_typed("• ", 2);
        let edit = continue_on_newline(&buffer, caret, 2).unwrap();

        assert_eq!(edit.buffer.as_str(), "");
        assert_eq!(edit.selection, Selection::collapsed(0));
        assert_eq!(edit.op, EditOp::Delete { start: 0, end: 2 });
    }

    #[test]
    fn test_numbered_continuation_increments() {
        let (buffer, caret) = newline_typed("1. a", 4);
        let edit = continue_on_newline(&buffer, caret, 4).unwrap();

        assert_eq!(edit.buffer.as_str(), "1. a\n2. ");
        assert_eq!(edit.selection, Selection::collapsed(8));
    }

    #[test]
    fn test_numbered_continuation_on_later_line() {
        let (buffer, caret) = newline_typed("x\n7. abc", 8);
        let edit = continue_on_newline(&buffer, caret, 8).unwrap();

        assert_eq!(edit.buffer.as_str(), "x\n7. abc\n8. ");
        assert_eq!(edit.selection, Selection::collapsed(12));
    }

    #[test]
    fn test_empty_numbered_item_exits_list() {
        let (buffer, caret) = newline_typed("1. a\n2. ", 8);
        let edit = continue_on_newline(&buffer, caret, 8).unwrap();

        assert_eq!(edit.buffer.as_str(), "1. a\n");
        assert_eq!(edit.selection, Selection::collapsed(5));
        assert_eq!(edit.op, EditOp::Delete { start: 5, end: 8 });
    }

    #[test]
    fn test_plain_line_falls_through() {
        let (buffer, caret) = newline_typed("hello", 5);
        assert!(continue_on_newline(&buffer, caret, 5).is_none());

        // "1." without the trailing space is not a marker
        let (buffer, caret) = newline_typed("1.", 2);
        assert!(continue_on_newline(&buffer, caret, 2).is_none());
    }

    #[test]
    fn test_toggle_bullet_on() {
        let buffer = TextBuffer::from("abc");
        let edit = toggle_bullet(&buffer, Selection::collapsed(2));

        assert_eq!(edit.buffer.as_str(), "• abc");
        assert_eq!(edit.selection, Selection::collapsed(4));
    }

    #[test]
    fn test_toggle_bullet_off_clamps_to_line_start() {
        let buffer = TextBuffer::from("x\n• abc");
        let edit = toggle_bullet(&buffer, Selection::collapsed(3));

        assert_eq!(edit.buffer.as_str(), "x\nabc");
        // Caret was inside the stripped marker: clamped to the line start
        assert_eq!(edit.selection, Selection::collapsed(2));
    }

    #[test]
    fn test_toggle_bullet_replaces_numbered_marker() {
        let buffer = TextBuffer::from("3. abc");
        let edit = toggle_bullet(&buffer, Selection::collapsed(6));

        assert_eq!(edit.buffer.as_str(), "• abc");
        assert_eq!(edit.selection, Selection::collapsed(5));
    }

    #[test]
    fn test_toggle_numbered_on_and_off() {
        let buffer = TextBuffer::from("abc");
        let edit = toggle_numbered(&buffer, Selection::collapsed(1));
        assert_eq!(edit.buffer.as_str(), "1. abc");
        assert_eq!(edit.selection, Selection::collapsed(4));

        let edit = toggle_numbered(&edit.buffer, edit.selection);
        assert_eq!(edit.buffer.as_str(), "abc");
        assert_eq!(edit.selection, Selection::collapsed(1));
    }

    #[test]
    fn test_toggle_numbered_replaces_bullet() {
        let buffer = TextBuffer::from("• abc");
        let edit = toggle_numbered(&buffer, Selection::collapsed(5));

        assert_eq!(edit.buffer.as_str(), "1. abc");
        assert_eq!(edit.selection, Selection::collapsed(6));
    }

    #[test]
    fn test_toggle_keeps_earlier_lines_untouched() {
        let buffer = TextBuffer::from("first\nsecond");
        let edit = toggle_bullet(&buffer, Selection::new(8, 10));

        assert_eq!(edit.buffer.as_str(), "first\n• second");
        assert_eq!(edit.selection, Selection::new(10, 12));
    }
}
