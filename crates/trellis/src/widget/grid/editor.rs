//! In-place text editing of a single cell.
//!
//! An [`EditSession`] owns the live text of the cell being edited. The cell
//! in the model is only written when the session is committed; cancelling
//! simply drops the session.
//!
//! Positions are byte offsets into the live text and always sit on grapheme
//! cluster boundaries. The selection is an unordered pair: `anchor` stays
//! put while extending and `caret` follows the pointer or arrow keys.

use std::time::{Duration, Instant};

use trellis_render::TextMetrics;
use unicode_segmentation::UnicodeSegmentation;

/// Caret movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretMove {
    Left,
    Right,
    WordLeft,
    WordRight,
    Home,
    End,
}

/// Live editing state for one cell.
#[derive(Debug, Clone)]
pub struct EditSession {
    column: usize,
    row: usize,
    text: String,
    original_text: String,
    anchor: usize,
    caret: usize,
    offset_x: f32,
    blink_epoch: Instant,
}

impl EditSession {
    /// Start editing `(column, row)` seeded with `text`, all of it selected.
    pub fn new(column: usize, row: usize, text: impl Into<String>, now: Instant) -> Self {
        let text = text.into();
        Self {
            column,
            row,
            anchor: 0,
            caret: text.len(),
            original_text: text.clone(),
            text,
            offset_x: 0.0,
            blink_epoch: now,
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// The live text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The cell text when editing started.
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Whether the live text differs from the original.
    pub fn is_modified(&self) -> bool {
        self.text != self.original_text
    }

    /// The selection as `(anchor, caret)`. Either end may be larger.
    pub fn selection(&self) -> (usize, usize) {
        (self.anchor, self.caret)
    }

    /// The selection as an ordered `(start, end)` pair.
    pub fn selection_range(&self) -> (usize, usize) {
        (self.anchor.min(self.caret), self.anchor.max(self.caret))
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn has_selection(&self) -> bool {
        self.anchor != self.caret
    }

    /// The selected text.
    pub fn selected_text(&self) -> &str {
        let (start, end) = self.selection_range();
        &self.text[start..end]
    }

    /// Horizontal scroll of the text within the cell.
    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace the selection with `text` and put the caret after it.
    ///
    /// Line breaks become single spaces since cells hold one line.
    pub fn insert_text(&mut self, text: &str) {
        let text = normalize_line_breaks(text);
        self.delete_selection();
        self.text.insert_str(self.caret, &text);
        self.caret += text.len();
        self.anchor = self.caret;
        self.touch();
    }

    /// Delete the selection, or the grapheme before the caret.
    pub fn backspace(&mut self) {
        if !self.delete_selection() && self.caret > 0 {
            let prev = prev_grapheme_boundary(&self.text, self.caret);
            self.text.replace_range(prev..self.caret, "");
            self.caret = prev;
            self.anchor = prev;
        }
        self.touch();
    }

    /// Delete the selection, or the grapheme after the caret.
    pub fn delete_forward(&mut self) {
        if !self.delete_selection() && self.caret < self.text.len() {
            let next = next_grapheme_boundary(&self.text, self.caret);
            self.text.replace_range(self.caret..next, "");
        }
        self.touch();
    }

    /// Delete the selection, or back to the start of the previous word.
    pub fn delete_word_before(&mut self) {
        if !self.delete_selection() && self.caret > 0 {
            let start = word_boundary_before(&self.text, self.caret);
            self.text.replace_range(start..self.caret, "");
            self.caret = start;
            self.anchor = start;
        }
        self.touch();
    }

    /// Remove and return the selected text.
    pub fn cut_selection(&mut self) -> Option<String> {
        if !self.has_selection() {
            return None;
        }
        let cut = self.selected_text().to_owned();
        self.delete_selection();
        self.touch();
        Some(cut)
    }

    fn delete_selection(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        let (start, end) = self.selection_range();
        self.text.replace_range(start..end, "");
        self.caret = start;
        self.anchor = start;
        true
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Set the selection. Out-of-range ends are clamped to the text and
    /// snapped to the nearest grapheme boundary.
    pub fn set_selection(&mut self, anchor: usize, caret: usize) {
        self.anchor = snap_to_grapheme_boundary(&self.text, anchor);
        self.caret = snap_to_grapheme_boundary(&self.text, caret);
        self.touch();
    }

    /// Select the whole text.
    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.caret = self.text.len();
        self.touch();
    }

    /// Move the caret, extending the selection when `extend` is set.
    ///
    /// Without `extend`, Left and Right collapse an existing selection to its
    /// start or end instead of moving.
    pub fn move_caret(&mut self, direction: CaretMove, extend: bool) {
        let (start, end) = self.selection_range();
        let target = match direction {
            CaretMove::Left if !extend && self.has_selection() => start,
            CaretMove::Right if !extend && self.has_selection() => end,
            CaretMove::Left => prev_grapheme_boundary(&self.text, self.caret),
            CaretMove::Right => next_grapheme_boundary(&self.text, self.caret),
            CaretMove::WordLeft => word_boundary_before(&self.text, self.caret),
            CaretMove::WordRight => word_boundary_after(&self.text, self.caret),
            CaretMove::Home => 0,
            CaretMove::End => self.text.len(),
        };
        self.caret = target;
        if !extend {
            self.anchor = target;
        }
        self.touch();
    }

    /// Caret offset nearest to `x`, measured from the text's left edge in the
    /// cell (before horizontal scroll).
    pub fn caret_at(&self, metrics: &dyn TextMetrics, x: f32, height: f32) -> usize {
        let index = metrics.hit_test_text_position(
            &self.text,
            f32::INFINITY,
            height,
            x + self.offset_x,
            0.0,
        );
        snap_to_grapheme_boundary(&self.text, index)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Pixel x of the caret within the unscrolled text.
    pub fn caret_x(&self, metrics: &dyn TextMetrics) -> f32 {
        metrics
            .hit_test_text_range(&self.text, self.caret, 0)
            .first()
            .map_or(0.0, |r| r.left())
    }

    /// Shift the horizontal offset just enough to keep the caret within
    /// `visible_width`.
    pub fn ensure_caret_visible(&mut self, metrics: &dyn TextMetrics, visible_width: f32) {
        let caret_x = self.caret_x(metrics);
        if caret_x < self.offset_x {
            self.offset_x = caret_x;
        } else if visible_width > 0.0 && caret_x - self.offset_x > visible_width {
            self.offset_x = caret_x - visible_width;
        }
        self.offset_x = self.offset_x.max(0.0);
    }

    /// Whether the caret is in the shown phase of its blink at `now`.
    ///
    /// Every edit or caret move restarts the blink in the shown phase.
    pub fn caret_visible(&self, now: Instant, blink: Duration) -> bool {
        if blink.is_zero() {
            return true;
        }
        let elapsed = now.saturating_duration_since(self.blink_epoch);
        (elapsed.as_millis() / blink.as_millis().max(1)) % 2 == 0
    }

    fn touch(&mut self) {
        self.blink_epoch = Instant::now();
    }

    pub(crate) fn into_text(self) -> String {
        self.text
    }
}

/// Keep only the composed characters that need more than one legacy byte.
pub fn filter_composition(text: &str) -> String {
    text.chars().filter(|c| u32::from(*c) > 0xFF).collect()
}

/// Replace `\r\n`, `\r` and `\n` with a single space each.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

fn prev_grapheme_boundary(text: &str, pos: usize) -> usize {
    text.grapheme_indices(true)
        .map(|(i, _)| i)
        .take_while(|i| *i < pos)
        .last()
        .unwrap_or(0)
}

fn next_grapheme_boundary(text: &str, pos: usize) -> usize {
    text.grapheme_indices(true)
        .map(|(i, g)| i + g.len())
        .find(|end| *end > pos)
        .unwrap_or(text.len())
}

fn snap_to_grapheme_boundary(text: &str, pos: usize) -> usize {
    let mut offset = 0;
    for grapheme in text.graphemes(true) {
        let next = offset + grapheme.len();
        if pos <= offset {
            return offset;
        }
        if pos < next {
            return if pos - offset <= next - pos { offset } else { next };
        }
        offset = next;
    }
    text.len()
}

fn word_boundary_before(text: &str, pos: usize) -> usize {
    let chars: Vec<(usize, char)> = text.char_indices().take_while(|(i, _)| *i < pos).collect();
    let mut idx = chars.len();
    while idx > 0 && !chars[idx - 1].1.is_alphanumeric() {
        idx -= 1;
    }
    while idx > 0 && chars[idx - 1].1.is_alphanumeric() {
        idx -= 1;
    }
    chars.get(idx).map_or(0, |(i, _)| *i)
}

fn word_boundary_after(text: &str, pos: usize) -> usize {
    let mut chars = text.char_indices().skip_while(|(i, _)| *i < pos).peekable();
    while chars.next_if(|(_, c)| c.is_alphanumeric()).is_some() {}
    while chars.next_if(|(_, c)| !c.is_alphanumeric()).is_some() {}
    chars.peek().map_or(text.len(), |(i, _)| *i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_render::FixedPitchMetrics;

    fn session(text: &str) -> EditSession {
        EditSession::new(2, 0, text, Instant::now())
    }

    #[test]
    fn test_starts_with_everything_selected() {
        let s = session("42");
        assert_eq!(s.selection_range(), (0, 2));
        assert_eq!(s.selected_text(), "42");
        assert!(!s.is_modified());
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut s = session("42");
        s.insert_text("7");
        assert_eq!(s.text(), "7");
        assert_eq!(s.selection(), (1, 1));
        assert_eq!(s.original_text(), "42");
    }

    #[test]
    fn test_insert_normalizes_line_breaks() {
        let mut s = session("");
        s.insert_text("a\r\nb\nc\rd");
        assert_eq!(s.text(), "a b c d");
        assert_eq!(s.caret(), 7);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut s = session("abc");
        s.move_caret(CaretMove::End, false);
        s.backspace();
        assert_eq!(s.text(), "ab");
        s.move_caret(CaretMove::Home, false);
        s.delete_forward();
        assert_eq!(s.text(), "b");
        s.move_caret(CaretMove::End, false);
        s.delete_forward();
        assert_eq!(s.text(), "b");
        s.move_caret(CaretMove::Home, false);
        s.backspace();
        assert_eq!(s.text(), "b");
        assert_eq!(s.caret(), 0);
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut s = session("ae\u{301}");
        s.move_caret(CaretMove::End, false);
        s.backspace();
        assert_eq!(s.text(), "a");
    }

    #[test]
    fn test_collapse_without_extend() {
        let mut s = session("hello");
        s.set_selection(1, 4);
        s.move_caret(CaretMove::Left, false);
        assert_eq!(s.selection(), (1, 1));

        s.set_selection(4, 1);
        s.move_caret(CaretMove::Right, false);
        assert_eq!(s.selection(), (4, 4));
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let mut s = session("hello");
        s.set_selection(2, 2);
        s.move_caret(CaretMove::Right, true);
        s.move_caret(CaretMove::Right, true);
        assert_eq!(s.selection(), (2, 4));
        assert_eq!(s.selected_text(), "ll");
        s.move_caret(CaretMove::Home, true);
        assert_eq!(s.selection(), (2, 0));
        assert_eq!(s.selection_range(), (0, 2));
    }

    #[test]
    fn test_word_movement() {
        let mut s = session("one two  three");
        s.move_caret(CaretMove::Home, false);
        s.move_caret(CaretMove::WordRight, false);
        assert_eq!(s.caret(), 4);
        s.move_caret(CaretMove::WordRight, false);
        assert_eq!(s.caret(), 9);
        s.move_caret(CaretMove::WordLeft, false);
        assert_eq!(s.caret(), 4);
        s.move_caret(CaretMove::End, false);
        s.delete_word_before();
        assert_eq!(s.text(), "one two  ");
    }

    #[test]
    fn test_set_selection_clamps_and_snaps() {
        let mut s = session("é");
        s.set_selection(1, 99);
        let (a, c) = s.selection();
        assert!(s.text().is_char_boundary(a));
        assert_eq!(c, 2);
    }

    #[test]
    fn test_cut_selection() {
        let mut s = session("hello");
        s.set_selection(1, 3);
        assert_eq!(s.cut_selection().as_deref(), Some("el"));
        assert_eq!(s.text(), "hlo");
        assert_eq!(s.cut_selection(), None);
    }

    #[test]
    fn test_filter_composition() {
        assert_eq!(filter_composition("a\u{e9}\u{65e5}\u{672c}"), "\u{65e5}\u{672c}");
        assert_eq!(filter_composition("abc"), "");
    }

    #[test]
    fn test_caret_scrolls_into_view() {
        let metrics = FixedPitchMetrics::new(10.0, 16.0);
        let mut s = session("");
        s.insert_text("abcdefghij");
        s.ensure_caret_visible(&metrics, 50.0);
        assert_eq!(s.offset_x(), 50.0);

        s.move_caret(CaretMove::Home, false);
        s.ensure_caret_visible(&metrics, 50.0);
        assert_eq!(s.offset_x(), 0.0);
    }

    #[test]
    fn test_caret_at_accounts_for_offset() {
        let metrics = FixedPitchMetrics::new(10.0, 16.0);
        let mut s = session("abcdefghij");
        s.ensure_caret_visible(&metrics, 50.0);
        assert_eq!(s.caret_at(&metrics, 0.0, 16.0), 5);
        assert_eq!(s.caret_at(&metrics, 21.0, 16.0), 7);
    }

    #[test]
    fn test_caret_blink() {
        let start = Instant::now();
        let s = EditSession::new(2, 0, "x", start);
        let blink = Duration::from_millis(500);
        assert!(s.caret_visible(start, blink));
        assert!(s.caret_visible(start + Duration::from_millis(499), blink));
        assert!(!s.caret_visible(start + Duration::from_millis(500), blink));
        assert!(s.caret_visible(start + Duration::from_millis(1000), blink));
        assert!(s.caret_visible(start + Duration::from_millis(700), Duration::ZERO));
    }

    #[test]
    fn test_edit_restarts_blink_in_shown_phase() {
        let blink = Duration::from_millis(500);
        let now = Instant::now();
        let Some(epoch) = now.checked_sub(Duration::from_millis(750)) else {
            return;
        };
        let mut s = EditSession::new(2, 0, "x", epoch);
        assert!(!s.caret_visible(now, blink));

        s.insert_text("y");
        assert!(s.caret_visible(now, blink));
    }
}
