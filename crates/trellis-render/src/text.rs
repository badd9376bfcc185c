//! Text measurement capability.
//!
//! Widgets lay out and hit-test single-line text through [`TextMetrics`].
//! All text positions are byte offsets into the string and always land on
//! grapheme cluster boundaries.
//!
//! [`FixedPitchMetrics`] is a deterministic implementation where every
//! grapheme cluster has the same advance. It backs headless rendering and
//! tests.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::{Rect, Size};

/// Text measurement and hit-testing services.
pub trait TextMetrics {
    /// Measure `text` laid out within `max_width` by `max_height`.
    fn measure_text(&self, text: &str, max_width: f32, max_height: f32) -> Size;

    /// Rectangles covering the byte range `start..start + len` of `text`.
    ///
    /// An empty range yields one zero-width rectangle at the caret position.
    fn hit_test_text_range(&self, text: &str, start: usize, len: usize) -> Vec<Rect>;

    /// The byte offset of the caret position nearest to `(x, y)`.
    fn hit_test_text_position(
        &self,
        text: &str,
        max_width: f32,
        max_height: f32,
        x: f32,
        y: f32,
    ) -> usize;
}

/// Metrics where every grapheme cluster is `advance` pixels wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitchMetrics {
    /// Horizontal advance per grapheme cluster.
    pub advance: f32,
    /// Height of a line of text.
    pub line_height: f32,
}

impl Default for FixedPitchMetrics {
    fn default() -> Self {
        Self {
            advance: 8.0,
            line_height: 16.0,
        }
    }
}

impl FixedPitchMetrics {
    /// Create metrics with the given advance and line height.
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }

    /// Number of grapheme clusters that start before `byte_offset`.
    fn clusters_before(text: &str, byte_offset: usize) -> usize {
        text.grapheme_indices(true)
            .take_while(|(i, _)| *i < byte_offset)
            .count()
    }
}

impl TextMetrics for FixedPitchMetrics {
    fn measure_text(&self, text: &str, max_width: f32, max_height: f32) -> Size {
        let width = text.graphemes(true).count() as f32 * self.advance;
        Size::new(width.min(max_width), self.line_height.min(max_height))
    }

    fn hit_test_text_range(&self, text: &str, start: usize, len: usize) -> Vec<Rect> {
        let start = start.min(text.len());
        let end = start.saturating_add(len).min(text.len());
        let left = Self::clusters_before(text, start) as f32 * self.advance;
        let right = Self::clusters_before(text, end) as f32 * self.advance;
        vec![Rect::new(left, 0.0, right - left, self.line_height)]
    }

    fn hit_test_text_position(
        &self,
        text: &str,
        max_width: f32,
        _max_height: f32,
        x: f32,
        _y: f32,
    ) -> usize {
        if self.advance <= 0.0 {
            return 0;
        }
        let x = x.clamp(0.0, max_width.max(0.0));
        let nearest = (x / self.advance).round() as usize;
        text.grapheme_indices(true)
            .nth(nearest)
            .map_or(text.len(), |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_counts_graphemes() {
        let metrics = FixedPitchMetrics::new(10.0, 20.0);
        // "e" + combining acute accent is one cluster
        let size = metrics.measure_text("ae\u{301}b", f32::INFINITY, f32::INFINITY);
        assert_eq!(size, Size::new(30.0, 20.0));
    }

    #[test]
    fn test_measure_respects_bounds() {
        let metrics = FixedPitchMetrics::new(10.0, 20.0);
        let size = metrics.measure_text("hello", 25.0, 12.0);
        assert_eq!(size, Size::new(25.0, 12.0));
    }

    #[test]
    fn test_range_rects() {
        let metrics = FixedPitchMetrics::new(10.0, 20.0);
        let rects = metrics.hit_test_text_range("hello", 1, 3);
        assert_eq!(rects, vec![Rect::new(10.0, 0.0, 30.0, 20.0)]);

        let caret = metrics.hit_test_text_range("hello", 5, 0);
        assert_eq!(caret, vec![Rect::new(50.0, 0.0, 0.0, 20.0)]);
    }

    #[test]
    fn test_position_rounds_to_nearest_boundary() {
        let metrics = FixedPitchMetrics::new(10.0, 20.0);
        assert_eq!(metrics.hit_test_text_position("hello", 100.0, 20.0, 14.0, 5.0), 1);
        assert_eq!(metrics.hit_test_text_position("hello", 100.0, 20.0, 16.0, 5.0), 2);
        assert_eq!(metrics.hit_test_text_position("hello", 100.0, 20.0, -5.0, 5.0), 0);
        assert_eq!(metrics.hit_test_text_position("hello", 100.0, 20.0, 90.0, 5.0), 5);
    }

    #[test]
    fn test_position_lands_on_multibyte_boundary() {
        let metrics = FixedPitchMetrics::new(10.0, 20.0);
        // 'é' is two bytes
        assert_eq!(metrics.hit_test_text_position("éa", 100.0, 20.0, 10.0, 0.0), 2);
    }
}
