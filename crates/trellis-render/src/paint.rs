//! Stroke styles for outline drawing.

use crate::types::Color;

/// Stroke style for drawing rectangle outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given color and width.
    #[inline]
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Set the stroke width.
    #[inline]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }
}

impl From<Color> for Stroke {
    fn from(color: Color) -> Self {
        Self::new(color, 1.0)
    }
}
