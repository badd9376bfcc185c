//! Core renderer trait defining the 2D drawing interface widgets paint with.
//!
//! The trait is object safe so widgets can paint through `&mut dyn Renderer`
//! without knowing which backend is behind it.

use crate::image::ImageHandle;
use crate::paint::Stroke;
use crate::types::{Color, Point, Rect};

/// The 2D drawing surface a widget paints onto.
///
/// Clip regions nest: each [`push_clip`](Renderer::push_clip) intersects the
/// new rectangle with the current clip, and [`pop_clip`](Renderer::pop_clip)
/// restores the previous one.
pub trait Renderer {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Draw a single line of text with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Point, color: Color);

    /// Draw an image scaled into `dest`.
    fn draw_image(&mut self, image: ImageHandle, dest: Rect);

    /// Push a rectangular clip region.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the most recently pushed clip region.
    fn pop_clip(&mut self);
}
