//! A renderer that records draw calls instead of rasterizing them.

use crate::image::ImageHandle;
use crate::paint::Stroke;
use crate::renderer::Renderer;
use crate::types::{Color, Point, Rect};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, stroke: Stroke },
    Text { text: String, position: Point, color: Color },
    Image { image: ImageHandle, dest: Rect },
    PushClip(Rect),
    PopClip,
}

/// Headless [`Renderer`] that keeps every draw call in order.
///
/// Unbalanced [`pop_clip`](Renderer::pop_clip) calls are recorded but logged
/// as warnings.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    clip_depth: usize,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Current clip nesting depth.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.clip_depth = 0;
    }

    /// Every string drawn with [`Renderer::draw_text`], in order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            color,
        });
    }

    fn draw_image(&mut self, image: ImageHandle, dest: Rect) {
        self.commands.push(DrawCommand::Image { image, dest });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            tracing::warn!(target: "trellis_render", "pop_clip without matching push_clip");
        }
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
    }
}
