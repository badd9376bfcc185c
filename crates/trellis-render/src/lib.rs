//! Rendering interfaces for Trellis.
//!
//! This crate defines the drawing surface ([`Renderer`]) and text measurement
//! ([`TextMetrics`]) capabilities widgets paint through, the geometry types
//! they share, and two headless backends:
//!
//! - [`RecordingRenderer`] records draw calls as [`DrawCommand`]s
//! - [`FixedPitchMetrics`] measures text with a fixed per-grapheme advance
//!
//! Rasterization itself is left to the embedding application.

pub mod image;
pub mod paint;
pub mod recording;
pub mod renderer;
pub mod text;
pub mod types;

pub use image::{ImageEntry, ImageHandle, ImageStore};
pub use paint::Stroke;
pub use recording::{DrawCommand, RecordingRenderer};
pub use renderer::Renderer;
pub use text::{FixedPitchMetrics, TextMetrics};
pub use types::{Color, Point, Rect, Size};
