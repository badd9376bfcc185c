//! Trellis - an interactive data grid.
//!
//! The main crate ties the [`trellis_core`] signal system and the
//! [`trellis_render`] drawing interfaces into [`GridView`], a virtualized
//! table with typed columns, in-place editing, sorting and resizing.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//! use trellis::render::RecordingRenderer;
//!
//! let mut grid = GridView::new();
//! grid.set_size(Size::new(240.0, 120.0));
//! grid.add_column(Column::text("name").with_editable(true));
//! grid.add_row(Row::from_iter(["first"]));
//!
//! let mut renderer = RecordingRenderer::new();
//! grid.paint(&mut renderer);
//! assert!(renderer.texts().contains(&"first"));
//! ```

pub use trellis_core::*;

/// Rendering interfaces and headless backends.
pub mod render {
    pub use trellis_render::*;
}

pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod prelude;
pub mod widget;

pub use config::{GridConfig, GridPalette};
pub use error::{GridError, Result};
pub use widget::GridView;
