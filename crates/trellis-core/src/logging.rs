//! Tracing targets and span names used across Trellis.
//!
//! Trellis instruments its widgets with the `tracing` crate. Nothing is
//! printed until the application installs a subscriber:
//!
//! ```ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("trellis::grid=debug"))
//!     .init();
//! ```
//!
//! The constants below can be used in `EnvFilter` directives to narrow
//! output to a single subsystem.

/// Span names used throughout Trellis.
pub mod span_names {
    /// Grid paint pass.
    pub const GRID_PAINT: &str = "trellis::grid::paint";
}

/// Target names for log filtering.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "trellis_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "trellis_core::signal";
    /// Grid interaction (pointer, keyboard, scrolling, sorting).
    pub const GRID: &str = "trellis::grid";
    /// Grid viewport layout passes.
    pub const GRID_LAYOUT: &str = "trellis::grid::layout";
    /// In-cell text editing.
    pub const GRID_EDIT: &str = "trellis::grid::edit";
    /// Host service calls (clipboard, capture, composition window).
    pub const HOST: &str = "trellis::host";
}
