//! Prelude module for Trellis.
//!
//! ```
//! use trellis::prelude::*;
//! ```

// ============================================================================
// Signals
// ============================================================================

pub use crate::signal::{ConnectionId, Signal};

// ============================================================================
// Grid
// ============================================================================

pub use crate::config::{GridConfig, GridPalette};
pub use crate::model::{CellModel, CellValue, Column, ColumnKind, Row, SortOrder};
pub use crate::widget::grid::{GridView, HitTarget};

// ============================================================================
// Input and host
// ============================================================================

pub use crate::widget::events::{InputEvent, Key, KeyboardModifiers, MouseButton};
pub use crate::widget::host::{GridHost, SystemHost};

// ============================================================================
// Geometry and rendering
// ============================================================================

pub use trellis_render::{Color, Point, Rect, Renderer, Size, TextMetrics};
