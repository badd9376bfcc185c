//! Grid data model.
//!
//! - [`CellValue`]: the content of one cell
//! - [`Row`]: cells index-aligned with columns
//! - [`Column`]: name, width, kind, editability and optional comparator
//! - [`CellModel`]: the columns and rows a grid displays, plus sort state

mod cell;
mod cell_model;
mod column;

pub use cell::{CellValue, Row};
pub use cell_model::{CellModel, SortOrder, SortState};
pub use column::{Column, ColumnKind, Comparator, DEFAULT_COLUMN_WIDTH, default_compare};
