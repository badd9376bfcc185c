//! The grid widget.
//!
//! [`GridView`] is a virtualized, scrollable table with typed columns,
//! in-place text editing, column resize and sort, and keyboard and pointer
//! navigation. The embedding window feeds it
//! [`InputEvent`](crate::widget::events::InputEvent)s through
//! [`GridView::dispatch`] and calls [`GridView::paint`] once per frame.
//!
//! # Example
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut grid = GridView::new();
//! grid.set_size(Size::new(320.0, 200.0));
//! grid.add_column(Column::check("done").with_width(60.0));
//! grid.add_column(Column::text("task").with_editable(true));
//! grid.add_row(Row::from_iter([CellValue::from(false), CellValue::from("write docs")]));
//!
//! grid.check_changed.connect(|(column, row, checked)| {
//!     println!("({column}, {row}) is now {checked}");
//! });
//!
//! // Click the check box in row 0
//! grid.dispatch(InputEvent::click(10.0, 30.0));
//! assert!(grid.model().cell(0, 0).is_some_and(|c| c.is_checked()));
//! ```
//!
//! # Signals
//!
//! - `selection_changed((column, row))`
//! - `scroll_changed((first_row, scroll_x))`
//! - `check_changed((column, row, checked))`
//! - `row_added(row)`: a row was appended from the keyboard
//! - `cell_edited((column, row, text))`: an edit changed a cell
//! - `column_resized((column, width))`
//! - `sort_changed((column, order))`
//! - `cell_clicked((column, row))`
//! - `button_clicked((column, row))`
//! - `files_dropped((cell, paths))`
//! - `repaint_requested(())`

mod controller;
mod editor;
mod paint;
mod scrollbar;
mod viewport;

pub use editor::{CaretMove, EditSession, filter_composition, normalize_line_breaks};
pub use hit_test::{GridGeometry, HitTarget};
pub use scrollbar::{Orientation, ScrollBarGeometry, ScrollBarPart};
pub use viewport::{
    MAX_LAYOUT_ROUNDS, ScrollState, Viewport, ViewportInput, column_at, visible_column_range,
};

use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;
use trellis_core::Signal;
use trellis_core::logging::targets;
use trellis_render::{FixedPitchMetrics, Point, Rect, Size, TextMetrics};

use crate::config::{GridConfig, GridPalette};
use crate::model::{CellModel, CellValue, Column, ColumnKind, Row, SortOrder};
use crate::widget::host::{GridHost, SystemHost};

/// Pointer drag in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragMode {
    None,
    Resize {
        column: usize,
        start_x: f32,
        start_width: f32,
    },
    VerticalThumb {
        grab_offset: f32,
    },
    HorizontalThumb {
        grab_offset: f32,
    },
    /// Extending the text selection of the edited cell.
    TextSelect,
}

/// An interactive data grid.
pub struct GridView {
    model: CellModel,
    config: GridConfig,
    palette: GridPalette,
    metrics: Box<dyn TextMetrics>,
    host: Box<dyn GridHost>,

    // Geometry
    size: Size,
    screen_origin: Point,
    scroll: ScrollState,

    // Interaction state
    selected: Option<(usize, usize)>,
    hovered: Option<(usize, usize)>,
    edit: Option<EditSession>,
    drag: DragMode,

    // Signals
    /// Emitted when the selected cell changes. Args: (column, row).
    pub selection_changed: Signal<(usize, usize)>,
    /// Emitted when scrolling changes. Args: (first visible row, scroll x).
    pub scroll_changed: Signal<(usize, f32)>,
    /// Emitted when a check cell is toggled. Args: (column, row, checked).
    pub check_changed: Signal<(usize, usize, bool)>,
    /// Emitted when a row is appended from the keyboard. Args: row index.
    pub row_added: Signal<usize>,
    /// Emitted when committing an edit changes a cell. Args: (column, row, text).
    pub cell_edited: Signal<(usize, usize, String)>,
    /// Emitted when a column width changes. Args: (column, width).
    pub column_resized: Signal<(usize, f32)>,
    /// Emitted after rows are sorted. Args: (column, order).
    pub sort_changed: Signal<(usize, SortOrder)>,
    /// Emitted when a body cell is clicked. Args: (column, row).
    pub cell_clicked: Signal<(usize, usize)>,
    /// Emitted when a button cell is clicked. Args: (column, row).
    pub button_clicked: Signal<(usize, usize)>,
    /// Emitted when files are dropped. Args: (cell under the drop, paths).
    pub files_dropped: Signal<(Option<(usize, usize)>, Vec<PathBuf>)>,
    /// Emitted whenever the grid needs to be painted again.
    pub repaint_requested: Signal<()>,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GridView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridView")
            .field("columns", &self.model.column_count())
            .field("rows", &self.model.row_count())
            .field("size", &self.size)
            .field("scroll", &self.scroll)
            .field("selected", &self.selected)
            .field("editing", &self.edit.as_ref().map(|e| (e.column(), e.row())))
            .finish_non_exhaustive()
    }
}

impl GridView {
    /// Create an empty grid with the default configuration.
    ///
    /// Text is measured with [`FixedPitchMetrics`] and host services go to
    /// [`SystemHost`] until replaced.
    pub fn new() -> Self {
        Self {
            model: CellModel::new(),
            config: GridConfig::default(),
            palette: GridPalette::default(),
            metrics: Box::new(FixedPitchMetrics::default()),
            host: Box::new(SystemHost::new()),
            size: Size::ZERO,
            screen_origin: Point::ZERO,
            scroll: ScrollState::default(),
            selected: None,
            hovered: None,
            edit: None,
            drag: DragMode::None,
            selection_changed: Signal::new(),
            scroll_changed: Signal::new(),
            check_changed: Signal::new(),
            row_added: Signal::new(),
            cell_edited: Signal::new(),
            column_resized: Signal::new(),
            sort_changed: Signal::new(),
            cell_clicked: Signal::new(),
            button_clicked: Signal::new(),
            files_dropped: Signal::new(),
            repaint_requested: Signal::new(),
        }
    }

    /// Set the configuration using builder pattern.
    pub fn with_config(mut self, config: GridConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Set the text metrics using builder pattern.
    pub fn with_text_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    /// Set the host using builder pattern.
    pub fn with_host(mut self, host: impl GridHost + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Replace the configuration. Existing columns are widened to the new
    /// minimum width if needed.
    pub fn set_config(&mut self, config: GridConfig) {
        self.config = config;
        let min = self.config.min_column_width;
        for index in 0..self.model.column_count() {
            if let Some(column) = self.model.column_mut(index) {
                column.width = column.width.max(min);
            }
        }
        self.update();
    }

    pub fn palette(&self) -> &GridPalette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: GridPalette) {
        self.palette = palette;
        self.update();
    }

    pub fn set_text_metrics(&mut self, metrics: impl TextMetrics + 'static) {
        self.metrics = Box::new(metrics);
        self.update();
    }

    pub fn set_host(&mut self, host: impl GridHost + 'static) {
        self.host = Box::new(host);
    }

    /// Control size in pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        if self.size != size {
            self.size = size;
            self.layout();
            self.update();
        }
    }

    /// Screen position of the grid's top-left corner. Used to place the
    /// composition window.
    pub fn set_screen_origin(&mut self, origin: Point) {
        self.screen_origin = origin;
    }

    // =========================================================================
    // Model
    // =========================================================================

    /// The grid's columns and rows.
    pub fn model(&self) -> &CellModel {
        &self.model
    }

    /// Append a column. Its width is raised to the minimum column width.
    pub fn add_column(&mut self, mut column: Column) -> usize {
        column.width = column.width.max(self.config.min_column_width);
        let index = self.model.add_column(column);
        self.update();
        index
    }

    /// Append a row.
    pub fn add_row(&mut self, row: Row) -> usize {
        let index = self.model.add_row(row);
        self.update();
        index
    }

    /// Remove a row. An edit on or below it is cancelled.
    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        if self.edit.as_ref().is_some_and(|e| e.row() >= index) {
            self.cancel_edit();
        }
        let row = self.model.remove_row(index)?;
        self.clamp_selection();
        self.layout();
        self.update();
        Some(row)
    }

    /// Remove all rows, cancelling any edit.
    pub fn clear_rows(&mut self) {
        self.cancel_edit();
        self.model.clear_rows();
        self.selected = None;
        self.hovered = None;
        self.layout();
        self.update();
    }

    /// Replace one cell. Returns `false` for out-of-range indices.
    pub fn set_cell(&mut self, column: usize, row: usize, value: CellValue) -> bool {
        let changed = self.model.set_cell(column, row, value);
        if changed {
            self.update();
        }
        changed
    }

    /// Set a column's width, clamped to the minimum column width.
    pub fn set_column_width(&mut self, column: usize, width: f32) -> bool {
        let width = width.max(self.config.min_column_width);
        let Some(col) = self.model.column_mut(column) else {
            return false;
        };
        if col.width != width {
            col.width = width;
            self.column_resized.emit((column, width));
            self.layout();
            self.update();
        }
        true
    }

    /// Fit a column to its content.
    ///
    /// Text columns take the widest cell text plus padding on both sides,
    /// never less than the minimum width. Other kinds get a fixed width
    /// derived from the row height.
    pub fn auto_size_column(&mut self, column: usize) -> bool {
        let Some(col) = self.model.column(column) else {
            return false;
        };
        let padding = self.config.cell_padding * 2.0;
        let width = if col.kind == ColumnKind::Text {
            let widest = (0..self.model.row_count())
                .map(|row| {
                    self.metrics
                        .measure_text(
                            self.model.cell_text(column, row),
                            f32::INFINITY,
                            self.config.row_height,
                        )
                        .width
                })
                .fold(0.0_f32, f32::max);
            widest + padding
        } else {
            self.config.row_height + padding
        };
        debug!(target: targets::GRID, column, width, "column auto-sized");
        self.set_column_width(column, width)
    }

    /// Stable-sort rows by `column`. Cancels any edit.
    pub fn sort_by_column(&mut self, column: usize, order: SortOrder) -> bool {
        if column >= self.model.column_count() {
            return false;
        }
        self.cancel_edit();
        self.model.sort_by_column(column, order);
        self.sort_changed.emit((column, order));
        self.update();
        true
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn viewport_input(&self) -> ViewportInput {
        ViewportInput {
            width: self.size.width,
            height: self.size.height,
            header_height: self.config.header_height,
            row_height: self.config.row_height,
            total_width: self.model.total_width(),
            row_count: self.model.row_count(),
            scrollbar_thickness: self.config.scrollbar_thickness,
        }
    }

    /// Layout for the current size and model, without touching scroll state.
    pub fn viewport(&self) -> Viewport {
        Viewport::compute(&self.viewport_input())
    }

    /// Recompute the layout and re-clamp scrolling against it.
    fn layout(&mut self) -> Viewport {
        let viewport = self.viewport();
        if self.scroll.clamp_to(&viewport) {
            self.scroll_changed.emit((self.scroll.row, self.scroll.x));
        }
        viewport
    }

    fn column_widths(&self) -> Vec<f32> {
        self.model.columns().iter().map(|c| c.width).collect()
    }

    /// What lies under a grid-local point.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        let viewport = self.viewport();
        let widths = self.column_widths();
        self.geometry(&viewport, &widths).hit_test(point)
    }

    fn geometry<'a>(&self, viewport: &'a Viewport, widths: &'a [f32]) -> GridGeometry<'a> {
        GridGeometry {
            viewport,
            column_widths: widths,
            scroll: self.scroll,
            row_count: self.model.row_count(),
            divider_tolerance: self.config.divider_tolerance,
            min_thumb_size: self.config.min_thumb_size,
        }
    }

    /// Grid-local rectangle of a body cell at the current scroll position.
    ///
    /// The rectangle may lie outside the visible body.
    pub fn cell_rect(&self, column: usize, row: usize) -> Option<Rect> {
        if row >= self.model.row_count() {
            return None;
        }
        let left = self.model.column_left(column)?;
        let width = self.model.column(column)?.width;
        let row_offset = row as f32 - self.scroll.row as f32;
        Some(Rect::new(
            left - self.scroll.x,
            self.config.header_height + row_offset * self.config.row_height,
            width,
            self.config.row_height,
        ))
    }

    // =========================================================================
    // Scrolling
    // =========================================================================

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    /// Scroll so `row` is the first visible row, clamped.
    pub fn set_scroll_row(&mut self, row: usize) {
        self.set_scroll(ScrollState { row, ..self.scroll });
    }

    /// Set the horizontal offset, clamped.
    pub fn set_scroll_x(&mut self, x: f32) {
        self.set_scroll(ScrollState { x, ..self.scroll });
    }

    fn set_scroll(&mut self, mut scroll: ScrollState) {
        let viewport = self.viewport();
        scroll.clamp_to(&viewport);
        if scroll != self.scroll {
            self.scroll = scroll;
            self.scroll_changed.emit((scroll.row, scroll.x));
            self.update();
        }
    }

    /// Scroll the minimum amount that makes `row` fully visible.
    pub fn ensure_row_visible(&mut self, row: usize) {
        let viewport = self.viewport();
        let visible = viewport.visible_rows.max(1);
        let mut target = self.scroll.row;
        if row < target {
            target = row;
        } else if row >= target + visible {
            target = row + 1 - visible;
        }
        self.set_scroll_row(target);
    }

    /// Scroll the minimum amount that makes `column` visible, preferring its
    /// left edge when it is wider than the view.
    pub fn ensure_column_visible(&mut self, column: usize) {
        let (Some(left), Some(col)) = (self.model.column_left(column), self.model.column(column))
        else {
            return;
        };
        let right = left + col.width;
        let view = self.viewport().render_width;
        let mut x = self.scroll.x;
        if right > x + view {
            x = right - view;
        }
        if left < x {
            x = left;
        }
        self.set_scroll_x(x);
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selected cell as `(column, row)`.
    pub fn selected_cell(&self) -> Option<(usize, usize)> {
        self.selected
    }

    /// The cell under the pointer as `(column, row)`.
    pub fn hovered_cell(&self) -> Option<(usize, usize)> {
        self.hovered
    }

    /// Select a cell. Out-of-range cells are ignored.
    pub fn set_selected_cell(&mut self, column: usize, row: usize) -> bool {
        if column >= self.model.column_count() || row >= self.model.row_count() {
            return false;
        }
        if self.selected != Some((column, row)) {
            self.selected = Some((column, row));
            self.selection_changed.emit((column, row));
            self.update();
        }
        true
    }

    fn clamp_selection(&mut self) {
        let rows = self.model.row_count();
        let columns = self.model.column_count();
        if let Some((column, row)) = self.selected
            && (row >= rows || column >= columns)
        {
            self.selected = None;
            if rows > 0 && columns > 0 {
                self.set_selected_cell(column.min(columns - 1), row.min(rows - 1));
            }
        }
        if self
            .hovered
            .is_some_and(|(column, row)| row >= rows || column >= columns)
        {
            self.hovered = None;
        }
    }

    // =========================================================================
    // Editing
    // =========================================================================

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    /// The active edit session.
    pub fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    fn is_editable_cell(&self, column: usize, row: usize) -> bool {
        row < self.model.row_count()
            && self
                .model
                .column(column)
                .is_some_and(Column::is_text_editable)
    }

    /// Start editing a cell with its text selected.
    ///
    /// Only editable text cells can be edited. Any other active edit is
    /// committed first. Returns `false` when the cell cannot be edited.
    pub fn begin_edit(&mut self, column: usize, row: usize) -> bool {
        if !self.is_editable_cell(column, row) {
            return false;
        }
        if let Some(edit) = &self.edit {
            if (edit.column(), edit.row()) == (column, row) {
                return true;
            }
            self.commit_edit();
        }

        self.set_selected_cell(column, row);
        self.ensure_row_visible(row);
        self.ensure_column_visible(column);

        let text = self.model.cell_text(column, row).to_owned();
        debug!(target: targets::GRID_EDIT, column, row, "edit started");
        self.edit = Some(EditSession::new(column, row, text, Instant::now()));
        self.after_edit_change();

        if let Some(rect) = self.cell_rect(column, row) {
            self.host
                .set_composition_window(rect.offset(self.screen_origin.x, self.screen_origin.y));
        }
        true
    }

    /// Write the live text into the edited cell and end editing.
    ///
    /// Returns `true` if the cell was written. A session whose target no
    /// longer exists is discarded instead.
    pub fn commit_edit(&mut self) -> bool {
        let Some(edit) = self.edit.take() else {
            return false;
        };
        self.end_text_select();
        let (column, row) = (edit.column(), edit.row());
        if !self.is_editable_cell(column, row) {
            debug!(target: targets::GRID_EDIT, column, row, "edit target vanished, discarding");
            self.update();
            return false;
        }

        let modified = edit.is_modified();
        let text = edit.into_text();
        self.model
            .set_cell(column, row, CellValue::Text(text.clone()));
        debug!(target: targets::GRID_EDIT, column, row, modified, "edit committed");
        if modified {
            self.cell_edited.emit((column, row, text));
        }
        self.update();
        true
    }

    /// Discard the live text and end editing.
    pub fn cancel_edit(&mut self) {
        if let Some(edit) = self.edit.take() {
            self.end_text_select();
            debug!(
                target: targets::GRID_EDIT,
                column = edit.column(),
                row = edit.row(),
                "edit cancelled"
            );
            self.update();
        }
    }

    /// Cancel an edit whose target cell no longer exists.
    fn validate_edit(&mut self) {
        if let Some(edit) = &self.edit
            && !self.is_editable_cell(edit.column(), edit.row())
        {
            self.cancel_edit();
        }
    }

    fn end_text_select(&mut self) {
        if self.drag == DragMode::TextSelect {
            self.drag = DragMode::None;
            self.host.release_pointer();
        }
    }

    /// Visible text width inside a cell of `column`.
    fn text_area_width(&self, column: usize) -> f32 {
        self.model
            .column(column)
            .map_or(0.0, |c| (c.width - self.config.cell_padding * 2.0).max(0.0))
    }

    /// Keep the caret in view and repaint after an editor change.
    fn after_edit_change(&mut self) {
        let Some(column) = self.edit.as_ref().map(EditSession::column) else {
            return;
        };
        let width = self.text_area_width(column);
        if let Some(edit) = self.edit.as_mut() {
            edit.ensure_caret_visible(self.metrics.as_ref(), width);
        }
        self.update();
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    fn update(&self) {
        self.repaint_requested.emit(());
    }
}
