//! Column and row storage for a grid.

use tracing::debug;
use trellis_core::logging::targets;

use super::cell::{CellValue, Row};
use super::column::Column;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Whether this is [`SortOrder::Ascending`].
    pub fn is_ascending(self) -> bool {
        self == Self::Ascending
    }
}

/// The most recently applied sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// Column the rows are sorted by.
    pub column: usize,
    /// Direction of the sort.
    pub order: SortOrder,
}

/// Typed columns and index-aligned rows.
///
/// Rows keep insertion order until [`sort_by_column`](Self::sort_by_column)
/// reorders them in place. All index-taking accessors return `None` or
/// `false` for out-of-range indices.
#[derive(Debug, Default, Clone)]
pub struct CellModel {
    columns: Vec<Column>,
    rows: Vec<Row>,
    sort: Option<SortState>,
}

impl CellModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Append a column and return its index.
    pub fn add_column(&mut self, column: Column) -> usize {
        self.columns.push(column);
        self.columns.len() - 1
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The column at `index`.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Mutable access to the column at `index`.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        self.columns.get_mut(index)
    }

    /// All columns in display order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }

    /// Left edge of column `index` in content coordinates.
    pub fn column_left(&self, index: usize) -> Option<f32> {
        (index < self.columns.len()).then(|| self.columns[..index].iter().map(|c| c.width).sum())
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Append a row and return its index.
    pub fn add_row(&mut self, row: Row) -> usize {
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Insert a row at `index`. Returns `false` if `index > row_count`.
    pub fn insert_row(&mut self, index: usize, row: Row) -> bool {
        if index > self.rows.len() {
            return false;
        }
        self.rows.insert(index, row);
        true
    }

    /// Remove and return the row at `index`.
    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        (index < self.rows.len()).then(|| self.rows.remove(index))
    }

    /// Remove all rows.
    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The row at `index`.
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// All rows in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The cell at `(column, row)`.
    ///
    /// Returns `None` when either index is out of range or the row is shorter
    /// than `column`.
    pub fn cell(&self, column: usize, row: usize) -> Option<&CellValue> {
        if column >= self.columns.len() {
            return None;
        }
        self.rows.get(row)?.cell(column)
    }

    /// Display text at `(column, row)`, `""` when absent.
    pub fn cell_text(&self, column: usize, row: usize) -> &str {
        self.cell(column, row).map_or("", CellValue::display_text)
    }

    /// Replace the cell at `(column, row)`.
    ///
    /// Short rows are padded. Returns `false` when either index is out of
    /// range.
    pub fn set_cell(&mut self, column: usize, row: usize, value: CellValue) -> bool {
        if column >= self.columns.len() {
            return false;
        }
        match self.rows.get_mut(row) {
            Some(r) => {
                r.set_cell(column, value);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Stable-sort the rows by `column`.
    ///
    /// Uses the column's custom comparator when present. Descending order
    /// reverses the comparator, so equal cells keep their relative order in
    /// both directions. Returns `false` for an out-of-range column.
    pub fn sort_by_column(&mut self, column: usize, order: SortOrder) -> bool {
        let Some(col) = self.columns.get(column) else {
            return false;
        };
        let empty = CellValue::Empty;
        self.rows.sort_by(|a, b| {
            let ca = a.cell(column).unwrap_or(&empty);
            let cb = b.cell(column).unwrap_or(&empty);
            let ordering = col.compare(ca, cb);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
        self.sort = Some(SortState { column, order });
        debug!(target: targets::GRID, column, ?order, rows = self.rows.len(), "rows sorted");
        true
    }

    /// The most recently applied sort, if any.
    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CellModel {
        let mut model = CellModel::new();
        model.add_column(Column::text("name"));
        model.add_column(Column::check("flag"));
        model.add_row(Row::from_iter([CellValue::text("b"), CellValue::Tag(1)]));
        model.add_row(Row::from_iter([CellValue::text("a"), CellValue::Tag(0)]));
        model.add_row(Row::from_iter([CellValue::text("b"), CellValue::Tag(2)]));
        model
    }

    #[test]
    fn test_out_of_range_access() {
        let mut model = model();
        assert!(model.cell(5, 0).is_none());
        assert!(model.cell(0, 9).is_none());
        assert!(model.row(3).is_none());
        assert!(!model.set_cell(2, 0, CellValue::Empty));
        assert!(!model.set_cell(0, 3, CellValue::Empty));
        assert_eq!(model.cell_text(0, 9), "");
    }

    #[test]
    fn test_short_row_reads_empty_and_pads_on_write() {
        let mut model = model();
        let idx = model.add_row(Row::default());
        assert!(model.cell(1, idx).is_none());
        assert!(model.set_cell(1, idx, CellValue::Tag(1)));
        assert_eq!(model.cell(0, idx), Some(&CellValue::Empty));
        assert_eq!(model.cell(1, idx), Some(&CellValue::Tag(1)));
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let mut model = model();
        assert!(model.sort_by_column(0, SortOrder::Ascending));
        let tags: Vec<i64> = (0..3).map(|r| model.cell(1, r).map_or(-1, CellValue::tag)).collect();
        assert_eq!(tags, vec![0, 1, 2]);

        assert!(model.sort_by_column(0, SortOrder::Descending));
        let tags: Vec<i64> = (0..3).map(|r| model.cell(1, r).map_or(-1, CellValue::tag)).collect();
        assert_eq!(tags, vec![1, 2, 0]);
        assert_eq!(
            model.sort_state(),
            Some(SortState {
                column: 0,
                order: SortOrder::Descending
            })
        );
    }

    #[test]
    fn test_sort_invalid_column() {
        let mut model = model();
        assert!(!model.sort_by_column(7, SortOrder::Ascending));
        assert!(model.sort_state().is_none());
    }

    #[test]
    fn test_column_left() {
        let mut model = CellModel::new();
        model.add_column(Column::text("a").with_width(30.0));
        model.add_column(Column::text("b").with_width(50.0));
        assert_eq!(model.column_left(0), Some(0.0));
        assert_eq!(model.column_left(1), Some(30.0));
        assert_eq!(model.column_left(2), None);
        assert_eq!(model.total_width(), 80.0);
    }
}
