//! Cell values.

use trellis_render::ImageHandle;

/// The content of one grid cell.
///
/// A cell holds at most one kind of payload. Check columns store their state
/// as a tag of `0` or `1`; numeric columns may use the tag as a sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CellValue {
    /// No content. Missing cells behave as empty.
    #[default]
    Empty,
    /// Display text.
    Text(String),
    /// A non-owning reference to an image in the application's store.
    Image(ImageHandle),
    /// A 64-bit tag used as a boolean or number.
    Tag(i64),
}

impl CellValue {
    /// Create a text cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a boolean tag cell.
    pub fn checked(checked: bool) -> Self {
        Self::Tag(i64::from(checked))
    }

    /// The display text, or `""` for non-text cells.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            _ => "",
        }
    }

    /// The tag value, or `0` for non-tag cells.
    pub fn tag(&self) -> i64 {
        match self {
            Self::Tag(tag) => *tag,
            _ => 0,
        }
    }

    /// Whether the tag is non-zero.
    pub fn is_checked(&self) -> bool {
        self.tag() != 0
    }

    /// The image handle, if this is an image cell.
    pub fn image(&self) -> Option<ImageHandle> {
        match self {
            Self::Image(handle) => Some(*handle),
            _ => None,
        }
    }

    /// Whether the cell has no content.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<i64> for CellValue {
    fn from(tag: i64) -> Self {
        Self::Tag(tag)
    }
}

impl From<bool> for CellValue {
    fn from(checked: bool) -> Self {
        Self::checked(checked)
    }
}

impl From<ImageHandle> for CellValue {
    fn from(handle: ImageHandle) -> Self {
        Self::Image(handle)
    }
}

/// An ordered sequence of cells, index-aligned with the grid's columns.
///
/// A row may be shorter than the column count; missing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    /// Create a row from its cells.
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// The cell at `column`, if present.
    pub fn cell(&self, column: usize) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// All stored cells.
    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    /// Number of stored cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row stores no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Set the cell at `column`, padding with empty cells as needed.
    pub(crate) fn set_cell(&mut self, column: usize, value: CellValue) {
        if self.cells.len() <= column {
            self.cells.resize(column + 1, CellValue::Empty);
        }
        self.cells[column] = value;
    }
}

impl<V: Into<CellValue>> FromIterator<V> for Row {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_accessors() {
        assert_eq!(CellValue::text("abc").display_text(), "abc");
        assert_eq!(CellValue::Tag(7).display_text(), "");
        assert_eq!(CellValue::text("abc").tag(), 0);
        assert!(CellValue::checked(true).is_checked());
        assert!(!CellValue::Empty.is_checked());
        assert!(CellValue::default().is_empty());
    }

    #[test]
    fn test_row_set_cell_pads() {
        let mut row: Row = ["a"].into_iter().collect();
        row.set_cell(3, CellValue::Tag(1));
        assert_eq!(row.len(), 4);
        assert_eq!(row.cell(1), Some(&CellValue::Empty));
        assert_eq!(row.cell(3), Some(&CellValue::Tag(1)));
        assert_eq!(row.cell(4), None);
    }
}
