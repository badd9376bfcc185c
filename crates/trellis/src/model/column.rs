//! Column definitions.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use super::cell::CellValue;

/// Default width for new columns.
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

/// Custom comparator used when sorting by a column.
pub type Comparator = Arc<dyn Fn(&CellValue, &CellValue) -> Ordering + Send + Sync>;

/// What a column displays and how its cells react to input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnKind {
    /// Plain text, optionally editable in place.
    Text,
    /// An image drawn from the cell's [`ImageHandle`](trellis_render::ImageHandle).
    Image,
    /// A check box backed by the cell's tag.
    Check,
    /// A push button showing a fixed label.
    Button { label: String },
    /// A drop-down showing the cell text with a fixed option list.
    ComboBox { options: Vec<String> },
}

/// A grid column.
#[derive(Clone)]
pub struct Column {
    /// Header title.
    pub name: String,
    /// Width in pixels. Kept at or above the grid's minimum column width.
    pub width: f32,
    /// Cell kind.
    pub kind: ColumnKind,
    /// Whether text cells can be edited in place. Ignored for other kinds.
    pub editable: bool,
    comparator: Option<Comparator>,
}

impl Column {
    /// Create a column of the given kind.
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            width: DEFAULT_COLUMN_WIDTH,
            kind,
            editable: false,
            comparator: None,
        }
    }

    /// Create a read-only text column.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Text)
    }

    /// Create an image column.
    pub fn image(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Image)
    }

    /// Create a check-box column.
    pub fn check(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Check)
    }

    /// Create a button column labelled `label`.
    pub fn button(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            name,
            ColumnKind::Button {
                label: label.into(),
            },
        )
    }

    /// Create a combo-box column.
    pub fn combo_box<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            ColumnKind::ComboBox {
                options: options.into_iter().map(Into::into).collect(),
            },
        )
    }

    /// Set the width using builder pattern.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Set the editable flag using builder pattern.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Set a custom sort comparator using builder pattern.
    pub fn with_comparator<F>(mut self, compare: F) -> Self
    where
        F: Fn(&CellValue, &CellValue) -> Ordering + Send + Sync + 'static,
    {
        self.comparator = Some(Arc::new(compare));
        self
    }

    /// Whether cells in this column enter text editing when activated.
    pub fn is_text_editable(&self) -> bool {
        self.editable && self.kind == ColumnKind::Text
    }

    /// Compare two cells with the custom comparator, or the default ordering.
    pub fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        match &self.comparator {
            Some(compare) => compare(a, b),
            None => default_compare(a, b),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("kind", &self.kind)
            .field("editable", &self.editable)
            .field("custom_comparator", &self.comparator.is_some())
            .finish()
    }
}

/// Default cell ordering.
///
/// When either cell has non-empty display text the texts are compared;
/// otherwise the tags are.
pub fn default_compare(a: &CellValue, b: &CellValue) -> Ordering {
    let (ta, tb) = (a.display_text(), b.display_text());
    if !ta.is_empty() || !tb.is_empty() {
        ta.cmp(tb)
    } else {
        a.tag().cmp(&b.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_text_columns_are_editable() {
        assert!(Column::text("a").with_editable(true).is_text_editable());
        assert!(!Column::text("a").is_text_editable());
        assert!(!Column::check("a").with_editable(true).is_text_editable());
    }

    #[test]
    fn test_default_compare_prefers_text() {
        let a = CellValue::text("apple");
        let b = CellValue::text("banana");
        assert_eq!(default_compare(&a, &b), Ordering::Less);
        assert_eq!(default_compare(&CellValue::Tag(5), &CellValue::Tag(2)), Ordering::Greater);
        // Missing reads as an empty tag
        assert_eq!(default_compare(&CellValue::Empty, &CellValue::Tag(0)), Ordering::Equal);
        assert_eq!(default_compare(&CellValue::Tag(9), &CellValue::text("a")), Ordering::Less);
    }

    #[test]
    fn test_custom_comparator() {
        let col = Column::text("n").with_comparator(|a, b| {
            let parse = |v: &CellValue| v.display_text().parse::<i64>().unwrap_or(0);
            parse(a).cmp(&parse(b))
        });
        assert_eq!(
            col.compare(&CellValue::text("10"), &CellValue::text("9")),
            Ordering::Greater
        );
    }
}
