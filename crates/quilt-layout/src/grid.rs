//! Fixed row x column grid geometry.
//!
//! All columns share one width; each row is as tall as its tallest item.

use quilt_core::{EdgeInsets, Rect, Size};

/// A (row, column) coordinate in a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexPath {
    pub row: usize,
    pub column: usize,
}

impl IndexPath {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// Grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
    /// Gap between rows and between columns
    pub item_spacing: f64,
    /// Padding inside the bounding box
    pub padding: EdgeInsets,
}

impl GridLayout {
    /// Create a grid with the given dimensions.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Default::default()
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.item_spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    /// Number of cells, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an index path lies inside the grid.
    pub fn contains(&self, index_path: IndexPath) -> bool {
        index_path.row < self.rows && index_path.column < self.columns
    }

    /// Row-major linear index of a cell, or `None` if out of bounds or not
    /// representable.
    pub fn linear_index(&self, index_path: IndexPath) -> Option<usize> {
        if !self.contains(index_path) {
            return None;
        }
        index_path
            .row
            .checked_mul(self.columns)?
            .checked_add(index_path.column)
    }

    /// Cell at a row-major linear index, or `None` if out of bounds.
    pub fn index_path(&self, linear_index: usize) -> Option<IndexPath> {
        if self.columns == 0 {
            return None;
        }
        let index_path = IndexPath::new(linear_index / self.columns, linear_index % self.columns);
        self.contains(index_path).then_some(index_path)
    }

    /// All cells in row-major order.
    pub fn index_paths(&self) -> impl Iterator<Item = IndexPath> {
        let columns = self.columns;
        (0..self.len()).map(move |i| IndexPath::new(i / columns, i % columns))
    }

    /// Shared column width for a bounding width.
    pub fn column_width(&self, bounding_width: f64) -> f64 {
        if self.columns == 0 {
            return 0.0;
        }
        let total_gap = self.item_spacing * (self.columns - 1) as f64;
        ((bounding_width - self.padding.horizontal() - total_gap) / self.columns as f64).max(0.0)
    }

    /// Size of the grid given the height of every row.
    pub fn content_size(&self, bounding: Size, row_heights: &[f64]) -> Size {
        if self.is_empty() {
            return Size::ZERO;
        }
        let total_gap = self.item_spacing * row_heights.len().saturating_sub(1) as f64;
        Size::new(
            bounding.width,
            row_heights.iter().sum::<f64>() + total_gap + self.padding.vertical(),
        )
    }

    /// Frame of the cell at `index_path` given all row heights.
    pub fn cell_frame(
        &self,
        index_path: IndexPath,
        column_width: f64,
        row_heights: &[f64],
    ) -> Option<Rect> {
        if !self.contains(index_path) {
            return None;
        }
        let rows_above: f64 = row_heights.iter().take(index_path.row).sum();
        let x = self.padding.left + index_path.column as f64 * (column_width + self.item_spacing);
        let y = self.padding.top + rows_above + index_path.row as f64 * self.item_spacing;
        let height = row_heights.get(index_path.row).copied().unwrap_or(0.0);
        Some(Rect::new(x, y, column_width, height))
    }
}
