//! Adapter that arranges a fixed row x column set of views.

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::{debug, trace};

use quilt_core::{same_view, AdapterError, Size, View, ViewRef};

use crate::adapter::ReusableViewAdapter;
use crate::grid::{GridLayout, IndexPath};

/// Builds the view for a cell. Called at most once per index path.
pub type BuildView = Box<dyn FnMut(IndexPath) -> ViewRef>;

/// Preferred size of a cell's view at the given column width. Only the
/// height is used: every column shares one width.
pub type SizeForView = Box<dyn Fn(&dyn View, f64, IndexPath) -> Size>;

/// Lays out views in equal-width columns and content-sized rows.
///
/// The adapter owns both callbacks. Callbacks that need to reach the hosting
/// view must capture it weakly.
pub struct GridAdapter {
    layout: GridLayout,
    build_view: BuildView,
    size_for_view: Option<SizeForView>,
    views: IndexMap<IndexPath, ViewRef>,
}

impl GridAdapter {
    pub fn new(layout: GridLayout, build_view: impl FnMut(IndexPath) -> ViewRef + 'static) -> Self {
        Self {
            layout,
            build_view: Box::new(build_view),
            size_for_view: None,
            views: IndexMap::new(),
        }
    }

    /// Measure cells with `size_for_view` instead of the views' best fit.
    pub fn with_size_for_view(
        mut self,
        size_for_view: impl Fn(&dyn View, f64, IndexPath) -> Size + 'static,
    ) -> Self {
        self.size_for_view = Some(Box::new(size_for_view));
        self
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Replace the grid configuration, discarding views outside the new
    /// bounds. The host must re-layout.
    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = layout;
        let before = self.views.len();
        self.views.retain(|index_path, _| layout.contains(*index_path));
        let discarded = before - self.views.len();
        if discarded > 0 {
            debug!(discarded, rows = layout.rows, columns = layout.columns, "discarded grid views");
        }
    }

    /// Change only the grid dimensions.
    pub fn set_dimensions(&mut self, rows: usize, columns: usize) {
        let layout = GridLayout {
            rows,
            columns,
            ..self.layout
        };
        self.set_layout(layout);
    }

    pub fn linear_index(&self, index_path: IndexPath) -> Option<usize> {
        self.layout.linear_index(index_path)
    }

    pub fn index_path(&self, linear_index: usize) -> Option<IndexPath> {
        self.layout.index_path(linear_index)
    }

    /// The view for a cell, building it on first access.
    pub fn view_at(&mut self, index_path: IndexPath) -> Option<ViewRef> {
        if !self.layout.contains(index_path) {
            return None;
        }
        let build_view = &mut self.build_view;
        let view = self.views.entry(index_path).or_insert_with(|| {
            debug!(row = index_path.row, column = index_path.column, "building grid view");
            build_view(index_path)
        });
        Some(view.clone())
    }

    /// The view for a cell, only if it has been built already.
    pub fn existing_view(&self, index_path: IndexPath) -> Option<&ViewRef> {
        self.views.get(&index_path)
    }

    /// The cell showing `view`, if this adapter built it.
    pub fn index_path_for_view(&self, view: &ViewRef) -> Option<IndexPath> {
        self.views
            .iter()
            .find(|(_, cached)| same_view(cached, view))
            .map(|(index_path, _)| *index_path)
    }

    fn measure(&self, view: &ViewRef, width: f64, index_path: IndexPath) -> f64 {
        match &self.size_for_view {
            Some(size_for_view) => size_for_view(&*view.borrow(), width, index_path).height,
            None => view.borrow_mut().size_that_fits(Size::unbounded_height(width)).height,
        }
    }

    /// Height of every row: its tallest item at the shared column width.
    fn row_heights(&mut self, column_width: f64) -> SmallVec<[f64; 8]> {
        let mut heights = SmallVec::with_capacity(self.layout.rows);
        for row in 0..self.layout.rows {
            let mut height = 0.0_f64;
            for column in 0..self.layout.columns {
                let index_path = IndexPath::new(row, column);
                if let Some(view) = self.view_at(index_path) {
                    height = height.max(self.measure(&view, column_width, index_path));
                }
            }
            heights.push(height);
        }
        heights
    }
}

impl ReusableViewAdapter for GridAdapter {
    fn managed_views(&mut self) -> Result<Vec<ViewRef>, AdapterError> {
        let layout = self.layout;
        Ok(layout
            .index_paths()
            .filter_map(|index_path| self.view_at(index_path))
            .collect())
    }

    fn size_that_fits(&mut self, bounding: Size) -> Result<Size, AdapterError> {
        if self.layout.is_empty() {
            return Ok(Size::ZERO);
        }
        let column_width = self.layout.column_width(bounding.width);
        let heights = self.row_heights(column_width);
        let size = self.layout.content_size(bounding, &heights);
        trace!(rows = heights.len(), width = size.width, height = size.height, "grid size");
        Ok(size)
    }

    fn layout_managed_views(&mut self, bounding: Size) -> Result<(), AdapterError> {
        if self.layout.is_empty() {
            return Ok(());
        }
        let layout = self.layout;
        let column_width = layout.column_width(bounding.width);
        let heights = self.row_heights(column_width);

        for index_path in layout.index_paths() {
            let (Some(view), Some(frame)) = (
                self.views.get(&index_path),
                layout.cell_frame(index_path, column_width, &heights),
            ) else {
                continue;
            };
            let mut view = view.borrow_mut();
            view.set_frame(frame);
            view.set_hidden(false);
            view.layout_subviews()?;
        }

        trace!(rows = layout.rows, columns = layout.columns, column_width, "grid laid out");
        Ok(())
    }
}
