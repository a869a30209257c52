//! A grid of images.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use quilt_core::{view_ref, AdapterError, Color, Rect, Size, View, ViewRef};
use quilt_layout::{
    GridAdapter, GridLayout, IndexPath, ReusableView, SizeOverride, ViewComponent,
};

use crate::image::{ContentMode, ImageComponent, ImageSizing, ImageView, SharedImageLoader};

/// Images laid out in a fixed number of equal-width columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCollageComponent {
    pub urls: Vec<String>,
    pub columns: usize,
    /// Gap between rows and between columns
    pub spacing: f64,
    /// Width over height of every cell
    pub aspect_ratio: f64,
    /// Show at most this many of `urls`
    pub max_images: Option<usize>,
    pub content_mode: ContentMode,
    pub placeholder: Color,
    pub background_color: Option<Color>,
    /// Replaces the grid's own measurement when the collage is stacked
    pub size_override: Option<SizeOverride>,
    pub loader: Option<SharedImageLoader>,
}

impl Default for ImageCollageComponent {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            columns: 3,
            spacing: 0.0,
            aspect_ratio: 1.0,
            max_images: None,
            content_mode: ContentMode::AspectFill,
            placeholder: Color::LIGHT_GRAY,
            background_color: None,
            size_override: None,
            loader: None,
        }
    }
}

impl ImageCollageComponent {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            urls: urls.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn with_max_images(mut self, max_images: usize) -> Self {
        self.max_images = Some(max_images);
        self
    }

    pub fn with_content_mode(mut self, content_mode: ContentMode) -> Self {
        self.content_mode = content_mode;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_size_override(mut self, size: SizeOverride) -> Self {
        self.size_override = Some(size);
        self
    }

    pub fn with_loader(mut self, loader: SharedImageLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// URLs that get a cell.
    pub fn visible_urls(&self) -> &[String] {
        let count = self.max_images.map_or(self.urls.len(), |max| max.min(self.urls.len()));
        &self.urls[..count]
    }

    /// Rows needed to show every visible URL.
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            return 0;
        }
        self.visible_urls().len().div_ceil(self.columns)
    }

    fn grid_layout(&self) -> GridLayout {
        GridLayout::new(self.rows(), self.columns).with_spacing(self.spacing)
    }

    /// The image shown in one cell. Trailing cells of the last row show nothing.
    fn cell_component(&self, index_path: IndexPath) -> ImageComponent {
        let url = self
            .grid_layout()
            .linear_index(index_path)
            .and_then(|index| self.visible_urls().get(index).cloned());
        ImageComponent {
            url,
            sizing: ImageSizing::AspectRatio(self.aspect_ratio),
            content_mode: self.content_mode,
            placeholder: self.placeholder,
            background_color: None,
            loader: self.loader.clone(),
        }
    }

    fn cell_height(&self, column_width: f64) -> f64 {
        if self.aspect_ratio > 0.0 {
            column_width / self.aspect_ratio
        } else {
            0.0
        }
    }
}

impl ViewComponent for ImageCollageComponent {
    type View = ImageCollageView;

    fn create_view(&self) -> ImageCollageView {
        ImageCollageView::new()
    }

    fn update_view(&self, view: &mut ImageCollageView) {
        *view.content.borrow_mut() = self.clone();

        let layout = self.grid_layout();
        let grid = view.host.adapter_mut();
        grid.set_layout(layout);
        for index_path in layout.index_paths() {
            if let Some(cell) = grid.existing_view(index_path) {
                if let Some(image) = cell.borrow_mut().downcast_mut::<ImageView>() {
                    self.cell_component(index_path).update_view(image);
                }
            }
        }
        debug!(images = self.visible_urls().len(), rows = layout.rows, columns = layout.columns, "collage updated");
        view.host.set_background_color(self.background_color);
        view.host.set_needs_layout();
    }

    fn preferred_size(&self, available: Size) -> Option<Size> {
        self.size_override.as_ref().map(|size| size.size_for(available))
    }
}

/// Hosts one [`ImageView`] per grid cell.
pub struct ImageCollageView {
    host: ReusableView<GridAdapter>,
    content: Rc<RefCell<ImageCollageComponent>>,
}

impl ImageCollageView {
    fn new() -> Self {
        let content = Rc::new(RefCell::new(ImageCollageComponent::default()));

        let build_content = content.clone();
        let height_content = content.clone();
        let grid = GridAdapter::new(GridLayout::default(), move |index_path| {
            let component = build_content.borrow().cell_component(index_path);
            let mut view = component.create_view();
            component.update_view(&mut view);
            view_ref(view)
        })
        .with_size_for_view(move |_view, column_width, _index_path| {
            Size::new(column_width, height_content.borrow().cell_height(column_width))
        });

        Self {
            host: ReusableView::new(grid),
            content,
        }
    }

    pub fn grid(&self) -> &GridAdapter {
        self.host.adapter()
    }

    /// Cell views from the last layout pass, row by row.
    pub fn cells(&self) -> Vec<ViewRef> {
        self.host.subviews()
    }

    pub fn needs_layout(&self) -> bool {
        self.host.needs_layout()
    }
}

impl View for ImageCollageView {
    fn frame(&self) -> Rect {
        self.host.frame()
    }

    fn set_frame(&mut self, frame: Rect) {
        self.host.set_frame(frame);
    }

    fn is_hidden(&self) -> bool {
        self.host.is_hidden()
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.host.set_hidden(hidden);
    }

    fn background_color(&self) -> Option<Color> {
        self.host.background_color()
    }

    fn set_background_color(&mut self, color: Option<Color>) {
        self.host.set_background_color(color);
    }

    fn size_that_fits(&mut self, size: Size) -> Size {
        self.host.size_that_fits(size)
    }

    fn layout_subviews(&mut self) -> Result<(), AdapterError> {
        self.host.layout_subviews()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
