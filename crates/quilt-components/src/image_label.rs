//! Image with a title and subtitle beside it.

use std::any::Any;

use quilt_core::{AdapterError, Color, EdgeInsets, Rect, Size, View, ViewBase};
use quilt_layout::{SizeOverride, ViewComponent};

use crate::image::{ImageComponent, ImageSizing, ImageView, SharedImageLoader};
use crate::label::{LabelComponent, LabelView};

/// A fixed-size image on the left and two stacked labels filling the rest of
/// the row. The image and the label block are centered vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLabelComponent {
    pub image: ImageComponent,
    pub image_size: Size,
    /// Sizes the image area from the row's layout size instead of `image_size`
    pub image_size_override: Option<SizeOverride>,
    pub title: LabelComponent,
    /// Empty text leaves the title alone in the label block
    pub subtitle: LabelComponent,
    pub padding: EdgeInsets,
    /// Gap between the image and the labels
    pub spacing: f64,
    /// Gap between title and subtitle
    pub label_spacing: f64,
    pub background_color: Option<Color>,
    /// Replaces the row's own measurement when it is stacked
    pub size_override: Option<SizeOverride>,
}

impl ImageLabelComponent {
    pub fn new(image_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            image: ImageComponent::new(image_url),
            image_size: Size::new(40.0, 40.0),
            image_size_override: None,
            title: LabelComponent::new(title),
            subtitle: LabelComponent::default(),
            padding: EdgeInsets::ZERO,
            spacing: 8.0,
            label_spacing: 2.0,
            background_color: None,
            size_override: None,
        }
    }

    pub fn with_image_size(mut self, width: f64, height: f64) -> Self {
        self.image_size = Size::new(width, height);
        self
    }

    pub fn with_image_size_override(mut self, size: SizeOverride) -> Self {
        self.image_size_override = Some(size);
        self
    }

    pub fn with_title(mut self, title: LabelComponent) -> Self {
        self.title = title;
        self
    }

    pub fn with_subtitle(mut self, subtitle: LabelComponent) -> Self {
        self.subtitle = subtitle;
        self
    }

    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_label_spacing(mut self, label_spacing: f64) -> Self {
        self.label_spacing = label_spacing;
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
        self.image.loader = Some(loader);
        self
    }
}

impl ViewComponent for ImageLabelComponent {
    type View = ImageLabelView;

    fn create_view(&self) -> ImageLabelView {
        ImageLabelView::default()
    }

    fn update_view(&self, view: &mut ImageLabelView) {
        let image = ImageComponent {
            sizing: ImageSizing::Fixed(self.image_size),
            ..self.image.clone()
        };
        image.update_view(&mut view.image);
        self.title.update_view(&mut view.title);
        self.subtitle.update_view(&mut view.subtitle);
        view.image_size = self.image_size;
        view.image_size_override.clone_from(&self.image_size_override);
        view.padding = self.padding;
        view.spacing = self.spacing;
        view.label_spacing = self.label_spacing;
        view.base.background = self.background_color;
    }

    fn preferred_size(&self, available: Size) -> Option<Size> {
        self.size_override.as_ref().map(|size| size.size_for(available))
    }
}

/// Measured label block.
struct Labels {
    title: Size,
    subtitle: Size,
    gap: f64,
}

impl Labels {
    fn width(&self) -> f64 {
        self.title.width.max(self.subtitle.width)
    }

    fn height(&self) -> f64 {
        self.title.height + self.gap + self.subtitle.height
    }
}

#[derive(Debug, Default)]
pub struct ImageLabelView {
    base: ViewBase,
    image: ImageView,
    title: LabelView,
    subtitle: LabelView,
    image_size: Size,
    image_size_override: Option<SizeOverride>,
    padding: EdgeInsets,
    spacing: f64,
    label_spacing: f64,
}

impl ImageLabelView {
    pub fn image_view(&self) -> &ImageView {
        &self.image
    }

    pub fn title_view(&self) -> &LabelView {
        &self.title
    }

    pub fn subtitle_view(&self) -> &LabelView {
        &self.subtitle
    }

    /// Image area size for a row laid out in `layout`.
    fn image_size(&self, layout: Size) -> Size {
        self.image_size_override
            .as_ref()
            .map_or(self.image_size, |size| size.size_for(layout))
    }

    /// Width left for the labels inside a row `width` wide.
    fn label_width(&self, width: f64, image: Size) -> f64 {
        (width - self.padding.horizontal() - image.width - self.spacing).max(0.0)
    }

    fn measure_labels(&mut self, label_width: f64) -> Labels {
        let available = Size::unbounded_height(label_width);
        let title = self.title.size_that_fits(available);
        let subtitle = self.subtitle.size_that_fits(available);
        let gap = if title.height > 0.0 && subtitle.height > 0.0 {
            self.label_spacing
        } else {
            0.0
        };
        Labels { title, subtitle, gap }
    }
}

impl View for ImageLabelView {
    fn frame(&self) -> Rect {
        self.base.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.base.frame = frame;
    }

    fn is_hidden(&self) -> bool {
        self.base.hidden
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.base.hidden = hidden;
    }

    fn background_color(&self) -> Option<Color> {
        self.base.background
    }

    fn set_background_color(&mut self, color: Option<Color>) {
        self.base.background = color;
    }

    fn size_that_fits(&mut self, size: Size) -> Size {
        let image = self.image_size(size);
        let labels = self.measure_labels(self.label_width(size.width, image));
        let content_width = if labels.width() > 0.0 {
            image.width + self.spacing + labels.width()
        } else {
            image.width
        };
        Size::new(
            (content_width + self.padding.horizontal()).min(size.width),
            image.height.max(labels.height()) + self.padding.vertical(),
        )
    }

    fn layout_subviews(&mut self) -> Result<(), AdapterError> {
        let bounds = self.base.frame.size();
        let image = self.image_size(bounds);
        let area = Rect::from_size(bounds).inset_by(self.padding);

        let image_y = area.y + (area.height - image.height) / 2.0;
        self.image.set_frame(Rect::new(area.x, image_y, image.width, image.height));

        let label_x = area.x + image.width + self.spacing;
        let label_width = self.label_width(bounds.width, image);
        let labels = self.measure_labels(label_width);
        let block_height = labels.height().min(area.height);
        let mut y = area.y + (area.height - block_height) / 2.0;

        // Labels never extend past the padded area
        let title_height = labels.title.height.min(area.bottom() - y).max(0.0);
        self.title.set_frame(Rect::new(label_x, y, label_width, title_height));
        self.title.set_hidden(title_height <= 0.0);
        y += labels.title.height + labels.gap;

        let subtitle_height = labels.subtitle.height.min(area.bottom() - y).max(0.0);
        self.subtitle.set_frame(Rect::new(label_x, y, label_width, subtitle_height));
        self.subtitle.set_hidden(subtitle_height <= 0.0);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
