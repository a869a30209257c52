//! A vertical group of labels.

use std::any::Any;

use tracing::error;

use quilt_core::{AdapterError, Color, EdgeInsets, Rect, Size, View, ViewRef};
use quilt_layout::{
    HorizontalAlignment, ReusableView, SizeOverride, StackLayout, VerticalStackAdapter,
    ViewComponent,
};

use crate::label::LabelComponent;

/// Labels stacked top to bottom. Empty labels take no space.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelGroupComponent {
    pub labels: Vec<LabelComponent>,
    pub layout: StackLayout,
    pub background_color: Option<Color>,
    pub size_override: Option<SizeOverride>,
}

impl LabelGroupComponent {
    pub fn new(labels: impl IntoIterator<Item = LabelComponent>) -> Self {
        Self {
            labels: labels.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.layout.component_spacing = spacing;
        self
    }

    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.layout.padding = padding;
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.layout.alignment = alignment;
        self
    }

    pub fn with_clipping(mut self, clip: bool) -> Self {
        self.layout.clip_to_layout_area = clip;
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
}

impl ViewComponent for LabelGroupComponent {
    type View = LabelGroupView;

    fn create_view(&self) -> LabelGroupView {
        LabelGroupView {
            host: ReusableView::new(VerticalStackAdapter::default()),
        }
    }

    fn update_view(&self, view: &mut LabelGroupView) {
        let adapter = view.host.adapter_mut();
        adapter.set_layout(self.layout);
        if let Err(err) = adapter.set_components(self.labels.iter().cloned()) {
            error!(%err, "label group rejected its labels");
        }
        view.host.set_background_color(self.background_color);
        view.host.set_needs_layout();
    }

    fn preferred_size(&self, available: Size) -> Option<Size> {
        self.size_override.as_ref().map(|size| size.size_for(available))
    }
}

/// Hosts one [`LabelView`](crate::LabelView) per label.
pub struct LabelGroupView {
    host: ReusableView<VerticalStackAdapter>,
}

impl LabelGroupView {
    pub fn labels(&self) -> Vec<ViewRef> {
        self.host.subviews()
    }
}

impl View for LabelGroupView {
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
        let fit = self.host.size_that_fits(size);
        if fit == Size::ZERO {
            return Size::ZERO;
        }
        // Stack content width excludes the horizontal padding
        let padding = self.host.adapter().layout().padding.horizontal();
        Size::new(size.width.min(fit.width + padding), fit.height)
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
