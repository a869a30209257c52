//! Text label component.

use std::any::Any;

use quilt_core::{Color, Rect, Size, View, ViewBase};
use quilt_layout::ViewComponent;

use crate::text::{layout_lines, measure_text, TextAlignment, TextLine, TextStyle};

/// A block of wrapped text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelComponent {
    pub text: String,
    pub color: Color,
    pub alignment: TextAlignment,
    pub style: TextStyle,
    /// Maximum number of lines, 0 for unlimited
    pub max_lines: usize,
    pub background_color: Option<Color>,
}

impl LabelComponent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }
}

impl ViewComponent for LabelComponent {
    type View = LabelView;

    fn create_view(&self) -> LabelView {
        LabelView::default()
    }

    fn update_view(&self, view: &mut LabelView) {
        view.text.clone_from(&self.text);
        view.color = self.color;
        view.alignment = self.alignment;
        view.style = self.style;
        view.max_lines = self.max_lines;
        view.base.background = self.background_color;
        view.relayout_lines();
    }
}

/// Renders a [`LabelComponent`]. Keeps its wrapped lines for the current frame.
#[derive(Debug, Clone, Default)]
pub struct LabelView {
    base: ViewBase,
    text: String,
    color: Color,
    alignment: TextAlignment,
    style: TextStyle,
    max_lines: usize,
    lines: Vec<TextLine>,
}

impl LabelView {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn alignment(&self) -> TextAlignment {
        self.alignment
    }

    /// Lines as wrapped for the current frame width.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    fn relayout_lines(&mut self) {
        self.lines = layout_lines(
            &self.text,
            &self.style,
            self.base.frame.width,
            self.max_lines,
            self.alignment,
        );
    }
}

impl View for LabelView {
    fn frame(&self) -> Rect {
        self.base.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        let resized = frame.width != self.base.frame.width;
        self.base.frame = frame;
        if resized {
            self.relayout_lines();
        }
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
        let metrics = measure_text(&self.text, &self.style, Some(size.width), self.max_lines);
        Size::new(metrics.width.min(size.width), metrics.height)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quilt_core::{same_view, EdgeInsets};
    use quilt_layout::{
        AnyComponent, HorizontalAlignment, ReusableViewAdapter, StackLayout, VerticalStackAdapter,
    };

    fn style() -> TextStyle {
        TextStyle::default()
            .with_font_size(20.0)
            .with_line_height(1.0)
            .with_letter_spacing(-1.0)
    }

    #[test]
    fn test_label_measures_wrapped_height() {
        let label = LabelComponent::new("aaa bbb ccc").with_style(style());
        let mut view = label.create_view();
        label.update_view(&mut view);

        let fit = view.size_that_fits(Size::unbounded_height(50.0));

        assert!((fit.width - 30.0).abs() < 0.001);
        assert!((fit.height - 60.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_label_collapses() {
        let label = LabelComponent::new("");
        let mut view = label.create_view();
        label.update_view(&mut view);

        assert_eq!(view.size_that_fits(Size::unbounded_height(100.0)), Size::ZERO);
    }

    #[test]
    fn test_labels_in_stack() {
        let mut adapter = VerticalStackAdapter::new(
            StackLayout::new()
                .with_spacing(4.0)
                .with_padding(EdgeInsets::uniform(10.0))
                .with_alignment(HorizontalAlignment::Fill),
        );
        adapter
            .set_components(vec![
                AnyComponent::new(LabelComponent::new("Title").with_style(style())),
                AnyComponent::new(LabelComponent::new("")),
                AnyComponent::new(
                    LabelComponent::new("aaa bbb")
                        .with_style(style())
                        .with_alignment(TextAlignment::Right),
                ),
            ])
            .unwrap();

        // 10 + 20 + 4 + 20 + 10; the empty label adds nothing
        let size = adapter.size_that_fits(Size::new(120.0, 1000.0)).unwrap();
        assert!((size.height - 64.0).abs() < 0.001);

        adapter.layout_managed_views(Size::new(120.0, 64.0)).unwrap();
        let body = adapter.view_at(2).unwrap();
        let body = body.borrow();
        assert_eq!(body.frame(), Rect::new(10.0, 34.0, 100.0, 20.0));

        let label = body.downcast_ref::<LabelView>().unwrap();
        assert_eq!(label.lines().len(), 1);
        assert!((label.lines()[0].x - 30.0).abs() < 0.001);
    }

    #[test]
    fn test_text_change_updates_view_in_place() {
        let mut adapter = VerticalStackAdapter::default();
        adapter.set_components([LabelComponent::new("before")]).unwrap();
        let before = adapter.managed_views().unwrap();

        adapter.set_components([LabelComponent::new("after")]).unwrap();
        let after = adapter.managed_views().unwrap();

        assert!(same_view(&before[0], &after[0]));
        let view = after[0].borrow();
        assert_eq!(view.downcast_ref::<LabelView>().unwrap().text(), "after");
    }

    #[test]
    fn test_background_follows_component() {
        let tinted = LabelComponent::new("hi").with_background_color(Color::LIGHT_GRAY);
        let mut view = tinted.create_view();
        tinted.update_view(&mut view);
        assert_eq!(view.background_color(), Some(Color::LIGHT_GRAY));

        LabelComponent::new("hi").update_view(&mut view);
        assert_eq!(view.background_color(), None);
    }
}
