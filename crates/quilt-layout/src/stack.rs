//! Vertical stacking geometry.
//!
//! Pure computation over measured sizes: no views are touched here. The
//! [`VerticalStackAdapter`](crate::VerticalStackAdapter) measures its slots
//! and feeds the sizes through [`StackLayout`].

use quilt_core::{EdgeInsets, Rect, Size};

/// Horizontal placement of a component within the padded layout width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    /// Flush with the left padding edge
    #[default]
    Left,
    /// Centered in the layout width
    Center,
    /// Flush with the right padding edge
    Right,
    /// Stretched to the full layout width
    Fill,
}

/// Stack configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackLayout {
    /// Padding inside the bounding box
    pub padding: EdgeInsets,
    /// Gap between consecutive non-empty components
    pub component_spacing: f64,
    /// Horizontal alignment of each component
    pub alignment: HorizontalAlignment,
    /// Hide or clamp views that fall outside the padded area
    pub clip_to_layout_area: bool,
}

/// Where a single slot ended up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StackPlacement {
    pub frame: Rect,
    pub hidden: bool,
}

impl StackLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_padding(mut self, padding: EdgeInsets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.component_spacing = spacing;
        self
    }

    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_clipping(mut self, clip: bool) -> Self {
        self.clip_to_layout_area = clip;
        self
    }

    /// Width available to components inside the bounding size.
    pub fn layout_width(&self, bounding: Size) -> f64 {
        (bounding.width - self.padding.horizontal()).max(0.0)
    }

    /// Size needed to stack components with the given measured sizes.
    ///
    /// Zero-height entries contribute neither height nor spacing. An empty
    /// stack has zero size; a stack of only zero-height entries is as tall
    /// as its vertical padding.
    pub fn content_size(&self, bounding: Size, sizes: &[Size]) -> Size {
        if sizes.is_empty() {
            return Size::ZERO;
        }

        let mut height = 0.0;
        let mut visible = 0usize;
        for size in sizes {
            if size.height > 0.0 {
                height += size.height;
                visible += 1;
            }
        }
        let total_spacing = self.component_spacing * visible.saturating_sub(1) as f64;

        Size::new(
            self.layout_width(bounding),
            height + total_spacing + self.padding.vertical(),
        )
    }

    /// Compute frames for each measured size, top to bottom.
    pub fn layout(&self, bounding: Size, sizes: &[Size]) -> Vec<StackPlacement> {
        let area = Rect::from_size(bounding).inset_by(self.padding);
        let mut y = area.y;

        sizes
            .iter()
            .map(|size| {
                let height = size.height.max(0.0);
                let width = match self.alignment {
                    HorizontalAlignment::Fill => area.width,
                    _ => size.width.clamp(0.0, area.width),
                };

                let x = area.x + match self.alignment {
                    HorizontalAlignment::Left | HorizontalAlignment::Fill => 0.0,
                    HorizontalAlignment::Center => (area.width - width) / 2.0,
                    HorizontalAlignment::Right => area.width - width,
                };

                let mut placement = StackPlacement {
                    frame: Rect::new(x, y, width, height),
                    hidden: height <= 0.0,
                };

                if height > 0.0 {
                    y += height + self.component_spacing;
                }

                if self.clip_to_layout_area && !placement.hidden {
                    self.clip(&mut placement, &area);
                }

                placement
            })
            .collect()
    }

    fn clip(&self, placement: &mut StackPlacement, area: &Rect) {
        let frame = &mut placement.frame;
        if frame.y >= area.bottom() {
            placement.hidden = true;
        } else if frame.bottom() > area.bottom() {
            frame.height = area.bottom() - frame.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sizes(heights: &[f64]) -> Vec<Size> {
        heights.iter().map(|&h| Size::new(50.0, h)).collect()
    }

    #[test]
    fn test_zero_height_contributes_no_spacing() {
        let layout = StackLayout::new()
            .with_spacing(8.0)
            .with_padding(EdgeInsets::new(4.0, 0.0, 4.0, 0.0));

        let size = layout.content_size(Size::new(100.0, 500.0), &sizes(&[20.0, 0.0, 30.0]));

        // 4 + 20 + 8 + 30 + 4
        assert!((size.height - 66.0).abs() < 0.001);
        assert!((size.width - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_stack_is_zero() {
        let layout = StackLayout::new().with_padding(EdgeInsets::uniform(10.0));
        assert_eq!(layout.content_size(Size::new(100.0, 100.0), &[]), Size::ZERO);
    }

    #[test]
    fn test_all_zero_heights_is_padding_only() {
        let layout = StackLayout::new()
            .with_spacing(8.0)
            .with_padding(EdgeInsets::new(3.0, 5.0, 7.0, 5.0));

        let size = layout.content_size(Size::new(100.0, 100.0), &sizes(&[0.0, 0.0]));

        assert!((size.height - 10.0).abs() < 0.001);
        assert!((size.width - 90.0).abs() < 0.001);
    }

    #[test]
    fn test_layout_offsets_skip_zero_height() {
        let layout = StackLayout::new()
            .with_spacing(8.0)
            .with_padding(EdgeInsets::new(4.0, 0.0, 4.0, 0.0));

        let result = layout.layout(Size::new(100.0, 66.0), &sizes(&[20.0, 0.0, 30.0]));

        assert_eq!(result.len(), 3);
        assert!((result[0].frame.y - 4.0).abs() < 0.001);
        assert!(!result[0].hidden);
        assert!(result[1].hidden);
        assert!((result[2].frame.y - 32.0).abs() < 0.001); // 4 + 20 + 8
        assert!(!result[2].hidden);
    }

    #[test]
    fn test_alignment() {
        let padding = EdgeInsets::new(0.0, 10.0, 0.0, 10.0);
        let bounding = Size::new(200.0, 100.0);
        let children = [Size::new(80.0, 20.0)];

        let left = StackLayout::new().with_padding(padding);
        assert!((left.layout(bounding, &children)[0].frame.x - 10.0).abs() < 0.001);

        let center = left.with_alignment(HorizontalAlignment::Center);
        // 10 + (180 - 80) / 2
        assert!((center.layout(bounding, &children)[0].frame.x - 60.0).abs() < 0.001);

        let right = left.with_alignment(HorizontalAlignment::Right);
        // 10 + 180 - 80
        assert!((right.layout(bounding, &children)[0].frame.x - 110.0).abs() < 0.001);

        let fill = left.with_alignment(HorizontalAlignment::Fill);
        let frame = fill.layout(bounding, &children)[0].frame;
        assert!((frame.x - 10.0).abs() < 0.001);
        assert!((frame.width - 180.0).abs() < 0.001);
    }

    #[test]
    fn test_wide_component_clamped_to_layout_width() {
        let layout = StackLayout::new()
            .with_padding(EdgeInsets::symmetric(10.0, 0.0))
            .with_alignment(HorizontalAlignment::Center);

        let result = layout.layout(Size::new(100.0, 100.0), &[Size::new(500.0, 20.0)]);

        assert!((result[0].frame.x - 10.0).abs() < 0.001);
        assert!((result[0].frame.width - 80.0).abs() < 0.001);
    }

    #[test]
    fn test_clipping_hides_and_clamps() {
        let layout = StackLayout::new()
            .with_spacing(10.0)
            .with_padding(EdgeInsets::uniform(5.0))
            .with_clipping(true);

        // Layout area spans y in [5, 55)
        let result = layout.layout(Size::new(100.0, 60.0), &sizes(&[30.0, 30.0, 30.0]));

        assert!(!result[0].hidden);
        assert!((result[0].frame.height - 30.0).abs() < 0.001);
        // Second starts at 45 and is clamped to the area bottom
        assert!(!result[1].hidden);
        assert!((result[1].frame.y - 45.0).abs() < 0.001);
        assert!((result[1].frame.height - 10.0).abs() < 0.001);
        // Third starts at 85, entirely outside
        assert!(result[2].hidden);
    }

    #[test]
    fn test_overflow_without_clipping() {
        let layout = StackLayout::new().with_spacing(10.0);

        let result = layout.layout(Size::new(100.0, 40.0), &sizes(&[30.0, 30.0]));

        assert!(!result[1].hidden);
        assert!((result[1].frame.y - 40.0).abs() < 0.001);
        assert!((result[1].frame.height - 30.0).abs() < 0.001);
    }

    proptest! {
        #[test]
        fn prop_total_height(
            heights in proptest::collection::vec(prop_oneof![Just(0.0), 1.0f64..200.0], 0..12),
            spacing in 0.0f64..20.0,
            top in 0.0f64..20.0,
            bottom in 0.0f64..20.0,
        ) {
            let layout = StackLayout::new()
                .with_spacing(spacing)
                .with_padding(EdgeInsets::new(top, 0.0, bottom, 0.0));

            let size = layout.content_size(Size::new(100.0, 1000.0), &sizes(&heights));

            if heights.is_empty() {
                prop_assert_eq!(size, Size::ZERO);
            } else {
                let visible = heights.iter().filter(|&&h| h > 0.0).count();
                let expected = heights.iter().sum::<f64>()
                    + spacing * visible.saturating_sub(1) as f64
                    + top
                    + bottom;
                prop_assert!((size.height - expected).abs() < 1e-6);
            }
        }
    }
}
