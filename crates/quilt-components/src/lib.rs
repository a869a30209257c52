//! Ready-made components for Quilt adapters.
//!
//! Every component here implements [`quilt_layout::ViewComponent`], so it can
//! be handed straight to a [`quilt_layout::VerticalStackAdapter`]:
//!
//! ```ignore
//! use quilt_components::{ImageCollageComponent, LabelComponent};
//! use quilt_layout::{AnyComponent, StackLayout, VerticalStackAdapter};
//!
//! let mut adapter = VerticalStackAdapter::new(StackLayout::new().with_spacing(8.0));
//! adapter.set_components(vec![
//!     AnyComponent::new(LabelComponent::new("Trip photos")),
//!     AnyComponent::new(ImageCollageComponent::new(urls).with_columns(3)),
//! ])?;
//! ```

mod collage;
mod image;
mod image_label;
mod label;
mod label_group;
pub mod text;

pub use collage::{ImageCollageComponent, ImageCollageView};
pub use image::{
    ContentMode, Image, ImageCompletion, ImageComponent, ImageLoader, ImageSizing, ImageView,
    SharedImageLoader,
};
pub use image_label::{ImageLabelComponent, ImageLabelView};
pub use label::{LabelComponent, LabelView};
pub use label_group::{LabelGroupComponent, LabelGroupView};
pub use text::{TextAlignment, TextStyle};
