//! View components and reusable view adapters.
//!
//! Composite views are described as lists of immutable components and laid
//! out by adapters that own the views:
//!
//! 1. **Components**: [`ViewComponent`] values build and update their own views
//! 2. **Adapters**: [`VerticalStackAdapter`] stacks components top to bottom,
//!    [`GridAdapter`] arranges views in equal-width columns
//! 3. **Hosting**: [`ReusableView`] runs an adapter from its layout pass
//!
//! # Example
//!
//! ```ignore
//! use quilt_layout::{ReusableView, StackLayout, VerticalStackAdapter};
//!
//! let mut adapter = VerticalStackAdapter::new(StackLayout::new().with_spacing(8.0));
//! adapter.set_components(components)?;
//!
//! let mut host = ReusableView::new(adapter);
//! host.set_bounds_size(Size::new(320.0, 480.0));
//! host.layout_if_needed()?;
//! ```
//!
//! Everything runs synchronously on the calling thread. Nothing re-lays out
//! on its own: after changing an adapter, call
//! [`ReusableView::set_needs_layout`].

mod adapter;
mod component;
mod grid;
mod grid_adapter;
mod reusable_view;
mod stack;
mod stack_adapter;

pub use adapter::ReusableViewAdapter;
pub use component::{
    AnyComponent, ComponentType, DynComponent, EmptyComponent, SizeOverride, ViewComponent,
};
pub use grid::{GridLayout, IndexPath};
pub use grid_adapter::{BuildView, GridAdapter, SizeForView};
pub use reusable_view::ReusableView;
pub use stack::{HorizontalAlignment, StackLayout, StackPlacement};
pub use stack_adapter::VerticalStackAdapter;
