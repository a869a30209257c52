//! The contract between a hosting [`ReusableView`](crate::ReusableView) and
//! its layout strategy.

use quilt_core::{AdapterError, Size, ViewRef};

/// A layout strategy that owns a set of views.
///
/// Adapters never schedule layout themselves; the hosting view calls into
/// them from its layout pass. Views are created lazily, so every query may
/// materialize views and takes `&mut self`.
pub trait ReusableViewAdapter {
    /// Strong handles to every view the adapter currently manages, in
    /// display order. Creates views that do not exist yet.
    fn managed_views(&mut self) -> Result<Vec<ViewRef>, AdapterError>;

    /// Size the managed content needs within `bounding`.
    fn size_that_fits(&mut self, bounding: Size) -> Result<Size, AdapterError>;

    /// Assign frames to every managed view for a host of size `bounding`.
    fn layout_managed_views(&mut self, bounding: Size) -> Result<(), AdapterError>;
}
