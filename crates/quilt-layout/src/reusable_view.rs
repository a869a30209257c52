//! A container view that hands its layout pass to an adapter.

use std::any::Any;
use std::rc::Rc;

use tracing::{error, trace};

use quilt_core::{AdapterError, Color, Rect, Size, View, ViewBase, ViewRef, WeakViewRef};

use crate::adapter::ReusableViewAdapter;

/// Hosts the views of one adapter.
///
/// The adapter owns the views; the container only keeps weak references to
/// them as its subviews. Layout is never automatic: change the adapter or the
/// frame, call [`set_needs_layout`](Self::set_needs_layout) if the frame did
/// not change, then [`layout_if_needed`](Self::layout_if_needed).
pub struct ReusableView<A = Box<dyn ReusableViewAdapter>> {
    base: ViewBase,
    adapter: A,
    subviews: Vec<WeakViewRef>,
    needs_layout: bool,
    layout_completion: Option<Box<dyn FnMut()>>,
}

impl<A: ReusableViewAdapter> ReusableView<A> {
    pub fn new(adapter: A) -> Self {
        Self {
            base: ViewBase::default(),
            adapter,
            subviews: Vec::new(),
            needs_layout: true,
            layout_completion: None,
        }
    }

    /// Run `completion` after every finished layout pass. A failed pass does
    /// not call it.
    pub fn set_layout_completion(&mut self, completion: impl FnMut() + 'static) {
        self.layout_completion = Some(Box::new(completion));
    }

    pub fn clear_layout_completion(&mut self) {
        self.layout_completion = None;
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Mutable access to the adapter. Does not invalidate layout.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Mark the container for re-layout. Idempotent.
    pub fn set_needs_layout(&mut self) {
        self.needs_layout = true;
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Change the bounding size, keeping the origin.
    pub fn set_bounds_size(&mut self, size: Size) {
        let frame = self.base.frame;
        self.assign_frame(Rect::new(frame.x, frame.y, size.width, size.height));
    }

    fn assign_frame(&mut self, frame: Rect) {
        if frame.size() != self.base.frame.size() {
            self.needs_layout = true;
        }
        self.base.frame = frame;
    }

    /// Subviews that are still alive, in the adapter's order.
    pub fn subviews(&self) -> Vec<ViewRef> {
        self.subviews.iter().filter_map(|view| view.upgrade()).collect()
    }

    /// Run a layout pass if one is pending. Returns whether it ran.
    pub fn layout_if_needed(&mut self) -> Result<bool, AdapterError> {
        if !self.needs_layout {
            return Ok(false);
        }
        self.perform_layout()?;
        Ok(true)
    }

    /// Content size for `size`, surfacing adapter errors.
    pub fn fitting_size(&mut self, size: Size) -> Result<Size, AdapterError> {
        self.adapter.size_that_fits(size)
    }

    fn perform_layout(&mut self) -> Result<(), AdapterError> {
        let views = self.adapter.managed_views()?;
        self.subviews = views.iter().map(Rc::downgrade).collect();

        let bounds = self.base.frame.size();
        self.adapter.layout_managed_views(bounds)?;
        self.needs_layout = false;

        trace!(subviews = self.subviews.len(), width = bounds.width, height = bounds.height, "layout pass");
        if let Some(completion) = self.layout_completion.as_mut() {
            completion();
        }
        Ok(())
    }
}

impl ReusableViewAdapter for Box<dyn ReusableViewAdapter> {
    fn managed_views(&mut self) -> Result<Vec<ViewRef>, AdapterError> {
        (**self).managed_views()
    }

    fn size_that_fits(&mut self, bounding: Size) -> Result<Size, AdapterError> {
        (**self).size_that_fits(bounding)
    }

    fn layout_managed_views(&mut self, bounding: Size) -> Result<(), AdapterError> {
        (**self).layout_managed_views(bounding)
    }
}

impl<A: ReusableViewAdapter + 'static> View for ReusableView<A> {
    fn frame(&self) -> Rect {
        self.base.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        self.assign_frame(frame);
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
        match self.adapter.size_that_fits(size) {
            Ok(size) => size,
            Err(err) => {
                error!(%err, "adapter failed to measure; treating as zero size");
                Size::ZERO
            }
        }
    }

    fn layout_subviews(&mut self) -> Result<(), AdapterError> {
        self.layout_if_needed().map(|_| ())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
