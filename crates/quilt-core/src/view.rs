//! The retained view model that adapters lay out.
//!
//! A `View` is the toolkit-neutral stand-in for a platform view object: it has
//! a frame in its parent's coordinate space, a hidden flag, and can measure
//! itself. Views are shared through [`ViewRef`] handles; the adapter that
//! created a view holds the strong handle and hosting views keep [`WeakViewRef`]s.

use std::any::Any;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::errors::AdapterError;
use crate::types::{Color, Rect, Size};

/// A retained, mutable view object.
pub trait View: Any {
    fn frame(&self) -> Rect;

    fn set_frame(&mut self, frame: Rect);

    fn is_hidden(&self) -> bool;

    fn set_hidden(&mut self, hidden: bool);

    /// Fill behind the view's content. `None` is transparent.
    fn background_color(&self) -> Option<Color> {
        None
    }

    /// Views without a background of their own ignore this.
    fn set_background_color(&mut self, _color: Option<Color>) {}

    /// Best-fit measurement: the size this view would like to have when
    /// constrained to `size`. Unbounded dimensions are `f64::INFINITY`.
    fn size_that_fits(&mut self, size: Size) -> Size;

    /// Lay out this view's own subviews for its current frame.
    ///
    /// Adapters call this right after assigning a frame, so containers can
    /// run their own adapters.
    fn layout_subviews(&mut self) -> Result<(), AdapterError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Concrete type name, used in diagnostics.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl dyn View {
    /// Returns true if the concrete view type is `T`.
    pub fn is<T: View>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn downcast_ref<T: View>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: View>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// Shared strong handle to a view.
pub type ViewRef = Rc<RefCell<dyn View>>;

/// Non-owning handle to a view, as held by hosting containers.
pub type WeakViewRef = Weak<RefCell<dyn View>>;

/// Wrap a concrete view into a shared handle.
pub fn view_ref<V: View>(view: V) -> ViewRef {
    Rc::new(RefCell::new(view))
}

/// Identity comparison of two view handles.
pub fn same_view(a: &ViewRef, b: &ViewRef) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}

/// Frame, visibility and background shared by every concrete view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewBase {
    pub frame: Rect,
    pub hidden: bool,
    pub background: Option<Color>,
}

/// A view with a fixed intrinsic size and no content.
///
/// Backs the empty placeholder component and is handy in tests.
#[derive(Debug, Clone, Default)]
pub struct PlainView {
    pub base: ViewBase,
    pub intrinsic_size: Size,
}

impl PlainView {
    pub fn new(intrinsic_size: Size) -> Self {
        Self {
            base: ViewBase::default(),
            intrinsic_size,
        }
    }
}

impl View for PlainView {
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
        Size::new(
            self.intrinsic_size.width.min(size.width),
            self.intrinsic_size.height,
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
