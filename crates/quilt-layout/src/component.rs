//! View components: immutable descriptions of a view's desired state.
//!
//! A component type is its own view-producing strategy. It knows how to
//! build a fresh view, how to apply itself to a view of its kind, and
//! optionally how tall it wants to be. Adapters only ever talk to components
//! through [`DynComponent`], so they stay generic over every component.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use quilt_core::{view_ref, PlainView, Size, View, ViewRef};

/// A statically typed component.
///
/// Components are plain values: they are compared and cloned, never mutated
/// after construction. A changed component is a new value.
pub trait ViewComponent: Clone + PartialEq + fmt::Debug + 'static {
    /// The view type this component renders into.
    type View: View;

    /// Build a fresh, unconfigured view.
    fn create_view(&self) -> Self::View;

    /// Apply this component's state to a view.
    fn update_view(&self, view: &mut Self::View);

    /// Preferred size within `available`. `None` defers to the view's
    /// best-fit measurement.
    fn preferred_size(&self, _available: Size) -> Option<Size> {
        None
    }
}

/// Object-safe form of a component, as stored by adapters.
///
/// Every [`ViewComponent`] gets this for free. Implementing it by hand is
/// possible for strategies that pick view types at runtime; such
/// implementations must return `false` from [`apply_to_view`](Self::apply_to_view)
/// for views they cannot update.
pub trait DynComponent: fmt::Debug {
    fn component_name(&self) -> &'static str;

    /// Identifies the strategy when a slot declares which component it takes.
    fn component_type_id(&self) -> TypeId;

    /// Whether this strategy can update `view` in place.
    fn can_update(&self, view: &dyn View) -> bool;

    fn build_view(&self) -> ViewRef;

    /// Apply this component to `view`. Returns `false` for an unsupported pairing.
    fn apply_to_view(&self, view: &mut dyn View) -> bool;

    fn preferred_size_within(&self, available: Size) -> Option<Size>;

    fn eq_dyn(&self, other: &dyn DynComponent) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<C: ViewComponent> DynComponent for C {
    fn component_name(&self) -> &'static str {
        type_name::<C>()
    }

    fn component_type_id(&self) -> TypeId {
        TypeId::of::<C>()
    }

    fn can_update(&self, view: &dyn View) -> bool {
        view.is::<C::View>()
    }

    fn build_view(&self) -> ViewRef {
        view_ref(self.create_view())
    }

    fn apply_to_view(&self, view: &mut dyn View) -> bool {
        match view.downcast_mut::<C::View>() {
            Some(view) => {
                self.update_view(view);
                true
            }
            None => false,
        }
    }

    fn preferred_size_within(&self, available: Size) -> Option<Size> {
        self.preferred_size(available)
    }

    fn eq_dyn(&self, other: &dyn DynComponent) -> bool {
        other
            .as_any()
            .downcast_ref::<C>()
            .map_or(false, |other| other == self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type-erased, cheaply clonable component.
#[derive(Clone)]
pub struct AnyComponent(Rc<dyn DynComponent>);

impl AnyComponent {
    pub fn new<C: ViewComponent>(component: C) -> Self {
        Self(Rc::new(component))
    }

    /// Wrap a hand-written strategy.
    pub fn from_dyn(component: Rc<dyn DynComponent>) -> Self {
        Self(component)
    }

    /// The placeholder that collapses its slot to zero height.
    pub fn empty() -> Self {
        Self::new(EmptyComponent)
    }

    /// Borrow the concrete component, if it is a `C`.
    pub fn downcast_ref<C: ViewComponent>(&self) -> Option<&C> {
        self.0.as_any().downcast_ref::<C>()
    }
}

impl Deref for AnyComponent {
    type Target = dyn DynComponent;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for AnyComponent {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0) || self.0.eq_dyn(&*other.0)
    }
}

impl fmt::Debug for AnyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<C: ViewComponent> From<C> for AnyComponent {
    fn from(component: C) -> Self {
        Self::new(component)
    }
}

/// The component type a stack slot is declared to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
    view_name: &'static str,
}

impl ComponentType {
    pub fn of<C: ViewComponent>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
            view_name: type_name::<C::View>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name of the view type the declared component renders into.
    pub fn view_name(&self) -> &'static str {
        self.view_name
    }

    /// Whether `component` may fill a slot of this type. The empty
    /// placeholder fits every slot.
    pub fn accepts(&self, component: &dyn DynComponent) -> bool {
        let id = component.component_type_id();
        id == self.id || id == TypeId::of::<EmptyComponent>()
    }
}

/// Caller-supplied sizing that replaces a component's own measurement.
///
/// Receives the layout size the component is measured in. Two overrides are
/// equal when they share the same closure, so cloning a component keeps it
/// equal to the original.
#[derive(Clone)]
pub struct SizeOverride(Rc<dyn Fn(Size) -> Size>);

impl SizeOverride {
    pub fn new(size: impl Fn(Size) -> Size + 'static) -> Self {
        Self(Rc::new(size))
    }

    pub fn size_for(&self, layout: Size) -> Size {
        (self.0)(layout)
    }
}

impl PartialEq for SizeOverride {
    fn eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.0) as *const () == Rc::as_ptr(&other.0) as *const ()
    }
}

impl fmt::Debug for SizeOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SizeOverride(..)")
    }
}

/// Placeholder component: an invisible, zero-height slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmptyComponent;

impl ViewComponent for EmptyComponent {
    type View = PlainView;

    fn create_view(&self) -> PlainView {
        PlainView::default()
    }

    fn update_view(&self, view: &mut PlainView) {
        view.intrinsic_size = Size::ZERO;
    }

    fn preferred_size(&self, _available: Size) -> Option<Size> {
        Some(Size::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Block {
        height: f64,
    }

    impl ViewComponent for Block {
        type View = PlainView;

        fn create_view(&self) -> PlainView {
            PlainView::default()
        }

        fn update_view(&self, view: &mut PlainView) {
            view.intrinsic_size = Size::new(10.0, self.height);
        }
    }

    #[test]
    fn test_equality_by_value() {
        let a = AnyComponent::new(Block { height: 10.0 });
        let b = AnyComponent::new(Block { height: 10.0 });
        let c = AnyComponent::new(Block { height: 20.0 });

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, AnyComponent::empty());
    }

    #[test]
    fn test_apply_to_matching_view() {
        let component = AnyComponent::new(Block { height: 42.0 });
        let view = component.build_view();

        assert!(component.can_update(&*view.borrow()));
        assert!(component.apply_to_view(&mut *view.borrow_mut()));

        let borrowed = view.borrow();
        let plain = borrowed.downcast_ref::<PlainView>().unwrap();
        assert!((plain.intrinsic_size.height - 42.0).abs() < 0.001);
    }

    #[test]
    fn test_apply_to_foreign_view_fails() {
        #[derive(Debug, Default)]
        struct Other(PlainView);

        impl View for Other {
            fn frame(&self) -> quilt_core::Rect {
                self.0.frame()
            }
            fn set_frame(&mut self, frame: quilt_core::Rect) {
                self.0.set_frame(frame)
            }
            fn is_hidden(&self) -> bool {
                self.0.is_hidden()
            }
            fn set_hidden(&mut self, hidden: bool) {
                self.0.set_hidden(hidden)
            }
            fn size_that_fits(&mut self, size: Size) -> Size {
                self.0.size_that_fits(size)
            }
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }

        let component = AnyComponent::new(Block { height: 42.0 });
        let mut other = Other::default();

        assert!(!component.can_update(&other));
        assert!(!component.apply_to_view(&mut other));
    }

    #[test]
    fn test_component_type_accepts() {
        let block = ComponentType::of::<Block>();

        assert!(block.accepts(&Block { height: 1.0 }));
        assert!(block.accepts(&EmptyComponent));
        assert!(!ComponentType::of::<EmptyComponent>().accepts(&Block { height: 1.0 }));
        assert!(block.view_name().ends_with("PlainView"));
        assert_eq!(AnyComponent::new(Block { height: 1.0 }).component_type_id(), TypeId::of::<Block>());
    }

    #[test]
    fn test_size_override_identity() {
        let square = SizeOverride::new(|layout| Size::new(layout.width, layout.width));
        let other = SizeOverride::new(|layout| Size::new(layout.width, layout.width));

        assert_eq!(square.size_for(Size::new(30.0, 500.0)), Size::new(30.0, 30.0));
        assert_eq!(square, square.clone());
        assert_ne!(square, other);
    }

    #[test]
    fn test_empty_component_has_zero_size() {
        let empty = AnyComponent::empty();
        assert_eq!(
            empty.preferred_size_within(Size::new(100.0, 100.0)),
            Some(Size::ZERO)
        );
        assert!(empty.downcast_ref::<EmptyComponent>().is_some());
    }
}
