//! Adapter that stacks a list of heterogeneous components vertically.

use std::mem;

use smallvec::SmallVec;
use tracing::{debug, trace};

use quilt_core::{AdapterError, Size, ViewRef};

use crate::adapter::ReusableViewAdapter;
use crate::component::{AnyComponent, ComponentType};
use crate::stack::StackLayout;

/// One position in the stack.
struct Slot {
    component: AnyComponent,
    view: Option<ViewRef>,
    /// The component has not been applied to `view` yet.
    stale: bool,
}

impl Slot {
    fn new(component: AnyComponent) -> Self {
        Self {
            component,
            view: None,
            stale: true,
        }
    }
}

/// Lays out one view per component, top to bottom.
///
/// Views are created on the first size query or layout pass and survive
/// component updates as long as the new component can update them.
pub struct VerticalStackAdapter {
    layout: StackLayout,
    slots: Vec<Slot>,
    slot_count: Option<usize>,
    component_types: Option<Vec<ComponentType>>,
}

impl Default for VerticalStackAdapter {
    fn default() -> Self {
        Self::new(StackLayout::default())
    }
}

impl VerticalStackAdapter {
    pub fn new(layout: StackLayout) -> Self {
        Self {
            layout,
            slots: Vec::new(),
            slot_count: None,
            component_types: None,
        }
    }

    /// Require every component list to have exactly `count` entries.
    pub fn with_slot_count(mut self, count: usize) -> Self {
        self.slot_count = Some(count);
        self
    }

    /// Declare the component type of every slot. Component lists must then
    /// match slot for slot; the empty placeholder fits any slot.
    pub fn with_component_types(mut self, types: impl IntoIterator<Item = ComponentType>) -> Self {
        let types: Vec<ComponentType> = types.into_iter().collect();
        self.slot_count = Some(types.len());
        self.component_types = Some(types);
        self
    }

    pub fn layout(&self) -> &StackLayout {
        &self.layout
    }

    /// Replace the stack configuration. The host must re-layout.
    pub fn set_layout(&mut self, layout: StackLayout) {
        self.layout = layout;
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn components(&self) -> impl Iterator<Item = &AnyComponent> {
        self.slots.iter().map(|slot| &slot.component)
    }

    /// The view at `index`, if it has been created.
    pub fn view_at(&self, index: usize) -> Option<ViewRef> {
        self.slots.get(index)?.view.clone()
    }

    /// Replace the component list.
    ///
    /// Slots keep their view when the new component can update it; equal
    /// components are not re-applied. Views of a different kind are dropped
    /// and rebuilt on the next measurement. The host must re-layout.
    ///
    /// A list that breaks the declared slot count or slot types is rejected
    /// and leaves the adapter unchanged.
    pub fn set_components<I>(&mut self, components: I) -> Result<(), AdapterError>
    where
        I: IntoIterator,
        I::Item: Into<AnyComponent>,
    {
        let components: Vec<AnyComponent> = components.into_iter().map(Into::into).collect();
        if let Some(expected) = self.slot_count {
            if components.len() != expected {
                return Err(AdapterError::SlotCountMismatch {
                    expected,
                    found: components.len(),
                });
            }
        }
        if let Some(types) = &self.component_types {
            let misplaced = types
                .iter()
                .zip(&components)
                .find(|(declared, component)| !declared.accepts(&***component));
            if let Some((declared, component)) = misplaced {
                return Err(AdapterError::UnsupportedComponent {
                    component: component.component_name(),
                    view: declared.view_name(),
                });
            }
        }

        let mut previous = mem::take(&mut self.slots).into_iter();
        self.slots = components
            .into_iter()
            .enumerate()
            .map(|(index, component)| match previous.next() {
                Some(slot) if slot.component == component => slot,
                Some(slot) => reuse_slot(index, slot, component),
                None => Slot::new(component),
            })
            .collect();

        let discarded = previous.filter(|slot| slot.view.is_some()).count();
        if discarded > 0 {
            debug!(discarded, "discarded views of removed stack slots");
        }
        Ok(())
    }

    /// Create missing views and apply stale components.
    fn materialize(&mut self) -> Result<(), AdapterError> {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.view.is_none() {
                debug!(
                    index,
                    component = slot.component.component_name(),
                    "created stack view"
                );
                slot.view = Some(slot.component.build_view());
                slot.stale = true;
            }

            if let (true, Some(view)) = (slot.stale, &slot.view) {
                let mut view = view.borrow_mut();
                if !slot.component.apply_to_view(&mut *view) {
                    return Err(AdapterError::UnsupportedComponent {
                        component: slot.component.component_name(),
                        view: view.type_name(),
                    });
                }
                slot.stale = false;
            }
        }
        Ok(())
    }

    /// Preferred size of every slot at the layout width.
    fn measure(&mut self, bounding: Size) -> Result<SmallVec<[Size; 8]>, AdapterError> {
        self.materialize()?;
        let available = Size::unbounded_height(self.layout.layout_width(bounding));

        Ok(self
            .slots
            .iter()
            .map(|slot| {
                slot.component
                    .preferred_size_within(available)
                    .unwrap_or_else(|| match &slot.view {
                        Some(view) => view.borrow_mut().size_that_fits(available),
                        None => Size::ZERO,
                    })
            })
            .collect())
    }
}

fn reuse_slot(index: usize, slot: Slot, component: AnyComponent) -> Slot {
    let view = match slot.view {
        Some(view) if component.can_update(&*view.borrow()) => Some(view),
        Some(_) => {
            debug!(
                index,
                from = slot.component.component_name(),
                to = component.component_name(),
                "replacing stack view"
            );
            None
        }
        None => None,
    };
    Slot {
        component,
        view,
        stale: true,
    }
}

impl ReusableViewAdapter for VerticalStackAdapter {
    fn managed_views(&mut self) -> Result<Vec<ViewRef>, AdapterError> {
        self.materialize()?;
        Ok(self.slots.iter().filter_map(|slot| slot.view.clone()).collect())
    }

    fn size_that_fits(&mut self, bounding: Size) -> Result<Size, AdapterError> {
        let sizes = self.measure(bounding)?;
        let size = self.layout.content_size(bounding, &sizes);
        trace!(slots = sizes.len(), width = size.width, height = size.height, "stack size");
        Ok(size)
    }

    fn layout_managed_views(&mut self, bounding: Size) -> Result<(), AdapterError> {
        let sizes = self.measure(bounding)?;
        let placements = self.layout.layout(bounding, &sizes);

        for (index, (slot, placement)) in self.slots.iter().zip(placements).enumerate() {
            let Some(view) = &slot.view else { continue };
            let mut view = view.borrow_mut();
            view.set_frame(placement.frame);
            view.set_hidden(placement.hidden);
            if placement.hidden {
                if placement.frame.height > 0.0 {
                    debug!(index, y = placement.frame.y, "stack view clipped out of layout area");
                }
                continue;
            }
            view.layout_subviews()?;
        }

        trace!(slots = self.slots.len(), width = bounding.width, height = bounding.height, "stack laid out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{DynComponent, EmptyComponent, ViewComponent};
    use std::any::TypeId;
    use crate::stack::HorizontalAlignment;
    use quilt_core::{same_view, view_ref, EdgeInsets, PlainView, Rect, View};
    use std::any::Any;
    use std::rc::Rc;

    /// Fixed-size block measured by its view.
    #[derive(Debug, Clone, PartialEq)]
    struct Block {
        width: f64,
        height: f64,
    }

    impl Block {
        fn new(width: f64, height: f64) -> Self {
            Self { width, height }
        }
    }

    impl ViewComponent for Block {
        type View = PlainView;

        fn create_view(&self) -> PlainView {
            PlainView::default()
        }

        fn update_view(&self, view: &mut PlainView) {
            view.intrinsic_size = Size::new(self.width, self.height);
        }
    }

    /// Component that reports its own size instead of measuring its view.
    #[derive(Debug, Clone, PartialEq)]
    struct SelfSized(f64);

    #[derive(Debug, Default)]
    struct SizedView(PlainView);

    impl View for SizedView {
        fn frame(&self) -> Rect {
            self.0.frame()
        }
        fn set_frame(&mut self, frame: Rect) {
            self.0.set_frame(frame)
        }
        fn is_hidden(&self) -> bool {
            self.0.is_hidden()
        }
        fn set_hidden(&mut self, hidden: bool) {
            self.0.set_hidden(hidden)
        }
        fn size_that_fits(&mut self, _size: Size) -> Size {
            Size::new(999.0, 999.0)
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    impl ViewComponent for SelfSized {
        type View = SizedView;

        fn create_view(&self) -> SizedView {
            SizedView::default()
        }

        fn update_view(&self, _view: &mut SizedView) {}

        fn preferred_size(&self, available: Size) -> Option<Size> {
            Some(Size::new(available.width, self.0))
        }
    }

    /// Strategy that builds a view it cannot update.
    #[derive(Debug)]
    struct Broken;

    impl DynComponent for Broken {
        fn component_name(&self) -> &'static str {
            "Broken"
        }
        fn component_type_id(&self) -> TypeId {
            TypeId::of::<Broken>()
        }
        fn can_update(&self, _view: &dyn View) -> bool {
            false
        }
        fn build_view(&self) -> ViewRef {
            view_ref(PlainView::default())
        }
        fn apply_to_view(&self, _view: &mut dyn View) -> bool {
            false
        }
        fn preferred_size_within(&self, _available: Size) -> Option<Size> {
            None
        }
        fn eq_dyn(&self, _other: &dyn DynComponent) -> bool {
            false
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    fn spaced_layout() -> StackLayout {
        StackLayout::new()
            .with_spacing(8.0)
            .with_padding(EdgeInsets::new(4.0, 0.0, 4.0, 0.0))
    }

    #[test]
    fn test_size_with_placeholder() {
        let mut adapter = VerticalStackAdapter::new(spaced_layout());
        adapter
            .set_components(vec![
                AnyComponent::new(Block::new(50.0, 20.0)),
                AnyComponent::empty(),
                AnyComponent::new(Block::new(50.0, 30.0)),
            ])
            .unwrap();

        let size = adapter.size_that_fits(Size::new(100.0, 1000.0)).unwrap();

        assert!((size.height - 66.0).abs() < 0.001);
        assert!((size.width - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_empty_adapter_is_zero() {
        let mut adapter = VerticalStackAdapter::new(spaced_layout());
        assert_eq!(adapter.size_that_fits(Size::new(100.0, 100.0)).unwrap(), Size::ZERO);
        assert!(adapter.managed_views().unwrap().is_empty());
    }

    #[test]
    fn test_views_created_lazily() {
        let mut adapter = VerticalStackAdapter::default();
        adapter.set_components([Block::new(10.0, 10.0)]).unwrap();

        assert!(adapter.view_at(0).is_none());
        adapter.layout_managed_views(Size::new(100.0, 100.0)).unwrap();
        assert!(adapter.view_at(0).is_some());
    }

    #[test]
    fn test_layout_frames() {
        let mut adapter = VerticalStackAdapter::new(
            spaced_layout().with_alignment(HorizontalAlignment::Center),
        );
        adapter
            .set_components(vec![
                AnyComponent::new(Block::new(40.0, 20.0)),
                AnyComponent::new(EmptyComponent),
                AnyComponent::new(Block::new(60.0, 30.0)),
            ])
            .unwrap();

        adapter.layout_managed_views(Size::new(100.0, 66.0)).unwrap();

        let first = adapter.view_at(0).unwrap();
        let first = first.borrow();
        assert_eq!(first.frame(), Rect::new(30.0, 4.0, 40.0, 20.0));
        assert!(!first.is_hidden());

        assert!(adapter.view_at(1).unwrap().borrow().is_hidden());

        let third = adapter.view_at(2).unwrap();
        assert_eq!(third.borrow().frame(), Rect::new(20.0, 32.0, 60.0, 30.0));
    }

    #[test]
    fn test_preferred_size_overrides_measurement() {
        let mut adapter = VerticalStackAdapter::new(
            StackLayout::new().with_padding(EdgeInsets::symmetric(10.0, 0.0)),
        );
        adapter.set_components([SelfSized(25.0)]).unwrap();

        let size = adapter.size_that_fits(Size::new(100.0, 500.0)).unwrap();
        assert!((size.height - 25.0).abs() < 0.001);

        adapter.layout_managed_views(Size::new(100.0, 500.0)).unwrap();
        let view = adapter.view_at(0).unwrap();
        assert_eq!(view.borrow().frame(), Rect::new(10.0, 0.0, 80.0, 25.0));
    }

    #[test]
    fn test_identical_components_keep_views() {
        let components = vec![
            AnyComponent::new(Block::new(10.0, 10.0)),
            AnyComponent::new(Block::new(20.0, 20.0)),
        ];
        let mut adapter = VerticalStackAdapter::default();
        adapter.set_components(components.clone()).unwrap();
        let before = adapter.managed_views().unwrap();

        adapter
            .set_components(vec![
                AnyComponent::new(Block::new(10.0, 10.0)),
                AnyComponent::new(Block::new(20.0, 20.0)),
            ])
            .unwrap();
        let after = adapter.managed_views().unwrap();

        assert_eq!(before.len(), after.len());
        for (a, b) in before.iter().zip(after.iter()) {
            assert!(same_view(a, b));
        }
    }

    #[test]
    fn test_changed_component_same_kind_reuses_view() {
        let mut adapter = VerticalStackAdapter::default();
        adapter.set_components([Block::new(10.0, 10.0)]).unwrap();
        let before = adapter.managed_views().unwrap();

        adapter.set_components([Block::new(10.0, 45.0)]).unwrap();
        let size = adapter.size_that_fits(Size::new(100.0, 100.0)).unwrap();
        let after = adapter.managed_views().unwrap();

        assert!(same_view(&before[0], &after[0]));
        assert!((size.height - 45.0).abs() < 0.001);
    }

    #[test]
    fn test_changed_kind_replaces_view() {
        let mut adapter = VerticalStackAdapter::default();
        adapter.set_components([Block::new(10.0, 10.0)]).unwrap();
        let before = adapter.managed_views().unwrap();

        adapter.set_components([SelfSized(12.0)]).unwrap();
        let after = adapter.managed_views().unwrap();

        assert!(!same_view(&before[0], &after[0]));
        assert!(after[0].borrow().is::<SizedView>());
    }

    #[test]
    fn test_shrinking_discards_views() {
        let mut adapter = VerticalStackAdapter::default();
        adapter
            .set_components(vec![Block::new(1.0, 1.0), Block::new(2.0, 2.0), Block::new(3.0, 3.0)])
            .unwrap();
        let before = adapter.managed_views().unwrap();
        let dropped = Rc::downgrade(&before[2]);
        drop(before);

        adapter.set_components(vec![Block::new(1.0, 1.0)]).unwrap();

        assert_eq!(adapter.len(), 1);
        assert!(dropped.upgrade().is_none());
    }

    #[test]
    fn test_slot_count_mismatch() {
        let mut adapter = VerticalStackAdapter::default().with_slot_count(2);

        let err = adapter.set_components([Block::new(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, AdapterError::SlotCountMismatch { expected: 2, found: 1 });
        assert!(adapter
            .set_components([Block::new(1.0, 1.0), Block::new(2.0, 2.0)])
            .is_ok());
    }

    #[test]
    fn test_unsupported_component_fails() {
        let mut adapter = VerticalStackAdapter::default();
        adapter
            .set_components(vec![AnyComponent::from_dyn(Rc::new(Broken))])
            .unwrap();

        let err = adapter.layout_managed_views(Size::new(100.0, 100.0)).unwrap_err();
        assert!(matches!(
            err,
            AdapterError::UnsupportedComponent { component: "Broken", .. }
        ));
    }

    #[test]
    fn test_declared_component_types() {
        let mut adapter = VerticalStackAdapter::default()
            .with_component_types([ComponentType::of::<Block>(), ComponentType::of::<SelfSized>()]);

        adapter
            .set_components(vec![AnyComponent::new(Block::new(10.0, 10.0)), AnyComponent::empty()])
            .unwrap();

        let err = adapter
            .set_components(vec![AnyComponent::new(SelfSized(5.0)), AnyComponent::new(SelfSized(5.0))])
            .unwrap_err();
        assert!(matches!(
            err,
            AdapterError::UnsupportedComponent { view, .. } if view.ends_with("PlainView")
        ));

        // The rejected list left the previous components in place
        assert!(adapter.components().nth(1).unwrap().downcast_ref::<EmptyComponent>().is_some());

        let err = adapter.set_components([Block::new(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, AdapterError::SlotCountMismatch { expected: 2, found: 1 });
    }
}
