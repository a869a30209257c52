//! Layout pass benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quilt_core::{view_ref, EdgeInsets, PlainView, Size};
use quilt_layout::{
    GridAdapter, GridLayout, HorizontalAlignment, ReusableViewAdapter, StackLayout,
    VerticalStackAdapter, ViewComponent,
};

#[derive(Debug, Clone, PartialEq)]
struct Row(f64);

impl ViewComponent for Row {
    type View = PlainView;

    fn create_view(&self) -> PlainView {
        PlainView::default()
    }

    fn update_view(&self, view: &mut PlainView) {
        view.intrinsic_size = Size::new(200.0, self.0);
    }
}

fn stack_layout(c: &mut Criterion) {
    let mut adapter = VerticalStackAdapter::new(
        StackLayout::new()
            .with_spacing(8.0)
            .with_padding(EdgeInsets::uniform(12.0))
            .with_alignment(HorizontalAlignment::Center),
    );
    let rows: Vec<Row> = (0..100).map(|i| Row((i % 7) as f64 * 10.0)).collect();
    adapter.set_components(rows).unwrap();

    c.bench_function("stack_layout_100", |b| {
        b.iter(|| adapter.layout_managed_views(black_box(Size::new(320.0, 4000.0))))
    });
}

fn grid_layout(c: &mut Criterion) {
    let mut adapter = GridAdapter::new(GridLayout::new(10, 4).with_spacing(2.0), |index_path| {
        view_ref(PlainView::new(Size::new(50.0, 20.0 + index_path.column as f64)))
    });

    c.bench_function("grid_layout_10x4", |b| {
        b.iter(|| adapter.layout_managed_views(black_box(Size::new(320.0, 800.0))))
    });
}

criterion_group!(benches, stack_layout, grid_layout);
criterion_main!(benches);
