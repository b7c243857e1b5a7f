//! # Paint Benchmark
//!
//! Measures full frames, single-control repaints and hit-testing over a
//! list-heavy tree.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use foliage_core::{DockStyle, Point, Size, StackLayout};
use foliage_ui::{ControlId, ControlKind, ControlTree, ItemCollection, PixelBuffer, PointerEvent};

const WINDOW: Size = Size::new(800, 600);

fn build_tree(rows: usize) -> (ControlTree, Vec<ControlId>) {
    let mut tree = ControlTree::new(ControlKind::Panel);
    tree.resize_root(WINDOW);
    let root = tree.root();

    let stack = tree
        .insert(root, ControlKind::StackPanel(StackLayout::VERTICAL_EXPAND))
        .unwrap();
    tree.set_dock(stack, DockStyle::Fill).unwrap();

    let buttons = (0..rows)
        .map(|i| {
            let id = tree.insert(stack, ControlKind::Button).unwrap();
            tree.set_text(id, format!("Button {i}")).unwrap();
            id
        })
        .collect();

    let list = tree
        .insert(
            root,
            ControlKind::ListBox(ItemCollection::from_texts((0..50).map(|i| format!("Item {i}")))),
        )
        .unwrap();
    tree.set_dock(list, DockStyle::Right).unwrap();

    (tree, buttons)
}

fn bench_first_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_frame");

    for rows in [10, 50, 200] {
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, &rows| {
            b.iter_batched(
                || (build_tree(rows).0, PixelBuffer::new(WINDOW)),
                |(mut tree, mut surface)| black_box(tree.render_frame(&mut surface)),
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_single_invalidate(c: &mut Criterion) {
    let (mut tree, buttons) = build_tree(50);
    let mut surface = PixelBuffer::new(WINDOW);
    tree.render_frame(&mut surface);
    let target = buttons[25];

    c.bench_function("repaint_one_button", |b| {
        b.iter(|| {
            tree.invalidate(target).unwrap();
            black_box(tree.render_frame(&mut surface));
        });
    });
}

fn bench_hit_test(c: &mut Criterion) {
    let (mut tree, _) = build_tree(200);
    tree.layout_pending();

    c.bench_function("hit_test_200", |b| {
        b.iter(|| black_box(tree.hit_test(black_box(Point::new(100, 300)))));
    });

    c.bench_function("hover_sweep", |b| {
        b.iter(|| {
            for y in (0..600).step_by(7) {
                black_box(tree.dispatch_pointer(PointerEvent::moved(50, y)));
            }
        });
    });
}

criterion_group!(benches, bench_first_frame, bench_single_invalidate, bench_hit_test);
criterion_main!(benches);
