//! Layout engine micro-benchmarks
//!
//! Measures pack layout and content measurement for wide, deep and mixed trees.

use boxpack::{
    InMemoryMeasurer, Intrinsic, IntrinsicSize, LayoutConfig, LayoutEngine, LayoutTree, NodeId,
    Style, Viewport,
};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn quiet_engine() -> LayoutEngine {
    LayoutEngine::new(LayoutConfig {
        overflow_warnings: false,
        ..LayoutConfig::default()
    })
}

/// A single row of flexible, minimum-bounded children.
fn wide_row(children: usize) -> (LayoutTree, NodeId) {
    let mut tree = LayoutTree::with_capacity(children + 1);
    let root = tree.create_node(Style::from_declarations("direction: row; gap: 2").expect("style"));
    for i in 0..children {
        let child = tree.create_leaf(Style::from_declarations("flex: 1; margin: 1").expect("style"));
        tree.set_intrinsic(
            child,
            IntrinsicSize::new(
                Some(Intrinsic::at_least((i % 7) as f32 * 3.0)),
                Some(Intrinsic::Exact(20.0)),
            ),
        )
        .expect("intrinsic");
        tree.add(root, child).expect("add");
    }
    (tree, root)
}

/// Alternating row/column boxes nested `depth` levels deep, each with a sibling label.
fn deep_tree(depth: usize) -> (LayoutTree, NodeId) {
    let mut tree = LayoutTree::new();
    let mut current = tree.create_leaf(Style::from_declarations("width: 10; height: 10").expect("style"));
    for level in 0..depth {
        let direction = if level % 2 == 0 { "row" } else { "column" };
        let label = tree.create_leaf(Style::from_declarations("flex: 1").expect("style"));
        tree.set_content(label, Some(format!("level {}", level))).expect("content");
        let style = Style::from_declarations(&format!("direction: {}; margin: 2", direction)).expect("style");
        current = tree.create_with_children(style, &[label, current]).expect("children");
    }
    (tree, current)
}

fn benchmark_wide_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_wide_row");
    let engine = quiet_engine();

    for count in [10, 100, 1000] {
        let (mut tree, root) = wide_row(count);
        engine.reset_stats();
        group.bench_with_input(BenchmarkId::new("children", count), &count, |b, _| {
            b.iter(|| {
                engine
                    .layout(&mut tree, root, black_box(&Viewport::new(1920.0, 1080.0)))
                    .expect("layout")
            });
        });
    }

    group.finish();
}

fn benchmark_deep_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_deep_tree");
    let engine = quiet_engine();
    let measurer = InMemoryMeasurer::new();

    for depth in [8, 32, 128] {
        let (mut tree, root) = deep_tree(depth);
        engine.measure_content(&mut tree, root, &measurer).expect("measure");
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, _| {
            b.iter(|| {
                engine
                    .layout(&mut tree, root, black_box(&Viewport::with_dpi(1280.0, 800.0, 144.0, 96.0)))
                    .expect("layout")
            });
        });
    }

    group.finish();
}

fn benchmark_measure_content(c: &mut Criterion) {
    let mut group = c.benchmark_group("measure_content");
    let measurer = InMemoryMeasurer::new();

    for depth in [32, 128] {
        let (mut tree, root) = deep_tree(depth);
        group.bench_with_input(BenchmarkId::new("cold_cache", depth), &depth, |b, _| {
            b.iter(|| {
                let engine = quiet_engine();
                engine.measure_content(&mut tree, root, &measurer).expect("measure")
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_wide_rows,
    benchmark_deep_trees,
    benchmark_measure_content
);
criterion_main!(benches);
