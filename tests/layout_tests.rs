mod common;

use boxpack::{
    BoundsCollector, DebugProfiler, Direction, Intrinsic, IntrinsicSize, LayoutConfig,
    LayoutEngine, LayoutError, LayoutTree, NodeId, Style, StyleError, StyleValue, Viewport,
};
use common::{TestResult, init_logging};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// A random tree of up to `depth` levels with random styles and intrinsic sizes.
fn random_tree(rng: &mut StdRng, tree: &mut LayoutTree, depth: usize) -> NodeId {
    let mut style = Style::new();
    style.direction = Some(if rng.random_bool(0.5) {
        Direction::Row
    } else {
        Direction::Column
    });
    if rng.random_bool(0.5) {
        style.flex = Some(rng.random_range(0..4) as f32);
    }
    if rng.random_bool(0.3) {
        style
            .set("width", &rng.random_range(0..200).to_string())
            .unwrap();
    }
    if rng.random_bool(0.3) {
        style
            .set("margin", &format!("{} {}", rng.random_range(0..20), rng.random_range(0..20)))
            .unwrap();
    }
    if rng.random_bool(0.2) {
        style.set("justify_content", "space-between").unwrap();
    }
    if rng.random_bool(0.2) {
        style.set("text_direction", "rtl").unwrap();
    }
    if rng.random_bool(0.1) {
        style.set("display", "none").unwrap();
    }

    if depth == 0 || rng.random_bool(0.3) {
        let leaf = tree.create_leaf(style);
        let width = rng.random_range(0..150) as f32;
        let height = rng.random_range(0..60) as f32;
        let width = if rng.random_bool(0.5) {
            Intrinsic::at_least(width)
        } else {
            Intrinsic::Exact(width)
        };
        tree.set_intrinsic(leaf, IntrinsicSize::new(Some(width), Some(Intrinsic::Exact(height))))
            .unwrap();
        return leaf;
    }

    let node = tree.create_node(style);
    for _ in 0..rng.random_range(1..5) {
        let child = random_tree(rng, tree, depth - 1);
        tree.add(node, child).unwrap();
    }
    node
}

fn snapshot(tree: &LayoutTree, root: NodeId) -> Vec<boxpack::LayoutBox> {
    tree.descendants(root)
        .unwrap()
        .into_iter()
        .map(|id| *tree.layout(id).unwrap())
        .collect()
}

#[test]
fn test_random_trees_lay_out_idempotently() {
    init_logging();
    let engine = LayoutEngine::new(LayoutConfig {
        overflow_warnings: false,
        ..LayoutConfig::default()
    });
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let mut tree = LayoutTree::new();
        let root = random_tree(&mut rng, &mut tree, 4);
        let viewport = Viewport::with_dpi(
            rng.random_range(0..800) as f32,
            rng.random_range(0..600) as f32,
            if rng.random_bool(0.5) { 96.0 } else { 144.0 },
            96.0,
        );

        engine.layout(&mut tree, root, &viewport).unwrap();
        let first = snapshot(&tree, root);
        engine.layout(&mut tree, root, &viewport).unwrap();
        assert_eq!(first, snapshot(&tree, root));

        for layout in &first {
            assert!(layout.content_width >= 0.0 && layout.content_height >= 0.0);
        }
    }
}

#[test]
fn test_children_are_positioned_inside_their_parent_origin() {
    init_logging();
    let engine = LayoutEngine::default();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut tree = LayoutTree::new();
        let root = random_tree(&mut rng, &mut tree, 3);
        engine
            .layout(&mut tree, root, &Viewport::new(640.0, 480.0))
            .unwrap();
        for id in tree.descendants(root).unwrap() {
            let parent_layout = *tree.layout(id).unwrap();
            for child in tree.children(id).unwrap() {
                let child_layout = tree.layout(*child).unwrap();
                assert_eq!(child_layout.origin_left, parent_layout.absolute_content_left());
                assert_eq!(child_layout.origin_top, parent_layout.absolute_content_top());
                if !parent_layout.visible {
                    assert!(!child_layout.visible);
                }
            }
        }
    }
}

#[test]
fn test_alias_exclusivity() -> TestResult {
    init_logging();
    let mut tree = LayoutTree::new();
    let node = tree.create_node(Style::from_declarations("direction: column")?);

    let err = tree
        .set_style_property(node, "vertical_align_items", "center")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "'vertical_align_items' is only supported when (direction == row)"
    );
    assert!(matches!(
        err,
        LayoutError::Style(StyleError::DirectionAlias { .. })
    ));

    tree.set_style_property(node, "direction", "row")?;
    tree.set_style_property(node, "vertical_align_items", "center")?;
    let style = tree.style(node)?;
    assert_eq!(style.get("align_items")?, StyleValue::AlignItems(boxpack::AlignItems::Center));
    assert!(style.contains("vertical_align_items")?);
    Ok(())
}

#[test]
fn test_bulk_update_applies_direction_first() -> TestResult {
    let mut tree = LayoutTree::new();
    let node = tree.create_node(Style::new());
    tree.update_style(
        node,
        [
            ("vertical_align_content", "end"),
            ("direction", "column"),
        ],
    )?;
    assert_eq!(
        tree.style(node)?.justify_content(),
        boxpack::JustifyContent::End
    );
    Ok(())
}

#[test]
fn test_padding_is_an_alias_of_margin() -> TestResult {
    init_logging();
    let engine = LayoutEngine::default();
    let mut tree = LayoutTree::new();
    let child = tree.create_leaf(Style::from_declarations("padding: 5; width: 10; height: 10")?);
    let root = tree.create_with_children(Style::new(), &[child])?;
    engine.layout(&mut tree, root, &Viewport::new(0.0, 0.0))?;
    assert_eq!(tree.layout(root)?.content_width, 20.0);
    assert_eq!(tree.style(child)?.margin_left, Some(5.0));
    Ok(())
}

#[test]
fn test_refresh_cycle_with_hook() -> TestResult {
    init_logging();
    let engine = LayoutEngine::default();
    let mut tree = LayoutTree::new();
    let (sender, receiver) = std::sync::mpsc::channel();
    tree.on_refresh(move |root| {
        let _ = sender.send(root);
    });

    let button = tree.create_leaf(Style::from_declarations("flex: 1; margin: 50")?);
    tree.set_intrinsic(
        button,
        IntrinsicSize::new(Some(Intrinsic::at_least(120.0)), Some(Intrinsic::Exact(30.0))),
    )?;
    let root = tree.create_with_children(Style::new(), &[button])?;

    let mut collector = BoundsCollector::new();
    let viewport = Viewport::new(640.0, 480.0);
    assert_eq!(engine.refresh(&mut tree, button, &viewport, &mut collector)?, 2);
    assert!(receiver.try_recv().is_err());

    // Content re-measured to a larger minimum dirties the tree exactly once.
    tree.set_intrinsic_width(button, Some(Intrinsic::at_least(600.0)))?;
    tree.set_intrinsic_width(button, Some(Intrinsic::at_least(700.0)))?;
    assert_eq!(receiver.try_iter().collect::<Vec<_>>(), vec![root]);

    let mut collector = BoundsCollector::new();
    engine.refresh(&mut tree, root, &viewport, &mut collector)?;
    // The root grows to fit.
    assert_eq!(collector.get(root).map(|l| l.content_width), Some(800.0));
    assert_eq!(collector.get(button).map(|l| l.content_width), Some(700.0));
    Ok(())
}

#[test]
fn test_profiler_sees_passes_and_cache_hits() -> TestResult {
    init_logging();
    let profiler = Arc::new(DebugProfiler::new());
    let engine = LayoutEngine::with_profiler(LayoutConfig::default(), Box::new(Arc::clone(&profiler)));
    let measurer = boxpack::InMemoryMeasurer::new();

    let mut tree = LayoutTree::new();
    let a = tree.create_leaf(Style::new());
    let b = tree.create_leaf(Style::new());
    tree.set_content(a, Some("same".to_string()))?;
    tree.set_content(b, Some("same".to_string()))?;
    let root = tree.create_with_children(Style::new(), &[a, b])?;

    engine.measure_content(&mut tree, root, &measurer)?;
    engine.layout(&mut tree, root, &Viewport::new(0.0, 0.0))?;
    assert_eq!(profiler.misses(), 1);
    assert_eq!(profiler.hits(), 1);
    assert_eq!(profiler.passes(), 1);
    assert!(profiler.avg_node_time().is_some());
    profiler.log_summary();

    engine.reset_stats();
    assert_eq!(profiler.passes(), 0);
    assert_eq!(profiler.hits(), 0);
    assert_eq!(profiler.total("LayoutEngine::pack"), None);
    engine.layout(&mut tree, root, &Viewport::new(0.0, 0.0))?;
    assert_eq!(profiler.passes(), 1);
    Ok(())
}
