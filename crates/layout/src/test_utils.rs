use crate::engine::LayoutEngine;
use crate::intrinsic::{Intrinsic, IntrinsicSize};
use crate::node::NodeId;
use crate::tree::LayoutTree;
use boxpack_style::Style;
use boxpack_types::Viewport;

/// Creates a default layout engine for testing purposes.
pub fn create_test_engine() -> LayoutEngine {
    let _ = env_logger::builder().is_test(true).try_init();
    LayoutEngine::default()
}

pub fn style(declarations: &str) -> Style {
    Style::from_declarations(declarations).unwrap()
}

/// A leaf reporting `width` x `height` as its intrinsic size.
pub fn sized_leaf(
    tree: &mut LayoutTree,
    declarations: &str,
    width: Intrinsic,
    height: Intrinsic,
) -> NodeId {
    let id = tree.create_leaf(style(declarations));
    tree.set_intrinsic(id, IntrinsicSize::new(Some(width), Some(height)))
        .unwrap();
    id
}

pub fn container(tree: &mut LayoutTree, declarations: &str, children: &[NodeId]) -> NodeId {
    tree.create_with_children(style(declarations), children)
        .unwrap()
}

/// Expected absolute content origin and content size of a node and its children.
pub struct Expect {
    pub origin: (f32, f32),
    pub content: (f32, f32),
    pub children: Vec<Expect>,
}

pub fn expect(origin: (f32, f32), content: (f32, f32)) -> Expect {
    Expect {
        origin,
        content,
        children: Vec::new(),
    }
}

pub fn expect_with(origin: (f32, f32), content: (f32, f32), children: Vec<Expect>) -> Expect {
    Expect {
        origin,
        content,
        children,
    }
}

pub fn layout(engine: &LayoutEngine, tree: &mut LayoutTree, root: NodeId, viewport: Viewport) {
    engine.layout(tree, root, &viewport).unwrap();
}

/// Asserts the root's outer size and then every node's geometry against `expected`.
pub fn assert_layout(tree: &LayoutTree, root: NodeId, size: (f32, f32), expected: &Expect) {
    let layout = tree.layout(root).unwrap();
    assert_eq!(
        (layout.width(), layout.height()),
        size,
        "final size doesn't match"
    );
    assert_node(tree, root, expected);
}

fn assert_node(tree: &LayoutTree, id: NodeId, expected: &Expect) {
    let layout = tree.layout(id).unwrap();
    assert_eq!(
        (layout.absolute_content_left(), layout.absolute_content_top()),
        expected.origin,
        "origin of {:?} doesn't match",
        id
    );
    assert_eq!(
        (layout.content_width, layout.content_height),
        expected.content,
        "content of {:?} doesn't match",
        id
    );
    let children = tree.children(id).unwrap();
    assert_eq!(
        children.len(),
        expected.children.len(),
        "number of children of {:?} doesn't match",
        id
    );
    for (child, sub) in children.iter().zip(&expected.children) {
        assert_node(tree, *child, sub);
    }
}
