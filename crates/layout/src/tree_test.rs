#![cfg(test)]

use crate::intrinsic::{Intrinsic, IntrinsicSize};
use crate::test_utils::{container, create_test_engine, style};
use crate::tree::LayoutTree;
use crate::{LayoutError, TreeError};
use boxpack_style::{Direction, Style, StyleError};
use boxpack_types::Viewport;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn test_new_nodes_are_their_own_roots() {
    let mut tree = LayoutTree::new();
    let node = tree.create_node(Style::new());
    assert_eq!(tree.root(node).unwrap(), None);
    assert_eq!(tree.root_of(node).unwrap(), node);
    assert_eq!(tree.parent(node).unwrap(), None);
    assert!(tree.children(node).unwrap().is_empty());
    assert!(tree.is_dirty(node).unwrap());
}

#[test]
fn test_add_and_insert() {
    let mut tree = LayoutTree::new();
    let root = tree.create_node(Style::new());
    let a = tree.create_leaf(Style::new());
    let b = tree.create_leaf(Style::new());
    let c = tree.create_leaf(Style::new());

    tree.add(root, a).unwrap();
    tree.add(root, c).unwrap();
    tree.insert(root, 1, b).unwrap();
    assert_eq!(tree.children(root).unwrap(), &[a, b, c]);
    assert_eq!(tree.parent(b).unwrap(), Some(root));
    assert_eq!(tree.root(b).unwrap(), Some(root));

    // Out-of-range indices append.
    let d = tree.create_leaf(Style::new());
    tree.insert(root, 99, d).unwrap();
    assert_eq!(tree.children(root).unwrap().last(), Some(&d));
}

#[test]
fn test_roots_follow_subtrees() {
    let mut tree = LayoutTree::new();
    let grandchild = tree.create_leaf(Style::new());
    let child = tree.create_with_children(Style::new(), &[grandchild]).unwrap();
    assert_eq!(tree.root(grandchild).unwrap(), Some(child));

    let root = tree.create_node(Style::new());
    tree.add(root, child).unwrap();
    assert_eq!(tree.root(child).unwrap(), Some(root));
    assert_eq!(tree.root(grandchild).unwrap(), Some(root));

    tree.remove(root, child).unwrap();
    assert_eq!(tree.root(child).unwrap(), None);
    assert_eq!(tree.parent(child).unwrap(), None);
    assert_eq!(tree.root(grandchild).unwrap(), Some(child));
    assert!(tree.children(root).unwrap().is_empty());
}

#[test]
fn test_adding_moves_from_old_parent() {
    let mut tree = LayoutTree::new();
    let child = tree.create_leaf(Style::new());
    let first = tree.create_with_children(Style::new(), &[child]).unwrap();
    let second = tree.create_node(Style::new());

    tree.add(second, child).unwrap();
    assert!(tree.children(first).unwrap().is_empty());
    assert_eq!(tree.children(second).unwrap(), &[child]);
    assert_eq!(tree.root(child).unwrap(), Some(second));
    assert!(tree.is_dirty(first).unwrap());
}

#[test]
fn test_leaves_reject_children() {
    let mut tree = LayoutTree::new();
    let leaf = tree.create_leaf(Style::new());
    let other = tree.create_leaf(Style::new());

    assert!(!tree.can_have_children(leaf).unwrap());
    assert_eq!(
        tree.add(leaf, other),
        Err(TreeError::CannotHaveChildren { operation: "add" })
    );
    assert_eq!(
        tree.insert(leaf, 0, other),
        Err(TreeError::CannotHaveChildren {
            operation: "insert"
        })
    );
    assert_eq!(
        tree.remove(leaf, other),
        Err(TreeError::CannotHaveChildren {
            operation: "remove"
        })
    );
    // Clearing a leaf has nothing to do.
    assert!(tree.clear(leaf).is_ok());
    assert_eq!(tree.parent(other).unwrap(), None);
}

#[test]
fn test_remove_requires_a_child() {
    let mut tree = LayoutTree::new();
    let parent = tree.create_node(Style::new());
    let stranger = tree.create_leaf(Style::new());
    assert_eq!(
        tree.remove(parent, stranger),
        Err(TreeError::NotAChild {
            parent,
            child: stranger
        })
    );
}

#[test]
fn test_cycles_are_rejected() {
    let mut tree = LayoutTree::new();
    let inner = tree.create_node(Style::new());
    let outer = tree.create_with_children(Style::new(), &[inner]).unwrap();

    assert_eq!(
        tree.add(inner, outer),
        Err(TreeError::Cycle {
            parent: inner,
            child: outer
        })
    );
    assert_eq!(
        tree.add(outer, outer),
        Err(TreeError::Cycle {
            parent: outer,
            child: outer
        })
    );
    // Nothing moved.
    assert_eq!(tree.children(outer).unwrap(), &[inner]);
    assert_eq!(tree.parent(outer).unwrap(), None);
}

#[test]
fn test_clear_and_destroy() {
    let mut tree = LayoutTree::new();
    let a = tree.create_leaf(Style::new());
    let b = tree.create_leaf(Style::new());
    let root = tree.create_with_children(Style::new(), &[a, b]).unwrap();

    tree.clear(root).unwrap();
    assert!(tree.children(root).unwrap().is_empty());
    assert_eq!(tree.root_of(a).unwrap(), a);

    let c = tree.create_leaf(Style::new());
    let branch = tree.create_with_children(Style::new(), &[c]).unwrap();
    tree.add(root, branch).unwrap();
    tree.destroy(branch).unwrap();
    assert!(!tree.contains(branch));
    assert!(!tree.contains(c));
    assert!(tree.children(root).unwrap().is_empty());
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.parent(branch), Err(TreeError::NodeNotFound(branch)));
}

#[test]
fn test_descendants_are_pre_order() {
    let mut tree = LayoutTree::new();
    let a1 = tree.create_leaf(Style::new());
    let a = tree.create_with_children(Style::new(), &[a1]).unwrap();
    let b = tree.create_leaf(Style::new());
    let root = tree.create_with_children(Style::new(), &[a, b]).unwrap();
    assert_eq!(tree.descendants(root).unwrap(), vec![root, a, a1, b]);
}

#[test]
fn test_refresh_hook_fires_once_per_dirtying() {
    let engine = create_test_engine();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut tree = LayoutTree::new();
    let sink = Rc::clone(&calls);
    tree.on_refresh(move |root| sink.borrow_mut().push(root));

    let child = tree.create_leaf(Style::new());
    let root = container(&mut tree, "", &[child]);
    // The new root was dirty from the start.
    assert!(calls.borrow().is_empty());

    engine
        .layout(&mut tree, root, &Viewport::new(100.0, 100.0))
        .unwrap();
    assert!(!tree.is_dirty(child).unwrap());

    tree.set_style_property(child, "width", "10").unwrap();
    tree.set_style_property(child, "height", "10").unwrap();
    assert_eq!(*calls.borrow(), vec![root]);

    engine
        .layout(&mut tree, root, &Viewport::new(100.0, 100.0))
        .unwrap();
    tree.set_intrinsic_width(child, Some(Intrinsic::at_least(5.0)))
        .unwrap();
    assert_eq!(*calls.borrow(), vec![root, root]);
}

#[test]
fn test_destroy_only_refreshes_the_surviving_tree() {
    let engine = create_test_engine();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut tree = LayoutTree::new();
    let sink = Rc::clone(&calls);
    tree.on_refresh(move |root| sink.borrow_mut().push(root));

    let leaf = tree.create_leaf(Style::new());
    let branch = tree.create_with_children(Style::new(), &[leaf]).unwrap();
    let root = container(&mut tree, "", &[branch]);
    engine
        .layout(&mut tree, root, &Viewport::new(100.0, 100.0))
        .unwrap();

    tree.destroy(branch).unwrap();
    assert_eq!(*calls.borrow(), vec![root]);
    assert!(calls.borrow().iter().all(|id| tree.contains(*id)));
    assert!(tree.is_dirty(root).unwrap());

    // Plain removal still hands the detached subtree its own refresh.
    let kept = tree.create_leaf(Style::new());
    tree.add(root, kept).unwrap();
    engine
        .layout(&mut tree, root, &Viewport::new(100.0, 100.0))
        .unwrap();
    tree.remove(root, kept).unwrap();
    assert_eq!(*calls.borrow(), vec![root, root, kept]);
}

#[test]
fn test_equal_intrinsic_values_do_not_dirty() {
    let engine = create_test_engine();
    let mut tree = LayoutTree::new();
    let node = tree.create_leaf(Style::new());
    tree.set_intrinsic(node, IntrinsicSize::new(Some(Intrinsic::Exact(5.0)), None))
        .unwrap();
    engine
        .layout(&mut tree, node, &Viewport::new(0.0, 0.0))
        .unwrap();

    assert!(!tree.set_intrinsic_width(node, Some(Intrinsic::Exact(5.0))).unwrap());
    assert!(!tree.is_dirty(node).unwrap());

    // Same number, different kind of bound.
    assert!(tree.set_intrinsic_width(node, Some(Intrinsic::at_least(5.0))).unwrap());
    assert!(tree.is_dirty(node).unwrap());
}

#[test]
fn test_failed_style_change_leaves_node_clean() {
    let engine = create_test_engine();
    let mut tree = LayoutTree::new();
    let node = tree.create_node(style("direction: column; width: 10"));
    engine
        .layout(&mut tree, node, &Viewport::new(0.0, 0.0))
        .unwrap();

    let err = tree
        .update_style(node, [("height", "20"), ("horizontal_align_content", "center")])
        .unwrap_err();
    assert!(matches!(
        err,
        LayoutError::Style(StyleError::DirectionAlias {
            required: Direction::Row,
            ..
        })
    ));
    assert!(!tree.is_dirty(node).unwrap());
    assert!(!tree.style(node).unwrap().contains("height").unwrap());

    assert!(matches!(
        tree.set_style_property(node, "colour", "red"),
        Err(LayoutError::Style(StyleError::UnknownProperty(_)))
    ));
}

#[test]
fn test_set_style_validates() {
    let mut tree = LayoutTree::new();
    let node = tree.create_leaf(Style::new());
    let mut bad = Style::new();
    bad.flex = Some(-1.0);
    assert!(matches!(
        tree.set_style(node, bad),
        Err(LayoutError::Style(_))
    ));
    assert!(tree.set_style(node, style("flex: 2")).is_ok());
    assert_eq!(tree.style(node).unwrap().flex(), 2.0);
}

#[test]
fn test_content_changes_dirty_the_tree() {
    let engine = create_test_engine();
    let mut tree = LayoutTree::new();
    let node = tree.create_leaf(Style::new());
    engine
        .layout(&mut tree, node, &Viewport::new(0.0, 0.0))
        .unwrap();

    tree.set_content(node, Some("hello".to_string())).unwrap();
    assert!(tree.is_dirty(node).unwrap());
    assert_eq!(tree.node(node).unwrap().content(), Some("hello"));
}

#[test]
fn test_set_origin_moves_descendants() {
    let engine = create_test_engine();
    let mut tree = LayoutTree::new();
    let leaf = tree.create_leaf(style("width: 10; height: 10; margin: 4"));
    let inner = container(&mut tree, "margin: 3", &[leaf]);
    let root = container(&mut tree, "", &[inner]);
    engine
        .layout(&mut tree, root, &Viewport::new(100.0, 100.0))
        .unwrap();
    assert_eq!(tree.layout(leaf).unwrap().absolute_content_left(), 7.0);
    let width = tree.layout(leaf).unwrap().content_width;

    tree.set_origin(root, 50.0, 60.0).unwrap();
    let moved = tree.layout(leaf).unwrap();
    assert_eq!(moved.absolute_content_left(), 57.0);
    assert_eq!(moved.absolute_content_top(), 67.0);
    assert_eq!(moved.content_width, width);
    assert_eq!(tree.layout(inner).unwrap().origin_left, 50.0);
}
