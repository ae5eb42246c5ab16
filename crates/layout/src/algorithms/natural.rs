//! First pass: natural sizes.
//!
//! A node's natural size is the content size it asks for when nobody constrains it. An
//! explicit style size always wins. Otherwise a leaf asks for its intrinsic size and a
//! container for whatever its participating children need along its direction, but never
//! less than its own intrinsic minimum.

use crate::node::NodeId;
use crate::tree::LayoutTree;
use boxpack_style::Style;
use boxpack_types::{Axis, Size, Viewport};
use slotmap::SecondaryMap;

/// Natural content size of every node of a subtree.
pub type NaturalSizes = SecondaryMap<NodeId, Size>;

/// Computes natural sizes for `root` and everything below it.
pub fn compute(tree: &LayoutTree, root: NodeId, viewport: &Viewport) -> NaturalSizes {
    let mut sizes = SecondaryMap::new();
    measure_node(tree, root, viewport, &mut sizes);
    sizes
}

fn measure_node(
    tree: &LayoutTree,
    id: NodeId,
    viewport: &Viewport,
    sizes: &mut NaturalSizes,
) -> Size {
    let Some(node) = tree.nodes.get(id) else {
        return Size::zero();
    };
    let style = &node.style;
    let intrinsic = &node.intrinsic;

    let mut size = Size::new(
        intrinsic.minimum(Axis::Horizontal),
        intrinsic.minimum(Axis::Vertical),
    );

    if !node.children().is_empty() {
        let main_axis = style.direction().main_axis();
        let cross_axis = main_axis.cross();
        let gap = viewport.scale_px(style.gap());

        let mut main = 0.0f32;
        let mut cross = 0.0f32;
        let mut count = 0usize;
        for child in node.children() {
            // Hidden subtrees still get natural sizes; the pack pass recurses into them.
            let child_size = measure_node(tree, *child, viewport, sizes);
            let Some(child_node) = tree.nodes.get(*child) else {
                continue;
            };
            if !child_node.style.participates() {
                continue;
            }
            let margins = child_node.style.margin().to_edges(viewport.scale());
            main += child_size.along(main_axis) + margins.along(main_axis);
            cross = cross.max(child_size.along(cross_axis) + margins.along(cross_axis));
            count += 1;
        }
        if count > 1 {
            main += gap * (count - 1) as f32;
        }

        let children = Size::from_axes(main_axis, main, cross);
        size = Size::new(
            size.width.max(children.width),
            size.height.max(children.height),
        );
    }

    let (width, height) = explicit_size(style, viewport);
    if let Some(width) = width {
        size.width = width;
    }
    if let Some(height) = height {
        size.height = height;
    }

    let size = apply_ratio(
        size,
        width.is_some(),
        height.is_some(),
        intrinsic.ratio(),
        Size::new(
            intrinsic.minimum(Axis::Horizontal),
            intrinsic.minimum(Axis::Vertical),
        ),
    );
    sizes.insert(id, size);
    size
}

/// The style's explicit width and height in device pixels.
pub(crate) fn explicit_size(style: &Style, viewport: &Viewport) -> (Option<f32>, Option<f32>) {
    (
        style.width().px().map(|w| viewport.scale_px(w)),
        style.height().px().map(|h| viewport.scale_px(h)),
    )
}

pub(crate) fn explicit_along(style: &Style, axis: Axis, viewport: &Viewport) -> Option<f32> {
    let (width, height) = explicit_size(style, viewport);
    match axis {
        Axis::Horizontal => width,
        Axis::Vertical => height,
    }
}

/// Derives one side of `size` from the other through an aspect `ratio` (width / height).
///
/// With both sides explicit nothing changes. With only the height explicit the width
/// follows it; in every other case the height follows the width. The derived side never
/// drops under `min`.
pub fn apply_ratio(
    size: Size,
    explicit_width: bool,
    explicit_height: bool,
    ratio: Option<f32>,
    min: Size,
) -> Size {
    let Some(ratio) = ratio.filter(|r| r.is_finite() && *r > 0.0) else {
        return size;
    };
    match (explicit_width, explicit_height) {
        (true, true) => size,
        (false, true) => Size::new((size.height * ratio).max(min.width), size.height),
        _ => Size::new(size.width, (size.width / ratio).max(min.height)),
    }
}
