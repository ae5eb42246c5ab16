//! Second pass: positions and final sizes.
//!
//! Every container splits its main axis between fixed children (explicit size, no flex,
//! or exact intrinsic size) and flexible ones, hands the leftover to the flexible children
//! through [`distribute`], then places children along the main axis according to
//! `justify_content` and across it according to `align_items`. Right-to-left text mirrors
//! the horizontal axis.

use super::distribute::{FlexClaim, apportion, distribute};
use super::natural::{NaturalSizes, apply_ratio, explicit_along, explicit_size};
use crate::config::LayoutConfig;
use crate::layout_box::LayoutBox;
use crate::node::NodeId;
use crate::tree::LayoutTree;
use boxpack_style::{AlignItems, Direction, JustifyContent, TextDirection, Visibility};
use boxpack_types::{Axis, Edges, Size, Viewport};

/// Lays out the tree rooted at `root` against `viewport`.
///
/// The root fills the viewport minus its own margins unless it has an explicit size or
/// needs more room than that. Its origin is left untouched.
pub fn layout_root(
    tree: &mut LayoutTree,
    root: NodeId,
    viewport: &Viewport,
    natural: &NaturalSizes,
    config: &LayoutConfig,
) {
    let Some(node) = tree.nodes.get(root) else {
        return;
    };
    let style = &node.style;
    let margins = style.margin().to_edges(viewport.scale());
    let wanted = natural.get(root).copied().unwrap_or_else(Size::zero);
    let (explicit_width, explicit_height) = explicit_size(style, viewport);

    let size = Size::new(
        explicit_width.unwrap_or_else(|| (viewport.width - margins.horizontal()).max(wanted.width)),
        explicit_height
            .unwrap_or_else(|| (viewport.height - margins.vertical()).max(wanted.height)),
    );
    let intrinsic = node.intrinsic;
    let size = apply_ratio(
        size,
        explicit_width.is_some(),
        explicit_height.is_some(),
        intrinsic.ratio(),
        Size::new(
            intrinsic.minimum(Axis::Horizontal),
            intrinsic.minimum(Axis::Vertical),
        ),
    );
    let visible = style.visibility() == Visibility::Visible;

    if let Some(layout) = tree.layout_mut(root) {
        layout.visible = visible;
        layout.content_width = size.width;
        layout.content_height = size.height;
        layout.content_top = margins.top;
        layout.content_right = margins.right;
        layout.content_bottom = margins.bottom;
        layout.content_left = margins.left;
    }

    layout_children(tree, root, viewport, natural, config, visible);
}

/// Where one participating child ends up, relative to its parent's content origin.
struct Placement {
    id: NodeId,
    margins: Edges,
    size: Size,
    visible: bool,
}

fn layout_children(
    tree: &mut LayoutTree,
    parent: NodeId,
    viewport: &Viewport,
    natural: &NaturalSizes,
    config: &LayoutConfig,
    parent_visible: bool,
) {
    let Some(node) = tree.nodes.get(parent) else {
        return;
    };
    if node.children().is_empty() {
        return;
    }

    let style = &node.style;
    let direction = style.direction();
    let main_axis = direction.main_axis();
    let cross_axis = main_axis.cross();
    let rtl = style.text_direction() == TextDirection::Rtl;
    let align = style.align_items();
    let justify = style.justify_content();
    let gap = viewport.scale_px(style.gap());
    let content = node.layout.content_size();
    let main_avail = content.along(main_axis);
    let cross_avail = content.along(cross_axis);
    let origin_left = node.layout.absolute_content_left();
    let origin_top = node.layout.absolute_content_top();
    let children = node.children().to_vec();

    let mut placements = Vec::with_capacity(children.len());
    let mut skipped = Vec::new();
    let mut claims = Vec::new();
    let mut flexible = Vec::new();
    let mut fixed_total = 0.0f32;
    let mut margin_total = 0.0f32;

    for child in &children {
        let Some(child_node) = tree.nodes.get(*child) else {
            continue;
        };
        let child_style = &child_node.style;
        if !child_style.participates() {
            skipped.push(*child);
            continue;
        }

        let margins = child_style.margin().to_edges(viewport.scale());
        let wanted = natural.get(*child).copied().unwrap_or_else(Size::zero);
        margin_total += margins.along(main_axis);

        let natural_main = wanted.along(main_axis);
        let exact_main = child_node
            .intrinsic
            .along(main_axis)
            .is_some_and(|i| i.is_exact());
        let flex = child_style.flex();
        if explicit_along(child_style, main_axis, viewport).is_some() || flex <= 0.0 || exact_main
        {
            fixed_total += natural_main;
        } else {
            claims.push(FlexClaim::new(flex, natural_main));
            flexible.push(placements.len());
        }

        let natural_cross = wanted.along(cross_axis);
        let exact_cross = child_node
            .intrinsic
            .along(cross_axis)
            .is_some_and(|i| i.is_exact());
        let cross = if explicit_along(child_style, cross_axis, viewport).is_some() {
            natural_cross
        } else if align == AlignItems::Stretch && !exact_cross {
            (cross_avail - margins.along(cross_axis)).max(natural_cross)
        } else {
            natural_cross
        };

        placements.push(Placement {
            id: *child,
            margins,
            size: Size::from_axes(main_axis, natural_main, cross),
            visible: parent_visible && child_style.visibility() == Visibility::Visible,
        });
    }

    let count = placements.len();
    let gaps = if count > 1 {
        gap * (count - 1) as f32
    } else {
        0.0
    };
    let remaining = (main_avail - fixed_total - margin_total - gaps).max(0.0);
    for (index, share) in flexible.iter().zip(distribute(remaining, &claims)) {
        let placement = &mut placements[*index];
        let cross = placement.size.along(cross_axis);
        placement.size = Size::from_axes(main_axis, share, cross);
    }

    for placement in &mut placements {
        let Some(child_node) = tree.nodes.get(placement.id) else {
            continue;
        };
        let (explicit_width, explicit_height) = explicit_size(&child_node.style, viewport);
        let intrinsic = child_node.intrinsic;
        placement.size = apply_ratio(
            placement.size,
            explicit_width.is_some(),
            explicit_height.is_some(),
            intrinsic.ratio(),
            Size::new(
                intrinsic.minimum(Axis::Horizontal),
                intrinsic.minimum(Axis::Vertical),
            ),
        );
    }

    let used: f32 = placements
        .iter()
        .map(|p| p.size.along(main_axis))
        .sum::<f32>()
        + margin_total
        + gaps;
    let free = main_avail - used;
    if free < 0.0 && config.overflow_warnings {
        log::warn!(
            "children of {:?} need {} px along the {:?} axis but only {} px are available",
            parent,
            used,
            main_axis,
            main_avail
        );
    }

    let mut cursor = 0.0f32;
    let mut extra = vec![0.0f32; count.saturating_sub(1)];
    if free > 0.0 {
        match justify {
            JustifyContent::Start => {}
            JustifyContent::Center => cursor = (free / 2.0).floor(),
            JustifyContent::End => cursor = free,
            JustifyContent::SpaceBetween => {
                extra = apportion(free, &vec![1.0; count.saturating_sub(1)]);
            }
        }
    }

    let mirror_main = rtl && direction == Direction::Row;
    let mirror_cross = rtl && direction == Direction::Column;

    for (index, placement) in placements.iter().enumerate() {
        let main_size = placement.size.along(main_axis);
        let cross_size = placement.size.along(cross_axis);

        let (lead, trail) = leading_pair(&placement.margins, main_axis, mirror_main);
        cursor += lead;
        let main_offset = if mirror_main {
            main_avail - cursor - main_size
        } else {
            cursor
        };
        cursor += main_size + trail + gap + extra.get(index).copied().unwrap_or(0.0);

        let (cross_lead, cross_trail) =
            leading_pair(&placement.margins, cross_axis, mirror_cross);
        let slack = (cross_avail - cross_lead - cross_size - cross_trail).max(0.0);
        let from_lead = match align {
            AlignItems::Start | AlignItems::Stretch => cross_lead,
            AlignItems::Center => cross_lead + (slack / 2.0).floor(),
            AlignItems::End => cross_lead + slack,
        };
        let cross_offset = if mirror_cross {
            cross_avail - from_lead - cross_size
        } else {
            from_lead
        };

        let (left, top) = match main_axis {
            Axis::Horizontal => (main_offset, cross_offset),
            Axis::Vertical => (cross_offset, main_offset),
        };
        if let Some(layout) = tree.layout_mut(placement.id) {
            *layout = LayoutBox {
                visible: placement.visible,
                content_width: placement.size.width,
                content_height: placement.size.height,
                content_top: top,
                content_right: placement.margins.right,
                content_bottom: placement.margins.bottom,
                content_left: left,
                origin_top,
                origin_left,
            };
            log::trace!("placed {:?}: {}", placement.id, layout);
        }
        layout_children(tree, placement.id, viewport, natural, config, placement.visible);
    }

    for id in skipped {
        if let Some(layout) = tree.layout_mut(id) {
            *layout = LayoutBox {
                visible: false,
                origin_top,
                origin_left,
                ..LayoutBox::default()
            };
        }
        layout_children(tree, id, viewport, natural, config, false);
    }
}

/// The (leading, trailing) margins on `axis`, swapped when the axis is mirrored.
fn leading_pair(margins: &Edges, axis: Axis, mirrored: bool) -> (f32, f32) {
    let (lead, trail) = margins.pair(axis);
    if mirrored { (trail, lead) } else { (lead, trail) }
}
