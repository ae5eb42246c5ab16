//! Hand-off of computed boxes to whatever draws them.

use crate::layout_box::LayoutBox;
use crate::node::NodeId;
use crate::tree::LayoutTree;
use crate::TreeError;

/// Receives the computed box of every node after a layout pass.
///
/// A native toolkit adapter implements this to move and resize its widgets.
pub trait Applicator {
    fn set_bounds(&mut self, node: NodeId, layout: &LayoutBox);

    /// Called once every node of the tree rooted at `root` has been handed over.
    fn finish(&mut self, _root: NodeId) {}
}

/// Walks the subtree at `node` parents first and hands every box to `applicator`.
///
/// Returns the number of boxes applied.
pub fn apply_layout(
    tree: &LayoutTree,
    node: NodeId,
    applicator: &mut dyn Applicator,
) -> Result<usize, TreeError> {
    let nodes = tree.descendants(node)?;
    for id in &nodes {
        applicator.set_bounds(*id, tree.layout(*id)?);
    }
    applicator.finish(node);
    Ok(nodes.len())
}

/// Collects boxes in application order.
#[derive(Debug, Default, Clone)]
pub struct BoundsCollector {
    pub bounds: Vec<(NodeId, LayoutBox)>,
    pub finished: Option<NodeId>,
}

impl BoundsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&LayoutBox> {
        self.bounds
            .iter()
            .rev()
            .find(|(id, _)| *id == node)
            .map(|(_, layout)| layout)
    }
}

impl Applicator for BoundsCollector {
    fn set_bounds(&mut self, node: NodeId, layout: &LayoutBox) {
        self.bounds.push((node, *layout));
    }

    fn finish(&mut self, root: NodeId) {
        self.finished = Some(root);
    }
}
