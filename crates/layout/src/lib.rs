use boxpack_style::StyleError;
use boxpack_traits::MeasureError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Node {0:?} does not exist in this tree.")]
    NodeNotFound(NodeId),
    #[error("Cannot {operation} children on a node that can't have children.")]
    CannotHaveChildren { operation: &'static str },
    #[error("Node {child:?} is not a child of {parent:?}.")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("Adding {child:?} to {parent:?} would create a cycle.")]
    Cycle { parent: NodeId, child: NodeId },
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Style(#[from] StyleError),
    #[error(transparent)]
    Measure(#[from] MeasureError),
}

pub mod algorithms;
pub mod applicator;
pub mod cache;
pub mod config;
pub mod engine;
pub mod intrinsic;
pub mod layout_box;
pub mod node;
pub mod perf;
pub mod tree;

pub use self::applicator::{Applicator, BoundsCollector, apply_layout};
pub use self::config::LayoutConfig;
pub use self::engine::LayoutEngine;
pub use self::intrinsic::{Intrinsic, IntrinsicSize};
pub use self::layout_box::LayoutBox;
pub use self::node::{Node, NodeId};
pub use self::tree::LayoutTree;

// Re-export the value types callers need to drive a layout
pub use boxpack_types::{Size, Viewport};

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tree_test;
