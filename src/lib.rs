//! A retained-mode box layout engine.
//!
//! Build a [`LayoutTree`] of styled nodes, tell it how big their content is, and let a
//! [`LayoutEngine`] pack every node into a pixel rectangle for a [`Viewport`]. Trees can also
//! be described as JSON [`LayoutDocument`]s.

pub mod document;
pub mod error;

pub use document::{BoxReport, BuiltDocument, LayoutDocument};
pub use error::BoxpackError;

pub use boxpack_layout::{
    Applicator, BoundsCollector, Intrinsic, IntrinsicSize, LayoutBox, LayoutConfig, LayoutEngine,
    LayoutError, LayoutTree, NodeId, TreeError, apply_layout,
};
pub use boxpack_layout::perf::{DebugProfiler, NoOpProfiler, Profiler};
pub use boxpack_style::{
    AlignItems, Dimension, Direction, Display, Font, JustifyContent, Margins, Style, StyleError,
    StyleProperty, StyleValue, TextAlign, TextDirection, Visibility,
};
pub use boxpack_traits::{ContentMeasurer, InMemoryMeasurer, MeasureError};
pub use boxpack_types::{Axis, Color, Edges, Point, Rect, Size, Viewport};
