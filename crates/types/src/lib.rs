//! Plain value types shared by every boxpack crate: geometry, viewports and colors.

pub mod color;
pub mod geometry;
pub mod viewport;

pub use color::Color;
pub use geometry::{Axis, Edges, Point, Rect, Size};
pub use viewport::Viewport;
