//! Computed geometry of a single node.

use boxpack_types::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The result of laying out one node.
///
/// Offsets are relative to the parent's content origin: `content_left`/`content_top` place
/// this node's content inside its parent, and `content_right`/`content_bottom` are the
/// trailing insets. `origin_*` caches the parent's absolute content origin so absolute
/// positions are a single addition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    pub visible: bool,
    pub content_width: f32,
    pub content_height: f32,
    pub content_top: f32,
    pub content_right: f32,
    pub content_bottom: f32,
    pub content_left: f32,
    pub origin_top: f32,
    pub origin_left: f32,
}

impl Default for LayoutBox {
    fn default() -> Self {
        Self {
            visible: true,
            content_width: 0.0,
            content_height: 0.0,
            content_top: 0.0,
            content_right: 0.0,
            content_bottom: 0.0,
            content_left: 0.0,
            origin_top: 0.0,
            origin_left: 0.0,
        }
    }
}

impl LayoutBox {
    /// Extent from the parent's content origin to this box's trailing edge.
    pub fn width(&self) -> f32 {
        self.content_left + self.content_width + self.content_right
    }

    pub fn height(&self) -> f32 {
        self.content_top + self.content_height + self.content_bottom
    }

    pub fn content_size(&self) -> Size {
        Size::new(self.content_width, self.content_height)
    }

    pub fn absolute_content_left(&self) -> f32 {
        self.origin_left + self.content_left
    }

    pub fn absolute_content_top(&self) -> f32 {
        self.origin_top + self.content_top
    }

    pub fn absolute_content_right(&self) -> f32 {
        self.absolute_content_left() + self.content_width
    }

    pub fn absolute_content_bottom(&self) -> f32 {
        self.absolute_content_top() + self.content_height
    }

    pub fn absolute_origin(&self) -> Point {
        Point::new(self.absolute_content_left(), self.absolute_content_top())
    }

    /// The content area in absolute coordinates; what an applicator positions a widget at.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.absolute_content_left(),
            self.absolute_content_top(),
            self.content_width,
            self.content_height,
        )
    }
}

impl fmt::Display for LayoutBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Box ({}x{} @ {},{})>",
            self.content_width,
            self.content_height,
            self.absolute_content_left(),
            self.absolute_content_top()
        )
    }
}
