//! Defines primitives for size and spacing.
use boxpack_types::Edges;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An explicit size on one axis, in style pixels.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Px(f32),
    #[default]
    None,
}

impl Dimension {
    pub fn px(&self) -> Option<f32> {
        match self {
            Dimension::Px(v) => Some(*v),
            Dimension::None => None,
        }
    }
}

impl Hash for Dimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Dimension::Px(v) => {
                0u8.hash(state);
                v.to_bits().hash(state);
            }
            Dimension::None => 1u8.hash(state),
        }
    }
}

impl Eq for Dimension {}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Px(v) => write!(f, "{}", v),
            Dimension::None => f.write_str("none"),
        }
    }
}

/// Margin around a node's content, in style pixels.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Hash for Margins {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.top.to_bits().hash(state);
        self.right.to_bits().hash(state);
        self.bottom.to_bits().hash(state);
        self.left.to_bits().hash(state);
    }
}

impl Eq for Margins {}

impl Margins {
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn x(value: f32) -> Self {
        Self::new(0.0, value, 0.0, value)
    }

    pub fn y(value: f32) -> Self {
        Self::new(value, 0.0, value, 0.0)
    }

    /// Expands CSS shorthand order: 1, 2, 3 or 4 values.
    pub fn from_shorthand(values: &[f32]) -> Option<Self> {
        match *values {
            [all] => Some(Self::all(all)),
            [y, x] => Some(Self::new(y, x, y, x)),
            [top, x, bottom] => Some(Self::new(top, x, bottom, x)),
            [top, right, bottom, left] => Some(Self::new(top, right, bottom, left)),
            _ => None,
        }
    }

    /// Converts to device pixels at `scale`, truncating each side.
    pub fn to_edges(&self, scale: f32) -> Edges {
        Edges::new(
            (self.top * scale).trunc(),
            (self.right * scale).trunc(),
            (self.bottom * scale).trunc(),
            (self.left * scale).trunc(),
        )
    }
}

impl fmt::Display for Margins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.top == self.bottom && self.left == self.right {
            if self.top == self.left {
                write!(f, "{}", self.top)
            } else {
                write!(f, "{} {}", self.top, self.right)
            }
        } else {
            write!(
                f,
                "{} {} {} {}",
                self.top, self.right, self.bottom, self.left
            )
        }
    }
}
