//! Content-supplied size hints.
//!
//! The layout pass never writes these; the content of a node (measured text, an image, a
//! native control) reports them, and the pass treats them as the node's natural size.

use boxpack_types::Axis;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One axis of an intrinsic size.
///
/// `Exact` content is exactly that big and will not be stretched or flexed. `AtLeast` content
/// needs that much room but is happy to grow. The two are different values even when the
/// number is the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intrinsic {
    Exact(f32),
    AtLeast(f32),
}

impl Intrinsic {
    pub fn at_least(value: f32) -> Self {
        Intrinsic::AtLeast(value)
    }

    pub fn value(self) -> f32 {
        match self {
            Intrinsic::Exact(v) | Intrinsic::AtLeast(v) => v,
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, Intrinsic::Exact(_))
    }
}

impl From<f32> for Intrinsic {
    fn from(value: f32) -> Self {
        Intrinsic::Exact(value)
    }
}

impl fmt::Display for Intrinsic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intrinsic::Exact(v) => write!(f, "{}", v),
            Intrinsic::AtLeast(v) => write!(f, "at least {}", v),
        }
    }
}

impl Serialize for Intrinsic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Bounded {
            at_least: f32,
        }
        match self {
            Intrinsic::Exact(v) => serializer.serialize_f32(*v),
            Intrinsic::AtLeast(v) => Bounded { at_least: *v }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Intrinsic {
    /// Accepts `12` or `{"at_least": 12}`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum IntrinsicDef {
            Exact(f32),
            Bounded { at_least: f32 },
        }

        Ok(match IntrinsicDef::deserialize(deserializer)? {
            IntrinsicDef::Exact(v) => Intrinsic::Exact(v),
            IntrinsicDef::Bounded { at_least } => Intrinsic::AtLeast(at_least),
        })
    }
}

/// Width, height and aspect ratio reported by a node's content.
///
/// Setters return whether the stored value changed; writing an equal value is a no-op so
/// content that re-reports the same measurement does not trigger a new layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IntrinsicSize {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<Intrinsic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<Intrinsic>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ratio: Option<f32>,
}

impl IntrinsicSize {
    pub fn new(width: Option<Intrinsic>, height: Option<Intrinsic>) -> Self {
        Self {
            width,
            height,
            ratio: None,
        }
    }

    pub fn width(&self) -> Option<Intrinsic> {
        self.width
    }

    pub fn height(&self) -> Option<Intrinsic> {
        self.height
    }

    /// Width divided by height.
    pub fn ratio(&self) -> Option<f32> {
        self.ratio
    }

    pub fn along(&self, axis: Axis) -> Option<Intrinsic> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// The lower bound this size puts on `axis`, or zero.
    pub fn minimum(&self, axis: Axis) -> f32 {
        self.along(axis).map_or(0.0, Intrinsic::value)
    }

    pub fn set_width(&mut self, width: Option<Intrinsic>) -> bool {
        replace_if_changed(&mut self.width, width)
    }

    pub fn set_height(&mut self, height: Option<Intrinsic>) -> bool {
        replace_if_changed(&mut self.height, height)
    }

    pub fn set_ratio(&mut self, ratio: Option<f32>) -> bool {
        replace_if_changed(&mut self.ratio, ratio)
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut Option<T>, value: Option<T>) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
