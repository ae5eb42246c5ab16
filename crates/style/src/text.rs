use crate::keyword::keywords;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    Left,
    Right,
    Center,
    Justify,
}

keywords!(TextAlign {
    Left => "left",
    Right => "right",
    Center => "center",
    Justify => "justify",
});

/// Reading direction. Right-to-left mirrors the horizontal axis of a layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

keywords!(TextDirection { Ltr => "ltr", Rtl => "rtl" });

impl TextDirection {
    /// The alignment text falls back to when none is set.
    pub fn default_text_align(self) -> TextAlign {
        match self {
            TextDirection::Ltr => TextAlign::Left,
            TextDirection::Rtl => TextAlign::Right,
        }
    }
}
