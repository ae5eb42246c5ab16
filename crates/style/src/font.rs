//! Font attributes. They do not drive the packing algorithm directly, but a change to any of
//! them changes what content measures to.
use crate::keyword::keywords;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Family name that selects the platform's default face.
pub const SYSTEM: &str = "system";

/// Font size that selects the platform's default size.
pub const SYSTEM_DEFAULT_FONT_SIZE: i32 = -1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

keywords!(FontStyle {
    Normal => "normal",
    Italic => "italic",
    Oblique => "oblique",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontVariant {
    #[default]
    Normal,
    SmallCaps,
}

keywords!(FontVariant {
    Normal => "normal",
    SmallCaps => "small-caps",
});

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

keywords!(FontWeight {
    Normal => "normal",
    Bold => "bold",
});

impl FontWeight {
    /// Returns the numeric weight value on the 100-900 scale.
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Normal => 400,
            FontWeight::Bold => 700,
        }
    }
}

/// The `font` composite: every font attribute of a style in one value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    pub family: Vec<String>,
    pub size: i32,
    #[serde(default)]
    pub style: FontStyle,
    #[serde(default)]
    pub variant: FontVariant,
    #[serde(default)]
    pub weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: vec![SYSTEM.to_string()],
            size: SYSTEM_DEFAULT_FONT_SIZE,
            style: FontStyle::default(),
            variant: FontVariant::default(),
            weight: FontWeight::default(),
        }
    }
}

impl Font {
    pub fn new(family: impl Into<String>, size: i32) -> Self {
        Self {
            family: vec![family.into()],
            size,
            ..Self::default()
        }
    }

    pub fn is_system_size(&self) -> bool {
        self.size == SYSTEM_DEFAULT_FONT_SIZE
    }
}

/// Writes a family list, quoting names that contain whitespace.
pub(crate) fn write_family(f: &mut fmt::Formatter<'_>, family: &[String]) -> fmt::Result {
    for (i, name) in family.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if name.contains(char::is_whitespace) {
            write!(f, "'{}'", name)?;
        } else {
            f.write_str(name)?;
        }
    }
    Ok(())
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.style != FontStyle::Normal {
            write!(f, "{} ", self.style)?;
        }
        if self.variant != FontVariant::Normal {
            write!(f, "{} ", self.variant)?;
        }
        if self.weight != FontWeight::Normal {
            write!(f, "{} ", self.weight)?;
        }
        if self.is_system_size() {
            f.write_str("system ")?;
        } else {
            write!(f, "{} ", self.size)?;
        }
        write_family(f, &self.family)
    }
}
