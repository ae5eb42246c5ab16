//! Enums controlling how a container packs its children.
use crate::keyword::keywords;
use boxpack_types::Axis;
use serde::{Deserialize, Serialize};

/// The axis children are laid out along.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    Row,
    Column,
}

keywords!(Direction { Row => "row", Column => "column" });

impl Direction {
    pub fn main_axis(self) -> Axis {
        match self {
            Direction::Row => Axis::Horizontal,
            Direction::Column => Axis::Vertical,
        }
    }

    pub fn cross_axis(self) -> Axis {
        self.main_axis().cross()
    }
}

/// Placement of children on the cross axis. An unset value behaves as `Stretch`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AlignItems {
    Start,
    Center,
    End,
    #[default]
    Stretch,
}

keywords!(AlignItems {
    Start => "start",
    Center => "center",
    End => "end",
    Stretch => "stretch",
});

/// Placement of leftover main-axis space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum JustifyContent {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

keywords!(JustifyContent {
    Start => "start",
    Center => "center",
    End => "end",
    SpaceBetween => "space-between",
});

/// Whether a node takes part in layout at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    #[default]
    Pack,
    None,
}

keywords!(Display { Pack => "pack", None => "none" });

/// Hidden nodes keep their space but are not shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

keywords!(Visibility {
    Visible => "visible",
    Hidden => "hidden",
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::Keyword;

    #[test]
    fn test_keywords_accept_both_separators() {
        assert_eq!(
            JustifyContent::from_keyword("space_between"),
            Some(JustifyContent::SpaceBetween)
        );
        assert_eq!(
            JustifyContent::from_keyword("Space-Between"),
            Some(JustifyContent::SpaceBetween)
        );
        assert_eq!(Direction::from_keyword("diagonal"), None);
    }

    #[test]
    fn test_direction_axes() {
        assert_eq!(Direction::Row.main_axis(), Axis::Horizontal);
        assert_eq!(Direction::Column.cross_axis(), Axis::Horizontal);
    }

    #[test]
    fn test_display_matches_serde_name() {
        let json = serde_json::to_string(&JustifyContent::SpaceBetween).unwrap();
        assert_eq!(json, format!("\"{}\"", JustifyContent::SpaceBetween));
    }
}
