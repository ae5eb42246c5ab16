//! The closed set of style attribute names, including aliases and shorthands.
use crate::error::StyleError;
use crate::flex::Direction;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleProperty {
    Display,
    Visibility,
    Direction,
    AlignItems,
    JustifyContent,
    Gap,
    Width,
    Height,
    Flex,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    Margin,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    Padding,
    HorizontalAlignContent,
    VerticalAlignContent,
    HorizontalAlignItems,
    VerticalAlignItems,
    TextDirection,
    TextAlign,
    Color,
    BackgroundColor,
    FontFamily,
    FontStyle,
    FontVariant,
    FontWeight,
    FontSize,
    Font,
}

impl StyleProperty {
    pub const ALL: &'static [StyleProperty] = &[
        StyleProperty::Display,
        StyleProperty::Visibility,
        StyleProperty::Direction,
        StyleProperty::AlignItems,
        StyleProperty::JustifyContent,
        StyleProperty::Gap,
        StyleProperty::Width,
        StyleProperty::Height,
        StyleProperty::Flex,
        StyleProperty::MarginTop,
        StyleProperty::MarginRight,
        StyleProperty::MarginBottom,
        StyleProperty::MarginLeft,
        StyleProperty::Margin,
        StyleProperty::PaddingTop,
        StyleProperty::PaddingRight,
        StyleProperty::PaddingBottom,
        StyleProperty::PaddingLeft,
        StyleProperty::Padding,
        StyleProperty::HorizontalAlignContent,
        StyleProperty::VerticalAlignContent,
        StyleProperty::HorizontalAlignItems,
        StyleProperty::VerticalAlignItems,
        StyleProperty::TextDirection,
        StyleProperty::TextAlign,
        StyleProperty::Color,
        StyleProperty::BackgroundColor,
        StyleProperty::FontFamily,
        StyleProperty::FontStyle,
        StyleProperty::FontVariant,
        StyleProperty::FontWeight,
        StyleProperty::FontSize,
        StyleProperty::Font,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StyleProperty::Display => "display",
            StyleProperty::Visibility => "visibility",
            StyleProperty::Direction => "direction",
            StyleProperty::AlignItems => "align_items",
            StyleProperty::JustifyContent => "justify_content",
            StyleProperty::Gap => "gap",
            StyleProperty::Width => "width",
            StyleProperty::Height => "height",
            StyleProperty::Flex => "flex",
            StyleProperty::MarginTop => "margin_top",
            StyleProperty::MarginRight => "margin_right",
            StyleProperty::MarginBottom => "margin_bottom",
            StyleProperty::MarginLeft => "margin_left",
            StyleProperty::Margin => "margin",
            StyleProperty::PaddingTop => "padding_top",
            StyleProperty::PaddingRight => "padding_right",
            StyleProperty::PaddingBottom => "padding_bottom",
            StyleProperty::PaddingLeft => "padding_left",
            StyleProperty::Padding => "padding",
            StyleProperty::HorizontalAlignContent => "horizontal_align_content",
            StyleProperty::VerticalAlignContent => "vertical_align_content",
            StyleProperty::HorizontalAlignItems => "horizontal_align_items",
            StyleProperty::VerticalAlignItems => "vertical_align_items",
            StyleProperty::TextDirection => "text_direction",
            StyleProperty::TextAlign => "text_align",
            StyleProperty::Color => "color",
            StyleProperty::BackgroundColor => "background_color",
            StyleProperty::FontFamily => "font_family",
            StyleProperty::FontStyle => "font_style",
            StyleProperty::FontVariant => "font_variant",
            StyleProperty::FontWeight => "font_weight",
            StyleProperty::FontSize => "font_size",
            StyleProperty::Font => "font",
        }
    }

    /// The property a deprecated name stands in for.
    pub fn deprecated_alias_of(self) -> Option<StyleProperty> {
        match self {
            StyleProperty::PaddingTop => Some(StyleProperty::MarginTop),
            StyleProperty::PaddingRight => Some(StyleProperty::MarginRight),
            StyleProperty::PaddingBottom => Some(StyleProperty::MarginBottom),
            StyleProperty::PaddingLeft => Some(StyleProperty::MarginLeft),
            StyleProperty::Padding => Some(StyleProperty::Margin),
            _ => None,
        }
    }

    /// For a direction-relative alias, the property it stands for and the direction in
    /// which it is valid.
    pub fn direction_alias_of(self) -> Option<(StyleProperty, Direction)> {
        match self {
            StyleProperty::HorizontalAlignContent => {
                Some((StyleProperty::JustifyContent, Direction::Row))
            }
            StyleProperty::VerticalAlignContent => {
                Some((StyleProperty::JustifyContent, Direction::Column))
            }
            StyleProperty::HorizontalAlignItems => {
                Some((StyleProperty::AlignItems, Direction::Column))
            }
            StyleProperty::VerticalAlignItems => Some((StyleProperty::AlignItems, Direction::Row)),
            _ => None,
        }
    }

    /// The stored property whose value type this name reads and writes, ignoring direction.
    pub fn value_property(self) -> StyleProperty {
        self.deprecated_alias_of()
            .or_else(|| self.direction_alias_of().map(|(target, _)| target))
            .unwrap_or(self)
    }

    /// Whether a change to this property can change any computed box.
    pub fn affects_layout(self) -> bool {
        !matches!(
            self.value_property(),
            StyleProperty::TextAlign | StyleProperty::Color | StyleProperty::BackgroundColor
        )
    }

    /// Shorthands that fan out over several stored properties.
    pub fn is_shorthand(self) -> bool {
        matches!(
            self.value_property(),
            StyleProperty::Margin | StyleProperty::Font
        )
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StyleProperty {
    type Err = StyleError;

    /// Accepts snake_case or kebab-case names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        StyleProperty::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| StyleError::UnknownProperty(s.to_string()))
    }
}
