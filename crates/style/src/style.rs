//! The per-node style: a closed set of typed attributes plus name-based access with alias
//! resolution.
//!
//! Fields are `Option`s so that "explicitly set" is distinguishable from "default". The
//! name-based API ([`Style::get`], [`Style::set`], [`Style::update`], [`Style::reset`],
//! [`Style::contains`]) validates every value and never leaves the style partially updated.

use crate::dimension::{Dimension, Margins};
use crate::error::StyleError;
use crate::flex::{AlignItems, Direction, Display, JustifyContent, Visibility};
use crate::font::{Font, FontStyle, FontVariant, FontWeight, SYSTEM, SYSTEM_DEFAULT_FONT_SIZE};
use crate::parsers::{parse_declarations, parse_value};
use crate::property::StyleProperty;
use crate::text::{TextAlign, TextDirection};
use crate::value::StyleValue;
use boxpack_types::Color;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::collections::BTreeMap;
use std::fmt;

/// Properties that own storage, in the order they are written out.
const STORED: &[StyleProperty] = &[
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
    StyleProperty::TextDirection,
    StyleProperty::TextAlign,
    StyleProperty::Color,
    StyleProperty::BackgroundColor,
    StyleProperty::FontFamily,
    StyleProperty::FontStyle,
    StyleProperty::FontVariant,
    StyleProperty::FontWeight,
    StyleProperty::FontSize,
];

const MARGIN_SIDES: [StyleProperty; 4] = [
    StyleProperty::MarginTop,
    StyleProperty::MarginRight,
    StyleProperty::MarginBottom,
    StyleProperty::MarginLeft,
];

const FONT_PARTS: [StyleProperty; 5] = [
    StyleProperty::FontFamily,
    StyleProperty::FontStyle,
    StyleProperty::FontVariant,
    StyleProperty::FontWeight,
    StyleProperty::FontSize,
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub display: Option<Display>,
    pub visibility: Option<Visibility>,
    pub direction: Option<Direction>,
    pub align_items: Option<AlignItems>,
    pub justify_content: Option<JustifyContent>,
    pub gap: Option<f32>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub flex: Option<f32>,
    pub margin_top: Option<f32>,
    pub margin_right: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub margin_left: Option<f32>,
    pub text_direction: Option<TextDirection>,
    pub text_align: Option<TextAlign>,
    pub color: Option<Color>,
    pub background_color: Option<Color>,
    pub font_family: Option<Vec<String>>,
    pub font_style: Option<FontStyle>,
    pub font_variant: Option<FontVariant>,
    pub font_weight: Option<FontWeight>,
    pub font_size: Option<i32>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a style from a declaration string such as `"direction: column; flex: 1"`.
    pub fn from_declarations(input: &str) -> Result<Self, StyleError> {
        let mut style = Style::new();
        style.apply_declarations(input)?;
        Ok(style)
    }

    /// Applies a declaration string as one bulk update.
    pub fn apply_declarations(&mut self, input: &str) -> Result<(), StyleError> {
        let declarations = parse_declarations(input)?;
        self.update(declarations)
    }

    // --- Name-based access ---

    /// Reads an attribute by name, applying defaults for unset values.
    pub fn get(&self, name: &str) -> Result<StyleValue, StyleError> {
        let property = self.resolve(name.parse()?)?;
        Ok(match property {
            StyleProperty::Margin => StyleValue::Margins(self.margin()),
            StyleProperty::Font => StyleValue::Font(self.font()),
            stored => self
                .stored_value(stored)
                .unwrap_or_else(|| self.default_value(stored)),
        })
    }

    /// Parses `value` and sets the named attribute.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), StyleError> {
        self.update([(name, value)])
    }

    /// Sets the named attribute to an already typed value.
    pub fn set_value(&mut self, name: &str, value: StyleValue) -> Result<(), StyleError> {
        let property = self.resolve(name.parse()?)?;
        let mut next = self.clone();
        next.assign(property, value)?;
        *self = next;
        Ok(())
    }

    /// Sets several attributes at once.
    ///
    /// Every direction in the batch is applied before any alias is checked, so an alias is
    /// validated against the direction this update leaves behind, whatever the argument order.
    /// On error the style is unchanged.
    pub fn update<I, N, V>(&mut self, declarations: I) -> Result<(), StyleError>
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (name, value) in declarations {
            let property: StyleProperty = name.as_ref().parse()?;
            parsed.push((property, parse_value(property, value.as_ref())?));
        }

        let mut next = self.clone();
        let (directions, others): (Vec<_>, Vec<_>) = parsed
            .into_iter()
            .partition(|(property, _)| *property == StyleProperty::Direction);
        for (property, value) in directions.into_iter().chain(others) {
            let target = next.resolve(property)?;
            next.assign(target, value)?;
        }
        *self = next;
        Ok(())
    }

    /// Returns the named attribute to its default.
    pub fn reset(&mut self, name: &str) -> Result<(), StyleError> {
        match self.resolve(name.parse()?)? {
            StyleProperty::Margin => MARGIN_SIDES.iter().for_each(|p| self.clear(*p)),
            StyleProperty::Font => FONT_PARTS.iter().for_each(|p| self.clear(*p)),
            stored => self.clear(stored),
        }
        Ok(())
    }

    /// Whether the named attribute has been explicitly set. A shorthand counts as set when
    /// any of its parts is.
    pub fn contains(&self, name: &str) -> Result<bool, StyleError> {
        Ok(match self.resolve(name.parse()?)? {
            StyleProperty::Margin => MARGIN_SIDES.iter().any(|p| self.is_set(*p)),
            StyleProperty::Font => FONT_PARTS.iter().any(|p| self.is_set(*p)),
            stored => self.is_set(stored),
        })
    }

    /// Checks every explicitly set value. Useful for styles assembled from public fields.
    pub fn validate(&self) -> Result<(), StyleError> {
        for property in STORED {
            if let Some(value) = self.stored_value(*property) {
                check(*property, &value)?;
            }
        }
        Ok(())
    }

    /// The explicitly set attributes, in declaration order.
    pub fn declarations(&self) -> Vec<(StyleProperty, StyleValue)> {
        STORED
            .iter()
            .filter_map(|p| self.stored_value(*p).map(|v| (*p, v)))
            .collect()
    }

    /// True if any attribute that feeds layout differs between the two styles.
    pub fn layout_differs(&self, other: &Style) -> bool {
        STORED
            .iter()
            .filter(|p| p.affects_layout())
            .any(|p| self.stored_value(*p) != other.stored_value(*p))
    }

    /// Maps an alias to the property it stands for, checking direction-relative aliases
    /// against the current direction.
    fn resolve(&self, property: StyleProperty) -> Result<StyleProperty, StyleError> {
        if let Some(target) = property.deprecated_alias_of() {
            log::warn!("'{}' is deprecated; use '{}' instead", property, target);
            return Ok(target);
        }
        if let Some((target, required)) = property.direction_alias_of() {
            if self.direction() != required {
                return Err(StyleError::DirectionAlias {
                    alias: property.name(),
                    required,
                });
            }
            return Ok(target);
        }
        Ok(property)
    }

    fn stored_value(&self, property: StyleProperty) -> Option<StyleValue> {
        match property {
            StyleProperty::Display => self.display.map(StyleValue::Display),
            StyleProperty::Visibility => self.visibility.map(StyleValue::Visibility),
            StyleProperty::Direction => self.direction.map(StyleValue::Direction),
            StyleProperty::AlignItems => self.align_items.map(StyleValue::AlignItems),
            StyleProperty::JustifyContent => self.justify_content.map(StyleValue::JustifyContent),
            StyleProperty::Gap => self.gap.map(StyleValue::Number),
            StyleProperty::Width => self.width.map(StyleValue::Dimension),
            StyleProperty::Height => self.height.map(StyleValue::Dimension),
            StyleProperty::Flex => self.flex.map(StyleValue::Number),
            StyleProperty::MarginTop => self.margin_top.map(StyleValue::Number),
            StyleProperty::MarginRight => self.margin_right.map(StyleValue::Number),
            StyleProperty::MarginBottom => self.margin_bottom.map(StyleValue::Number),
            StyleProperty::MarginLeft => self.margin_left.map(StyleValue::Number),
            StyleProperty::TextDirection => self.text_direction.map(StyleValue::TextDirection),
            StyleProperty::TextAlign => self.text_align.map(StyleValue::TextAlign),
            StyleProperty::Color => self.color.map(|c| StyleValue::Color(Some(c))),
            StyleProperty::BackgroundColor => {
                self.background_color.map(|c| StyleValue::Color(Some(c)))
            }
            StyleProperty::FontFamily => self.font_family.clone().map(StyleValue::FontFamily),
            StyleProperty::FontStyle => self.font_style.map(StyleValue::FontStyle),
            StyleProperty::FontVariant => self.font_variant.map(StyleValue::FontVariant),
            StyleProperty::FontWeight => self.font_weight.map(StyleValue::FontWeight),
            StyleProperty::FontSize => self.font_size.map(StyleValue::Integer),
            _ => None,
        }
    }

    fn default_value(&self, property: StyleProperty) -> StyleValue {
        match property {
            StyleProperty::Display => StyleValue::Display(Display::default()),
            StyleProperty::Visibility => StyleValue::Visibility(Visibility::default()),
            StyleProperty::Direction => StyleValue::Direction(Direction::default()),
            StyleProperty::AlignItems => StyleValue::AlignItems(AlignItems::default()),
            StyleProperty::JustifyContent => StyleValue::JustifyContent(JustifyContent::default()),
            StyleProperty::Width | StyleProperty::Height => {
                StyleValue::Dimension(Dimension::None)
            }
            StyleProperty::TextDirection => StyleValue::TextDirection(TextDirection::default()),
            StyleProperty::TextAlign => StyleValue::TextAlign(self.text_align()),
            StyleProperty::Color | StyleProperty::BackgroundColor => StyleValue::Color(None),
            StyleProperty::FontFamily => StyleValue::FontFamily(vec![SYSTEM.to_string()]),
            StyleProperty::FontStyle => StyleValue::FontStyle(FontStyle::default()),
            StyleProperty::FontVariant => StyleValue::FontVariant(FontVariant::default()),
            StyleProperty::FontWeight => StyleValue::FontWeight(FontWeight::default()),
            StyleProperty::FontSize => StyleValue::Integer(SYSTEM_DEFAULT_FONT_SIZE),
            _ => StyleValue::Number(0.0),
        }
    }

    fn is_set(&self, property: StyleProperty) -> bool {
        self.stored_value(property).is_some()
    }

    fn clear(&mut self, property: StyleProperty) {
        match property {
            StyleProperty::Display => self.display = None,
            StyleProperty::Visibility => self.visibility = None,
            StyleProperty::Direction => self.direction = None,
            StyleProperty::AlignItems => self.align_items = None,
            StyleProperty::JustifyContent => self.justify_content = None,
            StyleProperty::Gap => self.gap = None,
            StyleProperty::Width => self.width = None,
            StyleProperty::Height => self.height = None,
            StyleProperty::Flex => self.flex = None,
            StyleProperty::MarginTop => self.margin_top = None,
            StyleProperty::MarginRight => self.margin_right = None,
            StyleProperty::MarginBottom => self.margin_bottom = None,
            StyleProperty::MarginLeft => self.margin_left = None,
            StyleProperty::TextDirection => self.text_direction = None,
            StyleProperty::TextAlign => self.text_align = None,
            StyleProperty::Color => self.color = None,
            StyleProperty::BackgroundColor => self.background_color = None,
            StyleProperty::FontFamily => self.font_family = None,
            StyleProperty::FontStyle => self.font_style = None,
            StyleProperty::FontVariant => self.font_variant = None,
            StyleProperty::FontWeight => self.font_weight = None,
            StyleProperty::FontSize => self.font_size = None,
            _ => {}
        }
    }

    /// Stores a value for a resolved (non-alias) property.
    fn assign(&mut self, property: StyleProperty, value: StyleValue) -> Result<(), StyleError> {
        check(property, &value)?;
        match (property, value) {
            (StyleProperty::Display, StyleValue::Display(v)) => self.display = Some(v),
            (StyleProperty::Visibility, StyleValue::Visibility(v)) => self.visibility = Some(v),
            (StyleProperty::Direction, StyleValue::Direction(v)) => self.direction = Some(v),
            (StyleProperty::AlignItems, StyleValue::AlignItems(v)) => self.align_items = Some(v),
            (StyleProperty::JustifyContent, StyleValue::JustifyContent(v)) => {
                self.justify_content = Some(v)
            }
            (StyleProperty::Gap, StyleValue::Number(v)) => self.gap = Some(v),
            (StyleProperty::Width, StyleValue::Dimension(v)) => self.width = Some(v),
            (StyleProperty::Height, StyleValue::Dimension(v)) => self.height = Some(v),
            (StyleProperty::Flex, StyleValue::Number(v)) => self.flex = Some(v),
            (StyleProperty::MarginTop, StyleValue::Number(v)) => self.margin_top = Some(v),
            (StyleProperty::MarginRight, StyleValue::Number(v)) => self.margin_right = Some(v),
            (StyleProperty::MarginBottom, StyleValue::Number(v)) => self.margin_bottom = Some(v),
            (StyleProperty::MarginLeft, StyleValue::Number(v)) => self.margin_left = Some(v),
            (StyleProperty::Margin, StyleValue::Margins(m)) => {
                self.margin_top = Some(m.top);
                self.margin_right = Some(m.right);
                self.margin_bottom = Some(m.bottom);
                self.margin_left = Some(m.left);
            }
            (StyleProperty::TextDirection, StyleValue::TextDirection(v)) => {
                self.text_direction = Some(v)
            }
            (StyleProperty::TextAlign, StyleValue::TextAlign(v)) => self.text_align = Some(v),
            (StyleProperty::Color, StyleValue::Color(v)) => self.color = v,
            (StyleProperty::BackgroundColor, StyleValue::Color(v)) => self.background_color = v,
            (StyleProperty::FontFamily, StyleValue::FontFamily(v)) => self.font_family = Some(v),
            (StyleProperty::FontStyle, StyleValue::FontStyle(v)) => self.font_style = Some(v),
            (StyleProperty::FontVariant, StyleValue::FontVariant(v)) => self.font_variant = Some(v),
            (StyleProperty::FontWeight, StyleValue::FontWeight(v)) => self.font_weight = Some(v),
            (StyleProperty::FontSize, StyleValue::Integer(v)) => self.font_size = Some(v),
            (StyleProperty::Font, StyleValue::Font(font)) => {
                self.font_family = Some(font.family);
                self.font_style = Some(font.style);
                self.font_variant = Some(font.variant);
                self.font_weight = Some(font.weight);
                self.font_size = Some(font.size);
            }
            (property, value) => {
                return Err(StyleError::InvalidValue {
                    property: property.name(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    // --- Resolved accessors ---

    pub fn display(&self) -> Display {
        self.display.unwrap_or_default()
    }

    /// False for nodes that take no space and are skipped by their container.
    pub fn participates(&self) -> bool {
        self.display() == Display::Pack
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.unwrap_or_default()
    }

    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or_default()
    }

    pub fn align_items(&self) -> AlignItems {
        self.align_items.unwrap_or_default()
    }

    pub fn justify_content(&self) -> JustifyContent {
        self.justify_content.unwrap_or_default()
    }

    pub fn gap(&self) -> f32 {
        self.gap.unwrap_or(0.0)
    }

    pub fn width(&self) -> Dimension {
        self.width.unwrap_or_default()
    }

    pub fn height(&self) -> Dimension {
        self.height.unwrap_or_default()
    }

    /// Flex weight; values that slipped past validation count as inflexible.
    pub fn flex(&self) -> f32 {
        match self.flex {
            Some(f) if f.is_finite() && f > 0.0 => f,
            _ => 0.0,
        }
    }

    pub fn margin(&self) -> Margins {
        Margins::new(
            self.margin_top.unwrap_or(0.0),
            self.margin_right.unwrap_or(0.0),
            self.margin_bottom.unwrap_or(0.0),
            self.margin_left.unwrap_or(0.0),
        )
    }

    pub fn text_direction(&self) -> TextDirection {
        self.text_direction.unwrap_or_default()
    }

    pub fn text_align(&self) -> TextAlign {
        self.text_align
            .unwrap_or_else(|| self.text_direction().default_text_align())
    }

    pub fn font(&self) -> Font {
        Font {
            family: self
                .font_family
                .clone()
                .unwrap_or_else(|| vec![SYSTEM.to_string()]),
            size: self.font_size.unwrap_or(SYSTEM_DEFAULT_FONT_SIZE),
            style: self.font_style.unwrap_or_default(),
            variant: self.font_variant.unwrap_or_default(),
            weight: self.font_weight.unwrap_or_default(),
        }
    }
}

/// Validates a value against the property it is stored under.
fn check(property: StyleProperty, value: &StyleValue) -> Result<(), StyleError> {
    let ok = match (property, value) {
        (StyleProperty::Flex | StyleProperty::Gap, StyleValue::Number(v)) => {
            v.is_finite() && *v >= 0.0
        }
        (
            StyleProperty::MarginTop
            | StyleProperty::MarginRight
            | StyleProperty::MarginBottom
            | StyleProperty::MarginLeft,
            StyleValue::Number(v),
        ) => v.is_finite(),
        (StyleProperty::Margin, StyleValue::Margins(m)) => {
            [m.top, m.right, m.bottom, m.left].iter().all(|v| v.is_finite())
        }
        (StyleProperty::Width | StyleProperty::Height, StyleValue::Dimension(Dimension::Px(v))) => {
            v.is_finite() && *v >= 0.0
        }
        (StyleProperty::FontSize, StyleValue::Integer(v)) => {
            *v > 0 || *v == SYSTEM_DEFAULT_FONT_SIZE
        }
        (StyleProperty::FontFamily, StyleValue::FontFamily(family)) => {
            !family.is_empty() && family.iter().all(|name| !name.trim().is_empty())
        }
        (StyleProperty::Font, StyleValue::Font(font)) => {
            !font.family.is_empty() && (font.size > 0 || font.is_system_size())
        }
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(StyleError::InvalidValue {
            property: property.name(),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for Style {
    /// Writes the explicitly set attributes as a declaration string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations().into_iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", property, value)?;
        }
        Ok(())
    }
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let declarations = self.declarations();
        let mut map = serializer.serialize_map(Some(declarations.len()))?;
        for (property, value) in declarations {
            map.serialize_entry(property.name(), &value.to_string())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Style {
    /// Accepts a declaration string or an object of attribute names to values.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawValue {
            Number(f64),
            Text(String),
            List(Vec<RawValue>),
        }

        impl RawValue {
            fn into_text(self) -> String {
                match self {
                    RawValue::Number(n) => n.to_string(),
                    RawValue::Text(s) => s,
                    RawValue::List(items) => {
                        let numeric = items.iter().all(|i| matches!(i, RawValue::Number(_)));
                        let parts: Vec<String> = items
                            .into_iter()
                            .map(|item| match item {
                                RawValue::Text(s) if s.contains(char::is_whitespace) => {
                                    format!("'{}'", s)
                                }
                                other => other.into_text(),
                            })
                            .collect();
                        parts.join(if numeric { " " } else { ", " })
                    }
                }
            }
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawStyle {
            Declarations(String),
            Map(BTreeMap<String, RawValue>),
        }

        match RawStyle::deserialize(deserializer)? {
            RawStyle::Declarations(text) => {
                Style::from_declarations(&text).map_err(de::Error::custom)
            }
            RawStyle::Map(entries) => {
                let mut style = Style::new();
                style
                    .update(entries.into_iter().map(|(k, v)| (k, v.into_text())))
                    .map_err(de::Error::custom)?;
                Ok(style)
            }
        }
    }
}
