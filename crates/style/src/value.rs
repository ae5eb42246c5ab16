use crate::dimension::{Dimension, Margins};
use crate::flex::{AlignItems, Direction, Display, JustifyContent, Visibility};
use crate::font::{Font, FontStyle, FontVariant, FontWeight, write_family};
use crate::text::{TextAlign, TextDirection};
use boxpack_types::Color;
use std::fmt;

/// A typed value for one style attribute, as read or written by name.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Display(Display),
    Visibility(Visibility),
    Direction(Direction),
    AlignItems(AlignItems),
    JustifyContent(JustifyContent),
    TextDirection(TextDirection),
    TextAlign(TextAlign),
    FontStyle(FontStyle),
    FontVariant(FontVariant),
    FontWeight(FontWeight),
    Number(f32),
    Integer(i32),
    Dimension(Dimension),
    Margins(Margins),
    /// `None` reads as unset.
    Color(Option<Color>),
    FontFamily(Vec<String>),
    Font(Font),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Display(v) => v.fmt(f),
            StyleValue::Visibility(v) => v.fmt(f),
            StyleValue::Direction(v) => v.fmt(f),
            StyleValue::AlignItems(v) => v.fmt(f),
            StyleValue::JustifyContent(v) => v.fmt(f),
            StyleValue::TextDirection(v) => v.fmt(f),
            StyleValue::TextAlign(v) => v.fmt(f),
            StyleValue::FontStyle(v) => v.fmt(f),
            StyleValue::FontVariant(v) => v.fmt(f),
            StyleValue::FontWeight(v) => v.fmt(f),
            StyleValue::Number(v) => write!(f, "{}", v),
            StyleValue::Integer(v) => write!(f, "{}", v),
            StyleValue::Dimension(v) => v.fmt(f),
            StyleValue::Margins(v) => v.fmt(f),
            StyleValue::Color(Some(c)) => c.fmt(f),
            StyleValue::Color(None) => f.write_str("none"),
            StyleValue::FontFamily(family) => write_family(f, family),
            StyleValue::Font(font) => font.fmt(f),
        }
    }
}
