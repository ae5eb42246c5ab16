//! Low-level nom parser functions for declaration strings and style values.
//!
//! Declarations look like `direction: column; margin: 5 10; font: bold 12 serif`.

use crate::dimension::{Dimension, Margins};
use crate::error::StyleError;
use crate::font::{Font, FontStyle, FontVariant, FontWeight, SYSTEM_DEFAULT_FONT_SIZE};
use crate::keyword::Keyword;
use crate::property::StyleProperty;
use crate::value::StyleValue;
use boxpack_types::Color;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{char, digit1, space0, space1};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::separated_list1;
use nom::sequence::{delimited, separated_pair, terminated};
use nom::{IResult, Parser};

type Error<'a> = nom::error::Error<&'a str>;

// --- Helper Parsers ---

fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = Error<'a>>
where
    P: Parser<&'a str, Output = O, Error = Error<'a>>,
{
    delimited(space0, inner, space0)
}

/// Parses a signed decimal number.
pub fn parse_number(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(alt((char('+'), char('-')))),
            alt((
                recognize((digit1, opt((char('.'), digit1)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

/// Parses a pixel length; the `px` suffix is optional.
pub fn parse_length(input: &str) -> IResult<&str, f32> {
    terminated(parse_number, opt(tag_no_case("px"))).parse(input)
}

/// Parses an explicit size or `none`.
pub fn parse_dimension(input: &str) -> IResult<&str, Dimension> {
    alt((
        map(tag_no_case("none"), |_| Dimension::None),
        map(parse_length, Dimension::Px),
    ))
    .parse(input)
}

fn parse_integer(input: &str) -> IResult<&str, i32> {
    map_res(
        recognize((opt(char('-')), digit1)),
        |s: &str| s.parse::<i32>(),
    )
    .parse(input)
}

/// Parses a font size in points, or `system` for the platform default.
pub fn parse_font_size(input: &str) -> IResult<&str, i32> {
    alt((
        map(tag_no_case("system"), |_| SYSTEM_DEFAULT_FONT_SIZE),
        terminated(parse_integer, opt(tag_no_case("pt"))),
    ))
    .parse(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('\''), take_while1(|c: char| c != '\''), char('\'')),
        delimited(char('"'), take_while1(|c: char| c != '"'), char('"')),
    ))
    .parse(input)
}

fn family_name(input: &str) -> IResult<&str, String> {
    alt((
        map(quoted, str::to_string),
        map(take_while1(|c: char| c != ','), |s: &str| s.trim().to_string()),
    ))
    .parse(input)
}

/// Parses a comma separated family list. Names may be quoted.
pub fn parse_font_family(input: &str) -> IResult<&str, Vec<String>> {
    separated_list1(char(','), ws(family_name)).parse(input)
}

/// Parses CSS shorthand margins (1, 2, 3 or 4 values).
pub fn parse_shorthand_margins(input: &str) -> Result<Margins, StyleError> {
    let parts = run_parser(separated_list1(space1, parse_length), input)?;
    Margins::from_shorthand(&parts).ok_or_else(|| {
        StyleError::Parse(format!(
            "Invalid number of values for margin shorthand: got {}, expected 1 to 4",
            parts.len()
        ))
    })
}

/// Parses the `font` composite: `[style] [variant] [weight] <size> <family>[, <family>...]`.
///
/// The optional parts may appear in any order; the size and family are required.
pub fn parse_font(input: &str) -> Result<Font, StyleError> {
    let mut font = Font::default();
    let mut rest = input.trim();
    let mut keywords = 0;
    loop {
        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, after) = rest.split_at(word_end);
        if word.is_empty() {
            return Err(StyleError::MissingComponent {
                property: "font",
                component: "font size",
            });
        }
        if let Ok(size) = run_parser(parse_font_size, word) {
            font.size = size;
            rest = after.trim();
            break;
        }
        let size_follows = rest
            .split_whitespace()
            .any(|w| run_parser(parse_font_size, w).is_ok());
        if !size_follows {
            return Err(StyleError::MissingComponent {
                property: "font",
                component: "font size",
            });
        }
        if keywords == 3 {
            return Err(StyleError::InvalidValue {
                property: "font",
                value: input.to_string(),
            });
        }
        if let Some(style) = FontStyle::from_keyword(word).filter(|s| *s != FontStyle::Normal) {
            font.style = style;
        } else if let Some(variant) =
            FontVariant::from_keyword(word).filter(|v| *v != FontVariant::Normal)
        {
            font.variant = variant;
        } else if let Some(weight) =
            FontWeight::from_keyword(word).filter(|w| *w != FontWeight::Normal)
        {
            font.weight = weight;
        } else if !word.eq_ignore_ascii_case("normal") {
            return Err(StyleError::InvalidValue {
                property: "font",
                value: input.to_string(),
            });
        }
        keywords += 1;
        rest = after.trim_start();
    }
    if rest.is_empty() {
        return Err(StyleError::MissingComponent {
            property: "font",
            component: "font family",
        });
    }
    font.family = run_parser(parse_font_family, rest)?;
    Ok(font)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-').parse(input)
}

fn declaration(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(
        ws(identifier),
        char(':'),
        map(take_while1(|c: char| c != ';'), str::trim),
    )
    .parse(input)
}

/// Splits `name: value; name: value` into trimmed pairs. Empty segments are skipped.
pub fn parse_declarations(input: &str) -> Result<Vec<(String, String)>, StyleError> {
    input
        .split(';')
        .filter(|segment| !segment.trim().is_empty())
        .map(|segment| {
            run_parser(declaration, segment).map(|(n, v)| (n.to_string(), v.to_string()))
        })
        .collect()
}

/// Helper to run a nom parser over the whole input.
pub fn run_parser<'a, T, P>(mut parser: P, input: &'a str) -> Result<T, StyleError>
where
    P: Parser<&'a str, Output = T, Error = Error<'a>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleError::Parse(e.to_string())),
    }
}

fn keyword<T: Keyword>(property: StyleProperty, s: &str) -> Result<T, StyleError> {
    T::from_keyword(s).ok_or_else(|| StyleError::InvalidValue {
        property: property.name(),
        value: s.to_string(),
    })
}

/// Parses the textual form of a value for `property`.
///
/// Aliases take the value type of the property they stand for.
pub fn parse_value(property: StyleProperty, s: &str) -> Result<StyleValue, StyleError> {
    let invalid = |_| StyleError::InvalidValue {
        property: property.name(),
        value: s.to_string(),
    };
    let value = match property.value_property() {
        StyleProperty::Display => StyleValue::Display(keyword(property, s)?),
        StyleProperty::Visibility => StyleValue::Visibility(keyword(property, s)?),
        StyleProperty::Direction => StyleValue::Direction(keyword(property, s)?),
        StyleProperty::AlignItems => StyleValue::AlignItems(keyword(property, s)?),
        StyleProperty::JustifyContent => StyleValue::JustifyContent(keyword(property, s)?),
        StyleProperty::TextDirection => StyleValue::TextDirection(keyword(property, s)?),
        StyleProperty::TextAlign => StyleValue::TextAlign(keyword(property, s)?),
        StyleProperty::FontStyle => StyleValue::FontStyle(keyword(property, s)?),
        StyleProperty::FontVariant => StyleValue::FontVariant(keyword(property, s)?),
        StyleProperty::FontWeight => StyleValue::FontWeight(keyword(property, s)?),
        StyleProperty::Width | StyleProperty::Height => {
            StyleValue::Dimension(run_parser(parse_dimension, s).map_err(invalid)?)
        }
        StyleProperty::Gap
        | StyleProperty::Flex
        | StyleProperty::MarginTop
        | StyleProperty::MarginRight
        | StyleProperty::MarginBottom
        | StyleProperty::MarginLeft => {
            StyleValue::Number(run_parser(parse_length, s).map_err(invalid)?)
        }
        StyleProperty::Margin => {
            StyleValue::Margins(parse_shorthand_margins(s).map_err(invalid)?)
        }
        StyleProperty::FontSize => {
            StyleValue::Integer(run_parser(parse_font_size, s).map_err(invalid)?)
        }
        StyleProperty::FontFamily => {
            StyleValue::FontFamily(run_parser(parse_font_family, s).map_err(invalid)?)
        }
        StyleProperty::Font => StyleValue::Font(parse_font(s)?),
        StyleProperty::Color | StyleProperty::BackgroundColor => {
            if s.trim().eq_ignore_ascii_case("none") {
                StyleValue::Color(None)
            } else {
                StyleValue::Color(Some(s.parse::<Color>().map_err(|e| {
                    StyleError::InvalidValue {
                        property: property.name(),
                        value: e,
                    }
                })?))
            }
        }
        other => {
            // value_property() never returns an alias.
            return Err(StyleError::UnknownProperty(other.name().to_string()));
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flex::Direction;

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(run_parser(parse_number, "12").unwrap(), 12.0);
        assert_eq!(run_parser(parse_number, "-1.5").unwrap(), -1.5);
        assert_eq!(run_parser(parse_number, ".5").unwrap(), 0.5);
        assert!(run_parser(parse_number, "abc").is_err());
        assert_eq!(run_parser(parse_length, "10px").unwrap(), 10.0);
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(run_parser(parse_dimension, "none").unwrap(), Dimension::None);
        assert_eq!(
            run_parser(parse_dimension, "100").unwrap(),
            Dimension::Px(100.0)
        );
    }

    #[test]
    fn test_shorthand_margins() {
        assert_eq!(
            parse_shorthand_margins("5 10").unwrap(),
            Margins::new(5.0, 10.0, 5.0, 10.0)
        );
        assert!(parse_shorthand_margins("1 2 3 4 5").is_err());
        assert!(parse_shorthand_margins("").is_err());
    }

    #[test]
    fn test_font_family_list() {
        let family = run_parser(parse_font_family, "'Times New Roman', serif").unwrap();
        assert_eq!(family, vec!["Times New Roman".to_string(), "serif".to_string()]);
        let family = run_parser(parse_font_family, "Helvetica Neue").unwrap();
        assert_eq!(family, vec!["Helvetica Neue".to_string()]);
    }

    #[test]
    fn test_font_composite() {
        let font = parse_font("italic bold 12 'Times New Roman', serif").unwrap();
        assert_eq!(font.style, FontStyle::Italic);
        assert_eq!(font.weight, FontWeight::Bold);
        assert_eq!(font.variant, FontVariant::Normal);
        assert_eq!(font.size, 12);
        assert_eq!(font.family.len(), 2);

        let font = parse_font("small-caps 9pt monospace").unwrap();
        assert_eq!(font.variant, FontVariant::SmallCaps);
        assert_eq!(font.size, 9);
    }

    #[test]
    fn test_font_composite_requires_size_and_family() {
        assert_eq!(
            parse_font("bold serif").unwrap_err(),
            StyleError::MissingComponent {
                property: "font",
                component: "font size"
            }
        );
        assert_eq!(
            parse_font("bold 12").unwrap_err(),
            StyleError::MissingComponent {
                property: "font",
                component: "font family"
            }
        );
        assert!(matches!(
            parse_font("heavy 12 serif"),
            Err(StyleError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_font_display_parses_back() {
        let font = parse_font("oblique bold 14 'Fira Sans', sans-serif").unwrap();
        assert_eq!(parse_font(&font.to_string()).unwrap(), font);
        let system = Font::default();
        assert_eq!(parse_font(&system.to_string()).unwrap(), system);
    }

    #[test]
    fn test_declarations() {
        let decls = parse_declarations(" flex: 1; margin-top : 5 ;; direction:column; ").unwrap();
        assert_eq!(
            decls,
            vec![
                ("flex".to_string(), "1".to_string()),
                ("margin-top".to_string(), "5".to_string()),
                ("direction".to_string(), "column".to_string()),
            ]
        );
        assert!(parse_declarations("flex 1").is_err());
    }

    #[test]
    fn test_parse_value_uses_alias_target_type() {
        assert_eq!(
            parse_value(StyleProperty::VerticalAlignItems, "center").unwrap(),
            StyleValue::AlignItems(crate::flex::AlignItems::Center)
        );
        assert_eq!(
            parse_value(StyleProperty::Padding, "1 2").unwrap(),
            StyleValue::Margins(Margins::new(1.0, 2.0, 1.0, 2.0))
        );
        assert_eq!(
            parse_value(StyleProperty::Direction, "COLUMN").unwrap(),
            StyleValue::Direction(Direction::Column)
        );
        assert!(matches!(
            parse_value(StyleProperty::Width, "wide"),
            Err(StyleError::InvalidValue {
                property: "width",
                ..
            })
        ));
    }
}
