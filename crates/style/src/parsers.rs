//! Low-level nom parser functions for style values.
//!
//! Font shorthands follow the canvas `font` property closely enough for the
//! values site configurations use in practice: optional style and weight
//! keywords, a size with a unit, then a comma-separated family list.

use crate::font::{FontSpec, FontStyle, FontWeight};
use nom::branch::alt;
use nom::bytes::complete::tag_no_case;
use nom::character::complete::{char, digit1, one_of};
use nom::combinator::{map, map_res, opt, recognize};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

// --- Helper Parsers ---

fn parse_f32(input: &str) -> IResult<&str, f32> {
    map_res(
        recognize((
            opt(one_of("+-")),
            alt((
                recognize((digit1, opt((char('.'), digit1)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f32>(),
    )
    .parse(input)
}

/// Pixel multiplier for a CSS length unit.
fn parse_unit(input: &str) -> IResult<&str, f32> {
    alt((
        map(tag_no_case("px"), |_| 1.0),
        map(tag_no_case("pt"), |_| 96.0 / 72.0),
        map(tag_no_case("rem"), |_| 16.0),
        map(tag_no_case("em"), |_| 16.0),
        map(tag_no_case("in"), |_| 96.0),
    ))
    .parse(input)
}

/// Parses a length with a mandatory unit (e.g., "70pt", "24px") into pixels.
pub fn parse_length_px(input: &str) -> IResult<&str, f32> {
    map((parse_f32, parse_unit), |(value, multiplier)| value * multiplier).parse(input)
}

/// Helper to run a nom parser and convert its result to a `Result<T, StyleParseError>`.
pub fn run_parser<'a, T, F>(mut parser: F, input: &'a str) -> Result<T, StyleParseError>
where
    F: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", result)) => Ok(result),
        Ok((rem, _)) => Err(StyleParseError::Parse(format!(
            "Parser did not consume all input. Remainder: '{}'",
            rem
        ))),
        Err(e) => Err(StyleParseError::Parse(e.to_string())),
    }
}

// --- High-level Parse Functions ---

/// Parses a font weight string (e.g., "bold", "400").
pub fn parse_font_weight(s: &str) -> Result<FontWeight, StyleParseError> {
    match s.to_lowercase().as_str() {
        "thin" | "hairline" => Ok(FontWeight::Thin),
        "light" | "lighter" => Ok(FontWeight::Light),
        "regular" | "normal" => Ok(FontWeight::Regular),
        "medium" => Ok(FontWeight::Medium),
        "bold" | "bolder" => Ok(FontWeight::Bold),
        "black" | "heavy" => Ok(FontWeight::Black),
        _ => {
            let num_weight = s
                .parse::<u16>()
                .ok()
                .filter(|n| (1..=1000).contains(n))
                .ok_or_else(|| StyleParseError::InvalidValue {
                    property: "font-weight".to_string(),
                    value: s.to_string(),
                })?;
            Ok(FontWeight::from_numeric(num_weight))
        }
    }
}

/// Parses a font style string (e.g., "normal", "italic").
pub fn parse_font_style(s: &str) -> Result<FontStyle, StyleParseError> {
    match s.to_lowercase().as_str() {
        "normal" => Ok(FontStyle::Normal),
        "italic" => Ok(FontStyle::Italic),
        "oblique" => Ok(FontStyle::Oblique),
        _ => Err(StyleParseError::InvalidValue {
            property: "font-style".to_string(),
            value: s.to_string(),
        }),
    }
}

/// Parses a font shorthand such as `Bold 70pt Arial` or
/// `italic 300 24px "Noto Sans JP", sans-serif`.
pub fn parse_font_spec(input: &str) -> Result<FontSpec, StyleParseError> {
    let invalid = || StyleParseError::InvalidValue {
        property: "font".to_string(),
        value: input.to_string(),
    };

    let mut weight = FontWeight::Regular;
    let mut style = FontStyle::Normal;
    let mut size_px = None;
    let mut rest = input.trim();

    while let Some(token) = rest.split_whitespace().next() {
        rest = rest[token.len()..].trim_start();

        // "<size>/<line-height>": line height does not apply to single-line fills.
        let size_part = token.split('/').next().unwrap_or(token);
        if let Ok(px) = run_parser(parse_length_px, size_part) {
            size_px = Some(px);
            break;
        }
        if token.eq_ignore_ascii_case("small-caps") {
            continue;
        }
        if let Ok(s) = parse_font_style(token) {
            // "normal" is ambiguous between style and weight; either reading is a no-op.
            if s != FontStyle::Normal {
                style = s;
            }
            continue;
        }
        weight = parse_font_weight(token).map_err(|_| invalid())?;
    }

    let size_px = size_px.filter(|px| *px > 0.0).ok_or_else(invalid)?;
    let families: Vec<String> = rest
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
        .filter(|f| !f.is_empty())
        .collect();
    if families.is_empty() {
        return Err(invalid());
    }

    Ok(FontSpec {
        families,
        size_px,
        weight,
        style,
    })
}
