use crate::parsers::{StyleParseError, parse_font_spec, parse_font_weight};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Regular,
    Medium,
    Bold,
    Black,
    Numeric(u16),
}

impl FontWeight {
    /// Returns the numeric weight value (100-900 scale).
    pub fn numeric_value(&self) -> u16 {
        match self {
            FontWeight::Thin => 100,
            FontWeight::Light => 300,
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Bold => 700,
            FontWeight::Black => 900,
            FontWeight::Numeric(n) => *n,
        }
    }

    /// Maps a numeric weight back to the closest named variant.
    pub fn from_numeric(n: u16) -> Self {
        match n {
            100 => FontWeight::Thin,
            300 => FontWeight::Light,
            400 => FontWeight::Regular,
            500 => FontWeight::Medium,
            700 => FontWeight::Bold,
            900 => FontWeight::Black,
            n => FontWeight::Numeric(n),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => parse_font_weight(&s).map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight::Numeric(n)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// A canvas-style font shorthand such as `Bold 70pt Arial`.
///
/// Sizes are held in pixels; `pt` sizes are converted at 96/72.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Requested families in order of preference.
    pub families: Vec<String>,
    pub size_px: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size_px: f32) -> Self {
        Self {
            families: vec![family.into()],
            size_px,
            weight: FontWeight::Regular,
            style: FontStyle::Normal,
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// The first requested family.
    pub fn primary_family(&self) -> &str {
        self.families.first().map(String::as_str).unwrap_or("sans-serif")
    }
}

impl FromStr for FontSpec {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_font_spec(s)
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            FontStyle::Normal => {}
            FontStyle::Italic => write!(f, "italic ")?,
            FontStyle::Oblique => write!(f, "oblique ")?,
        }
        write!(
            f,
            "{} {}px {}",
            self.weight.numeric_value(),
            self.size_px,
            self.families.join(", ")
        )
    }
}

impl<'de> Deserialize<'de> for FontSpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_font_spec(&raw).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_round_trip_of_named_weights() {
        for w in [FontWeight::Thin, FontWeight::Regular, FontWeight::Bold, FontWeight::Black] {
            assert_eq!(FontWeight::from_numeric(w.numeric_value()), w);
        }
        assert_eq!(FontWeight::from_numeric(650), FontWeight::Numeric(650));
    }

    #[test]
    fn test_display_is_parseable() {
        let spec: FontSpec = "italic bold 30px Georgia, serif".parse().unwrap();
        let again: FontSpec = spec.to_string().parse().unwrap();
        assert_eq!(spec.families, again.families);
        assert_eq!(spec.style, again.style);
        assert_eq!(spec.weight.numeric_value(), again.weight.numeric_value());
        assert!((spec.size_px - again.size_px).abs() < f32::EPSILON);
    }
}
