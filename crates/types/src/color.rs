use serde::{Deserialize, Deserializer, Serialize, de};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

fn default_one() -> f32 {
    1.0
}

fn is_one(num: &f32) -> bool {
    *num == 1.0
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(skip_serializing_if = "is_one", default = "default_one")]
    pub a: f32,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.r.hash(state);
        self.g.hash(state);
        self.b.hash(state);
        self.a.to_bits().hash(state);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn gray(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Alpha as an 8-bit channel value.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    /// Parse a hex color string (#RGB, #RRGGBB or #RRGGBBAA format)
    pub fn from_hex(s: &str) -> Result<Color, String> {
        let s = s.trim();
        let Some(hex) = s.strip_prefix('#') else {
            return Err(format!("Color must start with #, got: {}", s));
        };
        if !hex.is_ascii() {
            return Err(format!("Invalid hex color: {}", s));
        }

        let channel = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };

        match hex.len() {
            3 => {
                // #RGB format - expand each digit
                let r = channel(&hex[0..1].repeat(2), "red")?;
                let g = channel(&hex[1..2].repeat(2), "green")?;
                let b = channel(&hex[2..3].repeat(2), "blue")?;
                Ok(Color::rgb(r, g, b))
            }
            6 | 8 => {
                let r = channel(&hex[0..2], "red")?;
                let g = channel(&hex[2..4], "green")?;
                let b = channel(&hex[4..6], "blue")?;
                let a = if hex.len() == 8 {
                    channel(&hex[6..8], "alpha")? as f32 / 255.0
                } else {
                    1.0
                };
                Ok(Color { r, g, b, a })
            }
            _ => Err(format!(
                "Invalid hex color length: expected 3, 6 or 8, got {}",
                hex.len()
            )),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Map {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "default_one")]
                a: f32,
            },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => Self::from_hex(&s).map_err(de::Error::custom),
            ColorDef::Map { r, g, b, a } => Ok(Color { r, g, b, a }),
        }
    }
}
