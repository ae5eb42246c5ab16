use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
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
        Self::rgb(0, 0, 0)
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0.0,
    };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r,
            g,
            b,
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Parse a hex color string (#RGB, #RRGGBB or #RRGGBBAA format)
    fn parse_hex(hex: &str) -> Result<Color, String> {
        let channel = |digits: &str, name: &str| {
            u8::from_str_radix(digits, 16).map_err(|e| format!("Invalid {} component: {}", name, e))
        };
        match hex.len() {
            3 => Ok(Color::rgb(
                channel(&hex[0..1].repeat(2), "red")?,
                channel(&hex[1..2].repeat(2), "green")?,
                channel(&hex[2..3].repeat(2), "blue")?,
            )),
            6 | 8 => {
                let mut color = Color::rgb(
                    channel(&hex[0..2], "red")?,
                    channel(&hex[2..4], "green")?,
                    channel(&hex[4..6], "blue")?,
                );
                if hex.len() == 8 {
                    color.a = f32::from(channel(&hex[6..8], "alpha")?) / 255.0;
                }
                Ok(color)
            }
            n => Err(format!(
                "Invalid hex color length: expected 3, 6 or 8, got {}",
                n
            )),
        }
    }

    /// Parse the body of `rgb(...)` / `rgba(...)`.
    fn parse_functional(args: &str, with_alpha: bool) -> Result<Color, String> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let expected = if with_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(format!(
                "Expected {} color components, got {}",
                expected,
                parts.len()
            ));
        }
        let channel = |s: &str| {
            s.parse::<u8>()
                .map_err(|e| format!("Invalid color component '{}': {}", s, e))
        };
        let mut color = Color::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
        if with_alpha {
            let alpha = parts[3]
                .parse::<f32>()
                .map_err(|e| format!("Invalid alpha '{}': {}", parts[3], e))?;
            color.a = alpha.clamp(0.0, 1.0);
        }
        Ok(color)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if lower == "transparent" {
            return Ok(Color::TRANSPARENT);
        }
        if let Some(body) = lower.strip_prefix("rgba(").and_then(|r| r.strip_suffix(')')) {
            return Self::parse_functional(body, true);
        }
        if let Some(body) = lower.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
            return Self::parse_functional(body, false);
        }
        Err(format!("Unrecognised color: {}", s))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
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
            ColorDef::Str(s) => s.parse().map_err(de::Error::custom),
            ColorDef::Map { r, g, b, a } => Ok(Color { r, g, b, a }),
        }
    }
}
