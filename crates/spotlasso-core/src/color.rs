//! Colors and the default region palette.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = byte(&hex[0..1])? * 17;
                let g = byte(&hex[1..2])? * 17;
                let b = byte(&hex[2..3])? * 17;
                Some(Self::rgb(r, g, b))
            }
            6 => Some(Self::rgb(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            8 => Some(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Tableau 10, the categorical palette regions are colored from.
pub const TABLEAU10: [SerializableColor; 10] = [
    SerializableColor::rgb(0x4e, 0x79, 0xa7),
    SerializableColor::rgb(0xf2, 0x8e, 0x2c),
    SerializableColor::rgb(0xe1, 0x57, 0x59),
    SerializableColor::rgb(0x76, 0xb7, 0xb2),
    SerializableColor::rgb(0x59, 0xa1, 0x4f),
    SerializableColor::rgb(0xed, 0xc9, 0x49),
    SerializableColor::rgb(0xaf, 0x7a, 0xa1),
    SerializableColor::rgb(0xff, 0x9d, 0xa7),
    SerializableColor::rgb(0x9c, 0x75, 0x5f),
    SerializableColor::rgb(0xba, 0xb0, 0xab),
];

/// Accent used for the in-progress draft outline and emphasized regions.
pub const ACCENT: SerializableColor = SerializableColor::rgb(0x00, 0xff, 0xe9);

/// An ordered, non-empty list of colors picked by index modulo length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SerializableColor>", into = "Vec<SerializableColor>")]
pub struct Palette(Vec<SerializableColor>);

impl Palette {
    /// Create a palette. Returns `None` if `colors` is empty.
    pub fn new(colors: Vec<SerializableColor>) -> Option<Self> {
        if colors.is_empty() {
            None
        } else {
            Some(Self(colors))
        }
    }

    /// Color for the `n`th region.
    pub fn pick(&self, n: usize) -> SerializableColor {
        self.0[n % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn colors(&self) -> &[SerializableColor] {
        &self.0
    }
}

impl TryFrom<Vec<SerializableColor>> for Palette {
    type Error = &'static str;

    fn try_from(colors: Vec<SerializableColor>) -> Result<Self, Self::Error> {
        Self::new(colors).ok_or("palette needs at least one color")
    }
}

impl From<Palette> for Vec<SerializableColor> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(TABLEAU10.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(SerializableColor::parse_hex("#4e79a7"), Some(TABLEAU10[0]));
        assert_eq!(
            SerializableColor::parse_hex("#fff"),
            Some(SerializableColor::white())
        );
        assert_eq!(
            SerializableColor::parse_hex("#ffffff1a"),
            Some(SerializableColor::new(255, 255, 255, 0x1a))
        );
        assert_eq!(SerializableColor::parse_hex("4e79a7"), None);
        assert_eq!(SerializableColor::parse_hex("#12345"), None);
        assert_eq!(SerializableColor::parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(ACCENT.to_hex(), "#00ffe9");
        assert_eq!(SerializableColor::white().with_alpha(0x1a).to_hex(), "#ffffff1a");
    }

    #[test]
    fn test_palette_wraps() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.pick(0), TABLEAU10[0]);
        assert_eq!(palette.pick(10), TABLEAU10[0]);
        assert_eq!(palette.pick(13), TABLEAU10[3]);
    }

    #[test]
    fn test_empty_palette_rejected() {
        assert!(Palette::new(Vec::new()).is_none());
        assert!(serde_json::from_str::<Palette>("[]").is_err());

        let json = r#"[{"r": 78, "g": 121, "b": 167, "a": 255}]"#;
        let palette: Palette = serde_json::from_str(json).unwrap();
        assert_eq!(palette.pick(7), TABLEAU10[0]);
    }

    #[test]
    fn test_peniko_conversion() {
        let color: Color = TABLEAU10[2].into();
        assert_eq!(SerializableColor::from(color), TABLEAU10[2]);
    }
}
