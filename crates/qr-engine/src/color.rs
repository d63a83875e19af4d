//! Brand color parsing and the hex text-field contract.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use image::Rgba;
use regex::Regex;

use crate::QrError;

static RE_HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})([0-9A-Fa-f]{2})$").unwrap());

/// A 24-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-hex-digit string with an optional leading `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let caps = RE_HEX_COLOR.captures(hex.trim())?;
        let channel = |i: usize| u8::from_str_radix(&caps[i], 16).ok();
        Some(Self::new(channel(1)?, channel(2)?, channel(3)?))
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation toward `other`; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl FromStr for Rgb {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| QrError::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A free-text color field paired with the last valid color it held.
///
/// Any text is accepted into the field, but only input matching the hex
/// pattern replaces the value used for computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorInput {
    text: String,
    value: Rgb,
}

impl ColorInput {
    pub fn new(value: Rgb) -> Self {
        Self {
            text: value.to_hex(),
            value,
        }
    }

    /// Update the field text. Returns `true` if the effective color changed.
    pub fn set_text(&mut self, text: &str) -> bool {
        self.text = text.to_string();
        match Rgb::from_hex(text) {
            Some(color) if color != self.value => {
                self.value = color;
                true
            }
            _ => false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the current text is the color in effect.
    pub fn text_applied(&self) -> bool {
        Rgb::from_hex(&self.text) == Some(self.value)
    }

    pub fn value(&self) -> Rgb {
        self.value
    }
}

/// Brand colors for one composition.
///
/// `secondary` only takes effect when `use_gradient` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandColorPair {
    pub primary: Rgb,
    pub secondary: Option<Rgb>,
    pub use_gradient: bool,
}

impl BrandColorPair {
    pub fn solid(primary: Rgb) -> Self {
        Self {
            primary,
            secondary: None,
            use_gradient: false,
        }
    }

    pub fn gradient(primary: Rgb, secondary: Rgb) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            use_gradient: true,
        }
    }

    /// The two gradient stops, if gradient mode is active.
    pub fn gradient_stops(&self) -> Option<(Rgb, Rgb)> {
        match (self.use_gradient, self.secondary) {
            (true, Some(secondary)) => Some((self.primary, secondary)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#4f46e5"), Some(Rgb::new(0x4f, 0x46, 0xe5)));
        assert_eq!(Rgb::from_hex("FFFF00"), Some(Rgb::new(255, 255, 0)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Rgb::from_hex("#fff").is_none());
        assert!(Rgb::from_hex("#gggggg").is_none());
        assert!(Rgb::from_hex("#0000000").is_none());
        assert!("nope".parse::<Rgb>().is_err());
    }

    #[test]
    fn hex_round_trip_is_lowercase() {
        assert_eq!(Rgb::new(0xAB, 0x01, 0xFF).to_hex(), "#ab01ff");
    }

    #[test]
    fn lerp_hits_both_ends() {
        let a = Rgb::BLACK;
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
    }

    #[test]
    fn color_input_ignores_partial_text() {
        let mut field = ColorInput::new(Rgb::BLACK);
        assert!(!field.set_text("#12"));
        assert_eq!(field.text(), "#12");
        assert_eq!(field.value(), Rgb::BLACK);
        assert!(!field.text_applied());

        assert!(field.set_text("#123456"));
        assert_eq!(field.value(), Rgb::new(0x12, 0x34, 0x56));
        assert!(field.text_applied());

        assert!(!field.set_text("123456"));
        assert!(field.text_applied());
    }

    #[test]
    fn gradient_stops_require_flag() {
        let mut pair = BrandColorPair::gradient(Rgb::BLACK, Rgb::WHITE);
        assert!(pair.gradient_stops().is_some());
        pair.use_gradient = false;
        assert!(pair.gradient_stops().is_none());
        assert!(BrandColorPair::solid(Rgb::BLACK).gradient_stops().is_none());
    }
}
