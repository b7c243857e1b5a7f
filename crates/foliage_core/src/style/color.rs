//! RGBA colors.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Solid black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates a color from RGBA components.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Creates an opaque color from a `0xRRGGBB` value.
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        Self::rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Packs into `0xAARRGGBB`.
    #[must_use]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpacks from `0xAARRGGBB`.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        Self::rgba((argb >> 16) as u8, (argb >> 8) as u8, argb as u8, (argb >> 24) as u8)
    }

    /// Source-over blend of `self` onto `dst`.
    #[must_use]
    pub fn blend_over(self, dst: Self) -> Self {
        match self.a {
            255 => self,
            0 => dst,
            a => {
                let a = u32::from(a);
                let inv = 255 - a;
                let mix = |s: u8, d: u8| ((u32::from(s) * a + u32::from(d) * inv) / 255) as u8;
                let out_a = a + u32::from(dst.a) * inv / 255;
                Self::rgba(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), out_a as u8)
            }
        }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] for any other shape.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(text.to_owned());
        let digits = text.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
        match digits.len() {
            6 => Ok(Self::hex(value)),
            8 => Ok(Self::hex(value >> 8).with_alpha(value as u8)),
            _ => Err(invalid()),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        if color.a == 255 {
            format!("#{:02X}{:02X}{:02X}", color.r, color.g, color.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", color.r, color.g, color.b, color.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        let color = Color::hex(0xFF_80_00);
        assert_eq!(color, Color::rgb(255, 128, 0));
        assert_eq!(color.to_argb(), 0xFFFF_8000);
        assert_eq!(Color::from_argb(0xFFFF_8000), color);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!(Color::parse("#102030").unwrap(), Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(Color::parse("#10203040").unwrap(), Color::rgba(0x10, 0x20, 0x30, 0x40));
        assert!(Color::parse("102030").is_err());
        assert!(Color::parse("#1020").is_err());
        assert!(Color::parse("#+10203").is_err());
    }

    #[test]
    fn test_blend_over() {
        let half_white = Color::WHITE.with_alpha(128);
        let out = half_white.blend_over(Color::BLACK);
        assert_eq!(out.a, 255);
        assert!((i32::from(out.r) - 128).abs() <= 1);
        assert_eq!(Color::TRANSPARENT.blend_over(Color::BLACK), Color::BLACK);
    }
}
