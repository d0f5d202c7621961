//! Colour type and parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, Result};

/// An opaque RGB colour value.
///
/// Dice faces are always a single flat colour, so there is no alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b] = digits;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Parse either a hex colour or a CSS colour name (`"tomato"`, `"navy"`).
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed);
        }

        let lowered = trimmed.to_ascii_lowercase();
        if let Some(named) = palette::named::from_str(&lowered) {
            return Ok(Self::rgb(named.red, named.green, named.blue));
        }

        Self::from_hex(trimmed).map_err(|_| DiceError::Parse {
            message: format!("Unknown colour: {}", trimmed),
            help: Some("Use a hex value like #1A2B3C or a CSS colour name".to_string()),
        })
    }

    /// Convert to an opaque RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// Perceptual luminance in `[0, 255]` (`0.299R + 0.587G + 0.114B`).
    pub fn luminance(self) -> f32 {
        luminance(self.r as f32, self.g as f32, self.b as f32)
    }

    /// Black or white, whichever contrasts more with this colour.
    ///
    /// Ties resolve to black.
    pub fn contrasting(self) -> Self {
        let lum = self.luminance();
        if 255.0 - lum > lum {
            Self::WHITE
        } else {
            Self::BLACK
        }
    }
}

/// Perceptual luminance of an RGB triple.
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    0.299 * r + 0.587 * g + 0.114 * b
}

impl FromStr for Colour {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = DiceError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Colour> for String {
    fn from(colour: Colour) -> Self {
        colour.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn invalid_hex(s: &str) -> DiceError {
    DiceError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| DiceError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| DiceError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
