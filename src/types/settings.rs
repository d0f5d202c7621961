//! Mosaic generation settings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, Result};

use super::Colour;

/// Smallest allowed grid width or height, in tiles.
pub const MIN_GRID_SIZE: u32 = 10;

/// Largest allowed grid width or height, in tiles.
pub const MAX_GRID_SIZE: u32 = 100;

/// Upper bound on `width * height`.
pub const MAX_TILES: u32 = 10_000;

/// Dice colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Every die is black with white pips.
    Black,
    /// Every die is white with black pips.
    #[default]
    White,
    /// Dice colour varies with the face value.
    Mixed,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Black => write!(f, "black"),
            Theme::White => write!(f, "white"),
            Theme::Mixed => write!(f, "mixed"),
        }
    }
}

/// How the mixed theme picks its colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MixedStyle {
    /// Fixed six-step grayscale ramp, darkest on face 1.
    Ramp,
    /// Two user colours alternating between odd and even faces.
    #[default]
    Alternating,
}

/// Everything the pipeline needs besides the image itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tiles across.
    pub grid_width: u32,
    /// Tiles down.
    pub grid_height: u32,
    /// Contrast in `0..=100`, 50 is neutral.
    pub contrast: i32,
    /// Brightness in `0..=100`, 50 is neutral.
    pub brightness: i32,
    pub theme: Theme,
    pub mixed_style: MixedStyle,
    pub mixed_colour_a: Option<Colour>,
    pub mixed_colour_b: Option<Colour>,
    /// Draw pips on each tile.
    pub use_shading: bool,
    pub price_per_die: f64,
    /// Force the face order; `None` lets the theme decide.
    pub invert: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 40,
            contrast: 50,
            brightness: 50,
            theme: Theme::default(),
            mixed_style: MixedStyle::default(),
            mixed_colour_a: None,
            mixed_colour_b: None,
            use_shading: true,
            price_per_die: 0.10,
            invert: None,
        }
    }
}

impl Settings {
    /// Check the bounds the pipeline relies on.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.grid_width), ("height", self.grid_height)] {
            if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&value) {
                return Err(DiceError::Input {
                    message: format!("Grid {} {} is out of range", name, value),
                    help: Some(format!(
                        "Grid width and height must be between {} and {}",
                        MIN_GRID_SIZE, MAX_GRID_SIZE
                    )),
                });
            }
        }

        let tiles = self.tile_count();
        if tiles > MAX_TILES as usize {
            return Err(DiceError::Input {
                message: format!("{} tiles requested, the maximum is {}", tiles, MAX_TILES),
                help: Some("Reduce the grid width or height".to_string()),
            });
        }

        if !(0..=100).contains(&self.contrast) || !(0..=100).contains(&self.brightness) {
            return Err(DiceError::input(format!(
                "Contrast {} / brightness {} must be within 0..=100",
                self.contrast, self.brightness
            )));
        }

        if !self.price_per_die.is_finite() || self.price_per_die < 0.0 {
            return Err(DiceError::Input {
                message: format!("Price per die {} is invalid", self.price_per_die),
                help: Some("Use a non-negative number".to_string()),
            });
        }

        Ok(())
    }

    /// Clamp the slider-style values into range.
    ///
    /// Grid dimensions are left alone so `validate` can still reject them.
    pub fn clamped(mut self) -> Self {
        self.contrast = self.contrast.clamp(0, 100);
        self.brightness = self.brightness.clamp(0, 100);
        self
    }

    /// Requested tile count, computed without overflow.
    pub fn tile_count(&self) -> usize {
        self.grid_width as usize * self.grid_height as usize
    }

    /// Whether quantization runs brightest-first.
    pub fn inverts(&self) -> bool {
        self.invert.unwrap_or(self.theme == Theme::Black)
    }
}
