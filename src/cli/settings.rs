//! Command-line settings shared by the generating commands.
//!
//! Flags override values from dice.yaml. This is the boundary where the
//! slider-style values are clamped; grid size and price are validated
//! later and rejected when out of range.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::Result;
use crate::types::{Colour, MixedStyle, Theme};

/// Mosaic settings flags
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Config file (default: ./dice.yaml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Tiles across (10-100)
    #[arg(long)]
    pub width: Option<u32>,

    /// Tiles down (10-100)
    #[arg(long)]
    pub height: Option<u32>,

    /// Contrast, 50 is neutral (clamped to 0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub contrast: Option<i32>,

    /// Brightness, 50 is neutral (clamped to 0-100)
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<i32>,

    /// Dice colour theme
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Mixed theme style
    #[arg(long, value_enum)]
    pub mixed_style: Option<MixedStyle>,

    /// Odd-face colour for the mixed theme (hex or CSS name)
    #[arg(long, value_parser = parse_colour)]
    pub colour_a: Option<Colour>,

    /// Even-face colour for the mixed theme (hex or CSS name)
    #[arg(long, value_parser = parse_colour)]
    pub colour_b: Option<Colour>,

    /// Draw flat tiles without pips
    #[arg(long)]
    pub no_shading: bool,

    /// Price of a single die
    #[arg(long)]
    pub price: Option<f64>,

    /// Reverse the face order (default: black theme inverts)
    #[arg(long)]
    pub invert: Option<bool>,

    /// Preview pixels per tile
    #[arg(long)]
    pub cell_size: Option<u32>,
}

impl SettingsArgs {
    /// Load the config file and apply flags on top.
    pub fn resolve(&self, dir: &Path) -> Result<Config> {
        let config = Config::discover(self.config.as_deref(), dir)?;
        Ok(self.apply(config))
    }

    /// Apply flags over `config` and clamp contrast and brightness.
    pub fn apply(&self, mut config: Config) -> Config {
        let s = &mut config.settings;
        if let Some(v) = self.width {
            s.grid_width = v;
        }
        if let Some(v) = self.height {
            s.grid_height = v;
        }
        if let Some(v) = self.contrast {
            s.contrast = v;
        }
        if let Some(v) = self.brightness {
            s.brightness = v;
        }
        if let Some(v) = self.theme {
            s.theme = v;
        }
        if let Some(v) = self.mixed_style {
            s.mixed_style = v;
        }
        if self.colour_a.is_some() {
            s.mixed_colour_a = self.colour_a;
        }
        if self.colour_b.is_some() {
            s.mixed_colour_b = self.colour_b;
        }
        if self.no_shading {
            s.use_shading = false;
        }
        if let Some(v) = self.price {
            s.price_per_die = v;
        }
        if self.invert.is_some() {
            s.invert = self.invert;
        }
        if let Some(v) = self.cell_size {
            config.cell_size = v;
        }

        config.settings = config.settings.clamped();
        config
    }
}

fn parse_colour(s: &str) -> std::result::Result<Colour, String> {
    Colour::parse(s).map_err(|e| e.to_string())
}
