//! Mosaic pipeline - image and settings in, face grid and colours out.
//!
//! Stages: sample -> tone map -> quantize, plus theme colour resolution.
//! Generation is a pure function of its inputs; nothing is cached between
//! calls.

use crate::error::Result;
use crate::types::{Grid, Settings};

use super::quantize::quantize;
use super::sample::sample;
use super::source::SourceImage;
use super::theme::{self, ColorTable};
use super::tone::ToneMapper;
use super::warning::Warnings;

/// The product of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    grid: Grid,
    colours: ColorTable,
    settings: Settings,
    warnings: Warnings,
}

impl Mosaic {
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn colours(&self) -> &ColorTable {
        &self.colours
    }

    /// Settings this mosaic was generated from.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Recoverable conditions met while generating.
    pub fn warnings(&self) -> &Warnings {
        &self.warnings
    }

    /// Get the dimensions as (rows, cols).
    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }
}

/// Generate a mosaic from an image.
///
/// Fails with an input error when `settings` are out of bounds; the
/// settings are not clamped here.
pub fn generate(image: &SourceImage, settings: &Settings) -> Result<Mosaic> {
    settings.validate()?;

    let rows = settings.grid_height as usize;
    let cols = settings.grid_width as usize;

    let mut warnings = Warnings::new();
    let luminance = sample(image.pixels(), rows, cols, &mut warnings);

    let tone = ToneMapper::new(settings.contrast, settings.brightness);
    let invert = settings.inverts();
    let cells = luminance
        .values()
        .iter()
        .map(|&l| quantize(tone.apply(l), invert))
        .collect();

    // `sample` always yields rows * cols values
    let grid = Grid::from_cells(rows, cols, cells)
        .unwrap_or_else(|| unreachable!("sampled grid has {}x{} cells", rows, cols));

    Ok(Mosaic {
        grid,
        colours: theme::resolve_for(settings),
        settings: settings.clone(),
        warnings,
    })
}
