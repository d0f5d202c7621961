//! Supersampled high-resolution raster export.

use std::path::Path;

use image::RgbaImage;

use crate::error::{DiceError, Result};
use crate::mosaic::TileView;
use crate::render::{write_png, MosaicRenderer};

/// Default supersampling factor for exports.
pub const DEFAULT_EXPORT_FACTOR: u32 = 2;

/// Exports are always at least this many times the preview size.
pub const MIN_EXPORT_FACTOR: u32 = 2;

pub const MAX_EXPORT_FACTOR: u32 = 8;

/// Check an export factor is within bounds.
pub fn check_factor(factor: u32) -> Result<()> {
    if (MIN_EXPORT_FACTOR..=MAX_EXPORT_FACTOR).contains(&factor) {
        Ok(())
    } else {
        Err(DiceError::Input {
            message: format!("Export factor {} is out of range", factor),
            help: Some(format!(
                "Use a factor between {} and {}",
                MIN_EXPORT_FACTOR, MAX_EXPORT_FACTOR
            )),
        })
    }
}

/// Render `view` at `factor` times the renderer's cell size.
///
/// The result is `cols * cell_size * factor` by `rows * cell_size * factor`.
pub fn export_raster(view: &TileView<'_>, renderer: &MosaicRenderer, factor: u32) -> Result<RgbaImage> {
    check_factor(factor)?;
    renderer.render_image(view, factor)
}

/// Render and write a PNG, returning its dimensions.
pub fn export_png(view: &TileView<'_>, renderer: &MosaicRenderer, factor: u32, path: &Path) -> Result<(u32, u32)> {
    let image = export_raster(view, renderer, factor)?;
    write_png(&image, path)?;
    Ok(image.dimensions())
}
