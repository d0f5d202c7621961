//! Mosaic renderer - draws a whole tile grid onto a surface.

use image::RgbaImage;

use crate::error::{DiceError, Result};
use crate::mosaic::TileView;
use crate::types::Colour;

use super::surface::{clear, Surface};
use super::tile::{draw_tile, CellRect};

/// Colour showing through the gaps between tiles.
pub const GUTTER_COLOUR: Colour = Colour::rgb(0x80, 0x80, 0x80);

/// Renders a [`TileView`] at a chosen cell size and resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MosaicRenderer {
    cell_size: u32,
    shading: bool,
}

impl MosaicRenderer {
    /// Create a renderer with `cell_size` logical pixels per tile.
    pub fn new(cell_size: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            shading: true,
        }
    }

    /// Enable or disable pip drawing.
    pub fn with_shading(mut self, shading: bool) -> Self {
        self.shading = shading;
        self
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Surface dimensions needed for `view` at `multiplier`.
    pub fn surface_size(&self, view: &TileView<'_>, multiplier: u32) -> Result<(u32, u32)> {
        let multiplier = multiplier.max(1);
        let side = |tiles: usize| -> Option<u32> {
            u32::try_from(tiles)
                .ok()?
                .checked_mul(self.cell_size)?
                .checked_mul(multiplier)
        };

        match (side(view.cols()), side(view.rows())) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(DiceError::Render {
                message: format!(
                    "{}x{} tiles at {}px x{} is too large to render",
                    view.cols(),
                    view.rows(),
                    self.cell_size,
                    multiplier
                ),
                help: Some("Use a smaller cell size or export factor".to_string()),
            }),
        }
    }

    /// Draw every tile of `view` onto `surface`.
    ///
    /// The surface must be at least [`surface_size`](Self::surface_size).
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, view: &TileView<'_>, multiplier: u32) -> Result<()> {
        let multiplier = multiplier.max(1);
        let (need_w, need_h) = self.surface_size(view, multiplier)?;
        let (width, height) = surface.size();
        if width < need_w || height < need_h {
            return Err(DiceError::Render {
                message: format!(
                    "Surface is {}x{} but the mosaic needs {}x{}",
                    width, height, need_w, need_h
                ),
                help: None,
            });
        }

        clear(surface, GUTTER_COLOUR);

        let size = self.cell_size as f32;
        for (row, col, tile) in view.iter() {
            let cell = CellRect::new(col as f32 * size, row as f32 * size, size);
            draw_tile(surface, cell, &tile, self.shading, multiplier);
        }

        Ok(())
    }

    /// Render onto a freshly allocated image of exactly the needed size.
    pub fn render_image(&self, view: &TileView<'_>, multiplier: u32) -> Result<RgbaImage> {
        let (width, height) = self.surface_size(view, multiplier)?;
        let mut image = RgbaImage::new(width, height);
        self.render(&mut image, view, multiplier)?;
        Ok(image)
    }
}

impl Default for MosaicRenderer {
    fn default() -> Self {
        Self::new(20)
    }
}
