//! Image sampling - reduces a source image to one luminance per tile.
//!
//! Each tile covers the source region
//! `[floor(c*W/C), floor((c+1)*W/C)) x [floor(r*H/R), floor((r+1)*H/R))`
//! and takes the mean perceptual luminance of the pixels inside it.

use image::RgbaImage;

use crate::types::luminance;

use super::warning::{Warning, Warnings};

/// Luminance used when a tile has no source pixels and nothing precedes it.
pub const FALLBACK_LUMINANCE: f32 = 128.0;

/// A `rows x cols` grid of luminance values in `[0, 255]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceGrid {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl LuminanceGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.values[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row-major values.
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Sample `image` into a `rows x cols` luminance grid.
///
/// Transparent pixels are composited over white. When the grid is finer
/// than the image along an axis, the tile falls back to the nearest
/// source pixel. A tile with no source pixels at all (empty image) reuses
/// the previous tile's value, or mid-gray for the first tile, and is
/// reported once in `warnings`.
pub fn sample(image: &RgbaImage, rows: usize, cols: usize, warnings: &mut Warnings) -> LuminanceGrid {
    let width = image.width() as usize;
    let height = image.height() as usize;

    let x_spans: Vec<Option<(usize, usize)>> = (0..cols).map(|c| span(c, cols, width)).collect();
    let y_spans: Vec<Option<(usize, usize)>> = (0..rows).map(|r| span(r, rows, height)).collect();

    let mut values = Vec::with_capacity(rows * cols);
    let mut previous: Option<f32> = None;
    let mut degenerate = 0usize;

    for y_span in &y_spans {
        for x_span in &x_spans {
            let value = match (y_span, x_span) {
                (Some(ys), Some(xs)) => Some(region_mean(image, *xs, *ys)),
                _ => None,
            };

            let value = match value {
                Some(v) => {
                    previous = Some(v);
                    v
                }
                None => {
                    degenerate += 1;
                    previous.unwrap_or(FALLBACK_LUMINANCE)
                }
            };
            values.push(value);
        }
    }

    if degenerate > 0 {
        warnings.push(
            Warning::new(
                "dice::sample::degenerate-region",
                format!(
                    "{} of {} tiles had no source pixels and used a fallback luminance",
                    degenerate,
                    rows * cols
                ),
            )
            .with_help("Check that the source image is not empty"),
        );
    }

    LuminanceGrid { rows, cols, values }
}

/// Source pixel span `[start, end)` for tile `index` of `count` along an
/// axis of `extent` pixels.
///
/// Returns `None` only when the axis has no pixels.
fn span(index: usize, count: usize, extent: usize) -> Option<(usize, usize)> {
    if extent == 0 || count == 0 {
        return None;
    }

    let start = index * extent / count;
    let end = (index + 1) * extent / count;
    if end > start {
        return Some((start, end));
    }

    // Finer than the source: take the pixel under the tile centre
    let nearest = ((2 * index + 1) * extent / (2 * count)).min(extent - 1);
    Some((nearest, nearest + 1))
}

/// Mean luminance of a non-empty region.
fn region_mean(image: &RgbaImage, (x0, x1): (usize, usize), (y0, y1): (usize, usize)) -> f32 {
    let mut total = 0.0f64;
    for y in y0..y1 {
        for x in x0..x1 {
            let [r, g, b, a] = image.get_pixel(x as u32, y as u32).0;
            let lum = luminance(r as f32, g as f32, b as f32) as f64;
            let alpha = a as f64 / 255.0;
            total += lum * alpha + 255.0 * (1.0 - alpha);
        }
    }
    let count = ((x1 - x0) * (y1 - y0)) as f64;
    (total / count) as f32
}
