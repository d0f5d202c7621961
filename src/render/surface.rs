//! Drawing surfaces and primitive fills.
//!
//! Geometry is in floating-point device pixels. A pixel is painted when its
//! centre falls inside the shape, which keeps rendering identical up to
//! scale when every measurement is multiplied by the same factor.

use image::{Rgba, RgbaImage};

use crate::types::Colour;

/// Any addressable 2D pixel buffer.
pub trait Surface {
    /// Dimensions as (width, height).
    fn size(&self) -> (u32, u32);

    /// Set one pixel. Callers stay within `size()`.
    fn set(&mut self, x: u32, y: u32, colour: Colour);
}

impl Surface for RgbaImage {
    fn size(&self) -> (u32, u32) {
        self.dimensions()
    }

    fn set(&mut self, x: u32, y: u32, colour: Colour) {
        self.put_pixel(x, y, Rgba(colour.to_rgba()));
    }
}

/// Fill the whole surface.
pub fn clear<S: Surface + ?Sized>(surface: &mut S, colour: Colour) {
    let (width, height) = surface.size();
    for y in 0..height {
        for x in 0..width {
            surface.set(x, y, colour);
        }
    }
}

/// Fill the rectangle `[x0, x1) x [y0, y1)`.
pub fn fill_rect<S: Surface + ?Sized>(surface: &mut S, x0: f32, y0: f32, x1: f32, y1: f32, colour: Colour) {
    let (width, height) = surface.size();
    let (xs, xe) = covered(x0, x1, width);
    let (ys, ye) = covered(y0, y1, height);
    for y in ys..ye {
        for x in xs..xe {
            surface.set(x, y, colour);
        }
    }
}

/// Fill the disc centred at `(cx, cy)`.
pub fn fill_circle<S: Surface + ?Sized>(surface: &mut S, cx: f32, cy: f32, radius: f32, colour: Colour) {
    if radius <= 0.0 {
        return;
    }
    let (width, height) = surface.size();
    let (xs, xe) = covered(cx - radius, cx + radius, width);
    let (ys, ye) = covered(cy - radius, cy + radius, height);
    let r2 = radius * radius;

    for y in ys..ye {
        let dy = y as f32 + 0.5 - cy;
        for x in xs..xe {
            let dx = x as f32 + 0.5 - cx;
            if dx * dx + dy * dy <= r2 {
                surface.set(x, y, colour);
            }
        }
    }
}

/// Pixel index range whose centres lie in `[start, end)`, clipped to `limit`.
fn covered(start: f32, end: f32, limit: u32) -> (u32, u32) {
    let first = (start - 0.5).ceil().max(0.0);
    let last = (end - 0.5).ceil().max(0.0);
    let first = (first as u64).min(limit as u64) as u32;
    let last = (last as u64).min(limit as u64) as u32;
    (first, last.max(first))
}
