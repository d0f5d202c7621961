//! Tile renderer - draws one die face.
//!
//! A tile is a flat square inset slightly from its cell (leaving a gutter
//! between neighbours) with the face's pips on top. Every measurement is a
//! fraction of the cell size, so drawing at a multiplier of 4 produces the
//! same picture as drawing at 1, only four times larger.

use crate::mosaic::ResolvedCell;
use crate::types::FaceValue;

use super::surface::{fill_circle, fill_rect, Surface};

/// Gap left on each side of a tile, as a fraction of the cell size.
pub const PADDING_RATIO: f32 = 0.01;

/// Pip radius as a fraction of the tile size.
pub const PIP_RADIUS_RATIO: f32 = 0.1;

/// Radius of the single dot drawn on small tiles.
pub const DOT_RADIUS_RATIO: f32 = 0.12;

/// Smallest logical cell size (before the multiplier) that gets full pips.
pub const PIP_VISIBILITY_THRESHOLD: f32 = 8.0;

/// Small dots never shrink below this many device pixels.
const MIN_DOT_RADIUS: f32 = 0.75;

const LOW: f32 = 0.25;
const MID: f32 = 0.5;
const HIGH: f32 = 0.75;

/// Pip centres for each face, as fractions of the tile.
pub fn pip_layout(face: FaceValue) -> &'static [(f32, f32)] {
    const ONE: [(f32, f32); 1] = [(MID, MID)];
    const TWO: [(f32, f32); 2] = [(LOW, LOW), (HIGH, HIGH)];
    const THREE: [(f32, f32); 3] = [(LOW, LOW), (MID, MID), (HIGH, HIGH)];
    const FOUR: [(f32, f32); 4] = [(LOW, LOW), (HIGH, LOW), (LOW, HIGH), (HIGH, HIGH)];
    const FIVE: [(f32, f32); 5] = [(LOW, LOW), (HIGH, LOW), (MID, MID), (LOW, HIGH), (HIGH, HIGH)];
    const SIX: [(f32, f32); 6] = [
        (LOW, LOW),
        (LOW, MID),
        (LOW, HIGH),
        (HIGH, LOW),
        (HIGH, MID),
        (HIGH, HIGH),
    ];

    match face.get() {
        1 => &ONE,
        2 => &TWO,
        3 => &THREE,
        4 => &FOUR,
        5 => &FIVE,
        _ => &SIX,
    }
}

/// A square cell in logical (pre-multiplier) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl CellRect {
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self { x, y, size }
    }

    fn scaled(self, multiplier: f32) -> Self {
        Self {
            x: self.x * multiplier,
            y: self.y * multiplier,
            size: self.size * multiplier,
        }
    }
}

/// Draw a single tile.
///
/// With `shading` off only the flat tile is drawn. With it on, cells at
/// least [`PIP_VISIBILITY_THRESHOLD`] logical pixels wide get the full pip
/// layout and smaller cells get one centred dot.
pub fn draw_tile<S: Surface + ?Sized>(
    surface: &mut S,
    cell: CellRect,
    tile: &ResolvedCell,
    shading: bool,
    multiplier: u32,
) {
    let device = cell.scaled(multiplier.max(1) as f32);

    let pad = device.size * PADDING_RATIO;
    let x0 = device.x + pad;
    let y0 = device.y + pad;
    let inner = device.size - 2.0 * pad;
    fill_rect(surface, x0, y0, x0 + inner, y0 + inner, tile.fill);

    if !shading {
        return;
    }

    if cell.size >= PIP_VISIBILITY_THRESHOLD {
        let radius = inner * PIP_RADIUS_RATIO;
        for &(fx, fy) in pip_layout(tile.face) {
            fill_circle(surface, x0 + inner * fx, y0 + inner * fy, radius, tile.pip);
        }
    } else {
        let radius = (inner * DOT_RADIUS_RATIO).max(MIN_DOT_RADIUS);
        fill_circle(surface, x0 + inner * MID, y0 + inner * MID, radius, tile.pip);
    }
}
