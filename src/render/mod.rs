//! Rendering module for dice-mosaic.
//!
//! This module draws die tiles onto pixel surfaces and encodes the result
//! as PNG.

mod mosaic;
mod png;
mod surface;
mod tile;

pub use mosaic::{MosaicRenderer, GUTTER_COLOUR};
pub use png::{encode_png, write_png};
pub use surface::{clear, fill_circle, fill_rect, Surface};
pub use tile::{
    draw_tile, pip_layout, CellRect, DOT_RADIUS_RATIO, PADDING_RATIO, PIP_RADIUS_RATIO,
    PIP_VISIBILITY_THRESHOLD,
};
