//! Mosaic generation.
//!
//! This module turns a decoded image and [`Settings`](crate::types::Settings)
//! into a grid of die faces and a colour table, and layers manual
//! overrides on top.

mod overrides;
mod pipeline;
mod quantize;
mod sample;
mod source;
mod stats;
mod theme;
mod tone;
mod warning;

pub use overrides::{resolve_cell, OverrideCell, OverrideGrid, ResolvedCell, TileView};
pub use pipeline::{generate, Mosaic};
pub use quantize::{bucket_index, quantize, BUCKET_WIDTH};
pub use sample::{sample, LuminanceGrid, FALLBACK_LUMINANCE};
pub use source::SourceImage;
pub use stats::MosaicStats;
pub use theme::{
    resolve as resolve_theme, resolve_for, ColorTable, BLACK_DIE, DEFAULT_MIXED_A, DEFAULT_MIXED_B,
    GRAYSCALE_RAMP, WHITE_DIE,
};
pub use tone::{brightness_offset, contrast_factor, ToneMapper, MIDPOINT};
pub use warning::{Warning, Warnings};
