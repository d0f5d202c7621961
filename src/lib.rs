//! dice - Turn images into dice mosaics
//!
//! A library for converting a raster image into a grid of die faces,
//! editing individual tiles, and exporting the result as a CSV build
//! sheet and a high-resolution PNG.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod mosaic;
pub mod output;
pub mod render;
pub mod session;
pub mod types;

pub use config::{Config, CONFIG_FILENAME};
pub use error::{DiceError, Result};
pub use export::{export_png, export_raster, parse_csv, to_csv, write_csv, CsvLayout, CsvRecord};
pub use mosaic::{
    generate, resolve_cell, ColorTable, Mosaic, MosaicStats, OverrideCell, OverrideGrid,
    ResolvedCell, SourceImage, TileView, ToneMapper, Warning, Warnings,
};
pub use render::{encode_png, write_png, MosaicRenderer, Surface};
pub use session::{Commit, Debouncer, Session, Ticket};
pub use types::{Colour, FaceValue, Grid, MixedStyle, Settings, Theme};
