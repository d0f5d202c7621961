//! Core domain types for dice-mosaic.
//!
//! This module contains the fundamental types used throughout the pipeline:
//! - `Colour` - flat RGB colour values
//! - `FaceValue` - a die face, always 1 to 6
//! - `Grid` - the immutable generated face matrix
//! - `Settings` - numeric and theme inputs to generation

mod colour;
mod face;
mod grid;
mod settings;

pub use colour::{luminance, Colour};
pub use face::FaceValue;
pub use grid::Grid;
pub use settings::{MixedStyle, Settings, Theme, MAX_GRID_SIZE, MAX_TILES, MIN_GRID_SIZE};
