//! Decoded source images.

use std::path::Path;

use image::RgbaImage;

use crate::error::{DiceError, Result};

/// A decoded RGBA image ready for sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbaImage,
}

impl SourceImage {
    /// Wrap an already-decoded buffer.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode an image from encoded bytes (PNG, JPEG, GIF, ...).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| DiceError::Decode {
            message: e.to_string(),
            help: Some("Use a PNG, JPEG, GIF, BMP or WebP image".to_string()),
        })?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    /// Read and decode an image file.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| DiceError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", e),
        })?;
        Self::decode(&bytes).map_err(|e| match e {
            DiceError::Decode { message, help } => DiceError::Decode {
                message: format!("{}: {}", path.display(), message),
                help,
            },
            other => other,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}
