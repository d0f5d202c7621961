//! PNG output for rendered mosaics.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{DiceError, Result};

/// Encode an image as PNG bytes at the highest compression level.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut bytes),
        CompressionType::Best,
        FilterType::Adaptive,
    );
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| DiceError::Render {
            message: format!("Failed to encode PNG: {}", e),
            help: None,
        })?;
    Ok(bytes)
}

/// Write an image to a PNG file.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let bytes = encode_png(image)?;
    fs::write(path, bytes).map_err(|e| DiceError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_write_png_round_trip() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");
        write_png(&img, &path).unwrap();

        let read = image::open(&path).unwrap().to_rgba8();
        assert_eq!(read.dimensions(), (2, 2));
        assert_eq!(read.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(read.get_pixel(1, 0).0, [255, 255, 255, 255]);
        assert_eq!(read.get_pixel(0, 1).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_encode_png_signature() {
        let img = RgbaImage::new(1, 1);
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_write_png_missing_directory() {
        let img = RgbaImage::new(1, 1);
        let result = write_png(&img, Path::new("/nonexistent/dir/out.png"));
        assert!(matches!(result, Err(DiceError::Io { .. })));
    }
}
