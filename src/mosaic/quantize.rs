//! Quantization of adjusted luminance into the six face values.

use crate::types::FaceValue;

/// Width of one luminance bucket (`255 / 6`).
pub const BUCKET_WIDTH: f32 = 255.0 / 6.0;

/// Map luminance in `[0, 255]` to a face.
///
/// Buckets are half-open `[k*255/6, (k+1)*255/6)` with the last one closed
/// at 255. Face 1 is the darkest bucket unless `invert` is set, in which
/// case face 6 is. Out-of-range and NaN inputs are pinned to the nearest
/// end so the result is always a valid face.
pub fn quantize(luminance: f32, invert: bool) -> FaceValue {
    let bucket = bucket_index(luminance);
    let face = if invert { 6 - bucket } else { bucket + 1 };
    FaceValue::ALL[face as usize - 1]
}

/// Zero-based bucket for a luminance value, always in `0..6`.
pub fn bucket_index(luminance: f32) -> u8 {
    if luminance.is_nan() || luminance <= 0.0 {
        return 0;
    }
    ((luminance * 6.0 / 255.0).floor() as u32).min(5) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert_eq!(quantize(0.0, false).get(), 1);
        assert_eq!(quantize(42.49, false).get(), 1);
        assert_eq!(quantize(42.5, false).get(), 2);
        assert_eq!(quantize(127.49, false).get(), 3);
        assert_eq!(quantize(127.5, false).get(), 4);
        assert_eq!(quantize(212.5, false).get(), 6);
        assert_eq!(quantize(255.0, false).get(), 6);
    }

    #[test]
    fn test_mid_gray_is_face_four() {
        assert_eq!(quantize(128.0, false).get(), 4);
        assert_eq!(quantize(128.0, true).get(), 3);
    }

    #[test]
    fn test_out_of_range_inputs() {
        assert_eq!(quantize(-10.0, false).get(), 1);
        assert_eq!(quantize(400.0, false).get(), 6);
        assert_eq!(quantize(f32::NAN, false).get(), 1);
    }

    #[test]
    fn test_monotonic() {
        let mut last = quantize(0.0, false);
        let mut last_inverted = quantize(0.0, true);
        for step in 0..=2550 {
            let l = step as f32 / 10.0;
            let face = quantize(l, false);
            let inverted = quantize(l, true);
            assert!(face >= last);
            assert!(inverted <= last_inverted);
            assert_eq!(face.get() + inverted.get(), 7);
            last = face;
            last_inverted = inverted;
        }
    }
}
