//! Contrast and brightness adjustment of sampled luminance.
//!
//! Contrast scales around the midpoint 128, then brightness shifts, then
//! the result is clamped to `[0, 255]`. Both settings are neutral at 50.

/// Luminance midpoint that contrast pivots around.
pub const MIDPOINT: f32 = 128.0;

/// Maximum brightness offset, reached at brightness 0 or 100.
const MAX_BRIGHTNESS_OFFSET: f32 = 127.5;

/// Tone mapping parameters derived from the 0..=100 settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneMapper {
    factor: f32,
    offset: f32,
}

impl ToneMapper {
    pub fn new(contrast: i32, brightness: i32) -> Self {
        Self {
            factor: contrast_factor(contrast),
            offset: brightness_offset(brightness),
        }
    }

    /// Multiplier applied around the midpoint.
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Additive shift applied after contrast.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Adjust a single luminance value.
    pub fn apply(&self, luminance: f32) -> f32 {
        let contrasted = (luminance - MIDPOINT) * self.factor + MIDPOINT;
        (contrasted + self.offset).clamp(0.0, 255.0)
    }
}

impl Default for ToneMapper {
    fn default() -> Self {
        Self::new(50, 50)
    }
}

/// Contrast multiplier for a 0..=100 setting.
///
/// Maps the setting onto `c` in `[-255, 255]` and uses the classic
/// `259(c + 255) / (255(259 - c))` curve: 0 at the bottom, exactly 1 at
/// 50, and rising steeply toward 100.
pub fn contrast_factor(contrast: i32) -> f32 {
    let c = (contrast.clamp(0, 100) as f32 - 50.0) / 50.0 * 255.0;
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

/// Brightness offset for a 0..=100 setting, linear around 50.
pub fn brightness_offset(brightness: i32) -> f32 {
    (brightness.clamp(0, 100) as f32 - 50.0) / 50.0 * MAX_BRIGHTNESS_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_identity() {
        let tone = ToneMapper::default();
        assert!((tone.factor() - 1.0).abs() < 1e-6);
        assert_eq!(tone.offset(), 0.0);
        for l in [0.0, 42.0, 128.0, 200.0, 255.0] {
            assert!((tone.apply(l) - l).abs() < 1e-3);
        }
    }

    #[test]
    fn test_contrast_factor_monotonic() {
        let mut last = contrast_factor(0);
        assert_eq!(last, 0.0);
        for c in 1..=100 {
            let f = contrast_factor(c);
            assert!(f > last, "factor must increase at contrast {}", c);
            last = f;
        }
        assert!(contrast_factor(100) > 100.0);
    }

    #[test]
    fn test_zero_contrast_flattens_to_midpoint() {
        let tone = ToneMapper::new(0, 50);
        assert_eq!(tone.apply(0.0), MIDPOINT);
        assert_eq!(tone.apply(255.0), MIDPOINT);
    }

    #[test]
    fn test_contrast_before_brightness() {
        // Brightness must not be scaled by contrast
        let tone = ToneMapper::new(75, 60);
        let expected = ((100.0 - MIDPOINT) * tone.factor() + MIDPOINT + tone.offset()).clamp(0.0, 255.0);
        assert!((tone.apply(100.0) - expected).abs() < 1e-4);
        assert!((tone.offset() - 25.5).abs() < 1e-4);
    }

    #[test]
    fn test_output_clamped() {
        let tone = ToneMapper::new(100, 100);
        assert_eq!(tone.apply(255.0), 255.0);
        let tone = ToneMapper::new(100, 0);
        assert_eq!(tone.apply(0.0), 0.0);
    }

    #[test]
    fn test_settings_outside_range_saturate() {
        assert_eq!(ToneMapper::new(250, -10), ToneMapper::new(100, 0));
        assert_eq!(contrast_factor(-1), 0.0);
    }
}
