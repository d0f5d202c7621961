//! Theme colour resolution - face value to die colour.

use std::ops::Index;

use serde::Serialize;

use crate::types::{Colour, FaceValue, MixedStyle, Settings, Theme};

/// Die colour for the black theme.
pub const BLACK_DIE: Colour = Colour::rgb(0x11, 0x11, 0x11);

/// Die colour for the white theme.
pub const WHITE_DIE: Colour = Colour::rgb(0xF5, 0xF5, 0xF5);

/// Default warm colour for odd faces in the alternating mixed theme.
pub const DEFAULT_MIXED_A: Colour = Colour::rgb(0xE0, 0x7A, 0x3F);

/// Default cool colour for even faces in the alternating mixed theme.
pub const DEFAULT_MIXED_B: Colour = Colour::rgb(0x3F, 0x7C, 0xAC);

/// Grayscale ramp for the simple mixed theme, darkest on face 1.
pub const GRAYSCALE_RAMP: [Colour; 6] = [
    Colour::rgb(0x00, 0x00, 0x00),
    Colour::rgb(0x33, 0x33, 0x33),
    Colour::rgb(0x66, 0x66, 0x66),
    Colour::rgb(0x99, 0x99, 0x99),
    Colour::rgb(0xCC, 0xCC, 0xCC),
    Colour::rgb(0xFF, 0xFF, 0xFF),
];

/// Fill colour for each of the six faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorTable([Colour; 6]);

impl ColorTable {
    /// Every face the same colour.
    pub const fn uniform(colour: Colour) -> Self {
        Self([colour; 6])
    }

    /// Odd faces get `a`, even faces get `b`.
    pub const fn alternating(a: Colour, b: Colour) -> Self {
        Self([a, b, a, b, a, b])
    }

    pub const fn from_entries(entries: [Colour; 6]) -> Self {
        Self(entries)
    }

    pub fn get(&self, face: FaceValue) -> Colour {
        self.0[face.index()]
    }

    /// Iterate `(face, colour)` for faces 1 through 6.
    pub fn iter(&self) -> impl Iterator<Item = (FaceValue, Colour)> + '_ {
        FaceValue::ALL.into_iter().zip(self.0.iter().copied())
    }

    pub fn entries(&self) -> &[Colour; 6] {
        &self.0
    }
}

impl Index<FaceValue> for ColorTable {
    type Output = Colour;

    fn index(&self, face: FaceValue) -> &Colour {
        &self.0[face.index()]
    }
}

/// Resolve the colour table for a theme.
///
/// `colours` are the user's mixed colours A and B; they only matter for the
/// alternating mixed style and fall back to a warm/cool pair when unset.
pub fn resolve(theme: Theme, style: MixedStyle, colours: (Option<Colour>, Option<Colour>)) -> ColorTable {
    match theme {
        Theme::Black => ColorTable::uniform(BLACK_DIE),
        Theme::White => ColorTable::uniform(WHITE_DIE),
        Theme::Mixed => match style {
            MixedStyle::Ramp => ColorTable::from_entries(GRAYSCALE_RAMP),
            MixedStyle::Alternating => ColorTable::alternating(
                colours.0.unwrap_or(DEFAULT_MIXED_A),
                colours.1.unwrap_or(DEFAULT_MIXED_B),
            ),
        },
    }
}

/// Resolve the colour table described by `settings`.
pub fn resolve_for(settings: &Settings) -> ColorTable {
    resolve(
        settings.theme,
        settings.mixed_style,
        (settings.mixed_colour_a, settings.mixed_colour_b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_uniform_themes() {
        let black = resolve(Theme::Black, MixedStyle::Alternating, (None, None));
        assert!(black.entries().iter().all(|&c| c == BLACK_DIE));

        // Mixed colours never leak into the uniform themes
        let white = resolve(
            Theme::White,
            MixedStyle::Alternating,
            (Some(Colour::rgb(1, 2, 3)), None),
        );
        assert!(white.entries().iter().all(|&c| c == WHITE_DIE));
    }

    #[test]
    fn test_alternating_defaults() {
        let table = resolve(Theme::Mixed, MixedStyle::Alternating, (None, None));
        for (face, colour) in table.iter() {
            let expected = if face.is_odd() { DEFAULT_MIXED_A } else { DEFAULT_MIXED_B };
            assert_eq!(colour, expected);
        }
    }

    #[test]
    fn test_alternating_custom() {
        let a = Colour::rgb(255, 0, 0);
        let b = Colour::rgb(0, 0, 255);
        let table = resolve(Theme::Mixed, MixedStyle::Alternating, (Some(a), Some(b)));
        assert_eq!(table.entries(), &[a, b, a, b, a, b]);
    }

    #[test]
    fn test_ramp() {
        let table = resolve(Theme::Mixed, MixedStyle::Ramp, (None, None));
        assert_eq!(table[FaceValue::ONE], Colour::BLACK);
        assert_eq!(table[FaceValue::SIX], Colour::WHITE);
        let lums: Vec<f32> = table.iter().map(|(_, c)| c.luminance()).collect();
        assert!(lums.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_always_six_entries() {
        for theme in [Theme::Black, Theme::White, Theme::Mixed] {
            for style in [MixedStyle::Ramp, MixedStyle::Alternating] {
                assert_eq!(resolve(theme, style, (None, None)).iter().count(), 6);
            }
        }
    }
}
