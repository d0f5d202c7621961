//! Derived metrics - face counts and cost.

use serde::Serialize;

use crate::types::FaceValue;

use super::overrides::TileView;

/// Tile counts and cost of a (possibly edited) mosaic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MosaicStats {
    pub rows: usize,
    pub cols: usize,
    /// Tiles per face, index 0 is face 1.
    pub face_counts: [usize; 6],
    /// Face-1 tiles.
    pub white: usize,
    /// Face-6 tiles.
    pub black: usize,
    pub total: usize,
    pub price_per_die: f64,
    pub total_cost: f64,
}

impl MosaicStats {
    /// Count the resolved tiles of `view`.
    pub fn from_view(view: &TileView<'_>) -> Self {
        let mut face_counts = [0usize; 6];
        for (_, _, cell) in view.iter() {
            face_counts[cell.face.index()] += 1;
        }

        let total = face_counts.iter().sum();
        let price_per_die = view.mosaic().settings().price_per_die;

        Self {
            rows: view.rows(),
            cols: view.cols(),
            face_counts,
            white: face_counts[FaceValue::ONE.index()],
            black: face_counts[FaceValue::SIX.index()],
            total,
            price_per_die,
            total_cost: total as f64 * price_per_die,
        }
    }

    /// Count for a single face.
    pub fn count(&self, face: FaceValue) -> usize {
        self.face_counts[face.index()]
    }
}
