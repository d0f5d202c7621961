//! Manual per-tile overrides layered on top of a generated mosaic.
//!
//! An [`OverrideGrid`] is a persistent value: [`OverrideGrid::apply`]
//! returns a new grid and leaves the receiver untouched. Rows are shared
//! between versions and copied only when edited.
//!
//! [`TileView`] is the one place where the generated grid and the
//! overrides are merged. Preview rendering, raster export, CSV export and
//! statistics all read tiles through it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, Result};
use crate::types::{Colour, FaceValue, Grid};

use super::pipeline::Mosaic;
use super::theme::ColorTable;

/// A partial per-tile override. Unset fields fall through to the
/// generated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OverrideCell {
    pub face: Option<FaceValue>,
    pub fill: Option<Colour>,
    pub pip: Option<Colour>,
}

impl OverrideCell {
    pub fn face(face: FaceValue) -> Self {
        Self {
            face: Some(face),
            ..Default::default()
        }
    }

    pub fn fill(colour: Colour) -> Self {
        Self {
            fill: Some(colour),
            ..Default::default()
        }
    }

    pub fn pip(colour: Colour) -> Self {
        Self {
            pip: Some(colour),
            ..Default::default()
        }
    }

    /// Fields set in `patch` replace ours; the rest are kept.
    pub fn merged(self, patch: OverrideCell) -> Self {
        Self {
            face: patch.face.or(self.face),
            fill: patch.fill.or(self.fill),
            pip: patch.pip.or(self.pip),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.face.is_none() && self.fill.is_none() && self.pip.is_none()
    }
}

type Row = Arc<Vec<Option<OverrideCell>>>;

/// A `rows x cols` grid of optional overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideGrid {
    rows: usize,
    cols: usize,
    cells: Arc<Vec<Row>>,
}

impl OverrideGrid {
    /// A grid with no overrides set.
    pub fn empty(rows: usize, cols: usize) -> Self {
        let row: Row = Arc::new(vec![None; cols]);
        Self {
            rows,
            cols,
            cells: Arc::new(vec![row; rows]),
        }
    }

    /// Seed one populated cell per tile from the generated grid.
    ///
    /// Face and fill are explicit; the pip colour stays derived.
    pub fn initialize(grid: &Grid, colours: &ColorTable) -> Self {
        let cells: Vec<Row> = (0..grid.rows())
            .map(|row| {
                let cells: Vec<Option<OverrideCell>> = (0..grid.cols())
                    .filter_map(|col| grid.get(row, col))
                    .map(|face| {
                        Some(OverrideCell {
                            face: Some(face),
                            fill: Some(colours.get(face)),
                            pip: None,
                        })
                    })
                    .collect();
                Arc::new(cells)
            })
            .collect();

        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            cells: Arc::new(cells),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the dimensions as (rows, cols).
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Override at a position; `None` when unset or out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&OverrideCell> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Return a copy with `patch` merged into cell `(row, col)`.
    ///
    /// Only the edited row is copied; every other row is shared with
    /// `self`. Out-of-range positions are rejected.
    pub fn apply(&self, row: usize, col: usize, patch: OverrideCell) -> Result<Self> {
        if row >= self.rows || col >= self.cols {
            return Err(DiceError::Input {
                message: format!(
                    "Cell ({}, {}) is outside the {}x{} mosaic",
                    row + 1,
                    col + 1,
                    self.rows,
                    self.cols
                ),
                help: Some("Rows and columns are numbered from 1".to_string()),
            });
        }

        let mut rows: Vec<Row> = self.cells.as_ref().clone();
        let edited = Arc::make_mut(&mut rows[row]);
        let current = edited[col].unwrap_or_default();
        edited[col] = Some(current.merged(patch));

        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            cells: Arc::new(rows),
        })
    }

    /// Return a copy with every set cell of `top` merged in.
    ///
    /// Fails if the two grids differ in size.
    pub fn overlay(&self, top: &OverrideGrid) -> Result<Self> {
        if top.dimensions() != self.dimensions() {
            return Err(DiceError::input(format!(
                "Cannot layer {}x{} overrides onto {}x{}",
                top.rows, top.cols, self.rows, self.cols
            )));
        }

        let mut rows: Vec<Row> = self.cells.as_ref().clone();
        for (r, top_row) in top.cells.iter().enumerate() {
            if top_row.iter().all(Option::is_none) {
                continue;
            }
            let row = Arc::make_mut(&mut rows[r]);
            for (slot, patch) in row.iter_mut().zip(top_row.iter()) {
                if let Some(patch) = patch {
                    *slot = Some(slot.unwrap_or_default().merged(*patch));
                }
            }
        }

        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            cells: Arc::new(rows),
        })
    }

    /// Whether two grids share storage for a row.
    pub fn shares_row(&self, other: &OverrideGrid, row: usize) -> bool {
        match (self.cells.get(row), other.cells.get(row)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Iterate `(row, col, override)` over set cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &OverrideCell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, cell)| cell.as_ref().map(|cell| (r, c, cell)))
        })
    }
}

/// The effective look of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedCell {
    pub face: FaceValue,
    pub fill: Colour,
    pub pip: Colour,
}

/// Merge one tile: each override field wins over the generated value.
///
/// The generated fill follows the effective face, and the pip colour
/// defaults to whichever of black or white contrasts more with the fill.
pub fn resolve_cell(base: FaceValue, colours: &ColorTable, over: Option<&OverrideCell>) -> ResolvedCell {
    let over = over.copied().unwrap_or_default();
    let face = over.face.unwrap_or(base);
    let fill = over.fill.unwrap_or_else(|| colours.get(face));
    let pip = over.pip.unwrap_or_else(|| fill.contrasting());
    ResolvedCell { face, fill, pip }
}

/// A mosaic as seen through its override layer.
#[derive(Debug, Clone, Copy)]
pub struct TileView<'a> {
    mosaic: &'a Mosaic,
    overrides: Option<&'a OverrideGrid>,
}

impl<'a> TileView<'a> {
    /// View `mosaic` through `overrides`.
    ///
    /// Fails if the override grid does not match the mosaic dimensions.
    pub fn new(mosaic: &'a Mosaic, overrides: Option<&'a OverrideGrid>) -> Result<Self> {
        if let Some(over) = overrides {
            if over.dimensions() != mosaic.dimensions() {
                return Err(DiceError::Input {
                    message: format!(
                        "Overrides are {}x{} but the mosaic is {}x{}",
                        over.rows(),
                        over.cols(),
                        mosaic.grid().rows(),
                        mosaic.grid().cols()
                    ),
                    help: Some("Regenerate the overrides for the new grid size".to_string()),
                });
            }
        }
        Ok(Self { mosaic, overrides })
    }

    /// A view with no overrides.
    pub fn plain(mosaic: &'a Mosaic) -> Self {
        Self {
            mosaic,
            overrides: None,
        }
    }

    pub fn mosaic(&self) -> &'a Mosaic {
        self.mosaic
    }

    pub fn rows(&self) -> usize {
        self.mosaic.grid().rows()
    }

    pub fn cols(&self) -> usize {
        self.mosaic.grid().cols()
    }

    /// Resolved tile at a position, or `None` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> Option<ResolvedCell> {
        let base = self.mosaic.grid().get(row, col)?;
        let over = self.overrides.and_then(|o| o.get(row, col));
        Some(resolve_cell(base, self.mosaic.colours(), over))
    }

    /// Iterate `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, ResolvedCell)> + 'a {
        let mosaic: &'a Mosaic = self.mosaic;
        let colours = *mosaic.colours();
        let overrides = self.overrides;
        mosaic.grid().iter().map(move |(r, c, base)| {
            let over = overrides.and_then(|o| o.get(r, c));
            (r, c, resolve_cell(base, &colours, over))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mosaic::pipeline::generate;
    use crate::mosaic::source::SourceImage;
    use crate::types::{Settings, Theme};
    use image::{Rgba, RgbaImage};
    use pretty_assertions::assert_eq;

    fn face(v: u8) -> FaceValue {
        FaceValue::new(v).unwrap()
    }

    fn sample_mosaic() -> Mosaic {
        let image = SourceImage::from_rgba(RgbaImage::from_fn(40, 20, |x, y| {
            let level = ((x * 6 + y * 3) % 256) as u8;
            Rgba([level, level / 2, 255 - level, 255])
        }));
        let settings = Settings {
            grid_width: 12,
            grid_height: 10,
            theme: Theme::Mixed,
            ..Default::default()
        };
        generate(&image, &settings).unwrap()
    }

    #[test]
    fn test_initialize_round_trip() {
        let mosaic = sample_mosaic();
        let overrides = OverrideGrid::initialize(mosaic.grid(), mosaic.colours());
        let layered = TileView::new(&mosaic, Some(&overrides)).unwrap();
        let plain = TileView::plain(&mosaic);

        assert_eq!(overrides.iter().count(), mosaic.grid().len());
        for ((r, c, a), (_, _, b)) in layered.iter().zip(plain.iter()) {
            assert_eq!(a, b);
            assert_eq!(a.face, mosaic.grid().get(r, c).unwrap());
            assert_eq!(a.fill, mosaic.colours().get(a.face));
        }
    }

    #[test]
    fn test_apply_is_local() {
        let mosaic = sample_mosaic();
        let before = OverrideGrid::initialize(mosaic.grid(), mosaic.colours());
        let after = before.apply(3, 4, OverrideCell::face(face(5))).unwrap();

        for r in 0..before.rows() {
            for c in 0..before.cols() {
                let old = before.get(r, c).unwrap();
                let new = after.get(r, c).unwrap();
                if (r, c) == (3, 4) {
                    assert_eq!(new.face, Some(face(5)));
                    assert_eq!(new.fill, old.fill);
                    assert_eq!(new.pip, old.pip);
                } else {
                    assert_eq!(new, old);
                }
            }
        }
    }

    #[test]
    fn test_apply_leaves_previous_version_intact() {
        let empty = OverrideGrid::empty(10, 10);
        let edited = empty.apply(0, 0, OverrideCell::fill(Colour::rgb(9, 9, 9))).unwrap();

        assert!(empty.get(0, 0).is_none());
        assert_eq!(edited.get(0, 0).unwrap().fill, Some(Colour::rgb(9, 9, 9)));
        assert!(!edited.shares_row(&empty, 0));
        assert!(edited.shares_row(&empty, 1));
    }

    #[test]
    fn test_apply_merges_fields() {
        let grid = OverrideGrid::empty(10, 10)
            .apply(2, 2, OverrideCell::face(face(2)))
            .unwrap()
            .apply(2, 2, OverrideCell::pip(Colour::rgb(255, 0, 0)))
            .unwrap();
        let cell = grid.get(2, 2).unwrap();
        assert_eq!(cell.face, Some(face(2)));
        assert_eq!(cell.pip, Some(Colour::rgb(255, 0, 0)));
        assert!(cell.fill.is_none());
    }

    #[test]
    fn test_apply_out_of_range() {
        let grid = OverrideGrid::empty(10, 12);
        assert!(matches!(
            grid.apply(10, 0, OverrideCell::face(face(1))),
            Err(DiceError::Input { .. })
        ));
        assert!(grid.apply(0, 12, OverrideCell::face(face(1))).is_err());
        assert!(grid.apply(9, 11, OverrideCell::face(face(1))).is_ok());
    }

    #[test]
    fn test_overlay_merges_set_cells() {
        let mosaic = sample_mosaic();
        let base = OverrideGrid::initialize(mosaic.grid(), mosaic.colours());
        let edits = OverrideGrid::empty(10, 12)
            .apply(1, 1, OverrideCell::pip(Colour::rgb(0, 255, 0)))
            .unwrap();

        let layered = base.overlay(&edits).unwrap();
        let cell = layered.get(1, 1).unwrap();
        assert_eq!(cell.pip, Some(Colour::rgb(0, 255, 0)));
        assert_eq!(cell.face, base.get(1, 1).unwrap().face);
        assert_eq!(layered.get(5, 5), base.get(5, 5));
        assert!(layered.shares_row(&base, 5));
        assert!(!layered.shares_row(&base, 1));

        assert!(base.overlay(&OverrideGrid::empty(10, 11)).is_err());
    }

    #[test]
    fn test_resolve_cell_precedence() {
        let colours = ColorTable::alternating(Colour::rgb(200, 0, 0), Colour::rgb(0, 0, 60));

        let plain = resolve_cell(face(1), &colours, None);
        assert_eq!(plain.fill, Colour::rgb(200, 0, 0));
        assert_eq!(plain.pip, Colour::WHITE);

        // Face override without fill picks the table colour for the new face
        let swapped = resolve_cell(face(1), &colours, Some(&OverrideCell::face(face(2))));
        assert_eq!(swapped.face, face(2));
        assert_eq!(swapped.fill, Colour::rgb(0, 0, 60));

        let explicit = OverrideCell {
            face: None,
            fill: Some(Colour::rgb(250, 250, 250)),
            pip: Some(Colour::rgb(0, 128, 0)),
        };
        let cell = resolve_cell(face(3), &colours, Some(&explicit));
        assert_eq!(cell.face, face(3));
        assert_eq!(cell.fill, Colour::rgb(250, 250, 250));
        assert_eq!(cell.pip, Colour::rgb(0, 128, 0));
    }

    #[test]
    fn test_view_rejects_mismatched_overrides() {
        let mosaic = sample_mosaic();
        let overrides = OverrideGrid::empty(11, 12);
        assert!(TileView::new(&mosaic, Some(&overrides)).is_err());
    }
}
