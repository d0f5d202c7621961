//! The generated face grid.

use std::sync::Arc;

use super::FaceValue;

/// An immutable `rows x cols` matrix of face values.
///
/// Cells are stored row-major behind an `Arc`, so clones are cheap and
/// a grid handed to a reader can never change underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Arc<[FaceValue]>,
}

impl Grid {
    /// Build a grid from row-major cells.
    ///
    /// Returns `None` if `cells.len() != rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<FaceValue>) -> Option<Self> {
        if cells.len() != rows * cols {
            return None;
        }
        Some(Self {
            rows,
            cols,
            cells: cells.into(),
        })
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

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Face at a position, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<FaceValue> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[FaceValue] {
        &self.cells
    }

    /// Iterate `(row, col, face)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, FaceValue)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &face)| (i / cols, i % cols, face))
    }
}
