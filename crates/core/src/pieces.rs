//! Pieces module - catalog shapes and quarter-turn rotation
//!
//! Every catalog entry is a small rectangular boolean matrix. Templates are
//! `const` data and never handed out by reference: [`Shape::template`] builds
//! a fresh owned copy that the active piece may rotate freely.

use crate::error::{CoreError, Result};
use crate::types::{PieceKind, MAX_ROTATION_ANGLE};

const SQUARE: &[&[bool]] = &[&[true, true], &[true, true]];

const T: &[&[bool]] = &[&[true, true, true], &[false, true, false]];

const Z: &[&[bool]] = &[&[true, true, false], &[false, true, true]];

const Z_REVERSED: &[&[bool]] = &[&[false, true, true], &[true, true, false]];

const I: &[&[bool]] = &[&[true, true, true, true]];

fn template_rows(kind: PieceKind) -> &'static [&'static [bool]] {
    match kind {
        PieceKind::Square => SQUARE,
        PieceKind::T => T,
        PieceKind::Z => Z,
        PieceKind::ZReversed => Z_REVERSED,
        PieceKind::I => I,
    }
}

/// Owned rectangular piece matrix
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    width: usize,
    height: usize,
    /// Row-major cells (row * width + col)
    cells: Vec<bool>,
}

impl Shape {
    /// Fresh copy of a catalog template
    pub fn template(kind: PieceKind) -> Self {
        let rows = template_rows(kind);
        Self {
            width: rows.first().map_or(0, |r| r.len()),
            height: rows.len(),
            cells: rows.iter().flat_map(|r| r.iter().copied()).collect(),
        }
    }

    /// Build from rectangular rows
    ///
    /// Fails with [`CoreError::RaggedShape`] when a row differs in length
    /// from the first one.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, r) in rows.iter().enumerate() {
            let cols: &[bool] = r.as_ref();
            if cols.len() != width {
                return Err(CoreError::RaggedShape {
                    width,
                    row,
                    cols: cols.len(),
                });
            }
            cells.extend_from_slice(cols);
        }
        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the local cell at (`row`, `col`) is occupied
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Local (row, col) of every occupied cell, top to bottom
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| (i / self.width, i % self.width))
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(<[bool]>::to_vec)
            .collect()
    }

    /// One 90° clockwise turn
    ///
    /// An m x n matrix becomes n x m with `new[i][j] = old[m - j - 1][i]`.
    pub fn rotate_cw(&mut self) {
        let (m, n) = (self.height, self.width);
        let mut cells = vec![false; m * n];
        for i in 0..n {
            for j in 0..m {
                cells[i * m + j] = self.cells[(m - j - 1) * n + i];
            }
        }
        self.cells = cells;
        self.width = m;
        self.height = n;
    }

    /// `angle` clockwise quarter turns, with `angle` clamped to `1..=4`
    pub fn rotate(&mut self, angle: u8) {
        for _ in 0..angle.clamp(1, MAX_ROTATION_ANGLE) {
            self.rotate_cw();
        }
    }
}
