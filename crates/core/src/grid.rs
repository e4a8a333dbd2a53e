//! Grid module - square boolean module matrix
//!
//! A grid holds the dark/light modules of a QR code, later overlaid with
//! falling pieces. Storage is a flat row-major vector.
//! Coordinates: (x, y) where x is the column and y the row, both from the
//! top-left corner. `true` means a filled (dark) module.

use std::fmt;

use crate::error::{CoreError, Result};

/// Square grid of filled/empty modules
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    /// Row-major cells (y * size + x)
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-empty grid of side `size`
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Build from a flat row-major vector of `size * size` cells
    pub fn from_cells(size: usize, cells: Vec<bool>) -> Result<Self> {
        if cells.len() != size * size {
            return Err(CoreError::NotSquare {
                rows: size,
                row: cells.len() / size.max(1),
                cols: cells.len() % size.max(1),
            });
        }
        Ok(Self { size, cells })
    }

    /// Build from rows; every row must be as long as there are rows
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(CoreError::NotSquare {
                    rows: size,
                    row: y,
                    cols: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }
        Ok(Self { size, cells })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.size || y as usize >= self.size {
            return None;
        }
        Some((y as usize) * self.size + (x as usize))
    }

    /// Side length (module count)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether (x, y) lies inside the grid
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// Get cell at (x, y); None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<bool> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y); returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, filled: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = filled;
                true
            }
            None => false,
        }
    }

    /// Check if (x, y) is inside the grid and filled
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(true))
    }

    /// Borrow row `y`
    ///
    /// Panics if `y` is out of range, like slice indexing.
    pub fn row(&self, y: usize) -> &[bool] {
        let start = y * self.size;
        &self.cells[start..start + self.size]
    }

    /// Iterate over rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.size.max(1)).take(self.size)
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Convert to nested rows for tests and display
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows().map(<[bool]>::to_vec).collect()
    }

    /// Quarter-turn the whole grid
    ///
    /// Clockwise moves the cell at (x, y) to (n - 1 - y, x).
    pub fn rotated(&self, clockwise: bool) -> Self {
        let n = self.size;
        let mut out = Self::new(n);
        for y in 0..n {
            for x in 0..n {
                let (dst_x, dst_y) = if clockwise {
                    (n - 1 - y, x)
                } else {
                    (y, n - 1 - x)
                };
                out.cells[dst_y * n + dst_x] = self.cells[y * n + x];
            }
        }
        out
    }
}

/// One line per row, `#` for filled and `.` for empty
impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid({}x{})", self.size, self.size)?;
        for row in self.rows() {
            let line: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
