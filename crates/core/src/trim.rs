//! Curve trim - carves a parabolic bowl into the top of a code
//!
//! The two row-0 markers sit just inside the finder patterns. A quadratic is
//! fitted through both markers at height 0 and through their midpoint at
//! height `-n / 3`, which gives an upward-opening parabola dipping into the
//! code. Every cell (col j, row i) with `y(j) < -i` lies inside the bowl and is
//! cleared; the finder shoulders on either side are kept.
//!
//! ```
//! use qr_tetris_core::{trim, Grid};
//!
//! // Finder-like runs of three at both ends of row 0, data in between.
//! let mut grid = Grid::new(9);
//! for y in 0..9 {
//!     for x in 0..9 {
//!         grid.set(x, y, true);
//!     }
//! }
//! grid.set(3, 0, false);
//! grid.set(5, 0, false);
//!
//! let cut = trim(&grid).unwrap();
//! assert_eq!((cut.markers.start, cut.markers.finish), (3, 5));
//! assert!(!cut.grid.is_filled(4, 0));
//! assert!(cut.grid.is_filled(0, 0));
//! ```

use crate::error::{CoreError, Result, ScanSide};
use crate::grid::Grid;
use crate::types::CURVE_DEPTH_DIVISOR;

/// Pivot magnitudes below this are treated as zero
const PIVOT_EPSILON: f64 = 1e-12;

/// Row-0 columns bounding the bowl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub start: usize,
    pub finish: usize,
}

/// `y = a·x² + b·x + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Quadratic {
    pub fn eval(&self, x: f64) -> f64 {
        self.a * x * x + self.b * x + self.c
    }
}

/// Result of trimming a grid
#[derive(Debug, Clone, PartialEq)]
pub struct CurveCut {
    pub grid: Grid,
    pub markers: Markers,
    pub curve: Quadratic,
}

/// Locate the two row-0 markers
///
/// From the left, advance while the current and next cells are both filled,
/// then step one further. The right side mirrors this.
pub fn find_markers(grid: &Grid) -> Result<Markers> {
    let n = grid.size();
    if n < 2 {
        return Err(CoreError::MarkerNotFound {
            side: ScanSide::Left,
            size: n,
        });
    }
    let row = grid.row(0);

    let mut s = 0;
    while row[s] && row[s + 1] {
        s += 1;
        if s + 1 >= n {
            return Err(CoreError::MarkerNotFound {
                side: ScanSide::Left,
                size: n,
            });
        }
    }

    let mut f = n - 1;
    while row[f] && row[f - 1] {
        f -= 1;
        if f == 0 {
            return Err(CoreError::MarkerNotFound {
                side: ScanSide::Right,
                size: n,
            });
        }
    }

    Ok(Markers {
        start: s + 1,
        finish: f - 1,
    })
}

/// The three points the curve passes through
///
/// Depth uses integer division, so a 21-module code bows 7 rows up.
pub fn control_points(markers: Markers, size: usize) -> [(f64, f64); 3] {
    let depth = (size / CURVE_DEPTH_DIVISOR) as f64;
    let (s, f) = (markers.start as f64, markers.finish as f64);
    [(s, 0.0), (f, 0.0), ((s + f) / 2.0, -depth)]
}

/// Solve for the quadratic through three points
pub fn fit_quadratic(points: [(f64, f64); 3]) -> Result<Quadratic> {
    let mut m = [[0.0f64; 4]; 3];
    for (row, &(x, y)) in m.iter_mut().zip(points.iter()) {
        *row = [x * x, x, 1.0, y];
    }

    // Gaussian elimination with partial pivoting on the augmented matrix.
    for col in 0..3 {
        let pivot = (col..3)
            .max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))
            .unwrap_or(col);
        if m[pivot][col].abs() < PIVOT_EPSILON {
            return Err(CoreError::SingularCurveFit { points });
        }
        m.swap(col, pivot);
        for row in col + 1..3 {
            let factor = m[row][col] / m[col][col];
            for k in col..4 {
                m[row][k] -= factor * m[col][k];
            }
        }
    }

    let mut coef = [0.0f64; 3];
    for row in (0..3).rev() {
        let tail: f64 = (row + 1..3).map(|k| m[row][k] * coef[k]).sum();
        coef[row] = (m[row][3] - tail) / m[row][row];
    }

    Ok(Quadratic {
        a: coef[0],
        b: coef[1],
        c: coef[2],
    })
}

/// Clear every cell below the curve, in place
pub fn trim_in_place(grid: &mut Grid) -> Result<(Markers, Quadratic)> {
    let markers = find_markers(grid)?;
    let points = control_points(markers, grid.size());
    let curve = fit_quadratic(points)?;
    tracing::debug!(
        start = markers.start,
        finish = markers.finish,
        a = curve.a,
        b = curve.b,
        c = curve.c,
        "fitted trim curve"
    );

    let n = grid.size() as i32;
    let mut cleared = 0usize;
    for i in 0..n {
        for j in 0..n {
            if curve.eval(j as f64) < -(i as f64) && grid.is_filled(j, i) {
                grid.set(j, i, false);
                cleared += 1;
            }
        }
    }
    tracing::debug!(cleared, "trimmed grid");

    Ok((markers, curve))
}

/// Trim a copy of `grid`; the input is left untouched
pub fn trim(grid: &Grid) -> Result<CurveCut> {
    let mut out = grid.clone();
    let (markers, curve) = trim_in_place(&mut out)?;
    Ok(CurveCut {
        grid: out,
        markers,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row0_grid(row0: &[bool]) -> Grid {
        let mut grid = Grid::new(row0.len());
        for (x, &c) in row0.iter().enumerate() {
            grid.set(x as i32, 0, c);
        }
        grid
    }

    #[test]
    fn markers_step_past_the_finder_runs() {
        // ###.#.###
        let grid = row0_grid(&[
            true, true, true, false, true, false, true, true, true,
        ]);
        let m = find_markers(&grid).unwrap();
        assert_eq!(m, Markers { start: 3, finish: 5 });
    }

    #[test]
    fn markers_on_empty_row_start_one_in() {
        let grid = Grid::new(6);
        let m = find_markers(&grid).unwrap();
        assert_eq!(m, Markers { start: 1, finish: 4 });
    }

    #[test]
    fn fully_filled_row_has_no_markers() {
        let grid = row0_grid(&[true; 8]);
        let err = find_markers(&grid).unwrap_err();
        assert!(matches!(
            err,
            CoreError::MarkerNotFound {
                side: ScanSide::Left,
                size: 8
            }
        ));
    }

    #[test]
    fn tiny_grid_has_no_markers() {
        assert!(find_markers(&Grid::new(1)).is_err());
        assert!(find_markers(&Grid::new(0)).is_err());
    }

    #[test]
    fn control_points_use_integer_depth() {
        let pts = control_points(Markers { start: 7, finish: 13 }, 21);
        assert_eq!(pts, [(7.0, 0.0), (13.0, 0.0), (10.0, -7.0)]);
        let pts = control_points(Markers { start: 2, finish: 8 }, 11);
        assert_eq!(pts[2], (5.0, -3.0));
    }

    #[test]
    fn fit_recovers_known_parabola() {
        // y = 2x² - 3x + 1
        let q = fit_quadratic([(0.0, 1.0), (1.0, 0.0), (3.0, 10.0)]).unwrap();
        assert!((q.a - 2.0).abs() < 1e-9);
        assert!((q.b + 3.0).abs() < 1e-9);
        assert!((q.c - 1.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_x_is_singular() {
        let err = fit_quadratic([(4.0, 0.0), (4.0, 0.0), (4.0, -3.0)]).unwrap_err();
        assert!(matches!(err, CoreError::SingularCurveFit { .. }));
    }

    #[test]
    fn trim_keeps_input_untouched() {
        let mut grid = Grid::new(9);
        for y in 0..9 {
            for x in 0..9 {
                grid.set(x, y, true);
            }
        }
        grid.set(3, 0, false);
        grid.set(5, 0, false);
        let before = grid.clone();
        let cut = trim(&grid).unwrap();
        assert_eq!(grid, before);
        assert!(cut.grid.filled_count() < before.filled_count());
    }
}
