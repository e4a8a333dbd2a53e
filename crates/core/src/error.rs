//! Error types for the simulation core

use thiserror::Error;

use crate::types::PieceKind;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Boxed error returned by a [`FrameSink`](crate::frame::FrameSink)
pub type SinkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which end of row 0 a marker scan started from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanSide {
    Left,
    Right,
}

impl std::fmt::Display for ScanSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanSide::Left => f.write_str("left"),
            ScanSide::Right => f.write_str("right"),
        }
    }
}

/// Errors that can occur while trimming, parsing or simulating
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input rows do not form a square matrix
    #[error("grid is not square: {rows} rows, row {row} has {cols} cells")]
    NotSquare { rows: usize, row: usize, cols: usize },

    /// Piece rows do not form a rectangle
    #[error("piece shape is not rectangular: row {row} has {cols} cells, expected {width}")]
    RaggedShape { width: usize, row: usize, cols: usize },

    /// Row-0 marker scan walked off the grid
    #[error("marker not found: {side} scan of row 0 ran off the edge of a {size}-module grid")]
    MarkerNotFound { side: ScanSide, size: usize },

    /// Curve control points do not have three distinct x values
    #[error("singular curve fit: control points {points:?} do not have distinct x values")]
    SingularCurveFit { points: [(f64, f64); 3] },

    /// Program line with a verb outside the instruction set
    #[error("unknown instruction `{verb}` on program line {line}")]
    UnknownInstruction { line: usize, verb: String },

    /// Piece footprint reaches outside the grid
    #[error("piece cell ({x}, {y}) is outside the {size}x{size} grid")]
    OutOfBounds { x: i32, y: i32, size: usize },

    /// Freshly spawned piece leaves the grid or overlaps settled cells
    #[error("cannot spawn {kind} at ({x}, {y}): start position is not free")]
    SpawnBlocked { kind: PieceKind, x: i32, y: i32 },

    /// Frame consumer failed
    #[error("frame sink failed: {0}")]
    Sink(#[source] SinkError),

    /// Instruction failed during a run; `index` counts from 1
    #[error("instruction #{index} `{instruction}` failed: {source}")]
    Instruction {
        index: usize,
        instruction: String,
        #[source]
        source: Box<CoreError>,
    },
}
