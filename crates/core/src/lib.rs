//! Core simulation module - pure, deterministic, and testable
//!
//! This crate holds everything with real logic in it: the curve trim that
//! carves a bowl into a QR code, and the engine that drops pieces into it.
//! It does no I/O; frames leave through the [`FrameSink`] trait.
//!
//! # Module Structure
//!
//! - [`grid`]: square boolean module matrix
//! - [`pieces`]: catalog shapes and quarter-turn rotation
//! - [`trim`]: marker scan, quadratic fit and the trim itself
//! - [`field`]: the grid simulation engine (spawn, move, rotate, drop, lock)
//! - [`program`]: script parsing into [`Instruction`](types::Instruction)s
//! - [`runner`]: runs a whole program and reports a summary
//! - [`frame`]: rendered frames and frame sinks
//!
//! # Example
//!
//! ```
//! use qr_tetris_core::{run, Frame, Grid, Program, RunConfig};
//!
//! // A 2x2 square dropped on an empty 10x10 grid lands on the floor.
//! let program = Program::parse("spawn square; drop").unwrap();
//! let mut frames: Vec<Frame> = Vec::new();
//! let (field, summary) = run(Grid::new(10), &program, RunConfig::default(), &mut frames).unwrap();
//!
//! assert_eq!(field.active().unwrap().position.y, 8);
//! assert_eq!(summary.locked_pieces, 1);
//! assert_eq!(field.settled().filled_count(), 4);
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod frame;
pub mod grid;
pub mod pieces;
pub mod program;
pub mod runner;
pub mod trim;

pub use qr_tetris_types as types;

// Re-export commonly used types for convenience
pub use config::RunConfig;
pub use error::{CoreError, Result, ScanSide, SinkError};
pub use field::{ActivePiece, GameField, PieceState};
pub use frame::{Fanout, Frame, FrameCounter, FrameSink};
pub use grid::Grid;
pub use pieces::Shape;
pub use program::{Program, DEMO_PROGRAM};
pub use runner::{run, RunSummary};
pub use trim::{control_points, find_markers, fit_quadratic, trim, trim_in_place, CurveCut, Markers, Quadratic};
