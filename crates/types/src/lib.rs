//! Shared types module - piece names, positions, instructions and constants
//!
//! Everything here is plain data with no external dependencies so it can be
//! used by the simulation core, the terminal preview and the GIF recorder alike.
//!
//! # Coordinates
//!
//! Grids are square with side `n` (the QR module count):
//!
//! - **x**: column, 0 at the left edge
//! - **y**: row, 0 at the top edge
//! - A piece [`Position`] is the grid coordinate of the piece's top-left corner
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_INTERVAL_MS` | 500 | Display time of a regular frame |
//! | `DEFAULT_FAST_INTERVAL_MS` | 100 | Display time of a drop step |
//!
//! # Examples
//!
//! ```
//! use qr_tetris_types::{Instruction, PieceKind};
//!
//! // Parse a piece name (case-insensitive)
//! assert_eq!(PieceKind::from_str("Z_REVERSED"), Some(PieceKind::ZReversed));
//! assert_eq!(PieceKind::from_str("l"), None);
//!
//! // Instructions print back in program syntax
//! assert_eq!(Instruction::Down(3).to_string(), "down 3");
//! assert_eq!(Instruction::Spawn(PieceKind::T).to_string(), "spawn t");
//! ```

use std::fmt;

/// Display time of a regular frame in milliseconds
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Display time of a single drop step in milliseconds
pub const DEFAULT_FAST_INTERVAL_MS: u64 = 100;

/// The apex of the trim curve sits `n / CURVE_DEPTH_DIVISOR` rows above the code
pub const CURVE_DEPTH_DIVISOR: usize = 3;

/// Largest rotation angle accepted by `rotate` (four quarter turns)
pub const MAX_ROTATION_ANGLE: u8 = 4;

/// The fixed catalog of falling pieces
///
/// - **Square**: 2x2 block
/// - **T**: three across with one hanging below the middle
/// - **Z**: two across, then two across shifted right
/// - **ZReversed**: mirror image of Z
/// - **I**: four across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceKind {
    #[default]
    Square,
    T,
    Z,
    ZReversed,
    I,
}

impl PieceKind {
    /// Every catalog entry, in catalog order
    pub const ALL: [PieceKind; 5] = [
        PieceKind::Square,
        PieceKind::T,
        PieceKind::Z,
        PieceKind::ZReversed,
        PieceKind::I,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use qr_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("square"), Some(PieceKind::Square));
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("z_reversed"), Some(PieceKind::ZReversed));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" => Some(PieceKind::Square),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            "z_reversed" => Some(PieceKind::ZReversed),
            "i" => Some(PieceKind::I),
            _ => None,
        }
    }

    /// Convert to the lowercase name used in programs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Square => "square",
            PieceKind::T => "t",
            PieceKind::Z => "z",
            PieceKind::ZReversed => "z_reversed",
            PieceKind::I => "i",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-left corner of a piece in grid coordinates
///
/// Signed so that a script can push a piece past the left or top edge; the
/// engine reports that as an out-of-bounds error instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position shifted by (dx, dy), saturating at the i32 range
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One step of an animation program
///
/// Arguments are already normalised: steps are at least 1 and rotation
/// angles are in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Bring a fresh copy of a catalog piece in at the top middle
    Spawn(PieceKind),
    /// Move the piece down by the given number of rows
    Down(u32),
    /// Move the piece left by the given number of columns
    Left(u32),
    /// Move the piece right by the given number of columns
    Right(u32),
    /// Rotate the piece clockwise by the given number of quarter turns
    Rotate(u8),
    /// Let the piece fall until it is blocked, then lock it
    Drop,
}

impl Instruction {
    /// Program verb of this instruction
    pub fn verb(&self) -> &'static str {
        match self {
            Instruction::Spawn(_) => "spawn",
            Instruction::Down(_) => "down",
            Instruction::Left(_) => "left",
            Instruction::Right(_) => "right",
            Instruction::Rotate(_) => "rotate",
            Instruction::Drop => "drop",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Spawn(kind) => write!(f, "spawn {kind}"),
            Instruction::Down(step) => write!(f, "down {step}"),
            Instruction::Left(step) => write!(f, "left {step}"),
            Instruction::Right(step) => write!(f, "right {step}"),
            Instruction::Rotate(angle) => write!(f, "rotate {angle}"),
            Instruction::Drop => f.write_str("drop"),
        }
    }
}
