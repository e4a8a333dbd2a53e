//! Program module - parses animation scripts into instructions
//!
//! A program is one instruction per line; `;` also separates instructions so
//! a whole script fits in a single command-line argument. Each instruction is
//! a verb followed by whitespace-separated arguments:
//!
//! | Verb | Argument | Default |
//! |------|----------|---------|
//! | `spawn` | piece name | `square` |
//! | `down`, `left`, `right` | step, at least 1 | 1 |
//! | `rotate` | quarter turns, 1 to 4 | 1 |
//! | `drop` | - | - |
//!
//! Verbs and piece names match regardless of case. Bad arguments fall back to
//! the default so a typo does not abort a long script. An unknown verb does
//! abort parsing.
//!
//! ```
//! use qr_tetris_core::Program;
//! use qr_tetris_core::types::{Instruction, PieceKind};
//!
//! let program = Program::parse("spawn T; left 2\nrotate 9\n\ndrop").unwrap();
//! assert_eq!(program.instructions(), &[
//!     Instruction::Spawn(PieceKind::T),
//!     Instruction::Left(2),
//!     Instruction::Rotate(4),
//!     Instruction::Drop,
//! ]);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};
use crate::types::{Instruction, PieceKind, MAX_ROTATION_ANGLE};

/// Source text of [`Program::demo`]
pub const DEMO_PROGRAM: &str = "spawn z; down; left; down; left; rotate 1; drop";

/// Ordered list of parsed instructions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Parse a whole script
    ///
    /// Line numbers in errors count the non-blank instructions from 1.
    pub fn parse(source: &str) -> Result<Self> {
        let instructions = source
            .split(['\n', ';'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(idx, line)| parse_instruction(line, idx + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { instructions })
    }

    /// The built-in demo script
    pub fn demo() -> Self {
        Self::new(vec![
            Instruction::Spawn(PieceKind::Z),
            Instruction::Down(1),
            Instruction::Left(1),
            Instruction::Down(1),
            Instruction::Left(1),
            Instruction::Rotate(1),
            Instruction::Drop,
        ])
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl FromStr for Program {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        Ok(())
    }
}

/// Parse one non-blank line
pub fn parse_instruction(line: &str, line_no: usize) -> Result<Instruction> {
    let mut tokens = line.split_whitespace();
    let verb = tokens.next().unwrap_or_default();
    let arg = tokens.next();

    let instruction = match verb.to_lowercase().as_str() {
        "spawn" => Instruction::Spawn(parse_piece(arg)),
        "down" => Instruction::Down(parse_step(arg)),
        "left" => Instruction::Left(parse_step(arg)),
        "right" => Instruction::Right(parse_step(arg)),
        "rotate" => Instruction::Rotate(parse_angle(arg)),
        "drop" => Instruction::Drop,
        _ => {
            return Err(CoreError::UnknownInstruction {
                line: line_no,
                verb: verb.to_string(),
            })
        }
    };
    Ok(instruction)
}

/// Piece name, square when missing or unknown
pub fn parse_piece(arg: Option<&str>) -> PieceKind {
    match arg {
        None => PieceKind::default(),
        Some(name) => PieceKind::from_str(name).unwrap_or_else(|| {
            tracing::warn!(name, "unknown piece, using square");
            PieceKind::default()
        }),
    }
}

/// Step count, at least 1; 1 when missing or not an integer
pub fn parse_step(arg: Option<&str>) -> u32 {
    match parse_int(arg) {
        Some(v) => v.clamp(1, u32::MAX as i64) as u32,
        None => 1,
    }
}

/// Rotation angle clamped to 1..=4; 1 when missing or not an integer
pub fn parse_angle(arg: Option<&str>) -> u8 {
    match parse_int(arg) {
        Some(v) => v.clamp(1, MAX_ROTATION_ANGLE as i64) as u8,
        None => 1,
    }
}

fn parse_int(arg: Option<&str>) -> Option<i64> {
    let raw = arg?;
    match raw.parse::<i64>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(arg = raw, "malformed argument, using default");
            None
        }
    }
}
