//! Game field - the grid simulation engine
//!
//! The field owns the *settled* grid (the trimmed code plus every locked
//! piece) and at most one active piece. Rendering never writes to the settled
//! grid; it builds a working copy with the active piece OR-ed in.
//!
//! # Piece lifecycle
//!
//! ```text
//! spawn ──> Spawned ──move/rotate──> Falling ──drop──> Locked
//!              └──────────── next spawn locks in place ───┘
//! ```
//!
//! Moves are not bounds- or collision-checked. A piece pushed off the grid is
//! reported as [`CoreError::OutOfBounds`] the next time it is probed, drawn or
//! locked.

use crate::config::RunConfig;
use crate::error::{CoreError, Result};
use crate::frame::{Frame, FrameSink};
use crate::grid::Grid;
use crate::pieces::Shape;
use crate::types::{Instruction, PieceKind, Position};

/// Where the active piece is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    /// Just placed at the spawn position
    Spawned,
    /// Moved or rotated at least once
    Falling,
    /// Baked into the settled grid
    Locked,
}

/// The piece currently controlled by the program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub position: Position,
    pub state: PieceState,
}

impl ActivePiece {
    /// Still movable (not locked yet)
    pub fn is_live(&self) -> bool {
        self.state != PieceState::Locked
    }

    /// Grid coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.filled_cells().map(move |(row, col)| {
            (
                self.position.x.saturating_add(col as i32),
                self.position.y.saturating_add(row as i32),
            )
        })
    }
}

/// Grid simulation engine
#[derive(Debug, Clone)]
pub struct GameField {
    settled: Grid,
    active: Option<ActivePiece>,
    config: RunConfig,
    locked_pieces: usize,
}

impl GameField {
    /// Seed the settled grid with `grid`
    pub fn new(grid: Grid, config: RunConfig) -> Self {
        Self {
            settled: grid,
            active: None,
            config,
            locked_pieces: 0,
        }
    }

    pub fn settled(&self) -> &Grid {
        &self.settled
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Number of pieces baked into the settled grid so far
    pub fn locked_pieces(&self) -> usize {
        self.locked_pieces
    }

    /// Column where pieces appear
    pub fn spawn_position(&self) -> Position {
        Position::new((self.settled.size() / 2) as i32, 0)
    }

    /// Bring in a fresh copy of `kind` at the top middle
    ///
    /// A previous piece that is still live is locked where it stands first.
    pub fn spawn(&mut self, kind: PieceKind) -> Result<()> {
        if self.active.as_ref().is_some_and(ActivePiece::is_live) {
            self.lock()?;
        }

        let piece = ActivePiece {
            kind,
            shape: Shape::template(kind),
            position: self.spawn_position(),
            state: PieceState::Spawned,
        };

        if self.config.spawn_check {
            let blocked = piece
                .cells()
                .any(|(x, y)| self.settled.get(x, y).unwrap_or(true));
            if blocked {
                return Err(CoreError::SpawnBlocked {
                    kind,
                    x: piece.position.x,
                    y: piece.position.y,
                });
            }
        }

        tracing::info!(%kind, position = %piece.position, "spawned piece");
        self.active = Some(piece);
        Ok(())
    }

    /// Live piece, marked as falling; None (with a warning) otherwise
    fn live_piece_mut(&mut self, verb: &str) -> Option<&mut ActivePiece> {
        match self.active.as_mut() {
            Some(piece) if piece.is_live() => {
                piece.state = PieceState::Falling;
                Some(piece)
            }
            _ => {
                tracing::warn!(verb, "no live piece, instruction ignored");
                None
            }
        }
    }

    fn shift(&mut self, verb: &str, dx: i32, dy: i32) {
        if let Some(piece) = self.live_piece_mut(verb) {
            piece.position = piece.position.offset(dx, dy);
            tracing::debug!(verb, position = %piece.position, "moved piece");
        }
    }

    pub fn move_down(&mut self, step: u32) {
        self.shift("down", 0, step_delta(step));
    }

    pub fn move_left(&mut self, step: u32) {
        self.shift("left", -step_delta(step), 0);
    }

    pub fn move_right(&mut self, step: u32) {
        self.shift("right", step_delta(step), 0);
    }

    /// Rotate clockwise by `angle` quarter turns (clamped to 1..=4)
    pub fn rotate(&mut self, angle: u8) {
        if let Some(piece) = self.live_piece_mut("rotate") {
            piece.shape.rotate(angle);
            tracing::debug!(angle, "rotated piece");
        }
    }

    /// Whether the active piece may fall one more row
    ///
    /// False when an empty cell of the piece's bounding box sits on a settled
    /// cell, when a filled cell of the bottom row has a settled cell right
    /// below it, or when the bottom row rests on the grid floor. A missing or
    /// locked piece cannot fall.
    pub fn collision_probe(&self) -> Result<bool> {
        let piece = match self.active.as_ref() {
            Some(piece) if piece.is_live() => piece,
            _ => return Ok(false),
        };
        let Position { x, y } = piece.position;
        let (m, n) = (piece.shape.height() as i32, piece.shape.width() as i32);

        for i in 0..m {
            for j in 0..n {
                let settled = self.settled_at(x.saturating_add(j), y.saturating_add(i))?;
                if settled && !piece.shape.is_filled(i as usize, j as usize) {
                    return Ok(false);
                }
            }
        }

        let below = y.saturating_add(m);
        if below == self.settled.size() as i32 {
            return Ok(false);
        }
        for j in 0..n {
            let settled = self.settled_at(x.saturating_add(j), below)?;
            if settled && piece.shape.is_filled((m - 1) as usize, j as usize) {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn settled_at(&self, x: i32, y: i32) -> Result<bool> {
        self.settled.get(x, y).ok_or(CoreError::OutOfBounds {
            x,
            y,
            size: self.settled.size(),
        })
    }

    /// Let the piece fall one row at a time while the probe allows it
    ///
    /// Each step emits a fast frame. The piece is locked afterwards; no
    /// regular frame follows. Returns the number of frames emitted.
    pub fn drop(&mut self, sink: &mut dyn FrameSink) -> Result<usize> {
        if self.live_piece_mut("drop").is_none() {
            return Ok(0);
        }

        let mut frames = 0;
        while self.collision_probe()? {
            self.move_down(1);
            self.emit(true, sink)?;
            frames += 1;
        }
        self.lock()?;
        Ok(frames)
    }

    /// Bake the live piece into the settled grid
    ///
    /// Returns false when there was nothing to lock.
    pub fn lock(&mut self) -> Result<bool> {
        let piece = match self.active.as_mut() {
            Some(piece) if piece.is_live() => piece,
            _ => return Ok(false),
        };

        let size = self.settled.size();
        if let Some((x, y)) = piece.cells().find(|&(x, y)| !self.settled.contains(x, y)) {
            return Err(CoreError::OutOfBounds { x, y, size });
        }
        for (x, y) in piece.cells() {
            self.settled.set(x, y, true);
        }

        piece.state = PieceState::Locked;
        self.locked_pieces += 1;
        tracing::info!(kind = %piece.kind, position = %piece.position, "locked piece");
        Ok(true)
    }

    /// Settled grid with the live piece OR-ed in
    pub fn working_grid(&self) -> Result<Grid> {
        let mut grid = self.settled.clone();
        if let Some(piece) = self.active.as_ref().filter(|p| p.is_live()) {
            for (x, y) in piece.cells() {
                if !grid.set(x, y, true) {
                    return Err(CoreError::OutOfBounds {
                        x,
                        y,
                        size: grid.size(),
                    });
                }
            }
        }
        Ok(grid)
    }

    /// Working grid paired with the display interval for its kind
    pub fn render(&self, fast: bool) -> Result<Frame> {
        Ok(Frame {
            grid: self.working_grid()?,
            duration: self.config.interval_for(fast),
            fast,
        })
    }

    fn emit(&self, fast: bool, sink: &mut dyn FrameSink) -> Result<()> {
        let frame = self.render(fast)?;
        sink.accept(&frame).map_err(CoreError::Sink)
    }

    /// Emit a regular frame of the current state
    pub fn emit_frame(&self, sink: &mut dyn FrameSink) -> Result<()> {
        self.emit(false, sink)
    }

    /// Apply one instruction and emit its frames
    ///
    /// Every verb renders one regular frame afterwards except `drop`, which
    /// renders a fast frame per step instead. Returns the number of frames.
    pub fn execute(&mut self, instruction: Instruction, sink: &mut dyn FrameSink) -> Result<usize> {
        match instruction {
            Instruction::Spawn(kind) => self.spawn(kind)?,
            Instruction::Down(step) => self.move_down(step),
            Instruction::Left(step) => self.move_left(step),
            Instruction::Right(step) => self.move_right(step),
            Instruction::Rotate(angle) => self.rotate(angle),
            Instruction::Drop => return self.drop(sink),
        }
        self.emit(false, sink)?;
        Ok(1)
    }
}

fn step_delta(step: u32) -> i32 {
    i32::try_from(step.max(1)).unwrap_or(i32::MAX)
}
