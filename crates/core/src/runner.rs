//! Runner - drives a whole program through a game field

use crate::config::RunConfig;
use crate::error::{CoreError, Result};
use crate::field::GameField;
use crate::frame::FrameSink;
use crate::grid::Grid;
use crate::program::Program;

/// What a finished run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub instructions: usize,
    pub frames: usize,
    pub locked_pieces: usize,
}

/// Run `program` on a field seeded with `grid`
///
/// One regular frame of the seeded grid is emitted before the first
/// instruction. A failing instruction aborts the run; the error carries its
/// text and its position in the program, counted from 1 like parse errors.
pub fn run(
    grid: Grid,
    program: &Program,
    config: RunConfig,
    sink: &mut dyn FrameSink,
) -> Result<(GameField, RunSummary)> {
    let mut field = GameField::new(grid, config);
    field.emit_frame(sink)?;
    let mut frames = 1;

    for (index, &instruction) in (1..).zip(program.iter()) {
        tracing::debug!(index, %instruction, "executing");
        frames += field
            .execute(instruction, sink)
            .map_err(|source| CoreError::Instruction {
                index,
                instruction: instruction.to_string(),
                source: Box::new(source),
            })?;
    }

    let summary = RunSummary {
        instructions: program.len(),
        frames,
        locked_pieces: field.locked_pieces(),
    };
    tracing::info!(
        instructions = summary.instructions,
        frames = summary.frames,
        locked = summary.locked_pieces,
        "program finished"
    );
    Ok((field, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;

    #[test]
    fn initial_frame_precedes_instructions() {
        let program = Program::parse("spawn square").unwrap();
        let mut frames: Vec<Frame> = Vec::new();
        let (_, summary) = run(Grid::new(6), &program, RunConfig::default(), &mut frames).unwrap();
        assert_eq!(summary.frames, 2);
        assert_eq!(frames[0].grid.filled_count(), 0);
        assert_eq!(frames[1].grid.filled_count(), 4);
    }

    #[test]
    fn failure_names_the_instruction() {
        let program = Program::parse("spawn square; left 9").unwrap();
        let mut frames: Vec<Frame> = Vec::new();
        let err = run(Grid::new(6), &program, RunConfig::default(), &mut frames).unwrap_err();
        match err {
            CoreError::Instruction {
                index,
                instruction,
                source,
            } => {
                assert_eq!(index, 2);
                assert_eq!(instruction, "left 9");
                assert!(matches!(*source, CoreError::OutOfBounds { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
