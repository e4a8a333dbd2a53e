//! Property-based tests for the trim and the simulation engine.

use proptest::prelude::*;

use qr_tetris::core::{find_markers, run, trim, Frame, GameField, Grid, Program, RunConfig, Shape};
use qr_tetris::types::{Instruction, PieceKind};

fn piece_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

/// Random rectangular shape up to 4x4
fn shape() -> impl Strategy<Value = Shape> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::collection::vec(any::<bool>(), w), h)
            .prop_map(|rows| Shape::from_rows(&rows).unwrap())
    })
}

/// Random square grid
fn grid(min: usize, max: usize) -> impl Strategy<Value = Grid> {
    (min..=max).prop_flat_map(|n| {
        prop::collection::vec(any::<bool>(), n * n)
            .prop_map(move |cells| Grid::from_cells(n, cells).unwrap())
    })
}

/// Grid with a bottom-anchored stack of the given height in each column
fn stacks(size: usize, heights: &[usize]) -> Grid {
    let mut grid = Grid::new(size);
    for (x, &h) in heights.iter().enumerate() {
        for y in size - h..size {
            grid.set(x as i32, y as i32, true);
        }
    }
    grid
}

fn instruction() -> impl Strategy<Value = Instruction> {
    prop_oneof![
        piece_kind().prop_map(Instruction::Spawn),
        (1u32..4).prop_map(Instruction::Down),
        (1u32..4).prop_map(Instruction::Left),
        (1u32..4).prop_map(Instruction::Right),
        (1u8..=4).prop_map(Instruction::Rotate),
        Just(Instruction::Drop),
    ]
}

proptest! {
    /// Four quarter turns are the identity for any rectangle.
    #[test]
    fn rotation_has_order_four(mut s in shape()) {
        let original = s.clone();
        s.rotate(4);
        prop_assert_eq!(s, original);
    }

    /// Rotation swaps the dimensions and keeps the cell count.
    #[test]
    fn rotation_swaps_dimensions(s in shape()) {
        let mut turned = s.clone();
        turned.rotate_cw();
        prop_assert_eq!((turned.width(), turned.height()), (s.height(), s.width()));
        prop_assert_eq!(turned.filled_cells().count(), s.filled_cells().count());
    }

    /// Clockwise then counter-clockwise turns of the whole code cancel out.
    #[test]
    fn grid_turns_cancel(g in grid(1, 12)) {
        prop_assert_eq!(g.rotated(true).rotated(false), g.clone());
        prop_assert_eq!(g.rotated(true).filled_count(), g.filled_count());
    }

    /// The trim only clears cells, and trimming twice changes nothing.
    #[test]
    fn trim_is_subtractive_and_idempotent(g in grid(9, 30)) {
        let markers = find_markers(&g);
        prop_assume!(matches!(markers, Ok(m) if m.start < m.finish));

        let once = trim(&g).unwrap();
        for (after, before) in once.grid.cells().iter().zip(g.cells()) {
            prop_assert!(!after || *before);
        }

        let twice = trim(&once.grid).unwrap();
        prop_assert_eq!(twice.markers, once.markers);
        prop_assert_eq!(twice.grid, once.grid);
    }

    /// A square comes to rest on the taller of the two stacks under it.
    #[test]
    fn square_lands_on_tallest_stack(
        size in 6usize..20,
        seed in prop::collection::vec(0usize..100, 20),
    ) {
        let heights: Vec<usize> = seed.iter().take(size).map(|h| h % (size - 1)).collect();
        let mut field = GameField::new(stacks(size, &heights), RunConfig::default());
        field.spawn(PieceKind::Square).unwrap();
        let before = field.settled().filled_count();

        let mut frames: Vec<Frame> = Vec::new();
        let steps = field.drop(&mut frames).unwrap();

        let x = size / 2;
        let top = (size - heights[x]).min(size - heights[x + 1]);
        let expected = top - 2;
        prop_assert_eq!(field.active().unwrap().position.y, expected as i32);
        prop_assert_eq!(steps, expected);
        prop_assert_eq!(field.settled().filled_count(), before + 4);
    }

    /// Over gap-free stacks a blocked probe stays blocked for every lower row.
    #[test]
    fn probe_stays_blocked_over_stacks(
        size in 8usize..16,
        seed in prop::collection::vec(0usize..100, 16),
        kind in piece_kind(),
        turns in 0u8..4,
    ) {
        let heights: Vec<usize> = seed.iter().take(size).map(|h| h % size).collect();
        let config = RunConfig::new().with_spawn_check(false);
        let mut field = GameField::new(stacks(size, &heights), config);
        field.spawn(kind).unwrap();
        if turns > 0 {
            field.rotate(turns);
        }
        let height = field.active().unwrap().shape.height();

        let mut blocked = false;
        for y in 0..=(size - height) {
            if y > 0 {
                field.move_down(1);
            }
            let free = field.collision_probe().unwrap();
            prop_assert!(!(blocked && free), "probe reopened at y = {}", y);
            blocked |= !free;
        }
        prop_assert!(blocked);
    }

    /// Any program either runs or fails with an error; it never panics,
    /// and a successful run reports every frame it emitted.
    #[test]
    fn random_programs_never_panic(
        instructions in prop::collection::vec(instruction(), 0..20),
        config_check in any::<bool>(),
    ) {
        let program = Program::new(instructions);
        let config = RunConfig::new().with_spawn_check(config_check);
        let mut frames: Vec<Frame> = Vec::new();
        if let Ok((_, summary)) = run(Grid::new(12), &program, config, &mut frames) {
            prop_assert_eq!(summary.frames, frames.len());
        }
    }
}
