use crate::entities::Ant;
use crate::error::Result;
use crate::grid::{Color, Grid};
use crate::mirror::CellMirror;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Everything needed to resume the automaton: the ant, the black cells and
/// the number of steps taken across all runs so far.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub ant: Ant,
    pub grid: Grid,
    pub steps: u64,
}

impl SimulationState {
    pub fn new(ant: Ant, grid: Grid, steps: u64) -> Self {
        SimulationState { ant, grid, steps }
    }

    /// Advances the automaton by one step.
    ///
    /// On a white cell the ant turns right, on a black cell it turns left.
    /// The cell is flipped and mirrored before the ant moves forward, so the
    /// mirror always reflects the cell the ant just left.
    pub fn step(&mut self, mirror: &mut dyn CellMirror) -> Result<()> {
        let cell = self.ant.cell();

        match self.grid.flip(cell) {
            // The cell was white
            Color::Black => {
                self.ant.direction = self.ant.direction.clockwise();
                mirror.create(cell)?;
            }
            // The cell was black
            Color::White => {
                self.ant.direction = self.ant.direction.counter_clockwise();
                mirror.delete(cell)?;
            }
        }

        self.ant.advance();
        self.steps += 1;

        trace!(
            step = self.steps,
            x = self.ant.x,
            y = self.ant.y,
            direction = %self.ant.direction.code(),
            "ant moved"
        );

        Ok(())
    }

    /// Runs `steps` steps, stopping at the first mirror failure.
    pub fn run(&mut self, mirror: &mut dyn CellMirror, steps: u64) -> Result<u64> {
        for _ in 0..steps {
            self.step(mirror)?;
        }

        Ok(steps)
    }

    /// Number of black cells on the grid.
    pub fn black_cells(&self) -> usize {
        self.grid.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Heading;
    use crate::grid::Cell;
    use crate::mirror::NoOpCellMirror;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeSet;

    #[derive(Debug, PartialEq)]
    enum MirrorOp {
        Create(Cell),
        Delete(Cell),
    }

    #[derive(Default)]
    struct RecordingMirror {
        ops: Vec<MirrorOp>,
    }

    impl CellMirror for RecordingMirror {
        fn create(&mut self, cell: Cell) -> Result<()> {
            self.ops.push(MirrorOp::Create(cell));
            Ok(())
        }

        fn delete(&mut self, cell: Cell) -> Result<()> {
            self.ops.push(MirrorOp::Delete(cell));
            Ok(())
        }
    }

    fn random_state(rng: &mut StdRng) -> SimulationState {
        let cells = (0..rng.gen_range(0..40))
            .map(|_| Cell::new(rng.gen_range(-6..=6), rng.gen_range(-6..=6)))
            .collect();
        let direction = Heading::ALL[rng.gen_range(0..4)];
        let ant = Ant::new(rng.gen_range(-6..=6), rng.gen_range(-6..=6), direction);

        SimulationState::new(ant, cells, rng.gen_range(0..10_000))
    }

    #[test]
    fn when_stepping_from_the_initial_state_the_origin_turns_black_and_the_ant_moves_east() {
        let mut state = SimulationState::default();
        let mut mirror = RecordingMirror::default();

        state.step(&mut mirror).unwrap();

        assert!(state.grid.is_black(Cell::new(0, 0)));
        assert_eq!(state.grid.len(), 1);
        assert_eq!(state.ant, Ant::new(1, 0, Heading::East));
        assert_eq!(state.steps, 1);
        assert_eq!(mirror.ops, vec![MirrorOp::Create(Cell::new(0, 0))]);
    }

    #[test]
    fn when_stepping_onto_a_white_cell_facing_east_the_ant_turns_south() {
        let grid = [Cell::new(0, 0)].into_iter().collect();
        let mut state = SimulationState::new(Ant::new(1, 0, Heading::East), grid, 1);
        let mut mirror = RecordingMirror::default();

        state.step(&mut mirror).unwrap();

        assert!(state.grid.is_black(Cell::new(1, 0)));
        assert!(state.grid.is_black(Cell::new(0, 0)));
        assert_eq!(state.ant, Ant::new(1, -1, Heading::South));
        assert_eq!(state.steps, 2);
        assert_eq!(mirror.ops, vec![MirrorOp::Create(Cell::new(1, 0))]);
    }

    #[test]
    fn when_stepping_on_a_black_cell_the_ant_turns_left_and_the_cell_is_removed() {
        let grid = [Cell::new(2, 2)].into_iter().collect();
        let mut state = SimulationState::new(Ant::new(2, 2, Heading::North), grid, 7);
        let mut mirror = RecordingMirror::default();

        state.step(&mut mirror).unwrap();

        assert!(state.grid.is_empty());
        assert_eq!(state.ant, Ant::new(1, 2, Heading::West));
        assert_eq!(state.steps, 8);
        assert_eq!(mirror.ops, vec![MirrorOp::Delete(Cell::new(2, 2))]);
    }

    #[test]
    fn when_running_many_steps_the_counter_accumulates_on_top_of_previous_runs() {
        let mut state = SimulationState::default();

        state.run(&mut NoOpCellMirror, 200).unwrap();
        state.run(&mut NoOpCellMirror, 200).unwrap();

        assert_eq!(state.steps, 400);
    }

    #[test]
    fn when_running_in_two_halves_the_result_matches_a_single_run() {
        let mut once = SimulationState::default();
        let mut twice = SimulationState::default();

        once.run(&mut NoOpCellMirror, 500).unwrap();
        twice.run(&mut NoOpCellMirror, 250).unwrap();
        twice.run(&mut NoOpCellMirror, 250).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn when_running_the_same_state_twice_the_results_and_mirror_operations_are_identical() {
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..20 {
            let start = random_state(&mut rng);
            let mut first = start.clone();
            let mut second = start.clone();
            let mut first_ops = RecordingMirror::default();
            let mut second_ops = RecordingMirror::default();

            first.run(&mut first_ops, 300).unwrap();
            second.run(&mut second_ops, 300).unwrap();

            assert_eq!(first, second);
            assert_eq!(first_ops.ops, second_ops.ops);
        }
    }

    #[test]
    fn when_replaying_mirror_operations_they_match_the_black_cells_of_the_grid() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let mut state = random_state(&mut rng);
            let mut mirrored: BTreeSet<Cell> = state.grid.cells().collect();
            let mut recorder = RecordingMirror::default();

            state.run(&mut recorder, 500).unwrap();

            for op in recorder.ops {
                match op {
                    MirrorOp::Create(cell) => mirrored.insert(cell),
                    MirrorOp::Delete(cell) => mirrored.remove(&cell),
                };
            }
            assert_eq!(mirrored, state.grid.cells().collect::<BTreeSet<_>>());
        }
    }

    #[test]
    fn when_the_mirror_fails_the_step_is_reported_as_an_error() {
        struct FailingMirror;
        impl CellMirror for FailingMirror {
            fn create(&mut self, cell: Cell) -> Result<()> {
                Err(crate::error::Error::mirror(
                    cell.key(),
                    std::io::Error::other("disk full"),
                ))
            }
        }

        let mut state = SimulationState::default();

        assert!(state.run(&mut FailingMirror, 10).is_err());
    }

    #[test]
    fn when_running_past_10000_steps_the_ant_escapes_along_the_highway() {
        let mut state = SimulationState::default();

        state.run(&mut NoOpCellMirror, 10_000).unwrap();
        let (x, y) = (state.ant.x, state.ant.y);
        state.run(&mut NoOpCellMirror, 5_000).unwrap();

        // The highway moves the ant two cells diagonally every 104 steps
        assert!((state.ant.x - x).abs() > 50, "{:?}", state.ant);
        assert!((state.ant.y - y).abs() > 50, "{:?}", state.ant);
    }
}
