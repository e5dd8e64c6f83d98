use strum::IntoEnumIterator;

use crate::{
    generator::{CarveStep, carve_passage},
    graph::Graph,
    grid::{Cell, Direction, Grid},
    random::RandomSource,
};

/// Random carving walk. On a dead end it does not retrace its steps; it
/// jumps to a random maze cell that still borders unvisited ground.
#[derive(Debug)]
pub struct WallCarve {
    current: (usize, usize),
    last_side: Direction, // Side we came in through; never a candidate.
}

impl WallCarve {
    pub fn new(entry: (usize, usize)) -> Self {
        Self {
            current: entry,
            last_side: Direction::Left,
        }
    }

    pub fn current(&self) -> (usize, usize) {
        self.current
    }

    pub fn step<R: RandomSource>(
        &mut self,
        grid: &mut Grid,
        graph: &mut Graph,
        rng: &mut R,
    ) -> CarveStep {
        if !grid.any_blocked() {
            return CarveStep::Finished;
        }

        let mut sides: Vec<Direction> = Direction::iter()
            .filter(|&side| side != self.last_side && can_carve(grid, self.current, side))
            .collect();
        rng.shuffle(&mut sides);

        for side in sides {
            if !leads_to_blocked(grid, self.current, side) {
                continue;
            }

            if let Some(to) = carve_passage(grid, graph, self.current, side) {
                let from = self.current;
                self.current = to;
                self.last_side = side.opposite();
                return CarveStep::Carved { from, to, side };
            }
        }

        let Some(cell) = grid.random_unblocked_adjacent_to_blocked(rng) else {
            // Blocked cells remain but none touches the maze.
            return CarveStep::Finished;
        };

        let at = (cell.row(), cell.col());
        let open_sides = cell.open_sides();
        let last_side = rng.pick(&open_sides).copied().unwrap_or(Direction::Left);

        self.current = at;
        self.last_side = last_side;
        CarveStep::Resumed { at, last_side }
    }
}

fn can_carve(grid: &Grid, (row, col): (usize, usize), side: Direction) -> bool {
    let has_wall = grid
        .cell_at(row as isize, col as isize)
        .is_some_and(|cell| cell.has_wall(side));

    has_wall && leads_to_blocked(grid, (row, col), side)
}

fn leads_to_blocked(grid: &Grid, (row, col): (usize, usize), side: Direction) -> bool {
    grid.neighbor_cell(row, col, side)
        .is_some_and(Cell::is_blocked)
}
