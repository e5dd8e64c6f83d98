use strum::IntoEnumIterator;

use crate::{
    generator::{CarveStep, carve_passage},
    graph::Graph,
    grid::{Cell, Direction, Grid},
    random::RandomSource,
};

#[derive(Debug)]
pub struct Backtrack {
    stack: Vec<(usize, usize)>,
}

impl Backtrack {
    pub fn new(entry: (usize, usize)) -> Self {
        Self { stack: vec![entry] }
    }

    pub fn current(&self) -> Option<(usize, usize)> {
        self.stack.last().copied()
    }

    pub fn step<R: RandomSource>(
        &mut self,
        grid: &mut Grid,
        graph: &mut Graph,
        rng: &mut R,
    ) -> CarveStep {
        let Some(from) = self.current() else {
            return CarveStep::Finished;
        };

        let sides: Vec<Direction> = Direction::iter()
            .filter(|&side| {
                grid.neighbor_cell(from.0, from.1, side)
                    .is_some_and(Cell::is_blocked)
            })
            .collect();

        match rng.pick(&sides).copied() {
            Some(side) => {
                let to = carve_passage(grid, graph, from, side)
                    .expect("side was chosen from in-range neighbors");
                self.stack.push(to);
                CarveStep::Carved { from, to, side }
            }
            None => {
                self.stack.pop();
                CarveStep::Retreated { from }
            }
        }
    }
}
