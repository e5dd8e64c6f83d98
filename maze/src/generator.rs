pub mod algorithms;

use log::{debug, info, warn};
use strum::{Display, EnumIter, EnumString};

use crate::{
    graph::Graph,
    grid::{Direction, Grid},
    random::RandomSource,
    stop::StopFlag,
};

use algorithms::{backtrack::Backtrack, wall_carve::WallCarve};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Algorithm {
    #[default]
    #[strum(to_string = "carve", serialize = "wall-carve")]
    WallCarve, // Random walk that restarts anywhere on the maze's frontier.
    #[strum(to_string = "backtrack")]
    Backtrack, // Classic depth-first carve: retreats along its own trail.
}

/// What a single generator step did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CarveStep {
    Carved {
        from: (usize, usize),
        to: (usize, usize),
        side: Direction,
    },
    /// The walk hit a dead end and picked up again at `at`.
    Resumed {
        at: (usize, usize),
        last_side: Direction,
    },
    /// The stack walker stepped back off `from`.
    Retreated { from: (usize, usize) },
    Finished,
}

#[derive(Debug)]
enum Walker {
    WallCarve(WallCarve),
    Backtrack(Backtrack),
}

/// Step-at-a-time maze generation. The generator owns only its walk
/// state; the grid and graph belong to the caller and may be read freely
/// between steps.
#[derive(Debug)]
pub struct Generator {
    walker: Walker,
    steps: usize,
    finished: bool,
}

impl Generator {
    /// Opens the left wall of a random cell in column 0 and starts the
    /// walk there.
    pub fn start<R: RandomSource>(algorithm: Algorithm, grid: &mut Grid, rng: &mut R) -> Self {
        let row = rng.next_below(grid.height());
        grid.open_side(row, 0, Direction::Left);
        debug!("entry at ({}, 0)", row);

        let walker = match algorithm {
            Algorithm::WallCarve => Walker::WallCarve(WallCarve::new((row, 0))),
            Algorithm::Backtrack => Walker::Backtrack(Backtrack::new((row, 0))),
        };

        Self {
            walker,
            steps: 0,
            finished: false,
        }
    }

    pub fn step<R: RandomSource>(
        &mut self,
        grid: &mut Grid,
        graph: &mut Graph,
        rng: &mut R,
    ) -> CarveStep {
        if self.finished {
            return CarveStep::Finished;
        }

        let step = match &mut self.walker {
            Walker::WallCarve(walker) => walker.step(grid, graph, rng),
            Walker::Backtrack(walker) => walker.step(grid, graph, rng),
        };

        match step {
            CarveStep::Finished => self.finished = true,
            CarveStep::Carved { from, to, side } => {
                self.steps += 1;
                debug!("carved {} from {:?} to {:?}", side, from, to);
            }
            CarveStep::Resumed { at, last_side } => {
                self.steps += 1;
                debug!("resumed at {:?}, entered from {}", at, last_side);
            }
            CarveStep::Retreated { from } => {
                self.steps += 1;
                debug!("retreated from {:?}", from);
            }
        }

        step
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Steps taken so far, not counting the final `Finished`.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The cell the walk is currently carving from.
    pub fn current(&self) -> Option<(usize, usize)> {
        match &self.walker {
            Walker::WallCarve(walker) => Some(walker.current()),
            Walker::Backtrack(walker) => walker.current(),
        }
    }
}

/// Outcome of a full generation run.
#[derive(Clone, Debug)]
pub struct Generation {
    pub graph: Graph,
    pub steps: usize,
    pub stopped: bool,
}

/// Carves `grid` into a perfect maze with the default algorithm and
/// returns the passages as a graph.
pub fn generate<R: RandomSource>(grid: &mut Grid, rng: &mut R) -> Graph {
    generate_with(grid, rng, Algorithm::default(), &StopFlag::new()).graph
}

pub fn generate_with<R: RandomSource>(
    grid: &mut Grid,
    rng: &mut R,
    algorithm: Algorithm,
    stop: &StopFlag,
) -> Generation {
    let mut graph = Graph::new(grid.width(), grid.height());
    let mut generator = Generator::start(algorithm, grid, rng);

    while !generator.is_finished() {
        if stop.is_requested() {
            warn!("generation stopped after {} steps", generator.steps());
            return Generation {
                graph,
                steps: generator.steps(),
                stopped: true,
            };
        }
        generator.step(grid, &mut graph, rng);
    }

    info!(
        "generated {}x{} maze with {} in {} steps ({} passages)",
        grid.width(),
        grid.height(),
        algorithm,
        generator.steps(),
        graph.edge_count()
    );

    Generation {
        graph,
        steps: generator.steps(),
        stopped: false,
    }
}

/// Knocks down the wall on `side` of `from` and records the matching
/// edge, keeping wall state and graph state in step.
pub(crate) fn carve_passage(
    grid: &mut Grid,
    graph: &mut Graph,
    from: (usize, usize),
    side: Direction,
) -> Option<(usize, usize)> {
    let to = grid.carve(from.0, from.1, side)?;
    let u = grid.node(from.0, from.1)?;
    let v = grid.node(to.0, to.1)?;
    let added = graph.connect(u, v);
    debug_assert!(added, "carved wall must add a new edge");
    Some(to)
}
