use std::fmt;

use log::info;
use strum::Display;

use crate::{
    generator::{Algorithm, generate_with},
    graph::Graph,
    grid::{Grid, GridError},
    random::RandomSource,
    solver::{SolveError, SolveResult, solve_with},
    stop::StopFlag,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum MazeState {
    Ready,
    Building,
    Built,
    Solving,
    Solved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    NotGenerated,
    AlreadyGenerated,
    MissingEndpoints,
    OutOfRange { row: usize, col: usize },
    Grid(GridError),
    Solve(SolveError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotGenerated => write!(f, "the maze has not been generated yet"),
            SessionError::AlreadyGenerated => {
                write!(f, "the maze is already generated; reset it first")
            }
            SessionError::MissingEndpoints => write!(f, "choose a start and an end cell first"),
            SessionError::OutOfRange { row, col } => {
                write!(f, "cell ({}, {}) is outside the maze", row, col)
            }
            SessionError::Grid(e) => write!(f, "{}", e),
            SessionError::Solve(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        SessionError::Grid(e)
    }
}

impl From<SolveError> for SessionError {
    fn from(e: SolveError) -> Self {
        SessionError::Solve(e)
    }
}

/// One maze from empty grid to solved path: the build, pick endpoints,
/// solve, reset cycle.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    graph: Graph,
    state: MazeState,
    start: Option<usize>,
    end: Option<usize>,
    solution: Option<SolveResult>,
}

impl Session {
    pub fn new<R: RandomSource>(
        width: usize,
        height: usize,
        spacing: usize,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let grid = Grid::new(width, height, spacing, rng)?;
        let graph = Graph::new(width, height);

        Ok(Self {
            grid,
            graph,
            state: MazeState::Ready,
            start: None,
            end: None,
            solution: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn state(&self) -> MazeState {
        self.state
    }

    pub fn start(&self) -> Option<usize> {
        self.start
    }

    pub fn end(&self) -> Option<usize> {
        self.end
    }

    pub fn solution(&self) -> Option<&SolveResult> {
        self.solution.as_ref()
    }

    /// Carves the maze. A stopped run leaves the session in `Building`;
    /// only `reset` gets it out of there.
    pub fn generate<R: RandomSource>(
        &mut self,
        rng: &mut R,
        algorithm: Algorithm,
        stop: &StopFlag,
    ) -> Result<MazeState, SessionError> {
        if self.state != MazeState::Ready {
            return Err(SessionError::AlreadyGenerated);
        }

        self.state = MazeState::Building;
        let generation = generate_with(&mut self.grid, rng, algorithm, stop);
        self.graph = generation.graph;

        if !generation.stopped {
            self.state = MazeState::Built;
        }

        Ok(self.state)
    }

    pub fn set_start(&mut self, row: usize, col: usize) -> Result<usize, SessionError> {
        let node = self.select(row, col)?;
        self.start = Some(node);
        Ok(node)
    }

    pub fn set_end(&mut self, row: usize, col: usize) -> Result<usize, SessionError> {
        let node = self.select(row, col)?;
        self.end = Some(node);
        Ok(node)
    }

    fn select(&mut self, row: usize, col: usize) -> Result<usize, SessionError> {
        if !matches!(self.state, MazeState::Built | MazeState::Solved) {
            return Err(SessionError::NotGenerated);
        }
        let Some(node) = self.grid.node(row, col) else {
            return Err(SessionError::OutOfRange { row, col });
        };

        // New endpoints make any earlier answer stale.
        self.solution = None;
        self.state = MazeState::Built;
        Ok(node)
    }

    pub fn solve(&mut self, stop: &StopFlag) -> Result<&SolveResult, SessionError> {
        if !matches!(self.state, MazeState::Built | MazeState::Solved) {
            return Err(SessionError::NotGenerated);
        }
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(SessionError::MissingEndpoints);
        };

        self.state = MazeState::Solving;
        let result = match solve_with(&self.graph, start, end, stop) {
            Ok(result) => result,
            Err(e) => {
                self.state = MazeState::Built;
                return Err(e.into());
            }
        };

        self.state = if result.stopped {
            MazeState::Built
        } else {
            MazeState::Solved
        };

        Ok(&*self.solution.insert(result))
    }

    /// Back to a fully walled grid of the same size, endpoints cleared.
    pub fn reset<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        self.grid = Grid::new(
            self.grid.width(),
            self.grid.height(),
            self.grid.spacing(),
            rng,
        )?;
        self.graph = Graph::new(self.grid.width(), self.grid.height());
        self.start = None;
        self.end = None;
        self.solution = None;
        self.state = MazeState::Ready;
        info!("maze reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn built(width: usize, height: usize) -> (Session, StdRng) {
        let mut rng = StdRng::seed_from_u64(21);
        let mut session = Session::new(width, height, 10, &mut rng).unwrap();
        session
            .generate(&mut rng, Algorithm::WallCarve, &StopFlag::new())
            .unwrap();
        (session, rng)
    }

    #[test]
    fn test_lifecycle() {
        let (mut session, mut rng) = built(4, 3);
        assert_eq!(session.state(), MazeState::Built);
        assert!(session.graph().is_spanning_tree());

        assert_eq!(session.set_start(0, 0), Ok(0));
        assert_eq!(session.set_end(2, 3), Ok(11));

        let result = session.solve(&StopFlag::new()).unwrap().clone();
        assert!(result.reached);
        assert_eq!(result.path.first(), Some(&0));
        assert_eq!(result.path.last(), Some(&11));
        assert_eq!(session.state(), MazeState::Solved);
        assert_eq!(session.solution(), Some(&result));

        session.reset(&mut rng).unwrap();
        assert_eq!(session.state(), MazeState::Ready);
        assert!(session.grid().cells().all(|cell| cell.is_blocked()));
        assert_eq!(session.graph().edge_count(), 0);
        assert!(session.start().is_none() && session.end().is_none());
        assert!(session.solution().is_none());
    }

    #[test]
    fn test_invalid_construction() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Session::new(0, 5, 10, &mut rng).unwrap_err(),
            SessionError::Grid(GridError::InvalidDimension {
                name: "width",
                value: 0
            })
        );
    }

    #[test]
    fn test_endpoints_need_a_generated_maze() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = Session::new(3, 3, 10, &mut rng).unwrap();

        assert_eq!(session.set_start(0, 0), Err(SessionError::NotGenerated));
        assert!(matches!(
            session.solve(&StopFlag::new()),
            Err(SessionError::NotGenerated)
        ));
    }

    #[test]
    fn test_out_of_range_endpoint() {
        let (mut session, _) = built(3, 2);
        assert_eq!(
            session.set_end(2, 0),
            Err(SessionError::OutOfRange { row: 2, col: 0 })
        );
        assert_eq!(
            session.set_end(0, 3),
            Err(SessionError::OutOfRange { row: 0, col: 3 })
        );
    }

    #[test]
    fn test_solve_needs_both_endpoints() {
        let (mut session, _) = built(3, 3);
        session.set_start(1, 1).unwrap();
        assert!(matches!(
            session.solve(&StopFlag::new()),
            Err(SessionError::MissingEndpoints)
        ));
    }

    #[test]
    fn test_cannot_generate_twice() {
        let (mut session, mut rng) = built(3, 3);
        assert_eq!(
            session.generate(&mut rng, Algorithm::Backtrack, &StopFlag::new()),
            Err(SessionError::AlreadyGenerated)
        );
    }

    #[test]
    fn test_stopped_generation_stays_building() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = Session::new(6, 6, 10, &mut rng).unwrap();
        let stop = StopFlag::new();
        stop.request();

        assert_eq!(
            session.generate(&mut rng, Algorithm::WallCarve, &stop),
            Ok(MazeState::Building)
        );
        assert_eq!(session.set_start(0, 0), Err(SessionError::NotGenerated));

        session.reset(&mut rng).unwrap();
        assert_eq!(
            session.generate(&mut rng, Algorithm::WallCarve, &StopFlag::new()),
            Ok(MazeState::Built)
        );
    }

    #[test]
    fn test_moving_an_endpoint_clears_the_solution() {
        let (mut session, _) = built(3, 3);
        session.set_start(0, 0).unwrap();
        session.set_end(2, 2).unwrap();
        session.solve(&StopFlag::new()).unwrap();

        session.set_end(1, 1).unwrap();
        assert!(session.solution().is_none());
        assert_eq!(session.state(), MazeState::Built);
    }

    #[test]
    fn test_stopped_solve_returns_to_built() {
        let (mut session, _) = built(5, 5);
        session.set_start(0, 0).unwrap();
        session.set_end(4, 4).unwrap();
        let stop = StopFlag::new();
        stop.request();

        let partial = session.solve(&stop).unwrap().clone();
        assert!(partial.stopped);
        assert!(!partial.reached);
        assert!(partial.path.is_empty());
        assert_eq!(session.state(), MazeState::Built);
        assert_eq!(session.solution(), Some(&partial));

        let result = session.solve(&StopFlag::new()).unwrap();
        assert!(result.reached && !result.stopped);
        assert_eq!(session.state(), MazeState::Solved);
    }
}
