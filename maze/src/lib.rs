pub mod config;
pub mod generator;
pub mod graph;
pub mod grid;
pub mod random;
pub mod session;
pub mod solver;
pub mod stop;

pub use config::{ConfigError, MazeConfig};
pub use generator::{Algorithm, CarveStep, Generation, Generator, generate, generate_with};
pub use graph::Graph;
pub use grid::{Cell, Direction, Grid, GridError};
pub use random::RandomSource;
pub use session::{MazeState, Session, SessionError};
pub use solver::{SolveError, SolveResult, SolveStep, Solver, solve, solve_with};
pub use stop::StopFlag;
