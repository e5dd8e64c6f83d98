pub mod render;

use std::{
    fmt,
    io::{self, Write, stdout},
};

use log::info;
use rand::{SeedableRng, rngs::StdRng};

use maze::{MazeConfig, MazeState, Session, SessionError, StopFlag};

#[derive(Debug)]
pub enum RunError {
    Session(SessionError),
    Io(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Session(e) => write!(f, "{}", e),
            RunError::Io(e) => write!(f, "could not write to the terminal: {}", e),
        }
    }
}

impl std::error::Error for RunError {}

impl From<SessionError> for RunError {
    fn from(e: SessionError) -> Self {
        RunError::Session(e)
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

pub fn run(config: &MazeConfig, stop: &StopFlag) -> Result<(), RunError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut out = stdout();
    let session = build_and_solve(config, &mut rng, stop)?;
    render::draw(&session, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Generates the configured maze and, if generation ran to the end, solves
/// it between the configured cells.
pub fn build_and_solve(
    config: &MazeConfig,
    rng: &mut StdRng,
    stop: &StopFlag,
) -> Result<Session, RunError> {
    let mut session = Session::new(config.width, config.height, config.spacing, rng)?;
    info!(
        "building a {}x{} maze with {}",
        config.width, config.height, config.algorithm
    );

    if session.generate(rng, config.algorithm, stop)? != MazeState::Built {
        return Ok(session);
    }

    let (row, col) = config.start_cell();
    session.set_start(row, col)?;
    let (row, col) = config.end_cell();
    session.set_end(row, col)?;
    session.solve(stop)?;

    Ok(session)
}

#[cfg(test)]
mod tests {
    use maze::Algorithm;

    use super::*;

    fn config(algorithm: Algorithm) -> MazeConfig {
        MazeConfig {
            width: 7,
            height: 4,
            spacing: 10,
            seed: Some(5),
            algorithm,
            start: None,
            end: None,
        }
    }

    #[test]
    fn test_build_and_solve_reaches_the_far_corner() {
        for algorithm in [Algorithm::WallCarve, Algorithm::Backtrack] {
            let mut rng = StdRng::seed_from_u64(5);
            let session = build_and_solve(&config(algorithm), &mut rng, &StopFlag::new()).unwrap();

            assert_eq!(session.state(), MazeState::Solved);
            let solution = session.solution().expect("solved sessions keep their result");
            assert!(solution.reached);
            assert_eq!(solution.path.first(), Some(&0));
            assert_eq!(solution.path.last(), Some(&27));
        }
    }

    #[test]
    fn test_stopped_build_skips_solving() {
        let stop = StopFlag::new();
        stop.request();
        let mut rng = StdRng::seed_from_u64(5);

        let session = build_and_solve(&config(Algorithm::WallCarve), &mut rng, &stop).unwrap();

        assert_eq!(session.state(), MazeState::Building);
        assert!(session.solution().is_none());
    }

    #[test]
    fn test_bad_endpoint_is_an_error() {
        let mut config = config(Algorithm::WallCarve);
        config.end = Some((4, 0));
        let mut rng = StdRng::seed_from_u64(5);

        let error = build_and_solve(&config, &mut rng, &StopFlag::new()).unwrap_err();
        assert!(matches!(
            error,
            RunError::Session(SessionError::OutOfRange { row: 4, col: 0 })
        ));
    }
}
