use std::{env, fmt, str::FromStr};

use crate::generator::Algorithm;

pub const DEFAULT_WIDTH: usize = 15;
pub const DEFAULT_HEIGHT: usize = 15;
pub const DEFAULT_SPACING: usize = 40; // Pixels per cell for anything that draws the maze.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => {
                write!(f, "invalid value for {}: '{}'", key, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub spacing: usize,
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    pub start: Option<(usize, usize)>,
    pub end: Option<(usize, usize)>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spacing: DEFAULT_SPACING,
            seed: None,
            algorithm: Algorithm::default(),
            start: None,
            end: None,
        }
    }
}

impl MazeConfig {
    /// Reads `MAZE_*` variables, loading a `.env` file first if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            width: parse(&lookup, "MAZE_WIDTH")?.unwrap_or(defaults.width),
            height: parse(&lookup, "MAZE_HEIGHT")?.unwrap_or(defaults.height),
            spacing: parse(&lookup, "MAZE_SPACING")?.unwrap_or(defaults.spacing),
            seed: parse(&lookup, "MAZE_SEED")?,
            algorithm: parse(&lookup, "MAZE_ALGORITHM")?.unwrap_or(defaults.algorithm),
            start: parse_cell(&lookup, "MAZE_START")?,
            end: parse_cell(&lookup, "MAZE_END")?,
        })
    }

    /// Configured start, or the top-left cell.
    pub fn start_cell(&self) -> (usize, usize) {
        self.start.unwrap_or((0, 0))
    }

    /// Configured end, or the bottom-right cell.
    pub fn end_cell(&self) -> (usize, usize) {
        self.end.unwrap_or((
            self.height.saturating_sub(1),
            self.width.saturating_sub(1),
        ))
    }
}

fn parse<T, F>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::Invalid { key, value })
}

fn parse_cell<F>(lookup: &F, key: &'static str) -> Result<Option<(usize, usize)>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    let parsed = value.split_once(',').and_then(|(row, col)| {
        let row = row.trim().parse().ok()?;
        let col = col.trim().parse().ok()?;
        Some((row, col))
    });

    match parsed {
        Some(cell) => Ok(Some(cell)),
        None => Err(ConfigError::Invalid { key, value }),
    }
}
