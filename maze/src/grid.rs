mod cell;

use std::fmt;

use strum::IntoEnumIterator;

use crate::random::RandomSource;

pub use cell::{Cell, Direction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    InvalidDimension { name: &'static str, value: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidDimension { name, value } => {
                write!(f, "{} must be positive, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Whether `(row, col)` lies inside a `height` x `width` block. Every
/// bounds check in the crate comes through here.
pub(crate) fn in_bounds(width: usize, height: usize, row: isize, col: isize) -> bool {
    row >= 0 && col >= 0 && (row as usize) < height && (col as usize) < width
}

/// A `height` x `width` block of cells, every wall standing at creation.
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    spacing: usize, // Pixels per cell; only the drawing side reads it.
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new<R: RandomSource>(
        width: usize,
        height: usize,
        spacing: usize,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        for (name, value) in [("width", width), ("height", height), ("spacing", spacing)] {
            if value == 0 {
                return Err(GridError::InvalidDimension { name, value });
            }
        }

        let mut labels: Vec<usize> = (0..width * height).collect();
        rng.shuffle(&mut labels);

        let cells = (0..height)
            .map(|row| {
                (0..width)
                    .map(|col| Cell::new(row, col, labels[row * width + col]))
                    .collect()
            })
            .collect();

        Ok(Self {
            width,
            height,
            spacing,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn spacing(&self) -> usize {
        self.spacing
    }

    /// Number of cells, which is also the number of graph nodes.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn in_range(&self, row: isize, col: isize) -> bool {
        in_bounds(self.width, self.height, row, col)
    }

    pub fn cell_at(&self, row: isize, col: isize) -> Option<&Cell> {
        if !self.in_range(row, col) {
            return None;
        }

        Some(&self.cells[row as usize][col as usize])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Coordinates of the cell on `side` of `(row, col)`, if there is one.
    pub fn neighbor(&self, row: usize, col: usize, side: Direction) -> Option<(usize, usize)> {
        let (dr, dc) = side.offset();
        let r = row as isize + dr;
        let c = col as isize + dc;

        if self.in_range(r, c) {
            Some((r as usize, c as usize))
        } else {
            None
        }
    }

    pub fn neighbor_cell(&self, row: usize, col: usize, side: Direction) -> Option<&Cell> {
        let (r, c) = self.neighbor(row, col, side)?;
        Some(&self.cells[r][c])
    }

    /// Graph node of the cell at `(row, col)`, or `None` off the grid.
    pub fn node(&self, row: usize, col: usize) -> Option<usize> {
        self.in_range(row as isize, col as isize).then(|| row * self.width + col)
    }

    pub fn coords(&self, node: usize) -> (usize, usize) {
        (node / self.width, node % self.width)
    }

    pub fn any_blocked(&self) -> bool {
        self.cells().any(Cell::is_blocked)
    }

    pub fn has_blocked_neighbor(&self, row: usize, col: usize) -> bool {
        Direction::iter().any(|side| {
            self.neighbor_cell(row, col, side)
                .is_some_and(Cell::is_blocked)
        })
    }

    /// Picks, uniformly, one cell that is already in the maze and still
    /// borders a cell that is not. `None` means no carving can resume.
    pub fn random_unblocked_adjacent_to_blocked<R: RandomSource>(
        &self,
        rng: &mut R,
    ) -> Option<&Cell> {
        let candidates: Vec<&Cell> = self
            .cells()
            .filter(|cell| !cell.is_blocked() && self.has_blocked_neighbor(cell.row(), cell.col()))
            .collect();

        rng.pick(&candidates).copied()
    }

    /// Removes a single wall without touching the neighbor. Used for the
    /// entry opening on the outer boundary.
    pub(crate) fn open_side(&mut self, row: usize, col: usize, side: Direction) {
        self.cells[row][col].remove_wall(side);
    }

    /// Removes the wall between `(row, col)` and its neighbor on `side`, on
    /// both cells. Returns the neighbor's coordinates.
    pub(crate) fn carve(
        &mut self,
        row: usize,
        col: usize,
        side: Direction,
    ) -> Option<(usize, usize)> {
        let (r, c) = self.neighbor(row, col, side)?;
        self.cells[row][col].remove_wall(side);
        self.cells[r][c].remove_wall(side.opposite());
        Some((r, c))
    }

    /// Text picture of the walls, one `+---+` block per cell.
    pub fn log(&self) -> String {
        let mut out = String::new();

        for row in &self.cells {
            for cell in row {
                out.push('+');
                out.push_str(if cell.has_wall(Direction::Top) { "---" } else { "   " });
            }
            out.push_str("+\n");

            for cell in row {
                out.push(if cell.has_wall(Direction::Left) { '|' } else { ' ' });
                out.push_str("   ");
            }
            let last = &row[self.width - 1];
            out.push(if last.has_wall(Direction::Right) { '|' } else { ' ' });
            out.push('\n');
        }

        for cell in &self.cells[self.height - 1] {
            out.push('+');
            out.push_str(if cell.has_wall(Direction::Bottom) { "---" } else { "   " });
        }
        out.push('+');

        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.log())
    }
}
