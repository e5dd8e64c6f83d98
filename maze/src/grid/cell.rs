use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumIter)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Row and column deltas of the neighbor on this side.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }
}

/// One grid position. Coordinates are fixed at construction; only the
/// walls change, and only through the owning `Grid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    walls: [bool; 4],
    label: usize,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize, label: usize) -> Self {
        Self {
            row,
            col,
            walls: [true; 4],
            label,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Shuffled identity in `[0, rows * cols)`. Cosmetic only.
    pub fn label(&self) -> usize {
        self.label
    }

    pub fn has_wall(&self, side: Direction) -> bool {
        self.walls[side.index()]
    }

    pub fn is_open(&self, side: Direction) -> bool {
        !self.has_wall(side)
    }

    /// All four walls still standing: the cell is not part of the maze yet.
    pub fn is_blocked(&self) -> bool {
        self.walls.iter().all(|&wall| wall)
    }

    pub fn open_sides(&self) -> Vec<Direction> {
        Direction::iter().filter(|&side| self.is_open(side)).collect()
    }

    pub(crate) fn remove_wall(&mut self, side: Direction) {
        self.walls[side.index()] = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_blocked() {
        let cell = Cell::new(2, 3, 5);
        assert!(cell.is_blocked());
        assert!(cell.open_sides().is_empty());
        assert_eq!((cell.row(), cell.col(), cell.label()), (2, 3, 5));
    }

    #[test]
    fn test_removing_one_wall_unblocks() {
        let mut cell = Cell::new(0, 0, 0);
        cell.remove_wall(Direction::Left);

        assert!(!cell.is_blocked());
        assert!(cell.is_open(Direction::Left));
        assert!(cell.has_wall(Direction::Top));
        assert_eq!(cell.open_sides(), vec![Direction::Left]);
    }

    #[test]
    fn test_opposite_is_an_involution() {
        for side in Direction::iter() {
            assert_ne!(side, side.opposite());
            assert_eq!(side, side.opposite().opposite());

            let (dr, dc) = side.offset();
            let (or, oc) = side.opposite().offset();
            assert_eq!((dr + or, dc + oc), (0, 0));
        }
    }
}
