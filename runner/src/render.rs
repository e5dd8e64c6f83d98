use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use maze::{Direction, MazeState, Session};

const WALL: Color = Color::White;

/// Draws the maze with start, end, search trace and path overlaid, then a
/// one-line summary.
pub fn draw<W: Write>(session: &Session, out: &mut W) -> io::Result<()> {
    let grid = session.grid();
    let marks = Marks::new(session);

    for row in 0..grid.height() {
        queue!(out, SetForegroundColor(WALL))?;
        for col in 0..grid.width() {
            let top = has_wall(session, row, col, Direction::Top);
            queue!(out, Print('+'), Print(if top { "---" } else { "   " }))?;
        }
        queue!(out, Print("+\n"))?;

        for col in 0..grid.width() {
            let left = has_wall(session, row, col, Direction::Left);
            queue!(out, SetForegroundColor(WALL), Print(if left { '|' } else { ' ' }))?;

            match grid.node(row, col).and_then(|node| marks.at(node)) {
                Some((symbol, color)) => queue!(
                    out,
                    Print(' '),
                    SetForegroundColor(color),
                    Print(symbol),
                    Print(' ')
                )?,
                None => queue!(out, Print("   "))?,
            }
        }
        let right = has_wall(session, row, grid.width() - 1, Direction::Right);
        queue!(out, SetForegroundColor(WALL), Print(if right { "|\n" } else { " \n" }))?;
    }

    let last_row = grid.height() - 1;
    for col in 0..grid.width() {
        let bottom = has_wall(session, last_row, col, Direction::Bottom);
        queue!(out, Print('+'), Print(if bottom { "---" } else { "   " }))?;
    }
    queue!(out, Print('+'), ResetColor, Print('\n'))?;

    queue!(out, Print(summary(session)), Print("\n"))?;
    out.flush()
}

fn has_wall(session: &Session, row: usize, col: usize, side: Direction) -> bool {
    session
        .grid()
        .cell_at(row as isize, col as isize)
        .is_some_and(|cell| cell.has_wall(side))
}

pub fn summary(session: &Session) -> String {
    let grid = session.grid();
    let cell = |node: usize| grid.coords(node);

    match (session.state(), session.solution()) {
        (MazeState::Solved, Some(solution)) => {
            let visited = solution.visited.iter().filter(|&&v| v).count();
            let (Some(start), Some(end)) = (session.start(), session.end()) else {
                return "Solved.".to_string();
            };

            if solution.reached {
                format!(
                    "Path from {:?} to {:?}: {} cells, {} of {} cells searched.",
                    cell(start),
                    cell(end),
                    solution.path.len(),
                    visited,
                    grid.len()
                )
            } else {
                format!("No path from {:?} to {:?}.", cell(start), cell(end))
            }
        }
        (MazeState::Building, _) => "Generation stopped before the maze was complete.".to_string(),
        (state, _) => format!("Maze {}.", state.to_string().to_lowercase()),
    }
}

struct Marks {
    start: Option<usize>,
    end: Option<usize>,
    on_path: Vec<bool>,
    visited: Vec<bool>,
}

impl Marks {
    fn new(session: &Session) -> Self {
        let nodes = session.grid().len();
        let mut on_path = vec![false; nodes];
        let mut visited = vec![false; nodes];

        if let Some(solution) = session.solution() {
            for &node in &solution.path {
                on_path[node] = true;
            }
            visited.clone_from(&solution.visited);
        }

        Self {
            start: session.start(),
            end: session.end(),
            on_path,
            visited,
        }
    }

    fn at(&self, node: usize) -> Option<(char, Color)> {
        if Some(node) == self.start {
            Some(('S', Color::Green))
        } else if Some(node) == self.end {
            Some(('E', Color::Yellow))
        } else if self.on_path[node] {
            Some(('*', Color::Red))
        } else if self.visited[node] {
            Some(('.', Color::DarkGrey))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use maze::{Algorithm, StopFlag};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn solved(width: usize, height: usize) -> Session {
        let mut rng = StdRng::seed_from_u64(13);
        let mut session = Session::new(width, height, 10, &mut rng).unwrap();
        session
            .generate(&mut rng, Algorithm::WallCarve, &StopFlag::new())
            .unwrap();
        session.set_start(0, 0).unwrap();
        session.set_end(height - 1, width - 1).unwrap();
        session.solve(&StopFlag::new()).unwrap();
        session
    }

    #[test]
    fn test_draw_marks_endpoints_and_has_one_line_per_wall_row() {
        let session = solved(5, 4);
        let mut out = Vec::new();
        draw(&session, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains('S'));
        assert!(text.contains('E'));
        assert_eq!(text.lines().count(), 2 * 4 + 1 + 1);
        assert!(text.lines().last().unwrap().starts_with("Path from (0, 0) to (3, 4)"));
    }

    #[test]
    fn test_path_cells_are_marked() {
        let session = solved(6, 6);
        let marks = Marks::new(&session);
        let solution = session.solution().unwrap();

        for &node in &solution.path[1..solution.path.len() - 1] {
            assert_eq!(marks.at(node), Some(('*', Color::Red)));
        }
        assert_eq!(marks.at(0), Some(('S', Color::Green)));
        assert_eq!(marks.at(35), Some(('E', Color::Yellow)));
    }

    #[test]
    fn test_summary_of_unsolved_maze() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = Session::new(3, 3, 10, &mut rng).unwrap();
        assert_eq!(summary(&session), "Maze ready.");
    }
}
