use std::fmt;

use log::{debug, info, warn};

use crate::{graph::Graph, stop::StopFlag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    InvalidNodeIndex { node: usize, nodes: usize },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::InvalidNodeIndex { node, nodes } => {
                write!(f, "node {} is outside the maze (0..{})", node, nodes)
            }
        }
    }
}

impl std::error::Error for SolveError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Frame {
    Enter(usize),
    Continue { node: usize, next: usize }, // `next` indexes `Graph::neighbors(node)`.
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStep {
    Visited(usize),
    /// Every way out of this node has been tried.
    Retreated(usize),
    Finished { reached: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveResult {
    pub reached: bool,
    /// `start` to `end` inclusive; empty when `start == end` or unreached.
    pub path: Vec<usize>,
    pub parents: Vec<Option<usize>>,
    pub visited: Vec<bool>,
    pub stopped: bool,
}

/// Depth-first search over a maze graph, run one visit at a time with an
/// explicit stack so that large mazes cannot overflow the call stack and a
/// reader can watch `visited` grow between steps.
#[derive(Clone, Debug)]
pub struct Solver {
    start: usize,
    end: usize,
    visited: Vec<bool>,
    visited_count: usize,
    parents: Vec<Option<usize>>,
    stack: Vec<Frame>,
    current: Option<usize>,
    outcome: Option<bool>,
}

impl Solver {
    pub fn new(graph: &Graph, start: usize, end: usize) -> Result<Self, SolveError> {
        let nodes = graph.len();
        for node in [start, end] {
            if !graph.contains(node) {
                return Err(SolveError::InvalidNodeIndex { node, nodes });
            }
        }

        Ok(Self {
            start,
            end,
            visited: vec![false; nodes],
            visited_count: 0,
            parents: vec![None; nodes],
            stack: vec![Frame::Enter(start)],
            current: None,
            outcome: None,
        })
    }

    pub fn step(&mut self, graph: &Graph) -> SolveStep {
        if let Some(reached) = self.outcome {
            return SolveStep::Finished { reached };
        }

        loop {
            let Some(frame) = self.stack.pop() else {
                warn!("{} is unreachable from {}", self.end, self.start);
                self.outcome = Some(false);
                return SolveStep::Finished { reached: false };
            };

            match frame {
                Frame::Enter(u) => {
                    self.visit(u);
                    debug!("visited {}", u);

                    if u == self.end {
                        info!("reached {} from {}", self.end, self.start);
                        self.finish(true);
                    } else if self.visited_count == self.visited.len() {
                        warn!("every node visited without reaching {}", self.end);
                        self.finish(false);
                    } else {
                        self.stack.push(Frame::Continue { node: u, next: 0 });
                    }

                    return SolveStep::Visited(u);
                }
                Frame::Continue { node: u, next } => {
                    let found = graph
                        .neighbors(u)
                        .enumerate()
                        .skip(next)
                        .find(|&(_, v)| !self.visited[v] && graph.is_adjacent(u, v));

                    match found {
                        Some((index, v)) => {
                            self.parents[v] = Some(u);
                            self.stack.push(Frame::Continue {
                                node: u,
                                next: index + 1,
                            });
                            self.stack.push(Frame::Enter(v));
                        }
                        None => return SolveStep::Retreated(u),
                    }
                }
            }
        }
    }

    fn visit(&mut self, u: usize) {
        if !self.visited[u] {
            self.visited[u] = true;
            self.visited_count += 1;
        }
        self.current = Some(u);
    }

    fn finish(&mut self, reached: bool) {
        self.outcome = Some(reached);
        self.stack.clear();
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// The node most recently entered.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn visited(&self) -> &[bool] {
        &self.visited
    }

    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// Follows parent links back from `end`.
    pub fn path(&self) -> Vec<usize> {
        if self.outcome != Some(true) || self.start == self.end {
            return Vec::new();
        }

        let mut path = vec![self.end];
        let mut node = self.end;
        while let Some(parent) = self.parents[node] {
            path.push(parent);
            if parent == self.start {
                break;
            }
            node = parent;
        }

        path.reverse();
        path
    }

    pub fn result(&self) -> SolveResult {
        SolveResult {
            reached: self.outcome == Some(true),
            path: self.path(),
            parents: self.parents.clone(),
            visited: self.visited.clone(),
            stopped: !self.is_finished(),
        }
    }
}

pub fn solve(graph: &Graph, start: usize, end: usize) -> Result<SolveResult, SolveError> {
    solve_with(graph, start, end, &StopFlag::new())
}

/// Runs the search to completion unless `stop` is raised first, in which
/// case the partial state comes back with `stopped` set.
pub fn solve_with(
    graph: &Graph,
    start: usize,
    end: usize,
    stop: &StopFlag,
) -> Result<SolveResult, SolveError> {
    let mut solver = Solver::new(graph, start, end)?;

    while !solver.is_finished() {
        if stop.is_requested() {
            warn!("solve stopped after visiting {} nodes", solver.visited_count);
            break;
        }
        solver.step(graph);
    }

    Ok(solver.result())
}
