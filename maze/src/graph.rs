use std::collections::VecDeque;

use disjoint::DisjointSetVec;

use crate::grid::{Direction, in_bounds};

/// Neighbor order for searches: up, down, left, right.
const SEARCH_ORDER: [Direction; 4] = [
    Direction::Top,
    Direction::Bottom,
    Direction::Left,
    Direction::Right,
];

/// Symmetric adjacency over the `width * height` cells of a grid, where
/// node `row * width + col` stands for the cell at `(row, col)`.
///
/// Edges only ever join orthogonal grid neighbors, so each node keeps a
/// short list instead of a full matrix row. Edges are added once and
/// never removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    width: usize,
    height: usize,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Graph {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            adjacency: vec![Vec::new(); width * height],
            edge_count: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, node: usize) -> bool {
        node < self.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Adds the edge `u-v` in both directions. Returns `false` and changes
    /// nothing if the nodes are not grid neighbors or are already joined.
    pub fn connect(&mut self, u: usize, v: usize) -> bool {
        if !self.contains(u) || !self.contains(v) || !self.neighbors(u).any(|n| n == v) {
            return false;
        }
        if self.is_adjacent(u, v) {
            return false;
        }

        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
        self.edge_count += 1;
        true
    }

    pub fn is_adjacent(&self, u: usize, v: usize) -> bool {
        self.adjacency.get(u).is_some_and(|list| list.contains(&v))
    }

    /// In-range grid neighbors of `u` in the fixed order up, down, left,
    /// right, whether or not an edge joins them.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + use<> {
        let (width, height) = (self.width, self.height);
        let row = (u / width.max(1)) as isize;
        let col = (u % width.max(1)) as isize;

        SEARCH_ORDER.into_iter().filter_map(move |side| {
            let (dr, dc) = side.offset();
            let (r, c) = (row + dr, col + dc);
            in_bounds(width, height, r, c).then(|| r as usize * width + c as usize)
        })
    }

    /// Nodes joined to `u` by an edge, in insertion order.
    pub fn linked(&self, u: usize) -> &[usize] {
        self.adjacency
            .get(u)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every edge once, as `(smaller, larger)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, list)| {
            list.iter().filter(move |&&v| u < v).map(move |&v| (u, v))
        })
    }

    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }

        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::from([0]);
        seen[0] = true;
        let mut reached = 1;

        while let Some(u) = queue.pop_front() {
            for &v in self.linked(u) {
                if !seen[v] {
                    seen[v] = true;
                    reached += 1;
                    queue.push_back(v);
                }
            }
        }

        reached == self.len()
    }

    pub fn has_cycle(&self) -> bool {
        let mut sets = DisjointSetVec::from((0..self.len()).collect::<Vec<usize>>());

        for (u, v) in self.edges() {
            if sets.root_of(u) == sets.root_of(v) {
                return true;
            }
            sets.join(u, v);
        }

        false
    }

    /// Connected, acyclic, and exactly `N - 1` edges.
    pub fn is_spanning_tree(&self) -> bool {
        self.edge_count + 1 == self.len() && !self.has_cycle() && self.is_connected()
    }
}
