//! Grid representation of a maze.

use std::fmt;

use anyhow::{bail, Result};
use itertools::Itertools;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};

/// Undirected view of the maze used by the solvers.
///
/// Node weights are the `(x, y)` coordinates of the cell.
pub type MazeGraph = Graph<(usize, usize), (), Undirected>;

/// Cardinal direction from a cell towards one of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Wall bit for this direction in a cell byte.
    fn bit(self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::East => 0b0010,
            Direction::South => 0b0100,
            Direction::West => 0b1000,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Coordinate offset `(dx, dy)` of the neighbour in this direction.
    fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// Rectangular maze with four wall bits per cell.
///
/// Cells are stored in row-major order. A freshly constructed maze is
/// fully walled; generators carve passages, which removes the wall on
/// both sides of the shared edge. The entrance is the top-left cell and
/// the exit the bottom-right cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Maze {
    /// Smallest accepted width or height.
    pub const MIN_DIM: usize = 4;
    /// Largest accepted width or height.
    pub const MAX_DIM: usize = 5000;

    const ALL_WALLS: u8 = 0b1111;

    /// New maze with every wall in place.
    pub fn new(width: usize, height: usize) -> Self {
        Maze {
            width,
            height,
            cells: vec![Self::ALL_WALLS; width * height],
        }
    }

    /// Rebuild a maze from raw cell bytes, as stored in a binary file.
    pub fn from_parts(width: usize, height: usize, cells: Vec<u8>) -> Result<Self> {
        if cells.len() != width * height {
            bail!(
                "cell data holds {} bytes, expected {} for a {}x{} maze",
                cells.len(),
                width * height,
                width,
                height
            );
        }
        Ok(Maze {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Entrance cell.
    pub fn start(&self) -> (usize, usize) {
        (0, 0)
    }

    /// Exit cell.
    pub fn goal(&self) -> (usize, usize) {
        (self.width - 1, self.height - 1)
    }

    /// Raw cell bytes in row-major order, for the binary codec.
    pub fn cell_bytes(&self) -> &[u8] {
        &self.cells
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Coordinates of the neighbour in `direction`, if it is on the grid.
    pub fn neighbor(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.delta();
        let nx = x as i64 + dx;
        let ny = y as i64 + dy;
        if nx < 0 || ny < 0 || nx >= self.width as i64 || ny >= self.height as i64 {
            return None;
        }
        Some((nx as usize, ny as usize))
    }

    /// Whether the passage from `(x, y)` towards `direction` is open.
    pub fn is_open(&self, x: usize, y: usize, direction: Direction) -> bool {
        self.cells[self.index(x, y)] & direction.bit() == 0
    }

    /// Remove the wall between `(x, y)` and its neighbour in `direction`.
    ///
    /// Carving through the outer border is a no-op; the boundary stays
    /// closed.
    pub fn carve(&mut self, x: usize, y: usize, direction: Direction) {
        if let Some((nx, ny)) = self.neighbor(x, y, direction) {
            let here = self.index(x, y);
            let there = self.index(nx, ny);
            self.cells[here] &= !direction.bit();
            self.cells[there] &= !direction.opposite().bit();
        }
    }

    /// Number of open passages in the maze.
    ///
    /// A perfect maze over `w * h` cells has exactly `w * h - 1`.
    pub fn passages(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_open(x, y, Direction::East) {
                    count += 1;
                }
                if self.is_open(x, y, Direction::South) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Build the graph view used by the solvers.
    ///
    /// Returns the graph together with the node indices in row-major
    /// cell order, so callers can map a cell to its node.
    pub fn to_graph(&self) -> (MazeGraph, Vec<NodeIndex>) {
        let mut graph = Graph::new_undirected();
        let mut nodes = Vec::with_capacity(self.width * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                nodes.push(graph.add_node((x, y)));
            }
        }
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_open(x, y, Direction::East) {
                    graph.add_edge(nodes[self.index(x, y)], nodes[self.index(x + 1, y)], ());
                }
                if self.is_open(x, y, Direction::South) {
                    graph.add_edge(nodes[self.index(x, y)], nodes[self.index(x, y + 1)], ());
                }
            }
        }
        (graph, nodes)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let top = (0..self.width)
                .map(|x| {
                    if self.is_open(x, y, Direction::North) {
                        "+  "
                    } else {
                        "+--"
                    }
                })
                .join("");
            writeln!(f, "{}+", top)?;
            let row = (0..self.width)
                .map(|x| {
                    if self.is_open(x, y, Direction::West) {
                        "   "
                    } else {
                        "|  "
                    }
                })
                .join("");
            writeln!(f, "{}|", row)?;
        }
        writeln!(f, "{}+", "+--".repeat(self.width))
    }
}
