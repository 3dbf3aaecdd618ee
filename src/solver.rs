//! Route finding between maze entrance and exit.

use std::collections::VecDeque;

use anyhow::{bail, Result};
use petgraph::algo::astar;
use petgraph::graph::NodeIndex;

use crate::maze::{Maze, MazeGraph};

/// Which search a solve request selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveAlgorithm {
    /// Dijkstra guided by manhattan distance to the exit.
    Manhattan,
    /// Dijkstra guided by euclidean distance to the exit.
    Euclidean,
    /// Plain breadth-first search.
    BreadthFirst,
    /// Plain depth-first search.
    DepthFirst,
}

impl SolveAlgorithm {
    pub fn label(self) -> &'static str {
        match self {
            SolveAlgorithm::Manhattan => "Dijkstra with manhattan heuristic",
            SolveAlgorithm::Euclidean => "Dijkstra with euclidean heuristic",
            SolveAlgorithm::BreadthFirst => "breadth-first search",
            SolveAlgorithm::DepthFirst => "depth-first search",
        }
    }
}

/// Route from the entrance to the exit, including both endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeSolution {
    /// Cell coordinates along the route.
    pub path: Vec<(usize, usize)>,
    pub algorithm: SolveAlgorithm,
}

impl MazeSolution {
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Print solution report to console
    pub fn print_report(&self) {
        println!(
            "Found a route of {} steps using {}.",
            self.steps(),
            self.algorithm.label()
        );
    }
}

/// Search the maze graph for a route from entrance to exit.
///
/// All passages cost one step, so both heuristic searches and
/// breadth-first return shortest routes; depth-first returns the first
/// route it reaches.
pub fn solve(maze: &Maze, algorithm: SolveAlgorithm) -> Result<MazeSolution> {
    let (graph, nodes) = maze.to_graph();
    let start = nodes[0];
    let goal = nodes[maze.width() * maze.height() - 1];
    let (gx, gy) = maze.goal();

    let path_nodes = match algorithm {
        SolveAlgorithm::Manhattan => astar(
            &graph,
            start,
            |node| node == goal,
            |_| 1.0_f64,
            |node| {
                let (x, y) = graph[node];
                (x.abs_diff(gx) + y.abs_diff(gy)) as f64
            },
        )
        .map(|(_, path)| path),
        SolveAlgorithm::Euclidean => astar(
            &graph,
            start,
            |node| node == goal,
            |_| 1.0_f64,
            |node| {
                let (x, y) = graph[node];
                ((x.abs_diff(gx).pow(2) + y.abs_diff(gy).pow(2)) as f64).sqrt()
            },
        )
        .map(|(_, path)| path),
        SolveAlgorithm::BreadthFirst => breadth_first(&graph, start, goal),
        SolveAlgorithm::DepthFirst => depth_first(&graph, start, goal),
    };

    match path_nodes {
        Some(path_nodes) => Ok(MazeSolution {
            path: path_nodes.into_iter().map(|node| graph[node]).collect(),
            algorithm,
        }),
        None => bail!("maze has no route from entrance to exit"),
    }
}

fn breadth_first(graph: &MazeGraph, start: NodeIndex, goal: NodeIndex) -> Option<Vec<NodeIndex>> {
    let mut seen = vec![false; graph.node_count()];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    let mut queue = VecDeque::new();

    seen[start.index()] = true;
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        if node == goal {
            return Some(walk_back(&prev, start, goal));
        }
        for next in graph.neighbors(node) {
            if !seen[next.index()] {
                seen[next.index()] = true;
                prev[next.index()] = Some(node);
                queue.push_back(next);
            }
        }
    }
    None
}

fn depth_first(graph: &MazeGraph, start: NodeIndex, goal: NodeIndex) -> Option<Vec<NodeIndex>> {
    let mut seen = vec![false; graph.node_count()];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; graph.node_count()];
    let mut stack = vec![start];

    seen[start.index()] = true;
    while let Some(node) = stack.pop() {
        if node == goal {
            return Some(walk_back(&prev, start, goal));
        }
        for next in graph.neighbors(node) {
            if !seen[next.index()] {
                seen[next.index()] = true;
                prev[next.index()] = Some(node);
                stack.push(next);
            }
        }
    }
    None
}

/// Rebuild the route from the predecessor chain, entrance first.
fn walk_back(prev: &[Option<NodeIndex>], start: NodeIndex, goal: NodeIndex) -> Vec<NodeIndex> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match prev[current.index()] {
            Some(node) => {
                path.push(node);
                current = node;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
