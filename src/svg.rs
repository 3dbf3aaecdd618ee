//! Vector rendering of mazes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::maze::{Direction, Maze};
use crate::solver::MazeSolution;

/// Required file extension for vector output.
pub const EXTENSION: &str = "svg";

/// Edge length of one cell in user units.
const CELL: usize = 10;
const MARGIN: usize = 5;
const WALL_COLOR: &str = "#1a1a1a";
const ROUTE_COLOR: &str = "#c62828";

/// Render the maze, and the solved route when one is given, as an SVG
/// document.
pub fn render(maze: &Maze, solution: Option<&MazeSolution>) -> String {
    let width = maze.width() * CELL + 2 * MARGIN;
    let height = maze.height() * CELL + 2 * MARGIN;

    let mut out = String::new();
    out.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
         viewBox=\"0 0 {width} {height}\">\n"
    ));
    out.push_str(&format!(
        "<rect width=\"{width}\" height=\"{height}\" fill=\"#ffffff\"/>\n"
    ));

    // North and west walls per cell, then the outer east and south border.
    for y in 0..maze.height() {
        for x in 0..maze.width() {
            if !maze.is_open(x, y, Direction::North) {
                out.push_str(&line(px(x), px(y), px(x + 1), px(y)));
            }
            if !maze.is_open(x, y, Direction::West) {
                out.push_str(&line(px(x), px(y), px(x), px(y + 1)));
            }
        }
    }
    out.push_str(&line(
        px(maze.width()),
        px(0),
        px(maze.width()),
        px(maze.height()),
    ));
    out.push_str(&line(
        px(0),
        px(maze.height()),
        px(maze.width()),
        px(maze.height()),
    ));

    if let Some(solution) = solution {
        let points = solution
            .path
            .iter()
            .map(|&(x, y)| format!("{},{}", center(x), center(y)))
            .join(" ");
        out.push_str(&format!(
            "<polyline points=\"{points}\" fill=\"none\" stroke=\"{ROUTE_COLOR}\" \
             stroke-width=\"2\"/>\n"
        ));
    }

    out.push_str("</svg>\n");
    out
}

/// Render to `path`.
pub fn write(path: &Path, maze: &Maze, solution: Option<&MazeSolution>) -> Result<()> {
    fs::write(path, render(maze, solution))
        .with_context(|| format!("cannot write {}", path.display()))
}

fn px(cell: usize) -> usize {
    MARGIN + cell * CELL
}

fn center(cell: usize) -> usize {
    MARGIN + cell * CELL + CELL / 2
}

fn line(x1: usize, y1: usize, x2: usize, y2: usize) -> String {
    format!(
        "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" \
         stroke=\"{WALL_COLOR}\" stroke-width=\"1\"/>\n"
    )
}
