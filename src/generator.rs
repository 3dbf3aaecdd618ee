//! Maze generation

use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::maze::{Direction, Maze};

/// Which carving algorithm a generate request selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateAlgorithm {
    /// Uniform random walk over the whole grid.
    AldousBroder,
    /// Row-by-row set merging.
    Eller,
}

/// Maze generator; carries the random state between carving steps.
pub struct MazeGenerator {
    random: StdRng,
}

impl MazeGenerator {
    /// Width used when a generate request carries no dimensions.
    pub const DEFAULT_WIDTH: usize = 20;
    /// Height used when a generate request carries no dimensions.
    pub const DEFAULT_HEIGHT: usize = 20;

    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }

    pub fn generate(&mut self, algorithm: GenerateAlgorithm, width: usize, height: usize) -> Maze {
        match algorithm {
            GenerateAlgorithm::AldousBroder => self.aldous_broder(width, height),
            GenerateAlgorithm::Eller => self.eller(width, height),
        }
    }

    /// Aldous-Broder: walk randomly, carving into every cell that has not
    /// been visited yet. Slow on large grids but uniform over all perfect
    /// mazes.
    fn aldous_broder(&mut self, width: usize, height: usize) -> Maze {
        let mut maze = Maze::new(width, height);
        let mut visited = vec![false; width * height];

        let mut x = self.random.gen_range(0..width);
        let mut y = self.random.gen_range(0..height);
        visited[y * width + x] = true;
        let mut remaining = width * height - 1;

        while remaining > 0 {
            let direction = Direction::ALL[self.random.gen_range(0..Direction::ALL.len())];
            if let Some((nx, ny)) = maze.neighbor(x, y, direction) {
                if !visited[ny * width + nx] {
                    maze.carve(x, y, direction);
                    visited[ny * width + nx] = true;
                    remaining -= 1;
                }
                x = nx;
                y = ny;
            }
        }
        maze
    }

    /// Eller's algorithm: one row at a time, tracking which cells belong
    /// to the same connected set. Neighbouring sets are merged at random,
    /// every set drops at least one passage into the next row, and the
    /// bottom row joins whatever is still separate.
    fn eller(&mut self, width: usize, height: usize) -> Maze {
        const UNSET: usize = usize::MAX;

        let mut maze = Maze::new(width, height);
        let mut sets = vec![UNSET; width];
        let mut next_set = 0;

        for y in 0..height {
            let bottom = y + 1 == height;
            for set in sets.iter_mut() {
                if *set == UNSET {
                    *set = next_set;
                    next_set += 1;
                }
            }

            for x in 0..width - 1 {
                let (a, b) = (sets[x], sets[x + 1]);
                if a != b && (bottom || self.random.gen_bool(0.5)) {
                    maze.carve(x, y, Direction::East);
                    for set in sets.iter_mut() {
                        if *set == b {
                            *set = a;
                        }
                    }
                }
            }
            if bottom {
                break;
            }

            let mut next_row = vec![UNSET; width];
            for set in sets.iter().copied().unique().collect::<Vec<_>>() {
                let mut columns: Vec<usize> = (0..width).filter(|&x| sets[x] == set).collect();
                columns.shuffle(&mut self.random);
                let keep = self.random.gen_range(1..=columns.len());
                for &x in &columns[..keep] {
                    maze.carve(x, y, Direction::South);
                    next_row[x] = set;
                }
            }
            sets = next_row;
        }
        maze
    }
}

#[cfg(test)]
mod tests {
    use petgraph::algo::connected_components;

    use super::{GenerateAlgorithm, MazeGenerator};

    #[test]
    fn aldous_broder_makes_a_perfect_maze() {
        let mut gen = MazeGenerator::new(Some(0));
        let maze = gen.generate(GenerateAlgorithm::AldousBroder, 12, 9);

        assert_eq!(maze.width(), 12);
        assert_eq!(maze.height(), 9);
        assert_eq!(maze.passages(), 12 * 9 - 1);
        let (graph, _) = maze.to_graph();
        assert_eq!(connected_components(&graph), 1);
    }

    #[test]
    fn eller_makes_a_perfect_maze() {
        let mut gen = MazeGenerator::new(Some(0));
        let maze = gen.generate(GenerateAlgorithm::Eller, 9, 14);

        assert_eq!(maze.width(), 9);
        assert_eq!(maze.height(), 14);
        assert_eq!(maze.passages(), 9 * 14 - 1);
        let (graph, _) = maze.to_graph();
        assert_eq!(connected_components(&graph), 1);
    }

    #[test]
    fn same_seed_reproduces_the_maze() {
        for algorithm in [GenerateAlgorithm::AldousBroder, GenerateAlgorithm::Eller] {
            let a = MazeGenerator::new(Some(42)).generate(algorithm, 8, 8);
            let b = MazeGenerator::new(Some(42)).generate(algorithm, 8, 8);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let a = MazeGenerator::new(Some(1)).generate(GenerateAlgorithm::Eller, 10, 10);
        let b = MazeGenerator::new(Some(2)).generate(GenerateAlgorithm::Eller, 10, 10);
        assert_ne!(a, b);
    }

    #[test]
    fn minimum_dimensions_are_supported() {
        let mut gen = MazeGenerator::new(Some(7));
        for algorithm in [GenerateAlgorithm::AldousBroder, GenerateAlgorithm::Eller] {
            let maze = gen.generate(algorithm, 4, 4);
            assert_eq!(maze.passages(), 4 * 4 - 1);
        }
    }
}
