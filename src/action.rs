//! Executable actions produced by the argument processor.
//!
//! The processor only constructs actions; running them is the caller's
//! job, in the order they appeared on the command line. Consecutive
//! actions communicate through the [`ExecutionContext`]: generate and
//! load install a maze, solve and save operate on the installed one.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::binary;
use crate::generator::{GenerateAlgorithm, MazeGenerator};
use crate::maze::Maze;
use crate::solver::{self, MazeSolution, SolveAlgorithm};
use crate::svg;

/// On-disk representation selected by a save action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Vector,
    Binary,
}

/// One unit of deferred work requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate {
        algorithm: GenerateAlgorithm,
        /// `None` means the generator default.
        width: Option<usize>,
        height: Option<usize>,
        /// `None` means a non-deterministic seed.
        seed: Option<u64>,
    },
    Save {
        format: SaveFormat,
        path: PathBuf,
    },
    Load {
        path: PathBuf,
    },
    Solve {
        algorithm: SolveAlgorithm,
    },
}

/// Maze state shared by the actions of one invocation.
#[derive(Default)]
pub struct ExecutionContext {
    maze: Option<Maze>,
    solution: Option<MazeSolution>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    pub fn solution(&self) -> Option<&MazeSolution> {
        self.solution.as_ref()
    }
}

impl Action {
    /// Run this action against `context`.
    pub fn execute(&self, context: &mut ExecutionContext) -> Result<()> {
        match self {
            Action::Generate {
                algorithm,
                width,
                height,
                seed,
            } => {
                let mut generator = MazeGenerator::new(*seed);
                let maze = generator.generate(
                    *algorithm,
                    width.unwrap_or(MazeGenerator::DEFAULT_WIDTH),
                    height.unwrap_or(MazeGenerator::DEFAULT_HEIGHT),
                );
                context.maze = Some(maze);
                context.solution = None;
            }
            Action::Save { format, path } => {
                let maze = context
                    .maze
                    .as_ref()
                    .context("nothing to save; generate or load a maze first")?;
                match format {
                    SaveFormat::Vector => svg::write(path, maze, context.solution.as_ref())?,
                    SaveFormat::Binary => binary::write(path, maze)?,
                }
            }
            Action::Load { path } => {
                context.maze = Some(binary::read(path)?);
                context.solution = None;
            }
            Action::Solve { algorithm } => {
                let maze = context
                    .maze
                    .as_ref()
                    .context("nothing to solve; generate or load a maze first")?;
                let solution = solver::solve(maze, *algorithm)?;
                solution.print_report();
                context.solution = Some(solution);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::generator::GenerateAlgorithm;
    use crate::solver::SolveAlgorithm;

    use super::{Action, ExecutionContext, SaveFormat};

    #[test]
    fn generate_installs_a_maze() {
        let mut context = ExecutionContext::new();
        Action::Generate {
            algorithm: GenerateAlgorithm::Eller,
            width: Some(6),
            height: Some(5),
            seed: Some(1),
        }
        .execute(&mut context)
        .unwrap();

        let maze = context.maze().unwrap();
        assert_eq!((maze.width(), maze.height()), (6, 5));
        assert!(context.solution().is_none());
    }

    #[test]
    fn save_and_solve_need_a_maze() {
        let mut context = ExecutionContext::new();
        let save = Action::Save {
            format: SaveFormat::Binary,
            path: "never-written.bin".into(),
        };
        let solve = Action::Solve {
            algorithm: SolveAlgorithm::BreadthFirst,
        };
        assert!(save.execute(&mut context).is_err());
        assert!(solve.execute(&mut context).is_err());
    }

    #[test]
    fn save_load_round_trip_through_the_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.bin");

        let mut first = ExecutionContext::new();
        Action::Generate {
            algorithm: GenerateAlgorithm::AldousBroder,
            width: None,
            height: None,
            seed: Some(9),
        }
        .execute(&mut first)
        .unwrap();
        Action::Save {
            format: SaveFormat::Binary,
            path: path.clone(),
        }
        .execute(&mut first)
        .unwrap();

        let mut second = ExecutionContext::new();
        Action::Load { path }.execute(&mut second).unwrap();
        assert_eq!(second.maze(), first.maze());
    }

    #[test]
    fn solve_then_vector_save_draws_the_route() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maze.svg");

        let mut context = ExecutionContext::new();
        let plan = [
            Action::Generate {
                algorithm: GenerateAlgorithm::Eller,
                width: Some(8),
                height: Some(8),
                seed: Some(4),
            },
            Action::Solve {
                algorithm: SolveAlgorithm::Manhattan,
            },
            Action::Save {
                format: SaveFormat::Vector,
                path: path.clone(),
            },
        ];
        for action in &plan {
            action.execute(&mut context).unwrap();
        }

        assert!(context.solution().is_some());
        let document = fs::read_to_string(path).unwrap();
        assert!(document.contains("<polyline"));
    }

    #[test]
    fn generate_discards_the_previous_solution() {
        let mut context = ExecutionContext::new();
        Action::Generate {
            algorithm: GenerateAlgorithm::Eller,
            width: Some(5),
            height: Some(5),
            seed: Some(2),
        }
        .execute(&mut context)
        .unwrap();
        Action::Solve {
            algorithm: SolveAlgorithm::DepthFirst,
        }
        .execute(&mut context)
        .unwrap();
        assert!(context.solution().is_some());

        Action::Generate {
            algorithm: GenerateAlgorithm::AldousBroder,
            width: None,
            height: None,
            seed: Some(3),
        }
        .execute(&mut context)
        .unwrap();
        assert!(context.solution().is_none());
    }
}
