//! CLI for the maze toolkit

use clap::Parser;
use mazekit::action::ExecutionContext;
use mazekit::args::ArgProcessor;

const ACTION_HELP: &str = "\
Action tokens:
  generate-ab [WIDTH HEIGHT] [SEED]     Generate with the Aldous-Broder algorithm
  generate-eller [WIDTH HEIGHT] [SEED]  Generate with Eller's algorithm
  save-vector PATH.svg                  Save the current maze as an SVG drawing
  save-binary PATH                      Save the current maze as a binary file
  load-binary PATH                      Load a maze from a binary file
  solve-manhattan                       Solve with Dijkstra, manhattan heuristic
  solve-euclidean                       Solve with Dijkstra, euclidean heuristic
  solve-breadth                         Solve with breadth-first search
  solve-depth                           Solve with depth-first search

A generate token takes no values (default size, random seed), a single
seed, width and height, or width, height and seed. Dimensions must lie
in 4..=5000. Actions run left to right; solves and saves apply to the
most recently generated or loaded maze.";

/// Maze toolkit: generate, solve, save and load mazes in one invocation
#[derive(Parser, Debug)]
#[command(version, about, long_about = None, after_help = ACTION_HELP)]
struct Args {
    /// Action tokens, processed left to right
    #[arg(required = true, value_name = "TOKEN")]
    tokens: Vec<String>,
}

/// Parse the action plan, then run it in input order
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let actions = ArgProcessor::new(args.tokens).process()?;
    let mut context = ExecutionContext::new();
    for action in &actions {
        action.execute(&mut context)?;
    }
    Ok(())
}
