//! Maze toolkit: generate, solve, save and load mazes.
//!
//! The command line is a flat list of action tokens, each selecting one
//! unit of work. [`args::ArgProcessor`] turns the token list into an
//! ordered plan of [`action::Action`]s; executing the plan against an
//! [`action::ExecutionContext`] runs the requested generators, solvers
//! and codecs in input order.
//!
//! # Examples
//! ```
//! use mazekit::action::ExecutionContext;
//! use mazekit::args::ArgProcessor;
//!
//! let tokens = ["generate-eller", "9", "9", "7", "solve-breadth"]
//!     .map(String::from)
//!     .to_vec();
//! let actions = ArgProcessor::new(tokens).process().unwrap();
//!
//! let mut context = ExecutionContext::new();
//! for action in &actions {
//!     action.execute(&mut context).unwrap();
//! }
//! assert!(context.solution().is_some());
//! ```

pub mod action;
pub mod args;
pub mod binary;
pub mod generator;
pub mod maze;
pub mod solver;
pub mod svg;
