//! Command-line argument processing.
//!
//! The token grammar is small but irregular: option words are mixed with
//! variable-count positional values, several options may appear in one
//! invocation, and a generate request is classified by how many values
//! follow it before the next recognized option. The processor walks the
//! token list left to right and builds one [`Action`] per recognized
//! option; the first malformed token aborts the whole run, because a
//! partially valid plan is unsafe to execute.

use std::path::PathBuf;

use thiserror::Error;

use crate::action::{Action, SaveFormat};
use crate::generator::GenerateAlgorithm;
use crate::maze::Maze;
use crate::solver::SolveAlgorithm;
use crate::svg;

/// Errors produced while turning raw tokens into actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgError {
    /// A token where an option was expected matches no table entry.
    #[error("unrecognized option `{token}` at position {index}")]
    UnrecognizedOption { token: String, index: usize },

    /// An option's trailing value count fits none of its accepted shapes.
    #[error("`{option}` does not accept {found} trailing value(s)")]
    InvalidArity { option: &'static str, found: usize },

    /// A trailing value failed integer parsing or range validation.
    #[error("invalid value `{token}` for `{option}`: {reason}")]
    InvalidValue {
        option: &'static str,
        token: String,
        reason: &'static str,
    },

    /// A vector save path without the required `.svg` extension.
    #[error("`{option}` expects a .svg path, got `{path}`")]
    InvalidExtension { option: &'static str, path: String },
}

/// Every recognized command-line option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Generate a maze with the Aldous-Broder algorithm.
    GenerateAldousBroder,
    /// Generate a maze with Eller's algorithm.
    GenerateEller,
    /// Save the current maze as an SVG drawing.
    SaveVector,
    /// Save the current maze as a binary file.
    SaveBinary,
    /// Load a maze from a binary file.
    LoadBinary,
    /// Solve using Dijkstra with a manhattan distance heuristic.
    SolveManhattan,
    /// Solve using Dijkstra with a euclidean distance heuristic.
    SolveEuclidean,
    /// Solve using breadth-first search.
    SolveBreadth,
    /// Solve using depth-first search.
    SolveDepth,
}

/// The closed vocabulary of option spellings.
pub const OPTION_TABLE: [(&str, OptionKind); 9] = [
    ("generate-ab", OptionKind::GenerateAldousBroder),
    ("generate-eller", OptionKind::GenerateEller),
    ("save-vector", OptionKind::SaveVector),
    ("save-binary", OptionKind::SaveBinary),
    ("load-binary", OptionKind::LoadBinary),
    ("solve-manhattan", OptionKind::SolveManhattan),
    ("solve-euclidean", OptionKind::SolveEuclidean),
    ("solve-breadth", OptionKind::SolveBreadth),
    ("solve-depth", OptionKind::SolveDepth),
];

impl OptionKind {
    /// Look a raw token up in the option table.
    pub fn from_token(token: &str) -> Option<OptionKind> {
        OPTION_TABLE
            .iter()
            .find(|(spelling, _)| *spelling == token)
            .map(|&(_, kind)| kind)
    }

    /// The canonical spelling of this option.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKind::GenerateAldousBroder => "generate-ab",
            OptionKind::GenerateEller => "generate-eller",
            OptionKind::SaveVector => "save-vector",
            OptionKind::SaveBinary => "save-binary",
            OptionKind::LoadBinary => "load-binary",
            OptionKind::SolveManhattan => "solve-manhattan",
            OptionKind::SolveEuclidean => "solve-euclidean",
            OptionKind::SolveBreadth => "solve-breadth",
            OptionKind::SolveDepth => "solve-depth",
        }
    }
}

/// Classification of a generate request by the values that trail it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateShape {
    /// No values: default size, non-deterministic seed.
    Default,
    /// One value: a seed.
    SeedOnly,
    /// Two values: width and height.
    DimsOnly,
    /// Three values: width, height and seed.
    FullySpecified,
    /// Any other count, or a value failing its parse or range check.
    Invalid,
}

impl GenerateShape {
    /// Classify the span of positional tokens that follows a generate
    /// option. The arity is self-describing: a lone value is a seed, a
    /// pair is the dimensions, a triple is dimensions plus seed.
    pub fn classify(span: &[String]) -> GenerateShape {
        match span {
            [] => GenerateShape::Default,
            [seed] if seed.parse::<u64>().is_ok() => GenerateShape::SeedOnly,
            [w, h] if parse_dim(w).is_some() && parse_dim(h).is_some() => GenerateShape::DimsOnly,
            [w, h, seed]
                if parse_dim(w).is_some()
                    && parse_dim(h).is_some()
                    && seed.parse::<u64>().is_ok() =>
            {
                GenerateShape::FullySpecified
            }
            _ => GenerateShape::Invalid,
        }
    }
}

/// Turns one invocation's raw tokens into an ordered action plan.
///
/// The processor is single use: [`process`](Self::process) consumes it
/// and hands ownership of the produced actions to the caller, so the
/// plan is a pure function of the token list fixed at construction.
pub struct ArgProcessor {
    arguments: Vec<String>,
}

impl ArgProcessor {
    pub fn new(arguments: Vec<String>) -> Self {
        Self { arguments }
    }

    /// Validate that an already-parsed integer is usable as a maze
    /// dimension.
    pub fn valid_dim(value: i64) -> bool {
        (Maze::MIN_DIM as i64..=Maze::MAX_DIM as i64).contains(&value)
    }

    /// Process the token list into actions, preserving input order.
    ///
    /// Later actions may depend on state produced by earlier ones, so
    /// the returned order is semantically significant. The first error
    /// anywhere aborts the whole call; no partial plan is returned.
    pub fn process(self) -> Result<Vec<Action>, ArgError> {
        let mut actions = Vec::new();
        let mut cursor = 0;
        while cursor < self.arguments.len() {
            let token = &self.arguments[cursor];
            let kind = match OptionKind::from_token(token) {
                Some(kind) => kind,
                None => {
                    return Err(ArgError::UnrecognizedOption {
                        token: token.clone(),
                        index: cursor,
                    })
                }
            };
            let (action, next) = self.build_action(kind, cursor)?;
            actions.push(action);
            cursor = next;
        }
        Ok(actions)
    }

    /// Build the action for the option at `cursor`; returns it together
    /// with the index just past the consumed value span.
    fn build_action(&self, kind: OptionKind, cursor: usize) -> Result<(Action, usize), ArgError> {
        let end = find_next_option(&self.arguments, cursor + 1);
        let span = &self.arguments[cursor + 1..end];
        let action = match kind {
            OptionKind::GenerateAldousBroder => {
                build_generate(GenerateAlgorithm::AldousBroder, kind, span)?
            }
            OptionKind::GenerateEller => build_generate(GenerateAlgorithm::Eller, kind, span)?,
            OptionKind::SaveVector => Action::Save {
                format: SaveFormat::Vector,
                path: require_vector_path(kind, span)?,
            },
            OptionKind::SaveBinary => Action::Save {
                format: SaveFormat::Binary,
                path: require_path(kind, span)?,
            },
            OptionKind::LoadBinary => Action::Load {
                path: require_path(kind, span)?,
            },
            OptionKind::SolveManhattan => build_solve(SolveAlgorithm::Manhattan, kind, span)?,
            OptionKind::SolveEuclidean => build_solve(SolveAlgorithm::Euclidean, kind, span)?,
            OptionKind::SolveBreadth => build_solve(SolveAlgorithm::BreadthFirst, kind, span)?,
            OptionKind::SolveDepth => build_solve(SolveAlgorithm::DepthFirst, kind, span)?,
        };
        Ok((action, end))
    }
}

/// Index of the next recognized option at or after `start`, or the list
/// length when the remaining tokens are all positional. Bounds the value
/// span that belongs to the option just before `start`.
fn find_next_option(tokens: &[String], start: usize) -> usize {
    tokens[start..]
        .iter()
        .position(|token| OptionKind::from_token(token).is_some())
        .map_or(tokens.len(), |offset| start + offset)
}

fn parse_dim(token: &str) -> Option<usize> {
    let value = token.parse::<i64>().ok()?;
    ArgProcessor::valid_dim(value).then(|| value as usize)
}

fn require_dim(option: OptionKind, token: &str) -> Result<usize, ArgError> {
    let value: i64 = token.parse().map_err(|_| ArgError::InvalidValue {
        option: option.as_str(),
        token: token.to_string(),
        reason: "not an integer",
    })?;
    if !ArgProcessor::valid_dim(value) {
        return Err(ArgError::InvalidValue {
            option: option.as_str(),
            token: token.to_string(),
            reason: "dimension out of range",
        });
    }
    Ok(value as usize)
}

fn require_seed(option: OptionKind, token: &str) -> Result<u64, ArgError> {
    token.parse().map_err(|_| ArgError::InvalidValue {
        option: option.as_str(),
        token: token.to_string(),
        reason: "not a valid seed",
    })
}

fn build_generate(
    algorithm: GenerateAlgorithm,
    option: OptionKind,
    span: &[String],
) -> Result<Action, ArgError> {
    let (width, height, seed) = match GenerateShape::classify(span) {
        GenerateShape::Default => (None, None, None),
        GenerateShape::SeedOnly => (None, None, Some(require_seed(option, &span[0])?)),
        GenerateShape::DimsOnly => (
            Some(require_dim(option, &span[0])?),
            Some(require_dim(option, &span[1])?),
            None,
        ),
        GenerateShape::FullySpecified => (
            Some(require_dim(option, &span[0])?),
            Some(require_dim(option, &span[1])?),
            Some(require_seed(option, &span[2])?),
        ),
        GenerateShape::Invalid => return Err(generate_defect(option, span)),
    };
    Ok(Action::Generate {
        algorithm,
        width,
        height,
        seed,
    })
}

/// Explain why a generate span failed classification.
fn generate_defect(option: OptionKind, span: &[String]) -> ArgError {
    let probe = || -> Result<(), ArgError> {
        match span {
            [seed] => {
                require_seed(option, seed)?;
            }
            [w, h] => {
                require_dim(option, w)?;
                require_dim(option, h)?;
            }
            [w, h, seed] => {
                require_dim(option, w)?;
                require_dim(option, h)?;
                require_seed(option, seed)?;
            }
            _ => {}
        }
        Ok(())
    };
    match probe() {
        Err(defect) => defect,
        // The span length itself was the problem.
        Ok(()) => ArgError::InvalidArity {
            option: option.as_str(),
            found: span.len(),
        },
    }
}

/// Save and load take exactly one path token. A recognized option token
/// in path position never reaches here; the scanner already ended the
/// span before it, which surfaces as a missing argument.
fn require_path(option: OptionKind, span: &[String]) -> Result<PathBuf, ArgError> {
    match span {
        [path] => Ok(PathBuf::from(path)),
        _ => Err(ArgError::InvalidArity {
            option: option.as_str(),
            found: span.len(),
        }),
    }
}

fn require_vector_path(option: OptionKind, span: &[String]) -> Result<PathBuf, ArgError> {
    let path = require_path(option, span)?;
    let extension = path.extension().and_then(|e| e.to_str());
    if extension != Some(svg::EXTENSION) {
        return Err(ArgError::InvalidExtension {
            option: option.as_str(),
            path: path.display().to_string(),
        });
    }
    Ok(path)
}

/// Solve options take no trailing values and operate on the most
/// recently generated or loaded maze.
fn build_solve(
    algorithm: SolveAlgorithm,
    option: OptionKind,
    span: &[String],
) -> Result<Action, ArgError> {
    if !span.is_empty() {
        return Err(ArgError::InvalidArity {
            option: option.as_str(),
            found: span.len(),
        });
    }
    Ok(Action::Solve { algorithm })
}
