//! Code-breaking solver
//!
//! This module contains the entropy evaluator, the guess selectors and the
//! select/observe/prune loop that ties them together.

mod engine;
pub mod entropy;
pub mod strategy;

pub use engine::{RoundReport, SolveError, SolveObserver, SolveReport, Solver, solve_secret};
pub use strategy::{
    DEFAULT_SEED, EntropySelector, GuessSelector, RandomSelector, Selection, SelectorType,
    evaluation_pool,
};
