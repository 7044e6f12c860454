//! Mastermind Entropy
//!
//! An entropy-guided solver for Bulls & Cows style code-breaking games, with
//! classic (bulls/cows) and positional (per-position marks) feedback.
//!
//! # Quick Start
//!
//! ```rust
//! use mastermind_entropy::core::{Classic, Code, CodeSpace, FeedbackRule};
//! use mastermind_entropy::solver::{EntropySelector, Solver};
//!
//! // Every 3-digit code with distinct digits from 0-9
//! let space = CodeSpace::new(10, 3).unwrap();
//! let secret = Code::parse("123").unwrap();
//!
//! let fb = Classic.feedback(&secret, &Code::parse("321").unwrap());
//! assert_eq!((fb.bulls, fb.cows), (1, 2));
//!
//! let solver = Solver::new(Classic, EntropySelector, &space);
//! let report = solver.solve(&secret).unwrap();
//! assert_eq!(report.guesses, 2);
//! ```

// Core domain types
pub mod core;

// Solving algorithms
pub mod solver;

// Simulation parameters
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;
