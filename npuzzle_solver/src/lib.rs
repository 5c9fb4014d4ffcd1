//! # N-Puzzle Solver Library
//!
//! This library models the sliding-tile N-puzzle (8-puzzle, 15-puzzle, 24-puzzle, ...)
//! and solves it with best-first graph search under one of three cost functions:
//! Uniform Cost Search, A* with the misplaced-tiles heuristic, and A* with the
//! Manhattan-distance heuristic.
//!
//! It is used by two binaries:
//! - `npuzzle`: Reads a puzzle (interactively, from flags, or from a built-in sample),
//!   prints every board the search pops and reports the result.
//! - `algorithm_evaluator`: Runs every algorithm on every built-in sample and
//!   tabulates the search statistics.
//!
//! ## Modules
//! - `engine`: The board representation (`Board`), its duplicate-detection key
//!   (`BoardKey`), the goal test and successor generation.
//! - `heuristics`: The `Algorithm` selection and the heuristic functions.
//! - `solver`: The search loop (`Search`) and its report (`SearchOutcome`).
//! - `utils`: Size validation, text parsing and the built-in sample puzzles.
//! - `error`: The `PuzzleError` type returned for invalid input.
//!
//! The search is single threaded and keeps every expanded configuration in memory.
//! Memory grows with the number of boards pushed, with no eviction, which is fine
//! for 8- and 15-puzzles but can be exhausted by hard instances of larger sizes.
//!
//! ```
//! use npuzzle_solver::engine::Board;
//! use npuzzle_solver::heuristics::Algorithm;
//! use npuzzle_solver::solver::solve;
//!
//! let board = Board::make_initial(vec![1, 2, 3, 4, 5, 6, 0, 7, 8], 3).unwrap();
//! let outcome = solve(board, Algorithm::UniformCost);
//! assert_eq!(outcome.stats().unwrap().depth, 2);
//! ```

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use error::{PuzzleError, Result};
