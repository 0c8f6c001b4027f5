//! Core traits and shared infrastructure for the tree-search engines
//!
//! This crate provides the abstractions both search engines build on:
//! - `GameModel`: the simulated-state interface (step, terminal, layout)
//! - `Heuristic`: non-terminal state evaluation
//! - `Budget`/`BudgetTracker`: time/iteration/forward-call stopping rules
//! - `NodeId`: arena node handles used by both tree variants
//! - selection math: `normalise`, `noise`, `ScoreStats`

pub mod arena;
pub mod budget;
pub mod game;
pub mod heuristic;
pub mod math;

// Re-export main types for convenience
pub use arena::NodeId;
pub use budget::{Budget, BudgetTracker};
pub use game::{advance, safe_random_action, Action, Board, Coord, GameModel, Tile};
pub use heuristic::{Heuristic, HeuristicKind};
pub use math::{noise, normalise, ScoreStats};
