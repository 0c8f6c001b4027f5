//! Heuristic state evaluation.
//!
//! Non-terminal leaves are scored by a heuristic supplied by the game
//! crate. The searches only depend on this trait.

use crate::game::GameModel;

/// Scores a simulated state from the controlled agent's perspective.
/// Higher is better. Implementations must be pure with respect to the
/// state: evaluating never mutates anything.
pub trait Heuristic<G: GameModel> {
    fn evaluate(&self, state: &G) -> f32;
}

/// Selector for the bundled heuristic implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    Custom,
    Advanced,
}
