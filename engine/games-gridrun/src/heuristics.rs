//! Heuristics for GridRun states.
//!
//! Both score into roughly `[0, 1]`: elimination scores 0, reaching the
//! goal scores 1, everything else scores by progress toward the goal.

use engine_core::{Action, Coord, GameModel, Heuristic, HeuristicKind};

use crate::GridRun;

/// Goal-distance progress plus survival.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomHeuristic;

impl CustomHeuristic {
    pub fn new() -> Self {
        Self
    }

    fn progress(state: &GridRun) -> f32 {
        let Some(goal) = state.goal() else {
            // No goal on the board: surviving is all that counts.
            return 0.5;
        };
        let dist = state.agent_position().manhattan(goal);
        let span = (state.board().width() + state.board().height()) as f32;
        0.5 + 0.5 * (1.0 - dist as f32 / span)
    }
}

impl Heuristic<GridRun> for CustomHeuristic {
    fn evaluate(&self, state: &GridRun) -> f32 {
        if !state.controlled_alive() {
            return 0.0;
        }
        if state.reached_goal() {
            return 1.0;
        }
        Self::progress(state)
    }
}

/// `CustomHeuristic` with a penalty per hazard adjacent to the agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdvancedHeuristic {
    base: CustomHeuristic,
}

const HAZARD_PENALTY: f32 = 0.1;

impl AdvancedHeuristic {
    pub fn new() -> Self {
        Self {
            base: CustomHeuristic::new(),
        }
    }

    fn adjacent_hazards(state: &GridRun) -> u32 {
        let pos: Coord = state.agent_position();
        Action::ALL
            .iter()
            .filter(|a| !matches!(a, Action::Stop))
            .filter(|a| state.board().is_hazard(pos.shifted(**a)))
            .count() as u32
    }
}

impl Heuristic<GridRun> for AdvancedHeuristic {
    fn evaluate(&self, state: &GridRun) -> f32 {
        let base = self.base.evaluate(state);
        if !state.controlled_alive() || state.reached_goal() {
            return base;
        }
        (base - HAZARD_PENALTY * Self::adjacent_hazards(state) as f32).max(0.0)
    }
}

/// Heuristic selected at runtime by `HeuristicKind`.
#[derive(Debug, Clone, Copy)]
pub enum GridHeuristic {
    Custom(CustomHeuristic),
    Advanced(AdvancedHeuristic),
}

impl GridHeuristic {
    pub fn from_kind(kind: HeuristicKind) -> Self {
        match kind {
            HeuristicKind::Custom => Self::Custom(CustomHeuristic::new()),
            HeuristicKind::Advanced => Self::Advanced(AdvancedHeuristic::new()),
        }
    }
}

impl Heuristic<GridRun> for GridHeuristic {
    fn evaluate(&self, state: &GridRun) -> f32 {
        match self {
            Self::Custom(h) => h.evaluate(state),
            Self::Advanced(h) => h.evaluate(state),
        }
    }
}
