//! Action selection policies for the actor.
//!
//! A policy owns its search configuration and RNG and answers one
//! question: which action should the controlled agent play from this
//! state. The EMCTS policy additionally carries its winning genome from
//! one decision to the next.

use anyhow::Result;
use emcts::{EmctsConfig, EmctsSearch, Genome};
use engine_core::Action;
use games_gridrun::{GridHeuristic, GridRun};
use mcts::{MctsConfig, MctsSearch};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

/// Trait for action selection policies.
pub trait Policy {
    /// Select an action for the controlled agent.
    fn select_action(&mut self, state: &GridRun) -> Result<Action>;

    /// Forget any state carried between decisions. Called at the start
    /// of every episode.
    fn reset(&mut self) {}
}

/// Policy backed by the action-tree search.
pub struct MctsAgent {
    config: MctsConfig,
    heuristic: GridHeuristic,
    rng: ChaCha20Rng,
}

impl MctsAgent {
    pub fn new(config: MctsConfig, heuristic: GridHeuristic, seed: u64) -> Self {
        Self {
            config,
            heuristic,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for MctsAgent {
    fn select_action(&mut self, state: &GridRun) -> Result<Action> {
        let Self {
            config,
            heuristic,
            rng,
        } = self;

        let mut search = MctsSearch::new(state, heuristic, config.clone());
        let result = search.run(rng)?;

        debug!(
            action = ?result.action,
            value = result.value,
            iterations = result.iterations,
            "mcts move selected"
        );
        Ok(result.action)
    }
}

/// Policy backed by the sequence-tree search. The winning genome is
/// shifted by one step and seeds the next decision's root, so the plan
/// survives across moves instead of being rebuilt from scratch.
pub struct EmctsAgent {
    config: EmctsConfig,
    heuristic: GridHeuristic,
    rng: ChaCha20Rng,
    carried: Option<Genome>,
}

impl EmctsAgent {
    pub fn new(config: EmctsConfig, heuristic: GridHeuristic, seed: u64) -> Self {
        Self {
            config,
            heuristic,
            rng: ChaCha20Rng::seed_from_u64(seed),
            carried: None,
        }
    }

    /// The genome that will seed the next decision, if any.
    pub fn carried_genome(&self) -> Option<&Genome> {
        self.carried.as_ref()
    }
}

impl Policy for EmctsAgent {
    fn select_action(&mut self, state: &GridRun) -> Result<Action> {
        let Self {
            config,
            heuristic,
            rng,
            carried,
        } = self;

        let mut search = EmctsSearch::new(state, heuristic, config.clone());
        if let Some(genome) = carried.take() {
            search = search.with_root_genome(genome);
        }
        let result = search.run(rng)?;

        // The first gene is consumed by this move. The vacated slot at
        // the end repeats the last gene so the plan keeps its length.
        let tail = result.genome.genes().last().copied().unwrap_or(Action::Stop);
        *carried = Some(result.genome.shifted(tail));

        debug!(
            action = ?result.action,
            value = result.value,
            iterations = result.iterations,
            "emcts move selected"
        );
        Ok(result.action)
    }

    fn reset(&mut self) {
        self.carried = None;
    }
}
