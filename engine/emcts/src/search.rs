//! Sequence-tree EMCTS search.
//!
//! One iteration either expands a mutated+repaired child genome (while
//! the node is below the branching cap) or replays every child's
//! genome from the bound state and backs the results up. Iterations
//! repeat until the budget tracker says stop, then the best genome is
//! extracted by mean value.

use std::time::Instant;

use engine_core::{advance, noise, Action, BudgetTracker, GameModel, Heuristic, NodeId};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::EmctsConfig;
use crate::genome::{init_root_genome, mutate, repair, Genome};
use crate::tree::EvoTree;

/// Errors that can occur during search. All are configuration
/// violations detected before the first iteration.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("genome length must be at least 2, got {0}")]
    GenomeTooShort(usize),

    #[error("carried genome has length {got}, config expects {expected}")]
    GenomeLengthMismatch { expected: usize, got: usize },
}

/// Result of one search call.
#[derive(Debug, Clone)]
pub struct EmctsResult {
    /// Best genome found (the root's own genome when nothing expanded)
    pub genome: Genome,

    /// The genome's committed first step
    pub action: Action,

    /// Mean value of the winning node
    pub value: f32,

    /// Iterations completed within budget
    pub iterations: u32,
}

/// EMCTS search state over a borrowed root state and heuristic.
pub struct EmctsSearch<'a, G: GameModel, H: Heuristic<G>> {
    root_state: &'a G,
    heuristic: &'a H,
    config: EmctsConfig,
    seed_genome: Option<Genome>,
    tree: Option<EvoTree>,
}

impl<'a, G: GameModel, H: Heuristic<G>> EmctsSearch<'a, G, H> {
    pub fn new(root_state: &'a G, heuristic: &'a H, config: EmctsConfig) -> Self {
        Self {
            root_state,
            heuristic,
            config,
            seed_genome: None,
            tree: None,
        }
    }

    /// Seed the root with a genome carried over from a previous
    /// decision instead of building one by OSLA. The genome is still
    /// repaired against the current root state.
    pub fn with_root_genome(mut self, genome: Genome) -> Self {
        self.seed_genome = Some(genome);
        self
    }

    /// Run the search until the budget is exhausted and extract the
    /// best genome.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<EmctsResult, SearchError> {
        if self.config.genome_length < 2 {
            return Err(SearchError::GenomeTooShort(self.config.genome_length));
        }

        let root_genome = match self.seed_genome.take() {
            Some(mut genome) => {
                if genome.len() != self.config.genome_length {
                    return Err(SearchError::GenomeLengthMismatch {
                        expected: self.config.genome_length,
                        got: genome.len(),
                    });
                }
                repair(
                    self.root_state,
                    &mut genome,
                    self.heuristic,
                    self.config.epsilon,
                    rng,
                );
                genome
            }
            None => init_root_genome(
                self.root_state,
                self.heuristic,
                self.config.genome_length,
                self.config.epsilon,
                rng,
            ),
        };

        let mut tree = EvoTree::new(root_genome);
        let mut tracker = BudgetTracker::new(self.config.budget);

        loop {
            let iteration_start = Instant::now();

            self.iterate(&mut tree, rng);

            tracker.record_iteration(iteration_start.elapsed());
            tracker.add_forward_calls(self.config.max_depth);
            if tracker.should_stop(self.config.max_depth) {
                break;
            }
        }

        let eps = self.config.epsilon;
        let root = tree.root();
        let (genome, value) = match tree.best_child(root, eps) {
            Some(child_id) => {
                let child = tree.get(child_id);
                (child.genome.clone(), child.mean_value(eps))
            }
            // No expanded children: the root's own plan stands.
            None => {
                let node = tree.get(root);
                (node.genome.clone(), node.mean_value(eps))
            }
        };

        debug!(
            iterations = tracker.iterations(),
            children = tree.get(root).children.len(),
            value,
            "search finished"
        );

        let action = genome.first();
        self.tree = Some(tree);

        Ok(EmctsResult {
            genome,
            action,
            value,
            iterations: tracker.iterations(),
        })
    }

    /// One search iteration at the root: expand while below the
    /// branching cap, otherwise evaluate every child and back up.
    fn iterate(&self, tree: &mut EvoTree, rng: &mut ChaCha20Rng) {
        if self.root_state.is_terminal() {
            return;
        }

        let node_id = tree.root();
        if tree.get(node_id).depth >= self.config.max_depth {
            return;
        }

        if !tree.get(node_id).is_fully_expanded(self.config.branch_factor) {
            self.expand(tree, node_id, rng);
        } else {
            self.evaluate_children(tree, node_id, rng);
            tree.backup(node_id);
        }
    }

    /// Mutate the node's genome, repair the result against the bound
    /// state, and append the child.
    fn expand(&self, tree: &mut EvoTree, node_id: NodeId, rng: &mut ChaCha20Rng) {
        let mut child_genome = mutate(&tree.get(node_id).genome, rng);
        repair(
            self.root_state,
            &mut child_genome,
            self.heuristic,
            self.config.epsilon,
            rng,
        );

        let child_id = tree.add_child(node_id, child_genome);
        trace!(child = child_id.0, "expanded mutated genome");
    }

    /// Replay every child's genome from the bound state on a private
    /// copy, accumulating the noise-perturbed heuristic per step. An
    /// early terminal state normalizes the accumulated value by the
    /// steps taken and ends that child's replay.
    fn evaluate_children(&self, tree: &mut EvoTree, node_id: NodeId, rng: &mut ChaCha20Rng) {
        let children = tree.get(node_id).children.clone();

        for child_id in children {
            let genome = tree.get(child_id).genome.clone();

            let mut replay = self.root_state.clone();
            let mut accumulated = 0.0f32;
            let mut steps = 0u32;

            for action in genome.genes() {
                advance(&mut replay, *action, rng);
                steps += 1;
                accumulated += noise(
                    self.heuristic.evaluate(&replay),
                    self.config.epsilon,
                    rng.gen(),
                );
                if replay.is_terminal() {
                    accumulated /= steps as f32;
                    break;
                }
            }

            let child = tree.get_mut(child_id);
            child.visit_count += 1;
            child.total_value += accumulated;

            trace!(child = child_id.0, accumulated, "child genome replayed");
        }
    }

    /// The search tree, for inspection after `run`.
    pub fn tree(&self) -> Option<&EvoTree> {
        self.tree.as_ref()
    }
}

/// Convenience function to run a single search.
pub fn run_emcts<G: GameModel, H: Heuristic<G>>(
    root_state: &G,
    heuristic: &H,
    config: EmctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<EmctsResult, SearchError> {
    let mut search = EmctsSearch::new(root_state, heuristic, config);
    search.run(rng)
}
