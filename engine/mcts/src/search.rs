//! Action-tree MCTS search.
//!
//! One iteration = tree policy (expand or descend), rollout from the
//! selected node, backpropagation to the root. Iterations repeat until
//! the budget tracker says stop, then the best root action is extracted
//! by the configured policy.

use std::time::Instant;

use engine_core::{
    advance, noise, normalise, safe_random_action, Action, BudgetTracker, GameModel, Heuristic,
    NodeId, ScoreStats,
};
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::{ExtractionPolicy, MctsConfig};
use crate::tree::MctsTree;

/// Ceiling on the variance scaling factor in UCB1-tuned selection.
const VARIANCE_CLIP: f32 = 0.25;

/// Constant inside the variance term's confidence radius.
const VARIANCE_EXPLORATION: f32 = 5.0;

/// Errors that can occur during search.
///
/// Both variants are configuration/invariant violations: they mean the
/// tree is corrupt or the root was never expanded, and the decision
/// must fail loudly rather than default to an arbitrary action.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("selection found no eligible child at node {node}")]
    NoEligibleChild { node: u32 },

    #[error("no expanded children at the root")]
    NoExpandedChildren,
}

/// Result of one search call.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best action at the root per the extraction policy
    pub action: Action,

    /// Mean value at the root
    pub value: f32,

    /// Iterations completed within budget
    pub iterations: u32,

    /// Nodes in the final tree
    pub nodes: usize,
}

/// MCTS search state over a borrowed root state and heuristic.
pub struct MctsSearch<'a, G: GameModel, H: Heuristic<G>> {
    tree: MctsTree,
    root_state: &'a G,
    heuristic: &'a H,
    config: MctsConfig,
}

impl<'a, G: GameModel, H: Heuristic<G>> MctsSearch<'a, G, H> {
    pub fn new(root_state: &'a G, heuristic: &'a H, config: MctsConfig) -> Self {
        Self {
            tree: MctsTree::new(Action::COUNT),
            root_state,
            heuristic,
            config,
        }
    }

    /// Run the search until the budget is exhausted and extract the
    /// best root action.
    pub fn run(&mut self, rng: &mut ChaCha20Rng) -> Result<SearchResult, SearchError> {
        let mut tracker = BudgetTracker::new(self.config.budget);

        loop {
            let iteration_start = Instant::now();

            let mut state = self.root_state.clone();
            let selected = self.tree_policy(&mut state, rng)?;
            let result = self.rollout(selected, &mut state, rng);
            self.tree.backpropagate(selected, result);

            trace!(
                selected = selected.0,
                result,
                nodes = self.tree.len(),
                "simulation complete"
            );

            tracker.record_iteration(iteration_start.elapsed());
            tracker.add_forward_calls(self.config.rollout_depth);
            if tracker.should_stop(self.config.rollout_depth) {
                break;
            }
        }

        let action = self.extract(rng)?;
        let root = self.tree.get(self.tree.root());
        let stats = self.tree.stats();

        debug!(
            ?action,
            iterations = tracker.iterations(),
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            root_value = root.mean_value(self.config.epsilon),
            "search finished"
        );

        Ok(SearchResult {
            action,
            value: root.mean_value(self.config.epsilon),
            iterations: tracker.iterations(),
            nodes: stats.total_nodes,
        })
    }

    /// Descend from the root while the simulated state is non-terminal
    /// and above the depth limit: expand the first node with an empty
    /// slot, otherwise follow UCB1-tuned selection.
    fn tree_policy(
        &mut self,
        state: &mut G,
        rng: &mut ChaCha20Rng,
    ) -> Result<NodeId, SearchError> {
        let mut current = self.tree.root();

        while !state.is_terminal() && self.tree.get(current).depth < self.config.rollout_depth {
            if !self.tree.get(current).is_fully_expanded() {
                return Ok(self.expand(current, state, rng));
            }
            current = self.select_child(current, state, rng)?;
        }

        Ok(current)
    }

    /// Expand one empty slot chosen uniformly at random (max random
    /// draw per empty slot), advancing the simulated state by the
    /// chosen action.
    fn expand(&mut self, node_id: NodeId, state: &mut G, rng: &mut ChaCha20Rng) -> NodeId {
        let mut best_slot = 0;
        let mut best_draw = -1.0f32;
        for slot in self.tree.get(node_id).empty_slots() {
            let draw: f32 = rng.gen();
            if draw > best_draw {
                best_draw = draw;
                best_slot = slot;
            }
        }

        advance(state, Action::ALL[best_slot], rng);
        self.tree.add_child(node_id, best_slot as u8)
    }

    /// UCB1-tuned child selection with noise tie-breaks. Advances the
    /// simulated state by the chosen child's action.
    fn select_child(
        &self,
        node_id: NodeId,
        state: &mut G,
        rng: &mut ChaCha20Rng,
    ) -> Result<NodeId, SearchError> {
        let eps = self.config.epsilon;
        let node = self.tree.get(node_id);
        let parent_term = ((node.visit_count + 1) as f32).ln();

        let mut stats = ScoreStats::new();
        let mut selected = NodeId::NONE;
        let mut selected_action = 0;
        let mut best_score = f32::NEG_INFINITY;

        for (action, child_id) in node.expanded_children() {
            let child = self.tree.get(child_id);
            let child_visits = child.visit_count as f32 + eps;

            let child_value = normalise(child.mean_value(eps), node.bounds[0], node.bounds[1]);
            let uct = child_value + self.config.k * (parent_term / child_visits).sqrt();

            // Variance over the scores seen so far in this selection
            // call scales the confidence radius (UCB1-tuned), capped so
            // a noisy start cannot blow up exploration.
            stats.push(uct);
            let vsa = stats.variance() + (2.0 * VARIANCE_EXPLORATION.ln() / child_visits).sqrt();
            let ucb_tuned =
                child_value + self.config.k * (parent_term / child_visits).sqrt() * vsa.min(VARIANCE_CLIP);

            let score = noise(ucb_tuned, eps, rng.gen());
            if score > best_score {
                best_score = score;
                selected = child_id;
                selected_action = action;
            }
        }

        if selected.is_none() {
            return Err(SearchError::NoEligibleChild { node: node_id.0 });
        }

        advance(state, Action::ALL[selected_action], rng);
        Ok(selected)
    }

    /// Random rollout preferring statically safe steps, scored by the
    /// heuristic at the depth limit or terminal state.
    fn rollout(&self, node_id: NodeId, state: &mut G, rng: &mut ChaCha20Rng) -> f32 {
        let mut depth = self.tree.get(node_id).depth;

        while !state.is_terminal() && depth < self.config.rollout_depth {
            let action = safe_random_action(state, rng);
            advance(state, action, rng);
            depth += 1;
        }

        self.heuristic.evaluate(state)
    }

    fn extract(&self, rng: &mut ChaCha20Rng) -> Result<Action, SearchError> {
        match self.config.extraction {
            ExtractionPolicy::MostVisited => self.most_visited_action(rng),
            ExtractionPolicy::BestValue => self.best_action(rng),
            ExtractionPolicy::MostVisitedBestValue => self.most_visited_best_action(rng),
        }
    }

    /// Most visited root child, noise tie-breaks; all-equal visit
    /// counts fall back to the best mean value.
    fn most_visited_action(&self, rng: &mut ChaCha20Rng) -> Result<Action, SearchError> {
        let eps = self.config.epsilon;
        let root = self.tree.get(self.tree.root());

        let mut selected = None;
        let mut best_score = f32::NEG_INFINITY;
        let mut all_equal = true;
        let mut first_visits = None;

        for (action, child_id) in root.expanded_children() {
            let child = self.tree.get(child_id);

            match first_visits {
                None => first_visits = Some(child.visit_count),
                Some(v) if v != child.visit_count => all_equal = false,
                _ => {}
            }

            let score = noise(child.visit_count as f32, eps, rng.gen());
            if score > best_score {
                best_score = score;
                selected = Some(action);
            }
        }

        let selected = selected.ok_or(SearchError::NoExpandedChildren)?;
        if all_equal {
            // Visits carry no signal; discriminate on value instead.
            self.best_action(rng)
        } else {
            Ok(Action::ALL[selected])
        }
    }

    /// Root child with the best mean value, noise tie-breaks.
    fn best_action(&self, rng: &mut ChaCha20Rng) -> Result<Action, SearchError> {
        let eps = self.config.epsilon;
        let root = self.tree.get(self.tree.root());

        let mut selected = None;
        let mut best_score = f32::NEG_INFINITY;

        for (action, child_id) in root.expanded_children() {
            let child = self.tree.get(child_id);
            let score = noise(child.mean_value(eps), eps, rng.gen());
            if score > best_score {
                best_score = score;
                selected = Some(action);
            }
        }

        selected
            .map(|a| Action::ALL[a])
            .ok_or(SearchError::NoExpandedChildren)
    }

    /// Root child dominating on both visit count and mean value; falls
    /// back to most-visited when no child dominates both.
    fn most_visited_best_action(&self, rng: &mut ChaCha20Rng) -> Result<Action, SearchError> {
        let eps = self.config.epsilon;
        let root = self.tree.get(self.tree.root());

        let mut selected = None;
        let mut best_visits = f32::NEG_INFINITY;
        let mut best_value = f32::NEG_INFINITY;
        let mut all_equal = true;
        let mut first_visits = None;

        for (action, child_id) in root.expanded_children() {
            let child = self.tree.get(child_id);

            match first_visits {
                None => first_visits = Some(child.visit_count),
                Some(v) if v != child.visit_count => all_equal = false,
                _ => {}
            }

            let visit_score = noise(child.visit_count as f32, eps, rng.gen());
            let value_score = noise(child.mean_value(eps), eps, rng.gen());

            if visit_score > best_visits && value_score > best_value {
                best_visits = visit_score;
                best_value = value_score;
                selected = Some(action);
            }
        }

        match selected {
            None => self.most_visited_action(rng),
            Some(_) if all_equal => self.best_action(rng),
            Some(action) => Ok(Action::ALL[action]),
        }
    }

    /// The search tree, for inspection after `run`.
    pub fn tree(&self) -> &MctsTree {
        &self.tree
    }
}

/// Convenience function to run a single search.
pub fn run_mcts<G: GameModel, H: Heuristic<G>>(
    root_state: &G,
    heuristic: &H,
    config: MctsConfig,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult, SearchError> {
    let mut search = MctsSearch::new(root_state, heuristic, config);
    search.run(rng)
}
