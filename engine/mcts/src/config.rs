//! MCTS configuration parameters.

use std::time::Duration;

use engine_core::Budget;

/// How the best root action is extracted after the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionPolicy {
    /// Most visited child; all-equal visit counts fall back to best value.
    #[default]
    MostVisited,

    /// Highest mean value.
    BestValue,

    /// A child must dominate on both visits and value simultaneously;
    /// falls back to `MostVisited` when none does.
    MostVisitedBestValue,
}

/// Configuration for the action-tree search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Stopping rule for one search call.
    pub budget: Budget,

    /// Exploration constant in the UCT term.
    pub k: f32,

    /// Additive guard on visit counts and tie-break noise scale.
    pub epsilon: f32,

    /// Depth limit for both tree descent and rollout.
    pub rollout_depth: u32,

    /// Root action extraction policy.
    pub extraction: ExtractionPolicy,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            budget: Budget::Time(Duration::from_millis(40)),
            k: std::f32::consts::SQRT_2,
            epsilon: 1e-6,
            rollout_depth: 10,
            extraction: ExtractionPolicy::MostVisited,
        }
    }
}

impl MctsConfig {
    /// Deterministic config for tests: fixed iteration budget, no clock.
    pub fn for_testing() -> Self {
        Self {
            budget: Budget::Iterations(50),
            ..Self::default()
        }
    }

    /// Builder pattern: set the stopping rule.
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_k(mut self, k: f32) -> Self {
        self.k = k;
        self
    }

    /// Builder pattern: set the rollout depth limit.
    pub fn with_rollout_depth(mut self, depth: u32) -> Self {
        self.rollout_depth = depth;
        self
    }

    /// Builder pattern: set the extraction policy.
    pub fn with_extraction(mut self, extraction: ExtractionPolicy) -> Self {
        self.extraction = extraction;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.budget, Budget::Time(Duration::from_millis(40)));
        assert!((config.k - std::f32::consts::SQRT_2).abs() < 1e-6);
        assert_eq!(config.rollout_depth, 10);
        assert_eq!(config.extraction, ExtractionPolicy::MostVisited);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_budget(Budget::Iterations(200))
            .with_rollout_depth(6)
            .with_k(1.0)
            .with_extraction(ExtractionPolicy::BestValue);

        assert_eq!(config.budget, Budget::Iterations(200));
        assert_eq!(config.rollout_depth, 6);
        assert!((config.k - 1.0).abs() < 1e-6);
        assert_eq!(config.extraction, ExtractionPolicy::BestValue);
    }

    #[test]
    fn test_testing_config_uses_iterations() {
        let config = MctsConfig::for_testing();
        assert!(matches!(config.budget, Budget::Iterations(_)));
    }
}
