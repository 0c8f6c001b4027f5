//! EMCTS configuration parameters.

use std::time::Duration;

use engine_core::Budget;

/// Configuration for the sequence-tree search.
#[derive(Debug, Clone)]
pub struct EmctsConfig {
    /// Stopping rule for one search call.
    pub budget: Budget,

    /// Genes per genome. Must be at least 2: the first gene is pinned
    /// by mutation, so a shorter genome could never evolve.
    pub genome_length: usize,

    /// Children per node before it counts as fully expanded. The
    /// genome space is far too large to enumerate, so expansion is
    /// capped rather than exhaustive.
    pub branch_factor: usize,

    /// Tree depth guard, also the per-iteration forward-call charge.
    pub max_depth: u32,

    /// Additive guard on visit counts and tie-break noise scale.
    pub epsilon: f32,
}

impl Default for EmctsConfig {
    fn default() -> Self {
        Self {
            budget: Budget::Time(Duration::from_millis(40)),
            genome_length: 5,
            branch_factor: 25,
            max_depth: 10,
            epsilon: 1e-6,
        }
    }
}

impl EmctsConfig {
    /// Deterministic config for tests: fixed iteration budget, small cap.
    pub fn for_testing() -> Self {
        Self {
            budget: Budget::Iterations(40),
            branch_factor: 8,
            ..Self::default()
        }
    }

    /// Builder pattern: set the stopping rule.
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    /// Builder pattern: set the genome length.
    pub fn with_genome_length(mut self, length: usize) -> Self {
        self.genome_length = length;
        self
    }

    /// Builder pattern: set the branching cap.
    pub fn with_branch_factor(mut self, cap: usize) -> Self {
        self.branch_factor = cap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmctsConfig::default();
        assert_eq!(config.genome_length, 5);
        assert_eq!(config.branch_factor, 25);
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.budget, Budget::Time(Duration::from_millis(40)));
    }

    #[test]
    fn test_builder_pattern() {
        let config = EmctsConfig::default()
            .with_budget(Budget::ForwardCalls(2000))
            .with_genome_length(8)
            .with_branch_factor(10);

        assert_eq!(config.budget, Budget::ForwardCalls(2000));
        assert_eq!(config.genome_length, 8);
        assert_eq!(config.branch_factor, 10);
    }
}
