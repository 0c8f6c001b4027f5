//! Configuration for the actor binary.
//!
//! CLI arguments take highest priority, followed by `ACTOR_*`
//! environment variables, then the built-in defaults.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_core::{Budget, HeuristicKind};
use mcts::ExtractionPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "actor")]
#[command(about = "Episode runner driving the search engines over grid worlds")]
#[command(
    long_about = "Runs game episodes on a grid world, asking a search engine
(action-tree MCTS or sequence-tree EMCTS) for every move of the controlled
agent. Boards are ASCII art, loaded from a file or the built-in default."
)]
pub struct Config {
    /// Search engine to use (mcts, emcts)
    #[arg(long, env = "ACTOR_ENGINE", default_value = "mcts")]
    pub engine: String,

    /// Path to an ASCII board file (built-in board when omitted)
    #[arg(long, env = "ACTOR_BOARD")]
    pub board: Option<String>,

    /// Step cap per episode
    #[arg(long, env = "ACTOR_MAX_STEPS", default_value_t = 50)]
    pub max_steps: u32,

    /// Number of episodes to run
    #[arg(long, env = "ACTOR_EPISODES", default_value_t = 10)]
    pub episodes: u32,

    /// RNG seed for reproducible runs
    #[arg(long, env = "ACTOR_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Stopping rule per search call (time, iterations, forward-calls)
    #[arg(long, env = "ACTOR_BUDGET", default_value = "time")]
    pub budget: String,

    /// Time budget per search call in milliseconds
    #[arg(long, env = "ACTOR_BUDGET_MS", default_value_t = 40)]
    pub budget_ms: u64,

    /// Iteration budget per search call
    #[arg(long, env = "ACTOR_BUDGET_ITERATIONS", default_value_t = 200)]
    pub budget_iterations: u32,

    /// Forward-call budget per search call
    #[arg(long, env = "ACTOR_BUDGET_FORWARD_CALLS", default_value_t = 2000)]
    pub budget_forward_calls: u32,

    /// UCB exploration constant (mcts only)
    #[arg(long, env = "ACTOR_K", default_value_t = std::f32::consts::SQRT_2)]
    pub k: f32,

    /// Tree and rollout depth cap (mcts only)
    #[arg(long, env = "ACTOR_ROLLOUT_DEPTH", default_value_t = 10)]
    pub rollout_depth: u32,

    /// Recommendation policy (most-visited, best-value, most-visited-best-value)
    #[arg(long, env = "ACTOR_EXTRACTION", default_value = "most-visited")]
    pub extraction: String,

    /// Genes per genome (emcts only)
    #[arg(long, env = "ACTOR_GENOME_LENGTH", default_value_t = 5)]
    pub genome_length: usize,

    /// Children per node before a node counts as fully expanded (emcts only)
    #[arg(long, env = "ACTOR_BRANCH_FACTOR", default_value_t = 25)]
    pub branch_factor: usize,

    /// State evaluator (custom, advanced)
    #[arg(long, env = "ACTOR_HEURISTIC", default_value = "custom")]
    pub heuristic: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "ACTOR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Log progress every N episodes (0 to disable)
    #[arg(long, env = "ACTOR_LOG_INTERVAL", default_value_t = 1)]
    pub log_interval: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.engine.as_str(), "mcts" | "emcts") {
            return Err(anyhow!(
                "invalid engine '{}', expected mcts or emcts",
                self.engine
            ));
        }

        self.search_budget()?;
        self.extraction_policy()?;
        self.heuristic_kind()?;

        if self.episodes == 0 {
            return Err(anyhow!("episodes must be greater than 0"));
        }

        if self.rollout_depth == 0 {
            return Err(anyhow!("rollout_depth must be greater than 0"));
        }

        if self.genome_length < 2 {
            return Err(anyhow!(
                "genome_length must be at least 2, got {}",
                self.genome_length
            ));
        }

        if self.branch_factor == 0 {
            return Err(anyhow!("branch_factor must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn search_budget(&self) -> Result<Budget> {
        match self.budget.as_str() {
            "time" => {
                if self.budget_ms == 0 {
                    return Err(anyhow!("budget_ms must be greater than 0"));
                }
                Ok(Budget::Time(Duration::from_millis(self.budget_ms)))
            }
            "iterations" => {
                if self.budget_iterations == 0 {
                    return Err(anyhow!("budget_iterations must be greater than 0"));
                }
                Ok(Budget::Iterations(self.budget_iterations))
            }
            "forward-calls" => {
                if self.budget_forward_calls == 0 {
                    return Err(anyhow!("budget_forward_calls must be greater than 0"));
                }
                Ok(Budget::ForwardCalls(self.budget_forward_calls))
            }
            other => Err(anyhow!(
                "invalid budget '{}', expected time, iterations or forward-calls",
                other
            )),
        }
    }

    pub fn extraction_policy(&self) -> Result<ExtractionPolicy> {
        match self.extraction.as_str() {
            "most-visited" => Ok(ExtractionPolicy::MostVisited),
            "best-value" => Ok(ExtractionPolicy::BestValue),
            "most-visited-best-value" => Ok(ExtractionPolicy::MostVisitedBestValue),
            other => Err(anyhow!(
                "invalid extraction '{}', expected most-visited, best-value or most-visited-best-value",
                other
            )),
        }
    }

    pub fn heuristic_kind(&self) -> Result<HeuristicKind> {
        match self.heuristic.as_str() {
            "custom" => Ok(HeuristicKind::Custom),
            "advanced" => Ok(HeuristicKind::Advanced),
            other => Err(anyhow!(
                "invalid heuristic '{}', expected custom or advanced",
                other
            )),
        }
    }
}
