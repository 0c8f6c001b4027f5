//! Actor - episode runner for the search engines.
//!
//! A batch process that:
//! 1. Loads a grid world from ASCII art (file or built-in)
//! 2. Plays episodes, asking the configured engine for every move
//! 3. Logs per-episode outcomes and a final run summary

use anyhow::{Context, Result};
use clap::Parser;
use emcts::EmctsConfig;
use games_gridrun::{GridHeuristic, GridRun};
use mcts::MctsConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod config;
mod policy;
mod runner;

use crate::config::Config;
use crate::policy::{EmctsAgent, MctsAgent, Policy};
use crate::runner::{run_episode, RunSummary};

const DEFAULT_BOARD: &str = "############
                             #A..~......#
                             #.~...~....#
                             #....~...~.#
                             #.~....~..G#
                             ############";

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    Ok(())
}

fn load_board(config: &Config) -> Result<GridRun> {
    let art = match &config.board {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read board file {path}"))?,
        None => DEFAULT_BOARD.to_string(),
    };

    let game = GridRun::from_ascii(&art)
        .context("failed to parse board")?
        .with_max_steps(config.max_steps);
    Ok(game)
}

fn build_policy(config: &Config) -> Result<Box<dyn Policy>> {
    let heuristic = GridHeuristic::from_kind(config.heuristic_kind()?);
    let budget = config.search_budget()?;

    let policy: Box<dyn Policy> = match config.engine.as_str() {
        "mcts" => {
            let engine_config = MctsConfig::default()
                .with_budget(budget)
                .with_k(config.k)
                .with_rollout_depth(config.rollout_depth)
                .with_extraction(config.extraction_policy()?);
            Box::new(MctsAgent::new(engine_config, heuristic, config.seed))
        }
        _ => {
            let engine_config = EmctsConfig::default()
                .with_budget(budget)
                .with_genome_length(config.genome_length)
                .with_branch_factor(config.branch_factor);
            Box::new(EmctsAgent::new(engine_config, heuristic, config.seed))
        }
    };
    Ok(policy)
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_tracing(&config.log_level)?;

    info!(
        engine = %config.engine,
        episodes = config.episodes,
        seed = config.seed,
        "actor starting"
    );

    let game = load_board(&config)?;
    let mut policy = build_policy(&config)?;

    // The environment gets its own stream so opponent moves do not
    // perturb the policy's search draws.
    let mut env_rng = ChaCha20Rng::seed_from_u64(config.seed.wrapping_add(1));

    let mut summary = RunSummary::default();
    for episode in 1..=config.episodes {
        let outcome = run_episode(game.clone(), policy.as_mut(), &mut env_rng)?;
        summary.record(&outcome);

        if config.log_interval > 0 && episode % config.log_interval == 0 {
            info!(
                episode,
                steps = outcome.steps,
                reached_goal = outcome.reached_goal,
                survived = outcome.survived,
                "episode finished"
            );
        }
    }

    info!(
        episodes = summary.episodes,
        goals = summary.goals,
        deaths = summary.deaths,
        mean_steps = summary.mean_steps(),
        "run complete"
    );
    Ok(())
}
