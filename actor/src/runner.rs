//! Episode loop and run accounting.

use anyhow::Result;
use engine_core::{advance, GameModel};
use games_gridrun::GridRun;
use rand_chacha::ChaCha20Rng;
use tracing::trace;

use crate::policy::Policy;

/// What happened in one episode.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeOutcome {
    pub steps: u32,
    pub reached_goal: bool,
    pub survived: bool,
}

/// Play one episode to its terminal state. The policy picks the
/// controlled agent's move each step; opponents move at random inside
/// `advance`.
pub fn run_episode(
    mut game: GridRun,
    policy: &mut dyn Policy,
    rng: &mut ChaCha20Rng,
) -> Result<EpisodeOutcome> {
    policy.reset();

    while !game.is_terminal() {
        let action = policy.select_action(&game)?;
        advance(&mut game, action, rng);
        trace!(step = game.steps(), ?action, "applied move");
    }

    Ok(EpisodeOutcome {
        steps: game.steps(),
        reached_goal: game.reached_goal(),
        survived: game.controlled_alive(),
    })
}

/// Aggregate over a batch of episodes.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub episodes: u32,
    pub goals: u32,
    pub deaths: u32,
    pub total_steps: u64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &EpisodeOutcome) {
        self.episodes += 1;
        self.total_steps += outcome.steps as u64;
        if outcome.reached_goal {
            self.goals += 1;
        }
        if !outcome.survived {
            self.deaths += 1;
        }
    }

    pub fn mean_steps(&self) -> f64 {
        if self.episodes == 0 {
            return 0.0;
        }
        self.total_steps as f64 / self.episodes as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MctsAgent;
    use engine_core::{Budget, HeuristicKind};
    use games_gridrun::GridHeuristic;
    use mcts::MctsConfig;
    use rand::SeedableRng;

    #[test]
    fn episode_reaches_goal_in_a_corridor() {
        let game = GridRun::from_ascii("A...G").unwrap().with_max_steps(20);
        let config = MctsConfig::for_testing().with_budget(Budget::Iterations(100));
        let mut agent = MctsAgent::new(
            config,
            GridHeuristic::from_kind(HeuristicKind::Custom),
            42,
        );
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let outcome = run_episode(game, &mut agent, &mut rng).unwrap();

        assert!(outcome.reached_goal);
        assert!(outcome.survived);
        // Four moves separate the start cell from the goal.
        assert!(outcome.steps >= 4);
    }

    #[test]
    fn terminal_start_ends_immediately() {
        let game = GridRun::from_ascii("A...G").unwrap().with_max_steps(0);
        let mut agent = MctsAgent::new(
            MctsConfig::for_testing(),
            GridHeuristic::from_kind(HeuristicKind::Custom),
            42,
        );
        let mut rng = ChaCha20Rng::seed_from_u64(1);

        let outcome = run_episode(game, &mut agent, &mut rng).unwrap();
        assert_eq!(outcome.steps, 0);
        assert!(!outcome.reached_goal);
    }

    #[test]
    fn summary_accumulates_outcomes() {
        let mut summary = RunSummary::default();
        summary.record(&EpisodeOutcome {
            steps: 4,
            reached_goal: true,
            survived: true,
        });
        summary.record(&EpisodeOutcome {
            steps: 10,
            reached_goal: false,
            survived: false,
        });

        assert_eq!(summary.episodes, 2);
        assert_eq!(summary.goals, 1);
        assert_eq!(summary.deaths, 1);
        assert!((summary.mean_steps() - 7.0).abs() < 1e-9);
    }
}
