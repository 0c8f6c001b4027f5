//! Genome representation and the evolutionary operators.
//!
//! A genome is a fixed-length plan: one action per future step for the
//! controlled agent. Genomes never change length after construction;
//! mutation swaps one gene and repair swaps unsafe genes in place.

use engine_core::{advance, noise, Action, GameModel, Heuristic};
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Fixed-length ordered action sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genome(Vec<Action>);

impl Genome {
    /// Build from genes. Empty genomes are not representable.
    pub fn new(genes: Vec<Action>) -> Self {
        assert!(!genes.is_empty(), "genome must have at least one gene");
        Self(genes)
    }

    /// Uniformly random genome of the given length.
    pub fn random(length: usize, rng: &mut ChaCha20Rng) -> Self {
        Self::new((0..length).map(|_| Action::random(rng)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn genes(&self) -> &[Action] {
        &self.0
    }

    /// The committed first step of the plan.
    #[inline]
    pub fn first(&self) -> Action {
        self.0[0]
    }

    /// Plan for the next decision: drop the consumed first gene, append
    /// `tail` at the end. Length is preserved.
    pub fn shifted(&self, tail: Action) -> Genome {
        let mut genes = self.0[1..].to_vec();
        genes.push(tail);
        Genome(genes)
    }
}

/// One-step lookahead: the action whose successor state scores best
/// under the noise-perturbed heuristic (other agents random).
pub fn osla_action<G: GameModel, H: Heuristic<G>>(
    state: &G,
    heuristic: &H,
    epsilon: f32,
    rng: &mut ChaCha20Rng,
) -> Action {
    let mut best = Action::Stop;
    let mut best_q = f32::NEG_INFINITY;

    for action in Action::ALL {
        let mut copy = state.clone();
        advance(&mut copy, action, rng);
        let q = noise(heuristic.evaluate(&copy), epsilon, rng.gen());
        if q > best_q {
            best_q = q;
            best = action;
        }
    }

    best
}

/// Build the root genome by committed one-step lookahead: each gene is
/// the OSLA choice from the state reached by the genes before it. The
/// finished genome is repaired against the original state.
pub fn init_root_genome<G: GameModel, H: Heuristic<G>>(
    state: &G,
    heuristic: &H,
    length: usize,
    epsilon: f32,
    rng: &mut ChaCha20Rng,
) -> Genome {
    let mut working = state.clone();
    let mut genes = Vec::with_capacity(length);

    for _ in 0..length {
        let action = osla_action(&working, heuristic, epsilon, rng);
        advance(&mut working, action, rng);
        genes.push(action);
    }

    let mut genome = Genome::new(genes);
    repair(state, &mut genome, heuristic, epsilon, rng);
    genome
}

/// Copy the genome and replace exactly one gene at a random index >= 1
/// with a different random action. Index 0 is never mutated: the first
/// gene is the already-committed step.
pub fn mutate(genome: &Genome, rng: &mut ChaCha20Rng) -> Genome {
    debug_assert!(genome.len() >= 2, "mutation needs a gene beyond index 0");

    let mut genes = genome.0.clone();
    let position = rng.gen_range(1..genes.len());

    let incumbent = genes[position];
    let mut replacement = Action::random(rng);
    while replacement == incumbent {
        replacement = Action::random(rng);
    }
    genes[position] = replacement;

    Genome(genes)
}

/// Single bounded repair pass. Replaying the genome on a private copy
/// of `state`, any gene whose target cell is an in-bounds hazard is
/// replaced: first safe action in shuffled order, OSLA prediction as
/// the last resort. The (possibly repaired) gene is then committed to
/// the replay before the next gene is checked. Length never changes.
pub fn repair<G: GameModel, H: Heuristic<G>>(
    state: &G,
    genome: &mut Genome,
    heuristic: &H,
    epsilon: f32,
    rng: &mut ChaCha20Rng,
) {
    let mut working = state.clone();

    for i in 0..genome.len() {
        if working.is_terminal() {
            break;
        }

        let pos = working.agent_position();
        let target = pos.shifted(genome.0[i]);
        let hazardous = working.board().in_bounds(target) && working.board().is_hazard(target);

        if hazardous {
            let mut trials = Action::ALL;
            trials.shuffle(rng);
            let safe = trials
                .into_iter()
                .find(|trial| working.board().step_is_safe(pos, *trial));

            genome.0[i] = match safe {
                Some(action) => action,
                None => osla_action(&working, heuristic, epsilon, rng),
            };
        }

        advance(&mut working, genome.0[i], rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_gridrun::{CustomHeuristic, GridRun};
    use rand::SeedableRng;

    const EPS: f32 = 1e-6;

    fn count_differences(a: &Genome, b: &Genome) -> Vec<usize> {
        a.genes()
            .iter()
            .zip(b.genes())
            .enumerate()
            .filter(|(_, (x, y))| x != y)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn shifted_drops_head_and_appends_tail() {
        let genome = Genome::new(vec![
            Action::Right,
            Action::Up,
            Action::Down,
            Action::Left,
            Action::Stop,
        ]);
        let shifted = genome.shifted(Action::Right);

        assert_eq!(shifted.len(), 5);
        assert_eq!(
            shifted.genes(),
            &[
                Action::Up,
                Action::Down,
                Action::Left,
                Action::Stop,
                Action::Right
            ]
        );
    }

    #[test]
    fn mutation_changes_exactly_one_gene_beyond_index_zero() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let genome = Genome::random(5, &mut rng);

        for _ in 0..200 {
            let mutated = mutate(&genome, &mut rng);
            let diffs = count_differences(&genome, &mutated);
            assert_eq!(diffs.len(), 1, "exactly one gene must change");
            assert!(diffs[0] >= 1, "index 0 must never mutate");
            assert_eq!(mutated.len(), genome.len());
        }
    }

    #[test]
    fn osla_walks_toward_goal() {
        let game = GridRun::from_ascii("A...G").unwrap();
        let heuristic = CustomHeuristic::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let action = osla_action(&game, &heuristic, EPS, &mut rng);
        assert_eq!(action, Action::Right);
    }

    #[test]
    fn root_genome_has_requested_length() {
        let game = GridRun::from_ascii(
            "########
             #A.....#
             #.....G#
             ########",
        )
        .unwrap();
        let heuristic = CustomHeuristic::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let genome = init_root_genome(&game, &heuristic, 5, EPS, &mut rng);
        assert_eq!(genome.len(), 5);
    }

    #[test]
    fn repair_leaves_clean_genome_unchanged() {
        // No hazards anywhere: repair must be a no-op.
        let game = GridRun::from_ascii(
            "######
             #A...#
             #...G#
             ######",
        )
        .unwrap();
        let heuristic = CustomHeuristic::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        let original = Genome::random(5, &mut rng);
        let mut repaired = original.clone();
        repair(&game, &mut repaired, &heuristic, EPS, &mut rng);

        assert_eq!(repaired, original);
    }

    #[test]
    fn repair_replaces_hazardous_first_gene() {
        let game = GridRun::from_ascii(
            "#####
             #A~.#
             #..G#
             #####",
        )
        .unwrap();
        let heuristic = CustomHeuristic::new();
        let mut rng = ChaCha20Rng::seed_from_u64(42);

        // Gene 0 walks straight into the hazard.
        let mut genome = Genome::new(vec![
            Action::Right,
            Action::Stop,
            Action::Stop,
            Action::Stop,
            Action::Stop,
        ]);
        repair(&game, &mut genome, &heuristic, EPS, &mut rng);

        assert_eq!(genome.len(), 5);
        assert_ne!(genome.first(), Action::Right);
        // The repaired gene's target must be safe from the start cell.
        let pos = game.agent_position();
        assert!(game.board().step_is_safe(pos, genome.first()));
    }

    #[test]
    fn repair_preserves_length_on_hazardous_boards() {
        let game = GridRun::from_ascii(
            "#######
             #A~.~.#
             #.~.~G#
             #######",
        )
        .unwrap();
        let heuristic = CustomHeuristic::new();
        let mut rng = ChaCha20Rng::seed_from_u64(11);

        for _ in 0..50 {
            let mut genome = Genome::random(5, &mut rng);
            repair(&game, &mut genome, &heuristic, EPS, &mut rng);
            assert_eq!(genome.len(), 5);
        }
    }
}
