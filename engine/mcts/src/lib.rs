//! Action-tree Monte Carlo Tree Search.
//!
//! Builds a search tree over single-agent actions under a strict
//! computation budget. Each simulation runs four phases:
//!
//! 1. **Tree policy**: descend from the root, expanding the first node
//!    with an empty child slot, otherwise following UCB1-tuned
//!    selection (value normalized into the parent's observed bounds,
//!    variance-scaled confidence radius clipped at 0.25, noise
//!    tie-breaks)
//! 2. **Rollout**: random play preferring statically safe steps, to a
//!    depth limit or terminal state
//! 3. **Evaluation**: the heuristic scores the reached state
//! 4. **Backpropagation**: visit counts, value sums and value bounds
//!    update along the path to the root
//!
//! # Usage
//!
//! ```rust,ignore
//! use mcts::{MctsConfig, run_mcts};
//! use engine_core::Budget;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = games_gridrun::GridRun::from_ascii("#A...G#").unwrap();
//! let heuristic = games_gridrun::CustomHeuristic::new();
//! let config = MctsConfig::default().with_budget(Budget::Iterations(200));
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let result = run_mcts(&game, &heuristic, config, &mut rng).unwrap();
//! println!("best action: {:?}", result.action);
//! ```

pub mod config;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::{ExtractionPolicy, MctsConfig};
pub use node::MctsNode;
pub use search::{run_mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
