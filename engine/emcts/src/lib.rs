//! Evolutionary MCTS over fixed-length action sequences.
//!
//! Instead of branching over single actions, each tree node carries a
//! whole genome: a plan of one action per future step. The root genome
//! is built by one-step lookahead, children are produced by mutating
//! one gene and repairing the result against the root state, and plans
//! are scored by replaying them on the forward model.
//!
//! # Example
//!
//! ```no_run
//! use emcts::{run_emcts, EmctsConfig};
//! use games_gridrun::{CustomHeuristic, GridRun};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let game = GridRun::from_ascii("A....G").unwrap();
//! let heuristic = CustomHeuristic::new();
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let result = run_emcts(&game, &heuristic, EmctsConfig::default(), &mut rng).unwrap();
//! println!("play {:?}, keep plan {:?}", result.action, result.genome);
//! ```

pub mod config;
pub mod genome;
pub mod node;
pub mod search;
pub mod tree;

pub use config::EmctsConfig;
pub use genome::{init_root_genome, mutate, osla_action, repair, Genome};
pub use node::EvoNode;
pub use search::{run_emcts, EmctsResult, EmctsSearch, SearchError};
pub use tree::EvoTree;
