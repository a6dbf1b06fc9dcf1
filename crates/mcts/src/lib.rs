//! Monte Carlo Tree Search for two-player games.
//!
//! This crate provides a generic MCTS implementation that can be used with
//! any game implementing the `duel_core::Game` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **UCB1 Selection**: Unvisited children first, deterministic tie-breaking
//!   unless randomized ties are configured
//! - **Anytime**: Runs until a wall-clock budget (or cycle cap) is spent,
//!   checked between cycles
//! - **Tree Reuse**: The subtree of the action actually played survives
//!   into the next search
//! - **Injected Randomness and Time**: Seedable RNG and a pluggable `Clock`
//!   for reproducible searches
//!
//! # Example
//!
//! ```
//! use duel_mcts::{games::NestedTicTacToe, Mcts, MctsConfig, RandomRollout};
//! use duel_core::Game;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = NestedTicTacToe;
//! let state = game.initial_state();
//!
//! let config = MctsConfig::with_iterations(200);
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(config, RandomRollout, rng);
//!
//! let result = mcts.search(&game, &state).expect("search succeeds");
//! assert!(game.is_legal(&state, result.best_action));
//! println!("Best action: {}", result.best_action);
//! println!("Win rate: {:.2}", result.root_value);
//! ```

pub mod agent;
pub mod clock;
pub mod config;
pub mod evaluator;
pub mod games;
pub mod node;
pub mod search;
pub mod tree;

#[cfg(test)]
mod testing;

pub use agent::{Agent, MctsAgent, RandomAgent};
pub use clock::{Clock, SteppingClock, SystemClock};
pub use config::MctsConfig;
pub use evaluator::{Evaluator, RandomRollout};
pub use node::{Node, NodeId, NodeStats};
pub use search::{Mcts, SearchResult};
pub use tree::Tree;
