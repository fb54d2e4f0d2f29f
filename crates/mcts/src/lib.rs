//! Monte Carlo Tree Search for two-player board games.
//!
//! This crate provides an MCTS implementation for any game implementing
//! the `uct_core::Game` trait.
//!
//! # Features
//!
//! - **Generic**: Works with any `Game` implementation
//! - **UCB1 Selection**: Win-rate plus exploration bonus, inverted on
//!   opponent turns so one maximizing scan serves both perspectives
//! - **Semi-greedy Rollouts**: Immediate-terminal short-circuit plus a
//!   depth-limited lookahead probe on a fraction of rollout moves
//! - **Seedable**: All randomness flows through one caller-supplied RNG,
//!   so seeded searches reproduce exactly
//!
//! # Example
//!
//! ```
//! use uct_mcts::{Mcts, SearchConfig, games::TicTacToe};
//! use uct_core::Game;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let game = TicTacToe;
//! let state = game.initial_state();
//!
//! let config = SearchConfig::fast();
//! let rng = ChaCha8Rng::seed_from_u64(42);
//! let mut mcts = Mcts::new(config, rng);
//!
//! let action = mcts.think(&game, &state).expect("non-terminal position");
//! assert!(game.legal_actions(&state).contains(&action));
//! ```

pub mod config;
pub mod games;
mod node;
pub mod search;
mod tree;

pub use config::SearchConfig;
pub use search::{ucb, ChildStats, Mcts, SearchResult};
