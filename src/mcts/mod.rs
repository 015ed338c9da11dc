//! Monte Carlo Tree Search over any [`Game`](crate::rules::Game).
//!
//! ## Overview
//!
//! - **Arena tree**: nodes live in a flat `Vec`, parents are `NodeId`s
//! - **Single-step selection**: one UCB step per iteration, with an
//!   epsilon chance of a random child
//! - **Random playouts**: rewards scored for the searching player
//! - **Configurable policies**: selection and simulation are swappable
//! - **Bounded**: playout budget, optional deadline and node cap
//!
//! ## Usage
//!
//! ```rust
//! use rust_gridsearch::core::PlayerId;
//! use rust_gridsearch::games::connect::ConnectGame;
//! use rust_gridsearch::mcts::{MCTSConfig, MCTSSearch};
//!
//! let game = ConnectGame::new(2, 5, 4).unwrap();
//! let config = MCTSConfig::default().with_budget(200).with_seed(42);
//! let mut search = MCTSSearch::new(game.clone(), PlayerId::FIRST, config).unwrap();
//!
//! if let Some(column) = search.best_move(&game.initial_state(), PlayerId::FIRST) {
//!     println!("Drop in column {column}");
//! }
//! println!("{} iterations", search.stats().iterations);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::{MCTSConfig, DEFAULT_EXPLORATION};
pub use node::{MCTSNode, NodeId};
pub use policy::{
    best_child, calc_reward, RandomRollout, SelectionPolicy, SimulationPolicy, UCB1,
};
pub use search::MCTSSearch;
pub use stats::{SearchStats, StopReason};
pub use tree::{MCTSTree, TreeStats};
