//! # rust-gridsearch
//!
//! Game-playing agents for two-player, perfect-information, deterministic
//! board games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: agents only see the [`Game`] trait. Legal moves,
//!    transitions and terminal detection belong to the game.
//!
//! 2. **Immutable Positions**: `apply_move` returns a new state; nothing an
//!    agent holds is ever mutated behind its back.
//!
//! 3. **Reproducible**: every random choice goes through a seedable
//!    [`GameRng`], so a fixed seed replays a search or a training run exactly.
//!
//! ## Architecture
//!
//! - **Arena MCTS**: nodes in a flat `Vec`, parents referenced by index,
//!   rewards scored from the searching player's point of view.
//!
//! - **Tabular Q-learning**: per-agent value and visit tables keyed by a
//!   content hash of the position, learning from game-supplied move rewards.
//!
//! ## Modules
//!
//! - `core`: players, RNG, state keys
//! - `error`: crate error type
//! - `rules`: the `Game` trait and move classification for rewards
//! - `mcts`: Monte Carlo Tree Search
//! - `qlearn`: Q-learning agent, tables and snapshots
//! - `agents`: the `Agent` interface and the random baseline
//! - `arena`: match and series runner
//! - `games`: concrete games (gravity grid, n-in-a-row)

pub mod agents;
pub mod arena;
pub mod core;
pub mod error;
pub mod games;
pub mod mcts;
pub mod qlearn;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{GameRng, PlayerId, PlayerMap, StateKey};

pub use crate::error::{Error, Result};

pub use crate::rules::{ActionRewards, ActionSignal, Game, GameResult};

pub use crate::mcts::{MCTSConfig, MCTSSearch, SearchStats};

pub use crate::qlearn::{Learning, QLearningAgent, QLearningConfig, QTableSnapshot, RewardSchedule};

pub use crate::agents::{Agent, RandomAgent};

pub use crate::arena::{play_match, play_series, MatchConfig, MatchReport, SeriesTally};

pub use crate::games::connect::{Board, ConnectGame};
