//! Game abstraction consumed by every agent.
//!
//! Games implement `Game` to define:
//! - Legal moves for each state
//! - How moves produce new states
//! - Win/draw conditions
//!
//! Search and learning call into `Game` but never interpret
//! game-specific concepts directly.

pub mod engine;

pub use engine::{ActionRewards, ActionSignal, Game, GameResult};
