//! Core engine types: players, RNG, state keys.
//!
//! This module contains the fundamental building blocks that are game-agnostic.

pub mod key;
pub mod player;
pub mod rng;

pub use key::StateKey;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
