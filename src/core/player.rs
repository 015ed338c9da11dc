//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe identifier for the two seats of a game. `PlayerId::FIRST` moves
//! first from an empty board; `PlayerId::SECOND` answers.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};

/// Number of seats in every game this crate plays.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier.
///
/// Only the two seats exist: build one from [`PlayerId::FIRST`],
/// [`PlayerId::SECOND`] or a checked `u8` conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who moves first from the initial position.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who moves second.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat in a two-player game.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// Iterate over both player IDs.
    ///
    /// ```
    /// use rust_gridsearch::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players, vec![PlayerId::FIRST, PlayerId::SECOND]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = Error;

    fn try_from(index: u8) -> Result<Self> {
        if usize::from(index) < PLAYER_COUNT {
            Ok(Self(index))
        } else {
            Err(Error::InvalidPlayer { index })
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> u8 {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0 + 1)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_gridsearch::core::{PlayerId, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::with_value(0);
/// wins[PlayerId::SECOND] += 1;
/// assert_eq!(wins[PlayerId::FIRST], 0);
/// assert_eq!(wins[PlayerId::SECOND], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
