//! Game trait for rules implementations.
//!
//! Games implement `Game` to define their rules:
//! - What moves are legal
//! - How a move produces the next state
//! - Win/draw conditions
//! - Whose turn follows whose

use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, StateKey};
use crate::error::Result;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Board exhausted with no winner.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winning player, if any.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Game rules trait.
///
/// Implementations are stateless with respect to play: every method takes the
/// position it works on, and `apply_move` returns a fresh state instead of
/// mutating its input. Search code clones the game freely.
///
/// ## Implementation Notes
///
/// - `valid_moves`: order is up to the game but must be stable for a state
/// - `apply_move`: must be deterministic and reject moves not in `valid_moves`
/// - `check_terminal`: return `None` while the game continues
pub trait Game: Clone {
    /// Full board position.
    type State: Clone + Eq + Hash + Debug;

    /// A move. Serializable so learned tables can be persisted.
    type Action: Clone + Eq + Hash + Debug + Serialize + DeserializeOwned;

    /// Legal moves in `state`.
    ///
    /// Returns empty when no move is possible.
    fn valid_moves(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Return the state reached when `player` plays `action` on `state`.
    ///
    /// Fails with [`Error::InvalidMove`](crate::error::Error::InvalidMove)
    /// if `action` is not legal in `state`.
    fn apply_move(
        &self,
        state: &Self::State,
        action: &Self::Action,
        player: PlayerId,
    ) -> Result<Self::State>;

    /// Check whether the game is over.
    ///
    /// `player` is checked for a winning configuration first; a win by the
    /// other player is still reported. A full board with no winner is a draw.
    fn check_terminal(&self, state: &Self::State, player: PlayerId) -> Option<GameResult>;

    /// The player who moves after `player`.
    fn next_player(&self, player: PlayerId) -> PlayerId {
        player.opponent()
    }

    /// Content hash of a state for value-table indexing.
    fn state_key(&self, state: &Self::State) -> StateKey {
        StateKey::of(state)
    }

    /// Check that `action` is currently legal.
    fn is_valid_move(&self, state: &Self::State, action: &Self::Action) -> bool {
        self.valid_moves(state).contains(action)
    }
}

/// What a move means for reward shaping.
///
/// The Q-learning reward schedule is keyed to these signals rather than to
/// raw action codes, so each game decides how its moves map onto them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionSignal {
    /// The move builds on the acting player's own marker.
    OwnMarker,
    /// The move lands on empty ground.
    Empty,
    /// The move lands on an opponent's marker.
    OpponentMarker,
    /// No reward applies; the learner skips the update.
    Skip,
}

/// Game-supplied classification of moves for the Q-learning reward schedule.
pub trait ActionRewards: Game {
    /// Classify `action` played by `player` from `state`.
    fn action_signal(
        &self,
        state: &Self::State,
        action: &Self::Action,
        player: PlayerId,
    ) -> ActionSignal;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::SECOND);
        assert!(!result.is_winner(PlayerId::FIRST));
        assert!(result.is_winner(PlayerId::SECOND));
        assert_eq!(result.winner(), Some(PlayerId::SECOND));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::FIRST));
        assert!(!draw.is_winner(PlayerId::SECOND));
        assert_eq!(draw.winner(), None);
    }
}
