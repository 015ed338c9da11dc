//! The decision interface shared by every player implementation.
//!
//! An [`Agent`] looks at a position and recommends a move, or `None` when it
//! has nothing to offer. The driving loop in [`arena`](crate::arena) decides
//! what a missing or illegal recommendation means.

pub mod random;

pub use random::RandomAgent;

use crate::core::PlayerId;
use crate::mcts::MCTSSearch;
use crate::qlearn::{Learning, QLearningAgent};
use crate::rules::{ActionRewards, Game};

/// Something that picks moves for a player of `G`.
pub trait Agent<G: Game> {
    /// Recommend a move for `player` in `state`.
    fn best_move(&mut self, state: &G::State, player: PlayerId) -> Option<G::Action>;

    /// Short label for logs and reports.
    fn name(&self) -> &str;
}

impl<G: Game> Agent<G> for MCTSSearch<G> {
    fn best_move(&mut self, state: &G::State, player: PlayerId) -> Option<G::Action> {
        MCTSSearch::best_move(self, state, player)
    }

    fn name(&self) -> &str {
        "mcts"
    }
}

/// Plays greedily from the learned table without updating it (apart from
/// epsilon exploration).
impl<G: Game> Agent<G> for QLearningAgent<G> {
    fn best_move(&mut self, state: &G::State, _player: PlayerId) -> Option<G::Action> {
        QLearningAgent::best_move(self, state)
    }

    fn name(&self) -> &str {
        "q-learning"
    }
}

impl<G: ActionRewards> Agent<G> for Learning<'_, G> {
    fn best_move(&mut self, state: &G::State, _player: PlayerId) -> Option<G::Action> {
        Learning::best_move(self, state)
    }

    fn name(&self) -> &str {
        "q-learning (training)"
    }
}

impl<G: Game, T: Agent<G> + ?Sized> Agent<G> for Box<T> {
    fn best_move(&mut self, state: &G::State, player: PlayerId) -> Option<G::Action> {
        (**self).best_move(state, player)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
