//! Uniform random baseline.

use crate::core::{GameRng, PlayerId};
use crate::rules::Game;

use super::Agent;

/// Picks a uniformly random legal move.
pub struct RandomAgent<G: Game> {
    game: G,
    rng: GameRng,
}

impl<G: Game> RandomAgent<G> {
    pub fn new(game: G, seed: u64) -> Self {
        Self::with_rng(game, GameRng::new(seed))
    }

    /// Random agent seeded from OS entropy.
    pub fn from_entropy(game: G) -> Self {
        Self::with_rng(game, GameRng::from_entropy())
    }

    pub fn with_rng(game: G, rng: GameRng) -> Self {
        Self { game, rng }
    }

    /// A legal move chosen uniformly at random, `None` if there are none.
    pub fn best_move(&mut self, state: &G::State) -> Option<G::Action> {
        let moves = self.game.valid_moves(state);
        self.rng.choose(&moves).cloned()
    }
}

impl<G: Game> Agent<G> for RandomAgent<G> {
    fn best_move(&mut self, state: &G::State, _player: PlayerId) -> Option<G::Action> {
        RandomAgent::best_move(self, state)
    }

    fn name(&self) -> &str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect::{Board, ConnectGame};

    #[test]
    fn test_random_moves_are_legal() {
        let game = ConnectGame::new(2, 5, 4).unwrap();
        let state = Board::parse(&["X..O.", "OX.OX"]).unwrap();
        let mut agent = RandomAgent::new(game.clone(), 17);

        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..100 {
            let action = agent.best_move(&state).unwrap();
            assert!(game.is_valid_move(&state, &action));
            seen.insert(action);
        }
        assert_eq!(seen.into_iter().collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_no_moves_on_full_board() {
        let game = ConnectGame::new(2, 5, 4).unwrap();
        let full = Board::parse(&["OXOXO", "XOXOX"]).unwrap();
        let mut agent = RandomAgent::new(game, 3);

        assert_eq!(agent.best_move(&full), None);
    }

    #[test]
    fn test_same_seed_same_moves() {
        let game = ConnectGame::standard();
        let state = game.initial_state();
        let mut a = RandomAgent::new(game.clone(), 99);
        let mut b = RandomAgent::new(game, 99);

        for _ in 0..20 {
            assert_eq!(a.best_move(&state), b.best_move(&state));
        }
    }
}
