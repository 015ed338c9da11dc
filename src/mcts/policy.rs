//! MCTS policies for selection and simulation, plus the reward function.
//!
//! Policies are trait-based to allow customization:
//! - `SelectionPolicy`: How to choose which child to explore (UCB1)
//! - `SimulationPolicy`: How to run rollouts (random, heuristic)

use smallvec::SmallVec;

use crate::core::{GameRng, PlayerId};
use crate::error::Result;
use crate::rules::{Game, GameResult};

use super::node::NodeId;
use super::tree::MCTSTree;

/// Reward when the perspective player wins a rollout.
pub const WIN_REWARD: f64 = 1.0;
/// Reward when the opponent wins a rollout.
pub const LOSS_REWARD: f64 = -100.0;
/// Reward for a drawn rollout.
pub const DRAW_REWARD: f64 = -10.0;

// =============================================================================
// Selection Policy
// =============================================================================

/// Policy for scoring a child during selection.
pub trait SelectionPolicy: Send + Sync {
    /// Score of a child with the given statistics; the highest score wins.
    fn value(&self, score: f64, visits: u32, parent_visits: u32, exploration: f64) -> f64;
}

/// UCB1 (Upper Confidence Bound) selection policy.
///
/// Formula: score/n + c * sqrt(ln(N) / n). Unvisited children score 0.
#[derive(Clone, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn value(&self, score: f64, visits: u32, parent_visits: u32, exploration: f64) -> f64 {
        if visits == 0 {
            return 0.0;
        }
        let n = visits as f64;
        // Clamped so ln stays finite for a parent that was never selected.
        let ln_parent = (parent_visits.max(1) as f64).ln();
        score / n + exploration * (ln_parent / n).sqrt()
    }
}

/// Pick the highest-valued child of `node`, breaking ties uniformly at random.
///
/// Returns `node` itself when it has no children.
pub fn best_child<S, A>(
    tree: &MCTSTree<S, A>,
    node: NodeId,
    policy: &dyn SelectionPolicy,
    exploration: f64,
    rng: &mut GameRng,
) -> NodeId {
    let parent = tree.get(node);
    if parent.children.is_empty() {
        return node;
    }

    let mut best_value = f64::NEG_INFINITY;
    let mut best: SmallVec<[NodeId; 8]> = SmallVec::new();
    for &child_id in &parent.children {
        let child = tree.get(child_id);
        let value = policy.value(child.score, child.visits, parent.visits, exploration);
        if value > best_value {
            best_value = value;
            best.clear();
            best.push(child_id);
        } else if value == best_value {
            best.push(child_id);
        }
    }

    rng.choose(&best).copied().unwrap_or(node)
}

// =============================================================================
// Simulation Policy
// =============================================================================

/// Policy for running simulations (rollouts) from a leaf node.
pub trait SimulationPolicy<G: Game>: Send + Sync {
    /// Play from `state` with `player` to move until the game ends.
    ///
    /// Returns `None` when a non-terminal position has no legal move.
    fn simulate(
        &self,
        game: &G,
        state: &G::State,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Result<Option<GameResult>>;
}

/// Random simulation policy.
///
/// Plays uniformly random legal moves until terminal.
#[derive(Clone, Debug, Default)]
pub struct RandomRollout;

impl<G: Game> SimulationPolicy<G> for RandomRollout {
    fn simulate(
        &self,
        game: &G,
        state: &G::State,
        player: PlayerId,
        rng: &mut GameRng,
    ) -> Result<Option<GameResult>> {
        let mut state = state.clone();
        let mut player = player;

        loop {
            if let Some(result) = game.check_terminal(&state, player) {
                return Ok(Some(result));
            }

            let moves = game.valid_moves(&state);
            let Some(action) = rng.choose(&moves) else {
                return Ok(None);
            };

            state = game.apply_move(&state, action, player)?;
            player = game.next_player(player);
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Reward of a rollout outcome from `perspective`'s point of view.
///
/// The search passes the player it is searching for, not the player to move
/// at the simulated node, so every score in one tree shares that view.
/// Opponent wins are penalized far more heavily than draws.
pub fn calc_reward<G: Game>(game: &G, result: Option<&GameResult>, perspective: PlayerId) -> f64 {
    match result {
        Some(GameResult::Winner(p)) if *p == perspective => WIN_REWARD,
        Some(GameResult::Winner(p)) if *p == game.next_player(perspective) => LOSS_REWARD,
        Some(GameResult::Draw) => DRAW_REWARD,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::connect::{Board, ConnectGame};

    fn tree_with_children(stats: &[(f64, u32)], parent_visits: u32) -> MCTSTree<u8, usize> {
        let mut tree = MCTSTree::new(0, PlayerId::FIRST);
        let root = tree.root();
        tree.get_mut(root).visits = parent_visits;
        for (i, &(score, visits)) in stats.iter().enumerate() {
            let id = tree.add_child(root, 1, i, PlayerId::SECOND);
            let child = tree.get_mut(id);
            child.score = score;
            child.visits = visits;
        }
        tree
    }

    #[test]
    fn test_ucb_value_formula() {
        let c = 2.0;
        let expected = 3.0 / 4.0 + c * ((10.0f64).ln() / 4.0).sqrt();
        assert!((UCB1.value(3.0, 4, 10, c) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_unvisited_scores_zero() {
        assert_eq!(UCB1.value(50.0, 0, 10, 14.0), 0.0);
    }

    #[test]
    fn test_parent_visits_clamped() {
        // ln(1) = 0, so only the mean remains.
        assert_eq!(UCB1.value(-6.0, 3, 0, 14.0), -2.0);
    }

    #[test]
    fn test_best_child_picks_maximum() {
        let tree = tree_with_children(&[(-100.0, 2), (1.0, 2), (-10.0, 2)], 6);
        let mut rng = GameRng::new(1);

        let best = best_child(&tree, tree.root(), &UCB1, 1.0, &mut rng);
        assert_eq!(tree.get(best).action, Some(1));
    }

    #[test]
    fn test_unvisited_child_loses_to_positive_score() {
        // Unvisited children are scored 0, not infinity.
        let tree = tree_with_children(&[(5.0, 1), (0.0, 0)], 2);
        let mut rng = GameRng::new(1);

        let best = best_child(&tree, tree.root(), &UCB1, 0.0, &mut rng);
        assert_eq!(tree.get(best).action, Some(0));
    }

    #[test]
    fn test_ties_broken_randomly() {
        let tree = tree_with_children(&[(0.0, 1), (0.0, 1), (0.0, 1)], 3);
        let mut rng = GameRng::new(3);

        let mut seen = [false; 3];
        for _ in 0..200 {
            let best = best_child(&tree, tree.root(), &UCB1, 1.0, &mut rng);
            seen[tree.get(best).action.unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s), "every tied child should be picked eventually");
    }

    #[test]
    fn test_best_child_of_leaf_is_itself() {
        let tree: MCTSTree<u8, usize> = MCTSTree::new(0, PlayerId::FIRST);
        let mut rng = GameRng::new(1);
        assert_eq!(best_child(&tree, tree.root(), &UCB1, 1.0, &mut rng), tree.root());
    }

    #[test]
    fn test_calc_reward() {
        let game = ConnectGame::standard();
        let me = PlayerId::FIRST;

        assert_eq!(calc_reward(&game, Some(&GameResult::Winner(me)), me), 1.0);
        assert_eq!(calc_reward(&game, Some(&GameResult::Winner(me.opponent())), me), -100.0);
        assert_eq!(calc_reward(&game, Some(&GameResult::Draw), me), -10.0);
        assert_eq!(calc_reward(&game, None, me), 0.0);
    }

    #[test]
    fn test_rollout_reaches_terminal() {
        let game = ConnectGame::new(2, 5, 4).unwrap();
        let mut rng = GameRng::new(11);

        for _ in 0..20 {
            let result = RandomRollout
                .simulate(&game, &game.initial_state(), PlayerId::FIRST, &mut rng)
                .unwrap();
            assert!(result.is_some());
        }
    }

    #[test]
    fn test_rollout_from_terminal_state() {
        let game = ConnectGame::new(2, 5, 4).unwrap();
        let state = Board::parse(&["OOO..", "XXXX."]).unwrap();
        let mut rng = GameRng::new(11);

        let result = RandomRollout
            .simulate(&game, &state, PlayerId::SECOND, &mut rng)
            .unwrap();
        assert_eq!(result, Some(GameResult::Winner(PlayerId::FIRST)));
    }
}
