//! Tabular Q-learning agent.
//!
//! The agent keys its table by the game's state hash, picks moves
//! epsilon-greedily, and learns from the immediate reward a game attaches to
//! each move through [`ActionRewards`].

use tracing::trace;

use crate::core::{GameRng, PlayerId};
use crate::error::Result;
use crate::rules::{ActionRewards, Game};

use super::config::QLearningConfig;
use super::snapshot::QTableSnapshot;
use super::table::QTable;

/// Q-learning agent (off-policy TD control) for one player of `G`.
pub struct QLearningAgent<G: Game> {
    game: G,
    player: PlayerId,
    config: QLearningConfig,
    rng: GameRng,
    table: QTable<G::Action>,
}

impl<G: Game> QLearningAgent<G> {
    /// Create an agent with an empty table.
    ///
    /// The RNG is seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(game: G, player: PlayerId, config: QLearningConfig) -> Result<Self> {
        let rng = GameRng::from_optional_seed(config.seed);
        Self::with_rng(game, player, config, rng)
    }

    /// Create an agent driven by an explicit RNG.
    pub fn with_rng(
        game: G,
        player: PlayerId,
        config: QLearningConfig,
        rng: GameRng,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            game,
            player,
            config,
            rng,
            table: QTable::new(),
        })
    }

    /// ε-greedy move selection.
    ///
    /// With probability epsilon a uniformly random legal move; otherwise the
    /// legal move with the highest Q-value, earliest in `valid_moves` order on
    /// ties. The greedy branch stores a 0 for each legal move it has not seen
    /// yet, so later updates bootstrap over every move considered here.
    /// `None` only when there is no legal move.
    pub fn best_move(&mut self, state: &G::State) -> Option<G::Action> {
        let moves = self.game.valid_moves(state);
        if moves.is_empty() {
            return None;
        }

        if self.rng.chance(self.config.epsilon) {
            // Explore
            return self.rng.choose(&moves).cloned();
        }

        let key = self.game.state_key(state);
        self.table.greedy(key, &moves).cloned()
    }

    /// Apply one Q-learning update for `action` taken in `state`.
    ///
    /// Returns the updated value.
    pub fn update_q(&mut self, state: &G::State, action: &G::Action, reward: f64) -> f64 {
        let key = self.game.state_key(state);
        let value = self
            .table
            .update(key, action, reward, self.config.alpha, self.config.gamma);
        trace!(state = %key, ?action, reward, value, "q update");
        value
    }

    /// Current Q-value of `action` in `state` (0 if never updated).
    #[must_use]
    pub fn value(&self, state: &G::State, action: &G::Action) -> f64 {
        self.table.get(self.game.state_key(state), action)
    }

    /// Number of updates applied to `action` in `state`.
    #[must_use]
    pub fn visit_count(&self, state: &G::State, action: &G::Action) -> u32 {
        self.table.visit_count(self.game.state_key(state), action)
    }

    /// Number of distinct states in the table.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.table.state_count()
    }

    #[must_use]
    pub fn table(&self) -> &QTable<G::Action> {
        &self.table
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn config(&self) -> &QLearningConfig {
        &self.config
    }

    pub fn game(&self) -> &G {
        &self.game
    }
}

impl<G: ActionRewards> QLearningAgent<G> {
    /// Pick a move, learn from its immediate reward, and return it.
    ///
    /// Moves the game classifies as [`Skip`](crate::rules::ActionSignal::Skip)
    /// are returned without an update.
    pub fn learning_run(&mut self, state: &G::State) -> Option<G::Action> {
        let action = self.best_move(state)?;
        let signal = self.game.action_signal(state, &action, self.player);

        match self.config.rewards.reward(signal) {
            Some(reward) => {
                self.update_q(state, &action, reward);
            }
            None => trace!(?action, "no reward for move, skipping update"),
        }
        Some(action)
    }
}

impl<G: Game> QLearningAgent<G>
where
    G::Action: Ord,
{
    /// Capture the learned table.
    pub fn snapshot(&self) -> QTableSnapshot<G::Action> {
        QTableSnapshot::from_table(&self.table)
    }

    /// Replace the learned table with the contents of `snapshot`.
    pub fn restore(&mut self, snapshot: QTableSnapshot<G::Action>) -> Result<()> {
        self.table = snapshot.into_table()?;
        Ok(())
    }
}

/// Adapter that plays through [`QLearningAgent::learning_run`], so the agent
/// keeps learning while it plays.
pub struct Learning<'a, G: Game> {
    agent: &'a mut QLearningAgent<G>,
}

impl<'a, G: ActionRewards> Learning<'a, G> {
    pub fn new(agent: &'a mut QLearningAgent<G>) -> Self {
        Self { agent }
    }

    pub fn best_move(&mut self, state: &G::State) -> Option<G::Action> {
        self.agent.learning_run(state)
    }

    pub fn agent(&self) -> &QLearningAgent<G> {
        self.agent
    }
}
