//! Core MCTS search algorithm.
//!
//! Each call builds a fresh tree rooted at the given position, warms it up by
//! expanding a random line a few plies deep, then runs the playout budget.
//! Every iteration re-enters from the root:
//!
//! 1. select one step down (random child with probability epsilon, else the
//!    best UCB child), counting a visit on the node it leaves;
//! 2. if the selected node has been visited, expand it and select once more;
//! 3. play a random game to the end from there;
//! 4. add the reward to every node on the way back to the root.
//!
//! Rewards are always scored from the searching player's point of view.

use std::time::{Duration, Instant};

use tracing::{debug, trace, warn};

use crate::core::{GameRng, PlayerId};
use crate::error::Result;
use crate::rules::Game;

use super::config::MCTSConfig;
use super::node::NodeId;
use super::policy::{best_child, calc_reward, RandomRollout, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::{SearchStats, StopReason};
use super::tree::MCTSTree;

/// Initial arena capacity cap; large budgets grow the arena on demand.
const INITIAL_CAPACITY: usize = 4096;

/// Main MCTS search context.
///
/// Generic over the game type. Owns the configuration, the RNG and the tree
/// of the most recent search.
pub struct MCTSSearch<G: Game> {
    /// The game model.
    game: G,

    /// Player this engine plays for.
    player: PlayerId,

    /// Search configuration.
    config: MCTSConfig,

    /// RNG for selection, warm-up and rollouts.
    rng: GameRng,

    /// Selection policy.
    selection: Box<dyn SelectionPolicy>,

    /// Simulation policy.
    simulation: Box<dyn SimulationPolicy<G>>,

    /// Tree built by the last search.
    tree: Option<MCTSTree<G::State, G::Action>>,

    /// Statistics of the last search.
    stats: SearchStats,
}

impl<G: Game> MCTSSearch<G> {
    /// Create a new MCTS search context.
    ///
    /// The RNG is seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(game: G, player: PlayerId, config: MCTSConfig) -> Result<Self> {
        let rng = GameRng::from_optional_seed(config.seed);
        Self::with_rng(game, player, config, rng)
    }

    /// Create a search context driven by an explicit RNG.
    pub fn with_rng(game: G, player: PlayerId, config: MCTSConfig, rng: GameRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            game,
            player,
            config,
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomRollout),
            tree: None,
            stats: SearchStats::default(),
        })
    }

    /// Set a custom selection policy.
    pub fn with_selection<P: SelectionPolicy + 'static>(mut self, selection: P) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Set a custom simulation policy.
    pub fn with_simulation<P: SimulationPolicy<G> + 'static>(mut self, simulation: P) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Recommend a move for `player` from `state`, or `None` when there is
    /// nothing to recommend.
    ///
    /// Errors from the game model are logged and reported as `None`.
    pub fn best_move(&mut self, state: &G::State, player: PlayerId) -> Option<G::Action> {
        match self.search(state, player) {
            Ok(action) => action,
            Err(err) => {
                warn!(error = %err, %player, "search failed, no move recommended");
                None
            }
        }
    }

    /// Run a full search from `state` with `player` to move.
    ///
    /// Returns `Ok(None)` when `state` is already terminal, when the root
    /// could not be expanded, or when the chosen move is no longer legal.
    pub fn search(&mut self, state: &G::State, player: PlayerId) -> Result<Option<G::Action>> {
        let start = Instant::now();
        self.stats.reset();

        let capacity = self.config.max_nodes.min(INITIAL_CAPACITY);
        let mut tree = MCTSTree::with_capacity(state.clone(), player, capacity);

        if let Some(result) = self.game.check_terminal(state, player) {
            debug!(?result, %player, "root is terminal, skipping search");
            self.stats.stop_reason = StopReason::TerminalRoot;
            self.stats.time_us = start.elapsed().as_micros() as u64;
            self.tree = Some(tree);
            return Ok(None);
        }

        self.warm_up(&mut tree)?;

        let deadline = self
            .config
            .time_limit_ms
            .map(|ms| start + Duration::from_millis(ms));

        for _ in 0..self.config.playout_budget {
            if tree.len() >= self.config.max_nodes {
                self.stats.stop_reason = StopReason::NodeLimit;
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                self.stats.stop_reason = StopReason::Deadline;
                break;
            }
            self.iteration(&mut tree, player)?;
            self.stats.iterations += 1;
        }

        let action = self.pick_action(&tree);
        self.stats.time_us = start.elapsed().as_micros() as u64;

        debug!(
            %player,
            action = ?action,
            iterations = self.stats.iterations,
            nodes = tree.len(),
            stop = ?self.stats.stop_reason,
            "search finished"
        );

        self.tree = Some(tree);
        Ok(action)
    }

    /// Expand a random line from the root, `warmup_depth` plies deep at most.
    fn warm_up(&mut self, tree: &mut MCTSTree<G::State, G::Action>) -> Result<()> {
        let mut current = tree.root();
        for _ in 0..self.config.warmup_depth {
            self.expand(tree, current)?;
            let node = tree.get(current);
            match self.rng.choose(&node.children) {
                Some(&child) => current = child,
                // Terminal, nothing further to open up.
                None => break,
            }
        }
        Ok(())
    }

    /// Single MCTS iteration: select, expand, simulate, backpropagate.
    fn iteration(
        &mut self,
        tree: &mut MCTSTree<G::State, G::Action>,
        perspective: PlayerId,
    ) -> Result<()> {
        // === SELECTION ===
        let root = tree.root();
        let mut leaf = self.select(tree, root);

        // === EXPANSION ===
        if tree.get(leaf).visits != 0 {
            self.expand(tree, leaf)?;
            leaf = self.select(tree, leaf);
        }

        // === SIMULATION ===
        let node = tree.get(leaf);
        let result = self
            .simulation
            .simulate(&self.game, &node.state, node.player, &mut self.rng)?;
        self.stats.simulations += 1;
        let reward = calc_reward(&self.game, result.as_ref(), perspective);

        trace!(
            leaf = leaf.raw(),
            depth = node.depth,
            ?result,
            reward,
            "playout"
        );

        // === BACKPROPAGATION ===
        tree.backpropagate(leaf, reward);
        Ok(())
    }

    /// One selection step from `id`.
    ///
    /// A node with children gains a visit and hands over a random child with
    /// probability `random_child_probability`, the best child otherwise.
    /// A childless node is returned unchanged.
    fn select(&mut self, tree: &mut MCTSTree<G::State, G::Action>, id: NodeId) -> NodeId {
        let node = tree.get_mut(id);
        if node.children.is_empty() {
            return id;
        }
        node.visits += 1;

        if self.rng.chance(self.config.random_child_probability) {
            return self
                .rng
                .choose(&tree.get(id).children)
                .copied()
                .unwrap_or(id);
        }
        best_child(
            tree,
            id,
            self.selection.as_ref(),
            self.config.exploration_constant,
            &mut self.rng,
        )
    }

    /// Add one child per legal move. No-op for terminal or already
    /// expanded nodes.
    fn expand(&mut self, tree: &mut MCTSTree<G::State, G::Action>, id: NodeId) -> Result<()> {
        let node = tree.get(id);
        if node.is_expanded() || self.game.check_terminal(&node.state, node.player).is_some() {
            return Ok(());
        }

        let mover = node.player;
        let next = self.game.next_player(mover);
        let children = self
            .game
            .valid_moves(&node.state)
            .into_iter()
            .map(|action| {
                let state = self.game.apply_move(&node.state, &action, mover)?;
                Ok((state, action))
            })
            .collect::<Result<Vec<_>>>()?;

        for (state, action) in children {
            let child = tree.add_child(id, state, action, next);
            self.stats.nodes_expanded += 1;
            self.stats.max_depth = self.stats.max_depth.max(tree.get(child).depth);
        }
        Ok(())
    }

    /// Best child of the root, if its move is still legal at the root.
    fn pick_action(&mut self, tree: &MCTSTree<G::State, G::Action>) -> Option<G::Action> {
        let root = tree.root();
        let best = best_child(
            tree,
            root,
            self.selection.as_ref(),
            self.config.exploration_constant,
            &mut self.rng,
        );
        if best == root {
            return None;
        }

        let action = tree.get(best).action.clone()?;
        if self.game.is_valid_move(&tree.root_node().state, &action) {
            Some(action)
        } else {
            debug!(?action, "best root child is no longer legal");
            None
        }
    }

    /// Root children as `(action, visits, mean score)`, in expansion order.
    pub fn action_visits(&self) -> Vec<(G::Action, u32, f64)> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };
        tree.root_node()
            .children
            .iter()
            .filter_map(|&id| {
                let node = tree.get(id);
                let action = node.action.clone()?;
                Some((action, node.visits, node.mean_score()))
            })
            .collect()
    }

    /// Get search statistics of the last call.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Get the tree of the last call.
    #[must_use]
    pub fn tree(&self) -> Option<&MCTSTree<G::State, G::Action>> {
        self.tree.as_ref()
    }

    /// Player this engine was built for.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Get the game model.
    pub fn game(&self) -> &G {
        &self.game
    }

    /// Get the configuration.
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}
