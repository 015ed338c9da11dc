//! Driving loop: two agents alternate on one live position.
//!
//! A turn asks the player to move for a recommendation. A legal move is
//! applied; a missing or illegal recommendation is recorded as a pass and the
//! turn goes to the other player. Play ends when the position is terminal.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::agents::Agent;
use crate::core::{PlayerId, PlayerMap};
use crate::error::{Error, Result};
use crate::rules::{Game, GameResult};

/// Limits for a single match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Turns (moves plus passes) before the match is abandoned.
    pub max_turns: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_turns: 1_000 }
    }
}

impl MatchConfig {
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }
}

/// Outcome of one match.
#[derive(Clone, Debug)]
pub struct MatchReport<S, A> {
    /// Terminal position.
    pub final_state: S,
    pub result: GameResult,
    /// Moves actually played, in order.
    pub moves: Vec<(PlayerId, A)>,
    /// Turns where the player to move offered no legal move.
    pub passes: u32,
}

impl<S, A> MatchReport<S, A> {
    /// Number of moves played.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }
}

/// Play one match from `start_state` with `first_player` to move.
///
/// `agents[0]` plays for [`PlayerId::FIRST`], `agents[1]` for
/// [`PlayerId::SECOND`]. Fails with [`Error::TurnLimit`] if the
/// game is not over after `config.max_turns` turns.
pub fn play_match<G: Game>(
    game: &G,
    mut agents: [&mut dyn Agent<G>; 2],
    start_state: &G::State,
    first_player: PlayerId,
    config: &MatchConfig,
) -> Result<MatchReport<G::State, G::Action>> {
    let mut state = start_state.clone();
    let mut player = first_player;
    let mut moves = Vec::new();
    let mut passes = 0;

    for turn in 0..config.max_turns {
        if let Some(result) = game.check_terminal(&state, player) {
            debug!(?result, turns = turn, moves = moves.len(), passes, "match finished");
            return Ok(MatchReport {
                final_state: state,
                result,
                moves,
                passes,
            });
        }

        let agent = &mut agents[player.index()];
        match agent.best_move(&state, player) {
            Some(action) if game.is_valid_move(&state, &action) => {
                trace!(turn, %player, agent = agent.name(), ?action, "move");
                state = game.apply_move(&state, &action, player)?;
                moves.push((player, action));
            }
            recommendation => {
                trace!(turn, %player, agent = agent.name(), ?recommendation, "pass");
                passes += 1;
            }
        }
        player = game.next_player(player);
    }

    // The final turn may have ended the game.
    if let Some(result) = game.check_terminal(&state, player) {
        return Ok(MatchReport {
            final_state: state,
            result,
            moves,
            passes,
        });
    }
    Err(Error::TurnLimit {
        limit: config.max_turns,
    })
}

/// Wins and draws over a series of matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesTally {
    pub wins: PlayerMap<u32>,
    pub draws: u32,
}

impl Default for SeriesTally {
    fn default() -> Self {
        Self {
            wins: PlayerMap::with_value(0),
            draws: 0,
        }
    }
}

impl SeriesTally {
    /// Count one result.
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Winner(player) => self.wins[player] += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    #[must_use]
    pub fn first_wins(&self) -> u32 {
        self.wins[PlayerId::FIRST]
    }

    #[must_use]
    pub fn second_wins(&self) -> u32 {
        self.wins[PlayerId::SECOND]
    }

    /// Matches recorded.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.wins.iter().map(|(_, &w)| w).sum::<u32>() + self.draws
    }
}

/// Play `matches` matches between the same two agents and tally results.
///
/// Agents keep their internal state between matches, so a learning agent
/// carries its table forward.
pub fn play_series<G: Game>(
    game: &G,
    agents: [&mut dyn Agent<G>; 2],
    start_state: &G::State,
    first_player: PlayerId,
    matches: u32,
    config: &MatchConfig,
) -> Result<SeriesTally> {
    let [first, second] = agents;
    let mut tally = SeriesTally::default();

    for index in 0..matches {
        let report = play_match(
            game,
            [&mut *first, &mut *second],
            start_state,
            first_player,
            config,
        )?;
        trace!(index, result = ?report.result, moves = report.move_count(), "series match");
        tally.record(report.result);
    }

    debug!(
        matches,
        first = tally.first_wins(),
        second = tally.second_wins(),
        draws = tally.draws,
        "series finished"
    );
    Ok(tally)
}
