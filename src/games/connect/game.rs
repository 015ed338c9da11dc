//! Connect-style game implementation.

use crate::core::PlayerId;
use crate::error::{Error, Result};
use crate::rules::{ActionRewards, ActionSignal, Game, GameResult};

use super::board::Board;

/// Directions scanned for a line: right, up, up-right, up-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Gravity grid game: drop pieces into columns, `line` in a row wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectGame {
    rows: usize,
    cols: usize,
    line: usize,
}

impl ConnectGame {
    /// Create a game on a `rows` x `cols` grid where `line` in a row wins.
    pub fn new(rows: usize, cols: usize, line: usize) -> Result<Self> {
        if rows == 0 {
            return Err(Error::InvalidConfig {
                field: "rows",
                value: rows.to_string(),
                reason: "must be at least 1",
            });
        }
        if cols == 0 {
            return Err(Error::InvalidConfig {
                field: "cols",
                value: cols.to_string(),
                reason: "must be at least 1",
            });
        }
        if line == 0 {
            return Err(Error::InvalidConfig {
                field: "line",
                value: line.to_string(),
                reason: "must be at least 1",
            });
        }
        Ok(Self { rows, cols, line })
    }

    /// Classic six-row, seven-column, four-in-a-row.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            rows: 6,
            cols: 7,
            line: 4,
        }
    }

    /// The empty starting board.
    #[must_use]
    pub fn initial_state(&self) -> Board {
        Board::empty(self.rows, self.cols)
    }

    /// Pieces in a row needed to win.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Check whether `player` owns `line` consecutive cells anywhere.
    #[must_use]
    pub fn has_line(&self, board: &Board, player: PlayerId) -> bool {
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                if board.get(row, col) != Some(player) {
                    continue;
                }
                for &(dr, dc) in &DIRECTIONS {
                    if self.run_length(board, player, row, col, dr, dc) >= self.line {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn run_length(
        &self,
        board: &Board,
        player: PlayerId,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
    ) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize, col as isize);
        while r >= 0
            && c >= 0
            && count < self.line
            && board.get(r as usize, c as usize) == Some(player)
        {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Game for ConnectGame {
    type State = Board;
    type Action = usize;

    fn valid_moves(&self, state: &Board) -> Vec<usize> {
        (0..state.cols())
            .filter(|&col| state.drop_row(col).is_some())
            .collect()
    }

    fn apply_move(&self, state: &Board, action: &usize, player: PlayerId) -> Result<Board> {
        let row = state
            .drop_row(*action)
            .ok_or_else(|| Error::invalid_move(action))?;
        Ok(state.with_cell(row, *action, player))
    }

    fn check_terminal(&self, state: &Board, player: PlayerId) -> Option<GameResult> {
        if self.has_line(state, player) {
            return Some(GameResult::Winner(player));
        }
        let other = self.next_player(player);
        if self.has_line(state, other) {
            return Some(GameResult::Winner(other));
        }
        if state.is_full() {
            return Some(GameResult::Draw);
        }
        None
    }
}

impl ActionRewards for ConnectGame {
    /// The signal is the occupant of the cell directly beneath where the piece
    /// comes to rest; the bottom row counts as empty ground.
    fn action_signal(&self, state: &Board, action: &usize, player: PlayerId) -> ActionSignal {
        match state.drop_row(*action) {
            None => ActionSignal::Skip,
            Some(0) => ActionSignal::Empty,
            Some(row) => match state.get(row - 1, *action) {
                Some(owner) if owner == player => ActionSignal::OwnMarker,
                Some(_) => ActionSignal::OpponentMarker,
                None => ActionSignal::Empty,
            },
        }
    }
}
