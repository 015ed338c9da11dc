//! Connect-style gravity game.
//!
//! Players alternately drop a piece into a column; it falls to the lowest
//! empty cell. The first player with `line` pieces in a row (horizontally,
//! vertically or diagonally) wins, and a full board without a line is a draw.
//!
//! Grid size and line length are configurable, so the same rules cover the
//! classic 6x7 board and small boards used to exercise the agents.

mod board;
mod game;

pub use board::Board;
pub use game::ConnectGame;
