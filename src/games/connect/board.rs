//! Immutable grid board.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::error::{Error, Result};

/// Grid of cells, row 0 at the bottom.
///
/// Backed by a persistent `im::Vector`, so cloning is O(1) and placing a piece
/// shares structure with the previous board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vector<Option<PlayerId>>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: std::iter::repeat(None).take(rows * cols).collect(),
        }
    }

    /// Parse a board from text rows, top row first.
    ///
    /// `X` is the first player, `O` the second, `.` an empty cell.
    ///
    /// ```
    /// use rust_gridsearch::core::PlayerId;
    /// use rust_gridsearch::games::connect::Board;
    ///
    /// let board = Board::parse(&[".....", "XO..."]).unwrap();
    /// assert_eq!(board.get(0, 0), Some(PlayerId::FIRST));
    /// assert_eq!(board.get(0, 1), Some(PlayerId::SECOND));
    /// assert_eq!(board.get(1, 0), None);
    /// ```
    pub fn parse(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if height == 0 || width == 0 {
            return Err(Error::InvalidBoard {
                message: "board must have at least one row and one column".to_string(),
            });
        }

        let mut board = Self::empty(height, width);
        for (i, text) in rows.iter().enumerate() {
            if text.chars().count() != width {
                return Err(Error::InvalidBoard {
                    message: format!("row {} has {} cells, expected {}", i, text.chars().count(), width),
                });
            }
            let row = height - 1 - i;
            for (col, ch) in text.chars().enumerate() {
                let cell = match ch {
                    'X' => Some(PlayerId::FIRST),
                    'O' => Some(PlayerId::SECOND),
                    '.' => None,
                    other => {
                        return Err(Error::InvalidBoard {
                            message: format!("unexpected '{}' at row {}, column {}", other, i, col),
                        })
                    }
                };
                let idx = board.index(row, col);
                board.cells.set(idx, cell);
            }
        }
        Ok(board)
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Occupant of a cell. Out-of-range coordinates read as empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<PlayerId> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[self.index(row, col)]
    }

    /// Lowest empty row of a column, if the column has room.
    #[must_use]
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows).find(|&row| self.get(row, col).is_none())
    }

    /// A copy of this board with one cell set.
    #[must_use]
    pub fn with_cell(&self, row: usize, col: usize, player: PlayerId) -> Self {
        let mut next = self.clone();
        let idx = self.index(row, col);
        next.cells.set(idx, Some(player));
        next
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Every cell is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.filled() == self.rows * self.cols
    }
}
