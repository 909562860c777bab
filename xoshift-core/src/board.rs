//! Board storage and rim geometry

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Smallest playable board
pub const MIN_BOARD_SIZE: usize = 3;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One board cell: empty or owned by a player
pub type Cell = Option<Player>;

/// A shift move: pick a rim source, push a piece in at a rim target
/// on the same row or column.
///
/// `Move::PASS` (all zeroes) is never a playable move; it is the
/// sentinel an agent returns when no legal move exists at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub src_row: usize,
    pub src_col: usize,
    pub tgt_row: usize,
    pub tgt_col: usize,
}

impl Move {
    /// "No legal move" sentinel
    pub const PASS: Move = Move::new(0, 0, 0, 0);

    pub const fn new(src_row: usize, src_col: usize, tgt_row: usize, tgt_col: usize) -> Self {
        Self {
            src_row,
            src_col,
            tgt_row,
            tgt_col,
        }
    }

    pub fn is_pass(&self) -> bool {
        *self == Move::PASS
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})->({},{})",
            self.src_row, self.src_col, self.tgt_row, self.tgt_col
        )
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Rules and construction failures. A failed operation never leaves a
/// partially mutated board behind.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board size must be at least {MIN_BOARD_SIZE}, got {0}")]
    BoardTooSmall(usize),

    #[error("move {0} leaves the {1}x{1} board")]
    OutOfBounds(Move, usize),

    #[error("move {0}: source is not a legal selection for {1}")]
    IllegalSelection(Move, Player),

    #[error("move {0}: target is not a rim extreme of the source row or column")]
    IllegalTarget(Move),
}

// ============================================================================
// BOARD
// ============================================================================

/// Square N x N grid of cells (clone to simulate)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Rejects sizes below 3.
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size < MIN_BOARD_SIZE {
            return Err(GameError::BoardTooSmall(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * self.size + col] = cell;
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Is (row, col) on the outer border?
    pub fn is_rim(&self, row: usize, col: usize) -> bool {
        row == 0 || row == self.size - 1 || col == 0 || col == self.size - 1
    }

    /// Rim cells in row-major order
    pub fn rim_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        (0..size)
            .flat_map(move |r| (0..size).map(move |c| (r, c)))
            .filter(move |&(r, c)| r == 0 || r == size - 1 || c == 0 || c == size - 1)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Number of cells owned by `player`
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == Some(player))
            .count()
    }

    /// Iterate all cells with coordinates
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i / size, i % size, cell))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.get(row, col) {
                    Some(p) => p.symbol(),
                    None => '.',
                };
                write!(f, "{ch}")?;
                if col + 1 < self.size {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
