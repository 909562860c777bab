//! Game state: board plus whose-turn bookkeeping
//!
//! The rules engine in [`crate::rules`] is pure over boards; this
//! wrapper is what orchestration (runner, replay) drives a whole game
//! through.

use crate::board::{Board, GameError, Move, Player};
use crate::rules;
use serde::{Deserialize, Serialize};

/// Game outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    XWins,
    OWins,
    Draw,
}

impl GameResult {
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::XWins => Some(Player::X),
            GameResult::OWins => Some(Player::O),
            GameResult::Ongoing | GameResult::Draw => None,
        }
    }

    pub fn from_winner(player: Player) -> Self {
        match player {
            Player::X => GameResult::XWins,
            Player::O => GameResult::OWins,
        }
    }
}

/// A game in progress. X moves first.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    current_player: Player,
    winner: Option<Player>,
    turns: u32,
}

impl GameState {
    /// New game on an empty board
    pub fn new(size: usize) -> Result<Self, GameError> {
        Ok(Self {
            board: Board::new(size)?,
            current_player: Player::X,
            winner: None,
            turns: 0,
        })
    }

    /// Adopt an existing position with `to_move` on move. The winner,
    /// if any, is re-derived from the board.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let winner = rules::winner(&board);
        Self {
            board,
            current_player: to_move,
            winner,
            turns: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Applied moves so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Legal moves for the player on move; empty once the game is
    /// decided.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.winner.is_some() {
            return Vec::new();
        }
        rules::legal_moves(&self.board, self.current_player)
    }

    /// Validate and play a move for the player on move. On success the
    /// winner is re-adjudicated and, if the game continues, the turn
    /// passes to the opponent. On error nothing changes.
    pub fn try_move(&mut self, mv: Move) -> Result<(), GameError> {
        rules::apply_move(&mut self.board, mv, self.current_player)?;
        self.turns += 1;
        self.winner = rules::winner(&self.board);
        if self.winner.is_none() {
            self.current_player = self.current_player.opponent();
        }
        Ok(())
    }

    /// Current result. Draw means the player on move has no legal
    /// move; an external turn ceiling is the runner's concern.
    pub fn result(&self) -> GameResult {
        if let Some(winner) = self.winner {
            return GameResult::from_winner(winner);
        }
        if rules::legal_moves(&self.board, self.current_player).is_empty() {
            return GameResult::Draw;
        }
        GameResult::Ongoing
    }
}

// ============================================================================
// TESTS
// ============================================================================
