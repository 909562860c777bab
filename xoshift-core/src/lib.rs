//! XOShift Core - Game rules and AI
//!
//! This crate provides the core logic for XOShift, a sliding variant
//! of tic-tac-toe on an N x N board:
//! - Board storage and rim geometry
//! - Rules engine (selection legality, shift application, win detection)
//! - Line-potential position evaluation
//! - Depth-limited alpha-beta search with move ordering
//! - Agent facade with a graceful fallback chain
//! - Replay records with JSON persistence

pub mod agent;
pub mod board;
pub mod eval;
pub mod game;
pub mod replay;
pub mod rules;
pub mod search;

// Re-exports for convenient access
pub use agent::ShiftAgent;
pub use board::{Board, Cell, GameError, Move, Player, MIN_BOARD_SIZE};
pub use eval::{evaluate, Heuristics, WIN_SCORE};
pub use game::{GameResult, GameState};
pub use replay::{RecordedMove, Replay};
pub use rules::{all_winners, apply_move, legal_moves, legal_selections, winner};
pub use search::{best_move, search_depth};
