//! Replay records: persist a finished game, rebuild any prefix
//!
//! The JSON layout mirrors what the match runner records: board size,
//! the moves in play order with the mover attached, and the final
//! result. Loading re-validates every move through the rules engine,
//! so a tampered or corrupt record surfaces as an error instead of a
//! silently wrong board.

use crate::board::{Board, Move, Player};
use crate::game::{GameResult, GameState};
use crate::rules;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded ply
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub player: Player,
    #[serde(flatten)]
    pub mv: Move,
}

/// A complete recorded game
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Replay {
    pub board_size: usize,
    pub result: GameResult,
    pub moves: Vec<RecordedMove>,
}

impl Replay {
    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading replay {}", path.display()))?;
        let replay: Replay = serde_json::from_str(&content)
            .with_context(|| format!("parsing replay {}", path.display()))?;
        Ok(replay)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("writing replay {}", path.display()))?;
        Ok(())
    }

    /// Rebuild the position after the first `plies` recorded moves.
    ///
    /// Each move is validated for its recorded mover; the first
    /// illegal one aborts the reconstruction.
    pub fn position_after(&self, plies: usize) -> anyhow::Result<GameState> {
        let mut board = Board::new(self.board_size)?;
        let upto = plies.min(self.moves.len());

        for (i, record) in self.moves[..upto].iter().enumerate() {
            rules::apply_move(&mut board, record.mv, record.player)
                .with_context(|| format!("replay move {} ({})", i + 1, record.mv))?;
        }

        let to_move = match self.moves[..upto].last() {
            Some(last) => last.player.opponent(),
            None => Player::X,
        };
        Ok(GameState::from_board(board, to_move))
    }

    /// Rebuild the final position
    pub fn final_position(&self) -> anyhow::Result<GameState> {
        self.position_after(self.moves.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ShiftAgent;
    use crate::eval::Heuristics;

    /// Record a short seeded 3x3 game
    fn recorded_game() -> (Replay, GameState) {
        let mut game = GameState::new(3).unwrap();
        let mut x = ShiftAgent::with_seed(Heuristics::default(), 1).with_depth(2);
        let mut o = ShiftAgent::with_seed(Heuristics::default(), 2).with_depth(2);
        let mut moves = Vec::new();

        while game.result() == GameResult::Ongoing && game.turns() < 20 {
            let player = game.current_player();
            let mv = match player {
                Player::X => x.choose_move(game.board(), player),
                Player::O => o.choose_move(game.board(), player),
            };
            if mv.is_pass() {
                break;
            }
            game.try_move(mv).unwrap();
            moves.push(RecordedMove { player, mv });
        }

        let replay = Replay {
            board_size: 3,
            result: game.result(),
            moves,
        };
        (replay, game)
    }

    #[test]
    fn test_prefix_reconstruction_matches_live_game() {
        let (replay, final_game) = recorded_game();
        assert!(!replay.moves.is_empty());

        let rebuilt = replay.final_position().unwrap();
        assert_eq!(rebuilt.board(), final_game.board());
        assert_eq!(rebuilt.winner(), final_game.winner());

        // Every prefix must also replay cleanly
        for plies in 0..=replay.moves.len() {
            replay.position_after(plies).unwrap();
        }
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (replay, _) = recorded_game();
        let path = std::env::temp_dir().join("xoshift_replay_roundtrip.json");

        replay.save(&path).unwrap();
        let loaded = Replay::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.board_size, replay.board_size);
        assert_eq!(loaded.result, replay.result);
        assert_eq!(loaded.moves, replay.moves);
    }

    #[test]
    fn test_invalid_recorded_move_is_an_error() {
        let replay = Replay {
            board_size: 3,
            result: GameResult::Draw,
            moves: vec![RecordedMove {
                player: Player::X,
                // Interior source: never legal
                mv: Move::new(1, 1, 1, 0),
            }],
        };
        assert!(replay.final_position().is_err());
    }

    #[test]
    fn test_empty_replay_starts_fresh() {
        let replay = Replay {
            board_size: 4,
            result: GameResult::Ongoing,
            moves: vec![],
        };
        let game = replay.position_after(0).unwrap();
        assert_eq!(game.current_player(), Player::X);
        assert_eq!(game.result(), GameResult::Ongoing);
    }
}
