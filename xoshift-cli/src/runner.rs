//! Match runner - executes agent-vs-agent games

use tracing::{debug, info};
use xoshift_core::{
    GameError, GameResult, GameState, Heuristics, Player, RecordedMove, Replay, ShiftAgent,
};

/// Outcome of a single game
#[derive(Clone, Debug)]
pub struct GameOutcome {
    pub result: GameResult,
    pub turns: u32,
    pub moves: Vec<RecordedMove>,
}

impl GameOutcome {
    pub fn into_replay(self, board_size: usize) -> Replay {
        Replay {
            board_size,
            result: self.result,
            moves: self.moves,
        }
    }
}

/// Plays whole games between two seeded agents
pub struct MatchRunner {
    size: usize,
    depth: Option<u32>,
    max_turns: u32,
    seed_counter: u64,
}

impl MatchRunner {
    pub fn new(size: usize, depth: Option<u32>, max_turns: u32, seed: u64) -> Self {
        Self {
            size,
            depth,
            max_turns,
            seed_counter: seed,
        }
    }

    /// Play one game to completion or to the turn ceiling
    pub fn play_game(&mut self) -> Result<GameOutcome, GameError> {
        let mut game = GameState::new(self.size)?;
        let mut agent_x = self.make_agent();
        let mut agent_o = self.make_agent();
        let mut moves = Vec::new();

        while game.result() == GameResult::Ongoing && game.turns() < self.max_turns {
            let player = game.current_player();
            let mv = match player {
                Player::X => agent_x.choose_move(game.board(), player),
                Player::O => agent_o.choose_move(game.board(), player),
            };

            // Sentinel means the mover has no legal move: a stalemate
            if mv.is_pass() {
                break;
            }

            game.try_move(mv)?;
            debug!(%player, %mv, turn = game.turns(), "applied move");
            moves.push(RecordedMove { player, mv });
        }

        // Ongoing at the ceiling (or stalemate) counts as a draw
        let result = match game.result() {
            GameResult::Ongoing => GameResult::Draw,
            decided => decided,
        };
        info!(?result, turns = game.turns(), "game finished");

        Ok(GameOutcome {
            result,
            turns: game.turns(),
            moves,
        })
    }

    fn make_agent(&mut self) -> ShiftAgent {
        let seed = self.seed_counter;
        self.seed_counter = self.seed_counter.wrapping_add(1);
        let mut agent = ShiftAgent::with_seed(Heuristics::default(), seed);
        if let Some(depth) = self.depth {
            agent = agent.with_depth(depth);
        }
        agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_finishes_within_ceiling() {
        let mut runner = MatchRunner::new(3, Some(2), 30, 42);
        let outcome = runner.play_game().unwrap();
        assert!(outcome.turns <= 30);
        assert_ne!(outcome.result, GameResult::Ongoing);
        assert_eq!(outcome.moves.len() as u32, outcome.turns);
    }

    #[test]
    fn test_runner_outcome_converts_to_replay() {
        let mut runner = MatchRunner::new(3, Some(1), 10, 7);
        let outcome = runner.play_game().unwrap();
        let turns = outcome.turns;
        let replay = outcome.into_replay(3);
        assert_eq!(replay.board_size, 3);
        assert_eq!(replay.moves.len() as u32, turns);
        replay.final_position().unwrap();
    }
}
