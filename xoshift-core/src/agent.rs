//! Shift agent: the decision facade over rules, evaluation and search

use crate::board::{Board, Move, Player};
use crate::eval::{evaluate, Heuristics};
use crate::rules;
use crate::search;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Default RNG seed for the degraded-fallback tie-break
const DEFAULT_SEED: u64 = 42;

/// An autonomous player.
///
/// `choose_move` always returns a move from the current legal set,
/// falling back through cheaper policies when search has nothing to
/// offer; the `Move::PASS` sentinel appears only when no legal move
/// exists at all. Stateless between decisions apart from the seeded
/// RNG, so equal seeds replay identical games.
pub struct ShiftAgent {
    /// Search depth override; `None` adapts to board size
    pub depth: Option<u32>,
    pub heuristics: Heuristics,
    rng: ChaCha8Rng,
}

impl ShiftAgent {
    pub fn new(heuristics: Heuristics) -> Self {
        Self::with_seed(heuristics, DEFAULT_SEED)
    }

    pub fn with_seed(heuristics: Heuristics, seed: u64) -> Self {
        Self {
            depth: None,
            heuristics,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    fn depth_for(&self, size: usize) -> u32 {
        self.depth.unwrap_or_else(|| search::search_depth(size))
    }

    /// Pick one legal move for `player`, in priority order: an
    /// immediately winning move, then the search recommendation, then
    /// the best static evaluation among moves that do not hand the
    /// opponent a one-move win (uniform random among ties).
    pub fn choose_move(&mut self, board: &Board, player: Player) -> Move {
        let moves = rules::legal_moves(board, player);
        if moves.is_empty() {
            return Move::PASS;
        }

        // Win on the spot if possible
        for &mv in &moves {
            let next = rules::simulate(board, mv, player);
            if rules::wins_through(&next, mv.tgt_row, mv.tgt_col, player) {
                return mv;
            }
        }

        let depth = self.depth_for(board.size());
        if let Some(mv) = search::best_move(board, player, depth, &self.heuristics) {
            return mv;
        }

        self.fallback_move(board, player, &moves)
    }

    /// Degraded path: static-evaluation best among safe moves (those
    /// leaving the opponent no immediate winning reply), or among all
    /// legal moves if none is safe. Equally scored candidates are
    /// chosen uniformly at random from the seeded RNG.
    fn fallback_move(&mut self, board: &Board, player: Player, moves: &[Move]) -> Move {
        let opponent = player.opponent();
        let safe: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|&mv| {
                let next = rules::simulate(board, mv, player);
                !rules::legal_moves(&next, opponent).into_iter().any(|reply| {
                    let after = rules::simulate(&next, reply, opponent);
                    rules::wins_through(&after, reply.tgt_row, reply.tgt_col, opponent)
                })
            })
            .collect();
        let candidates = if safe.is_empty() { moves } else { &safe };

        let scored: Vec<(Move, i32)> = candidates
            .iter()
            .map(|&mv| {
                let next = rules::simulate(board, mv, player);
                (mv, evaluate(&next, player, &self.heuristics))
            })
            .collect();
        // candidates is non-empty, so the max exists
        let best = scored.iter().map(|&(_, s)| s).max().unwrap_or(0);
        let ties: Vec<Move> = scored
            .into_iter()
            .filter(|&(_, s)| s == best)
            .map(|(mv, _)| mv)
            .collect();

        ties[self.rng.gen_range(0..ties.len())]
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(rows: &[&str]) -> Board {
        let mut board = Board::new(rows.len()).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.chars().enumerate() {
                let cell = match ch {
                    'X' => Some(Player::X),
                    'O' => Some(Player::O),
                    _ => None,
                };
                board.set(r, c, cell);
            }
        }
        board
    }

    #[test]
    fn test_agent_returns_legal_move() {
        let mut agent = ShiftAgent::new(Heuristics::default()).with_depth(2);
        let board = board_from(&["X..", ".O.", "..X"]);
        let legal = rules::legal_moves(&board, Player::O);
        let mv = agent.choose_move(&board, Player::O);
        assert!(legal.contains(&mv));
    }

    #[test]
    fn test_agent_takes_immediate_win() {
        let mut agent = ShiftAgent::new(Heuristics::default()).with_depth(2);
        let board = board_from(&["XX.", "OO.", "..."]);
        let mv = agent.choose_move(&board, Player::X);
        let next = rules::simulate(&board, mv, Player::X);
        assert_eq!(rules::winner(&next), Some(Player::X));
    }

    #[test]
    fn test_agent_blocks_opponent_threat() {
        let mut agent = ShiftAgent::new(Heuristics::default()).with_depth(2);
        // O one move from completing row 2
        let board = board_from(&["X..", ".X.", "OO."]);
        let mv = agent.choose_move(&board, Player::X);
        let next = rules::simulate(&board, mv, Player::X);
        let o_wins_now = rules::legal_moves(&next, Player::O).into_iter().any(|reply| {
            let after = rules::simulate(&next, reply, Player::O);
            rules::wins_through(&after, reply.tgt_row, reply.tgt_col, Player::O)
        });
        assert!(!o_wins_now, "agent played {mv}, leaving O a one-move win");
    }

    #[test]
    fn test_agent_passes_only_without_moves() {
        let mut agent = ShiftAgent::new(Heuristics::default());
        let board = board_from(&["OOO", "O.O", "OOO"]);
        assert!(agent.choose_move(&board, Player::X).is_pass());
    }

    #[test]
    fn test_agent_deterministic_with_seed() {
        let board = board_from(&["..O", ".X.", "O.."]);
        let mut first = ShiftAgent::with_seed(Heuristics::default(), 7).with_depth(3);
        let mut second = ShiftAgent::with_seed(Heuristics::default(), 7).with_depth(3);
        for player in [Player::X, Player::O] {
            assert_eq!(
                first.choose_move(&board, player),
                second.choose_move(&board, player)
            );
        }
    }

    #[test]
    fn test_fallback_prefers_safe_moves() {
        let mut agent = ShiftAgent::with_seed(Heuristics::default(), 1);
        let board = board_from(&["X..", ".X.", "OO."]);
        let moves = rules::legal_moves(&board, Player::X);
        let mv = agent.fallback_move(&board, Player::X, &moves);
        let next = rules::simulate(&board, mv, Player::X);
        let o_wins_now = rules::legal_moves(&next, Player::O).into_iter().any(|reply| {
            let after = rules::simulate(&next, reply, Player::O);
            rules::wins_through(&after, reply.tgt_row, reply.tgt_col, Player::O)
        });
        assert!(!o_wins_now);
    }
}
