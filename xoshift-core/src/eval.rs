//! Position evaluation

use crate::board::{Board, Player};
use serde::{Deserialize, Serialize};

/// Terminal value used by search for a decided game.
///
/// Reserved strictly outside the evaluator's output range so a won
/// position can never be confused with a merely good one. The
/// evaluator's magnitude is capped by `Heuristics::line_score` and the
/// threat sum, both far below this.
pub const WIN_SCORE: i32 = 1_000_000;

/// Scoring constants for [`evaluate`]
///
/// The contract: scores apply the same formula to either role (swap
/// player and opponent and the terms swap sign groups), a full line
/// short-circuits to `±line_score`, and every output stays strictly
/// below [`WIN_SCORE`] in magnitude.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Heuristics {
    /// Bonus per line one move away from winning (N-1 own, 1 empty)
    pub threat_bonus: i32,
    /// Penalty per opponent line one move away from winning; larger
    /// than `threat_bonus` because blocking is more urgent than
    /// attacking
    pub block_penalty: i32,
    /// Dominating score for a fully completed line
    pub line_score: i32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            threat_bonus: 10,
            block_penalty: 12,
            line_score: 1000,
        }
    }
}

/// Per-line symbol tallies
struct LineCounts {
    mine: usize,
    theirs: usize,
    empty: usize,
}

fn count_line(
    board: &Board,
    player: Player,
    cells: impl IntoIterator<Item = (usize, usize)>,
) -> LineCounts {
    let mut counts = LineCounts {
        mine: 0,
        theirs: 0,
        empty: 0,
    };
    for (r, c) in cells {
        match board.get(r, c) {
            Some(p) if p == player => counts.mine += 1,
            Some(_) => counts.theirs += 1,
            None => counts.empty += 1,
        }
    }
    counts
}

/// Static score of `board` from `player`'s perspective.
///
/// Line-potential scoring over every row, column and both diagonals:
/// a full own line returns `+line_score` immediately, a full opponent
/// line `-line_score`; otherwise each own threat (one empty cell away
/// from a win) adds `threat_bonus` and each opponent threat subtracts
/// `block_penalty`.
pub fn evaluate(board: &Board, player: Player, heuristics: &Heuristics) -> i32 {
    let n = board.size();
    let mut score = 0i32;

    let mut lines: Vec<Vec<(usize, usize)>> = Vec::with_capacity(2 * n + 2);
    for r in 0..n {
        lines.push((0..n).map(|c| (r, c)).collect());
    }
    for c in 0..n {
        lines.push((0..n).map(|r| (r, c)).collect());
    }
    lines.push((0..n).map(|i| (i, i)).collect());
    lines.push((0..n).map(|i| (i, n - 1 - i)).collect());

    for line in lines {
        let counts = count_line(board, player, line);
        if counts.mine == n {
            return heuristics.line_score;
        }
        if counts.theirs == n {
            return -heuristics.line_score;
        }
        if counts.mine == n - 1 && counts.empty == 1 {
            score += heuristics.threat_bonus;
        }
        if counts.theirs == n - 1 && counts.empty == 1 {
            score -= heuristics.block_penalty;
        }
    }

    score
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
    fn test_empty_board_scores_zero() {
        let board = Board::new(3).unwrap();
        let h = Heuristics::default();
        assert_eq!(evaluate(&board, Player::X, &h), 0);
        assert_eq!(evaluate(&board, Player::O, &h), 0);
    }

    #[test]
    fn test_full_line_dominates() {
        let h = Heuristics::default();
        let board = board_from(&["XXX", "O..", ".O."]);
        assert_eq!(evaluate(&board, Player::X, &h), h.line_score);
        assert_eq!(evaluate(&board, Player::O, &h), -h.line_score);
    }

    #[test]
    fn test_own_threat_scores_positive() {
        let h = Heuristics::default();
        // Row 0 is X's only threat
        let board = board_from(&["XX.", "O..", "..O"]);
        assert_eq!(evaluate(&board, Player::X, &h), h.threat_bonus);
    }

    #[test]
    fn test_blocking_outweighs_attacking() {
        let h = Heuristics::default();
        // X threatens row 0, O threatens row 2: the opponent threat
        // weighs more from either side.
        let board = board_from(&["XX.", "...", "OO."]);
        let for_x = evaluate(&board, Player::X, &h);
        let for_o = evaluate(&board, Player::O, &h);
        assert_eq!(for_x, h.threat_bonus - h.block_penalty);
        assert_eq!(for_o, h.threat_bonus - h.block_penalty);
        assert!(for_x < 0);
    }

    #[test]
    fn test_role_swap_symmetry() {
        let h = Heuristics::default();
        // Mirror of test_own_threat_scores_positive with roles swapped
        let board = board_from(&["OO.", "X..", "..X"]);
        assert_eq!(evaluate(&board, Player::O, &h), h.threat_bonus);
        assert_eq!(evaluate(&board, Player::X, &h), -h.block_penalty);
    }

    #[test]
    fn test_diagonal_threats_counted() {
        let h = Heuristics::default();
        // X one move from completing the main diagonal
        let board = board_from(&["X.O", ".X.", "O.."]);
        assert_eq!(evaluate(&board, Player::X, &h), h.threat_bonus);
    }

    #[test]
    fn test_score_bounded_below_win_score() {
        let h = Heuristics::default();
        // Worst case: every line is an opponent threat. 2N+2 lines.
        for size in 3..=10 {
            let bound = (2 * size as i32 + 2) * h.block_penalty.max(h.threat_bonus);
            assert!(bound < WIN_SCORE);
            assert!(h.line_score < WIN_SCORE);
        }
    }
}
