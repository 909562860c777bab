//! Depth-limited minimax with alpha-beta pruning
//!
//! The search maximizes for a fixed player; at minimizing nodes the
//! opponent is on move. Every simulated move runs on an independent
//! board copy, so the caller's board is never touched.

use crate::board::{Board, Move, Player};
use crate::eval::{evaluate, Heuristics, WIN_SCORE};
use crate::rules;

/// Default search depth for a board size. The branching factor grows
/// with the rim, so larger boards search shallower.
pub fn search_depth(size: usize) -> u32 {
    if size == 3 {
        6
    } else {
        4
    }
}

/// Best move for `player` at the given depth, or `None` when no legal
/// move exists.
pub fn best_move(board: &Board, player: Player, depth: u32, heuristics: &Heuristics) -> Option<Move> {
    let moves = rules::legal_moves(board, player);
    if moves.is_empty() {
        return None;
    }
    if moves.len() == 1 {
        return Some(moves[0]);
    }

    let (_, chosen) = minimax(board, player, depth, -WIN_SCORE * 2, WIN_SCORE * 2, true, heuristics);
    // All child scores dominate the initialization sentinel, so the
    // search only comes back empty at depth 0; the first enumerated
    // move is the documented fallback either way.
    chosen.or(Some(moves[0]))
}

/// Terminal value for a board someone has already won, preferring
/// faster wins (higher remaining depth) over slower ones.
fn terminal_score(winner: Player, player: Player, depth: u32) -> i32 {
    if winner == player {
        WIN_SCORE + depth as i32
    } else {
        -WIN_SCORE - depth as i32
    }
}

/// One search node: returns the best achievable score for `player`
/// and the move that achieves it at this node (if any move was
/// searched).
fn minimax(
    board: &Board,
    player: Player,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    heuristics: &Heuristics,
) -> (i32, Option<Move>) {
    // True terminal, not subject to the depth horizon
    if let Some(winner) = rules::winner(board) {
        return (terminal_score(winner, player, depth), None);
    }

    // Horizon cutoff
    if depth == 0 {
        return (evaluate(board, player, heuristics), None);
    }

    let on_move = if maximizing { player } else { player.opponent() };
    let moves = rules::legal_moves(board, on_move);
    if moves.is_empty() {
        // Stalemate leaf
        return (evaluate(board, player, heuristics), None);
    }

    // Move ordering: score each child once, explore the most promising
    // first. Stable sort keeps enumeration order as the tie-break.
    let mut children: Vec<(Move, Board, i32)> = moves
        .into_iter()
        .map(|mv| {
            let child = rules::simulate(board, mv, on_move);
            let score = evaluate(&child, player, heuristics);
            (mv, child, score)
        })
        .collect();
    if maximizing {
        children.sort_by(|a, b| b.2.cmp(&a.2));
    } else {
        children.sort_by(|a, b| a.2.cmp(&b.2));
    }

    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best: Option<Move> = None;

    for (mv, child, _) in &children {
        let (score, _) = minimax(child, player, depth - 1, alpha, beta, !maximizing, heuristics);

        if maximizing {
            if score > best_score {
                best_score = score;
                best = Some(*mv);
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best = Some(*mv);
            }
            beta = beta.min(best_score);
        }

        if alpha >= beta {
            break;
        }
    }

    (best_score, best)
}

// ============================================================================
// TESTS
// ============================================================================
