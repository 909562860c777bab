//! Rules engine: selection legality, move enumeration, shift
//! application, win detection
//!
//! All queries are pure functions over a [`Board`]; application
//! mutates in place only after validation succeeds.

use crate::board::{Board, GameError, Move, Player};

// ============================================================================
// SELECTION & MOVE GENERATION
// ============================================================================

/// Rim cells `player` may pick a source from.
///
/// If any rim cell is empty the player must introduce a new piece
/// through one of them; only once the rim is saturated may they
/// recycle one of their own rim pieces. Returned in row-major order.
pub fn legal_selections(board: &Board, player: Player) -> Vec<(usize, usize)> {
    let mut empty = Vec::new();
    let mut own = Vec::new();

    for (r, c) in board.rim_cells() {
        match board.get(r, c) {
            None => empty.push((r, c)),
            Some(p) if p == player => own.push((r, c)),
            Some(_) => {}
        }
    }

    if empty.is_empty() {
        own
    } else {
        empty
    }
}

/// Rim targets reachable from a source cell: the extremes of its row
/// and column, minus the source itself and duplicates.
///
/// Edge cells yield 3 targets, corners collapse to 2.
fn targets_from(size: usize, src_row: usize, src_col: usize) -> Vec<(usize, usize)> {
    let candidates = [
        (src_row, 0),
        (src_row, size - 1),
        (0, src_col),
        (size - 1, src_col),
    ];

    let mut targets = Vec::with_capacity(4);
    for (r, c) in candidates {
        if (r, c) == (src_row, src_col) || targets.contains(&(r, c)) {
            continue;
        }
        targets.push((r, c));
    }
    targets
}

/// All legal moves for `player`, in deterministic order (selections
/// row-major, targets in fixed candidate order).
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();
    for (sr, sc) in legal_selections(board, player) {
        for (tr, tc) in targets_from(board.size(), sr, sc) {
            moves.push(Move::new(sr, sc, tr, tc));
        }
    }
    moves
}

// ============================================================================
// MOVE APPLICATION
// ============================================================================

/// Check shape, rim membership and selection-rule compliance without
/// touching the board.
pub fn validate_move(board: &Board, mv: Move, player: Player) -> Result<(), GameError> {
    if !board.in_bounds(mv.src_row, mv.src_col) || !board.in_bounds(mv.tgt_row, mv.tgt_col) {
        return Err(GameError::OutOfBounds(mv, board.size()));
    }
    if !legal_selections(board, player).contains(&(mv.src_row, mv.src_col)) {
        return Err(GameError::IllegalSelection(mv, player));
    }
    if !targets_from(board.size(), mv.src_row, mv.src_col).contains(&(mv.tgt_row, mv.tgt_col)) {
        return Err(GameError::IllegalTarget(mv));
    }
    Ok(())
}

/// Validate then apply. On error the board is untouched.
pub fn apply_move(board: &mut Board, mv: Move, player: Player) -> Result<(), GameError> {
    validate_move(board, mv, player)?;
    apply_move_unchecked(board, mv, player);
    Ok(())
}

/// Apply a move that is already known to be legal.
///
/// The source content is discarded, every cell between source and
/// target slides one step toward the source, and `player`'s symbol is
/// written at the target (queue pop at the source end, push at the
/// target end). Only the shift direction is resolved here; legality
/// must have been confirmed by the caller.
pub fn apply_move_unchecked(board: &mut Board, mv: Move, player: Player) {
    let Move {
        src_row: sr,
        src_col: sc,
        tgt_row: tr,
        tgt_col: tc,
    } = mv;

    if sr == tr {
        // Horizontal shift
        if tc < sc {
            for col in (tc + 1..=sc).rev() {
                board.set(sr, col, board.get(sr, col - 1));
            }
        } else {
            for col in sc..tc {
                board.set(sr, col, board.get(sr, col + 1));
            }
        }
    } else {
        // Vertical shift
        if tr < sr {
            for row in (tr + 1..=sr).rev() {
                board.set(row, sc, board.get(row - 1, sc));
            }
        } else {
            for row in sr..tr {
                board.set(row, sc, board.get(row + 1, sc));
            }
        }
    }

    board.set(tr, tc, Some(player));
}

/// Clone the board and apply `mv` for `player` without validation.
/// Search and the agent call this on moves taken from [`legal_moves`].
pub fn simulate(board: &Board, mv: Move, player: Player) -> Board {
    let mut next = board.clone();
    apply_move_unchecked(&mut next, mv, player);
    next
}

// ============================================================================
// WIN DETECTION
// ============================================================================

fn line_owner(board: &Board, cells: impl IntoIterator<Item = (usize, usize)>) -> Option<Player> {
    let mut owner = None;
    for (r, c) in cells {
        match (owner, board.get(r, c)) {
            (_, None) => return None,
            (None, cell) => owner = cell,
            (Some(p), Some(q)) if p != q => return None,
            _ => {}
        }
    }
    owner
}

/// First completed line's owner, scanning rows (ascending), then
/// columns, then the main diagonal, then the anti-diagonal.
///
/// A single shift can complete lines for both players at once; this
/// scan order is the canonical tie-break. Use [`all_winners`] when the
/// simultaneous case must be adjudicated differently.
pub fn winner(board: &Board) -> Option<Player> {
    let n = board.size();

    for r in 0..n {
        if let Some(p) = line_owner(board, (0..n).map(|c| (r, c))) {
            return Some(p);
        }
    }
    for c in 0..n {
        if let Some(p) = line_owner(board, (0..n).map(|r| (r, c))) {
            return Some(p);
        }
    }
    if let Some(p) = line_owner(board, (0..n).map(|i| (i, i))) {
        return Some(p);
    }
    line_owner(board, (0..n).map(|i| (i, n - 1 - i)))
}

/// Every player owning at least one completed line.
pub fn all_winners(board: &Board) -> Vec<Player> {
    let n = board.size();
    let mut winners = Vec::new();
    let mut add = |p: Option<Player>| {
        if let Some(p) = p {
            if !winners.contains(&p) {
                winners.push(p);
            }
        }
    };

    for r in 0..n {
        add(line_owner(board, (0..n).map(|c| (r, c))));
    }
    for c in 0..n {
        add(line_owner(board, (0..n).map(|r| (r, c))));
    }
    add(line_owner(board, (0..n).map(|i| (i, i))));
    add(line_owner(board, (0..n).map(|i| (i, n - 1 - i))));

    winners
}

/// Did the move that just wrote `player` at (row, col) complete a
/// line? Checks only that row, that column, and any diagonal through
/// the cell. Agrees with [`winner`] whenever the last write is the
/// only change.
pub fn wins_through(board: &Board, row: usize, col: usize, player: Player) -> bool {
    let n = board.size();

    if (0..n).all(|c| board.get(row, c) == Some(player)) {
        return true;
    }
    if (0..n).all(|r| board.get(r, col) == Some(player)) {
        return true;
    }
    if row == col && (0..n).all(|i| board.get(i, i) == Some(player)) {
        return true;
    }
    if row + col == n - 1 && (0..n).all(|i| board.get(i, n - 1 - i) == Some(player)) {
        return true;
    }

    false
}

// ============================================================================
// TESTS
// ============================================================================
