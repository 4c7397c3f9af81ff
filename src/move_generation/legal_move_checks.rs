//! Post-application legality filtering.
//!
//! A pseudo-legal move is legal when, after applying it and rotating into the
//! opponent's perspective, the mover's king (now the lowercase "opponent"
//! king) cannot be captured. Castling legality additionally covers the
//! square the king passed through and the square it came from, via the
//! king-passant marker recorded by the applier.

use crate::game_state::chess_types::{Move, Square};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_apply::{apply_move, rotate};
use crate::move_generation::move_generator::generate_moves;

// After rotation a completed castling move leaves its transit marker on the
// back rank seen by the new side to move. The king's origin differs by one
// file between the two relative frames (e1 in one, d1 in the mirrored one),
// so each transit square pins down where the king must have stood.
#[inline]
fn castling_origin(king_passant: Square) -> Option<Square> {
    match king_passant {
        23 | 25 => Some(24),
        24 | 26 => Some(25),
        _ => None,
    }
}

/// Test whether the side to move can capture the opponent king, or could
/// have captured it while it castled last ply. Called on the state produced
/// by `apply_move` + `rotate`, where the mover's king appears lowercase.
pub fn is_in_check(state: &GameState) -> bool {
    let Some(king_square) = state.board.iter().position(|&cell| cell == b'k') else {
        // No opponent king on the board never occurs in reachable positions;
        // fail safe rather than search on.
        return true;
    };

    let origin = state.king_passant.and_then(castling_origin);

    let mut probe = state.clone();
    probe.en_passant = None;
    for mv in generate_moves(&probe) {
        if mv.to == king_square {
            return true;
        }
        if state.king_passant == Some(mv.to) {
            return true;
        }
        if origin == Some(mv.to) {
            return true;
        }
    }

    false
}

/// Apply a pseudo-legal move and return the rotated successor state if the
/// move is legal, with the one-ply king-passant marker consumed.
pub fn legal_successor(state: &GameState, mv: Move) -> Option<GameState> {
    let mut next = rotate(&apply_move(state, mv));
    if is_in_check(&next) {
        return None;
    }
    next.king_passant = None;
    Some(next)
}

/// Legal moves for the side to move, in generation order.
pub fn generate_legal_moves(state: &GameState) -> Vec<Move> {
    generate_moves(state)
        .into_iter()
        .filter(|&mv| legal_successor(state, mv).is_some())
        .collect()
}
