//! Move application and perspective rotation.
//!
//! Applying a move never mutates the source state: each call builds the
//! successor value, and the follow-up rotation flips the board into the next
//! player's perspective. There is no unmake; every search branch simply owns
//! its own copy of the state.

use crate::game_state::chess_rules::{offset, A1, A8, BOARD_SIZE, H1, H8, SOUTH};
use crate::game_state::chess_types::{CastlingRights, Move, Square, EMPTY};
use crate::game_state::game_state::GameState;

/// Apply one pseudo-legal move, producing the successor state still seen from
/// the mover's perspective. Feeding a move that could not have come from the
/// generator is a caller contract violation with undefined results.
pub fn apply_move(state: &GameState, mv: Move) -> GameState {
    let mut next = state.clone();
    let piece = state.board[mv.from];

    // Both transient targets live for exactly one ply.
    next.en_passant = None;
    next.king_passant = None;

    // Vacating a rook home square, or capturing on the opponent's, retires
    // the matching castling right for good.
    if mv.from == A1 {
        next.castling.a_side = false;
    }
    if mv.from == H1 {
        next.castling.h_side = false;
    }
    if mv.to == A8 {
        next.opponent_castling.a_side = false;
    }
    if mv.to == H8 {
        next.opponent_castling.h_side = false;
    }

    next.board[mv.from] = EMPTY;
    next.board[mv.to] = piece;

    if piece == b'K' {
        next.castling = CastlingRights::NONE;
        if mv.from.abs_diff(mv.to) == 2 {
            // Castling: the rook jumps to the square the king passed over,
            // which is remembered one ply for the legality filter.
            let transit = (mv.from + mv.to) / 2;
            let rook_home = if mv.to < mv.from { A1 } else { H1 };
            next.board[transit] = next.board[rook_home];
            next.board[rook_home] = EMPTY;
            next.king_passant = Some(transit);
        }
    } else if piece == b'P' {
        if state.en_passant == Some(mv.to) {
            // The captured pawn sits behind the destination square.
            next.board[offset(mv.to, SOUTH)] = EMPTY;
        }
        if let Some(promotion) = mv.promotion {
            next.board[mv.to] = promotion.to_ascii();
        }
        if mv.from == offset(mv.to, SOUTH + SOUTH) {
            next.en_passant = Some(offset(mv.to, SOUTH));
        }
    }

    next
}

/// Rotate the state 180 degrees into the opponent's perspective: board order
/// reverses, piece case swaps, the two castling-rights sets trade places, and
/// square markers map through `s -> 119 - s`. Because the rotation mirrors
/// files as well as ranks, each rights pair also swaps wings so every flag
/// stays attached to the rook it licenses.
pub fn rotate(state: &GameState) -> GameState {
    let mut board = [0u8; BOARD_SIZE];
    for (square, cell) in board.iter_mut().enumerate() {
        *cell = swap_case(state.board[BOARD_SIZE - 1 - square]);
    }
    GameState {
        board,
        castling: state.opponent_castling.mirrored(),
        opponent_castling: state.castling.mirrored(),
        en_passant: state.en_passant.map(mirror_square),
        king_passant: state.king_passant.map(mirror_square),
    }
}

/// The 180-degree image of a square in the mailbox layout.
#[inline]
pub const fn mirror_square(square: Square) -> Square {
    BOARD_SIZE - 1 - square
}

#[inline]
fn swap_case(cell: u8) -> u8 {
    if cell.is_ascii_uppercase() {
        cell.to_ascii_lowercase()
    } else if cell.is_ascii_lowercase() {
        cell.to_ascii_uppercase()
    } else {
        cell
    }
}
