//! Perspective-relative board state.
//!
//! `GameState` is the central model for the engine: the 120-cell mailbox
//! board plus the castling, en-passant, and king-passant state that travels
//! with it. It is a plain value; move application and rotation produce fresh
//! copies, so every recursive search branch owns its own state and nothing is
//! shared between siblings.

use crate::game_state::chess_rules::INITIAL_BOARD;
use crate::game_state::chess_types::{CastlingRights, Color, Square, EMPTY, OFFBOARD};
use crate::utils::fen::{generate_fen, load_fen};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Mailbox board, always oriented so the side to move plays "north" with
    /// uppercase pieces.
    pub board: [u8; 120],
    /// Side to move's castling rights.
    pub castling: CastlingRights,
    /// Opponent's castling rights, expressed in this perspective's geometry.
    pub opponent_castling: CastlingRights,
    /// Square a pawn may capture onto this ply, if the opponent just
    /// double-pushed past it.
    pub en_passant: Option<Square>,
    /// Rook arrival square of a castling move made last ply, used once to
    /// detect castling through or out of check, then cleared.
    pub king_passant: Option<Square>,
}

impl GameState {
    /// Standard starting position, white perspective.
    pub fn new_game() -> Self {
        GameState {
            board: INITIAL_BOARD,
            castling: CastlingRights::ALL,
            opponent_castling: CastlingRights::ALL,
            en_passant: None,
            king_passant: None,
        }
    }

    /// Board with no pieces; used as a construction base by the FEN parser.
    pub fn new_empty() -> Self {
        let mut board = [OFFBOARD; 120];
        for row in 2..10 {
            for col in 1..9 {
                board[row * 10 + col] = EMPTY;
            }
        }
        GameState {
            board,
            castling: CastlingRights::NONE,
            opponent_castling: CastlingRights::NONE,
            en_passant: None,
            king_passant: None,
        }
    }

    /// Parse a FEN string into a perspective-relative state plus the actual
    /// color of the side to move.
    pub fn from_fen(fen: &str) -> Result<(Self, Color), String> {
        load_fen(fen)
    }

    /// Serialize back to FEN given the actual color this perspective belongs
    /// to. Halfmove and fullmove counters are not tracked and emit as `0 1`.
    pub fn to_fen(&self, color: Color) -> String {
        generate_fen(self, color)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> u8 {
        self.board[square]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{A1, A8, H1, H8};

    #[test]
    fn new_game_matches_starting_layout() {
        let state = GameState::new_game();
        assert_eq!(state.piece_at(A1), b'R');
        assert_eq!(state.piece_at(H8), b'r');
        assert!(state.castling.a_side && state.castling.h_side);
        assert!(state.opponent_castling.a_side && state.opponent_castling.h_side);
        assert_eq!(state.en_passant, None);
        assert_eq!(state.king_passant, None);
    }

    #[test]
    fn new_empty_has_clear_playable_area_and_sentinel_border() {
        let state = GameState::new_empty();
        assert_eq!(state.piece_at(A8), EMPTY);
        assert_eq!(state.piece_at(H1), EMPTY);
        assert_eq!(state.piece_at(0), OFFBOARD);
        assert_eq!(state.piece_at(20), OFFBOARD);
        assert_eq!(state.piece_at(29), OFFBOARD);
        assert_eq!(state.piece_at(119), OFFBOARD);
    }
}
