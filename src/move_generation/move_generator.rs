//! Pseudo-legal move generation.
//!
//! Walks each piece's direction rays over the mailbox board, relying on the
//! sentinel border to terminate rays at the edge. Check safety is not
//! verified here; the legality filter runs after a move has been applied.

use crate::game_state::chess_rules::{
    offset, piece_directions, A1, A8, BOARD_SIZE, EAST, H1, H8, NORTH, WEST,
};
use crate::game_state::chess_types::{is_opponent_piece, is_own_piece, Move, PieceKind, EMPTY, OFFBOARD};
use crate::game_state::game_state::GameState;

const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generate all pseudo-legal moves for the side to move.
pub fn generate_moves(state: &GameState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    let double_push_rank = offset(A1, NORTH);

    for from in 0..BOARD_SIZE {
        let cell = state.board[from];
        if !is_own_piece(cell) {
            continue;
        }
        let Some(piece) = PieceKind::from_ascii(cell) else {
            continue;
        };

        for &direction in piece_directions(piece) {
            let mut to = offset(from, direction);
            loop {
                let target = state.board[to];
                if target == OFFBOARD || is_own_piece(target) {
                    break;
                }

                if piece == PieceKind::Pawn {
                    // Pawns cannot capture straight ahead.
                    if (direction == NORTH || direction == NORTH + NORTH) && target != EMPTY {
                        break;
                    }
                    // Double push only from the home rank over an empty square.
                    if direction == NORTH + NORTH
                        && (from < double_push_rank || state.board[offset(from, NORTH)] != EMPTY)
                    {
                        break;
                    }
                    // A diagonal step onto an empty square is only the
                    // en-passant capture; anything else is not a move.
                    let diagonal = direction == NORTH + WEST || direction == NORTH + EAST;
                    if diagonal && target == EMPTY && state.en_passant != Some(to) {
                        break;
                    }
                    let captured = if is_opponent_piece(target) {
                        PieceKind::from_ascii(target)
                    } else if diagonal {
                        Some(PieceKind::Pawn)
                    } else {
                        None
                    };
                    if (A8..=H8).contains(&to) {
                        for promotion in PROMOTION_PIECES {
                            moves.push(Move {
                                from,
                                to,
                                captured,
                                promotion: Some(promotion),
                            });
                        }
                        break;
                    }
                    moves.push(Move {
                        from,
                        to,
                        captured,
                        promotion: None,
                    });
                    break;
                }

                moves.push(Move {
                    from,
                    to,
                    // Uppercase targets broke the ray above, so any piece
                    // still present here belongs to the opponent.
                    captured: PieceKind::from_ascii(target),
                    promotion: None,
                });

                if matches!(piece, PieceKind::Knight | PieceKind::King) || is_opponent_piece(target)
                {
                    break;
                }

                // A home rook sliding along the back rank emits castling once
                // its ray reaches the square next to the king: the empty ray
                // proves the squares between are clear, and the rights flag
                // proves neither king nor rook has moved.
                if piece == PieceKind::Rook && from == A1 && state.castling.a_side {
                    let king_square = offset(to, EAST);
                    if state.board[king_square] == b'K' {
                        moves.push(Move::new(king_square, offset(to, WEST)));
                    }
                }
                if piece == PieceKind::Rook && from == H1 && state.castling.h_side {
                    let king_square = offset(to, WEST);
                    if state.board[king_square] == b'K' {
                        moves.push(Move::new(king_square, offset(to, EAST)));
                    }
                }

                to = offset(to, direction);
            }
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::Color;
    use crate::move_generation::move_apply::apply_move;

    #[test]
    fn starting_position_has_twenty_moves() {
        let state = GameState::new_game();
        let moves = generate_moves(&state);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn knight_in_corner_has_two_moves() {
        let (state, _) =
            GameState::from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").expect("FEN should parse");
        let knight_moves: Vec<_> = generate_moves(&state)
            .into_iter()
            .filter(|m| state.piece_at(m.from) == b'N')
            .collect();
        assert_eq!(knight_moves.len(), 2);
    }

    #[test]
    fn pawn_cannot_push_onto_occupied_square() {
        let (state, _) =
            GameState::from_fen("4k3/8/8/8/4p3/4P3/8/4K3 w - - 0 1").expect("FEN should parse");
        let pawn_moves: Vec<_> = generate_moves(&state)
            .into_iter()
            .filter(|m| state.piece_at(m.from) == b'P')
            .collect();
        assert!(pawn_moves.is_empty());
    }

    #[test]
    fn double_push_requires_home_rank_and_clear_path() {
        let (state, _) =
            GameState::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let pawn_moves: Vec<_> = generate_moves(&state)
            .into_iter()
            .filter(|m| state.piece_at(m.from) == b'P')
            .collect();
        assert!(pawn_moves.is_empty(), "blocked pawn may not jump the knight");
    }

    #[test]
    fn promotion_emits_four_moves() {
        let (state, _) =
            GameState::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let promotions: Vec<_> = generate_moves(&state)
            .into_iter()
            .filter(|m| m.promotion.is_some())
            .collect();
        assert_eq!(promotions.len(), 4);
        let kinds: Vec<_> = promotions.iter().filter_map(|m| m.promotion).collect();
        assert!(kinds.contains(&PieceKind::Queen));
        assert!(kinds.contains(&PieceKind::Knight));
    }

    #[test]
    fn en_passant_capture_is_generated_and_removes_the_pawn() {
        // Black just played d7d5 past the white pawn on e5.
        let (state, color) =
            GameState::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3")
                .expect("FEN should parse");
        assert_eq!(color, Color::Light);

        let ep_square = state.en_passant.expect("en-passant target should be set");
        let ep_move = generate_moves(&state)
            .into_iter()
            .find(|m| m.to == ep_square && state.piece_at(m.from) == b'P')
            .expect("en-passant capture should be generated");
        assert_eq!(ep_move.captured, Some(PieceKind::Pawn));

        let next = apply_move(&state, ep_move);
        // The captured pawn disappears from the square behind the
        // destination, not from the destination itself.
        use crate::game_state::chess_rules::{offset, SOUTH};
        assert_eq!(next.piece_at(offset(ep_square, SOUTH)), EMPTY);
        assert_eq!(next.piece_at(ep_square), b'P');
    }

    #[test]
    fn castling_requires_clear_path_and_rights() {
        let (state, _) =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let castles: Vec<_> = generate_moves(&state)
            .into_iter()
            .filter(|m| state.piece_at(m.from) == b'K' && m.from.abs_diff(m.to) == 2)
            .collect();
        assert_eq!(castles.len(), 2);

        let (no_rights, _) =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        let castles: Vec<_> = generate_moves(&no_rights)
            .into_iter()
            .filter(|m| no_rights.piece_at(m.from) == b'K' && m.from.abs_diff(m.to) == 2)
            .collect();
        assert!(castles.is_empty());

        let (blocked, _) =
            GameState::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").expect("FEN should parse");
        let castles: Vec<_> = generate_moves(&blocked)
            .into_iter()
            .filter(|m| blocked.piece_at(m.from) == b'K' && m.from.abs_diff(m.to) == 2)
            .collect();
        assert_eq!(castles.len(), 1, "only the kingside path is clear");
    }
}
