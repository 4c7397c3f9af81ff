//! FEN parsing and generation.
//!
//! FEN describes the absolute board with white at the bottom, while the
//! engine keeps every position relative to the side to move. Loading a
//! position with black to move therefore ends with one rotation, and
//! serializing rotates back first. Halfmove and fullmove counters are
//! accepted on input but not tracked; output always emits `0 1`.

use crate::game_state::chess_rules::{A8, SOUTH};
use crate::game_state::chess_types::{CastlingRights, Color, PieceKind, EMPTY};
use crate::game_state::game_state::GameState;
use crate::move_generation::move_apply::rotate;
use crate::utils::coordinates::{parse_coordinates, render_coordinates};

/// Parse a six-field FEN string into a perspective-relative state and the
/// actual color of the side to move.
pub fn load_fen(fen: &str) -> Result<(GameState, Color), String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("missing board layout in FEN")?;
    let side_part = parts.next().ok_or("missing side-to-move in FEN")?;
    let castling_part = parts.next().ok_or("missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("missing en-passant square in FEN")?;
    let halfmove_part = parts.next().ok_or("missing halfmove clock in FEN")?;
    let fullmove_part = parts.next().ok_or("missing fullmove number in FEN")?;

    if parts.next().is_some() {
        return Err("FEN has extra trailing fields".to_owned());
    }

    // Validated for well-formedness, then discarded: the engine does not
    // track move clocks.
    halfmove_part
        .parse::<u32>()
        .map_err(|_| format!("invalid halfmove clock: {halfmove_part}"))?;
    fullmove_part
        .parse::<u32>()
        .map_err(|_| format!("invalid fullmove number: {fullmove_part}"))?;

    let mut state = GameState::new_empty();
    parse_board(board_part, &mut state)?;

    let color = match side_part {
        "w" => Color::Light,
        "b" => Color::Dark,
        _ => return Err(format!("invalid side-to-move field: {side_part}")),
    };

    let (castling, opponent_castling) = parse_castling_rights(castling_part)?;
    state.castling = castling;
    state.opponent_castling = opponent_castling;

    state.en_passant = match en_passant_part {
        "-" => None,
        square => Some(parse_coordinates(square)?),
    };

    if color == Color::Dark {
        state = rotate(&state);
    }

    Ok((state, color))
}

fn parse_board(board_part: &str, state: &mut GameState) -> Result<(), String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("board layout must contain 8 ranks".to_owned());
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let mut index = A8 + fen_rank_idx * SOUTH as usize;
        let rank_end = index + 8;

        for ch in rank_str.chars() {
            if let Some(step) = ch.to_digit(10) {
                if !(1..=8).contains(&step) {
                    return Err(format!("invalid empty-square count '{ch}'"));
                }
                for _ in 0..step {
                    if index >= rank_end {
                        return Err("board rank has too many files".to_owned());
                    }
                    state.board[index] = EMPTY;
                    index += 1;
                }
                continue;
            }

            if !ch.is_ascii() || PieceKind::from_ascii(ch as u8).is_none() {
                return Err(format!("invalid piece character '{ch}' in board layout"));
            }
            if index >= rank_end {
                return Err("board rank has too many files".to_owned());
            }
            state.board[index] = ch as u8;
            index += 1;
        }

        if index != rank_end {
            return Err("board rank does not sum to 8 files".to_owned());
        }
    }

    Ok(())
}

fn parse_castling_rights(
    castling_part: &str,
) -> Result<(CastlingRights, CastlingRights), String> {
    let mut white = CastlingRights::NONE;
    let mut black = CastlingRights::NONE;

    if castling_part != "-" {
        for ch in castling_part.chars() {
            match ch {
                'K' => white.h_side = true,
                'Q' => white.a_side = true,
                'k' => black.h_side = true,
                'q' => black.a_side = true,
                _ => return Err(format!("invalid castling rights character: {ch}")),
            }
        }
    }

    Ok((white, black))
}

/// Serialize a perspective-relative state back to FEN, given the actual
/// color of the side to move.
pub fn generate_fen(state: &GameState, color: Color) -> String {
    // Rotate back to the absolute white-bottom orientation first.
    let absolute = if color == Color::Dark {
        rotate(state)
    } else {
        state.clone()
    };
    // In the absolute frame the uppercase side is white, so the rights sets
    // are already in FEN order.
    let (white, black) = (absolute.castling, absolute.opponent_castling);

    let mut fen = String::new();
    for rank in 0..8 {
        if rank > 0 {
            fen.push('/');
        }
        let mut empty_run = 0u32;
        for file in 0..8 {
            let cell = absolute.board[A8 + rank * SOUTH as usize + file];
            if cell == EMPTY {
                empty_run += 1;
                continue;
            }
            if empty_run > 0 {
                fen.push_str(&empty_run.to_string());
                empty_run = 0;
            }
            fen.push(cell as char);
        }
        if empty_run > 0 {
            fen.push_str(&empty_run.to_string());
        }
    }

    fen.push(' ');
    fen.push(color.fen_char());
    fen.push(' ');

    let mut rights = String::new();
    if white.h_side {
        rights.push('K');
    }
    if white.a_side {
        rights.push('Q');
    }
    if black.h_side {
        rights.push('k');
    }
    if black.a_side {
        rights.push('q');
    }
    fen.push_str(if rights.is_empty() { "-" } else { &rights });

    fen.push(' ');
    match absolute.en_passant.and_then(|sq| render_coordinates(sq).ok()) {
        Some(square) => fen.push_str(&square),
        None => fen.push('-'),
    }

    fen.push_str(" 0 1");
    fen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn starting_fen_round_trips() {
        let (state, color) = load_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(color, Color::Light);
        assert_eq!(state, GameState::new_game());
        assert_eq!(generate_fen(&state, color), STARTING_POSITION_FEN);
    }

    #[test]
    fn black_to_move_is_loaded_rotated_and_restores_on_output() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let (state, color) = load_fen(fen).expect("FEN should parse");
        assert_eq!(color, Color::Dark);
        // In black's perspective the white pawn on e4 appears lowercase.
        let relative_square = 119 - parse_coordinates("e4").expect("square should parse");
        assert_eq!(state.piece_at(relative_square), b'p');
        assert_eq!(generate_fen(&state, color), fen);
    }

    #[test]
    fn partial_castling_rights_round_trip() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1";
        let (state, color) = load_fen(fen).expect("FEN should parse");
        assert!(state.castling.h_side);
        assert!(!state.castling.a_side);
        assert!(state.opponent_castling.a_side);
        assert!(!state.opponent_castling.h_side);
        assert_eq!(generate_fen(&state, color), fen);
    }

    #[test]
    fn black_castling_rights_map_to_the_mirrored_wings() {
        // Black to move with only the kingside right: after rotation the h8
        // rook sits on the frame's a-file corner, so the right must follow it.
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R b k - 0 1";
        let (state, color) = load_fen(fen).expect("FEN should parse");
        assert!(state.castling.a_side);
        assert!(!state.castling.h_side);
        assert_eq!(generate_fen(&state, color), fen);
    }

    #[test]
    fn malformed_fens_are_rejected() {
        assert!(load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").is_err());
        assert!(load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
        assert!(load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1").is_err());
        assert!(load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
        assert!(load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KXkq - 0 1").is_err());
        assert!(load_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(load_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1").is_err());
    }
}
