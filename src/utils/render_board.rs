//! Terminal-oriented ASCII board renderer.
//!
//! Produces a human-readable 8x8 view in absolute orientation (white at the
//! bottom) from the perspective-relative state, for the `d` diagnostic
//! command and for debugging in tests.

use crate::game_state::chess_rules::{A8, SOUTH};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::move_apply::rotate;

pub fn render_board(state: &GameState, color: Color) -> String {
    let absolute = if color == Color::Dark {
        rotate(state)
    } else {
        state.clone()
    };

    let mut out = String::new();
    out.push_str("  a b c d e f g h\n");

    for rank in 0..8 {
        let rank_char = char::from(b'8' - rank as u8);
        out.push(rank_char);
        out.push(' ');

        for file in 0..8 {
            let cell = absolute.board[A8 + rank * SOUTH as usize + file];
            out.push(cell as char);
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_renders_white_at_the_bottom() {
        let state = GameState::new_game();
        let rendered = render_board(&state, Color::Light);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 r n b q k b n r 8");
        assert_eq!(lines[8], "1 R N B Q K B N R 1");
    }

    #[test]
    fn black_perspective_renders_the_same_absolute_board() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let (state, color) = GameState::from_fen(fen).expect("FEN should parse");
        let rendered = render_board(&state, color);
        assert!(rendered.contains("4 . . . . P . . . 4"));
    }
}
