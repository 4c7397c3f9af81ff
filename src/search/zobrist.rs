//! Structural position hashing for the transposition table.
//!
//! Keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging. The key covers the
//! side-relative board, both castling-rights sets, and the en-passant
//! target: two states with the same pieces but different rights or
//! en-passant possibilities must never share a key, because their legal
//! continuations differ. The board is already perspective-relative, so no
//! separate side-to-move term is needed. The king-passant marker is consumed
//! by the legality filter before a state is searched and stays out of the
//! key.

use std::sync::OnceLock;

use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::game_state::GameState;

#[derive(Debug)]
struct ZobristTables {
    // [piece][square]: uppercase P..K then lowercase p..k.
    piece_square: [[u64; BOARD_SIZE]; 12],
    castling: [u64; 16],
    en_passant: [u64; BOARD_SIZE],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[0u64; BOARD_SIZE]; 12];
    for piece in &mut piece_square {
        for square in piece.iter_mut() {
            *square = next_random_u64(&mut seed);
        }
    }

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant = [0u64; BOARD_SIZE];
    for key in &mut en_passant {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        castling,
        en_passant,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn piece_table_index(cell: u8) -> Option<usize> {
    match cell {
        b'P' => Some(0),
        b'N' => Some(1),
        b'B' => Some(2),
        b'R' => Some(3),
        b'Q' => Some(4),
        b'K' => Some(5),
        b'p' => Some(6),
        b'n' => Some(7),
        b'b' => Some(8),
        b'r' => Some(9),
        b'q' => Some(10),
        b'k' => Some(11),
        _ => None,
    }
}

#[inline]
fn rights_mask(state: &GameState) -> usize {
    usize::from(state.castling.a_side)
        | usize::from(state.castling.h_side) << 1
        | usize::from(state.opponent_castling.a_side) << 2
        | usize::from(state.opponent_castling.h_side) << 3
}

/// Compute the full structural key for a perspective-relative state.
pub fn position_key(state: &GameState) -> u64 {
    let t = tables();
    let mut key = 0u64;

    for (square, &cell) in state.board.iter().enumerate() {
        if let Some(piece) = piece_table_index(cell) {
            key ^= t.piece_square[piece][square];
        }
    }

    key ^= t.castling[rights_mask(state)];

    if let Some(ep_square) = state.en_passant {
        key ^= t.en_passant[ep_square];
    }

    key
}
