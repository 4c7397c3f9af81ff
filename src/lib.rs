//! Crate root module declarations for the Mailbox Chess engine.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, UCI protocol handling, and utility helpers) so binaries,
//! tests, and external tooling can import stable module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod move_apply;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod transposition_table;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_iterative;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod uci {
    pub mod uci_top;
}

pub mod utils {
    pub mod coordinates;
    pub mod fen;
    pub mod render_board;
}
