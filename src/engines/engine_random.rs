//! Difficulty-1 random-move engine.
//!
//! Selects uniformly from legal moves and is primarily used for diagnostics,
//! integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::generate_legal_moves;

#[derive(Debug, Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        RandomEngine
    }
}

impl Engine for RandomEngine {
    fn choose_move(
        &mut self,
        game_state: &GameState,
        _color: Color,
        _params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let legal_moves = generate_legal_moves(game_state);

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        if legal_moves.is_empty() {
            return Ok(out);
        }

        let mut rng = rand::rng();
        out.best_move = legal_moves.as_slice().choose(&mut rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_a_legal_move_from_the_starting_position() {
        let state = GameState::new_game();
        let mut engine = RandomEngine::new();
        let out = engine
            .choose_move(&state, Color::Light, &GoParams::default())
            .expect("engine should choose a move");
        let best = out.best_move.expect("a best move should exist");
        assert!(generate_legal_moves(&state).contains(&best));
    }

    #[test]
    fn reports_no_move_in_a_terminal_position() {
        let (stalemate, color) =
            GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let mut engine = RandomEngine::new();
        let out = engine
            .choose_move(&stalemate, color, &GoParams::default())
            .expect("engine should handle terminal positions");
        assert_eq!(out.best_move, None);
    }
}
