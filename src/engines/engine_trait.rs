//! Engine abstraction layer used by the UCI subsystem.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::game_state::chess_types::{Color, Move};
use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    pub wtime_ms: Option<u64>,
    pub btime_ms: Option<u64>,
    pub winc_ms: Option<u64>,
    pub binc_ms: Option<u64>,
    pub movestogo: Option<u16>,
    pub infinite: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// Chosen move in the perspective-relative frame, or `None` when the
    /// position is terminal.
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    /// Choose a move for the side to move. `color` is the actual color the
    /// current perspective belongs to, used for clock selection.
    fn choose_move(
        &mut self,
        game_state: &GameState,
        color: Color,
        params: &GoParams,
    ) -> Result<EngineOutput, String>;
}
