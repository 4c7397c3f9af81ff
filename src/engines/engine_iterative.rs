//! Iterative-deepening engine wrapper.
//!
//! Owns the process-wide transposition table, resolves the time budget from
//! the UCI clock fields, runs the search, and reports per-iteration info
//! lines for the protocol layer to emit.

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::{resolve_movetime, TimeManagementStrategy};
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{is_mate_score, TaperedScorer};
use crate::search::iterative_deepening::{search_position, SearchConfig};
use crate::search::transposition_table::{TranspositionTable, DEFAULT_TABLE_MB};
use std::time::Duration;

pub struct IterativeEngine {
    tt: TranspositionTable,
    scorer: TaperedScorer,
    default_depth: u8,
    strategy: TimeManagementStrategy,
}

impl IterativeEngine {
    pub fn new(default_depth: u8) -> Self {
        IterativeEngine {
            tt: TranspositionTable::new_with_mb(DEFAULT_TABLE_MB),
            scorer: TaperedScorer,
            default_depth: default_depth.max(1),
            strategy: TimeManagementStrategy::Adaptive,
        }
    }

    pub fn with_strategy(default_depth: u8, strategy: TimeManagementStrategy) -> Self {
        IterativeEngine {
            strategy,
            ..Self::new(default_depth)
        }
    }
}

impl Engine for IterativeEngine {
    fn new_game(&mut self) {
        self.tt.clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Hash") {
            let size_mb = value
                .parse::<usize>()
                .map_err(|_| format!("invalid Hash value '{value}'"))?;
            self.tt = TranspositionTable::new_with_mb(size_mb.max(1));
        } else if name.eq_ignore_ascii_case("TimeStrategy") {
            self.strategy = match value.to_ascii_lowercase().as_str() {
                "adaptive" => TimeManagementStrategy::Adaptive,
                "fraction20" => TimeManagementStrategy::Fraction20,
                other => return Err(format!("unknown TimeStrategy '{other}'")),
            };
        }
        Ok(())
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        color: Color,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let config = SearchConfig {
            max_depth: params.depth.unwrap_or(self.default_depth).max(1),
            movetime: resolve_movetime(color, params, self.strategy).map(Duration::from_millis),
        };

        let result = search_position(game_state, &self.scorer, &config, &mut self.tt);

        let mut out = EngineOutput::default();
        if params.infinite {
            out.info_lines.push(
                "info string infinite parsed; bounded iterative search is used in synchronous mode"
                    .to_owned(),
            );
        }
        for iteration in &result.iterations {
            let nps = if iteration.elapsed_ms == 0 {
                0
            } else {
                iteration.nodes.saturating_mul(1000) / iteration.elapsed_ms
            };
            out.info_lines.push(format!(
                "info depth {} score {} nodes {} nps {} time {}",
                iteration.depth,
                format_score(iteration.score),
                iteration.nodes,
                nps,
                iteration.elapsed_ms,
            ));
        }

        out.best_move = result.best_move;
        Ok(out)
    }
}

fn format_score(score: i32) -> String {
    if is_mate_score(score) {
        // Mate scores are depth-biased around the mate bound; recover the
        // distance in plies and report it in moves, signed for the loser.
        let plies = crate::search::board_scoring::CHECKMATE_LOWER - score.abs();
        let moves = (plies + 1) / 2;
        if score > 0 {
            format!("mate {}", moves.max(1))
        } else {
            format!("mate -{}", moves.max(1))
        }
    } else {
        format!("cp {score}")
    }
}
