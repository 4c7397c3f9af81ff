//! Iterative-deepening negamax search with quiescence and a shared
//! transposition table.
//!
//! The search is one synchronous call stack. Cancellation is cooperative:
//! every negamax and quiescence invocation polls the wall-clock deadline
//! before doing any work, and a timeout unwinds the whole stack without
//! producing or storing a result, leaving the move from the last completed
//! depth in force.

use std::time::{Duration, Instant};

use crate::game_state::chess_types::{Move, PieceKind};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::{is_in_check, legal_successor};
use crate::move_generation::move_apply::rotate;
use crate::move_generation::move_generator::generate_moves;
use crate::search::board_scoring::{
    game_phase, is_mate_score, piece_value, BoardScorer, CHECKMATE_LOWER, CHECKMATE_UPPER,
};
use crate::search::transposition_table::{TranspositionTable, TtEntry};
use crate::search::zobrist::position_key;

/// Best-case margin a capture gets in quiescence delta pruning.
const DELTA_PRUNING_MARGIN: i32 = 200;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub movetime: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: 4,
            movetime: None,
        }
    }
}

/// One completed deepening iteration, reported for observability.
#[derive(Debug, Clone, Copy)]
pub struct IterationInfo {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct SearchResult {
    /// Best move found, or `None` for a terminal position.
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub iterations: Vec<IterationInfo>,
}

/// Search a position under a depth ceiling and optional time budget.
pub fn search_position<S: BoardScorer>(
    state: &GameState,
    scorer: &S,
    config: &SearchConfig,
    tt: &mut TranspositionTable,
) -> SearchResult {
    let started = Instant::now();
    let deadline = config.movetime.map(|budget| started + budget);
    let mut result = SearchResult::default();

    for depth in 1..=config.max_depth {
        // The first iteration always runs to completion so that even a
        // hopeless budget still yields a legal move to fall back on.
        let iteration_deadline = if depth == 1 { None } else { deadline };
        let mut nodes = 0u64;

        let Some((score, best_move)) = negamax(
            state,
            depth,
            0,
            -CHECKMATE_UPPER,
            CHECKMATE_UPPER,
            iteration_deadline,
            &mut nodes,
            tt,
            scorer,
        ) else {
            // Timed out: discard the partial iteration and keep the move
            // from the last completed depth.
            break;
        };

        result.nodes += nodes;
        result.best_move = best_move;
        result.best_score = score;
        result.reached_depth = depth;
        result.iterations.push(IterationInfo {
            depth,
            score,
            nodes,
            elapsed_ms: started.elapsed().as_millis() as u64,
        });

        if best_move.is_none() {
            // Checkmate or stalemate on the board; deeper search cannot
            // change the verdict.
            break;
        }
    }

    result.elapsed_ms = started.elapsed().as_millis() as u64;
    result
}

#[inline]
fn out_of_time(deadline: Option<Instant>) -> bool {
    deadline.is_some_and(|limit| Instant::now() >= limit)
}

/// Fail-hard negamax. Returns `None` when the deadline expired, which
/// propagates through every open frame without storing anything.
#[allow(clippy::too_many_arguments)]
fn negamax<S: BoardScorer>(
    state: &GameState,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    deadline: Option<Instant>,
    nodes: &mut u64,
    tt: &mut TranspositionTable,
    scorer: &S,
) -> Option<(i32, Option<Move>)> {
    if out_of_time(deadline) {
        return None;
    }

    if depth == 0 {
        return quiescence(state, alpha, beta, deadline, nodes, scorer)
            .map(|score| (score, None));
    }

    *nodes += 1;

    let key = position_key(state);
    let remembered = tt.probe(key);
    if ply > 0 {
        // A stored result from an equal or deeper search settles this node.
        // Mate results are depth-independent and always trusted. The root is
        // exempt so each deepening iteration computes it fresh.
        if let Some(entry) = remembered {
            if entry.depth >= depth || is_mate_score(entry.score) {
                return Some((entry.score, entry.best_move));
            }
        }
    }

    let mut moves = generate_moves(state);
    moves.sort_unstable_by_key(|&mv| -scorer.score_move(state, mv));
    if let Some(best) = remembered.and_then(|entry| entry.best_move) {
        // The remembered best move goes first for maximum cutoffs.
        if let Some(index) = moves.iter().position(|&mv| mv == best) {
            moves[..=index].rotate_right(1);
        }
    }

    let mut best_score = -CHECKMATE_UPPER;
    let mut best_move: Option<Move> = None;

    for mv in moves {
        let Some(child) = legal_successor(state, mv) else {
            continue;
        };
        let (child_score, _) = negamax(
            &child,
            depth - 1,
            ply + 1,
            -beta,
            -alpha,
            deadline,
            nodes,
            tt,
            scorer,
        )?;
        let score = -child_score;

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if score > alpha {
            alpha = score;
        }
        if score >= beta {
            // Fail-hard cutoff: remaining siblings are not searched and the
            // truncated result is not stored.
            return Some((beta, best_move));
        }
    }

    if best_move.is_none() {
        // No legal move: mate if the rotated position attacks our king,
        // stalemate otherwise. Nearer mates score worse for the mated side.
        let score = if is_in_check(&rotate(state)) {
            -CHECKMATE_LOWER + i32::from(ply)
        } else {
            0
        };
        return Some((score, None));
    }

    tt.store(TtEntry {
        key,
        best_move,
        depth,
        score: best_score,
    });

    Some((alpha, best_move))
}

/// Capture-only extension search with delta pruning. Bounded by the shrinking
/// set of captures and the shared deadline rather than an explicit depth.
fn quiescence<S: BoardScorer>(
    state: &GameState,
    mut alpha: i32,
    beta: i32,
    deadline: Option<Instant>,
    nodes: &mut u64,
    scorer: &S,
) -> Option<i32> {
    if out_of_time(deadline) {
        return None;
    }

    *nodes += 1;

    let stand_pat = scorer.score(state);
    if stand_pat >= beta {
        return Some(beta);
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let phase = game_phase(state);
    let mut moves = generate_moves(state);
    moves.retain(|mv| mv.is_capture());
    moves.sort_unstable_by_key(|&mv| -scorer.score_move(state, mv));

    for mv in moves {
        // Delta pruning: skip captures that cannot raise alpha even if the
        // capture and promotion gains land in full.
        let mut best_case = mv
            .captured
            .map(|piece| piece_value(piece, phase))
            .unwrap_or(0);
        if let Some(promotion) = mv.promotion {
            best_case += piece_value(promotion, phase) - piece_value(PieceKind::Pawn, phase);
        }
        if stand_pat + best_case + DELTA_PRUNING_MARGIN <= alpha {
            continue;
        }

        let Some(child) = legal_successor(state, mv) else {
            continue;
        };
        let score = -quiescence(&child, -beta, -alpha, deadline, nodes, scorer)?;

        if score >= beta {
            return Some(beta);
        }
        if score > alpha {
            alpha = score;
        }
    }

    Some(alpha)
}
