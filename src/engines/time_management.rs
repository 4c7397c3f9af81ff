//! Time-management strategies for per-move budgeting.
//!
//! UCI passes raw clock data (`wtime/btime/winc/binc/movetime`) through and
//! the engine decides the final per-move allocation based on strategy.

use crate::engines::engine_trait::GoParams;
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeManagementStrategy {
    /// Fixed rule: spend 1/20th of the remaining clock.
    Fraction20,
    /// Adaptive rule using the clock, increment, and moves-to-go horizon.
    Adaptive,
}

/// Resolve the UCI clock fields into a per-move budget in milliseconds.
/// Returns `None` when no time control applies (depth-limited or infinite).
pub fn resolve_movetime(
    color: Color,
    params: &GoParams,
    strategy: TimeManagementStrategy,
) -> Option<u64> {
    if params.infinite {
        return None;
    }
    if let Some(movetime) = params.movetime_ms {
        return Some(movetime.max(1));
    }

    let (remaining, increment) = match color {
        Color::Light => (params.wtime_ms?, params.winc_ms),
        Color::Dark => (params.btime_ms?, params.binc_ms),
    };

    Some(match strategy {
        TimeManagementStrategy::Fraction20 => (remaining / 20).max(1),
        TimeManagementStrategy::Adaptive => {
            adaptive_budget_ms(remaining, increment, params.movestogo)
        }
    })
}

fn adaptive_budget_ms(remaining_ms: u64, inc_ms: Option<u64>, movestogo: Option<u16>) -> u64 {
    let expected_moves_left = movestogo.map(|mtg| u64::from(mtg.max(1))).unwrap_or(30);

    // Keep a reserve so latency jitter can never flag us.
    let reserve = (remaining_ms / 25)
        .max(100)
        .min(remaining_ms.saturating_sub(1));
    let usable = remaining_ms.saturating_sub(reserve);
    let base = usable / expected_moves_left.max(1);
    let inc_bonus = inc_ms.unwrap_or(0).saturating_mul(3) / 4;
    let target = base.saturating_add(inc_bonus);

    let min_budget = if remaining_ms < 1_000 { 5 } else { 15 };
    let max_budget = (remaining_ms / 4).max(1);
    target.max(min_budget).min(max_budget).max(1)
}
