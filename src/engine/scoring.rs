//! Fixture scores derived from the final rank.

use crate::domain::PyramidType;

/// Score of the player finishing at `rank` (1-based) among `total_players`.
///
/// Scores step down by one per rank around the quality average; the
/// fixture winner gets one extra point.
pub fn score_for_rank(rank: u32, quality_average: f64, total_players: u32) -> f64 {
    let n = i64::from(total_players.max(1));
    let rank = i64::from(rank);
    let below_average = (n - 1) / 2;
    let bonus = if rank == 1 { 1 } else { 0 };

    quality_average + (n - rank - below_average + bonus) as f64
}

/// Scores for the winner and loser of the root match of a pyramid.
pub fn decider_scores(pyramid_type: PyramidType, quality_average: f64, total_players: u32) -> (f64, f64) {
    let best = pyramid_type.best_rank();
    (
        score_for_rank(best, quality_average, total_players),
        score_for_rank(best + 1, quality_average, total_players),
    )
}
