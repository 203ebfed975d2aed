//! Noise-tolerant fitness ranking via repeated competition.
//!
//! A single competition outcome is a poor fitness estimate for a
//! stochastic task, so every generation plays `ranking_iterations`
//! rounds. Each round shuffles the pool and partitions it into
//! groups of `match_size`; every player competes exactly once per
//! round, except that a trailing singleton sits the round out with
//! a neutral score (a bye). The bye rotates through the pool so
//! per-player competition counts never spread by more than one
//! across the whole pass. Scores accumulate over all rounds.

use super::config::PoolConfig;
use crate::Player;

use rand::seq::SliceRandom;
use rand::Rng;

/// Aggregate competition scores for one generation.
pub(super) struct RankingResult {
    /// (population index, aggregate score), highest score first.
    /// A permutation of the input population: ties are broken by
    /// original population order so a fixed seed reproduces the
    /// exact same ranking.
    pub(super) standings: Vec<(usize, f64)>,
}

/// Ranks the given players by accumulated competition score.
///
/// Holds no state across calls; the only side effect is invoking
/// each player's competition capability.
pub(super) fn rank<P: Player, R: Rng>(
    players: &[P],
    config: &PoolConfig,
    rng: &mut R,
) -> RankingResult {
    let mut scores = vec![0.0f64; players.len()];
    let mut order: Vec<usize> = (0..players.len()).collect();
    let mut bye_cursor = 0;

    for _ in 0..config.ranking_iterations {
        order.shuffle(rng);
        if players.len() % config.match_size == 1 {
            // This round has a trailing singleton. Rotating the bye
            // through the pool instead of leaving it to the shuffle
            // keeps competition counts within one of each other.
            if let Some(pos) = order.iter().position(|&i| i == bye_cursor) {
                let last = order.len() - 1;
                order.swap(pos, last);
            }
            bye_cursor = (bye_cursor + 1) % players.len();
        }
        for group in order.chunks(config.match_size) {
            if group.len() < 2 {
                // Bye: neutral contribution.
                continue;
            }
            for &i in group {
                let opponents: Vec<&P> = group
                    .iter()
                    .filter(|&&j| j != i)
                    .map(|&j| &players[j])
                    .collect();
                scores[i] += players[i].compete(&opponents, rng);
            }
        }
    }

    let mut standings: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
    standings.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    RankingResult { standings }
}
