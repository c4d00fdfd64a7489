//! Shared-rank partitioning.
//!
//! Points and money both split across tied finishers, and both must agree
//! on who is tied with whom. The partition is built once per result set and
//! handed to the allocators, never recomputed per player.

use fxhash::FxHashMap;

use crate::models::rules::PointsConfig;
use crate::models::PlayerResult;

/// How many players share each finishing rank in one result set.
#[derive(Debug, Clone, Default)]
pub struct RankTable {
    counts: FxHashMap<u32, usize>,
}

impl RankTable {
    /// One grouping pass over the full result set. Unranked rows are
    /// outside every group.
    pub fn build(players: &[PlayerResult]) -> Self {
        let mut counts = FxHashMap::default();
        for p in players {
            if let Some(rank) = p.rank {
                *counts.entry(rank).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Number of players tied at `rank` (0 when the rank is unoccupied).
    pub fn tied_at(&self, rank: u32) -> usize {
        self.counts.get(&rank).copied().unwrap_or(0)
    }

    /// Rank points for one occupant of `rank`: the average of the N
    /// consecutive place values the tie occupies. A lone occupant just
    /// reads the table.
    pub fn point_share(&self, points: &PointsConfig, rank: u32) -> f64 {
        let n = self.tied_at(rank);
        if n == 0 {
            return 0.0;
        }
        let sum: f64 = (0..n as u32).map(|i| points.place_value(rank + i)).sum();
        sum / n as f64
    }

    /// Rank money for one occupant of `rank`: the N consecutive payout
    /// entries the tie occupies, summed and evenly split, floored.
    pub fn money_share(&self, payouts: &[i64], rank: u32) -> i64 {
        let n = self.tied_at(rank);
        if n == 0 || rank == 0 {
            return 0;
        }
        let start = rank as usize - 1;
        let sum: i64 = (start..start + n)
            .map(|i| payouts.get(i).copied().unwrap_or(0))
            .sum();
        sum / n as i64
    }
}

/// Assign finish ranks from net performance (score minus quota),
/// descending. Tied nets share a rank and the next rank skips; rows
/// without a posted score are left unranked.
pub fn rank_by_net(players: &mut [PlayerResult]) {
    let mut order: Vec<usize> = (0..players.len())
        .filter(|&i| players[i].score.is_some())
        .collect();
    order.sort_by_key(|&i| std::cmp::Reverse(players[i].net_performance()));

    let mut prev_net: Option<i32> = None;
    let mut rank = 0u32;
    for (pos, &i) in order.iter().enumerate() {
        let Some(net) = players[i].net_performance() else { continue };
        if prev_net != Some(net) {
            rank = pos as u32 + 1;
            prev_net = Some(net);
        }
        players[i].rank = Some(rank);
    }
}
