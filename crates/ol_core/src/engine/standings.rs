//! Season-long point standings.
//!
//! Folds any number of settled events into one table. Events contribute
//! whatever the points allocator stored on their rows; nothing is rescaled
//! here, so a re-settled event just needs re-aggregation.

use fxhash::FxHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{PlayerId, PlayerResult};

/// One line of the season table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    /// Competition ranking: tied totals share a rank, the next rank skips.
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub events_played: u32,
    pub total_points: f64,
}

#[derive(Debug, Clone, Default)]
struct Tally {
    name: String,
    events_played: u32,
    total_points: f64,
}

/// Aggregate settled events into season standings, best total first.
/// Display ties break by name, then id, purely for stable output.
pub fn season_standings<E>(events: &[E]) -> Vec<StandingRow>
where
    E: AsRef<[PlayerResult]> + Sync,
{
    let totals: FxHashMap<PlayerId, Tally> = events
        .par_iter()
        .map(|event| {
            let mut per_event: FxHashMap<PlayerId, Tally> = FxHashMap::default();
            for row in event.as_ref() {
                let tally = per_event.entry(row.player_id).or_default();
                tally.name = row.name.clone();
                tally.events_played += 1;
                tally.total_points += row.total_points;
            }
            per_event
        })
        .reduce(FxHashMap::default, |mut acc, per_event| {
            for (id, tally) in per_event {
                let merged = acc.entry(id).or_default();
                if merged.name.is_empty() {
                    merged.name = tally.name;
                }
                merged.events_played += tally.events_played;
                merged.total_points += tally.total_points;
            }
            acc
        });

    let mut rows: Vec<StandingRow> = totals
        .into_iter()
        .map(|(player_id, tally)| StandingRow {
            rank: 0,
            player_id,
            name: tally.name,
            events_played: tally.events_played,
            total_points: tally.total_points,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_points
            .total_cmp(&a.total_points)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    let mut prev_points: Option<f64> = None;
    let mut rank = 0u32;
    for (pos, row) in rows.iter_mut().enumerate() {
        if prev_points != Some(row.total_points) {
            rank = pos as u32 + 1;
            prev_points = Some(row.total_points);
        }
        row.rank = rank;
    }
    rows
}
