//! Season point allocation for one event.

use crate::engine::ties::RankTable;
use crate::models::rules::PointsConfig;
use crate::models::PlayerResult;

/// Season points for one row of an event.
///
/// The skin/ctp sum is clamped as a whole against `ctp_skin_cap`; rank
/// points are tie-averaged through the shared [`RankTable`]; majors scale
/// the finished total and round up. An event that is not points-eligible
/// is worth zero to everyone.
pub fn allocate_points(
    player: &PlayerResult,
    ranks: &RankTable,
    config: &PointsConfig,
    is_major: bool,
    points_eligible: bool,
) -> f64 {
    if !points_eligible {
        return 0.0;
    }

    let combined = (player.ctps as f64 * config.ctp + player.skins as f64 * config.skin)
        .min(config.ctp_skin_cap);

    let rank_points = match player.rank {
        Some(rank) => ranks.point_share(config, rank),
        None => 0.0,
    };

    let total = combined + rank_points + config.participation;
    if is_major {
        (total * config.major_multiplier).ceil()
    } else {
        total
    }
}

/// Points for every row of an event, in input order. Builds the rank
/// partition once and scores against it.
pub fn allocate_event_points(
    players: &[PlayerResult],
    config: &PointsConfig,
    is_major: bool,
    points_eligible: bool,
) -> Vec<f64> {
    let ranks = RankTable::build(players);
    players
        .iter()
        .map(|p| allocate_points(p, &ranks, config, is_major, points_eligible))
        .collect()
}
