//! Fantasy contest scoring over settled event results.
//!
//! Participants pick one player from each of three performance tiers. A
//! pick earns the player's strokes over quota plus weighted skins and
//! CTPs. The best quota performance among every picked player in the
//! event (when positive) draws a bonus, the worst draws a penalty, and
//! tied extremes all collect in full.

use chrono::{DateTime, Utc};
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::models::rules::FantasyWeights;
use crate::models::{PlayerId, PlayerResult};

/// Event result rows keyed by player id.
pub type ResultsById = FxHashMap<PlayerId, PlayerResult>;

/// One participant's picks for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FantasyPick {
    pub participant_id: i64,
    pub event_id: i64,
    pub tier1: PlayerId,
    pub tier2: PlayerId,
    pub tier3: PlayerId,
    /// Submission time; the latest submission before the lock wins.
    pub submitted_at: DateTime<Utc>,
}

impl FantasyPick {
    pub fn picked(&self) -> [PlayerId; 3] {
        [self.tier1, self.tier2, self.tier3]
    }
}

/// Scoring breakdown for one tier of one pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierScore {
    /// 1, 2 or 3.
    pub tier: u8,
    pub player_id: PlayerId,
    /// Strokes over quota; `None` when the player posted no score.
    pub quota_perf: Option<i32>,
    pub points: f64,
    pub bonus: f64,
    pub penalty: f64,
}

/// Derived fantasy result; recomputed whenever event results change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FantasyScore {
    pub participant_id: i64,
    pub event_id: i64,
    pub tiers: Vec<TierScore>,
    pub total_points: f64,
}

/// Upsert semantics over raw submissions: for each participant keep the
/// latest pick submitted at or before `lock`, dropping the rest. Output
/// is ordered by participant id.
pub fn resolve_picks(submissions: &[FantasyPick], lock: DateTime<Utc>) -> Vec<FantasyPick> {
    let mut latest: FxHashMap<i64, &FantasyPick> = FxHashMap::default();
    for pick in submissions.iter().filter(|p| p.submitted_at <= lock) {
        latest
            .entry(pick.participant_id)
            .and_modify(|kept| {
                if pick.submitted_at >= kept.submitted_at {
                    *kept = pick;
                }
            })
            .or_insert(pick);
    }
    let mut resolved: Vec<FantasyPick> = latest.into_values().cloned().collect();
    resolved.sort_by_key(|p| p.participant_id);
    resolved
}

/// Score every participant's picks against the event's result rows.
pub fn score_fantasy_picks(
    picks: &[FantasyPick],
    results: &ResultsById,
    weights: &FantasyWeights,
) -> Vec<FantasyScore> {
    // One partition pass over the union of picked players decides the
    // extremes; per-pick scoring then reads from it, so tie membership is
    // identical for every participant.
    let mut picked: Vec<PlayerId> = picks.iter().flat_map(|p| p.picked()).collect();
    picked.sort_unstable();
    picked.dedup();

    let perfs: Vec<i32> = picked
        .iter()
        .filter_map(|id| results.get(id).and_then(PlayerResult::net_performance))
        .collect();
    let best = perfs.iter().copied().max();
    let worst = perfs.iter().copied().min();

    picks
        .iter()
        .map(|pick| {
            let tiers: Vec<TierScore> = pick
                .picked()
                .iter()
                .enumerate()
                .map(|(i, &player_id)| {
                    score_tier(i as u8 + 1, player_id, results, weights, best, worst)
                })
                .collect();
            let total_points =
                tiers.iter().map(|t| t.points + t.bonus + t.penalty).sum();
            FantasyScore {
                participant_id: pick.participant_id,
                event_id: pick.event_id,
                tiers,
                total_points,
            }
        })
        .collect()
}

fn score_tier(
    tier: u8,
    player_id: PlayerId,
    results: &ResultsById,
    weights: &FantasyWeights,
    best: Option<i32>,
    worst: Option<i32>,
) -> TierScore {
    let result = results.get(&player_id);
    let quota_perf = result.and_then(PlayerResult::net_performance);

    let (points, bonus, penalty) = match (result, quota_perf) {
        (Some(row), Some(perf)) => {
            let points = perf as f64
                + row.skins as f64 * weights.skin
                + row.ctps as f64 * weights.ctp;
            let bonus = match best {
                Some(b) if perf == b && b > 0 => weights.high_bonus,
                _ => 0.0,
            };
            let penalty = match worst {
                Some(w) if perf == w => weights.low_penalty,
                _ => 0.0,
            };
            (points, bonus, penalty)
        }
        // unknown player or no posted score: the tier is dead weight
        _ => (0.0, 0.0, 0.0),
    };

    TierScore { tier, player_id, quota_perf, points, bonus, penalty }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn result(id: PlayerId, quota: i32, score: i32, skins: u32, ctps: u32) -> PlayerResult {
        let mut row = PlayerResult::new(id, format!("p{}", id), quota);
        row.score = Some(score);
        row.skins = skins;
        row.ctps = ctps;
        row
    }

    fn results(rows: Vec<PlayerResult>) -> ResultsById {
        rows.into_iter().map(|r| (r.player_id, r)).collect()
    }

    fn pick(participant: i64, t1: PlayerId, t2: PlayerId, t3: PlayerId) -> FantasyPick {
        FantasyPick {
            participant_id: participant,
            event_id: 1,
            tier1: t1,
            tier2: t2,
            tier3: t3,
            submitted_at: Utc.with_ymd_and_hms(2025, 5, 16, 18, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_tier_points_are_perf_plus_weighted_extras() {
        let results = results(vec![
            result(1, 20, 24, 1, 0), // +4, one skin
            result(2, 18, 18, 0, 2), // even, two ctps
            result(3, 22, 19, 0, 0), // -3
        ]);
        let scores =
            score_fantasy_picks(&[pick(10, 1, 2, 3)], &results, &FantasyWeights::default());
        let s = &scores[0];
        // +4 +1 skin, plus best-performance bonus
        assert_eq!(s.tiers[0].points, 5.0);
        assert_eq!(s.tiers[0].bonus, 5.0);
        assert_eq!(s.tiers[1].points, 2.0);
        // worst pick takes the penalty
        assert_eq!(s.tiers[2].points, -3.0);
        assert_eq!(s.tiers[2].penalty, -5.0);
        assert_eq!(s.total_points, 5.0 + 5.0 + 2.0 - 3.0 - 5.0);
    }

    #[test]
    fn test_tied_best_both_collect_full_bonus() {
        let results = results(vec![
            result(1, 20, 24, 0, 0), // +4
            result(2, 18, 22, 0, 0), // +4
            result(3, 22, 22, 0, 0), // 0
        ]);
        let picks = vec![pick(10, 1, 3, 3), pick(11, 2, 3, 3)];
        let scores = score_fantasy_picks(&picks, &results, &FantasyWeights::default());
        assert_eq!(scores[0].tiers[0].bonus, 5.0);
        assert_eq!(scores[1].tiers[0].bonus, 5.0);
        // nobody below the max gets it
        assert_eq!(scores[0].tiers[1].bonus, 0.0);
    }

    #[test]
    fn test_no_bonus_when_best_is_not_positive() {
        let results = results(vec![
            result(1, 20, 20, 0, 0), // 0 is the best in the pool
            result(2, 18, 15, 0, 0), // -3
        ]);
        let scores =
            score_fantasy_picks(&[pick(10, 1, 2, 2)], &results, &FantasyWeights::default());
        assert_eq!(scores[0].tiers[0].bonus, 0.0);
        // the minimum still draws its penalty
        assert_eq!(scores[0].tiers[1].penalty, -5.0);
    }

    #[test]
    fn test_unknown_or_unscored_pick_is_dead_weight() {
        let mut unscored = PlayerResult::new(2, "dnf", 18);
        unscored.skins = 3; // no score posted, skins don't rescue the tier
        let results = results(vec![result(1, 20, 23, 0, 0), unscored]);
        let scores =
            score_fantasy_picks(&[pick(10, 1, 2, 99)], &results, &FantasyWeights::default());
        let s = &scores[0];
        assert_eq!(s.tiers[1].points, 0.0);
        assert_eq!(s.tiers[1].quota_perf, None);
        assert_eq!(s.tiers[2].points, 0.0);
        // the scored pick is alone in the pool: best and worst at once
        assert_eq!(s.tiers[0].bonus, 5.0);
        assert_eq!(s.tiers[0].penalty, -5.0);
    }

    #[test]
    fn test_resolve_picks_latest_before_lock_wins() {
        let lock = Utc.with_ymd_and_hms(2025, 5, 17, 8, 0, 0).unwrap();
        let mut early = pick(10, 1, 2, 3);
        early.submitted_at = Utc.with_ymd_and_hms(2025, 5, 16, 9, 0, 0).unwrap();
        let mut revised = pick(10, 4, 5, 6);
        revised.submitted_at = Utc.with_ymd_and_hms(2025, 5, 17, 7, 59, 0).unwrap();
        let mut late = pick(10, 7, 8, 9);
        late.submitted_at = Utc.with_ymd_and_hms(2025, 5, 17, 8, 1, 0).unwrap();
        let mut other = pick(11, 1, 2, 3);
        other.submitted_at = early.submitted_at;

        let resolved = resolve_picks(&[early, revised.clone(), late, other.clone()], lock);
        assert_eq!(resolved, vec![revised, other]);
    }
}
