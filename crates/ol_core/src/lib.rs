//! # ol_core - Deterministic Golf League Settlement Engine
//!
//! This library turns raw per-player event results for a quota-based golf
//! league into derived records: adjusted quotas, season points, payouts
//! from the pooled entry fees, randomized tee groups and fantasy-contest
//! scores.
//!
//! ## Features
//! - 100% deterministic settlement (same inputs = same outputs, verified
//!   by fingerprint)
//! - Tie-aware point and money splits from one shared rank partition
//! - Three non-overlapping sub-pots with conservation guaranteed
//! - Seedable pairings for reproducible draws
//! - JSON API for easy integration with the league's web backend

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;

// Re-export the JSON API surface
pub use api::{generate_pairings_json, score_fantasy_json, settle_event_json};

// Re-export engine entry points
pub use engine::{
    adjust_quota, allocate_event_points, allocate_points, compute_payouts, generate_pairings,
    generate_pairings_seeded, rank_by_net, resolve_picks, score_fantasy_picks, season_standings,
    EventSettlement, FantasyPick, FantasyScore, Group, GroupKind, Pairing, PotSummary,
    QuotaUpdate, RankTable, ResultsById, SettlementOutcome, StandingRow,
};

// Re-export the data model
pub use error::{Result, SettleError};
pub use models::{
    Event, FantasyWeights, Golfer, LeagueRules, PayoutSchedule, PlayerId, PlayerResult,
    PointsConfig, PotSplit, RemainderPolicy, SettlementAudit,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = api::json_api::SCHEMA_VERSION;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sha2::{Digest, Sha256};

    fn settle_request() -> String {
        json!({
            "schema_version": 1,
            "assign_ranks": true,
            "event": { "id": 42, "name": "Club Championship", "date": "2025-08-02", "is_major": true },
            "players": (1..=12).map(|id| json!({
                "player_id": id,
                "name": format!("player{}", id),
                "quota": 15 + (id % 5),
                "score": 13 + id,
                "skins": if id == 3 { 2 } else { 0 },
                "ctps": if id <= 2 { 1 } else { 0 }
            })).collect::<Vec<_>>()
        })
        .to_string()
    }

    fn sha256_hex(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let digest = hasher.finalize();
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }

    #[test]
    fn test_full_settlement_is_deterministic() {
        let request = settle_request();
        let first = settle_event_json(&request).unwrap();
        let second = settle_event_json(&request).unwrap();
        assert_eq!(sha256_hex(first.as_bytes()), sha256_hex(second.as_bytes()));

        let parsed: serde_json::Value = serde_json::from_str(&first).unwrap();
        assert_eq!(parsed["audit"]["pot_conservation"], true);
        assert_eq!(parsed["audit"]["points_consistent"], true);
        assert_eq!(parsed["outcome"]["pots"]["total_pot"], 24 * 12);
    }

    #[test]
    fn test_schema_version_matches_api() {
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
