//! JSON string API.
//!
//! Entry points for callers that speak JSON rather than Rust types (the
//! league's web backend settles events through these). Each function takes
//! a request document, validates its `schema_version`, runs the engine and
//! returns a response document; errors come back as human-readable
//! strings for the caller to surface.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engine::fantasy::{
    resolve_picks, score_fantasy_picks, FantasyPick, FantasyScore, ResultsById,
};
use crate::engine::pairings::{generate_pairings_seeded, Pairing};
use crate::engine::settlement::{EventSettlement, SettlementOutcome};
use crate::models::{
    Event, FantasyWeights, Golfer, LeagueRules, PlayerResult, RemainderPolicy, SettlementAudit,
};

pub const SCHEMA_VERSION: u8 = 1;

fn check_schema_version(version: u8) -> Result<(), String> {
    if version != SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", version));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    pub schema_version: u8,
    pub event: Event,
    pub players: Vec<PlayerResult>,
    /// Omit to settle under the embedded default rules.
    #[serde(default)]
    pub rules: Option<LeagueRules>,
    /// Derive finish ranks from net performance before settling.
    #[serde(default)]
    pub assign_ranks: bool,
}

#[derive(Debug, Serialize)]
pub struct SettleResponse {
    pub players: Vec<PlayerResult>,
    pub outcome: SettlementOutcome,
    pub audit: SettlementAudit,
}

/// Settle one event from a JSON request.
pub fn settle_event_json(request_json: &str) -> Result<String, String> {
    let request: SettleRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema_version(request.schema_version)?;

    debug!(event = request.event.id, players = request.players.len(), "settling event");

    let rules = request.rules.unwrap_or_else(|| crate::data::default_rules().clone());
    let mut settlement = EventSettlement::new(request.event, rules, request.players);
    if request.assign_ranks {
        settlement.assign_ranks();
    }

    let outcome = settlement.settle().map_err(|e| format!("Settlement failed: {}", e))?;
    let audit = settlement.audit(&outcome);
    if !audit.is_clean() {
        warn!(event = settlement.event.id, "settlement audit flagged an invariant");
    }

    let response =
        SettleResponse { players: settlement.players, outcome, audit };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize result: {}", e))
}

#[derive(Debug, Deserialize)]
pub struct PairingsRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub roster: Vec<Golfer>,
    #[serde(default)]
    pub remainder: RemainderPolicy,
}

#[derive(Debug, Serialize)]
pub struct PairingsResponse {
    pub pairing: Pairing,
}

/// Generate tee groups from a JSON roster.
pub fn generate_pairings_json(request_json: &str) -> Result<String, String> {
    let request: PairingsRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema_version(request.schema_version)?;

    debug!(roster = request.roster.len(), seed = request.seed, "generating pairings");

    let pairing = generate_pairings_seeded(&request.roster, request.remainder, request.seed);
    serde_json::to_string(&PairingsResponse { pairing })
        .map_err(|e| format!("Failed to serialize result: {}", e))
}

#[derive(Debug, Deserialize)]
pub struct FantasyRequest {
    pub schema_version: u8,
    pub picks: Vec<FantasyPick>,
    pub results: Vec<PlayerResult>,
    #[serde(default)]
    pub weights: Option<FantasyWeights>,
    /// When set, raw submissions are resolved to the latest pick per
    /// participant at or before this time.
    #[serde(default)]
    pub lock_time: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
pub struct FantasyResponse {
    pub scores: Vec<FantasyScore>,
}

/// Score fantasy picks against event results from a JSON request.
pub fn score_fantasy_json(request_json: &str) -> Result<String, String> {
    let request: FantasyRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema_version(request.schema_version)?;

    let weights =
        request.weights.unwrap_or_else(|| crate::data::default_rules().fantasy);
    let picks = match request.lock_time {
        Some(lock) => resolve_picks(&request.picks, lock),
        None => request.picks,
    };

    debug!(picks = picks.len(), results = request.results.len(), "scoring fantasy picks");

    let results: ResultsById =
        request.results.into_iter().map(|r| (r.player_id, r)).collect();
    let scores = score_fantasy_picks(&picks, &results, &weights);
    serde_json::to_string(&FantasyResponse { scores })
        .map_err(|e| format!("Failed to serialize result: {}", e))
}
