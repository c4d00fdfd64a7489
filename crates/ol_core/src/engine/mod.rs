pub mod fantasy;
pub mod pairings;
pub mod payout;
pub mod points;
pub mod quota;
pub mod settlement;
pub mod standings;
pub mod ties;

pub use fantasy::{
    resolve_picks, score_fantasy_picks, FantasyPick, FantasyScore, ResultsById, TierScore,
};
pub use pairings::{generate_pairings, generate_pairings_seeded, Group, GroupKind, Pairing};
pub use payout::{compute_payouts, Payouts, PotSummary};
pub use points::{allocate_event_points, allocate_points};
pub use quota::adjust_quota;
pub use settlement::{EventSettlement, QuotaUpdate, SettlementOutcome};
pub use standings::{season_standings, StandingRow};
pub use ties::{rank_by_net, RankTable};
