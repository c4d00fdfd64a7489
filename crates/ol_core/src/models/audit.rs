//! Settlement audit snapshots.
//!
//! After settling an event the workflow can capture the logical invariants
//! of the outcome as plain booleans. Regression tests verify the flags
//! rather than exact row equality, so rule tweaks don't invalidate stored
//! snapshots while genuine accounting bugs still trip them.

use serde::{Deserialize, Serialize};

/// Pre-computed invariant checks for one settled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementAudit {
    pub event_id: i64,
    pub players: usize,

    /// Money conservation: every dollar paid out plus the remaining main
    /// pot equals the entry pool, each payout counted exactly once.
    pub pot_conservation: bool,

    /// Neither the skins nor the CTP sub-pot paid out more than it held.
    pub sub_pots_non_negative: bool,

    /// Re-allocating points over the settled rows reproduces the stored
    /// totals (catches hand-edited rows and drifted configs).
    pub points_consistent: bool,

    /// Every rostered player appears in exactly one pairing group.
    /// `None` when no pairing was generated for the event.
    pub pairing_coverage: Option<bool>,

    /// SHA-256 of the settled rows and pot balances; equal inputs settle
    /// to equal fingerprints.
    pub fingerprint: String,
}

impl SettlementAudit {
    /// True when every computed invariant holds.
    pub fn is_clean(&self) -> bool {
        self.pot_conservation
            && self.sub_pots_non_negative
            && self.points_consistent
            && self.pairing_coverage.unwrap_or(true)
    }
}
