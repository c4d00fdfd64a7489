use serde::{Deserialize, Serialize};

/// Player identity as issued by the external store.
pub type PlayerId = i64;

/// A signed-up player as the roster supplies them: identity plus the quota
/// they carry into the round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Golfer {
    pub id: PlayerId,
    pub name: String,
    pub quota: i32,
}

impl Golfer {
    pub fn new(id: PlayerId, name: impl Into<String>, quota: i32) -> Self {
        Self { id, name: name.into(), quota }
    }
}

/// One player's row for one event.
///
/// Created when an event is scored, mutated only by re-settlement. `rank`
/// and `score` stay `None` for players who signed up but posted nothing;
/// such rows still earn participation points on an eligible event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    pub player_id: PlayerId,
    pub name: String,
    /// Finish position, 1-based. Tied players share the same rank.
    #[serde(default)]
    pub rank: Option<u32>,
    /// Points scored in the round (quota golf counts points, not strokes).
    #[serde(default)]
    pub score: Option<i32>,
    /// Quota carried into this round. The adjusted quota for the next
    /// round is part of the settlement outcome, not this row.
    pub quota: i32,
    #[serde(default)]
    pub ctps: u32,
    #[serde(default)]
    pub skins: u32,
    /// Whole dollars.
    #[serde(default)]
    pub money_won: i64,
    #[serde(default)]
    pub total_points: f64,
    /// Set by an admin correction; settlement leaves the row untouched.
    #[serde(default)]
    pub payout_override: bool,
}

impl PlayerResult {
    pub fn new(player_id: PlayerId, name: impl Into<String>, quota: i32) -> Self {
        Self {
            player_id,
            name: name.into(),
            rank: None,
            score: None,
            quota,
            ctps: 0,
            skins: 0,
            money_won: 0,
            total_points: 0.0,
            payout_override: false,
        }
    }

    /// Strokes over (positive) or under (negative) quota, if a score was
    /// posted.
    pub fn net_performance(&self) -> Option<i32> {
        self.score.map(|s| s - self.quota)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_performance() {
        let mut row = PlayerResult::new(1, "Al", 20);
        assert_eq!(row.net_performance(), None);

        row.score = Some(23);
        assert_eq!(row.net_performance(), Some(3));

        row.score = Some(17);
        assert_eq!(row.net_performance(), Some(-3));
    }

    #[test]
    fn test_result_row_defaults_from_json() {
        let row: PlayerResult =
            serde_json::from_str(r#"{"player_id": 7, "name": "Bo", "quota": 18}"#).unwrap();
        assert_eq!(row.rank, None);
        assert_eq!(row.skins, 0);
        assert_eq!(row.money_won, 0);
        assert!(!row.payout_override);
    }
}
