//! League rules as data.
//!
//! Every tunable the settlement engine consumes lives here: the season
//! point table, payout schedules per field size, the per-player pot split,
//! fantasy weights and the pairing remainder policy. Admins edit the YAML
//! out of band; settlement reads an immutable snapshot.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettleError};

/// Season point table and per-event point values.
///
/// Missing keys deserialize to zero so a sparse config stays usable; the
/// major multiplier alone defaults to league policy rather than a neutral
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointsConfig {
    /// Points by finishing place, index 0 = 1st. Places past the end of
    /// the table are worth nothing.
    #[serde(default)]
    pub places: Vec<f64>,
    /// Points per closest-to-pin.
    #[serde(default)]
    pub ctp: f64,
    /// Points per skin.
    #[serde(default)]
    pub skin: f64,
    /// Cap applied to the ctp+skin sum, not to each term.
    #[serde(default)]
    pub ctp_skin_cap: f64,
    /// Flat points for teeing it up.
    #[serde(default)]
    pub participation: f64,
    /// Scale factor for major events.
    #[serde(default = "default_major_multiplier")]
    pub major_multiplier: f64,
}

fn default_major_multiplier() -> f64 {
    1.5
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            places: vec![25.0, 21.0, 18.0, 15.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0],
            ctp: 2.0,
            skin: 2.0,
            ctp_skin_cap: 8.0,
            participation: 5.0,
            major_multiplier: default_major_multiplier(),
        }
    }
}

impl PointsConfig {
    /// Point value of a 1-based finishing place; 0 past the table.
    pub fn place_value(&self, place: u32) -> f64 {
        if place == 0 {
            return 0.0;
        }
        self.places.get(place as usize - 1).copied().unwrap_or(0.0)
    }
}

/// Rank-money tables keyed by field size.
///
/// Invariant: `tables[n].len() == n`, index 0 = 1st place, whole dollars.
/// A field size with no table is a configuration error and settlement
/// refuses to guess.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayoutSchedule {
    tables: BTreeMap<usize, Vec<i64>>,
}

impl PayoutSchedule {
    pub fn new(tables: BTreeMap<usize, Vec<i64>>) -> Self {
        Self { tables }
    }

    pub fn insert(&mut self, players: usize, payouts: Vec<i64>) {
        self.tables.insert(players, payouts);
    }

    /// The ordered payout list for a field of `players`.
    pub fn for_field(&self, players: usize) -> Result<&[i64]> {
        self.tables
            .get(&players)
            .map(Vec::as_slice)
            .ok_or(SettleError::MissingPayoutSchedule { players })
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn field_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.tables.keys().copied()
    }
}

/// How each player's buy-in splits across the three sub-pots.
/// The rank share is whatever the skins and CTP shares leave behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotSplit {
    pub buy_in: i64,
    pub skins: i64,
    pub ctp: i64,
}

impl Default for PotSplit {
    fn default() -> Self {
        Self { buy_in: 24, skins: 10, ctp: 4 }
    }
}

impl PotSplit {
    pub fn rank(&self) -> i64 {
        self.buy_in - self.skins - self.ctp
    }
}

/// Fantasy scoring weights. `low_penalty` is the one value the league
/// keeps negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FantasyWeights {
    pub skin: f64,
    pub ctp: f64,
    pub high_bonus: f64,
    pub low_penalty: f64,
}

impl Default for FantasyWeights {
    fn default() -> Self {
        Self { skin: 1.0, ctp: 1.0, high_bonus: 5.0, low_penalty: -5.0 }
    }
}

/// What to do with a 1-2 player leftover after greedy grouping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemainderPolicy {
    /// Fold leftover players into the last regular group (a five-ball is
    /// legal in this league).
    #[default]
    MergeIntoLast,
    /// Keep the leftover exposed as its own undersized group.
    Standalone,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingRules {
    #[serde(default)]
    pub remainder: RemainderPolicy,
}

/// The full rule bundle settlement runs against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueRules {
    #[serde(default)]
    pub points: PointsConfig,
    #[serde(default)]
    pub payouts: PayoutSchedule,
    #[serde(default)]
    pub pots: PotSplit,
    #[serde(default)]
    pub fantasy: FantasyWeights,
    #[serde(default)]
    pub pairing: PairingRules,
}

impl LeagueRules {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
