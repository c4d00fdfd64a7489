use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scheduled league event, as the store hands it to settlement.
///
/// `par_threes` is the count of closest-to-pin opportunities for the round
/// and comes from course data; the CTP sub-pot is divided by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default = "default_par_threes")]
    pub par_threes: u32,
    /// Major events scale points by the configured multiplier.
    #[serde(default)]
    pub is_major: bool,
    /// Whether the event counts toward season standings.
    #[serde(default = "default_true")]
    pub points_eligible: bool,
}

fn default_par_threes() -> u32 {
    4
}

fn default_true() -> bool {
    true
}

impl Event {
    pub fn new(id: i64, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            par_threes: default_par_threes(),
            is_major: false,
            points_eligible: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_defaults_from_json() {
        let event: Event = serde_json::from_str(
            r#"{"id": 3, "name": "Week 3", "date": "2025-05-17"}"#,
        )
        .unwrap();
        assert_eq!(event.par_threes, 4);
        assert!(!event.is_major);
        assert!(event.points_eligible);
    }
}
