//! Embedded league configuration.
//!
//! The default rule bundle is compiled into the crate so the engine works
//! with zero files present; leagues that keep their own `league.yaml`
//! override it via [`LeagueRules::from_yaml_file`].

use once_cell::sync::Lazy;

use crate::models::LeagueRules;

/// Default league rules (compile-time embedded).
pub const DEFAULT_LEAGUE_YAML: &str = include_str!("league_default.yaml");

static DEFAULT_RULES: Lazy<LeagueRules> = Lazy::new(|| {
    serde_yaml::from_str(DEFAULT_LEAGUE_YAML).expect("failed to parse league_default.yaml")
});

/// The parsed default rule bundle.
///
/// # Panics
///
/// Panics if the embedded YAML fails to parse, which cannot happen in a
/// normal build.
pub fn default_rules() -> &'static LeagueRules {
    &DEFAULT_RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_rules_parse() {
        let rules = default_rules();
        assert_eq!(rules.pots.buy_in, 24);
        assert_eq!(rules.points.place_value(1), 25.0);
        assert!(!rules.payouts.is_empty());
    }

    #[test]
    fn test_embedded_payout_tables_are_square_and_sum_to_rank_pot() {
        let rules = default_rules();
        for n in rules.payouts.field_sizes().collect::<Vec<_>>() {
            let table = rules.payouts.for_field(n).unwrap();
            assert_eq!(table.len(), n, "table for {} players must have {} entries", n, n);
            let total: i64 = table.iter().sum();
            assert_eq!(total, rules.pots.rank() * n as i64, "field of {}", n);
        }
    }
}
