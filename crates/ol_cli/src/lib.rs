//! File loading for the settlement CLI.
//!
//! The CLI is a thin adapter: these helpers translate the files a league
//! admin keeps (event JSON, roster CSV or JSON, rules YAML) into engine
//! inputs and nothing more.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use ol_core::models::{Event, Golfer, LeagueRules, PlayerResult};

/// One event's input document: the event record plus its player rows.
#[derive(Debug, Deserialize)]
pub struct EventFile {
    pub event: Event,
    pub players: Vec<PlayerResult>,
    /// Derive finish ranks from net performance before settling.
    #[serde(default)]
    pub assign_ranks: bool,
}

pub fn load_event(path: &Path) -> Result<EventFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read event file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse event file {}", path.display()))
}

/// Player rows from any document that carries them: an event input file
/// or a settlement output written by `settle --out`.
pub fn load_settled_players(path: &Path) -> Result<Vec<PlayerResult>> {
    #[derive(Deserialize)]
    struct Rows {
        players: Vec<PlayerResult>,
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settled event {}", path.display()))?;
    let rows: Rows = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse settled event {}", path.display()))?;
    Ok(rows.players)
}

/// League rules from a YAML file, or the embedded defaults when no path
/// is given.
pub fn load_rules(path: Option<&Path>) -> Result<LeagueRules> {
    match path {
        Some(path) => LeagueRules::from_yaml_file(path)
            .with_context(|| format!("failed to load rules from {}", path.display())),
        None => Ok(ol_core::data::default_rules().clone()),
    }
}

/// Signed-up roster from CSV (`id,name,quota`) or a JSON array of the
/// same fields, decided by extension.
pub fn load_roster(path: &Path) -> Result<Vec<Golfer>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_roster_csv(path),
        Some("json") => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read roster {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse roster {}", path.display()))
        }
        _ => bail!("roster must be a .csv or .json file: {}", path.display()),
    }
}

fn load_roster_csv(path: &Path) -> Result<Vec<Golfer>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open roster {}", path.display()))?;
    let mut roster = Vec::new();
    for record in reader.deserialize() {
        let golfer: Golfer =
            record.with_context(|| format!("bad roster row in {}", path.display()))?;
        roster.push(golfer);
    }
    Ok(roster)
}
