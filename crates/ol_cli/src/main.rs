//! Open Links settlement CLI.
//!
//! Thin adapter over `ol_core`: reads the files a league admin keeps,
//! runs the engine, prints or writes JSON.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "ol_cli")]
#[command(about = "Settle events, draw pairings and tally standings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Settle one event from a JSON input file
    Settle {
        /// Input event JSON ({event, players, assign_ranks?})
        #[arg(long)]
        r#in: PathBuf,

        /// League rules YAML (embedded defaults when omitted)
        #[arg(long)]
        rules: Option<PathBuf>,

        /// Write the settlement JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the output
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Draw randomized tee groups from a roster file
    Pairings {
        /// Roster CSV (id,name,quota) or JSON array
        #[arg(long)]
        roster: PathBuf,

        /// Shuffle seed; the same seed redraws the same groups
        #[arg(long)]
        seed: u64,

        /// Keep a 1-2 player leftover as its own group instead of
        /// merging it into the last regular group
        #[arg(long, default_value = "false")]
        standalone_remainder: bool,
    },

    /// Season standings from settled event files
    Standings {
        /// Settled event JSON files
        #[arg(long, num_args = 1..)]
        events: Vec<PathBuf>,
    },

    /// Score fantasy picks against one event's results
    Fantasy {
        /// JSON array of pick submissions
        #[arg(long)]
        picks: PathBuf,

        /// Settled event JSON supplying the result rows
        #[arg(long)]
        results: PathBuf,

        /// Pick lock time (RFC 3339); later submissions are dropped
        #[arg(long)]
        lock: Option<chrono::DateTime<chrono::Utc>>,

        /// League rules YAML for the fantasy weights
        #[arg(long)]
        rules: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Settle { r#in, rules, out, pretty } => {
            let input = ol_cli::load_event(&r#in)?;
            let rules = ol_cli::load_rules(rules.as_deref())?;

            let mut settlement =
                ol_core::EventSettlement::new(input.event, rules, input.players);
            if input.assign_ranks {
                settlement.assign_ranks();
            }
            let outcome = settlement.settle()?;
            let audit = settlement.audit(&outcome);

            println!("Settled event {} ({} players)", settlement.event.id, audit.players);
            println!(
                "   Pot: {} total, {} left in main / {} skins / {} ctp",
                outcome.pots.total_pot,
                outcome.pots.remaining_main_pot,
                outcome.pots.remaining_skin_pot,
                outcome.pots.remaining_ctp_pot
            );
            if !audit.is_clean() {
                anyhow::bail!("settlement audit flagged an invariant: {:?}", audit);
            }

            let response = ol_core::api::SettleResponse {
                players: settlement.players,
                outcome,
                audit,
            };
            emit(&response, pretty, out.as_deref())?;
        }

        Commands::Pairings { roster, seed, standalone_remainder } => {
            let roster = ol_cli::load_roster(&roster)?;
            let policy = if standalone_remainder {
                ol_core::RemainderPolicy::Standalone
            } else {
                ol_core::RemainderPolicy::MergeIntoLast
            };
            let pairing = ol_core::generate_pairings_seeded(&roster, policy, seed);
            println!("Drew {} groups for {} players", pairing.groups.len(), roster.len());
            emit(&pairing, true, None)?;
        }

        Commands::Standings { events } => {
            let mut season: Vec<Vec<ol_core::PlayerResult>> = Vec::new();
            for path in &events {
                season.push(ol_cli::load_settled_players(path)?);
            }
            let table = ol_core::season_standings(&season);
            println!("Standings over {} events:", events.len());
            emit(&table, true, None)?;
        }

        Commands::Fantasy { picks, results, lock, rules } => {
            let text = std::fs::read_to_string(&picks)?;
            let submissions: Vec<ol_core::FantasyPick> = serde_json::from_str(&text)?;
            let picks = match lock {
                Some(lock) => ol_core::resolve_picks(&submissions, lock),
                None => submissions,
            };

            let rows = ol_cli::load_settled_players(&results)?;
            let by_id: ol_core::ResultsById =
                rows.into_iter().map(|r| (r.player_id, r)).collect();
            let weights = ol_cli::load_rules(rules.as_deref())?.fantasy;

            let scores = ol_core::score_fantasy_picks(&picks, &by_id, &weights);
            emit(&scores, true, None)?;
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn emit<T: serde::Serialize>(value: &T, pretty: bool, out: Option<&std::path::Path>) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    match out {
        Some(path) => {
            std::fs::write(path, &json)?;
            println!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("ol_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
