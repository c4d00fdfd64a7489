//! Event payouts from pooled entry fees.
//!
//! The entry pool is three non-overlapping sub-pots: rank money paid per
//! the schedule for the field size, a skins pot split evenly per skin, and
//! a CTP pot split across the round's closest-to-pin opportunities. Each
//! payout is charged to exactly one sub-pot; the main remainder is the
//! whole pool minus everything paid, never with a category subtracted
//! twice.

use crate::engine::ties::RankTable;
use crate::error::Result;
use crate::models::rules::{PayoutSchedule, PotSplit};
use crate::models::PlayerResult;

/// Remaining balances after an event is paid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PotSummary {
    pub total_pot: i64,
    pub remaining_main_pot: i64,
    pub remaining_skin_pot: i64,
    pub remaining_ctp_pot: i64,
}

/// Updated rows plus the pot balances they leave behind.
#[derive(Debug, Clone)]
pub struct Payouts {
    pub players: Vec<PlayerResult>,
    pub pots: PotSummary,
}

/// Pay out one event.
///
/// Rows flagged `payout_override` pass through untouched; their stored
/// money still counts against the main pot so conservation holds. Fails
/// loud when the schedule has no table for this field size.
pub fn compute_payouts(
    players: &[PlayerResult],
    schedule: &PayoutSchedule,
    pots: &PotSplit,
    ctp_opportunities: u32,
) -> Result<Payouts> {
    let n = players.len();
    if n == 0 {
        return Ok(Payouts { players: Vec::new(), pots: PotSummary::default() });
    }

    let table = schedule.for_field(n)?;

    let total_pot = pots.buy_in * n as i64;
    let skin_pot = pots.skins * n as i64;
    let ctp_pot = pots.ctp * n as i64;

    let total_skins: i64 = players.iter().map(|p| p.skins as i64).sum();
    let skin_value = if total_skins > 0 { skin_pot / total_skins } else { 0 };
    let ctp_value = if ctp_opportunities > 0 { ctp_pot / ctp_opportunities as i64 } else { 0 };

    let ranks = RankTable::build(players);

    let mut paid_rank = 0i64;
    let mut paid_skins = 0i64;
    let mut paid_ctps = 0i64;
    let mut paid_overrides = 0i64;

    let mut updated = Vec::with_capacity(n);
    for player in players {
        if player.payout_override {
            paid_overrides += player.money_won;
            updated.push(player.clone());
            continue;
        }

        let rank_money = match player.rank {
            Some(rank) => ranks.money_share(table, rank),
            None => 0,
        };
        let skin_money = player.skins as i64 * skin_value;
        let ctp_money = player.ctps as i64 * ctp_value;

        paid_rank += rank_money;
        paid_skins += skin_money;
        paid_ctps += ctp_money;

        let mut row = player.clone();
        row.money_won = rank_money + skin_money + ctp_money;
        updated.push(row);
    }

    let paid = paid_rank + paid_skins + paid_ctps + paid_overrides;
    let summary = PotSummary {
        total_pot,
        remaining_main_pot: (total_pot - paid).max(0),
        remaining_skin_pot: skin_pot - paid_skins,
        remaining_ctp_pot: ctp_pot - paid_ctps,
    };

    log::debug!(
        "paid out field of {}: rank {} skins {} ctps {} overrides {}, {} left in main pot",
        n,
        paid_rank,
        paid_skins,
        paid_ctps,
        paid_overrides,
        summary.remaining_main_pot
    );

    Ok(Payouts { players: updated, pots: summary })
}
