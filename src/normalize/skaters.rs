//! Skater listing normalization and derived per-player rates.
//!
//! For one team-season-stage listing:
//!
//! - `g_gp`, `a_gp`, `tp_gp` are the player's per-game rates
//! - `perc_team_x = (x / gp) / (team_total_x / max_gp)` compares the player's
//!   rate with the team's rate, where the team's games are approximated by the
//!   most games any player on the listing appeared in
//!
//! Rows with zero games played are dropped before anything is derived, so the
//! per-game divisions never see a zero denominator. A share whose team total is
//! zero is left empty; the other fields of the record are unaffected.

use crate::domain::{RawListing, RawSkaterRow, SkaterRecord, TeamContext};
use crate::normalize::values::{parse_count, parse_entity_href, parse_signed, split_name_position};

/// Normalize one skater listing of a team page.
///
/// Rows without a usable player link or with zero games played are dropped.
/// Each derived field is set on its own; a value that is not finite (e.g. a
/// goal share on a team with no goals) is left empty.
pub fn normalize_skaters(ctx: &TeamContext, listing: &RawListing<RawSkaterRow>) -> Vec<SkaterRecord> {
    let mut records: Vec<SkaterRecord> = listing
        .rows
        .iter()
        .filter_map(|row| to_record(ctx, &listing.stage, row))
        .filter(|r| r.gp > 0)
        .collect();

    derive_rates(&mut records);
    records
}

fn to_record(ctx: &TeamContext, stage: &str, row: &RawSkaterRow) -> Option<SkaterRecord> {
    let (player_id, shortname) = parse_entity_href(row.player_href.as_deref()?, "player")?;
    let (player_name, position) = split_name_position(&row.name_cell);

    Some(SkaterRecord {
        player_name,
        player_id,
        shortname,
        position,
        team: ctx.team.clone(),
        team_id: ctx.team_id,
        league: ctx.league.clone(),
        season: ctx.season,
        stage: stage.to_string(),
        gp: parse_count(&row.gp),
        g: parse_count(&row.g),
        a: parse_count(&row.a),
        tp: parse_count(&row.tp),
        pim: parse_count(&row.pim),
        plus_minus: parse_signed(&row.plus_minus),
        g_gp: None,
        a_gp: None,
        tp_gp: None,
        perc_team_g: None,
        perc_team_a: None,
        perc_team_tp: None,
    })
}

fn derive_rates(records: &mut [SkaterRecord]) {
    let Some(max_gp) = records.iter().map(|r| r.gp).max() else {
        return;
    };
    let max_gp = max_gp as f64;
    let team_rate = |stat: fn(&SkaterRecord) -> u32| -> f64 {
        records.iter().map(|r| stat(r) as f64).sum::<f64>() / max_gp
    };
    let team_g = team_rate(|r| r.g);
    let team_a = team_rate(|r| r.a);
    let team_tp = team_rate(|r| r.tp);

    for r in records.iter_mut() {
        let gp = r.gp as f64;
        let g_gp = r.g as f64 / gp;
        let a_gp = r.a as f64 / gp;
        let tp_gp = r.tp as f64 / gp;

        r.g_gp = finite(g_gp);
        r.a_gp = finite(a_gp);
        r.tp_gp = finite(tp_gp);
        r.perc_team_g = finite(g_gp / team_g);
        r.perc_team_a = finite(a_gp / team_a);
        r.perc_team_tp = finite(tp_gp / team_tp);
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
