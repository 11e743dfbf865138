use crate::domain::{GoalieRecord, RawGoalieRow, RawListing, TeamContext};
use crate::normalize::values::{parse_count, parse_entity_href, parse_ratio, split_name_position};

/// Normalize one goalie listing. Zero-GP rows and rows without a player link are dropped.
pub fn normalize_goalies(ctx: &TeamContext, listing: &RawListing<RawGoalieRow>) -> Vec<GoalieRecord> {
    listing
        .rows
        .iter()
        .filter_map(|row| {
            let (player_id, shortname) = parse_entity_href(row.player_href.as_deref()?, "player")?;
            let (player_name, _) = split_name_position(&row.name_cell);
            Some(GoalieRecord {
                player_name,
                player_id,
                shortname,
                team: ctx.team.clone(),
                team_id: ctx.team_id,
                league: ctx.league.clone(),
                season: ctx.season,
                stage: listing.stage.clone(),
                gp: parse_count(&row.gp),
                gaa: parse_ratio(&row.gaa),
                sv_pct: parse_ratio(&row.sv_pct),
            })
        })
        .filter(|g| g.gp > 0)
        .collect()
}
