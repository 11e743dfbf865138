//! League standings page.

use scraper::Html;

use crate::data::client::BASE_URL;
use crate::data::html::{body_rows, column_link, column_text, header_map, selector};
use crate::domain::{Season, TeamStanding};
use crate::error::AppError;
use crate::normalize::values::{parse_count, parse_entity_href};

/// URL path segment for a league name: `Jr. A SM-liiga` → `jr.-a-sm-liiga`.
pub fn league_slug(league: &str) -> String {
    league.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase()
}

pub fn standings_url(league: &str, season: Season) -> String {
    format!("{BASE_URL}/league/{}/{season}", league_slug(league))
}

/// Parse the `table.standings` table of a league-season page.
///
/// Columns are located by header text; a missing column reads as zero. Rows
/// without a team link (conference/division dividers) are skipped.
pub fn parse_standings(html: &str, league: &str, season: Season) -> Result<Vec<TeamStanding>, AppError> {
    let document = Html::parse_document(html);
    let table_sel = selector("table.standings")?;
    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| AppError::parse(format!("No standings table for {league} {season}.")))?;

    let headers = header_map(&table)?;
    if !headers.contains_key("team") {
        return Err(AppError::parse(format!(
            "Standings table for {league} {season} has no `Team` column."
        )));
    }

    let mut out = Vec::new();
    for cells in body_rows(&table)? {
        let Some((team, href)) = column_link(&cells, &headers, "team")? else {
            continue;
        };
        let Some((team_id, team_shortname)) = parse_entity_href(&href, "team") else {
            continue;
        };
        let Ok(team_id) = u32::try_from(team_id) else {
            continue;
        };
        let count = |name: &str| parse_count(&column_text(&cells, &headers, name));

        out.push(TeamStanding {
            team,
            team_id,
            team_shortname,
            league: league.to_string(),
            season,
            gp: count("gp"),
            w: count("w"),
            t: count("t"),
            l: count("l"),
            otw: count("otw"),
            otl: count("otl"),
            gf: count("gf"),
            ga: count("ga"),
            tp: count("tp"),
        });
    }

    Ok(out)
}
