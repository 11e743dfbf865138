//! Team stats page: skater and goalie tables, one per season stage.

use scraper::{ElementRef, Html};

use crate::data::client::BASE_URL;
use crate::data::html::{body_rows, column_link, column_text, element_text, header_map, selector};
use crate::domain::{
    REGULAR_SEASON, RawGoalieRow, RawListing, RawSkaterRow, Season, TeamStanding, TeamStatsPage,
};
use crate::error::AppError;

pub fn team_stats_url(team_id: u32, team_shortname: &str, season: Season) -> String {
    format!("{BASE_URL}/team/{team_id}/{team_shortname}/{season}?tab=stats")
}

pub fn team_stats_url_for(standing: &TeamStanding) -> String {
    team_stats_url(standing.team_id, &standing.team_shortname, standing.season)
}

/// Parse every `table.skater-stats` / `table.goalie-stats` on a team page.
///
/// The stage of a table is its `<caption>`; uncaptioned tables are the
/// regular season. A page with neither kind of table is an error.
pub fn parse_team_stats(html: &str) -> Result<TeamStatsPage, AppError> {
    let document = Html::parse_document(html);
    let skater_sel = selector("table.skater-stats")?;
    let goalie_sel = selector("table.goalie-stats")?;

    let mut page = TeamStatsPage::default();

    for table in document.select(&skater_sel) {
        let headers = header_map(&table)?;
        let mut rows = Vec::new();
        for cells in body_rows(&table)? {
            let link = column_link(&cells, &headers, "player")?;
            rows.push(RawSkaterRow {
                name_cell: column_text(&cells, &headers, "player"),
                player_href: link.map(|(_, href)| href),
                gp: column_text(&cells, &headers, "gp"),
                g: column_text(&cells, &headers, "g"),
                a: column_text(&cells, &headers, "a"),
                tp: column_text(&cells, &headers, "tp"),
                pim: column_text(&cells, &headers, "pim"),
                plus_minus: column_text(&cells, &headers, "+/-"),
            });
        }
        page.skaters.push(RawListing {
            stage: table_stage(&table)?,
            rows,
        });
    }

    for table in document.select(&goalie_sel) {
        let headers = header_map(&table)?;
        let mut rows = Vec::new();
        for cells in body_rows(&table)? {
            let link = column_link(&cells, &headers, "player")?;
            rows.push(RawGoalieRow {
                name_cell: column_text(&cells, &headers, "player"),
                player_href: link.map(|(_, href)| href),
                gp: column_text(&cells, &headers, "gp"),
                gaa: column_text(&cells, &headers, "gaa"),
                sv_pct: column_text(&cells, &headers, "sv%"),
            });
        }
        page.goalies.push(RawListing {
            stage: table_stage(&table)?,
            rows,
        });
    }

    if page.skaters.is_empty() && page.goalies.is_empty() {
        return Err(AppError::parse("Team page has no skater or goalie stats tables."));
    }
    Ok(page)
}

fn table_stage(table: &ElementRef) -> Result<String, AppError> {
    let caption = selector("caption")?;
    Ok(table
        .select(&caption)
        .next()
        .map(|c| element_text(&c))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| REGULAR_SEASON.to_string()))
}
