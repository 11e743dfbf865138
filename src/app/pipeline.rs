//! Shared load pipeline used by the `load`, `rerun` and `refresh` commands.
//!
//! league-season units -> standings page -> team stats pages -> normalized rows
//! player refs -> worker pool -> player pages -> player info
//!
//! A league-season is all-or-nothing: any error while loading it discards its
//! rows and records the unit as failed. Player pages fail individually.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{info, warn};
use rayon::prelude::*;

use crate::data::{
    EpClient, PageSource, parse_player_page, parse_standings, parse_team_stats, player_url, standings_url,
    team_stats_url_for,
};
use crate::domain::{
    FailedPlayer, FailedSeason, FailedUnits, LoadConfig, LoadUnit, LoadedTables, PlayerInfo, PlayerRef, TeamContext,
};
use crate::error::AppError;
use crate::normalize::{normalize_goalies, normalize_skaters};

const PROGRESS_EVERY: usize = 100;

/// All outputs of a single run.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub tables: LoadedTables,
    pub failures: FailedUnits,
}

/// Execute the full pipeline against the live site.
pub fn run_load(config: &LoadConfig) -> Result<RunOutput, AppError> {
    let client = EpClient::new(config.delay_ms)?;
    run_load_with_source(config, &client)
}

/// Execute the pipeline against any page source.
pub fn run_load_with_source<S: PageSource>(config: &LoadConfig, source: &S) -> Result<RunOutput, AppError> {
    let mut out = RunOutput::default();
    let total = config.units.len();

    for (idx, unit) in config.units.iter().enumerate() {
        info!("[{}/{total}] loading {} {}", idx + 1, unit.league, unit.season);
        match load_unit(source, unit) {
            Ok(loaded) => {
                info!(
                    "{} {}: {} teams, {} skater rows, {} goalie rows",
                    unit.league,
                    unit.season,
                    loaded.standings.len(),
                    loaded.skaters.len(),
                    loaded.goalies.len()
                );
                out.tables.standings.extend(loaded.standings);
                out.tables.skaters.extend(loaded.skaters);
                out.tables.goalies.extend(loaded.goalies);
            }
            Err(e) => {
                warn!("{} {} failed: {e}", unit.league, unit.season);
                out.failures.seasons.push(FailedSeason {
                    unit: unit.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut players = if config.collect_player_info {
        out.tables.player_refs()
    } else {
        Vec::new()
    };
    players.extend(config.extra_players.iter().cloned());
    players.sort();
    players.dedup_by_key(|p| p.player_id);

    if !players.is_empty() {
        let (infos, failed) = fetch_player_infos(source, &players, config.workers)?;
        out.tables.players = infos;
        out.failures.players = failed;
    }

    Ok(out)
}

/// Load one league-season: standings, then every team's stats page.
pub fn load_unit<S: PageSource + ?Sized>(source: &S, unit: &LoadUnit) -> Result<LoadedTables, AppError> {
    let html = source.fetch(&standings_url(&unit.league, unit.season))?;
    let standings = parse_standings(&html, &unit.league, unit.season)?;
    if standings.is_empty() {
        return Err(AppError::parse(format!(
            "Standings table for {} {} has no teams.",
            unit.league, unit.season
        )));
    }

    let mut out = LoadedTables::default();
    for standing in &standings {
        let ctx = TeamContext {
            league: unit.league.clone(),
            season: unit.season,
            team: standing.team.clone(),
            team_id: standing.team_id,
        };
        let page = parse_team_stats(&source.fetch(&team_stats_url_for(standing))?)
            .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", standing.team)))?;

        for listing in &page.skaters {
            out.skaters.extend(normalize_skaters(&ctx, listing));
        }
        for listing in &page.goalies {
            out.goalies.extend(normalize_goalies(&ctx, listing));
        }
    }
    out.standings = standings;
    Ok(out)
}

/// Fetch player pages on a pool of `workers` threads.
///
/// Output order follows `players` regardless of the worker count.
pub fn fetch_player_infos<S: PageSource>(
    source: &S,
    players: &[PlayerRef],
    workers: usize,
) -> Result<(Vec<PlayerInfo>, Vec<FailedPlayer>), AppError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .build()
        .map_err(|e| AppError::config(format!("Failed to start worker pool: {e}")))?;

    let total = players.len();
    let done = AtomicUsize::new(0);
    info!("fetching info for {total} players on {} worker(s)", workers.max(1));

    let results: Vec<Result<PlayerInfo, FailedPlayer>> = pool.install(|| {
        players
            .par_iter()
            .map(|player| {
                let result = fetch_player_info(source, player).map_err(|e| {
                    warn!("player {} ({}) failed: {e}", player.shortname, player.player_id);
                    FailedPlayer {
                        player: player.clone(),
                        reason: e.to_string(),
                    }
                });
                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                if n % PROGRESS_EVERY == 0 {
                    info!("players: {n}/{total}");
                }
                result
            })
            .collect()
    });

    let mut infos = Vec::new();
    let mut failed = Vec::new();
    for result in results {
        match result {
            Ok(info) => infos.push(info),
            Err(f) => failed.push(f),
        }
    }
    Ok((infos, failed))
}

pub fn fetch_player_info<S: PageSource + ?Sized>(source: &S, player: &PlayerRef) -> Result<PlayerInfo, AppError> {
    let html = source.fetch(&player_url(player))?;
    parse_player_page(&html, player)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;
    use crate::data::fixtures::{PLAYER_HTML, STANDINGS_HTML, TEAM_STATS_HTML};
    use crate::data::team_stats::team_stats_url;
    use crate::domain::{OutputTarget, Season};

    struct FixtureSource {
        pages: HashMap<String, String>,
    }

    impl PageSource for FixtureSource {
        fn fetch(&self, url: &str) -> Result<String, AppError> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::network(format!("Request to {url} failed with status 404.")))
        }
    }

    fn nhl_2019() -> FixtureSource {
        let season = Season::new(2019);
        let mut pages = HashMap::new();
        pages.insert(standings_url("NHL", season), STANDINGS_HTML.to_string());
        for (id, slug) in [(64, "boston-bruins"), (76, "toronto-maple-leafs"), (70, "washington-capitals")] {
            pages.insert(team_stats_url(id, slug, season), TEAM_STATS_HTML.to_string());
        }
        let mcdavid = PlayerRef {
            player_id: 183442,
            shortname: "connor-mcdavid".to_string(),
        };
        pages.insert(player_url(&mcdavid), PLAYER_HTML.to_string());
        FixtureSource { pages }
    }

    fn config(leagues: &[&str], workers: usize) -> LoadConfig {
        let leagues: Vec<String> = leagues.iter().map(|l| l.to_string()).collect();
        LoadConfig {
            units: LoadConfig::plan_units(&leagues, &[Season::new(2019)]),
            extra_players: Vec::new(),
            collect_player_info: true,
            output: OutputTarget::Csv,
            prod: false,
            workers,
            delay_ms: 0,
            data_dir: PathBuf::from("data"),
            load_date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        }
    }

    #[test]
    fn full_run_collects_tables_and_failures() {
        let out = run_load_with_source(&config(&["NHL", "KHL"], 1), &nhl_2019()).unwrap();

        assert_eq!(out.tables.standings.len(), 3);
        // per team: 2 regular season skaters + 1 playoff line; zero-GP and totals rows dropped
        assert_eq!(out.tables.skaters.len(), 9);
        assert!(out.tables.skaters.iter().all(|s| s.gp > 0));
        assert_eq!(out.tables.goalies.len(), 3);

        let leafs: Vec<_> = out.tables.skaters.iter().filter(|s| s.team_id == 76).collect();
        assert_eq!(leafs.len(), 3);
        assert!(leafs.iter().all(|s| s.team == "Toronto Maple Leafs" && s.league == "NHL"));

        assert_eq!(out.failures.seasons.len(), 1);
        assert_eq!(out.failures.seasons[0].unit.league, "KHL");

        assert_eq!(out.tables.players.len(), 1);
        assert_eq!(out.tables.players[0].player_id, 183442);
        let failed_ids: Vec<u64> = out.failures.players.iter().map(|f| f.player.player_id).collect();
        assert_eq!(failed_ids, vec![9678, 130383]);
    }

    #[test]
    fn missing_team_page_fails_the_whole_season() {
        let mut source = nhl_2019();
        source
            .pages
            .remove(&team_stats_url(70, "washington-capitals", Season::new(2019)));

        let mut cfg = config(&["NHL"], 1);
        cfg.collect_player_info = false;
        let out = run_load_with_source(&cfg, &source).unwrap();

        assert!(out.tables.standings.is_empty());
        assert!(out.tables.skaters.is_empty());
        assert_eq!(out.failures.seasons.len(), 1);
        assert!(out.failures.seasons[0].reason.contains("404"));
        assert!(out.tables.players.is_empty());
    }

    #[test]
    fn standings_without_teams_fail_the_season() {
        let mut source = nhl_2019();
        source.pages.insert(
            standings_url("NHL", Season::new(2019)),
            r#"<table class="standings"><thead><tr><th>#</th><th>Team</th><th>GP</th></tr></thead><tbody></tbody></table>"#
                .to_string(),
        );

        let out = run_load_with_source(&config(&["NHL"], 1), &source).unwrap();

        assert!(out.tables.standings.is_empty());
        assert_eq!(out.failures.seasons.len(), 1);
        assert_eq!(out.failures.seasons[0].unit.league, "NHL");
        assert!(out.failures.seasons[0].reason.contains("no teams"));
    }

    #[test]
    fn worker_count_does_not_change_results() {
        let source = nhl_2019();
        let sequential = run_load_with_source(&config(&["NHL"], 1), &source).unwrap();
        let pooled = run_load_with_source(&config(&["NHL"], 4), &source).unwrap();
        assert_eq!(sequential.tables, pooled.tables);
        assert_eq!(sequential.failures, pooled.failures);
    }

    #[test]
    fn extra_players_are_fetched_without_stats() {
        let mut cfg = config(&[], 2);
        cfg.collect_player_info = false;
        cfg.extra_players = vec![PlayerRef {
            player_id: 183442,
            shortname: "connor-mcdavid".to_string(),
        }];
        let out = run_load_with_source(&cfg, &nhl_2019()).unwrap();
        assert_eq!(out.tables.players.len(), 1);
        assert!(out.failures.is_empty());
    }
}
