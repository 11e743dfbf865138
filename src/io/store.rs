//! Append-only relational store (SQLite).
//!
//! Each load appends rows stamped with `load_date`; nothing is updated or
//! deleted. `current_player_info` exposes the most recent info row per player.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{Connection, params};

use crate::domain::{GoalieRecord, LoadedTables, PlayerInfo, PlayerRef, Season, SkaterRecord, TeamStanding};
use crate::error::AppError;

pub const PROD_DB_ENV: &str = "EP_PROD_DATABASE";
pub const DEV_DB_ENV: &str = "EP_DEV_DATABASE";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS team_standings (
    team TEXT NOT NULL,
    team_id INTEGER NOT NULL,
    team_shortname TEXT NOT NULL,
    league TEXT NOT NULL,
    season TEXT NOT NULL,
    gp INTEGER, w INTEGER, t INTEGER, l INTEGER, otw INTEGER, otl INTEGER,
    gf INTEGER, ga INTEGER, tp INTEGER,
    load_date TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS skater_stats (
    player_name TEXT NOT NULL,
    player_id INTEGER NOT NULL,
    shortname TEXT NOT NULL,
    position TEXT,
    team TEXT NOT NULL,
    team_id INTEGER NOT NULL,
    league TEXT NOT NULL,
    season TEXT NOT NULL,
    stage TEXT NOT NULL,
    gp INTEGER, g INTEGER, a INTEGER, tp INTEGER, pim INTEGER, plus_minus INTEGER,
    g_gp REAL, a_gp REAL, tp_gp REAL,
    perc_team_g REAL, perc_team_a REAL, perc_team_tp REAL,
    load_date TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS goalie_stats (
    player_name TEXT NOT NULL,
    player_id INTEGER NOT NULL,
    shortname TEXT NOT NULL,
    team TEXT NOT NULL,
    team_id INTEGER NOT NULL,
    league TEXT NOT NULL,
    season TEXT NOT NULL,
    stage TEXT NOT NULL,
    gp INTEGER, gaa REAL, sv_pct REAL,
    load_date TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS player_info (
    player_id INTEGER NOT NULL,
    shortname TEXT NOT NULL,
    player_name TEXT,
    date_of_birth TEXT,
    place_of_birth TEXT,
    nation TEXT,
    position TEXT,
    shoots TEXT,
    height_cm INTEGER,
    weight_kg INTEGER,
    draft_year INTEGER,
    draft_round INTEGER,
    draft_pick INTEGER,
    draft_team TEXT,
    rights_team TEXT,
    rights_status TEXT,
    draft_year_eligible INTEGER,
    load_date TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_skater_stats_season ON skater_stats(season, player_id);
CREATE INDEX IF NOT EXISTS idx_player_info_player ON player_info(player_id, load_date);
CREATE VIEW IF NOT EXISTS current_player_info AS
SELECT p.*
FROM player_info p
JOIN (
    SELECT player_id, MAX(load_date) AS load_date
    FROM player_info
    GROUP BY player_id
) latest ON p.player_id = latest.player_id AND p.load_date = latest.load_date;
"#;

/// Players in the given season's skater stats whose latest info row is more
/// than a month older than `today`; most recent draft classes first.
const STALE_PLAYER_INFO: &str = r#"
SELECT DISTINCT pi.player_id, pi.shortname, pi.draft_year_eligible, pi.date_of_birth
FROM current_player_info pi
JOIN (
    SELECT DISTINCT player_id FROM skater_stats WHERE season = ?1
) curr ON pi.player_id = curr.player_id
WHERE pi.load_date < date(?2, '-1 month')
ORDER BY pi.draft_year_eligible DESC NULLS LAST, pi.date_of_birth DESC NULLS LAST
"#;

/// Where the store lives, resolved from the environment.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
}

impl StoreConfig {
    /// Reads `EP_PROD_DATABASE` or `EP_DEV_DATABASE` (a `.env` file is honoured).
    pub fn from_env(prod: bool) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let key = if prod { PROD_DB_ENV } else { DEV_DB_ENV };
        let path = std::env::var(key)
            .map_err(|_| AppError::config(format!("Missing {key} in environment (.env).")))?;
        Ok(Self { path: PathBuf::from(path) })
    }
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let conn = Connection::open(path)
            .map_err(|e| AppError::config(format!("Failed to open database '{}': {e}", path.display())))?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| AppError::config(format!("Failed to open in-memory database: {e}")))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, AppError> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| AppError::config(format!("Failed to create schema: {e}")))?;
        Ok(Self { conn })
    }

    /// Append every table in one transaction; returns rows inserted.
    pub fn append_tables(&mut self, tables: &LoadedTables, load_date: NaiveDate) -> Result<usize, AppError> {
        let load_date = load_date.to_string();
        let tx = self
            .conn
            .transaction()
            .map_err(|e| db_error("begin transaction", e))?;

        let mut inserted = 0;
        for row in &tables.standings {
            insert_standing(&tx, row, &load_date)?;
            inserted += 1;
        }
        for row in &tables.skaters {
            insert_skater(&tx, row, &load_date)?;
            inserted += 1;
        }
        for row in &tables.goalies {
            insert_goalie(&tx, row, &load_date)?;
            inserted += 1;
        }
        for row in &tables.players {
            insert_player_info(&tx, row, &load_date)?;
            inserted += 1;
        }

        tx.commit().map_err(|e| db_error("commit", e))?;
        Ok(inserted)
    }

    #[cfg(test)]
    pub fn row_count(&self, table: crate::domain::Table) -> Result<usize, AppError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let n: i64 = self
            .conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| db_error("count rows", e))?;
        Ok(n as usize)
    }

    /// Players whose info should be refreshed, as of `today`.
    pub fn stale_players(&self, today: NaiveDate, limit: Option<usize>) -> Result<Vec<PlayerRef>, AppError> {
        let season = Season::current(today).to_string();
        let mut stmt = self
            .conn
            .prepare(STALE_PLAYER_INFO)
            .map_err(|e| db_error("prepare stale query", e))?;
        let rows = stmt
            .query_map(params![season, today.to_string()], |row| {
                let player_id: i64 = row.get(0)?;
                Ok(PlayerRef {
                    player_id: player_id as u64,
                    shortname: row.get(1)?,
                })
            })
            .map_err(|e| db_error("query stale players", e))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row.map_err(|e| db_error("read stale player", e))?);
            if limit.is_some_and(|n| out.len() >= n) {
                break;
            }
        }
        Ok(out)
    }
}

fn db_error(action: &str, e: rusqlite::Error) -> AppError {
    AppError::config(format!("Database error ({action}): {e}"))
}

fn insert_standing(conn: &Connection, r: &TeamStanding, load_date: &str) -> Result<(), AppError> {
    conn.execute(
        "INSERT INTO team_standings (
            team, team_id, team_shortname, league, season,
            gp, w, t, l, otw, otl, gf, ga, tp, load_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            r.team,
            r.team_id,
            r.team_shortname,
            r.league,
            r.season.to_string(),
            r.gp,
            r.w,
            r.t,
            r.l,
            r.otw,
            r.otl,
            r.gf,
            r.ga,
            r.tp,
            load_date,
        ],
    )
    .map_err(|e| db_error("insert team_standings", e))?;
    Ok(())
}

fn insert_skater(conn: &Connection, r: &SkaterRecord, load_date: &str) -> Result<(), AppError> {
    conn.execute(
        "INSERT INTO skater_stats (
            player_name, player_id, shortname, position, team, team_id, league, season, stage,
            gp, g, a, tp, pim, plus_minus,
            g_gp, a_gp, tp_gp, perc_team_g, perc_team_a, perc_team_tp, load_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                  ?16, ?17, ?18, ?19, ?20, ?21, ?22)",
        params![
            r.player_name,
            r.player_id as i64,
            r.shortname,
            r.position,
            r.team,
            r.team_id,
            r.league,
            r.season.to_string(),
            r.stage,
            r.gp,
            r.g,
            r.a,
            r.tp,
            r.pim,
            r.plus_minus,
            r.g_gp,
            r.a_gp,
            r.tp_gp,
            r.perc_team_g,
            r.perc_team_a,
            r.perc_team_tp,
            load_date,
        ],
    )
    .map_err(|e| db_error("insert skater_stats", e))?;
    Ok(())
}

fn insert_goalie(conn: &Connection, r: &GoalieRecord, load_date: &str) -> Result<(), AppError> {
    conn.execute(
        "INSERT INTO goalie_stats (
            player_name, player_id, shortname, team, team_id, league, season, stage,
            gp, gaa, sv_pct, load_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            r.player_name,
            r.player_id as i64,
            r.shortname,
            r.team,
            r.team_id,
            r.league,
            r.season.to_string(),
            r.stage,
            r.gp,
            r.gaa,
            r.sv_pct,
            load_date,
        ],
    )
    .map_err(|e| db_error("insert goalie_stats", e))?;
    Ok(())
}

fn insert_player_info(conn: &Connection, r: &PlayerInfo, load_date: &str) -> Result<(), AppError> {
    conn.execute(
        "INSERT INTO player_info (
            player_id, shortname, player_name, date_of_birth, place_of_birth, nation,
            position, shoots, height_cm, weight_kg, draft_year, draft_round, draft_pick,
            draft_team, rights_team, rights_status, draft_year_eligible, load_date
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)",
        params![
            r.player_id as i64,
            r.shortname,
            r.player_name,
            r.date_of_birth.map(|d| d.to_string()),
            r.place_of_birth,
            r.nation,
            r.position,
            r.shoots,
            r.height_cm,
            r.weight_kg,
            r.draft_year,
            r.draft_round,
            r.draft_pick,
            r.draft_team,
            r.rights_team,
            r.rights_status,
            r.draft_year_eligible,
            load_date,
        ],
    )
    .map_err(|e| db_error("insert player_info", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{REGULAR_SEASON, Table};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn skater(player_id: u64, season: Season) -> SkaterRecord {
        SkaterRecord {
            player_name: format!("Player {player_id}"),
            player_id,
            shortname: format!("player-{player_id}"),
            position: Some("C".to_string()),
            team: "Team".to_string(),
            team_id: 1,
            league: "NHL".to_string(),
            season,
            stage: REGULAR_SEASON.to_string(),
            gp: 10,
            g: 1,
            a: 2,
            tp: 3,
            pim: 0,
            plus_minus: 1,
            g_gp: Some(0.1),
            a_gp: Some(0.2),
            tp_gp: Some(0.3),
            perc_team_g: Some(1.0),
            perc_team_a: Some(1.0),
            perc_team_tp: Some(1.0),
        }
    }

    fn info(player_id: u64, eligible: Option<i32>) -> PlayerInfo {
        PlayerInfo {
            player_id,
            shortname: format!("player-{player_id}"),
            draft_year_eligible: eligible,
            ..PlayerInfo::default()
        }
    }

    #[test]
    fn appends_rows_with_load_date() {
        let mut store = Store::open_in_memory().unwrap();
        let tables = LoadedTables {
            skaters: vec![skater(1, Season::new(2019)), skater(2, Season::new(2019))],
            players: vec![info(1, Some(2015))],
            ..LoadedTables::default()
        };

        assert_eq!(store.append_tables(&tables, date(2020, 1, 1)).unwrap(), 3);
        assert_eq!(store.append_tables(&tables, date(2020, 1, 2)).unwrap(), 3);
        assert_eq!(store.row_count(Table::SkaterStats).unwrap(), 4);
        assert_eq!(store.row_count(Table::PlayerInfo).unwrap(), 2);

        let latest: String = store
            .conn
            .query_row("SELECT load_date FROM current_player_info WHERE player_id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(latest, "2020-01-02");
    }

    #[test]
    fn stale_players_only_current_season_and_old_rows() {
        let mut store = Store::open_in_memory().unwrap();
        let current = Season::new(2024);

        let stats = LoadedTables {
            skaters: vec![
                skater(1, current),
                skater(2, current),
                skater(3, current),
                skater(4, Season::new(2020)),
            ],
            ..LoadedTables::default()
        };
        store.append_tables(&stats, date(2024, 10, 1)).unwrap();

        let old_info = LoadedTables {
            players: vec![info(1, Some(2019)), info(2, None), info(4, Some(2021))],
            ..LoadedTables::default()
        };
        store.append_tables(&old_info, date(2024, 8, 1)).unwrap();

        let new_info = LoadedTables {
            players: vec![info(3, Some(2024))],
            ..LoadedTables::default()
        };
        store.append_tables(&new_info, date(2024, 10, 10)).unwrap();

        // 3 is fresh, 4 did not play this season, 2 sorts last (no eligibility year)
        let stale = store.stale_players(date(2024, 10, 15), None).unwrap();
        let ids: Vec<u64> = stale.iter().map(|p| p.player_id).collect();
        assert_eq!(ids, vec![1, 2]);

        let limited = store.stale_players(date(2024, 10, 15), Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }
}
