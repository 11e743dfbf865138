//! Shared domain types.
//!
//! Output records are flat and serializable so the same struct can be:
//!
//! - written as a CSV row (field names are the column names)
//! - appended to the relational store
//! - compared in tests

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::Season;

/// Leagues the loader has been exercised against.
pub const DEFAULT_LEAGUES: [&str; 23] = [
    "NHL",
    "NLA",
    "USHL",
    "BCHL",
    "SJHL",
    "AHL",
    "SuperElit",
    "WHL",
    "CCHL",
    "Jr. A SM-liiga",
    "OHL",
    "MHL",
    "SHL",
    "NCAA",
    "Liiga",
    "Allsvenskan",
    "QMJHL",
    "AJHL",
    "OJHL",
    "KHL",
    "VHL",
    "Czech",
    "Czech2",
];

/// Stage label used when a stats table does not name its stage.
pub const REGULAR_SEASON: &str = "Regular Season";

/// Where normalized tables are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// `{table}_{YYYY-MM-DD}.csv` files under the data directory.
    Csv,
    /// Append to the SQLite database named by the environment.
    Db,
}

/// Logical output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    TeamStandings,
    SkaterStats,
    GoalieStats,
    PlayerInfo,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::TeamStandings,
        Table::SkaterStats,
        Table::GoalieStats,
        Table::PlayerInfo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Table::TeamStandings => "team_standings",
            Table::SkaterStats => "skater_stats",
            Table::GoalieStats => "goalie_stats",
            Table::PlayerInfo => "player_info",
        }
    }
}

/// One league-season: the unit of retrieval and of failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadUnit {
    pub league: String,
    pub season: Season,
}

/// A player as referenced from a stats table (`/player/{id}/{shortname}`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerRef {
    pub player_id: u64,
    pub shortname: String,
}

/// Keys shared by every row of one team's stats page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamContext {
    pub league: String,
    pub season: Season,
    pub team: String,
    pub team_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub team: String,
    pub team_id: u32,
    pub team_shortname: String,
    pub league: String,
    pub season: Season,
    pub gp: u32,
    pub w: u32,
    pub t: u32,
    pub l: u32,
    pub otw: u32,
    pub otl: u32,
    pub gf: u32,
    pub ga: u32,
    pub tp: u32,
}

/// A skater table row exactly as it appeared on the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSkaterRow {
    /// Name cell text, usually `Name (POS)`.
    pub name_cell: String,
    pub player_href: Option<String>,
    pub gp: String,
    pub g: String,
    pub a: String,
    pub tp: String,
    pub pim: String,
    pub plus_minus: String,
}

/// A goalie table row exactly as it appeared on the page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawGoalieRow {
    pub name_cell: String,
    pub player_href: Option<String>,
    pub gp: String,
    pub gaa: String,
    pub sv_pct: String,
}

/// One stats table of a team page, tagged with its season stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawListing<T> {
    pub stage: String,
    pub rows: Vec<T>,
}

/// Everything parsed from one team stats page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TeamStatsPage {
    pub skaters: Vec<RawListing<RawSkaterRow>>,
    pub goalies: Vec<RawListing<RawGoalieRow>>,
}

/// One skater's line for a team-season-stage, with derived rates.
///
/// A derived field is empty when its value is not finite (e.g. a goal share
/// on a team that scored no goals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkaterRecord {
    pub player_name: String,
    pub player_id: u64,
    pub shortname: String,
    pub position: Option<String>,
    pub team: String,
    pub team_id: u32,
    pub league: String,
    pub season: Season,
    pub stage: String,
    pub gp: u32,
    pub g: u32,
    pub a: u32,
    pub tp: u32,
    pub pim: u32,
    pub plus_minus: i32,
    pub g_gp: Option<f64>,
    pub a_gp: Option<f64>,
    pub tp_gp: Option<f64>,
    pub perc_team_g: Option<f64>,
    pub perc_team_a: Option<f64>,
    pub perc_team_tp: Option<f64>,
}

impl SkaterRecord {
    pub fn player_ref(&self) -> PlayerRef {
        PlayerRef {
            player_id: self.player_id,
            shortname: self.shortname.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalieRecord {
    pub player_name: String,
    pub player_id: u64,
    pub shortname: String,
    pub team: String,
    pub team_id: u32,
    pub league: String,
    pub season: Season,
    pub stage: String,
    pub gp: u32,
    pub gaa: Option<f64>,
    pub sv_pct: Option<f64>,
}

impl GoalieRecord {
    pub fn player_ref(&self) -> PlayerRef {
        PlayerRef {
            player_id: self.player_id,
            shortname: self.shortname.clone(),
        }
    }
}

/// Biographical facts from a player page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub player_id: u64,
    pub shortname: String,
    pub player_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub place_of_birth: Option<String>,
    pub nation: Option<String>,
    pub position: Option<String>,
    pub shoots: Option<String>,
    pub height_cm: Option<u32>,
    pub weight_kg: Option<u32>,
    pub draft_year: Option<i32>,
    pub draft_round: Option<u32>,
    pub draft_pick: Option<u32>,
    pub draft_team: Option<String>,
    pub rights_team: Option<String>,
    pub rights_status: Option<String>,
    /// First entry draft the player may be selected in.
    pub draft_year_eligible: Option<i32>,
}

/// All normalized tables produced by a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedTables {
    pub standings: Vec<TeamStanding>,
    pub skaters: Vec<SkaterRecord>,
    pub goalies: Vec<GoalieRecord>,
    pub players: Vec<PlayerInfo>,
}

impl LoadedTables {
    pub fn row_count(&self, table: Table) -> usize {
        match table {
            Table::TeamStandings => self.standings.len(),
            Table::SkaterStats => self.skaters.len(),
            Table::GoalieStats => self.goalies.len(),
            Table::PlayerInfo => self.players.len(),
        }
    }

    /// Unique players referenced by the skater and goalie tables, sorted by id.
    pub fn player_refs(&self) -> Vec<PlayerRef> {
        let mut refs: Vec<PlayerRef> = self
            .skaters
            .iter()
            .map(SkaterRecord::player_ref)
            .chain(self.goalies.iter().map(GoalieRecord::player_ref))
            .collect();
        refs.sort();
        refs.dedup_by_key(|r| r.player_id);
        refs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSeason {
    #[serde(flatten)]
    pub unit: LoadUnit,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPlayer {
    #[serde(flatten)]
    pub player: PlayerRef,
    pub reason: String,
}

/// Units that failed during a run; persisted so they can be re-run later.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FailedUnits {
    #[serde(default)]
    pub seasons: Vec<FailedSeason>,
    #[serde(default)]
    pub players: Vec<FailedPlayer>,
}

impl FailedUnits {
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty() && self.players.is_empty()
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and, for reruns, a failure file).
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub units: Vec<LoadUnit>,
    /// Players to fetch info for in addition to those found in stats tables.
    pub extra_players: Vec<PlayerRef>,
    pub collect_player_info: bool,
    pub output: OutputTarget,
    pub prod: bool,
    pub workers: usize,
    pub delay_ms: u64,
    pub data_dir: PathBuf,
    /// Date stamped on output files and store rows.
    pub load_date: NaiveDate,
}

impl LoadConfig {
    /// Cartesian product of leagues and seasons, league-major.
    pub fn plan_units(leagues: &[String], seasons: &[Season]) -> Vec<LoadUnit> {
        leagues
            .iter()
            .flat_map(|league| {
                seasons.iter().map(move |season| LoadUnit {
                    league: league.clone(),
                    season: *season,
                })
            })
            .collect()
    }
}
