//! Command-line parsing for the stats loader.
//!
//! Argument parsing and command dispatch stay separate from retrieval and
//! normalization code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::OutputTarget;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ep", version, about = "Hockey standings, player stats and player bio loader")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load standings and player stats for a range of seasons (the default command).
    Load(LoadArgs),
    /// Re-run the league-seasons and players recorded in a failure file.
    Rerun(RerunArgs),
    /// Re-fetch player info that has gone stale in the database.
    Refresh(RefreshArgs),
}

#[derive(Debug, Args, Clone)]
pub struct LoadArgs {
    /// First season, by start year (2019 = 2019-2020).
    #[arg(short, long, default_value_t = 2024)]
    pub start: i32,

    /// Last season, by start year (inclusive).
    #[arg(short, long, default_value_t = 2024)]
    pub end: i32,

    /// League to load; repeat for several. Defaults to every known league.
    #[arg(short, long = "league")]
    pub leagues: Vec<String>,

    /// Skip player bio collection (slow when loading many seasons).
    #[arg(long)]
    pub no_player_info: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RerunArgs {
    /// Failure file written by a previous run (`data/failed_YYYY-MM-DD.json`).
    #[arg(long, value_name = "JSON")]
    pub failed: PathBuf,

    /// Skip player bio collection for the re-run seasons.
    #[arg(long)]
    pub no_player_info: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Debug, Args, Clone)]
pub struct RefreshArgs {
    /// Use the production database.
    #[arg(short, long)]
    pub prod: bool,

    /// Refresh at most this many players.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Directory for the failure file.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Where results go.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Write to the production database (reads `EP_PROD_DATABASE` instead of `EP_DEV_DATABASE`).
    #[arg(short, long)]
    pub prod: bool,

    /// Output target.
    #[arg(short, long, value_enum, default_value_t = OutputTarget::Csv)]
    pub output: OutputTarget,

    /// Directory for CSV files and failure files.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

/// How pages are fetched.
#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    /// Worker threads for player page fetches.
    #[arg(short, long, default_value_t = 1)]
    pub workers: usize,

    /// Delay before every request, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,
}
