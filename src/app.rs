//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the load configuration
//! - runs the load pipeline
//! - writes tables and failure files
//! - prints the run summary

use std::path::Path;

use chrono::{Local, NaiveDate};
use clap::Parser;
use log::{info, warn};

use crate::cli::{Command, LoadArgs, RefreshArgs, RerunArgs};
use crate::domain::{DEFAULT_LEAGUES, FailedUnits, LoadConfig, LoadedTables, OutputTarget, Season};
use crate::error::AppError;
use crate::io::{Store, StoreConfig};

pub mod pipeline;

/// Entry point for the `ep` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // `ep` and `ep -s 2019 ...` behave like `ep load ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let today = Local::now().date_naive();

    match cli.command {
        Command::Load(args) => handle_load(&args, today),
        Command::Rerun(args) => handle_rerun(&args, today),
        Command::Refresh(args) => handle_refresh(&args, today),
    }
}

fn handle_load(args: &LoadArgs, today: NaiveDate) -> Result<(), AppError> {
    let config = load_config_from_args(args, today)?;
    execute(&config)
}

fn handle_rerun(args: &RerunArgs, today: NaiveDate) -> Result<(), AppError> {
    let failed = crate::io::read_failed_json(&args.failed)?;
    let config = rerun_config_from_failures(args, &failed, today);
    if config.units.is_empty() && config.extra_players.is_empty() {
        info!("nothing to re-run in {}", args.failed.display());
        return Ok(());
    }
    execute(&config)
}

fn handle_refresh(args: &RefreshArgs, today: NaiveDate) -> Result<(), AppError> {
    let store_config = StoreConfig::from_env(args.prod)?;
    let mut store = Store::open(&store_config.path)?;

    let players = store.stale_players(today, args.limit)?;
    if players.is_empty() {
        info!("no stale player info");
        return Ok(());
    }
    info!("{} players with stale info", players.len());

    let client = crate::data::EpClient::new(args.fetch.delay_ms)?;
    let (infos, failed) = pipeline::fetch_player_infos(&client, &players, args.fetch.workers)?;

    let tables = LoadedTables {
        players: infos,
        ..LoadedTables::default()
    };
    let inserted = store.append_tables(&tables, today)?;
    info!("appended {inserted} rows to {}", store_config.path.display());

    let failures = FailedUnits {
        seasons: Vec::new(),
        players: failed,
    };
    write_failures(&args.data_dir, &failures, today)
}

fn execute(config: &LoadConfig) -> Result<(), AppError> {
    let run = pipeline::run_load(config)?;
    write_outputs(config, &run.tables)?;
    write_failures(&config.data_dir, &run.failures, config.load_date)?;

    println!("{}", crate::report::format_load_summary(&run, config));
    Ok(())
}

fn write_outputs(config: &LoadConfig, tables: &LoadedTables) -> Result<(), AppError> {
    match config.output {
        OutputTarget::Csv => {
            for path in crate::io::write_tables_csv(&config.data_dir, tables, config.load_date)? {
                info!("wrote {}", path.display());
            }
        }
        OutputTarget::Db => {
            let store_config = StoreConfig::from_env(config.prod)?;
            let mut store = Store::open(&store_config.path)?;
            let inserted = store.append_tables(tables, config.load_date)?;
            info!("appended {inserted} rows to {}", store_config.path.display());
        }
    }
    Ok(())
}

fn write_failures(data_dir: &Path, failures: &FailedUnits, date: NaiveDate) -> Result<(), AppError> {
    if failures.is_empty() {
        return Ok(());
    }
    let path = crate::io::failed_path(data_dir, date);
    crate::io::write_failed_json(&path, failures)?;
    warn!(
        "{} league-season(s) and {} player(s) failed; re-run with `ep rerun --failed {}`",
        failures.seasons.len(),
        failures.players.len(),
        path.display()
    );
    Ok(())
}

pub fn load_config_from_args(args: &LoadArgs, today: NaiveDate) -> Result<LoadConfig, AppError> {
    if args.start > args.end {
        return Err(AppError::config(format!(
            "Start season {} is after end season {}.",
            args.start, args.end
        )));
    }

    let leagues: Vec<String> = if args.leagues.is_empty() {
        DEFAULT_LEAGUES.iter().map(|l| l.to_string()).collect()
    } else {
        args.leagues.iter().map(|l| l.trim().to_string()).collect()
    };
    let seasons = Season::range(args.start, args.end);

    Ok(LoadConfig {
        units: LoadConfig::plan_units(&leagues, &seasons),
        extra_players: Vec::new(),
        collect_player_info: !args.no_player_info,
        output: args.output.output,
        prod: args.output.prod,
        workers: args.fetch.workers,
        delay_ms: args.fetch.delay_ms,
        data_dir: args.output.data_dir.clone(),
        load_date: today,
    })
}

pub fn rerun_config_from_failures(args: &RerunArgs, failed: &FailedUnits, today: NaiveDate) -> LoadConfig {
    LoadConfig {
        units: failed.seasons.iter().map(|f| f.unit.clone()).collect(),
        extra_players: failed.players.iter().map(|f| f.player.clone()).collect(),
        collect_player_info: !args.no_player_info,
        output: args.output.output,
        prod: args.output.prod,
        workers: args.fetch.workers,
        delay_ms: args.fetch.delay_ms,
        data_dir: args.output.data_dir.clone(),
        load_date: today,
    }
}

/// Rewrite argv so `ep` defaults to `ep load`.
///
/// Rules:
/// - `ep`                      -> `ep load`
/// - `ep -s 2019 ...`          -> `ep load -s 2019 ...`
/// - `ep --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("load".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "load" | "rerun" | "refresh");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "load".to_string());
        return argv;
    }

    argv
}
