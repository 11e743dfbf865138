//! Export normalized tables to CSV.
//!
//! One file per table, `{data_dir}/{table}_{YYYY-MM-DD}.csv`. A second run on
//! the same day (e.g. a rerun of failures) appends to that day's files.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;
use serde::Serialize;

use crate::domain::{LoadedTables, Table};
use crate::error::AppError;

pub fn table_path(data_dir: &Path, table: Table, date: NaiveDate) -> PathBuf {
    data_dir.join(format!("{}_{}.csv", table.name(), date.format("%Y-%m-%d")))
}

/// Write rows with a header derived from the record's field names.
///
/// An existing file is appended to without repeating the header.
pub fn write_table_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), AppError> {
    let exists = path.exists();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::config(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let mut writer = csv::WriterBuilder::new().has_headers(!exists).from_writer(file);

    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::config(format!("Failed to write CSV row to '{}': {e}", path.display())))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::config(format!("Failed to flush CSV '{}': {e}", path.display())))?;
    Ok(())
}

/// Write every non-empty table; returns the paths written.
pub fn write_tables_csv(data_dir: &Path, tables: &LoadedTables, date: NaiveDate) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(data_dir)
        .map_err(|e| AppError::config(format!("Failed to create '{}': {e}", data_dir.display())))?;

    let mut written = Vec::new();
    for table in Table::ALL {
        if tables.row_count(table) == 0 {
            info!("{}: no rows, skipping CSV", table.name());
            continue;
        }
        let path = table_path(data_dir, table, date);
        match table {
            Table::TeamStandings => write_table_csv(&path, &tables.standings)?,
            Table::SkaterStats => write_table_csv(&path, &tables.skaters)?,
            Table::GoalieStats => write_table_csv(&path, &tables.goalies)?,
            Table::PlayerInfo => write_table_csv(&path, &tables.players)?,
        }
        info!("{}: {} rows -> {}", table.name(), tables.row_count(table), path.display());
        written.push(path);
    }
    Ok(written)
}
