//! Failed-unit files.
//!
//! When any league-season or player fails, the run records it as JSON so the
//! exact same units can be retried later with `ep rerun --failed <file>`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::domain::FailedUnits;
use crate::error::AppError;

pub fn failed_path(data_dir: &Path, date: NaiveDate) -> PathBuf {
    data_dir.join(format!("failed_{}.json", date.format("%Y-%m-%d")))
}

pub fn write_failed_json(path: &Path, failed: &FailedUnits) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::config(format!("Failed to create '{}': {e}", parent.display())))?;
    }
    let file = File::create(path)
        .map_err(|e| AppError::config(format!("Failed to create failure file '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, failed)
        .map_err(|e| AppError::config(format!("Failed to write failure file: {e}")))?;
    Ok(())
}

pub fn read_failed_json(path: &Path) -> Result<FailedUnits, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::config(format!("Failed to open failure file '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::parse(format!("Invalid failure file: {e}")))
}
