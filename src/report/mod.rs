//! Run summary printed at the end of a load.

use crate::app::pipeline::RunOutput;
use crate::domain::{LoadConfig, Table};

pub fn format_load_summary(run: &RunOutput, config: &LoadConfig) -> String {
    let mut out = String::new();

    out.push_str("=== ep - load summary ===\n");
    out.push_str(&format!("Load date: {}\n", config.load_date));
    out.push_str(&format!(
        "League-seasons: {} requested, {} failed\n",
        config.units.len(),
        run.failures.seasons.len()
    ));

    out.push_str("\nRows:\n");
    for table in Table::ALL {
        out.push_str(&format!("  {:<16} {:>8}\n", table.name(), run.tables.row_count(table)));
    }

    if !run.failures.is_empty() {
        out.push_str("\nFailures:\n");
        for f in &run.failures.seasons {
            out.push_str(&format!("  {} {}: {}\n", f.unit.league, f.unit.season, f.reason));
        }
        if !run.failures.players.is_empty() {
            out.push_str(&format!("  {} player page(s) failed\n", run.failures.players.len()));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{FailedSeason, FailedUnits, LoadUnit, LoadedTables, OutputTarget, PlayerInfo, Season};

    #[test]
    fn summary_lists_counts_and_failures() {
        let unit = LoadUnit {
            league: "OHL".to_string(),
            season: Season::new(2010),
        };
        let config = LoadConfig {
            units: vec![unit.clone()],
            extra_players: Vec::new(),
            collect_player_info: true,
            output: OutputTarget::Csv,
            prod: false,
            workers: 1,
            delay_ms: 0,
            data_dir: PathBuf::from("data"),
            load_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        let run = RunOutput {
            tables: LoadedTables {
                players: vec![PlayerInfo::default()],
                ..LoadedTables::default()
            },
            failures: FailedUnits {
                seasons: vec![FailedSeason {
                    unit,
                    reason: "timed out".to_string(),
                }],
                players: Vec::new(),
            },
        };

        let text = format_load_summary(&run, &config);
        assert!(text.contains("Load date: 2024-03-01"));
        assert!(text.contains("1 requested, 1 failed"));
        assert!(text.contains("player_info"));
        assert!(text.contains("OHL 2010-2011: timed out"));
    }
}
