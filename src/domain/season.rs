//! Season labels (`2019-2020`) and the small amount of date arithmetic around them.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A hockey season identified by the calendar year it starts in.
///
/// Serialized as its label, e.g. `2019-2020`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Season {
    start_year: i32,
}

impl Season {
    pub fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    pub fn start_year(self) -> i32 {
        self.start_year
    }

    pub fn end_year(self) -> i32 {
        self.start_year + 1
    }

    /// The season in progress (or about to start) on `date`.
    ///
    /// August through December belong to the season starting that year;
    /// January through July to the one that started the year before.
    pub fn current(date: NaiveDate) -> Self {
        if date.month() >= 8 {
            Self::new(date.year())
        } else {
            Self::new(date.year() - 1)
        }
    }

    /// Inclusive range of seasons by start year.
    pub fn range(start_year: i32, end_year: i32) -> Vec<Season> {
        (start_year..=end_year).map(Season::new).collect()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start_year, self.start_year + 1)
    }
}

impl FromStr for Season {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::parse(format!("Invalid season label '{s}'. Expected YYYY-YYYY."));
        let (start, end) = s.trim().split_once('-').ok_or_else(invalid)?;
        let start: i32 = start.parse().map_err(|_| invalid())?;
        let end: i32 = end.parse().map_err(|_| invalid())?;
        if end != start + 1 {
            return Err(invalid());
        }
        Ok(Self::new(start))
    }
}

impl TryFrom<String> for Season {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Season> for String {
    fn from(value: Season) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trips_through_display_and_parse() {
        let season = Season::new(2019);
        assert_eq!(season.to_string(), "2019-2020");
        assert_eq!("2019-2020".parse::<Season>().unwrap(), season);
    }

    #[test]
    fn rejects_non_consecutive_years() {
        assert!("2019-2021".parse::<Season>().is_err());
        assert!("2019".parse::<Season>().is_err());
        assert!("abcd-efgh".parse::<Season>().is_err());
    }

    #[test]
    fn current_season_switches_in_august() {
        let july = NaiveDate::from_ymd_opt(2024, 7, 31).unwrap();
        let august = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        assert_eq!(Season::current(july), Season::new(2023));
        assert_eq!(Season::current(august), Season::new(2024));
    }

    #[test]
    fn range_is_inclusive() {
        let seasons = Season::range(2017, 2019);
        let labels: Vec<String> = seasons.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, vec!["2017-2018", "2018-2019", "2019-2020"]);
    }
}
