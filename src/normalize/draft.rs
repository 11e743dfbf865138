//! Draft eligibility from a birth date.
//!
//! A player is first eligible for the entry draft held in the year they turn
//! 18, provided they are 18 by September 15 of that year; otherwise they are
//! eligible the following year.

use chrono::{Datelike, NaiveDate};

const CUTOFF_MONTH: u32 = 9;
const CUTOFF_DAY: u32 = 15;
const DRAFT_AGE: i32 = 18;

/// First draft-eligible year for a player born on `birth`.
pub fn draft_year_eligible(birth: NaiveDate) -> i32 {
    let draft_year = birth.year() + DRAFT_AGE;
    let Some(cutoff) = NaiveDate::from_ymd_opt(draft_year, CUTOFF_MONTH, CUTOFF_DAY) else {
        return draft_year + 1;
    };
    if age_in_years(birth, cutoff) >= DRAFT_AGE as f64 {
        draft_year
    } else {
        draft_year + 1
    }
}

/// Age in fractional years on `on`: whole years plus the elapsed share of the
/// current year of life.
pub fn age_in_years(birth: NaiveDate, on: NaiveDate) -> f64 {
    let mut years = on.year() - birth.year();
    if anniversary(birth, on.year()) > on {
        years -= 1;
    }
    let last = anniversary(birth, birth.year() + years);
    let next = anniversary(birth, birth.year() + years + 1);
    let span = (next - last).num_days() as f64;
    let elapsed = (on - last).num_days() as f64;
    years as f64 + elapsed / span
}

/// Birthday in `year`; Feb 29 birthdays fall on Mar 1 in common years.
fn anniversary(birth: NaiveDate, year: i32) -> NaiveDate {
    birth
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(birth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn september_fifteenth_boundary() {
        assert_eq!(draft_year_eligible(date(2000, 9, 15)), 2018);
        assert_eq!(draft_year_eligible(date(2000, 9, 16)), 2019);
    }

    #[test]
    fn early_and_late_births() {
        assert_eq!(draft_year_eligible(date(1997, 1, 13)), 2015);
        assert_eq!(draft_year_eligible(date(1999, 12, 31)), 2018);
    }

    #[test]
    fn leap_day_birth() {
        assert_eq!(draft_year_eligible(date(2004, 2, 29)), 2022);
    }

    #[test]
    fn fractional_age() {
        let birth = date(2000, 3, 15);
        assert!((age_in_years(birth, date(2018, 3, 15)) - 18.0).abs() < 1e-12);
        let half = age_in_years(birth, date(2018, 9, 14));
        assert!(half > 18.49 && half < 18.51, "got {half}");
        assert!(age_in_years(birth, date(2018, 3, 14)) < 18.0);
    }
}
