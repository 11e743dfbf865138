//! Player page facts → `PlayerInfo`.
//!
//! Every field is best-effort: a fact that is absent or does not match the
//! expected shape becomes a missing value, never an error.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::domain::{PlayerInfo, PlayerRef};
use crate::normalize::draft::draft_year_eligible;
use crate::normalize::values::clean_text;

static CENTIMETRES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,3})\s*cm").expect("cm pattern is valid"));
static FEET_INCHES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\d)\s*'\s*(\d{1,2})\s*(?:"|'')?"#).expect("feet pattern is valid"));
static KILOGRAMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,3})\s*kg").expect("kg pattern is valid"));
static POUNDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,3})\s*lbs?").expect("lbs pattern is valid"));
static DRAFTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{4})\s+round\s+(\d+)\s+#(\d+)\s+overall\s+by\s+(.+)").expect("draft pattern is valid")
});

const DATE_FORMATS: [&str; 4] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%d/%m/%Y"];

/// A parsed `Drafted` fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSelection {
    pub year: i32,
    pub round: u32,
    pub pick: u32,
    pub team: String,
}

/// Build a `PlayerInfo` from a page's facts, keyed by lowercase label.
pub fn player_info_from_facts(
    player: &PlayerRef,
    player_name: Option<String>,
    facts: &HashMap<String, String>,
) -> PlayerInfo {
    let fact = |label: &str| facts.get(label).and_then(|v| clean_text(v));

    let date_of_birth = fact("date of birth").and_then(|v| parse_birth_date(&v));
    let draft = fact("drafted").and_then(|v| parse_draft(&v));
    let (rights_team, rights_status) = fact("nhl rights").map(|v| parse_rights(&v)).unwrap_or((None, None));

    PlayerInfo {
        player_id: player.player_id,
        shortname: player.shortname.clone(),
        player_name,
        date_of_birth,
        place_of_birth: fact("place of birth"),
        nation: fact("nation"),
        position: fact("position"),
        shoots: fact("shoots").or_else(|| fact("catches")),
        height_cm: fact("height").and_then(|v| parse_height_cm(&v)),
        weight_kg: fact("weight").and_then(|v| parse_weight_kg(&v)),
        draft_year: draft.as_ref().map(|d| d.year),
        draft_round: draft.as_ref().map(|d| d.round),
        draft_pick: draft.as_ref().map(|d| d.pick),
        draft_team: draft.map(|d| d.team),
        rights_team,
        rights_status,
        draft_year_eligible: date_of_birth.map(draft_year_eligible),
    }
}

/// Height in centimetres from `185 cm`, `6'1" / 185 cm` or imperial-only `6'1"`.
pub fn parse_height_cm(raw: &str) -> Option<u32> {
    if let Some(caps) = CENTIMETRES.captures(raw) {
        return caps[1].parse().ok();
    }
    let caps = FEET_INCHES.captures(raw)?;
    let feet: f64 = caps[1].parse().ok()?;
    let inches: f64 = caps[2].parse().ok()?;
    Some(((feet * 12.0 + inches) * 2.54).round() as u32)
}

/// Weight in kilograms from `86 kg`, `190 lbs / 86 kg` or pounds only.
pub fn parse_weight_kg(raw: &str) -> Option<u32> {
    if let Some(caps) = KILOGRAMS.captures(raw) {
        return caps[1].parse().ok();
    }
    let caps = POUNDS.captures(raw)?;
    let lbs: f64 = caps[1].parse().ok()?;
    Some((lbs * 0.453_592_37).round() as u32)
}

pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// `2015 round 1 #1 overall by Edmonton Oilers`.
pub fn parse_draft(raw: &str) -> Option<DraftSelection> {
    let caps = DRAFTED.captures(raw)?;
    Some(DraftSelection {
        year: caps[1].parse().ok()?,
        round: caps[2].parse().ok()?,
        pick: caps[3].parse().ok()?,
        team: caps[4].trim().to_string(),
    })
}

/// `Edmonton Oilers / Signed` → team and status; either side may be absent.
pub fn parse_rights(raw: &str) -> (Option<String>, Option<String>) {
    match raw.split_once('/') {
        Some((team, status)) => (clean_text(team), clean_text(status)),
        None => (clean_text(raw), None),
    }
}
