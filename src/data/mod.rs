//! Retrieval from the stats website.
//!
//! - `client`: HTTP fetching behind the `PageSource` trait
//! - `standings`, `team_stats`, `player`: URL builders and page parsers
//!
//! Parsers return raw rows; typing and derived metrics live in `normalize`.

pub mod client;
pub mod html;
pub mod player;
pub mod standings;
pub mod team_stats;

#[cfg(test)]
pub(crate) mod fixtures;

pub use client::{BASE_URL, EpClient, PageSource};
pub use player::{parse_player_page, player_url};
pub use standings::{parse_standings, standings_url};
pub use team_stats::{parse_team_stats, team_stats_url_for};
