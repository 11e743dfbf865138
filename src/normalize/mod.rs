//! Turning raw page rows into typed records.
//!
//! - `values`: cell coercion (`-` placeholders, signs, ratios, URL ids)
//! - `skaters` / `goalies`: per-team listings → records (+ derived rates)
//! - `bio`: player page facts → `PlayerInfo` fields
//! - `draft`: first draft-eligible year from a birth date
//!
//! Nothing here performs IO.

pub mod bio;
pub mod draft;
pub mod goalies;
pub mod skaters;
pub mod values;

pub use draft::draft_year_eligible;
pub use goalies::normalize_goalies;
pub use skaters::normalize_skaters;
