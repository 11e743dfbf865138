//! Input/output helpers.
//!
//! - table exports to dated CSV files (`export`)
//! - append-only relational store (`store`)
//! - failed-unit files for reruns (`failed`)

pub mod export;
pub mod failed;
pub mod store;

pub use export::*;
pub use failed::*;
pub use store::*;
