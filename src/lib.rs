//! `ep-data-loader` library crate.
//!
//! The binary (`ep`) is a thin wrapper around this library so that:
//!
//! - page parsing and normalization are testable without network access
//! - the pipeline can run against fixture pages instead of the live site

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod normalize;
pub mod report;
