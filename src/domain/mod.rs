//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - season labels (`Season`)
//! - raw page rows and normalized output records
//! - run configuration and failure bookkeeping

pub mod season;
pub mod types;

pub use season::*;
pub use types::*;
