//! Chain data loading
//!
//! Handles:
//! - JSON chain snapshots written by external fetchers

pub mod snapshot;

pub use snapshot::*;
