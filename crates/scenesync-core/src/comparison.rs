//! File comparison for one-directional sync
//!
//! This module provides read-only analysis used before any copy:
//! - Size/modification-time snapshots of source and destination files
//! - The staleness rule deciding whether a destination copy is out of date
//! - Text diffs for previewing document rewrites

mod diff;
mod staleness;

pub use diff::DiffGenerator;
pub use staleness::{FileRecord, StalenessPolicy};
