//! # scenesync-core
//!
//! Core library for keeping deployed copies of a scene content tree in step
//! with the canonical source tree, and for keeping the persisted progress
//! document in step with the set of discoverable scenes.
//!
//! The crate is split the same way the workflow is:
//! - [`comparison`] and [`scanner`] hold the per-file policies
//! - [`sync`] mirrors a source tree into a destination root
//! - [`progress`] merges scanned scenes into the progress document
//! - [`deploy`] sequences the stages of a whole run

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;

/// Staleness policy and text diffs
pub mod comparison;

/// Exclusion rules and content tree scanning
pub mod scanner;

/// Configuration file parsing and management
pub mod config;

/// One-directional tree mirroring
pub mod sync;

/// Progress document and reconciliation
pub mod progress;

/// Multi-stage deployment runs
pub mod deploy;

/// Removable volume lookup
pub mod volume;
