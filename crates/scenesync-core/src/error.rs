//! Core error types for the scenesync library

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Conditions that make a whole run unsafe to start.
///
/// These abort before any mutation. Callers can tell them apart from
/// ordinary failures with `anyhow::Error::downcast_ref`.
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// A source root the run cannot do without is absent
    #[error("required source root not found: {}", path.display())]
    MissingSource {
        /// The missing root
        path: PathBuf,
    },

    /// No mounted volume carries the expected label
    #[error("could not find a volume labelled '{label}'")]
    VolumeNotFound {
        /// Label that was searched for
        label: String,
    },

    /// A setting with no default was never provided
    #[error("'{setting}' is not configured")]
    NotConfigured {
        /// Name of the setting as it appears in the config file
        setting: &'static str,
    },

    /// The existing progress document cannot be parsed; overwriting it would lose progress
    #[error("progress document is malformed and was left untouched: {}: {reason}", path.display())]
    MalformedProgressDocument {
        /// Document path
        path: PathBuf,
        /// Parser message
        reason: String,
    },
}
