//! Progress document reconciliation
//!
//! The data root decides which scenes exist. The progress document records
//! which of them the player has discovered. Each run scans the data root,
//! merges the result into the document's groups and writes it back:
//! - `groups`: pure key to group classification and member ordering
//! - `document`: parsing, group detection and atomic persistence
//! - `reconciler`: the Preserve/Reset merge
//! - `updater`: one full scan, merge and write pass

mod document;
mod groups;
mod reconciler;
mod reporting;
mod updater;

#[cfg(test)]
mod integration_tests;

pub use document::ProgressDocument;
pub use groups::{GroupMember, GroupName, ROOT_LEVEL_GROUP, classify, member_order, order_members};
pub use reconciler::{AddedKey, ProgressReconciler, ReconcileMode, Reconciliation};
pub use reporting::ProgressReporter;
pub use updater::{ProgressUpdate, ProgressUpdater};
