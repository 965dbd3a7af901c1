//! Merging a fresh scan into existing progress

use std::collections::BTreeMap;

use super::groups::{GroupMember, GroupName, classify, order_members};
use crate::scanner::DiscoverableSet;

/// How existing values are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReconcileMode {
    /// Keep recorded values, fall back to the authoring default
    #[default]
    Preserve,
    /// Discard recorded values and restore every authoring default
    Reset,
}

/// A key that was not in the existing progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedKey {
    /// Scene key
    pub key: String,
    /// Group it was placed in
    pub group: GroupName,
    /// Authoring default it starts with
    pub default_value: bool,
}

/// Outcome of one reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Groups by name, members in write order; never holds an empty group
    pub groups: BTreeMap<GroupName, Vec<GroupMember>>,
    /// Keys new to the progress document, ascending
    pub added: Vec<AddedKey>,
    /// Keys dropped because their scene is gone, ascending
    pub removed: Vec<String>,
}

impl Reconciliation {
    /// Number of tracked scenes
    #[must_use]
    pub fn total_entities(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Look up the reconciled value of a key
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<bool> {
        self.groups
            .values()
            .flatten()
            .find(|member| member.key == key)
            .map(|member| member.value)
    }
}

/// Merges scanned scenes against existing progress
pub struct ProgressReconciler;

impl ProgressReconciler {
    /// Reconcile `defaults` (the fresh scan) against `existing` progress
    ///
    /// The scan decides which keys exist at all. In [`ReconcileMode::Preserve`]
    /// a key keeps its existing value when it has one; in
    /// [`ReconcileMode::Reset`] every key takes its authoring default. Added
    /// and removed keys are reported in both modes.
    #[must_use]
    pub fn reconcile(
        defaults: &DiscoverableSet,
        existing: &BTreeMap<String, bool>,
        mode: ReconcileMode,
    ) -> Reconciliation {
        let mut result = Reconciliation::default();

        for (key, entity) in defaults {
            let group = classify(key);
            let recorded = existing.get(key).copied();

            let value = match (mode, recorded) {
                (ReconcileMode::Preserve, Some(value)) => value,
                _ => entity.default_value,
            };

            if recorded.is_none() {
                result.added.push(AddedKey {
                    key: key.clone(),
                    group: group.clone(),
                    default_value: entity.default_value,
                });
            }

            result.groups.entry(group).or_default().push(GroupMember {
                key: key.clone(),
                value,
                is_root: entity.is_root,
            });
        }

        result.removed = existing
            .keys()
            .filter(|key| !defaults.contains_key(*key))
            .cloned()
            .collect();

        for members in result.groups.values_mut() {
            order_members(members);
        }

        result
    }
}
