//! Group classification and member ordering

use std::cmp::Ordering;

/// Name of a group field in the progress document
pub type GroupName = String;

/// Group for scenes that sit directly in the data root
pub const ROOT_LEVEL_GROUP: &str = "discovered";

/// One entry of a group, in write order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    /// Scene key
    pub key: String,
    /// Current discovered value
    pub value: bool,
    /// Whether the scene sorts first
    pub is_root: bool,
}

/// Derive the group a scene key belongs to
///
/// The first key segment selects a scheme and the second names the group
/// inside it, so `/LOCATIONS/DESK/A.json` lands in `desk_locations` and
/// `/NOTES/AVERY/N1.json` in `avery_notes`. A document directly inside a
/// scheme directory belongs to the scheme's own group; one at the data root
/// belongs to [`ROOT_LEVEL_GROUP`].
#[must_use]
pub fn classify(key: &str) -> GroupName {
    let segments: Vec<&str> = key.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [scheme, group, _, ..] => format!("{}_{}", normalize(group), normalize(scheme)),
        [scheme, _] => normalize(scheme),
        _ => ROOT_LEVEL_GROUP.to_string(),
    }
}

fn normalize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Root scenes first, then ascending key
#[must_use]
pub fn member_order(a: &GroupMember, b: &GroupMember) -> Ordering {
    b.is_root.cmp(&a.is_root).then_with(|| a.key.cmp(&b.key))
}

/// Sort a group's members into write order
pub fn order_members(members: &mut [GroupMember]) {
    members.sort_by(member_order);
}
