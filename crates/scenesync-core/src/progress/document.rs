//! The persisted progress document
//!
//! The document is a JSON object. A top-level field whose value is a
//! non-empty object keyed only by scene keys (`/`-rooted paths) is a group
//! field; every other field is carried through untouched.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;
use tracing::warn;

use super::groups::{GroupMember, GroupName};
use crate::error::{PreconditionError, Result};

/// In-memory progress document with stable field order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressDocument {
    fields: Map<String, Value>,
}

impl ProgressDocument {
    /// An empty document
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse document text
    ///
    /// # Errors
    ///
    /// Returns the parser message if the text is not JSON or its top level
    /// is not an object.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(_) => Err("top level is not an object".to_string()),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Load a document, treating a missing file as empty
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or a
    /// [`PreconditionError::MalformedProgressDocument`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        match Self::read_text(path)? {
            Some(text) => Self::parse_at(path, &text),
            None => Ok(Self::new()),
        }
    }

    /// Raw document text, or `None` if the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn read_text(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| {
                format!("Failed to read progress document: {}", path.display())
            }),
        }
    }

    /// Parse text read from `path`
    ///
    /// # Errors
    ///
    /// Returns a [`PreconditionError::MalformedProgressDocument`] naming
    /// `path` if the text does not parse.
    pub fn parse_at(path: &Path, text: &str) -> Result<Self> {
        Self::parse(text).map_err(|reason| {
            PreconditionError::MalformedProgressDocument {
                path: path.to_path_buf(),
                reason,
            }
            .into()
        })
    }

    /// Every grouped key with its current value, as one mapping
    ///
    /// A key found in more than one group keeps `true` if any copy is true,
    /// so discovered progress survives a corrupted grouping. Non-boolean
    /// members are dropped with a warning; the rest of their group is kept.
    #[must_use]
    pub fn flatten(&self) -> BTreeMap<String, bool> {
        let mut flat = BTreeMap::new();

        for (group, value) in &self.fields {
            let Some(members) = group_members(value) else {
                continue;
            };

            for (key, member) in members {
                let Some(member) = member.as_bool() else {
                    warn!("Ignoring non-boolean progress value for {key} in {group}: {member}");
                    continue;
                };
                match flat.get_mut(key) {
                    Some(current) => {
                        warn!("Progress key {key} appears in more than one group (again in {group})");
                        *current |= member;
                    }
                    None => {
                        flat.insert(key.clone(), member);
                    }
                }
            }
        }

        flat
    }

    /// Non-group fields, in document order
    pub fn pass_through(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields
            .iter()
            .filter(|(_, value)| group_members(value).is_none())
    }

    /// A copy of this document with its group fields replaced
    ///
    /// Pass-through fields keep their order and come first, then `groups`
    /// in ascending name order with members in the order given. A
    /// pass-through field sharing a name with a new group is replaced by it.
    #[must_use]
    pub fn with_groups(&self, groups: &BTreeMap<GroupName, Vec<GroupMember>>) -> Self {
        let mut fields = Map::new();

        for (name, value) in self.pass_through() {
            if groups.get(name).is_some_and(|members| !members.is_empty()) {
                warn!("Field {name} is replaced by the progress group of the same name");
                continue;
            }
            fields.insert(name.clone(), value.clone());
        }

        for (name, members) in groups {
            if members.is_empty() {
                continue;
            }
            let group: Map<String, Value> = members
                .iter()
                .map(|m| (m.key.clone(), Value::Bool(m.value)))
                .collect();
            fields.insert(name.clone(), Value::Object(group));
        }

        Self { fields }
    }

    /// Serialize with two-space indentation and a trailing newline
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        let mut text =
            serde_json::to_string_pretty(&self.fields).context("Failed to serialize progress")?;
        text.push('\n');
        Ok(text)
    }

    /// Write the document atomically
    ///
    /// The text goes to a temporary file beside `path`, is flushed to disk
    /// and then renamed over the target, so a crash leaves either the old
    /// or the new document.
    ///
    /// # Errors
    ///
    /// Returns an error if any filesystem operation fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_json_string()?;
        write_atomic(path, text.as_bytes())
    }
}

/// Scene keys are `/`-rooted paths below the data root
fn is_scene_key(key: &str) -> bool {
    key.starts_with('/')
}

/// Members of a group field, or `None` for a pass-through field
fn group_members(value: &Value) -> Option<&Map<String, Value>> {
    value
        .as_object()
        .filter(|map| !map.is_empty() && map.keys().all(|key| is_scene_key(key)))
}

fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in: {}", parent.display()))?;

    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .with_context(|| format!("Failed to write temporary file for: {}", path.display()))?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn member(key: &str, value: bool, is_root: bool) -> GroupMember {
        GroupMember {
            key: key.to_string(),
            value,
            is_root,
        }
    }

    #[test]
    fn test_load_missing_is_empty() {
        let tmp = TempDir::new().unwrap();

        let doc = ProgressDocument::load(&tmp.path().join("Game_State.json")).unwrap();

        assert_eq!(doc, ProgressDocument::new());
        assert!(doc.flatten().is_empty());
    }

    #[test]
    fn test_load_malformed_is_precondition_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Game_State.json");
        fs::write(&path, "{ \"discovered\": ").unwrap();

        let err = ProgressDocument::load(&path).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<PreconditionError>(),
            Some(PreconditionError::MalformedProgressDocument { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(ProgressDocument::parse("[1, 2]").is_err());
        assert!(ProgressDocument::parse("true").is_err());
        assert!(ProgressDocument::parse("{}").is_ok());
    }

    #[test]
    fn test_group_detection() {
        let doc = ProgressDocument::parse(
            r#"{
                "currentMode": "explore",
                "currentLocation": "/LOCATIONS/DESK/A.json",
                "discovered": {"/A.json": true},
                "desk_locations": {"/LOCATIONS/DESK/A.json": false},
                "settings": {"musicOn": true},
                "volume": {"level": 3},
                "mixed": {"/x.json": true, "count": 2},
                "empty": {}
            }"#,
        )
        .unwrap();

        let pass: Vec<&str> = doc.pass_through().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            pass,
            vec!["currentMode", "currentLocation", "settings", "volume", "mixed", "empty"]
        );

        let flat = doc.flatten();
        let keys: Vec<&str> = flat.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["/A.json", "/LOCATIONS/DESK/A.json"]);
    }

    #[test]
    fn test_flatten_skips_non_boolean_members() {
        let doc = ProgressDocument::parse(
            r#"{
                "desk_locations": {
                    "/LOCATIONS/DESK/A.json": true,
                    "/LOCATIONS/DESK/B.json": null,
                    "/LOCATIONS/DESK/C.json": "yes"
                }
            }"#,
        )
        .unwrap();

        let flat = doc.flatten();

        assert_eq!(flat.len(), 1);
        assert!(flat["/LOCATIONS/DESK/A.json"]);
        assert_eq!(doc.pass_through().count(), 0);
    }

    #[test]
    fn test_flatten_merges_duplicates_with_or() {
        let doc = ProgressDocument::parse(
            r#"{
                "discovered": {"/LOCATIONS/DESK/A.json": true, "/B.json": false},
                "desk_locations": {"/LOCATIONS/DESK/A.json": false}
            }"#,
        )
        .unwrap();

        let flat = doc.flatten();

        assert_eq!(flat.len(), 2);
        assert!(flat["/LOCATIONS/DESK/A.json"]);
        assert!(!flat["/B.json"]);
    }

    #[test]
    fn test_with_groups_layout() {
        let doc = ProgressDocument::parse(
            r#"{
                "discovered": {"/old.json": true},
                "currentMode": "explore",
                "currentNote": null
            }"#,
        )
        .unwrap();

        let mut groups = BTreeMap::new();
        groups.insert(
            "desk_locations".to_string(),
            vec![
                member("/LOCATIONS/DESK/B.json", true, true),
                member("/LOCATIONS/DESK/A.json", false, false),
            ],
        );
        groups.insert("avery_notes".to_string(), Vec::new());

        let text = doc.with_groups(&groups).to_json_string().unwrap();

        let expected = "{\n  \"currentMode\": \"explore\",\n  \"currentNote\": null,\n  \"desk_locations\": {\n    \"/LOCATIONS/DESK/B.json\": true,\n    \"/LOCATIONS/DESK/A.json\": false\n  }\n}\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_with_groups_replaces_colliding_field_only_when_written() {
        let doc = ProgressDocument::parse(
            r#"{"desk_locations": "legacy", "avery_notes": {"unlocked": true}}"#,
        )
        .unwrap();

        let mut groups = BTreeMap::new();
        groups.insert(
            "desk_locations".to_string(),
            vec![member("/LOCATIONS/DESK/A.json", true, false)],
        );
        groups.insert("avery_notes".to_string(), Vec::new());

        let text = doc.with_groups(&groups).to_json_string().unwrap();

        let expected = "{\n  \"avery_notes\": {\n    \"unlocked\": true\n  },\n  \"desk_locations\": {\n    \"/LOCATIONS/DESK/A.json\": true\n  }\n}\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_save_round_trips_and_replaces() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("GAME_STATE/Game_State.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        let mut groups = BTreeMap::new();
        groups.insert("notes".to_string(), vec![member("/NOTES/n.json", true, false)]);
        let doc = ProgressDocument::new().with_groups(&groups);

        doc.save(&path).unwrap();

        assert_eq!(ProgressDocument::load(&path).unwrap(), doc);
        let leftovers: Vec<_> = fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers.len(), 1);
    }
}
