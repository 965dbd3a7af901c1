//! Extraction of discoverable scenes from a data root
//!
//! Any JSON document under the data root that carries an `isDiscovered`
//! boolean is a discoverable scene. Its value there is the authoring
//! default; an optional `isRoot` boolean marks an entry point that sorts
//! first within its group.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Field carrying the root flag in descriptor documents
pub const ROOT_FIELD: &str = "isRoot";

/// Typed view of a descriptor document; every other field is ignored
///
/// `isRoot` is kept loose so an odd value never hides the scene itself.
#[derive(Debug, Deserialize)]
struct Descriptor {
    #[serde(rename = "isDiscovered")]
    is_discovered: Option<bool>,
    #[serde(rename = "isRoot", default)]
    is_root: Option<Value>,
}

impl Descriptor {
    /// The root flag, false when absent, null, or not a boolean
    fn is_root(&self, path: &Path) -> bool {
        match &self.is_root {
            None => false,
            Some(Value::Bool(is_root)) => *is_root,
            Some(other) => {
                warn!(
                    "Ignoring non-boolean {ROOT_FIELD} ({other}) in {}",
                    path.display()
                );
                false
            }
        }
    }
}

/// One progress-trackable scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverableEntity {
    /// Canonical key, e.g. `/LOCATIONS/DESK/MAIN/Desk_Full.json`
    pub key: String,
    /// Authoring default for the discovered flag
    pub default_value: bool,
    /// Whether the scene sorts first within its group
    pub is_root: bool,
}

/// Scan result keyed by scene key
pub type DiscoverableSet = BTreeMap<String, DiscoverableEntity>;

/// Derive the canonical key of a path relative to the data root
///
/// `LOCATIONS/DESK/A.json` becomes `/LOCATIONS/DESK/A.json` on every platform.
#[must_use]
pub fn scene_key(rel_path: &Path) -> String {
    rel_path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .fold(String::new(), |mut key, segment| {
            key.push('/');
            key.push_str(&segment);
            key
        })
}

/// Walks a data root collecting discoverable scenes
pub struct DiscoverableScanner<'a> {
    data_root: &'a Path,
    progress_document: Option<&'a Path>,
}

impl<'a> DiscoverableScanner<'a> {
    /// Create a scanner over `data_root`
    #[must_use]
    pub const fn new(data_root: &'a Path) -> Self {
        Self {
            data_root,
            progress_document: None,
        }
    }

    /// Leave the progress document (relative to the data root) out of the scan
    #[must_use]
    pub const fn excluding(mut self, progress_document: &'a Path) -> Self {
        self.progress_document = Some(progress_document);
        self
    }

    /// Scan every JSON document under the data root
    ///
    /// Documents that fail to parse, and documents without the discovered
    /// field, are skipped. A missing data root yields an empty set.
    #[must_use]
    pub fn scan(&self) -> DiscoverableSet {
        let mut found = DiscoverableSet::new();

        if !self.data_root.is_dir() {
            warn!("Data root not found: {}", self.data_root.display());
            return found;
        }

        for entry in WalkDir::new(self.data_root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() || !is_json(path) {
                continue;
            }

            let Ok(rel_path) = path.strip_prefix(self.data_root) else {
                continue;
            };
            if self.progress_document == Some(rel_path) {
                continue;
            }

            let Some(descriptor) = Self::read_descriptor(path) else {
                continue;
            };
            let Some(default_value) = descriptor.is_discovered else {
                continue;
            };

            let key = scene_key(rel_path);
            found.insert(
                key.clone(),
                DiscoverableEntity {
                    key,
                    default_value,
                    is_root: descriptor.is_root(path),
                },
            );
        }

        found
    }

    fn read_descriptor(path: &Path) -> Option<Descriptor> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!("Skipping unreadable document {}: {e}", path.display());
                return None;
            }
        };

        let parsed = serde_json::from_str::<Value>(&content).and_then(|value| {
            if value.is_object() {
                serde_json::from_value::<Descriptor>(value).map(Some)
            } else {
                Ok(None)
            }
        });

        match parsed {
            Ok(descriptor) => descriptor,
            Err(e) => {
                debug!("Skipping malformed document {}: {e}", path.display());
                None
            }
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scene_key() {
        assert_eq!(
            scene_key(&PathBuf::from("LOCATIONS/DESK/MAIN/Desk_Full.json")),
            "/LOCATIONS/DESK/MAIN/Desk_Full.json"
        );
        assert_eq!(scene_key(&PathBuf::from("Top.json")), "/Top.json");
    }

    #[test]
    fn test_scan_extracts_flags() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);
        write(
            tmp.path(),
            "LOCATIONS/DESK/B.json",
            r#"{"isDiscovered": true, "isRoot": true, "zones": []}"#,
        );

        let found = DiscoverableScanner::new(tmp.path()).scan();

        assert_eq!(found.len(), 2);
        let a = &found["/LOCATIONS/DESK/A.json"];
        assert!(!a.default_value);
        assert!(!a.is_root);
        let b = &found["/LOCATIONS/DESK/B.json"];
        assert!(b.default_value);
        assert!(b.is_root);
    }

    #[test]
    fn test_scan_tolerates_odd_root_flag() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "LOCATIONS/DESK/A.json",
            r#"{"isDiscovered": false, "isRoot": null}"#,
        );
        write(
            tmp.path(),
            "LOCATIONS/DESK/B.json",
            r#"{"isDiscovered": true, "isRoot": "yes"}"#,
        );

        let found = DiscoverableScanner::new(tmp.path()).scan();

        assert_eq!(found.len(), 2);
        assert!(!found["/LOCATIONS/DESK/A.json"].is_root);
        assert!(!found["/LOCATIONS/DESK/B.json"].is_root);
        assert!(found["/LOCATIONS/DESK/B.json"].default_value);
    }

    #[test]
    fn test_scan_skips_documents_without_field() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "CONTROLS/Controls.json", r#"{"buttons": []}"#);
        write(tmp.path(), "NOTES/AVERY/Note.json", r#"{"isDiscovered": false}"#);

        let found = DiscoverableScanner::new(tmp.path()).scan();

        assert_eq!(found.len(), 1);
        assert!(found.contains_key("/NOTES/AVERY/Note.json"));
    }

    #[test]
    fn test_scan_skips_malformed_documents() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "LOCATIONS/DESK/Broken.json", "{ not json");
        write(tmp.path(), "LOCATIONS/DESK/List.json", "[1, 2, 3]");
        write(tmp.path(), "LOCATIONS/DESK/Ok.json", r#"{"isDiscovered": true}"#);

        let found = DiscoverableScanner::new(tmp.path()).scan();

        assert_eq!(found.len(), 1);
        assert!(found.contains_key("/LOCATIONS/DESK/Ok.json"));
    }

    #[test]
    fn test_scan_ignores_non_json_files() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "NOTES/AVERY/Note.md", r#"{"isDiscovered": true}"#);

        assert!(DiscoverableScanner::new(tmp.path()).scan().is_empty());
    }

    #[test]
    fn test_scan_excludes_progress_document() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "GAME_STATE/Game_State.json",
            r#"{"isDiscovered": true, "currentMode": "notes"}"#,
        );
        write(tmp.path(), "LOCATIONS/DESK/A.json", r#"{"isDiscovered": false}"#);

        let progress = PathBuf::from("GAME_STATE/Game_State.json");
        let found = DiscoverableScanner::new(tmp.path())
            .excluding(&progress)
            .scan();

        assert_eq!(found.len(), 1);
        assert!(!found.contains_key("/GAME_STATE/Game_State.json"));
    }

    #[test]
    fn test_scan_missing_root() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("KSC_DATA");

        assert!(DiscoverableScanner::new(&missing).scan().is_empty());
    }
}
