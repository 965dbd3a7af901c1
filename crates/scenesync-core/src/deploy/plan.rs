//! Deployment plans: which stages run, in which order

use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::progress::ReconcileMode;

/// What a stage does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageKind {
    /// Reconcile the progress document inside a data root
    Progress {
        /// Data root to scan
        data_root: PathBuf,
        /// Progress document, relative to the data root
        document: PathBuf,
        /// Reconcile mode
        mode: ReconcileMode,
    },
    /// Copy one file into a folder
    Artifact {
        /// File to copy
        source: PathBuf,
        /// Folder receiving it
        dest_dir: PathBuf,
    },
    /// Mirror a whole tree
    Tree {
        /// Source root
        source: PathBuf,
        /// Destination root
        dest: PathBuf,
    },
}

/// One step of a deployment run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    /// Short name used in logs and the summary
    pub name: String,
    /// What the stage does
    pub kind: StageKind,
    /// Whether a missing source aborts the whole run
    pub required: bool,
}

impl Stage {
    /// Progress reconciliation; an absent data root is skipped
    #[must_use]
    pub fn progress(
        name: impl Into<String>,
        data_root: impl Into<PathBuf>,
        document: impl Into<PathBuf>,
        mode: ReconcileMode,
    ) -> Self {
        Self {
            name: name.into(),
            kind: StageKind::Progress {
                data_root: data_root.into(),
                document: document.into(),
                mode,
            },
            required: false,
        }
    }

    /// Single file copy; an absent file is skipped
    #[must_use]
    pub fn artifact(
        name: impl Into<String>,
        source: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: StageKind::Artifact {
                source: source.into(),
                dest_dir: dest_dir.into(),
            },
            required: false,
        }
    }

    /// Tree mirror; an absent source root aborts the run
    #[must_use]
    pub fn tree(name: impl Into<String>, source: impl Into<PathBuf>, dest: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kind: StageKind::Tree {
                source: source.into(),
                dest: dest.into(),
            },
            required: true,
        }
    }

    /// The path this stage reads from
    #[must_use]
    pub fn source(&self) -> &Path {
        match &self.kind {
            StageKind::Progress { data_root, .. } => data_root,
            StageKind::Artifact { source, .. } | StageKind::Tree { source, .. } => source,
        }
    }
}

/// Ordered list of stages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployPlan {
    stages: Vec<Stage>,
}

impl DeployPlan {
    /// An empty plan
    #[must_use]
    pub const fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage
    #[must_use]
    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    /// Stages in run order
    #[must_use]
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Desktop install: progress first, so the data copy picks up the
    /// freshly written document, then the build artifact, then the data tree
    #[must_use]
    pub fn desktop(settings: &Settings, install_dir: &Path) -> Self {
        let artifact_name = settings
            .desktop
            .artifact
            .file_name()
            .map_or_else(|| "artifact".to_string(), |n| n.to_string_lossy().into_owned());

        Self::new()
            .stage(Stage::progress(
                "progress",
                &settings.data_root,
                &settings.progress_document,
                ReconcileMode::Preserve,
            ))
            .stage(Stage::artifact(
                artifact_name,
                &settings.desktop.artifact,
                install_dir,
            ))
            .stage(Stage::tree(
                settings.desktop.data_dir_name.clone(),
                &settings.data_root,
                install_dir.join(&settings.desktop.data_dir_name),
            ))
    }

    /// Removable volume: the volume source tree under `<volume>/<subdir>`
    #[must_use]
    pub fn volume(settings: &Settings, volume_root: &Path) -> Self {
        Self::new().stage(Stage::tree(
            settings.volume.subdir.clone(),
            &settings.volume.source,
            volume_root.join(&settings.volume.subdir),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_desktop_plan_order() {
        let settings = Config::default().settings();
        let plan = DeployPlan::desktop(&settings, Path::new("/games/ksc"));

        let names: Vec<&str> = plan.stages().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["progress", "KSC_Raylib.exe", "KSC_DATA"]);

        assert!(matches!(plan.stages()[0].kind, StageKind::Progress { .. }));
        assert_eq!(
            plan.stages()[1].kind,
            StageKind::Artifact {
                source: PathBuf::from("BUILD/Debug/KSC_Raylib.exe"),
                dest_dir: PathBuf::from("/games/ksc"),
            }
        );
        assert_eq!(
            plan.stages()[2].kind,
            StageKind::Tree {
                source: PathBuf::from("KSC_DATA"),
                dest: PathBuf::from("/games/ksc/KSC_DATA"),
            }
        );
        assert!(!plan.stages()[1].required);
        assert!(plan.stages()[2].required);
    }

    #[test]
    fn test_volume_plan() {
        let settings = Config::default().settings();
        let plan = DeployPlan::volume(&settings, Path::new("/media/KSC_SD"));

        assert_eq!(plan.stages().len(), 1);
        assert_eq!(plan.stages()[0].source(), Path::new("KSC/SD"));
        assert_eq!(
            plan.stages()[0].kind,
            StageKind::Tree {
                source: PathBuf::from("KSC/SD"),
                dest: PathBuf::from("/media/KSC_SD/SD"),
            }
        );
    }
}
