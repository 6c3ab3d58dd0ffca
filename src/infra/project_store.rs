// ============================================================
// Layer 6 — Project Store
// ============================================================
// Persists and restores the per-project settings file.
//
// What gets saved:
//   <root>/settings.json — root path, annotation file path, and
//   every registered dataset source, as pretty-printed JSON so
//   users can read and hand-edit it.
//
// A project is created once per working directory and loaded on
// every later run. Writes go through a scoped file handle that
// is flushed and released on all exit paths. Concurrent writers
// are not coordinated here; callers running multiple processes
// against one project directory must serialize externally.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::error::{Result, SlidekitError};
use crate::domain::project::{Project, SETTINGS_FILE};

/// Creates, loads, and saves project settings files.
pub struct ProjectStore;

impl ProjectStore {
    /// Create a new project at `root` and persist it immediately.
    ///
    /// Fails with Configuration when the root cannot be created or
    /// is not writable. Interactive setup lives in the CLI layer
    /// and funnels into this same constructor — no prompting here.
    pub fn create(root: impl Into<PathBuf>, annotations: impl Into<PathBuf>) -> Result<Project> {
        let root = root.into();

        std::fs::create_dir_all(&root).map_err(|e| {
            SlidekitError::configuration(format!(
                "project root '{}' cannot be created: {e}",
                root.display()
            ))
        })?;

        let project = Project::new(root.clone(), annotations);

        // Probing writability and writing the initial settings are
        // the same operation
        Self::save(&project).map_err(|e| match e {
            SlidekitError::Io(io) => SlidekitError::configuration(format!(
                "project root '{}' is not writable: {io}",
                root.display()
            )),
            other => other,
        })?;

        tracing::info!("Created project at '{}'", root.display());
        Ok(project)
    }

    /// Load an existing project from `root`.
    ///
    /// Fails with NotFound when no settings file exists there, and
    /// with Format when the settings file is not valid JSON.
    pub fn load(root: &Path) -> Result<Project> {
        let path = root.join(SETTINGS_FILE);
        if !path.exists() {
            return Err(SlidekitError::not_found(format!(
                "no project configuration at '{}' (expected '{}')",
                root.display(),
                path.display()
            )));
        }

        let json = std::fs::read_to_string(&path)?;
        let project: Project = serde_json::from_str(&json).map_err(|e| {
            SlidekitError::format(format!(
                "settings file '{}' is not valid JSON: {e}",
                path.display()
            ))
        })?;

        tracing::debug!(
            "Loaded project from '{}' ({} source(s))",
            root.display(),
            project.sources.len()
        );
        Ok(project)
    }

    /// Persist a project to its settings file.
    ///
    /// The file handle is scoped to this function and flushed
    /// before release; any write failure surfaces as Io.
    pub fn save(project: &Project) -> Result<()> {
        let path = project.settings_path();
        let json = serde_json::to_string_pretty(project).map_err(|e| {
            SlidekitError::format(format!(
                "project settings could not be serialized: {e}"
            ))
        })?;

        let mut file = File::create(&path)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;

        tracing::debug!("Saved project settings to '{}'", path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::DatasetSource;
    use tempfile::TempDir;

    #[test]
    fn test_create_then_load_round_trips_project() {
        let dir = TempDir::new().unwrap();
        let mut project =
            ProjectStore::create(dir.path(), "annotations.csv").unwrap();

        project
            .add_source(DatasetSource::new("TCGA", "/s", "/r", "/t", "/f"))
            .unwrap();
        project
            .add_source(DatasetSource::new("local", "./s", "./r", "./t", "./f"))
            .unwrap();
        ProjectStore::save(&project).unwrap();

        let loaded = ProjectStore::load(dir.path()).unwrap();
        assert_eq!(loaded.root, project.root);
        assert_eq!(loaded.annotations, project.annotations);
        // Same source set, order-irrelevant
        assert_eq!(loaded.sources.len(), 2);
        for src in &project.sources {
            assert!(loaded.sources.contains(src));
        }
    }

    #[test]
    fn test_load_without_settings_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = ProjectStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, SlidekitError::NotFound { .. }));
        assert!(err.to_string().contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_load_malformed_settings_is_format_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();
        let err = ProjectStore::load(dir.path()).unwrap_err();
        assert!(matches!(err, SlidekitError::Format { .. }));
    }

    #[test]
    fn test_unusable_root_is_configuration_error() {
        // A regular file already occupies the would-be root directory
        let dir = TempDir::new().unwrap();
        let occupied = dir.path().join("occupied");
        std::fs::write(&occupied, b"not a directory").unwrap();

        let err = ProjectStore::create(&occupied, "annotations.csv").unwrap_err();
        assert!(matches!(err, SlidekitError::Configuration { .. }));
        assert!(err.to_string().contains("occupied"));
    }
}
