// ============================================================
// Layer 6 — Dataset Source Registry
// ============================================================
// The write path for dataset sources: every add or remove both
// mutates the in-memory Project and persists it through the
// ProjectStore, so the settings file never drifts from what the
// caller holds.
//
// A failed operation leaves both the Project and the settings
// file untouched: invariant checks (duplicate name, missing
// name) run before anything is written, and a failed write
// rolls the in-memory mutation back.

use crate::domain::error::Result;
use crate::domain::project::{DatasetSource, Project};
use crate::infra::project_store::ProjectStore;

pub struct DatasetSourceRegistry;

impl DatasetSourceRegistry {
    /// Register a new source and persist the project.
    ///
    /// Fails with DuplicateName when the name is taken (the
    /// existing entry is untouched) and Validation when the name
    /// is empty.
    pub fn add_source(project: &mut Project, source: DatasetSource) -> Result<()> {
        let name = source.name.clone();
        project.add_source(source)?;
        if let Err(e) = ProjectStore::save(project) {
            // Keep memory and disk in agreement: undo the registration
            project.remove_source(&name).ok();
            return Err(e);
        }
        tracing::info!("Registered dataset source '{name}'");
        Ok(())
    }

    /// Remove a registered source and persist the project.
    /// Fails with NotFound when no source has that name.
    pub fn remove_source(project: &mut Project, name: &str) -> Result<DatasetSource> {
        let removed = project.remove_source(name)?;
        if let Err(e) = ProjectStore::save(project) {
            // Keep memory and disk in agreement: restore the entry
            project.add_source(removed).ok();
            return Err(e);
        }
        tracing::info!("Removed dataset source '{name}'");
        Ok(removed)
    }

    /// Look up a registered source by name.
    /// Fails with NotFound when no source has that name.
    pub fn resolve<'a>(project: &'a Project, name: &str) -> Result<&'a DatasetSource> {
        project.source(name)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::SlidekitError;
    use tempfile::TempDir;

    fn sample_source(name: &str) -> DatasetSource {
        DatasetSource::new(name, "slides", "roi", "tiles", "tfrecords")
    }

    #[test]
    fn test_add_persists_and_resolves() {
        let dir = TempDir::new().unwrap();
        let mut project = ProjectStore::create(dir.path(), "annotations.csv").unwrap();

        DatasetSourceRegistry::add_source(&mut project, sample_source("TCGA")).unwrap();

        let resolved = DatasetSourceRegistry::resolve(&project, "TCGA").unwrap();
        assert_eq!(resolved.tiles, std::path::PathBuf::from("tiles"));

        // The settings file on disk already knows the source
        let reloaded = ProjectStore::load(dir.path()).unwrap();
        assert!(reloaded.source("TCGA").is_ok());
    }

    #[test]
    fn test_duplicate_add_leaves_disk_state_untouched() {
        let dir = TempDir::new().unwrap();
        let mut project = ProjectStore::create(dir.path(), "annotations.csv").unwrap();
        DatasetSourceRegistry::add_source(&mut project, sample_source("TCGA")).unwrap();

        let err =
            DatasetSourceRegistry::add_source(&mut project, sample_source("TCGA")).unwrap_err();
        assert!(matches!(err, SlidekitError::DuplicateName { .. }));

        let reloaded = ProjectStore::load(dir.path()).unwrap();
        assert_eq!(reloaded.sources.len(), 1);
    }

    #[test]
    fn test_failed_save_rolls_back_memory() {
        let dir = TempDir::new().unwrap();
        // Root points at a directory that does not exist, so every
        // settings write fails
        let mut project = crate::domain::project::Project::new(
            dir.path().join("missing"),
            "annotations.csv",
        );

        let err =
            DatasetSourceRegistry::add_source(&mut project, sample_source("TCGA")).unwrap_err();
        assert!(matches!(err, SlidekitError::Io(_)));
        assert!(project.sources.is_empty());

        // Same agreement guarantee on the removal path
        project.add_source(sample_source("TCGA")).unwrap();
        let err = DatasetSourceRegistry::remove_source(&mut project, "TCGA").unwrap_err();
        assert!(matches!(err, SlidekitError::Io(_)));
        assert!(project.source("TCGA").is_ok());
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();
        let mut project = ProjectStore::create(dir.path(), "annotations.csv").unwrap();
        DatasetSourceRegistry::add_source(&mut project, sample_source("TCGA")).unwrap();
        DatasetSourceRegistry::remove_source(&mut project, "TCGA").unwrap();

        let reloaded = ProjectStore::load(dir.path()).unwrap();
        assert!(reloaded.sources.is_empty());

        let err = DatasetSourceRegistry::resolve(&project, "TCGA").unwrap_err();
        assert!(matches!(err, SlidekitError::NotFound { .. }));
    }
}
