// ============================================================
// Layer 3 — Project and DatasetSource Domain Types
// ============================================================
// A Project is the root configuration object of the pipeline:
// where the project lives on disk, where its annotation file
// is, and which named dataset sources it knows about.
//
// A DatasetSource maps one cohort of slides to four directory
// roles:
//   slides    — raw whole-slide image files
//   roi       — region-of-interest annotation CSVs
//   tiles     — loose extracted tile images
//   tfrecords — packed-tile container files for training
//
// Directories are recorded as given; they do not have to exist
// at registration time and are validated lazily when a use case
// actually touches them.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::error::{Result, SlidekitError};

/// Filename of the per-project settings file inside the project root.
pub const SETTINGS_FILE: &str = "settings.json";

/// One named dataset source with its four directory roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    /// Unique (within a project), non-empty source name
    pub name: String,

    /// Directory containing the raw whole-slide images
    pub slides: PathBuf,

    /// Directory containing region-of-interest CSV files
    pub roi: PathBuf,

    /// Directory for loose extracted tile images
    pub tiles: PathBuf,

    /// Directory for packed-tile record files consumed by training
    pub tfrecords: PathBuf,
}

impl DatasetSource {
    pub fn new(
        name:      impl Into<String>,
        slides:    impl Into<PathBuf>,
        roi:       impl Into<PathBuf>,
        tiles:     impl Into<PathBuf>,
        tfrecords: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name:      name.into(),
            slides:    slides.into(),
            roi:       roi.into(),
            tiles:     tiles.into(),
            tfrecords: tfrecords.into(),
        }
    }
}

/// Project-level configuration: root directory, annotation file,
/// and the set of registered dataset sources.
///
/// This is an explicit value object passed by the caller — there is
/// no process-wide "current project".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Root directory of the project; settings.json lives here
    pub root: PathBuf,

    /// Path to the annotation CSV, absolute or project-relative
    pub annotations: PathBuf,

    /// Registered dataset sources, unique by name
    pub sources: Vec<DatasetSource>,
}

impl Project {
    /// Create a new project with no registered sources.
    pub fn new(root: impl Into<PathBuf>, annotations: impl Into<PathBuf>) -> Self {
        Self {
            root:        root.into(),
            annotations: annotations.into(),
            sources:     Vec::new(),
        }
    }

    /// Register a dataset source, enforcing the unique-name invariant.
    /// On collision the existing entry is left untouched.
    pub fn add_source(&mut self, source: DatasetSource) -> Result<()> {
        if source.name.trim().is_empty() {
            return Err(SlidekitError::validation(
                "dataset source name must be non-empty",
            ));
        }
        if self.sources.iter().any(|s| s.name == source.name) {
            return Err(SlidekitError::duplicate_name(format!(
                "dataset source '{}' is already registered",
                source.name
            )));
        }
        self.sources.push(source);
        Ok(())
    }

    /// Remove a registered source by name.
    pub fn remove_source(&mut self, name: &str) -> Result<DatasetSource> {
        match self.sources.iter().position(|s| s.name == name) {
            Some(idx) => Ok(self.sources.remove(idx)),
            None => Err(SlidekitError::not_found(format!(
                "dataset source '{name}' is not registered"
            ))),
        }
    }

    /// Look up a registered source by name.
    pub fn source(&self, name: &str) -> Result<&DatasetSource> {
        self.sources.iter().find(|s| s.name == name).ok_or_else(|| {
            SlidekitError::not_found(format!("dataset source '{name}' is not registered"))
        })
    }

    /// Resolve a stored path against the project root.
    ///
    /// Rules:
    ///   - absolute paths pass through unchanged
    ///   - "./foo" and plain relative paths resolve under the root
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Ok(stripped) = path.strip_prefix("./") {
            self.root.join(stripped)
        } else {
            self.root.join(path)
        }
    }

    /// The annotation file path, resolved against the project root.
    pub fn annotations_path(&self) -> PathBuf {
        self.resolve_path(&self.annotations)
    }

    /// The settings file path for this project.
    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }
}
