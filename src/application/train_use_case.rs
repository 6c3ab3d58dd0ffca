// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates one training invocation in order:
//
//   Step 1: Validate hyperparameters      (Layer 3 - domain)
//   Step 2: Load the annotation table     (Layer 4 - data)
//   Step 3: Filter rows by outcome label  (Layer 4 - data)
//   Step 4: Resolve slides to tfrecords   (Layer 4 - data)
//   Step 5: Patient train/val split       (Layer 4 - data)
//   Step 6: Delegate to training backend  (Layer 5 - ml)
//
// This is a straight-line configuration-resolution-then-delegate
// pipeline; there is no state machine and no tensor computation
// here. Resolution is fail-fast: a filtered annotation row whose
// slide has no record file under any registered source aborts
// the run with a Validation error naming that slide, rather than
// silently skipping it.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::annotations::AnnotationTable;
use crate::data::paths::tfrecord_for_slide;
use crate::data::splitter::split_patients;
use crate::domain::error::SlidekitError;
use crate::domain::params::ModelParameterSet;
use crate::domain::project::Project;
use crate::domain::traits::{ManifestEntry, TrainingBackend, TrainingManifest};

// ─── Training Run Configuration ──────────────────────────────────────────────
// Everything one `train` invocation needs beyond the Project
// itself. Serialisable so callers can record what they ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRunConfig {
    /// Outcome label to train on (rows with other labels are excluded)
    pub outcome: String,

    /// Optional outcome column; default is the table's first outcome column
    pub outcome_column: Option<String>,

    /// Fraction of patients held out for validation
    pub val_fraction: f64,

    /// Validated hyperparameter bundle for the backend
    pub params: ModelParameterSet,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the run configuration; the backend is injected so tests
// can substitute a recording implementation.
pub struct TrainUseCase {
    config: TrainRunConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainRunConfig) -> Self {
        Self { config }
    }

    /// Resolve the manifest and hand it to `backend`.
    /// Returns the backend's artifact identifier.
    pub fn execute(&self, project: &Project, backend: &dyn TrainingBackend) -> Result<String> {
        let cfg = &self.config;

        // ── Step 1: Validate hyperparameters ─────────────────────────────────
        cfg.params.validate()?;

        // ── Step 2: Load the annotation table ────────────────────────────────
        let path = project.annotations_path();
        tracing::info!("Loading annotations from '{}'", path.display());
        let mut table = AnnotationTable::load(&path)?;
        if let Some(column) = &cfg.outcome_column {
            table = table.with_outcome_header(column)?;
        }

        // ── Step 3: Filter rows by outcome label ─────────────────────────────
        let records: Vec<_> = table.records_for_outcome(&cfg.outcome).collect();
        tracing::info!(
            "{} of {} rows match outcome '{}' (column '{}')",
            records.len(),
            table.len(),
            cfg.outcome,
            table.outcome_header()
        );
        if records.is_empty() {
            return Err(SlidekitError::validation(format!(
                "no annotation rows with outcome '{}' in column '{}'",
                cfg.outcome,
                table.outcome_header()
            ))
            .into());
        }

        // ── Step 4: Resolve each slide to its tfrecords file ─────────────────
        // Every registered source's tfrecords directory is searched;
        // the first match wins. An unresolved slide aborts the run.
        let mut entries = Vec::with_capacity(records.len());
        for record in &records {
            let tfrecord = self.resolve_tfrecord(project, &record.slide)?;
            entries.push(ManifestEntry {
                slide:    record.slide.clone(),
                tfrecord,
                label:    record.outcome.clone(),
            });
        }

        // ── Step 5: Patient-level train/validation split ─────────────────────
        let (train_patients, val_patients) = split_patients(&records, cfg.val_fraction);

        // ── Step 6: Delegate to the training backend (Layer 5) ───────────────
        let manifest = TrainingManifest {
            entries,
            train_patients,
            val_patients,
        };
        let artifact = backend.train(&manifest, &cfg.params)?;
        tracing::info!("Training backend produced artifact '{artifact}'");
        Ok(artifact)
    }

    /// Search every registered source for `<slide>.tfrecords`.
    fn resolve_tfrecord(
        &self,
        project: &Project,
        slide: &str,
    ) -> std::result::Result<std::path::PathBuf, SlidekitError> {
        for source in &project.sources {
            let dir = project.resolve_path(&source.tfrecords);
            if let Some(path) = tfrecord_for_slide(&dir, slide)? {
                return Ok(path);
            }
        }
        Err(SlidekitError::validation(format!(
            "slide '{slide}' has no tfrecords file under any registered dataset source \
             — was it extracted with the same tile geometry?"
        )))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::DatasetSource;
    use crate::ml::backend::DryRunBackend;
    use std::fs;
    use tempfile::TempDir;

    /// Project with one source whose tfrecords dir holds records
    /// for the given slides, plus an annotation file.
    fn fixture(slides_with_records: &[&str], annotation_rows: &str) -> (TempDir, Project) {
        let dir = TempDir::new().unwrap();
        let tfr = dir.path().join("tfrecords");
        fs::create_dir_all(&tfr).unwrap();
        for slide in slides_with_records {
            fs::write(tfr.join(format!("{slide}.tfrecords")), b"x").unwrap();
        }
        fs::write(
            dir.path().join("annotations.csv"),
            format!("patient,category,slide\n{annotation_rows}"),
        )
        .unwrap();

        let mut project = Project::new(dir.path(), "annotations.csv");
        project
            .add_source(DatasetSource::new(
                "main",
                "slides",
                "roi",
                "tiles",
                "tfrecords",
            ))
            .unwrap();
        (dir, project)
    }

    fn use_case(outcome: &str) -> TrainUseCase {
        TrainUseCase::new(TrainRunConfig {
            outcome:        outcome.to_string(),
            outcome_column: None,
            val_fraction:   0.0,
            params:         ModelParameterSet::default(),
        })
    }

    #[test]
    fn test_manifest_contains_only_matching_outcome() {
        let (_dir, project) = fixture(&["S1", "S2"], "P1,tumor,S1\nP2,normal,S2\n");
        let backend = DryRunBackend::new();

        use_case("tumor").execute(&project, &backend).unwrap();

        let invocations = backend.invocations();
        assert_eq!(invocations.len(), 1);
        let entries = &invocations[0].entries;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].slide, "S1");
        assert_eq!(entries[0].label, "tumor");
        assert!(entries[0].tfrecord.ends_with("tfrecords/S1.tfrecords"));
    }

    #[test]
    fn test_unresolved_slide_fails_fast_naming_it() {
        let (_dir, project) =
            fixture(&["S1", "S2"], "P1,tumor,S1\nP2,normal,S2\nP3,tumor,S3\n");
        let backend = DryRunBackend::new();

        let err = use_case("tumor").execute(&project, &backend).unwrap_err();
        let domain = err.downcast_ref::<SlidekitError>().unwrap();
        assert!(matches!(domain, SlidekitError::Validation { .. }));
        assert!(err.to_string().contains("S3"));
        // Fail fast: the backend was never invoked
        assert!(backend.invocations().is_empty());
    }

    #[test]
    fn test_invalid_params_rejected_before_any_io() {
        let (_dir, project) = fixture(&["S1"], "P1,tumor,S1\n");
        let backend = DryRunBackend::new();

        let use_case = TrainUseCase::new(TrainRunConfig {
            outcome:        "tumor".to_string(),
            outcome_column: None,
            val_fraction:   0.0,
            params:         ModelParameterSet::new(0, 302.0, 16, "xception"),
        });
        let err = use_case.execute(&project, &backend).unwrap_err();
        assert!(err.to_string().contains("tile_px"));
        assert!(backend.invocations().is_empty());
    }

    #[test]
    fn test_empty_outcome_selection_is_validation_error() {
        let (_dir, project) = fixture(&["S1"], "P1,tumor,S1\n");
        let backend = DryRunBackend::new();

        let err = use_case("metastatic")
            .execute(&project, &backend)
            .unwrap_err();
        assert!(err.to_string().contains("metastatic"));
    }

    #[test]
    fn test_patient_split_covers_all_patients() {
        let (_dir, project) = fixture(
            &["S1", "S2", "S3", "S4"],
            "P1,tumor,S1\nP2,tumor,S2\nP3,tumor,S3\nP4,tumor,S4\n",
        );
        let backend  = DryRunBackend::new();
        let use_case = TrainUseCase::new(TrainRunConfig {
            outcome:        "tumor".to_string(),
            outcome_column: None,
            val_fraction:   0.25,
            params:         ModelParameterSet::default(),
        });
        use_case.execute(&project, &backend).unwrap();

        let manifest = &backend.invocations()[0];
        assert_eq!(manifest.train_patients.len(), 3);
        assert_eq!(manifest.val_patients.len(), 1);
    }
}
