// ============================================================
// Layer 5 — Dry-Run Training Backend
// ============================================================
// The default TrainingBackend wired into the CLI. It performs
// no tensor computation: it logs exactly what a real backend
// would receive — every manifest entry and the hyperparameters
// — and records the invocation so tests can assert on it.
//
// A real backend (GPU training against the packed-tile records)
// implements the same trait in an external crate and is swapped
// in at the call site.

use anyhow::Result;
use std::cell::RefCell;

use crate::domain::params::ModelParameterSet;
use crate::domain::traits::{TrainingBackend, TrainingManifest};

/// Logs the delegation instead of training, keeping the last
/// manifest it was handed for inspection.
#[derive(Default)]
pub struct DryRunBackend {
    invocations: RefCell<Vec<TrainingManifest>>,
}

impl DryRunBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manifests this backend has been invoked with, in order.
    pub fn invocations(&self) -> Vec<TrainingManifest> {
        self.invocations.borrow().clone()
    }
}

impl TrainingBackend for DryRunBackend {
    fn train(&self, manifest: &TrainingManifest, params: &ModelParameterSet) -> Result<String> {
        tracing::info!(
            "Delegating training: model={} tile_px={} tile_um={} batch_size={} \
             ({} slides, {} train / {} val patients)",
            params.model,
            params.tile_px,
            params.tile_um,
            params.batch_size,
            manifest.entries.len(),
            manifest.train_patients.len(),
            manifest.val_patients.len(),
        );
        for entry in &manifest.entries {
            tracing::info!(
                "  {} -> {} [{}]",
                entry.slide,
                entry.tfrecord.display(),
                entry.label
            );
        }
        self.invocations.borrow_mut().push(manifest.clone());
        Ok(format!("dry-run:{}", params.model))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::ManifestEntry;

    #[test]
    fn test_dry_run_records_invocation() {
        let backend  = DryRunBackend::new();
        let manifest = TrainingManifest {
            entries: vec![ManifestEntry {
                slide:    "S1".to_string(),
                tfrecord: "/d/S1.tfrecords".into(),
                label:    "tumor".to_string(),
            }],
            train_patients: vec!["P1".to_string()],
            val_patients:   vec![],
        };

        let artifact = backend
            .train(&manifest, &ModelParameterSet::default())
            .unwrap();
        assert_eq!(artifact, "dry-run:xception");
        assert_eq!(backend.invocations().len(), 1);
        assert_eq!(backend.invocations()[0].entries, manifest.entries);
    }
}
