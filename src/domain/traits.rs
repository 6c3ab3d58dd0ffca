// ============================================================
// Layer 3 — Core Traits (Delegation Seams)
// ============================================================
// The two places this layer hands off to heavy machinery it
// does not own: tile extraction (an image-processing backend)
// and model training (a tensor backend). Everything behind
// these traits is out of scope here — this crate only resolves
// configuration and assembles the arguments.
//
// Implementations:
//   - DryRunExtractor / DryRunBackend (Layer 5) → log the call
//   - real backends live in external crates
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::domain::params::ModelParameterSet;

// ─── Training manifest ────────────────────────────────────────────────────────

/// One fully-resolved training input: a slide, the packed-tile
/// record file backing it, and the outcome label to learn.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    /// Slide identifier from the annotation table
    pub slide: String,

    /// Resolved path to the slide's .tfrecords file
    pub tfrecord: PathBuf,

    /// Outcome label for this slide
    pub label: String,
}

/// Everything the training backend needs for one run.
/// Patients are pre-split so no patient appears on both sides
/// of the train/validation boundary.
#[derive(Debug, Clone)]
pub struct TrainingManifest {
    /// Resolved (slide, tfrecord, label) entries
    pub entries: Vec<ManifestEntry>,

    /// Patients whose slides feed weight updates
    pub train_patients: Vec<String>,

    /// Patients held out for validation
    pub val_patients: Vec<String>,
}

// ─── TrainingBackend ──────────────────────────────────────────────────────────
/// Any component that can run a training procedure given a
/// resolved manifest and a validated parameter set.
pub trait TrainingBackend {
    /// Run training. Returns an identifier for the produced model
    /// artifact (a path or run name, backend-defined).
    fn train(&self, manifest: &TrainingManifest, params: &ModelParameterSet) -> Result<String>;
}

// ─── TileExtractor ────────────────────────────────────────────────────────────
/// Any component that can extract tiles from one slide at a given
/// geometry, writing loose tiles and/or a packed record file.
pub trait TileExtractor {
    fn extract(
        &self,
        slide_path: &Path,
        tile_px: u32,
        tile_um: f64,
        tiles_dir: &Path,
        tfrecords_dir: &Path,
    ) -> Result<()>;
}
