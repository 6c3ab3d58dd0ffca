// ============================================================
// Layer 3 — ModelParameterSet
// ============================================================
// The validated hyperparameter bundle handed to the external
// training backend: tile geometry, batch size, and the name of
// the architecture the backend should build.
//
// Validation is pure — it never touches the filesystem. The one
// cross-cutting rule it cannot check is that tile_px/tile_um
// matches the geometry used when the dataset's tiles were
// extracted; that mismatch only becomes detectable at training
// start, when the tfrecord directories are actually scanned.
//
// This layer constructs a fresh parameter set per training run
// and does not persist it; callers may serialize it themselves
// (it derives Serialize/Deserialize for exactly that reason).

use serde::{Deserialize, Serialize};

use crate::domain::error::{Result, SlidekitError};

/// Architectures the external training backend knows how to build.
/// An unrecognized name is a validation error, caught before any
/// delegation happens.
pub const KNOWN_ARCHITECTURES: [&str; 10] = [
    "xception",
    "inception_v3",
    "inception_resnet_v2",
    "resnet50",
    "resnet101",
    "resnet152",
    "vgg16",
    "vgg19",
    "mobilenet_v2",
    "densenet121",
];

/// Hyperparameters for one training invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameterSet {
    /// Tile edge length in pixels
    pub tile_px: u32,

    /// Tile edge length in microns (physical scale)
    pub tile_um: f64,

    /// Samples per training batch
    pub batch_size: u32,

    /// Name of the backend architecture to train
    pub model: String,
}

impl ModelParameterSet {
    pub fn new(tile_px: u32, tile_um: f64, batch_size: u32, model: impl Into<String>) -> Self {
        Self {
            tile_px,
            tile_um,
            batch_size,
            model: model.into(),
        }
    }

    /// Check every field constraint. Pure and side-effect-free;
    /// the error message names the offending field.
    pub fn validate(&self) -> Result<()> {
        if self.tile_px == 0 {
            return Err(SlidekitError::validation(format!(
                "tile_px must be positive (got {})",
                self.tile_px
            )));
        }
        if !(self.tile_um > 0.0) {
            return Err(SlidekitError::validation(format!(
                "tile_um must be positive (got {})",
                self.tile_um
            )));
        }
        if self.batch_size == 0 {
            return Err(SlidekitError::validation(format!(
                "batch_size must be positive (got {})",
                self.batch_size
            )));
        }
        if self.model.trim().is_empty() {
            return Err(SlidekitError::validation("model must be non-empty"));
        }
        if !KNOWN_ARCHITECTURES.contains(&self.model.as_str()) {
            return Err(SlidekitError::validation(format!(
                "model '{}' is not a known architecture (expected one of: {})",
                self.model,
                KNOWN_ARCHITECTURES.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for ModelParameterSet {
    fn default() -> Self {
        Self {
            tile_px:    299,
            tile_um:    302.0,
            batch_size: 16,
            model:      "xception".to_string(),
        }
    }
}
