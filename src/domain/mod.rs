// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure types that define what the system IS: projects, dataset
// sources, annotation rows, hyperparameter bundles, the error
// taxonomy, and the traits other layers implement.
//
// Rules for this layer:
//   - NO file I/O or network calls (error.rs and the structs
//     never touch the filesystem)
//   - NO ML-specific code — training is a trait seam only
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The error taxonomy shared by every layer
pub mod error;

// Project and DatasetSource configuration objects
pub mod project;

// One row of the clinical annotation table
pub mod annotation;

// Validated training hyperparameters
pub mod params;

// Delegation seams: TrainingBackend and TileExtractor
pub mod traits;
