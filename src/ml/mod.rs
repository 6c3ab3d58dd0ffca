// ============================================================
// Layer 5 — Backend Adapters
// ============================================================
// The ONLY layer that provides TrainingBackend / TileExtractor
// implementations. Real tensor computation and slide decoding
// live in external backends; the implementations shipped here
// log and record the delegation so the configuration pipeline
// is exercisable (and testable) end to end without a GPU or an
// image library.
//
//   backend.rs   — DryRunBackend: logs the resolved manifest
//                  and hyperparameters a real trainer would get
//
//   extractor.rs — DryRunExtractor: logs the per-slide tiling
//                  call a real extractor would get

/// Dry-run TrainingBackend implementation
pub mod backend;

/// Dry-run TileExtractor implementation
pub mod extractor;
