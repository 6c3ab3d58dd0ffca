// ============================================================
// Layer 4 — Data Access
// ============================================================
// Everything that reads the user's files: the clinical
// annotation CSV, the slide directories, and the packed-tile
// record directories.
//
// The flow for one training run:
//
//   annotations.csv
//       │
//       ▼
//   AnnotationTable   → parses rows, one outcome column active
//       │
//       ▼
//   paths             → resolves slide ids to .tfrecords files
//       │
//       ▼
//   splitter          → patient-level train/validation split
//
// Each module is responsible for exactly one step, so each is
// independently testable and replaceable.
//
// Reference: Rust Book §13 (Iterators and Closures)

/// Parses and writes the clinical annotation CSV
pub mod annotations;

/// Slide format constants and directory-scanning helpers
pub mod paths;

/// Patient-level train/validation splitting
pub mod splitter;
