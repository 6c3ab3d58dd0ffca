// ============================================================
// Layer 3 — AnnotationRecord Domain Type
// ============================================================
// One row of the clinical annotation table, already narrowed to
// a single outcome column: which patient, which outcome label,
// which slide.
//
// The patient id is required. The slide id only has to resolve
// to a real record file when the row is actually used for
// training — registration never touches the filesystem.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

/// Required header for the patient identifier column.
pub const PATIENT_HEADER: &str = "patient";

/// Required header for the slide identifier column.
pub const SLIDE_HEADER: &str = "slide";

/// Outcome values treated as "unlabelled" and skipped during
/// outcome iteration (matched case-insensitively).
pub const UNLABELLED_VALUES: [&str; 5] = ["", "na", "n/a", "none", "missing"];

/// A single annotation row narrowed to one outcome column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    /// Patient identifier (required, never empty)
    pub patient: String,

    /// Outcome label for this patient under the active outcome column
    pub outcome: String,

    /// Slide identifier, resolved against a dataset source at use time
    pub slide: String,
}

impl AnnotationRecord {
    pub fn new(
        patient: impl Into<String>,
        outcome: impl Into<String>,
        slide:   impl Into<String>,
    ) -> Self {
        Self {
            patient: patient.into(),
            outcome: outcome.into(),
            slide:   slide.into(),
        }
    }

    /// Whether an outcome value counts as a real label.
    pub fn is_labelled(value: &str) -> bool {
        let lowered = value.trim().to_lowercase();
        !UNLABELLED_VALUES.contains(&lowered.as_str())
    }
}
