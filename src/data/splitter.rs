// ============================================================
// Layer 4 — Patient-Level Train/Validation Splitter
// ============================================================
// Splits annotation records into train and validation sets at
// the PATIENT level, never the slide level. A patient can have
// several slides; if slides of one patient landed on both sides
// of the split, validation metrics would leak training tissue.
//
// Patients are shuffled before splitting so the validation set
// is a representative mix rather than whatever cohort happened
// to sort last in the annotation file.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.

use rand::seq::SliceRandom;

use crate::domain::annotation::AnnotationRecord;

/// Shuffle the distinct patients in `records` and split them into
/// (train, validation) patient lists.
///
/// # Arguments
/// * `records`      - Annotation records feeding the run
/// * `val_fraction` - Proportion of patients held out, e.g. 0.2
///
/// The fraction is clamped to [0, 1], so 0.0 always yields an
/// empty validation set and 1.0 an empty training set.
pub fn split_patients(
    records: &[AnnotationRecord],
    val_fraction: f64,
) -> (Vec<String>, Vec<String>) {
    // Distinct patients, first-seen order
    let mut patients: Vec<String> = Vec::new();
    for record in records {
        if !patients.contains(&record.patient) {
            patients.push(record.patient.clone());
        }
    }

    let mut rng = rand::thread_rng();
    patients.shuffle(&mut rng);

    let total    = patients.len();
    let fraction = val_fraction.clamp(0.0, 1.0);
    let n_val    = (((total as f64) * fraction).round() as usize).min(total);

    let val = patients.split_off(total - n_val);

    tracing::debug!(
        "Patient split: {} train, {} validation",
        patients.len(),
        val.len()
    );

    (patients, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn records_for(patients: &[&str]) -> Vec<AnnotationRecord> {
        patients
            .iter()
            .enumerate()
            .map(|(i, p)| AnnotationRecord::new(*p, "tumor", format!("S{i}")))
            .collect()
    }

    #[test]
    fn test_split_sizes() {
        let records = records_for(&["P0", "P1", "P2", "P3", "P4", "P5", "P6", "P7", "P8", "P9"]);
        let (train, val) = split_patients(&records, 0.2);
        assert_eq!(train.len(), 8);
        assert_eq!(val.len(), 2);
    }

    #[test]
    fn test_no_patient_on_both_sides() {
        let records = records_for(&["P0", "P1", "P2", "P3", "P4"]);
        let (train, val) = split_patients(&records, 0.4);
        for p in &val {
            assert!(!train.contains(p));
        }
        assert_eq!(train.len() + val.len(), 5);
    }

    #[test]
    fn test_duplicate_patients_counted_once() {
        // Two slides for P0 — P0 must appear exactly once across the split
        let mut records = records_for(&["P0", "P1"]);
        records.push(AnnotationRecord::new("P0", "tumor", "S9"));

        let (train, val) = split_patients(&records, 0.5);
        assert_eq!(train.len() + val.len(), 2);
    }

    #[test]
    fn test_zero_fraction_keeps_everything_in_train() {
        let records = records_for(&["P0", "P1", "P2"]);
        let (train, val) = split_patients(&records, 0.0);
        assert_eq!(train.len(), 3);
        assert!(val.is_empty());
    }

    #[test]
    fn test_empty_records() {
        let (train, val) = split_patients(&[], 0.2);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }
}
