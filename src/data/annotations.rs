// ============================================================
// Layer 4 — Annotation Table
// ============================================================
// Reads and writes the clinical annotation CSV that drives the
// whole pipeline. The file is user-edited in a spreadsheet and
// re-read on every run — this layer never caches it across runs.
//
// Required columns:
//   patient — patient identifier (required on every row)
//   slide   — slide identifier
//   plus at least one further column, which is an outcome column
//
// Any column other than patient/slide is an outcome column. One
// outcome column is "active" at a time (the first by default);
// records_for_outcome() narrows rows to that column and filters
// by label value, skipping unlabelled values ("", na, n/a, none,
// missing).
//
// The csv crate handles quoting/escaping; the reader is dropped
// (and the file handle released) on every exit path, including
// parse failure.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::annotation::{
    AnnotationRecord, PATIENT_HEADER, SLIDE_HEADER,
};
use crate::domain::error::{Result, SlidekitError};

/// An in-memory parse of the annotation CSV.
#[derive(Debug, Clone)]
pub struct AnnotationTable {
    /// All headers, in file order
    headers: Vec<String>,

    /// All data rows, in file order, one cell per header
    rows: Vec<Vec<String>>,

    /// Index (into headers) of the patient column
    patient_idx: usize,

    /// Index (into headers) of the slide column
    slide_idx: usize,

    /// Index (into headers) of the active outcome column
    outcome_idx: usize,
}

impl AnnotationTable {
    /// Parse an annotation CSV from disk.
    ///
    /// Fails with Format when the file lacks a patient column, a
    /// slide column, or any outcome column, or when any row has a
    /// different cell count than the header.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            SlidekitError::not_found(format!(
                "annotation file '{}' could not be opened: {e}",
                path.display()
            ))
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| {
                SlidekitError::format(format!(
                    "annotation file '{}' has an unreadable header row: {e}",
                    path.display()
                ))
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let patient_idx = Self::required_column(&headers, PATIENT_HEADER, path)?;
        let slide_idx   = Self::required_column(&headers, SLIDE_HEADER, path)?;

        // First column that is neither patient nor slide is the
        // default outcome column
        let outcome_idx = headers
            .iter()
            .position(|h| h != PATIENT_HEADER && h != SLIDE_HEADER)
            .ok_or_else(|| {
                SlidekitError::format(format!(
                    "annotation file '{}' has no outcome column \
                     (need at least one column besides '{PATIENT_HEADER}' and '{SLIDE_HEADER}')",
                    path.display()
                ))
            })?;

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                SlidekitError::format(format!(
                    "annotation file '{}', row {}: {e}",
                    path.display(),
                    line + 2
                ))
            })?;
            let cells: Vec<String> = record.iter().map(|c| c.trim().to_string()).collect();
            if cells[patient_idx].is_empty() {
                return Err(SlidekitError::format(format!(
                    "annotation file '{}', row {}: empty patient identifier",
                    path.display(),
                    line + 2
                )));
            }
            rows.push(cells);
        }

        tracing::debug!(
            "Loaded {} annotation rows from '{}' ({} outcome column(s))",
            rows.len(),
            path.display(),
            headers.len() - 2
        );

        Ok(Self {
            headers,
            rows,
            patient_idx,
            slide_idx,
            outcome_idx,
        })
    }

    /// Write a header-only annotation file when none exists.
    /// Strict no-op when the path already has a file — an existing
    /// table is never overwritten.
    pub fn create_blank(path: &Path) -> Result<()> {
        if path.exists() {
            tracing::debug!(
                "Annotation file '{}' already exists — leaving it untouched",
                path.display()
            );
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        writeln!(file, "{PATIENT_HEADER},outcome,{SLIDE_HEADER}")?;
        file.flush()?;
        tracing::info!("Created blank annotation file at '{}'", path.display());
        Ok(())
    }

    /// All header names, in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Name of the active outcome column.
    pub fn outcome_header(&self) -> &str {
        &self.headers[self.outcome_idx]
    }

    /// Select a different outcome column by header name.
    pub fn with_outcome_header(mut self, header: &str) -> Result<Self> {
        match self.headers.iter().position(|h| h == header) {
            Some(idx) if idx != self.patient_idx && idx != self.slide_idx => {
                self.outcome_idx = idx;
                Ok(self)
            }
            Some(_) => Err(SlidekitError::validation(format!(
                "column '{header}' is not an outcome column"
            ))),
            None => Err(SlidekitError::not_found(format!(
                "annotation file has no column '{header}'"
            ))),
        }
    }

    /// Number of data rows in the table.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lazily iterate every labelled record under the active outcome
    /// column. Restartable: each call starts a fresh pass.
    pub fn records(&self) -> impl Iterator<Item = AnnotationRecord> + '_ {
        self.rows.iter().filter_map(move |row| {
            let outcome = &row[self.outcome_idx];
            if !AnnotationRecord::is_labelled(outcome) {
                return None;
            }
            Some(AnnotationRecord::new(
                row[self.patient_idx].clone(),
                outcome.clone(),
                row[self.slide_idx].clone(),
            ))
        })
    }

    /// Lazily iterate records whose outcome label equals `category`.
    /// Restartable and finite, like `records`.
    pub fn records_for_outcome<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = AnnotationRecord> + 'a {
        self.records().filter(move |r| r.outcome == category)
    }

    fn required_column(headers: &[String], name: &str, path: &Path) -> Result<usize> {
        headers.iter().position(|h| h == name).ok_or_else(|| {
            SlidekitError::format(format!(
                "annotation file '{}' is missing required column '{name}'",
                path.display()
            ))
        })
    }
}
