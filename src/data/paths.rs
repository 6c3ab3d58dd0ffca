// ============================================================
// Layer 4 — Path and Directory Scanning Helpers
// ============================================================
// Slides and packed-tile record files are matched to annotation
// rows purely by file stem: the slide id "S1" resolves to
// "S1.svs" in a slides directory and "S1.tfrecords" in a
// tfrecords directory. Both scans recurse one level at a time
// through subdirectories, since cohorts are often shipped as
// one folder per case.

use std::path::{Path, PathBuf};

use crate::domain::error::Result;

/// Slide file extensions the image-processing backend accepts.
pub const SUPPORTED_SLIDE_FORMATS: [&str; 11] = [
    "svs", "tif", "tiff", "ndpi", "vms", "vmu", "scn", "mrxs", "svslide", "bif", "jpg",
];

/// Extension of packed-tile record files.
pub const TFRECORD_EXT: &str = "tfrecords";

/// File stem (name without extension) for a path, or None for
/// paths with no usable file name.
pub fn path_to_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

/// Recursively collect all supported slide files under `dir`.
/// A missing directory yields an empty list rather than an error —
/// directories are allowed to not exist until they are needed,
/// and "needed" here means "scanned for content".
pub fn slide_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    scan_by_extension(dir, &SUPPORTED_SLIDE_FORMATS)
}

/// Recursively collect all .tfrecords files under `dir`.
pub fn tfrecord_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    scan_by_extension(dir, &[TFRECORD_EXT])
}

/// Find the record file for one slide id under `dir`, matching
/// by file stem. Returns None when the slide has no record file.
pub fn tfrecord_for_slide(dir: &Path, slide: &str) -> Result<Option<PathBuf>> {
    let found = tfrecord_paths(dir)?
        .into_iter()
        .find(|p| path_to_name(p).as_deref() == Some(slide));
    Ok(found)
}

/// Walk `dir` recursively collecting files whose extension
/// (lowercased) is in `extensions`.
fn scan_by_extension(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    if !dir.is_dir() {
        return Ok(found);
    }
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                if extensions.contains(&ext.to_lowercase().as_str()) {
                    found.push(path);
                }
            }
        }
    }
    // Deterministic order regardless of directory iteration order
    found.sort();
    Ok(found)
}
