// ============================================================
// Layer 5 — Dry-Run Tile Extractor
// ============================================================
// The default TileExtractor wired into the CLI. The actual
// slide decoding and tiling belongs to the image-processing
// backend; this implementation logs the exact call a real
// extractor would receive and records it for tests.

use anyhow::Result;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::domain::traits::TileExtractor;

#[derive(Default)]
pub struct DryRunExtractor {
    extracted: RefCell<Vec<PathBuf>>,
}

impl DryRunExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slide paths this extractor has been handed, in order.
    pub fn extracted(&self) -> Vec<PathBuf> {
        self.extracted.borrow().clone()
    }
}

impl TileExtractor for DryRunExtractor {
    fn extract(
        &self,
        slide_path: &Path,
        tile_px: u32,
        tile_um: f64,
        tiles_dir: &Path,
        tfrecords_dir: &Path,
    ) -> Result<()> {
        tracing::info!(
            "Delegating extraction: {} (tile_px={}, tile_um={}) -> tiles '{}', records '{}'",
            slide_path.display(),
            tile_px,
            tile_um,
            tiles_dir.display(),
            tfrecords_dir.display()
        );
        self.extracted.borrow_mut().push(slide_path.to_path_buf());
        Ok(())
    }
}
