// ============================================================
// Layer 2 — ExtractUseCase
// ============================================================
// Orchestrates tile extraction across dataset sources:
//
//   Step 1: Validate tile geometry        (Layer 3 - domain)
//   Step 2: Select sources                (Layer 3 - domain)
//   Step 3: Scan slides directories       (Layer 4 - data)
//   Step 4: Delegate per slide            (Layer 5 - ml)
//
// Per-slide failures are logged and skipped so one corrupt file
// does not abort a multi-hour extraction run; the summary at the
// end reports how many slides were delegated and how many were
// skipped.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::paths::slide_paths;
use crate::domain::error::SlidekitError;
use crate::domain::project::Project;
use crate::domain::traits::TileExtractor;

// ─── Extraction Run Configuration ────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRunConfig {
    /// Tile edge length in pixels
    pub tile_px: u32,

    /// Tile edge length in microns
    pub tile_um: f64,

    /// Restrict the run to one named source; None means all sources
    pub source: Option<String>,
}

/// Counts reported after an extraction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractSummary {
    pub delegated: usize,
    pub skipped: usize,
}

// ─── ExtractUseCase ───────────────────────────────────────────────────────────
pub struct ExtractUseCase {
    config: ExtractRunConfig,
}

impl ExtractUseCase {
    pub fn new(config: ExtractRunConfig) -> Self {
        Self { config }
    }

    pub fn execute(
        &self,
        project: &Project,
        extractor: &dyn TileExtractor,
    ) -> Result<ExtractSummary> {
        let cfg = &self.config;

        // ── Step 1: Validate tile geometry ───────────────────────────────────
        if cfg.tile_px == 0 {
            return Err(SlidekitError::validation(format!(
                "tile_px must be positive (got {})",
                cfg.tile_px
            ))
            .into());
        }
        if !(cfg.tile_um > 0.0) {
            return Err(SlidekitError::validation(format!(
                "tile_um must be positive (got {})",
                cfg.tile_um
            ))
            .into());
        }

        // ── Step 2: Select sources ───────────────────────────────────────────
        let sources: Vec<_> = match &cfg.source {
            Some(name) => vec![project.source(name)?],
            None => project.sources.iter().collect(),
        };
        if sources.is_empty() {
            return Err(SlidekitError::validation(
                "no dataset sources registered — run `add-source` first",
            )
            .into());
        }

        let mut summary = ExtractSummary {
            delegated: 0,
            skipped:   0,
        };

        for source in sources {
            // ── Step 3: Scan the source's slides directory ───────────────────
            let slides_dir = project.resolve_path(&source.slides);
            let slides     = slide_paths(&slides_dir)?;
            tracing::info!(
                "Source '{}': {} slide(s) under '{}'",
                source.name,
                slides.len(),
                slides_dir.display()
            );

            let tiles_dir     = project.resolve_path(&source.tiles);
            let tfrecords_dir = project.resolve_path(&source.tfrecords);

            // ── Step 4: Delegate each slide, skipping failures ───────────────
            for slide in slides {
                match extractor.extract(
                    &slide,
                    cfg.tile_px,
                    cfg.tile_um,
                    &tiles_dir,
                    &tfrecords_dir,
                ) {
                    Ok(()) => summary.delegated += 1,
                    Err(e) => {
                        tracing::warn!("Skipping '{}': {e}", slide.display());
                        summary.skipped += 1;
                    }
                }
            }
        }

        tracing::info!(
            "Extraction delegated {} slide(s), skipped {}",
            summary.delegated,
            summary.skipped
        );
        Ok(summary)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::project::DatasetSource;
    use crate::ml::extractor::DryRunExtractor;
    use std::fs;
    use tempfile::TempDir;

    fn fixture(slides: &[&str]) -> (TempDir, Project) {
        let dir = TempDir::new().unwrap();
        let slides_dir = dir.path().join("slides");
        fs::create_dir_all(&slides_dir).unwrap();
        for slide in slides {
            fs::write(slides_dir.join(slide), b"x").unwrap();
        }
        let mut project = Project::new(dir.path(), "annotations.csv");
        project
            .add_source(DatasetSource::new(
                "main",
                "slides",
                "roi",
                "tiles",
                "tfrecords",
            ))
            .unwrap();
        (dir, project)
    }

    #[test]
    fn test_delegates_each_supported_slide() {
        let (_dir, project) = fixture(&["a.svs", "b.tiff", "notes.txt"]);
        let extractor = DryRunExtractor::new();

        let summary = ExtractUseCase::new(ExtractRunConfig {
            tile_px: 299,
            tile_um: 302.0,
            source:  None,
        })
        .execute(&project, &extractor)
        .unwrap();

        assert_eq!(summary.delegated, 2);
        assert_eq!(summary.skipped, 0);
        assert_eq!(extractor.extracted().len(), 2);
    }

    #[test]
    fn test_unknown_source_is_not_found() {
        let (_dir, project) = fixture(&["a.svs"]);
        let extractor = DryRunExtractor::new();

        let err = ExtractUseCase::new(ExtractRunConfig {
            tile_px: 299,
            tile_um: 302.0,
            source:  Some("ghost".to_string()),
        })
        .execute(&project, &extractor)
        .unwrap_err();

        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_bad_geometry_rejected() {
        let (_dir, project) = fixture(&["a.svs"]);
        let extractor = DryRunExtractor::new();

        let err = ExtractUseCase::new(ExtractRunConfig {
            tile_px: 0,
            tile_um: 302.0,
            source:  None,
        })
        .execute(&project, &extractor)
        .unwrap_err();
        assert!(err.to_string().contains("tile_px"));
    }
}
