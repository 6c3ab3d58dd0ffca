// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands of the pipeline:
//   `init`               — create a project in a directory
//   `add-source`         — register a named dataset source
//   `remove-source`      — unregister a dataset source
//   `list-sources`       — print registered sources
//   `create-annotations` — write a blank annotation file
//   `extract-tiles`      — delegate tile extraction per slide
//   `train`              — delegate training on an outcome label
//
// clap's derive macros generate help text, missing-argument
// errors, and type conversion for every flag.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::extract_use_case::ExtractRunConfig;
use crate::application::train_use_case::TrainRunConfig;
use crate::domain::params::ModelParameterSet;

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project in the project directory
    Init(InitArgs),

    /// Register a named dataset source with its four directories
    AddSource(AddSourceArgs),

    /// Unregister a dataset source by name
    RemoveSource(RemoveSourceArgs),

    /// Print all registered dataset sources
    ListSources,

    /// Write a blank annotation file (no-op if one exists)
    CreateAnnotations(CreateAnnotationsArgs),

    /// Delegate tile extraction for every slide in the project
    ExtractTiles(ExtractTilesArgs),

    /// Delegate training for one outcome label
    Train(TrainArgs),
}

/// Arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path to the annotation file, absolute or project-relative
    #[arg(long, default_value = "annotations.csv")]
    pub annotations: PathBuf,

    /// Collect all fields through guided prompts instead of flags
    #[arg(long, default_value_t = false)]
    pub interactive: bool,
}

/// Arguments for the `add-source` command.
/// Directories may be absolute or project-relative; they do not
/// have to exist yet.
#[derive(Args, Debug)]
pub struct AddSourceArgs {
    /// Unique name for the dataset source
    #[arg(long)]
    pub name: String,

    /// Directory containing whole-slide images
    #[arg(long)]
    pub slides: PathBuf,

    /// Directory containing region-of-interest CSVs
    #[arg(long)]
    pub roi: PathBuf,

    /// Directory for loose extracted tiles
    #[arg(long)]
    pub tiles: PathBuf,

    /// Directory for packed-tile record files
    #[arg(long)]
    pub tfrecords: PathBuf,
}

/// Arguments for the `remove-source` command
#[derive(Args, Debug)]
pub struct RemoveSourceArgs {
    /// Name of the dataset source to remove
    #[arg(long)]
    pub name: String,
}

/// Arguments for the `create-annotations` command
#[derive(Args, Debug)]
pub struct CreateAnnotationsArgs {
    /// Target path; defaults to the project's annotation file
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Arguments for the `extract-tiles` command
#[derive(Args, Debug)]
pub struct ExtractTilesArgs {
    /// Tile edge length in pixels
    #[arg(long, default_value_t = 299)]
    pub tile_px: u32,

    /// Tile edge length in microns
    #[arg(long, default_value_t = 302.0)]
    pub tile_um: f64,

    /// Restrict extraction to one named source
    #[arg(long)]
    pub source: Option<String>,
}

/// Convert CLI ExtractTilesArgs into the application-layer config.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<ExtractTilesArgs> for ExtractRunConfig {
    fn from(a: ExtractTilesArgs) -> Self {
        ExtractRunConfig {
            tile_px: a.tile_px,
            tile_um: a.tile_um,
            source:  a.source,
        }
    }
}

/// Arguments for the `train` command
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Outcome label to train on
    #[arg(long)]
    pub outcome: String,

    /// Outcome column; defaults to the first outcome column
    #[arg(long)]
    pub outcome_column: Option<String>,

    /// Fraction of patients held out for validation
    #[arg(long, default_value_t = 0.2)]
    pub val_fraction: f64,

    /// Tile edge length in pixels — must match extraction geometry
    #[arg(long, default_value_t = 299)]
    pub tile_px: u32,

    /// Tile edge length in microns — must match extraction geometry
    #[arg(long, default_value_t = 302.0)]
    pub tile_um: f64,

    /// Samples per training batch
    #[arg(long, default_value_t = 16)]
    pub batch_size: u32,

    /// Backend architecture to train
    #[arg(long, default_value = "xception")]
    pub model: String,
}

/// Convert CLI TrainArgs into the application-layer TrainRunConfig
impl From<TrainArgs> for TrainRunConfig {
    fn from(a: TrainArgs) -> Self {
        TrainRunConfig {
            outcome:        a.outcome,
            outcome_column: a.outcome_column,
            val_fraction:   a.val_fraction,
            params:         ModelParameterSet::new(a.tile_px, a.tile_um, a.batch_size, a.model),
        }
    }
}
