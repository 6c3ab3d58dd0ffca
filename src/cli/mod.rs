// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// The entry point for all user interaction. It parses flags
// with clap, translates them into application-layer configs,
// and prints results. All business logic is delegated to
// Layer 2 (application) and Layer 6 (infra).
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands and prompt submodules
pub mod commands;
pub mod prompt;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use commands::{
    AddSourceArgs, Commands, CreateAnnotationsArgs, ExtractTilesArgs, InitArgs,
    RemoveSourceArgs, TrainArgs,
};

use crate::data::annotations::AnnotationTable;
use crate::domain::project::{DatasetSource, Project};
use crate::infra::project_store::ProjectStore;
use crate::infra::registry::DatasetSourceRegistry;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "slidekit",
    version = "0.1.0",
    about = "Configure pathology datasets and delegate tile extraction and training."
)]
pub struct Cli {
    /// Project directory (holds settings.json)
    #[arg(short, long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch.
    /// This keeps the CLI layer thin — it only routes, never computes.
    /// `self` is destructured first so each arm owns its payload and
    /// the handlers only see the project path.
    pub fn run(self) -> Result<()> {
        let Cli { project, command } = self;
        match command {
            Commands::Init(args)              => Self::run_init(&project, args),
            Commands::AddSource(args)         => Self::run_add_source(&project, args),
            Commands::RemoveSource(args)      => Self::run_remove_source(&project, args),
            Commands::ListSources             => Self::run_list_sources(&project),
            Commands::CreateAnnotations(args) => Self::run_create_annotations(&project, args),
            Commands::ExtractTiles(args)      => Self::run_extract_tiles(&project, args),
            Commands::Train(args)             => Self::run_train(&project, args),
        }
    }

    /// Handles `init`. The interactive route collects the same
    /// fields the flags provide and funnels into the same
    /// ProjectStore::create call.
    fn run_init(root: &Path, args: InitArgs) -> Result<()> {
        let (annotations, source) = if args.interactive {
            let setup = prompt::project_setup()?;
            (setup.annotations, setup.source)
        } else {
            (args.annotations, None)
        };

        let mut project = ProjectStore::create(root, annotations)?;
        if let Some(source) = source {
            DatasetSourceRegistry::add_source(&mut project, source)?;
        }

        println!("Created project at {}", project.root.display());
        Ok(())
    }

    /// Handles `add-source`
    fn run_add_source(root: &Path, args: AddSourceArgs) -> Result<()> {
        let mut project = Self::load_project(root)?;
        let source =
            DatasetSource::new(args.name, args.slides, args.roi, args.tiles, args.tfrecords);
        let name = source.name.clone();
        DatasetSourceRegistry::add_source(&mut project, source)?;

        println!("Registered dataset source '{name}'");
        Ok(())
    }

    /// Handles `remove-source`
    fn run_remove_source(root: &Path, args: RemoveSourceArgs) -> Result<()> {
        let mut project = Self::load_project(root)?;
        DatasetSourceRegistry::remove_source(&mut project, &args.name)?;

        println!("Removed dataset source '{}'", args.name);
        Ok(())
    }

    /// Handles `list-sources`
    fn run_list_sources(root: &Path) -> Result<()> {
        let project = Self::load_project(root)?;
        if project.sources.is_empty() {
            println!("No dataset sources registered.");
            return Ok(());
        }
        for source in &project.sources {
            println!("{}", source.name);
            println!("  slides:    {}", source.slides.display());
            println!("  roi:       {}", source.roi.display());
            println!("  tiles:     {}", source.tiles.display());
            println!("  tfrecords: {}", source.tfrecords.display());
        }
        Ok(())
    }

    /// Handles `create-annotations`
    fn run_create_annotations(root: &Path, args: CreateAnnotationsArgs) -> Result<()> {
        let project = Self::load_project(root)?;
        let path = match args.path {
            Some(path) => project.resolve_path(&path),
            None => project.annotations_path(),
        };
        AnnotationTable::create_blank(&path)?;

        println!("Annotation file ready at {}", path.display());
        Ok(())
    }

    /// Handles `extract-tiles`.
    /// Wires the dry-run extractor; a real image-processing backend
    /// replaces it here without touching any other layer.
    fn run_extract_tiles(root: &Path, args: ExtractTilesArgs) -> Result<()> {
        use crate::application::extract_use_case::ExtractUseCase;
        use crate::ml::extractor::DryRunExtractor;

        let project   = Self::load_project(root)?;
        let extractor = DryRunExtractor::new();
        let use_case  = ExtractUseCase::new(args.into());
        let summary   = use_case.execute(&project, &extractor)?;

        println!(
            "Extraction delegated for {} slide(s) ({} skipped).",
            summary.delegated, summary.skipped
        );
        Ok(())
    }

    /// Handles `train`.
    /// Wires the dry-run backend; a real training backend replaces
    /// it here without touching any other layer.
    fn run_train(root: &Path, args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;
        use crate::ml::backend::DryRunBackend;

        tracing::info!("Preparing training run for outcome '{}'", args.outcome);

        let project  = Self::load_project(root)?;
        let backend  = DryRunBackend::new();
        let use_case = TrainUseCase::new(args.into());
        let artifact = use_case.execute(&project, &backend)?;

        println!("Training delegated. Backend artifact: {artifact}");
        Ok(())
    }

    fn load_project(root: &Path) -> Result<Project> {
        Ok(ProjectStore::load(root)?)
    }
}
