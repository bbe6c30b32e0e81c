use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use export_resolver_core::{manifest, ExportConfig, LibraryExport, LibraryExporter, LibraryKind};

mod logger;

/// exportres - Compute the assets each library in a resolved graph contributes
#[derive(Parser)]
#[command(name = "exportres")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Resolve compile, runtime and analyzer assets for a library graph", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the exports of a graph manifest
    Resolve(ResolveArgs),
}

#[derive(clap::Args)]
struct ResolveArgs {
    /// Path to the graph manifest (JSON)
    manifest: PathBuf,

    /// Build configuration, overrides the manifest
    #[arg(short, long)]
    configuration: Option<String>,

    /// Runtime identifier, overrides the manifest
    #[arg(short, long)]
    runtime: Option<String>,

    /// Shared output root for projects, overrides the manifest
    #[arg(long)]
    build_base_path: Option<PathBuf>,

    /// Exclude the root library
    #[arg(long)]
    dependencies_only: bool,

    /// Only export libraries of this kind (implies --dependencies-only)
    #[arg(long, value_enum)]
    kind: Option<KindArg>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Package,
    Project,
    FrameworkReference,
}

impl From<KindArg> for LibraryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Package => LibraryKind::Package,
            KindArg::Project => LibraryKind::Project,
            KindArg::FrameworkReference => LibraryKind::FrameworkReference,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Command::Resolve(args) => resolve(args),
    }
}

fn resolve(args: ResolveArgs) -> Result<()> {
    let manifest = manifest::load(&args.manifest)
        .with_context(|| format!("failed to load manifest {}", args.manifest.display()))?;

    let mut config = manifest.config.unwrap_or_default();
    if let Some(configuration) = args.configuration {
        config.configuration = configuration;
    }
    if let Some(runtime) = args.runtime {
        config.runtime_identifier = Some(runtime);
    }
    if let Some(build_base_path) = args.build_base_path {
        config.build_base_path = Some(build_base_path);
    }

    let exporter = LibraryExporter::new(&manifest.graph, config)?;
    let exports = if args.dependencies_only || args.kind.is_some() {
        exporter.get_dependencies(args.kind.map(LibraryKind::from))?
    } else {
        exporter.get_all_exports()?
    };
    info!(
        libraries = exports.len(),
        configuration = %exporter.config().configuration,
        "resolved exports"
    );

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&exports)?),
        Format::Text => print_text(&exports),
    }
    Ok(())
}

fn print_text(exports: &[LibraryExport]) {
    for export in exports {
        match &export.library.version {
            Some(version) => println!("{} {} ({})", export.library.name, version, export.library.kind),
            None => println!("{} ({})", export.library.name, export.library.kind),
        }
        if export.is_empty() {
            println!("  (no assets)");
            continue;
        }
        for path in export.compile_paths() {
            println!("  compile  {}", path.display());
        }
        for path in &export.source_references {
            println!("  source   {}", path.display());
        }
        for path in export.runtime_paths() {
            println!("  runtime  {}", path.display());
        }
        for analyzer in &export.analyzer_references {
            let scope = [
                analyzer.framework.as_ref().map(|f| f.to_string()),
                analyzer.runtime_identifier.clone(),
                analyzer.language.clone(),
            ]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("/");
            println!("  analyzer {} [{}]", analyzer.assembly_path.display(), scope);
        }
    }
}
