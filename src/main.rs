use std::path::{Path, PathBuf};
use std::process;

use sbom_graph::adapters::outbound::console::StderrProgressReporter;
use sbom_graph::adapters::outbound::filesystem::{
    FileSystemReader, FileSystemWriter, StdoutPresenter,
};
use sbom_graph::application::dto::VisualizeRequest;
use sbom_graph::application::use_cases::{IngestSbomsUseCase, VisualizeGraphUseCase};
use sbom_graph::cli::{parse_type_filter, Args, OutputFormat};
use sbom_graph::config::{discover_config, load_config_from_path, ConfigFile};
use sbom_graph::ports::outbound::OutputPresenter;
use sbom_graph::sbom_analysis::services::{ReducerConfig, SbomStore};
use sbom_graph::shared::{ExitCode, Result};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Load configuration (explicit path, or discovery in the working dir)
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };

    let format = resolve_format(&args, config.as_ref())?;
    let reducer = resolve_reducer(&args, config.as_ref());
    let filter = resolve_filter(&args, config.as_ref())?;

    // Create adapters (Dependency Injection)
    let document_reader = FileSystemReader::new();
    let progress_reporter = StderrProgressReporter::new();

    // Ingest all documents into an explicit store
    let mut store = SbomStore::new();
    let ingest = IngestSbomsUseCase::new(document_reader, progress_reporter);
    ingest.execute(&mut store, &args.files).await?;

    if store.is_empty() {
        anyhow::bail!(
            "No SBOM documents could be loaded from the {} given file(s).",
            args.files.len()
        );
    }

    // Search mode short-circuits graph computation
    if let Some(query) = &args.search {
        let output = render_search_results(&store, query);
        present(&args.output, &output)?;
        return Ok(());
    }

    // Compute the reduced graph
    let request = VisualizeRequest::new(None, filter, reducer);
    let snapshot = VisualizeGraphUseCase::new().execute(&store, &request);

    eprintln!("{}", format.progress_message());
    let formatter = format.create_formatter();
    let formatted_output = formatter.format(&snapshot)?;

    present(&args.output, &formatted_output)?;

    Ok(())
}

fn resolve_format(args: &Args, config: Option<&ConfigFile>) -> Result<OutputFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    if let Some(name) = config.and_then(|c| c.format.as_deref()) {
        return name
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!("Invalid format in config file: {}", e));
    }
    Ok(OutputFormat::Summary)
}

fn resolve_reducer(args: &Args, config: Option<&ConfigFile>) -> ReducerConfig {
    let defaults = ReducerConfig::default();
    ReducerConfig {
        cluster_threshold: args
            .cluster_threshold
            .or(config.and_then(|c| c.cluster_threshold))
            .unwrap_or(defaults.cluster_threshold),
        max_nodes: args
            .max_nodes
            .or(config.and_then(|c| c.max_nodes))
            .unwrap_or(defaults.max_nodes),
    }
}

fn resolve_filter(
    args: &Args,
    config: Option<&ConfigFile>,
) -> Result<sbom_graph::sbom_analysis::services::TypeFilter> {
    if !args.types.is_empty() {
        return parse_type_filter(&args.types);
    }
    if let Some(types) = config.and_then(|c| c.types.as_ref()) {
        return parse_type_filter(types);
    }
    parse_type_filter(&[])
}

fn render_search_results(store: &SbomStore, query: &str) -> String {
    let hits = store.search_components(query);
    let mut out = format!("{} component(s) matching \"{}\"\n", hits.len(), query);
    for hit in hits {
        let file_name = store
            .get_sbom(hit.sbom_id)
            .map(|sbom| sbom.file_name.as_str())
            .unwrap_or("?");
        out.push_str(&format!(
            "  {} ({}) - {}\n",
            hit.component.name(),
            hit.component.component_type(),
            file_name
        ));
    }
    out
}

fn present(output: &Option<PathBuf>, content: &str) -> Result<()> {
    let presenter: Box<dyn OutputPresenter> = match output {
        Some(path) => Box::new(FileSystemWriter::new(path.clone())),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(content)
}
