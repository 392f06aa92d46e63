//! sbom-graph - Cross-SBOM component graph construction
//!
//! This library ingests simplified SBOM JSON documents, normalizes their
//! component records into a canonical model, detects components shared across
//! documents by content identity, and reduces the resulting node/link graph
//! to a renderable size.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_analysis`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and application services
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use sbom_graph::prelude::*;
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let document_reader = FileSystemReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Ingest documents into an explicit store
//! let mut store = SbomStore::new();
//! let ingest = IngestSbomsUseCase::new(document_reader, progress_reporter);
//! ingest
//!     .execute(&mut store, &[PathBuf::from("firmware.json")])
//!     .await?;
//!
//! // Compute the reduced graph
//! let request = VisualizeRequest::default();
//! let snapshot = VisualizeGraphUseCase::new().execute(&store, &request);
//!
//! // Format output
//! let formatter = JsonFormatter::new();
//! println!("{}", formatter.format(&snapshot)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod sbom_analysis;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{CsvFormatter, JsonFormatter, SummaryFormatter};
    pub use crate::application::dto::{FileOutcome, IngestReport, VisualizeRequest};
    pub use crate::application::read_models::{GraphSnapshot, SbomSummary};
    pub use crate::application::use_cases::{IngestSbomsUseCase, VisualizeGraphUseCase};
    pub use crate::ports::outbound::{
        DocumentReader, GraphFormatter, OutputPresenter, ProgressReporter,
    };
    pub use crate::sbom_analysis::domain::{
        CommonComponent, ComponentRef, ComponentType, ElfMetadata, GraphData, GraphLink,
        GraphNode, Hardware, IdentityKey, LinkKind, Relationship, Sbom, SbomId, SbomStats,
        Software, SoftwareSubtype, System,
    };
    pub use crate::sbom_analysis::services::{
        GraphBuilder, GraphView, IngestOutcome, ReducerConfig, SbomStore, SearchHit, TypeFilter,
    };
    pub use crate::shared::Result;
}
