/// Application use cases
mod ingest_sboms;
mod visualize_graph;

pub use ingest_sboms::IngestSbomsUseCase;
pub use visualize_graph::VisualizeGraphUseCase;
