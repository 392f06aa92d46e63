pub mod cluster;
pub mod density;
pub mod graph_builder;
pub mod normalizer;
pub mod store;

pub use cluster::{GraphView, ReducerConfig};
pub use density::density_reduce;
pub use graph_builder::{GraphBuilder, TypeFilter};
pub use normalizer::{normalize_document, NormalizedDocument};
pub use store::{IngestOutcome, SbomStore, SearchHit};
