/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod ingest_report;
mod visualize_request;

pub use ingest_report::{FileOutcome, IngestReport};
pub use visualize_request::VisualizeRequest;
