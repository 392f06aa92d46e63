/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, etc.).
pub mod document_reader;
pub mod graph_formatter;
pub mod output_presenter;
pub mod progress_reporter;

pub use document_reader::DocumentReader;
pub use graph_formatter::GraphFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
