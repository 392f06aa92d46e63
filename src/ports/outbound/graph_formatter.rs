use crate::application::read_models::GraphSnapshot;
use crate::shared::Result;

/// GraphFormatter port for serializing a graph snapshot
///
/// Formatters are pure serializations of the snapshot; they carry no
/// business logic of their own.
pub trait GraphFormatter {
    /// Formats a graph snapshot into its output representation
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    fn format(&self, snapshot: &GraphSnapshot) -> Result<String>;
}
