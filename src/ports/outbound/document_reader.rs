use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// DocumentReader port for reading raw SBOM documents
///
/// File reads are the only asynchronous operation in the pipeline; the
/// normalizer treats every document independently, so completion order
/// across concurrent reads carries no meaning.
#[async_trait]
pub trait DocumentReader {
    /// Reads one SBOM document and returns its raw content
    ///
    /// # Errors
    /// Returns an error if the file does not exist or cannot be read.
    async fn read_document(&self, path: &Path) -> Result<String>;
}
