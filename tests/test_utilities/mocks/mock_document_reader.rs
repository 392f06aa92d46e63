use async_trait::async_trait;
use sbom_graph::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock DocumentReader for testing
///
/// Serves canned document contents by path; unknown paths fail like an
/// unreadable file would.
#[derive(Default)]
pub struct MockDocumentReader {
    documents: HashMap<PathBuf, String>,
}

impl MockDocumentReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, path: &str, content: &str) -> Self {
        self.documents
            .insert(PathBuf::from(path), content.to_string());
        self
    }
}

#[async_trait]
impl DocumentReader for MockDocumentReader {
    async fn read_document(&self, path: &Path) -> Result<String> {
        match self.documents.get(path) {
            Some(content) => Ok(content.clone()),
            None => anyhow::bail!("Mock read failure for {}", path.display()),
        }
    }
}
