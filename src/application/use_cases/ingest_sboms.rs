use std::path::{Path, PathBuf};

use futures::future::join_all;

use crate::application::dto::{FileOutcome, IngestReport};
use crate::ports::outbound::{DocumentReader, ProgressReporter};
use crate::sbom_analysis::services::{IngestOutcome, SbomStore};
use crate::shared::Result;

/// IngestSbomsUseCase - Batch import of SBOM documents into a store
///
/// Documents are read concurrently, then submitted to the store in argument
/// order so store state stays deterministic regardless of read completion
/// order. One unreadable or malformed file never aborts the batch.
///
/// # Type Parameters
/// * `DR` - DocumentReader implementation
/// * `PR` - ProgressReporter implementation
pub struct IngestSbomsUseCase<DR, PR> {
    document_reader: DR,
    progress_reporter: PR,
}

impl<DR, PR> IngestSbomsUseCase<DR, PR>
where
    DR: DocumentReader,
    PR: ProgressReporter,
{
    pub fn new(document_reader: DR, progress_reporter: PR) -> Self {
        Self {
            document_reader,
            progress_reporter,
        }
    }

    /// Reads every file and adds the resulting SBOMs to `store`.
    ///
    /// # Returns
    /// A per-file report of added / duplicate / failed outcomes.
    pub async fn execute(&self, store: &mut SbomStore, paths: &[PathBuf]) -> Result<IngestReport> {
        self.progress_reporter
            .report(&format!("📖 Loading {} SBOM document(s)...", paths.len()));

        let reads = join_all(
            paths
                .iter()
                .map(|path| self.document_reader.read_document(path)),
        )
        .await;

        let mut report = IngestReport::default();
        for (index, (path, read)) in paths.iter().zip(reads).enumerate() {
            let outcome = match read {
                Ok(content) => self.ingest_one(store, path, &content),
                Err(e) => FileOutcome::Failed {
                    path: path.clone(),
                    reason: e.to_string(),
                },
            };
            if let FileOutcome::Failed { path, reason } = &outcome {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Skipping {}: {}",
                    path.display(),
                    reason
                ));
            }
            report.outcomes.push(outcome);
            self.progress_reporter
                .report_progress(index + 1, paths.len(), Some("Ingesting SBOMs..."));
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Ingestion complete: {} added, {} duplicate(s), {} failed",
            report.added_count(),
            report.duplicate_count(),
            report.failed_count()
        ));

        Ok(report)
    }

    fn ingest_one(&self, store: &mut SbomStore, path: &Path, content: &str) -> FileOutcome {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match store.add_sbom(content, &file_name) {
            Ok(IngestOutcome::Added(sbom_id)) => FileOutcome::Added {
                path: path.to_path_buf(),
                sbom_id,
            },
            Ok(IngestOutcome::Duplicate) => FileOutcome::Duplicate {
                path: path.to_path_buf(),
            },
            Err(e) => FileOutcome::Failed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        }
    }
}
