use std::fmt::Write as _;

use crate::application::read_models::GraphSnapshot;
use crate::ports::outbound::GraphFormatter;
use crate::shared::Result;

/// SummaryFormatter adapter producing a plain-text console overview
pub struct SummaryFormatter;

impl SummaryFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for SummaryFormatter {
    fn format(&self, snapshot: &GraphSnapshot) -> Result<String> {
        let mut out = String::new();

        writeln!(out, "SBOMs loaded: {}", snapshot.sboms.len())?;
        for sbom in &snapshot.sboms {
            writeln!(
                out,
                "  {} - {} components ({} software, {} executables, {} libraries), captured {}",
                sbom.file_name,
                sbom.stats.total_components,
                sbom.stats.software_count,
                sbom.stats.executable_count,
                sbom.stats.library_count,
                sbom.stats.capture_time,
            )?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Graph: {} nodes, {} links (from {} nodes, {} links before reduction)",
            snapshot.graph.node_count(),
            snapshot.graph.link_count(),
            snapshot.raw_node_count,
            snapshot.raw_link_count,
        )?;
        let cluster_count = snapshot
            .graph
            .nodes
            .iter()
            .filter(|node| node.is_cluster)
            .count();
        if cluster_count > 0 {
            writeln!(out, "  {} cluster node(s)", cluster_count)?;
        }

        writeln!(out)?;
        writeln!(
            out,
            "Common components across SBOMs: {}",
            snapshot.common_components.len()
        )?;
        for record in &snapshot.common_components {
            let name = record
                .occurrences
                .first()
                .map(|occurrence| occurrence.component.name.as_str())
                .unwrap_or("?");
            writeln!(
                out,
                "  {} ({}) - present in {} SBOMs, {} occurrence(s)",
                name,
                record.key,
                record.sbom_ids.len(),
                record.occurrences.len(),
            )?;
        }

        Ok(out)
    }
}
