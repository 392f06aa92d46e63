//! Graph snapshot read model for output formatting
//!
//! A denormalized view of one visualization computation, consumed by the
//! formatters and by external rendering layers.

use crate::sbom_analysis::domain::{CommonComponent, GraphData, SbomId, SbomStats};

/// Per-SBOM header information shown alongside the graph
#[derive(Debug, Clone)]
pub struct SbomSummary {
    pub id: SbomId,
    pub file_name: String,
    pub color: String,
    pub stats: SbomStats,
}

/// The complete result of one visualization computation
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    /// Visible SBOMs, in ingestion order
    pub sboms: Vec<SbomSummary>,
    /// The graph after clustering and density reduction
    pub graph: GraphData,
    /// Common-component index over the full store
    pub common_components: Vec<CommonComponent>,
    /// Node/link counts of the unreduced graph
    pub raw_node_count: usize,
    pub raw_link_count: usize,
}
