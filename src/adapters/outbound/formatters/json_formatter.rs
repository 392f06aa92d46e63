use crate::application::read_models::GraphSnapshot;
use crate::ports::outbound::GraphFormatter;
use crate::sbom_analysis::domain::{GraphLink, GraphNode};
use crate::shared::error::SbomGraphError;
use crate::shared::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Export {
    sboms: Vec<SbomExport>,
    graph: GraphExport,
    #[serde(rename = "commonComponents")]
    common_components: Vec<CommonExport>,
    #[serde(rename = "rawNodeCount")]
    raw_node_count: usize,
    #[serde(rename = "rawLinkCount")]
    raw_link_count: usize,
}

#[derive(Debug, Serialize)]
struct SbomExport {
    id: String,
    #[serde(rename = "fileName")]
    file_name: String,
    color: String,
    #[serde(rename = "totalComponents")]
    total_components: usize,
    #[serde(rename = "softwareCount")]
    software_count: usize,
    #[serde(rename = "executableCount")]
    executable_count: usize,
    #[serde(rename = "libraryCount")]
    library_count: usize,
    #[serde(rename = "captureTime")]
    capture_time: String,
}

#[derive(Debug, Serialize)]
struct GraphExport {
    nodes: Vec<NodeExport>,
    links: Vec<LinkExport>,
}

#[derive(Debug, Serialize)]
struct NodeExport {
    id: String,
    name: String,
    #[serde(rename = "type")]
    node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    subtype: Option<String>,
    #[serde(rename = "sbomId")]
    sbom_id: String,
    #[serde(rename = "componentId", skip_serializing_if = "String::is_empty")]
    component_id: String,
    color: String,
    #[serde(rename = "isCommon")]
    is_common: bool,
    #[serde(rename = "commonKey", skip_serializing_if = "Option::is_none")]
    common_key: Option<String>,
    #[serde(rename = "isCluster")]
    is_cluster: bool,
    #[serde(rename = "nodeCount", skip_serializing_if = "Option::is_none")]
    node_count: Option<usize>,
    #[serde(rename = "memberIds", skip_serializing_if = "Option::is_none")]
    member_ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct LinkExport {
    source: String,
    target: String,
    kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    label: String,
    #[serde(rename = "sbomId", skip_serializing_if = "Option::is_none")]
    sbom_id: Option<String>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct CommonExport {
    key: String,
    #[serde(rename = "sbomIds")]
    sbom_ids: Vec<String>,
    occurrences: Vec<OccurrenceExport>,
}

#[derive(Debug, Serialize)]
struct OccurrenceExport {
    #[serde(rename = "sbomId")]
    sbom_id: String,
    #[serde(rename = "componentId")]
    component_id: String,
    name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    sha256: String,
}

/// JsonFormatter adapter producing the machine-readable graph export
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphFormatter for JsonFormatter {
    fn format(&self, snapshot: &GraphSnapshot) -> Result<String> {
        let export = Export {
            sboms: snapshot
                .sboms
                .iter()
                .map(|sbom| SbomExport {
                    id: sbom.id.to_string(),
                    file_name: sbom.file_name.clone(),
                    color: sbom.color.clone(),
                    total_components: sbom.stats.total_components,
                    software_count: sbom.stats.software_count,
                    executable_count: sbom.stats.executable_count,
                    library_count: sbom.stats.library_count,
                    capture_time: sbom.stats.capture_time.clone(),
                })
                .collect(),
            graph: GraphExport {
                nodes: snapshot.graph.nodes.iter().map(export_node).collect(),
                links: snapshot.graph.links.iter().map(export_link).collect(),
            },
            common_components: snapshot
                .common_components
                .iter()
                .map(|record| CommonExport {
                    key: record.key.to_string(),
                    sbom_ids: record.sbom_ids.iter().map(|id| id.to_string()).collect(),
                    occurrences: record
                        .occurrences
                        .iter()
                        .map(|occurrence| OccurrenceExport {
                            sbom_id: occurrence.sbom_id.to_string(),
                            component_id: occurrence.component_id.clone(),
                            name: occurrence.component.name.clone(),
                            version: occurrence.component.version.clone(),
                            sha256: occurrence.component.sha256.clone(),
                        })
                        .collect(),
                })
                .collect(),
            raw_node_count: snapshot.raw_node_count,
            raw_link_count: snapshot.raw_link_count,
        };

        serde_json::to_string_pretty(&export).map_err(|e| {
            SbomGraphError::OutputGenerationError {
                format: "JSON".to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

fn export_node(node: &GraphNode) -> NodeExport {
    NodeExport {
        id: node.id.clone(),
        name: node.name.clone(),
        node_type: node.node_type.to_string(),
        subtype: node.subtype.map(|subtype| subtype.to_string()),
        sbom_id: node.sbom_id.to_string(),
        component_id: node.component_id.clone(),
        color: node.color.clone(),
        is_common: node.is_common,
        common_key: node.common_key.as_ref().map(|key| key.to_string()),
        is_cluster: node.is_cluster,
        node_count: node.node_count,
        member_ids: node.member_ids.clone(),
    }
}

fn export_link(link: &GraphLink) -> LinkExport {
    LinkExport {
        source: link.source.clone(),
        target: link.target.clone(),
        kind: link.kind.to_string(),
        label: link.label.clone(),
        sbom_id: link.sbom_id.as_ref().map(|id| id.to_string()),
        count: link.count,
    }
}
