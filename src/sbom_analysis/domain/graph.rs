use std::fmt;

use super::{ComponentType, IdentityKey, SbomId, SoftwareSubtype};

/// Discriminated edge kind.
///
/// Cross-document edges carry no owning SBOM; rendering style is driven by
/// this enum rather than by an overloaded identifier field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// An edge copied from one SBOM's own relationship list.
    Relationship,
    /// A synthetic edge joining occurrences of one identity key in two SBOMs.
    CommonComponent,
    /// A synthetic edge inferred from ELF dependency names.
    InferredDependency,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkKind::Relationship => write!(f, "relationship"),
            LinkKind::CommonComponent => write!(f, "common"),
            LinkKind::InferredDependency => write!(f, "dependency"),
        }
    }
}

/// One node of the projected graph.
///
/// A regular node wraps exactly one component; a cluster node aggregates two
/// or more regular nodes and carries the full membership list needed to
/// reverse the clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    /// Graph-local id, qualified by the owning SBOM so equal component ids
    /// from different documents stay distinct.
    pub id: String,
    pub name: String,
    pub node_type: ComponentType,
    pub subtype: Option<SoftwareSubtype>,
    pub sbom_id: SbomId,
    /// Id of the wrapped component as it appeared in the source document.
    /// Empty for cluster nodes.
    pub component_id: String,
    pub color: String,
    pub is_common: bool,
    pub common_key: Option<IdentityKey>,
    pub is_cluster: bool,
    /// Member count, cluster nodes only.
    pub node_count: Option<usize>,
    /// Full membership list, cluster nodes only; retained while expanded so
    /// the clustering stays reversible.
    pub member_ids: Option<Vec<String>>,
}

impl GraphNode {
    pub fn degree_in(&self, links: &[GraphLink]) -> usize {
        links
            .iter()
            .filter(|link| link.source == self.id || link.target == self.id)
            .count()
    }
}

/// One edge of the projected graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
    pub kind: LinkKind,
    /// Relationship type label for intra-SBOM edges, empty otherwise.
    pub label: String,
    /// Owning SBOM for intra-SBOM edges; `None` for cross-document edges.
    pub sbom_id: Option<SbomId>,
    /// Number of original edges merged into this one (cluster-to-cluster
    /// aggregation); 1 for plain edges.
    pub count: usize,
}

/// Node/link lists consumed by the rendering layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
}

impl GraphData {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
