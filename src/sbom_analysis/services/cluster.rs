//! Graph coarsening with reversible cluster state.
//!
//! When a combined graph exceeds the clustering threshold, nodes are grouped
//! into synthetic cluster nodes keyed by (SBOM, type, subtype). Clusters can
//! be expanded and collapsed; expansion always reads from the unclustered
//! snapshot retained for exactly that purpose, never from the reduced graph.

use std::collections::{HashMap, HashSet};

use crate::sbom_analysis::domain::{
    ComponentType, GraphData, GraphLink, GraphNode, SoftwareSubtype,
};
use crate::sbom_analysis::services::density::density_reduce;

/// Size thresholds consumed by the reducer. Both are user-adjustable at
/// runtime and take effect on the next computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReducerConfig {
    /// Clustering starts above this many visible nodes.
    pub cluster_threshold: usize,
    /// Density reduction caps the graph at this many nodes.
    pub max_nodes: usize,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            cluster_threshold: 30,
            max_nodes: 500,
        }
    }
}

/// Nodes this well-connected are never absorbed into a cluster. Tunable
/// policy, not a hard law.
const IMPORTANT_DEGREE: usize = 5;
const IMPORTANT_COMMON_DEGREE: usize = 2;

#[derive(Debug, Clone)]
struct ClusterState {
    node: GraphNode,
    member_ids: Vec<String>,
    /// Links removed from the current view on expand, restored on collapse.
    stashed_links: Vec<GraphLink>,
}

/// A reduced graph view with expand/collapse over its clusters.
///
/// The pre-clustering snapshot is retained for the lifetime of the view so
/// every expansion is fully reversible.
#[derive(Debug)]
pub struct GraphView {
    raw: GraphData,
    current: GraphData,
    clusters: HashMap<String, ClusterState>,
    expanded: HashSet<String>,
}

impl GraphView {
    /// Reduces `raw` according to `config`: clustering first when the node
    /// count exceeds the clustering threshold, then density reduction when
    /// the result still exceeds the node cap.
    pub fn new(raw: GraphData, config: &ReducerConfig) -> Self {
        let (mut current, clusters) = if raw.node_count() > config.cluster_threshold {
            cluster_graph(&raw)
        } else {
            (raw.clone(), HashMap::new())
        };

        if current.node_count() > config.max_nodes {
            current = density_reduce(&current, config.max_nodes);
        }

        Self {
            raw,
            current,
            clusters,
            expanded: HashSet::new(),
        }
    }

    /// The graph as currently reduced, for the rendering layer.
    pub fn graph(&self) -> &GraphData {
        &self.current
    }

    /// The unclustered snapshot the view was built from.
    pub fn raw_graph(&self) -> &GraphData {
        &self.raw
    }

    pub fn is_expanded(&self, cluster_id: &str) -> bool {
        self.expanded.contains(cluster_id)
    }

    /// Replaces a collapsed cluster node with its full membership, pulling
    /// member nodes and their links from the raw snapshot. Returns false for
    /// unknown or already-expanded clusters.
    pub fn expand(&mut self, cluster_id: &str) -> bool {
        if self.expanded.contains(cluster_id) {
            return false;
        }
        let Some(state) = self.clusters.get(cluster_id) else {
            return false;
        };
        if !self.current.nodes.iter().any(|node| node.id == cluster_id) {
            // Density reduction may have discarded the cluster node.
            return false;
        }

        let members: HashSet<&str> = state.member_ids.iter().map(String::as_str).collect();

        self.current.nodes.retain(|node| node.id != cluster_id);
        let stashed: Vec<GraphLink> = self
            .current
            .links
            .iter()
            .filter(|link| link.source == cluster_id || link.target == cluster_id)
            .cloned()
            .collect();
        self.current
            .links
            .retain(|link| link.source != cluster_id && link.target != cluster_id);

        for node in &self.raw.nodes {
            if members.contains(node.id.as_str()) {
                self.current.nodes.push(node.clone());
            }
        }

        let present: HashSet<&str> = self
            .current
            .nodes
            .iter()
            .map(|node| node.id.as_str())
            .collect();
        for link in &self.raw.links {
            let touches_member =
                members.contains(link.source.as_str()) || members.contains(link.target.as_str());
            if touches_member
                && present.contains(link.source.as_str())
                && present.contains(link.target.as_str())
            {
                self.current.links.push(link.clone());
            }
        }

        if let Some(state) = self.clusters.get_mut(cluster_id) {
            state.stashed_links = stashed;
        }
        self.expanded.insert(cluster_id.to_string());
        true
    }

    /// Removes an expanded cluster's member nodes and every link touching
    /// them, then re-inserts the single cluster node with the links it had
    /// before expansion.
    pub fn collapse(&mut self, cluster_id: &str) -> bool {
        if !self.expanded.contains(cluster_id) {
            return false;
        }
        let Some(state) = self.clusters.get_mut(cluster_id) else {
            return false;
        };

        let members: HashSet<&str> = state.member_ids.iter().map(String::as_str).collect();
        self.current
            .nodes
            .retain(|node| !members.contains(node.id.as_str()));
        self.current.links.retain(|link| {
            !members.contains(link.source.as_str()) && !members.contains(link.target.as_str())
        });

        self.current.nodes.push(state.node.clone());
        self.current.links.append(&mut state.stashed_links);
        self.expanded.remove(cluster_id);
        true
    }
}

/// Groups non-important nodes by (SBOM, type, subtype) and replaces each
/// group of two or more with one cluster node. Singleton groups pass through
/// unclustered.
fn cluster_graph(raw: &GraphData) -> (GraphData, HashMap<String, ClusterState>) {
    let mut degree: HashMap<&str, usize> = HashMap::new();
    for link in &raw.links {
        *degree.entry(link.source.as_str()).or_default() += 1;
        *degree.entry(link.target.as_str()).or_default() += 1;
    }

    let is_important = |node: &GraphNode| -> bool {
        let node_degree = degree.get(node.id.as_str()).copied().unwrap_or(0);
        node_degree > IMPORTANT_DEGREE
            || (node.is_common && node_degree > IMPORTANT_COMMON_DEGREE)
            || node.node_type == ComponentType::System
    };

    // Group membership for every non-important node. Nodes in singleton
    // groups still map to a cluster id that is never materialized; links
    // rewritten to such an id are dropped below. Known sharp edge, kept.
    let mut group_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&GraphNode>> = HashMap::new();
    let mut assignment: HashMap<&str, String> = HashMap::new();

    let mut nodes: Vec<GraphNode> = Vec::new();
    for node in &raw.nodes {
        if is_important(node) {
            nodes.push(node.clone());
            continue;
        }
        let cluster_id = cluster_id_for(node);
        if !groups.contains_key(&cluster_id) {
            group_order.push(cluster_id.clone());
        }
        groups.entry(cluster_id.clone()).or_default().push(node);
        assignment.insert(node.id.as_str(), cluster_id);
    }

    let mut clusters: HashMap<String, ClusterState> = HashMap::new();
    for cluster_id in &group_order {
        let members = &groups[cluster_id];
        if members.len() < 2 {
            // Never a singleton cluster.
            nodes.push(members[0].clone());
            continue;
        }
        let member_ids: Vec<String> = members.iter().map(|node| node.id.clone()).collect();
        let representative = members[0];
        let node = GraphNode {
            id: cluster_id.clone(),
            name: cluster_name(members.len(), representative),
            node_type: representative.node_type,
            subtype: representative.subtype,
            sbom_id: representative.sbom_id.clone(),
            component_id: String::new(),
            color: representative.color.clone(),
            is_common: members.iter().any(|node| node.is_common),
            common_key: None,
            is_cluster: true,
            node_count: Some(members.len()),
            member_ids: Some(member_ids.clone()),
        };
        nodes.push(node.clone());
        clusters.insert(
            cluster_id.clone(),
            ClusterState {
                node,
                member_ids,
                stashed_links: Vec::new(),
            },
        );
    }

    let node_ids: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let mut links: Vec<GraphLink> = Vec::new();
    // Merged cluster-to-cluster edges, keyed by ordered endpoint pair.
    let mut merged_index: HashMap<(String, String), usize> = HashMap::new();

    for link in &raw.links {
        let source = assignment
            .get(link.source.as_str())
            .cloned()
            .unwrap_or_else(|| link.source.clone());
        let target = assignment
            .get(link.target.as_str())
            .cloned()
            .unwrap_or_else(|| link.target.clone());

        if source == target {
            continue;
        }
        if !node_ids.contains(source.as_str()) || !node_ids.contains(target.as_str()) {
            continue;
        }

        let source_is_cluster = clusters.contains_key(&source);
        let target_is_cluster = clusters.contains_key(&target);

        if source_is_cluster && target_is_cluster {
            let pair = (source.clone(), target.clone());
            if let Some(&index) = merged_index.get(&pair) {
                links[index].count += 1;
            } else {
                merged_index.insert(pair, links.len());
                links.push(GraphLink {
                    source,
                    target,
                    kind: link.kind,
                    label: String::new(),
                    sbom_id: None,
                    count: 1,
                });
            }
        } else {
            links.push(GraphLink {
                source,
                target,
                kind: link.kind,
                label: link.label.clone(),
                sbom_id: link.sbom_id.clone(),
                count: 1,
            });
        }
    }

    (GraphData { nodes, links }, clusters)
}

fn cluster_id_for(node: &GraphNode) -> String {
    match node.subtype {
        Some(subtype) => format!("cluster:{}:{}:{}", node.sbom_id, node.node_type, subtype),
        None => format!("cluster:{}:{}", node.sbom_id, node.node_type),
    }
}

fn cluster_name(count: usize, representative: &GraphNode) -> String {
    match representative.subtype {
        Some(SoftwareSubtype::Other) | None => {
            format!("{} {} components", count, representative.node_type)
        }
        Some(subtype) => format!("{} {} components ({})", count, representative.node_type, subtype),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_analysis::domain::{LinkKind, SbomId};

    fn node(id: &str, subtype: SoftwareSubtype) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            name: id.to_string(),
            node_type: ComponentType::Software,
            subtype: Some(subtype),
            sbom_id: SbomId::from("sbom-a"),
            component_id: id.to_string(),
            color: "#4e79a7".to_string(),
            is_common: false,
            common_key: None,
            is_cluster: false,
            node_count: None,
            member_ids: None,
        }
    }

    fn system_node(id: &str) -> GraphNode {
        GraphNode {
            node_type: ComponentType::System,
            subtype: None,
            ..node(id, SoftwareSubtype::Other)
        }
    }

    fn link(source: &str, target: &str) -> GraphLink {
        GraphLink {
            source: source.to_string(),
            target: target.to_string(),
            kind: LinkKind::Relationship,
            label: String::new(),
            sbom_id: None,
            count: 1,
        }
    }

    fn many_nodes(count: usize) -> GraphData {
        let nodes = (0..count)
            .map(|i| node(&format!("n{i}"), SoftwareSubtype::Other))
            .collect();
        GraphData {
            nodes,
            links: vec![],
        }
    }

    #[test]
    fn test_no_clustering_below_threshold() {
        let raw = many_nodes(30);
        let view = GraphView::new(raw.clone(), &ReducerConfig::default());
        assert_eq!(view.graph(), &raw);
    }

    #[test]
    fn test_cluster_replaces_homogeneous_group() {
        let raw = many_nodes(35);
        let view = GraphView::new(raw, &ReducerConfig::default());

        assert_eq!(view.graph().node_count(), 1);
        let cluster = &view.graph().nodes[0];
        assert!(cluster.is_cluster);
        assert_eq!(cluster.node_count, Some(35));
        assert_eq!(cluster.member_ids.as_ref().unwrap().len(), 35);
        assert!(cluster.name.contains("35"));
    }

    #[test]
    fn test_no_singleton_clusters() {
        let mut raw = many_nodes(35);
        raw.nodes.push(node("lonely-exe", SoftwareSubtype::Executable));
        let view = GraphView::new(raw, &ReducerConfig::default());

        assert!(view
            .graph()
            .nodes
            .iter()
            .all(|n| !n.is_cluster || n.node_count.unwrap_or(0) >= 2));
        // The singleton passes through as a regular node.
        assert!(view.graph().nodes.iter().any(|n| n.id == "lonely-exe"));
    }

    #[test]
    fn test_system_nodes_never_clustered() {
        let mut raw = many_nodes(35);
        raw.nodes.push(system_node("sys-1"));
        raw.nodes.push(system_node("sys-2"));
        let view = GraphView::new(raw, &ReducerConfig::default());

        assert!(view.graph().nodes.iter().any(|n| n.id == "sys-1"));
        assert!(view.graph().nodes.iter().any(|n| n.id == "sys-2"));
    }

    #[test]
    fn test_high_degree_nodes_exempted() {
        let mut raw = many_nodes(40);
        // n0 connects to six peers, pushing its degree past the exemption bar.
        for i in 1..=6 {
            raw.links.push(link("n0", &format!("n{i}")));
        }
        let view = GraphView::new(raw, &ReducerConfig::default());
        assert!(view.graph().nodes.iter().any(|n| n.id == "n0"));
    }

    #[test]
    fn test_common_node_with_modest_degree_exempted() {
        let mut raw = many_nodes(40);
        raw.nodes[0].is_common = true;
        raw.links.push(link("n0", "n1"));
        raw.links.push(link("n2", "n0"));
        raw.links.push(link("n0", "n3"));
        let view = GraphView::new(raw, &ReducerConfig::default());
        assert!(view.graph().nodes.iter().any(|n| n.id == "n0"));
    }

    #[test]
    fn test_cluster_inherits_commonality_from_members() {
        let mut raw = many_nodes(35);
        raw.nodes[10].is_common = true;
        let view = GraphView::new(raw, &ReducerConfig::default());
        assert!(view.graph().nodes[0].is_common);
    }

    fn two_cluster_graph() -> GraphData {
        // 20 "other" nodes and 20 libraries with three parallel edges between
        // the groups.
        let mut nodes: Vec<GraphNode> = (0..20)
            .map(|i| node(&format!("o{i}"), SoftwareSubtype::Other))
            .collect();
        nodes.extend((0..20).map(|i| node(&format!("l{i}"), SoftwareSubtype::Library)));
        let links = vec![link("o0", "l0"), link("o1", "l1"), link("o2", "l2")];
        GraphData { nodes, links }
    }

    #[test]
    fn test_cluster_to_cluster_links_merged_with_count() {
        let view = GraphView::new(two_cluster_graph(), &ReducerConfig::default());
        assert_eq!(view.graph().node_count(), 2);
        assert_eq!(view.graph().link_count(), 1);
        assert_eq!(view.graph().links[0].count, 3);
    }

    #[test]
    fn test_intra_cluster_links_dropped() {
        let mut raw = many_nodes(35);
        raw.links.push(link("n1", "n2"));
        let view = GraphView::new(raw, &ReducerConfig::default());
        assert_eq!(view.graph().link_count(), 0);
    }

    #[test]
    fn test_edge_into_singleton_group_is_dropped() {
        // Known sharp edge: an edge from an exempted node to a node whose
        // group never materialized as a cluster disappears, even though the
        // singleton node itself survives.
        let mut raw = many_nodes(40);
        raw.nodes.push(system_node("sys"));
        raw.nodes.push(node("lonely-exe", SoftwareSubtype::Executable));
        raw.links.push(link("sys", "lonely-exe"));
        let view = GraphView::new(raw, &ReducerConfig::default());

        assert!(view.graph().nodes.iter().any(|n| n.id == "lonely-exe"));
        assert!(!view
            .graph()
            .links
            .iter()
            .any(|l| l.source == "sys" && l.target == "lonely-exe"));
    }

    #[test]
    fn test_important_to_cluster_edge_rewritten() {
        let mut raw = many_nodes(35);
        raw.nodes.push(system_node("sys"));
        raw.links.push(link("sys", "n3"));
        let view = GraphView::new(raw, &ReducerConfig::default());

        let cluster_id = view
            .graph()
            .nodes
            .iter()
            .find(|n| n.is_cluster)
            .unwrap()
            .id
            .clone();
        assert!(view
            .graph()
            .links
            .iter()
            .any(|l| l.source == "sys" && l.target == cluster_id));
    }

    fn sorted_ids(graph: &GraphData) -> (Vec<String>, Vec<(String, String)>) {
        let mut nodes: Vec<String> = graph.nodes.iter().map(|n| n.id.clone()).collect();
        nodes.sort();
        let mut links: Vec<(String, String)> = graph
            .links
            .iter()
            .map(|l| (l.source.clone(), l.target.clone()))
            .collect();
        links.sort();
        (nodes, links)
    }

    #[test]
    fn test_expand_then_collapse_restores_prior_state() {
        let mut raw = many_nodes(35);
        raw.nodes.push(system_node("sys"));
        raw.links.push(link("sys", "n3"));
        let mut view = GraphView::new(raw, &ReducerConfig::default());

        let cluster_id = view
            .graph()
            .nodes
            .iter()
            .find(|n| n.is_cluster)
            .unwrap()
            .id
            .clone();
        let before = sorted_ids(view.graph());

        assert!(view.expand(&cluster_id));
        assert!(view.is_expanded(&cluster_id));
        // Members and their raw links are back while expanded.
        assert_eq!(view.graph().node_count(), 36);
        assert!(view
            .graph()
            .links
            .iter()
            .any(|l| l.source == "sys" && l.target == "n3"));

        assert!(view.collapse(&cluster_id));
        assert_eq!(sorted_ids(view.graph()), before);
    }

    #[test]
    fn test_expand_unknown_or_repeated() {
        let mut view = GraphView::new(many_nodes(35), &ReducerConfig::default());
        assert!(!view.expand("no-such-cluster"));
        let cluster_id = view.graph().nodes[0].id.clone();
        assert!(view.expand(&cluster_id));
        assert!(!view.expand(&cluster_id));
        assert!(view.collapse(&cluster_id));
        assert!(!view.collapse(&cluster_id));
    }

    #[test]
    fn test_runtime_threshold_takes_effect() {
        let raw = many_nodes(20);
        let config = ReducerConfig {
            cluster_threshold: 10,
            max_nodes: 500,
        };
        let view = GraphView::new(raw, &config);
        assert_eq!(view.graph().node_count(), 1);
        assert!(view.graph().nodes[0].is_cluster);
    }
}
