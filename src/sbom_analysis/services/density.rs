//! Lossy density reduction for graphs that stay too large after clustering.
//!
//! Nodes are scored by type, commonality and connectivity, sorted descending
//! and capped at the configured maximum. The sort is stable so ties keep
//! their original relative order and repeated runs reproduce the same graph.

use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use crate::sbom_analysis::domain::{ComponentType, GraphData, GraphNode, SoftwareSubtype};

const SYSTEM_SCORE: i64 = 5;
const HARDWARE_SCORE: i64 = 2;
const EXECUTABLE_SCORE: i64 = 2;
const LIBRARY_SCORE: i64 = 1;
const COMMON_BONUS: i64 = 3;

/// Keeps the `max_nodes` highest-scoring nodes and drops every link whose
/// endpoints are not both retained.
pub fn density_reduce(graph: &GraphData, max_nodes: usize) -> GraphData {
    if graph.node_count() <= max_nodes {
        return graph.clone();
    }

    let mut degree: HashMap<&str, i64> = HashMap::new();
    for link in &graph.links {
        *degree.entry(link.source.as_str()).or_default() += 1;
        *degree.entry(link.target.as_str()).or_default() += 1;
    }

    let mut scored: Vec<(&GraphNode, i64)> = graph
        .nodes
        .iter()
        .map(|node| {
            let connectivity = degree.get(node.id.as_str()).copied().unwrap_or(0);
            (node, importance_score(node) + connectivity)
        })
        .collect();
    scored.sort_by_key(|(_, score)| Reverse(*score));
    scored.truncate(max_nodes);

    let nodes: Vec<GraphNode> = scored.into_iter().map(|(node, _)| node.clone()).collect();
    let retained: HashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let links = graph
        .links
        .iter()
        .filter(|link| {
            retained.contains(link.source.as_str()) && retained.contains(link.target.as_str())
        })
        .cloned()
        .collect();

    GraphData { nodes, links }
}

fn importance_score(node: &GraphNode) -> i64 {
    let base = match (node.node_type, node.subtype) {
        (ComponentType::System, _) => SYSTEM_SCORE,
        (ComponentType::Hardware, _) => HARDWARE_SCORE,
        (ComponentType::Software, Some(SoftwareSubtype::Executable)) => EXECUTABLE_SCORE,
        (ComponentType::Software, Some(SoftwareSubtype::Library)) => LIBRARY_SCORE,
        (ComponentType::Software, _) => 0,
    };
    if node.is_common {
        base + COMMON_BONUS
    } else {
        base
    }
}
