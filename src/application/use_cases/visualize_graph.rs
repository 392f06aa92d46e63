use crate::application::dto::VisualizeRequest;
use crate::application::read_models::{GraphSnapshot, SbomSummary};
use crate::sbom_analysis::services::{GraphBuilder, GraphView, SbomStore};

/// VisualizeGraphUseCase - One synchronous graph computation
///
/// Projects the store's visible SBOMs into a merged graph and reduces it
/// according to the request's thresholds. The whole computation runs on the
/// calling sequence; the store is read but never mutated.
pub struct VisualizeGraphUseCase;

impl VisualizeGraphUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Builds a reducible graph view for interactive hosts that need
    /// expand/collapse over clusters.
    pub fn build_view(&self, store: &SbomStore, request: &VisualizeRequest) -> GraphView {
        let raw = GraphBuilder::new(store).build(request.visible.as_deref(), &request.filter);
        GraphView::new(raw, &request.reducer)
    }

    /// Computes a one-shot snapshot for formatting and export.
    pub fn execute(&self, store: &SbomStore, request: &VisualizeRequest) -> GraphSnapshot {
        let raw = GraphBuilder::new(store).build(request.visible.as_deref(), &request.filter);
        let raw_node_count = raw.node_count();
        let raw_link_count = raw.link_count();
        let view = GraphView::new(raw, &request.reducer);

        let sboms = store
            .sboms()
            .iter()
            .filter(|sbom| match &request.visible {
                Some(visible) => visible.contains(&sbom.id),
                None => true,
            })
            .map(|sbom| SbomSummary {
                id: sbom.id.clone(),
                file_name: sbom.file_name.clone(),
                color: sbom.color.clone(),
                stats: sbom.stats.clone(),
            })
            .collect();

        GraphSnapshot {
            sboms,
            graph: view.graph().clone(),
            common_components: store.find_common_components(),
            raw_node_count,
            raw_link_count,
        }
    }
}

impl Default for VisualizeGraphUseCase {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_analysis::services::ReducerConfig;
    use crate::sbom_analysis::services::TypeFilter;

    fn store_with_many_software(count: usize) -> SbomStore {
        let entries: Vec<String> = (0..count)
            .map(|i| format!(r#"{{"UUID": "sw{i}", "name": "pkg{i}", "sha256": "h{i}"}}"#))
            .collect();
        let doc = format!(r#"{{"software": [{}]}}"#, entries.join(","));
        let mut store = SbomStore::new();
        store.add_sbom(&doc, "big.json").unwrap();
        store
    }

    #[test]
    fn test_execute_reduces_above_threshold() {
        let store = store_with_many_software(35);
        let request = VisualizeRequest::new(
            None,
            TypeFilter::default(),
            ReducerConfig {
                cluster_threshold: 30,
                max_nodes: 500,
            },
        );
        let snapshot = VisualizeGraphUseCase::new().execute(&store, &request);

        assert_eq!(snapshot.raw_node_count, 35);
        assert_eq!(snapshot.graph.node_count(), 1);
        assert!(snapshot.graph.nodes[0].is_cluster);
        assert_eq!(snapshot.sboms.len(), 1);
    }

    #[test]
    fn test_execute_below_threshold_keeps_graph() {
        let store = store_with_many_software(5);
        let request = VisualizeRequest::default();
        let snapshot = VisualizeGraphUseCase::new().execute(&store, &request);
        assert_eq!(snapshot.graph.node_count(), 5);
        assert!(snapshot.graph.nodes.iter().all(|node| !node.is_cluster));
    }

    #[test]
    fn test_build_view_supports_expansion() {
        let store = store_with_many_software(35);
        let request = VisualizeRequest::default();
        let mut view = VisualizeGraphUseCase::new().build_view(&store, &request);
        let cluster_id = view.graph().nodes[0].id.clone();
        assert!(view.expand(&cluster_id));
        assert_eq!(view.graph().node_count(), 35);
    }
}
