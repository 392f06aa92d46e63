//! Projection of normalized SBOMs into a merged node/link graph.
//!
//! Nodes wrap visible, type-filtered components. Links come in three kinds:
//! edges copied from each SBOM's own relationship list, pairwise
//! common-component edges across documents, and dependency edges inferred
//! from ELF metadata.

use std::collections::{HashMap, HashSet};

use crate::sbom_analysis::domain::{
    CommonComponent, ComponentType, GraphData, GraphLink, GraphNode, IdentityKey, LinkKind, Sbom,
    SbomId, Software,
};
use crate::sbom_analysis::services::store::SbomStore;

/// Active component-type selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeFilter {
    pub systems: bool,
    pub hardware: bool,
    pub software: bool,
}

impl Default for TypeFilter {
    fn default() -> Self {
        Self {
            systems: true,
            hardware: true,
            software: true,
        }
    }
}

impl TypeFilter {
    pub fn allows(&self, component_type: ComponentType) -> bool {
        match component_type {
            ComponentType::System => self.systems,
            ComponentType::Hardware => self.hardware,
            ComponentType::Software => self.software,
        }
    }
}

/// Builds graph projections against a store snapshot.
pub struct GraphBuilder<'a> {
    store: &'a SbomStore,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(store: &'a SbomStore) -> Self {
        Self { store }
    }

    /// Produces the merged graph for the given visible SBOM selection and
    /// type filter. `None` selects every SBOM in the store.
    ///
    /// Edges whose endpoints were filtered out or never existed are silently
    /// dropped.
    pub fn build(&self, visible: Option<&[SbomId]>, filter: &TypeFilter) -> GraphData {
        let visible_set: Option<HashSet<&SbomId>> =
            visible.map(|ids| ids.iter().collect());
        let sboms: Vec<&Sbom> = self
            .store
            .sboms()
            .iter()
            .filter(|sbom| match &visible_set {
                Some(set) => set.contains(&sbom.id),
                None => true,
            })
            .collect();

        let commons = self.store.find_common_components();
        let common_by_key: HashMap<&IdentityKey, &CommonComponent> =
            commons.iter().map(|record| (&record.key, record)).collect();

        let mut nodes: Vec<GraphNode> = Vec::new();
        // Raw component id -> node id, per SBOM, for relationship resolution.
        let mut node_ids_by_sbom: HashMap<&SbomId, HashMap<&str, String>> = HashMap::new();
        // Software retained per node for the dependency pass.
        let mut software_nodes: Vec<(String, &Software)> = Vec::new();

        for sbom in &sboms {
            let ids = node_ids_by_sbom.entry(&sbom.id).or_default();

            if filter.allows(ComponentType::System) {
                for system in &sbom.systems {
                    let node_id = qualified_id(&sbom.id, &system.id, nodes.len());
                    ids.entry(system.id.as_str()).or_insert_with(|| node_id.clone());
                    nodes.push(GraphNode {
                        id: node_id,
                        name: system.name.clone(),
                        node_type: ComponentType::System,
                        subtype: None,
                        sbom_id: sbom.id.clone(),
                        component_id: system.id.clone(),
                        color: sbom.color.clone(),
                        is_common: false,
                        common_key: None,
                        is_cluster: false,
                        node_count: None,
                        member_ids: None,
                    });
                }
            }

            if filter.allows(ComponentType::Hardware) {
                for hardware in &sbom.hardware {
                    let node_id = qualified_id(&sbom.id, &hardware.id, nodes.len());
                    ids.entry(hardware.id.as_str())
                        .or_insert_with(|| node_id.clone());
                    nodes.push(GraphNode {
                        id: node_id,
                        name: hardware.name.clone(),
                        node_type: ComponentType::Hardware,
                        subtype: None,
                        sbom_id: sbom.id.clone(),
                        component_id: hardware.id.clone(),
                        color: sbom.color.clone(),
                        is_common: false,
                        common_key: None,
                        is_cluster: false,
                        node_count: None,
                        member_ids: None,
                    });
                }
            }

            if filter.allows(ComponentType::Software) {
                for software in &sbom.software {
                    let key = software.identity_key();
                    let is_common = key
                        .as_ref()
                        .map(|k| common_by_key.contains_key(k))
                        .unwrap_or(false);
                    let node_id = qualified_id(&sbom.id, &software.id, nodes.len());
                    ids.entry(software.id.as_str())
                        .or_insert_with(|| node_id.clone());
                    software_nodes.push((node_id.clone(), software));
                    nodes.push(GraphNode {
                        id: node_id,
                        name: software.name.clone(),
                        node_type: ComponentType::Software,
                        subtype: Some(software.subtype()),
                        sbom_id: sbom.id.clone(),
                        component_id: software.id.clone(),
                        color: sbom.color.clone(),
                        is_common,
                        common_key: if is_common { key } else { None },
                        is_cluster: false,
                        node_count: None,
                        member_ids: None,
                    });
                }
            }
        }

        let mut links: Vec<GraphLink> = Vec::new();

        for sbom in &sboms {
            let ids = &node_ids_by_sbom[&sbom.id];
            for relationship in &sbom.relationships {
                let (Some(source), Some(target)) = (
                    ids.get(relationship.source.as_str()),
                    ids.get(relationship.target.as_str()),
                ) else {
                    continue;
                };
                links.push(GraphLink {
                    source: source.clone(),
                    target: target.clone(),
                    kind: LinkKind::Relationship,
                    label: relationship.relation.clone(),
                    sbom_id: Some(sbom.id.clone()),
                    count: 1,
                });
            }
        }

        self.add_common_links(&commons, &node_ids_by_sbom, &mut links);
        Self::add_dependency_links(&software_nodes, &mut links);

        GraphData { nodes, links }
    }

    /// One link per pair of occurrences of the same identity key in two
    /// different SBOMs. A key held by k SBOMs produces pairwise edges, not a
    /// star.
    fn add_common_links(
        &self,
        commons: &[CommonComponent],
        node_ids_by_sbom: &HashMap<&SbomId, HashMap<&str, String>>,
        links: &mut Vec<GraphLink>,
    ) {
        for record in commons {
            for (i, first) in record.occurrences.iter().enumerate() {
                for second in &record.occurrences[i + 1..] {
                    if first.sbom_id == second.sbom_id {
                        continue;
                    }
                    let source = node_ids_by_sbom
                        .get(&first.sbom_id)
                        .and_then(|ids| ids.get(first.component_id.as_str()));
                    let target = node_ids_by_sbom
                        .get(&second.sbom_id)
                        .and_then(|ids| ids.get(second.component_id.as_str()));
                    let (Some(source), Some(target)) = (source, target) else {
                        continue;
                    };
                    links.push(GraphLink {
                        source: source.clone(),
                        target: target.clone(),
                        kind: LinkKind::CommonComponent,
                        label: String::new(),
                        sbom_id: None,
                        count: 1,
                    });
                }
            }
        }
    }

    /// Matches each software node's ELF dependency names against the
    /// filenames of every known software node, excluding self-links.
    fn add_dependency_links(software_nodes: &[(String, &Software)], links: &mut Vec<GraphLink>) {
        let mut by_file_name: HashMap<&str, Vec<&str>> = HashMap::new();
        for (node_id, software) in software_nodes {
            for file_name in &software.file_name {
                by_file_name
                    .entry(file_name.as_str())
                    .or_default()
                    .push(node_id.as_str());
            }
        }

        for (node_id, software) in software_nodes {
            let Some(elf) = &software.elf_metadata else {
                continue;
            };
            for dependency in &elf.dependencies {
                let Some(targets) = by_file_name.get(dependency.as_str()) else {
                    continue;
                };
                for target in targets {
                    if *target == node_id.as_str() {
                        continue;
                    }
                    links.push(GraphLink {
                        source: node_id.clone(),
                        target: (*target).to_string(),
                        kind: LinkKind::InferredDependency,
                        label: String::new(),
                        sbom_id: None,
                        count: 1,
                    });
                }
            }
        }
    }
}

/// Node ids are qualified by the owning SBOM; a positional suffix keeps
/// duplicated or empty component ids distinct within one document.
fn qualified_id(sbom_id: &SbomId, component_id: &str, position: usize) -> String {
    if component_id.is_empty() {
        format!("{}:#{}", sbom_id, position)
    } else {
        format!("{}:{}", sbom_id, component_id)
    }
}
