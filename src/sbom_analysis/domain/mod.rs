pub mod component;
pub mod graph;
pub mod identity;
pub mod relationship;
pub mod sbom;

pub use component::{
    ComponentRef, ComponentType, ElfMetadata, Hardware, Software, SoftwareSubtype, System,
};
pub use graph::{GraphData, GraphLink, GraphNode, LinkKind};
pub use identity::{CommonComponent, CommonOccurrence, IdentityKey};
pub use relationship::Relationship;
pub use sbom::{Sbom, SbomId, SbomStats, COLOR_PALETTE};
