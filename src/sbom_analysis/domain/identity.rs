use std::fmt;

use super::{SbomId, Software};

/// Content identity used to test component equivalence across SBOMs.
///
/// The two tiers are never merged: a component identified by filename is
/// never considered equal to one identified by hash, even when the strings
/// happen to match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Sha256(String),
    FileName(String),
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Sha256(digest) => write!(f, "sha256:{}", digest),
            IdentityKey::FileName(name) => write!(f, "name:{}", name),
        }
    }
}

/// One occurrence of an identity key inside a particular SBOM.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonOccurrence {
    pub sbom_id: SbomId,
    pub component_id: String,
    pub component: Software,
}

/// A component shared by at least two distinct SBOMs.
///
/// Occurrences are listed in SBOM ingestion order; `sbom_ids` holds the
/// distinct owning SBOMs in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonComponent {
    pub key: IdentityKey,
    pub occurrences: Vec<CommonOccurrence>,
    pub sbom_ids: Vec<SbomId>,
}
