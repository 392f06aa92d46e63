//! SBOM collection with duplicate detection and the common-component index.
//!
//! The store is an explicit value owned by the caller and passed into the
//! pipeline stages; nothing here is global. It is the only mutable state in
//! the application, and its lifetime equals the session.

use std::collections::HashMap;

use crate::sbom_analysis::domain::{
    CommonComponent, CommonOccurrence, ComponentRef, IdentityKey, Sbom, SbomId, Software,
    COLOR_PALETTE,
};
use crate::sbom_analysis::services::normalizer::{normalize_document, NormalizedDocument};
use crate::shared::error::SbomGraphError;
use crate::shared::Result;

/// Candidate SBOMs whose per-kind component counts differ by more than this
/// total are never content-compared.
const COUNT_DIFF_LIMIT: usize = 5;

/// At most this many software entries are sampled for content comparison.
const SOFTWARE_SAMPLE_LIMIT: usize = 10;

/// Fraction of sampled software entries that must match for a duplicate
/// verdict.
const SOFTWARE_MATCH_FRACTION: f64 = 0.7;

/// Result of submitting a document to the store.
///
/// A duplicate is a recognized no-op outcome, distinct from a parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Added(SbomId),
    Duplicate,
}

/// One match returned by [`SbomStore::search_components`].
#[derive(Debug, Clone, Copy)]
pub struct SearchHit<'a> {
    pub component: ComponentRef<'a>,
    pub sbom_id: &'a SbomId,
}

/// Owns the collection of ingested SBOMs.
#[derive(Debug, Default)]
pub struct SbomStore {
    sboms: Vec<Sbom>,
    /// Monotonic palette cursor; never rewinds on deletion, so colors are
    /// only reused after wraparound.
    color_cursor: usize,
}

impl SbomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sboms(&self) -> &[Sbom] {
        &self.sboms
    }

    pub fn len(&self) -> usize {
        self.sboms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sboms.is_empty()
    }

    pub fn get_sbom(&self, id: &SbomId) -> Option<&Sbom> {
        self.sboms.iter().find(|sbom| &sbom.id == id)
    }

    /// Parses, normalizes and registers one document.
    ///
    /// Duplicate detection runs before anything is registered; on a duplicate
    /// verdict no state changes occur.
    ///
    /// # Errors
    /// Returns an error for malformed JSON. A failed parse never corrupts
    /// previously-loaded SBOMs.
    pub fn add_sbom(&mut self, raw_json: &str, file_name: &str) -> Result<IngestOutcome> {
        let document =
            normalize_document(raw_json).map_err(|e| SbomGraphError::DocumentParseError {
                file_name: file_name.to_string(),
                details: e.to_string(),
            })?;

        if self.is_duplicate(&document, file_name) {
            return Ok(IngestOutcome::Duplicate);
        }

        let color = COLOR_PALETTE[self.color_cursor % COLOR_PALETTE.len()].to_string();
        self.color_cursor += 1;

        let sbom = Sbom::new(
            file_name.to_string(),
            color,
            document.systems,
            document.hardware,
            document.software,
            document.relationships,
        );
        let id = sbom.id.clone();
        self.sboms.push(sbom);
        Ok(IngestOutcome::Added(id))
    }

    /// Removes an SBOM by id. Remaining SBOMs keep their colors.
    pub fn remove_sbom(&mut self, id: &SbomId) -> bool {
        let before = self.sboms.len();
        self.sboms.retain(|sbom| &sbom.id != id);
        self.sboms.len() != before
    }

    /// Duplicate heuristic. The thresholds are part of the observable
    /// contract: exact filename match; then, for each existing SBOM whose
    /// total count difference is within [`COUNT_DIFF_LIMIT`], a content
    /// comparison by system (name, vendor) pairs when both sides have
    /// systems, otherwise by sampled software hash/name+version overlap
    /// against [`SOFTWARE_MATCH_FRACTION`].
    fn is_duplicate(&self, document: &NormalizedDocument, file_name: &str) -> bool {
        if self.sboms.iter().any(|sbom| sbom.file_name == file_name) {
            return true;
        }

        for existing in &self.sboms {
            let count_diff = existing.software.len().abs_diff(document.software.len())
                + existing.systems.len().abs_diff(document.systems.len())
                + existing.hardware.len().abs_diff(document.hardware.len());
            if count_diff > COUNT_DIFF_LIMIT {
                continue;
            }

            if !document.systems.is_empty() && !existing.systems.is_empty() {
                let matched = document.systems.iter().any(|new_sys| {
                    existing
                        .systems
                        .iter()
                        .any(|old| old.name == new_sys.name && old.vendor == new_sys.vendor)
                });
                if matched {
                    return true;
                }
            } else if !document.software.is_empty()
                && Self::software_sample_matches(&document.software, &existing.software)
            {
                return true;
            }
        }

        false
    }

    fn software_sample_matches(candidates: &[Software], existing: &[Software]) -> bool {
        let sample_size = candidates.len().min(SOFTWARE_SAMPLE_LIMIT);
        let mut matches = 0usize;

        for candidate in &candidates[..sample_size] {
            let matched = if !candidate.sha256.is_empty() {
                existing.iter().any(|sw| sw.sha256 == candidate.sha256)
            } else if !candidate.name.is_empty() && !candidate.version.is_empty() {
                existing
                    .iter()
                    .any(|sw| sw.name == candidate.name && sw.version == candidate.version)
            } else {
                false
            };
            if matched {
                matches += 1;
            }
        }

        (matches as f64 / sample_size as f64) > SOFTWARE_MATCH_FRACTION
    }

    /// Recomputes the common-component index from the full collection.
    ///
    /// Only identity keys present in at least two distinct SBOMs qualify;
    /// repeated occurrences within one SBOM do not. Records and their
    /// occurrence lists follow SBOM ingestion order, so repeated calls with
    /// no intervening mutation return identical results.
    pub fn find_common_components(&self) -> Vec<CommonComponent> {
        let mut order: Vec<IdentityKey> = Vec::new();
        let mut records: HashMap<IdentityKey, CommonComponent> = HashMap::new();

        for sbom in &self.sboms {
            for software in &sbom.software {
                let Some(key) = software.identity_key() else {
                    continue;
                };
                let record = records.entry(key.clone()).or_insert_with(|| {
                    order.push(key.clone());
                    CommonComponent {
                        key,
                        occurrences: Vec::new(),
                        sbom_ids: Vec::new(),
                    }
                });
                record.occurrences.push(CommonOccurrence {
                    sbom_id: sbom.id.clone(),
                    component_id: software.id.clone(),
                    component: software.clone(),
                });
                if !record.sbom_ids.contains(&sbom.id) {
                    record.sbom_ids.push(sbom.id.clone());
                }
            }
        }

        order
            .into_iter()
            .filter_map(|key| records.remove(&key))
            .filter(|record| record.sbom_ids.len() >= 2)
            .collect()
    }

    /// Finds the first component with the given id, scanning every SBOM's
    /// systems, then all hardware, then all software. Ids are not guaranteed
    /// globally unique, so this priority order is significant.
    pub fn get_component_by_uuid(&self, id: &str) -> Option<(ComponentRef<'_>, &SbomId)> {
        for sbom in &self.sboms {
            if let Some(system) = sbom.systems.iter().find(|sys| sys.id == id) {
                return Some((ComponentRef::System(system), &sbom.id));
            }
        }
        for sbom in &self.sboms {
            if let Some(hardware) = sbom.hardware.iter().find(|hw| hw.id == id) {
                return Some((ComponentRef::Hardware(hardware), &sbom.id));
            }
        }
        for sbom in &self.sboms {
            if let Some(software) = sbom.software.iter().find(|sw| sw.id == id) {
                return Some((ComponentRef::Software(software), &sbom.id));
            }
        }
        None
    }

    /// Case-insensitive substring search over names and vendors of every
    /// component kind, plus filenames and descriptions of software.
    pub fn search_components(&self, query: &str) -> Vec<SearchHit<'_>> {
        let needle = query.to_lowercase();
        let mut hits = Vec::new();

        for sbom in &self.sboms {
            for system in &sbom.systems {
                if contains(&system.name, &needle) || contains(&system.vendor, &needle) {
                    hits.push(SearchHit {
                        component: ComponentRef::System(system),
                        sbom_id: &sbom.id,
                    });
                }
            }
            for hardware in &sbom.hardware {
                if contains(&hardware.name, &needle)
                    || hardware.vendor.iter().any(|v| contains(v, &needle))
                {
                    hits.push(SearchHit {
                        component: ComponentRef::Hardware(hardware),
                        sbom_id: &sbom.id,
                    });
                }
            }
            for software in &sbom.software {
                if contains(&software.name, &needle)
                    || software.vendor.iter().any(|v| contains(v, &needle))
                    || software.file_name.iter().any(|f| contains(f, &needle))
                    || contains(&software.description, &needle)
                {
                    hits.push(SearchHit {
                        component: ComponentRef::Software(software),
                        sbom_id: &sbom.id,
                    });
                }
            }
        }

        hits
    }
}

fn contains(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
