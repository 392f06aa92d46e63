use std::fmt;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::{Hardware, Relationship, Software, System};

/// Display colors assigned to SBOMs in ingestion order. The cursor into this
/// palette never rewinds on deletion, so a color is only reused after the
/// palette wraps around.
pub const COLOR_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// Opaque identifier assigned to an SBOM at ingestion.
///
/// Generated from a v4 UUID so rapid successive imports never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SbomId(String);

impl SbomId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SbomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SbomId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Derived per-SBOM counters shown alongside the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SbomStats {
    pub total_components: usize,
    pub software_count: usize,
    pub executable_count: usize,
    pub library_count: usize,
    /// Human-formatted earliest capture time, or "unknown".
    pub capture_time: String,
}

/// Aggregate root for one ingested SBOM document.
///
/// Created by successful normalization of one input document and immutable
/// afterwards; removal from the store is the only way it goes away.
#[derive(Debug, Clone)]
pub struct Sbom {
    pub id: SbomId,
    pub file_name: String,
    pub color: String,
    pub systems: Vec<System>,
    pub hardware: Vec<Hardware>,
    pub software: Vec<Software>,
    pub relationships: Vec<Relationship>,
    pub stats: SbomStats,
}

impl Sbom {
    pub fn new(
        file_name: String,
        color: String,
        systems: Vec<System>,
        hardware: Vec<Hardware>,
        software: Vec<Software>,
        relationships: Vec<Relationship>,
    ) -> Self {
        let stats = SbomStats::compute(&systems, &hardware, &software);
        Self {
            id: SbomId::generate(),
            file_name,
            color,
            systems,
            hardware,
            software,
            relationships,
            stats,
        }
    }
}

impl SbomStats {
    fn compute(systems: &[System], hardware: &[Hardware], software: &[Software]) -> Self {
        let executable_count = software.iter().filter(|sw| sw.is_executable()).count();
        let library_count = software.iter().filter(|sw| sw.is_library()).count();

        let earliest = systems
            .iter()
            .map(|sys| sys.capture_start)
            .chain(software.iter().map(|sw| sw.capture_time))
            .filter(|&ts| ts > 0)
            .min();

        Self {
            total_components: systems.len() + hardware.len() + software.len(),
            software_count: software.len(),
            executable_count,
            library_count,
            capture_time: format_capture_time(earliest),
        }
    }
}

fn format_capture_time(timestamp: Option<i64>) -> String {
    match timestamp.and_then(|ts| Utc.timestamp_opt(ts, 0).single()) {
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "unknown".to_string(),
    }
}
