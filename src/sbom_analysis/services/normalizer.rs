//! Entity normalization for raw SBOM documents.
//!
//! Input documents are permissively typed: any field may be missing. Missing
//! string fields default to empty, lists to empty lists, numbers to 0, and
//! missing names fall back to type-specific placeholders. A schema-incomplete
//! document is never an error; only malformed JSON is.

use anyhow::Context;
use serde::Deserialize;

use crate::sbom_analysis::domain::{
    ElfMetadata, Hardware, Relationship, Software, System,
};
use crate::shared::Result;

const UNNAMED_SYSTEM: &str = "Unnamed System";
const UNNAMED_HARDWARE: &str = "Unnamed Hardware";
const UNNAMED_COMPONENT: &str = "Unnamed Component";

/// All four normalized collections of one input document, before the store
/// assigns it an id and a color.
#[derive(Debug, Clone, Default)]
pub struct NormalizedDocument {
    pub systems: Vec<System>,
    pub hardware: Vec<Hardware>,
    pub software: Vec<Software>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawDocument {
    systems: Vec<RawSystem>,
    hardware: Vec<RawHardware>,
    software: Vec<RawSoftware>,
    relationships: Vec<RawRelationship>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawSystem {
    #[serde(rename = "UUID")]
    uuid: String,
    name: String,
    vendor: String,
    #[serde(rename = "captureStart")]
    capture_start: i64,
    #[serde(rename = "captureEnd")]
    capture_end: i64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawHardware {
    #[serde(rename = "UUID")]
    uuid: String,
    name: String,
    vendor: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawSoftware {
    #[serde(rename = "UUID")]
    uuid: String,
    name: String,
    #[serde(rename = "fileName")]
    file_name: Vec<String>,
    version: String,
    size: u64,
    vendor: Vec<String>,
    description: String,
    #[serde(rename = "installPath")]
    install_path: Vec<String>,
    #[serde(rename = "containerPath")]
    container_path: Vec<String>,
    #[serde(rename = "captureTime")]
    capture_time: i64,
    sha1: String,
    sha256: String,
    md5: String,
    metadata: Vec<RawMetadataEntry>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawMetadataEntry {
    #[serde(rename = "OS")]
    os: String,
    /// Presence marker; the value itself is not interpreted.
    #[serde(rename = "elfIdent")]
    elf_ident: Option<serde_json::Value>,
    #[serde(rename = "elfIsExe")]
    elf_is_exe: bool,
    #[serde(rename = "elfIsLib")]
    elf_is_lib: bool,
    #[serde(rename = "elfDependencies")]
    elf_dependencies: Vec<String>,
    #[serde(rename = "elfSoname")]
    elf_soname: String,
    #[serde(rename = "elfInterpreter")]
    elf_interpreter: String,
    #[serde(rename = "elfHumanArch")]
    elf_human_arch: String,
    #[serde(rename = "elfComment")]
    elf_comment: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawRelationship {
    #[serde(rename = "xUUID")]
    x_uuid: String,
    #[serde(rename = "yUUID")]
    y_uuid: String,
    relationship: String,
}

/// Parses and normalizes one raw SBOM document.
///
/// # Errors
/// Returns an error only for malformed JSON; missing fields and arrays
/// degrade to defaults.
pub fn normalize_document(raw_json: &str) -> Result<NormalizedDocument> {
    let raw: RawDocument =
        serde_json::from_str(raw_json).context("Failed to parse SBOM document as JSON")?;

    Ok(NormalizedDocument {
        systems: raw.systems.into_iter().map(normalize_system).collect(),
        hardware: raw.hardware.into_iter().map(normalize_hardware).collect(),
        software: raw.software.into_iter().map(normalize_software).collect(),
        relationships: raw
            .relationships
            .into_iter()
            .map(normalize_relationship)
            .collect(),
    })
}

fn normalize_system(raw: RawSystem) -> System {
    System {
        id: raw.uuid,
        name: fallback_name(raw.name, UNNAMED_SYSTEM),
        vendor: raw.vendor,
        capture_start: raw.capture_start,
        capture_end: raw.capture_end,
    }
}

fn normalize_hardware(raw: RawHardware) -> Hardware {
    Hardware {
        id: raw.uuid,
        name: fallback_name(raw.name, UNNAMED_HARDWARE),
        vendor: raw.vendor,
    }
}

fn normalize_software(raw: RawSoftware) -> Software {
    // Three-tier name fallback: explicit name, then first filename, then the
    // placeholder literal. The preference order is a contract point.
    let name = if !raw.name.is_empty() {
        raw.name
    } else if let Some(first) = raw.file_name.first() {
        first.clone()
    } else {
        UNNAMED_COMPONENT.to_string()
    };

    let elf_metadata = extract_elf_metadata(&raw.metadata);

    Software {
        id: raw.uuid,
        name,
        file_name: raw.file_name,
        version: raw.version,
        size: raw.size,
        vendor: raw.vendor,
        description: raw.description,
        install_path: raw.install_path,
        container_path: raw.container_path,
        capture_time: raw.capture_time,
        sha1: raw.sha1,
        sha256: raw.sha256,
        md5: raw.md5,
        elf_metadata,
    }
}

fn normalize_relationship(raw: RawRelationship) -> Relationship {
    Relationship::new(raw.x_uuid, raw.y_uuid, raw.relationship)
}

/// Scans the metadata list in order and extracts ELF descriptors from the
/// first entry with `OS == "Linux"` and an `elfIdent` marker. No qualifying
/// entry yields `None`, which downstream code must distinguish from ELF data
/// whose fields are all empty.
fn extract_elf_metadata(entries: &[RawMetadataEntry]) -> Option<ElfMetadata> {
    entries
        .iter()
        .find(|entry| entry.os == "Linux" && entry.elf_ident.is_some())
        .map(|entry| ElfMetadata {
            is_executable: entry.elf_is_exe,
            is_library: entry.elf_is_lib,
            dependencies: entry.elf_dependencies.clone(),
            soname: entry.elf_soname.clone(),
            interpreter: entry.elf_interpreter.clone(),
            architecture: entry.elf_human_arch.clone(),
            comments: entry.elf_comment.clone(),
        })
}

fn fallback_name(name: String, placeholder: &str) -> String {
    if name.is_empty() {
        placeholder.to_string()
    } else {
        name
    }
}
