use std::fmt;

use super::IdentityKey;

/// Discriminant for the three component kinds an SBOM can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentType {
    System,
    Hardware,
    Software,
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentType::System => write!(f, "system"),
            ComponentType::Hardware => write!(f, "hardware"),
            ComponentType::Software => write!(f, "software"),
        }
    }
}

/// Software subtype derived from ELF metadata flags.
///
/// A component with both the executable and library flags set is treated
/// as an executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoftwareSubtype {
    Executable,
    Library,
    Other,
}

impl fmt::Display for SoftwareSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoftwareSubtype::Executable => write!(f, "executable"),
            SoftwareSubtype::Library => write!(f, "library"),
            SoftwareSubtype::Other => write!(f, "other"),
        }
    }
}

/// A captured system (the machine or image a scan was taken from).
#[derive(Debug, Clone, PartialEq)]
pub struct System {
    pub id: String,
    pub name: String,
    pub vendor: String,
    /// Unix-seconds timestamps; 0 when absent from the input.
    pub capture_start: i64,
    pub capture_end: i64,
}

/// A hardware component declared by an SBOM.
#[derive(Debug, Clone, PartialEq)]
pub struct Hardware {
    pub id: String,
    pub name: String,
    pub vendor: Vec<String>,
}

/// ELF descriptors extracted from a software component's metadata list.
///
/// `None` on [`Software::elf_metadata`] means no qualifying metadata entry
/// existed; that is distinct from an entry whose fields are all empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElfMetadata {
    pub is_executable: bool,
    pub is_library: bool,
    /// Referenced filenames / sonames this binary links against.
    pub dependencies: Vec<String>,
    pub soname: String,
    pub interpreter: String,
    pub architecture: String,
    pub comments: String,
}

/// A software component declared by an SBOM.
///
/// String fields default to empty and list fields to empty lists when the
/// source record omitted them; the normalizer guarantees `name` is never
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Software {
    pub id: String,
    pub name: String,
    pub file_name: Vec<String>,
    pub version: String,
    pub size: u64,
    pub vendor: Vec<String>,
    pub description: String,
    pub install_path: Vec<String>,
    pub container_path: Vec<String>,
    pub capture_time: i64,
    pub sha1: String,
    pub sha256: String,
    pub md5: String,
    pub elf_metadata: Option<ElfMetadata>,
}

impl Software {
    /// Content identity for cross-SBOM comparison.
    ///
    /// SHA-256 identity is preferred; a component with no hash falls back to
    /// its first filename. A component with neither is excluded from identity
    /// comparison entirely and can never be found common.
    pub fn identity_key(&self) -> Option<IdentityKey> {
        if !self.sha256.is_empty() {
            return Some(IdentityKey::Sha256(self.sha256.clone()));
        }
        self.file_name
            .first()
            .map(|name| IdentityKey::FileName(name.clone()))
    }

    pub fn subtype(&self) -> SoftwareSubtype {
        match &self.elf_metadata {
            Some(elf) if elf.is_executable => SoftwareSubtype::Executable,
            Some(elf) if elf.is_library => SoftwareSubtype::Library,
            _ => SoftwareSubtype::Other,
        }
    }

    pub fn is_executable(&self) -> bool {
        self.subtype() == SoftwareSubtype::Executable
    }

    pub fn is_library(&self) -> bool {
        self.subtype() == SoftwareSubtype::Library
    }
}

/// Borrowed view over any component variant.
///
/// Query operations return this so callers can work with mixed result sets
/// without cloning the underlying records.
#[derive(Debug, Clone, Copy)]
pub enum ComponentRef<'a> {
    System(&'a System),
    Hardware(&'a Hardware),
    Software(&'a Software),
}

impl<'a> ComponentRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ComponentRef::System(s) => &s.id,
            ComponentRef::Hardware(h) => &h.id,
            ComponentRef::Software(s) => &s.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ComponentRef::System(s) => &s.name,
            ComponentRef::Hardware(h) => &h.name,
            ComponentRef::Software(s) => &s.name,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentRef::System(_) => ComponentType::System,
            ComponentRef::Hardware(_) => ComponentType::Hardware,
            ComponentRef::Software(_) => ComponentType::Software,
        }
    }
}
