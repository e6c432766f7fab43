//! Typed records mirroring the logical provenance schema.
//!
//! Each `*Record` struct is a persisted row (primary key included); the
//! matching `New*` struct is the insert payload. Package identity is an
//! enum rather than a pair of nullable columns, so the "content_hash and
//! directory_code are mutually exclusive" invariant holds by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sbomdb_types::{
    ContentHash, DirectoryCode, FileType, RelationshipKind, VerificationCode,
};

/// Row id type shared by all tables.
pub type RowId = u64;

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// A registered file, keyed by its content hash.
///
/// Created on first registration and immutable thereafter; re-registering
/// the same content returns this row unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub file_id: RowId,
    pub content_hash: ContentHash,
    pub file_type: FileType,
    pub copyright_text: Option<String>,
    pub comment: String,
    pub notice: String,
}

/// Insert payload for a file row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewFile {
    pub content_hash: ContentHash,
    pub file_type: FileType,
    pub copyright_text: Option<String>,
    pub comment: String,
    pub notice: String,
}

impl NewFile {
    /// A freshly registered file: classified, with empty scanner fields.
    pub fn unscanned(content_hash: ContentHash, file_type: FileType) -> Self {
        Self {
            content_hash,
            file_type,
            copyright_text: None,
            comment: String::new(),
            notice: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Packages
// ---------------------------------------------------------------------------

/// How a package is identified for cache lookups.
///
/// Exactly one regime applies per package: a true package (single archive)
/// is addressed by its own content hash; a directory tree is addressed by
/// its directory code paired with the verification code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageIdentity {
    /// A single archive file, identified by its content hash.
    Archive(ContentHash),
    /// A directory tree, identified by its content-derived directory code.
    Tree(DirectoryCode),
}

impl PackageIdentity {
    /// The archive content hash, if this is a true package.
    pub fn content_hash(&self) -> Option<&ContentHash> {
        match self {
            PackageIdentity::Archive(hash) => Some(hash),
            PackageIdentity::Tree(_) => None,
        }
    }

    /// The directory code, if this is a directory tree.
    pub fn directory_code(&self) -> Option<&DirectoryCode> {
        match self {
            PackageIdentity::Archive(_) => None,
            PackageIdentity::Tree(code) => Some(code),
        }
    }
}

/// A registered package: an archive or a directory tree plus its
/// verification code and descriptive fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub package_id: RowId,
    pub identity: PackageIdentity,
    pub verification_code: VerificationCode,
    pub name: String,
    pub version: String,
    pub file_name: String,
    pub download_location: Option<String>,
    pub home_page: Option<String>,
    pub source_info: String,
    pub summary: String,
    pub description: String,
    pub comment: String,
}

impl PackageRecord {
    /// The fingerprint used when generating this package's identifier
    /// string: the archive hash for true packages, the verification code
    /// for directory trees.
    pub fn fingerprint_hex(&self) -> String {
        match &self.identity {
            PackageIdentity::Archive(hash) => hash.to_hex(),
            PackageIdentity::Tree(_) => self.verification_code.to_hex(),
        }
    }
}

/// Insert payload for a package row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPackage {
    pub identity: PackageIdentity,
    pub verification_code: VerificationCode,
    pub name: String,
    pub version: String,
    pub file_name: String,
    pub download_location: Option<String>,
    pub home_page: Option<String>,
    pub source_info: String,
    pub summary: String,
    pub description: String,
    pub comment: String,
}

/// A file's membership in a package, carrying the path relative to the
/// package root. Owned by the package; a file may belong to many packages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFileRecord {
    pub package_file_id: RowId,
    pub package_id: RowId,
    pub file_id: RowId,
    pub relative_path: String,
    pub concluded_license: Option<String>,
    pub license_comment: String,
}

/// Insert payload for a package-file association (the owning package id is
/// supplied by [`insert_package_with_files`]).
///
/// [`insert_package_with_files`]: crate::ProvenanceStore::insert_package_with_files
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPackageFile {
    pub file_id: RowId,
    pub relative_path: String,
    pub concluded_license: Option<String>,
    pub license_comment: String,
}

impl NewPackageFile {
    pub fn new(file_id: RowId, relative_path: impl Into<String>) -> Self {
        Self {
            file_id,
            relative_path: relative_path.into(),
            concluded_license: None,
            license_comment: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Namespaces and identifiers
// ---------------------------------------------------------------------------

/// A document namespace: one per generated document, unique by URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceRecord {
    pub namespace_id: RowId,
    pub uri: String,
}

/// The entity an identifier refers to. Exactly one per identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierTarget {
    Package(RowId),
    PackageFile(RowId),
    Document(RowId),
}

/// An SPDX identifier: a reference string unique within its namespace,
/// naming a package, package file, or document. Created once, never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierRecord {
    pub identifier_id: RowId,
    pub namespace_id: RowId,
    pub id_string: String,
    pub target: IdentifierTarget,
}

/// Insert payload for an identifier row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewIdentifier {
    pub namespace_id: RowId,
    pub id_string: String,
    pub target: IdentifierTarget,
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// A directed, typed edge between two identifiers. No duplicate edge with
/// the same (left, kind, right) triple may exist.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub relationship_id: RowId,
    pub left_identifier_id: RowId,
    pub kind: RelationshipKind,
    pub right_identifier_id: RowId,
    pub comment: String,
}

/// Insert payload for a relationship edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRelationship {
    pub left_identifier_id: RowId,
    pub kind: RelationshipKind,
    pub right_identifier_id: RowId,
    pub comment: String,
}

impl NewRelationship {
    pub fn new(left_identifier_id: RowId, kind: RelationshipKind, right_identifier_id: RowId) -> Self {
        Self {
            left_identifier_id,
            kind,
            right_identifier_id,
            comment: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// Who produced a document. Always an explicit value supplied by the
/// caller at document-assembly time; there is no implicit default creator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Creator {
    Tool(String),
    Person { name: String, email: Option<String> },
    Organization { name: String, email: Option<String> },
}

impl std::fmt::Display for Creator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Creator::Tool(name) => write!(f, "Tool: {name}"),
            Creator::Person { name, email } => match email {
                Some(email) => write!(f, "Person: {name} ({email})"),
                None => write!(f, "Person: {name}"),
            },
            Creator::Organization { name, email } => match email {
                Some(email) => write!(f, "Organization: {name} ({email})"),
                None => write!(f, "Organization: {name}"),
            },
        }
    }
}

/// A generated document: one per registration session, referencing exactly
/// one root package inside one namespace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub document_id: RowId,
    pub namespace_id: RowId,
    pub package_id: RowId,
    pub name: String,
    pub spdx_version: String,
    pub data_license: String,
    pub license_list_version: String,
    pub creator: Creator,
    pub creator_comment: String,
    pub document_comment: String,
    pub created: DateTime<Utc>,
}

/// Insert payload for a document row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewDocument {
    pub namespace_id: RowId,
    pub package_id: RowId,
    pub name: String,
    pub spdx_version: String,
    pub data_license: String,
    pub license_list_version: String,
    pub creator: Creator,
    pub creator_comment: String,
    pub document_comment: String,
    pub created: DateTime<Utc>,
}
