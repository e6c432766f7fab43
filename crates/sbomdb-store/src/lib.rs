//! Storage boundary for the sbomdb provenance database.
//!
//! This crate defines the persisted data model as typed records, the
//! [`ProvenanceStore`] trait all backends implement, and an
//! [`InMemoryStore`] for tests and embedding.
//!
//! # Design Rules
//!
//! 1. Entities are append-only: no record is ever mutated or deleted.
//! 2. Uniqueness is enforced at this boundary, not by caller-side lookups.
//!    A conflicting insert returns [`StoreError::UniqueViolation`]; callers
//!    racing another writer resolve it by re-fetching the existing row.
//! 3. A package row and its file associations are one atomic unit
//!    ([`ProvenanceStore::insert_package_with_files`]), so a partial
//!    failure can never leave a package with no reachable files.
//! 4. Foreign keys are checked on insert; dangling references are rejected.

pub mod error;
pub mod memory;
pub mod records;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use records::{
    Creator, DocumentRecord, FileRecord, IdentifierRecord, IdentifierTarget, NamespaceRecord,
    NewDocument, NewFile, NewIdentifier, NewPackage, NewPackageFile, NewRelationship,
    PackageFileRecord, PackageIdentity, PackageRecord, RelationshipRecord, RowId,
};
pub use traits::ProvenanceStore;
