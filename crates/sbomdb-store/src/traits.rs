use sbomdb_types::{ContentHash, DirectoryCode, RelationshipKind, VerificationCode};

use crate::error::StoreResult;
use crate::records::{
    DocumentRecord, FileRecord, IdentifierRecord, NamespaceRecord, NewDocument, NewFile,
    NewIdentifier, NewPackage, NewPackageFile, NewRelationship, PackageFileRecord, PackageRecord,
    RelationshipRecord, RowId,
};

/// Storage boundary for the provenance database.
///
/// All implementations must satisfy these invariants:
/// - Rows are append-only; nothing is mutated or deleted.
/// - Unique constraints are enforced here, not by caller-side lookups:
///   a conflicting insert fails with `StoreError::UniqueViolation` even
///   when the caller looked first (lookup-then-insert is racy across
///   processes).
/// - `insert_package_with_files` is atomic: either the package row and all
///   of its file associations exist, or none of them do.
/// - Inserts referencing missing rows fail with
///   `StoreError::ForeignKeyViolation`.
pub trait ProvenanceStore: Send + Sync {
    // -- files --------------------------------------------------------------

    /// Insert a file row. Fails on a duplicate content hash.
    fn insert_file(&self, file: NewFile) -> StoreResult<FileRecord>;

    /// Look up a file by content hash.
    fn file_by_hash(&self, hash: &ContentHash) -> StoreResult<Option<FileRecord>>;

    /// Look up a file by row id.
    fn file_by_id(&self, file_id: RowId) -> StoreResult<Option<FileRecord>>;

    // -- packages -----------------------------------------------------------

    /// Atomically insert a package row plus its file associations.
    ///
    /// Fails on a duplicate package identity (archive content hash, or
    /// directory code + verification code pair) or on a file association
    /// referencing a missing file row. On failure nothing is inserted.
    fn insert_package_with_files(
        &self,
        package: NewPackage,
        files: Vec<NewPackageFile>,
    ) -> StoreResult<PackageRecord>;

    /// Look up a true package by its archive content hash.
    fn package_by_hash(&self, hash: &ContentHash) -> StoreResult<Option<PackageRecord>>;

    /// Look up a directory-tree package by its code pair.
    fn package_by_directory(
        &self,
        directory_code: &DirectoryCode,
        verification_code: &VerificationCode,
    ) -> StoreResult<Option<PackageRecord>>;

    /// Look up a package by row id.
    fn package_by_id(&self, package_id: RowId) -> StoreResult<Option<PackageRecord>>;

    /// All file associations of a package, joined with their file rows.
    fn files_of_package(
        &self,
        package_id: RowId,
    ) -> StoreResult<Vec<(PackageFileRecord, FileRecord)>>;

    // -- namespaces ---------------------------------------------------------

    /// Insert a document namespace. Fails on a duplicate URI.
    fn insert_namespace(&self, uri: &str) -> StoreResult<NamespaceRecord>;

    // -- identifiers --------------------------------------------------------

    /// Insert an identifier row. Fails when the id string already exists in
    /// the namespace.
    fn insert_identifier(&self, identifier: NewIdentifier) -> StoreResult<IdentifierRecord>;

    /// Bulk-insert identifier rows.
    ///
    /// Default implementation calls `insert_identifier` for each payload.
    fn insert_identifiers(
        &self,
        identifiers: Vec<NewIdentifier>,
    ) -> StoreResult<Vec<IdentifierRecord>> {
        identifiers
            .into_iter()
            .map(|identifier| self.insert_identifier(identifier))
            .collect()
    }

    /// Look up an identifier by row id.
    fn identifier_by_id(&self, identifier_id: RowId) -> StoreResult<Option<IdentifierRecord>>;

    /// The identifier referring to a package, if one has been allocated.
    fn identifier_for_package(&self, package_id: RowId) -> StoreResult<Option<IdentifierRecord>>;

    /// All identifiers allocated within a namespace.
    fn identifiers_in_namespace(&self, namespace_id: RowId) -> StoreResult<Vec<IdentifierRecord>>;

    // -- relationships ------------------------------------------------------

    /// Insert a relationship edge. Fails on a duplicate
    /// (left, kind, right) triple.
    fn insert_relationship(&self, relationship: NewRelationship)
        -> StoreResult<RelationshipRecord>;

    /// Bulk-insert relationship edges.
    fn insert_relationships(
        &self,
        relationships: Vec<NewRelationship>,
    ) -> StoreResult<Vec<RelationshipRecord>> {
        relationships
            .into_iter()
            .map(|relationship| self.insert_relationship(relationship))
            .collect()
    }

    /// All edges of the given kind leaving an identifier.
    fn relationships_from(
        &self,
        left_identifier_id: RowId,
        kind: RelationshipKind,
    ) -> StoreResult<Vec<RelationshipRecord>>;

    // -- documents ----------------------------------------------------------

    /// Insert a document row.
    fn insert_document(&self, document: NewDocument) -> StoreResult<DocumentRecord>;

    /// Look up a document by row id.
    fn document_by_id(&self, document_id: RowId) -> StoreResult<Option<DocumentRecord>>;

    /// The document describing a package, if one has been assembled.
    ///
    /// More than one document may reference the package; any one of them
    /// is returned.
    fn document_by_package(&self, package_id: RowId) -> StoreResult<Option<DocumentRecord>>;
}
