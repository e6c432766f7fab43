use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use tracing::debug;

use sbomdb_types::{ContentHash, DirectoryCode, RelationshipKind, VerificationCode};

use crate::error::{StoreError, StoreResult};
use crate::records::{
    DocumentRecord, FileRecord, IdentifierRecord, IdentifierTarget, NamespaceRecord, NewDocument,
    NewFile, NewIdentifier, NewPackage, NewPackageFile, NewRelationship, PackageFileRecord,
    PackageIdentity, PackageRecord, RelationshipRecord, RowId,
};
use crate::traits::ProvenanceStore;

/// In-memory provenance store for tests and embedding.
///
/// All tables live behind a single `RwLock`, which makes every insert —
/// including the package-plus-files unit — naturally atomic. Row ids are
/// one-based positions in the append-only table vectors.
pub struct InMemoryStore {
    inner: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    files: Vec<FileRecord>,
    files_by_hash: HashMap<ContentHash, usize>,

    packages: Vec<PackageRecord>,
    packages_by_hash: HashMap<ContentHash, usize>,
    packages_by_dir: HashMap<(DirectoryCode, VerificationCode), usize>,

    package_files: Vec<PackageFileRecord>,

    namespaces: Vec<NamespaceRecord>,
    namespace_uris: HashMap<String, usize>,

    identifiers: Vec<IdentifierRecord>,
    identifier_strings: HashSet<(RowId, String)>,

    relationships: Vec<RelationshipRecord>,
    relationship_triples: HashSet<(RowId, RelationshipKind, RowId)>,

    documents: Vec<DocumentRecord>,
}

/// Convert a one-based row id to a table index.
fn row_index(id: RowId) -> Option<usize> {
    (id as usize).checked_sub(1)
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreState::default()),
        }
    }

    /// Number of file rows.
    pub fn file_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").files.len()
    }

    /// Number of package rows.
    pub fn package_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").packages.len()
    }

    /// Number of package-file association rows.
    pub fn package_file_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").package_files.len()
    }

    /// Number of relationship edges.
    pub fn relationship_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").relationships.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.read().expect("lock poisoned");
        f.debug_struct("InMemoryStore")
            .field("files", &state.files.len())
            .field("packages", &state.packages.len())
            .field("package_files", &state.package_files.len())
            .field("namespaces", &state.namespaces.len())
            .field("identifiers", &state.identifiers.len())
            .field("relationships", &state.relationships.len())
            .field("documents", &state.documents.len())
            .finish()
    }
}

impl ProvenanceStore for InMemoryStore {
    fn insert_file(&self, file: NewFile) -> StoreResult<FileRecord> {
        let mut state = self.inner.write().expect("lock poisoned");
        if state.files_by_hash.contains_key(&file.content_hash) {
            return Err(StoreError::UniqueViolation {
                constraint: "files.content_hash",
                key: file.content_hash.to_hex(),
            });
        }

        let index = state.files.len();
        let record = FileRecord {
            file_id: (index + 1) as RowId,
            content_hash: file.content_hash,
            file_type: file.file_type,
            copyright_text: file.copyright_text,
            comment: file.comment,
            notice: file.notice,
        };
        state.files_by_hash.insert(record.content_hash, index);
        debug!(
            file = record.file_id,
            hash = %record.content_hash.short_hex(),
            "inserted file row"
        );
        state.files.push(record.clone());
        Ok(record)
    }

    fn file_by_hash(&self, hash: &ContentHash) -> StoreResult<Option<FileRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .files_by_hash
            .get(hash)
            .map(|&index| state.files[index].clone()))
    }

    fn file_by_id(&self, file_id: RowId) -> StoreResult<Option<FileRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(row_index(file_id).and_then(|index| state.files.get(index).cloned()))
    }

    fn insert_package_with_files(
        &self,
        package: NewPackage,
        files: Vec<NewPackageFile>,
    ) -> StoreResult<PackageRecord> {
        let mut state = self.inner.write().expect("lock poisoned");

        // Validate everything before touching any table; the write lock
        // makes the subsequent inserts one atomic unit.
        match &package.identity {
            PackageIdentity::Archive(hash) => {
                if state.packages_by_hash.contains_key(hash) {
                    return Err(StoreError::UniqueViolation {
                        constraint: "packages.content_hash",
                        key: hash.to_hex(),
                    });
                }
            }
            PackageIdentity::Tree(code) => {
                let key = (*code, package.verification_code);
                if state.packages_by_dir.contains_key(&key) {
                    return Err(StoreError::UniqueViolation {
                        constraint: "packages.directory_code_verification_code",
                        key: format!("{}/{}", code.short_hex(), package.verification_code.short_hex()),
                    });
                }
            }
        }
        for file in &files {
            if row_index(file.file_id)
                .and_then(|index| state.files.get(index))
                .is_none()
            {
                return Err(StoreError::ForeignKeyViolation {
                    constraint: "packages_files.file_id",
                    key: file.file_id.to_string(),
                });
            }
        }

        let package_index = state.packages.len();
        let record = PackageRecord {
            package_id: (package_index + 1) as RowId,
            identity: package.identity,
            verification_code: package.verification_code,
            name: package.name,
            version: package.version,
            file_name: package.file_name,
            download_location: package.download_location,
            home_page: package.home_page,
            source_info: package.source_info,
            summary: package.summary,
            description: package.description,
            comment: package.comment,
        };
        match &record.identity {
            PackageIdentity::Archive(hash) => {
                state.packages_by_hash.insert(*hash, package_index);
            }
            PackageIdentity::Tree(code) => {
                state
                    .packages_by_dir
                    .insert((*code, record.verification_code), package_index);
            }
        }
        debug!(
            package = record.package_id,
            name = %record.name,
            files = files.len(),
            "inserted package row with file associations"
        );
        state.packages.push(record.clone());

        for file in files {
            let association = PackageFileRecord {
                package_file_id: (state.package_files.len() + 1) as RowId,
                package_id: record.package_id,
                file_id: file.file_id,
                relative_path: file.relative_path,
                concluded_license: file.concluded_license,
                license_comment: file.license_comment,
            };
            state.package_files.push(association);
        }

        Ok(record)
    }

    fn package_by_hash(&self, hash: &ContentHash) -> StoreResult<Option<PackageRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .packages_by_hash
            .get(hash)
            .map(|&index| state.packages[index].clone()))
    }

    fn package_by_directory(
        &self,
        directory_code: &DirectoryCode,
        verification_code: &VerificationCode,
    ) -> StoreResult<Option<PackageRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .packages_by_dir
            .get(&(*directory_code, *verification_code))
            .map(|&index| state.packages[index].clone()))
    }

    fn package_by_id(&self, package_id: RowId) -> StoreResult<Option<PackageRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(row_index(package_id).and_then(|index| state.packages.get(index).cloned()))
    }

    fn files_of_package(
        &self,
        package_id: RowId,
    ) -> StoreResult<Vec<(PackageFileRecord, FileRecord)>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .package_files
            .iter()
            .filter(|association| association.package_id == package_id)
            .filter_map(|association| {
                row_index(association.file_id)
                    .and_then(|index| state.files.get(index))
                    .map(|file| (association.clone(), file.clone()))
            })
            .collect())
    }

    fn insert_namespace(&self, uri: &str) -> StoreResult<NamespaceRecord> {
        let mut state = self.inner.write().expect("lock poisoned");
        if state.namespace_uris.contains_key(uri) {
            return Err(StoreError::UniqueViolation {
                constraint: "document_namespaces.uri",
                key: uri.to_string(),
            });
        }

        let index = state.namespaces.len();
        let record = NamespaceRecord {
            namespace_id: (index + 1) as RowId,
            uri: uri.to_string(),
        };
        state.namespace_uris.insert(record.uri.clone(), index);
        debug!(namespace = record.namespace_id, uri = %record.uri, "inserted namespace row");
        state.namespaces.push(record.clone());
        Ok(record)
    }

    fn insert_identifier(&self, identifier: NewIdentifier) -> StoreResult<IdentifierRecord> {
        let mut state = self.inner.write().expect("lock poisoned");

        if row_index(identifier.namespace_id)
            .and_then(|index| state.namespaces.get(index))
            .is_none()
        {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "identifiers.document_namespace_id",
                key: identifier.namespace_id.to_string(),
            });
        }
        let target_exists = match identifier.target {
            IdentifierTarget::Package(id) => {
                row_index(id).and_then(|i| state.packages.get(i)).is_some()
            }
            IdentifierTarget::PackageFile(id) => {
                row_index(id).and_then(|i| state.package_files.get(i)).is_some()
            }
            IdentifierTarget::Document(id) => {
                row_index(id).and_then(|i| state.documents.get(i)).is_some()
            }
        };
        if !target_exists {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "identifiers.reference",
                key: format!("{:?}", identifier.target),
            });
        }
        let string_key = (identifier.namespace_id, identifier.id_string.clone());
        if state.identifier_strings.contains(&string_key) {
            return Err(StoreError::UniqueViolation {
                constraint: "identifiers.namespace_id_string",
                key: identifier.id_string,
            });
        }

        let record = IdentifierRecord {
            identifier_id: (state.identifiers.len() + 1) as RowId,
            namespace_id: identifier.namespace_id,
            id_string: identifier.id_string,
            target: identifier.target,
        };
        state.identifier_strings.insert(string_key);
        debug!(
            identifier = record.identifier_id,
            id_string = %record.id_string,
            "inserted identifier row"
        );
        state.identifiers.push(record.clone());
        Ok(record)
    }

    fn identifier_by_id(&self, identifier_id: RowId) -> StoreResult<Option<IdentifierRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(row_index(identifier_id).and_then(|index| state.identifiers.get(index).cloned()))
    }

    fn identifier_for_package(&self, package_id: RowId) -> StoreResult<Option<IdentifierRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .identifiers
            .iter()
            .find(|identifier| identifier.target == IdentifierTarget::Package(package_id))
            .cloned())
    }

    fn identifiers_in_namespace(&self, namespace_id: RowId) -> StoreResult<Vec<IdentifierRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .identifiers
            .iter()
            .filter(|identifier| identifier.namespace_id == namespace_id)
            .cloned()
            .collect())
    }

    fn insert_relationship(
        &self,
        relationship: NewRelationship,
    ) -> StoreResult<RelationshipRecord> {
        let mut state = self.inner.write().expect("lock poisoned");

        for endpoint in [
            relationship.left_identifier_id,
            relationship.right_identifier_id,
        ] {
            if row_index(endpoint)
                .and_then(|index| state.identifiers.get(index))
                .is_none()
            {
                return Err(StoreError::ForeignKeyViolation {
                    constraint: "relationships.identifier_id",
                    key: endpoint.to_string(),
                });
            }
        }
        let triple = (
            relationship.left_identifier_id,
            relationship.kind,
            relationship.right_identifier_id,
        );
        if state.relationship_triples.contains(&triple) {
            return Err(StoreError::UniqueViolation {
                constraint: "relationships.left_type_right",
                key: format!("{} -{}-> {}", triple.0, triple.1, triple.2),
            });
        }

        let record = RelationshipRecord {
            relationship_id: (state.relationships.len() + 1) as RowId,
            left_identifier_id: relationship.left_identifier_id,
            kind: relationship.kind,
            right_identifier_id: relationship.right_identifier_id,
            comment: relationship.comment,
        };
        state.relationship_triples.insert(triple);
        debug!(
            left = record.left_identifier_id,
            kind = %record.kind,
            right = record.right_identifier_id,
            "inserted relationship edge"
        );
        state.relationships.push(record.clone());
        Ok(record)
    }

    fn relationships_from(
        &self,
        left_identifier_id: RowId,
        kind: RelationshipKind,
    ) -> StoreResult<Vec<RelationshipRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .relationships
            .iter()
            .filter(|edge| edge.left_identifier_id == left_identifier_id && edge.kind == kind)
            .cloned()
            .collect())
    }

    fn insert_document(&self, document: NewDocument) -> StoreResult<DocumentRecord> {
        let mut state = self.inner.write().expect("lock poisoned");

        if row_index(document.namespace_id)
            .and_then(|index| state.namespaces.get(index))
            .is_none()
        {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "documents.document_namespace_id",
                key: document.namespace_id.to_string(),
            });
        }
        if row_index(document.package_id)
            .and_then(|index| state.packages.get(index))
            .is_none()
        {
            return Err(StoreError::ForeignKeyViolation {
                constraint: "documents.package_id",
                key: document.package_id.to_string(),
            });
        }

        let record = DocumentRecord {
            document_id: (state.documents.len() + 1) as RowId,
            namespace_id: document.namespace_id,
            package_id: document.package_id,
            name: document.name,
            spdx_version: document.spdx_version,
            data_license: document.data_license,
            license_list_version: document.license_list_version,
            creator: document.creator,
            creator_comment: document.creator_comment,
            document_comment: document.document_comment,
            created: document.created,
        };
        debug!(document = record.document_id, name = %record.name, "inserted document row");
        state.documents.push(record.clone());
        Ok(record)
    }

    fn document_by_id(&self, document_id: RowId) -> StoreResult<Option<DocumentRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(row_index(document_id).and_then(|index| state.documents.get(index).cloned()))
    }

    fn document_by_package(&self, package_id: RowId) -> StoreResult<Option<DocumentRecord>> {
        let state = self.inner.read().expect("lock poisoned");
        Ok(state
            .documents
            .iter()
            .find(|document| document.package_id == package_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sbomdb_types::FileType;

    use crate::records::Creator;

    fn hash(data: &[u8]) -> ContentHash {
        ContentHash::of_bytes(data)
    }

    fn new_file(data: &[u8]) -> NewFile {
        NewFile::unscanned(hash(data), FileType::Source)
    }

    fn tree_package(name: &str, file_data: &[&[u8]]) -> NewPackage {
        let hashes: Vec<ContentHash> = file_data.iter().map(|d| hash(d)).collect();
        let entries: Vec<(String, ContentHash)> = hashes
            .iter()
            .enumerate()
            .map(|(i, h)| (format!("file-{i}"), *h))
            .collect();
        NewPackage {
            identity: PackageIdentity::Tree(DirectoryCode::compute(
                entries.iter().map(|(p, h)| (p.as_str(), h)),
            )),
            verification_code: VerificationCode::compute(&hashes),
            name: name.to_string(),
            version: String::new(),
            file_name: name.to_string(),
            download_location: None,
            home_page: None,
            source_info: String::new(),
            summary: String::new(),
            description: String::new(),
            comment: String::new(),
        }
    }

    fn new_document(store: &InMemoryStore, package_id: RowId, uri: &str) -> DocumentRecord {
        let namespace = store.insert_namespace(uri).unwrap();
        store
            .insert_document(NewDocument {
                namespace_id: namespace.namespace_id,
                package_id,
                name: "doc".into(),
                spdx_version: "SPDX-2.0".into(),
                data_license: "CC0-1.0".into(),
                license_list_version: "2.2".into(),
                creator: Creator::Tool("sbomdb".into()),
                creator_comment: String::new(),
                document_comment: String::new(),
                created: Utc::now(),
            })
            .unwrap()
    }

    // -----------------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------------

    #[test]
    fn insert_and_fetch_file() {
        let store = InMemoryStore::new();
        let record = store.insert_file(new_file(b"content")).unwrap();
        assert_eq!(record.file_id, 1);

        let by_hash = store.file_by_hash(&hash(b"content")).unwrap().unwrap();
        assert_eq!(by_hash, record);
        let by_id = store.file_by_id(record.file_id).unwrap().unwrap();
        assert_eq!(by_id, record);
    }

    #[test]
    fn duplicate_file_hash_is_rejected() {
        let store = InMemoryStore::new();
        store.insert_file(new_file(b"same")).unwrap();
        let result = store.insert_file(new_file(b"same"));
        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation {
                constraint: "files.content_hash",
                ..
            })
        ));
        assert_eq!(store.file_count(), 1);
    }

    #[test]
    fn missing_file_lookups_return_none() {
        let store = InMemoryStore::new();
        assert!(store.file_by_hash(&hash(b"nope")).unwrap().is_none());
        assert!(store.file_by_id(42).unwrap().is_none());
        assert!(store.file_by_id(0).unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Packages
    // -----------------------------------------------------------------------

    #[test]
    fn insert_package_with_files_creates_associations() {
        let store = InMemoryStore::new();
        let f1 = store.insert_file(new_file(b"a")).unwrap();
        let f2 = store.insert_file(new_file(b"b")).unwrap();

        let package = store
            .insert_package_with_files(
                tree_package("pkg", &[b"a", b"b"]),
                vec![
                    NewPackageFile::new(f1.file_id, "src/a.rs"),
                    NewPackageFile::new(f2.file_id, "src/b.rs"),
                ],
            )
            .unwrap();

        let files = store.files_of_package(package.package_id).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].0.relative_path, "src/a.rs");
        assert_eq!(files[0].1.file_id, f1.file_id);
    }

    #[test]
    fn duplicate_archive_hash_is_rejected() {
        let store = InMemoryStore::new();
        let archive_hash = hash(b"tarball");
        let mut package = tree_package("pkg", &[b"a"]);
        package.identity = PackageIdentity::Archive(archive_hash);
        store
            .insert_package_with_files(package.clone(), vec![])
            .unwrap();

        let result = store.insert_package_with_files(package, vec![]);
        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation {
                constraint: "packages.content_hash",
                ..
            })
        ));
    }

    #[test]
    fn duplicate_directory_pair_is_rejected() {
        let store = InMemoryStore::new();
        let package = tree_package("pkg", &[b"a", b"b"]);
        store
            .insert_package_with_files(package.clone(), vec![])
            .unwrap();

        let result = store.insert_package_with_files(package, vec![]);
        assert!(matches!(result, Err(StoreError::UniqueViolation { .. })));
        assert_eq!(store.package_count(), 1);
    }

    #[test]
    fn same_verification_code_different_directory_code_coexist() {
        // Two trees with identical contents but different layouts share a
        // verification code; the directory code keeps them distinct rows.
        let store = InMemoryStore::new();
        let h = hash(b"shared");
        let ver_code = VerificationCode::compute(&[h]);

        let mut flat = tree_package("flat", &[b"shared"]);
        flat.identity = PackageIdentity::Tree(DirectoryCode::compute([("a.txt", &h)]));
        flat.verification_code = ver_code;
        let mut nested = tree_package("nested", &[b"shared"]);
        nested.identity = PackageIdentity::Tree(DirectoryCode::compute([("src/a.txt", &h)]));
        nested.verification_code = ver_code;

        store.insert_package_with_files(flat, vec![]).unwrap();
        store.insert_package_with_files(nested, vec![]).unwrap();
        assert_eq!(store.package_count(), 2);
    }

    #[test]
    fn package_unit_is_atomic_on_bad_file_reference() {
        let store = InMemoryStore::new();
        let f1 = store.insert_file(new_file(b"a")).unwrap();

        let result = store.insert_package_with_files(
            tree_package("pkg", &[b"a", b"b"]),
            vec![
                NewPackageFile::new(f1.file_id, "a.rs"),
                NewPackageFile::new(999, "missing.rs"),
            ],
        );
        assert!(matches!(
            result,
            Err(StoreError::ForeignKeyViolation {
                constraint: "packages_files.file_id",
                ..
            })
        ));
        // Neither the package row nor any association landed.
        assert_eq!(store.package_count(), 0);
        assert_eq!(store.package_file_count(), 0);
    }

    #[test]
    fn package_identity_never_carries_both_keys() {
        let store = InMemoryStore::new();
        let archive_hash = hash(b"tarball");
        let mut archive = tree_package("archive", &[b"a"]);
        archive.identity = PackageIdentity::Archive(archive_hash);
        let record = store.insert_package_with_files(archive, vec![]).unwrap();

        assert!(record.identity.content_hash().is_some());
        assert!(record.identity.directory_code().is_none());
    }

    // -----------------------------------------------------------------------
    // Namespaces and identifiers
    // -----------------------------------------------------------------------

    #[test]
    fn duplicate_namespace_uri_is_rejected() {
        let store = InMemoryStore::new();
        store.insert_namespace("https://example.com/doc-1").unwrap();
        let result = store.insert_namespace("https://example.com/doc-1");
        assert!(matches!(result, Err(StoreError::UniqueViolation { .. })));
    }

    #[test]
    fn identifier_requires_existing_namespace_and_target() {
        let store = InMemoryStore::new();
        let result = store.insert_identifier(NewIdentifier {
            namespace_id: 1,
            id_string: "SPDXRef-x".into(),
            target: IdentifierTarget::Package(1),
        });
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation { .. })));

        let namespace = store.insert_namespace("https://example.com/ns").unwrap();
        let result = store.insert_identifier(NewIdentifier {
            namespace_id: namespace.namespace_id,
            id_string: "SPDXRef-x".into(),
            target: IdentifierTarget::Package(1),
        });
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation { .. })));
    }

    #[test]
    fn identifier_id_string_unique_within_namespace() {
        let store = InMemoryStore::new();
        let package = store
            .insert_package_with_files(tree_package("pkg", &[b"a"]), vec![])
            .unwrap();
        let ns1 = store.insert_namespace("https://example.com/ns1").unwrap();
        let ns2 = store.insert_namespace("https://example.com/ns2").unwrap();

        let identifier = NewIdentifier {
            namespace_id: ns1.namespace_id,
            id_string: "SPDXRef-pkg".into(),
            target: IdentifierTarget::Package(package.package_id),
        };
        store.insert_identifier(identifier.clone()).unwrap();

        // Same string in the same namespace: rejected.
        let result = store.insert_identifier(identifier.clone());
        assert!(matches!(result, Err(StoreError::UniqueViolation { .. })));

        // Same string in a different namespace: fine.
        let mut other = identifier;
        other.namespace_id = ns2.namespace_id;
        store.insert_identifier(other).unwrap();
    }

    #[test]
    fn identifier_for_package_finds_the_right_row() {
        let store = InMemoryStore::new();
        let p1 = store
            .insert_package_with_files(tree_package("one", &[b"a"]), vec![])
            .unwrap();
        let p2 = store
            .insert_package_with_files(tree_package("two", &[b"b"]), vec![])
            .unwrap();
        let ns = store.insert_namespace("https://example.com/ns").unwrap();

        store
            .insert_identifier(NewIdentifier {
                namespace_id: ns.namespace_id,
                id_string: "SPDXRef-one".into(),
                target: IdentifierTarget::Package(p1.package_id),
            })
            .unwrap();
        let id2 = store
            .insert_identifier(NewIdentifier {
                namespace_id: ns.namespace_id,
                id_string: "SPDXRef-two".into(),
                target: IdentifierTarget::Package(p2.package_id),
            })
            .unwrap();

        let found = store
            .identifier_for_package(p2.package_id)
            .unwrap()
            .unwrap();
        assert_eq!(found, id2);
        assert!(store.identifier_for_package(999).unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Relationships
    // -----------------------------------------------------------------------

    fn two_identifiers(store: &InMemoryStore) -> (RowId, RowId) {
        let p1 = store
            .insert_package_with_files(tree_package("left", &[b"l"]), vec![])
            .unwrap();
        let p2 = store
            .insert_package_with_files(tree_package("right", &[b"r"]), vec![])
            .unwrap();
        let ns = store.insert_namespace("https://example.com/rel").unwrap();
        let i1 = store
            .insert_identifier(NewIdentifier {
                namespace_id: ns.namespace_id,
                id_string: "SPDXRef-left".into(),
                target: IdentifierTarget::Package(p1.package_id),
            })
            .unwrap();
        let i2 = store
            .insert_identifier(NewIdentifier {
                namespace_id: ns.namespace_id,
                id_string: "SPDXRef-right".into(),
                target: IdentifierTarget::Package(p2.package_id),
            })
            .unwrap();
        (i1.identifier_id, i2.identifier_id)
    }

    #[test]
    fn duplicate_edge_triple_is_rejected() {
        let store = InMemoryStore::new();
        let (left, right) = two_identifiers(&store);

        store
            .insert_relationship(NewRelationship::new(
                left,
                RelationshipKind::HasPrerequisite,
                right,
            ))
            .unwrap();
        let result = store.insert_relationship(NewRelationship::new(
            left,
            RelationshipKind::HasPrerequisite,
            right,
        ));
        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation {
                constraint: "relationships.left_type_right",
                ..
            })
        ));
        assert_eq!(store.relationship_count(), 1);
    }

    #[test]
    fn same_endpoints_different_kind_coexist() {
        let store = InMemoryStore::new();
        let (left, right) = two_identifiers(&store);

        store
            .insert_relationship(NewRelationship::new(
                left,
                RelationshipKind::Contains,
                right,
            ))
            .unwrap();
        store
            .insert_relationship(NewRelationship::new(
                left,
                RelationshipKind::HasPrerequisite,
                right,
            ))
            .unwrap();
        assert_eq!(store.relationship_count(), 2);
    }

    #[test]
    fn edge_requires_existing_identifiers() {
        let store = InMemoryStore::new();
        let result = store.insert_relationship(NewRelationship::new(
            1,
            RelationshipKind::HasPrerequisite,
            2,
        ));
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation { .. })));
    }

    #[test]
    fn relationships_from_filters_by_kind_and_left() {
        let store = InMemoryStore::new();
        let (left, right) = two_identifiers(&store);

        store
            .insert_relationship(NewRelationship::new(
                left,
                RelationshipKind::HasPrerequisite,
                right,
            ))
            .unwrap();
        store
            .insert_relationship(NewRelationship::new(
                left,
                RelationshipKind::Contains,
                right,
            ))
            .unwrap();
        store
            .insert_relationship(NewRelationship::new(
                right,
                RelationshipKind::HasPrerequisite,
                left,
            ))
            .unwrap();

        let edges = store
            .relationships_from(left, RelationshipKind::HasPrerequisite)
            .unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].right_identifier_id, right);
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    #[test]
    fn insert_and_fetch_document() {
        let store = InMemoryStore::new();
        let package = store
            .insert_package_with_files(tree_package("pkg", &[b"a"]), vec![])
            .unwrap();
        let document = new_document(&store, package.package_id, "https://example.com/doc");

        let by_id = store.document_by_id(document.document_id).unwrap().unwrap();
        assert_eq!(by_id, document);
        let by_package = store
            .document_by_package(package.package_id)
            .unwrap()
            .unwrap();
        assert_eq!(by_package, document);
    }

    #[test]
    fn document_requires_existing_package() {
        let store = InMemoryStore::new();
        let namespace = store.insert_namespace("https://example.com/doc").unwrap();
        let result = store.insert_document(NewDocument {
            namespace_id: namespace.namespace_id,
            package_id: 77,
            name: "doc".into(),
            spdx_version: "SPDX-2.0".into(),
            data_license: "CC0-1.0".into(),
            license_list_version: "2.2".into(),
            creator: Creator::Tool("sbomdb".into()),
            creator_comment: String::new(),
            document_comment: String::new(),
            created: Utc::now(),
        });
        assert!(matches!(result, Err(StoreError::ForeignKeyViolation { .. })));
    }

    #[test]
    fn debug_format_lists_table_sizes() {
        let store = InMemoryStore::new();
        store.insert_file(new_file(b"x")).unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryStore"));
        assert!(debug.contains("files"));
    }
}
