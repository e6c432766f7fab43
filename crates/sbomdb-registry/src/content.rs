use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use sbomdb_store::{FileRecord, NewFile, ProvenanceStore, StoreError};
use sbomdb_types::ContentHash;

use crate::error::{RegistryError, RegistryResult};
use crate::filetype::{ExtensionClassifier, FileTypeClassifier};

/// Deduplicated registration of individual files by content hash.
///
/// Registration is idempotent: at most one row is inserted per distinct
/// hash regardless of call count, and re-registration returns the existing
/// row unchanged. A concurrent insert by another process is resolved by
/// re-fetching the winner's row, never by failing the caller.
pub struct ContentStore {
    store: Arc<dyn ProvenanceStore>,
    classifier: Arc<dyn FileTypeClassifier>,
}

impl ContentStore {
    /// Create a content store using the default extension classifier.
    pub fn new(store: Arc<dyn ProvenanceStore>) -> Self {
        Self::with_classifier(store, Arc::new(ExtensionClassifier))
    }

    /// Create a content store with a caller-supplied classifier.
    pub fn with_classifier(
        store: Arc<dyn ProvenanceStore>,
        classifier: Arc<dyn FileTypeClassifier>,
    ) -> Self {
        Self { store, classifier }
    }

    /// Register the file at `path`, hashing it unless `known_hash` is
    /// supplied (the package walk already hashed every file once).
    pub fn register_file(
        &self,
        path: &Path,
        known_hash: Option<ContentHash>,
    ) -> RegistryResult<FileRecord> {
        let hash = match known_hash {
            Some(hash) => hash,
            None => ContentHash::of_file(path).map_err(|source| RegistryError::Io {
                path: path.to_path_buf(),
                source,
            })?,
        };

        if let Some(existing) = self.store.file_by_hash(&hash)? {
            debug!(hash = %hash.short_hex(), "file already registered");
            return Ok(existing);
        }

        let file_type = self.classifier.classify(path);
        match self.store.insert_file(NewFile::unscanned(hash, file_type)) {
            Ok(record) => Ok(record),
            // Lost a race with a concurrent registration; the row exists now.
            Err(StoreError::UniqueViolation { .. }) => {
                debug!(hash = %hash.short_hex(), "concurrent registration won, re-fetching");
                self.store
                    .file_by_hash(&hash)?
                    .ok_or(RegistryError::Store(StoreError::NotFound {
                        entity: "file",
                        key: hash.to_hex(),
                    }))
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl std::fmt::Debug for ContentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentStore").finish_non_exhaustive()
    }
}
