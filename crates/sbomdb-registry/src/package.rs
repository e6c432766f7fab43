//! Two-tier cached package registration.
//!
//! `register` implements a cache-then-create protocol:
//!
//! 1. Archive tier: a true package (single archive file) is cached by its
//!    own content hash. A hit returns immediately with no file scan.
//! 2. Directory tier: a tree is cached by its (directory code,
//!    verification code) pair. Both codes are content-derived, so a tree
//!    relocated without modification still hits this tier.
//! 3. Full miss: register every contained file through the content store,
//!    then insert the package row plus its file associations as one atomic
//!    unit.
//!
//! Races with concurrent registrations surface as unique-constraint
//! violations from the store and are resolved by re-fetching the winner.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use sbomdb_store::{
    NewPackage, NewPackageFile, PackageIdentity, PackageRecord, ProvenanceStore, StoreError,
};
use sbomdb_types::ContentHash;

use crate::content::ContentStore;
use crate::error::{RegistryError, RegistryResult};
use crate::walk::{directory_code, verification_code, walk_tree};

/// Caller-supplied metadata for a registration. Every field is optional;
/// defaults are derived from the paths involved.
#[derive(Clone, Debug, Default)]
pub struct PackageOptions {
    /// Package name; defaults to a name derived from the archive file name
    /// or the root directory's basename.
    pub name: Option<String>,
    /// Package version; defaults to empty.
    pub version: Option<String>,
    /// Free-form comment; defaults to empty.
    pub comment: Option<String>,
    /// The archive file for a true package. When absent the registration
    /// is treated as a directory tree.
    pub file_path: Option<PathBuf>,
}

/// Registers packages (archives or directory trees) with two-tier caching.
pub struct PackageRegistry {
    store: Arc<dyn ProvenanceStore>,
    content: ContentStore,
}

impl PackageRegistry {
    /// Create a registry with the default file-type classifier.
    pub fn new(store: Arc<dyn ProvenanceStore>) -> Self {
        let content = ContentStore::new(Arc::clone(&store));
        Self { store, content }
    }

    /// Create a registry around an existing content store.
    pub fn with_content_store(store: Arc<dyn ProvenanceStore>, content: ContentStore) -> Self {
        Self { store, content }
    }

    /// The content store used for contained files.
    pub fn content_store(&self) -> &ContentStore {
        &self.content
    }

    /// Register the package rooted at `root`.
    ///
    /// Calling twice with equivalent input (same archive hash, or same tree
    /// contents and layout) returns the existing package and creates no new
    /// rows of any kind.
    pub fn register(&self, root: &Path, options: PackageOptions) -> RegistryResult<PackageRecord> {
        // Tier 1: a true package may be cached by the archive's own hash.
        let archive_hash = match &options.file_path {
            Some(file_path) => {
                if !file_path.exists() {
                    return Err(RegistryError::RootNotFound {
                        path: file_path.clone(),
                    });
                }
                let hash = ContentHash::of_file(file_path).map_err(|source| RegistryError::Io {
                    path: file_path.clone(),
                    source,
                })?;
                if let Some(existing) = self.store.package_by_hash(&hash)? {
                    debug!(
                        hash = %hash.short_hex(),
                        package = existing.package_id,
                        "archive already registered"
                    );
                    return Ok(existing);
                }
                Some(hash)
            }
            None => None,
        };

        // Tier 2: walk and fingerprint the tree; directory registrations
        // may be cached by the (directory code, verification code) pair.
        let files = walk_tree(root)?;
        let ver_code = verification_code(&files);
        let dir_code = directory_code(&files);
        if archive_hash.is_none() {
            if let Some(existing) = self.store.package_by_directory(&dir_code, &ver_code)? {
                debug!(
                    directory = %dir_code.short_hex(),
                    package = existing.package_id,
                    "directory tree already registered"
                );
                return Ok(existing);
            }
        }

        // Full miss: build the row and register every contained file.
        let identity = match archive_hash {
            Some(hash) => PackageIdentity::Archive(hash),
            None => PackageIdentity::Tree(dir_code),
        };
        let file_name = basename(options.file_path.as_deref().unwrap_or(root));
        let name = options.name.unwrap_or_else(|| {
            if options.file_path.is_some() {
                friendly_package_name(&file_name)
            } else {
                file_name.clone()
            }
        });

        let mut associations = Vec::with_capacity(files.len());
        for file in &files {
            let record = self.content.register_file(&file.path, Some(file.hash))?;
            associations.push(NewPackageFile::new(record.file_id, file.relative_path.clone()));
        }

        let package = NewPackage {
            identity,
            verification_code: ver_code,
            name,
            version: options.version.unwrap_or_default(),
            file_name,
            download_location: None,
            home_page: None,
            source_info: String::new(),
            summary: String::new(),
            description: String::new(),
            comment: options.comment.unwrap_or_default(),
        };
        match self.store.insert_package_with_files(package, associations) {
            Ok(record) => {
                info!(
                    package = record.package_id,
                    name = %record.name,
                    files = files.len(),
                    verification_code = %record.verification_code.short_hex(),
                    "registered package"
                );
                Ok(record)
            }
            // Lost a race with a concurrent registration; return the winner.
            Err(StoreError::UniqueViolation { .. }) => {
                let existing = match identity {
                    PackageIdentity::Archive(hash) => self.store.package_by_hash(&hash)?,
                    PackageIdentity::Tree(code) => {
                        self.store.package_by_directory(&code, &ver_code)?
                    }
                };
                existing.ok_or(RegistryError::Store(StoreError::NotFound {
                    entity: "package",
                    key: ver_code.to_hex(),
                }))
            }
            Err(error) => Err(error.into()),
        }
    }
}

impl std::fmt::Debug for PackageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageRegistry").finish_non_exhaustive()
    }
}

/// Longest-suffix-first so `.tar.gz` wins over `.gz`.
const ARCHIVE_SUFFIXES: &[&str] = &[
    ".tar.bz2", ".tar.gz", ".tar.xz", ".tbz2", ".tgz", ".crate", ".gem", ".whl", ".bz2", ".deb",
    ".jar", ".rpm", ".tar", ".zip", ".gz", ".xz",
];

/// Derive a package name from an archive file name by stripping one known
/// archive suffix: `libfoo-1.2.tar.gz` becomes `libfoo-1.2`.
fn friendly_package_name(file_name: &str) -> String {
    for suffix in ARCHIVE_SUFFIXES {
        if let Some(stripped) = file_name.strip_suffix(suffix) {
            if !stripped.is_empty() {
                return stripped.to_string();
            }
        }
    }
    file_name.to_string()
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
