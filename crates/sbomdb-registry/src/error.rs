use std::path::PathBuf;

use thiserror::Error;

use sbomdb_store::StoreError;

/// Errors from file and package registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The package root or archive path does not exist.
    #[error("path does not exist: {}", path.display())]
    RootNotFound { path: PathBuf },

    /// Filesystem access failed while hashing or walking.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage backend rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for registration operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
