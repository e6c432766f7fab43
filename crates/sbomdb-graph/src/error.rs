use thiserror::Error;

use sbomdb_store::{RowId, StoreError};

/// Errors from relationship graph operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The identifier an operation starts from does not exist.
    #[error("identifier not found: {0}")]
    IdentifierNotFound(RowId),

    /// A package involved in a dependency operation has no identifier yet
    /// (identifiers are allocated at document-assembly time).
    #[error("package {0} has no identifier; assemble its document first")]
    PackageNotIdentified(RowId),

    /// A document involved in structural edge creation has no
    /// `SPDXRef-DOCUMENT` identifier in its namespace.
    #[error("document {0} has no identifier in its namespace")]
    DocumentNotIdentified(RowId),

    /// A package file has no identifier in the document's namespace.
    #[error("package file {0} has no identifier in the document's namespace")]
    FileNotIdentified(RowId),

    /// A package row expected to exist was not found.
    #[error("package not found: {0}")]
    PackageNotFound(RowId),

    /// The storage backend rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
