use thiserror::Error;

use sbomdb_graph::GraphError;
use sbomdb_store::{RowId, StoreError};

/// Errors from namespace creation, identifier allocation, and document
/// assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocError {
    /// An identifier was already allocated for this entity, or the id
    /// string is already taken, in the target namespace. The allocator
    /// never dedupes; allocation is a once-per-entity operation.
    #[error("identifier {id_string:?} already allocated in namespace {namespace_id}")]
    DuplicateAllocation {
        namespace_id: RowId,
        id_string: String,
    },

    /// The namespace URI already exists.
    #[error("document namespace already exists: {uri}")]
    NamespaceTaken { uri: String },

    /// The storage backend rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Structural edge creation failed.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result alias for document operations.
pub type DocResult<T> = Result<T, DocError>;
