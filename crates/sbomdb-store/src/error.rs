use thiserror::Error;

/// Errors from provenance store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A lookup expected to succeed found nothing.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// An insert conflicted with an existing row.
    ///
    /// This is how the storage boundary reports "someone already registered
    /// this" — including a concurrent writer. Callers recover by re-fetching
    /// the existing row, never by failing the operation outward.
    #[error("unique constraint {constraint} violated by {key}")]
    UniqueViolation { constraint: &'static str, key: String },

    /// An insert referenced a row that does not exist.
    #[error("foreign key {constraint} violated by {key}")]
    ForeignKeyViolation { constraint: &'static str, key: String },
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
