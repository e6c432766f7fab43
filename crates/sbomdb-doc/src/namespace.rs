use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use sbomdb_store::{NamespaceRecord, ProvenanceStore, StoreError};

use crate::error::{DocError, DocResult};
use crate::identifier::sanitize_id_component;

/// Create a document namespace under `prefix`.
///
/// The URI is `{prefix}/{sanitized name}-{uuid v4}`; the random suffix
/// keeps repeated assemblies of the same package in distinct namespaces.
pub fn create_document_namespace(
    store: &Arc<dyn ProvenanceStore>,
    prefix: &str,
    name: &str,
) -> DocResult<NamespaceRecord> {
    let uri = format!(
        "{}/{}-{}",
        prefix.trim_end_matches('/'),
        sanitize_id_component(name),
        Uuid::new_v4()
    );
    match store.insert_namespace(&uri) {
        Ok(record) => {
            debug!(namespace = record.namespace_id, uri = %record.uri, "created document namespace");
            Ok(record)
        }
        Err(StoreError::UniqueViolation { .. }) => Err(DocError::NamespaceTaken { uri }),
        Err(err) => Err(err.into()),
    }
}
