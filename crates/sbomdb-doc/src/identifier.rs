use std::sync::Arc;

use tracing::debug;

use sbomdb_store::{
    IdentifierRecord, IdentifierTarget, NewIdentifier, ProvenanceStore, RowId, StoreError,
};

use crate::error::{DocError, DocResult};

/// The reserved identifier naming a document within its own namespace.
pub const DOCUMENT_ID_STRING: &str = "SPDXRef-DOCUMENT";

/// How many hex characters of the fingerprint go into an id string.
const FINGERPRINT_PREFIX_LEN: usize = 10;

/// Replace every character outside `[A-Za-z0-9.-]` with `-`.
///
/// SPDX id strings and namespace URIs share this alphabet.
pub fn sanitize_id_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Build an SPDX reference string for an entity.
///
/// The result is `SPDXRef-{kind}-{name}-{fingerprint prefix}` with the name
/// sanitized. Stable for identical inputs; two entities with different
/// fingerprints never collide on the name alone.
pub fn gen_id_string(kind: &str, name: &str, fingerprint_hex: &str) -> String {
    let prefix: String = fingerprint_hex.chars().take(FINGERPRINT_PREFIX_LEN).collect();
    format!("SPDXRef-{kind}-{}-{prefix}", sanitize_id_component(name))
}

/// Allocates identifiers inside document namespaces.
///
/// Allocation is strict: at most one identifier per entity per namespace,
/// and a second attempt is a [`DocError::DuplicateAllocation`], never a
/// silent reuse. Callers that want the existing row look it up on the
/// store instead.
pub struct IdentifierAllocator {
    store: Arc<dyn ProvenanceStore>,
}

impl IdentifierAllocator {
    pub fn new(store: Arc<dyn ProvenanceStore>) -> Self {
        Self { store }
    }

    /// Allocate `id_string` for `target` inside a namespace.
    pub fn allocate(
        &self,
        namespace_id: RowId,
        id_string: String,
        target: IdentifierTarget,
    ) -> DocResult<IdentifierRecord> {
        let payload = NewIdentifier {
            namespace_id,
            id_string,
            target,
        };
        match self.store.insert_identifier(payload) {
            Ok(record) => {
                debug!(
                    namespace_id,
                    id_string = %record.id_string,
                    "allocated identifier"
                );
                Ok(record)
            }
            Err(StoreError::UniqueViolation { key, .. }) => Err(DocError::DuplicateAllocation {
                namespace_id,
                id_string: key,
            }),
            Err(err) => Err(err.into()),
        }
    }
}
