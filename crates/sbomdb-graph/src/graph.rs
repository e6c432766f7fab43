use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tracing::debug;

use sbomdb_store::{
    DocumentRecord, IdentifierTarget, NewRelationship, ProvenanceStore, RowId,
};
use sbomdb_types::RelationshipKind;

use crate::error::{GraphError, GraphResult};
use crate::report::{DependencyClosure, DependencyNode, DependencyReport, EdgeOutcome};

/// Edge-level view over a [`ProvenanceStore`].
///
/// All relationship writes go through this type. Reads are limited to what
/// the traversals need; record lookups stay on the store trait.
pub struct RelationshipGraph {
    store: Arc<dyn ProvenanceStore>,
}

impl RelationshipGraph {
    pub fn new(store: Arc<dyn ProvenanceStore>) -> Self {
        Self { store }
    }

    /// Create the structural edges implied by an assembled document:
    ///
    /// - document `DESCRIBES` its root package, and the inverse
    /// - the package `CONTAINS` each of its files, and the inverse
    ///
    /// Every identifier involved must already exist in the document's
    /// namespace. Edges that already exist are skipped, so re-running on
    /// the same document is a no-op. Returns the number of edges created.
    pub fn autocreate_structural(&self, document: &DocumentRecord) -> GraphResult<usize> {
        let identifiers = self.store.identifiers_in_namespace(document.namespace_id)?;

        let doc_identifier = identifiers
            .iter()
            .find(|identifier| {
                identifier.target == IdentifierTarget::Document(document.document_id)
            })
            .ok_or(GraphError::DocumentNotIdentified(document.document_id))?;
        let package_identifier = identifiers
            .iter()
            .find(|identifier| {
                identifier.target == IdentifierTarget::Package(document.package_id)
            })
            .ok_or(GraphError::PackageNotIdentified(document.package_id))?;

        let mut edges = vec![
            NewRelationship::new(
                doc_identifier.identifier_id,
                RelationshipKind::Describes,
                package_identifier.identifier_id,
            ),
            NewRelationship::new(
                package_identifier.identifier_id,
                RelationshipKind::DescribedBy,
                doc_identifier.identifier_id,
            ),
        ];

        for (package_file, _) in self.store.files_of_package(document.package_id)? {
            let file_identifier = identifiers
                .iter()
                .find(|identifier| {
                    identifier.target
                        == IdentifierTarget::PackageFile(package_file.package_file_id)
                })
                .ok_or(GraphError::FileNotIdentified(package_file.package_file_id))?;
            edges.push(NewRelationship::new(
                package_identifier.identifier_id,
                RelationshipKind::Contains,
                file_identifier.identifier_id,
            ));
            edges.push(NewRelationship::new(
                file_identifier.identifier_id,
                RelationshipKind::ContainedBy,
                package_identifier.identifier_id,
            ));
        }

        let mut created = 0;
        for edge in edges {
            if self.insert_tolerant(edge)?.is_some() {
                created += 1;
            }
        }
        debug!(
            document_id = document.document_id,
            created, "autocreated structural edges"
        );
        Ok(created)
    }

    /// Record that the package behind `parent` requires the package behind
    /// `child` at build or run time.
    ///
    /// An already-recorded edge is reported as [`EdgeOutcome::Duplicate`],
    /// not an error; callers replaying a dependency list stay idempotent.
    pub fn add_prerequisite(
        &self,
        parent_identifier_id: RowId,
        child_identifier_id: RowId,
    ) -> GraphResult<EdgeOutcome> {
        self.require_identifier(parent_identifier_id)?;
        self.require_identifier(child_identifier_id)?;

        let edge = NewRelationship::new(
            parent_identifier_id,
            RelationshipKind::HasPrerequisite,
            child_identifier_id,
        );
        match self.insert_tolerant(edge)? {
            Some(record) => Ok(EdgeOutcome::Created(record)),
            None => {
                debug!(
                    parent = parent_identifier_id,
                    child = child_identifier_id,
                    "prerequisite edge already recorded"
                );
                Ok(EdgeOutcome::Duplicate)
            }
        }
    }

    /// [`add_prerequisite`] addressed by package rows instead of
    /// identifiers. Both packages must already have identifiers allocated.
    ///
    /// [`add_prerequisite`]: RelationshipGraph::add_prerequisite
    pub fn add_prerequisite_for_packages(
        &self,
        parent_package_id: RowId,
        child_package_id: RowId,
    ) -> GraphResult<EdgeOutcome> {
        let parent = self
            .store
            .identifier_for_package(parent_package_id)?
            .ok_or(GraphError::PackageNotIdentified(parent_package_id))?;
        let child = self
            .store
            .identifier_for_package(child_package_id)?
            .ok_or(GraphError::PackageNotIdentified(child_package_id))?;
        self.add_prerequisite(parent.identifier_id, child.identifier_id)
    }

    /// The full transitive closure over prerequisite edges from a root
    /// identifier, to arbitrary depth.
    ///
    /// Breadth-first with an explicit visited set: each node is expanded
    /// once, so cycles and diamonds terminate. The root is always the
    /// first node, even when it has no dependencies.
    pub fn transitive_dependencies(
        &self,
        root_identifier_id: RowId,
    ) -> GraphResult<DependencyClosure> {
        let root = self
            .store
            .identifier_by_id(root_identifier_id)?
            .ok_or(GraphError::IdentifierNotFound(root_identifier_id))?;

        let mut nodes = vec![root];
        let mut edges = Vec::new();
        let mut visited = HashSet::from([root_identifier_id]);
        let mut queue = VecDeque::from([root_identifier_id]);

        while let Some(current) = queue.pop_front() {
            for edge in self
                .store
                .relationships_from(current, RelationshipKind::HasPrerequisite)?
            {
                let next = edge.right_identifier_id;
                edges.push(edge);
                if visited.insert(next) {
                    let identifier = self
                        .store
                        .identifier_by_id(next)?
                        .ok_or(GraphError::IdentifierNotFound(next))?;
                    nodes.push(identifier);
                    queue.push_back(next);
                }
            }
        }

        debug!(
            root = root_identifier_id,
            nodes = nodes.len(),
            edges = edges.len(),
            "computed dependency closure"
        );
        Ok(DependencyClosure { nodes, edges })
    }

    /// [`transitive_dependencies`] for a package, with each node resolved
    /// to its package name where the identifier targets one.
    ///
    /// [`transitive_dependencies`]: RelationshipGraph::transitive_dependencies
    pub fn dependency_report(&self, package_id: RowId) -> GraphResult<DependencyReport> {
        self.store
            .package_by_id(package_id)?
            .ok_or(GraphError::PackageNotFound(package_id))?;
        let root = self
            .store
            .identifier_for_package(package_id)?
            .ok_or(GraphError::PackageNotIdentified(package_id))?;

        let closure = self.transitive_dependencies(root.identifier_id)?;
        let mut nodes = Vec::with_capacity(closure.nodes.len());
        for identifier in closure.nodes {
            let package_name = match identifier.target {
                IdentifierTarget::Package(id) => {
                    self.store.package_by_id(id)?.map(|package| package.name)
                }
                _ => None,
            };
            nodes.push(DependencyNode {
                identifier,
                package_name,
            });
        }
        Ok(DependencyReport {
            nodes,
            edges: closure.edges,
        })
    }

    fn require_identifier(&self, identifier_id: RowId) -> GraphResult<()> {
        self.store
            .identifier_by_id(identifier_id)?
            .ok_or(GraphError::IdentifierNotFound(identifier_id))?;
        Ok(())
    }

    /// Insert an edge, mapping a duplicate-triple violation to `None`.
    fn insert_tolerant(
        &self,
        edge: NewRelationship,
    ) -> GraphResult<Option<sbomdb_store::RelationshipRecord>> {
        use sbomdb_store::StoreError;
        match self.store.insert_relationship(edge) {
            Ok(record) => Ok(Some(record)),
            Err(StoreError::UniqueViolation { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
