use sbomdb_store::{IdentifierRecord, RelationshipRecord};

/// Outcome of an edge insertion that tolerates duplicates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The edge was created.
    Created(RelationshipRecord),
    /// An edge with the same (left, kind, right) triple already existed;
    /// nothing was inserted.
    Duplicate,
}

impl EdgeOutcome {
    /// Returns `true` if the edge already existed.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, EdgeOutcome::Duplicate)
    }
}

/// The transitive prerequisite closure from a root identifier.
///
/// `nodes` is in breadth-first order with the root always first; `edges`
/// contains every prerequisite edge whose endpoints are both reachable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyClosure {
    pub nodes: Vec<IdentifierRecord>,
    pub edges: Vec<RelationshipRecord>,
}

impl DependencyClosure {
    /// Number of reachable identifiers, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if only the root is present (no dependencies).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}

/// One entry of a rendered dependency report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyNode {
    pub identifier: IdentifierRecord,
    /// The referenced package's name, when the identifier names a package.
    pub package_name: Option<String>,
}

/// A dependency closure resolved to package names for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyReport {
    pub nodes: Vec<DependencyNode>,
    pub edges: Vec<RelationshipRecord>,
}
