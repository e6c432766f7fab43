//! The typed relationship graph of the sbomdb provenance database.
//!
//! Relationships are directed, typed edges between SPDX identifiers, stored
//! in a self-referential edge table. This crate owns every edge write:
//!
//! - [`RelationshipGraph::autocreate_structural`] derives the containment
//!   and description edges already implied by the data model
//! - [`RelationshipGraph::add_prerequisite`] records dependency edges,
//!   reporting (never failing on) duplicates
//! - [`RelationshipGraph::transitive_dependencies`] closes over
//!   prerequisite edges to arbitrary depth with a breadth-first traversal

pub mod error;
pub mod graph;
pub mod report;

pub use error::{GraphError, GraphResult};
pub use graph::RelationshipGraph;
pub use report::{DependencyClosure, DependencyNode, DependencyReport, EdgeOutcome};
