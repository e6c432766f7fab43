//! Named relationship kinds between SPDX identifiers.
//!
//! Relationship edges are typed by [`RelationshipKind`]. The enum is the
//! in-process representation everywhere; numeric storage codes exist only
//! for engines that persist relationships by code, and are resolved at the
//! storage boundary via [`RelationshipKind::storage_code`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The kind of a directed relationship edge between two identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Left (a document) describes the right (its root package).
    Describes,
    /// Left (a package) is described by the right (a document).
    DescribedBy,
    /// Left (a package) contains the right (one of its files).
    Contains,
    /// Left (a file) is contained by the right (a package).
    ContainedBy,
    /// Left requires the right: the edge followed by dependency queries.
    HasPrerequisite,
    /// Left is required by the right (inverse of `HasPrerequisite`).
    PrerequisiteFor,
}

impl RelationshipKind {
    /// Numeric code used by storage engines that persist kinds by number.
    ///
    /// Codes follow the SPDX 2.0 relationship-type ordering the original
    /// schema shipped with.
    pub fn storage_code(&self) -> u16 {
        match self {
            RelationshipKind::Describes => 1,
            RelationshipKind::DescribedBy => 2,
            RelationshipKind::Contains => 3,
            RelationshipKind::ContainedBy => 4,
            RelationshipKind::PrerequisiteFor => 28,
            RelationshipKind::HasPrerequisite => 29,
        }
    }

    /// Resolve a storage code back to a kind.
    pub fn from_storage_code(code: u16) -> Result<Self, TypeError> {
        match code {
            1 => Ok(RelationshipKind::Describes),
            2 => Ok(RelationshipKind::DescribedBy),
            3 => Ok(RelationshipKind::Contains),
            4 => Ok(RelationshipKind::ContainedBy),
            28 => Ok(RelationshipKind::PrerequisiteFor),
            29 => Ok(RelationshipKind::HasPrerequisite),
            other => Err(TypeError::UnknownRelationshipCode(other)),
        }
    }

    /// The SPDX tag-value spelling of this relationship type.
    pub fn tag(&self) -> &'static str {
        match self {
            RelationshipKind::Describes => "DESCRIBES",
            RelationshipKind::DescribedBy => "DESCRIBED_BY",
            RelationshipKind::Contains => "CONTAINS",
            RelationshipKind::ContainedBy => "CONTAINED_BY",
            RelationshipKind::HasPrerequisite => "HAS_PREREQUISITE",
            RelationshipKind::PrerequisiteFor => "PREREQUISITE_FOR",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
