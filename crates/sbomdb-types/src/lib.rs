//! Foundation types for the sbomdb provenance database.
//!
//! This crate provides the hash and fingerprint types used for
//! content-addressed registration, plus the small enums of the data model.
//! Every other sbomdb crate depends on `sbomdb-types`.
//!
//! # Key Types
//!
//! - [`ContentHash`] — SHA-1 content address of a single file or archive
//! - [`VerificationCode`] — SPDX package-verification-code over a file set
//! - [`DirectoryCode`] — content-derived identity of a directory tree
//! - [`FileType`] — SPDX file type tag
//! - [`RelationshipKind`] — named relationship types between identifiers
//!
//! SHA-1 is the one fixed hash function used for all content addressing.
//! The verification code is part of the SPDX wire format, which defines it
//! over SHA-1, so the same algorithm is used for file identity to keep a
//! single addressing scheme throughout the system.

pub mod error;
pub mod filetype;
pub mod fingerprint;
pub mod hash;
pub mod relationship;

pub use error::TypeError;
pub use filetype::FileType;
pub use fingerprint::{DirectoryCode, VerificationCode};
pub use hash::ContentHash;
pub use relationship::RelationshipKind;
