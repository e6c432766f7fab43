//! Content-addressed registration for the sbomdb provenance database.
//!
//! This crate covers the write path of SBOM generation:
//!
//! - [`ContentStore`] — deduplicated registration of individual files by
//!   content hash
//! - [`PackageRegistry`] — two-tier cached registration of packages, either
//!   whole archives or directory trees
//! - [`walk_tree`] — the filesystem-walk provider yielding hashed files
//!   with package-relative paths
//! - [`FileTypeClassifier`] / [`ExtensionClassifier`] — the SPDX file-type
//!   seam scanner plugins can replace
//!
//! Registration is idempotent end to end: re-registering the same content
//! returns the existing rows and inserts nothing.

pub mod content;
pub mod error;
pub mod filetype;
pub mod package;
pub mod walk;

pub use content::ContentStore;
pub use error::{RegistryError, RegistryResult};
pub use filetype::{ExtensionClassifier, FileTypeClassifier};
pub use package::{PackageOptions, PackageRegistry};
pub use walk::{walk_tree, WalkedFile};
