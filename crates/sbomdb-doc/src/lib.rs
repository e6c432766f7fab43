//! Document assembly for the sbomdb provenance database.
//!
//! A document pins down one registered package inside one fresh namespace:
//!
//! - [`namespace::create_document_namespace`] mints the namespace URI
//! - [`IdentifierAllocator`] allocates the SPDX reference strings, strictly
//!   once per entity per namespace
//! - [`DocumentAssembler::create_document`] runs the whole assembly,
//!   structural relationship edges included, with an explicit
//!   caller-supplied [`Creator`]
//!
//! [`Creator`]: sbomdb_store::Creator

pub mod assembler;
pub mod error;
pub mod identifier;
pub mod namespace;

pub use assembler::{DocumentAssembler, DocumentOptions};
pub use error::{DocError, DocResult};
pub use identifier::{gen_id_string, IdentifierAllocator, DOCUMENT_ID_STRING};
pub use namespace::create_document_namespace;
