use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use sbomdb_graph::RelationshipGraph;
use sbomdb_store::{
    Creator, DocumentRecord, IdentifierTarget, NewDocument, PackageRecord, ProvenanceStore,
};

use crate::error::DocResult;
use crate::identifier::{gen_id_string, IdentifierAllocator, DOCUMENT_ID_STRING};
use crate::namespace::create_document_namespace;

const SPDX_VERSION: &str = "SPDX-2.0";
const DATA_LICENSE: &str = "CC0-1.0";
const LICENSE_LIST_VERSION: &str = "2.6";

/// Optional document fields. Everything unset gets a derived default.
#[derive(Clone, Debug, Default)]
pub struct DocumentOptions {
    /// Document name; defaults to `{package name}-{version}`.
    pub name: Option<String>,
    /// Free-form document comment.
    pub comment: Option<String>,
    /// Free-form comment about the creator.
    pub creator_comment: Option<String>,
}

/// Assembles a document for a registered package.
///
/// One call produces the namespace, the document row, the full identifier
/// set (document, package, one per file), and the structural relationship
/// edges. The creator is always an explicit caller-supplied value.
pub struct DocumentAssembler {
    store: Arc<dyn ProvenanceStore>,
    graph: RelationshipGraph,
    allocator: IdentifierAllocator,
}

impl DocumentAssembler {
    pub fn new(store: Arc<dyn ProvenanceStore>) -> Self {
        let graph = RelationshipGraph::new(Arc::clone(&store));
        let allocator = IdentifierAllocator::new(Arc::clone(&store));
        Self {
            store,
            graph,
            allocator,
        }
    }

    /// The relationship graph over the same store, for follow-up edits
    /// (prerequisites, closures) after assembly.
    pub fn graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    /// Assemble a document describing `package` under the namespace
    /// prefix `prefix`.
    pub fn create_document(
        &self,
        prefix: &str,
        package: &PackageRecord,
        creator: Creator,
        options: DocumentOptions,
    ) -> DocResult<DocumentRecord> {
        let name = options.name.unwrap_or_else(|| default_document_name(package));
        let namespace = create_document_namespace(&self.store, prefix, &name)?;

        let document = self.store.insert_document(NewDocument {
            namespace_id: namespace.namespace_id,
            package_id: package.package_id,
            name,
            spdx_version: SPDX_VERSION.to_owned(),
            data_license: DATA_LICENSE.to_owned(),
            license_list_version: LICENSE_LIST_VERSION.to_owned(),
            creator,
            creator_comment: options.creator_comment.unwrap_or_default(),
            document_comment: options.comment.unwrap_or_default(),
            created: Utc::now(),
        })?;

        self.allocator.allocate(
            namespace.namespace_id,
            DOCUMENT_ID_STRING.to_owned(),
            IdentifierTarget::Document(document.document_id),
        )?;
        self.allocator.allocate(
            namespace.namespace_id,
            gen_id_string("Package", &package.name, &package.fingerprint_hex()),
            IdentifierTarget::Package(package.package_id),
        )?;
        for (package_file, file) in self.store.files_of_package(package.package_id)? {
            self.allocator.allocate(
                namespace.namespace_id,
                gen_id_string(
                    "File",
                    &package_file.relative_path,
                    &file.content_hash.to_hex(),
                ),
                IdentifierTarget::PackageFile(package_file.package_file_id),
            )?;
        }

        let edges = self.graph.autocreate_structural(&document)?;
        info!(
            document = document.document_id,
            package = package.package_id,
            namespace = %namespace.uri,
            edges,
            "assembled document"
        );
        Ok(document)
    }
}

/// `{name}-{version}`, or just the name when the version is unknown.
fn default_document_name(package: &PackageRecord) -> String {
    if package.version.is_empty() {
        package.name.clone()
    } else {
        format!("{}-{}", package.name, package.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use sbomdb_registry::{PackageOptions, PackageRegistry};
    use sbomdb_store::{InMemoryStore, RowId};
    use sbomdb_types::RelationshipKind;
    use tempfile::TempDir;

    fn fixture_tree(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (path, contents) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, contents).unwrap();
        }
        dir
    }

    fn setup() -> (Arc<InMemoryStore>, PackageRegistry, DocumentAssembler) {
        let store = Arc::new(InMemoryStore::new());
        let registry = PackageRegistry::new(Arc::clone(&store) as Arc<dyn ProvenanceStore>);
        let assembler = DocumentAssembler::new(Arc::clone(&store) as Arc<dyn ProvenanceStore>);
        (store, registry, assembler)
    }

    fn register_tree(registry: &PackageRegistry, files: &[(&str, &str)]) -> PackageRecord {
        let dir = fixture_tree(files);
        registry
            .register(dir.path(), PackageOptions::default())
            .unwrap()
    }

    #[test]
    fn document_fields_are_populated() {
        let (_store, registry, assembler) = setup();
        let package = register_tree(&registry, &[("src/lib.rs", "pub fn f() {}")]);

        let document = assembler
            .create_document(
                "https://example.com/docs",
                &package,
                Creator::Tool("sbomdb-0.1".into()),
                DocumentOptions {
                    name: Some("fixture-doc".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(document.name, "fixture-doc");
        assert_eq!(document.spdx_version, "SPDX-2.0");
        assert_eq!(document.data_license, "CC0-1.0");
        assert_eq!(document.package_id, package.package_id);
        assert_eq!(document.creator, Creator::Tool("sbomdb-0.1".into()));
    }

    #[test]
    fn default_name_comes_from_the_package() {
        let (_store, registry, assembler) = setup();
        let dir = fixture_tree(&[("a.txt", "a")]);
        let package = registry
            .register(
                dir.path(),
                PackageOptions {
                    name: Some("widget".into()),
                    version: Some("2.1".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        let document = assembler
            .create_document(
                "https://example.com/docs",
                &package,
                Creator::Tool("sbomdb-0.1".into()),
                DocumentOptions::default(),
            )
            .unwrap();
        assert_eq!(document.name, "widget-2.1");
    }

    #[test]
    fn assembly_allocates_every_identifier() {
        let (store, registry, assembler) = setup();
        let package = register_tree(
            &registry,
            &[("src/main.rs", "fn main() {}"), ("README.md", "readme")],
        );

        let document = assembler
            .create_document(
                "https://example.com/docs",
                &package,
                Creator::Person {
                    name: "Ada".into(),
                    email: None,
                },
                DocumentOptions::default(),
            )
            .unwrap();

        let identifiers = store
            .identifiers_in_namespace(document.namespace_id)
            .unwrap();
        // Document, package, and one per file.
        assert_eq!(identifiers.len(), 4);
        assert!(identifiers
            .iter()
            .any(|identifier| identifier.id_string == DOCUMENT_ID_STRING));
        assert!(identifiers
            .iter()
            .any(|identifier| identifier.id_string.starts_with("SPDXRef-Package-")));
        assert_eq!(
            identifiers
                .iter()
                .filter(|identifier| identifier.id_string.starts_with("SPDXRef-File-"))
                .count(),
            2
        );
    }

    #[test]
    fn assembly_creates_structural_edges() {
        let (store, registry, assembler) = setup();
        let package = register_tree(&registry, &[("a.txt", "a"), ("b.txt", "b")]);

        assembler
            .create_document(
                "https://example.com/docs",
                &package,
                Creator::Tool("sbomdb-0.1".into()),
                DocumentOptions::default(),
            )
            .unwrap();
        // Describes + DescribedBy + (Contains + ContainedBy) per file.
        assert_eq!(store.relationship_count(), 6);
    }

    #[test]
    fn reassembly_gets_a_fresh_namespace() {
        let (_store, registry, assembler) = setup();
        let package = register_tree(&registry, &[("a.txt", "a")]);

        let first = assembler
            .create_document(
                "https://example.com/docs",
                &package,
                Creator::Tool("sbomdb-0.1".into()),
                DocumentOptions::default(),
            )
            .unwrap();
        let second = assembler
            .create_document(
                "https://example.com/docs",
                &package,
                Creator::Tool("sbomdb-0.1".into()),
                DocumentOptions::default(),
            )
            .unwrap();
        assert_ne!(first.namespace_id, second.namespace_id);
        assert_ne!(first.document_id, second.document_id);
    }

    // -- full pipeline ------------------------------------------------------

    #[test]
    fn register_document_prerequisite_closure_pipeline() {
        let (store, registry, assembler) = setup();
        let creator = Creator::Tool("sbomdb-0.1".into());

        let app = register_tree(&registry, &[("src/main.rs", "fn main() {}")]);
        let lib = register_tree(&registry, &[("src/lib.rs", "pub fn f() {}")]);
        let sys = register_tree(&registry, &[("ffi.c", "int f(void) { return 0; }")]);

        for package in [&app, &lib, &sys] {
            assembler
                .create_document(
                    "https://example.com/docs",
                    package,
                    creator.clone(),
                    DocumentOptions::default(),
                )
                .unwrap();
        }

        let graph = assembler.graph();
        graph
            .add_prerequisite_for_packages(app.package_id, lib.package_id)
            .unwrap();
        graph
            .add_prerequisite_for_packages(lib.package_id, sys.package_id)
            .unwrap();

        let report = graph.dependency_report(app.package_id).unwrap();
        let names: Vec<_> = report
            .nodes
            .iter()
            .filter_map(|node| node.package_name.as_deref())
            .collect();
        assert_eq!(names.len(), 3);
        assert_eq!(names[0], app.name);
        assert!(names.contains(&lib.name.as_str()));
        assert!(names.contains(&sys.name.as_str()));
        assert_eq!(report.edges.len(), 2);

        // The closure rides on HasPrerequisite edges only; structural
        // edges from assembly stay out of it.
        let root: RowId = store
            .identifier_for_package(app.package_id)
            .unwrap()
            .unwrap()
            .identifier_id;
        for edge in graph.transitive_dependencies(root).unwrap().edges {
            assert_eq!(edge.kind, RelationshipKind::HasPrerequisite);
        }
    }
}
