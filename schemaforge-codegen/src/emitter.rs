//! Code emitter.
//!
//! Walks a resolved type graph and writes target-language source files.
//! Output is byte-deterministic for a given graph: documents are visited in
//! lexicographic path order and naming is a pure function of schema names.
//!
//! The output directory is fully owned by the generator. Every file write
//! is atomic: content is rendered to a temporary file in the output
//! directory and then renamed over the final path, so a failed run never
//! leaves a half-written file behind.

use crate::error::EmitError;
use crate::{go, rust};
use convert_case::{Case, Casing};
use schemaforge_schema::ResolvedTypeGraph;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported target languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Rust source output.
    Rust,
    /// Go source output.
    Go,
}

impl Target {
    /// Parses a target from its command-line name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rust" => Some(Self::Rust),
            "go" => Some(Self::Go),
            _ => None,
        }
    }

    /// Returns the target's command-line name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Go => "go",
        }
    }

    /// Returns the output file extension.
    #[must_use]
    pub const fn file_extension(&self) -> &'static str {
        match self {
            Self::Rust => "rs",
            Self::Go => "go",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Emits target-language source files from a resolved type graph.
pub struct Emitter<'a> {
    graph: &'a ResolvedTypeGraph,
    target: Target,
    namespace: String,
    output_dir: PathBuf,
}

impl<'a> Emitter<'a> {
    /// Creates a new emitter.
    #[must_use]
    pub fn new(
        graph: &'a ResolvedTypeGraph,
        target: Target,
        namespace: impl Into<String>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            graph,
            target,
            namespace: namespace.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Renders and writes all output files.
    ///
    /// Returns the paths written, in write order. An empty graph writes
    /// nothing and succeeds.
    ///
    /// # Errors
    /// Fails fast with [`EmitError`] on the first unsupported construct or
    /// IO failure.
    pub fn emit(&self) -> Result<Vec<PathBuf>, EmitError> {
        if self.graph.documents().is_empty() {
            return Ok(Vec::new());
        }

        fs::create_dir_all(&self.output_dir)?;

        // Render everything before writing anything, so an unsupported
        // construct in a later document never leaves partial output from
        // this run.
        let mut files: Vec<(PathBuf, String)> = Vec::new();
        for (doc_index, doc) in self.graph.documents().iter().enumerate() {
            let stem = module_name(&doc.path);
            let file_name = format!("{stem}.{}", self.target.file_extension());
            let content = match self.target {
                Target::Rust => rust::render_document(self.graph, doc_index)?,
                Target::Go => go::render_document(self.graph, doc_index, &self.namespace)?,
            };
            files.push((self.output_dir.join(file_name), content));
        }
        if self.target == Target::Rust {
            files.push((
                self.output_dir.join("mod.rs"),
                rust::render_module_index(self.graph, &self.namespace),
            ));
        }

        let mut written = Vec::with_capacity(files.len());
        for (path, content) in files {
            write_atomic(&self.output_dir, &path, &content)?;
            debug!(path = %path.display(), "wrote generated file");
            written.push(path);
        }
        Ok(written)
    }
}

/// Returns the output module name for a schema document path.
///
/// The file stem is converted to snake case, so `OrderBook.sfs` and
/// `order-book.sfs` both map to `order_book`.
#[must_use]
pub fn module_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("schema")
        .to_case(Case::Snake)
}

/// Writes a file atomically: temporary file in `dir`, then rename.
fn write_atomic(dir: &Path, path: &Path, content: &str) -> Result<(), EmitError> {
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaforge_schema::resolver::ResolverOptions;
    use std::path::Path;

    fn graph_from(sources: &[(&str, &str)]) -> ResolvedTypeGraph {
        let documents = sources
            .iter()
            .map(|(path, source)| {
                schemaforge_schema::parse_document(Path::new(path), source)
                    .expect("Failed to parse document")
            })
            .collect();
        schemaforge_schema::resolve(documents, &ResolverOptions::default())
            .expect("Failed to resolve")
    }

    const GEO: &str = r#"<schema namespace="geo">
    <record name="Point">
        <field name="x" type="int32"/>
        <field name="y" type="int32"/>
    </record>
</schema>"#;

    #[test]
    fn test_target_parse() {
        assert_eq!(Target::parse("rust"), Some(Target::Rust));
        assert_eq!(Target::parse("Go"), Some(Target::Go));
        assert_eq!(Target::parse("cobol"), None);
    }

    #[test]
    fn test_module_name_casing() {
        assert_eq!(module_name(Path::new("schemas/OrderBook.sfs")), "order_book");
        assert_eq!(module_name(Path::new("geo.sfs")), "geo");
    }

    #[test]
    fn test_emit_writes_expected_files() {
        let graph = graph_from(&[("geo.sfs", GEO)]);
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let emitter = Emitter::new(&graph, Target::Rust, "geo", dir.path());
        let written = emitter.emit().expect("Failed to emit");

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("geo.rs"));
        assert!(written[1].ends_with("mod.rs"));
        for path in &written {
            assert!(path.exists());
        }
    }

    #[test]
    fn test_emit_is_deterministic() {
        let graph = graph_from(&[("geo.sfs", GEO)]);
        let dir_a = tempfile::tempdir().expect("Failed to create temp dir");
        let dir_b = tempfile::tempdir().expect("Failed to create temp dir");

        Emitter::new(&graph, Target::Rust, "geo", dir_a.path())
            .emit()
            .expect("Failed to emit");
        Emitter::new(&graph, Target::Rust, "geo", dir_b.path())
            .emit()
            .expect("Failed to emit");

        let a = fs::read_to_string(dir_a.path().join("geo.rs")).unwrap();
        let b = fs::read_to_string(dir_b.path().join("geo.rs")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_emit_overwrites_existing_files() {
        let graph = graph_from(&[("geo.sfs", GEO)]);
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("geo.rs"), "stale content").unwrap();

        Emitter::new(&graph, Target::Rust, "geo", dir.path())
            .emit()
            .expect("Failed to emit");

        let content = fs::read_to_string(dir.path().join("geo.rs")).unwrap();
        assert!(!content.contains("stale content"));
        assert!(content.contains("pub struct Point"));
    }

    #[test]
    fn test_empty_graph_writes_nothing() {
        let graph = ResolvedTypeGraph::default();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let target = dir.path().join("out");

        let written = Emitter::new(&graph, Target::Rust, "geo", &target)
            .emit()
            .expect("empty graph should emit");

        assert!(written.is_empty());
        // Nothing was written, not even the output directory.
        assert!(!target.exists());
    }

    #[test]
    fn test_unsupported_construct_writes_no_files() {
        let graph = graph_from(&[(
            "shapes.sfs",
            r#"<schema namespace="shapes">
    <record name="Circle">
        <field name="radius" type="float64"/>
    </record>
    <union name="Shape">
        <variant name="circle" type="Circle"/>
    </union>
</schema>"#,
        )]);
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let err = Emitter::new(&graph, Target::Go, "shapes", dir.path())
            .emit()
            .expect_err("union is unsupported in go");

        assert!(matches!(err, EmitError::UnsupportedConstruct { .. }));
        assert!(!dir.path().join("shapes.go").exists());
    }
}
