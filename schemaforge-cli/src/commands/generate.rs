use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use clap::Args;
use schemaforge_codegen::{Emitter, Target};
use schemaforge_schema::resolver::{ResolverOptions, Severity};
use schemaforge_schema::{Diagnostic, parse_dir, resolve};
use tracing::info;

#[derive(Args)]
pub struct GenerateArgs {
    /// Target language: rust or go
    #[arg(short = 'l', long)]
    language: String,

    /// Namespace for the generated code (Rust parent module, Go package)
    #[arg(short = 'n', long)]
    namespace: String,

    /// Directory containing .sfs schema files
    #[arg(short = 'd', long)]
    schema_dir: PathBuf,

    /// Directory for generated output files
    #[arg(short = 'o', long)]
    output_dir: PathBuf,

    /// Downgrade duplicate type definitions to warnings, keeping the first
    #[arg(long)]
    allow_duplicates: bool,

    /// Downgrade ambiguous unqualified references to warnings, picking the
    /// first candidate in document order
    #[arg(long)]
    allow_ambiguous: bool,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let target = Target::parse(&self.language).ok_or_else(|| {
            anyhow!(
                "unknown target language '{}' (expected rust or go)",
                self.language
            )
        })?;

        let documents = match parse_dir(&self.schema_dir) {
            Ok(documents) => documents,
            Err(failure) => return report(&failure.diagnostics),
        };
        info!(count = documents.len(), "parsed schema documents");

        let options = ResolverOptions {
            duplicate_types: severity(self.allow_duplicates),
            ambiguous_refs: severity(self.allow_ambiguous),
        };
        let graph = match resolve(documents, &options) {
            Ok(graph) => graph,
            Err(failure) => return report(&failure.diagnostics),
        };
        info!(types = graph.len(), "resolved type graph");

        let emitter = Emitter::new(&graph, target, &self.namespace, &self.output_dir);
        match emitter.emit() {
            Ok(written) => {
                info!(
                    files = written.len(),
                    output_dir = %self.output_dir.display(),
                    "generation complete"
                );
                Ok(())
            }
            Err(err) => {
                eprintln!("{}", err.diagnostic(&self.output_dir));
                bail!("code generation failed");
            }
        }
    }
}

const fn severity(allow: bool) -> Severity {
    if allow { Severity::Warn } else { Severity::Deny }
}

/// Prints each diagnostic on its own stderr line and fails the run.
fn report(diagnostics: &[Diagnostic]) -> Result<()> {
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
    bail!("{} error(s)", diagnostics.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn args(schema_dir: PathBuf, output_dir: PathBuf, language: &str) -> GenerateArgs {
        GenerateArgs {
            language: language.to_string(),
            namespace: "geo".to_string(),
            schema_dir,
            output_dir,
            allow_duplicates: false,
            allow_ambiguous: false,
        }
    }

    #[test]
    fn test_generate_rust_end_to_end() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let schema_dir = dir.path().join("schemas");
        let output_dir = dir.path().join("out");
        fs::create_dir(&schema_dir).unwrap();
        fs::write(
            schema_dir.join("geo.sfs"),
            r#"<schema namespace="geo">
    <record name="Point">
        <field name="x" type="int32"/>
        <field name="y" type="int32"/>
    </record>
</schema>"#,
        )
        .unwrap();

        args(schema_dir, output_dir.clone(), "rust")
            .run()
            .expect("generation should succeed");

        let content = fs::read_to_string(output_dir.join("geo.rs")).unwrap();
        assert!(content.contains("pub struct Point"));
        assert!(output_dir.join("mod.rs").exists());
    }

    #[test]
    fn test_generate_empty_schema_dir_succeeds() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let schema_dir = dir.path().join("schemas");
        let output_dir = dir.path().join("out");
        fs::create_dir(&schema_dir).unwrap();

        args(schema_dir, output_dir.clone(), "rust")
            .run()
            .expect("empty schema dir should succeed");
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_generate_rejects_unknown_language() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let err = args(dir.path().to_path_buf(), dir.path().join("out"), "cobol")
            .run()
            .expect_err("unknown language should fail");
        assert!(err.to_string().contains("cobol"));
    }

    #[test]
    fn test_generate_fails_on_unresolved_reference() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let schema_dir = dir.path().join("schemas");
        let output_dir = dir.path().join("out");
        fs::create_dir(&schema_dir).unwrap();
        fs::write(
            schema_dir.join("geo.sfs"),
            r#"<schema namespace="geo">
    <record name="Point">
        <field name="unit" type="Missing"/>
    </record>
</schema>"#,
        )
        .unwrap();

        let err = args(schema_dir, output_dir.clone(), "rust")
            .run()
            .expect_err("unresolved reference should fail");
        assert!(err.to_string().contains("1 error(s)"));
        assert!(!output_dir.exists());
    }
}
