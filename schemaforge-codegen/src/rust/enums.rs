//! Enum code generation for the Rust target.

use convert_case::{Case, Casing};
use schemaforge_schema::{ResolvedTypeGraph, TypeDefKind, TypeDefinition};

/// Generator for enum definitions.
pub struct EnumGenerator<'a> {
    #[allow(dead_code)]
    graph: &'a ResolvedTypeGraph,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(graph: &'a ResolvedTypeGraph) -> Self {
        Self { graph }
    }

    /// Generates an enum definition.
    #[must_use]
    pub fn generate(&self, def: &TypeDefinition) -> String {
        let TypeDefKind::Enum { variants } = &def.kind else {
            return String::new();
        };
        let mut output = String::new();
        let rust_name = def.name.to_case(Case::Pascal);

        output.push_str(&format!("/// Generated from schema enum `{}`.\n", def.name));
        output.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n");
        output.push_str(&format!("pub enum {rust_name} {{\n"));
        for variant in variants {
            output.push_str(&format!("    {},\n", variant.name.to_case(Case::Pascal)));
        }
        output.push_str("}\n\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemaforge_schema::resolver::ResolverOptions;
    use std::path::Path;

    fn graph_of(source: &str) -> ResolvedTypeGraph {
        let doc = schemaforge_schema::parse_document(Path::new("test.sfs"), source)
            .expect("Failed to parse document");
        schemaforge_schema::resolve(vec![doc], &ResolverOptions::default())
            .expect("Failed to resolve")
    }

    #[test]
    fn test_generate_enum() {
        let graph = graph_of(
            r#"<schema namespace="paint">
    <enum name="Color">
        <variant name="Red"/>
        <variant name="darkBlue"/>
    </enum>
</schema>"#,
        );
        let output = EnumGenerator::new(&graph).generate(&graph.nodes()[0].def);

        assert!(output.contains("pub enum Color {"));
        assert!(output.contains("    Red,\n"));
        // Variant names are normalized to the target's casing convention.
        assert!(output.contains("    DarkBlue,\n"));
    }

    #[test]
    fn test_generate_empty_enum() {
        let graph = graph_of(r#"<schema namespace="p"><enum name="Unit"/></schema>"#);
        let output = EnumGenerator::new(&graph).generate(&graph.nodes()[0].def);
        assert!(output.contains("pub enum Unit {\n}\n"));
    }
}
