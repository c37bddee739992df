//! Enum code generation for the Go target.
//!
//! Go has no enum construct, so each schema enum becomes a named string
//! type with one typed constant per variant.

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

    /// Generates a string-backed enum type with variant constants.
    #[must_use]
    pub fn generate(&self, def: &TypeDefinition) -> String {
        let TypeDefKind::Enum { variants } = &def.kind else {
            return String::new();
        };
        let mut output = String::new();
        let go_name = def.name.to_case(Case::Pascal);

        output.push_str(&format!(
            "// {go_name} is generated from schema enum \"{}\".\n",
            def.name
        ));
        output.push_str(&format!("type {go_name} string\n\n"));

        if !variants.is_empty() {
            output.push_str("const (\n");
            for variant in variants {
                let variant_name = variant.name.to_case(Case::Pascal);
                output.push_str(&format!(
                    "\t{go_name}{variant_name} {go_name} = \"{variant_name}\"\n"
                ));
            }
            output.push_str(")\n\n");
        }

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
    fn test_generate_enum_constants() {
        let graph = graph_of(
            r#"<schema namespace="paint">
    <enum name="Color">
        <variant name="Red"/>
        <variant name="darkBlue"/>
    </enum>
</schema>"#,
        );
        let output = EnumGenerator::new(&graph).generate(&graph.nodes()[0].def);

        assert!(output.contains("type Color string\n"));
        assert!(output.contains("\tColorRed Color = \"Red\"\n"));
        assert!(output.contains("\tColorDarkBlue Color = \"DarkBlue\"\n"));
    }

    #[test]
    fn test_empty_enum_has_no_const_block() {
        let graph = graph_of(r#"<schema namespace="p"><enum name="Unit"/></schema>"#);
        let output = EnumGenerator::new(&graph).generate(&graph.nodes()[0].def);

        assert!(output.contains("type Unit string\n"));
        assert!(!output.contains("const ("));
    }
}
