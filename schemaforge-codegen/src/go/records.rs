//! Record code generation for the Go target.

use crate::go::type_expr;
use convert_case::{Case, Casing};
use schemaforge_schema::{ResolvedTypeGraph, TypeDefKind, TypeDefinition};

/// Generator for record definitions.
pub struct RecordGenerator<'a> {
    graph: &'a ResolvedTypeGraph,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    #[must_use]
    pub fn new(graph: &'a ResolvedTypeGraph) -> Self {
        Self { graph }
    }

    /// Generates a struct definition for a record.
    ///
    /// Field names are exported in Pascal case so the generated types are
    /// usable outside the package.
    #[must_use]
    pub fn generate(&self, def: &TypeDefinition) -> String {
        let TypeDefKind::Record { fields } = &def.kind else {
            return String::new();
        };
        let mut output = String::new();
        let go_name = def.name.to_case(Case::Pascal);

        output.push_str(&format!(
            "// {go_name} is generated from schema record \"{}\".\n",
            def.name
        ));
        output.push_str(&format!("type {go_name} struct {{\n"));
        for field in fields {
            let field_name = field.name.to_case(Case::Pascal);
            let field_type = type_expr(self.graph, &field.type_ref, field.optional);
            output.push_str(&format!("\t{field_name} {field_type}\n"));
        }
        output.push_str("}\n\n");

        output
    }
}
