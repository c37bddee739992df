//! Union code generation for the Rust target.
//!
//! Schema unions map directly onto Rust enums with payload variants.

use crate::rust::type_expr;
use convert_case::{Case, Casing};
use schemaforge_schema::{ResolvedTypeGraph, TypeDefKind, TypeDefinition};

/// Generator for union definitions.
pub struct UnionGenerator<'a> {
    graph: &'a ResolvedTypeGraph,
    doc_index: usize,
}

impl<'a> UnionGenerator<'a> {
    /// Creates a new union generator.
    #[must_use]
    pub fn new(graph: &'a ResolvedTypeGraph, doc_index: usize) -> Self {
        Self { graph, doc_index }
    }

    /// Generates a tagged enum definition for a union.
    #[must_use]
    pub fn generate(&self, def: &TypeDefinition) -> String {
        let TypeDefKind::Union { variants } = &def.kind else {
            return String::new();
        };
        let mut output = String::new();
        let rust_name = def.name.to_case(Case::Pascal);

        output.push_str(&format!("/// Generated from schema union `{}`.\n", def.name));
        output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        output.push_str(&format!("pub enum {rust_name} {{\n"));
        for variant in variants {
            let variant_name = variant.name.to_case(Case::Pascal);
            let payload = type_expr(self.graph, self.doc_index, &variant.type_ref, false);
            output.push_str(&format!("    {variant_name}({payload}),\n"));
        }
        output.push_str("}\n\n");

        output
    }
}
