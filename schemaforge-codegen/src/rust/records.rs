//! Record code generation for the Rust target.

use crate::rust::type_expr;
use convert_case::{Case, Casing};
use schemaforge_schema::{
    FieldSpec, PrimitiveType, ResolvedTypeGraph, TypeDefKind, TypeDefinition, TypeReference,
};

/// Generator for record definitions.
pub struct RecordGenerator<'a> {
    graph: &'a ResolvedTypeGraph,
    doc_index: usize,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    #[must_use]
    pub fn new(graph: &'a ResolvedTypeGraph, doc_index: usize) -> Self {
        Self { graph, doc_index }
    }

    /// Generates a struct definition for a record.
    #[must_use]
    pub fn generate(&self, def: &TypeDefinition) -> String {
        let TypeDefKind::Record { fields } = &def.kind else {
            return String::new();
        };
        let mut output = String::new();
        let rust_name = def.name.to_case(Case::Pascal);

        output.push_str(&format!("/// Generated from schema record `{}`.\n", def.name));
        output.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        output.push_str(&format!("pub struct {rust_name} {{\n"));
        for field in fields {
            let field_name = field.name.to_case(Case::Snake);
            let field_type = type_expr(self.graph, self.doc_index, &field.type_ref, field.optional);
            output.push_str(&format!("    pub {field_name}: {field_type},\n"));
        }
        output.push_str("}\n\n");

        if let Some(default_impl) = self.generate_default(&rust_name, fields) {
            output.push_str(&default_impl);
        }

        output
    }

    /// Generates a `Default` impl when every field is optional or carries a
    /// primitive default literal.
    fn generate_default(&self, rust_name: &str, fields: &[FieldSpec]) -> Option<String> {
        let mut lines = Vec::with_capacity(fields.len());
        for field in fields {
            let field_name = field.name.to_case(Case::Snake);
            let value = match (&field.default, field.optional) {
                (Some(literal), optional) => {
                    let rendered = default_literal(&field.type_ref, literal)?;
                    if optional {
                        format!("Some({rendered})")
                    } else {
                        rendered
                    }
                }
                (None, true) => "None".to_string(),
                (None, false) => return None,
            };
            lines.push(format!("            {field_name}: {value},\n"));
        }

        let mut output = String::new();
        output.push_str(&format!("impl Default for {rust_name} {{\n"));
        output.push_str("    fn default() -> Self {\n");
        output.push_str("        Self {\n");
        for line in lines {
            output.push_str(&line);
        }
        output.push_str("        }\n");
        output.push_str("    }\n");
        output.push_str("}\n\n");
        Some(output)
    }
}

/// Renders a schema default literal as a Rust expression.
///
/// Numeric literals are suffixed with their concrete type so the rendered
/// expression never relies on inference. Defaults on non-primitive types
/// are not supported and suppress the `Default` impl.
fn default_literal(reference: &TypeReference, literal: &str) -> Option<String> {
    let TypeReference::Primitive(prim) = reference else {
        return None;
    };
    let rendered = match prim {
        PrimitiveType::Bool => literal.to_string(),
        PrimitiveType::String => format!("String::from({literal:?})"),
        PrimitiveType::Bytes => return None,
        _ => format!("{literal}_{}", suffix(*prim)),
    };
    Some(rendered)
}

/// Returns the literal suffix for a numeric primitive.
const fn suffix(prim: PrimitiveType) -> &'static str {
    match prim {
        PrimitiveType::Int32 => "i32",
        PrimitiveType::Int64 => "i64",
        PrimitiveType::Uint16 => "u16",
        PrimitiveType::Uint32 => "u32",
        PrimitiveType::Uint64 => "u64",
        PrimitiveType::Float32 => "f32",
        PrimitiveType::Float64 => "f64",
        PrimitiveType::Bool | PrimitiveType::String | PrimitiveType::Bytes => "",
    }
}
