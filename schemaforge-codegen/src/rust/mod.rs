//! Rust code generation modules.

pub mod enums;
pub mod records;
pub mod types;
pub mod unions;

pub use enums::EnumGenerator;
pub use records::RecordGenerator;
pub use types::TypeGenerator;
pub use unions::UnionGenerator;

use crate::emitter::module_name;
use crate::error::EmitError;
use convert_case::{Case, Casing};
use schemaforge_schema::{ResolvedTypeGraph, TypeDefKind, TypeReference};

/// Renders the Rust source file for one schema document.
///
/// Definitions are rendered in source order, so output is deterministic.
pub fn render_document(
    graph: &ResolvedTypeGraph,
    doc_index: usize,
) -> Result<String, EmitError> {
    let doc = &graph.documents()[doc_index];
    let mut output = String::new();

    output.push_str(&format!(
        "//! Generated by schemaforge from `{}`. Do not edit.\n\n",
        doc.path.display()
    ));

    let records = RecordGenerator::new(graph, doc_index);
    let enums = EnumGenerator::new(graph);
    let unions = UnionGenerator::new(graph, doc_index);
    let types = TypeGenerator::new(graph, doc_index);

    for &id in &doc.types {
        let node = graph.node(id);
        match &node.def.kind {
            TypeDefKind::Record { .. } => output.push_str(&records.generate(&node.def)),
            TypeDefKind::Enum { .. } => output.push_str(&enums.generate(&node.def)),
            TypeDefKind::Union { .. } => output.push_str(&unions.generate(&node.def)),
            TypeDefKind::Alias { .. } | TypeDefKind::Scalar { .. } => {
                output.push_str(&types.generate(&node.def));
            }
        }
    }

    Ok(output)
}

/// Renders the `mod.rs` index listing every generated module.
#[must_use]
pub fn render_module_index(graph: &ResolvedTypeGraph, namespace: &str) -> String {
    let mut output = String::new();
    output.push_str("//! Generated by schemaforge. Do not edit.\n//!\n");
    output.push_str(&format!("//! Namespace: `{namespace}`.\n\n"));

    for doc in graph.documents() {
        output.push_str(&format!("pub mod {};\n", module_name(&doc.path)));
    }

    output
}

/// Renders the Rust type expression for a resolved reference.
///
/// References into other documents are path-qualified through `super`.
/// Types participating in a permitted cycle are boxed so self-referential
/// structures have a finite in-memory representation.
#[must_use]
pub(crate) fn type_expr(
    graph: &ResolvedTypeGraph,
    doc_index: usize,
    reference: &TypeReference,
    optional: bool,
) -> String {
    let base = match reference {
        TypeReference::Primitive(prim) => prim.rust_type().to_string(),
        TypeReference::Resolved(id) => {
            let node = graph.node(*id);
            let name = node.def.name.to_case(Case::Pascal);
            let path = if node.doc == doc_index {
                name
            } else {
                let module = module_name(&graph.documents()[node.doc].path);
                format!("super::{module}::{name}")
            };
            if graph.is_recursive(*id) {
                format!("Box<{path}>")
            } else {
                path
            }
        }
        // The emitter only ever sees fully resolved graphs.
        TypeReference::Named { name, .. } => name.to_case(Case::Pascal),
    };

    if optional {
        format!("Option<{base}>")
    } else {
        base
    }
}
