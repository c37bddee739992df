//! Go code generation modules.

pub mod enums;
pub mod records;
pub mod types;

pub use enums::EnumGenerator;
pub use records::RecordGenerator;
pub use types::TypeGenerator;

use crate::error::EmitError;
use convert_case::{Case, Casing};
use schemaforge_schema::{PrimitiveType, ResolvedTypeGraph, TypeDefKind, TypeReference};

/// Renders the Go source file for one schema document.
///
/// All documents share the one package named by the generation run, so
/// cross-document references need no import plumbing.
///
/// # Errors
/// Fails with [`EmitError::UnsupportedConstruct`] on the first union
/// definition: Go has no native discriminated union construct.
pub fn render_document(
    graph: &ResolvedTypeGraph,
    doc_index: usize,
    namespace: &str,
) -> Result<String, EmitError> {
    let doc = &graph.documents()[doc_index];
    let mut body = String::new();

    let records = RecordGenerator::new(graph);
    let enums = EnumGenerator::new(graph);
    let types = TypeGenerator::new(graph);

    for &id in &doc.types {
        let node = graph.node(id);
        match &node.def.kind {
            TypeDefKind::Record { .. } => body.push_str(&records.generate(&node.def)),
            TypeDefKind::Enum { .. } => body.push_str(&enums.generate(&node.def)),
            TypeDefKind::Union { .. } => {
                return Err(EmitError::UnsupportedConstruct {
                    target: "go",
                    construct: "union",
                    type_name: node.def.name.clone(),
                    path: doc.path.clone(),
                    line: node.def.line,
                });
            }
            TypeDefKind::Alias { .. } | TypeDefKind::Scalar { .. } => {
                body.push_str(&types.generate(&node.def));
            }
        }
    }

    let mut output = String::new();
    output.push_str("// Code generated by schemaforge. DO NOT EDIT.\n\n");
    output.push_str(&format!("package {}\n\n", namespace.to_case(Case::Flat)));
    if body.contains("fmt.") {
        output.push_str("import \"fmt\"\n\n");
    }
    output.push_str(&body);

    Ok(output)
}

/// Renders the Go type expression for a resolved reference.
///
/// Optional fields and recursive types are represented as pointers; byte
/// sequences stay plain slices since slices are already nilable.
#[must_use]
pub(crate) fn type_expr(
    graph: &ResolvedTypeGraph,
    reference: &TypeReference,
    optional: bool,
) -> String {
    match reference {
        TypeReference::Primitive(prim) => {
            let base = prim.go_type();
            if optional && !matches!(prim, PrimitiveType::Bytes) {
                format!("*{base}")
            } else {
                base.to_string()
            }
        }
        TypeReference::Resolved(id) => {
            let name = graph.node(*id).def.name.to_case(Case::Pascal);
            if optional || graph.is_recursive(*id) {
                format!("*{name}")
            } else {
                name
            }
        }
        // The emitter only ever sees fully resolved graphs.
        TypeReference::Named { name, .. } => name.to_case(Case::Pascal),
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
    fn test_render_document_header() {
        let graph = graph_of(
            r#"<schema namespace="geo">
    <record name="Point">
        <field name="x" type="int32"/>
    </record>
</schema>"#,
        );
        let output = render_document(&graph, 0, "geo").expect("Failed to render");

        assert!(output.starts_with("// Code generated by schemaforge. DO NOT EDIT.\n"));
        assert!(output.contains("package geo\n"));
        assert!(!output.contains("import \"fmt\""));
    }

    #[test]
    fn test_fmt_import_added_for_constrained_scalar() {
        let graph = graph_of(
            r#"<schema namespace="net"><scalar name="Port" base="uint16" min="1"/></schema>"#,
        );
        let output = render_document(&graph, 0, "net").expect("Failed to render");
        assert!(output.contains("import \"fmt\"\n"));
    }

    #[test]
    fn test_union_is_unsupported() {
        let graph = graph_of(
            r#"<schema namespace="shapes">
    <record name="Circle">
        <field name="radius" type="float64"/>
    </record>
    <union name="Shape">
        <variant name="circle" type="Circle"/>
    </union>
</schema>"#,
        );
        let err = render_document(&graph, 0, "shapes").expect_err("union should fail");

        let EmitError::UnsupportedConstruct {
            target,
            construct,
            type_name,
            ..
        } = err
        else {
            panic!("expected UnsupportedConstruct");
        };
        assert_eq!(target, "go");
        assert_eq!(construct, "union");
        assert_eq!(type_name, "Shape");
    }
}
