//! Alias and constrained scalar code generation for the Go target.

use crate::go::type_expr;
use convert_case::{Case, Casing};
use schemaforge_schema::{PrimitiveType, ResolvedTypeGraph, TypeDefKind, TypeDefinition};

/// Generator for alias and constrained scalar definitions.
pub struct TypeGenerator<'a> {
    graph: &'a ResolvedTypeGraph,
}

impl<'a> TypeGenerator<'a> {
    /// Creates a new type generator.
    #[must_use]
    pub fn new(graph: &'a ResolvedTypeGraph) -> Self {
        Self { graph }
    }

    /// Generates the definition for an alias or scalar.
    #[must_use]
    pub fn generate(&self, def: &TypeDefinition) -> String {
        match &def.kind {
            TypeDefKind::Alias { target } => {
                let go_name = def.name.to_case(Case::Pascal);
                let target_type = type_expr(self.graph, target, false);
                format!(
                    "// {go_name} is generated from schema alias \"{}\".\ntype {go_name} = {target_type}\n\n",
                    def.name
                )
            }
            TypeDefKind::Scalar { base, min, max } => {
                self.generate_scalar(def, *base, min.as_deref(), max.as_deref())
            }
            _ => String::new(),
        }
    }

    /// Generates a named type with a validating constructor for a scalar.
    fn generate_scalar(
        &self,
        def: &TypeDefinition,
        base: PrimitiveType,
        min: Option<&str>,
        max: Option<&str>,
    ) -> String {
        let mut output = String::new();
        let go_name = def.name.to_case(Case::Pascal);
        let inner = base.go_type();

        output.push_str(&format!(
            "// {go_name} is generated from schema scalar \"{}\" (constrained {}).\n",
            def.name,
            base.schema_name()
        ));
        output.push_str(&format!("type {go_name} {inner}\n\n"));

        output.push_str(&format!(
            "// New{go_name} validates the schema constraints and wraps the value.\n"
        ));
        output.push_str(&format!(
            "func New{go_name}(value {inner}) ({go_name}, error) {{\n"
        ));
        if is_numeric(base) {
            let zero = zero_literal(base);
            if let Some(min) = min {
                output.push_str(&format!("\tif value < {min} {{\n"));
                output.push_str(&format!(
                    "\t\treturn {zero}, fmt.Errorf(\"{go_name} value %v is below minimum {min}\", value)\n"
                ));
                output.push_str("\t}\n");
            }
            if let Some(max) = max {
                output.push_str(&format!("\tif value > {max} {{\n"));
                output.push_str(&format!(
                    "\t\treturn {zero}, fmt.Errorf(\"{go_name} value %v is above maximum {max}\", value)\n"
                ));
                output.push_str("\t}\n");
            }
        }
        output.push_str(&format!("\treturn {go_name}(value), nil\n"));
        output.push_str("}\n\n");

        output
    }
}

const fn is_numeric(base: PrimitiveType) -> bool {
    base.is_integer() || matches!(base, PrimitiveType::Float32 | PrimitiveType::Float64)
}

/// Returns the zero literal used on a constraint failure return.
const fn zero_literal(base: PrimitiveType) -> &'static str {
    match base {
        PrimitiveType::Bool => "false",
        PrimitiveType::String => "\"\"",
        PrimitiveType::Bytes => "nil",
        _ => "0",
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
    fn test_generate_alias() {
        let graph = graph_of(r#"<schema namespace="a"><alias name="Id" type="string"/></schema>"#);
        let output = TypeGenerator::new(&graph).generate(&graph.nodes()[0].def);
        assert!(output.contains("type Id = string\n"));
    }

    #[test]
    fn test_generate_scalar_with_range() {
        let graph = graph_of(
            r#"<schema namespace="net"><scalar name="Port" base="uint16" min="1" max="65535"/></schema>"#,
        );
        let output = TypeGenerator::new(&graph).generate(&graph.nodes()[0].def);

        assert!(output.contains("type Port uint16\n"));
        assert!(output.contains("func NewPort(value uint16) (Port, error) {"));
        assert!(output.contains("\tif value < 1 {\n"));
        assert!(output.contains("\tif value > 65535 {\n"));
        assert!(output.contains("fmt.Errorf(\"Port value %v is below minimum 1\", value)"));
        assert!(output.contains("\treturn Port(value), nil\n"));
    }

    #[test]
    fn test_unconstrained_scalar_skips_checks() {
        let graph = graph_of(
            r#"<schema namespace="m"><scalar name="Tag" base="string"/></schema>"#,
        );
        let output = TypeGenerator::new(&graph).generate(&graph.nodes()[0].def);

        assert!(output.contains("type Tag string\n"));
        assert!(!output.contains("fmt.Errorf"));
        assert!(output.contains("\treturn Tag(value), nil\n"));
    }
}
