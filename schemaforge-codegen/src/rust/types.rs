//! Alias and constrained scalar code generation for the Rust target.

use crate::rust::type_expr;
use convert_case::{Case, Casing};
use schemaforge_schema::{PrimitiveType, ResolvedTypeGraph, TypeDefKind, TypeDefinition};

/// Generator for alias and constrained scalar definitions.
pub struct TypeGenerator<'a> {
    graph: &'a ResolvedTypeGraph,
    doc_index: usize,
}

impl<'a> TypeGenerator<'a> {
    /// Creates a new type generator.
    #[must_use]
    pub fn new(graph: &'a ResolvedTypeGraph, doc_index: usize) -> Self {
        Self { graph, doc_index }
    }

    /// Generates the definition for an alias or scalar.
    #[must_use]
    pub fn generate(&self, def: &TypeDefinition) -> String {
        match &def.kind {
            TypeDefKind::Alias { target } => {
                let rust_name = def.name.to_case(Case::Pascal);
                let target_type = type_expr(self.graph, self.doc_index, target, false);
                format!(
                    "/// Generated from schema alias `{}`.\npub type {rust_name} = {target_type};\n\n",
                    def.name
                )
            }
            TypeDefKind::Scalar { base, min, max } => {
                self.generate_scalar(def, *base, min.as_deref(), max.as_deref())
            }
            _ => String::new(),
        }
    }

    /// Generates a validated newtype wrapper for a constrained scalar.
    fn generate_scalar(
        &self,
        def: &TypeDefinition,
        base: PrimitiveType,
        min: Option<&str>,
        max: Option<&str>,
    ) -> String {
        let mut output = String::new();
        let rust_name = def.name.to_case(Case::Pascal);
        let inner = base.rust_type();

        output.push_str(&format!(
            "/// Generated from schema scalar `{}` (constrained `{}`).\n",
            def.name,
            base.schema_name()
        ));
        output.push_str(&format!("{}\n", derives_for(base)));
        output.push_str(&format!("pub struct {rust_name}({inner});\n\n"));

        output.push_str(&format!("impl {rust_name} {{\n"));
        output.push_str("    /// Creates a new value, validating the schema constraints.\n");
        output.push_str(&format!(
            "    pub fn new(value: {inner}) -> Result<Self, String> {{\n"
        ));
        if is_numeric(base) {
            if let Some(min) = min {
                output.push_str(&format!(
                    "        if value < {min}{} {{\n",
                    literal_suffix(base)
                ));
                output.push_str(&format!(
                    "            return Err(format!(\"{rust_name} value {{value}} is below minimum {min}\"));\n"
                ));
                output.push_str("        }\n");
            }
            if let Some(max) = max {
                output.push_str(&format!(
                    "        if value > {max}{} {{\n",
                    literal_suffix(base)
                ));
                output.push_str(&format!(
                    "            return Err(format!(\"{rust_name} value {{value}} is above maximum {max}\"));\n"
                ));
                output.push_str("        }\n");
            }
        }
        output.push_str("        Ok(Self(value))\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Returns the inner value.\n");
        if is_copy(base) {
            output.push_str(&format!("    pub fn get(&self) -> {inner} {{\n"));
            output.push_str("        self.0\n");
        } else {
            output.push_str(&format!("    pub fn get(&self) -> &{inner} {{\n"));
            output.push_str("        &self.0\n");
        }
        output.push_str("    }\n");
        output.push_str("}\n\n");

        output
    }
}

/// Returns the derive attribute valid for a scalar over the given base.
///
/// Float bases cannot derive `Eq`/`Ord`/`Hash`; string and byte bases
/// cannot derive `Copy`.
const fn derives_for(base: PrimitiveType) -> &'static str {
    match base {
        PrimitiveType::Float32 | PrimitiveType::Float64 => {
            "#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]"
        }
        PrimitiveType::String | PrimitiveType::Bytes => {
            "#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]"
        }
        _ => "#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]",
    }
}

const fn is_numeric(base: PrimitiveType) -> bool {
    base.is_integer() || matches!(base, PrimitiveType::Float32 | PrimitiveType::Float64)
}

const fn is_copy(base: PrimitiveType) -> bool {
    !matches!(base, PrimitiveType::String | PrimitiveType::Bytes)
}

/// Returns the literal suffix for constraint comparisons.
const fn literal_suffix(base: PrimitiveType) -> &'static str {
    match base {
        PrimitiveType::Int32 => "_i32",
        PrimitiveType::Int64 => "_i64",
        PrimitiveType::Uint16 => "_u16",
        PrimitiveType::Uint32 => "_u32",
        PrimitiveType::Uint64 => "_u64",
        PrimitiveType::Float32 => "_f32",
        PrimitiveType::Float64 => "_f64",
        PrimitiveType::Bool | PrimitiveType::String | PrimitiveType::Bytes => "",
    }
}
