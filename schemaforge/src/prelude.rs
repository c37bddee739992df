//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```ignore
//! use schemaforge::prelude::*;
//! ```

// Schema types
pub use schemaforge_schema::error::{Diagnostic, DiagnosticKind, ParseFailure, ResolveFailure};
pub use schemaforge_schema::graph::{GraphDocument, GraphNode, ResolvedTypeGraph};
pub use schemaforge_schema::parser::{parse_dir, parse_document};
pub use schemaforge_schema::resolver::{ResolverOptions, Severity, resolve};
pub use schemaforge_schema::types::{
    FieldSpec, PrimitiveType, SchemaDocument, TypeDefKind, TypeDefinition, TypeId, TypeReference,
};

// Codegen types
pub use schemaforge_codegen::{EmitError, Emitter, Target};
