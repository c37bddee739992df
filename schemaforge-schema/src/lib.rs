//! # Schemaforge Schema
//!
//! Schema definition language parser, type resolver, and intermediate
//! representation.
//!
//! This crate provides:
//! - Parsing of `.sfs` schema documents into an in-memory data model
//! - Cross-document type reference resolution with batched diagnostics
//! - Cycle detection with explicit recursive-type opt-in
//! - The resolved type graph consumed by code emitters

pub mod error;
pub mod graph;
pub mod parser;
pub mod resolver;
pub mod types;

pub use error::{Diagnostic, DiagnosticKind, ParseError, ParseFailure, ResolveFailure};
pub use graph::{GraphDocument, GraphNode, ResolvedTypeGraph};
pub use parser::{parse_dir, parse_document};
pub use resolver::{ResolverOptions, Severity, SymbolTable, resolve};
pub use types::{
    EnumVariant, FieldSpec, PrimitiveType, SchemaDocument, TypeDefKind, TypeDefinition, TypeId,
    TypeReference, UnionVariant,
};
