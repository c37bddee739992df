//! # Schemaforge
//!
//! Schema-driven code generator for Rust and Go.
//!
//! Schemaforge reads a directory of `.sfs` schema documents, resolves all
//! cross-document type references into a single type graph, and emits
//! deterministic target-language source files.
//!
//! ## Quick Start
//!
//! ```ignore
//! use schemaforge::prelude::*;
//!
//! let documents = parse_dir(Path::new("schemas"))?;
//! let graph = resolve(documents, &ResolverOptions::default())?;
//! Emitter::new(&graph, Target::Rust, "geo", "src/generated").emit()?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema parsing, type resolution, and the resolved graph
//! - [`codegen`] - Rust and Go code emission

pub mod prelude;

/// Schema parsing, type resolution, and the resolved type graph.
pub mod schema {
    pub use schemaforge_schema::*;
}

/// Code generation from resolved type graphs.
pub mod codegen {
    pub use schemaforge_codegen::*;
}
