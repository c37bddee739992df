//! Code generation from resolved schema type graphs.
//!
//! This crate turns a [`ResolvedTypeGraph`](schemaforge_schema::ResolvedTypeGraph)
//! into target-language source files. Rendering is string based and
//! byte-deterministic: the same graph always produces the same bytes, so
//! generated output can be checked into version control and diffed.
//!
//! Two targets are supported:
//!
//! - **Rust**: one module per schema document plus a `mod.rs` index.
//!   Records become structs, enums become fieldless enums, unions become
//!   tagged enums, recursive references are boxed.
//! - **Go**: one file per schema document, all in a single package.
//!   Optional and recursive references become pointers. Unions are
//!   rejected as unsupported.

pub mod emitter;
pub mod error;
pub mod go;
pub mod rust;

pub use emitter::{Emitter, Target, module_name};
pub use error::EmitError;
