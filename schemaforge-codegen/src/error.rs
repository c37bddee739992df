//! Error types for code emission.

use schemaforge_schema::{Diagnostic, DiagnosticKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for emission operations.
///
/// Unlike the parser and resolver, the emitter fails fast: the first error
/// aborts the run.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The selected target language cannot express a schema construct.
    #[error("unsupported construct for {target} target: {construct} '{type_name}'")]
    UnsupportedConstruct {
        /// Target language name.
        target: &'static str,
        /// Schema construct kind (e.g. "union").
        construct: &'static str,
        /// Offending type name.
        type_name: String,
        /// Schema file defining the type.
        path: PathBuf,
        /// Definition line.
        line: u32,
    },

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to move a temporary file over its final path.
    #[error("failed to persist output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl EmitError {
    /// Renders this error as a positioned diagnostic.
    ///
    /// IO failures have no schema position and point at `fallback_path`
    /// (typically the output directory).
    #[must_use]
    pub fn diagnostic(&self, fallback_path: &Path) -> Diagnostic {
        match self {
            Self::UnsupportedConstruct {
                target,
                construct,
                type_name,
                path,
                line,
            } => Diagnostic::new(
                path,
                *line,
                1,
                DiagnosticKind::UnsupportedConstruct,
                format!("{construct} '{type_name}' cannot be expressed in {target}"),
            ),
            Self::Io(err) => Diagnostic::new(
                fallback_path,
                0,
                0,
                DiagnosticKind::Io,
                err.to_string(),
            ),
            Self::Persist(err) => Diagnostic::new(
                fallback_path,
                0,
                0,
                DiagnosticKind::Io,
                err.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_construct_diagnostic() {
        let err = EmitError::UnsupportedConstruct {
            target: "go",
            construct: "union",
            type_name: "Shape".to_string(),
            path: "shapes.sfs".into(),
            line: 4,
        };
        let diag = err.diagnostic(Path::new("out"));
        assert_eq!(diag.kind, DiagnosticKind::UnsupportedConstruct);
        assert_eq!(diag.line, 4);
        assert_eq!(
            diag.to_string(),
            "shapes.sfs:4:1: UnsupportedConstructError: union 'Shape' cannot be expressed in go"
        );
    }

    #[test]
    fn test_io_diagnostic_uses_fallback_path() {
        let err = EmitError::Io(std::io::Error::other("disk full"));
        let diag = err.diagnostic(Path::new("out"));
        assert_eq!(diag.kind, DiagnosticKind::Io);
        assert_eq!(diag.path, PathBuf::from("out"));
    }
}
