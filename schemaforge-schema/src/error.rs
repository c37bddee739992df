//! Error types and diagnostics for schema parsing and resolution.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Kind tag for a reported diagnostic.
///
/// The `Display` form is the stable kind name used on stderr lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// Malformed schema source.
    Syntax,
    /// Two types in one document share a name, or two documents define the
    /// same fully-qualified name.
    DuplicateType,
    /// A symbolic type reference with no matching definition.
    UnresolvedReference,
    /// An unqualified reference with more than one candidate definition.
    AmbiguousReference,
    /// A reference cycle not marked as an allowed recursive type.
    Cycle,
    /// A construct the selected target language cannot express.
    UnsupportedConstruct,
    /// Filesystem failure while reading or writing.
    Io,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Syntax => "SyntaxError",
            Self::DuplicateType => "DuplicateTypeError",
            Self::UnresolvedReference => "UnresolvedReferenceError",
            Self::AmbiguousReference => "AmbiguousReferenceError",
            Self::Cycle => "CycleError",
            Self::UnsupportedConstruct => "UnsupportedConstructError",
            Self::Io => "IOError",
        };
        f.write_str(name)
    }
}

/// A single positioned diagnostic.
///
/// `Display` renders the line-oriented stderr format consumed by build
/// tools: `<file>:<line>:<col>: <ErrorKind>: <message>`.
///
/// The derived ordering sorts by document path, then line, then column,
/// which is the required reporting order for batched diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Diagnostic {
    /// Source file the diagnostic points at.
    pub path: PathBuf,
    /// One-based line number (0 when no position applies).
    pub line: u32,
    /// One-based column number (0 when no position applies).
    pub col: u32,
    /// Diagnostic kind.
    pub kind: DiagnosticKind,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Creates a diagnostic at the given position.
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        line: u32,
        col: u32,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            col,
            kind,
            message: message.into(),
        }
    }

    /// Creates an IO diagnostic with no source position.
    #[must_use]
    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        Self::new(path, 0, 0, DiagnosticKind::Io, err.to_string())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.path.display(),
            self.line,
            self.col,
            self.kind,
            self.message
        )
    }
}

/// Low-level error for a single parsing operation.
///
/// The parser converts these into positioned [`Diagnostic`] values before
/// reporting; callers of the phase-level entry points only ever see
/// [`ParseFailure`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// Unknown element encountered.
    #[error("unknown element '{element}' inside '{context}'")]
    UnknownElement {
        /// Element name.
        element: String,
        /// Parent context.
        context: String,
    },

    /// Invalid document structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            context: context.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

/// Batched failure of the parsing phase.
///
/// All diagnostics encountered across every schema file in one run are
/// collected here, sorted by path then line.
#[derive(Debug, Error)]
#[error("schema parsing failed with {} error(s)", diagnostics.len())]
pub struct ParseFailure {
    /// Sorted diagnostics for the whole phase.
    pub diagnostics: Vec<Diagnostic>,
}

/// Batched failure of the resolution phase.
#[derive(Debug, Error)]
#[error("type resolution failed with {} error(s)", diagnostics.len())]
pub struct ResolveFailure {
    /// Sorted diagnostics for the whole phase.
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display_format() {
        let diag = Diagnostic::new(
            "schemas/geo.sfs",
            12,
            5,
            DiagnosticKind::UnresolvedReference,
            "unknown type 'Vector'",
        );
        assert_eq!(
            diag.to_string(),
            "schemas/geo.sfs:12:5: UnresolvedReferenceError: unknown type 'Vector'"
        );
    }

    #[test]
    fn test_diagnostic_kind_names() {
        assert_eq!(DiagnosticKind::Syntax.to_string(), "SyntaxError");
        assert_eq!(
            DiagnosticKind::DuplicateType.to_string(),
            "DuplicateTypeError"
        );
        assert_eq!(DiagnosticKind::Cycle.to_string(), "CycleError");
        assert_eq!(
            DiagnosticKind::UnsupportedConstruct.to_string(),
            "UnsupportedConstructError"
        );
        assert_eq!(DiagnosticKind::Io.to_string(), "IOError");
    }

    #[test]
    fn test_diagnostic_ordering_by_path_then_line() {
        let mut diags = vec![
            Diagnostic::new("b.sfs", 1, 1, DiagnosticKind::Syntax, "later file"),
            Diagnostic::new("a.sfs", 9, 1, DiagnosticKind::Syntax, "later line"),
            Diagnostic::new("a.sfs", 2, 1, DiagnosticKind::Syntax, "earlier line"),
        ];
        diags.sort();

        assert_eq!(diags[0].message, "earlier line");
        assert_eq!(diags[1].message, "later line");
        assert_eq!(diags[2].message, "later file");
    }

    #[test]
    fn test_parse_failure_display() {
        let failure = ParseFailure {
            diagnostics: vec![
                Diagnostic::new("a.sfs", 1, 1, DiagnosticKind::Syntax, "bad"),
                Diagnostic::new("a.sfs", 2, 1, DiagnosticKind::DuplicateType, "dup"),
            ],
        };
        assert_eq!(failure.to_string(), "schema parsing failed with 2 error(s)");
    }
}
