//! Schema definition language parser.
//!
//! This module parses `.sfs` schema XML documents into the in-memory data
//! model. Parsing is a pure function of the input files: the only side
//! effect of [`parse_dir`] is reading them.
//!
//! Errors are batched: every file in a directory is parsed even when an
//! earlier file fails, so one run reports all parse diagnostics together.

use crate::error::{Diagnostic, DiagnosticKind, ParseError, ParseFailure};
use crate::types::{
    EnumVariant, FieldSpec, PrimitiveType, SchemaDocument, TypeDefKind, TypeDefinition,
    TypeReference, UnionVariant,
};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of schema definition files.
pub const SCHEMA_EXTENSION: &str = "sfs";

/// Parses every schema file in a directory.
///
/// Files are processed in lexicographic path order, one [`SchemaDocument`]
/// per file. An empty directory yields an empty vector.
///
/// # Errors
/// Returns [`ParseFailure`] carrying every diagnostic from every file,
/// sorted by path then line.
pub fn parse_dir(dir: &Path) -> Result<Vec<SchemaDocument>, ParseFailure> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| ParseFailure {
        diagnostics: vec![Diagnostic::io(dir, &e)],
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| ParseFailure {
            diagnostics: vec![Diagnostic::io(dir, &e)],
        })?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    let mut diagnostics = Vec::new();

    for path in paths {
        match fs::read_to_string(&path) {
            Err(e) => diagnostics.push(Diagnostic::io(&path, &e)),
            Ok(source) => match parse_document(&path, &source) {
                Ok(doc) => documents.push(doc),
                Err(failure) => diagnostics.extend(failure.diagnostics),
            },
        }
    }

    if diagnostics.is_empty() {
        Ok(documents)
    } else {
        diagnostics.sort();
        Err(ParseFailure { diagnostics })
    }
}

/// Parses a single schema document from source text.
///
/// # Errors
/// Returns [`ParseFailure`] with positioned diagnostics if the document is
/// malformed or contains duplicate type names.
pub fn parse_document(path: &Path, source: &str) -> Result<SchemaDocument, ParseFailure> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut document: Option<SchemaDocument> = None;
    let mut diagnostics = Vec::new();
    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf);
        let (line, col) = line_col(source, reader.buffer_position() as usize);
        match event {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let is_empty = matches!(event, Ok(Event::Empty(_)));
                let name = match std::str::from_utf8(&name_bytes) {
                    Ok(name) => name,
                    Err(e) => {
                        diagnostics.push(syntax(path, line, col, &ParseError::Utf8(e)));
                        break;
                    }
                };
                let result = dispatch_element(
                    &mut reader,
                    source,
                    name,
                    e,
                    is_empty,
                    &mut document,
                    path,
                    &mut diagnostics,
                );
                if let Err(err) = result {
                    diagnostics.push(syntax(path, line, col, &err));
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                diagnostics.push(syntax(path, line, col, &ParseError::Xml(e)));
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    match document {
        Some(doc) if diagnostics.is_empty() => Ok(doc),
        Some(_) => {
            diagnostics.sort();
            Err(ParseFailure { diagnostics })
        }
        None => {
            if diagnostics.is_empty() {
                diagnostics.push(Diagnostic::new(
                    path,
                    1,
                    1,
                    DiagnosticKind::Syntax,
                    "no <schema> root element found",
                ));
            }
            diagnostics.sort();
            Err(ParseFailure { diagnostics })
        }
    }
}

/// Routes one top-level element to its parser.
#[allow(clippy::too_many_arguments)]
fn dispatch_element(
    reader: &mut Reader<&[u8]>,
    source: &str,
    name: &str,
    e: &BytesStart<'_>,
    is_empty: bool,
    document: &mut Option<SchemaDocument>,
    path: &Path,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ParseError> {
    match name {
        "schema" => {
            *document = Some(parse_schema_root(e, path)?);
            Ok(())
        }
        "record" | "enum" | "union" | "alias" | "scalar" => {
            let doc = document
                .as_mut()
                .ok_or_else(|| ParseError::invalid_structure("element outside <schema> root"))?;
            let def = match name {
                "record" => parse_record(reader, source, e, is_empty)?,
                "enum" => parse_enum(reader, source, e, is_empty)?,
                "union" => parse_union(reader, source, e, is_empty)?,
                "alias" => parse_alias(source, reader, e)?,
                _ => parse_scalar(source, reader, e)?,
            };
            if !is_empty && matches!(name, "alias" | "scalar") {
                skip_to_end(reader)?;
            }
            if doc.has_type(&def.name) {
                diagnostics.push(Diagnostic::new(
                    path,
                    def.line,
                    1,
                    DiagnosticKind::DuplicateType,
                    format!("duplicate type definition '{}'", def.name),
                ));
            } else {
                doc.add_type(def);
            }
            Ok(())
        }
        other => Err(ParseError::unknown_element(other, "schema")),
    }
}

/// Parses the `<schema>` root element attributes.
fn parse_schema_root(e: &BytesStart<'_>, path: &Path) -> Result<SchemaDocument, ParseError> {
    let mut namespace = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        if key == "namespace" {
            namespace = Some(value.to_string());
        }
    }

    let namespace = namespace.ok_or_else(|| ParseError::missing_attr("schema", "namespace"))?;
    Ok(SchemaDocument::new(path.to_path_buf(), namespace))
}

/// Parses a `<record>` definition.
fn parse_record(
    reader: &mut Reader<&[u8]>,
    source: &str,
    e: &BytesStart<'_>,
    is_empty: bool,
) -> Result<TypeDefinition, ParseError> {
    let line = current_line(source, reader);
    let (name, recursive) = parse_named_header(e, "record")?;
    let mut fields = Vec::new();

    if !is_empty {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let field_line = current_line(source, reader);
                    let name_bytes = e.name().as_ref().to_vec();
                    let tag = std::str::from_utf8(&name_bytes)?;
                    if tag != "field" {
                        return Err(ParseError::unknown_element(tag, "record"));
                    }
                    fields.push(parse_field(e, field_line)?);
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    let mut def = TypeDefinition::new(name, line, TypeDefKind::Record { fields });
    def.recursive = recursive;
    Ok(def)
}

/// Parses a `<field>` element within a record.
fn parse_field(e: &BytesStart<'_>, line: u32) -> Result<FieldSpec, ParseError> {
    let mut name = None;
    let mut declared_type = None;
    let mut optional = false;
    let mut default = None;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        match key {
            "name" => name = Some(value.to_string()),
            "type" => declared_type = Some(value.to_string()),
            "optional" => {
                optional = value
                    .parse()
                    .map_err(|_| ParseError::invalid_attr("field", "optional", value))?;
            }
            "default" => default = Some(value.to_string()),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr("field", "name"))?;
    let declared_type = declared_type.ok_or_else(|| ParseError::missing_attr("field", "type"))?;

    Ok(FieldSpec {
        name,
        type_ref: TypeReference::parse(&declared_type, line),
        optional,
        default,
        line,
    })
}

/// Parses an `<enum>` definition.
fn parse_enum(
    reader: &mut Reader<&[u8]>,
    source: &str,
    e: &BytesStart<'_>,
    is_empty: bool,
) -> Result<TypeDefinition, ParseError> {
    let line = current_line(source, reader);
    let (name, recursive) = parse_named_header(e, "enum")?;
    let mut variants = Vec::new();

    if !is_empty {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let variant_line = current_line(source, reader);
                    let name_bytes = e.name().as_ref().to_vec();
                    let tag = std::str::from_utf8(&name_bytes)?;
                    if tag != "variant" {
                        return Err(ParseError::unknown_element(tag, "enum"));
                    }
                    let variant_name = required_attr(e, "variant", "name")?;
                    variants.push(EnumVariant {
                        name: variant_name,
                        line: variant_line,
                    });
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    let mut def = TypeDefinition::new(name, line, TypeDefKind::Enum { variants });
    def.recursive = recursive;
    Ok(def)
}

/// Parses a `<union>` definition.
fn parse_union(
    reader: &mut Reader<&[u8]>,
    source: &str,
    e: &BytesStart<'_>,
    is_empty: bool,
) -> Result<TypeDefinition, ParseError> {
    let line = current_line(source, reader);
    let (name, recursive) = parse_named_header(e, "union")?;
    let mut variants = Vec::new();

    if !is_empty {
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    let variant_line = current_line(source, reader);
                    let name_bytes = e.name().as_ref().to_vec();
                    let tag = std::str::from_utf8(&name_bytes)?;
                    if tag != "variant" {
                        return Err(ParseError::unknown_element(tag, "union"));
                    }
                    let variant_name = required_attr(e, "variant", "name")?;
                    let declared_type = required_attr(e, "variant", "type")?;
                    variants.push(UnionVariant {
                        name: variant_name,
                        type_ref: TypeReference::parse(&declared_type, variant_line),
                        line: variant_line,
                    });
                }
                Ok(Event::End(_)) => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }
    }

    let mut def = TypeDefinition::new(name, line, TypeDefKind::Union { variants });
    def.recursive = recursive;
    Ok(def)
}

/// Parses an `<alias>` definition.
fn parse_alias(
    source: &str,
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<TypeDefinition, ParseError> {
    let line = current_line(source, reader);
    let (name, recursive) = parse_named_header(e, "alias")?;
    let declared_type = required_attr(e, "alias", "type")?;

    let mut def = TypeDefinition::new(
        name,
        line,
        TypeDefKind::Alias {
            target: TypeReference::parse(&declared_type, line),
        },
    );
    def.recursive = recursive;
    Ok(def)
}

/// Parses a `<scalar>` definition.
fn parse_scalar(
    source: &str,
    reader: &mut Reader<&[u8]>,
    e: &BytesStart<'_>,
) -> Result<TypeDefinition, ParseError> {
    let line = current_line(source, reader);
    let (name, recursive) = parse_named_header(e, "scalar")?;
    let base_name = required_attr(e, "scalar", "base")?;
    let base = PrimitiveType::from_schema_name(&base_name)
        .ok_or_else(|| ParseError::invalid_attr("scalar", "base", &base_name))?;

    let mut min = None;
    let mut max = None;
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        match key {
            "min" => min = Some(value.to_string()),
            "max" => max = Some(value.to_string()),
            _ => {}
        }
    }

    let mut def = TypeDefinition::new(name, line, TypeDefKind::Scalar { base, min, max });
    def.recursive = recursive;
    Ok(def)
}

/// Extracts the `name` and `recursive` attributes common to all definitions.
fn parse_named_header(e: &BytesStart<'_>, element: &str) -> Result<(String, bool), ParseError> {
    let mut name = None;
    let mut recursive = false;

    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        let value = std::str::from_utf8(&attr.value)?;
        match key {
            "name" => name = Some(value.to_string()),
            "recursive" => {
                recursive = value
                    .parse()
                    .map_err(|_| ParseError::invalid_attr(element, "recursive", value))?;
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ParseError::missing_attr(element, "name"))?;
    Ok((name, recursive))
}

/// Returns a required attribute value or a missing attribute error.
fn required_attr(e: &BytesStart<'_>, element: &str, attribute: &str) -> Result<String, ParseError> {
    for attr in e.attributes().flatten() {
        let key = std::str::from_utf8(attr.key.as_ref())?;
        if key == attribute {
            return Ok(std::str::from_utf8(&attr.value)?.to_string());
        }
    }
    Err(ParseError::missing_attr(element, attribute))
}

/// Skips to the end of the current element.
fn skip_to_end(reader: &mut Reader<&[u8]>) -> Result<(), ParseError> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Converts a byte offset into one-based (line, column).
fn line_col(source: &str, offset: usize) -> (u32, u32) {
    let offset = offset.min(source.len());
    let mut line = 1u32;
    let mut col = 1u32;
    for byte in &source.as_bytes()[..offset] {
        if *byte == b'\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Returns the line of the reader's current buffer position.
fn current_line(source: &str, reader: &Reader<&[u8]>) -> u32 {
    line_col(source, reader.buffer_position() as usize).0
}

/// Builds a syntax diagnostic from a low-level parse error.
fn syntax(path: &Path, line: u32, col: u32, err: &ParseError) -> Diagnostic {
    Diagnostic::new(path, line, col, DiagnosticKind::Syntax, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<schema namespace="geo">
    <record name="Point">
        <field name="x" type="int32"/>
        <field name="y" type="int32" optional="true" default="0"/>
    </record>
    <enum name="Color">
        <variant name="Red"/>
        <variant name="Green"/>
    </enum>
    <union name="Shape">
        <variant name="point" type="Point"/>
    </union>
    <alias name="Id" type="string"/>
    <scalar name="Port" base="uint16" min="1" max="65535"/>
</schema>"#;

    #[test]
    fn test_parse_simple_document() {
        let doc = parse_document(Path::new("geo.sfs"), SIMPLE_SCHEMA)
            .expect("Failed to parse document");

        assert_eq!(doc.namespace, "geo");
        assert_eq!(doc.types.len(), 5);
        assert!(doc.has_type("Point"));
        assert!(doc.has_type("Color"));
        assert!(doc.has_type("Shape"));
        assert!(doc.has_type("Id"));
        assert!(doc.has_type("Port"));
    }

    #[test]
    fn test_parse_record_fields() {
        let doc = parse_document(Path::new("geo.sfs"), SIMPLE_SCHEMA)
            .expect("Failed to parse document");

        let point = doc.get_type("Point").unwrap();
        let TypeDefKind::Record { fields } = &point.kind else {
            panic!("Point should be a record");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "x");
        assert!(!fields[0].optional);
        assert!(fields[1].optional);
        assert_eq!(fields[1].default.as_deref(), Some("0"));
    }

    #[test]
    fn test_parse_scalar_constraints() {
        let doc = parse_document(Path::new("geo.sfs"), SIMPLE_SCHEMA)
            .expect("Failed to parse document");

        let port = doc.get_type("Port").unwrap();
        let TypeDefKind::Scalar { base, min, max } = &port.kind else {
            panic!("Port should be a scalar");
        };
        assert_eq!(*base, PrimitiveType::Uint16);
        assert_eq!(min.as_deref(), Some("1"));
        assert_eq!(max.as_deref(), Some("65535"));
    }

    #[test]
    fn test_parse_recursive_marker() {
        let source = r#"<schema namespace="tree">
    <record name="Tree" recursive="true">
        <field name="left" type="Tree" optional="true"/>
    </record>
</schema>"#;
        let doc =
            parse_document(Path::new("tree.sfs"), source).expect("Failed to parse document");
        assert!(doc.get_type("Tree").unwrap().recursive);
    }

    #[test]
    fn test_duplicate_type_reported() {
        let source = r#"<schema namespace="a">
    <alias name="Id" type="string"/>
    <alias name="Id" type="int64"/>
</schema>"#;
        let failure = parse_document(Path::new("a.sfs"), source)
            .expect_err("duplicate should fail");

        assert_eq!(failure.diagnostics.len(), 1);
        let diag = &failure.diagnostics[0];
        assert_eq!(diag.kind, DiagnosticKind::DuplicateType);
        assert!(diag.message.contains("Id"));
    }

    #[test]
    fn test_unknown_element_is_syntax_error() {
        let source = r#"<schema namespace="a">
    <message name="Nope"/>
</schema>"#;
        let failure = parse_document(Path::new("a.sfs"), source)
            .expect_err("unknown element should fail");

        assert_eq!(failure.diagnostics[0].kind, DiagnosticKind::Syntax);
        assert!(failure.diagnostics[0].message.contains("message"));
    }

    #[test]
    fn test_missing_attribute_is_syntax_error() {
        let source = r#"<schema namespace="a">
    <alias name="Id"/>
</schema>"#;
        let failure = parse_document(Path::new("a.sfs"), source)
            .expect_err("missing attribute should fail");

        assert_eq!(failure.diagnostics[0].kind, DiagnosticKind::Syntax);
        assert!(failure.diagnostics[0].message.contains("type"));
    }

    #[test]
    fn test_missing_root_element() {
        let failure = parse_document(Path::new("a.sfs"), "")
            .expect_err("empty source should fail");
        assert_eq!(failure.diagnostics[0].kind, DiagnosticKind::Syntax);
    }

    #[test]
    fn test_parse_dir_empty() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let documents = parse_dir(dir.path()).expect("empty dir should parse");
        assert!(documents.is_empty());
    }

    #[test]
    fn test_parse_dir_lexicographic_order() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(
            dir.path().join("b.sfs"),
            r#"<schema namespace="b"><alias name="B" type="string"/></schema>"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("a.sfs"),
            r#"<schema namespace="a"><alias name="A" type="string"/></schema>"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let documents = parse_dir(dir.path()).expect("Failed to parse directory");
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].namespace, "a");
        assert_eq!(documents[1].namespace, "b");
    }

    #[test]
    fn test_parse_dir_batches_errors_across_files() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(
            dir.path().join("a.sfs"),
            r#"<schema namespace="a"><alias name="Id"/></schema>"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("b.sfs"),
            r#"<schema namespace="b"><bogus/></schema>"#,
        )
        .unwrap();

        let failure = parse_dir(dir.path()).expect_err("both files should fail");
        assert_eq!(failure.diagnostics.len(), 2);
        // Sorted by path: a.sfs before b.sfs.
        assert!(failure.diagnostics[0].path.ends_with("a.sfs"));
        assert!(failure.diagnostics[1].path.ends_with("b.sfs"));
    }
}
