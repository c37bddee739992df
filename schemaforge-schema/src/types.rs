//! Schema data model.
//!
//! This module contains the data structures representing parsed schema
//! documents: type definitions, field specifications, and type references.
//! Documents are immutable once the parser hands them out.

use std::collections::HashMap;
use std::path::PathBuf;

/// One parsed schema file.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Path of the source file.
    pub path: PathBuf,
    /// Namespace declared on the root element.
    pub namespace: String,
    /// Type definitions in source order.
    pub types: Vec<TypeDefinition>,
    /// Type lookup map (built during parsing).
    type_map: HashMap<String, usize>,
}

impl SchemaDocument {
    /// Creates a new empty document.
    #[must_use]
    pub fn new(path: PathBuf, namespace: String) -> Self {
        Self {
            path,
            namespace,
            types: Vec::new(),
            type_map: HashMap::new(),
        }
    }

    /// Adds a type definition to the document.
    pub fn add_type(&mut self, def: TypeDefinition) {
        let index = self.types.len();
        self.type_map.insert(def.name.clone(), index);
        self.types.push(def);
    }

    /// Looks up a type by name.
    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.type_map.get(name).map(|&idx| &self.types[idx])
    }

    /// Returns true if a type with the given name exists.
    #[must_use]
    pub fn has_type(&self, name: &str) -> bool {
        self.type_map.contains_key(name)
    }
}

/// A named type definition.
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    /// Type name, unique within its document.
    pub name: String,
    /// One-based source line of the definition.
    pub line: u32,
    /// Whether the schema explicitly allows this type to be self-referential.
    pub recursive: bool,
    /// Kind-specific payload.
    pub kind: TypeDefKind,
}

impl TypeDefinition {
    /// Creates a new type definition.
    #[must_use]
    pub fn new(name: String, line: u32, kind: TypeDefKind) -> Self {
        Self {
            name,
            line,
            recursive: false,
            kind,
        }
    }

    /// Returns the kind name as used in schema source and diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            TypeDefKind::Record { .. } => "record",
            TypeDefKind::Enum { .. } => "enum",
            TypeDefKind::Union { .. } => "union",
            TypeDefKind::Alias { .. } => "alias",
            TypeDefKind::Scalar { .. } => "scalar",
        }
    }

    /// Returns all type references held by this definition, in source order.
    #[must_use]
    pub fn references(&self) -> Vec<&TypeReference> {
        match &self.kind {
            TypeDefKind::Record { fields } => fields.iter().map(|f| &f.type_ref).collect(),
            TypeDefKind::Union { variants } => variants.iter().map(|v| &v.type_ref).collect(),
            TypeDefKind::Alias { target } => vec![target],
            TypeDefKind::Enum { .. } | TypeDefKind::Scalar { .. } => Vec::new(),
        }
    }

    /// Returns mutable access to all type references held by this definition.
    pub fn references_mut(&mut self) -> Vec<&mut TypeReference> {
        match &mut self.kind {
            TypeDefKind::Record { fields } => fields.iter_mut().map(|f| &mut f.type_ref).collect(),
            TypeDefKind::Union { variants } => {
                variants.iter_mut().map(|v| &mut v.type_ref).collect()
            }
            TypeDefKind::Alias { target } => vec![target],
            TypeDefKind::Enum { .. } | TypeDefKind::Scalar { .. } => Vec::new(),
        }
    }
}

/// Kind-specific content of a type definition.
#[derive(Debug, Clone)]
pub enum TypeDefKind {
    /// Record with named fields.
    Record {
        /// Fields in source order.
        fields: Vec<FieldSpec>,
    },
    /// Enumeration of bare variants.
    Enum {
        /// Variants in source order.
        variants: Vec<EnumVariant>,
    },
    /// Discriminated union of typed variants.
    Union {
        /// Variants in source order.
        variants: Vec<UnionVariant>,
    },
    /// Alias for another type.
    Alias {
        /// Aliased type.
        target: TypeReference,
    },
    /// Constrained scalar over a primitive base.
    Scalar {
        /// Base primitive type.
        base: PrimitiveType,
        /// Inclusive minimum value literal.
        min: Option<String>,
        /// Inclusive maximum value literal.
        max: Option<String>,
    },
}

/// A field within a record.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Declared type.
    pub type_ref: TypeReference,
    /// Whether the field may be absent.
    pub optional: bool,
    /// Default value literal, if any.
    pub default: Option<String>,
    /// One-based source line of the field.
    pub line: u32,
}

/// A bare variant within an enum.
#[derive(Debug, Clone)]
pub struct EnumVariant {
    /// Variant name.
    pub name: String,
    /// One-based source line of the variant.
    pub line: u32,
}

/// A typed variant within a union.
#[derive(Debug, Clone)]
pub struct UnionVariant {
    /// Variant name.
    pub name: String,
    /// Payload type.
    pub type_ref: TypeReference,
    /// One-based source line of the variant.
    pub line: u32,
}

/// Handle to a resolved type definition in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub usize);

/// A reference to a type, possibly still unresolved.
///
/// After a successful resolution phase no `Named` variant remains anywhere
/// in the graph.
#[derive(Debug, Clone)]
pub enum TypeReference {
    /// Built-in primitive; never requires resolution.
    Primitive(PrimitiveType),
    /// Symbolic reference pending resolution.
    Named {
        /// Explicit namespace qualifier, if the reference was qualified.
        namespace: Option<String>,
        /// Bare type name.
        name: String,
        /// One-based source line of the reference.
        line: u32,
    },
    /// Resolved handle into the type graph.
    Resolved(TypeId),
}

impl TypeReference {
    /// Parses a declared type string into a reference.
    ///
    /// Primitive names map to `Primitive`; everything else becomes a
    /// `Named` reference, split on the last `.` into namespace and name.
    #[must_use]
    pub fn parse(declared: &str, line: u32) -> Self {
        if let Some(prim) = PrimitiveType::from_schema_name(declared) {
            return Self::Primitive(prim);
        }
        match declared.rsplit_once('.') {
            Some((namespace, name)) => Self::Named {
                namespace: Some(namespace.to_string()),
                name: name.to_string(),
                line,
            },
            None => Self::Named {
                namespace: None,
                name: declared.to_string(),
                line,
            },
        }
    }

    /// Returns the name as written in schema source, for diagnostics.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Primitive(prim) => prim.schema_name().to_string(),
            Self::Named {
                namespace: Some(ns),
                name,
                ..
            } => format!("{ns}.{name}"),
            Self::Named { name, .. } => name.clone(),
            Self::Resolved(id) => format!("#{}", id.0),
        }
    }

    /// Returns true if this reference is still unresolved.
    #[must_use]
    pub const fn is_named(&self) -> bool {
        matches!(self, Self::Named { .. })
    }
}

/// Built-in primitive types of the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Boolean.
    Bool,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Unsigned 64-bit integer.
    Uint64,
    /// 32-bit floating point.
    Float32,
    /// 64-bit floating point.
    Float64,
    /// UTF-8 string.
    String,
    /// Arbitrary byte sequence.
    Bytes,
}

impl PrimitiveType {
    /// Parses a primitive type from its schema-language name.
    #[must_use]
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "uint16" => Some(Self::Uint16),
            "uint32" => Some(Self::Uint32),
            "uint64" => Some(Self::Uint64),
            "float32" => Some(Self::Float32),
            "float64" => Some(Self::Float64),
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Returns the schema-language name.
    #[must_use]
    pub const fn schema_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Bytes => "bytes",
        }
    }

    /// Returns the Rust type for this primitive.
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "i32",
            Self::Int64 => "i64",
            Self::Uint16 => "u16",
            Self::Uint32 => "u32",
            Self::Uint64 => "u64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::String => "String",
            Self::Bytes => "Vec<u8>",
        }
    }

    /// Returns the Go type for this primitive.
    #[must_use]
    pub const fn go_type(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::String => "string",
            Self::Bytes => "[]byte",
        }
    }

    /// Returns true if this primitive is an integer type.
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::Int64 | Self::Uint16 | Self::Uint32 | Self::Uint64
        )
    }
}
