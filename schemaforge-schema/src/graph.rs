//! Resolved type graph.
//!
//! The graph is the output of the resolution phase: an arena of type
//! definitions whose references have all been replaced with [`TypeId`]
//! handles, plus per-node recursion markers the emitter uses to choose an
//! indirection strategy. It is owned by the emitter for one generation run
//! and dropped afterwards.

use crate::types::{TypeDefinition, TypeId};
use std::path::PathBuf;

/// A schema document's entry in the resolved graph.
#[derive(Debug, Clone)]
pub struct GraphDocument {
    /// Source file path.
    pub path: PathBuf,
    /// Declared namespace.
    pub namespace: String,
    /// Types defined by this document, in source order.
    pub types: Vec<TypeId>,
}

/// A resolved type definition with its graph metadata.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// The definition; all references are `Resolved` after a successful
    /// resolution phase.
    pub def: TypeDefinition,
    /// Index of the owning document.
    pub doc: usize,
    /// True when this type participates in a permitted reference cycle
    /// (or was explicitly marked recursive in the schema).
    pub recursive: bool,
}

/// Directed graph of resolved type definitions.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTypeGraph {
    documents: Vec<GraphDocument>,
    nodes: Vec<GraphNode>,
}

impl ResolvedTypeGraph {
    /// Assembles a graph from resolved parts.
    #[must_use]
    pub(crate) fn new(documents: Vec<GraphDocument>, nodes: Vec<GraphNode>) -> Self {
        Self { documents, nodes }
    }

    /// Returns the node for a type handle.
    #[must_use]
    pub fn node(&self, id: TypeId) -> &GraphNode {
        &self.nodes[id.0]
    }

    /// Returns all nodes in arena order.
    #[must_use]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Returns the documents in lexicographic path order.
    #[must_use]
    pub fn documents(&self) -> &[GraphDocument] {
        &self.documents
    }

    /// Returns the document owning a node.
    #[must_use]
    pub fn document_of(&self, id: TypeId) -> &GraphDocument {
        &self.documents[self.nodes[id.0].doc]
    }

    /// Returns the fully-qualified `namespace.Name` of a type.
    #[must_use]
    pub fn qualified_name(&self, id: TypeId) -> String {
        let node = &self.nodes[id.0];
        format!("{}.{}", self.documents[node.doc].namespace, node.def.name)
    }

    /// Returns true if a type participates in a permitted cycle.
    #[must_use]
    pub fn is_recursive(&self, id: TypeId) -> bool {
        self.nodes[id.0].recursive
    }

    /// Number of types in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph contains no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
