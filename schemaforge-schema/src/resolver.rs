//! Type reference resolution.
//!
//! The resolver builds a symbol table from every definition across every
//! document, replaces symbolic references with graph handles, and detects
//! reference cycles. The symbol table is an explicit value scoped to one
//! resolution run; nothing leaks between runs in the same process.
//!
//! Resolution follows a batch-error policy: every unresolved or ambiguous
//! reference in a run is collected and reported together, sorted by
//! document path then line.

use crate::error::{Diagnostic, DiagnosticKind, ResolveFailure};
use crate::graph::{GraphDocument, GraphNode, ResolvedTypeGraph};
use crate::types::{SchemaDocument, TypeId, TypeReference};
use std::collections::HashMap;
use tracing::warn;

/// How the resolver treats a policy-controlled condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Report a hard error.
    #[default]
    Deny,
    /// Log a warning and continue with first-candidate-wins behavior.
    Warn,
}

/// Policy options for one resolution run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolverOptions {
    /// Handling of duplicate fully-qualified names across documents.
    pub duplicate_types: Severity,
    /// Handling of unqualified references with multiple candidates.
    pub ambiguous_refs: Severity,
}

/// Symbol table for one resolution run.
///
/// Keys every definition by its fully-qualified `namespace.Name` and
/// indexes candidates by bare name for unqualified lookup.
#[derive(Debug, Default)]
pub struct SymbolTable {
    qualified: HashMap<String, TypeId>,
    by_name: HashMap<String, Vec<TypeId>>,
}

impl SymbolTable {
    /// Inserts a definition, keeping the first on conflict.
    ///
    /// Returns the existing holder when the fully-qualified name is already
    /// taken.
    fn insert(&mut self, namespace: &str, name: &str, id: TypeId) -> Option<TypeId> {
        use std::collections::hash_map::Entry;
        match self.qualified.entry(format!("{namespace}.{name}")) {
            Entry::Occupied(existing) => Some(*existing.get()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                self.by_name.entry(name.to_string()).or_default().push(id);
                None
            }
        }
    }

    /// Looks up a fully-qualified name.
    #[must_use]
    fn lookup_qualified(&self, namespace: &str, name: &str) -> Option<TypeId> {
        self.qualified.get(&format!("{namespace}.{name}")).copied()
    }

    /// Returns all candidates for a bare name, in definition order.
    #[must_use]
    fn candidates(&self, name: &str) -> &[TypeId] {
        self.by_name.get(name).map_or(&[], Vec::as_slice)
    }
}

/// Resolves all type references across the given documents.
///
/// Consumes the documents; on success they live on only as graph nodes.
///
/// # Errors
/// Returns [`ResolveFailure`] carrying every resolution diagnostic in the
/// run, sorted by document path then line. No graph is produced when any
/// error is reported.
pub fn resolve(
    documents: Vec<SchemaDocument>,
    options: &ResolverOptions,
) -> Result<ResolvedTypeGraph, ResolveFailure> {
    let mut graph_docs = Vec::with_capacity(documents.len());
    let mut nodes: Vec<GraphNode> = Vec::new();

    for (doc_index, doc) in documents.into_iter().enumerate() {
        let mut type_ids = Vec::with_capacity(doc.types.len());
        for def in doc.types {
            let id = TypeId(nodes.len());
            type_ids.push(id);
            let recursive = def.recursive;
            nodes.push(GraphNode {
                def,
                doc: doc_index,
                recursive,
            });
        }
        graph_docs.push(GraphDocument {
            path: doc.path,
            namespace: doc.namespace,
            types: type_ids,
        });
    }

    let mut diagnostics = Vec::new();
    let symbols = build_symbol_table(&graph_docs, &nodes, options, &mut diagnostics);
    resolve_references(&graph_docs, &mut nodes, &symbols, options, &mut diagnostics);

    if diagnostics.is_empty() {
        detect_cycles(&graph_docs, &mut nodes, &mut diagnostics);
    }

    if diagnostics.is_empty() {
        Ok(ResolvedTypeGraph::new(graph_docs, nodes))
    } else {
        diagnostics.sort();
        diagnostics.dedup();
        Err(ResolveFailure { diagnostics })
    }
}

/// Builds the symbol table, reporting duplicate fully-qualified names.
fn build_symbol_table(
    documents: &[GraphDocument],
    nodes: &[GraphNode],
    options: &ResolverOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> SymbolTable {
    let mut symbols = SymbolTable::default();

    for (index, node) in nodes.iter().enumerate() {
        let doc = &documents[node.doc];
        if let Some(previous) = symbols.insert(&doc.namespace, &node.def.name, TypeId(index)) {
            let message = format!(
                "duplicate definition of '{}.{}' (first defined in {})",
                doc.namespace,
                node.def.name,
                documents[nodes[previous.0].doc].path.display()
            );
            match options.duplicate_types {
                Severity::Deny => diagnostics.push(Diagnostic::new(
                    &doc.path,
                    node.def.line,
                    1,
                    DiagnosticKind::DuplicateType,
                    message,
                )),
                Severity::Warn => warn!(
                    path = %doc.path.display(),
                    line = node.def.line,
                    "{message}"
                ),
            }
        }
    }

    symbols
}

/// Replaces every `Named` reference with a `Resolved` handle.
fn resolve_references(
    documents: &[GraphDocument],
    nodes: &mut [GraphNode],
    symbols: &SymbolTable,
    options: &ResolverOptions,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let qualified_names: Vec<String> = nodes
        .iter()
        .map(|node| format!("{}.{}", documents[node.doc].namespace, node.def.name))
        .collect();

    for index in 0..nodes.len() {
        let own_namespace = documents[nodes[index].doc].namespace.clone();
        let path = documents[nodes[index].doc].path.clone();

        for reference in nodes[index].def.references_mut() {
            let TypeReference::Named {
                namespace,
                name,
                line,
            } = reference
            else {
                continue;
            };
            let line = *line;

            let resolved = match namespace {
                Some(ns) => match symbols.lookup_qualified(ns, name) {
                    Some(id) => Some(id),
                    None => {
                        diagnostics.push(Diagnostic::new(
                            &path,
                            line,
                            1,
                            DiagnosticKind::UnresolvedReference,
                            format!("unknown type '{ns}.{name}'"),
                        ));
                        None
                    }
                },
                None => {
                    // A definition in the referencing document's own
                    // namespace shadows same-named types elsewhere.
                    if let Some(id) = symbols.lookup_qualified(&own_namespace, name) {
                        Some(id)
                    } else {
                        match symbols.candidates(name) {
                            [] => {
                                diagnostics.push(Diagnostic::new(
                                    &path,
                                    line,
                                    1,
                                    DiagnosticKind::UnresolvedReference,
                                    format!("unknown type '{name}'"),
                                ));
                                None
                            }
                            [only] => Some(*only),
                            many => match options.ambiguous_refs {
                                Severity::Deny => {
                                    let candidates = many
                                        .iter()
                                        .map(|id| qualified_names[id.0].clone())
                                        .collect::<Vec<_>>()
                                        .join(", ");
                                    diagnostics.push(Diagnostic::new(
                                        &path,
                                        line,
                                        1,
                                        DiagnosticKind::AmbiguousReference,
                                        format!(
                                            "ambiguous reference to '{name}': candidates {candidates}"
                                        ),
                                    ));
                                    None
                                }
                                Severity::Warn => {
                                    warn!(
                                        path = %path.display(),
                                        line,
                                        "ambiguous reference to '{name}', using first candidate"
                                    );
                                    Some(many[0])
                                }
                            },
                        }
                    }
                }
            };

            if let Some(id) = resolved {
                *reference = TypeReference::Resolved(id);
            }
        }
    }
}

/// DFS color marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// Detects reference cycles over resolved edges.
///
/// A cycle containing at least one definition marked `recursive="true"` is
/// permitted; all of its members are flagged so the emitter applies an
/// indirection. Any other cycle is a `CycleError` naming its members.
fn detect_cycles(
    documents: &[GraphDocument],
    nodes: &mut [GraphNode],
    diagnostics: &mut Vec<Diagnostic>,
) {
    let edges: Vec<Vec<usize>> = nodes
        .iter()
        .map(|node| {
            node.def
                .references()
                .iter()
                .filter_map(|reference| match reference {
                    TypeReference::Resolved(id) => Some(id.0),
                    _ => None,
                })
                .collect()
        })
        .collect();

    let mut color = vec![Color::White; nodes.len()];

    for start in 0..nodes.len() {
        if color[start] != Color::White {
            continue;
        }
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        color[start] = Color::Gray;

        while let Some(frame) = stack.last_mut() {
            let (node, edge_index) = *frame;
            if edge_index < edges[node].len() {
                frame.1 += 1;
                let next = edges[node][edge_index];
                match color[next] {
                    Color::White => {
                        color[next] = Color::Gray;
                        stack.push((next, 0));
                    }
                    Color::Gray => {
                        // A gray node is always somewhere on the stack.
                        if let Some(pos) = stack.iter().position(|f| f.0 == next) {
                            let members: Vec<usize> =
                                stack[pos..].iter().map(|f| f.0).collect();
                            handle_cycle(documents, nodes, &members, diagnostics);
                        }
                    }
                    Color::Black => {}
                }
            } else {
                color[node] = Color::Black;
                stack.pop();
            }
        }
    }
}

/// Marks a permitted cycle recursive or reports it as an error.
fn handle_cycle(
    documents: &[GraphDocument],
    nodes: &mut [GraphNode],
    members: &[usize],
    diagnostics: &mut Vec<Diagnostic>,
) {
    let permitted = members.iter().any(|&m| nodes[m].def.recursive);
    if permitted {
        for &member in members {
            nodes[member].recursive = true;
        }
        return;
    }

    let mut names: Vec<String> = members
        .iter()
        .map(|&m| {
            let node = &nodes[m];
            format!("{}.{}", documents[node.doc].namespace, node.def.name)
        })
        .collect();
    names.push(names[0].clone());

    let first = &nodes[members[0]];
    diagnostics.push(Diagnostic::new(
        &documents[first.doc].path,
        first.def.line,
        1,
        DiagnosticKind::Cycle,
        format!("type reference cycle: {}", names.join(" -> ")),
    ));
}
