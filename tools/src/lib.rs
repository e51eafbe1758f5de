//! Introspection and debugging tools for gref save documents.
//!
//! This crate provides utilities for understanding persisted documents
//! without needing the registry that wrote them:
//!
//! - Node and identity statistics per document
//! - Duplicate-id and dangling-reference lints
//! - Normalized re-emission of document text
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not
//!   afterthoughts.
//! - **Registry-free** - Inspection works at the wire level, so broken or
//!   foreign documents can still be examined.
//! - **Human-readable output** - Make it easy to see what a save contains.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use serde::Serialize;
use wire::{
    emit_document_pretty, parse_document, Limits, NodeId, WireNode, WireResult,
};

/// Wire-level statistics and lints for one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    /// Size of the document text in bytes.
    pub document_bytes: usize,
    /// Total wire nodes of any kind.
    pub node_count: usize,
    /// Deepest nesting level (a bare primitive document is depth 1).
    pub max_depth: usize,
    pub primitive_count: usize,
    pub array_count: usize,
    pub plain_count: usize,
    pub instance_count: usize,
    pub ref_count: usize,
    /// Instance nodes per type name.
    pub instances_by_type: BTreeMap<String, usize>,
    /// Ids declared by more than one node. A valid document has none.
    pub duplicate_ids: Vec<NodeId>,
    /// Referenced ids no node declares. A valid document has none.
    pub dangling_refs: Vec<NodeId>,
}

impl DocumentReport {
    /// Returns `true` if the document would pass the codec's identity
    /// checks.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.duplicate_ids.is_empty() && self.dangling_refs.is_empty()
    }
}

#[derive(Default)]
struct WalkState {
    node_count: usize,
    max_depth: usize,
    primitive_count: usize,
    array_count: usize,
    plain_count: usize,
    instance_count: usize,
    ref_count: usize,
    instances_by_type: BTreeMap<String, usize>,
    declared: BTreeSet<NodeId>,
    duplicates: BTreeSet<NodeId>,
    referenced: BTreeSet<NodeId>,
}

/// Parses a document and gathers statistics and identity lints.
pub fn inspect_document(text: &str, limits: &Limits) -> WireResult<DocumentReport> {
    let node = parse_document(text, limits)?;
    let mut state = WalkState::default();
    walk(&node, 1, &mut state);

    let dangling_refs = state
        .referenced
        .difference(&state.declared)
        .copied()
        .collect();

    Ok(DocumentReport {
        document_bytes: text.len(),
        node_count: state.node_count,
        max_depth: state.max_depth,
        primitive_count: state.primitive_count,
        array_count: state.array_count,
        plain_count: state.plain_count,
        instance_count: state.instance_count,
        ref_count: state.ref_count,
        instances_by_type: state.instances_by_type,
        duplicate_ids: state.duplicates.into_iter().collect(),
        dangling_refs,
    })
}

/// Re-emits a document in normalized, indented form.
pub fn normalize_document(text: &str, limits: &Limits) -> anyhow::Result<String> {
    let node = parse_document(text, limits)?;
    Ok(emit_document_pretty(&node)?)
}

/// Renders a report for terminal output.
#[must_use]
pub fn format_report_pretty(report: &DocumentReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} bytes, {} nodes, max depth {}",
        report.document_bytes, report.node_count, report.max_depth
    );
    let _ = writeln!(
        out,
        "primitives: {}  arrays: {}  plain: {}  instances: {}  refs: {}",
        report.primitive_count,
        report.array_count,
        report.plain_count,
        report.instance_count,
        report.ref_count
    );
    if !report.instances_by_type.is_empty() {
        let _ = writeln!(out, "instances by type:");
        for (type_name, count) in &report.instances_by_type {
            let _ = writeln!(out, "  {type_name}: {count}");
        }
    }
    if !report.duplicate_ids.is_empty() {
        let _ = writeln!(out, "duplicate ids: {:?}", report.duplicate_ids);
    }
    if !report.dangling_refs.is_empty() {
        let _ = writeln!(out, "dangling refs: {:?}", report.dangling_refs);
    }
    out
}

fn walk(node: &WireNode, depth: usize, state: &mut WalkState) {
    state.node_count += 1;
    state.max_depth = state.max_depth.max(depth);

    match node {
        WireNode::Null
        | WireNode::Bool(_)
        | WireNode::Int(_)
        | WireNode::Float(_)
        | WireNode::String(_) => {
            state.primitive_count += 1;
        }
        WireNode::Array(items) => {
            state.array_count += 1;
            for item in items {
                walk(item, depth + 1, state);
            }
        }
        WireNode::Plain { id, entries } => {
            state.plain_count += 1;
            if let Some(id) = id {
                declare(*id, state);
            }
            for (_, entry) in entries {
                walk(entry, depth + 1, state);
            }
        }
        WireNode::Instance {
            id,
            type_name,
            fields,
        } => {
            state.instance_count += 1;
            *state
                .instances_by_type
                .entry(type_name.clone())
                .or_insert(0) += 1;
            declare(*id, state);
            for (_, field) in fields {
                walk(field, depth + 1, state);
            }
        }
        WireNode::Ref(id) => {
            state.ref_count += 1;
            state.referenced.insert(*id);
        }
    }
}

fn declare(id: NodeId, state: &mut WalkState) {
    if !state.declared.insert(id) {
        state.duplicates.insert(id);
    }
}
