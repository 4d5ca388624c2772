//! n8n workflow parser (declarative connections).
//!
//! Nodes come from a flat list; edges come from a separately keyed
//! connection map `source name -> channel -> output slots -> targets`.
//! Every channel is flattened, not just `main`, because AI sub-nodes wire
//! through channels such as `ai_tool` or `ai_languageModel`.
//!
//! Node identity is the node's `name`. n8n guarantees names are unique
//! within a workflow; this parser does not enforce it. With duplicate names
//! both nodes share one id and every edge naming it is attributed to that
//! shared id.

pub mod classify;
pub mod types;

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::error::NormalizeError;
use crate::model::{Edge, ParsedGraph, ParsedNode, Platform};

pub use types::{Connections, GraphNode, N8nNode, N8nWorkflow, NodeRef, TypeRef};

/// Deserialize an n8n export JSON string and normalize it.
pub fn parse_str(json: &str) -> Result<ParsedGraph, NormalizeError> {
    let workflow = serde_json::from_str::<N8nWorkflow>(json)
        .map_err(|e| NormalizeError::invalid_document(Platform::N8n, e.to_string()))?;
    parse(&workflow)
}

/// Normalize a workflow. Fails on the first malformed node.
pub fn parse(workflow: &N8nWorkflow) -> Result<ParsedGraph, NormalizeError> {
    let edges = flatten_connections(&workflow.connections);
    let targets: HashSet<&str> = edges.iter().map(|e| e.to_node_id.as_str()).collect();

    let mut nodes = Vec::with_capacity(workflow.nodes.len());
    let mut seen_names = HashSet::new();

    for (idx, raw) in workflow.nodes.iter().enumerate() {
        let node_ref = match narrow(raw, idx)? {
            GraphNode::Annotation => continue,
            GraphNode::Step(node_ref) => node_ref,
        };

        if !seen_names.insert(node_ref.name) {
            warn!(
                name = node_ref.name,
                "duplicate n8n node name; edges will be attributed to the shared id"
            );
        }

        let is_trigger = classify::infer_trigger(&node_ref, targets.contains(node_ref.name));

        let node = ParsedNode {
            id: node_ref.name.to_string(),
            is_trigger,
            action: classify::infer_action(&node_ref, is_trigger),
            operation_name: node_ref.name.to_string(),
            service: classify::service(&node_ref.type_ref),
            kind: classify::infer_kind(&node_ref.type_ref),
            raw_payload: raw.raw.clone(),
        };
        trace!(id = %node.id, action = ?node.action, kind = %node.kind, "classified node");
        nodes.push(node);
    }

    debug!(
        platform = "n8n",
        name = workflow.name.as_deref().unwrap_or(""),
        nodes = nodes.len(),
        edges = edges.len(),
        "parsed workflow"
    );
    Ok(ParsedGraph { nodes, edges })
}

/// Narrow a raw node. The type is checked first so annotations are skipped
/// even when they carry no name.
pub fn narrow(node: &N8nNode, index: usize) -> Result<GraphNode<'_>, NormalizeError> {
    let locator = || {
        node.name
            .clone()
            .unwrap_or_else(|| format!("nodes[{}]", index))
    };

    let node_type = node.node_type.as_deref().ok_or_else(|| {
        NormalizeError::malformed(Platform::N8n, locator(), "missing 'type' identifier")
    })?;

    let type_ref = TypeRef::split(node_type).ok_or_else(|| {
        NormalizeError::malformed(
            Platform::N8n,
            locator(),
            format!("node type '{}' is not of the form 'package.service'", node_type),
        )
    })?;

    if classify::is_annotation(&type_ref) {
        return Ok(GraphNode::Annotation);
    }

    let name = node
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| NormalizeError::malformed(Platform::N8n, locator(), "node has no name"))?;

    let operation = node
        .parameters
        .operation
        .as_ref()
        .and_then(|op| op.as_str())
        .filter(|op| !op.is_empty());

    Ok(GraphNode::Step(NodeRef {
        name,
        type_ref,
        operation,
    }))
}

/// Flatten every channel and output slot into edges, in document order.
pub fn flatten_connections(connections: &Connections) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (source, channels) in connections {
        for (channel, slots) in channels {
            for targets in slots.iter().flatten() {
                for target in targets {
                    trace!(from = %source, to = %target.node, channel = %channel, "edge");
                    edges.push(Edge::new(source.as_str(), target.node.as_str()));
                }
            }
        }
    }
    edges
}
