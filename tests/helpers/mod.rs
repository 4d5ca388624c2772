use flowtrace::model::*;

// =============================================================================
// Graph builders
// =============================================================================

/// A plain app node labelled by its id: `null | {id} (test - app)`.
pub fn node(id: &str) -> ParsedNode {
    ParsedNode {
        id: id.into(),
        is_trigger: false,
        action: None,
        operation_name: id.into(),
        service: "test".into(),
        kind: NodeKind::App,
        raw_payload: serde_json::Value::Null,
    }
}

/// A trigger node that reads.
pub fn trigger(id: &str) -> ParsedNode {
    ParsedNode {
        is_trigger: true,
        action: Some(NodeAction::Read),
        ..node(id)
    }
}

pub fn edge(from: &str, to: &str) -> Edge {
    Edge::new(from, to)
}

/// Edges from `(from, to)` pairs.
pub fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs.iter().map(|(from, to)| edge(from, to)).collect()
}

pub fn graph(nodes: Vec<ParsedNode>, pairs: &[(&str, &str)]) -> ParsedGraph {
    ParsedGraph {
        nodes,
        edges: edges(pairs),
    }
}

// =============================================================================
// Assertions
// =============================================================================

pub fn edge_pairs(graph: &ParsedGraph) -> Vec<(&str, &str)> {
    graph
        .edges
        .iter()
        .map(|e| (e.from_node_id.as_str(), e.to_node_id.as_str()))
        .collect()
}

pub fn node_ids(graph: &ParsedGraph) -> Vec<&str> {
    graph.nodes.iter().map(|n| n.id.as_str()).collect()
}

pub fn expect_node<'a>(graph: &'a ParsedGraph, id: &str) -> &'a ParsedNode {
    graph
        .node(id)
        .unwrap_or_else(|| panic!("node '{}' missing from {:?}", id, node_ids(graph)))
}
