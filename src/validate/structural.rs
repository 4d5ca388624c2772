//! Graph-level structural rules (G001–G007).

use std::collections::{HashMap, HashSet};

use crate::graph::FlowGraph;
use crate::model::ParsedGraph;

use super::Diagnostic;

pub fn diagnose_structural(parsed: &ParsedGraph) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    let graph = FlowGraph::build(&parsed.nodes, &parsed.edges);

    g001_edges_reference_existing_nodes(&graph, &mut findings);
    g002_no_duplicate_node_ids(parsed, &mut findings);
    g003_no_duplicate_edges(parsed, &mut findings);
    g004_no_self_loops(parsed, &mut findings);
    g005_no_cycles(&graph, &mut findings);
    g006_has_trigger(parsed, &mut findings);
    g007_all_reachable_from_triggers(parsed, &graph, &mut findings);

    findings
}

fn g001_edges_reference_existing_nodes(graph: &FlowGraph, findings: &mut Vec<Diagnostic>) {
    for id in graph.dangling_ids() {
        findings.push(Diagnostic::new(
            "G001",
            format!("Edge references unknown node '{}'", id),
            Some(id.to_string()),
        ));
    }
}

fn g002_no_duplicate_node_ids(parsed: &ParsedGraph, findings: &mut Vec<Diagnostic>) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for node in &parsed.nodes {
        *counts.entry(node.id.as_str()).or_default() += 1;
    }
    let mut reported = HashSet::new();
    for node in &parsed.nodes {
        let count = counts[node.id.as_str()];
        if count > 1 && reported.insert(node.id.as_str()) {
            findings.push(Diagnostic::new(
                "G002",
                format!(
                    "Node id '{}' is used by {} nodes; edges cannot tell them apart",
                    node.id, count
                ),
                Some(node.id.clone()),
            ));
        }
    }
}

fn g003_no_duplicate_edges(parsed: &ParsedGraph, findings: &mut Vec<Diagnostic>) {
    let mut seen = HashSet::new();
    for edge in &parsed.edges {
        if !seen.insert((edge.from_node_id.as_str(), edge.to_node_id.as_str())) {
            findings.push(Diagnostic::new(
                "G003",
                format!(
                    "Duplicate edge from '{}' to '{}'",
                    edge.from_node_id, edge.to_node_id
                ),
                None,
            ));
        }
    }
}

fn g004_no_self_loops(parsed: &ParsedGraph, findings: &mut Vec<Diagnostic>) {
    for edge in &parsed.edges {
        if edge.from_node_id == edge.to_node_id {
            findings.push(Diagnostic::new(
                "G004",
                format!("Self-loop detected on node '{}'", edge.from_node_id),
                Some(edge.from_node_id.clone()),
            ));
        }
    }
}

fn g005_no_cycles(graph: &FlowGraph, findings: &mut Vec<Diagnostic>) {
    if graph.is_cyclic() {
        findings.push(Diagnostic::new("G005", "Workflow graph contains a cycle", None));
    }
}

fn g006_has_trigger(parsed: &ParsedGraph, findings: &mut Vec<Diagnostic>) {
    if !parsed.nodes.is_empty() && parsed.triggers().next().is_none() {
        findings.push(Diagnostic::new(
            "G006",
            "Workflow has nodes but no trigger node",
            None,
        ));
    }
}

fn g007_all_reachable_from_triggers(
    parsed: &ParsedGraph,
    graph: &FlowGraph,
    findings: &mut Vec<Diagnostic>,
) {
    let triggers: Vec<&str> = parsed.triggers().map(|n| n.id.as_str()).collect();
    if triggers.is_empty() {
        // Already reported by G006.
        return;
    }
    let reachable = graph.reachable_from(triggers);

    let mut reported = HashSet::new();
    for node in &parsed.nodes {
        if !reachable.contains(node.id.as_str()) && reported.insert(node.id.as_str()) {
            findings.push(Diagnostic::new(
                "G007",
                format!("Node '{}' is not reachable from any trigger", node.id),
                Some(node.id.clone()),
            ));
        }
    }
}
