//! Integration tests for the n8n parser: connection flattening, trigger
//! markers, annotations and duplicate names.

mod helpers;

use flowtrace::model::{NodeAction, NodeKind, Platform};
use flowtrace::parse;
use flowtrace::parse::n8n;
use helpers::*;
use serde_json::json;

#[test]
fn parse_example_workflow() {
    let json = include_str!("fixtures/n8n_workflow.json");
    let graph = n8n::parse_str(json).expect("Should parse successfully");

    assert_eq!(
        node_ids(&graph),
        vec![
            "Schedule Trigger",
            "Retrieve Customer Messages Data",
            "Filter Status",
            "Send a message",
            "Set data",
            "Update Message Status",
            "AI Agent",
            "OpenAI Chat Model",
        ]
    );
    assert_eq!(graph.edges.len(), 8);
}

#[test]
fn sticky_notes_are_dropped() {
    let json = include_str!("fixtures/n8n_workflow.json");
    let graph = n8n::parse_str(json).expect("Should parse");
    assert!(graph.node("Sticky Note").is_none());
    assert!(graph.nodes.iter().all(|n| n.service != "stickynote"));
}

#[test]
fn every_output_slot_and_channel_becomes_an_edge() {
    let json = include_str!("fixtures/n8n_workflow.json");
    let graph = n8n::parse_str(json).expect("Should parse");

    assert_eq!(
        edge_pairs(&graph),
        vec![
            ("Schedule Trigger", "Retrieve Customer Messages Data"),
            ("Retrieve Customer Messages Data", "Filter Status"),
            ("Filter Status", "Send a message"),
            ("Filter Status", "AI Agent"),
            ("Filter Status", "Set data"),
            ("Send a message", "Update Message Status"),
            ("Set data", "Update Message Status"),
            ("OpenAI Chat Model", "AI Agent"),
        ]
    );
}

#[test]
fn connections_across_slots_in_order() {
    let json = json!({
        "nodes": [
            { "name": "N1", "type": "n8n-nodes-base.webhook" },
            { "name": "N2", "type": "n8n-nodes-base.slack" },
            { "name": "N3", "type": "n8n-nodes-base.gmail" }
        ],
        "connections": {
            "N1": { "main": [[{ "node": "N2", "type": "main", "index": 0 }], [{ "node": "N3", "type": "main", "index": 0 }]] }
        }
    })
    .to_string();
    let graph = n8n::parse_str(&json).expect("Should parse");
    assert_eq!(edge_pairs(&graph), vec![("N1", "N2"), ("N1", "N3")]);
}

#[test]
fn triggers_by_marker_or_missing_predecessor() {
    let json = include_str!("fixtures/n8n_workflow.json");
    let graph = n8n::parse_str(json).expect("Should parse");
    let triggers: Vec<&str> = graph.triggers().map(|n| n.id.as_str()).collect();
    assert_eq!(triggers, vec!["Schedule Trigger", "OpenAI Chat Model"]);

    // Structural trigger with no matching rule falls back to read.
    assert_eq!(
        expect_node(&graph, "OpenAI Chat Model").action,
        Some(NodeAction::Read)
    );
}

#[test]
fn marked_trigger_with_incoming_edge_stays_a_trigger() {
    let json = json!({
        "nodes": [
            { "name": "Start", "type": "n8n-nodes-base.manualTrigger" },
            { "name": "Loop", "type": "n8n-nodes-base.code" },
            { "name": "Hook", "type": "n8n-nodes-base.webhook" }
        ],
        "connections": {
            "Start": { "main": [[{ "node": "Loop", "type": "main", "index": 0 }]] },
            "Loop": { "main": [[{ "node": "Hook", "type": "main", "index": 0 }]] }
        }
    })
    .to_string();
    let graph = n8n::parse_str(&json).expect("Should parse");
    assert!(expect_node(&graph, "Start").is_trigger);
    assert!(!expect_node(&graph, "Loop").is_trigger);
    assert!(expect_node(&graph, "Hook").is_trigger);
}

#[test]
fn classifies_fixture_nodes() {
    let json = include_str!("fixtures/n8n_workflow.json");
    let graph = n8n::parse_str(json).expect("Should parse");

    let schedule = expect_node(&graph, "Schedule Trigger");
    assert_eq!(schedule.action, Some(NodeAction::Read));
    assert_eq!(schedule.service, "scheduletrigger");
    assert_eq!(schedule.kind, NodeKind::Tool);

    let sheets = expect_node(&graph, "Retrieve Customer Messages Data");
    assert_eq!(sheets.action, Some(NodeAction::Read));
    assert_eq!(sheets.service, "googlesheets");
    assert_eq!(sheets.kind, NodeKind::App);
    assert_eq!(sheets.operation_name, "Retrieve Customer Messages Data");

    let filter = expect_node(&graph, "Filter Status");
    assert_eq!(filter.kind, NodeKind::Router);
    // No operation parameter: the name is classified instead.
    assert_eq!(filter.action, Some(NodeAction::Read));

    assert_eq!(
        expect_node(&graph, "Send a message").action,
        Some(NodeAction::Write)
    );
    assert_eq!(expect_node(&graph, "Set data").action, Some(NodeAction::Update));
    assert_eq!(
        expect_node(&graph, "Update Message Status").action,
        Some(NodeAction::Update)
    );

    let agent = expect_node(&graph, "AI Agent");
    assert_eq!(agent.action, None);
    assert_eq!(agent.kind, NodeKind::Tool);
    assert_eq!(agent.service, "agent");
}

#[test]
fn operation_parameter_wins_over_name() {
    let json = json!({
        "nodes": [
            { "name": "Webhook", "type": "n8n-nodes-base.webhook" },
            { "name": "Create things", "type": "n8n-nodes-base.notion", "parameters": { "operation": "getAll" } }
        ],
        "connections": {
            "Webhook": { "main": [[{ "node": "Create things", "type": "main", "index": 0 }]] }
        }
    })
    .to_string();
    let graph = n8n::parse_str(&json).expect("Should parse");
    assert_eq!(
        expect_node(&graph, "Create things").action,
        Some(NodeAction::Read)
    );
}

#[test]
fn duplicate_names_share_one_id_deterministically() {
    let json = json!({
        "nodes": [
            { "name": "Webhook", "type": "n8n-nodes-base.webhook" },
            { "name": "Send", "type": "n8n-nodes-base.gmail", "parameters": { "operation": "send" } },
            { "name": "Send", "type": "n8n-nodes-base.slack", "parameters": { "operation": "post" } }
        ],
        "connections": {
            "Webhook": { "main": [[{ "node": "Send", "type": "main", "index": 0 }]] }
        }
    })
    .to_string();

    let first = n8n::parse_str(&json).expect("Should parse");
    let second = n8n::parse_str(&json).expect("Should parse again");
    assert_eq!(first, second);

    assert_eq!(node_ids(&first), vec!["Webhook", "Send", "Send"]);
    assert_eq!(edge_pairs(&first), vec![("Webhook", "Send")]);
    assert!(first.nodes[1..].iter().all(|n| !n.is_trigger));
    assert_eq!(first.nodes[1].service, "gmail");
    assert_eq!(first.nodes[2].service, "slack");
}

#[test]
fn edges_to_unknown_nodes_are_kept() {
    let json = json!({
        "nodes": [{ "name": "Webhook", "type": "n8n-nodes-base.webhook" }],
        "connections": {
            "Webhook": { "main": [[{ "node": "Ghost", "type": "main", "index": 0 }]] }
        }
    })
    .to_string();
    let graph = n8n::parse_str(&json).expect("Should parse");
    assert_eq!(edge_pairs(&graph), vec![("Webhook", "Ghost")]);
    assert_eq!(graph.nodes.len(), 1);
}

#[test]
fn raw_payload_is_the_source_node() {
    let json = include_str!("fixtures/n8n_workflow.json");
    let graph = n8n::parse_str(json).expect("Should parse");
    let sheets = expect_node(&graph, "Retrieve Customer Messages Data");
    assert_eq!(sheets.raw_payload["type"], "n8n-nodes-base.googleSheets");
    assert_eq!(sheets.raw_payload["parameters"]["documentId"]["value"], "1AbC");
    assert_eq!(sheets.raw_payload["typeVersion"], 4.5);
}

#[test]
fn node_without_type_is_malformed() {
    let json = json!({
        "nodes": [{ "name": "Mystery" }],
        "connections": {}
    })
    .to_string();
    let err = n8n::parse_str(&json).unwrap_err();
    assert_eq!(err.code(), "P002");
    assert_eq!(err.platform(), Some(Platform::N8n));
    assert_eq!(err.node_id(), Some("Mystery"));
}

#[test]
fn type_without_separator_is_malformed() {
    let json = json!({
        "nodes": [{ "name": "Flat", "type": "webhook" }],
        "connections": {}
    })
    .to_string();
    let err = n8n::parse_str(&json).unwrap_err();
    assert_eq!(err.code(), "P002");
    assert_eq!(err.node_id(), Some("Flat"));
}

#[test]
fn unnamed_node_is_located_by_index() {
    let json = json!({
        "nodes": [
            { "name": "Webhook", "type": "n8n-nodes-base.webhook" },
            { "type": "n8n-nodes-base.slack" }
        ],
        "connections": {}
    })
    .to_string();
    let err = n8n::parse_str(&json).unwrap_err();
    assert_eq!(err.node_id(), Some("nodes[1]"));
}

#[test]
fn unnamed_sticky_note_is_still_skipped() {
    let json = json!({
        "nodes": [
            { "type": "n8n-nodes-base.stickyNote", "parameters": { "content": "hi" } },
            { "name": "Webhook", "type": "n8n-nodes-base.webhook" }
        ],
        "connections": {}
    })
    .to_string();
    let graph = n8n::parse_str(&json).expect("Should parse");
    assert_eq!(node_ids(&graph), vec!["Webhook"]);
}

#[test]
fn parse_is_deterministic() {
    let json = include_str!("fixtures/n8n_workflow.json");
    let first = parse::parse(Platform::N8n, json).expect("Should parse");
    let second = parse::parse(Platform::N8n, json).expect("Should parse again");
    assert_eq!(first, second);
    assert_eq!(first.name.as_deref(), Some("Customer messaging"));
}

#[test]
fn raw_payload_is_an_exact_copy_of_sparse_nodes() {
    let hook = json!({ "name": "Hook", "type": "n8n-nodes-base.webhook" });
    let slack = json!({ "id": null, "name": "Post", "type": "n8n-nodes-base.slack", "parameters": {} });
    let json = json!({
        "nodes": [hook.clone(), slack.clone()],
        "connections": {
            "Hook": { "main": [[{ "node": "Post", "type": "main", "index": 0 }]] }
        }
    })
    .to_string();
    let graph = n8n::parse_str(&json).expect("Should parse");

    assert_eq!(expect_node(&graph, "Hook").raw_payload, hook);
    assert_eq!(expect_node(&graph, "Post").raw_payload, slack);
}
