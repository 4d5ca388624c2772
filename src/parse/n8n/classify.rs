//! n8n classifier rules.

use crate::classify;
use crate::model::{NodeAction, NodeKind};

use super::types::{NodeRef, TypeRef};

/// Service names of annotation-only node types.
pub const ANNOTATION_SERVICES: &[&str] = &["stickyNote"];

const ROUTER_SERVICES: &[&str] = &["if", "switch"];

/// n8n core nodes treated as built-in tools. Matched exactly against the
/// service segment of the node type.
const BUILTIN_TOOLS: &[&str] = &[
    // Core triggers
    "webhook",
    "cron",
    "interval",
    "errorTrigger",
    "executeWorkflowTrigger",
    "manualTrigger",
    "scheduleTrigger",
    // AI & LangChain core
    "agent",
    "outputParserStructured",
    "chain",
    "tool",
    "memory",
    "outputParser",
    "vectorStore",
    "retriever",
    "textSplitter",
    // Core transformation
    "set",
    "code",
    "function",
    "functionItem",
    "merge",
    "compareDatasets",
    "dateTime",
    "noOp",
    "wait",
    "executeWorkflow",
    // Lists & arrays
    "splitInBatches",
    "aggregate",
    "limit",
    "sort",
    "filter",
    "removeDuplicates",
    "splitOut",
    "summarize",
    "itemLists",
    // Content & formats
    "markdown",
    "html",
    "xml",
    "crypto",
    "renameKeys",
    "convertToFile",
    "compression",
    "spreadsheetFile",
    // Generic network
    "httpRequest",
    "ftp",
    "ssh",
];

pub fn is_annotation(type_ref: &TypeRef<'_>) -> bool {
    ANNOTATION_SERVICES.contains(&type_ref.service)
}

/// Schema-level marker: `...Trigger` types and the webhook listener.
pub fn has_trigger_marker(type_ref: &TypeRef<'_>) -> bool {
    let service = type_ref.service.to_lowercase();
    service.ends_with("trigger") || service == "webhook"
}

/// The schema marker wins; without it, a node with no incoming edge starts a
/// flow. A marked node with incoming edges stays a trigger.
pub fn infer_trigger(node: &NodeRef<'_>, has_predecessor: bool) -> bool {
    has_trigger_marker(&node.type_ref) || !has_predecessor
}

/// Classifies `parameters.operation`, falling back to the node name.
pub fn infer_action(node: &NodeRef<'_>, is_trigger: bool) -> Option<NodeAction> {
    let operand = node.operation.unwrap_or(node.name);
    classify::infer_action(operand, is_trigger)
}

pub fn infer_kind(type_ref: &TypeRef<'_>) -> NodeKind {
    if ROUTER_SERVICES.contains(&type_ref.service) {
        NodeKind::Router
    } else if BUILTIN_TOOLS.contains(&type_ref.service) {
        NodeKind::Tool
    } else {
        NodeKind::App
    }
}

pub fn service(type_ref: &TypeRef<'_>) -> String {
    type_ref.service.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_ref(node_type: &str) -> TypeRef<'_> {
        TypeRef::split(node_type).expect("valid type")
    }

    #[test]
    fn trigger_markers() {
        assert!(has_trigger_marker(&type_ref("n8n-nodes-base.scheduleTrigger")));
        assert!(has_trigger_marker(&type_ref("n8n-nodes-base.webhook")));
        assert!(has_trigger_marker(&type_ref("n8n-nodes-base.googleSheetsTrigger")));
        assert!(!has_trigger_marker(&type_ref("n8n-nodes-base.gmail")));
    }

    #[test]
    fn kind_uses_exact_allow_list() {
        assert_eq!(infer_kind(&type_ref("n8n-nodes-base.if")), NodeKind::Router);
        assert_eq!(infer_kind(&type_ref("n8n-nodes-base.switch")), NodeKind::Router);
        assert_eq!(infer_kind(&type_ref("n8n-nodes-base.set")), NodeKind::Tool);
        assert_eq!(
            infer_kind(&type_ref("@n8n/n8n-nodes-langchain.agent")),
            NodeKind::Tool
        );
        // Case matters: the list is camelCase.
        assert_eq!(infer_kind(&type_ref("n8n-nodes-base.httprequest")), NodeKind::App);
        assert_eq!(infer_kind(&type_ref("n8n-nodes-base.gmail")), NodeKind::App);
    }

    #[test]
    fn action_prefers_operation_parameter() {
        let node = NodeRef {
            name: "Send a message",
            type_ref: type_ref("n8n-nodes-base.gmail"),
            operation: Some("getAll"),
        };
        assert_eq!(infer_action(&node, false), Some(NodeAction::Read));

        let unnamed_op = NodeRef { operation: None, ..node };
        assert_eq!(infer_action(&unnamed_op, false), Some(NodeAction::Write));
    }
}
