//! Platform-agnostic graph model shared by every parser and the renderer.
//!
//! These types are the only contract between `parse` and `render`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NormalizeError;

// =============================================================================
// PLATFORM
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Make,
    N8n,
    Zapier,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Make => "make",
            Platform::N8n => "n8n",
            Platform::Zapier => "zapier",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "make" => Ok(Platform::Make),
            "n8n" => Ok(Platform::N8n),
            "zapier" => Ok(Platform::Zapier),
            _ => Err(NormalizeError::UnknownPlatform { name: s.to_string() }),
        }
    }
}

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Inferred CRUD intent of a node. `Option::None` means no rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeAction {
    Read,
    Write,
    Update,
    Delete,
}

impl NodeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeAction::Read => "read",
            NodeAction::Write => "write",
            NodeAction::Update => "update",
            NodeAction::Delete => "delete",
        }
    }
}

impl fmt::Display for NodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Built-in utility (data transforms, control flow helpers).
    Tool,
    /// Conditional branching construct.
    Router,
    /// Third-party service integration.
    App,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Tool => "tool",
            NodeKind::Router => "router",
            NodeKind::App => "app",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// NODES AND EDGES
// =============================================================================

/// One normalized workflow step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedNode {
    /// Unique within one parse call (except for duplicate n8n names).
    pub id: String,
    pub is_trigger: bool,
    pub action: Option<NodeAction>,
    pub operation_name: String,
    /// Lowercase application or built-in identifier.
    pub service: String,
    pub kind: NodeKind,
    /// Deep copy of the source node. Never interpreted by shared logic.
    pub raw_payload: serde_json::Value,
}

/// Directed control/data-flow relationship inside one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub from_node_id: String,
    pub to_node_id: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Edge {
            from_node_id: from.into(),
            to_node_id: to.into(),
        }
    }
}

/// Output of every platform parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedGraph {
    pub nodes: Vec<ParsedNode>,
    pub edges: Vec<Edge>,
}

impl ParsedGraph {
    pub fn node(&self, id: &str) -> Option<&ParsedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn triggers(&self) -> impl Iterator<Item = &ParsedNode> {
        self.nodes.iter().filter(|n| n.is_trigger)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

// =============================================================================
// RECORD SUMMARIES (linear-step platform only)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Active,
    Paused,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowStatus::Active => f.write_str("active"),
            WorkflowStatus::Paused => f.write_str("paused"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    pub id: String,
    pub title: String,
    pub platform: Platform,
    pub status: WorkflowStatus,
    pub updated_at: Option<String>,
    pub node_count: usize,
    /// Ids of this record's nodes, in step order.
    pub node_ids: Vec<String>,
}

/// A parse result together with where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedWorkflow {
    pub platform: Platform,
    pub name: Option<String>,
    #[serde(flatten)]
    pub graph: ParsedGraph,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summaries: Vec<WorkflowSummary>,
}
