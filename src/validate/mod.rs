//! Structural diagnostics over a normalized graph.
//!
//! Parsers do not enforce graph well-formedness (dangling edges, duplicate
//! n8n names and cycles are all representable). This pass reports them
//! without failing, so callers can decide what to do.

pub mod structural;

use serde::{Deserialize, Serialize};

use crate::model::ParsedGraph;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    /// The node the finding is about, if any.
    pub node_id: Option<String>,
}

impl Diagnostic {
    pub fn new(code: &str, message: impl Into<String>, node_id: Option<String>) -> Self {
        Diagnostic {
            code: code.into(),
            message: message.into(),
            node_id,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "[{}] {} (node '{}')", self.code, self.message, id),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Run every structural rule. Returns all findings, in rule order.
pub fn diagnose(graph: &ParsedGraph) -> Vec<Diagnostic> {
    structural::diagnose_structural(graph)
}
