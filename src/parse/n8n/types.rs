//! Serde shapes for n8n workflow exports.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::parse::source::Sourced;

/// Source node name -> channel name (`main`, `ai_tool`, ...) -> output
/// slots -> targets. Slots may be `null` for unconnected outputs.
pub type Connections = IndexMap<String, IndexMap<String, Vec<Option<Vec<ConnectionTarget>>>>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct N8nWorkflow {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub nodes: Vec<Sourced<N8nNode>>,
    #[serde(default)]
    pub connections: Connections,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct N8nNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub parameters: NodeParameters,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionTarget {
    pub node: String,
    #[serde(default, rename = "type")]
    pub channel: Option<String>,
    #[serde(default)]
    pub index: Option<u32>,
}

/// `package.service`, e.g. `n8n-nodes-base.googleSheets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRef<'a> {
    pub package: &'a str,
    pub service: &'a str,
}

impl<'a> TypeRef<'a> {
    pub fn split(node_type: &'a str) -> Option<Self> {
        match node_type.rsplit_once('.') {
            Some((package, service)) if !package.is_empty() && !service.is_empty() => {
                Some(TypeRef { package, service })
            }
            _ => None,
        }
    }
}

/// A node narrowed at the parser boundary.
#[derive(Debug, Clone)]
pub enum GraphNode<'a> {
    /// Canvas-only annotation such as a sticky note. Excluded from output.
    Annotation,
    Step(NodeRef<'a>),
}

#[derive(Debug, Clone)]
pub struct NodeRef<'a> {
    pub name: &'a str,
    pub type_ref: TypeRef<'a>,
    pub operation: Option<&'a str>,
}
