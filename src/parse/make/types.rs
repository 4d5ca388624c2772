//! Serde shapes for Make scenario blueprints.
//!
//! Only the fields the parser reads are typed; everything else is kept in
//! `extra` so the node's raw payload survives a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::parse::source::Sourced;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub flow: Vec<Sourced<Module>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One module of a flow, e.g. `{"id": 3, "module": "google-sheets:watchRows"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub module: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A router branch: its own nested flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub flow: Vec<Sourced<Module>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `service:operation`, split from `Module::module`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef<'a> {
    pub service: &'a str,
    pub operation: &'a str,
}

/// A module narrowed at the parser boundary.
#[derive(Debug, Clone)]
pub enum FlowStep<'a> {
    Router {
        id: String,
        module: ModuleRef<'a>,
        routes: &'a [Route],
    },
    Module {
        id: String,
        module: ModuleRef<'a>,
    },
}

impl<'a> FlowStep<'a> {
    pub fn id(&self) -> &str {
        match self {
            FlowStep::Router { id, .. } | FlowStep::Module { id, .. } => id,
        }
    }

    pub fn module_ref(&self) -> &ModuleRef<'a> {
        match self {
            FlowStep::Router { module, .. } | FlowStep::Module { module, .. } => module,
        }
    }
}
