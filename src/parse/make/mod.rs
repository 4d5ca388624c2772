//! Make blueprint parser (recursive branching).
//!
//! A blueprint is a flow of modules. A `builtin:BasicRouter` module carries
//! routes, each a nested flow that may contain further routers. The router
//! is the predecessor of the first module of every route, and modules
//! inside a flow chain linearly.

pub mod classify;
pub mod types;

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::NormalizeError;
use crate::model::{Edge, ParsedGraph, ParsedNode, Platform};
use crate::parse::source::{Sourced, id_string};

pub use types::{Blueprint, FlowStep, Module, ModuleRef, Route};

/// Deserialize a blueprint JSON string and normalize it.
pub fn parse_str(json: &str) -> Result<ParsedGraph, NormalizeError> {
    let blueprint = serde_json::from_str::<Blueprint>(json)
        .map_err(|e| NormalizeError::invalid_document(Platform::Make, e.to_string()))?;
    parse(&blueprint)
}

/// Normalize a blueprint. Fails on the first malformed module.
pub fn parse(blueprint: &Blueprint) -> Result<ParsedGraph, NormalizeError> {
    let mut builder = FlowBuilder::default();
    builder.walk(&blueprint.flow, None, "flow")?;

    debug!(
        platform = "make",
        name = blueprint.name.as_deref().unwrap_or(""),
        nodes = builder.graph.nodes.len(),
        edges = builder.graph.edges.len(),
        "parsed blueprint"
    );
    Ok(builder.graph)
}

/// Narrow a raw module into a `FlowStep`. `path` locates the module when it
/// has no usable id.
pub fn narrow<'a>(module: &'a Module, path: &str) -> Result<FlowStep<'a>, NormalizeError> {
    let id = module
        .id
        .as_ref()
        .and_then(id_string)
        .ok_or_else(|| NormalizeError::malformed(Platform::Make, path, "module has no id"))?;

    let raw = module.module.as_deref().ok_or_else(|| {
        NormalizeError::malformed(Platform::Make, &id, "missing 'module' identifier")
    })?;

    let module_ref = match raw.split_once(':') {
        Some((service, operation)) if !service.is_empty() && !operation.is_empty() => ModuleRef {
            service,
            operation,
        },
        _ => {
            return Err(NormalizeError::malformed(
                Platform::Make,
                &id,
                format!("module identifier '{}' is not of the form 'service:operation'", raw),
            ));
        }
    };

    if module_ref.operation == classify::ROUTER_OPERATION {
        Ok(FlowStep::Router {
            id,
            module: module_ref,
            routes: &module.routes,
        })
    } else {
        Ok(FlowStep::Module {
            id,
            module: module_ref,
        })
    }
}

#[derive(Default)]
struct FlowBuilder {
    graph: ParsedGraph,
}

impl FlowBuilder {
    /// Walk one flow. `entry` is the router that owns this flow, if any.
    fn walk(
        &mut self,
        flow: &[Sourced<Module>],
        entry: Option<&str>,
        path: &str,
    ) -> Result<(), NormalizeError> {
        let mut prev = entry.map(str::to_string);

        for (idx, module) in flow.iter().enumerate() {
            let step_path = format!("{}[{}]", path, idx);
            let step = narrow(module, &step_path)?;
            self.push(&step, &module.raw, prev.as_deref());

            if let FlowStep::Router { id, routes, .. } = &step {
                for (r, route) in routes.iter().enumerate() {
                    let route_path = format!("{}.routes[{}].flow", step_path, r);
                    self.walk(&route.flow, Some(id.as_str()), &route_path)?;
                }
            }

            prev = Some(step.id().to_string());
        }
        Ok(())
    }

    fn push(&mut self, step: &FlowStep<'_>, raw: &Value, prev: Option<&str>) {
        let module_ref = step.module_ref();
        let is_trigger = classify::infer_trigger(prev.is_some());

        let node = ParsedNode {
            id: step.id().to_string(),
            is_trigger,
            action: classify::infer_action(module_ref, is_trigger),
            operation_name: classify::operation_name(module_ref),
            service: classify::service(module_ref),
            kind: classify::infer_kind(module_ref),
            raw_payload: raw.clone(),
        };
        trace!(id = %node.id, action = ?node.action, kind = %node.kind, "classified module");
        self.graph.nodes.push(node);

        if let Some(prev) = prev {
            self.graph.edges.push(Edge::new(prev, step.id()));
        }
    }
}
