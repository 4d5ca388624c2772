//! Zapier zap listing parser (linear steps).
//!
//! Each zap is an independent record with an ordered step list. Steps have
//! no native id, so ids are synthesized as `{zap_id}_step_{index}`. Edges
//! chain step `i` to step `i + 1`; the first step is the trigger. Every zap
//! also yields a `WorkflowSummary`.

pub mod classify;
pub mod types;

use tracing::{debug, trace};

use crate::error::NormalizeError;
use crate::model::{
    Edge, ParsedGraph, ParsedNode, Platform, WorkflowStatus, WorkflowSummary,
};
use crate::parse::source::id_string;

pub use types::{StepRef, Zap, ZapAction, ZapListing, ZapStep};

/// Nodes and edges of every zap, plus one summary per zap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZapierOutput {
    pub graph: ParsedGraph,
    pub summaries: Vec<WorkflowSummary>,
}

pub fn step_id(zap_id: &str, index: usize) -> String {
    format!("{}_step_{}", zap_id, index)
}

/// Deserialize a zap listing JSON string and normalize it.
pub fn parse_str(json: &str) -> Result<ZapierOutput, NormalizeError> {
    let listing = serde_json::from_str::<ZapListing>(json)
        .map_err(|e| NormalizeError::invalid_document(Platform::Zapier, e.to_string()))?;
    parse(&listing)
}

/// Normalize a listing. A listing without `data` yields an empty output.
pub fn parse(listing: &ZapListing) -> Result<ZapierOutput, NormalizeError> {
    let mut output = ZapierOutput::default();
    let Some(zaps) = &listing.data else {
        debug!(platform = "zapier", "listing has no data");
        return Ok(output);
    };

    for (zap_index, zap) in zaps.iter().enumerate() {
        let summary = parse_zap(zap, zap_index, &mut output.graph)?;
        output.summaries.push(summary);
    }

    debug!(
        platform = "zapier",
        zaps = output.summaries.len(),
        nodes = output.graph.nodes.len(),
        edges = output.graph.edges.len(),
        "parsed zap listing"
    );
    Ok(output)
}

fn parse_zap(
    zap: &Zap,
    zap_index: usize,
    graph: &mut ParsedGraph,
) -> Result<WorkflowSummary, NormalizeError> {
    let zap_id = zap.id.as_ref().and_then(id_string).ok_or_else(|| {
        NormalizeError::malformed(Platform::Zapier, format!("data[{}]", zap_index), "zap has no id")
    })?;

    // Narrow every step before emitting anything for this zap.
    let steps = zap
        .steps
        .iter()
        .enumerate()
        .map(|(index, step)| narrow(step, &zap_id, index))
        .collect::<Result<Vec<_>, _>>()?;

    let mut node_ids = Vec::with_capacity(steps.len());
    let mut prev: Option<String> = None;

    for (step_ref, raw) in steps.iter().zip(&zap.steps) {
        let is_trigger = classify::infer_trigger(step_ref);

        let node = ParsedNode {
            id: step_ref.id.clone(),
            is_trigger,
            action: classify::infer_action(step_ref, is_trigger),
            operation_name: classify::operation_name(step_ref),
            service: classify::service(step_ref),
            kind: classify::infer_kind(step_ref),
            raw_payload: raw.raw.clone(),
        };
        trace!(id = %node.id, action = ?node.action, kind = %node.kind, "classified step");
        graph.nodes.push(node);

        if let Some(prev) = prev.take() {
            graph.edges.push(Edge::new(prev, step_ref.id.as_str()));
        }
        prev = Some(step_ref.id.clone());
        node_ids.push(step_ref.id.clone());
    }

    Ok(WorkflowSummary {
        id: zap_id,
        title: zap.title.clone().unwrap_or_default(),
        platform: Platform::Zapier,
        status: if zap.is_enabled.unwrap_or(false) {
            WorkflowStatus::Active
        } else {
            WorkflowStatus::Paused
        },
        updated_at: zap.updated_at.clone(),
        node_count: node_ids.len(),
        node_ids,
    })
}

/// Narrow a raw step. The `action` object is the step's identifier.
pub fn narrow<'a>(
    step: &'a ZapStep,
    zap_id: &str,
    index: usize,
) -> Result<StepRef<'a>, NormalizeError> {
    let id = step_id(zap_id, index);
    let action = step.action.as_ref().ok_or_else(|| {
        NormalizeError::malformed(Platform::Zapier, &id, "step has no 'action' object")
    })?;

    Ok(StepRef {
        id,
        index,
        title: step.title.as_deref(),
        action,
    })
}
