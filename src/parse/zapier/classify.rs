//! Zapier classifier rules.
//!
//! Zapier exposes an explicit `action_type`, which is trusted when it is a
//! known value. Otherwise the shared cascade runs over the action key.

use crate::classify;
use crate::model::{NodeAction, NodeKind};

use super::types::StepRef;

const ROUTER_MARKERS: &[&str] = &["filter", "paths"];

/// Substrings of built-in Zapier app titles ("Formatter by Zapier", ...).
const BUILTIN_MARKERS: &[&str] = &[
    "sub-zap",
    "formatter",
    "delay",
    "schedule",
    "webhook",
    "email",
    "sms",
    "code",
    "digest",
    "looping",
];

fn map_action_type(action_type: &str) -> Option<NodeAction> {
    match action_type.to_lowercase().as_str() {
        "read" | "read_bulk" | "search" | "filter" => Some(NodeAction::Read),
        "write" | "search_or_write" | "search_and_write" => Some(NodeAction::Write),
        "update" => Some(NodeAction::Update),
        "delete" => Some(NodeAction::Delete),
        _ => None,
    }
}

/// First step of every zap.
pub fn infer_trigger(step: &StepRef<'_>) -> bool {
    step.index == 0
}

pub fn infer_action(step: &StepRef<'_>, is_trigger: bool) -> Option<NodeAction> {
    if let Some(action) = step.action.action_type.as_deref().and_then(map_action_type) {
        return Some(action);
    }
    let operand = step
        .action
        .key
        .as_deref()
        .or(step.action.title.as_deref())
        .unwrap_or("");
    classify::infer_action(operand, is_trigger)
}

pub fn infer_kind(step: &StepRef<'_>) -> NodeKind {
    let app = step.app_title().unwrap_or("").to_lowercase();
    if ROUTER_MARKERS.iter().any(|m| app.contains(m)) {
        NodeKind::Router
    } else if BUILTIN_MARKERS.iter().any(|m| app.contains(m)) {
        NodeKind::Tool
    } else {
        NodeKind::App
    }
}

pub fn service(step: &StepRef<'_>) -> String {
    match step.app_title().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_lowercase(),
        _ => "unknown".to_string(),
    }
}

pub fn operation_name(step: &StepRef<'_>) -> String {
    let explicit = step
        .title
        .or(step.action.title.as_deref())
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(title) = explicit {
        return title.to_string();
    }

    let synthesized = step
        .action
        .key
        .as_deref()
        .map(classify::humanize_operation)
        .unwrap_or_default();
    if synthesized.is_empty() {
        "Unknown Operation".to_string()
    } else {
        synthesized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::zapier::types::{ZapAction, ZapApp};

    fn action(key: Option<&str>, action_type: Option<&str>, app: Option<&str>) -> ZapAction {
        ZapAction {
            key: key.map(str::to_string),
            title: None,
            action_type: action_type.map(str::to_string),
            app: app.map(|t| ZapApp {
                title: Some(t.to_string()),
                extra: Default::default(),
            }),
            extra: Default::default(),
        }
    }

    fn step(action: &ZapAction, index: usize) -> StepRef<'_> {
        StepRef {
            id: format!("z_step_{}", index),
            index,
            title: None,
            action,
        }
    }

    #[test]
    fn action_type_is_trusted() {
        let a = action(Some("new_row"), Some("search_or_write"), Some("Google Sheets"));
        assert_eq!(infer_action(&step(&a, 1), false), Some(NodeAction::Write));
    }

    #[test]
    fn unknown_action_type_falls_back_to_key() {
        let a = action(Some("delete_row"), Some("mystery"), None);
        assert_eq!(infer_action(&step(&a, 1), false), Some(NodeAction::Delete));
        let t = action(Some("new_row"), None, None);
        assert_eq!(infer_action(&step(&t, 0), true), Some(NodeAction::Read));
    }

    #[test]
    fn kinds() {
        let filter = action(None, None, Some("Filter by Zapier"));
        let formatter = action(None, None, Some("Formatter by Zapier"));
        let slack = action(None, None, Some("Slack"));
        assert_eq!(infer_kind(&step(&filter, 1)), NodeKind::Router);
        assert_eq!(infer_kind(&step(&formatter, 1)), NodeKind::Tool);
        assert_eq!(infer_kind(&step(&slack, 1)), NodeKind::App);
    }

    #[test]
    fn operation_name_synthesized_from_key() {
        let a = action(Some("new_row_v2"), None, None);
        assert_eq!(operation_name(&step(&a, 0)), "New Row");
        let empty = action(None, None, None);
        assert_eq!(operation_name(&step(&empty, 0)), "Unknown Operation");
    }
}
