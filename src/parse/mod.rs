//! Parse phase: platform JSON → normalized `ParsedGraph`.
//!
//! Each platform module owns its serde shapes, its classifier rules and its
//! edge-derivation strategy. They converge only on `crate::model`.

pub mod make;
pub mod n8n;
pub mod source;
pub mod zapier;

use serde_json::Value;

use crate::error::NormalizeError;
use crate::model::{ParsedWorkflow, Platform};

/// Deserialize a document of the given platform and normalize it.
pub fn parse(platform: Platform, json: &str) -> Result<ParsedWorkflow, NormalizeError> {
    let value = serde_json::from_str::<Value>(json)
        .map_err(|e| NormalizeError::invalid_document(platform, e.to_string()))?;
    parse_value(platform, value)
}

/// Normalize an already-decoded document.
pub fn parse_value(platform: Platform, value: Value) -> Result<ParsedWorkflow, NormalizeError> {
    let invalid = |e: serde_json::Error| NormalizeError::invalid_document(platform, e.to_string());

    match platform {
        Platform::Make => {
            let blueprint = serde_json::from_value::<make::Blueprint>(value).map_err(invalid)?;
            Ok(ParsedWorkflow {
                platform,
                name: blueprint.name.clone(),
                graph: make::parse(&blueprint)?,
                summaries: Vec::new(),
            })
        }
        Platform::N8n => {
            let workflow = serde_json::from_value::<n8n::N8nWorkflow>(value).map_err(invalid)?;
            Ok(ParsedWorkflow {
                platform,
                name: workflow.name.clone(),
                graph: n8n::parse(&workflow)?,
                summaries: Vec::new(),
            })
        }
        Platform::Zapier => {
            let listing = serde_json::from_value::<zapier::ZapListing>(value).map_err(invalid)?;
            let output = zapier::parse(&listing)?;
            Ok(ParsedWorkflow {
                platform,
                name: None,
                graph: output.graph,
                summaries: output.summaries,
            })
        }
    }
}

/// Guess the platform from the document's top-level shape.
pub fn detect_platform(value: &Value) -> Option<Platform> {
    let object = value.as_object()?;
    if object.get("flow").is_some_and(Value::is_array) {
        Some(Platform::Make)
    } else if object.get("nodes").is_some_and(Value::is_array)
        && object.get("connections").is_some_and(Value::is_object)
    {
        Some(Platform::N8n)
    } else if object.get("data").is_some_and(Value::is_array) {
        Some(Platform::Zapier)
    } else {
        None
    }
}

/// Detect the platform, then normalize.
pub fn parse_auto(json: &str) -> Result<ParsedWorkflow, NormalizeError> {
    let value = serde_json::from_str::<Value>(json)
        .map_err(|_| NormalizeError::UndetectedPlatform)?;
    let platform = detect_platform(&value).ok_or(NormalizeError::UndetectedPlatform)?;
    parse_value(platform, value)
}
