//! WASM entry points for browser use.
//!
//! Results cross the boundary through the JSON-compatible serializer, so
//! every map (including flattened structs and raw payloads) arrives as a
//! plain JS object rather than a `Map`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::NormalizeError;
use crate::model::{ParsedWorkflow, Platform};
use crate::render::RenderOptions;
use crate::validate::Diagnostic;

/// Normalize a workflow JSON document.
/// `platform` is `make`, `n8n`, `zapier`, or `auto` to detect it.
/// Returns `{status: "success", workflow}` or `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn normalize_workflow(platform: &str, json: &str) -> JsValue {
    to_js(&normalize(platform, json))
}

/// Normalize and render as a text tree. Parse failures render as the
/// error message, so the host always gets printable text.
#[wasm_bindgen]
pub fn render_workflow(platform: &str, json: &str, mark_triggers: bool) -> String {
    match parse_inner(platform, json) {
        Ok(workflow) => {
            let options = RenderOptions {
                mark_triggers,
                ..RenderOptions::default()
            };
            crate::render::render_workflow(&workflow, &options)
        }
        Err(e) => e.to_string(),
    }
}

/// Normalize, then run the structural diagnostics.
/// Returns `{status: "diagnostics", diagnostics}` or `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn diagnose_workflow(platform: &str, json: &str) -> JsValue {
    to_js(&diagnose(platform, json))
}

/// The value behind `normalize_workflow`.
pub fn normalize(platform: &str, json: &str) -> NormalizeResult {
    match parse_inner(platform, json) {
        Ok(workflow) => NormalizeResult::Success { workflow },
        Err(e) => NormalizeResult::Errors {
            errors: vec![ErrorDto::from(e)],
        },
    }
}

/// The value behind `diagnose_workflow`.
pub fn diagnose(platform: &str, json: &str) -> DiagnoseResult {
    match parse_inner(platform, json) {
        Ok(workflow) => DiagnoseResult::Diagnostics {
            diagnostics: crate::validate::diagnose(&workflow.graph),
        },
        Err(e) => DiagnoseResult::Errors {
            errors: vec![ErrorDto::from(e)],
        },
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or(JsValue::NULL)
}

fn parse_inner(platform: &str, json: &str) -> Result<ParsedWorkflow, NormalizeError> {
    if platform.eq_ignore_ascii_case("auto") {
        crate::parse::parse_auto(json)
    } else {
        let platform: Platform = platform.parse()?;
        crate::parse::parse(platform, json)
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDto {
    pub code: String,
    pub platform: Option<String>,
    pub message: String,
    pub node_id: Option<String>,
}

impl From<NormalizeError> for ErrorDto {
    fn from(e: NormalizeError) -> Self {
        ErrorDto {
            code: e.code().to_string(),
            platform: e.platform().map(|p| p.to_string()),
            node_id: e.node_id().map(str::to_string),
            message: e.to_string(),
        }
    }
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status")]
pub enum NormalizeResult {
    #[serde(rename = "success")]
    Success { workflow: ParsedWorkflow },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(Debug, serde::Serialize)]
#[serde(tag = "status")]
pub enum DiagnoseResult {
    #[serde(rename = "diagnostics")]
    Diagnostics { diagnostics: Vec<Diagnostic> },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
