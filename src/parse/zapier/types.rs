//! Serde shapes for the Zapier API v2 zap listing (`GET /v2/zaps`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::parse::source::Sourced;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZapListing {
    /// `None` when the response carries no `data` key at all.
    #[serde(default)]
    pub data: Option<Vec<Zap>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zap {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub is_enabled: Option<bool>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub steps: Vec<Sourced<ZapStep>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZapStep {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub action: Option<ZapAction>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZapAction {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub app: Option<ZapApp>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZapApp {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A step narrowed at the parser boundary.
#[derive(Debug, Clone)]
pub struct StepRef<'a> {
    pub id: String,
    pub index: usize,
    pub title: Option<&'a str>,
    pub action: &'a ZapAction,
}

impl<'a> StepRef<'a> {
    pub fn app_title(&self) -> Option<&'a str> {
        self.action.app.as_ref().and_then(|a| a.title.as_deref())
    }
}
