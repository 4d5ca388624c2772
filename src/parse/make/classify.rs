//! Make classifier rules.

use crate::classify;
use crate::model::{NodeAction, NodeKind};

use super::types::ModuleRef;

/// Operation name that marks a router module.
pub const ROUTER_OPERATION: &str = "BasicRouter";

/// Make's built-in apps. Kept separate from the n8n list on purpose: the
/// platforms name their built-ins differently.
const BUILTIN_TOOLS: &[&str] = &[
    "archive",
    "barcodes",
    "builtin",
    "csv",
    "currency",
    "datastore",
    "email",
    "encryptor",
    "flowcontrol",
    "ftp",
    "gps-tools",
    "http",
    "httpagent",
    "image",
    "iso",
    "json",
    "markdown",
    "math",
    "mime",
    "phonenumber",
    "placeholder",
    "regexp",
    "rss",
    "sapeccagent",
    "scenarios",
    "sftp",
    "soap",
    "ssh",
    "textparser",
    "tools",
    "units",
    "util",
    "weather",
    "gateway",
    "xlsx",
    "xml",
    "xmp",
];

pub fn infer_action(module: &ModuleRef<'_>, is_trigger: bool) -> Option<NodeAction> {
    let op = module.operation.to_lowercase();
    let trigger_like = is_trigger || op.contains("trigger") || op.contains("watch");
    classify::infer_action(&op, trigger_like)
}

pub fn infer_kind(module: &ModuleRef<'_>) -> NodeKind {
    if module.operation == ROUTER_OPERATION {
        NodeKind::Router
    } else if BUILTIN_TOOLS.contains(&module.service) {
        NodeKind::Tool
    } else {
        NodeKind::App
    }
}

/// Structural only: Make has no trigger marker in its schema.
pub fn infer_trigger(has_predecessor: bool) -> bool {
    !has_predecessor
}

pub fn service(module: &ModuleRef<'_>) -> String {
    module.service.to_lowercase()
}

pub fn operation_name(module: &ModuleRef<'_>) -> String {
    classify::humanize_operation(module.operation)
}
