pub mod classify;
pub mod error;
pub mod graph;
pub mod model;
pub mod parse;
pub mod render;
pub mod validate;
pub mod wasm;

pub use error::NormalizeError;
pub use model::{
    Edge, NodeAction, NodeKind, ParsedGraph, ParsedNode, ParsedWorkflow, Platform,
    WorkflowStatus, WorkflowSummary,
};
