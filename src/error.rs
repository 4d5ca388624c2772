//! Unified error type for the normalization layer.
//!
//! A document is normalized atomically: any of these aborts the whole parse.
//! Classifier misses are not errors; they surface as `action: None`.

use thiserror::Error;

use crate::model::Platform;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Input is not JSON, or does not fit the platform's document shape.
    #[error("[{platform}:P001] Failed to parse {platform} document: {message}")]
    InvalidDocument { platform: Platform, message: String },

    /// A node's identifying field is missing or lacks its expected separator.
    #[error("[{platform}:P002] Malformed node '{node_id}': {reason}")]
    MalformedNode {
        platform: Platform,
        node_id: String,
        reason: String,
    },

    #[error("[P003] Unknown platform '{name}' (expected make, n8n or zapier)")]
    UnknownPlatform { name: String },

    #[error("[P004] Could not detect the platform of the document")]
    UndetectedPlatform,
}

impl NormalizeError {
    pub fn invalid_document(platform: Platform, message: impl Into<String>) -> Self {
        NormalizeError::InvalidDocument {
            platform,
            message: message.into(),
        }
    }

    pub fn malformed(
        platform: Platform,
        node_id: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        NormalizeError::MalformedNode {
            platform,
            node_id: node_id.into(),
            reason: reason.into(),
        }
    }

    /// Stable error code, independent of the message wording.
    pub fn code(&self) -> &'static str {
        match self {
            NormalizeError::InvalidDocument { .. } => "P001",
            NormalizeError::MalformedNode { .. } => "P002",
            NormalizeError::UnknownPlatform { .. } => "P003",
            NormalizeError::UndetectedPlatform => "P004",
        }
    }

    pub fn platform(&self) -> Option<Platform> {
        match self {
            NormalizeError::InvalidDocument { platform, .. }
            | NormalizeError::MalformedNode { platform, .. } => Some(*platform),
            _ => None,
        }
    }

    /// The offending node, for `MalformedNode`.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            NormalizeError::MalformedNode { node_id, .. } => Some(node_id),
            _ => None,
        }
    }
}
