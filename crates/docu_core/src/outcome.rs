//! Tool results as seen by the agent
//!
//! Backend misbehavior never becomes a protocol fault: it is folded into an
//! error object that is returned as the tool's regular payload.

use docu_common::DocuError;
use serde::{Deserialize, Serialize};

/// Error object returned in place of a tool's normal payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub error: String,

    /// HTTP status from the backend, when it answered with one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Underlying transport failure, when the backend never answered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ToolError {
    /// Plain message without context fields
    pub fn message(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: None,
            detail: None,
        }
    }

    /// Map an error raised while serving `operation` to its payload shape
    pub fn from_docu_error(operation: &str, err: &DocuError) -> Self {
        match err {
            DocuError::Status { status, .. } => Self {
                error: format!("{} failed", operation),
                status: Some(*status),
                detail: None,
            },
            DocuError::Decode { .. } | DocuError::DocumentNotFound { .. } => {
                Self::message(err.to_string())
            }
            other => Self {
                error: format!("{} failed", operation),
                status: None,
                detail: Some(other.to_string()),
            },
        }
    }
}

/// Either the tool's typed payload or an error object
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome<T> {
    Success(T),
    Failure(ToolError),
}

impl<T: Serialize> ToolOutcome<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutcome::Failure(_))
    }

    /// Render the payload as the JSON text handed to the agent
    ///
    /// Successful payloads are pretty-printed, error objects are compact.
    pub fn to_json_string(&self) -> String {
        let rendered = match self {
            ToolOutcome::Success(value) => serde_json::to_string_pretty(value),
            ToolOutcome::Failure(err) => serde_json::to_string(err),
        };

        rendered.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize tool payload");
            serde_json::json!({ "error": format!("Failed to serialize result: {}", e) })
                .to_string()
        })
    }
}

impl<T> From<ToolError> for ToolOutcome<T> {
    fn from(err: ToolError) -> Self {
        ToolOutcome::Failure(err)
    }
}
