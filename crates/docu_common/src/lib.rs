//! Common types and errors for Docuscribe
//!
//! This crate provides the error type and the backend catalog shape shared by
//! the adapter core and the MCP server.

pub mod telemetry;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Core error types for Docuscribe operations
#[derive(Error, Debug)]
pub enum DocuError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{operation} failed with status {status}")]
    Status { operation: String, status: u16 },

    #[error("Failed to decode JSON from {operation}")]
    Decode { operation: String },

    #[error("Document '{doc_uid}' not found")]
    DocumentNotFound { doc_uid: String },

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One page of the backend catalog
///
/// Entries are kept opaque. Only their `id` is ever read, so an entry with
/// unexpected fields does not affect the others.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogPage {
    #[serde(default)]
    pub documents: Vec<Value>,
}

impl CatalogPage {
    /// Whether a document with the given id is part of this page
    pub fn contains(&self, doc_uid: &str) -> bool {
        self.documents
            .iter()
            .any(|doc| doc.get("id").and_then(Value::as_str) == Some(doc_uid))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DocuError>;
