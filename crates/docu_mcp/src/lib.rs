//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC 2.0 over newline-delimited stdio, exposing the Docuscribe catalog
//! and content tools to AI agents.
//!
//! stdout is reserved for JSON-RPC responses; all logs go to stderr.

pub mod tools;
pub mod transport;

use docu_common::{DocuError, Result};
use docu_config::Config;
use docu_core::DocuAdapter;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Protocol version answered when the client does not ask for one
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC request
///
/// `id` is `None` only when the member is absent; `"id": null` is kept as
/// `Some(Value::Null)` so it is answered rather than treated as a notification.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    pub params: Option<Value>,
}

fn present_id<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC error object
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Convert DocuError to JSON-RPC error
    pub fn from_docu_error(err: &DocuError) -> Self {
        let code = match err {
            DocuError::MethodNotFound(_) => METHOD_NOT_FOUND,
            DocuError::ValidationError(_) => INVALID_PARAMS,
            _ => INTERNAL_ERROR,
        };

        let data = match err {
            DocuError::MethodNotFound(method) => Some(json!({ "method": method })),
            _ => None,
        };

        Self {
            code,
            message: err.to_string(),
            data,
        }
    }
}

/// Parse one inbound line, or produce the error response to send back
pub fn parse_request(line: &str) -> std::result::Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(line).map_err(|e| {
        JsonRpcResponse::failure(None, JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)))
    })?;

    let id = value.get("id").cloned();
    serde_json::from_value(value).map_err(|e| {
        JsonRpcResponse::failure(
            id,
            JsonRpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
        )
    })
}

/// The Docuscribe MCP server
#[derive(Debug, Clone)]
pub struct DocuServer {
    name: String,
    adapter: DocuAdapter,
}

impl DocuServer {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_adapter(
            config.server.name.clone(),
            DocuAdapter::from_config(&config.backend)?,
        ))
    }

    pub fn with_adapter(name: impl Into<String>, adapter: DocuAdapter) -> Self {
        Self {
            name: name.into(),
            adapter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle a single JSON-RPC request
    ///
    /// Notifications (requests without an id) never get a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::info!(target: "mcp", method = %request.method, "Handling MCP request");

        if request.id.is_none() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                request.id,
                JsonRpcError::new(
                    INVALID_REQUEST,
                    format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                ),
            ));
        }

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize(request.params.as_ref())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_list_tools()),
            "tools/call" => self.handle_call_tool(request.params).await,
            other => Err(DocuError::MethodNotFound(other.to_string())),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => {
                tracing::warn!(method = %request.method, error = %e, "Request failed");
                JsonRpcResponse::failure(request.id, JsonRpcError::from_docu_error(&e))
            }
        })
    }

    fn handle_initialize(&self, params: Option<&Value>) -> Value {
        let protocol_version = params
            .and_then(|p| p.get("protocolVersion"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": { "listChanged": false }
            },
            "serverInfo": {
                "name": self.name,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": "Call list_all_docs to discover document ids, then fetch_doc_content \
                             with a doc_uid: index mode first, then single or multi-range reads."
        })
    }

    fn handle_list_tools(&self) -> Value {
        json!({ "tools": tools::definitions() })
    }

    async fn handle_call_tool(&self, params: Option<Value>) -> Result<Value> {
        #[derive(Deserialize)]
        struct CallToolParams {
            name: String,
            #[serde(default)]
            arguments: Option<Value>,
        }

        let params: CallToolParams = params
            .ok_or_else(|| DocuError::ValidationError("Missing params".to_string()))
            .and_then(|v| {
                serde_json::from_value(v)
                    .map_err(|e| DocuError::ValidationError(format!("Invalid params: {}", e)))
            })?;

        let result = tools::call_tool(&self.adapter, &params.name, params.arguments).await?;
        serde_json::to_value(result).map_err(DocuError::JsonError)
    }
}
