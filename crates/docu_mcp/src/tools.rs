//! MCP tool definitions and `tools/call` dispatch
//!
//! Each tool returns its JSON payload as a single text content item.

use docu_common::{DocuError, Result};
use docu_core::{args, ContentRequest, DocuAdapter, FETCH_DOC_CONTENT, LIST_ALL_DOCS};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const LIST_ALL_DOCS_DESCRIPTION: &str = "\
Retrieve a pageable catalog of all available documentation libraries with their stable ids.

Parameters:
  limit (int, optional): max documents to return, 1..1000, default 100. Out-of-range values are clamped.
  offset (int, optional): pagination offset, >= 0, default 0.

Returns a JSON string mirroring the backend response plus the normalized request:
  {\"documents\": [{\"id\": \"uuid\", \"name\": \"Title\", \"hashtags\": [\"tag\"]}], \"_request\": {\"limit\": 100, \"offset\": 0}}

Usage:
  - Call this first to discover a document's `id`, then pass it as `doc_uid` to fetch_doc_content.
  - Ids are stable for the session; keep them instead of re-listing before every fetch.
  - Only page through the catalog when looking for libraries not seen yet.

Errors are returned as {\"error\": ..., \"status\": ...} objects.";

const FETCH_DOC_CONTENT_DESCRIPTION: &str = "\
Retrieve documentation content in one of three modes: index, single range, or multi-range.

Parameters:
  doc_uid (str): stable document id from list_all_docs.
  start (int, optional): starting word index for single range mode.
  max_length (int, optional): max words for single range mode, default 10000, capped at 50000.
  ranges (str, optional): comma-separated start-end pairs, e.g. \"0-100,200-300\", for multi-range mode.

Mode selection:
  - `ranges` given: multi-range mode (start/max_length are ignored).
  - else `start` or `max_length` given: single range mode, missing values take their defaults.
  - else: index mode, returning the document structure for navigation.

Returns a JSON string {\"document\": ..., \"meta\": ...}; `has_more` and `next_start` are copied to the top level when the backend reports them.

Workflow:
  - Start with index mode to map sections.
  - Read contiguous text with single range mode, continuing from `next_start` while `has_more` is true.
  - Use multi-range mode for known disjoint sections.
  - Stop once the needed information is found; avoid re-fetching spans already read.

Errors: unknown doc_uid gives {\"error\": \"Document '<doc_uid>' not found\"}; backend failures give {\"error\": ..., \"status\": ...}.";

/// Tool metadata as advertised by `tools/list`
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// All tools this server exposes
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: LIST_ALL_DOCS,
            description: LIST_ALL_DOCS_DESCRIPTION,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "description": "Max number of documents (1..1000)",
                        "default": 100
                    },
                    "offset": {
                        "type": "integer",
                        "description": "Pagination offset (>= 0)",
                        "default": 0
                    }
                }
            }),
        },
        ToolDefinition {
            name: FETCH_DOC_CONTENT,
            description: FETCH_DOC_CONTENT_DESCRIPTION,
            input_schema: json!({
                "type": "object",
                "properties": {
                    "doc_uid": {
                        "type": "string",
                        "description": "Stable document id from list_all_docs"
                    },
                    "start": {
                        "type": ["integer", "null"],
                        "description": "Starting word index (single range mode)"
                    },
                    "max_length": {
                        "type": ["integer", "null"],
                        "description": "Max words to return (single range mode, default 10000, max 50000)"
                    },
                    "ranges": {
                        "type": ["string", "null"],
                        "description": "Comma-separated start-end pairs (multi-range mode)"
                    }
                },
                "required": ["doc_uid"]
            }),
        },
    ]
}

/// One text content item
#[derive(Debug, Clone, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// Result body of `tools/call`
///
/// Backend failures are ordinary payloads here, so `isError` stays false.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCallResult {
    pub content: Vec<TextContent>,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolCallResult {
    fn text(text: String) -> Self {
        Self {
            content: vec![TextContent { kind: "text", text }],
            is_error: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListAllDocsArgs {
    #[serde(default = "default_limit", deserialize_with = "args::saturating_i64")]
    limit: i64,
    #[serde(default, deserialize_with = "args::saturating_i64")]
    offset: i64,
}

fn default_limit() -> i64 {
    docu_core::pagination::DEFAULT_LIMIT
}

fn parse_args<T: for<'de> Deserialize<'de>>(tool: &str, arguments: Option<Value>) -> Result<T> {
    let arguments = match arguments {
        None | Some(Value::Null) => json!({}),
        Some(value) => value,
    };
    serde_json::from_value(arguments)
        .map_err(|e| DocuError::ValidationError(format!("Invalid arguments for {}: {}", tool, e)))
}

/// Run the named tool against the backend
pub async fn call_tool(
    adapter: &DocuAdapter,
    name: &str,
    arguments: Option<Value>,
) -> Result<ToolCallResult> {
    let (text, failed) = match name {
        LIST_ALL_DOCS => {
            let args: ListAllDocsArgs = parse_args(name, arguments)?;
            let outcome = adapter.list_all_docs(args.limit, args.offset).await;
            (outcome.to_json_string(), outcome.is_error())
        }
        FETCH_DOC_CONTENT => {
            let request: ContentRequest = parse_args(name, arguments)?;
            let outcome = adapter.fetch_doc_content(&request).await;
            (outcome.to_json_string(), outcome.is_error())
        }
        other => {
            return Err(DocuError::ValidationError(format!("Unknown tool: {}", other)));
        }
    };

    if failed {
        tracing::info!(tool = name, "Tool returned an error payload");
    }

    Ok(ToolCallResult::text(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definitions_names() {
        let names: Vec<_> = definitions().iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["list_all_docs", "fetch_doc_content"]);
    }

    #[test]
    fn test_definition_serializes_input_schema() {
        let value = serde_json::to_value(&definitions()[1]).unwrap();
        assert_eq!(value["inputSchema"]["required"], json!(["doc_uid"]));
        assert!(value["description"].as_str().unwrap().contains("Mode selection"));
    }

    #[test]
    fn test_list_args_defaults() {
        let args: ListAllDocsArgs = parse_args(LIST_ALL_DOCS, None).unwrap();
        assert_eq!(args.limit, 100);
        assert_eq!(args.offset, 0);
    }

    #[test]
    fn test_list_args_saturate_huge_numbers() {
        let args: ListAllDocsArgs = parse_args(
            LIST_ALL_DOCS,
            Some(serde_json::from_str(r#"{"limit": 99999999999999999999, "offset": -1e20}"#).unwrap()),
        )
        .unwrap();
        assert_eq!(args.limit, i64::MAX);
        assert_eq!(args.offset, i64::MIN);
    }

    #[test]
    fn test_fetch_args_saturate_huge_numbers() {
        let request: ContentRequest = parse_args(
            FETCH_DOC_CONTENT,
            Some(json!({"doc_uid": "abc123", "max_length": 1e20})),
        )
        .unwrap();
        assert_eq!(request.max_length, Some(i64::MAX));
        assert_eq!(request.start, None);
    }

    #[test]
    fn test_fetch_args_require_doc_uid() {
        let err = parse_args::<ContentRequest>(FETCH_DOC_CONTENT, Some(json!({"start": 3})))
            .unwrap_err();
        assert!(matches!(err, DocuError::ValidationError(_)));
    }

    #[test]
    fn test_fetch_args_accept_nulls() {
        let request: ContentRequest = parse_args(
            FETCH_DOC_CONTENT,
            Some(json!({"doc_uid": "abc123", "start": null, "max_length": null, "ranges": null})),
        )
        .unwrap();
        assert_eq!(request, ContentRequest::index("abc123"));
    }
}
