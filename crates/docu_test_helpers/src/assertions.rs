//! Assertion helpers for Docuscribe tests
//!
//! Provides predicates over raw protocol output and accessors for the JSON
//! text embedded in `tools/call` results.

use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;

/// Assert that stderr does NOT contain any of the given strings
///
/// # Example
///
/// ```rust
/// use docu_test_helpers::assertions::stderr_not_contains;
/// use predicates::prelude::*;
///
/// assert!(stderr_not_contains(&["ERROR", "WARN"]).eval("all good"));
/// ```
pub fn stderr_not_contains(values: &[&str]) -> impl Predicate<str> {
    let owned_values: Vec<String> = values.iter().map(|&s| s.to_string()).collect();
    predicate::function(move |s: &str| !owned_values.iter().any(|v| s.contains(v.as_str())))
}

/// Assert that a string is valid JSON-RPC response
///
/// Checks for basic JSON-RPC structure (jsonrpc field, id, result or error).
///
/// # Example
/// ```rust
/// use docu_test_helpers::assertions::valid_jsonrpc_response;
/// use predicates::prelude::*;
///
/// let response = r#"{"jsonrpc":"2.0","id":1,"result":{}}"#;
/// assert!(valid_jsonrpc_response().eval(response));
/// ```
pub fn valid_jsonrpc_response() -> impl Predicate<str> {
    contains("\"jsonrpc\"")
        .and(contains("\"id\""))
        .and(contains("\"result\"").or(contains("\"error\"")))
}

/// Parse the JSON payload out of a `tools/call` result
///
/// Panics when the result does not carry a single text content item.
pub fn tool_payload(result: &Value) -> Value {
    let text = result["content"][0]["text"]
        .as_str()
        .unwrap_or_else(|| panic!("tool result has no text content: {}", result));
    serde_json::from_str(text).unwrap_or_else(|e| panic!("tool text is not JSON ({}): {}", e, text))
}

/// Assert that a tool payload is an error object with the given message
pub fn assert_tool_error(payload: &Value, message: &str) {
    assert_eq!(
        payload["error"].as_str(),
        Some(message),
        "unexpected payload: {}",
        payload
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stderr_not_contains() {
        let stderr = "Some output without errors";
        assert!(stderr_not_contains(&["ERROR", "WARN"]).eval(stderr));

        let stderr_with_error = "ERROR: something went wrong";
        assert!(!stderr_not_contains(&["ERROR"]).eval(stderr_with_error));
    }

    #[test]
    fn test_valid_jsonrpc_response() {
        let valid = r#"{"jsonrpc":"2.0","id":1,"result":{}}"#;
        assert!(valid_jsonrpc_response().eval(valid));

        let valid_error = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32600}}"#;
        assert!(valid_jsonrpc_response().eval(valid_error));

        let invalid = r#"{"data":"test"}"#;
        assert!(!valid_jsonrpc_response().eval(invalid));
    }

    #[test]
    fn test_tool_payload() {
        let result = json!({
            "content": [{"type": "text", "text": "{\"error\":\"Document 'zzz' not found\"}"}],
            "isError": true
        });
        let payload = tool_payload(&result);
        assert_tool_error(&payload, "Document 'zzz' not found");
    }
}
