use docu_config::BackendConfig;
use docu_core::DocuAdapter;
use docu_mcp::{DocuServer, JsonRpcRequest, INVALID_PARAMS, METHOD_NOT_FOUND};
use docu_test_helpers::prelude::*;
use serde_json::{json, Value};

fn server_for(backend: &FakeBackend) -> DocuServer {
    let adapter = DocuAdapter::from_config(&BackendConfig {
        url: backend.url().to_string(),
    })
    .expect("fake backend URL should be valid");
    DocuServer::with_adapter("Docuscribe", adapter)
}

fn request(method: &str, params: Value) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        id: Some(json!(1)),
        method: method.to_string(),
        params: Some(params),
    }
}

async fn call_tool(server: &DocuServer, name: &str, args: Value) -> Value {
    let req = request("tools/call", json!({ "name": name, "arguments": args }));

    let resp = server.handle_request(req).await.expect("Request failed");
    assert!(resp.error.is_none(), "Tool call returned error: {:?}", resp.error);

    let result = resp.result.unwrap();
    assert_eq!(result["isError"], json!(false));
    tool_payload(&result)
}

fn catalog() -> Value {
    catalog_body(&[("abc123", "Rust Book")])
}

#[tokio::test]
async fn test_tools_list_advertises_both_tools() {
    let backend = FakeBackend::builder().start().await;
    let server = server_for(&backend);

    let resp = server
        .handle_request(request("tools/list", json!({})))
        .await
        .unwrap();
    let tools = resp.result.unwrap()["tools"].as_array().unwrap().clone();

    let names: Vec<_> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["list_all_docs", "fetch_doc_content"]);
    assert_eq!(tools[0]["inputSchema"]["properties"]["limit"]["default"], 100);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_initialize_echoes_protocol_version() {
    let backend = FakeBackend::builder().start().await;
    let server = server_for(&backend);

    let resp = server
        .handle_request(request(
            "initialize",
            json!({
                "protocolVersion": "2025-03-26",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "1.0.0"}
            }),
        ))
        .await
        .unwrap();
    let result = resp.result.unwrap();

    assert_eq!(result["protocolVersion"], "2025-03-26");
    assert_eq!(result["serverInfo"]["name"], "Docuscribe");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], false);
}

#[tokio::test]
async fn test_list_all_docs_through_protocol() {
    let backend = FakeBackend::builder().catalog(catalog()).start().await;
    let server = server_for(&backend);

    let payload = call_tool(&server, "list_all_docs", json!({"limit": 0, "offset": -5})).await;

    assert_eq!(
        backend.requests(),
        vec!["/api/list_all_docs?limit=1&offset=0".to_string()]
    );
    assert_eq!(payload["_request"], json!({"limit": 1, "offset": 0}));
    assert_eq!(payload["documents"][0]["id"], "abc123");
}

#[tokio::test]
async fn test_list_all_docs_clamps_oversized_numbers() {
    let backend = FakeBackend::builder().catalog(catalog()).start().await;
    let server = server_for(&backend);

    let args: Value = serde_json::from_str(r#"{"limit": 99999999999999999999, "offset": 1e20}"#)
        .unwrap();
    let payload = call_tool(&server, "list_all_docs", args).await;

    assert_eq!(
        backend.requests(),
        vec![format!("/api/list_all_docs?limit=1000&offset={}", i64::MAX)]
    );
    assert_eq!(payload["_request"]["limit"], 1000);
}

#[tokio::test]
async fn test_list_all_docs_default_arguments() {
    let backend = FakeBackend::builder().catalog(catalog()).start().await;
    let server = server_for(&backend);

    let req = request("tools/call", json!({ "name": "list_all_docs" }));
    let resp = server.handle_request(req).await.unwrap();
    assert!(resp.error.is_none());

    assert_eq!(
        backend.requests(),
        vec!["/api/list_all_docs?limit=100&offset=0".to_string()]
    );
}

#[tokio::test]
async fn test_backend_failure_is_a_payload_not_a_fault() {
    let backend = FakeBackend::builder()
        .route(
            "/api/list_all_docs",
            CannedResponse::json(500, json!({"detail": "boom"})),
        )
        .start()
        .await;
    let server = server_for(&backend);

    let payload = call_tool(&server, "list_all_docs", json!({})).await;
    assert_eq!(payload, json!({"error": "list_all_docs failed", "status": 500}));
}

#[tokio::test]
async fn test_fetch_unknown_document() {
    let backend = FakeBackend::builder().catalog(catalog()).start().await;
    let server = server_for(&backend);

    let payload = call_tool(&server, "fetch_doc_content", json!({"doc_uid": "zzz"})).await;

    assert_tool_error(&payload, "Document 'zzz' not found");
    assert!(backend.requests_to("/api/fetch_doc_content").is_empty());
}

#[tokio::test]
async fn test_fetch_single_range_through_protocol() {
    let backend = FakeBackend::builder()
        .catalog(catalog())
        .content(
            "abc123",
            json!({
                "document": {"id": "abc123", "content": "fn main() {}"},
                "meta": {"has_more": true, "next_start": 500}
            }),
        )
        .start()
        .await;
    let server = server_for(&backend);

    let payload = call_tool(
        &server,
        "fetch_doc_content",
        json!({"doc_uid": "abc123", "start": 0, "max_length": 500}),
    )
    .await;

    assert_eq!(
        backend.requests_to("/api/fetch_doc_content"),
        vec!["/api/fetch_doc_content/abc123?start=0&max_length=500".to_string()]
    );
    assert_eq!(payload["has_more"], true);
    assert_eq!(payload["next_start"], 500);
    assert_eq!(payload["document"]["content"], "fn main() {}");
}

#[tokio::test]
async fn test_unknown_tool_is_invalid_params() {
    let backend = FakeBackend::builder().start().await;
    let server = server_for(&backend);

    let req = request("tools/call", json!({ "name": "delete_everything", "arguments": {} }));
    let resp = server.handle_request(req).await.unwrap();
    let error = resp.error.expect("unknown tool should fail");

    assert_eq!(error.code, INVALID_PARAMS);
    assert!(error.message.contains("delete_everything"));
}

#[tokio::test]
async fn test_missing_doc_uid_is_invalid_params() {
    let backend = FakeBackend::builder().catalog(catalog()).start().await;
    let server = server_for(&backend);

    let req = request(
        "tools/call",
        json!({ "name": "fetch_doc_content", "arguments": {"start": 10} }),
    );
    let resp = server.handle_request(req).await.unwrap();

    assert_eq!(resp.error.unwrap().code, INVALID_PARAMS);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_unknown_method() {
    let backend = FakeBackend::builder().start().await;
    let server = server_for(&backend);

    let resp = server
        .handle_request(request("resources/list", json!({})))
        .await
        .unwrap();
    assert_eq!(resp.error.unwrap().code, METHOD_NOT_FOUND);
}
