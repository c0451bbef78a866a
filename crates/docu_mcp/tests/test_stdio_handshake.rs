use docu_test_helpers::prelude::*;
use predicates::prelude::*;
use serde_json::{json, Value};

#[test]
fn test_initialize_over_stdio() {
    let workspace = temp_dir();
    let init_message = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": {"name": "test-client", "version": "1.0.0"}
        }
    });

    let output = mcp_command()
        .current_dir(workspace.path())
        .write_stdin(format!("{}\n", init_message))
        .assert()
        .success()
        .stdout(valid_jsonrpc_response())
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout must carry only JSON-RPC frames");

    let response: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["serverInfo"]["name"], "Docuscribe");
    assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
}

#[test]
fn test_parse_error_over_stdio() {
    let workspace = temp_dir();

    mcp_command()
        .current_dir(workspace.path())
        .write_stdin("{broken\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("-32700"));
}

#[test]
fn test_invalid_backend_url_fails_startup() {
    let workspace = temp_dir();

    mcp_command()
        .current_dir(workspace.path())
        .env("SERVER_BACKEND_URL", "ftp://docs.example")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_server_name_from_config_file() {
    let workspace = workspace_with_backend("http://127.0.0.1:9");
    std::fs::write(
        workspace.path().join(".docuscribe/config.toml"),
        "[backend]\nurl = \"http://127.0.0.1:9\"\n\n[server]\nname = \"Team Docs\"\n",
    )
    .unwrap();

    let init = json!({"jsonrpc": "2.0", "id": 5, "method": "initialize", "params": {}});
    mcp_command()
        .current_dir(workspace.path())
        .write_stdin(format!("{}\n", init))
        .assert()
        .success()
        .stdout(predicate::str::contains("Team Docs"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_url_from_env_file() {
    let backend = FakeBackend::builder()
        .catalog(catalog_body(&[("abc123", "Rust Book")]))
        .start()
        .await;
    let env_line = format!("SERVER_BACKEND_URL={}", backend.url());
    let workspace = workspace_with_env_file(&["# local overrides", &env_line]);

    let call = json!({
        "jsonrpc": "2.0",
        "id": 2,
        "method": "tools/call",
        "params": {"name": "list_all_docs", "arguments": {}}
    });

    mcp_command()
        .current_dir(workspace.path())
        .write_stdin(format!("{}\n", call))
        .assert()
        .success()
        .stdout(predicate::str::contains("abc123"))
        .stderr(stderr_not_contains(&["ERROR", "panicked"]));

    assert_eq!(
        backend.requests(),
        vec!["/api/list_all_docs?limit=100&offset=0".to_string()]
    );
}

#[test]
fn test_process_env_overrides_env_file() {
    let workspace = workspace_with_env_file(&["SERVER_BACKEND_URL=http://127.0.0.1:9"]);

    mcp_command()
        .current_dir(workspace.path())
        .env("SERVER_BACKEND_URL", "ftp://docs.example")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}
