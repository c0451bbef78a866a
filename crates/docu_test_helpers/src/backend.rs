//! In-process fake of the document backend
//!
//! Serves canned JSON over plain HTTP/1.1 on a loopback port and records the
//! request target (path plus query) of every request it receives.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// A canned HTTP response
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

impl CannedResponse {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// A 200 response with a body that is not JSON
    pub fn garbage() -> Self {
        Self {
            status: 200,
            body: "<html>definitely not json</html>".to_string(),
        }
    }
}

type Routes = Arc<HashMap<String, CannedResponse>>;
type Recorded = Arc<Mutex<Vec<String>>>;

/// Builder for [`FakeBackend`]
#[derive(Default)]
pub struct FakeBackendBuilder {
    routes: HashMap<String, CannedResponse>,
}

impl FakeBackendBuilder {
    /// Answer requests whose path (query ignored) equals `path`
    pub fn route(mut self, path: &str, response: CannedResponse) -> Self {
        self.routes.insert(path.to_string(), response);
        self
    }

    /// Serve `body` from the listing endpoint
    pub fn catalog(self, body: Value) -> Self {
        self.route("/api/list_all_docs", CannedResponse::json(200, body))
    }

    /// Serve `body` from the content endpoint of `doc_uid`
    pub fn content(self, doc_uid: &str, body: Value) -> Self {
        self.route(
            &format!("/api/fetch_doc_content/{}", doc_uid),
            CannedResponse::json(200, body),
        )
    }

    pub async fn start(self) -> FakeBackend {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let addr = listener.local_addr().expect("local addr should resolve");

        let routes: Routes = Arc::new(self.routes);
        let requests: Recorded = Arc::new(Mutex::new(Vec::new()));

        let server_routes = Arc::clone(&routes);
        let server_requests = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&server_routes);
                let requests = Arc::clone(&server_requests);
                tokio::spawn(async move {
                    let _ = serve_connection(stream, routes, requests).await;
                });
            }
        });

        FakeBackend {
            base_url: format!("http://{}", addr),
            requests,
            handle,
        }
    }
}

/// Running fake backend; stops when dropped
pub struct FakeBackend {
    base_url: String,
    requests: Recorded,
    handle: JoinHandle<()>,
}

impl FakeBackend {
    pub fn builder() -> FakeBackendBuilder {
        FakeBackendBuilder::default()
    }

    /// Base URL to hand to the adapter, e.g. `http://127.0.0.1:41234`
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Every request target received so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }

    /// Request targets whose path starts with `prefix`
    pub fn requests_to(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|target| target.starts_with(prefix))
            .collect()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Build a listing body from `(id, name)` pairs
pub fn catalog_body(docs: &[(&str, &str)]) -> Value {
    let documents: Vec<Value> = docs
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name, "hashtags": ["docs"]}))
        .collect();
    json!({ "documents": documents })
}

async fn serve_connection(
    mut stream: TcpStream,
    routes: Routes,
    requests: Recorded,
) -> Result<(), String> {
    let target = read_request_target(&mut stream).await?;
    requests
        .lock()
        .map_err(|e| e.to_string())?
        .push(target.clone());

    let path = target.split('?').next().unwrap_or_default();
    let response = routes.get(path).cloned().unwrap_or(CannedResponse {
        status: 404,
        body: json!({"detail": "Not Found"}).to_string(),
    });

    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        reason_phrase(response.status),
        response.body.len(),
        response.body
    );
    stream
        .write_all(raw.as_bytes())
        .await
        .map_err(|e| e.to_string())?;
    stream.shutdown().await.map_err(|e| e.to_string())
}

async fn read_request_target(stream: &mut TcpStream) -> Result<String, String> {
    let mut buffer = Vec::new();
    while !buffer.windows(4).any(|window| window == b"\r\n\r\n") {
        let mut chunk = [0_u8; 1024];
        let read = stream.read(&mut chunk).await.map_err(|e| e.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP headers".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
    }

    let head = String::from_utf8_lossy(&buffer);
    let request_line = head
        .split("\r\n")
        .next()
        .ok_or_else(|| "Missing HTTP request line".to_string())?;

    // "GET /api/list_all_docs?limit=1&offset=0 HTTP/1.1"
    request_line
        .split_whitespace()
        .nth(1)
        .map(str::to_string)
        .ok_or_else(|| format!("Malformed request line: {}", request_line))
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
