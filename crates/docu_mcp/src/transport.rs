//! Newline-delimited JSON-RPC over stdio
//!
//! Each inbound request runs as its own task, so slow backend calls do not
//! hold up other requests. Responses are written in completion order.

use crate::{parse_request, DocuServer, JsonRpcError, JsonRpcResponse, PARSE_ERROR};
use docu_common::{DocuError, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Serve on the process's stdin/stdout until stdin closes
pub async fn serve_stdio(server: Arc<DocuServer>) -> Result<()> {
    serve(
        server,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

/// Serve requests read from `reader`, writing responses to `writer`
///
/// Returns once the input is exhausted and every in-flight request has been
/// answered. A line that is not UTF-8 gets a parse error response; a read
/// failure ends input but accepted requests are still answered.
pub async fn serve<R, W>(server: Arc<DocuServer>, reader: R, writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

    let read_loop = async move {
        let mut reader = reader;
        let mut buf = Vec::new();
        let mut in_flight = JoinSet::new();

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read from input, stopping");
                    break;
                }
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    tracing::error!(error = %e, "Received a line that is not UTF-8");
                    let _ = tx.send(JsonRpcResponse::failure(
                        None,
                        JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                    ));
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            tracing::debug!("Received: {}", line);

            match parse_request(line) {
                Ok(request) => {
                    let server = Arc::clone(&server);
                    let tx = tx.clone();
                    in_flight.spawn(async move {
                        if let Some(response) = server.handle_request(request).await {
                            let _ = tx.send(response);
                        }
                    });
                }
                Err(response) => {
                    tracing::error!("Failed to parse request");
                    let _ = tx.send(response);
                }
            }
        }

        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Request task failed");
            }
        }

        drop(tx);
    };

    let write_loop = async move {
        let mut writer = BufWriter::new(writer);
        while let Some(response) = rx.recv().await {
            let json = serde_json::to_string(&response)?;
            tracing::debug!("Sending: {}", json);

            writer.write_all(json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok::<(), DocuError>(())
    };

    let ((), write_result) = tokio::join!(read_loop, write_loop);
    write_result
}
