//! MCP Server Binary Entry Point
//!
//! Serves JSON-RPC 2.0 over stdin/stdout following the Model Context Protocol.

use anyhow::Context;
use docu_config::Config;
use docu_mcp::{transport, DocuServer};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let workspace = std::env::current_dir().context("Failed to resolve working directory")?;
    let config = Config::load(&workspace).context("Failed to load configuration")?;

    docu_common::telemetry::init_tracing(config.logging.verbose, config.logging.json);

    tracing::info!(
        name = %config.server.name,
        backend = %config.backend.url,
        "Docuscribe MCP server starting..."
    );

    let server = Arc::new(DocuServer::new(&config)?);
    transport::serve_stdio(server).await?;

    tracing::info!("Docuscribe MCP server shutting down");
    Ok(())
}
