//! MCP (Model Context Protocol) server for Zipic.
//!
//! Exposes `quickCompress` and `advancedCompress` as MCP tools. Each call is
//! turned into a `zipic://compress?...` deep link and handed to the OS.
//!
//! Configure in `.mcp.json` or `~/.claude/settings.json`:
//! ```json
//! { "mcpServers": { "zipic": { "command": "zipic-mcp" } } }
//! ```

pub mod jsonrpc;
pub mod tools;

use anyhow::Result;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::app::{CapabilityGuard, Dispatcher};
use crate::handlers::Compressor;
use jsonrpc::{JsonRpcRequest, JsonRpcResponse, PARSE_ERROR};

/// Serve line-delimited JSON-RPC until `reader` reaches EOF.
pub async fn serve<R, W, G, D>(
    reader: R,
    mut writer: W,
    compressor: &Compressor<G, D>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    G: CapabilityGuard,
    D: Dispatcher,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
            Ok(request) => jsonrpc::handle_request(&request, compressor).await,
            Err(e) => {
                warn!(error = %e, "Unparseable request");
                Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };

        if let Some(response) = response {
            let mut out = serde_json::to_string(&response)?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
            writer.flush().await?;
        }
    }

    info!("Input closed, shutting down");
    Ok(())
}

/// Run the MCP server on stdio.
pub async fn run_server<G, D>(compressor: &Compressor<G, D>) -> Result<()>
where
    G: CapabilityGuard,
    D: Dispatcher,
{
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(stdin, stdout, compressor).await
}
