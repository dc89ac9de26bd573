//! Line-delimited JSON-RPC over a byte stream, normally the process stdio.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio_stream::{StreamExt, wrappers::SplitStream};

use crate::handler::McpHandler;

/// Serve requests read from `reader` one at a time, in arrival order,
/// writing one response line per request to `writer`.
///
/// Returns when `reader` reaches end of input. A malformed line, including
/// one that is not UTF-8, is answered with a parse error and serving continues.
///
/// # Errors
/// Fails on an I/O error from either side.
pub async fn serve<R, W>(handler: &McpHandler, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = SplitStream::new(reader.split(b'\n'));

    while let Some(line) = lines.next().await {
        let line = line?;
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }

        if let Some(response) = handler.handle_bytes(line).await {
            writer.write_all(response.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
    }

    tracing::info!("Input closed, stopping stdio transport");
    Ok(())
}

/// Serve on the process stdin and stdout.
///
/// # Errors
/// Fails on an I/O error on stdin or stdout.
pub async fn serve_stdio(handler: &McpHandler) -> io::Result<()> {
    tracing::info!("Serving MCP over stdio");
    serve(handler, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}
