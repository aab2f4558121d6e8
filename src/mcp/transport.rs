// ABOUTME: Stdio transport for MCP, one JSON-RPC message per line on stdin and stdout
// ABOUTME: Generic over reader and writer so the loop can run against in-memory buffers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io;

use serde_json::Value;
use tokio::io::{
    stdin, stdout, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::{debug, info, warn};

use super::mcp_request_processor::McpRequestProcessor;
use crate::constants::errors::{ERROR_PARSE, MSG_PARSE_ERROR};
use crate::errors::{AppError, AppResult};
use crate::jsonrpc::JsonRpcResponse;

/// Line-delimited JSON-RPC loop
#[derive(Debug, Clone)]
pub struct StdioTransport {
    processor: McpRequestProcessor,
}

impl StdioTransport {
    /// Create a transport around a request processor
    #[must_use]
    pub const fn new(processor: McpRequestProcessor) -> Self {
        Self { processor }
    }

    /// Serve stdin/stdout until stdin closes
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin or writing stdout fails
    pub async fn run(&self) -> AppResult<()> {
        info!("MCP stdio transport ready - listening on stdin/stdout");
        self.serve(BufReader::new(stdin()), stdout()).await
    }

    /// Serve any line reader and writer until the reader is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> AppResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.map_err(io_error)? {
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<Value>(&line) {
                Ok(message) => self.processor.handle_value(message).await,
                Err(e) => {
                    warn!(error = %e, "Invalid JSON-RPC message");
                    Some(JsonRpcResponse::error(None, ERROR_PARSE, MSG_PARSE_ERROR))
                }
            };

            if let Some(response) = response {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer
                    .write_all(encoded.as_bytes())
                    .await
                    .map_err(io_error)?;
                writer.flush().await.map_err(io_error)?;
            }
        }

        debug!("Stdio input closed, transport stopping");
        Ok(())
    }
}

fn io_error(error: io::Error) -> AppError {
    AppError::internal(format!("Stdio transport I/O failed: {error}")).with_source(error)
}
