// ABOUTME: Local MCP server binary speaking JSON-RPC over stdin and stdout
// ABOUTME: Loads configuration from the environment and logs to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # TikTok Ads MCP Server Binary
//!
//! Launched by an MCP host as a child process. Standard output carries only
//! protocol messages; every log line goes to standard error.

use std::sync::Arc;

use anyhow::Result;
use tiktok_ads_mcp::{
    config::ServerConfig,
    logging,
    mcp::{McpRequestProcessor, ServerResources, StdioTransport},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_for_stdio()?;

    let config = ServerConfig::from_env()?;
    info!(summary = %config.summary(), "Configuration loaded");

    let resources = Arc::new(ServerResources::new(config));
    info!(
        tools = resources.dispatcher.registry().len(),
        "Tool registry ready"
    );

    let transport = StdioTransport::new(McpRequestProcessor::new(resources));
    transport.run().await?;

    info!("Stdin closed, shutting down");
    Ok(())
}
