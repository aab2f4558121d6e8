// ABOUTME: Model Context Protocol (MCP) implementation for AI assistant integration
// ABOUTME: Request processing, tool schemas, shared resources and the stdio transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// JSON-RPC request routing for both transports
pub mod mcp_request_processor;
/// Shared server resources
pub mod resources;
/// Initialize result and tool descriptor types
pub mod schema;
/// Line-delimited stdio transport
pub mod transport;

pub use mcp_request_processor::McpRequestProcessor;
pub use resources::ServerResources;
pub use transport::StdioTransport;
