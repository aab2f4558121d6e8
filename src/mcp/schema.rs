// ABOUTME: MCP protocol schema definitions for initialize results and tool descriptors
// ABOUTME: Serializes tool metadata and server capabilities in MCP wire format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP schema types exchanged during `initialize` and `tools/list`

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::protocol::MCP_PROTOCOL_VERSION;
use crate::constants::service_names;

/// MCP Tool Schema Definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolSchema {
    /// Wire name used by `tools/call`
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// JSON Schema of the arguments object
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Server identity reported by `initialize`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Crate version
    pub version: String,
}

/// `tools` capability
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolsCapability {
    /// Whether the server announces tool list changes
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// `logging` capability, no options
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingCapability {}

/// Capabilities advertised by `initialize`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerCapabilities {
    /// Tool support
    pub tools: ToolsCapability,
    /// Log message support
    pub logging: LoggingCapability,
}

/// Result of the `initialize` method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitializeResult {
    /// Negotiated protocol version
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server capabilities
    pub capabilities: ServerCapabilities,
    /// Server identity
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

impl InitializeResult {
    /// Result advertising tools and logging support
    #[must_use]
    pub fn new() -> Self {
        Self {
            protocol_version: MCP_PROTOCOL_VERSION.to_owned(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: true },
                logging: LoggingCapability {},
            },
            server_info: ServerInfo {
                name: service_names::TIKTOK_ADS_MCP.to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
            },
        }
    }
}

impl Default for InitializeResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters of `tools/call`
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Tool to invoke
    pub name: Option<String>,
    /// Arguments object, treated as empty when absent
    #[serde(default)]
    pub arguments: Option<Value>,
}
