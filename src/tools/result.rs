// ABOUTME: Tool execution results and their MCP text-content rendering
// ABOUTME: Success and error payloads share one wire shape with an isError flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Result Types
//!
//! - `ToolResult` - the payload a tool produced and whether it is an error
//! - `ToolCallResult` - the MCP `tools/call` result: the payload rendered as
//!   pretty-printed JSON inside a single text content block

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::MSG_TOOL_SUGGESTION;

/// Result returned by tool execution
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// Tool-specific JSON payload
    pub content: Value,
    /// Whether the payload describes a failure
    pub is_error: bool,
}

impl ToolResult {
    /// Successful result
    #[must_use]
    pub const fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// Error result with an arbitrary payload
    #[must_use]
    pub const fn error(content: Value) -> Self {
        Self {
            content,
            is_error: true,
        }
    }

    /// Uniform error payload `{error, tool, message, suggestion}`
    #[must_use]
    pub fn failure(tool: &str, message: impl Into<String>, suggestion: &str) -> Self {
        Self::error(json!({
            "error": true,
            "tool": tool,
            "message": message.into(),
            "suggestion": suggestion,
        }))
    }

    /// Uniform error payload for a failed execution, message prefixed with `Error: `
    #[must_use]
    pub fn execution_error(tool: &str, error: &impl std::fmt::Display) -> Self {
        Self::failure(tool, format!("Error: {error}"), MSG_TOOL_SUGGESTION)
    }

    /// Render as the MCP `tools/call` result
    #[must_use]
    pub fn into_call_result(self) -> ToolCallResult {
        let text = serde_json::to_string_pretty(&self.content)
            .unwrap_or_else(|_| self.content.to_string());
        ToolCallResult {
            content: vec![TextContent::new(text)],
            is_error: self.is_error,
        }
    }
}

/// MCP content block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextContent {
    /// Always `text`
    #[serde(rename = "type")]
    pub content_type: String,
    /// Pretty-printed JSON payload
    pub text: String,
}

impl TextContent {
    /// Text block
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_owned(),
            text: text.into(),
        }
    }
}

/// MCP `tools/call` result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCallResult {
    /// Content blocks, always exactly one text block
    pub content: Vec<TextContent>,
    /// Whether the payload describes a failure
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Parse the payload back out of the text block
    #[must_use]
    pub fn payload(&self) -> Option<Value> {
        self.content
            .first()
            .and_then(|block| serde_json::from_str(&block.text).ok())
    }
}
