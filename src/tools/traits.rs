// ABOUTME: Defines the McpTool trait implemented by every advertising tool
// ABOUTME: Tools are registered with the ToolRegistry and executed through the ToolDispatcher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # MCP Tool Trait
//!
//! All tools implement [`McpTool`], which provides:
//! - Tool metadata (name, description, input schema)
//! - Async execution against the upstream provider in the execution context

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppResult;

use super::context::ToolExecutionContext;
use super::result::ToolResult;

/// The trait every MCP tool implements.
///
/// - Tools are `Send + Sync` so the registry can be shared across tasks
/// - `name()` returns `&'static str` for allocation-free lookup
/// - `execute()` returns the success payload; the dispatcher turns errors
///   into the uniform error payload
///
/// # Example
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use serde_json::{json, Value};
/// use tiktok_ads_mcp::errors::AppResult;
/// use tiktok_ads_mcp::tools::{McpTool, ToolExecutionContext, ToolResult};
///
/// struct PingTool;
///
/// #[async_trait]
/// impl McpTool for PingTool {
///     fn name(&self) -> &'static str {
///         "ping"
///     }
///
///     fn description(&self) -> &'static str {
///         "Reply with pong"
///     }
///
///     fn input_schema(&self) -> Value {
///         json!({"type": "object", "properties": {}})
///     }
///
///     async fn execute(&self, _args: Value, _ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
///         Ok(ToolResult::ok(json!({"success": true, "reply": "pong"})))
///     }
/// }
/// ```
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Unique tool name used in `tools/call`
    fn name(&self) -> &'static str;

    /// Human-readable description shown in `tools/list`
    fn description(&self) -> &'static str;

    /// JSON Schema describing the arguments object
    fn input_schema(&self) -> Value;

    /// Execute the tool
    ///
    /// # Errors
    ///
    /// Returns an error when arguments are invalid or the upstream call fails
    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult>;
}
