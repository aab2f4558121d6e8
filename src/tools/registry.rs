// ABOUTME: Central registry of MCP tools and the dispatcher that executes them by name
// ABOUTME: The dispatcher never fails; every outcome becomes a text-content tool result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Registry
//!
//! The registry is built once at startup and then used immutably. Tools are
//! listed in registration order. The [`ToolDispatcher`] is the error
//! boundary for tool invocations: credential checks, unknown names, argument
//! errors and upstream failures all come back as an `isError` result rather
//! than a protocol error.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Credentials;
use crate::constants::{MSG_CREDENTIALS_SUGGESTION, MSG_TOOL_SUGGESTION};
use crate::errors::ToolError;
use crate::mcp::schema::ToolSchema;
use crate::providers::AdsApiProvider;

use super::context::ToolExecutionContext;
use super::implementations::{
    GetAdGroupsTool, GetAdsTool, GetAuthorizedAdAccountsTool, GetBusinessCentersTool,
    GetCampaignsTool, GetReportsTool,
};
use super::result::{ToolCallResult, ToolResult};
use super::traits::McpTool;

/// Registry of tools by name, preserving registration order
pub struct ToolRegistry {
    tools: Vec<Arc<dyn McpTool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Registry holding the six advertising tools
    #[must_use]
    pub fn with_builtin_tools() -> Self {
        let mut registry = Self::new();
        registry.register_builtin_tools();
        registry
    }

    /// Register a tool
    ///
    /// # Returns
    ///
    /// `true` if the tool was registered, `false` if a tool with the same name exists
    pub fn register(&mut self, tool: Arc<dyn McpTool>) -> bool {
        let name = tool.name().to_owned();

        if self.index.contains_key(&name) {
            warn!(tool = %name, "Tool already registered, skipping");
            return false;
        }

        debug!(tool = %name, "Registering tool");
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        true
    }

    /// Register the advertising tools
    pub fn register_builtin_tools(&mut self) {
        self.register(Arc::new(GetBusinessCentersTool));
        self.register(Arc::new(GetAuthorizedAdAccountsTool));
        self.register(Arc::new(GetCampaignsTool));
        self.register(Arc::new(GetAdGroupsTool));
        self.register(Arc::new(GetAdsTool));
        self.register(Arc::new(GetReportsTool));
        info!(count = self.tools.len(), "Registered advertising tools");
    }

    /// Get a tool by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn McpTool>> {
        self.index.get(name).and_then(|&i| self.tools.get(i))
    }

    /// Check if a tool is registered
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool names in registration order
    #[must_use]
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|tool| tool.name()).collect()
    }

    /// Schemas for `tools/list`
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .iter()
            .map(|tool| ToolSchema {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .finish()
    }
}

/// Routes named invocations to registered tools
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    registry: Arc<ToolRegistry>,
    context: ToolExecutionContext,
    credentials: Credentials,
}

impl ToolDispatcher {
    /// Create a dispatcher
    #[must_use]
    pub fn new(
        registry: Arc<ToolRegistry>,
        provider: Arc<dyn AdsApiProvider>,
        credentials: Credentials,
    ) -> Self {
        Self {
            registry,
            context: ToolExecutionContext::new(provider),
            credentials,
        }
    }

    /// Registry backing this dispatcher
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Schemas for `tools/list`
    #[must_use]
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.registry.list_schemas()
    }

    /// Execute a tool and wrap the outcome, success or failure
    pub async fn call(&self, name: &str, arguments: Value) -> ToolCallResult {
        self.execute(name, arguments).await.into_call_result()
    }

    /// Execute a tool returning the unwrapped result
    pub async fn execute(&self, name: &str, arguments: Value) -> ToolResult {
        let missing = self.credentials.missing();
        if !missing.is_empty() {
            warn!(tool = %name, missing = %missing.join(", "), "Tool call rejected, credentials missing");
            return ToolResult::failure(
                name,
                format!(
                    "TikTok API credentials not configured. Missing: {}",
                    missing.join(", ")
                ),
                MSG_CREDENTIALS_SUGGESTION,
            );
        }

        let Some(tool) = self.registry.get(name) else {
            let available = self
                .registry
                .tool_names()
                .into_iter()
                .map(str::to_owned)
                .collect();
            let error = ToolError::not_found(name, available);
            warn!(tool = %name, "Unknown tool requested");
            return ToolResult::failure(name, error.to_string(), MSG_TOOL_SUGGESTION);
        };

        debug!(tool = %name, "Executing tool");
        match tool.execute(arguments, &self.context).await {
            Ok(result) => {
                info!(tool = %name, "Tool executed successfully");
                result
            }
            Err(error) => {
                warn!(tool = %name, error = %error, "Tool execution failed");
                ToolResult::execution_error(name, &error)
            }
        }
    }
}
