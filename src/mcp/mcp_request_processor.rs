// ABOUTME: MCP request processing shared by the stdio and HTTP transports
// ABOUTME: Validates, routes and executes JSON-RPC requests, returning no response for notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Instant;

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use super::resources::ServerResources;
use super::schema::{InitializeResult, ToolCallParams};
use crate::constants::errors::{
    ERROR_INTERNAL_ERROR, ERROR_INVALID_PARAMS, ERROR_INVALID_REQUEST, ERROR_METHOD_NOT_FOUND,
    MSG_INVALID_REQUEST,
};
use crate::constants::protocol::JSONRPC_VERSION;
use crate::errors::{AppError, AppResult};
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};

/// Processes MCP protocol requests with validation, routing, and execution
#[derive(Debug, Clone)]
pub struct McpRequestProcessor {
    resources: Arc<ServerResources>,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle a decoded JSON value that may or may not be a JSON-RPC request
    ///
    /// A value that does not deserialize into a request is answered with
    /// `-32600`, echoing its `id` when it has one.
    pub async fn handle_value(&self, message: Value) -> Option<JsonRpcResponse> {
        match serde_json::from_value::<JsonRpcRequest>(message.clone()) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                debug!(error = %e, "Message is not a JSON-RPC request");
                let id = message.get("id").cloned();
                Some(JsonRpcResponse::error(id, ERROR_INVALID_REQUEST, MSG_INVALID_REQUEST))
            }
        }
    }

    /// Handle an MCP request and return a response
    ///
    /// Notifications (no `id`, or a `notifications/` method) return `None`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let start_time = Instant::now();
        debug!(method = %request.method, id = ?request.id, "Received MCP request");

        if request.jsonrpc != JSONRPC_VERSION {
            warn!(jsonrpc = %request.jsonrpc, "Rejecting request with invalid JSON-RPC version");
            return Some(JsonRpcResponse::error(
                request.id,
                ERROR_INVALID_REQUEST,
                format!(
                    "{MSG_INVALID_REQUEST}: jsonrpc must be '{JSONRPC_VERSION}', got '{}'",
                    request.jsonrpc
                ),
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "Notification handled without response");
            return None;
        }

        let response = match self.process_request(&request).await {
            Ok(response) => response,
            Err(e) => Self::create_error_response(&request, &e),
        };

        debug!(
            method = %request.method,
            elapsed_ms = start_time.elapsed().as_millis(),
            success = response.is_success(),
            "MCP request completed"
        );
        Some(response)
    }

    fn create_error_response(request: &JsonRpcRequest, e: &AppError) -> JsonRpcResponse {
        error!(method = %request.method, id = ?request.id, error = %e, "Failed to process MCP request");
        JsonRpcResponse::error(
            request.id.clone(),
            ERROR_INTERNAL_ERROR,
            format!("Internal error: {e}"),
        )
    }

    async fn process_request(&self, request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        match request.method.as_str() {
            "initialize" => Self::handle_initialize(request),
            "ping" => Ok(JsonRpcResponse::success(request.id.clone(), json!({}))),
            "tools/list" => Ok(self.handle_tools_list(request)),
            "tools/call" => Ok(self.handle_tools_call(request).await),
            method => {
                debug!(method = %method, "Unknown MCP method");
                Ok(JsonRpcResponse::error(
                    request.id.clone(),
                    ERROR_METHOD_NOT_FOUND,
                    format!("Method not found: {method}"),
                ))
            }
        }
    }

    fn handle_initialize(request: &JsonRpcRequest) -> AppResult<JsonRpcResponse> {
        debug!("Handling initialize request");
        let result = serde_json::to_value(InitializeResult::new())?;
        Ok(JsonRpcResponse::success(request.id.clone(), result))
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let tools = self.resources.dispatcher.list_schemas();
        debug!(count = tools.len(), "Handling tools/list request");
        JsonRpcResponse::success(request.id.clone(), json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let params = request.params.clone().unwrap_or_else(|| json!({}));
        let call = match serde_json::from_value::<ToolCallParams>(params) {
            Ok(call) => call,
            Err(e) => {
                return JsonRpcResponse::error(
                    request.id.clone(),
                    ERROR_INVALID_PARAMS,
                    format!("Invalid params for tools/call: {e}"),
                );
            }
        };
        let Some(name) = call.name.filter(|name| !name.is_empty()) else {
            return JsonRpcResponse::error(
                request.id.clone(),
                ERROR_INVALID_PARAMS,
                "Missing tool name in tools/call params",
            );
        };

        let arguments = call.arguments.unwrap_or_else(|| json!({}));
        let result = self.resources.dispatcher.call(&name, arguments).await;
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
            Err(e) => Self::create_error_response(request, &AppError::from(e)),
        }
    }
}
