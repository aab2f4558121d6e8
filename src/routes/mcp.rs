// ABOUTME: MCP (Model Context Protocol) HTTP route handlers for the remote server
// ABOUTME: JSON-RPC over POST, direct tool endpoints, server discovery and optional bearer enforcement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP protocol routes for AI assistant integration

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::constants::errors::{ERROR_PARSE, MSG_PARSE_ERROR};
use crate::constants::oauth::{AUTHORIZATION_PATH, REGISTRATION_PATH, TOKEN_PATH};
use crate::constants::protocol::{JSONRPC_VERSION, MCP_PROTOCOL_VERSION};
use crate::constants::service_names;
use crate::errors::AppError;
use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse};
use crate::mcp::{McpRequestProcessor, ServerResources};
use crate::oauth2_server::routes::OAuthErrorResponse;

/// MCP routes implementation
pub struct McpRoutes;

impl McpRoutes {
    /// Create all MCP routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root).post(Self::handle_root_post))
            .route("/mcp", post(Self::handle_mcp))
            .route(
                "/mcp/tools/list",
                get(Self::handle_tools_list).post(Self::handle_tools_list_post),
            )
            .route("/mcp/tools/call", post(Self::handle_tools_call))
            .route("/.well-known/mcp_server", get(Self::handle_discovery))
            .with_state(resources)
    }

    /// Server information
    async fn handle_root(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(Self::server_info(&resources))
    }

    /// JSON-RPC bodies are routed to MCP, anything else gets server information
    async fn handle_root_post(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        let message = serde_json::from_slice::<Value>(&body).ok();
        match message {
            Some(message) if message.get("jsonrpc") == Some(&json!(JSONRPC_VERSION)) => {
                if let Err(rejection) = Self::authorize(&resources, &headers) {
                    return rejection;
                }
                Self::process(&resources, message).await
            }
            _ => Json(Self::server_info(&resources)).into_response(),
        }
    }

    /// JSON-RPC endpoint
    async fn handle_mcp(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        if let Err(rejection) = Self::authorize(&resources, &headers) {
            return rejection;
        }
        match serde_json::from_slice::<Value>(&body) {
            Ok(message) => Self::process(&resources, message).await,
            Err(e) => {
                warn!(error = %e, "Invalid JSON-RPC body");
                Json(JsonRpcResponse::error(None, ERROR_PARSE, MSG_PARSE_ERROR)).into_response()
            }
        }
    }

    /// Tool catalog without a JSON-RPC envelope request
    async fn handle_tools_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Response {
        if let Err(rejection) = Self::authorize(&resources, &headers) {
            return rejection;
        }
        let tools = resources.dispatcher.list_schemas();
        Json(json!({
            "jsonrpc": JSONRPC_VERSION,
            "result": { "tools": tools }
        }))
        .into_response()
    }

    /// Tool catalog answering the caller's request id
    async fn handle_tools_list_post(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        Self::forced_method(&resources, &headers, &body, "tools/list").await
    }

    /// Tool invocation regardless of the envelope's method
    async fn handle_tools_call(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Response {
        Self::forced_method(&resources, &headers, &body, "tools/call").await
    }

    /// MCP server discovery document
    async fn handle_discovery(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let base = &resources.config.http.issuer_url;
        let version = env!("CARGO_PKG_VERSION");
        Json(json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "implementation": {
                "name": service_names::TIKTOK_ADS_MCP,
                "version": version
            },
            "serverInfo": {
                "name": service_names::TIKTOK_ADS_MCP,
                "version": version,
                "description": service_names::REMOTE_DESCRIPTION
            },
            "capabilities": {
                "tools": { "listChanged": true },
                "logging": {}
            },
            "transport": {
                "type": "http",
                "base_url": base,
                "endpoints": { "jsonrpc": "/" }
            },
            "authentication": {
                "type": "oauth2",
                "required": resources.config.http.require_bearer,
                "flows": {
                    "authorization_code": {
                        "authorization_url": format!("{base}{AUTHORIZATION_PATH}"),
                        "token_url": format!("{base}{TOKEN_PATH}")
                    }
                },
                "registration_url": format!("{base}{REGISTRATION_PATH}")
            }
        }))
    }

    fn server_info(resources: &ServerResources) -> Value {
        json!({
            "name": "TikTok Ads MCP Remote Server",
            "version": env!("CARGO_PKG_VERSION"),
            "description": service_names::REMOTE_DESCRIPTION,
            "endpoints": {
                "mcp_discovery": "/.well-known/mcp_server",
                "mcp_protocol": "/mcp",
                "oauth_register": REGISTRATION_PATH,
                "oauth_authorize": AUTHORIZATION_PATH,
                "oauth_token": TOKEN_PATH,
                "health": "/health"
            },
            "tools": resources.dispatcher.registry().tool_names(),
        })
    }

    async fn process(resources: &Arc<ServerResources>, message: Value) -> Response {
        let processor = McpRequestProcessor::new(resources.clone());
        match processor.handle_value(message).await {
            Some(response) => Json(response).into_response(),
            None => StatusCode::ACCEPTED.into_response(),
        }
    }

    /// Run a body as a fixed method, keeping its id and params
    async fn forced_method(
        resources: &Arc<ServerResources>,
        headers: &HeaderMap,
        body: &[u8],
        method: &str,
    ) -> Response {
        if let Err(rejection) = Self::authorize(resources, headers) {
            return rejection;
        }
        let message = if body.is_empty() {
            json!({})
        } else {
            match serde_json::from_slice::<Value>(body) {
                Ok(message) => message,
                Err(e) => {
                    warn!(error = %e, method, "Invalid JSON body");
                    return Json(JsonRpcResponse::error(None, ERROR_PARSE, MSG_PARSE_ERROR))
                        .into_response();
                }
            }
        };

        let request = JsonRpcRequest::with_id(
            method,
            message.get("params").cloned(),
            message.get("id").cloned().unwrap_or(Value::Null),
        );
        let processor = McpRequestProcessor::new(resources.clone());
        match processor.handle_request(request).await {
            Some(response) => Json(response).into_response(),
            None => StatusCode::ACCEPTED.into_response(),
        }
    }

    /// Enforce `Authorization: Bearer` when the server requires it
    fn authorize(resources: &ServerResources, headers: &HeaderMap) -> Result<(), Response> {
        if !resources.config.http.require_bearer {
            return Ok(());
        }

        let token = bearer_token(headers)
            .ok_or_else(|| AppError::invalid_token("Missing bearer token"))
            .and_then(|token| resources.oauth.validate(token));

        match token {
            Ok(token) => {
                debug!(client_id = %token.client_id, "Bearer token accepted");
                Ok(())
            }
            Err(error) => {
                let challenge = format!(
                    "Bearer resource_metadata=\"{}/.well-known/oauth-protected-resource\"",
                    resources.config.http.issuer_url
                );
                let mut response = OAuthErrorResponse(error).into_response();
                if let Ok(value) = HeaderValue::from_str(&challenge) {
                    response.headers_mut().insert(header::WWW_AUTHENTICATE, value);
                }
                Err(response)
            }
        }
    }
}

/// Token from an `Authorization: Bearer` header
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
