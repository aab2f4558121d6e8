// ABOUTME: Route module organization for the remote MCP server HTTP endpoints
// ABOUTME: Composes MCP, OAuth and health routes with CORS, request id and tracing layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the remote server
//!
//! Each domain module owns its route definitions and thin handlers that
//! delegate to the MCP processor or the OAuth store.

/// Health check routes
pub mod health;
/// Model Context Protocol (MCP) HTTP routes
pub mod mcp;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use health::HealthRoutes;
pub use mcp::McpRoutes;

use crate::mcp::ServerResources;
use crate::oauth2_server::OAuthRoutes;

/// Cross-origin settings for browser-hosted assistants
#[must_use]
pub fn setup_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            header::ORIGIN,
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .expose_headers([header::WWW_AUTHENTICATE])
}

/// Full application router
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(McpRoutes::routes(resources.clone()))
        .merge(OAuthRoutes::routes(resources.clone()))
        .merge(HealthRoutes::routes(resources))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(setup_cors())
}
