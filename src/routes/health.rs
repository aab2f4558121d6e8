// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Reports configuration validity, cache directory state, upstream budget and OAuth store sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::config::AuthInfo;
use crate::constants::service_names;
use crate::mcp::resources::ServerResources;
use crate::oauth2_server::StoreCounts;
use crate::rate_limiting::RateLimitStatus;

/// Configuration and environment state
#[derive(Debug, Clone, Serialize)]
pub struct HealthInfo {
    /// All upstream credentials present
    pub config_valid: bool,
    /// Response cache directory exists
    pub cache_dir_exists: bool,
    /// Response cache directory accepts writes
    pub cache_writable: bool,
    /// Upstream base URL
    pub base_url: String,
    /// Upstream API version
    pub api_version: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` once the server answers
    pub status: &'static str,
    /// RFC 3339 time of the check
    pub timestamp: String,
    /// Service name
    pub service: &'static str,
    /// Crate version
    pub version: &'static str,
    /// Configuration and environment state
    pub health: HealthInfo,
    /// Credential summary without secret values
    pub auth: AuthInfo,
    /// Upstream request budget
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitStatus>,
    /// OAuth store sizes
    pub oauth: StoreCounts,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
        Json(Self::check(&resources).await)
    }

    /// Collect the health report
    pub async fn check(resources: &ServerResources) -> HealthResponse {
        let config = &resources.config;
        let (cache_dir_exists, cache_writable) =
            resources.cache_probe().await.unwrap_or((false, false));

        HealthResponse {
            status: "healthy",
            timestamp: Utc::now().to_rfc3339(),
            service: service_names::TIKTOK_ADS_MCP,
            version: env!("CARGO_PKG_VERSION"),
            health: HealthInfo {
                config_valid: config.credentials.is_complete(),
                cache_dir_exists,
                cache_writable,
                base_url: config.api.base_url.clone(),
                api_version: config.api.api_version.clone(),
            },
            auth: config.auth_info(),
            rate_limit: resources.rate_limit_status(),
            oauth: resources.oauth.counts(),
        }
    }
}
