// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for the MCP protocol, OAuth server and upstream API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! This module organizes application constants by domain for better maintainability.

/// JSON-RPC error codes and error messages
pub mod errors;
/// OAuth authorization server constants
pub mod oauth;
/// Tool identifiers and tool defaults
pub mod tools;

pub use errors::*;

/// MCP protocol constants
pub mod protocol {
    /// JSON-RPC version string
    pub const JSONRPC_VERSION: &str = "2.0";
    /// MCP protocol version advertised by `initialize`
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
    /// Prefix of notification methods, which never receive a response
    pub const NOTIFICATION_PREFIX: &str = "notifications/";
}

/// Service identity
pub mod service_names {
    /// Server name reported in `serverInfo`
    pub const TIKTOK_ADS_MCP: &str = "tiktok-ads-mcp";
    /// Implementation name of the remote HTTP variant
    pub const TIKTOK_ADS_MCP_REMOTE: &str = "tiktok-ads-mcp-remote-server";
    /// Human-readable description of the remote server
    pub const REMOTE_DESCRIPTION: &str = "Remote MCP server for TikTok Business API integration";
}

/// Upstream advertising API constants
pub mod api {
    /// Production base URL
    pub const PRODUCTION_BASE_URL: &str = "https://business-api.tiktok.com/open_api";
    /// Sandbox base URL
    pub const SANDBOX_BASE_URL: &str = "https://sandbox-ads.tiktok.com/open_api";
    /// API version path segment
    pub const API_VERSION: &str = "v1.3";
    /// Header carrying the upstream access token
    pub const ACCESS_TOKEN_HEADER: &str = "Access-Token";
    /// Endpoints containing this marker also receive `app_id` and `secret`
    pub const OAUTH_ENDPOINT_MARKER: &str = "oauth2";
    /// Default request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Default request budget per hour
    pub const DEFAULT_RATE_LIMIT_PER_HOUR: u32 = 1000;
    /// Rate limit window in seconds
    pub const RATE_LIMIT_WINDOW_SECS: u64 = 3600;
    /// Response cache time-to-live in minutes
    pub const CACHE_TTL_MINUTES: u64 = 5;
}

/// Environment variable names
pub mod env_config {
    /// Upstream application id
    pub const APP_ID: &str = "TIKTOK_APP_ID";
    /// Upstream application secret
    pub const SECRET: &str = "TIKTOK_SECRET";
    /// Upstream access token
    pub const ACCESS_TOKEN: &str = "TIKTOK_ACCESS_TOKEN";
    /// Optional default advertiser id
    pub const ADVERTISER_ID: &str = "TIKTOK_ADVERTISER_ID";
    /// Sandbox switch
    pub const SANDBOX: &str = "TIKTOK_SANDBOX";
    /// Hourly request budget
    pub const API_RATE_LIMIT: &str = "TIKTOK_API_RATE_LIMIT";
    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT: &str = "TIKTOK_REQUEST_TIMEOUT";
    /// Response cache directory
    pub const CACHE_DIR: &str = "TOKEN_CACHE_DIR";
    /// Response cache switch
    pub const CACHE_ENABLED: &str = "TOKEN_CACHE_ENABLED";
    /// Bind host of the remote server
    pub const HOST: &str = "HOST";
    /// Bind port of the remote server
    pub const PORT: &str = "PORT";
    /// Log level of the remote server
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Public base URL used in discovery documents
    pub const OAUTH_ISSUER_URL: &str = "OAUTH_ISSUER_URL";
    /// Require bearer tokens on MCP HTTP endpoints
    pub const OAUTH_REQUIRE_BEARER: &str = "OAUTH_REQUIRE_BEARER";
    /// Interval of the background expiry sweep, 0 disables it
    pub const OAUTH_SWEEP_INTERVAL_SECS: &str = "OAUTH_SWEEP_INTERVAL_SECS";
}

/// Network defaults
pub mod network {
    /// Default bind host
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default bind port
    pub const DEFAULT_PORT: u16 = 8000;
    /// Default cache directory, relative to the working directory
    pub const DEFAULT_CACHE_DIR: &str = ".cache";
}
