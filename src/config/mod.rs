// ABOUTME: Configuration module for server settings sourced from the environment
// ABOUTME: Holds upstream credentials, API client, cache and HTTP server settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the TikTok Ads MCP server
//!
//! - **Environment**: Server configuration from environment variables
//! - **Credentials**: The three required upstream API credentials

/// Upstream API credentials and their validation
pub mod credentials;
/// Environment and server configuration
pub mod environment;

pub use credentials::Credentials;
pub use environment::{ApiConfig, AuthInfo, CacheConfig, HttpConfig, LogLevel, ServerConfig};
