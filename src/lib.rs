// ABOUTME: Main library entry point for the TikTok Ads MCP server
// ABOUTME: Exposes the TikTok Business API as MCP tools over stdio and HTTP with an OAuth 2.0 server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy
#![deny(unsafe_code)]

//! # TikTok Ads MCP Server
//!
//! A Model Context Protocol (MCP) server exposing the TikTok Business API
//! (business centers, advertiser accounts, campaigns, ad groups, ads and
//! reports) as tools an AI assistant can call.
//!
//! ## Features
//!
//! - **Six read-only tools** backed by a rate limited, cached API client
//! - **Two transports**: newline delimited JSON-RPC on stdio, and HTTP
//! - **OAuth 2.0 server** for the HTTP variant: dynamic client registration,
//!   authorization codes with PKCE, access and refresh tokens, revocation
//!
//! ## Architecture
//!
//! - **Providers**: the upstream API client behind the `AdsApiProvider` trait
//! - **Tools**: one `McpTool` per capability plus the registry and dispatcher
//! - **MCP**: JSON-RPC request processing and the stdio transport
//! - **`OAuth2` server**: in-memory client, code and token state plus routes
//! - **Routes**: the axum router served by the remote binary
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tiktok_ads_mcp::config::ServerConfig;
//! use tiktok_ads_mcp::mcp::{McpRequestProcessor, ServerResources, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::new(config));
//!     StdioTransport::new(McpRequestProcessor::new(resources)).run().await?;
//!     Ok(())
//! }
//! ```

/// File-based response cache for upstream GET requests
pub mod cache;

/// Configuration management from environment variables
pub mod config;

/// Application constants organized by domain
pub mod constants;

/// Unified error handling
pub mod errors;

/// JSON-RPC 2.0 message types
pub mod jsonrpc;

/// Structured logging setup
pub mod logging;

/// Model Context Protocol request processing and stdio transport
pub mod mcp;

/// OAuth 2.0 authorization server for the remote variant
pub mod oauth2_server;

/// Upstream advertising API clients
pub mod providers;

/// Hourly admission control for upstream requests
pub mod rate_limiting;

/// HTTP routes of the remote server
pub mod routes;

/// MCP tools, registry and dispatcher
pub mod tools;
