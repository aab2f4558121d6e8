// ABOUTME: MCP tools exposing the TikTok Business API
// ABOUTME: Tool trait, registry, dispatcher, projection tables and the six tool implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tools
//!
//! - `traits` - [`McpTool`] trait
//! - `registry` - [`ToolRegistry`] and the error-boundary [`ToolDispatcher`]
//! - `fields` - record projection tables
//! - `params` - argument decoding and query helpers
//! - `implementations` - business centers, ad accounts, campaigns, ad groups, ads, reports

/// Tool execution context
pub mod context;
/// Record projection tables
pub mod fields;
/// Tool implementations
pub mod implementations;
/// Argument helpers
pub mod params;
/// Tool registry and dispatcher
pub mod registry;
/// Tool results
pub mod result;
/// Tool trait
pub mod traits;

pub use context::ToolExecutionContext;
pub use registry::{ToolDispatcher, ToolRegistry};
pub use result::{TextContent, ToolCallResult, ToolResult};
pub use traits::McpTool;
