// ABOUTME: JSON-RPC error codes and shared error message constants
// ABOUTME: Standard JSON-RPC 2.0 error codes plus tool execution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Parse error - Invalid JSON
pub const ERROR_PARSE: i32 = -32700;
/// Invalid Request - Invalid JSON-RPC
pub const ERROR_INVALID_REQUEST: i32 = -32600;
/// Method not found
pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
/// Invalid params
pub const ERROR_INVALID_PARAMS: i32 = -32602;
/// Internal error
pub const ERROR_INTERNAL_ERROR: i32 = -32603;

/// Parse error message
pub const MSG_PARSE_ERROR: &str = "Parse error";
/// Invalid request message
pub const MSG_INVALID_REQUEST: &str = "Invalid Request";
/// Suggestion attached to every failed tool call
pub const MSG_TOOL_SUGGESTION: &str = "Please check your configuration and try again.";
/// Suggestion attached to tool calls failing on missing credentials
pub const MSG_CREDENTIALS_SUGGESTION: &str =
    "Set TIKTOK_APP_ID, TIKTOK_SECRET and TIKTOK_ACCESS_TOKEN environment variables.";
