// ABOUTME: Core types and constants for the TikTok Ads MCP server
// ABOUTME: Foundation crate with error handling and protocol constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # TikTok Ads Core
//!
//! Foundation crate providing shared types and constants for the TikTok Ads
//! MCP server. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `ToolError`
//! - **constants**: Protocol, OAuth and upstream API constants organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;
