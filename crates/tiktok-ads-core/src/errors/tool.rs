// ABOUTME: Tool-specific error types for the MCP tool registry and dispatcher
// ABOUTME: Provides structured errors that integrate with the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Tool Error Types
//!
//! Provides structured error types for tool-related operations:
//! - `ToolError` - Errors specific to tool lookup and argument validation
//! - Conversion to `AppError` so tool failures flow through the same
//!   result type as upstream API failures

use std::error::Error;
use std::fmt;

use super::{AppError, ErrorCode};

/// Errors specific to tool operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// Tool was not found in the registry
    NotFound {
        /// Name of the requested tool
        tool_name: String,
        /// Names of the registered tools
        available: Vec<String>,
    },
    /// Tool parameter validation failed
    InvalidParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Reason the parameter is invalid
        reason: String,
    },
    /// Required parameter is missing
    MissingParameter {
        /// Name of the tool
        tool_name: String,
        /// Name of the missing parameter
        parameter: String,
    },
}

impl ToolError {
    /// Create a "not found" error listing the valid tool names
    #[must_use]
    pub fn not_found(tool_name: impl Into<String>, available: Vec<String>) -> Self {
        Self::NotFound {
            tool_name: tool_name.into(),
            available,
        }
    }

    /// Create an "invalid parameter" error
    #[must_use]
    pub fn invalid_parameter(
        tool_name: impl Into<String>,
        parameter: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a "missing parameter" error
    #[must_use]
    pub fn missing_parameter(tool_name: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool_name: tool_name.into(),
            parameter: parameter.into(),
        }
    }

    /// Get the tool name associated with this error
    #[must_use]
    pub fn tool_name(&self) -> &str {
        match self {
            Self::NotFound { tool_name, .. }
            | Self::InvalidParameter { tool_name, .. }
            | Self::MissingParameter { tool_name, .. } => tool_name,
        }
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound {
                tool_name,
                available,
            } => {
                write!(
                    f,
                    "Unknown tool: {tool_name}. Available tools: {}",
                    available.join(", ")
                )
            }
            Self::InvalidParameter {
                parameter, reason, ..
            } => {
                write!(f, "Invalid parameter '{parameter}': {reason}")
            }
            Self::MissingParameter { parameter, .. } => {
                write!(f, "{parameter} is required")
            }
        }
    }
}

impl Error for ToolError {}

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        Self::new(ErrorCode::InvalidInput, error.to_string())
    }
}
