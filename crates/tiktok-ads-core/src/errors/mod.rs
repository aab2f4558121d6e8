// ABOUTME: Unified error type, error codes and HTTP error bodies for the server
// ABOUTME: Maps OAuth and upstream failure kinds to stable machine-readable codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Centralized error handling for the TikTok Ads MCP server. Every fallible
//! operation in the library returns [`AppResult`], and each failure carries an
//! [`ErrorCode`] that fixes its HTTP status and, for OAuth failures, the
//! RFC 6749 error string sent on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tool-specific error types
pub mod tool;

pub use tool::ToolError;

/// Standard error codes used throughout the application
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // OAuth authorization server (1000-1999)
    /// Registration input is malformed or violates policy
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed = 1000,
    /// Unknown client identifier or bad client secret
    #[serde(rename = "INVALID_CLIENT")]
    InvalidClient = 1001,
    /// Request is malformed or the callback is not registered to the client
    #[serde(rename = "INVALID_REQUEST")]
    InvalidRequest = 1002,
    /// Authorization code or refresh token is absent, expired or mismatched
    #[serde(rename = "INVALID_GRANT")]
    InvalidGrant = 1003,
    /// Access token is absent or expired
    #[serde(rename = "INVALID_TOKEN")]
    InvalidToken = 1004,
    /// Grant type is not supported by the token endpoint
    #[serde(rename = "UNSUPPORTED_GRANT_TYPE")]
    UnsupportedGrantType = 1005,

    // Tool input validation (3000-3999)
    /// Tool arguments are invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,

    // Upstream advertising API (5000-5999)
    /// Upstream credentials are missing or rejected
    #[serde(rename = "UPSTREAM_AUTH_FAILED")]
    UpstreamAuthFailed = 5000,
    /// Upstream transport failure, non-zero status code or malformed response
    #[serde(rename = "UPSTREAM_API_ERROR")]
    UpstreamApiError = 5001,

    // Configuration (6000-6999)
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9001,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidGrant
            | Self::UnsupportedGrantType
            | Self::InvalidInput => 400,

            Self::InvalidClient | Self::InvalidToken => 401,

            Self::UpstreamAuthFailed | Self::UpstreamApiError => 502,

            Self::ConfigError | Self::InternalError | Self::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ValidationFailed => "The registration request is invalid",
            Self::InvalidClient => "Client authentication failed",
            Self::InvalidRequest => "The request is missing a parameter or is otherwise malformed",
            Self::InvalidGrant => "The provided authorization grant is invalid",
            Self::InvalidToken => "The access token is invalid or expired",
            Self::UnsupportedGrantType => "The grant type is not supported",
            Self::InvalidInput => "The provided input is invalid",
            Self::UpstreamAuthFailed => "Authentication with the advertising API failed",
            Self::UpstreamApiError => "The advertising API returned an error",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal server error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// RFC 6749 / RFC 7591 error string for OAuth failures
    #[must_use]
    pub const fn oauth_error(self) -> Option<&'static str> {
        match self {
            Self::ValidationFailed => Some("invalid_client_metadata"),
            Self::InvalidClient => Some("invalid_client"),
            Self::InvalidRequest | Self::InvalidInput => Some("invalid_request"),
            Self::InvalidGrant => Some("invalid_grant"),
            Self::InvalidToken => Some("invalid_token"),
            Self::UnsupportedGrantType => Some("unsupported_grant_type"),
            Self::UpstreamAuthFailed
            | Self::UpstreamApiError
            | Self::ConfigError
            | Self::InternalError
            | Self::SerializationError => None,
        }
    }
}

/// Unified error type for the application
#[derive(Debug, thiserror::Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Policy-violating or malformed client registration
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Unknown client or bad secret
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidClient, message)
    }

    /// Malformed OAuth request
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Bad authorization code or refresh token
    #[must_use]
    pub fn invalid_grant(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidGrant, message)
    }

    /// Absent or expired access token
    #[must_use]
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidToken, message)
    }

    /// Grant type other than `authorization_code` / `refresh_token`
    #[must_use]
    pub fn unsupported_grant_type(grant_type: &str) -> Self {
        Self::new(
            ErrorCode::UnsupportedGrantType,
            format!("Unsupported grant type: {grant_type}"),
        )
    }

    /// Invalid tool input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing or rejected upstream credentials
    #[must_use]
    pub fn upstream_auth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamAuthFailed, message)
    }

    /// Upstream API failure
    #[must_use]
    pub fn upstream_api(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamApiError, message)
    }

    /// Configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(
            ErrorCode::SerializationError,
            format!("JSON processing failed: {error}"),
        )
        .with_source(error)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorResponseDetails,
}

/// Body of an [`ErrorResponse`]
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    /// Stable machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message.clone(),
            },
        }
    }
}

#[cfg(feature = "http-response")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = http::StatusCode::from_u16(self.http_status())
            .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(code = ?self.code, error = %self.message, "Request failed");
        } else {
            tracing::debug!(code = ?self.code, error = %self.message, "Request rejected");
        }

        (status, axum::Json(ErrorResponse::from(&self))).into_response()
    }
}
