// ABOUTME: Upstream advertising API abstraction and its TikTok Business API implementation
// ABOUTME: Tools depend on the AdsApiProvider trait so tests can substitute the upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Upstream API Provider
//!
//! Tool functions never talk HTTP themselves. They build query parameters,
//! call an [`AdsApiProvider`], and reshape the JSON envelope it returns. The
//! provider owns authentication, status-code mapping, JSON parsing, the
//! response cache and the hourly request budget.
//!
//! A provider returns the full upstream envelope (`{code, message, data}`)
//! and only for `code == 0`; any other outcome is an `AppError` with code
//! `UpstreamAuthFailed` or `UpstreamApiError`.

/// TikTok Business API client
pub mod tiktok;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppResult;

pub use tiktok::TikTokClient;

/// Ordered query parameters
pub type QueryParams = Vec<(String, String)>;

/// Upstream advertising API
#[async_trait]
pub trait AdsApiProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Issue a GET request against a versioned endpoint such as `campaign/get/`
    ///
    /// # Errors
    ///
    /// Returns an upstream error on transport failure, HTTP error status,
    /// malformed body, or a non-zero API `code`
    async fn get(&self, endpoint: &str, params: QueryParams) -> AppResult<Value>;

    /// Issue a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Same failure modes as [`AdsApiProvider::get`]
    async fn post(&self, endpoint: &str, params: QueryParams, body: &Value) -> AppResult<Value>;
}
