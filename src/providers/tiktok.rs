// ABOUTME: TikTok Business API client over reqwest with status mapping and envelope checks
// ABOUTME: Applies the hourly request budget and the file response cache to GET requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use super::{AdsApiProvider, QueryParams};
use crate::cache::{CacheKey, FileCache};
use crate::config::{ApiConfig, Credentials, ServerConfig};
use crate::constants::api;
use crate::errors::{AppError, AppResult};
use crate::rate_limiting::{HourlyRateLimiter, RateLimitStatus};

/// TikTok Business API client
#[derive(Debug, Clone)]
pub struct TikTokClient {
    http: Client,
    credentials: Credentials,
    config: ApiConfig,
    cache: FileCache,
    limiter: HourlyRateLimiter,
}

impl TikTokClient {
    /// Create a client from server configuration
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.credentials.clone(),
            config.api.clone(),
            FileCache::new(&config.cache),
        )
    }

    /// Create a client from its parts
    #[must_use]
    pub fn new(credentials: Credentials, config: ApiConfig, cache: FileCache) -> Self {
        let http = ClientBuilder::new()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        let limiter = HourlyRateLimiter::new(config.rate_limit_per_hour);

        info!(
            base_url = %config.base_url,
            sandbox = config.sandbox,
            cache_enabled = cache.is_enabled(),
            "TikTok API client initialized"
        );

        Self {
            http,
            credentials,
            config,
            cache,
            limiter,
        }
    }

    /// Current usage of the hourly request budget
    #[must_use]
    pub fn rate_limit_status(&self) -> RateLimitStatus {
        self.limiter.status()
    }

    /// Response cache used by GET requests
    #[must_use]
    pub const fn cache(&self) -> &FileCache {
        &self.cache
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            endpoint
        )
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        mut params: QueryParams,
        body: Option<&Value>,
    ) -> AppResult<Value> {
        self.credentials.ensure_complete()?;

        let endpoint = endpoint.trim_start_matches('/');
        if endpoint.contains(api::OAUTH_ENDPOINT_MARKER) {
            params.push(("app_id".to_owned(), self.credentials.app_id.clone()));
            params.push(("secret".to_owned(), self.credentials.secret.clone()));
        }

        let cache_key = (method == Method::GET).then(|| CacheKey::new("GET", endpoint, &params));
        if let Some(key) = &cache_key {
            if let Some(cached) = self.cache.get(key).await {
                return Ok(cached);
            }
        }

        self.limiter.acquire().await;

        let url = self.url_for(endpoint);
        debug!(
            method = %method,
            url = %url,
            params = ?params.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            "Sending TikTok API request"
        );

        let mut builder = self
            .http
            .request(method, &url)
            .header(api::ACCESS_TOKEN_HEADER, &self.credentials.access_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !params.is_empty() {
            builder = builder.query(&params);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(&e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;
        debug!(status = status.as_u16(), "TikTok API response received");

        let envelope = parse_envelope(status, &text)?;

        if let Some(key) = &cache_key {
            self.cache.set(key, &envelope).await;
        }
        Ok(envelope)
    }

    fn transport_error(&self, error: &reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::upstream_api(format!(
                "Request timeout after {} seconds",
                self.config.request_timeout.as_secs()
            ))
        } else if error.is_connect() {
            AppError::upstream_api("Connection error - please check your internet connection")
        } else {
            AppError::upstream_api(format!("Request failed: {error}"))
        }
    }
}

/// Map an HTTP status and body to the upstream envelope or an error
fn parse_envelope(status: StatusCode, text: &str) -> AppResult<Value> {
    match status {
        StatusCode::UNAUTHORIZED => {
            return Err(AppError::upstream_auth(
                "Invalid access token or credentials",
            ))
        }
        StatusCode::FORBIDDEN => {
            return Err(AppError::upstream_api(
                "Access forbidden - check your API permissions",
            ))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            return Err(AppError::upstream_api(
                "Rate limit exceeded - please try again later",
            ))
        }
        s if s.as_u16() >= 400 => {
            return Err(AppError::upstream_api(format!(
                "HTTP {}: {text}",
                s.as_u16()
            )))
        }
        _ => {}
    }

    let envelope: Value = serde_json::from_str(text)
        .map_err(|_| AppError::upstream_api(format!("Invalid JSON response: {text}")))?;

    let code = envelope.get("code").and_then(Value::as_i64);
    if code != Some(0) {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown API error");
        let code = code.map_or_else(|| "unknown".to_owned(), |c| c.to_string());
        return Err(AppError::upstream_api(format!(
            "TikTok API error {code}: {message}"
        )));
    }

    Ok(envelope)
}

#[async_trait]
impl AdsApiProvider for TikTokClient {
    fn name(&self) -> &'static str {
        "tiktok"
    }

    async fn get(&self, endpoint: &str, params: QueryParams) -> AppResult<Value> {
        self.request(Method::GET, endpoint, params, None).await
    }

    async fn post(&self, endpoint: &str, params: QueryParams, body: &Value) -> AppResult<Value> {
        self.request(Method::POST, endpoint, params, Some(body)).await
    }
}

#[cfg(test)]
mod tests {
    use tiktok_ads_core::errors::ErrorCode;

    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = parse_envelope(StatusCode::UNAUTHORIZED, "").unwrap_err();
        assert_eq!(err.code, ErrorCode::UpstreamAuthFailed);
        assert_eq!(err.message, "Invalid access token or credentials");

        let err = parse_envelope(StatusCode::FORBIDDEN, "").unwrap_err();
        assert_eq!(err.message, "Access forbidden - check your API permissions");

        let err = parse_envelope(StatusCode::TOO_MANY_REQUESTS, "").unwrap_err();
        assert_eq!(err.message, "Rate limit exceeded - please try again later");

        let err = parse_envelope(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        assert_eq!(err.message, "HTTP 502: upstream down");
    }

    #[test]
    fn test_envelope_checks() {
        let err = parse_envelope(StatusCode::OK, "<html>").unwrap_err();
        assert_eq!(err.message, "Invalid JSON response: <html>");

        let err = parse_envelope(StatusCode::OK, r#"{"code":40001,"message":"bad"}"#).unwrap_err();
        assert_eq!(err.message, "TikTok API error 40001: bad");

        let err = parse_envelope(StatusCode::OK, r#"{"code":40100}"#).unwrap_err();
        assert_eq!(err.message, "TikTok API error 40100: Unknown API error");

        let ok = parse_envelope(StatusCode::OK, r#"{"code":0,"data":{"list":[]}}"#).unwrap();
        assert_eq!(ok["data"]["list"], serde_json::json!([]));
    }

    #[test]
    fn test_url_construction() {
        let mut config = ApiConfig::for_environment(true);
        config.base_url.push('/');
        let client = TikTokClient::new(
            Credentials::new("a", "s", "t"),
            config,
            FileCache::disabled(),
        );
        assert_eq!(
            client.url_for("bc/get/"),
            "https://sandbox-ads.tiktok.com/open_api/v1.3/bc/get/"
        );
    }
}
