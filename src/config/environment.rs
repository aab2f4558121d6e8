// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses upstream API, response cache and HTTP server settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::credentials::Credentials;
use crate::constants::{api, env_config, network};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Upstream advertising API client settings
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Whether the sandbox environment is targeted
    pub sandbox: bool,
    /// Base URL without version segment
    pub base_url: String,
    /// API version path segment
    pub api_version: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Request budget per hour
    pub rate_limit_per_hour: u32,
}

impl ApiConfig {
    /// Settings for the production or sandbox environment with default limits
    #[must_use]
    pub fn for_environment(sandbox: bool) -> Self {
        Self {
            sandbox,
            base_url: if sandbox {
                api::SANDBOX_BASE_URL.to_owned()
            } else {
                api::PRODUCTION_BASE_URL.to_owned()
            },
            api_version: api::API_VERSION.to_owned(),
            request_timeout: Duration::from_secs(api::DEFAULT_REQUEST_TIMEOUT_SECS),
            rate_limit_per_hour: api::DEFAULT_RATE_LIMIT_PER_HOUR,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_environment(false)
    }
}

/// File-based response cache settings
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Whether responses are cached
    pub enabled: bool,
    /// Directory holding one file per cached response
    pub directory: PathBuf,
    /// Entry lifetime in minutes
    pub ttl_minutes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from(network::DEFAULT_CACHE_DIR),
            ttl_minutes: api::CACHE_TTL_MINUTES,
        }
    }
}

/// Remote HTTP server settings
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Public base URL advertised in discovery documents
    pub issuer_url: String,
    /// Require a valid bearer token on MCP endpoints
    pub require_bearer: bool,
    /// Background expiry sweep interval, `None` keeps sweeps lazy only
    pub sweep_interval: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: network::DEFAULT_HOST.to_owned(),
            port: network::DEFAULT_PORT,
            issuer_url: format!("http://localhost:{}", network::DEFAULT_PORT),
            require_bearer: false,
            sweep_interval: None,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Upstream API credentials
    pub credentials: Credentials,
    /// Upstream API client settings
    pub api: ApiConfig,
    /// Response cache settings
    pub cache: CacheConfig,
    /// Remote HTTP server settings
    pub http: HttpConfig,
    /// Log level
    pub log_level: LogLevel,
}

/// Summary of the credential and client configuration, without secret values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthInfo {
    /// Whether every required credential is present
    pub has_credentials: bool,
    /// Names of the missing credential variables
    pub missing_credentials: Vec<String>,
    /// `TIKTOK_APP_ID` is set
    pub has_app_id: bool,
    /// `TIKTOK_SECRET` is set
    pub has_secret: bool,
    /// `TIKTOK_ACCESS_TOKEN` is set
    pub has_access_token: bool,
    /// `TIKTOK_ADVERTISER_ID` is set
    pub has_advertiser_id: bool,
    /// Sandbox environment targeted
    pub sandbox_mode: bool,
    /// Response cache enabled
    pub cache_enabled: bool,
    /// Response cache directory
    pub cache_dir: String,
    /// Requests per hour
    pub rate_limit: u32,
    /// Request timeout in seconds
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            debug!(error = %e, "No .env file loaded");
        }

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate();
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration through a key lookup function
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed or the
    /// upstream rate limit is zero
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sandbox = parse_bool(lookup(env_config::SANDBOX).as_deref(), false);
        let mut api_config = ApiConfig::for_environment(sandbox);
        api_config.request_timeout = Duration::from_secs(parse_or(
            &lookup,
            env_config::REQUEST_TIMEOUT,
            api::DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        api_config.rate_limit_per_hour = parse_or(
            &lookup,
            env_config::API_RATE_LIMIT,
            api::DEFAULT_RATE_LIMIT_PER_HOUR,
        )?;
        if api_config.rate_limit_per_hour == 0 {
            bail!(
                "{} must be at least 1 request per hour",
                env_config::API_RATE_LIMIT
            );
        }

        let cache = CacheConfig {
            enabled: parse_bool(lookup(env_config::CACHE_ENABLED).as_deref(), true),
            directory: lookup(env_config::CACHE_DIR)
                .filter(|dir| !dir.trim().is_empty())
                .map_or_else(|| PathBuf::from(network::DEFAULT_CACHE_DIR), PathBuf::from),
            ttl_minutes: api::CACHE_TTL_MINUTES,
        };

        let port = parse_or(&lookup, env_config::PORT, network::DEFAULT_PORT)?;
        let sweep_secs: u64 = parse_or(&lookup, env_config::OAUTH_SWEEP_INTERVAL_SECS, 0)?;
        let http = HttpConfig {
            host: lookup(env_config::HOST).unwrap_or_else(|| network::DEFAULT_HOST.to_owned()),
            port,
            issuer_url: lookup(env_config::OAUTH_ISSUER_URL)
                .map_or_else(
                    || format!("http://localhost:{port}"),
                    |url| url.trim_end_matches('/').to_owned(),
                ),
            require_bearer: parse_bool(lookup(env_config::OAUTH_REQUIRE_BEARER).as_deref(), false),
            sweep_interval: (sweep_secs > 0).then(|| Duration::from_secs(sweep_secs)),
        };

        Ok(Self {
            credentials: Credentials::from_lookup(&lookup),
            api: api_config,
            cache,
            http,
            log_level: LogLevel::from_str_or_default(
                &lookup(env_config::LOG_LEVEL).unwrap_or_default(),
            ),
        })
    }

    /// Log configuration problems that do not prevent startup
    pub fn validate(&self) {
        let missing = self.credentials.missing();
        if missing.is_empty() {
            info!("Configuration validated successfully");
        } else {
            warn!(
                missing = %missing.join(", "),
                "Missing credentials detected. Server will start but API calls will fail."
            );
        }
    }

    /// Credential and client summary without secret values
    #[must_use]
    pub fn auth_info(&self) -> AuthInfo {
        let creds = &self.credentials;
        let missing = creds.missing();
        AuthInfo {
            has_credentials: missing.is_empty(),
            missing_credentials: missing.into_iter().map(str::to_owned).collect(),
            has_app_id: !creds.app_id.trim().is_empty(),
            has_secret: !creds.secret.trim().is_empty(),
            has_access_token: !creds.access_token.trim().is_empty(),
            has_advertiser_id: creds.advertiser_id.is_some(),
            sandbox_mode: self.api.sandbox,
            cache_enabled: self.cache.enabled,
            cache_dir: self.cache.directory.display().to_string(),
            rate_limit: self.api.rate_limit_per_hour,
            request_timeout: self.api.request_timeout.as_secs(),
        }
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "TikTok Ads MCP Server Configuration:\n\
             - Credentials: {}\n\
             - API: {}/{}\n\
             - Sandbox: {}\n\
             - Rate Limit: {} requests/hour\n\
             - Request Timeout: {}s\n\
             - Response Cache: {}\n\
             - Bind: {}:{}\n\
             - Issuer: {}\n\
             - Log Level: {}",
            if self.credentials.is_complete() {
                "Complete"
            } else {
                "Incomplete"
            },
            self.api.base_url,
            self.api.api_version,
            self.api.sandbox,
            self.api.rate_limit_per_hour,
            self.api.request_timeout.as_secs(),
            if self.cache.enabled {
                "Enabled"
            } else {
                "Disabled"
            },
            self.http.host,
            self.http.port,
            self.http.issuer_url,
            self.log_level
        )
    }
}

/// Only the literal `true` (any case) enables a flag
fn parse_bool(value: Option<&str>, default: bool) -> bool {
    value.map_or(default, |v| v.trim().eq_ignore_ascii_case("true"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {key} value: {raw}")),
        _ => Ok(default),
    }
}
