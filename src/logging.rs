// ABOUTME: Logging configuration and structured logging setup for observability and debugging
// ABOUTME: Configures log levels, formatters, and the output stream for each transport
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration built on `tracing-subscriber`

use std::env;
use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::constants::service_names;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Output stream
    pub writer: LogWriter,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogWriter {
    /// Standard output (HTTP server)
    Stdout,
    /// Standard error (stdio transport, where stdout carries protocol messages)
    Stderr,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_spans: false,
            writer: LogWriter::Stdout,
            service_name: service_names::TIKTOK_ADS_MCP.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            writer: LogWriter::Stdout,
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::TIKTOK_ADS_MCP.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Override the log level
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Override the output stream
    #[must_use]
    pub const fn with_writer(mut self, writer: LogWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Override the output format
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the filter: `RUST_LOG` when set, otherwise the configured level,
    /// always with noise reduction for HTTP internals
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").map_or_else(
            |_| EnvFilter::new(&self.level),
            |directive| EnvFilter::new(&directive),
        );

        ["hyper=warn", "hyper::proto=warn", "reqwest=warn", "tower_http=info"]
            .into_iter()
            .fold(base, |filter, directive| {
                filter.add_directive(
                    directive
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::WARN.into()),
                )
            })
            .add_directive(
                format!("tiktok_ads_mcp={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            )
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match (self.format, self.writer) {
            (LogFormat::Json, LogWriter::Stdout) => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_span_events(span_events)
                        .with_writer(io::stdout),
                )
                .try_init()?,
            (LogFormat::Json, LogWriter::Stderr) => registry
                .with(
                    fmt::layer()
                        .json()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_span_events(span_events)
                        .with_writer(io::stderr),
                )
                .try_init()?,
            (LogFormat::Pretty, LogWriter::Stdout) => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_span_events(span_events)
                        .with_writer(io::stdout),
                )
                .try_init()?,
            (LogFormat::Pretty, LogWriter::Stderr) => registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_span_events(span_events)
                        .with_writer(io::stderr),
                )
                .try_init()?,
            (LogFormat::Compact, LogWriter::Stdout) => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stdout),
                )
                .try_init()?,
            (LogFormat::Compact, LogWriter::Stderr) => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .try_init()?,
        }

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "TikTok Ads MCP Server starting up"
        );

        Ok(())
    }
}

/// Initialize logging for the stdio transport, writing to stderr
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_for_stdio() -> Result<()> {
    LoggingConfig::from_env()
        .with_writer(LogWriter::Stderr)
        .init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = LoggingConfig::default()
            .with_level("debug")
            .with_writer(LogWriter::Stderr)
            .with_format(LogFormat::Json);
        assert_eq!(config.level, "debug");
        assert_eq!(config.writer, LogWriter::Stderr);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.service_name, "tiktok-ads-mcp");
    }
}
