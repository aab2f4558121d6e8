// ABOUTME: Remote MCP server binary exposing the tool catalog and OAuth 2.0 endpoints over HTTP
// ABOUTME: Parses CLI overrides, validates credentials and serves the axum router until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # TikTok Ads MCP Remote Server Binary
//!
//! Serves MCP over HTTP for hosted assistants, with dynamic client
//! registration and token issuance so the assistant can connect.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tiktok_ads_mcp::{
    config::ServerConfig,
    constants::{env_config, service_names},
    logging::{LogFormat, LoggingConfig},
    mcp::ServerResources,
    oauth2_server::OAuthStore,
    routes::build_router,
};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(name = "tiktok-ads-mcp-remote")]
#[command(about = "Remote MCP server for TikTok Business API integration")]
struct Args {
    /// Bind host
    #[arg(long)]
    host: Option<String>,

    /// Bind port
    #[arg(long)]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,

    /// Start even when upstream credentials are missing
    #[arg(long)]
    no_validate: bool,

    /// Development mode: pretty logs at debug level
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = ServerConfig::from_env()?;

    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
        if env::var(env_config::OAUTH_ISSUER_URL).is_err() {
            config.http.issuer_url = format!("http://localhost:{port}");
        }
    }

    let level = if args.dev {
        "debug".to_owned()
    } else {
        args.log_level
            .unwrap_or_else(|| config.log_level.to_string())
    };
    let mut logging_config = LoggingConfig::from_env().with_level(level);
    logging_config.service_name = service_names::TIKTOK_ADS_MCP_REMOTE.to_owned();
    if args.dev {
        logging_config = logging_config.with_format(LogFormat::Pretty);
    }
    logging_config.init()?;

    if !args.no_validate && !config.credentials.is_complete() {
        for name in config.credentials.missing() {
            error!("Missing required TikTok API credential: {name}");
        }
        bail!("Environment validation failed. Server will not start.");
    }

    info!(summary = %config.summary(), "Configuration loaded");

    let resources = Arc::new(ServerResources::new(config.clone()));
    if let Some(interval) = config.http.sweep_interval {
        spawn_expiry_sweep(resources.oauth.clone(), interval);
    }

    let router = build_router(resources);
    let listener = TcpListener::bind((config.http.host.as_str(), config.http.port)).await?;
    info!(
        address = %listener.local_addr()?,
        issuer = %config.http.issuer_url,
        require_bearer = config.http.require_bearer,
        "TikTok Ads MCP remote server listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Periodically evict expired codes and tokens
fn spawn_expiry_sweep(store: Arc<OAuthStore>, period: Duration) {
    info!(interval_secs = period.as_secs(), "OAuth expiry sweep enabled");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let codes = store.sweep_expired_codes();
            let tokens = store.sweep_expired_tokens();
            debug!(codes, tokens, "OAuth expiry sweep completed");
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
