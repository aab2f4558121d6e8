// ABOUTME: Tests for loading server configuration from process environment variables
// ABOUTME: Runs serially because every test mutates the shared process environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment configuration tests

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::path::Path;
use std::time::Duration;

use serial_test::serial;
use tiktok_ads_mcp::config::ServerConfig;

const VARIABLES: &[&str] = &[
    "TIKTOK_APP_ID",
    "TIKTOK_SECRET",
    "TIKTOK_ACCESS_TOKEN",
    "TIKTOK_ADVERTISER_ID",
    "TIKTOK_SANDBOX",
    "TIKTOK_API_RATE_LIMIT",
    "TIKTOK_REQUEST_TIMEOUT",
    "TOKEN_CACHE_DIR",
    "TOKEN_CACHE_ENABLED",
    "PORT",
    "OAUTH_ISSUER_URL",
    "OAUTH_REQUIRE_BEARER",
    "OAUTH_SWEEP_INTERVAL_SECS",
];

fn clear_environment() {
    for key in VARIABLES {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_from_env_reads_credentials_and_overrides() {
    clear_environment();
    env::set_var("TIKTOK_APP_ID", "app");
    env::set_var("TIKTOK_SECRET", "secret");
    env::set_var("TIKTOK_ACCESS_TOKEN", "token");
    env::set_var("TIKTOK_ADVERTISER_ID", "adv-9");
    env::set_var("TIKTOK_SANDBOX", "true");
    env::set_var("TIKTOK_API_RATE_LIMIT", "250");
    env::set_var("TIKTOK_REQUEST_TIMEOUT", "12");
    env::set_var("TOKEN_CACHE_DIR", "/tmp/tiktok-cache");
    env::set_var("TOKEN_CACHE_ENABLED", "false");
    env::set_var("PORT", "9100");
    env::set_var("OAUTH_SWEEP_INTERVAL_SECS", "30");

    let config = ServerConfig::from_env().unwrap();
    clear_environment();

    assert!(config.credentials.is_complete());
    assert_eq!(config.credentials.advertiser_id.as_deref(), Some("adv-9"));
    assert_eq!(
        config.api.base_url,
        "https://sandbox-ads.tiktok.com/open_api"
    );
    assert_eq!(config.api.rate_limit_per_hour, 250);
    assert_eq!(config.api.request_timeout, Duration::from_secs(12));
    assert!(!config.cache.enabled);
    assert_eq!(config.cache.directory, Path::new("/tmp/tiktok-cache"));
    assert_eq!(config.http.port, 9100);
    assert_eq!(config.http.issuer_url, "http://localhost:9100");
    assert_eq!(config.http.sweep_interval, Some(Duration::from_secs(30)));
    assert!(!config.http.require_bearer);
}

#[test]
#[serial]
fn test_from_env_tolerates_missing_credentials() {
    clear_environment();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(
        config.credentials.missing(),
        vec!["TIKTOK_APP_ID", "TIKTOK_SECRET", "TIKTOK_ACCESS_TOKEN"]
    );
    assert!(!config.auth_info().has_credentials);
    assert!(config.cache.enabled);
    assert_eq!(config.http.sweep_interval, None);
}

#[test]
#[serial]
fn test_from_env_rejects_malformed_numbers() {
    clear_environment();
    env::set_var("TIKTOK_API_RATE_LIMIT", "plenty");

    let result = ServerConfig::from_env();
    clear_environment();

    assert!(result.is_err());
}
