// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a manual clock, a recording fake provider and server resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `tiktok_ads_mcp`

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tiktok_ads_mcp::config::{Credentials, ServerConfig};
use tiktok_ads_mcp::constants::oauth::TRUSTED_REDIRECT_URIS;
use tiktok_ads_mcp::errors::{AppError, AppResult};
use tiktok_ads_mcp::mcp::ServerResources;
use tiktok_ads_mcp::oauth2_server::{Clock, ClientRegistration, NewClient, OAuthStore};
use tiktok_ads_mcp::providers::{AdsApiProvider, QueryParams};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Clock
// ============================================================================

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()),
        })
    }

    pub fn advance_secs(&self, secs: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::seconds(secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ============================================================================
// Upstream provider
// ============================================================================

/// One recorded upstream call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub endpoint: String,
    pub params: QueryParams,
    pub body: Option<Value>,
}

impl RecordedCall {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Provider answering from canned envelopes keyed by endpoint
#[derive(Debug, Default)]
pub struct FakeProvider {
    responses: Mutex<HashMap<String, AppResult<Value>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, endpoint: &str, envelope: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_owned(), Ok(envelope));
    }

    pub fn fail(&self, endpoint: &str, error: AppError) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_owned(), Err(error));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: RecordedCall) -> AppResult<Value> {
        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&call.endpoint)
            .map_or_else(
                || Ok(json!({"code": 0, "message": "OK", "data": {"list": []}})),
                |canned| match canned {
                    Ok(envelope) => Ok(envelope.clone()),
                    Err(error) => Err(AppError::new(error.code, error.message.clone())),
                },
            );
        self.calls.lock().unwrap().push(call);
        response
    }
}

#[async_trait]
impl AdsApiProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn get(&self, endpoint: &str, params: QueryParams) -> AppResult<Value> {
        self.answer(RecordedCall {
            method: "GET",
            endpoint: endpoint.to_owned(),
            params,
            body: None,
        })
    }

    async fn post(&self, endpoint: &str, params: QueryParams, body: &Value) -> AppResult<Value> {
        self.answer(RecordedCall {
            method: "POST",
            endpoint: endpoint.to_owned(),
            params,
            body: Some(body.clone()),
        })
    }
}

// ============================================================================
// Resources
// ============================================================================

/// Configuration with complete upstream credentials
pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.credentials = Credentials::new("test-app", "test-secret", "test-token");
    config.cache.enabled = false;
    config.http.issuer_url = "https://ads-mcp.example.com".to_owned();
    config
}

/// Resources over a fake provider and a manual clock
pub fn create_test_resources(
    config: ServerConfig,
) -> (Arc<ServerResources>, Arc<FakeProvider>, Arc<ManualClock>) {
    init_test_logging();
    let provider = FakeProvider::new();
    let clock = ManualClock::new();
    let resources = ServerResources::with_provider(config, provider.clone(), clock.clone());
    (Arc::new(resources), provider, clock)
}

/// Store driven by a manual clock
pub fn create_test_store() -> (OAuthStore, Arc<ManualClock>) {
    init_test_logging();
    let clock = ManualClock::new();
    (OAuthStore::new(clock.clone()), clock)
}

/// Register a client using the first trusted callback
pub fn register_client(store: &OAuthStore) -> ClientRegistration {
    store
        .register(NewClient {
            client_name: "Test Assistant".to_owned(),
            redirect_uris: vec![TRUSTED_REDIRECT_URIS[0].to_owned()],
            ..NewClient::default()
        })
        .unwrap()
}
