// ABOUTME: Centralized resource container shared by the MCP transports and HTTP routes
// ABOUTME: Holds configuration, the tool dispatcher, the upstream client and the OAuth store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources Module
//!
//! Built once at startup and shared behind an `Arc`, so handlers never
//! recreate the HTTP client, the response cache or the OAuth state.

use std::fmt;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::oauth2_server::{Clock, OAuthStore, SystemClock};
use crate::providers::{AdsApiProvider, TikTokClient};
use crate::rate_limiting::RateLimitStatus;
use crate::tools::{ToolDispatcher, ToolRegistry};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Tool registry and dispatcher
    pub dispatcher: ToolDispatcher,
    /// OAuth authorization server state
    pub oauth: Arc<OAuthStore>,
    client: Option<Arc<TikTokClient>>,
}

impl ServerResources {
    /// Build resources around the TikTok API client
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let client = Arc::new(TikTokClient::from_config(&config));
        let provider: Arc<dyn AdsApiProvider> = client.clone();
        let mut resources = Self::with_provider(config, provider, Arc::new(SystemClock));
        resources.client = Some(client);
        resources
    }

    /// Build resources around any provider and clock
    #[must_use]
    pub fn with_provider(
        config: ServerConfig,
        provider: Arc<dyn AdsApiProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let dispatcher = ToolDispatcher::new(
            Arc::new(ToolRegistry::with_builtin_tools()),
            provider,
            config.credentials.clone(),
        );
        Self {
            config: Arc::new(config),
            dispatcher,
            oauth: Arc::new(OAuthStore::new(clock)),
            client: None,
        }
    }

    /// Upstream request budget, when backed by the TikTok client
    #[must_use]
    pub fn rate_limit_status(&self) -> Option<RateLimitStatus> {
        self.client.as_ref().map(|client| client.rate_limit_status())
    }

    /// Cache directory state `(exists, writable)`, when backed by the TikTok client
    pub async fn cache_probe(&self) -> Option<(bool, bool)> {
        match &self.client {
            Some(client) => Some(client.cache().probe().await),
            None => None,
        }
    }
}

impl fmt::Debug for ServerResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerResources")
            .field("dispatcher", &self.dispatcher)
            .field("oauth", &self.oauth)
            .finish_non_exhaustive()
    }
}
