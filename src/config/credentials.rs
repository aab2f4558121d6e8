// ABOUTME: Credential store for the upstream advertising API
// ABOUTME: Loads app id, secret and access token from the environment and reports missing ones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use crate::constants::env_config;
use crate::errors::{AppError, AppResult};

/// The upstream API credentials.
///
/// `Debug` output never includes the secret or the access token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Application id (`TIKTOK_APP_ID`)
    pub app_id: String,
    /// Application secret (`TIKTOK_SECRET`)
    pub secret: String,
    /// Long-lived access token (`TIKTOK_ACCESS_TOKEN`)
    pub access_token: String,
    /// Default advertiser (`TIKTOK_ADVERTISER_ID`)
    pub advertiser_id: Option<String>,
}

impl Credentials {
    /// Build credentials from explicit values
    #[must_use]
    pub fn new(
        app_id: impl Into<String>,
        secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            secret: secret.into(),
            access_token: access_token.into(),
            advertiser_id: None,
        }
    }

    /// Load credentials through a key lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).unwrap_or_default();
        Self {
            app_id: value(env_config::APP_ID),
            secret: value(env_config::SECRET),
            access_token: value(env_config::ACCESS_TOKEN),
            advertiser_id: lookup(env_config::ADVERTISER_ID)
                .filter(|id| !id.trim().is_empty()),
        }
    }

    /// Names of the required variables that are empty after trimming
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (env_config::APP_ID, &self.app_id),
            (env_config::SECRET, &self.secret),
            (env_config::ACCESS_TOKEN, &self.access_token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Whether every required credential is present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Fail with an authentication error naming the missing variables
    ///
    /// # Errors
    ///
    /// Returns `UpstreamAuthFailed` if any required credential is empty
    pub fn ensure_complete(&self) -> AppResult<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::upstream_auth(format!(
                "TikTok API credentials not configured. Missing: {}",
                missing.join(", ")
            )))
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("secret", &redacted(&self.secret))
            .field("access_token", &redacted(&self.access_token))
            .field("advertiser_id", &self.advertiser_id)
            .finish()
    }
}

const fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}
