// ABOUTME: In-memory OAuth 2.0 authorization server state
// ABOUTME: Client registry, single-use authorization codes, access tokens and refresh token mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth Store
//!
//! All four collections live behind one mutex. Every operation is a short
//! in-memory lookup or mutation, so the lock is never held across an await
//! point and concurrent exchanges of the same code serialize: exactly one
//! wins and the other sees `invalid_grant`.
//!
//! Expiry is enforced lazily. Issuing a code sweeps expired codes,
//! exchanging a code sweeps expired tokens, and validating an expired token
//! deletes it. [`OAuthStore::sweep_expired_codes`] and
//! [`OAuthStore::sweep_expired_tokens`] are public so a background task can
//! tighten eviction.
//!
//! A refresh token keeps its identity for its whole life and always points
//! at exactly one live access token. It dies together with that token
//! (revocation or expiry sweep).

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Duration;
use ring::rand::{SecureRandom, SystemRandom};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};

use super::clock::Clock;
use super::models::{AccessToken, AuthorizationCode, ClientRegistration, TokenResponse};
use crate::constants::oauth::{
    ACCESS_TOKEN_TTL_SECS, AUTHORIZATION_CODE_TTL_SECS, CLIENT_ID_PREFIX, CLIENT_ID_RANDOM_BYTES,
    DEFAULT_GRANT_TYPES, DEFAULT_RESPONSE_TYPES, DEFAULT_SCOPE, PKCE_METHOD_S256,
    SECRET_RANDOM_BYTES, TOKEN_TYPE_BEARER, TRUSTED_REDIRECT_URIS,
};
use crate::errors::{AppError, AppResult};

/// Input to [`OAuthStore::register`]
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    /// Display name, required
    pub client_name: String,
    /// Callback URLs, at least one must be trusted
    pub redirect_uris: Vec<String>,
    /// Defaults to `authorization_code` and `refresh_token`
    pub grant_types: Option<Vec<String>>,
    /// Defaults to `code`
    pub response_types: Option<Vec<String>>,
    /// Defaults to `read`
    pub scope: Option<String>,
}

/// Input to [`OAuthStore::issue_code`]
#[derive(Debug, Clone, Default)]
pub struct CodeRequest {
    /// Registered client
    pub client_id: String,
    /// One of the client's registered callback URLs
    pub redirect_uri: String,
    /// Defaults to `read`
    pub scope: Option<String>,
    /// Echoed back to the client
    pub state: Option<String>,
    /// PKCE challenge
    pub code_challenge: Option<String>,
    /// PKCE method, `S256` when a challenge is given without one
    pub code_challenge_method: Option<String>,
}

/// Input to [`OAuthStore::exchange`]
#[derive(Debug, Clone, Default)]
pub struct ExchangeRequest {
    /// Authorization code
    pub code: String,
    /// Client presenting the code
    pub client_id: String,
    /// Client secret, required
    pub client_secret: String,
    /// Callback URL the code was issued for
    pub redirect_uri: String,
    /// PKCE verifier, required when the code carries a challenge
    pub code_verifier: Option<String>,
}

/// Collection sizes, for health reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreCounts {
    /// Registered clients
    pub clients: usize,
    /// Outstanding authorization codes
    pub codes: usize,
    /// Stored access tokens
    pub access_tokens: usize,
    /// Live refresh tokens
    pub refresh_tokens: usize,
}

#[derive(Debug, Default)]
struct StoreState {
    clients: HashMap<String, ClientRegistration>,
    codes: HashMap<String, AuthorizationCode>,
    tokens: HashMap<String, AccessToken>,
    refresh: HashMap<String, String>,
}

impl StoreState {
    fn authenticate(&self, client_id: &str, client_secret: Option<&str>) -> AppResult<&ClientRegistration> {
        let client = self
            .clients
            .get(client_id)
            .ok_or_else(|| AppError::invalid_client("Unknown client_id"))?;
        if let Some(secret) = client_secret {
            let matches: bool = client
                .client_secret
                .as_bytes()
                .ct_eq(secret.as_bytes())
                .into();
            if !matches {
                return Err(AppError::invalid_client("Invalid client credentials"));
            }
        }
        Ok(client)
    }

    fn remove_token(&mut self, token: &str) -> Option<AccessToken> {
        let removed = self.tokens.remove(token)?;
        if let Some(refresh) = &removed.refresh_token {
            self.refresh.remove(refresh);
        }
        Some(removed)
    }

    fn sweep_codes(&mut self, now: chrono::DateTime<chrono::Utc>) -> usize {
        let before = self.codes.len();
        self.codes.retain(|_, code| !code.is_expired_at(now));
        before - self.codes.len()
    }

    fn sweep_tokens(&mut self, now: chrono::DateTime<chrono::Utc>) -> usize {
        let expired: Vec<String> = self
            .tokens
            .values()
            .filter(|token| !token.is_valid_at(now))
            .map(|token| token.token.clone())
            .collect();
        for token in &expired {
            self.remove_token(token);
        }
        expired.len()
    }
}

/// In-memory OAuth 2.0 authorization server state
pub struct OAuthStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
    rng: SystemRandom,
    trusted_redirect_uris: Vec<String>,
}

impl OAuthStore {
    /// Create a store trusting the default assistant callback URLs
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
            rng: SystemRandom::new(),
            trusted_redirect_uris: TRUSTED_REDIRECT_URIS.iter().map(|&uri| uri.to_owned()).collect(),
        }
    }

    /// Replace the trusted callback allow-list
    #[must_use]
    pub fn with_trusted_redirect_uris(mut self, uris: Vec<String>) -> Self {
        self.trusted_redirect_uris = uris;
        self
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("OAuth store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn random_string(&self, bytes: usize) -> AppResult<String> {
        let mut buffer = vec![0u8; bytes];
        self.rng.fill(&mut buffer).map_err(|_| {
            AppError::internal("System RNG failure - cannot generate secure random value")
        })?;
        Ok(URL_SAFE_NO_PAD.encode(buffer))
    }

    /// Register a client
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name or callback URLs are missing,
    /// or when no callback URL is on the trusted allow-list
    pub fn register(&self, request: NewClient) -> AppResult<ClientRegistration> {
        if request.client_name.trim().is_empty() {
            return Err(AppError::validation("Missing required field: client_name"));
        }
        if request.redirect_uris.is_empty() {
            return Err(AppError::validation("Missing required field: redirect_uris"));
        }
        if !request
            .redirect_uris
            .iter()
            .any(|uri| self.trusted_redirect_uris.contains(uri))
        {
            return Err(AppError::validation(
                "Untrusted callback: redirect_uris must include a trusted callback URL",
            ));
        }

        let client_id = format!(
            "{CLIENT_ID_PREFIX}{}",
            self.random_string(CLIENT_ID_RANDOM_BYTES)?
        );
        let client_secret = self.random_string(SECRET_RANDOM_BYTES)?;

        let registration = ClientRegistration {
            client_id: client_id.clone(),
            client_secret,
            client_name: request.client_name,
            redirect_uris: request.redirect_uris,
            grant_types: request
                .grant_types
                .unwrap_or_else(|| DEFAULT_GRANT_TYPES.iter().map(|&g| g.to_owned()).collect()),
            response_types: request
                .response_types
                .unwrap_or_else(|| DEFAULT_RESPONSE_TYPES.iter().map(|&r| r.to_owned()).collect()),
            scope: request.scope.unwrap_or_else(|| DEFAULT_SCOPE.to_owned()),
            created_at: self.clock.now(),
            expires_at: None,
        };

        self.lock()
            .clients
            .insert(client_id.clone(), registration.clone());
        info!(client_id = %client_id, client_name = %registration.client_name, "Registered OAuth client");
        Ok(registration)
    }

    /// Look up a client, checking the secret when one is supplied
    ///
    /// # Errors
    ///
    /// Returns `InvalidClient` for an unknown id or a mismatched secret
    pub fn lookup(&self, client_id: &str, client_secret: Option<&str>) -> AppResult<ClientRegistration> {
        self.lock()
            .authenticate(client_id, client_secret)
            .cloned()
    }

    /// Issue an authorization code
    ///
    /// # Errors
    ///
    /// Returns `InvalidClient` for an unknown client and `InvalidRequest` for
    /// an unregistered callback URL or an unsupported PKCE method
    pub fn issue_code(&self, request: CodeRequest) -> AppResult<String> {
        if request.code_challenge.is_some() {
            let method = request
                .code_challenge_method
                .as_deref()
                .unwrap_or(PKCE_METHOD_S256);
            if method != PKCE_METHOD_S256 {
                return Err(AppError::invalid_request(
                    "Unsupported code_challenge_method. Only S256 is supported.",
                ));
            }
        }

        let code = self.random_string(SECRET_RANDOM_BYTES)?;
        let now = self.clock.now();

        let mut state = self.lock();
        let client = state.authenticate(&request.client_id, None)?;
        if !client.redirect_uris.contains(&request.redirect_uri) {
            return Err(AppError::invalid_request(
                "redirect_uri is not registered for this client",
            ));
        }

        state.codes.insert(
            code.clone(),
            AuthorizationCode {
                code: code.clone(),
                client_id: request.client_id.clone(),
                redirect_uri: request.redirect_uri,
                scope: request.scope.unwrap_or_else(|| DEFAULT_SCOPE.to_owned()),
                state: request.state,
                code_challenge: request.code_challenge,
                created_at: now,
                expires_at: now + Duration::seconds(AUTHORIZATION_CODE_TTL_SECS),
            },
        );
        let swept = state.sweep_codes(now);
        drop(state);

        debug!(client_id = %request.client_id, swept, "Issued authorization code");
        Ok(code)
    }

    /// Exchange an authorization code for an access and refresh token pair
    ///
    /// Checks run in order: client credentials, code existence, code expiry
    /// (an expired code is deleted), client match, callback URL match, PKCE.
    ///
    /// # Errors
    ///
    /// Returns `InvalidClient` for bad client credentials and `InvalidGrant`
    /// for every code problem
    pub fn exchange(&self, request: &ExchangeRequest) -> AppResult<TokenResponse> {
        let access = self.random_string(SECRET_RANDOM_BYTES)?;
        let refresh = self.random_string(SECRET_RANDOM_BYTES)?;
        let now = self.clock.now();

        let mut state = self.lock();
        state.authenticate(&request.client_id, Some(&request.client_secret))?;

        let code = state
            .codes
            .get(&request.code)
            .cloned()
            .ok_or_else(|| AppError::invalid_grant("Unknown authorization code"))?;

        if code.is_expired_at(now) {
            state.codes.remove(&request.code);
            return Err(AppError::invalid_grant("Authorization code expired"));
        }
        if code.client_id != request.client_id {
            return Err(AppError::invalid_grant(
                "Authorization code was issued to another client",
            ));
        }
        if code.redirect_uri != request.redirect_uri {
            return Err(AppError::invalid_grant("redirect_uri mismatch"));
        }
        if let Err(e) = verify_pkce(code.code_challenge.as_deref(), request.code_verifier.as_deref()) {
            state.codes.remove(&request.code);
            return Err(e);
        }

        state.codes.remove(&request.code);
        let token = AccessToken {
            token: access.clone(),
            token_type: TOKEN_TYPE_BEARER.to_owned(),
            expires_in: ACCESS_TOKEN_TTL_SECS,
            refresh_token: Some(refresh.clone()),
            scope: code.scope,
            client_id: request.client_id.clone(),
            created_at: now,
        };
        let response = token.to_response();
        state.tokens.insert(access.clone(), token);
        state.refresh.insert(refresh, access);
        let swept = state.sweep_tokens(now);
        drop(state);

        info!(client_id = %request.client_id, swept, "Exchanged authorization code for tokens");
        Ok(response)
    }

    /// Issue a new access token for a refresh token
    ///
    /// The refresh token keeps its identity; the access token it pointed at
    /// is deleted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrant` for an unknown refresh token, when its access
    /// token is gone, or when it was issued to a different client
    pub fn refresh(&self, refresh_token: &str, client_id: &str) -> AppResult<TokenResponse> {
        let access = self.random_string(SECRET_RANDOM_BYTES)?;
        let now = self.clock.now();

        let mut state = self.lock();
        let current = state
            .refresh
            .get(refresh_token)
            .cloned()
            .ok_or_else(|| AppError::invalid_grant("Unknown refresh token"))?;
        let owner = state
            .tokens
            .get(&current)
            .map(|token| token.client_id.clone())
            .ok_or_else(|| AppError::invalid_grant("Refresh token has no active access token"))?;
        if owner != client_id {
            warn!(client_id = %client_id, owner = %owner, "Refresh attempted with another client's token");
            return Err(AppError::invalid_grant(
                "Refresh token was issued to another client",
            ));
        }
        let old = state.tokens.remove(&current).ok_or_else(|| {
            AppError::invalid_grant("Refresh token has no active access token")
        })?;

        let token = AccessToken {
            token: access.clone(),
            token_type: TOKEN_TYPE_BEARER.to_owned(),
            expires_in: ACCESS_TOKEN_TTL_SECS,
            refresh_token: Some(refresh_token.to_owned()),
            scope: old.scope,
            client_id: old.client_id,
            created_at: now,
        };
        let response = token.to_response();
        let client_id = token.client_id.clone();
        state.tokens.insert(access.clone(), token);
        state.refresh.insert(refresh_token.to_owned(), access);
        drop(state);

        info!(client_id = %client_id, "Refreshed access token");
        Ok(response)
    }

    /// Validate an access token
    ///
    /// # Errors
    ///
    /// Returns `InvalidToken` for an unknown or expired token; an expired
    /// token is deleted together with its refresh token
    pub fn validate(&self, access_token: &str) -> AppResult<AccessToken> {
        let now = self.clock.now();
        let mut state = self.lock();
        let token = state
            .tokens
            .get(access_token)
            .cloned()
            .ok_or_else(|| AppError::invalid_token("Unknown access token"))?;

        if !token.is_valid_at(now) {
            state.remove_token(access_token);
            debug!(client_id = %token.client_id, "Expired access token purged on validation");
            return Err(AppError::invalid_token("Access token expired"));
        }
        Ok(token)
    }

    /// Revoke an access or refresh token
    ///
    /// Returns `false` when the value is neither, including when it was
    /// already revoked.
    pub fn revoke(&self, token: &str) -> bool {
        let mut state = self.lock();
        Self::revoke_locked(&mut state, token)
    }

    /// Revoke a token on behalf of the client it was issued to
    ///
    /// Unknown tokens are not an error and return `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrant` when the token belongs to a different client;
    /// the token stays live
    pub fn revoke_for_client(&self, token: &str, client_id: &str) -> AppResult<bool> {
        let mut state = self.lock();
        let access = state
            .refresh
            .get(token)
            .map_or(token, String::as_str);
        let foreign_owner = state
            .tokens
            .get(access)
            .map(|t| t.client_id.clone())
            .filter(|owner| owner != client_id);
        if let Some(owner) = foreign_owner {
            warn!(client_id = %client_id, owner = %owner, "Revocation attempted for another client's token");
            return Err(AppError::invalid_grant("Token was issued to another client"));
        }
        Ok(Self::revoke_locked(&mut state, token))
    }

    fn revoke_locked(state: &mut StoreState, token: &str) -> bool {
        if state.remove_token(token).is_some() {
            debug!("Revoked access token");
            return true;
        }
        if let Some(access) = state.refresh.remove(token) {
            state.tokens.remove(&access);
            debug!("Revoked refresh token");
            return true;
        }
        false
    }

    /// Delete expired authorization codes, returning how many were removed
    pub fn sweep_expired_codes(&self) -> usize {
        let now = self.clock.now();
        self.lock().sweep_codes(now)
    }

    /// Delete expired access tokens and their refresh tokens, returning how
    /// many access tokens were removed
    pub fn sweep_expired_tokens(&self) -> usize {
        let now = self.clock.now();
        self.lock().sweep_tokens(now)
    }

    /// Whether an authorization code is still stored
    #[must_use]
    pub fn contains_code(&self, code: &str) -> bool {
        self.lock().codes.contains_key(code)
    }

    /// Collection sizes
    #[must_use]
    pub fn counts(&self) -> StoreCounts {
        let state = self.lock();
        StoreCounts {
            clients: state.clients.len(),
            codes: state.codes.len(),
            access_tokens: state.tokens.len(),
            refresh_tokens: state.refresh.len(),
        }
    }
}

impl fmt::Debug for OAuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthStore")
            .field("counts", &self.counts())
            .field("trusted_redirect_uris", &self.trusted_redirect_uris)
            .finish_non_exhaustive()
    }
}

/// S256 challenge for a verifier: base64url without padding of its SHA-256
#[must_use]
pub fn pkce_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

fn verify_pkce(challenge: Option<&str>, verifier: Option<&str>) -> AppResult<()> {
    match (challenge, verifier) {
        (None, None) => Ok(()),
        (None, Some(_)) => Err(AppError::invalid_grant(
            "code_verifier provided but no code_challenge was issued",
        )),
        (Some(_), None) => Err(AppError::invalid_grant("code_verifier is required (PKCE)")),
        (Some(challenge), Some(verifier)) => {
            let computed = pkce_challenge(verifier);
            if bool::from(computed.as_bytes().ct_eq(challenge.as_bytes())) {
                Ok(())
            } else {
                Err(AppError::invalid_grant("Invalid code_verifier"))
            }
        }
    }
}
