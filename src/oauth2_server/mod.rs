// ABOUTME: In-memory OAuth 2.0 authorization server for the remote MCP variant
// ABOUTME: RFC 7591 client registration, authorization codes with PKCE, token issuance and revocation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Time source for expiry
pub mod clock;
/// OAuth 2.0 data models and types
pub mod models;
/// OAuth 2.0 HTTP routes
pub mod routes;
/// Client, code and token state
pub mod store;

pub use clock::{Clock, SystemClock};
pub use models::{
    AccessToken, AuthorizationCode, ClientRegistration, ClientRegistrationResponse, OAuth2Error,
    TokenResponse,
};
pub use routes::OAuthRoutes;
pub use store::{pkce_challenge, CodeRequest, ExchangeRequest, NewClient, OAuthStore, StoreCounts};
