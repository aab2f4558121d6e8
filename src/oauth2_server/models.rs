// ABOUTME: OAuth 2.0 data models for client registration, authorization and token exchange
// ABOUTME: Implements RFC 7591, RFC 6749 and RFC 7009 request/response structures and stored records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::oauth::{AUTH_METHOD_CLIENT_SECRET_BASIC, TOKEN_TYPE_BEARER};
use crate::errors::{AppError, ErrorCode};

/// OAuth 2.0 Client Registration Request (RFC 7591)
///
/// Every field is optional on the wire so that missing values surface as
/// `invalid_client_metadata` rather than a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientRegistrationRequest {
    /// Display name
    pub client_name: Option<String>,
    /// Callback URLs for the authorization code flow
    pub redirect_uris: Option<Vec<String>>,
    /// Grant types the client can use
    pub grant_types: Option<Vec<String>>,
    /// Response types the client can use
    pub response_types: Option<Vec<String>>,
    /// Requested scope
    pub scope: Option<String>,
}

/// OAuth 2.0 Client Registration Response (RFC 7591)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRegistrationResponse {
    /// Unique client identifier
    pub client_id: String,
    /// Client secret for authentication
    pub client_secret: String,
    /// Client name
    pub client_name: String,
    /// Redirect URIs registered for this client
    pub redirect_uris: Vec<String>,
    /// Grant types allowed for this client
    pub grant_types: Vec<String>,
    /// Response types allowed for this client
    pub response_types: Vec<String>,
    /// Always `client_secret_basic`
    pub token_endpoint_auth_method: String,
    /// Scope this client can request
    pub scope: String,
    /// Issue time in unix seconds
    pub client_id_issued_at: i64,
    /// `0` means the secret never expires
    pub client_secret_expires_at: i64,
}

/// OAuth 2.0 Authorization Request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorizeRequest {
    /// Response type, only `code` is supported
    pub response_type: Option<String>,
    /// Client identifier
    pub client_id: Option<String>,
    /// Redirect URI for the response
    pub redirect_uri: Option<String>,
    /// Requested scope
    pub scope: Option<String>,
    /// State parameter for CSRF protection
    pub state: Option<String>,
    /// PKCE code challenge (RFC 7636)
    pub code_challenge: Option<String>,
    /// PKCE code challenge method, only `S256`
    pub code_challenge_method: Option<String>,
    /// Resource indicator (RFC 8707), accepted and ignored
    pub resource: Option<String>,
}

/// OAuth 2.0 Token Request, form or JSON encoded
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRequest {
    /// `authorization_code` or `refresh_token`
    pub grant_type: Option<String>,
    /// Authorization code (for `authorization_code` grant)
    pub code: Option<String>,
    /// Redirect URI used when the code was issued
    pub redirect_uri: Option<String>,
    /// Client ID, unless sent with HTTP Basic
    pub client_id: Option<String>,
    /// Client secret, unless sent with HTTP Basic
    pub client_secret: Option<String>,
    /// Refresh token (for `refresh_token` grant)
    pub refresh_token: Option<String>,
    /// PKCE code verifier
    pub code_verifier: Option<String>,
}

/// OAuth 2.0 Token Revocation Request (RFC 7009)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RevokeRequest {
    /// Access or refresh token
    pub token: Option<String>,
    /// Optional hint, ignored because both kinds are tried
    pub token_type_hint: Option<String>,
    /// Client ID, unless sent with HTTP Basic
    pub client_id: Option<String>,
    /// Client secret, unless sent with HTTP Basic
    pub client_secret: Option<String>,
}

/// OAuth 2.0 Token Response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenResponse {
    /// Opaque access token
    pub access_token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    /// Refresh token linked to the access token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Granted scope
    pub scope: String,
}

/// OAuth 2.0 Error Response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OAuth2Error {
    /// Error code
    pub error: String,
    /// Human-readable error description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    /// URI for error information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,
}

impl OAuth2Error {
    /// Create an `invalid_request` error
    #[must_use]
    pub fn invalid_request(description: &str) -> Self {
        Self {
            error: "invalid_request".to_owned(),
            error_description: Some(description.to_owned()),
            error_uri: Some(
                "https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2.1".to_owned(),
            ),
        }
    }

    /// Create an `unsupported_grant_type` error
    #[must_use]
    pub fn unsupported_grant_type(grant_type: &str) -> Self {
        Self {
            error: "unsupported_grant_type".to_owned(),
            error_description: Some(format!("Unsupported grant type: {grant_type}")),
            error_uri: Some("https://datatracker.ietf.org/doc/html/rfc6749#section-5.2".to_owned()),
        }
    }
}

impl From<&AppError> for OAuth2Error {
    fn from(error: &AppError) -> Self {
        let uri = match error.code {
            ErrorCode::ValidationFailed => {
                "https://datatracker.ietf.org/doc/html/rfc7591#section-3.2.2"
            }
            ErrorCode::InvalidToken => "https://datatracker.ietf.org/doc/html/rfc6750#section-3.1",
            ErrorCode::InvalidRequest => {
                "https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2.1"
            }
            _ => "https://datatracker.ietf.org/doc/html/rfc6749#section-5.2",
        };
        Self {
            error: error.code.oauth_error().unwrap_or("server_error").to_owned(),
            error_description: Some(error.message.clone()),
            error_uri: Some(uri.to_owned()),
        }
    }
}

/// A registered OAuth client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRegistration {
    /// `tiktok-ads-mcp-` followed by random characters
    pub client_id: String,
    /// Random secret
    pub client_secret: String,
    /// Display name
    pub client_name: String,
    /// Registered callback URLs
    pub redirect_uris: Vec<String>,
    /// Allowed grant types
    pub grant_types: Vec<String>,
    /// Allowed response types
    pub response_types: Vec<String>,
    /// Requested scope
    pub scope: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// `None` when the registration never expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl ClientRegistration {
    /// RFC 7591 response body
    #[must_use]
    pub fn to_response(&self) -> ClientRegistrationResponse {
        ClientRegistrationResponse {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            client_name: self.client_name.clone(),
            redirect_uris: self.redirect_uris.clone(),
            grant_types: self.grant_types.clone(),
            response_types: self.response_types.clone(),
            token_endpoint_auth_method: AUTH_METHOD_CLIENT_SECRET_BASIC.to_owned(),
            scope: self.scope.clone(),
            client_id_issued_at: self.created_at.timestamp(),
            client_secret_expires_at: self.expires_at.map_or(0, |at| at.timestamp()),
        }
    }
}

/// A single-use authorization code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationCode {
    /// Opaque code value
    pub code: String,
    /// Client the code was issued to
    pub client_id: String,
    /// Callback URL the code was issued for
    pub redirect_uri: String,
    /// Granted scope
    pub scope: String,
    /// Caller supplied anti-forgery state
    pub state: Option<String>,
    /// S256 PKCE challenge
    pub code_challenge: Option<String>,
    /// Issue time
    pub created_at: DateTime<Utc>,
    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
}

impl AuthorizationCode {
    /// Whether the code has expired at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// An issued access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    /// Opaque token value
    pub token: String,
    /// Always `Bearer`
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: i64,
    /// Linked refresh token
    pub refresh_token: Option<String>,
    /// Granted scope
    pub scope: String,
    /// Client the token was issued to
    pub client_id: String,
    /// Issue time
    pub created_at: DateTime<Utc>,
}

impl AccessToken {
    /// Valid while `now <= created_at + expires_in`
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now <= self.created_at + Duration::seconds(self.expires_in)
    }

    /// Token endpoint response for this token
    #[must_use]
    pub fn to_response(&self) -> TokenResponse {
        TokenResponse {
            access_token: self.token.clone(),
            token_type: TOKEN_TYPE_BEARER.to_owned(),
            expires_in: self.expires_in,
            refresh_token: self.refresh_token.clone(),
            scope: self.scope.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oauth_error_from_app_error() {
        let error = OAuth2Error::from(&AppError::invalid_grant("unknown code"));
        assert_eq!(error.error, "invalid_grant");
        assert_eq!(error.error_description.as_deref(), Some("unknown code"));

        let error = OAuth2Error::from(&AppError::validation("redirect_uris is required"));
        assert_eq!(error.error, "invalid_client_metadata");

        let error = OAuth2Error::from(&AppError::internal("rng"));
        assert_eq!(error.error, "server_error");
    }

    #[test]
    fn test_token_validity_boundary() {
        let created_at = Utc::now();
        let token = AccessToken {
            token: "t".to_owned(),
            token_type: "Bearer".to_owned(),
            expires_in: 3600,
            refresh_token: None,
            scope: "read".to_owned(),
            client_id: "c".to_owned(),
            created_at,
        };
        assert!(token.is_valid_at(created_at + Duration::seconds(3600)));
        assert!(!token.is_valid_at(created_at + Duration::seconds(3601)));
    }
}
