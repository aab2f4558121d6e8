// ABOUTME: OAuth 2.0 authorization server constants
// ABOUTME: Lifetimes, trusted callbacks, supported grants, scopes and PKCE methods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Callback URLs a registering client must include at least one of
pub const TRUSTED_REDIRECT_URIS: &[&str] = &[
    "https://claude.ai/api/mcp/auth_callback",
    "https://claude.com/api/mcp/auth_callback",
];

/// Authorization code lifetime in seconds
pub const AUTHORIZATION_CODE_TTL_SECS: i64 = 600;
/// Access token lifetime in seconds
pub const ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// Token type of issued access tokens
pub const TOKEN_TYPE_BEARER: &str = "Bearer";
/// Scope granted when none is requested
pub const DEFAULT_SCOPE: &str = "read";
/// Scopes advertised in discovery documents
pub const SUPPORTED_SCOPES: &[&str] = &["read"];

/// Authorization code grant
pub const GRANT_AUTHORIZATION_CODE: &str = "authorization_code";
/// Refresh token grant
pub const GRANT_REFRESH_TOKEN: &str = "refresh_token";
/// Grant types assigned when a registration omits them
pub const DEFAULT_GRANT_TYPES: &[&str] = &[GRANT_AUTHORIZATION_CODE, GRANT_REFRESH_TOKEN];

/// Authorization code response type
pub const RESPONSE_TYPE_CODE: &str = "code";
/// Response types assigned when a registration omits them
pub const DEFAULT_RESPONSE_TYPES: &[&str] = &[RESPONSE_TYPE_CODE];

/// Token endpoint authentication method
pub const AUTH_METHOD_CLIENT_SECRET_BASIC: &str = "client_secret_basic";
/// The only accepted PKCE challenge method
pub const PKCE_METHOD_S256: &str = "S256";

/// Prefix of generated client identifiers
pub const CLIENT_ID_PREFIX: &str = "tiktok-ads-mcp-";
/// Random bytes in a generated client identifier
pub const CLIENT_ID_RANDOM_BYTES: usize = 16;
/// Random bytes in secrets, codes and tokens
pub const SECRET_RANDOM_BYTES: usize = 32;

/// Registration endpoint path
pub const REGISTRATION_PATH: &str = "/oauth/register";
/// Authorization endpoint path
pub const AUTHORIZATION_PATH: &str = "/authorize";
/// Token endpoint path
pub const TOKEN_PATH: &str = "/oauth/token";
/// Revocation endpoint path
pub const REVOCATION_PATH: &str = "/oauth/revoke";
