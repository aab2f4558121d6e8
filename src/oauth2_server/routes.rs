// ABOUTME: OAuth 2.0 HTTP route handlers for the remote server
// ABOUTME: Discovery metadata, dynamic client registration, authorization, token and revocation endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! OAuth 2.0 authorization server routes
//!
//! - `GET /.well-known/oauth-authorization-server` (RFC 8414)
//! - `GET /.well-known/oauth-protected-resource` (RFC 9728)
//! - `POST /oauth/register` (RFC 7591)
//! - `GET /authorize` (RFC 6749 section 4.1.1, PKCE per RFC 7636)
//! - `POST /oauth/token` (form or JSON body, client credentials in body or HTTP Basic)
//! - `POST /oauth/revoke` (RFC 7009)

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};
use url::{form_urlencoded, Url};

use super::models::{
    AuthorizeRequest, ClientRegistrationRequest, OAuth2Error, RevokeRequest, TokenRequest,
};
use super::store::{CodeRequest, ExchangeRequest, NewClient};
use crate::constants::oauth::{
    AUTHORIZATION_PATH, AUTH_METHOD_CLIENT_SECRET_BASIC, GRANT_AUTHORIZATION_CODE,
    GRANT_REFRESH_TOKEN, PKCE_METHOD_S256, REGISTRATION_PATH, RESPONSE_TYPE_CODE,
    REVOCATION_PATH, SUPPORTED_SCOPES, TOKEN_PATH,
};
use crate::errors::{AppError, AppResult};
use crate::mcp::resources::ServerResources;

/// An [`AppError`] rendered as an RFC 6749 error body
#[derive(Debug)]
pub struct OAuthErrorResponse(pub AppError);

impl From<AppError> for OAuthErrorResponse {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for OAuthErrorResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = OAuth2Error::from(&self.0);
        if status.is_server_error() {
            warn!(error = %body.error, description = %self.0.message, "OAuth request failed");
        } else {
            debug!(error = %body.error, description = %self.0.message, "OAuth request rejected");
        }
        (status, Json(body)).into_response()
    }
}

type OAuthResult<T> = Result<T, OAuthErrorResponse>;

/// OAuth 2.0 routes implementation
pub struct OAuthRoutes;

impl OAuthRoutes {
    /// Create all OAuth routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/.well-known/oauth-authorization-server",
                get(Self::handle_authorization_server_metadata),
            )
            .route(
                "/.well-known/oauth-protected-resource",
                get(Self::handle_protected_resource_metadata),
            )
            .route(REGISTRATION_PATH, post(Self::handle_register))
            .route(AUTHORIZATION_PATH, get(Self::handle_authorize))
            .route(TOKEN_PATH, post(Self::handle_token))
            .route(REVOCATION_PATH, post(Self::handle_revoke))
            .with_state(resources)
    }

    /// Authorization server metadata (RFC 8414)
    async fn handle_authorization_server_metadata(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<Value> {
        let issuer = &resources.config.http.issuer_url;
        Json(json!({
            "issuer": issuer,
            "authorization_endpoint": format!("{issuer}{AUTHORIZATION_PATH}"),
            "token_endpoint": format!("{issuer}{TOKEN_PATH}"),
            "registration_endpoint": format!("{issuer}{REGISTRATION_PATH}"),
            "revocation_endpoint": format!("{issuer}{REVOCATION_PATH}"),
            "response_types_supported": [RESPONSE_TYPE_CODE],
            "grant_types_supported": [GRANT_AUTHORIZATION_CODE, GRANT_REFRESH_TOKEN],
            "token_endpoint_auth_methods_supported": [AUTH_METHOD_CLIENT_SECRET_BASIC],
            "scopes_supported": SUPPORTED_SCOPES,
            "code_challenge_methods_supported": [PKCE_METHOD_S256]
        }))
    }

    /// Protected resource metadata
    async fn handle_protected_resource_metadata(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<Value> {
        let issuer = &resources.config.http.issuer_url;
        Json(json!({
            "resource": issuer,
            "authorization_servers": [issuer],
            "scopes_supported": SUPPORTED_SCOPES,
            "bearer_methods_supported": ["header"]
        }))
    }

    /// Dynamic client registration (RFC 7591)
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> OAuthResult<Response> {
        let request: ClientRegistrationRequest = serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("Invalid registration request: {e}")))?;

        let registration = resources.oauth.register(NewClient {
            client_name: request.client_name.unwrap_or_default(),
            redirect_uris: request.redirect_uris.unwrap_or_default(),
            grant_types: request.grant_types,
            response_types: request.response_types,
            scope: request.scope,
        })?;

        Ok((StatusCode::CREATED, Json(registration.to_response())).into_response())
    }

    /// Authorization endpoint: issues a code and redirects back to the client
    async fn handle_authorize(
        State(resources): State<Arc<ServerResources>>,
        Query(request): Query<AuthorizeRequest>,
    ) -> OAuthResult<Response> {
        let response_type = request.response_type.as_deref().unwrap_or(RESPONSE_TYPE_CODE);
        if response_type != RESPONSE_TYPE_CODE {
            return Err(AppError::invalid_request(format!(
                "Unsupported response_type: {response_type}"
            ))
            .into());
        }
        let client_id = required(request.client_id, "client_id")?;
        let redirect_uri = required(request.redirect_uri, "redirect_uri")?;
        let mut location = Url::parse(&redirect_uri)
            .map_err(|e| AppError::invalid_request(format!("Invalid redirect_uri: {e}")))?;

        let code = resources.oauth.issue_code(CodeRequest {
            client_id: client_id.clone(),
            redirect_uri,
            scope: request.scope,
            state: request.state.clone(),
            code_challenge: request.code_challenge,
            code_challenge_method: request.code_challenge_method,
        })?;

        {
            let mut pairs = location.query_pairs_mut();
            pairs.append_pair("code", &code);
            if let Some(state) = &request.state {
                pairs.append_pair("state", state);
            }
        }

        info!(client_id = %client_id, "Authorization code issued, redirecting");
        let location = HeaderValue::from_str(location.as_str())
            .map_err(|e| AppError::internal(format!("Invalid redirect location: {e}")))?;
        Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
    }

    /// Token endpoint for the `authorization_code` and `refresh_token` grants
    async fn handle_token(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> OAuthResult<Response> {
        let request: TokenRequest = parse_body(&headers, &body)?;
        let basic = basic_credentials(&headers)?;
        let grant_type = required(request.grant_type, "grant_type")?;

        let token = match grant_type.as_str() {
            GRANT_AUTHORIZATION_CODE => {
                let (client_id, client_secret) =
                    client_credentials(basic, request.client_id, request.client_secret)
                        .ok_or_else(|| AppError::invalid_client("Client authentication required"))?;
                resources.oauth.exchange(&ExchangeRequest {
                    code: required(request.code, "code")?,
                    client_id,
                    client_secret,
                    redirect_uri: required(request.redirect_uri, "redirect_uri")?,
                    code_verifier: request.code_verifier,
                })?
            }
            GRANT_REFRESH_TOKEN => {
                let (client_id, client_secret) =
                    client_credentials(basic, request.client_id, request.client_secret)
                        .ok_or_else(|| AppError::invalid_client("Client authentication required"))?;
                resources.oauth.lookup(&client_id, Some(&client_secret))?;
                let refresh_token = required(request.refresh_token, "refresh_token")?;
                resources.oauth.refresh(&refresh_token, &client_id)?
            }
            other => return Err(AppError::unsupported_grant_type(other).into()),
        };

        Ok((
            [
                (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
                (header::PRAGMA, HeaderValue::from_static("no-cache")),
            ],
            Json(token),
        )
            .into_response())
    }

    /// Token revocation (RFC 7009)
    ///
    /// The caller must authenticate and may only revoke its own tokens.
    /// Unknown tokens still answer 200.
    async fn handle_revoke(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> OAuthResult<Response> {
        let request: RevokeRequest = parse_body(&headers, &body)?;
        let basic = basic_credentials(&headers)?;
        let (client_id, client_secret) =
            client_credentials(basic, request.client_id, request.client_secret)
                .ok_or_else(|| AppError::invalid_client("Client authentication required"))?;
        resources.oauth.lookup(&client_id, Some(&client_secret))?;

        let token = required(request.token, "token")?;
        let revoked = resources.oauth.revoke_for_client(&token, &client_id)?;
        debug!(revoked, "Token revocation processed");
        Ok((StatusCode::OK, Json(json!({}))).into_response())
    }
}

fn required(value: Option<String>, name: &str) -> AppResult<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::invalid_request(format!("Missing required parameter: {name}")))
}

/// Decode a JSON body when the content type says so, otherwise a form body
fn parse_body<T: DeserializeOwned>(headers: &HeaderMap, body: &[u8]) -> AppResult<T> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    if is_json {
        return serde_json::from_slice(body)
            .map_err(|e| AppError::invalid_request(format!("Invalid JSON body: {e}")));
    }

    let fields: Map<String, Value> = form_urlencoded::parse(body)
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect();
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| AppError::invalid_request(format!("Invalid form body: {e}")))
}

/// Client credentials from an `Authorization: Basic` header
fn basic_credentials(headers: &HeaderMap) -> AppResult<Option<(String, String)>> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let Some(encoded) = value
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Basic "))
    else {
        return Ok(None);
    };

    let decoded = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| AppError::invalid_client("Malformed Basic authorization header"))?;
    let (client_id, client_secret) = decoded
        .split_once(':')
        .ok_or_else(|| AppError::invalid_client("Malformed Basic authorization header"))?;
    Ok(Some((client_id.to_owned(), client_secret.to_owned())))
}

/// Basic credentials win over body credentials
fn client_credentials(
    basic: Option<(String, String)>,
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Option<(String, String)> {
    basic.or_else(|| match (client_id, client_secret) {
        (Some(id), Some(secret)) if !id.is_empty() => Some((id, secret)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_body_parsing() {
        let headers = HeaderMap::new();
        let request: TokenRequest =
            parse_body(&headers, b"grant_type=refresh_token&refresh_token=abc%2Fdef").unwrap();
        assert_eq!(request.grant_type.as_deref(), Some("refresh_token"));
        assert_eq!(request.refresh_token.as_deref(), Some("abc/def"));
        assert!(request.code.is_none());
    }

    #[test]
    fn test_json_body_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        let request: TokenRequest =
            parse_body(&headers, br#"{"grant_type":"authorization_code","code":"c"}"#).unwrap();
        assert_eq!(request.code.as_deref(), Some("c"));
    }

    #[test]
    fn test_basic_credentials() {
        let mut headers = HeaderMap::new();
        assert!(basic_credentials(&headers).unwrap().is_none());

        let encoded = STANDARD.encode("client:secret");
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Basic {encoded}")).unwrap(),
        );
        assert_eq!(
            basic_credentials(&headers).unwrap(),
            Some(("client".to_owned(), "secret".to_owned()))
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic !!!"));
        assert!(basic_credentials(&headers).is_err());
    }

    #[test]
    fn test_basic_credentials_win_over_body() {
        let chosen = client_credentials(
            Some(("basic".to_owned(), "s1".to_owned())),
            Some("body".to_owned()),
            Some("s2".to_owned()),
        );
        assert_eq!(chosen, Some(("basic".to_owned(), "s1".to_owned())));
        assert_eq!(client_credentials(None, Some("id".to_owned()), None), None);
    }
}
