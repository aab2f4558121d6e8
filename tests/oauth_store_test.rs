// ABOUTME: Integration tests for the in-memory OAuth 2.0 store
// ABOUTME: Covers registration policy, single-use codes, PKCE, refresh identity, expiry and revocation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Integration tests for the OAuth store

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use common::{create_test_store, register_client};
use tiktok_ads_mcp::constants::oauth::TRUSTED_REDIRECT_URIS;
use tiktok_ads_mcp::errors::ErrorCode;
use tiktok_ads_mcp::oauth2_server::{
    pkce_challenge, ClientRegistration, CodeRequest, ExchangeRequest, NewClient, OAuthStore,
};

const CALLBACK: &str = "https://claude.ai/api/mcp/auth_callback";

fn code_for(store: &OAuthStore, client: &ClientRegistration, challenge: Option<String>) -> String {
    store
        .issue_code(CodeRequest {
            client_id: client.client_id.clone(),
            redirect_uri: CALLBACK.to_owned(),
            state: Some("xyz".to_owned()),
            code_challenge: challenge,
            ..CodeRequest::default()
        })
        .unwrap()
}

fn exchange_request(client: &ClientRegistration, code: &str) -> ExchangeRequest {
    ExchangeRequest {
        code: code.to_owned(),
        client_id: client.client_id.clone(),
        client_secret: client.client_secret.clone(),
        redirect_uri: CALLBACK.to_owned(),
        code_verifier: None,
    }
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_registration_issues_unique_credentials() {
    let (store, _clock) = create_test_store();
    let first = register_client(&store);
    let second = register_client(&store);

    assert_ne!(first.client_id, second.client_id);
    assert_ne!(first.client_secret, second.client_secret);
    assert!(first.client_id.starts_with("tiktok-ads-mcp-"));
    assert_eq!(store.counts().clients, 2);
}

#[test]
fn test_registration_requires_trusted_callback() {
    let (store, _clock) = create_test_store();
    let err = store
        .register(NewClient {
            client_name: "Rogue".to_owned(),
            redirect_uris: vec!["https://evil.example.com/callback".to_owned()],
            ..NewClient::default()
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert!(err.message.starts_with("Untrusted callback"));
    assert_eq!(store.counts().clients, 0);
}

#[test]
fn test_registration_accepts_mixed_callbacks() {
    let (store, _clock) = create_test_store();
    let client = store
        .register(NewClient {
            client_name: "Mixed".to_owned(),
            redirect_uris: vec![
                "http://localhost:3000/callback".to_owned(),
                TRUSTED_REDIRECT_URIS[1].to_owned(),
            ],
            scope: Some("read".to_owned()),
            ..NewClient::default()
        })
        .unwrap();
    assert_eq!(client.redirect_uris.len(), 2);

    // Any registered callback may be used once the client exists
    let code = store
        .issue_code(CodeRequest {
            client_id: client.client_id.clone(),
            redirect_uri: "http://localhost:3000/callback".to_owned(),
            ..CodeRequest::default()
        })
        .unwrap();
    assert!(store.contains_code(&code));
}

#[test]
fn test_registration_missing_fields() {
    let (store, _clock) = create_test_store();
    let err = store
        .register(NewClient {
            redirect_uris: vec![CALLBACK.to_owned()],
            ..NewClient::default()
        })
        .unwrap_err();
    assert_eq!(err.message, "Missing required field: client_name");

    let err = store
        .register(NewClient {
            client_name: "No callbacks".to_owned(),
            ..NewClient::default()
        })
        .unwrap_err();
    assert_eq!(err.message, "Missing required field: redirect_uris");
}

#[test]
fn test_custom_allow_list() {
    let (store, _clock) = create_test_store();
    let store = store.with_trusted_redirect_uris(vec!["https://assistant.example.com/cb".to_owned()]);

    assert!(store
        .register(NewClient {
            client_name: "Default callback".to_owned(),
            redirect_uris: vec![CALLBACK.to_owned()],
            ..NewClient::default()
        })
        .is_err());
    assert!(store
        .register(NewClient {
            client_name: "Custom callback".to_owned(),
            redirect_uris: vec!["https://assistant.example.com/cb".to_owned()],
            ..NewClient::default()
        })
        .is_ok());
}

// ============================================================================
// Authorization codes
// ============================================================================

#[test]
fn test_unknown_client_cannot_get_code() {
    let (store, _clock) = create_test_store();
    let err = store
        .issue_code(CodeRequest {
            client_id: "tiktok-ads-mcp-unknown".to_owned(),
            redirect_uri: CALLBACK.to_owned(),
            ..CodeRequest::default()
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidClient);
}

#[test]
fn test_unregistered_callback_rejected_at_authorization() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let err = store
        .issue_code(CodeRequest {
            client_id: client.client_id,
            redirect_uri: TRUSTED_REDIRECT_URIS[1].to_owned(),
            ..CodeRequest::default()
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRequest);
    assert_eq!(store.counts().codes, 0);
}

#[test]
fn test_plain_pkce_method_rejected() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let err = store
        .issue_code(CodeRequest {
            client_id: client.client_id,
            redirect_uri: CALLBACK.to_owned(),
            code_challenge: Some("challenge".to_owned()),
            code_challenge_method: Some("plain".to_owned()),
            ..CodeRequest::default()
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[test]
fn test_code_is_single_use() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let code = code_for(&store, &client, None);

    let tokens = store.exchange(&exchange_request(&client, &code)).unwrap();
    assert_eq!(tokens.token_type, "Bearer");
    assert_eq!(tokens.expires_in, 3600);
    assert_eq!(tokens.scope, "read");
    assert!(tokens.refresh_token.is_some());
    assert!(!store.contains_code(&code));

    let err = store.exchange(&exchange_request(&client, &code)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidGrant);
}

#[test]
fn test_code_expires_after_ten_minutes() {
    let (store, clock) = create_test_store();
    let client = register_client(&store);

    let fresh = code_for(&store, &client, None);
    clock.advance_secs(600);
    assert!(store.exchange(&exchange_request(&client, &fresh)).is_ok());

    let stale = code_for(&store, &client, None);
    clock.advance_secs(601);
    let err = store.exchange(&exchange_request(&client, &stale)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidGrant);
    assert_eq!(err.message, "Authorization code expired");
    assert!(!store.contains_code(&stale));
}

#[test]
fn test_issuing_sweeps_expired_codes() {
    let (store, clock) = create_test_store();
    let client = register_client(&store);
    let abandoned = code_for(&store, &client, None);

    clock.advance_secs(601);
    let current = code_for(&store, &client, None);

    assert!(!store.contains_code(&abandoned));
    assert!(store.contains_code(&current));
    assert_eq!(store.counts().codes, 1);
}

#[test]
fn test_exchange_checks() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let other = register_client(&store);
    let code = code_for(&store, &client, None);

    let mut wrong_secret = exchange_request(&client, &code);
    wrong_secret.client_secret = "not-the-secret".to_owned();
    assert_eq!(
        store.exchange(&wrong_secret).unwrap_err().code,
        ErrorCode::InvalidClient
    );

    let err = store.exchange(&exchange_request(&other, &code)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidGrant);

    let mut wrong_callback = exchange_request(&client, &code);
    wrong_callback.redirect_uri = TRUSTED_REDIRECT_URIS[1].to_owned();
    let err = store.exchange(&wrong_callback).unwrap_err();
    assert_eq!(err.message, "redirect_uri mismatch");

    // None of the failures above consumed the code
    assert!(store.exchange(&exchange_request(&client, &code)).is_ok());

    let err = store
        .exchange(&exchange_request(&client, "never-issued"))
        .unwrap_err();
    assert_eq!(err.message, "Unknown authorization code");
}

// ============================================================================
// PKCE
// ============================================================================

#[test]
fn test_pkce_round_trip() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    let code = code_for(&store, &client, Some(pkce_challenge(verifier)));

    let mut request = exchange_request(&client, &code);
    request.code_verifier = Some(verifier.to_owned());
    assert!(store.exchange(&request).is_ok());
}

#[test]
fn test_pkce_failures_consume_code() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);

    let code = code_for(&store, &client, Some(pkce_challenge("right-verifier")));
    let mut request = exchange_request(&client, &code);
    request.code_verifier = Some("wrong-verifier".to_owned());
    let err = store.exchange(&request).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidGrant);
    assert!(!store.contains_code(&code));

    let code = code_for(&store, &client, Some(pkce_challenge("right-verifier")));
    let err = store.exchange(&exchange_request(&client, &code)).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidGrant);

    let code = code_for(&store, &client, None);
    let mut request = exchange_request(&client, &code);
    request.code_verifier = Some("unexpected".to_owned());
    assert_eq!(
        store.exchange(&request).unwrap_err().code,
        ErrorCode::InvalidGrant
    );
}

// ============================================================================
// Tokens
// ============================================================================

#[test]
fn test_refresh_keeps_identity_and_replaces_access_token() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let code = code_for(&store, &client, None);
    let first = store.exchange(&exchange_request(&client, &code)).unwrap();
    let refresh = first.refresh_token.clone().unwrap();

    let mut previous = first.access_token;
    let mut seen = HashSet::from([previous.clone()]);
    for _ in 0..3 {
        let next = store.refresh(&refresh, &client.client_id).unwrap();
        assert_eq!(next.refresh_token.as_deref(), Some(refresh.as_str()));
        assert!(seen.insert(next.access_token.clone()));
        assert_eq!(
            store.validate(&previous).unwrap_err().code,
            ErrorCode::InvalidToken
        );
        let validated = store.validate(&next.access_token).unwrap();
        assert_eq!(validated.client_id, client.client_id);
        previous = next.access_token;
    }

    let counts = store.counts();
    assert_eq!(counts.access_tokens, 1);
    assert_eq!(counts.refresh_tokens, 1);
}

#[test]
fn test_refresh_and_revoke_are_bound_to_the_owning_client() {
    let (store, _clock) = create_test_store();
    let owner = register_client(&store);
    let other = register_client(&store);
    let code = code_for(&store, &owner, None);
    let tokens = store.exchange(&exchange_request(&owner, &code)).unwrap();
    let refresh = tokens.refresh_token.clone().unwrap();

    let err = store.refresh(&refresh, &other.client_id).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidGrant);
    assert!(store.validate(&tokens.access_token).is_ok());

    for token in [tokens.access_token.as_str(), refresh.as_str()] {
        let err = store.revoke_for_client(token, &other.client_id).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidGrant);
    }
    assert!(store.validate(&tokens.access_token).is_ok());

    assert!(!store.revoke_for_client("unknown", &other.client_id).unwrap());
    assert!(store.revoke_for_client(&refresh, &owner.client_id).unwrap());
    assert!(store.validate(&tokens.access_token).is_err());
}

#[test]
fn test_unknown_refresh_token() {
    let (store, _clock) = create_test_store();
    let err = store.refresh("nope", "tiktok-ads-mcp-anyone").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidGrant);
}

#[test]
fn test_access_token_expires_after_an_hour() {
    let (store, clock) = create_test_store();
    let client = register_client(&store);
    let code = code_for(&store, &client, None);
    let tokens = store.exchange(&exchange_request(&client, &code)).unwrap();

    clock.advance_secs(3600);
    assert!(store.validate(&tokens.access_token).is_ok());

    clock.advance_secs(1);
    let err = store.validate(&tokens.access_token).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidToken);

    // Validation purged the token and its refresh mapping
    assert!(!store.revoke(&tokens.access_token));
    assert!(store
        .refresh(tokens.refresh_token.as_deref().unwrap(), &client.client_id)
        .is_err());
    assert_eq!(store.counts().access_tokens, 0);
}

#[test]
fn test_revocation_is_idempotent() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let code = code_for(&store, &client, None);
    let tokens = store.exchange(&exchange_request(&client, &code)).unwrap();

    assert!(store.revoke(&tokens.access_token));
    assert!(!store.revoke(&tokens.access_token));
    assert!(store.validate(&tokens.access_token).is_err());
    assert!(store
        .refresh(tokens.refresh_token.as_deref().unwrap(), &client.client_id)
        .is_err());
}

#[test]
fn test_revoking_refresh_token_kills_access_token() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let code = code_for(&store, &client, None);
    let tokens = store.exchange(&exchange_request(&client, &code)).unwrap();

    assert!(store.revoke(tokens.refresh_token.as_deref().unwrap()));
    assert!(store.validate(&tokens.access_token).is_err());
    assert_eq!(store.counts().refresh_tokens, 0);
}

#[test]
fn test_explicit_sweeps() {
    let (store, clock) = create_test_store();
    let client = register_client(&store);
    let code = code_for(&store, &client, None);
    let tokens = store.exchange(&exchange_request(&client, &code)).unwrap();
    let _pending = code_for(&store, &client, None);

    clock.advance_secs(3601);
    assert_eq!(store.sweep_expired_codes(), 1);
    assert_eq!(store.sweep_expired_tokens(), 1);
    assert_eq!(store.sweep_expired_tokens(), 0);
    assert!(store.validate(&tokens.access_token).is_err());

    let counts = store.counts();
    assert_eq!(counts.codes, 0);
    assert_eq!(counts.access_tokens, 0);
    assert_eq!(counts.refresh_tokens, 0);
    assert_eq!(counts.clients, 1);
}

#[test]
fn test_concurrent_exchange_has_one_winner() {
    let (store, _clock) = create_test_store();
    let store = Arc::new(store);
    let client = register_client(&store);
    let code = code_for(&store, &client, None);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            let request = exchange_request(&client, &code);
            thread::spawn(move || store.exchange(&request).is_ok())
        })
        .collect();
    let winners = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|won| *won)
        .count();
    assert_eq!(winners, 1);
}

#[test]
fn test_tokens_are_unique() {
    let (store, _clock) = create_test_store();
    let client = register_client(&store);
    let mut seen = HashSet::new();
    for _ in 0..20 {
        let code = code_for(&store, &client, None);
        let tokens = store.exchange(&exchange_request(&client, &code)).unwrap();
        assert!(seen.insert(tokens.access_token));
        assert!(seen.insert(tokens.refresh_token.unwrap()));
    }
}
