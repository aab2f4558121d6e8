// ABOUTME: Integration tests for MCP request processing and the stdio transport
// ABOUTME: Exercises initialize, tools/list, tools/call, notifications and JSON-RPC error codes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! MCP protocol integration tests

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use common::{create_test_resources, test_config, FakeProvider};
use serde_json::{json, Value};
use tiktok_ads_mcp::config::{Credentials, ServerConfig};
use tiktok_ads_mcp::errors::AppError;
use tiktok_ads_mcp::jsonrpc::JsonRpcResponse;
use tiktok_ads_mcp::mcp::{McpRequestProcessor, StdioTransport};

fn processor_with(config: ServerConfig) -> (McpRequestProcessor, Arc<FakeProvider>) {
    let (resources, provider, _clock) = create_test_resources(config);
    (McpRequestProcessor::new(resources), provider)
}

async fn call(processor: &McpRequestProcessor, message: Value) -> JsonRpcResponse {
    processor.handle_value(message).await.unwrap()
}

/// Tool payload decoded from the single text content block
fn tool_payload(response: &JsonRpcResponse) -> (Value, bool) {
    let result = response.result.as_ref().unwrap();
    let content = result["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["type"], "text");
    let payload = serde_json::from_str(content[0]["text"].as_str().unwrap()).unwrap();
    (payload, result["isError"].as_bool().unwrap())
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_initialize_reports_capabilities() {
    let (processor, _provider) = processor_with(test_config());
    let response = call(
        &processor,
        json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
    )
    .await;

    let result = response.result.unwrap();
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "tiktok-ads-mcp");
    assert_eq!(result["capabilities"]["tools"]["listChanged"], true);
    assert_eq!(response.id, Some(json!(1)));
}

#[tokio::test]
async fn test_ping_and_notifications() {
    let (processor, _provider) = processor_with(test_config());
    let response = call(&processor, json!({"jsonrpc": "2.0", "id": "p", "method": "ping"})).await;
    assert_eq!(response.result, Some(json!({})));

    assert!(processor
        .handle_value(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
        .await
        .is_none());
    assert!(processor
        .handle_value(json!({"jsonrpc": "2.0", "method": "tools/list"}))
        .await
        .is_none());
}

#[tokio::test]
async fn test_tools_list_names_all_six_tools() {
    let (processor, _provider) = processor_with(test_config());
    let response = call(&processor, json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;

    let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();
    let mut names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    names.sort_unstable();
    assert_eq!(
        names,
        vec![
            "get_ad_groups",
            "get_ads",
            "get_authorized_ad_accounts",
            "get_business_centers",
            "get_campaigns",
            "get_reports",
        ]
    );
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
}

// ============================================================================
// JSON-RPC errors
// ============================================================================

#[tokio::test]
async fn test_protocol_errors() {
    let (processor, _provider) = processor_with(test_config());

    let response = call(&processor, json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"})).await;
    let error = response.error.unwrap();
    assert_eq!(error.code, -32601);
    assert_eq!(error.message, "Method not found: resources/list");

    let response = call(&processor, json!({"jsonrpc": "1.0", "id": 4, "method": "ping"})).await;
    assert_eq!(response.error.unwrap().code, -32600);
    assert_eq!(response.id, Some(json!(4)));

    let response = call(&processor, json!({"id": 5, "params": []})).await;
    assert_eq!(response.error.unwrap().code, -32600);
    assert_eq!(response.id, Some(json!(5)));

    let response = call(
        &processor,
        json!({"jsonrpc": "2.0", "id": 6, "method": "tools/call", "params": {"arguments": {}}}),
    )
    .await;
    let error = response.error.unwrap();
    assert_eq!(error.code, -32602);
    assert_eq!(error.message, "Missing tool name in tools/call params");

    let response = call(
        &processor,
        json!({"jsonrpc": "2.0", "id": 7, "method": "tools/call", "params": "get_ads"}),
    )
    .await;
    assert_eq!(response.error.unwrap().code, -32602);
}

// ============================================================================
// Tool calls
// ============================================================================

#[tokio::test]
async fn test_tool_call_success_payload() {
    let (processor, provider) = processor_with(test_config());
    provider.respond(
        "campaign/get/",
        json!({"code": 0, "data": {"list": [{"campaign_id": "c1", "campaign_name": "Spring"}]}}),
    );

    let response = call(
        &processor,
        json!({
            "jsonrpc": "2.0", "id": 8, "method": "tools/call",
            "params": {"name": "get_campaigns", "arguments": {"advertiser_id": "adv-1"}}
        }),
    )
    .await;

    let (payload, is_error) = tool_payload(&response);
    assert!(!is_error);
    assert_eq!(payload["success"], true);
    assert_eq!(payload["count"], 1);
    assert_eq!(payload["campaigns"][0]["campaign_name"], "Spring");

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "GET");
    assert_eq!(calls[0].param("advertiser_id"), Some("adv-1"));
}

#[tokio::test]
async fn test_unknown_tool_is_a_tool_error() {
    let (processor, provider) = processor_with(test_config());
    let response = call(
        &processor,
        json!({
            "jsonrpc": "2.0", "id": 9, "method": "tools/call",
            "params": {"name": "delete_everything", "arguments": {}}
        }),
    )
    .await;

    assert!(response.error.is_none());
    let (payload, is_error) = tool_payload(&response);
    assert!(is_error);
    assert_eq!(payload["error"], true);
    assert_eq!(payload["tool"], "delete_everything");
    assert!(payload["message"].as_str().unwrap().contains("get_campaigns"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_is_a_tool_error() {
    let (processor, provider) = processor_with(test_config());
    provider.fail(
        "adgroup/get/",
        AppError::upstream_api("TikTok API error 40002: advertiser not found"),
    );

    let response = call(
        &processor,
        json!({
            "jsonrpc": "2.0", "id": 10, "method": "tools/call",
            "params": {"name": "get_ad_groups", "arguments": {"advertiser_id": "adv"}}
        }),
    )
    .await;

    let (payload, is_error) = tool_payload(&response);
    assert!(is_error);
    assert_eq!(
        payload["message"],
        "Error: TikTok API error 40002: advertiser not found"
    );
    assert_eq!(
        payload["suggestion"],
        "Please check your configuration and try again."
    );
}

#[tokio::test]
async fn test_missing_credentials_short_circuit() {
    let mut config = test_config();
    config.credentials = Credentials::new("app", "", "");
    let (processor, provider) = processor_with(config);

    let response = call(
        &processor,
        json!({
            "jsonrpc": "2.0", "id": 11, "method": "tools/call",
            "params": {"name": "get_business_centers"}
        }),
    )
    .await;

    let (payload, is_error) = tool_payload(&response);
    assert!(is_error);
    let message = payload["message"].as_str().unwrap();
    assert!(message.contains("TIKTOK_SECRET"));
    assert!(message.contains("TIKTOK_ACCESS_TOKEN"));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn test_report_forwards_date_range() {
    let (processor, provider) = processor_with(test_config());
    let response = call(
        &processor,
        json!({
            "jsonrpc": "2.0", "id": 12, "method": "tools/call",
            "params": {"name": "get_reports", "arguments": {
                "advertiser_id": "adv",
                "start_date": "2025-01-01",
                "end_date": "2025-01-07"
            }}
        }),
    )
    .await;

    let (_payload, is_error) = tool_payload(&response);
    assert!(!is_error);
    let calls = provider.calls();
    assert_eq!(calls[0].endpoint, "report/integrated/get/");
    assert_eq!(calls[0].param("start_date"), Some("2025-01-01"));
    assert_eq!(calls[0].param("end_date"), Some("2025-01-07"));
    assert_eq!(calls[0].param("report_type"), Some("BASIC"));
}

// ============================================================================
// Stdio transport
// ============================================================================

#[tokio::test]
async fn test_stdio_transport_answers_line_by_line() {
    let (resources, _provider, _clock) = create_test_resources(test_config());
    let transport = StdioTransport::new(McpRequestProcessor::new(resources));

    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        "\n",
        "\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        "this is not json\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        "\n",
    );
    let mut output = Vec::new();
    transport.serve(input.as_bytes(), &mut output).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[0]["result"]["protocolVersion"], "2024-11-05");
    assert_eq!(lines[1]["error"]["code"], -32700);
    assert_eq!(lines[1]["id"], Value::Null);
    assert_eq!(lines[2]["id"], 2);
    assert_eq!(lines[2]["result"], json!({}));
}
