// ABOUTME: get_business_centers tool listing business centers visible to the access token
// ABOUTME: Supports an optional bc_id filter and page/page_size pagination capped at 50
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::tools::{GET_BUSINESS_CENTERS, MAX_BUSINESS_CENTER_PAGE_SIZE};
use crate::errors::AppResult;
use crate::tools::fields::{field, project_list, FieldDefault as D, FieldSpec};
use crate::tools::params::{
    default_page, default_page_size, parse_args, push, validate_pagination,
};
use crate::tools::{McpTool, ToolExecutionContext, ToolResult};

const ENDPOINT: &str = "bc/get/";

const FIELDS: &[FieldSpec] = &[
    field("bc_id", D::Null),
    field("name", D::Text("Unknown")),
    field("company", D::Text("")),
    field("currency", D::Text("")),
    field("registered_area", D::Text("")),
    field("status", D::Text("Unknown")),
    field("timezone", D::Text("")),
    field("type", D::Text("Unknown")),
    field("user_role", D::Text("Unknown")),
    field("finance_role", D::Null),
    field("ext_user_role", D::Null),
];

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    bc_id: Option<String>,
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
}

/// Lists business centers accessible by the current access token
pub struct GetBusinessCentersTool;

#[async_trait]
impl McpTool for GetBusinessCentersTool {
    fn name(&self) -> &'static str {
        GET_BUSINESS_CENTERS
    }

    fn description(&self) -> &'static str {
        "Get business centers accessible by the current access token"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "bc_id": {"type": "string", "description": "Specific business center ID (optional)"},
                "page": {"type": "integer", "default": 1, "minimum": 1, "description": "Page number"},
                "page_size": {"type": "integer", "default": 10, "minimum": 1, "maximum": 50, "description": "Items per page"}
            }
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: Args = parse_args(GET_BUSINESS_CENTERS, args)?;
        validate_pagination(
            GET_BUSINESS_CENTERS,
            args.page,
            args.page_size,
            MAX_BUSINESS_CENTER_PAGE_SIZE,
        )?;

        let mut params = Vec::new();
        push(&mut params, "page", args.page);
        push(&mut params, "page_size", args.page_size);
        if let Some(bc_id) = args.bc_id.filter(|id| !id.is_empty()) {
            push(&mut params, "bc_id", bc_id);
        }

        let envelope = ctx.provider.get(ENDPOINT, params).await?;
        let centers = project_list(&envelope, FIELDS);

        Ok(ToolResult::ok(json!({
            "success": true,
            "count": centers.len(),
            "centers": centers,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::implementations::test_support::CannedProvider;

    #[tokio::test]
    async fn test_projects_centers_and_sends_pagination() {
        let (provider, ctx) = CannedProvider::context(json!({
            "code": 0,
            "data": {"list": [{"bc_id": "bc1", "name": "Main", "user_role": "ADMIN"}]}
        }));

        let result = GetBusinessCentersTool
            .execute(json!({"bc_id": "bc1", "page_size": 50}), &ctx)
            .await
            .unwrap();

        assert_eq!(result.content["count"], 1);
        let center = &result.content["centers"][0];
        assert_eq!(center["name"], "Main");
        assert_eq!(center["status"], "Unknown");
        assert_eq!(center["company"], "");
        assert_eq!(center["finance_role"], Value::Null);

        assert_eq!(provider.last_call().0, "bc/get/");
        assert_eq!(provider.param("page").as_deref(), Some("1"));
        assert_eq!(provider.param("page_size").as_deref(), Some("50"));
        assert_eq!(provider.param("bc_id").as_deref(), Some("bc1"));
    }

    #[tokio::test]
    async fn test_rejects_oversized_page_before_calling_upstream() {
        let (provider, ctx) = CannedProvider::context(json!({"code": 0}));
        let err = GetBusinessCentersTool
            .execute(json!({"page_size": 51}), &ctx)
            .await
            .unwrap_err();
        assert!(err.message.contains("page_size"));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_bc_id_is_not_sent() {
        let (provider, ctx) = CannedProvider::context(json!({"code": 0, "data": {}}));
        let result = GetBusinessCentersTool
            .execute(json!({"bc_id": ""}), &ctx)
            .await
            .unwrap();
        assert_eq!(result.content["count"], 0);
        assert!(provider.param("bc_id").is_none());
    }
}
