// ABOUTME: get_authorized_ad_accounts tool listing advertisers the access token may manage
// ABOUTME: Calls the oauth2 advertiser endpoint, which also carries app_id and secret
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::tools::GET_AUTHORIZED_AD_ACCOUNTS;
use crate::errors::AppResult;
use crate::tools::fields::{field, project_list, FieldDefault as D, FieldSpec};
use crate::tools::params::parse_args;
use crate::tools::{McpTool, ToolExecutionContext, ToolResult};

const ENDPOINT: &str = "oauth2/advertiser/get/";

const FIELDS: &[FieldSpec] = &[
    field("advertiser_id", D::Null),
    field("advertiser_name", D::Text("Unknown")),
    field("status", D::Text("Unknown")),
    field("company", D::Text("")),
    field("country", D::Text("")),
    field("currency", D::Text("")),
    field("timezone", D::Text("")),
];

// Some hosts refuse to call a tool with an empty argument object, so the
// schema carries one ignored parameter.
#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    #[allow(dead_code)]
    random_string: Option<String>,
}

/// Lists the ad accounts authorized for the current access token
pub struct GetAuthorizedAdAccountsTool;

#[async_trait]
impl McpTool for GetAuthorizedAdAccountsTool {
    fn name(&self) -> &'static str {
        GET_AUTHORIZED_AD_ACCOUNTS
    }

    fn description(&self) -> &'static str {
        "Get all authorized ad accounts accessible by the current access token"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "random_string": {"type": "string", "description": "Optional parameter"}
            }
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let _: Args = parse_args(GET_AUTHORIZED_AD_ACCOUNTS, args)?;

        let envelope = ctx.provider.get(ENDPOINT, Vec::new()).await?;
        let advertisers = project_list(&envelope, FIELDS);

        Ok(ToolResult::ok(json!({
            "success": true,
            "count": advertisers.len(),
            "advertisers": advertisers,
        })))
    }
}
