// ABOUTME: get_campaigns tool listing the campaigns of one advertiser
// ABOUTME: filters.campaign_ids is forwarded upstream as a JSON-encoded campaign_ids parameter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::constants::tools::GET_CAMPAIGNS;
use crate::errors::AppResult;
use crate::tools::fields::{field, project_list, FieldDefault as D, FieldSpec};
use crate::tools::params::{parse_args, push, require_non_empty};
use crate::tools::{McpTool, ToolExecutionContext, ToolResult};

const ENDPOINT: &str = "campaign/get/";

const FIELDS: &[FieldSpec] = &[
    field("campaign_id", D::Null),
    field("campaign_name", D::Text("Unknown")),
    field("advertiser_id", D::Null),
    field("objective", D::Text("Unknown")),
    field("objective_type", D::Text("Unknown")),
    field("campaign_type", D::Text("REGULAR_CAMPAIGN")),
    field("budget", D::Float),
    field("budget_mode", D::Text("Unknown")),
    field("operation_status", D::Text("Unknown")),
    field("secondary_status", D::Text("Unknown")),
    field("deep_bid_type", D::Null),
    field("roas_bid", D::Float),
    field("is_smart_performance_campaign", D::False),
    field("is_new_structure", D::False),
    field("create_time", D::Null),
    field("modify_time", D::Null),
];

#[derive(Debug, Deserialize)]
struct Args {
    advertiser_id: String,
    #[serde(default)]
    filters: Option<Map<String, Value>>,
}

/// Lists campaigns for one advertiser
pub struct GetCampaignsTool;

#[async_trait]
impl McpTool for GetCampaignsTool {
    fn name(&self) -> &'static str {
        GET_CAMPAIGNS
    }

    fn description(&self) -> &'static str {
        "Get campaigns for a specific advertiser with optional filtering"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "advertiser_id": {"type": "string", "description": "Advertiser ID (required)"},
                "filters": {"type": "object", "description": "Optional filtering parameters, e.g. {\"campaign_ids\": [\"...\"]}"}
            },
            "required": ["advertiser_id"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: Args = parse_args(GET_CAMPAIGNS, args)?;
        require_non_empty(GET_CAMPAIGNS, "advertiser_id", &args.advertiser_id)?;

        let mut params = Vec::new();
        push(&mut params, "advertiser_id", &args.advertiser_id);
        if let Some(ids) = args.filters.as_ref().and_then(|f| f.get("campaign_ids")) {
            push(&mut params, "campaign_ids", ids);
        }

        let envelope = ctx.provider.get(ENDPOINT, params).await?;
        let campaigns = project_list(&envelope, FIELDS);

        Ok(ToolResult::ok(json!({
            "success": true,
            "advertiser_id": args.advertiser_id,
            "count": campaigns.len(),
            "campaigns": campaigns,
        })))
    }
}
