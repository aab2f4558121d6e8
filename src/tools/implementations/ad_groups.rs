// ABOUTME: get_ad_groups tool listing ad groups of an advertiser, optionally within one campaign
// ABOUTME: campaign_id is merged into filtering.campaign_ids before the upstream call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::constants::tools::{GET_AD_GROUPS, MAX_PAGE_SIZE};
use crate::errors::AppResult;
use crate::tools::fields::{field, project_list, FieldDefault as D, FieldSpec};
use crate::tools::params::{
    default_page, default_page_size, merge_id_filter, parse_args, push, require_non_empty,
    validate_pagination,
};
use crate::tools::{McpTool, ToolExecutionContext, ToolResult};

const ENDPOINT: &str = "adgroup/get/";

const FIELDS: &[FieldSpec] = &[
    field("adgroup_id", D::Null),
    field("adgroup_name", D::Text("Unknown")),
    field("campaign_id", D::Null),
    field("campaign_name", D::Text("Unknown")),
    field("advertiser_id", D::Null),
    field("budget", D::Float),
    field("budget_mode", D::Text("Unknown")),
    field("operation_status", D::Text("Unknown")),
    field("secondary_status", D::Text("Unknown")),
    field("optimization_goal", D::Text("Unknown")),
    field("billing_event", D::Text("Unknown")),
    field("bid_type", D::Text("Unknown")),
    field("bid_price", D::Float),
    field("conversion_bid_price", D::Float),
    field("deep_bid_type", D::Null),
    field("deep_cpa_bid", D::Float),
    field("promotion_type", D::Text("Unknown")),
    field("creative_material_mode", D::Text("Unknown")),
    field("schedule_type", D::Text("Unknown")),
    field("schedule_start_time", D::Null),
    field("schedule_end_time", D::Null),
    field("pacing", D::Text("Unknown")),
    field("gender", D::Text("Unknown")),
    field("age_groups", D::Null),
    field("location_ids", D::EmptyList),
    field("placements", D::EmptyList),
    field("operating_systems", D::EmptyList),
    field("languages", D::EmptyList),
    field("audience_ids", D::EmptyList),
    field("excluded_audience_ids", D::EmptyList),
    field("interest_category_ids", D::EmptyList),
    field("interest_keyword_ids", D::EmptyList),
    field("auto_targeting_enabled", D::False),
    field("is_new_structure", D::False),
    field("is_hfss", D::False),
    field("skip_learning_phase", D::False),
    field("search_result_enabled", D::False),
    field("inventory_filter_enabled", D::False),
    field("video_download_disabled", D::False),
    field("comment_disabled", D::False),
    field("share_disabled", D::False),
    field("brand_safety_type", D::Text("Unknown")),
    field("brand_safety_partner", D::Null),
    field("pixel_id", D::Null),
    field("app_id", D::Null),
    field("app_download_url", D::Null),
    field("app_type", D::Null),
    field("category_id", D::Null),
    field("create_time", D::Null),
    field("modify_time", D::Null),
];

#[derive(Debug, Deserialize)]
struct Args {
    advertiser_id: String,
    #[serde(default)]
    campaign_id: Option<String>,
    #[serde(default)]
    filters: Option<Map<String, Value>>,
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
}

/// Lists ad groups for one advertiser
pub struct GetAdGroupsTool;

#[async_trait]
impl McpTool for GetAdGroupsTool {
    fn name(&self) -> &'static str {
        GET_AD_GROUPS
    }

    fn description(&self) -> &'static str {
        "Get ad groups for a specific advertiser with optional filtering"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "advertiser_id": {"type": "string", "description": "Advertiser ID (required)"},
                "campaign_id": {"type": "string", "description": "Campaign ID (optional)"},
                "filters": {"type": "object", "description": "Optional filtering parameters"},
                "page": {"type": "integer", "default": 1, "minimum": 1, "description": "Page number"},
                "page_size": {"type": "integer", "default": 10, "minimum": 1, "maximum": 1000, "description": "Items per page"}
            },
            "required": ["advertiser_id"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: Args = parse_args(GET_AD_GROUPS, args)?;
        require_non_empty(GET_AD_GROUPS, "advertiser_id", &args.advertiser_id)?;
        validate_pagination(GET_AD_GROUPS, args.page, args.page_size, MAX_PAGE_SIZE)?;

        let mut params = Vec::new();
        push(&mut params, "advertiser_id", &args.advertiser_id);
        push(&mut params, "page", args.page);
        push(&mut params, "page_size", args.page_size);
        if let Some(filtering) =
            merge_id_filter(args.filters, "campaign_ids", args.campaign_id.as_deref())
        {
            push(&mut params, "filtering", filtering);
        }

        let envelope = ctx.provider.get(ENDPOINT, params).await?;
        let ad_groups = project_list(&envelope, FIELDS);

        Ok(ToolResult::ok(json!({
            "success": true,
            "advertiser_id": args.advertiser_id,
            "campaign_id": args.campaign_id,
            "count": ad_groups.len(),
            "ad_groups": ad_groups,
        })))
    }
}
