// ABOUTME: get_ads tool listing ads of an advertiser, optionally within one ad group
// ABOUTME: adgroup_id is merged into filtering.adgroup_ids before the upstream call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::constants::tools::{GET_ADS, MAX_PAGE_SIZE};
use crate::errors::AppResult;
use crate::tools::fields::{field, project_list, FieldDefault as D, FieldSpec};
use crate::tools::params::{
    default_page, default_page_size, merge_id_filter, parse_args, push, require_non_empty,
    validate_pagination,
};
use crate::tools::{McpTool, ToolExecutionContext, ToolResult};

const ENDPOINT: &str = "ad/get/";

const FIELDS: &[FieldSpec] = &[
    field("ad_id", D::Null),
    field("ad_name", D::Text("Unknown")),
    field("adgroup_id", D::Null),
    field("adgroup_name", D::Text("Unknown")),
    field("campaign_id", D::Null),
    field("campaign_name", D::Text("Unknown")),
    field("advertiser_id", D::Null),
    field("operation_status", D::Text("Unknown")),
    field("secondary_status", D::Text("Unknown")),
    field("ad_format", D::Text("Unknown")),
    field("creative_type", D::Null),
    field("ad_text", D::Text("")),
    field("ad_texts", D::Null),
    field("call_to_action", D::Text("")),
    field("call_to_action_id", D::Null),
    field("landing_page_url", D::Text("")),
    field("landing_page_urls", D::Null),
    field("deeplink", D::Text("")),
    field("deeplink_type", D::Text("Unknown")),
    field("video_id", D::Null),
    field("image_ids", D::EmptyList),
    field("playable_url", D::Text("")),
    field("profile_image_url", D::Text("")),
    field("avatar_icon_web_uri", D::Text("")),
    field("display_name", D::Text("")),
    field("app_name", D::Text("")),
    field("identity_id", D::Null),
    field("identity_type", D::Text("Unknown")),
    field("page_id", D::Null),
    field("card_id", D::Null),
    field("is_aco", D::False),
    field("is_new_structure", D::False),
    field("creative_authorized", D::False),
    field("optimization_event", D::Null),
    field("tracking_pixel_id", D::Int(0)),
    field("click_tracking_url", D::Null),
    field("impression_tracking_url", D::Null),
    field("vast_moat_enabled", D::False),
    field("viewability_postbid_partner", D::Text("Unknown")),
    field("viewability_vast_url", D::Null),
    field("brand_safety_postbid_partner", D::Text("Unknown")),
    field("brand_safety_vast_url", D::Null),
    field("fallback_type", D::Text("Unknown")),
    field("create_time", D::Null),
    field("modify_time", D::Null),
];

#[derive(Debug, Deserialize)]
struct Args {
    advertiser_id: String,
    #[serde(default)]
    adgroup_id: Option<String>,
    #[serde(default)]
    filters: Option<Map<String, Value>>,
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
}

/// Lists ads for one advertiser
pub struct GetAdsTool;

#[async_trait]
impl McpTool for GetAdsTool {
    fn name(&self) -> &'static str {
        GET_ADS
    }

    fn description(&self) -> &'static str {
        "Get ads for a specific advertiser with optional filtering"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "advertiser_id": {"type": "string", "description": "Advertiser ID (required)"},
                "adgroup_id": {"type": "string", "description": "Ad group ID (optional)"},
                "filters": {"type": "object", "description": "Optional filtering parameters"},
                "page": {"type": "integer", "default": 1, "minimum": 1, "description": "Page number"},
                "page_size": {"type": "integer", "default": 10, "minimum": 1, "maximum": 1000, "description": "Items per page"}
            },
            "required": ["advertiser_id"]
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: Args = parse_args(GET_ADS, args)?;
        require_non_empty(GET_ADS, "advertiser_id", &args.advertiser_id)?;
        validate_pagination(GET_ADS, args.page, args.page_size, MAX_PAGE_SIZE)?;

        let mut params = Vec::new();
        push(&mut params, "advertiser_id", &args.advertiser_id);
        push(&mut params, "page", args.page);
        push(&mut params, "page_size", args.page_size);
        if let Some(filtering) =
            merge_id_filter(args.filters, "adgroup_ids", args.adgroup_id.as_deref())
        {
            push(&mut params, "filtering", filtering);
        }

        let envelope = ctx.provider.get(ENDPOINT, params).await?;
        let ads = project_list(&envelope, FIELDS);

        Ok(ToolResult::ok(json!({
            "success": true,
            "advertiser_id": args.advertiser_id,
            "adgroup_id": args.adgroup_id,
            "count": ads.len(),
            "ads": ads,
        })))
    }
}
