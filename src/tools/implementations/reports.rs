// ABOUTME: get_reports tool fetching integrated performance reports
// ABOUTME: Handles business center and advertiser scoped reports, lifetime queries and ordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Integrated Reports
//!
//! A `BC` report is scoped by `bc_id` and carries no data level. Every other
//! report type is scoped by advertiser: `advertiser_ids` wins over
//! `advertiser_id` when both are given. Dates are mandatory unless the
//! report covers the whole lifetime.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::constants::tools::{GET_REPORTS, MAX_PAGE_SIZE};
use crate::errors::{AppError, AppResult};
use crate::tools::fields::data_list;
use crate::tools::params::{default_page, default_page_size, parse_args, push, validate_pagination};
use crate::tools::{McpTool, ToolExecutionContext, ToolResult};

const ENDPOINT: &str = "report/integrated/get/";
const BC_REPORT: &str = "BC";
const DEFAULT_DIMENSIONS: &[&str] = &["campaign_id", "stat_time_day"];
const DEFAULT_METRICS: &[&str] = &["spend", "impressions"];

fn default_report_type() -> String {
    "BASIC".to_owned()
}

fn default_data_level() -> String {
    "AUCTION_CAMPAIGN".to_owned()
}

fn default_service_type() -> String {
    "AUCTION".to_owned()
}

fn default_order_type() -> String {
    "DESC".to_owned()
}

#[derive(Debug, Deserialize)]
struct Args {
    #[serde(default)]
    advertiser_id: Option<String>,
    #[serde(default)]
    advertiser_ids: Option<Vec<String>>,
    #[serde(default)]
    bc_id: Option<String>,
    #[serde(default = "default_report_type")]
    report_type: String,
    #[serde(default = "default_data_level")]
    data_level: String,
    #[serde(default)]
    dimensions: Option<Vec<String>>,
    #[serde(default)]
    metrics: Option<Vec<String>>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    filters: Option<Vec<Value>>,
    #[serde(default = "default_page")]
    page: i64,
    #[serde(default = "default_page_size")]
    page_size: i64,
    #[serde(default = "default_service_type")]
    service_type: String,
    #[serde(default)]
    query_lifetime: bool,
    #[serde(default)]
    enable_total_metrics: bool,
    #[serde(default)]
    multi_adv_report_in_utc_time: bool,
    #[serde(default)]
    order_field: Option<String>,
    #[serde(default = "default_order_type")]
    order_type: String,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

fn list_or_default(values: Option<Vec<String>>, default: &[&str]) -> Vec<String> {
    values
        .filter(|values| !values.is_empty())
        .unwrap_or_else(|| default.iter().map(|&v| v.to_owned()).collect())
}

/// Scope of a report request
enum Scope<'a> {
    BusinessCenter(&'a str),
    Advertisers(&'a [String]),
    Advertiser(&'a str),
}

impl Args {
    fn scope(&self) -> AppResult<Scope<'_>> {
        if self.report_type == BC_REPORT {
            return non_empty(self.bc_id.as_ref())
                .map(Scope::BusinessCenter)
                .ok_or_else(|| AppError::invalid_input("bc_id is required when report_type is BC"));
        }

        let ids = self.advertiser_ids.as_deref().filter(|ids| !ids.is_empty());
        let id = non_empty(self.advertiser_id.as_ref());
        match (ids, id) {
            (Some(ids), Some(_)) => {
                warn!("Both advertiser_id and advertiser_ids provided, advertiser_id will be ignored");
                Ok(Scope::Advertisers(ids))
            }
            (Some(ids), None) => Ok(Scope::Advertisers(ids)),
            (None, Some(id)) => Ok(Scope::Advertiser(id)),
            (None, None) => Err(AppError::invalid_input(
                "advertiser_id or advertiser_ids is required when report_type is not BC",
            )),
        }
    }

    fn dates(&self) -> AppResult<Option<(&str, &str)>> {
        if self.query_lifetime {
            return Ok(None);
        }
        match (
            non_empty(self.start_date.as_ref()),
            non_empty(self.end_date.as_ref()),
        ) {
            (Some(start), Some(end)) => Ok(Some((start, end))),
            _ => Err(AppError::invalid_input(
                "start_date and end_date are required when query_lifetime is false",
            )),
        }
    }
}

/// Fetches integrated performance reports
pub struct GetReportsTool;

#[async_trait]
impl McpTool for GetReportsTool {
    fn name(&self) -> &'static str {
        GET_REPORTS
    }

    fn description(&self) -> &'static str {
        "Get performance reports and analytics with comprehensive filtering and grouping options"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "advertiser_id": {"type": "string", "description": "Single advertiser ID"},
                "advertiser_ids": {"type": "array", "items": {"type": "string"}, "description": "Multiple advertiser IDs"},
                "bc_id": {"type": "string", "description": "Business center ID (required for BC reports)"},
                "report_type": {"type": "string", "default": "BASIC", "description": "Report type (BASIC, AUDIENCE, PLAYABLE_MATERIAL, CATALOG, BC, TT_SHOP)"},
                "data_level": {"type": "string", "default": "AUCTION_CAMPAIGN", "description": "Data aggregation level"},
                "dimensions": {"type": "array", "items": {"type": "string"}, "description": "Report dimensions"},
                "metrics": {"type": "array", "items": {"type": "string"}, "description": "Metrics to include"},
                "start_date": {"type": "string", "description": "Start date (YYYY-MM-DD)"},
                "end_date": {"type": "string", "description": "End date (YYYY-MM-DD)"},
                "filters": {"type": "array", "items": {"type": "object"}, "description": "Filter conditions"},
                "page": {"type": "integer", "default": 1, "minimum": 1, "description": "Page number"},
                "page_size": {"type": "integer", "default": 10, "minimum": 1, "maximum": 1000, "description": "Items per page"},
                "service_type": {"type": "string", "default": "AUCTION", "description": "Ad service type"},
                "query_lifetime": {"type": "boolean", "default": false, "description": "Query lifetime metrics instead of a date range"},
                "enable_total_metrics": {"type": "boolean", "default": false, "description": "Include aggregated totals"},
                "multi_adv_report_in_utc_time": {"type": "boolean", "default": false, "description": "Use UTC for multi-advertiser reports"},
                "order_field": {"type": "string", "description": "Metric to sort by"},
                "order_type": {"type": "string", "default": "DESC", "description": "Sort direction (ASC or DESC)"}
            }
        })
    }

    async fn execute(&self, args: Value, ctx: &ToolExecutionContext) -> AppResult<ToolResult> {
        let args: Args = parse_args(GET_REPORTS, args)?;
        let scope = args.scope()?;
        validate_pagination(GET_REPORTS, args.page, args.page_size, MAX_PAGE_SIZE)?;
        let dates = args.dates()?;

        let mut params = Vec::new();
        push(&mut params, "report_type", &args.report_type);
        push(&mut params, "page", args.page);
        push(&mut params, "page_size", args.page_size);

        let is_bc = matches!(scope, Scope::BusinessCenter(_));
        match scope {
            Scope::BusinessCenter(bc_id) => push(&mut params, "bc_id", bc_id),
            Scope::Advertisers(ids) => push(&mut params, "advertiser_ids", json!(ids)),
            Scope::Advertiser(id) => push(&mut params, "advertiser_id", id),
        }
        if !is_bc {
            push(&mut params, "service_type", &args.service_type);
            push(&mut params, "data_level", &args.data_level);
        }

        let dimensions = list_or_default(args.dimensions.clone(), DEFAULT_DIMENSIONS);
        let metrics = list_or_default(args.metrics.clone(), DEFAULT_METRICS);
        push(&mut params, "dimensions", json!(dimensions));
        push(&mut params, "metrics", json!(metrics));

        match dates {
            Some((start, end)) => {
                push(&mut params, "start_date", start);
                push(&mut params, "end_date", end);
            }
            None => push(&mut params, "query_lifetime", true),
        }

        if let Some(filters) = args.filters.as_ref().filter(|f| !f.is_empty()) {
            push(&mut params, "filtering", json!(filters));
        }
        if args.enable_total_metrics {
            push(&mut params, "enable_total_metrics", true);
        }
        if args.multi_adv_report_in_utc_time {
            push(&mut params, "multi_adv_report_in_utc_time", true);
        }
        if let Some(order_field) = non_empty(args.order_field.as_ref()) {
            push(&mut params, "order_field", order_field);
        }
        if !args.order_type.is_empty() {
            push(&mut params, "order_type", &args.order_type);
        }

        let envelope = ctx.provider.get(ENDPOINT, params).await?;
        let data = envelope.get("data").cloned().unwrap_or_else(|| json!({}));
        let reports: Vec<Value> = data_list(&envelope)
            .iter()
            .map(|item| {
                json!({
                    "dimensions": item.get("dimensions").cloned().unwrap_or_else(|| json!({})),
                    "metrics": item.get("metrics").cloned().unwrap_or_else(|| json!({})),
                })
            })
            .collect();

        Ok(ToolResult::ok(json!({
            "success": true,
            "report_type": args.report_type,
            "data_level": if is_bc { Value::Null } else { Value::from(args.data_level.clone()) },
            "total_metrics": data.get("total_metrics").cloned().unwrap_or(Value::Null),
            "page_info": data.get("page_info").cloned().unwrap_or_else(|| json!({})),
            "count": reports.len(),
            "reports": reports,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::implementations::test_support::CannedProvider;

    fn envelope() -> Value {
        json!({
            "code": 0,
            "data": {
                "list": [
                    {"dimensions": {"campaign_id": "c1", "stat_time_day": "2024-01-01"}, "metrics": {"spend": "10.0"}},
                    {"dimensions": {"campaign_id": "c2"}}
                ],
                "page_info": {"page": 1, "total_number": 2},
                "total_metrics": {"spend": "10.0"}
            }
        })
    }

    #[tokio::test]
    async fn test_advertiser_report_defaults() {
        let (provider, ctx) = CannedProvider::context(envelope());

        let result = GetReportsTool
            .execute(
                json!({"advertiser_id": "adv", "start_date": "2024-01-01", "end_date": "2024-01-31"}),
                &ctx,
            )
            .await
            .unwrap();

        assert_eq!(result.content["report_type"], "BASIC");
        assert_eq!(result.content["data_level"], "AUCTION_CAMPAIGN");
        assert_eq!(result.content["count"], 2);
        assert_eq!(result.content["reports"][1]["metrics"], json!({}));
        assert_eq!(result.content["page_info"]["total_number"], 2);
        assert_eq!(result.content["total_metrics"]["spend"], "10.0");

        assert_eq!(provider.last_call().0, "report/integrated/get/");
        assert_eq!(provider.param("advertiser_id").as_deref(), Some("adv"));
        assert_eq!(provider.param("service_type").as_deref(), Some("AUCTION"));
        assert_eq!(
            provider.param("dimensions").as_deref(),
            Some(r#"["campaign_id","stat_time_day"]"#)
        );
        assert_eq!(provider.param("metrics").as_deref(), Some(r#"["spend","impressions"]"#));
        assert_eq!(provider.param("order_type").as_deref(), Some("DESC"));
        assert!(provider.param("query_lifetime").is_none());
        assert!(provider.param("enable_total_metrics").is_none());
    }

    #[tokio::test]
    async fn test_bc_report_requires_bc_id_and_omits_data_level() {
        let (provider, ctx) = CannedProvider::context(envelope());

        let err = GetReportsTool
            .execute(json!({"report_type": "BC", "query_lifetime": true}), &ctx)
            .await
            .unwrap_err();
        assert_eq!(err.message, "bc_id is required when report_type is BC");

        let result = GetReportsTool
            .execute(
                json!({"report_type": "BC", "bc_id": "bc1", "query_lifetime": true}),
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(result.content["data_level"], Value::Null);
        assert_eq!(provider.param("bc_id").as_deref(), Some("bc1"));
        assert_eq!(provider.param("query_lifetime").as_deref(), Some("true"));
        assert!(provider.param("data_level").is_none());
        assert!(provider.param("start_date").is_none());
    }

    #[tokio::test]
    async fn test_advertiser_ids_win_over_advertiser_id() {
        let (provider, ctx) = CannedProvider::context(envelope());
        GetReportsTool
            .execute(
                json!({
                    "advertiser_id": "a0",
                    "advertiser_ids": ["a1", "a2"],
                    "query_lifetime": true,
                    "enable_total_metrics": true,
                    "filters": [{"field_name": "campaign_ids", "filter_type": "IN", "filter_value": "[\"c1\"]"}],
                    "order_field": "spend"
                }),
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(provider.param("advertiser_ids").as_deref(), Some(r#"["a1","a2"]"#));
        assert!(provider.param("advertiser_id").is_none());
        assert_eq!(provider.param("enable_total_metrics").as_deref(), Some("true"));
        assert_eq!(provider.param("order_field").as_deref(), Some("spend"));
        assert!(provider.param("filtering").unwrap().contains("field_name"));
    }

    #[tokio::test]
    async fn test_dates_required_without_lifetime() {
        let (provider, ctx) = CannedProvider::context(envelope());
        let err = GetReportsTool
            .execute(json!({"advertiser_id": "adv", "start_date": "2024-01-01"}), &ctx)
            .await
            .unwrap_err();
        assert_eq!(
            err.message,
            "start_date and end_date are required when query_lifetime is false"
        );

        let err = GetReportsTool.execute(json!({}), &ctx).await.unwrap_err();
        assert!(err.message.starts_with("advertiser_id or advertiser_ids"));
        assert_eq!(provider.call_count(), 0);
    }
}
