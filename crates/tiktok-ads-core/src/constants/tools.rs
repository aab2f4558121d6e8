// ABOUTME: Tool identifiers and pagination defaults for the advertising tools
// ABOUTME: Names are the wire identifiers used by tools/list and tools/call
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// List business centers
pub const GET_BUSINESS_CENTERS: &str = "get_business_centers";
/// List authorized advertiser accounts
pub const GET_AUTHORIZED_AD_ACCOUNTS: &str = "get_authorized_ad_accounts";
/// List campaigns
pub const GET_CAMPAIGNS: &str = "get_campaigns";
/// List ad groups
pub const GET_AD_GROUPS: &str = "get_ad_groups";
/// List ads
pub const GET_ADS: &str = "get_ads";
/// Fetch performance reports
pub const GET_REPORTS: &str = "get_reports";

/// Default page number
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page size accepted by the business center endpoint
pub const MAX_BUSINESS_CENTER_PAGE_SIZE: u32 = 50;
/// Largest page size accepted by list and report endpoints
pub const MAX_PAGE_SIZE: u32 = 1000;
