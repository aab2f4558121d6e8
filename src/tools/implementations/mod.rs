// ABOUTME: The six TikTok Business API tools
// ABOUTME: Each tool decodes typed arguments, calls the provider and projects the records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// `get_authorized_ad_accounts`
pub mod ad_accounts;
/// `get_ad_groups`
pub mod ad_groups;
/// `get_ads`
pub mod ads;
/// `get_business_centers`
pub mod business_centers;
/// `get_campaigns`
pub mod campaigns;
/// `get_reports`
pub mod reports;

pub use ad_accounts::GetAuthorizedAdAccountsTool;
pub use ad_groups::GetAdGroupsTool;
pub use ads::GetAdsTool;
pub use business_centers::GetBusinessCentersTool;
pub use campaigns::GetCampaignsTool;
pub use reports::GetReportsTool;
