// ABOUTME: Re-exports constants from tiktok-ads-core for unified access
// ABOUTME: Protocol, OAuth, tool and upstream API constants organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use tiktok_ads_core::constants::*;
