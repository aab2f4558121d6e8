// ABOUTME: Execution context handed to every tool invocation
// ABOUTME: Carries the shared upstream provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::sync::Arc;

use crate::providers::AdsApiProvider;

/// Context shared by all tool executions
#[derive(Clone)]
pub struct ToolExecutionContext {
    /// Upstream advertising API
    pub provider: Arc<dyn AdsApiProvider>,
}

impl ToolExecutionContext {
    /// Create a context around a provider
    #[must_use]
    pub fn new(provider: Arc<dyn AdsApiProvider>) -> Self {
        Self { provider }
    }
}

impl fmt::Debug for ToolExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolExecutionContext")
            .field("provider", &self.provider.name())
            .finish()
    }
}
