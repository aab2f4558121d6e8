// ABOUTME: Hourly admission control for upstream advertising API requests
// ABOUTME: Fixed window counter that makes callers wait for the next window once the budget is spent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Upstream Rate Limiting
//!
//! A single window counter shared by every request the process sends
//! upstream. The window starts at the first request and resets once it has
//! fully elapsed. When the budget of the current window is spent, callers
//! wait until the window ends; there is no queue and no fairness between
//! waiting callers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;
use tracing::warn;

use crate::constants::api::RATE_LIMIT_WINDOW_SECS;

#[derive(Debug)]
struct WindowState {
    count: u32,
    window_start: Instant,
}

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request may proceed and has been counted
    Granted,
    /// The budget is spent; retry after this long
    Wait(Duration),
}

/// Snapshot of the limiter for health reporting
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests allowed per window
    pub limit: u32,
    /// Requests counted in the current window
    pub used: u32,
    /// Requests left in the current window
    pub remaining: u32,
    /// Seconds until the window resets
    pub reset_in_secs: u64,
}

/// Fixed window request limiter shared across clones
#[derive(Debug, Clone)]
pub struct HourlyRateLimiter {
    state: Arc<Mutex<WindowState>>,
    limit: u32,
    window: Duration,
}

impl HourlyRateLimiter {
    /// Limiter allowing `limit` requests per hour
    #[must_use]
    pub fn new(limit: u32) -> Self {
        Self::with_window(limit, Duration::from_secs(RATE_LIMIT_WINDOW_SECS))
    }

    /// Limiter with a custom window length
    ///
    /// A zero limit is raised to one request per window.
    #[must_use]
    pub fn with_window(limit: u32, window: Duration) -> Self {
        if limit == 0 {
            warn!("Upstream rate limit of 0 raised to 1 request per window");
        }
        Self {
            state: Arc::new(Mutex::new(WindowState {
                count: 0,
                window_start: Instant::now(),
            })),
            limit: limit.max(1),
            window,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, WindowState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("Upstream rate limiter lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Count a request if the current window has budget left
    #[must_use]
    pub fn check(&self) -> Admission {
        let now = Instant::now();
        let mut state = self.lock();

        let elapsed = now.duration_since(state.window_start);
        if elapsed >= self.window {
            state.count = 0;
            state.window_start = now;
        }

        if state.count < self.limit {
            state.count += 1;
            Admission::Granted
        } else {
            let elapsed = now.duration_since(state.window_start);
            Admission::Wait(self.window.saturating_sub(elapsed))
        }
    }

    /// Wait until the request can be admitted
    pub async fn acquire(&self) {
        loop {
            match self.check() {
                Admission::Granted => return,
                Admission::Wait(delay) => {
                    warn!(
                        limit = self.limit,
                        wait_secs = delay.as_secs(),
                        "Upstream rate limit reached, waiting for the next window"
                    );
                    tokio::time::sleep(delay.max(Duration::from_millis(1))).await;
                }
            }
        }
    }

    /// Current usage
    #[must_use]
    pub fn status(&self) -> RateLimitStatus {
        let now = Instant::now();
        let state = self.lock();
        let elapsed = now.duration_since(state.window_start);
        let (used, reset_in) = if elapsed >= self.window {
            (0, self.window)
        } else {
            (state.count, self.window - elapsed)
        };
        drop(state);

        RateLimitStatus {
            limit: self.limit,
            used,
            remaining: self.limit.saturating_sub(used),
            reset_in_secs: reset_in.as_secs(),
        }
    }
}
