// ABOUTME: Response cache for upstream GET requests keyed by request fingerprint
// ABOUTME: File-backed entries with a short TTL and owner-only permissions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// File-backed cache implementation
pub mod file;

use std::fmt;

use sha2::{Digest, Sha256};

pub use file::{CacheEntry, FileCache};

/// Fingerprint of an upstream request.
///
/// Query parameters are sorted so that argument order never produces a
/// different key for the same request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    method: String,
    endpoint: String,
    params: Vec<(String, String)>,
}

impl CacheKey {
    /// Build a key from a request method, endpoint and query parameters
    #[must_use]
    pub fn new(method: &str, endpoint: &str, params: &[(String, String)]) -> Self {
        let mut params = params.to_vec();
        params.sort();
        Self {
            method: method.to_uppercase(),
            endpoint: endpoint.trim_start_matches('/').to_owned(),
            params,
        }
    }

    /// Hex SHA-256 digest used as the cache file stem
    #[must_use]
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(self.to_string().as_bytes()))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}
