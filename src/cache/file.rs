// ABOUTME: File-backed response cache with per-entry TTL
// ABOUTME: One JSON file per key holding data, timestamp and ttl_minutes; expired files are removed on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::CacheKey;
use crate::config::CacheConfig;

/// On-disk cache entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheEntry {
    /// Cached response body
    pub data: Value,
    /// Unix time in seconds when the entry was written
    pub timestamp: f64,
    /// Lifetime in minutes
    pub ttl_minutes: u64,
}

impl CacheEntry {
    /// Whether the entry is older than its lifetime at `now` (unix seconds)
    #[must_use]
    pub fn is_expired_at(&self, now: f64) -> bool {
        let age_minutes = (now - self.timestamp) / 60.0;
        age_minutes > self.ttl_minutes as f64
    }
}

/// Response cache storing one file per key.
///
/// Failures never propagate: a read that cannot be completed is a miss and
/// a write that cannot be completed is logged and dropped.
#[derive(Debug, Clone)]
pub struct FileCache {
    directory: PathBuf,
    ttl_minutes: u64,
    enabled: bool,
}

impl FileCache {
    /// Create a cache from configuration
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            ttl_minutes: config.ttl_minutes,
            enabled: config.enabled,
        }
    }

    /// A cache that never stores anything
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            directory: PathBuf::new(),
            ttl_minutes: 0,
            enabled: false,
        }
    }

    /// Whether caching is enabled
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Cache directory
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.directory.join(format!("{}.json", key.digest()))
    }

    /// Load a non-expired entry, deleting it if it has expired
    pub async fn get(&self, key: &CacheKey) -> Option<Value> {
        if !self.enabled {
            return None;
        }

        let path = self.path_for(key);
        let raw = tokio::fs::read(&path).await.ok()?;
        let entry: CacheEntry = match serde_json::from_slice(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Ignoring unreadable cache entry");
                return None;
            }
        };

        if entry.is_expired_at(unix_now()) {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                debug!(path = %path.display(), error = %e, "Failed to remove expired cache entry");
            }
            return None;
        }

        debug!(key = %key, "Response cache hit");
        Some(entry.data)
    }

    /// Store an entry; returns whether it was written
    pub async fn set(&self, key: &CacheKey, data: &Value) -> bool {
        if !self.enabled {
            return false;
        }

        match self.write_entry(key, data).await {
            Ok(()) => true,
            Err(e) => {
                warn!(directory = %self.directory.display(), error = %e, "Failed to save cache entry");
                false
            }
        }
    }

    async fn write_entry(&self, key: &CacheKey, data: &Value) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.directory).await?;

        let entry = CacheEntry {
            data: data.clone(),
            timestamp: unix_now(),
            ttl_minutes: self.ttl_minutes,
        };
        let bytes = serde_json::to_vec(&entry).map_err(io::Error::other)?;

        let path = self.path_for(key);
        tokio::fs::write(&path, bytes).await?;
        restrict_permissions(&path).await
    }

    /// Probe whether the cache directory exists and accepts writes
    pub async fn probe(&self) -> (bool, bool) {
        let exists = tokio::fs::metadata(&self.directory)
            .await
            .is_ok_and(|meta| meta.is_dir());
        if !exists {
            return (false, false);
        }

        let probe = self.directory.join(".test_write");
        let writable = tokio::fs::write(&probe, b"test").await.is_ok()
            && tokio::fs::remove_file(&probe).await.is_ok();
        (exists, writable)
    }
}

fn unix_now() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
