//! Disk-based cache for Overpass responses.
//!
//! Area-wide queries are slow and rate limited, so raw responses can be
//! kept on disk and replayed. Entries are keyed by the exact query text.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use super::error::OverpassError;
use super::types::OverpassResponse;

/// Default cache TTL: 7 days.
const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Cached response with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct CachedResponse {
    /// Unix timestamp when the cache was written.
    cached_at_secs: u64,
    /// The query that produced the response.
    query: String,
    /// The cached response.
    response: OverpassResponse,
}

/// Configuration for the response cache.
#[derive(Debug, Clone)]
pub struct ResponseCacheConfig {
    /// Directory holding one file per query.
    pub dir: PathBuf,
    /// How long an entry remains valid.
    pub ttl: Duration,
}

impl ResponseCacheConfig {
    /// Create a new cache config with the given directory and default TTL (7 days).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set a custom TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Disk cache for Overpass responses.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    config: ResponseCacheConfig,
}

impl ResponseCache {
    pub fn new(config: ResponseCacheConfig) -> Self {
        Self { config }
    }

    /// Path of the cache file for a query.
    pub fn path_for(&self, query: &str) -> PathBuf {
        let mut hasher = DefaultHasher::new();
        query.hash(&mut hasher);
        self.config
            .dir
            .join(format!("overpass-{:016x}.json", hasher.finish()))
    }

    /// Try to load a response for the query.
    ///
    /// Returns `None` if there is no entry, it is unreadable, it was written
    /// for a different query, or it has expired.
    pub fn load(&self, query: &str) -> Option<OverpassResponse> {
        let contents = std::fs::read_to_string(self.path_for(query)).ok()?;
        let cached: CachedResponse = serde_json::from_str(&contents).ok()?;

        if cached.query != query {
            return None;
        }

        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .ok()?
            .as_secs();

        let age_secs = now.saturating_sub(cached.cached_at_secs);
        if age_secs >= self.config.ttl.as_secs() {
            return None;
        }

        Some(cached.response)
    }

    /// Save a response for the query.
    ///
    /// Creates the cache directory if it doesn't exist.
    pub fn save(&self, query: &str, response: &OverpassResponse) -> Result<(), OverpassError> {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_err(|_| OverpassError::Cache {
                message: "system time before unix epoch".to_string(),
            })?
            .as_secs();

        let cached = CachedResponse {
            cached_at_secs: now,
            query: query.to_string(),
            response: response.clone(),
        };

        if !self.config.dir.as_os_str().is_empty() && !self.config.dir.exists() {
            std::fs::create_dir_all(&self.config.dir).map_err(|e| OverpassError::Cache {
                message: format!("failed to create cache directory: {}", e),
            })?;
        }

        let json = serde_json::to_string(&cached).map_err(|e| OverpassError::Cache {
            message: format!("failed to serialize cache entry: {}", e),
        })?;

        std::fs::write(self.path_for(query), json).map_err(|e| OverpassError::Cache {
            message: format!("failed to write cache file: {}", e),
        })?;

        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.config.dir
    }

    pub fn ttl(&self) -> Duration {
        self.config.ttl
    }
}
