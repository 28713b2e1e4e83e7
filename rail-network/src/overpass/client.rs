//! Overpass API HTTP client.
//!
//! Queries are sent as a form-encoded `data` field. Overpass may take
//! minutes to answer area-wide relation queries, so the default request
//! timeout is long and transient failures are retried with a linear
//! backoff.

use std::time::Duration;

use tracing::{debug, warn};

use super::error::OverpassError;
use super::types::OverpassResponse;

/// Default Overpass interpreter endpoint.
const DEFAULT_ENDPOINT: &str = "https://lz4.overpass-api.de/api/interpreter";

/// Default request timeout, matching the server-side `[timeout:300]`.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default number of retries after the first attempt.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// A query to run, and whether the build can proceed without its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassQuery {
    /// Overpass QL text.
    pub text: String,
    /// A mandatory query that fails aborts the run.
    pub mandatory: bool,
}

impl OverpassQuery {
    /// Create a non-mandatory query from raw Overpass QL.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mandatory: false,
        }
    }

    /// Mark the query as mandatory.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Train route relations inside an area, followed by the
    /// station/halt/stop nodes that are members of those relations.
    ///
    /// `area_id` is an Overpass area id (OSM relation id + 3600000000).
    pub fn train_routes_in_area(area_id: u64, timeout_secs: u64) -> Self {
        let text = format!(
            "[out:json][timeout:{timeout_secs}];\n\
             area({area_id})->.searchArea;\n\
             relation[\"route\"=\"train\"](area.searchArea)->.rels;\n\
             .rels out;\n\
             node(r.rels)->.nodesOfRels;\n\
             node.nodesOfRels[\"railway\"~\"station|halt|stop\"]->.stations;\n\
             .stations out;\n"
        );
        Self::new(text)
    }
}

/// Configuration for the Overpass client.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    /// Interpreter endpoint URL
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries after the first failed attempt
    pub max_retries: u32,
    /// Base delay between retries; attempt `n` waits `n * retry_backoff`
    pub retry_backoff: Duration,
    /// Pause between consecutive queries of one run
    pub pause_between_queries: Duration,
}

impl OverpassConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom endpoint (for mirrors or testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the retry policy.
    pub fn with_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = backoff;
        self
    }

    /// Set the pause between queries.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause_between_queries = pause;
        self
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff: Duration::from_secs(5),
            pause_between_queries: Duration::from_secs(2),
        }
    }
}

/// Client for the Overpass API.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    config: OverpassConfig,
}

impl OverpassClient {
    /// Create a new Overpass client.
    pub fn new(config: OverpassConfig) -> Result<Self, OverpassError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("rail-network/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OverpassConfig {
        &self.config
    }

    /// Run a query once.
    pub async fn query(&self, query: &str) -> Result<OverpassResponse, OverpassError> {
        let response = self
            .http
            .post(&self.config.endpoint)
            .form(&[("data", query)])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(OverpassError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OverpassError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| OverpassError::Json {
            message: e.to_string(),
        })
    }

    /// Run a query, retrying transient failures.
    pub async fn query_with_retries(&self, query: &str) -> Result<OverpassResponse, OverpassError> {
        let mut attempt = 0;
        loop {
            match self.query(query).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_backoff * attempt;
                    warn!(attempt, error = %e, delay_secs = delay.as_secs(), "Overpass query failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    debug!(attempt, error = %e, "Overpass query failed");
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = OverpassConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.pause_between_queries, Duration::from_secs(2));
    }

    #[test]
    fn config_builders() {
        let config = OverpassConfig::new()
            .with_endpoint("http://localhost:12345/api/interpreter")
            .with_timeout(10)
            .with_retries(0, Duration::ZERO)
            .with_pause(Duration::ZERO);

        assert_eq!(config.endpoint, "http://localhost:12345/api/interpreter");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.pause_between_queries, Duration::ZERO);
    }

    #[test]
    fn area_query_text() {
        let query = OverpassQuery::train_routes_in_area(3600041977, 300);
        assert!(!query.mandatory);
        assert!(query.text.starts_with("[out:json][timeout:300];"));
        assert!(query.text.contains("area(3600041977)->.searchArea;"));
        assert!(query.text.contains("relation[\"route\"=\"train\"](area.searchArea)"));
        assert!(query.text.contains("[\"railway\"~\"station|halt|stop\"]"));
    }

    #[test]
    fn mandatory_query() {
        assert!(OverpassQuery::new("[out:json];node(1);out;").mandatory().mandatory);
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_without_retries() {
        let config = OverpassConfig::new()
            .with_endpoint("http://127.0.0.1:9/api/interpreter")
            .with_timeout(2)
            .with_retries(0, Duration::ZERO);
        let client = OverpassClient::new(config).unwrap();

        let err = client.query_with_retries("[out:json];node(1);out;").await.unwrap_err();
        assert!(matches!(err, OverpassError::Http(_)));
    }
}
