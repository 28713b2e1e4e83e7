//! Batch sources.
//!
//! A run consumes one or more batches of raw elements. Sources never fail
//! as a whole: a batch that could not be retrieved is returned as
//! unavailable, and the element store decides whether that is fatal.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::cache::ResponseCache;
use super::client::{OverpassClient, OverpassQuery};
use super::error::OverpassError;
use super::types::{Element, OverpassResponse};

/// One unit of retrieved data.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Human-readable label used in logs and errors (e.g., "1/3").
    pub label: String,
    /// A mandatory batch that yields no data aborts the run.
    pub mandatory: bool,
    /// Retrieved elements, or why they could not be retrieved.
    pub elements: Result<Vec<Element>, String>,
}

impl Batch {
    pub fn available(label: impl Into<String>, mandatory: bool, elements: Vec<Element>) -> Self {
        Self {
            label: label.into(),
            mandatory,
            elements: Ok(elements),
        }
    }

    pub fn unavailable(label: impl Into<String>, mandatory: bool, reason: impl ToString) -> Self {
        Self {
            label: label.into(),
            mandatory,
            elements: Err(reason.to_string()),
        }
    }

    fn from_response(label: String, mandatory: bool, response: OverpassResponse) -> Self {
        match response.elements {
            Some(elements) => Self::available(label, mandatory, elements),
            None => {
                let reason = response
                    .remark
                    .unwrap_or_else(|| "response has no elements".to_string());
                Self::unavailable(label, mandatory, reason)
            }
        }
    }
}

/// Something that can supply the input batches for a run.
pub trait BatchSource {
    /// Retrieve all batches, in order.
    async fn fetch_batches(&self) -> Vec<Batch>;
}

/// Batches fetched live from the Overpass API, one per query.
pub struct OverpassSource {
    client: OverpassClient,
    queries: Vec<OverpassQuery>,
    cache: Option<ResponseCache>,
}

impl OverpassSource {
    pub fn new(client: OverpassClient, queries: Vec<OverpassQuery>) -> Self {
        Self {
            client,
            queries,
            cache: None,
        }
    }

    /// Serve repeated queries from a disk cache.
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    async fn fetch_one(&self, query: &OverpassQuery) -> Result<OverpassResponse, OverpassError> {
        if let Some(cache) = &self.cache
            && let Some(response) = cache.load(&query.text)
        {
            debug!(path = %cache.path_for(&query.text).display(), "Using cached Overpass response");
            return Ok(response);
        }

        let response = self.client.query_with_retries(&query.text).await?;

        if let Some(cache) = &self.cache
            && response.elements.is_some()
            && let Err(e) = cache.save(&query.text, &response)
        {
            warn!(error = %e, "Failed to cache Overpass response");
        }

        Ok(response)
    }
}

impl BatchSource for OverpassSource {
    async fn fetch_batches(&self) -> Vec<Batch> {
        let total = self.queries.len();
        let mut batches = Vec::with_capacity(total);

        for (i, query) in self.queries.iter().enumerate() {
            let label = format!("{}/{}", i + 1, total);
            info!(batch = %label, "Fetching batch");

            let batch = match self.fetch_one(query).await {
                Ok(response) => Batch::from_response(label, query.mandatory, response),
                Err(e) => Batch::unavailable(label, query.mandatory, e),
            };
            let stop = batch.mandatory && batch.elements.is_err();
            batches.push(batch);

            // Later batches cannot rescue a failed mandatory one
            if stop {
                break;
            }

            if i + 1 < total {
                tokio::time::sleep(self.client.config().pause_between_queries).await;
            }
        }

        batches
    }
}

/// Batches read from saved Overpass JSON responses, one per file.
///
/// The first file is mandatory.
pub struct FileSource {
    paths: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    async fn read(path: &Path) -> Result<OverpassResponse, OverpassError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OverpassError::Io {
                message: format!("failed to read {}: {}", path.display(), e),
            })?;

        serde_json::from_str(&json).map_err(|e| OverpassError::Json {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }
}

impl BatchSource for FileSource {
    async fn fetch_batches(&self) -> Vec<Batch> {
        let mut batches = Vec::with_capacity(self.paths.len());

        for (i, path) in self.paths.iter().enumerate() {
            let label = path.display().to_string();
            let mandatory = i == 0;
            let batch = match Self::read(path).await {
                Ok(response) => Batch::from_response(label, mandatory, response),
                Err(e) => Batch::unavailable(label, mandatory, e),
            };
            batches.push(batch);
        }

        batches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const RESPONSE: &str = r#"{
        "elements": [
            {"type": "node", "id": 1, "lat": 43.7, "lon": 10.4, "tags": {"railway": "station"}}
        ]
    }"#;

    #[tokio::test]
    async fn file_source_reads_batches_in_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.json");
        std::fs::write(&first, RESPONSE).unwrap();
        std::fs::write(&second, r#"{"elements": []}"#).unwrap();

        let batches = FileSource::new(vec![first, second]).fetch_batches().await;

        assert_eq!(batches.len(), 2);
        assert!(batches[0].mandatory);
        assert!(!batches[1].mandatory);
        assert_eq!(batches[0].elements.as_ref().unwrap().len(), 1);
        assert!(batches[1].elements.as_ref().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_unavailable() {
        let dir = tempdir().unwrap();
        let batches = FileSource::new(vec![dir.path().join("missing.json")])
            .fetch_batches()
            .await;

        assert_eq!(batches.len(), 1);
        let reason = batches[0].elements.as_ref().unwrap_err();
        assert!(reason.starts_with("I/O error"));
    }

    #[tokio::test]
    async fn response_without_elements_is_unavailable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("timeout.json");
        std::fs::write(&path, r#"{"remark": "runtime error: Query timed out"}"#).unwrap();

        let batches = FileSource::new(vec![path]).fetch_batches().await;

        assert_eq!(
            batches[0].elements.as_ref().unwrap_err(),
            "runtime error: Query timed out"
        );
    }

    #[tokio::test]
    async fn overpass_source_serves_from_cache() {
        use crate::overpass::{OverpassConfig, ResponseCacheConfig};

        let dir = tempdir().unwrap();
        let cache = ResponseCache::new(ResponseCacheConfig::new(dir.path()));
        let query = OverpassQuery::new("[out:json];node(1);out;").mandatory();
        let response: OverpassResponse = serde_json::from_str(RESPONSE).unwrap();
        cache.save(&query.text, &response).unwrap();

        // Unreachable endpoint: only the cache can satisfy the query
        let config = OverpassConfig::new()
            .with_endpoint("http://127.0.0.1:9/api/interpreter")
            .with_retries(0, std::time::Duration::ZERO);
        let client = OverpassClient::new(config).unwrap();
        let source = OverpassSource::new(client, vec![query]).with_cache(cache);

        let batches = source.fetch_batches().await;
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].label, "1/1");
        assert_eq!(batches[0].elements.as_ref().unwrap().len(), 1);
    }
}
