//! Overpass client error types.

/// Errors that can occur when retrieving data from the Overpass API.
#[derive(Debug, thiserror::Error)]
pub enum OverpassError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by Overpass API")]
    RateLimited,

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to read a saved response
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Cache operation failed
    #[error("cache error: {message}")]
    Cache { message: String },
}

impl OverpassError {
    /// Whether retrying the same request might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            OverpassError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            OverpassError::Api { status, .. } => *status >= 500,
            OverpassError::RateLimited => true,
            OverpassError::Json { .. } | OverpassError::Io { .. } | OverpassError::Cache { .. } => {
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = OverpassError::Api {
            status: 504,
            message: "Gateway Timeout".into(),
        };
        assert_eq!(err.to_string(), "API error 504: Gateway Timeout");

        let err = OverpassError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");
    }

    #[test]
    fn transient_classification() {
        assert!(OverpassError::RateLimited.is_transient());
        assert!(
            OverpassError::Api {
                status: 503,
                message: String::new()
            }
            .is_transient()
        );
        assert!(
            !OverpassError::Api {
                status: 400,
                message: String::new()
            }
            .is_transient()
        );
        assert!(
            !OverpassError::Json {
                message: String::new()
            }
            .is_transient()
        );
    }
}
