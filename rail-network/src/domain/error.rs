//! Domain error types.
//!
//! Only the conditions that abort a build are errors. Unresolvable
//! references and degenerate routes are recovered where they occur.

use super::ElementId;

/// Fatal errors from building a network document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BuildError {
    /// A mandatory input batch produced no usable data
    #[error("mandatory batch {batch} unavailable: {reason}")]
    FetchFailure { batch: String, reason: String },

    /// A raw element is missing a required field
    #[error("malformed element {id}: {reason}")]
    MalformedElement { id: ElementId, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BuildError::FetchFailure {
            batch: "1/1".into(),
            reason: "HTTP error: timed out".into(),
        };
        assert_eq!(
            err.to_string(),
            "mandatory batch 1/1 unavailable: HTTP error: timed out"
        );

        let err = BuildError::MalformedElement {
            id: ElementId(42),
            reason: "point has no coordinates".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed element 42: point has no coordinates"
        );
    }
}
