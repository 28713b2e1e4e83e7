//! Top-level error for a normalizer run.

use crate::domain::BuildError;
use crate::export::ExportError;
use crate::network::ConfigError;
use crate::overpass::OverpassError;

/// Anything that can stop a run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Overpass(#[from] OverpassError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("failed to write output: {0}")]
    Export(#[from] ExportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementId;

    #[test]
    fn build_error_is_transparent() {
        let err = Error::from(BuildError::MalformedElement {
            id: ElementId(5),
            reason: "node has no coordinates".to_string(),
        });
        assert_eq!(err.to_string(), "malformed element 5: node has no coordinates");
    }

    #[test]
    fn export_error_is_wrapped() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::from(ExportError::from(io));
        assert_eq!(err.to_string(), "failed to write output: I/O error: denied");
    }
}
