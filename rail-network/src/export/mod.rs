//! Output profiles.
//!
//! Two downstream schemas exist for the same network. Each is an
//! independent serde adapter over [`NetworkDocument`]; the document
//! itself is built once.

mod flat;
mod nested;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{NetworkDocument, Station, StationId, StationType};

pub use flat::FlatDocument;
pub use nested::NestedDocument;

/// Error writing an output document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which output schema to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputProfile {
    /// Top-level `nodes`/`edges`/`lines`/`trains` with camelCase edges
    /// and per-stop dwell times.
    #[default]
    Flat,
    /// `network: {nodes, edges}` with snake_case edges, flat station
    /// lists on lines, plus empty `trains` and `schedules`.
    Nested,
}

/// Error parsing an output profile name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output profile {0:?} (expected \"a\"/\"flat\" or \"b\"/\"nested\")")]
pub struct InvalidProfile(String);

impl FromStr for OutputProfile {
    type Err = InvalidProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "flat" => Ok(OutputProfile::Flat),
            "b" | "nested" => Ok(OutputProfile::Nested),
            _ => Err(InvalidProfile(s.to_string())),
        }
    }
}

impl fmt::Display for OutputProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputProfile::Flat => f.write_str("flat"),
            OutputProfile::Nested => f.write_str("nested"),
        }
    }
}

/// A station as both profiles emit it.
#[derive(Debug, Serialize)]
pub struct NodeDto<'a> {
    pub id: StationId,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub station_type: StationType,
    pub latitude: f64,
    pub longitude: f64,
    pub platform_count: u32,
    pub capacity: u32,
}

impl<'a> From<&'a Station> for NodeDto<'a> {
    fn from(station: &'a Station) -> Self {
        Self {
            id: station.id,
            name: &station.name,
            station_type: station.station_type,
            latitude: station.latitude,
            longitude: station.longitude,
            platform_count: station.platform_count,
            capacity: station.capacity,
        }
    }
}

/// Convert a document to a JSON value in the given profile.
pub fn to_value(
    doc: &NetworkDocument,
    profile: OutputProfile,
) -> Result<serde_json::Value, ExportError> {
    let value = match profile {
        OutputProfile::Flat => serde_json::to_value(FlatDocument::from(doc))?,
        OutputProfile::Nested => serde_json::to_value(NestedDocument::from(doc))?,
    };
    Ok(value)
}

/// Write a document as pretty-printed JSON (2-space indent).
pub fn write_document<W: Write>(
    writer: W,
    doc: &NetworkDocument,
    profile: OutputProfile,
) -> Result<(), ExportError> {
    match profile {
        OutputProfile::Flat => serde_json::to_writer_pretty(writer, &FlatDocument::from(doc))?,
        OutputProfile::Nested => serde_json::to_writer_pretty(writer, &NestedDocument::from(doc))?,
    }
    Ok(())
}

/// Write a document to a file, creating parent directories if needed.
pub fn save_document(
    path: impl AsRef<Path>,
    doc: &NetworkDocument,
    profile: OutputProfile,
) -> Result<(), ExportError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    write_document(&mut writer, doc, profile)?;
    writer.flush()?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn parse_profiles() {
        assert_eq!("a".parse::<OutputProfile>().unwrap(), OutputProfile::Flat);
        assert_eq!("Flat".parse::<OutputProfile>().unwrap(), OutputProfile::Flat);
        assert_eq!("B".parse::<OutputProfile>().unwrap(), OutputProfile::Nested);
        assert_eq!("nested".parse::<OutputProfile>().unwrap(), OutputProfile::Nested);
        assert!("c".parse::<OutputProfile>().is_err());
    }

    #[test]
    fn node_fields() {
        let doc = fixtures::document();
        let value = serde_json::to_value(NodeDto::from(&doc.stations[0])).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1",
                "name": "Pisa Centrale",
                "type": "interchange",
                "latitude": 44.0,
                "longitude": 11.0,
                "platform_count": 10,
                "capacity": 20
            })
        );
    }

    #[test]
    fn save_pretty_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("Toscana.rail");
        let doc = fixtures::document();

        save_document(&path, &doc, OutputProfile::Flat).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"name\": \"Toscana\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, to_value(&doc, OutputProfile::Flat).unwrap());
    }

    #[test]
    fn output_is_reproducible() {
        let doc = fixtures::document();
        let mut a = Vec::new();
        let mut b = Vec::new();
        write_document(&mut a, &doc, OutputProfile::Nested).unwrap();
        write_document(&mut b, &doc, OutputProfile::Nested).unwrap();
        assert_eq!(a, b);
    }
}
