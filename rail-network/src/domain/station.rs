//! Station types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::element::ElementId;

/// Identifier of a station.
///
/// A station is always created from exactly one raw point, so its
/// identifier is that point's identifier. It renders (and serializes) as
/// the decimal string form of the point id, which is how downstream tools
/// refer to stations.
///
/// # Examples
///
/// ```
/// use rail_network::domain::{ElementId, StationId};
///
/// let id = StationId::from(ElementId(2610474107));
/// assert_eq!(id.as_string(), "2610474107");
/// assert_eq!(id.point(), ElementId(2610474107));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(ElementId);

impl StationId {
    /// The raw point this station was created from.
    pub fn point(self) -> ElementId {
        self.0
    }

    /// The string form used in output documents.
    pub fn as_string(self) -> String {
        self.0.to_string()
    }
}

impl From<ElementId> for StationId {
    fn from(id: ElementId) -> Self {
        StationId(id)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for StationId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Whether a station is an ordinary stop or a major hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationType {
    Station,
    Interchange,
}

impl StationType {
    /// Number of platforms assumed for this type of station.
    pub fn platform_count(self) -> u32 {
        match self {
            StationType::Interchange => 10,
            StationType::Station => 2,
        }
    }

    /// Number of trains the station can hold at once.
    pub fn capacity(self) -> u32 {
        match self {
            StationType::Interchange => 20,
            StationType::Station => 5,
        }
    }
}

/// A normalized station.
///
/// Created by the station classifier and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    pub station_type: StationType,
    pub latitude: f64,
    pub longitude: f64,
    pub platform_count: u32,
    pub capacity: u32,
}
