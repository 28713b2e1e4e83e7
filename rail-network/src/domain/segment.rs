//! Track segment types.

use serde::{Deserialize, Serialize};

use super::station::StationId;

/// Physical track classification of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackType {
    Single,
    Double,
    HighSpeed,
}

/// Order-independent key for a pair of stations.
///
/// `PairKey::new(a, b) == PairKey::new(b, a)` for all `a`, `b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(StationId, StationId);

impl PairKey {
    /// Build the canonical key for an unordered pair.
    pub fn new(a: StationId, b: StationId) -> Self {
        if a <= b { PairKey(a, b) } else { PairKey(b, a) }
    }

    /// The lower endpoint.
    pub fn low(&self) -> StationId {
        self.0
    }

    /// The higher endpoint.
    pub fn high(&self) -> StationId {
        self.1
    }
}

/// A unique undirected link between two stations.
///
/// `from`/`to` keep the direction in which the segment was first
/// traversed; identity is the unordered [`PairKey`].
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub from: StationId,
    pub to: StationId,
    /// Estimated track length in kilometres, rounded to 2 decimals.
    pub distance_km: f64,
    pub track_type: TrackType,
    /// Speed ceiling in km/h.
    pub max_speed: u32,
    pub capacity: u32,
    pub bidirectional: bool,
}

impl Segment {
    /// The canonical key of this segment's endpoints.
    pub fn key(&self) -> PairKey {
        PairKey::new(self.from, self.to)
    }
}
