//! Flat output profile.
//!
//! ```json
//! { "name": ..., "nodes": [...], "edges": [{"from", "to", "distance",
//!   "trackType", "maxSpeed", "capacity"}], "lines": [{"id", "name",
//!   "color", "stops": [{"stationId", "minDwellTime"}]}], "trains": [] }
//! ```

use serde::Serialize;

use crate::domain::{Line, NetworkDocument, Segment, StationId, TrackType};

use super::NodeDto;

#[derive(Debug, Serialize)]
pub struct FlatDocument<'a> {
    pub name: &'a str,
    pub nodes: Vec<NodeDto<'a>>,
    pub edges: Vec<FlatEdge>,
    pub lines: Vec<FlatLine<'a>>,
    pub trains: &'a [serde_json::Value],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatEdge {
    pub from: StationId,
    pub to: StationId,
    pub distance: f64,
    pub track_type: TrackType,
    pub max_speed: u32,
    pub capacity: u32,
}

#[derive(Debug, Serialize)]
pub struct FlatLine<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub color: &'static str,
    pub stops: Vec<FlatStop>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatStop {
    pub station_id: StationId,
    pub min_dwell_time: u32,
}

impl From<&Segment> for FlatEdge {
    fn from(seg: &Segment) -> Self {
        Self {
            from: seg.from,
            to: seg.to,
            distance: seg.distance_km,
            track_type: seg.track_type,
            max_speed: seg.max_speed,
            capacity: seg.capacity,
        }
    }
}

impl<'a> From<&'a Line> for FlatLine<'a> {
    fn from(line: &'a Line) -> Self {
        Self {
            id: line.id(),
            name: line.name(),
            color: line.color(),
            stops: line
                .stops()
                .iter()
                .map(|s| FlatStop {
                    station_id: s.station,
                    min_dwell_time: s.min_dwell_minutes,
                })
                .collect(),
        }
    }
}

impl<'a> From<&'a NetworkDocument> for FlatDocument<'a> {
    fn from(doc: &'a NetworkDocument) -> Self {
        Self {
            name: &doc.name,
            nodes: doc.stations.iter().map(NodeDto::from).collect(),
            edges: doc.segments.iter().map(FlatEdge::from).collect(),
            lines: doc.lines.iter().map(FlatLine::from).collect(),
            trains: &doc.trains,
        }
    }
}
