//! The normalized network document.

use super::line::Line;
use super::segment::Segment;
use super::station::{Station, StationId};

/// Root aggregate produced by a build.
///
/// Stations are in first-seen order, segments in synthesis order and
/// lines in build order. Rolling stock and timetables are not produced
/// by this crate; their collections are always empty and exist so that
/// output profiles can emit them.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDocument {
    pub name: String,
    pub stations: Vec<Station>,
    pub segments: Vec<Segment>,
    pub lines: Vec<Line>,
    pub trains: Vec<serde_json::Value>,
    pub schedules: Vec<serde_json::Value>,
}

impl NetworkDocument {
    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id == id)
    }
}
