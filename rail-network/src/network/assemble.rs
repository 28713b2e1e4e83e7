//! Document assembly.

use crate::domain::{Line, NetworkDocument, Segment};

use super::classify::StationSet;

/// Compose the final document.
///
/// Ordering is taken as given: stations in insertion order, segments in
/// synthesis order, lines in build order.
pub fn assemble(
    name: impl Into<String>,
    stations: StationSet,
    segments: Vec<Segment>,
    lines: Vec<Line>,
) -> NetworkDocument {
    NetworkDocument {
        name: name.into(),
        stations: stations.into_vec(),
        segments,
        lines,
        trains: Vec::new(),
        schedules: Vec::new(),
    }
}
