//! Nested output profile.
//!
//! ```json
//! { "network": { "nodes": [...], "edges": [{"from_node", "to_node",
//!   "distance", "track_type", "max_speed", "bidirectional", "capacity"}] },
//!   "trains": [], "lines": [{"id", "name", "color", "stations": [...]}],
//!   "schedules": [] }
//! ```

use serde::Serialize;

use crate::domain::{Line, NetworkDocument, Segment, StationId, TrackType};

use super::NodeDto;

#[derive(Debug, Serialize)]
pub struct NestedDocument<'a> {
    pub network: NestedNetwork<'a>,
    pub trains: &'a [serde_json::Value],
    pub lines: Vec<NestedLine<'a>>,
    pub schedules: &'a [serde_json::Value],
}

#[derive(Debug, Serialize)]
pub struct NestedNetwork<'a> {
    pub nodes: Vec<NodeDto<'a>>,
    pub edges: Vec<NestedEdge>,
}

#[derive(Debug, Serialize)]
pub struct NestedEdge {
    pub from_node: StationId,
    pub to_node: StationId,
    pub distance: f64,
    pub track_type: TrackType,
    pub max_speed: u32,
    pub bidirectional: bool,
    pub capacity: u32,
}

#[derive(Debug, Serialize)]
pub struct NestedLine<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub color: &'static str,
    pub stations: Vec<StationId>,
}

impl From<&Segment> for NestedEdge {
    fn from(seg: &Segment) -> Self {
        Self {
            from_node: seg.from,
            to_node: seg.to,
            distance: seg.distance_km,
            track_type: seg.track_type,
            max_speed: seg.max_speed,
            bidirectional: seg.bidirectional,
            capacity: seg.capacity,
        }
    }
}

impl<'a> From<&'a Line> for NestedLine<'a> {
    fn from(line: &'a Line) -> Self {
        Self {
            id: line.id(),
            name: line.name(),
            color: line.color(),
            stations: line.station_ids().collect(),
        }
    }
}

impl<'a> From<&'a NetworkDocument> for NestedDocument<'a> {
    fn from(doc: &'a NetworkDocument) -> Self {
        Self {
            network: NestedNetwork {
                nodes: doc.stations.iter().map(NodeDto::from).collect(),
                edges: doc.segments.iter().map(NestedEdge::from).collect(),
            },
            trains: &doc.trains,
            lines: doc.lines.iter().map(NestedLine::from).collect(),
            schedules: &doc.schedules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::fixtures;
    use serde_json::json;

    #[test]
    fn nested_shape() {
        let doc = fixtures::document();
        let value = serde_json::to_value(NestedDocument::from(&doc)).unwrap();

        assert!(value.get("nodes").is_none());
        assert!(value.get("name").is_none());
        assert_eq!(value["network"]["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["trains"], json!([]));
        assert_eq!(value["schedules"], json!([]));

        assert_eq!(
            value["network"]["edges"][0],
            json!({
                "from_node": "1",
                "to_node": "2",
                "distance": 12.34,
                "track_type": "highSpeed",
                "max_speed": 250,
                "bidirectional": true,
                "capacity": 10
            })
        );

        assert_eq!(
            value["lines"][0],
            json!({
                "id": "L_9",
                "name": "Frecciarossa",
                "color": "#FF0000",
                "stations": ["1", "2"]
            })
        );
    }

    #[test]
    fn top_level_key_order() {
        let doc = fixtures::document();
        let text = serde_json::to_string(&NestedDocument::from(&doc)).unwrap();
        let network = text.find("\"network\"").unwrap();
        let trains = text.find("\"trains\"").unwrap();
        let lines = text.find("\"lines\"").unwrap();
        let schedules = text.find("\"schedules\"").unwrap();
        assert!(network < trains && trains < lines && lines < schedules);
    }
}
