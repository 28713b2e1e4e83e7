//! Segment synthesis.
//!
//! Every consecutive stop pair of every line becomes a track segment,
//! unless a segment for the same unordered pair already exists. The first
//! line to traverse a pair fixes the segment's classification.

use std::collections::HashSet;

use tracing::trace;

use crate::domain::{Line, PairKey, Segment, StationId};

use super::config::BuildConfig;
use super::store::PointIndex;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

fn round_2dp(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Result of synthesizing segments for a set of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisOutcome {
    /// Segments in synthesis order.
    pub segments: Vec<Segment>,
    /// Pairs skipped because an endpoint was missing from the point index.
    pub skipped_pairs: usize,
}

/// Derives unique undirected segments from line stop sequences.
#[derive(Debug, Clone)]
pub struct SegmentSynthesizer {
    curvature_factor: f64,
    min_km: f64,
    capacity: u32,
    bidirectional: bool,
}

impl SegmentSynthesizer {
    pub fn new(config: &BuildConfig) -> Self {
        Self {
            curvature_factor: config.curvature_factor,
            min_km: config.min_segment_km,
            capacity: config.segment_capacity,
            bidirectional: config.bidirectional,
        }
    }

    /// Estimated track length between two points.
    ///
    /// Great-circle distance scaled by the curvature factor, rounded to
    /// two decimals and never below the minimum length.
    pub fn track_km(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let km = haversine_km(lat1, lon1, lat2, lon2) * self.curvature_factor;
        round_2dp(km).max(self.min_km)
    }

    /// Synthesize segments for lines in build order.
    pub fn synthesize(&self, lines: &[Line], points: &PointIndex) -> SynthesisOutcome {
        let mut seen = HashSet::new();
        let mut segments = Vec::new();
        let mut skipped_pairs = 0;

        for line in lines {
            let stops: Vec<StationId> = line.station_ids().collect();
            for pair in stops.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                let key = PairKey::new(from, to);
                if seen.contains(&key) {
                    continue;
                }

                let (Some(a), Some(b)) = (points.get(from.point()), points.get(to.point())) else {
                    trace!(line = line.id(), %from, %to, "Endpoint missing from point index");
                    skipped_pairs += 1;
                    continue;
                };

                let class = line.class();
                seen.insert(key);
                segments.push(Segment {
                    from,
                    to,
                    distance_km: self.track_km(a.latitude, a.longitude, b.latitude, b.longitude),
                    track_type: class.track_type(),
                    max_speed: class.max_speed(),
                    capacity: self.capacity,
                    bidirectional: self.bidirectional,
                });
            }
        }

        SynthesisOutcome {
            segments,
            skipped_pairs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ElementId, LineStop, RawPoint, RouteClass, Tags, TrackType};

    fn sid(n: i64) -> StationId {
        StationId::from(ElementId(n))
    }

    fn index(points: &[(i64, f64, f64)]) -> PointIndex {
        let mut index = PointIndex::new();
        for &(id, lat, lon) in points {
            index.insert(RawPoint {
                id: ElementId(id),
                latitude: lat,
                longitude: lon,
                tags: Tags::new(),
            });
        }
        index
    }

    fn line(id: &str, class: RouteClass, stops: &[i64]) -> Line {
        let stops = stops
            .iter()
            .map(|&n| LineStop {
                station: sid(n),
                min_dwell_minutes: 3,
            })
            .collect();
        Line::new(id, id, class, stops).unwrap()
    }

    fn synth() -> SegmentSynthesizer {
        SegmentSynthesizer::new(&BuildConfig::default())
    }

    #[test]
    fn haversine_known_distance() {
        // Firenze S.M.N. to Pisa Centrale, roughly 69 km as the crow flies
        let km = haversine_km(43.7764, 11.2479, 43.7085, 10.3980);
        assert!((km - 68.7).abs() < 1.0, "got {km}");
    }

    #[test]
    fn haversine_zero() {
        assert_eq!(haversine_km(43.0, 11.0, 43.0, 11.0), 0.0);
    }

    #[test]
    fn track_km_applies_factor_and_rounding() {
        let s = synth();
        let straight = haversine_km(43.0, 11.0, 43.1, 11.0);
        let km = s.track_km(43.0, 11.0, 43.1, 11.0);
        assert_eq!(km, round_2dp(straight * 1.25));
        assert_eq!(km, (km * 100.0).round() / 100.0);
    }

    #[test]
    fn track_km_floor() {
        assert_eq!(synth().track_km(43.0, 11.0, 43.0001, 11.0), 0.5);
        assert_eq!(synth().track_km(43.0, 11.0, 43.0, 11.0), 0.5);
    }

    #[test]
    fn one_segment_per_unordered_pair() {
        let points = index(&[(1, 43.0, 11.0), (2, 43.1, 11.0), (3, 43.2, 11.0)]);
        let lines = vec![
            line("L_1", RouteClass::Regional, &[1, 2, 3, 2, 1]),
            line("L_2", RouteClass::Regional, &[3, 2]),
        ];

        let outcome = synth().synthesize(&lines, &points);
        assert_eq!(outcome.segments.len(), 2);
        assert_eq!(outcome.segments[0].key(), PairKey::new(sid(1), sid(2)));
        assert_eq!(outcome.segments[1].key(), PairKey::new(sid(2), sid(3)));
    }

    #[test]
    fn first_line_fixes_classification() {
        let points = index(&[(1, 43.0, 11.0), (2, 43.5, 11.0)]);
        let lines = vec![
            line("L_1", RouteClass::HighSpeed, &[1, 2]),
            line("L_2", RouteClass::Regional, &[2, 1]),
        ];

        let outcome = synth().synthesize(&lines, &points);
        assert_eq!(outcome.segments.len(), 1);
        let seg = &outcome.segments[0];
        assert_eq!(seg.track_type, TrackType::HighSpeed);
        assert_eq!(seg.max_speed, 250);
        assert_eq!((seg.from, seg.to), (sid(1), sid(2)));
    }

    #[test]
    fn missing_endpoint_skipped() {
        let points = index(&[(1, 43.0, 11.0), (2, 43.1, 11.0)]);
        let lines = vec![line("L_1", RouteClass::Intercity, &[1, 2, 9])];

        let outcome = synth().synthesize(&lines, &points);
        assert_eq!(outcome.segments.len(), 1);
        assert_eq!(outcome.skipped_pairs, 1);
    }

    #[test]
    fn fixed_attributes() {
        let points = index(&[(1, 43.0, 11.0), (2, 43.1, 11.0)]);
        let outcome = synth().synthesize(&[line("L_1", RouteClass::Intercity, &[1, 2])], &points);

        let seg = &outcome.segments[0];
        assert_eq!(seg.track_type, TrackType::Double);
        assert_eq!(seg.max_speed, 180);
        assert_eq!(seg.capacity, 10);
        assert!(seg.bidirectional);
    }
}
