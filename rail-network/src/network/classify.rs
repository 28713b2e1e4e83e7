//! Station classification.
//!
//! Turns a raw point into a station: resolves and normalizes its name,
//! decides whether it is an interchange, and derives platform count and
//! capacity from that type.

use std::collections::HashMap;

use crate::domain::{RawPoint, Station, StationId, StationType};

use super::config::BuildConfig;
use super::rules::RuleSet;

/// Pure point → station classifier.
#[derive(Debug, Clone)]
pub struct StationClassifier {
    /// Prefixes ordered longest first.
    prefixes: Vec<String>,
    rules: RuleSet<StationType>,
    railway_values: Vec<String>,
    placeholder: String,
}

impl StationClassifier {
    pub fn new(config: &BuildConfig) -> Self {
        let mut prefixes = config.name_prefixes.clone();
        // Stable sort keeps configured order among equal lengths
        prefixes.sort_by_key(|p| std::cmp::Reverse(p.len()));

        Self {
            prefixes,
            rules: config.station_rules(),
            railway_values: config.station_railway_values.clone(),
            placeholder: config.station_name_placeholder.clone(),
        }
    }

    /// Whether the point is tagged as a station in its own right.
    pub fn is_station_point(&self, point: &RawPoint) -> bool {
        point
            .tag("railway")
            .is_some_and(|v| self.railway_values.iter().any(|r| r == v))
    }

    /// `name`, else `ref`, else a placeholder containing the point id.
    pub fn resolve_name(&self, point: &RawPoint) -> String {
        point
            .tag("name")
            .or_else(|| point.tag("ref"))
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", self.placeholder, point.id))
    }

    /// Strip configured prefixes, longest first.
    pub fn normalize_name(&self, name: &str) -> String {
        let mut name = name;
        for prefix in &self.prefixes {
            if let Some(rest) = name.strip_prefix(prefix.as_str()) {
                name = rest;
            }
        }
        name.to_string()
    }

    /// Classify a point. Identical input always yields an identical station.
    pub fn classify(&self, point: &RawPoint) -> Station {
        let name = self.normalize_name(&self.resolve_name(point));
        let station_type = self.rules.classify(&name);

        Station {
            id: StationId::from(point.id),
            name,
            station_type,
            latitude: point.latitude,
            longitude: point.longitude,
            platform_count: station_type.platform_count(),
            capacity: station_type.capacity(),
        }
    }
}

/// Stations keyed by id, iterable in insertion order.
///
/// There is a single writer per build; stations are never replaced once
/// inserted.
#[derive(Debug, Clone, Default)]
pub struct StationSet {
    stations: Vec<Station>,
    by_id: HashMap<StationId, usize>,
}

impl StationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a station unless its id is already present.
    ///
    /// Returns whether the station was inserted.
    pub fn insert(&mut self, station: Station) -> bool {
        if self.by_id.contains_key(&station.id) {
            return false;
        }
        self.by_id.insert(station.id, self.stations.len());
        self.stations.push(station);
        true
    }

    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.by_id.get(&id).map(|&i| &self.stations[i])
    }

    pub fn contains(&self, id: StationId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations in insertion order.
    pub fn into_vec(self) -> Vec<Station> {
        self.stations
    }
}
