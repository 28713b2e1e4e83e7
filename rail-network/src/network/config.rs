//! Build configuration for the network builder.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{RouteClass, StationType};

use super::rules::{KeywordRule, RuleSet};

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Parameters controlling station classification, line building and
/// segment synthesis.
///
/// Every field has a default; a JSON config file only needs to list the
/// fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Values of the `railway` tag that make a point a station.
    pub station_railway_values: Vec<String>,

    /// Member roles that allow an unnamed route member to be promoted.
    pub promotion_roles: Vec<String>,

    /// Name prefixes to strip. Longer prefixes are applied first.
    pub name_prefixes: Vec<String>,

    /// Substrings of a normalized name that mark an interchange.
    pub interchange_keywords: Vec<String>,

    /// Ordered route-name rules, first match wins.
    pub route_rules: Vec<KeywordRule<RouteClass>>,

    /// Class of routes no rule matches.
    pub default_route_class: RouteClass,

    /// Ratio of track length to great-circle distance.
    pub curvature_factor: f64,

    /// Minimum segment length in kilometres.
    pub min_segment_km: f64,

    /// Dwell time at every stop (minutes).
    pub dwell_minutes: u32,

    /// Capacity of every segment.
    pub segment_capacity: u32,

    /// Whether segments can be used in both directions.
    pub bidirectional: bool,

    /// Name of routes with neither `name` nor `ref`.
    pub route_name_placeholder: String,

    /// Prefix for stations with neither `name` nor `ref`; the point id is appended.
    pub station_name_placeholder: String,

    /// Prefix for line ids; the route id is appended.
    pub line_id_prefix: String,
}

impl BuildConfig {
    /// Load a config from a JSON file, using defaults for missing fields.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Set the curvature correction factor.
    pub fn with_curvature_factor(mut self, factor: f64) -> Self {
        self.curvature_factor = factor;
        self
    }

    /// Set the minimum segment length.
    pub fn with_min_segment_km(mut self, km: f64) -> Self {
        self.min_segment_km = km;
        self
    }

    /// Replace the interchange keywords.
    pub fn with_interchange_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interchange_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the route rules.
    pub fn with_route_rules(mut self, rules: Vec<KeywordRule<RouteClass>>) -> Self {
        self.route_rules = rules;
        self
    }

    /// Rules deciding a station's type from its normalized name.
    pub fn station_rules(&self) -> RuleSet<StationType> {
        RuleSet::new(StationType::Station).with_rule(KeywordRule::new(
            self.interchange_keywords.iter().cloned(),
            StationType::Interchange,
        ))
    }

    /// Rules deciding a route's class from its display name.
    pub fn route_class_rules(&self) -> RuleSet<RouteClass> {
        RuleSet::from_rules(self.route_rules.clone(), self.default_route_class)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            station_railway_values: strings(&["station", "halt", "stop"]),
            promotion_roles: strings(&["stop", "platform", "station"]),
            name_prefixes: strings(&["Stazione di ", "Stazione "]),
            interchange_keywords: strings(&[
                "Centrale", "S.M.N.", "P.P.", "Porta", "Bologna", "Genova", "Pisa", "Firenze",
            ]),
            route_rules: vec![
                KeywordRule::new(["Frec"], RouteClass::HighSpeed),
                KeywordRule::new(["IC", "Direttissima"], RouteClass::Intercity),
                KeywordRule::new(["Tirrenica"], RouteClass::Mainline),
            ],
            default_route_class: RouteClass::Regional,
            curvature_factor: 1.25,
            min_segment_km: 0.5,
            dwell_minutes: 3,
            segment_capacity: 10,
            bidirectional: true,
            route_name_placeholder: "Linea".to_string(),
            station_name_placeholder: "Stop ".to_string(),
            line_id_prefix: "L_".to_string(),
        }
    }
}
