//! Line building.
//!
//! Walks a route's point members in order, resolving each to a station
//! (promoting qualifying points on first encounter), collapses adjacent
//! repeats, and emits a line if at least two stops remain.

use tracing::{debug, trace};

use crate::domain::{Line, LineStop, RawRoute, RouteClass, StationId};

use super::classify::{StationClassifier, StationSet};
use super::config::BuildConfig;
use super::rules::RuleSet;
use super::store::PointIndex;

/// What building one route produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteOutcome {
    /// The line, or `None` if the route was degenerate.
    pub line: Option<Line>,
    /// Stations newly promoted from this route's members.
    pub promoted: usize,
    /// Point members that resolved to no station.
    pub skipped_members: usize,
}

/// Builds lines from routes.
#[derive(Debug, Clone)]
pub struct LineBuilder<'a> {
    config: &'a BuildConfig,
    classifier: &'a StationClassifier,
    route_rules: RuleSet<RouteClass>,
}

impl<'a> LineBuilder<'a> {
    pub fn new(config: &'a BuildConfig, classifier: &'a StationClassifier) -> Self {
        Self {
            config,
            classifier,
            route_rules: config.route_class_rules(),
        }
    }

    /// `name`, else `ref`, else the configured placeholder.
    pub fn route_name(&self, route: &RawRoute) -> String {
        route
            .tag("name")
            .or_else(|| route.tag("ref"))
            .unwrap_or(self.config.route_name_placeholder.as_str())
            .to_string()
    }

    /// Class of a route from its display name.
    pub fn route_class(&self, name: &str) -> RouteClass {
        self.route_rules.classify(name)
    }

    /// Build one route.
    ///
    /// Promoted stations are added to `stations` even if the route turns
    /// out to be degenerate.
    pub fn build(
        &self,
        route: &RawRoute,
        stations: &mut StationSet,
        points: &PointIndex,
    ) -> RouteOutcome {
        let mut stops = Vec::new();
        let mut promoted = 0;
        let mut skipped_members = 0;

        for member in route.point_members() {
            let id = StationId::from(member.reference);

            if stations.contains(id) {
                stops.push(id);
                continue;
            }

            let Some(point) = points.get(member.reference) else {
                trace!(route = %route.id, member = %member.reference, "Member not in point index");
                skipped_members += 1;
                continue;
            };

            let has_name = point.tag("name").is_some();
            let has_stop_role = member
                .role()
                .is_some_and(|role| self.config.promotion_roles.iter().any(|r| r == role));

            if has_name || has_stop_role {
                stations.insert(self.classifier.classify(point));
                promoted += 1;
                stops.push(id);
            } else {
                skipped_members += 1;
            }
        }

        let stops = collapse_adjacent(stops);
        let name = self.route_name(route);

        if stops.len() < 2 {
            debug!(route = %route.id, name = %name, stops = stops.len(), "Discarding degenerate route");
            return RouteOutcome {
                line: None,
                promoted,
                skipped_members,
            };
        }

        let class = self.route_class(&name);
        let stops = stops
            .into_iter()
            .map(|station| LineStop {
                station,
                min_dwell_minutes: self.config.dwell_minutes,
            })
            .collect();
        let id = format!("{}{}", self.config.line_id_prefix, route.id);

        // Collapsed and length-checked above
        let line = Line::new(id, name, class, stops).ok();

        RouteOutcome {
            line,
            promoted,
            skipped_members,
        }
    }
}

/// Remove entries equal to the one directly before them.
///
/// Non-adjacent repeats are kept: `[A, B, A]` is two visits to `A`.
pub fn collapse_adjacent(mut stops: Vec<StationId>) -> Vec<StationId> {
    stops.dedup();
    stops
}
