//! Line types.

use serde::{Deserialize, Serialize};

use super::segment::TrackType;
use super::station::StationId;

/// Error returned when a stop sequence cannot form a line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line: {reason}")]
pub struct InvalidLine {
    reason: &'static str,
}

/// Service class of a route, derived from its display name.
///
/// The class fixes the line colour and the classification of every
/// segment the line is first to traverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteClass {
    HighSpeed,
    Intercity,
    Mainline,
    Regional,
}

impl RouteClass {
    /// Display colour for lines of this class.
    pub fn color(self) -> &'static str {
        match self {
            RouteClass::HighSpeed => "#FF0000",
            RouteClass::Intercity => "#FFA500",
            RouteClass::Mainline | RouteClass::Regional => "#0000FF",
        }
    }

    /// Track type of segments first laid by this class.
    pub fn track_type(self) -> TrackType {
        match self {
            RouteClass::HighSpeed => TrackType::HighSpeed,
            RouteClass::Intercity | RouteClass::Mainline => TrackType::Double,
            RouteClass::Regional => TrackType::Single,
        }
    }

    /// Speed ceiling in km/h of segments first laid by this class.
    pub fn max_speed(self) -> u32 {
        match self {
            RouteClass::HighSpeed => 250,
            RouteClass::Intercity => 180,
            RouteClass::Mainline | RouteClass::Regional => 140,
        }
    }
}

/// A stop on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStop {
    pub station: StationId,
    /// Minimum dwell time at the stop, in minutes.
    pub min_dwell_minutes: u32,
}

/// A named, ordered sequence of stations served by a route.
///
/// Stations are referenced by id only; resolve them against the
/// document's station list.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    id: String,
    name: String,
    class: RouteClass,
    stops: Vec<LineStop>,
}

impl Line {
    /// Create a line, checking that it has at least two stops and no
    /// stop directly repeats the one before it.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        class: RouteClass,
        stops: Vec<LineStop>,
    ) -> Result<Self, InvalidLine> {
        if stops.len() < 2 {
            return Err(InvalidLine {
                reason: "must have at least two stops",
            });
        }

        if stops.windows(2).any(|w| w[0].station == w[1].station) {
            return Err(InvalidLine {
                reason: "adjacent stops must differ",
            });
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            class,
            stops,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> RouteClass {
        self.class
    }

    pub fn color(&self) -> &'static str {
        self.class.color()
    }

    pub fn stops(&self) -> &[LineStop] {
        &self.stops
    }

    /// Station ids in stop order.
    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        self.stops.iter().map(|s| s.station)
    }
}
