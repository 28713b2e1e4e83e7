//! Railway network construction.
//!
//! This module turns merged raw batches into a normalized network
//! document. The pipeline is synchronous and single-threaded:
//!
//! 1. [`ElementStore`] merges batches, first record per id wins.
//! 2. Points tagged as stations are classified into [`Station`]s.
//! 3. [`LineBuilder`] walks each route, promoting qualifying members.
//! 4. [`SegmentSynthesizer`] derives one segment per unordered stop pair.
//! 5. [`assemble`] composes the document.
//!
//! Given the same batches and configuration, the output is identical,
//! including ordering.
//!
//! [`Station`]: crate::domain::Station

mod assemble;
mod classify;
mod config;
mod lines;
mod rules;
mod segments;
mod store;


pub use assemble::assemble;
pub use classify::{StationClassifier, StationSet};
pub use config::{BuildConfig, ConfigError};
pub use lines::{LineBuilder, RouteOutcome, collapse_adjacent};
pub use rules::{KeywordRule, RuleSet};
pub use segments::{SegmentSynthesizer, SynthesisOutcome, haversine_km};
pub use store::{ElementStore, PointIndex};

use tracing::info;

use crate::domain::{BuildError, NetworkDocument};
use crate::overpass::Batch;

/// Counts describing one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub points: usize,
    pub routes: usize,
    /// Stations from points tagged as stations.
    pub tagged_stations: usize,
    /// Stations promoted from route members.
    pub promoted_stations: usize,
    pub lines: usize,
    pub discarded_routes: usize,
    pub segments: usize,
    /// Route members that resolved to no station.
    pub skipped_members: usize,
    /// Stop pairs with an endpoint missing from the point index.
    pub skipped_pairs: usize,
}

/// A built document and the counts describing how it was built.
#[derive(Debug, Clone)]
pub struct NetworkBuild {
    pub document: NetworkDocument,
    pub stats: BuildStats,
}

/// Build a network document from input batches.
///
/// Fails only if a mandatory batch is unavailable or an element is
/// malformed.
pub fn build_network(
    name: &str,
    batches: Vec<Batch>,
    config: &BuildConfig,
) -> Result<NetworkBuild, BuildError> {
    let store = ElementStore::merge(batches)?;
    let mut stats = BuildStats {
        points: store.points().len(),
        routes: store.routes().len(),
        ..BuildStats::default()
    };

    info!(
        points = stats.points,
        routes = stats.routes,
        "Merged dataset"
    );

    let classifier = StationClassifier::new(config);
    let mut stations = StationSet::new();
    for point in store.points().iter() {
        if classifier.is_station_point(point) {
            stations.insert(classifier.classify(point));
        }
    }
    stats.tagged_stations = stations.len();

    let builder = LineBuilder::new(config, &classifier);
    let mut lines = Vec::new();
    for route in store.routes() {
        let outcome = builder.build(route, &mut stations, store.points());
        stats.promoted_stations += outcome.promoted;
        stats.skipped_members += outcome.skipped_members;
        match outcome.line {
            Some(line) => lines.push(line),
            None => stats.discarded_routes += 1,
        }
    }
    stats.lines = lines.len();

    let synthesis = SegmentSynthesizer::new(config).synthesize(&lines, store.points());
    stats.segments = synthesis.segments.len();
    stats.skipped_pairs = synthesis.skipped_pairs;

    let document = assemble(name, stations, synthesis.segments, lines);

    info!(
        lines = stats.lines,
        segments = stats.segments,
        stations = document.stations.len(),
        promoted = stats.promoted_stations,
        discarded = stats.discarded_routes,
        "Built network"
    );

    Ok(NetworkBuild { document, stats })
}
