//! Railway network normalizer.
//!
//! Fetches train routes and station points from OpenStreetMap (via the
//! Overpass API, or from saved responses), normalizes them into stations,
//! lines and track segments, and writes the result as a simulator network
//! document in one of two output profiles.

pub mod domain;
pub mod error;
pub mod export;
pub mod network;
pub mod overpass;

pub use error::Error;
