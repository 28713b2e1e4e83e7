//! Overpass API retrieval.
//!
//! This module supplies the raw batches a build consumes, either live
//! from an Overpass interpreter or from saved responses on disk, and
//! converts Overpass JSON into raw domain elements.
//!
//! Key characteristics of Overpass:
//! - Area-wide relation queries can run for minutes; requests use a long
//!   timeout and the server may still answer with a `remark` and no
//!   elements
//! - Public instances rate limit aggressively, so consecutive queries are
//!   spaced out and responses can be cached on disk

mod cache;
mod client;
mod convert;
mod error;
mod source;
mod types;

pub use cache::{ResponseCache, ResponseCacheConfig};
pub use client::{OverpassClient, OverpassConfig, OverpassQuery};
pub use convert::{ConversionError, convert_element};
pub use error::OverpassError;
pub use source::{Batch, BatchSource, FileSource, OverpassSource};
pub use types::{Element, MemberDto, NodeDto, OverpassResponse, RelationDto, WayDto};
