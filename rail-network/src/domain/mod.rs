//! Domain types for the railway network builder.
//!
//! Raw elements describe what the geodata service returned; stations,
//! segments and lines are the normalized graph. Types that carry
//! invariants enforce them at construction time.

mod document;
mod element;
mod error;
mod line;
mod segment;
mod station;

pub use document::NetworkDocument;
pub use element::{ElementId, Member, MemberKind, RawElement, RawPoint, RawRoute, Tags};
pub use error::BuildError;
pub use line::{InvalidLine, Line, LineStop, RouteClass};
pub use segment::{PairKey, Segment, TrackType};
pub use station::{Station, StationId, StationType};
