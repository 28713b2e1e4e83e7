//! Raw geodata elements.
//!
//! These are the tagged points and ordered-membership routes returned by
//! the geodata query service, after basic shape validation. They are
//! immutable once ingested.

use std::collections::BTreeMap;
use std::fmt;

/// Free-text tags attached to an element. Keys are unique.
pub type Tags = BTreeMap<String, String>;

/// Identifier of a raw element, unique within a merged dataset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub i64);

impl ElementId {
    /// Returns the raw integer identifier.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tagged geographic point.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    pub id: ElementId,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: Tags,
}

impl RawPoint {
    /// Look up a tag value.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

/// What a route member refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Point,
    Way,
    Route,
}

/// One entry in a route's ordered membership list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub reference: ElementId,
    pub role: Option<String>,
}

impl Member {
    /// The member role, treating an empty role as absent.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref().filter(|r| !r.is_empty())
    }
}

/// A tagged route with an ordered list of members.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRoute {
    pub id: ElementId,
    pub tags: Tags,
    pub members: Vec<Member>,
}

impl RawRoute {
    /// Look up a tag value.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Members that refer to points, in route order.
    pub fn point_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.kind == MemberKind::Point)
    }
}

/// Any element that can appear in a batch.
///
/// Ways are carried through so that identifier deduplication sees them,
/// but nothing downstream consumes their geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum RawElement {
    Point(RawPoint),
    Route(RawRoute),
    Way(ElementId),
}

impl RawElement {
    /// The element's identifier.
    pub fn id(&self) -> ElementId {
        match self {
            RawElement::Point(p) => p.id,
            RawElement::Route(r) => r.id,
            RawElement::Way(id) => *id,
        }
    }
}
