//! Overpass API response DTOs.
//!
//! These types map directly to the Overpass JSON output format. Optional
//! fields stay optional here; validation happens during conversion.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level Overpass JSON response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OverpassResponse {
    /// Producer of the response (e.g., "Overpass API 0.7.62").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// Server-side remark, set when a query timed out or ran out of memory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,

    /// Returned elements. Absent when the query failed server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
}

/// A single element in an Overpass response.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Node(NodeDto),
    Way(WayDto),
    Relation(RelationDto),
}

impl Element {
    /// The element's numeric id.
    pub fn id(&self) -> i64 {
        match self {
            Element::Node(n) => n.id,
            Element::Way(w) => w.id,
            Element::Relation(r) => r.id,
        }
    }
}

/// A node. Coordinates are absent when the query asked for ids only.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeDto {
    pub id: i64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// A way. Only its identity matters to the network builder.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WayDto {
    pub id: i64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

/// A relation with its ordered members.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RelationDto {
    pub id: i64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
    #[serde(default)]
    pub members: Vec<MemberDto>,
}

/// A relation member.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MemberDto {
    /// "node", "way" or "relation".
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "ref")]
    pub reference: i64,

    #[serde(default)]
    pub role: Option<String>,
}
