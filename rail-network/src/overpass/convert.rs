//! Conversion from Overpass DTOs to raw domain elements.

use crate::domain::{BuildError, ElementId, Member, MemberKind, RawElement, RawPoint, RawRoute};

use super::types::{Element, MemberDto, NodeDto, RelationDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A node was returned without coordinates
    #[error("node {0} has no coordinates")]
    MissingCoordinates(i64),

    /// A relation member has a type we don't recognise
    #[error("relation {relation} has member of unknown type {kind:?}")]
    UnknownMemberKind { relation: i64, kind: String },
}

impl ConversionError {
    /// The id of the offending element.
    pub fn element_id(&self) -> ElementId {
        match self {
            ConversionError::MissingCoordinates(id) => ElementId(*id),
            ConversionError::UnknownMemberKind { relation, .. } => ElementId(*relation),
        }
    }
}

impl From<ConversionError> for BuildError {
    fn from(err: ConversionError) -> Self {
        BuildError::MalformedElement {
            id: err.element_id(),
            reason: err.to_string(),
        }
    }
}

/// Convert a single Overpass element.
pub fn convert_element(element: &Element) -> Result<RawElement, ConversionError> {
    match element {
        Element::Node(node) => convert_node(node).map(RawElement::Point),
        Element::Relation(rel) => convert_relation(rel).map(RawElement::Route),
        Element::Way(way) => Ok(RawElement::Way(ElementId(way.id))),
    }
}

fn convert_node(node: &NodeDto) -> Result<RawPoint, ConversionError> {
    let (Some(latitude), Some(longitude)) = (node.lat, node.lon) else {
        return Err(ConversionError::MissingCoordinates(node.id));
    };

    Ok(RawPoint {
        id: ElementId(node.id),
        latitude,
        longitude,
        tags: node.tags.clone(),
    })
}

fn convert_relation(rel: &RelationDto) -> Result<RawRoute, ConversionError> {
    let members = rel
        .members
        .iter()
        .map(|m| convert_member(rel.id, m))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawRoute {
        id: ElementId(rel.id),
        tags: rel.tags.clone(),
        members,
    })
}

fn convert_member(relation: i64, member: &MemberDto) -> Result<Member, ConversionError> {
    let kind = match member.kind.as_str() {
        "node" => MemberKind::Point,
        "way" => MemberKind::Way,
        "relation" => MemberKind::Route,
        other => {
            return Err(ConversionError::UnknownMemberKind {
                relation,
                kind: other.to_string(),
            });
        }
    };

    Ok(Member {
        kind,
        reference: ElementId(member.reference),
        role: member.role.clone(),
    })
}
