//! Element store: merges batches into one deduplicated dataset.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};

use crate::domain::{BuildError, ElementId, RawElement, RawPoint, RawRoute};
use crate::overpass::{Batch, convert_element};

/// Points keyed by id, iterable in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct PointIndex {
    points: Vec<RawPoint>,
    by_id: HashMap<ElementId, usize>,
}

impl PointIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point unless one with the same id is already present.
    ///
    /// Returns whether the point was inserted.
    pub fn insert(&mut self, point: RawPoint) -> bool {
        if self.by_id.contains_key(&point.id) {
            return false;
        }
        self.by_id.insert(point.id, self.points.len());
        self.points.push(point);
        true
    }

    pub fn get(&self, id: ElementId) -> Option<&RawPoint> {
        self.by_id.get(&id).map(|&i| &self.points[i])
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Points in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &RawPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The merged raw dataset for one run.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    points: PointIndex,
    routes: Vec<RawRoute>,
}

impl ElementStore {
    /// Merge batches in order.
    ///
    /// The first record seen for an identifier wins; later duplicates are
    /// dropped without being validated. An unavailable or empty mandatory
    /// batch fails the run with [`BuildError::FetchFailure`]; other
    /// unavailable batches are logged and contribute nothing. Any kept
    /// element that fails validation fails the run with
    /// [`BuildError::MalformedElement`].
    pub fn merge(batches: Vec<Batch>) -> Result<Self, BuildError> {
        let mut store = Self::default();
        let mut seen = HashSet::new();

        for batch in batches {
            let elements = match batch.elements {
                Ok(elements) if batch.mandatory && elements.is_empty() => {
                    return Err(BuildError::FetchFailure {
                        batch: batch.label,
                        reason: "no elements returned".to_string(),
                    });
                }
                Ok(elements) => elements,
                Err(reason) if batch.mandatory => {
                    return Err(BuildError::FetchFailure {
                        batch: batch.label,
                        reason,
                    });
                }
                Err(reason) => {
                    warn!(batch = %batch.label, %reason, "Skipping unavailable batch");
                    continue;
                }
            };

            let mut added = 0;
            for element in &elements {
                if !seen.insert(element.id()) {
                    continue;
                }
                store.push(convert_element(element)?);
                added += 1;
            }

            info!(batch = %batch.label, added, total = elements.len(), "Merged batch");
        }

        Ok(store)
    }

    fn push(&mut self, element: RawElement) {
        match element {
            RawElement::Point(point) => {
                self.points.insert(point);
            }
            RawElement::Route(route) => self.routes.push(route),
            RawElement::Way(_) => {}
        }
    }

    pub fn points(&self) -> &PointIndex {
        &self.points
    }

    /// Routes in first-seen order.
    pub fn routes(&self) -> &[RawRoute] {
        &self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overpass::{Element, MemberDto, NodeDto, RelationDto, WayDto};
    use std::collections::BTreeMap;

    fn node(id: i64, name: &str) -> Element {
        Element::Node(NodeDto {
            id,
            lat: Some(43.0),
            lon: Some(11.0),
            tags: BTreeMap::from([("name".to_string(), name.to_string())]),
        })
    }

    fn relation(id: i64, refs: &[i64]) -> Element {
        Element::Relation(RelationDto {
            id,
            tags: BTreeMap::new(),
            members: refs
                .iter()
                .map(|&r| MemberDto {
                    kind: "node".into(),
                    reference: r,
                    role: None,
                })
                .collect(),
        })
    }

    #[test]
    fn partitions_points_and_routes() {
        let batch = Batch::available(
            "1/1",
            true,
            vec![
                relation(100, &[1, 2]),
                node(1, "A"),
                Element::Way(WayDto {
                    id: 50,
                    tags: BTreeMap::new(),
                }),
                node(2, "B"),
            ],
        );

        let store = ElementStore::merge(vec![batch]).unwrap();
        assert_eq!(store.points().len(), 2);
        assert_eq!(store.routes().len(), 1);
        assert_eq!(store.routes()[0].id, ElementId(100));

        let ids: Vec<_> = store.points().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ElementId(1), ElementId(2)]);
    }

    #[test]
    fn first_batch_wins_on_duplicate_ids() {
        let first = Batch::available("1/2", true, vec![node(1, "First")]);
        let second = Batch::available("2/2", false, vec![node(1, "Second"), node(2, "Other")]);

        let store = ElementStore::merge(vec![first, second]).unwrap();
        assert_eq!(store.points().len(), 2);
        assert_eq!(store.points().get(ElementId(1)).unwrap().tag("name"), Some("First"));
    }

    #[test]
    fn mandatory_unavailable_batch_is_fatal() {
        let batch = Batch::unavailable("1/1", true, "HTTP error: timed out");
        let err = ElementStore::merge(vec![batch]).unwrap_err();
        assert!(matches!(err, BuildError::FetchFailure { .. }));
    }

    #[test]
    fn mandatory_empty_batch_is_fatal() {
        let batch = Batch::available("1/1", true, vec![]);
        let err = ElementStore::merge(vec![batch]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "mandatory batch 1/1 unavailable: no elements returned"
        );
    }

    #[test]
    fn optional_unavailable_batch_is_skipped() {
        let first = Batch::available("1/2", true, vec![node(1, "A")]);
        let second = Batch::unavailable("2/2", false, "rate limited");

        let store = ElementStore::merge(vec![first, second]).unwrap();
        assert_eq!(store.points().len(), 1);
    }

    #[test]
    fn malformed_point_is_fatal() {
        let broken = Element::Node(NodeDto {
            id: 7,
            lat: None,
            lon: None,
            tags: BTreeMap::new(),
        });
        let batch = Batch::available("1/1", true, vec![broken]);

        let err = ElementStore::merge(vec![batch]).unwrap_err();
        match err {
            BuildError::MalformedElement { id, .. } => assert_eq!(id, ElementId(7)),
            other => panic!("expected MalformedElement, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_of_kept_element_is_not_validated() {
        let broken = Element::Node(NodeDto {
            id: 1,
            lat: None,
            lon: None,
            tags: BTreeMap::new(),
        });
        let batch = Batch::available("1/1", true, vec![node(1, "A"), broken]);

        assert!(ElementStore::merge(vec![batch]).is_ok());
    }

    #[test]
    fn point_index_keeps_first_insert() {
        let mut index = PointIndex::new();
        let point = |name: &str| RawPoint {
            id: ElementId(1),
            latitude: 0.0,
            longitude: 0.0,
            tags: BTreeMap::from([("name".to_string(), name.to_string())]),
        };

        assert!(index.insert(point("a")));
        assert!(!index.insert(point("b")));
        assert_eq!(index.len(), 1);
        assert_eq!(index.get(ElementId(1)).unwrap().tag("name"), Some("a"));
        assert!(index.contains(ElementId(1)));
        assert!(!index.contains(ElementId(2)));
    }
}
