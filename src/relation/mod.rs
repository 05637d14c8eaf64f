//! Resolves turn restrictions and associated streets across the
//! two passes over a source.
//!
//! The first pass hands every relation to
//! [`Extractor::collect_relation_members`], which records only member
//! identities. The second pass visits every entity in stream order,
//! and [`Extractor::finish`] consumes the run, yielding the
//! [`GeometryStore`].
//!
//! ```rust
//! use geo::line_string;
//! use roadnet::{Classifier, Extractor, Tags, Way};
//!
//! let mut extractor = Extractor::new(Classifier::default());
//! let tags: Tags = [("highway", "residential")].into_iter().collect();
//! extractor.visit_way(Way::new(1, line_string![(x: 0., y: 0.), (x: 1., y: 0.)], tags));
//!
//! let store = extractor.finish();
//! assert_eq!(store.roads().len(), 1);
//! ```

pub mod index;
pub mod restriction;

#[doc(hidden)]
mod test;

#[doc(inline)]
pub use index::{RelationIndex, RelationKind, Street};
#[doc(inline)]
pub use restriction::{Restriction, RestrictionKind};

use log::debug;

use crate::classify::{Classified, Classifier, Poi, Road};
use crate::element::{Element, MemberType, Node, Relation, Way};
use crate::store::GeometryStore;

/// Members of a tracked relation, for the source to resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberIds {
    pub node_ids: Vec<i64>,
    pub way_ids: Vec<i64>,
}

/// The state of one extraction run.
#[derive(Debug)]
pub struct Extractor {
    classifier: Classifier,
    index: RelationIndex,
    roads: Vec<Road>,
    pois: Vec<Poi>,
    restrictions: Vec<Restriction>,
}

impl Extractor {
    pub fn new(classifier: Classifier) -> Self {
        Extractor {
            classifier,
            index: RelationIndex::default(),
            roads: vec![],
            pois: vec![],
            restrictions: vec![],
        }
    }

    /// First pass. Records membership of restriction and associated
    /// street relations, ignoring every other relation.
    pub fn collect_relation_members(&mut self, relation: &Relation) -> MemberIds {
        let mut members = MemberIds::default();
        if self.index.record(relation).is_none() {
            return members;
        }

        for reference in relation.refs.iter() {
            match reference.id.variant {
                MemberType::Node => members.node_ids.push(reference.id.identifier),
                MemberType::Way => members.way_ids.push(reference.id.identifier),
                MemberType::Relation => {}
            }
        }

        members
    }

    pub fn visit(&mut self, element: Element) {
        match element {
            Element::Node(node) => self.visit_node(node),
            Element::Way(way) => self.visit_way(way),
            Element::Relation(relation) => self.visit_relation(relation),
        }
    }

    #[inline]
    pub fn visit_node(&mut self, node: Node) {
        self.accept(Element::Node(node));
    }

    #[inline]
    pub fn visit_way(&mut self, way: Way) {
        self.accept(Element::Way(way));
    }

    pub fn visit_relation(&mut self, relation: Relation) {
        match RelationKind::of(&relation) {
            Some(RelationKind::Restriction) => {
                let tags = self.classifier.filter().filter(relation.tags.clone()).tags;
                self.restrictions
                    .push(Restriction::from_relation(relation, tags));
            }
            Some(RelationKind::AssociatedStreet) => {
                let released = self.index.resolve_street(&relation);
                let street = self.index.street_name(relation.id).map(str::to_owned);

                for element in released {
                    self.classify(element, street.as_deref());
                }
            }
            None => {}
        }
    }

    /// Classifies an entity now, or holds it back until the name of
    /// its street is known.
    fn accept(&mut self, element: Element) {
        let entry = element.entry();
        let street = match self.index.street_of(&entry) {
            Street::Pending(relation_id) => {
                self.index.defer(relation_id, element);
                return;
            }
            Street::Named(name) => Some(name.to_owned()),
            Street::Unrelated | Street::Unnamed => None,
        };

        self.classify(element, street.as_deref());
    }

    fn classify(&mut self, element: Element, street: Option<&str>) {
        let classified = match element {
            Element::Node(node) => self.classifier.classify_node(node, street),
            Element::Way(way) => {
                let rel_ids = self.index.restrictions_of(&way.entry());
                self.classifier.classify_way(way, street, rel_ids)
            }
            Element::Relation(_) => None,
        };

        match classified {
            Some(Classified::Road(road)) => self.roads.push(road),
            Some(Classified::Poi(poi)) => self.pois.push(poi),
            None => {}
        }
    }

    /// Ends the run. Entities whose street relation never arrived are
    /// classified without inheriting a name.
    pub fn finish(mut self) -> GeometryStore {
        let pending = self.index.drain_pending();
        if !pending.is_empty() {
            debug!(
                "{} entities never saw their street relation",
                pending.len()
            );
        }

        for element in pending {
            self.classify(element, None);
        }

        debug!(
            "Extracted {} roads, {} pois and {} restrictions",
            self.roads.len(),
            self.pois.len(),
            self.restrictions.len()
        );

        let pois = self
            .pois
            .into_iter()
            .zip(1u64..)
            .map(|(poi, id)| poi.with_id(id))
            .collect();

        GeometryStore::new(self.roads, pois, self.restrictions)
    }
}
