//! Run-scoped relation membership, built in the first pass over
//! the source and consulted while entities are visited.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::element::{Element, MemberType, OsmEntryId, Relation};

pub const RESTRICTION: &str = "restriction";
pub const ASSOCIATED_STREET: &str = "associatedStreet";

/// The relation kinds whose membership is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Restriction,
    AssociatedStreet,
}

impl RelationKind {
    pub fn of(relation: &Relation) -> Option<RelationKind> {
        match relation.kind()? {
            RESTRICTION => Some(RelationKind::Restriction),
            ASSOCIATED_STREET => Some(RelationKind::AssociatedStreet),
            _ => None,
        }
    }
}

type Memberships = FxHashMap<OsmEntryId, SmallVec<[i64; 2]>>;

/// Where an entity stands with respect to street inheritance.
#[derive(Debug, PartialEq, Eq)]
pub enum Street<'a> {
    /// Not a member of any associated street.
    Unrelated,
    /// The street relation was seen, but carries no name.
    Unnamed,
    Named(&'a str),
    /// The street relation has not been seen yet.
    Pending(i64),
}

#[derive(Debug, Default)]
pub struct RelationIndex {
    restrictions: Memberships,
    streets: Memberships,
    /// Associated street relation id to its name, once visited.
    street_names: FxHashMap<i64, Option<String>>,
    /// Entities waiting on their street relation.
    pending: FxHashMap<i64, Vec<Element>>,
}

impl RelationIndex {
    /// Records the node and way members of a tracked relation,
    /// returning the kind it was recorded as.
    pub fn record(&mut self, relation: &Relation) -> Option<RelationKind> {
        let kind = RelationKind::of(relation)?;
        let memberships = match kind {
            RelationKind::Restriction => &mut self.restrictions,
            RelationKind::AssociatedStreet => &mut self.streets,
        };

        for reference in relation.refs.iter() {
            if matches!(reference.id.variant, MemberType::Relation) {
                continue;
            }

            let relations = memberships.entry(reference.id).or_default();
            if !relations.contains(&relation.id) {
                relations.push(relation.id);
            }
        }

        Some(kind)
    }

    /// Restriction relations `entry` is a member of, in discovery order.
    pub fn restrictions_of(&self, entry: &OsmEntryId) -> IndexSet<i64> {
        self.restrictions
            .get(entry)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Resolves the street `entry` inherits from. A member of several
    /// street relations follows the first one recorded.
    pub fn street_of(&self, entry: &OsmEntryId) -> Street<'_> {
        let Some(&relation_id) = self.streets.get(entry).and_then(|ids| ids.first()) else {
            return Street::Unrelated;
        };

        match self.street_names.get(&relation_id) {
            Some(Some(name)) => Street::Named(name),
            Some(None) => Street::Unnamed,
            None => Street::Pending(relation_id),
        }
    }

    pub fn defer(&mut self, relation_id: i64, element: Element) {
        self.pending.entry(relation_id).or_default().push(element);
    }

    /// Learns a street relation's name and releases the members
    /// which were waiting on it.
    pub fn resolve_street(&mut self, relation: &Relation) -> Vec<Element> {
        self.street_names
            .insert(relation.id, relation.tags.name().map(str::to_owned));

        self.pending.remove(&relation.id).unwrap_or_default()
    }

    pub fn street_name(&self, relation_id: i64) -> Option<&str> {
        self.street_names.get(&relation_id)?.as_deref()
    }

    /// Every entity still waiting, ordered by the relation it waits on.
    pub fn drain_pending(&mut self) -> Vec<Element> {
        let mut pending = self.pending.drain().collect::<Vec<_>>();
        pending.sort_unstable_by_key(|(relation_id, _)| *relation_id);
        pending.into_iter().flat_map(|(_, elements)| elements).collect()
    }
}
