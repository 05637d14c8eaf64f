#![cfg(test)]

use geo::{line_string, point};

use crate::classify::Classifier;
use crate::element::{Node, OsmEntryId, Reference, References, Relation, Tags, Way};
use crate::relation::{Extractor, MemberIds, RestrictionKind};

fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs.iter().copied().collect()
}

fn street(id: i64, name: Option<&str>, members: &[OsmEntryId]) -> Relation {
    let mut tags = tags(&[("type", "associatedStreet")]);
    if let Some(name) = name {
        tags.insert("name", name);
    }

    Relation::new(
        id,
        tags,
        members
            .iter()
            .map(|id| Reference::with_role(*id, "house"))
            .collect(),
    )
}

fn house(id: i64) -> Node {
    Node::new(
        id,
        point! { x: 1., y: 1. },
        tags(&[("addr:housenumber", "4"), ("addr:street", "Old Rd")]),
    )
}

fn road(id: i64) -> Way {
    Way::new(
        id,
        line_string![(x: 0., y: 0.), (x: 1., y: 0.)],
        tags(&[("highway", "primary")]),
    )
}

fn restriction(id: i64, from: i64, via: i64, to: i64) -> Relation {
    Relation::new(
        id,
        tags(&[
            ("type", "restriction"),
            ("restriction", "no_left_turn"),
            ("ref", "R-9"),
            ("source", "survey"),
        ]),
        References::from(vec![
            Reference::with_role(OsmEntryId::way(from), "from"),
            Reference::with_role(OsmEntryId::node(via), "via"),
            Reference::with_role(OsmEntryId::way(to), "to"),
        ]),
    )
}

#[test_log::test]
fn collects_only_tracked_relations() {
    let mut extractor = Extractor::new(Classifier::default());

    let members = extractor.collect_relation_members(&restriction(1, 10, 5, 11));
    assert_eq!(
        members,
        MemberIds {
            node_ids: vec![5],
            way_ids: vec![10, 11],
        }
    );

    let route = Relation::new(
        2,
        tags(&[("type", "route")]),
        References::from(vec![Reference::without_role(OsmEntryId::way(10))]),
    );
    assert_eq!(extractor.collect_relation_members(&route), MemberIds::default());
}

#[test_log::test]
fn restriction_members_carry_rel_ids() {
    let mut extractor = Extractor::new(Classifier::default());
    let relation = restriction(8, 10, 5, 11);

    extractor.collect_relation_members(&relation);
    extractor.visit_way(road(10));
    extractor.visit_way(road(11));
    extractor.visit_way(road(12));
    extractor.visit_relation(relation);

    let store = extractor.finish();
    let rel_ids = |id| store.road(id).map(|road| road.rel_ids.iter().copied().collect::<Vec<_>>());

    assert_eq!(rel_ids(10), Some(vec![8]));
    assert_eq!(rel_ids(11), Some(vec![8]));
    assert_eq!(rel_ids(12), Some(vec![]));

    let restriction = &store.restrictions()[0];
    assert_eq!(restriction.relation_id, 8);
    assert_eq!(restriction.r#ref.as_deref(), Some("R-9"));
    assert_eq!(restriction.from_way_id, Some(10));
    assert_eq!(restriction.to_way_id, Some(11));
    assert_eq!(restriction.via, Some(OsmEntryId::node(5)));
    assert_eq!(restriction.kind, Some(RestrictionKind::NoLeftTurn));
    assert_eq!(restriction.tags.get("source"), None);
    assert_eq!(restriction.members.len(), 3);
}

#[test_log::test]
fn dangling_restriction_is_kept() {
    let mut extractor = Extractor::new(Classifier::default());
    let relation = Relation::new(
        3,
        tags(&[("type", "restriction")]),
        References::from(vec![Reference::with_role(OsmEntryId::way(99), "from")]),
    );

    extractor.collect_relation_members(&relation);
    extractor.visit_relation(relation);

    let store = extractor.finish();
    let restriction = &store.restrictions()[0];
    assert_eq!(restriction.from_way_id, Some(99));
    assert_eq!(restriction.to_way_id, None);
    assert_eq!(restriction.kind, None);
}

#[test_log::test]
fn street_inherited_when_relation_follows_members() {
    let mut extractor = Extractor::new(Classifier::default());
    let relation = street(20, Some("Main St"), &[OsmEntryId::node(1)]);

    extractor.collect_relation_members(&relation);
    extractor.visit_node(house(1));
    extractor.visit_relation(relation);

    let store = extractor.finish();
    assert_eq!(store.pois().len(), 1);
    assert_eq!(store.pois()[0].tags.get("addr:street"), Some("Main St"));
}

#[test_log::test]
fn street_inherited_when_relation_precedes_members() {
    let mut extractor = Extractor::new(Classifier::default());
    let relation = street(20, Some("Main St"), &[OsmEntryId::node(1)]);

    extractor.collect_relation_members(&relation);
    extractor.visit_relation(relation);
    extractor.visit_node(house(1));

    let store = extractor.finish();
    assert_eq!(store.pois()[0].tags.get("addr:street"), Some("Main St"));
}

#[test_log::test]
fn unnamed_street_keeps_own_address() {
    let mut extractor = Extractor::new(Classifier::default());
    let relation = street(20, None, &[OsmEntryId::node(1)]);

    extractor.collect_relation_members(&relation);
    extractor.visit_node(house(1));
    extractor.visit_relation(relation);

    let store = extractor.finish();
    assert_eq!(store.pois()[0].tags.get("addr:street"), Some("Old Rd"));
}

#[test_log::test]
fn members_of_missing_relation_still_classified() {
    let mut extractor = Extractor::new(Classifier::default());
    let relation = street(20, Some("Main St"), &[OsmEntryId::node(1)]);

    extractor.collect_relation_members(&relation);
    extractor.visit_node(house(1));

    let store = extractor.finish();
    assert_eq!(store.pois().len(), 1);
    assert_eq!(store.pois()[0].tags.get("addr:street"), Some("Old Rd"));
}

#[test_log::test]
fn pois_are_numbered_sequentially() {
    let mut extractor = Extractor::new(Classifier::default());
    for id in [40, 30, 50] {
        extractor.visit_node(Node::new(id, point! { x: 0., y: 0. }, tags(&[("shop", "bakery")])));
    }

    let store = extractor.finish();
    let ids = store.pois().iter().map(|poi| poi.id()).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3]);
}
