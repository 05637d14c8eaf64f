#![cfg(test)]

use geo::{line_string, point, polygon, Rect};
use indexmap::IndexSet;

use crate::classify::{Poi, PoiGeometry, PoiSource, Road};
use crate::element::{OsmEntryId, Reference, References, Tags};
use crate::relation::{Restriction, RestrictionKind};
use crate::store::{GeometryStore, TableError, TableStore};

fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs.iter().copied().collect()
}

fn road(way_id: i64, from: (f64, f64), to: (f64, f64)) -> Road {
    Road::new(
        way_id,
        tags(&[("highway", "residential")]),
        [7].into_iter().collect::<IndexSet<_>>(),
        line_string![(x: from.0, y: from.1), (x: to.0, y: to.1)],
    )
}

fn restriction(relation_id: i64, from: i64, to: i64) -> Restriction {
    Restriction {
        relation_id,
        r#ref: Some("A-1".to_string()),
        from_way_id: Some(from),
        to_way_id: Some(to),
        via: Some(OsmEntryId::node(3)),
        kind: Some(RestrictionKind::NoUTurn),
        tags: tags(&[("type", "restriction")]),
        members: References::from(vec![
            Reference::with_role(OsmEntryId::way(from), "from"),
            Reference::with_role(OsmEntryId::way(to), "to"),
        ]),
    }
}

#[test_log::test]
fn every_restriction_between_ways_is_kept() {
    let store = GeometryStore::new(
        vec![],
        vec![],
        vec![
            restriction(1, 10, 11),
            restriction(3, 12, 11),
            restriction(2, 10, 11),
        ],
    );

    let between = store
        .restrictions_between(10, 11)
        .map(|r| r.relation_id)
        .collect::<Vec<_>>();

    assert_eq!(between, vec![1, 2]);
    assert_eq!(store.restrictions_between(11, 10).count(), 0);
}

#[test_log::test]
fn roads_within_envelope() {
    let store = GeometryStore::new(
        vec![road(1, (0., 0.), (1., 1.)), road(2, (5., 5.), (6., 6.))],
        vec![],
        vec![],
    );

    let rect = Rect::new((0.5, 0.5), (2., 2.));
    let found = store.roads_within(&rect).map(|road| road.way_id).collect::<Vec<_>>();

    assert_eq!(found, vec![1]);
    assert_eq!(store.road(2).map(|road| road.way_id), Some(2));
    assert!(store.road(3).is_none());
}

#[test_log::test]
fn tables_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let tables = TableStore::create(dir.path()).expect("create");

    let pois = vec![
        Poi::new(
            PoiSource::Node(4),
            tags(&[("amenity", "cafe")]),
            PoiGeometry::Point(point! { x: 1.5, y: -2.25 }),
        )
        .with_id(1),
        Poi::new(
            PoiSource::Way(9),
            tags(&[("leisure", "park")]),
            PoiGeometry::Polygon(polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 0.)]),
        )
        .with_id(2),
    ];

    let store = GeometryStore::new(
        vec![road(1, (0., 0.), (1., 1.))],
        pois,
        vec![restriction(5, 1, 2)],
    );

    tables.write_store(&store).expect("write");
    let loaded = tables.load_store().expect("load");

    assert_eq!(loaded.roads(), store.roads());
    assert_eq!(loaded.pois(), store.pois());
    assert_eq!(loaded.restrictions(), store.restrictions());
}

#[test_log::test]
fn rewrite_replaces_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let tables = TableStore::create(dir.path()).expect("create");

    let roads = [road(1, (0., 0.), (1., 1.)), road(2, (0., 1.), (1., 0.))];
    assert_eq!(tables.write::<Road, _>(roads.iter()).ok(), Some(2));
    assert_eq!(tables.write::<Road, _>(&roads[..1]).ok(), Some(1));

    let read = tables.read::<Road>().expect("read");
    assert_eq!(read.len(), 1);
    assert!(!tables.path::<Road>().with_extension("jsonl.partial").exists());
}

#[test_log::test]
fn missing_table_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let tables = TableStore::new(dir.path());

    assert!(matches!(
        tables.read::<Road>(),
        Err(TableError::Missing("roads"))
    ));
}
